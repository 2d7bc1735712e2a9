//! In-game text updates.

use super::models::LiveGameStats;

/// Pick the first live template whose trigger holds.
pub fn live_insight(stats: &LiveGameStats) -> String {
    let name = &stats.player_name;

    if stats.left_side_carries >= 3 && stats.left_side_yards > 35 {
        return format!(
            "🚨 TREND CONFIRMED: {name} just scored! He's had {} carries to the left for {} yards. \
             The pre-game analysis is playing out perfectly!",
            stats.left_side_carries, stats.left_side_yards
        );
    }

    if stats.red_zone_targets >= 2 && stats.receptions > 1 {
        return format!(
            "🎯 RED ZONE DOMINATION: {name} has {} red zone targets and {} catches. \
             The touchdown upside we predicted is materializing!",
            stats.red_zone_targets, stats.receptions
        );
    }

    if stats.passing_yards > 200 && stats.time_in_pocket > 3.0 {
        return format!(
            "⚡ CLEAN POCKET MAGIC: {name} has {} passing yards with {}s average pocket time. \
             Our pressure analysis was spot on!",
            stats.passing_yards, stats.time_in_pocket
        );
    }

    format!(
        "📊 Game Update: {name} has {} fantasy points. Tracking as expected based on our pre-game analysis.",
        stats.points
    )
}
