//! Lineup-level aggregation over per-player insights.

use super::models::{CoachingInsight, LineupCoaching, LineupSlot, Pivot};
use crate::{util::mean, PlayerId, Position, TeamCode};
use std::collections::HashSet;

const HIGH_CONFIDENCE: u8 = 80;
const LOW_CONFIDENCE: u8 = 60;
const PIVOT_BELOW: u8 = 70;
const PIVOT_CONFIDENCE: u8 = 75;

pub const AGGRESSIVE_STRATEGY: &str =
    "🔥 AGGRESSIVE WEEK: Multiple high-confidence plays detected. This lineup has serious upside potential!";
pub const CALCULATED_RISK_STRATEGY: &str =
    "⚠️ CALCULATED RISK: Some boom-or-bust plays in this lineup. High ceiling, but manage expectations.";
pub const BALANCED_STRATEGY: &str =
    "📊 BALANCED APPROACH: Solid, consistent lineup with good floor and reasonable ceiling.";

/// Aggregate already generated insights for `lineup`.
pub fn summarize_lineup(lineup: &[LineupSlot], insights: Vec<CoachingInsight>) -> LineupCoaching {
    let confidences: Vec<f64> = insights.iter().map(|i| f64::from(i.confidence)).collect();
    LineupCoaching {
        overall_strategy: overall_strategy(&insights).to_string(),
        risk_assessment: assess_risk(&insights).to_string(),
        confidence: mean(&confidences),
        stack_recommendations: stack_recommendations(lineup),
        pivots: pivot_suggestions(&insights),
        player_insights: insights,
    }
}

/// Three or more plays above 80 is aggressive; otherwise two or more below
/// 60 is a calculated risk.
pub fn overall_strategy(insights: &[CoachingInsight]) -> &'static str {
    let high = insights.iter().filter(|i| i.confidence > HIGH_CONFIDENCE).count();
    let low = insights.iter().filter(|i| i.confidence < LOW_CONFIDENCE).count();
    if high >= 3 {
        AGGRESSIVE_STRATEGY
    } else if low >= 2 {
        CALCULATED_RISK_STRATEGY
    } else {
        BALANCED_STRATEGY
    }
}

pub fn assess_risk(insights: &[CoachingInsight]) -> &'static str {
    let score: i32 = insights
        .iter()
        .map(|i| {
            if i.confidence > HIGH_CONFIDENCE {
                1
            } else if i.confidence < LOW_CONFIDENCE {
                -1
            } else {
                0
            }
        })
        .sum();
    match score {
        s if s >= 2 => "LOW RISK - High floor lineup",
        s if s <= -2 => "HIGH RISK - Boom or bust potential",
        _ => "MODERATE RISK - Balanced ceiling and floor",
    }
}

pub fn stack_recommendations(lineup: &[LineupSlot]) -> Vec<String> {
    let mut recs = Vec::new();

    if let Some(qb) = lineup.iter().find(|p| p.position == Position::QB) {
        let has_teammate_wr = lineup
            .iter()
            .any(|p| p.position == Position::WR && p.team == qb.team);
        if has_teammate_wr {
            recs.push(format!("🔗 STACK ALERT: {} + teammate WR in high-pace matchup", qb.name));
        }
    }

    if let Some(team) = first_repeated_team(lineup) {
        recs.push(format!(
            "🎯 GAME STACK: Multiple players from {team} in projected shootout"
        ));
    }

    if recs.is_empty() {
        recs.push("Consider stacking QB with WR for correlation upside".to_string());
    }
    recs
}

fn first_repeated_team(lineup: &[LineupSlot]) -> Option<&TeamCode> {
    let mut seen = HashSet::new();
    lineup.iter().map(|p| &p.team).find(|team| !seen.insert(*team))
}

pub fn pivot_suggestions(insights: &[CoachingInsight]) -> Vec<Pivot> {
    insights
        .iter()
        .filter(|i| i.confidence < PIVOT_BELOW)
        .map(|i| pivot_for(&i.player_id))
        .collect()
}

fn pivot_for(player_id: &PlayerId) -> Pivot {
    Pivot {
        original_player: player_id.clone(),
        suggested_pivot: "Alternative player in similar price range".to_string(),
        reason: "Higher confidence play available".to_string(),
        confidence: PIVOT_CONFIDENCE,
    }
}
