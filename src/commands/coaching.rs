//! Insight, lineup, live and sport commands

use std::{fmt::Write, path::Path};

use super::common::{read_json, to_json, CommandContext};
use crate::{
    cli::HistoryArgs,
    coaching::{
        analytics::{AnalyticsStore, MemoryAnalyticsStore},
        models::{CoachingInsight, LineupCoaching, LineupSlot, LiveGameStats, SportAnalysis},
    },
    config::{EngineConfig, HistorySourceKind},
    PlayerId, Result, Week,
};

/// Handle the insight command
pub async fn handle_insight(
    player_id: &PlayerId,
    week: Week,
    analytics: &Path,
    as_json: bool,
    history: &HistoryArgs,
) -> Result<()> {
    let storage = MemoryAnalyticsStore::load(analytics).await?;
    let ctx = CommandContext::from_args(history)?;
    print!("{}", insight_output(&ctx, player_id, week, &storage, as_json).await?);
    Ok(())
}

/// Stdout of the insight command.
pub async fn insight_output(
    ctx: &CommandContext,
    player_id: &PlayerId,
    week: Week,
    storage: &dyn AnalyticsStore,
    as_json: bool,
) -> Result<String> {
    ctx.load_history().await;

    let insight = ctx
        .engine
        .generate_player_insight(player_id, week, storage)
        .await?;

    if as_json {
        return to_json(&insight);
    }
    Ok(render_insight(&insight))
}

/// Handle the lineup command
pub async fn handle_lineup(
    user_id: &str,
    week: Week,
    lineup: &Path,
    analytics: &Path,
    as_json: bool,
    history: &HistoryArgs,
) -> Result<()> {
    let slots: Vec<LineupSlot> = read_json(lineup).await?;
    let storage = MemoryAnalyticsStore::load(analytics).await?;
    let ctx = CommandContext::from_args(history)?;
    print!(
        "{}",
        lineup_output(&ctx, user_id, &slots, week, &storage, as_json).await?
    );
    Ok(())
}

/// Stdout of the lineup command.
pub async fn lineup_output(
    ctx: &CommandContext,
    user_id: &str,
    slots: &[LineupSlot],
    week: Week,
    storage: &dyn AnalyticsStore,
    as_json: bool,
) -> Result<String> {
    ctx.load_history().await;

    let coaching = ctx
        .engine
        .generate_lineup_coaching(user_id, slots, week, storage)
        .await?;

    if as_json {
        return to_json(&coaching);
    }
    Ok(render_lineup(&coaching))
}

/// Context for commands that need neither history nor trained models.
fn offline_context() -> Result<CommandContext> {
    CommandContext::new(EngineConfig {
        history: HistorySourceKind::Sample,
        ..EngineConfig::default()
    })
}

/// Handle the live command
pub async fn handle_live(player_id: Option<&PlayerId>, stats: &Path) -> Result<()> {
    let stats: LiveGameStats = read_json(stats).await?;
    let player_id = player_id
        .cloned()
        .unwrap_or_else(|| PlayerId::new(stats.player_name.clone()));

    let ctx = offline_context()?;
    println!("{}", ctx.engine.generate_live_insight(&player_id, &stats));
    Ok(())
}

/// Handle the sport command
pub fn handle_sport(sport: &str, player: &str, position: &str, team: &str, as_json: bool) -> Result<()> {
    let ctx = offline_context()?;
    let analysis = ctx.engine.generate_sport_analysis(sport, player, position, team);

    if as_json {
        print!("{}", to_json(&analysis)?);
    } else {
        print!("{}", render_sport(&analysis));
    }
    Ok(())
}

// Writing into a String cannot fail, so the fmt results below are ignored.

fn render_sport(analysis: &SportAnalysis) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", analysis.insight);
    let _ = writeln!(
        out,
        "  {} | confidence {}% | risk {}",
        analysis.recommendation, analysis.confidence, analysis.risk_level
    );
    let _ = writeln!(out, "  Upside: {}", analysis.upside);
    let _ = writeln!(out, "  Downside: {}", analysis.downside);
    out
}

fn render_insight(insight: &CoachingInsight) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", insight.insight);
    let _ = writeln!(
        out,
        "  {} | confidence {}% | risk {}",
        insight.recommendation, insight.confidence, insight.risk_level
    );
    let _ = writeln!(out, "  Upside: {}", insight.upside);
    let _ = writeln!(out, "  Downside: {}", insight.downside);
    for (key, value) in &insight.supporting_data {
        let _ = writeln!(out, "  {key}: {value}");
    }
    if let Some(ml) = &insight.ml_enhancement {
        let _ = writeln!(
            out,
            "  Projection: {:.2} pts ({}% boom)",
            ml.enhanced_projection, ml.boom_probability
        );
    }
    out
}

fn render_lineup(coaching: &LineupCoaching) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "Strategy: {}", coaching.overall_strategy);
    let _ = writeln!(out, "Risk: {}", coaching.risk_assessment);
    let _ = writeln!(out, "Confidence: {:.1}%", coaching.confidence);
    let _ = writeln!(out);
    for insight in &coaching.player_insights {
        let _ = writeln!(
            out,
            "• {} - {} ({}%)",
            insight.player_name, insight.recommendation, insight.confidence
        );
    }
    if !coaching.stack_recommendations.is_empty() {
        let _ = writeln!(out);
        for stack in &coaching.stack_recommendations {
            let _ = writeln!(out, "✓ {stack}");
        }
    }
    if !coaching.pivots.is_empty() {
        let _ = writeln!(out);
        for pivot in &coaching.pivots {
            let _ = writeln!(
                out,
                "⚠ {}: {} ({})",
                pivot.original_player, pivot.suggested_pivot, pivot.reason
            );
        }
    }
    out
}
