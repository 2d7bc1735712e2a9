//! Pattern, projection and training status commands

use std::fmt::Write;

use serde::Serialize;

use super::common::{to_json, CommandContext};
use crate::{
    cli::HistoryArgs,
    history::models::{PlayerInsights, PlayerPattern, ProjectionContext},
    training::model::{MlEnhancedProjection, TrainingStatus},
    PlayerId, Position, Result, TeamCode, Week,
};

/// A player's pattern together with its qualitative reading
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatternReport {
    pub pattern: PlayerPattern,
    pub insights: PlayerInsights,
}

/// Parameters for the project command
#[derive(Debug, Clone)]
pub struct ProjectParams {
    pub player_id: PlayerId,
    pub position: Position,
    pub opponent: TeamCode,
    pub week: Week,
    pub base_projection: f64,
    pub is_home: bool,
    pub weather: Option<String>,
    pub as_json: bool,
}

impl ProjectParams {
    pub fn context(&self) -> ProjectionContext {
        let context = ProjectionContext::new(self.opponent.clone(), self.week).at_home(self.is_home);
        match &self.weather {
            Some(weather) => context.with_weather(weather.clone()),
            None => context,
        }
    }
}

/// Handle the pattern command
pub async fn handle_pattern(player_id: &PlayerId, as_json: bool, history: &HistoryArgs) -> Result<()> {
    let ctx = CommandContext::from_args(history)?;
    print!("{}", pattern_output(&ctx, player_id, as_json).await?);
    Ok(())
}

/// Stdout of the pattern command.
pub async fn pattern_output(ctx: &CommandContext, player_id: &PlayerId, as_json: bool) -> Result<String> {
    ctx.load_history().await;

    let (Some(pattern), Some(insights)) = (
        ctx.store.get_player_pattern(player_id),
        ctx.store.get_player_insights(player_id),
    ) else {
        if as_json {
            return to_json(&serde_json::Value::Null);
        }
        return Ok(format!("No historical games found for {player_id}\n"));
    };

    if as_json {
        return to_json(&PatternReport { pattern, insights });
    }
    Ok(render_pattern(&pattern, &insights))
}

/// Handle the project command
pub async fn handle_project(params: ProjectParams, history: &HistoryArgs) -> Result<()> {
    let ctx = CommandContext::from_args(history)?;
    print!("{}", project_output(&ctx, &params).await?);
    Ok(())
}

/// Stdout of the project command.
pub async fn project_output(ctx: &CommandContext, params: &ProjectParams) -> Result<String> {
    ctx.load_and_train().await?;

    let projection = ctx.trainer.enhance_projection(
        &params.player_id,
        params.position,
        params.base_projection,
        &params.context(),
    )?;

    if params.as_json {
        return to_json(&projection);
    }
    Ok(render_projection(params, &projection))
}

/// Handle the train-status command
pub async fn handle_train_status(as_json: bool, history: &HistoryArgs) -> Result<()> {
    let ctx = CommandContext::from_args(history)?;
    print!("{}", train_status_output(&ctx, as_json).await?);
    Ok(())
}

/// Stdout of the train-status command.
pub async fn train_status_output(ctx: &CommandContext, as_json: bool) -> Result<String> {
    ctx.load_and_train().await?;

    let status = ctx.trainer.training_status();
    if as_json {
        return to_json(&status);
    }
    Ok(render_status(&status))
}

// Writing into a String cannot fail, so the fmt results below are ignored.

fn render_pattern(pattern: &PlayerPattern, insights: &PlayerInsights) -> String {
    let mut out = String::new();
    let m = &pattern.historical_metrics;
    let _ = writeln!(
        out,
        "{} ({} {}) - {} games, {:.2} pts/game",
        pattern.name, pattern.position, pattern.team, pattern.games_played, pattern.average_points
    );
    let _ = writeln!(out, "  Consistency: {:.0}/100 ({})", m.consistency_score, insights.consistency);
    let _ = writeln!(out, "  Ceiling:     {:.1} ({})", m.ceiling_score, insights.ceiling);
    let _ = writeln!(out, "  Floor:       {:.1} ({})", m.floor_score, insights.floor);
    let _ = writeln!(out, "  Trend:       {:+.2}/game ({})", m.trend_slope, insights.trend);
    let _ = writeln!(
        out,
        "  Matchup sensitivity {:.1}, weather impact {:.1}, game script dependency {:.1}",
        m.matchup_sensitivity, m.weather_impact, m.game_script_dependency
    );
    let s = &pattern.seasonal_patterns;
    let _ = writeln!(
        out,
        "  Seasonal multipliers: early {:.2}, mid {:.2}, late {:.2}",
        s.early_season_multiplier, s.mid_season_multiplier, s.late_season_multiplier
    );
    for (opponent, record) in &pattern.matchup_history {
        let _ = writeln!(
            out,
            "  vs {opponent}: {:.1} pts over {} games",
            record.average_points, record.sample_size
        );
    }
    if !insights.strengths.is_empty() {
        let _ = writeln!(out, "  Strengths: {}", insights.strengths.join(", "));
    }
    if !insights.weaknesses.is_empty() {
        let _ = writeln!(out, "  Weaknesses: {}", insights.weaknesses.join(", "));
    }
    out
}

fn render_projection(params: &ProjectParams, projection: &MlEnhancedProjection) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{} ({}) vs {}, week {}",
        params.player_id, params.position, params.opponent, params.week
    );
    let _ = writeln!(
        out,
        "  Base {:.2} -> {:.2} pts ({}% confidence, {}% boom)",
        params.base_projection,
        projection.enhanced_projection,
        projection.confidence,
        projection.boom_probability
    );
    if let Some(ml) = projection.ml_projection {
        let _ = writeln!(out, "  Model projection: {ml:.2} pts");
    }
    for line in &projection.explanation {
        let _ = writeln!(out, "  - {line}");
    }
    out
}

fn render_status(status: &TrainingStatus) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "✓ {} models trained, average accuracy {:.0}%",
        status.models_count, status.avg_accuracy
    );
    match status.last_training_date {
        Some(when) => {
            let _ = writeln!(out, "Last trained: {}", when.format("%Y-%m-%d %H:%M:%S UTC"));
        }
        None => {
            let _ = writeln!(out, "No models trained");
        }
    }
    for (position, model) in &status.position_models {
        let _ = writeln!(
            out,
            "  {position}: points {:.1}%, boom {:.1}%",
            model.accuracy, model.boom_accuracy
        );
    }
    out
}
