//! Coaching Insight Generator
//!
//! Turns pattern and model output into narrative recommendations for a
//! single player, a whole lineup, a live game, or a sport-level quick take.

pub mod analytics;
pub mod lineup;
pub mod live;
pub mod models;
pub mod rules;
pub mod sport;

#[cfg(test)]
mod tests;

use crate::{
    error::Result,
    history::models::ProjectionContext,
    training::ModelTrainer,
    util::round2,
    PlayerId, Week,
};
use analytics::{ActualOutcome, AnalyticsStore, InsightPatch};
use models::{CoachingInsight, HistoricalAnalysis, LineupCoaching, LineupSlot, LiveGameStats, SportAnalysis};
use sport::{Sport, TemplatePicker, ThreadRngPicker};
use std::{fmt::Display, sync::Arc};
use tracing::{debug, info, warn};

/// Base projection when analytics carry neither a projection nor recent games.
pub const DEFAULT_BASE_PROJECTION: f64 = 15.0;

/// Accuracy reported when the prediction or the outcome is unknown.
const UNKNOWN_ACCURACY: f64 = 50.0;

pub struct CoachingEngine {
    trainer: Arc<ModelTrainer>,
    picker: Box<dyn TemplatePicker>,
}

impl CoachingEngine {
    pub fn new(trainer: Arc<ModelTrainer>) -> Self {
        Self {
            trainer,
            picker: Box::new(ThreadRngPicker),
        }
    }

    pub fn with_picker(mut self, picker: Box<dyn TemplatePicker>) -> Self {
        self.picker = picker;
        self
    }

    pub fn trainer(&self) -> &Arc<ModelTrainer> {
        &self.trainer
    }

    /// Train on first use.
    async fn ensure_ready(&self) -> Result<()> {
        if !self.trainer.is_initialized() {
            self.trainer.initialize_training().await?;
        }
        Ok(())
    }

    /// Insight for one player in `week`.
    ///
    /// Store failures and missing analytics fall through to the generic
    /// insight; only a malformed model is an error.
    pub async fn generate_player_insight(
        &self,
        player_id: &PlayerId,
        week: Week,
        storage: &dyn AnalyticsStore,
    ) -> Result<CoachingInsight> {
        self.ensure_ready().await?;

        let player = or_miss("player analytics", storage.get_player_analytics(player_id).await);
        let opponent = or_miss("upcoming opponent", storage.get_upcoming_opponent(player_id, week).await);
        let defense = match &opponent {
            Some(team) => or_miss("defensive analytics", storage.get_defensive_analytics(team).await),
            None => None,
        };
        let pattern = self.trainer.store().get_player_pattern(player_id);

        if let (Some(player), Some(defense), Some(opponent)) = (&player, &defense, &opponent) {
            if let Some(rule) = rules::first_match(player, defense) {
                debug!(%player_id, ?rule, "insight rule matched");
                let mut insight = rule.build(player, defense, opponent);
                if rule.merges_projection() {
                    let base = player
                        .projected_points
                        .or_else(|| player.recent_average())
                        .unwrap_or(DEFAULT_BASE_PROJECTION);
                    let context = ProjectionContext::new(opponent.clone(), week);
                    let projection =
                        self.trainer
                            .enhance_projection(player_id, player.position, base, &context)?;
                    insight.supporting_data.insert(
                        "projection".to_string(),
                        format!(
                            "{:.2} pts ({}% boom)",
                            projection.enhanced_projection, projection.boom_probability
                        ),
                    );
                    insight.ml_enhancement = Some(projection);
                }
                insight.historical_analysis = pattern.as_ref().map(HistoricalAnalysis::from);
                return Ok(insight);
            }
        }

        let name = player
            .as_ref()
            .map_or_else(|| player_id.to_string(), |p| p.player_name.clone());
        Ok(rules::generic_insight(player_id, &name, opponent.as_ref(), pattern.as_ref()))
    }

    /// Per-player insights plus lineup strategy, risk, stacks, and pivots.
    pub async fn generate_lineup_coaching(
        &self,
        user_id: &str,
        lineup: &[LineupSlot],
        week: Week,
        storage: &dyn AnalyticsStore,
    ) -> Result<LineupCoaching> {
        let mut insights = Vec::with_capacity(lineup.len());
        for slot in lineup {
            insights.push(self.generate_player_insight(&slot.id, week, storage).await?);
        }
        let coaching = lineup::summarize_lineup(lineup, insights);
        info!(
            user_id,
            players = lineup.len(),
            confidence = coaching.confidence,
            "lineup coaching generated"
        );
        Ok(coaching)
    }

    pub fn generate_live_insight(&self, player_id: &PlayerId, stats: &LiveGameStats) -> String {
        debug!(%player_id, "live insight");
        live::live_insight(stats)
    }

    /// Quick take for any sport; unknown sports get a fixed default.
    pub fn generate_sport_analysis(
        &self,
        sport: &str,
        player: &str,
        position: &str,
        team: &str,
    ) -> SportAnalysis {
        match sport.parse::<Sport>() {
            Ok(sport) => sport::analyze(sport, player, position, team, self.picker.as_ref()),
            Err(_) => sport::default_analysis(sport, player, position, team),
        }
    }

    /// Score a stored insight against the real outcome and record the result.
    ///
    /// Returns the accuracy, or `None` when the insight is unknown.
    pub async fn update_prediction_accuracy(
        &self,
        insight_id: &str,
        actual_points: Option<f64>,
        storage: &dyn AnalyticsStore,
    ) -> Result<Option<f64>> {
        let Some(insight) = or_miss("coaching insight", storage.get_coaching_insight(insight_id).await)
        else {
            debug!(insight_id, "no stored insight to score");
            return Ok(None);
        };

        let predicted = insight.supporting_stats.as_ref().and_then(|s| s.player_value);
        let accuracy = prediction_accuracy(predicted, actual_points);

        let patch = InsightPatch {
            actual_outcome: Some(ActualOutcome {
                actual_points,
                prediction_accuracy: accuracy,
            }),
        };
        if let Err(e) = storage.update_coaching_insight(insight_id, patch).await {
            warn!(insight_id, error = %e, "failed to record prediction accuracy");
        }
        info!(insight_id, accuracy, "insight accuracy recorded");
        Ok(Some(accuracy))
    }
}

/// `max(0, 100 - 5 * |predicted - actual|)`, or 50 when either is unknown.
///
/// A zero on either side counts as unknown: stores record unscored values as 0.
pub fn prediction_accuracy(predicted: Option<f64>, actual: Option<f64>) -> f64 {
    let known = |v: Option<f64>| v.filter(|v| *v != 0.0);
    match (known(predicted), known(actual)) {
        (Some(p), Some(a)) => round2((100.0 - (p - a).abs() * 5.0).max(0.0)),
        _ => UNKNOWN_ACCURACY,
    }
}

fn or_miss<T, E: Display>(what: &str, result: std::result::Result<Option<T>, E>) -> Option<T> {
    result.unwrap_or_else(|e| {
        warn!(lookup = what, error = %e, "analytics lookup failed, treating as missing");
        None
    })
}
