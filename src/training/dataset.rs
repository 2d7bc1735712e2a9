//! Training samples derived from the ingested history.

use super::model::Feature;
use crate::{
    history::{
        models::{GameScript, HistoricalRecord, PlayerPattern, ProjectionContext},
        PatternIndex,
    },
    PlayerId, Position, Season, TeamCode, Week,
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Fantasy points above which a game counts as a boom.
pub const BOOM_THRESHOLD: f64 = 25.0;

/// Games against an opponent before the matchup factor leaves 1.0.
const MIN_MATCHUP_FACTOR_SAMPLE: usize = 2;

/// Game context plus the five pattern features a model reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingInput {
    pub player_id: PlayerId,
    pub position: Position,
    pub team: TeamCode,
    pub opponent: TeamCode,
    pub week: Week,
    pub season: Season,
    pub is_home: bool,
    pub weather: Option<String>,
    pub game_script: GameScript,
    pub team_score: u16,
    pub opponent_score: u16,
    pub seasonal_multiplier: f64,
    pub matchup_history: f64,
    /// Raw 0-100 score; scaled to 0-1 when read as a feature.
    pub consistency_score: f64,
    pub trend_slope: f64,
    /// Injury recovery pattern already scaled to 0-1.
    pub injury_factor: f64,
}

impl TrainingInput {
    /// Features for a historical game, read from the player's pattern.
    pub fn from_record(record: &HistoricalRecord, pattern: &PlayerPattern) -> Self {
        let ctx = &record.game_context;
        Self {
            player_id: record.player_id.clone(),
            position: record.position,
            team: record.team.clone(),
            opponent: ctx.opponent.clone(),
            week: record.week,
            season: record.season,
            is_home: ctx.is_home,
            weather: ctx.weather.clone(),
            game_script: ctx.game_script,
            team_score: ctx.team_score,
            opponent_score: ctx.opponent_score,
            seasonal_multiplier: pattern.seasonal_multiplier(record.week),
            matchup_history: matchup_factor(pattern, &ctx.opponent),
            consistency_score: pattern.historical_metrics.consistency_score,
            trend_slope: pattern.historical_metrics.trend_slope,
            injury_factor: pattern.historical_metrics.injury_recovery_pattern / 100.0,
        }
    }

    /// Features for an upcoming game. Scores are unknown pre-game.
    pub fn for_projection(
        position: Position,
        pattern: &PlayerPattern,
        context: &ProjectionContext,
    ) -> Self {
        Self {
            player_id: pattern.player_id.clone(),
            position,
            team: pattern.team.clone(),
            opponent: context.opponent.clone(),
            week: context.week,
            season: Season::default(),
            is_home: context.is_home,
            weather: context.weather.clone(),
            game_script: context.game_script.unwrap_or_default(),
            team_score: 0,
            opponent_score: 0,
            seasonal_multiplier: pattern.seasonal_multiplier(context.week),
            matchup_history: matchup_factor(pattern, &context.opponent),
            consistency_score: pattern.historical_metrics.consistency_score,
            trend_slope: pattern.historical_metrics.trend_slope,
            injury_factor: pattern.historical_metrics.injury_recovery_pattern / 100.0,
        }
    }

    /// Normalized value of `feature`.
    pub fn feature_value(&self, feature: Feature) -> f64 {
        match feature {
            Feature::SeasonalMultiplier => self.seasonal_multiplier,
            Feature::MatchupHistory => self.matchup_history,
            Feature::ConsistencyScore => self.consistency_score / 100.0,
            Feature::TrendSlope => self.trend_slope,
            Feature::InjuryFactor => self.injury_factor,
            Feature::IsHome => {
                if self.is_home {
                    1.0
                } else {
                    0.0
                }
            }
            Feature::Week => f64::from(self.week.as_u16()) / f64::from(Week::REGULAR_SEASON_WEEKS),
        }
    }
}

/// What actually happened in the game a sample describes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingOutput {
    pub actual_fantasy_points: f64,
    pub exceeded_25_points: bool,
    /// Scored above the player's own historical mean.
    pub exceeded_projection: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingSample {
    pub input: TrainingInput,
    pub output: TrainingOutput,
}

impl TrainingSample {
    pub fn from_record(record: &HistoricalRecord, pattern: &PlayerPattern) -> Self {
        let points = record.fantasy_points();
        Self {
            input: TrainingInput::from_record(record, pattern),
            output: TrainingOutput {
                actual_fantasy_points: points,
                exceeded_25_points: points > BOOM_THRESHOLD,
                exceeded_projection: points > pattern.average_points,
            },
        }
    }
}

/// Opponent average relative to the all-opponent average.
///
/// 1.0 when the opponent was faced fewer than twice or the ratio is undefined.
pub fn matchup_factor(pattern: &PlayerPattern, opponent: &TeamCode) -> f64 {
    match pattern.matchup_history.get(opponent) {
        Some(m) if m.sample_size >= MIN_MATCHUP_FACTOR_SAMPLE => {
            pattern.matchup_ratio(opponent).unwrap_or(1.0)
        }
        _ => 1.0,
    }
}

/// One sample per record of `position` whose player has a pattern.
pub fn position_samples(index: &PatternIndex, position: Position) -> Vec<TrainingSample> {
    index
        .records_for_position(position)
        .filter_map(|record| {
            index
                .pattern(&record.player_id)
                .map(|pattern| TrainingSample::from_record(record, pattern))
        })
        .collect()
}

/// Training corpus bucketed by position.
pub fn build_training_set(
    index: &PatternIndex,
    positions: &[Position],
) -> HashMap<Position, Vec<TrainingSample>> {
    positions
        .iter()
        .map(|&position| (position, position_samples(index, position)))
        .collect()
}
