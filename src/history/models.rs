//! Data models for historical game records and derived player patterns

use crate::cli::types::{
    ids::{PlayerId, TeamCode},
    position::Position,
    time::{Season, SeasonPhase, Week},
};
use crate::error::CoachError;
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, str::FromStr};

/// Flow of a game from the player's team's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameScript {
    /// Team was leading.
    Positive,
    /// Team was trailing.
    Negative,
    #[default]
    Neutral,
}

impl GameScript {
    pub fn as_str(&self) -> &'static str {
        match self {
            GameScript::Positive => "positive",
            GameScript::Negative => "negative",
            GameScript::Neutral => "neutral",
        }
    }
}

impl FromStr for GameScript {
    type Err = CoachError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "positive" => Ok(GameScript::Positive),
            "negative" => Ok(GameScript::Negative),
            "neutral" => Ok(GameScript::Neutral),
            other => Err(CoachError::Config {
                key: "gameScript".to_string(),
                message: format!("unknown game script {other:?}"),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PassingStats {
    pub attempts: u32,
    pub completions: u32,
    pub yards: i32,
    pub touchdowns: u32,
    pub interceptions: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RushingStats {
    pub attempts: u32,
    pub yards: i32,
    pub touchdowns: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReceivingStats {
    pub targets: u32,
    pub receptions: u32,
    pub yards: i32,
    pub touchdowns: u32,
}

/// Box-score sub-totals plus the fantasy points they produced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameStats {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passing: Option<PassingStats>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rushing: Option<RushingStats>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receiving: Option<ReceivingStats>,
    pub fantasy_points: f64,
}

impl GameStats {
    /// Stat line carrying only a fantasy point total.
    pub fn points_only(fantasy_points: f64) -> Self {
        Self {
            passing: None,
            rushing: None,
            receiving: None,
            fantasy_points,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameContext {
    pub opponent: TeamCode,
    pub is_home: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<String>,
    #[serde(default)]
    pub game_script: GameScript,
    #[serde(default)]
    pub team_score: u16,
    #[serde(default)]
    pub opponent_score: u16,
}

/// One player's stat line for one game. Immutable once ingested.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalRecord {
    pub player_id: PlayerId,
    pub name: String,
    pub position: Position,
    pub team: TeamCode,
    pub season: Season,
    pub week: Week,
    pub stats: GameStats,
    pub game_context: GameContext,
}

impl HistoricalRecord {
    pub fn fantasy_points(&self) -> f64 {
        self.stats.fantasy_points
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalMetrics {
    /// 0-100, higher = more consistent
    pub consistency_score: f64,
    /// Nearest-rank 90th percentile of fantasy points
    pub ceiling_score: f64,
    /// Nearest-rank 10th percentile of fantasy points
    pub floor_score: f64,
    /// Least-squares slope of points over game index
    pub trend_slope: f64,
    pub injury_recovery_pattern: f64,
    pub matchup_sensitivity: f64,
    pub weather_impact: f64,
    pub game_script_dependency: f64,
    pub age_adjustment: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeasonalPatterns {
    pub early_season_multiplier: f64,
    pub mid_season_multiplier: f64,
    pub late_season_multiplier: f64,
    pub playoff_multiplier: f64,
}

impl SeasonalPatterns {
    pub fn multiplier_for(&self, phase: SeasonPhase) -> f64 {
        match phase {
            SeasonPhase::Early => self.early_season_multiplier,
            SeasonPhase::Mid => self.mid_season_multiplier,
            SeasonPhase::Late => self.late_season_multiplier,
        }
    }
}

/// A player's record against one opponent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchupRecord {
    pub average_points: f64,
    pub consistency: f64,
    pub sample_size: usize,
}

/// Statistical profile derived from every historical record of one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerPattern {
    pub player_id: PlayerId,
    pub name: String,
    pub position: Position,
    pub team: TeamCode,
    pub games_played: usize,
    pub average_points: f64,
    pub historical_metrics: HistoricalMetrics,
    pub seasonal_patterns: SeasonalPatterns,
    pub matchup_history: BTreeMap<TeamCode, MatchupRecord>,
}

impl PlayerPattern {
    pub fn seasonal_multiplier(&self, week: Week) -> f64 {
        self.seasonal_patterns.multiplier_for(week.phase())
    }

    /// Mean of the per-opponent averages (each opponent weighted equally).
    pub fn all_opponent_average(&self) -> Option<f64> {
        if self.matchup_history.is_empty() {
            return None;
        }
        let total: f64 = self
            .matchup_history
            .values()
            .map(|m| m.average_points)
            .sum();
        Some(total / self.matchup_history.len() as f64)
    }

    /// Average against `opponent` relative to the all-opponent average.
    ///
    /// Returns `None` when the opponent is unknown or the ratio is undefined.
    pub fn matchup_ratio(&self, opponent: &TeamCode) -> Option<f64> {
        let matchup = self.matchup_history.get(opponent)?;
        let baseline = self.all_opponent_average()?;
        if baseline <= 0.0 {
            return None;
        }
        Some(matchup.average_points / baseline)
    }
}

/// Pre-game context a projection is adjusted for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionContext {
    pub opponent: TeamCode,
    pub week: Week,
    #[serde(default)]
    pub is_home: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub game_script: Option<GameScript>,
}

impl ProjectionContext {
    pub fn new(opponent: TeamCode, week: Week) -> Self {
        Self {
            opponent,
            week,
            is_home: false,
            weather: None,
            game_script: None,
        }
    }

    pub fn at_home(mut self, is_home: bool) -> Self {
        self.is_home = is_home;
        self
    }

    pub fn with_weather(mut self, weather: impl Into<String>) -> Self {
        self.weather = Some(weather.into());
        self
    }
}

/// A projection adjusted using only historical pattern features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalEnhancement {
    pub enhanced_projection: f64,
    pub confidence: u8,
    pub explanation: Vec<String>,
}

/// Qualitative reading of a player's pattern.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerInsights {
    pub consistency: String,
    pub ceiling: String,
    pub floor: String,
    pub trend: String,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
}

/// Corpus-wide summary of the loaded patterns.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataInsights {
    pub total_players: usize,
    pub total_games: usize,
    pub avg_consistency: f64,
    pub top_performers: Vec<String>,
    pub sleepers: Vec<String>,
}
