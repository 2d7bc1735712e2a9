//! Coaching outputs and the inputs they are built from.

use crate::{
    history::models::{PlayerInsights, PlayerPattern},
    history::patterns::describe_pattern,
    training::model::MlEnhancedProjection,
    PlayerId, Position, TeamCode,
};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RiskLevel::Low => "low",
            RiskLevel::Medium => "medium",
            RiskLevel::High => "high",
        })
    }
}

/// Category an insight is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InsightKind {
    TrendAlert,
    MatchupAdvantage,
    DefensiveWeakness,
    UsagePattern,
    BreakoutPotential,
}

/// Pattern-derived context attached to an insight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoricalAnalysis {
    pub games_played: usize,
    pub average_points: f64,
    pub consistency_score: f64,
    pub ceiling_score: f64,
    pub floor_score: f64,
    pub trend_slope: f64,
    pub insights: PlayerInsights,
}

impl From<&PlayerPattern> for HistoricalAnalysis {
    fn from(pattern: &PlayerPattern) -> Self {
        let m = &pattern.historical_metrics;
        Self {
            games_played: pattern.games_played,
            average_points: pattern.average_points,
            consistency_score: m.consistency_score,
            ceiling_score: m.ceiling_score,
            floor_score: m.floor_score,
            trend_slope: m.trend_slope,
            insights: describe_pattern(pattern),
        }
    }
}

/// A single recommendation for one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachingInsight {
    pub player_id: PlayerId,
    pub player_name: String,
    pub kind: InsightKind,
    pub insight: String,
    /// 0-100
    pub confidence: u8,
    pub recommendation: String,
    pub risk_level: RiskLevel,
    pub upside: String,
    pub downside: String,
    pub supporting_data: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub historical_analysis: Option<HistoricalAnalysis>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ml_enhancement: Option<MlEnhancedProjection>,
}

/// One rostered player in a lineup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineupSlot {
    pub id: PlayerId,
    pub name: String,
    pub position: Position,
    pub team: TeamCode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pivot {
    pub original_player: PlayerId,
    pub suggested_pivot: String,
    pub reason: String,
    pub confidence: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineupCoaching {
    pub overall_strategy: String,
    pub player_insights: Vec<CoachingInsight>,
    pub risk_assessment: String,
    /// Mean insight confidence; 0 for an empty lineup.
    pub confidence: f64,
    pub stack_recommendations: Vec<String>,
    pub pivots: Vec<Pivot>,
}

/// In-game counters for one player.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LiveGameStats {
    pub player_name: String,
    pub left_side_carries: u32,
    pub left_side_yards: u32,
    pub red_zone_targets: u32,
    pub receptions: u32,
    pub passing_yards: u32,
    /// Average seconds in the pocket.
    pub time_in_pocket: f64,
    pub points: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SportAnalysis {
    pub sport: String,
    pub player: String,
    pub position: String,
    pub team: String,
    pub insight: String,
    pub confidence: u8,
    pub recommendation: String,
    pub risk_level: RiskLevel,
    pub upside: String,
    pub downside: String,
}
