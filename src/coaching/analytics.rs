//! Access to per-player and per-defense analytics.
//!
//! Every lookup returns `Ok(None)` on a miss. An `Err` means the backing
//! store itself failed; the coaching engine logs it and treats it as a miss.

use super::models::{InsightKind, RiskLevel};
use crate::{error::Result, util::mean, PlayerId, Position, TeamCode, Week};
use async_trait::async_trait;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, path::Path};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentGame {
    pub week: Week,
    pub points: f64,
    pub opponent: TeamCode,
    #[serde(default)]
    pub usage: f64,
}

/// Usage tendencies for one player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerAnalytics {
    pub player_id: PlayerId,
    pub player_name: String,
    pub position: Position,
    pub team: TeamCode,
    #[serde(default)]
    pub left_side_rushing_percentage: Option<f64>,
    #[serde(default)]
    pub right_side_rushing_percentage: Option<f64>,
    #[serde(default)]
    pub red_zone_target_share: Option<f64>,
    #[serde(default)]
    pub third_down_conversion_rate: Option<f64>,
    /// Externally supplied projection for the upcoming week.
    #[serde(default)]
    pub projected_points: Option<f64>,
    #[serde(default)]
    pub last_five_games: Vec<RecentGame>,
}

impl PlayerAnalytics {
    pub fn recent_average(&self) -> Option<f64> {
        if self.last_five_games.is_empty() {
            return None;
        }
        let points: Vec<f64> = self.last_five_games.iter().map(|g| g.points).collect();
        Some(mean(&points))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct VsWideReceivers {
    pub red_zone_targets: Option<f64>,
    pub slot: Option<f64>,
    pub outside: Option<f64>,
    pub deep_targets: Option<f64>,
    pub rank: Option<u32>,
}

/// What a defense gives up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DefensiveAnalytics {
    pub team: TeamCode,
    #[serde(default)]
    pub left_side_rushing_yards_allowed: Option<f64>,
    #[serde(default)]
    pub right_side_rushing_yards_allowed: Option<f64>,
    #[serde(default)]
    pub red_zone_defense_rank: Option<u32>,
    /// Percent of dropbacks pressured.
    #[serde(default)]
    pub pass_rush_pressure_rate: Option<f64>,
    #[serde(default)]
    pub vs_wide_receivers: Option<VsWideReceivers>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportingStats {
    pub key_metric: String,
    #[serde(default)]
    pub player_value: Option<f64>,
    #[serde(default)]
    pub league_average: Option<f64>,
    #[serde(default)]
    pub percentage_difference: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActualOutcome {
    pub actual_points: Option<f64>,
    pub prediction_accuracy: f64,
}

/// A persisted insight, as the analytics store keeps it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredInsight {
    pub id: String,
    pub user_id: String,
    pub player_id: PlayerId,
    pub week: Week,
    pub insight_type: InsightKind,
    pub confidence_score: f64,
    pub title: String,
    pub recommendation: String,
    #[serde(default)]
    pub supporting_stats: Option<SupportingStats>,
    pub risk_level: RiskLevel,
    #[serde(default)]
    pub actual_outcome: Option<ActualOutcome>,
}

/// Partial update applied by [`AnalyticsStore::update_coaching_insight`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightPatch {
    pub actual_outcome: Option<ActualOutcome>,
}

#[async_trait]
pub trait AnalyticsStore: Send + Sync {
    async fn get_player_analytics(&self, player_id: &PlayerId) -> Result<Option<PlayerAnalytics>>;

    async fn get_upcoming_opponent(&self, player_id: &PlayerId, week: Week) -> Result<Option<TeamCode>>;

    async fn get_defensive_analytics(&self, team: &TeamCode) -> Result<Option<DefensiveAnalytics>>;

    async fn get_coaching_insight(&self, id: &str) -> Result<Option<StoredInsight>>;

    /// Apply `patch` and return the updated insight, or `None` if unknown.
    async fn update_coaching_insight(&self, id: &str, patch: InsightPatch) -> Result<Option<StoredInsight>>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduledGame {
    pub player_id: PlayerId,
    pub week: Week,
    pub opponent: TeamCode,
}

/// JSON layout accepted by [`MemoryAnalyticsStore::from_json`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AnalyticsDocument {
    pub players: Vec<PlayerAnalytics>,
    pub schedule: Vec<ScheduledGame>,
    pub defenses: Vec<DefensiveAnalytics>,
    pub insights: Vec<StoredInsight>,
}

#[derive(Debug, Default)]
struct MemoryState {
    players: HashMap<PlayerId, PlayerAnalytics>,
    schedule: HashMap<(PlayerId, Week), TeamCode>,
    defenses: HashMap<TeamCode, DefensiveAnalytics>,
    insights: HashMap<String, StoredInsight>,
}

/// In-process analytics store.
#[derive(Debug, Default)]
pub struct MemoryAnalyticsStore {
    state: RwLock<MemoryState>,
}

impl MemoryAnalyticsStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_document(doc: AnalyticsDocument) -> Self {
        let store = Self::new();
        for player in doc.players {
            store.insert_player(player);
        }
        for game in doc.schedule {
            store.set_opponent(game.player_id, game.week, game.opponent);
        }
        for defense in doc.defenses {
            store.insert_defense(defense);
        }
        for insight in doc.insights {
            store.insert_insight(insight);
        }
        store
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(Self::from_document(serde_json::from_str(json)?))
    }

    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let json = tokio::fs::read_to_string(path).await?;
        Self::from_json(&json)
    }

    pub fn insert_player(&self, player: PlayerAnalytics) {
        self.state.write().players.insert(player.player_id.clone(), player);
    }

    pub fn set_opponent(&self, player_id: PlayerId, week: Week, opponent: TeamCode) {
        self.state.write().schedule.insert((player_id, week), opponent);
    }

    pub fn insert_defense(&self, defense: DefensiveAnalytics) {
        self.state.write().defenses.insert(defense.team.clone(), defense);
    }

    pub fn insert_insight(&self, insight: StoredInsight) {
        self.state.write().insights.insert(insight.id.clone(), insight);
    }
}

#[async_trait]
impl AnalyticsStore for MemoryAnalyticsStore {
    async fn get_player_analytics(&self, player_id: &PlayerId) -> Result<Option<PlayerAnalytics>> {
        Ok(self.state.read().players.get(player_id).cloned())
    }

    async fn get_upcoming_opponent(&self, player_id: &PlayerId, week: Week) -> Result<Option<TeamCode>> {
        Ok(self
            .state
            .read()
            .schedule
            .get(&(player_id.clone(), week))
            .cloned())
    }

    async fn get_defensive_analytics(&self, team: &TeamCode) -> Result<Option<DefensiveAnalytics>> {
        Ok(self.state.read().defenses.get(team).cloned())
    }

    async fn get_coaching_insight(&self, id: &str) -> Result<Option<StoredInsight>> {
        Ok(self.state.read().insights.get(id).cloned())
    }

    async fn update_coaching_insight(&self, id: &str, patch: InsightPatch) -> Result<Option<StoredInsight>> {
        let mut state = self.state.write();
        let Some(insight) = state.insights.get_mut(id) else {
            return Ok(None);
        };
        if let Some(outcome) = patch.actual_outcome {
            insight.actual_outcome = Some(outcome);
        }
        Ok(Some(insight.clone()))
    }
}
