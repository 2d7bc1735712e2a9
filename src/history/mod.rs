//! Historical Pattern Store
//!
//! Ingests per-game historical records, derives one [`PlayerPattern`] per
//! player, and adjusts projections using those patterns alone.
//!
//! - `models`: records, patterns, and enhancement results
//! - `patterns`: pure pattern derivation and projection enhancement
//! - `source`: pluggable ingest sources
//! - `sample`: the built-in sample corpus

pub mod models;
pub mod patterns;
pub mod sample;
pub mod source;


use crate::{config::EngineConfig, PlayerId, Position};
use models::*;
use parking_lot::RwLock;
use source::HistoricalSource;
use std::{collections::HashMap, sync::Arc, time::Duration};
use tokio::sync::Mutex;
use tracing::{error, info, warn};

/// Records and the patterns derived from them, built together and never
/// mutated afterwards.
#[derive(Debug, Default)]
pub struct PatternIndex {
    records: Vec<HistoricalRecord>,
    patterns: HashMap<PlayerId, PlayerPattern>,
}

impl PatternIndex {
    pub fn build(records: Vec<HistoricalRecord>) -> Self {
        let patterns = patterns::build_patterns(&records);
        Self { records, patterns }
    }

    pub fn records(&self) -> &[HistoricalRecord] {
        &self.records
    }

    pub fn records_for_position(&self, position: Position) -> impl Iterator<Item = &HistoricalRecord> {
        self.records.iter().filter(move |r| r.position == position)
    }

    pub fn pattern(&self, player_id: &PlayerId) -> Option<&PlayerPattern> {
        self.patterns.get(player_id)
    }

    pub fn patterns(&self) -> impl Iterator<Item = &PlayerPattern> {
        self.patterns.values()
    }

    pub fn player_count(&self) -> usize {
        self.patterns.len()
    }
}

/// Owns the pattern index and its lifecycle.
///
/// An uninitialized store answers every lookup as "no pattern", which callers
/// treat as a cue to fall back to generic reasoning.
pub struct HistoricalPatternStore {
    source: Box<dyn HistoricalSource>,
    load_timeout: Duration,
    index: RwLock<Option<Arc<PatternIndex>>>,
    init_lock: Mutex<()>,
}

impl HistoricalPatternStore {
    pub fn new(source: Box<dyn HistoricalSource>, config: &EngineConfig) -> Self {
        Self {
            source,
            load_timeout: config.load_timeout,
            index: RwLock::new(None),
            init_lock: Mutex::new(()),
        }
    }

    /// Store over `source` with the default configuration.
    pub fn with_source<S: HistoricalSource + 'static>(source: S) -> Self {
        Self::new(Box::new(source), &EngineConfig::default())
    }

    pub fn with_timeout(mut self, load_timeout: Duration) -> Self {
        self.load_timeout = load_timeout;
        self
    }

    pub fn is_initialized(&self) -> bool {
        self.index.read().is_some()
    }

    /// Load the corpus and build patterns unless that already happened.
    ///
    /// Concurrent callers wait for the one in-flight load rather than starting
    /// their own. Returns whether the store is initialized afterwards; a
    /// failed or timed-out load leaves it uninitialized and is only logged.
    pub async fn initialize(&self) -> bool {
        if self.is_initialized() {
            return true;
        }
        let _guard = self.init_lock.lock().await;
        if self.is_initialized() {
            return true;
        }

        info!(source = %self.source.describe(), "initializing historical data");
        match self.load_index().await {
            Some(index) => {
                *self.index.write() = Some(Arc::new(index));
                true
            }
            None => false,
        }
    }

    /// Reload the source and rebuild every pattern from scratch.
    ///
    /// On failure the previous patterns stay in place.
    pub async fn refresh(&self) -> bool {
        let _guard = self.init_lock.lock().await;
        info!(source = %self.source.describe(), "refreshing historical data");
        match self.load_index().await {
            Some(index) => {
                *self.index.write() = Some(Arc::new(index));
                true
            }
            None => {
                warn!("refresh failed, keeping previously loaded patterns");
                self.is_initialized()
            }
        }
    }

    /// Drop all loaded state.
    pub fn shutdown(&self) {
        *self.index.write() = None;
        info!("historical pattern store shut down");
    }

    async fn load_index(&self) -> Option<PatternIndex> {
        let records = match tokio::time::timeout(self.load_timeout, self.source.load()).await {
            Ok(Ok(records)) => records,
            Ok(Err(e)) => {
                error!(error = %e, "failed to load historical data");
                return None;
            }
            Err(_) => {
                warn!(
                    timeout_secs = self.load_timeout.as_secs_f64(),
                    "historical data load timed out"
                );
                return None;
            }
        };

        match tokio::task::spawn_blocking(move || PatternIndex::build(records)).await {
            Ok(index) => {
                info!(
                    records = index.records.len(),
                    players = index.player_count(),
                    "historical data initialized"
                );
                Some(index)
            }
            Err(e) => {
                error!(error = %e, "pattern generation failed");
                None
            }
        }
    }

    /// Shared handle on the current index, if loaded.
    pub fn snapshot(&self) -> Option<Arc<PatternIndex>> {
        self.index.read().clone()
    }

    pub fn get_player_pattern(&self, player_id: &PlayerId) -> Option<PlayerPattern> {
        self.snapshot()?.pattern(player_id).cloned()
    }

    /// Adjust `base_projection` with the player's matchup, seasonal, and
    /// weather history. Unknown players get the base projection back at
    /// confidence 70.
    pub fn enhance_projection(
        &self,
        player_id: &PlayerId,
        base_projection: f64,
        context: &ProjectionContext,
    ) -> HistoricalEnhancement {
        let index = self.snapshot();
        let pattern = index.as_deref().and_then(|idx| idx.pattern(player_id));
        patterns::enhance_with_pattern(pattern, base_projection, context)
    }

    pub fn get_player_insights(&self, player_id: &PlayerId) -> Option<PlayerInsights> {
        let index = self.snapshot()?;
        index.pattern(player_id).map(patterns::describe_pattern)
    }

    pub fn get_data_insights(&self) -> DataInsights {
        match self.snapshot() {
            Some(index) => patterns::summarize_patterns(index.patterns(), index.records.len()),
            None => patterns::summarize_patterns(std::iter::empty::<&PlayerPattern>(), 0),
        }
    }
}
