//! Engine wiring shared by the commands.

use std::{path::Path, sync::Arc};

use serde::Serialize;
use tracing::{info, warn};

use crate::{
    cli::HistoryArgs,
    coaching::CoachingEngine,
    config::{EngineConfig, HistorySourceKind},
    history::{source::source_from_config, HistoricalPatternStore},
    training::ModelTrainer,
    Result,
};

/// Apply CLI history flags on top of an env-derived config.
pub fn apply_history_args(mut config: EngineConfig, args: &HistoryArgs) -> EngineConfig {
    if args.use_sample {
        config.history = HistorySourceKind::Sample;
    } else if let Some(url) = &args.history_url {
        config.history = HistorySourceKind::Url(url.clone());
    } else if let Some(path) = &args.history_file {
        config.history = HistorySourceKind::File(path.clone());
    }
    config
}

/// Pattern store, trainer and coaching engine built from one config
pub struct CommandContext {
    pub config: EngineConfig,
    pub store: Arc<HistoricalPatternStore>,
    pub trainer: Arc<ModelTrainer>,
    pub engine: CoachingEngine,
}

impl CommandContext {
    pub fn new(config: EngineConfig) -> Result<Self> {
        let source = source_from_config(&config.history)?;
        let store = Arc::new(HistoricalPatternStore::new(source, &config));
        let trainer = Arc::new(ModelTrainer::new(Arc::clone(&store), &config));
        let engine = CoachingEngine::new(Arc::clone(&trainer));
        Ok(Self {
            config,
            store,
            trainer,
            engine,
        })
    }

    /// Context for the env config overridden by `args`.
    pub fn from_args(args: &HistoryArgs) -> Result<Self> {
        let config = apply_history_args(EngineConfig::from_env()?, args);
        Self::new(config)
    }

    /// Load history. A failed load is reported and the commands degrade to
    /// base projections rather than aborting. Progress goes to the log so
    /// stdout carries only command output.
    pub async fn load_history(&self) -> bool {
        let loaded = self.store.initialize().await;
        if loaded {
            let summary = self.store.get_data_insights();
            info!(
                games = summary.total_games,
                players = summary.total_players,
                "historical data loaded"
            );
        } else {
            warn!("historical data unavailable, falling back to base projections");
        }
        loaded
    }

    /// Load history and train every configured position.
    pub async fn load_and_train(&self) -> Result<()> {
        self.load_history().await;
        self.trainer.initialize_training().await
    }
}

/// Read and parse a JSON file.
pub async fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T> {
    let contents = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&contents)?)
}

/// Pretty JSON for a command's `--json` output.
pub fn to_json<T: Serialize>(value: &T) -> Result<String> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    Ok(json)
}
