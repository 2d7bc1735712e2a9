//! Engine configuration resolved from defaults, environment, and CLI flags.

use crate::{
    error::{CoachError, Result},
    Position,
};
use std::{path::PathBuf, str::FromStr, time::Duration};

pub const LOAD_TIMEOUT_ENV_VAR: &str = "FANTASY_COACH_LOAD_TIMEOUT_SECS";
pub const FITTER_ENV_VAR: &str = "FANTASY_COACH_FITTER";
pub const HISTORY_FILE_ENV_VAR: &str = "FANTASY_COACH_HISTORY_FILE";
pub const HISTORY_URL_ENV_VAR: &str = "FANTASY_COACH_HISTORY_URL";
pub const POSITIONS_ENV_VAR: &str = "FANTASY_COACH_POSITIONS";

const DEFAULT_LOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Minimum samples a position needs before its models are fitted.
pub const MIN_TRAINING_SAMPLES: usize = 10;

/// How model weights are derived from the training samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FitterKind {
    /// Fixed empirical correlation tables, independent of the samples.
    #[default]
    Empirical,
    /// Batch gradient descent over the samples.
    GradientDescent,
}

impl FromStr for FitterKind {
    type Err = CoachError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "empirical" | "table" => Ok(FitterKind::Empirical),
            "gradient" | "gradient-descent" | "gd" => Ok(FitterKind::GradientDescent),
            other => Err(CoachError::Config {
                key: FITTER_ENV_VAR.to_string(),
                message: format!("unknown fitter {other:?}"),
            }),
        }
    }
}

/// Where historical game records are ingested from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum HistorySourceKind {
    /// The SQLite archive when it holds records, otherwise the inline sample.
    #[default]
    Auto,
    Sample,
    File(PathBuf),
    Url(String),
    Database(PathBuf),
}

/// Runtime settings shared by the pattern store and the trainer.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub load_timeout: Duration,
    pub trained_positions: Vec<Position>,
    pub min_training_samples: usize,
    pub fitter: FitterKind,
    pub history: HistorySourceKind,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            load_timeout: DEFAULT_LOAD_TIMEOUT,
            trained_positions: Position::TRAINED.to_vec(),
            min_training_samples: MIN_TRAINING_SAMPLES,
            fitter: FitterKind::default(),
            history: HistorySourceKind::default(),
        }
    }
}

impl EngineConfig {
    /// Build a config from defaults overridden by `FANTASY_COACH_*` env vars.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`EngineConfig::from_env`] but reading values through `lookup`.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(LOAD_TIMEOUT_ENV_VAR) {
            let secs: u64 = raw.trim().parse().map_err(|_| CoachError::Config {
                key: LOAD_TIMEOUT_ENV_VAR.to_string(),
                message: format!("expected whole seconds, got {raw:?}"),
            })?;
            config.load_timeout = Duration::from_secs(secs);
        }

        if let Some(raw) = lookup(FITTER_ENV_VAR) {
            config.fitter = raw.parse()?;
        }

        if let Some(raw) = lookup(POSITIONS_ENV_VAR) {
            let positions = raw
                .split(',')
                .filter(|p| !p.trim().is_empty())
                .map(Position::from_str)
                .collect::<Result<Vec<_>>>()?;
            if !positions.is_empty() {
                config.trained_positions = positions;
            }
        }

        // A URL wins over a file when both are set.
        if let Some(path) = lookup(HISTORY_FILE_ENV_VAR) {
            config.history = HistorySourceKind::File(PathBuf::from(path));
        }
        if let Some(url) = lookup(HISTORY_URL_ENV_VAR) {
            config.history = HistorySourceKind::Url(url);
        }

        Ok(config)
    }
}
