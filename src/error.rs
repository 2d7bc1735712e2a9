//! Error types for the fantasy coaching engine

use thiserror::Error;

#[cfg(test)]
mod tests;

pub type Result<T> = std::result::Result<T, CoachError>;

#[derive(Error, Debug)]
pub enum CoachError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON parsing failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage error: {message}")]
    Storage { message: String },

    #[error("Invalid position: {position}")]
    InvalidPosition { position: String },

    #[error("Unsupported sport: {sport}")]
    InvalidSport { sport: String },

    #[error("Invalid number: {0}")]
    InvalidNumber(#[from] std::num::ParseIntError),

    #[error("Invalid configuration for {key}: {message}")]
    Config { key: String, message: String },

    #[error("Historical data source unavailable: {message}")]
    SourceUnavailable { message: String },

    /// A model references a feature it carries no weight for. This is a
    /// programming error, never a data condition.
    #[error("Model feature map is malformed: no weight for feature {feature}")]
    MalformedFeatureMap { feature: String },
}

impl From<anyhow::Error> for CoachError {
    fn from(err: anyhow::Error) -> Self {
        CoachError::Storage {
            message: err.to_string(),
        }
    }
}

impl From<tokio::task::JoinError> for CoachError {
    fn from(err: tokio::task::JoinError) -> Self {
        CoachError::SourceUnavailable {
            message: err.to_string(),
        }
    }
}

impl CoachError {
    /// True for errors that indicate a bug rather than missing or bad data.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self, CoachError::MalformedFeatureMap { .. })
    }
}
