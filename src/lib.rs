//! Fantasy Coaching Analytics Library
//!
//! Derives per-player statistical patterns from historical game logs, blends
//! them with lightweight per-position models, and turns the result into
//! coaching recommendations.
//!
//! ## Components
//!
//! - **Historical Pattern Store** ([`history`]): consistency, ceiling/floor,
//!   trend, matchup and seasonal profiles per player
//! - **Model Trainer** ([`training`]): regression and boom classification
//!   models per position, blended 60/40 with the historical enhancement
//! - **Coaching Insight Generator** ([`coaching`]): rule-based player insights,
//!   lineup aggregation, live updates and sport quick takes
//! - **Historical Archive** ([`storage`]): SQLite archive of ingested games
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fantasy_coach::{
//!     config::EngineConfig,
//!     history::{models::ProjectionContext, source::SampleSource, HistoricalPatternStore},
//!     training::ModelTrainer,
//!     PlayerId, Position, TeamCode, Week,
//! };
//! use std::sync::Arc;
//!
//! # async fn example() -> fantasy_coach::Result<()> {
//! let config = EngineConfig::default();
//! let store = Arc::new(HistoricalPatternStore::new(Box::new(SampleSource), &config));
//! let trainer = ModelTrainer::new(store, &config);
//! trainer.initialize_training().await?;
//!
//! let context = ProjectionContext::new(TeamCode::new("CHI"), Week::new(9));
//! let projection = trainer.enhance_projection(
//!     &PlayerId::new("gibbs_jahmyr"),
//!     Position::RB,
//!     17.5,
//!     &context,
//! )?;
//! println!("{} pts, {}% boom", projection.enhanced_projection, projection.boom_probability);
//! # Ok(())
//! # }
//! ```
//!
//! ## Environment Configuration
//!
//! `FANTASY_COACH_HISTORY_FILE`, `FANTASY_COACH_HISTORY_URL`,
//! `FANTASY_COACH_LOAD_TIMEOUT_SECS`, `FANTASY_COACH_FITTER` and
//! `FANTASY_COACH_POSITIONS` override the defaults in [`config::EngineConfig`].

pub mod cli;
pub mod coaching;
pub mod commands;
pub mod config;
pub mod error;
pub mod history;
pub mod storage;
pub mod training;
pub mod util;

// Re-export commonly used types
pub use cli::types::{PlayerId, Position, Season, TeamCode, Week};
pub use error::{CoachError, Result};
