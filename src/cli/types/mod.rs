//! Type-safe wrappers and enums for players, teams, and the season calendar.

pub mod ids;
pub mod position;
pub mod time;

pub use ids::{PlayerId, TeamCode};
pub use position::Position;
pub use time::{Season, SeasonPhase, Week};
