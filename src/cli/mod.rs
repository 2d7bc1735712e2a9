//! CLI argument definitions and parsing.

pub mod types;

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use types::{PlayerId, Position, TeamCode, Week};

/// Where to load historical game records from. Overrides `FANTASY_COACH_HISTORY_*`.
#[derive(Debug, Default, Args)]
pub struct HistoryArgs {
    /// JSON array of historical records on disk.
    #[clap(long, conflicts_with_all = ["history_url", "use_sample"])]
    pub history_file: Option<PathBuf>,

    /// URL serving a JSON array of historical records.
    #[clap(long, conflicts_with = "use_sample")]
    pub history_url: Option<String>,

    /// Use the built-in sample records, ignoring the archive.
    #[clap(long)]
    pub use_sample: bool,
}

#[derive(Debug, Parser)]
#[clap(
    name = "fantasy-coach",
    about = "Historical patterns, projections and coaching insights for fantasy football"
)]
pub struct FantasyCoach {
    #[clap(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Archive historical game records from a JSON file.
    Ingest {
        /// JSON array of historical records.
        #[clap(long, short)]
        file: PathBuf,

        /// Overwrite records that are already archived.
        #[clap(long)]
        force: bool,

        /// Clear the archive before ingesting.
        #[clap(long)]
        clear: bool,
    },

    /// Show a player's historical pattern and qualitative reading.
    Pattern {
        /// Player ID (e.g. `gibbs_jahmyr`).
        #[clap(long, short)]
        player: PlayerId,

        /// Output results as JSON instead of text lines.
        #[clap(long)]
        json: bool,

        #[clap(flatten)]
        history: HistoryArgs,
    },

    /// Enhance a base projection with history and the position's models.
    Project {
        #[clap(long, short)]
        player: PlayerId,

        #[clap(long, short = 'P')]
        position: Position,

        /// Opponent team code (e.g. `CHI`).
        #[clap(long, short)]
        opponent: TeamCode,

        #[clap(long, short, default_value_t = Week::default())]
        week: Week,

        /// Base projection in fantasy points.
        #[clap(long, short)]
        base: f64,

        /// The player's team is at home.
        #[clap(long)]
        home: bool,

        /// Forecast conditions, e.g. `heavy rain`.
        #[clap(long)]
        weather: Option<String>,

        #[clap(long)]
        json: bool,

        #[clap(flatten)]
        history: HistoryArgs,
    },

    /// Train every position and report model accuracy.
    TrainStatus {
        #[clap(long)]
        json: bool,

        #[clap(flatten)]
        history: HistoryArgs,
    },

    /// Coaching insight for one player.
    Insight {
        #[clap(long, short)]
        player: PlayerId,

        #[clap(long, short, default_value_t = Week::default())]
        week: Week,

        /// Analytics document (players, schedule, defenses) as JSON.
        #[clap(long, short)]
        analytics: PathBuf,

        #[clap(long)]
        json: bool,

        #[clap(flatten)]
        history: HistoryArgs,
    },

    /// Coaching for a whole lineup.
    Lineup {
        #[clap(long, short)]
        user: String,

        #[clap(long, short, default_value_t = Week::default())]
        week: Week,

        /// JSON array of lineup slots (`id`, `name`, `position`, `team`).
        #[clap(long, short)]
        lineup: PathBuf,

        #[clap(long, short)]
        analytics: PathBuf,

        #[clap(long)]
        json: bool,

        #[clap(flatten)]
        history: HistoryArgs,
    },

    /// One-line commentary from in-game counters.
    Live {
        #[clap(long, short)]
        player: Option<PlayerId>,

        /// Live stats as JSON.
        #[clap(long, short)]
        stats: PathBuf,
    },

    /// Quick take for a player in any supported sport.
    Sport {
        /// mlb, nfl, nba or nhl.
        #[clap(long, short)]
        sport: String,

        #[clap(long, short)]
        player: String,

        #[clap(long, short = 'P')]
        position: String,

        #[clap(long, short)]
        team: String,

        #[clap(long)]
        json: bool,
    },
}
