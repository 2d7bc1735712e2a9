//! Database schema and connection management

use crate::error::CoachError;
use anyhow::Result;
use dirs::cache_dir;
use rusqlite::Connection;
use std::path::{Path, PathBuf};

/// Connection to the historical game archive
pub struct HistoryDatabase {
    pub(crate) conn: Connection,
}

impl HistoryDatabase {
    /// Open the archive at its default location, creating tables if needed
    pub fn new() -> Result<Self> {
        Self::open(&Self::default_path()?)
    }

    /// Open (or create) an archive at `path`
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let conn = Connection::open(path)?;
        let mut db = Self { conn };
        db.initialize_schema()?;
        Ok(db)
    }

    /// In-memory archive, used by tests and dry runs
    pub fn new_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let mut db = Self { conn };
        db.initialize_schema()?;
        Ok(db)
    }

    /// `<cache_dir>/fantasy-coach/history.db`
    pub fn default_path() -> Result<PathBuf> {
        let cache_dir = cache_dir().ok_or_else(|| CoachError::Config {
            key: "cache_dir".to_string(),
            message: "Could not determine cache directory".to_string(),
        })?;
        Ok(cache_dir.join("fantasy-coach").join("history.db"))
    }

    pub(crate) fn initialize_schema(&mut self) -> Result<()> {
        self.conn.execute(
            "CREATE TABLE IF NOT EXISTS historical_games (
                player_id TEXT NOT NULL,
                season INTEGER NOT NULL,
                week INTEGER NOT NULL,
                name TEXT NOT NULL,
                position TEXT NOT NULL,
                team TEXT NOT NULL,
                opponent TEXT NOT NULL,
                is_home INTEGER NOT NULL,
                weather TEXT,
                game_script TEXT NOT NULL,
                team_score INTEGER NOT NULL,
                opponent_score INTEGER NOT NULL,
                fantasy_points REAL NOT NULL,
                stats_json TEXT NOT NULL,
                created_at INTEGER NOT NULL,
                updated_at INTEGER NOT NULL,
                PRIMARY KEY (player_id, season, week)
            )",
            [],
        )?;

        self.conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_history_position
             ON historical_games(position)",
            [],
        )?;

        Ok(())
    }
}
