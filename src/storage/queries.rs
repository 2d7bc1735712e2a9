//! Record-level database operations

use super::schema::HistoryDatabase;
use crate::{
    history::models::{GameContext, GameScript, GameStats, HistoricalRecord},
    PlayerId, Position, Season, TeamCode, Week,
};
use anyhow::Result;
use rusqlite::{params, types::Type, Row};
use std::time::{SystemTime, UNIX_EPOCH};

const SELECT_COLUMNS: &str = "SELECT player_id, season, week, name, position, team, opponent,
        is_home, weather, game_script, team_score, opponent_score, stats_json
 FROM historical_games";

impl HistoryDatabase {
    /// Insert a game record.
    /// Existing (player, season, week) rows are only replaced when `force_update` is set.
    pub fn upsert_record(&mut self, record: &HistoricalRecord, force_update: bool) -> Result<bool> {
        let now = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
        let stats_json = serde_json::to_string(&record.stats)?;
        let ctx = &record.game_context;

        let verb = if force_update {
            "INSERT OR REPLACE"
        } else {
            "INSERT OR IGNORE"
        };
        let sql = format!(
            "{verb} INTO historical_games
             (player_id, season, week, name, position, team, opponent, is_home, weather,
              game_script, team_score, opponent_score, fantasy_points, stats_json,
              created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?,
                     COALESCE((SELECT created_at FROM historical_games
                               WHERE player_id = ? AND season = ? AND week = ?), ?), ?)"
        );

        let rows_affected = self.conn.execute(
            &sql,
            params![
                record.player_id.as_str(),
                record.season.as_u16(),
                record.week.as_u16(),
                record.name,
                record.position.to_string(),
                record.team.as_str(),
                ctx.opponent.as_str(),
                ctx.is_home,
                ctx.weather,
                ctx.game_script.as_str(),
                ctx.team_score,
                ctx.opponent_score,
                record.stats.fantasy_points,
                stats_json,
                record.player_id.as_str(),
                record.season.as_u16(),
                record.week.as_u16(),
                now,
                now
            ],
        )?;
        Ok(rows_affected > 0)
    }

    /// Archive many records in one transaction, returning how many were written.
    pub fn upsert_records(&mut self, records: &[HistoricalRecord], force_update: bool) -> Result<usize> {
        self.conn.execute_batch("BEGIN")?;
        let mut written = 0;
        for record in records {
            match self.upsert_record(record, force_update) {
                Ok(true) => written += 1,
                Ok(false) => {}
                Err(e) => {
                    self.conn.execute_batch("ROLLBACK")?;
                    return Err(e);
                }
            }
        }
        self.conn.execute_batch("COMMIT")?;
        Ok(written)
    }

    /// Every archived record, ordered by player then chronologically
    pub fn load_records(&self) -> Result<Vec<HistoricalRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SELECT_COLUMNS} ORDER BY player_id, season, week"))?;
        let rows = stmt.query_map([], Self::row_to_record)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    /// One player's archived games in chronological order
    pub fn load_player_records(&self, player_id: &PlayerId) -> Result<Vec<HistoricalRecord>> {
        let mut stmt = self.conn.prepare(&format!(
            "{SELECT_COLUMNS} WHERE player_id = ? ORDER BY season, week"
        ))?;
        let rows = stmt.query_map(params![player_id.as_str()], Self::row_to_record)?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?);
        }
        Ok(records)
    }

    pub fn count_records(&self) -> Result<u64> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM historical_games", [], |row| row.get(0))?;
        Ok(count as u64)
    }

    /// Clear all archived games (useful for starting fresh)
    pub fn clear_all_data(&mut self) -> Result<()> {
        self.conn.execute("DELETE FROM historical_games", [])?;
        Ok(())
    }

    fn row_to_record(row: &Row) -> rusqlite::Result<HistoricalRecord> {
        let position: String = row.get(4)?;
        let position = position
            .parse::<Position>()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(4, Type::Text, Box::new(e)))?;

        let script: String = row.get(9)?;
        let game_script = script
            .parse::<GameScript>()
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(9, Type::Text, Box::new(e)))?;

        let stats_json: String = row.get(12)?;
        let stats: GameStats = serde_json::from_str(&stats_json)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(12, Type::Text, Box::new(e)))?;

        Ok(HistoricalRecord {
            player_id: PlayerId::new(row.get::<_, String>(0)?),
            season: Season::new(row.get(1)?),
            week: Week::new(row.get(2)?),
            name: row.get(3)?,
            position,
            team: TeamCode::new(row.get::<_, String>(5)?),
            stats,
            game_context: GameContext {
                opponent: TeamCode::new(row.get::<_, String>(6)?),
                is_home: row.get(7)?,
                weather: row.get(8)?,
                game_script,
                team_score: row.get(10)?,
                opponent_score: row.get(11)?,
            },
        })
    }
}
