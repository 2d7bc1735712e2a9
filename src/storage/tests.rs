//! Unit tests for storage functionality

use super::*;
use crate::history::models::{GameContext, GameScript, GameStats, HistoricalRecord, RushingStats};
use crate::{PlayerId, Position, Season, TeamCode, Week};

fn create_test_db() -> HistoryDatabase {
    let conn = rusqlite::Connection::open_in_memory().unwrap();
    let mut db = HistoryDatabase { conn };
    db.initialize_schema().unwrap();
    db
}

fn record(player: &str, week: u16, points: f64) -> HistoricalRecord {
    HistoricalRecord {
        player_id: PlayerId::new(player),
        name: "Test Player".to_string(),
        position: Position::RB,
        team: TeamCode::new("DET"),
        season: Season::new(2024),
        week: Week::new(week),
        stats: GameStats {
            passing: None,
            rushing: Some(RushingStats {
                attempts: 18,
                yards: 97,
                touchdowns: 1,
            }),
            receiving: None,
            fantasy_points: points,
        },
        game_context: GameContext {
            opponent: TeamCode::new("CHI"),
            is_home: true,
            weather: Some("light rain".to_string()),
            game_script: GameScript::Positive,
            team_score: 31,
            opponent_score: 17,
        },
    }
}

#[test]
fn test_database_creation() {
    let db = create_test_db();
    assert_eq!(db.count_records().unwrap(), 0);
}

#[test]
fn test_upsert_record_new() {
    let mut db = create_test_db();

    let result = db.upsert_record(&record("gibbs", 1, 18.5), false);
    assert!(result.is_ok());
    assert!(result.unwrap()); // Should return true for new insert
    assert_eq!(db.count_records().unwrap(), 1);
}

#[test]
fn test_upsert_record_existing_no_force() {
    let mut db = create_test_db();

    assert!(db.upsert_record(&record("gibbs", 1, 18.5), false).unwrap());

    // Same key without force - should be ignored
    assert!(!db.upsert_record(&record("gibbs", 1, 30.0), false).unwrap());

    let stored = db.load_player_records(&PlayerId::new("gibbs")).unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].stats.fantasy_points, 18.5);
}

#[test]
fn test_upsert_record_existing_with_force() {
    let mut db = create_test_db();

    assert!(db.upsert_record(&record("gibbs", 1, 18.5), false).unwrap());
    assert!(db.upsert_record(&record("gibbs", 1, 30.0), true).unwrap());

    let stored = db.load_player_records(&PlayerId::new("gibbs")).unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].stats.fantasy_points, 30.0);
}

#[test]
fn test_record_survives_storage_unchanged() {
    let mut db = create_test_db();
    let original = record("gibbs", 7, 21.9);
    db.upsert_record(&original, false).unwrap();

    let loaded = db.load_records().unwrap();
    assert_eq!(loaded, vec![original]);
}

#[test]
fn test_load_player_records_is_chronological() {
    let mut db = create_test_db();
    let written = db
        .upsert_records(
            &[
                record("gibbs", 9, 12.0),
                record("gibbs", 2, 20.0),
                record("laporta", 1, 4.4),
                record("gibbs", 5, 15.0),
            ],
            false,
        )
        .unwrap();
    assert_eq!(written, 4);

    let weeks: Vec<u16> = db
        .load_player_records(&PlayerId::new("gibbs"))
        .unwrap()
        .iter()
        .map(|r| r.week.as_u16())
        .collect();
    assert_eq!(weeks, vec![2, 5, 9]);
}

#[test]
fn test_clear_all_data() {
    let mut db = create_test_db();
    db.upsert_record(&record("gibbs", 1, 18.5), false).unwrap();
    db.upsert_record(&record("gibbs", 2, 11.0), false).unwrap();
    assert_eq!(db.count_records().unwrap(), 2);

    db.clear_all_data().unwrap();
    assert_eq!(db.count_records().unwrap(), 0);
    assert!(db.load_records().unwrap().is_empty());
}
