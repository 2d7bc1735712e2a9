//! Archive persistence tests

use fantasy_coach::{
    history::{models::HistoricalRecord, sample::sample_records},
    storage::HistoryDatabase,
    PlayerId, Week,
};
use tempfile::TempDir;

fn archive_path(dir: &TempDir) -> std::path::PathBuf {
    dir.path().join("nested").join("history.db")
}

#[test]
fn test_open_creates_parent_directories() {
    let dir = TempDir::new().unwrap();
    let path = archive_path(&dir);

    let db = HistoryDatabase::open(&path).unwrap();
    assert!(path.exists());
    assert_eq!(db.count_records().unwrap(), 0);
}

#[test]
fn test_records_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let path = archive_path(&dir);

    {
        let mut db = HistoryDatabase::open(&path).unwrap();
        assert_eq!(db.upsert_records(&sample_records(), false).unwrap(), 48);
    }

    let db = HistoryDatabase::open(&path).unwrap();
    assert_eq!(db.count_records().unwrap(), 48);

    let gibbs = db.load_player_records(&PlayerId::new("gibbs_jahmyr")).unwrap();
    let weeks: Vec<Week> = gibbs.iter().map(|r| r.week).collect();
    assert_eq!(weeks, [1, 3, 7, 10, 13, 16].map(Week::new).to_vec());
}

#[test]
fn test_loaded_records_match_ingested() {
    let mut db = HistoryDatabase::new_in_memory().unwrap();
    let records = sample_records();
    db.upsert_records(&records, false).unwrap();

    let mut loaded = db.load_records().unwrap();
    let mut expected: Vec<HistoricalRecord> = records;
    let key = |r: &HistoricalRecord| (r.player_id.clone(), r.season, r.week);
    loaded.sort_by_key(key);
    expected.sort_by_key(key);

    assert_eq!(loaded.len(), expected.len());
    for (got, want) in loaded.iter().zip(&expected) {
        assert_eq!(key(got), key(want));
        assert_eq!(got.name, want.name);
        assert_eq!(got.position, want.position);
        assert_eq!(got.game_context, want.game_context);
        assert!((got.fantasy_points() - want.fantasy_points()).abs() < 1e-9);
    }
}

#[test]
fn test_forced_update_replaces_points() {
    let mut db = HistoryDatabase::new_in_memory().unwrap();
    let mut record = sample_records().remove(0);
    db.upsert_record(&record, false).unwrap();

    record.stats.fantasy_points = 99.9;
    assert!(!db.upsert_record(&record, false).unwrap());
    assert!(db.upsert_record(&record, true).unwrap());

    let stored = db.load_player_records(&record.player_id).unwrap();
    assert_eq!(stored.len(), 1);
    assert!((stored[0].fantasy_points() - 99.9).abs() < 1e-9);
}
