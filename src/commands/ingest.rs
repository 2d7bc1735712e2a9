//! Ingest command implementation

use std::path::Path;

use tracing::info;

use crate::{history::source::parse_records, storage::HistoryDatabase, Result};

/// Outcome of archiving one batch of records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IngestSummary {
    pub read: usize,
    pub written: usize,
    pub archived: u64,
}

/// Archive `json` (an array of historical records) into `db`.
pub fn ingest_json(db: &mut HistoryDatabase, json: &str, force: bool, clear: bool) -> Result<IngestSummary> {
    let records = parse_records(json)?;

    if clear {
        db.clear_all_data()?;
        info!("archive cleared");
    }

    let written = db.upsert_records(&records, force)?;
    Ok(IngestSummary {
        read: records.len(),
        written,
        archived: db.count_records()?,
    })
}

/// Handle the ingest command
pub async fn handle_ingest(file: &Path, force: bool, clear: bool) -> Result<()> {
    println!("Reading historical records from {}...", file.display());
    let json = tokio::fs::read_to_string(file).await?;

    let mut db = HistoryDatabase::new()?;
    let summary = ingest_json(&mut db, &json, force, clear)?;

    println!(
        "✓ Archived {} of {} records ({} skipped as already present)",
        summary.written,
        summary.read,
        summary.read - summary.written
    );
    println!("Archive now holds {} games", summary.archived);
    if let Ok(path) = HistoryDatabase::default_path() {
        println!("Archive location: {}", path.display());
    }

    Ok(())
}
