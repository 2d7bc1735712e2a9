//! Pluggable ingest sources for historical game records.

use super::{models::HistoricalRecord, sample::sample_records};
use crate::{
    config::HistorySourceKind,
    error::{CoachError, Result},
    storage::HistoryDatabase,
};
use async_trait::async_trait;
use reqwest::Client;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Anything that can produce the full historical corpus.
#[async_trait]
pub trait HistoricalSource: Send + Sync {
    async fn load(&self) -> Result<Vec<HistoricalRecord>>;

    /// Short human-readable label for logs.
    fn describe(&self) -> String;
}

/// The built-in sample corpus.
#[derive(Debug, Default, Clone)]
pub struct SampleSource;

#[async_trait]
impl HistoricalSource for SampleSource {
    async fn load(&self) -> Result<Vec<HistoricalRecord>> {
        Ok(sample_records())
    }

    fn describe(&self) -> String {
        "built-in sample".to_string()
    }
}

/// Fixed records held in memory; handy for embedding and tests.
#[derive(Debug, Default, Clone)]
pub struct StaticSource {
    records: Vec<HistoricalRecord>,
}

impl StaticSource {
    pub fn new(records: Vec<HistoricalRecord>) -> Self {
        Self { records }
    }
}

#[async_trait]
impl HistoricalSource for StaticSource {
    async fn load(&self) -> Result<Vec<HistoricalRecord>> {
        Ok(self.records.clone())
    }

    fn describe(&self) -> String {
        format!("{} static records", self.records.len())
    }
}

/// A JSON array of records on disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// Parse a JSON array of historical records.
pub fn parse_records(json: &str) -> Result<Vec<HistoricalRecord>> {
    Ok(serde_json::from_str(json)?)
}

#[async_trait]
impl HistoricalSource for JsonFileSource {
    async fn load(&self) -> Result<Vec<HistoricalRecord>> {
        let contents = tokio::fs::read_to_string(&self.path).await?;
        parse_records(&contents)
    }

    fn describe(&self) -> String {
        format!("file {}", self.path.display())
    }
}

/// A JSON array of records served over HTTP.
#[derive(Debug, Clone)]
pub struct HttpSource {
    url: String,
    client: Client,
}

impl HttpSource {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        let client = Client::builder().user_agent("fantasy-coach/0.1").build()?;
        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

#[async_trait]
impl HistoricalSource for HttpSource {
    async fn load(&self) -> Result<Vec<HistoricalRecord>> {
        debug!(url = %self.url, "fetching historical records");
        let records = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?
            .json::<Vec<HistoricalRecord>>()
            .await?;
        Ok(records)
    }

    fn describe(&self) -> String {
        format!("url {}", self.url)
    }
}

/// The SQLite archive written by `fantasy-coach ingest`.
#[derive(Debug, Clone)]
pub struct DatabaseSource {
    path: PathBuf,
}

impl DatabaseSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl HistoricalSource for DatabaseSource {
    async fn load(&self) -> Result<Vec<HistoricalRecord>> {
        let path = self.path.clone();
        let records = tokio::task::spawn_blocking(move || -> Result<Vec<HistoricalRecord>> {
            let db = HistoryDatabase::open(&path)?;
            Ok(db.load_records()?)
        })
        .await??;
        Ok(records)
    }

    fn describe(&self) -> String {
        format!("archive {}", self.path.display())
    }
}

/// The archive at its default path when it holds records, otherwise the sample.
#[derive(Debug, Clone, Default)]
pub struct AutoSource {
    archive: Option<PathBuf>,
}

impl AutoSource {
    pub fn new() -> Self {
        Self {
            archive: HistoryDatabase::default_path().ok(),
        }
    }

    pub fn with_archive(path: impl Into<PathBuf>) -> Self {
        Self {
            archive: Some(path.into()),
        }
    }
}

#[async_trait]
impl HistoricalSource for AutoSource {
    async fn load(&self) -> Result<Vec<HistoricalRecord>> {
        if let Some(path) = self.archive.as_ref().filter(|p| p.exists()) {
            let records = DatabaseSource::new(path.clone()).load().await?;
            if !records.is_empty() {
                info!(path = %path.display(), count = records.len(), "using archived history");
                return Ok(records);
            }
        }
        info!("no archived history found, using built-in sample");
        SampleSource.load().await
    }

    fn describe(&self) -> String {
        match &self.archive {
            Some(path) => format!("archive {} or built-in sample", path.display()),
            None => "built-in sample".to_string(),
        }
    }
}

/// Build the source a config asks for.
pub fn source_from_config(kind: &HistorySourceKind) -> Result<Box<dyn HistoricalSource>> {
    let source: Box<dyn HistoricalSource> = match kind {
        HistorySourceKind::Auto => Box::new(AutoSource::new()),
        HistorySourceKind::Sample => Box::new(SampleSource),
        HistorySourceKind::File(path) => Box::new(JsonFileSource::new(path.clone())),
        HistorySourceKind::Url(url) => {
            if url.trim().is_empty() {
                return Err(CoachError::Config {
                    key: "history_url".to_string(),
                    message: "empty URL".to_string(),
                });
            }
            Box::new(HttpSource::new(url.clone())?)
        }
        HistorySourceKind::Database(path) => Box::new(DatabaseSource::new(path.clone())),
    };
    Ok(source)
}
