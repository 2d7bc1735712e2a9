//! SQLite archive of historical game records.
//!
//! - `schema`: connection and schema management
//! - `queries`: record upserts and bulk loads

pub mod queries;
pub mod schema;

#[cfg(test)]
mod tests;

pub use schema::HistoryDatabase;
