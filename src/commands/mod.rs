//! Command implementations for the fantasy-coach CLI

pub mod coaching;
pub mod common;
pub mod ingest;
pub mod projection;

#[cfg(test)]
mod tests;
