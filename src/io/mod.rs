//! File IO: CSV ingest of pushover samples and JSON export of results.

pub mod export;
pub mod ingest;
