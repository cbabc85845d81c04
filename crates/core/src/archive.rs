//! The archive trait seam.
//!
//! The pipeline consumes already-fetched [`RawRow`]s through this trait, so
//! reconciliation and report generation can be exercised against scripted
//! archives in tests. The real TAP implementation lives in
//! `exoquery-archive`.

use crate::error::ArchiveError;
use crate::row::RawRow;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashSet;

/// The outcome of one archive query for a batch of planet names.
#[derive(Debug, Clone)]
pub struct QueryResult {
    /// All solution rows returned, in archive order.
    pub rows: Vec<RawRow>,

    /// Requested planets the archive returned no rows for, in request order.
    pub missing: Vec<String>,

    /// When the query completed.
    pub fetched_at: DateTime<Utc>,
}

impl QueryResult {
    /// Build a result from the requested names and the returned rows,
    /// computing which targets the archive did not know.
    pub fn new(requested: &[String], rows: Vec<RawRow>) -> Self {
        let found: HashSet<&str> = rows.iter().map(|r| r.planet_name.as_str()).collect();
        let missing = requested
            .iter()
            .filter(|name| !found.contains(name.as_str()))
            .cloned()
            .collect();
        Self {
            rows,
            missing,
            fetched_at: Utc::now(),
        }
    }

    /// The rows belonging to one planet, in archive order.
    pub fn rows_for(&self, planet_name: &str) -> Vec<&RawRow> {
        self.rows
            .iter()
            .filter(|r| r.planet_name == planet_name)
            .collect()
    }
}

/// A queryable parameter archive.
#[async_trait]
pub trait Archive: Send + Sync {
    /// Identifier for logs and the status command.
    fn name(&self) -> &str;

    /// Fetch all solution rows for the given planet names. Implementations
    /// own network access, retries, and rate limiting; a missing planet is
    /// not an error — it appears in [`QueryResult::missing`].
    async fn fetch(&self, planet_names: &[String]) -> Result<QueryResult, ArchiveError>;
}
