//! NASA Exoplanet Archive TAP client.
//!
//! Implements the [`Archive`] trait from `exoquery-core` against the
//! archive's synchronous TAP endpoint. One request fetches every published
//! solution row for a batch of planets; the reconciler downstream owns the
//! collapse to one value per parameter.
//!
//! The client owns network concerns only: timeouts, rate-limit retries,
//! and status mapping. Missing planets are not errors — they come back in
//! [`QueryResult::missing`] so the pipeline can keep going.

pub mod adql;
pub mod parse;

use async_trait::async_trait;
use exoquery_config::ArchiveConfig;
use exoquery_core::{Archive, ArchiveError, FieldCatalogue, QueryResult};
use tracing::{debug, info, warn};

/// TAP client for the NASA Exoplanet Archive.
pub struct TapArchive {
    name: String,
    base_url: String,
    table: String,
    catalogue: FieldCatalogue,
    max_attempts: u32,
    client: reqwest::Client,
}

impl TapArchive {
    /// Build a client from configuration and the field catalogue.
    pub fn new(config: &ArchiveConfig, catalogue: FieldCatalogue) -> Result<Self, ArchiveError> {
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ArchiveError::Network(e.to_string()))?;

        Ok(Self {
            name: "nasa-epa".into(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            table: config.table.clone(),
            catalogue,
            max_attempts: config.max_attempts.max(1),
            client,
        })
    }

    /// One request/response round trip, no retry handling.
    async fn execute(&self, query: &str) -> Result<serde_json::Value, ArchiveError> {
        debug!(archive = %self.name, table = %self.table, "Sending TAP query");

        let response = self
            .client
            .get(&self.base_url)
            .query(&[("query", query), ("format", "json")])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ArchiveError::Timeout(e.to_string())
                } else {
                    ArchiveError::Network(e.to_string())
                }
            })?;

        let status = response.status().as_u16();

        if status == 429 {
            return Err(ArchiveError::RateLimited {
                retry_after_secs: 5,
            });
        }

        if status != 200 {
            let error_body = response.text().await.unwrap_or_default();
            warn!(status, body = %error_body, "Archive returned error");
            return Err(ArchiveError::ApiError {
                status_code: status,
                message: error_body,
            });
        }

        response
            .json()
            .await
            .map_err(|e| ArchiveError::MalformedResponse(e.to_string()))
    }
}

#[async_trait]
impl Archive for TapArchive {
    fn name(&self) -> &str {
        &self.name
    }

    async fn fetch(&self, planet_names: &[String]) -> Result<QueryResult, ArchiveError> {
        if planet_names.is_empty() {
            return Ok(QueryResult::new(&[], Vec::new()));
        }

        let query = adql::build_query(&self.catalogue, &self.table, planet_names);
        info!(
            archive = %self.name,
            targets = planet_names.len(),
            "Querying archive"
        );

        let mut attempt = 0;
        let payload = loop {
            attempt += 1;
            match self.execute(&query).await {
                Err(ArchiveError::RateLimited { retry_after_secs })
                    if attempt < self.max_attempts =>
                {
                    warn!(attempt, retry_after_secs, "Archive rate limited, backing off");
                    tokio::time::sleep(std::time::Duration::from_secs(retry_after_secs)).await;
                }
                other => break other?,
            }
        };

        let rows = parse::rows_from_json(&payload, &self.catalogue)?;
        let result = QueryResult::new(planet_names, rows);

        if result.missing.is_empty() {
            info!(rows = result.rows.len(), "All targets resolved in the archive");
        } else {
            warn!(
                missing = result.missing.len(),
                targets = ?result.missing,
                "Some targets could not be found in the archive"
            );
        }

        Ok(result)
    }
}
