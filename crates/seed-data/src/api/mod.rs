//! REST-based seeding.
//!
//! Posts the dataset to a hosted Postgres REST endpoint (PostgREST, as
//! exposed by Supabase) in a single request.

use lungdb::models::{LUNG_CANCER_TABLE, LungCancerRecord};
use reqwest::Client;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Insert failed: {0}")]
    InsertFailed(String),
    #[error("Backend not reachable at {0}")]
    BackendNotReachable(String),
}

/// API seeder that inserts rows through the REST endpoint of a table.
pub struct ApiSeeder {
    client: Client,
    base_url: String,
    api_key: String,
}

impl ApiSeeder {
    /// Creates a new API seeder for the given project URL and key.
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        let base_url: String = base_url.into();
        Self {
            client: Client::new(),
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: api_key.into(),
        }
    }

    /// REST URL of a table.
    pub fn table_url(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.base_url)
    }

    /// Checks if the REST endpoint is reachable with the configured key.
    pub async fn check_health(&self) -> Result<(), ApiError> {
        let url = format!("{}/rest/v1/", self.base_url);
        match self
            .client
            .get(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .send()
            .await
        {
            Ok(resp) if resp.status().is_success() => Ok(()),
            Ok(resp) => Err(ApiError::BackendNotReachable(format!(
                "Health check returned status {}",
                resp.status()
            ))),
            Err(e) => Err(ApiError::BackendNotReachable(e.to_string())),
        }
    }

    /// Inserts every record in one request and returns the submitted count.
    pub async fn insert_records(&self, records: &[LungCancerRecord]) -> Result<u64, ApiError> {
        if records.is_empty() {
            return Ok(0);
        }
        let url = self.table_url(LUNG_CANCER_TABLE);
        debug!("Posting {} rows to {url}", records.len());

        let resp = self
            .client
            .post(&url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Prefer", "return=minimal")
            .json(records)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(ApiError::InsertFailed(format!("Status {status}: {body}")));
        }

        info!("Inserted {} rows via {url}", records.len());
        Ok(records.len() as u64)
    }
}
