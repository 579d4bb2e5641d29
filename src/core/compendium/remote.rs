//! HTTP-backed compendium talking to the public 5e SRD API.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde_json::Value;
use tracing::instrument;
use url::Url;

use super::error::{CompendiumError, Result};
use super::record::{ResourceRecord, ResultEntry};
use super::source::CompendiumSource;

/// Public API host used when no base URL is configured.
pub const DEFAULT_API_BASE_URL: &str = "https://www.dnd5eapi.co";

/// Default per-request timeout.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Shape of a category listing response.
#[derive(Debug, Deserialize)]
struct ListingResponse {
    #[serde(default)]
    results: Vec<Value>,
}

/// Compendium source that issues `GET <base_url><url>` for every lookup.
pub struct RemoteCompendium {
    base_url: Url,
    client: Client,
}

impl RemoteCompendium {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| {
            CompendiumError::Transport(format!("invalid API base URL '{base_url}': {e}"))
        })?;
        let client = Client::builder().timeout(timeout).build()?;

        log::info!("Remote compendium configured for {base_url}");
        Ok(Self { base_url, client })
    }

    /// Use the public API with default settings.
    pub fn public() -> Result<Self> {
        Self::new(
            DEFAULT_API_BASE_URL,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str()
    }

    /// `path` is appended to the base URL, keeping any base path prefix.
    fn endpoint(&self, path: &str) -> Result<Url> {
        let base = self.base_url.as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        Url::parse(&format!("{base}/{path}"))
            .map_err(|e| CompendiumError::Transport(format!("invalid path '{path}': {e}")))
    }

    async fn get_json(&self, path: &str) -> Result<Value> {
        let endpoint = self.endpoint(path)?;
        log::debug!("GET {endpoint}");

        let resp = self.client.get(endpoint).send().await?;
        let status = resp.status();

        if status == StatusCode::NOT_FOUND {
            return Err(CompendiumError::not_found(path));
        }
        if !status.is_success() {
            let text = resp.text().await.unwrap_or_default();
            return Err(CompendiumError::Transport(format!(
                "GET {path} returned {}: {text}",
                status.as_u16()
            )));
        }

        let body = resp.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

#[async_trait]
impl CompendiumSource for RemoteCompendium {
    fn id(&self) -> &str {
        "remote"
    }

    #[instrument(skip(self))]
    async fn resolve(&self, url: &str) -> Result<ResourceRecord> {
        let value = self.get_json(url).await?;
        ResourceRecord::from_value(value).map_err(|e| match e {
            CompendiumError::Malformed { reason, .. } => CompendiumError::malformed(url, reason),
            other => other,
        })
    }

    #[instrument(skip(self))]
    async fn list_category(&self, path: &str) -> Result<Vec<ResultEntry>> {
        let value = self.get_json(path).await?;
        let listing: ListingResponse = serde_json::from_value(value)?;

        let mut entries = Vec::with_capacity(listing.results.len());
        for item in listing.results {
            match ResourceRecord::from_value(item) {
                Ok(record) => entries.push(ResultEntry::from_record(record)),
                Err(e) => log::warn!("Skipping listing item under {path}: {e}"),
            }
        }
        Ok(entries)
    }
}
