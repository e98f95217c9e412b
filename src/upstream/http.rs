//! HTTP implementation of the upstream contract
//!
//! Every request carries the configured timeout; an elapsed timeout is
//! reported as [`UpstreamError::Timeout`] and treated like any other
//! transport failure by the callers.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde_json::Value;
use tracing::{debug, info, instrument, warn};

use super::error::UpstreamError;
use super::types::{IdentityResponse, RawRecord};
use super::InventoryService;
use crate::config::UpstreamConfig;
use crate::core_types::{AccountId, GameId};

/// Client for the identity / inventory HTTP API
pub struct HttpInventoryService {
    http: reqwest::Client,
    base_url: String,
    timeout_ms: u64,
}

impl HttpInventoryService {
    pub fn new(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        info!(
            base_url = %config.base_url,
            timeout_ms = config.request_timeout_ms,
            "Initializing upstream inventory client"
        );

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_millis(config.request_timeout_ms))
            .build()
            .map_err(|e| UpstreamError::Transport(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout_ms: config.request_timeout_ms,
        })
    }

    fn identity_url(&self, game: GameId) -> String {
        format!("{}/{}/steamid", self.base_url, game)
    }

    fn inventory_url(&self, account: &AccountId, game: GameId) -> String {
        format!("{}/inventory/{}/{}", self.base_url, account, game)
    }

    fn priced_inventory_url(&self, account: &AccountId) -> String {
        format!("{}/getjsoninv/{}", self.base_url, account)
    }

    fn map_error(&self, e: reqwest::Error) -> UpstreamError {
        if e.is_timeout() {
            UpstreamError::Timeout(self.timeout_ms)
        } else {
            UpstreamError::from(e)
        }
    }

    /// Send a GET and fail on any non-2xx status
    async fn get_ok(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<reqwest::Response, UpstreamError> {
        let response = request.send().await.map_err(|e| self.map_error(e))?;
        let status = response.status();
        if !status.is_success() {
            debug!(status = status.as_u16(), "Upstream rejected request");
            return Err(UpstreamError::Status {
                status: status.as_u16(),
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl InventoryService for HttpInventoryService {
    fn name(&self) -> &'static str {
        "http"
    }

    #[instrument(skip(self, profile_reference))]
    async fn resolve_identity(
        &self,
        game: GameId,
        profile_reference: &str,
    ) -> Result<AccountId, UpstreamError> {
        let request = self
            .http
            .get(self.identity_url(game))
            .query(&[("text", profile_reference)]);
        let response = self.get_ok(request).await?;
        let body: IdentityResponse = response.json().await.map_err(|e| self.map_error(e))?;
        body.account_id()
            .ok_or_else(|| UpstreamError::Decode("identity response has no account id".to_string()))
    }

    #[instrument(skip(self, account), fields(account = %account))]
    async fn check_inventory(
        &self,
        account: &AccountId,
        game: GameId,
    ) -> Result<(), UpstreamError> {
        let response = self
            .get_ok(self.http.get(self.inventory_url(account, game)))
            .await?;
        // Only a well-formed body counts as a live inventory; its content is unused.
        let _: Value = response.json().await.map_err(|e| self.map_error(e))?;
        Ok(())
    }

    #[instrument(skip(self, account), fields(account = %account))]
    async fn fetch_priced_inventory(
        &self,
        account: &AccountId,
    ) -> Result<Vec<RawRecord>, UpstreamError> {
        let response = self
            .get_ok(self.http.get(self.priced_inventory_url(account)))
            .await?;
        let body: Value = response.json().await.map_err(|e| self.map_error(e))?;
        Ok(decode_records(body))
    }
}

/// Decode the priced inventory payload
///
/// A body that is not an array is an empty inventory. Entries that are not
/// objects are skipped.
pub fn decode_records(body: Value) -> Vec<RawRecord> {
    let Value::Array(entries) = body else {
        warn!("Priced inventory payload is not an array, treating as empty");
        return Vec::new();
    };

    let total = entries.len();
    let records: Vec<RawRecord> = entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value(entry).ok())
        .collect();

    if records.len() != total {
        warn!(
            skipped = total - records.len(),
            "Skipped malformed inventory records"
        );
    }
    records
}
