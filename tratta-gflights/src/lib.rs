//! tratta-gflights
//!
//! Public connector that implements `TrattaConnector` on top of the Google
//! Flights web interface. Searches are encoded into the `tfs` protobuf URL
//! parameter and results are extracted from the returned page; a render proxy
//! covers pages that only populate client-side.
#![warn(missing_docs)]

/// Fetch abstraction and the production adapter backed by `reqwest`.
pub mod adapter;
/// Builder helpers for composing the connector with middleware.
pub mod builder;
/// Result-page extraction.
pub mod parse;
/// Wire encoding of the `tfs` query parameter.
pub mod tfs;

use std::sync::Arc;

use adapter::{GfFetch, RealAdapter};
use async_trait::async_trait;
use tratta_core::{
    FareRequest, FareResponse, FetchMode, TrattaError,
    connector::{ConnectorKey, FareProvider, TrattaConnector},
};

#[cfg(feature = "test-adapters")]
type FetchAdapter = Arc<dyn GfFetch>;
#[cfg(not(feature = "test-adapters"))]
type FetchAdapter = Arc<RealAdapter>;

/// Public connector type. Production users will construct with `GfConnector::new_default()`.
pub struct GfConnector {
    fetch: FetchAdapter,
    base_url: String,
    language: String,
    currency: Option<String>,
}

impl GfConnector {
    /// Static connector key for orchestrator priority configuration.
    pub const KEY: ConnectorKey = ConnectorKey::new("tratta-gflights");

    fn looks_like_not_found(msg: &str) -> bool {
        let m = msg.to_ascii_lowercase();
        m.contains("not found") || m.contains("no results") || m.contains("no flights")
    }

    fn normalize_error(e: TrattaError, what: &str) -> TrattaError {
        match e {
            TrattaError::Connector { connector: _, msg } => {
                if Self::looks_like_not_found(&msg) {
                    TrattaError::not_found(what.to_string())
                } else {
                    TrattaError::connector("tratta-gflights", msg)
                }
            }
            TrattaError::Other(msg) => TrattaError::connector("tratta-gflights", msg),
            other => other,
        }
    }

    /// Build with a fresh default HTTP adapter inside.
    #[must_use]
    pub fn new_default() -> Self {
        Self::from_adapter_impl(Arc::new(RealAdapter::new_default()))
    }

    /// Build from an existing `reqwest::Client`.
    ///
    /// Note: the provided client should enable a cookie store and carry a
    /// browser user agent, or the page may come back as a consent
    /// interstitial.
    #[must_use]
    pub fn new_with_client(client: reqwest::Client) -> Self {
        Self::from_adapter_impl(Arc::new(RealAdapter::new(client)))
    }

    /// For tests/injection (requires the `test-adapters` feature).
    #[cfg(feature = "test-adapters")]
    #[must_use]
    pub fn from_adapter(fetch: Arc<dyn GfFetch>) -> Self {
        Self::from_adapter_impl(fetch)
    }

    fn from_adapter_impl(fetch: FetchAdapter) -> Self {
        Self {
            fetch,
            base_url: adapter::DEFAULT_BASE_URL.to_string(),
            language: "en".to_string(),
            currency: None,
        }
    }

    /// Override the results-page base URL (tests, regional mirrors).
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set the `hl` language parameter. Extraction anchors assume English.
    #[must_use]
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Set the `curr` currency parameter.
    #[must_use]
    pub fn with_currency(mut self, currency: impl Into<String>) -> Self {
        self.currency = Some(currency.into());
        self
    }

    fn results_url(&self, req: &FareRequest) -> String {
        let mut url = format!(
            "{}?tfs={}&hl={}",
            self.base_url,
            tfs::encode_tfs(req),
            self.language
        );
        if let Some(curr) = &self.currency {
            url.push_str("&curr=");
            url.push_str(curr);
        }
        url
    }

    async fn fetch_page(&self, url: &str, mode: FetchMode, route: &str) -> Result<String, TrattaError> {
        match mode {
            FetchMode::ForceFallback => self.fetch.fetch_rendered(url).await,
            FetchMode::Fallback => match self.fetch.fetch_direct(url).await {
                Ok(html) if !parse::parse_options(&html).is_empty() => Ok(html),
                // Empty or failed direct response: the page likely needs a
                // browser to populate, retry through the render proxy.
                Ok(_) | Err(_) => self.fetch.fetch_rendered(url).await,
            },
            // `FetchMode` is non-exhaustive; unknown modes fetch directly.
            _ => self.fetch.fetch_direct(url).await,
        }
        .map_err(|e| Self::normalize_error(e, &format!("flights for {route}")))
    }
}

#[async_trait]
impl FareProvider for GfConnector {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(self, req), fields(route = %req.legs()[0].route()))
    )]
    async fn search_fares(&self, req: &FareRequest) -> Result<FareResponse, TrattaError> {
        let route = req.legs()[0].route();
        let url = self.results_url(req);
        let html = self.fetch_page(&url, req.fetch_mode(), &route).await?;
        parse::parse_response(&html, &route)
    }

    fn supported_fetch_modes(&self) -> &'static [FetchMode] {
        const ALL: &[FetchMode] = &[
            FetchMode::Common,
            FetchMode::Fallback,
            FetchMode::ForceFallback,
        ];
        ALL
    }
}

#[async_trait]
impl TrattaConnector for GfConnector {
    fn name(&self) -> &'static str {
        "tratta-gflights"
    }
    fn vendor(&self) -> &'static str {
        "Google Flights"
    }

    fn as_fare_provider(&self) -> Option<&dyn FareProvider> {
        Some(self as &dyn FareProvider)
    }
}
