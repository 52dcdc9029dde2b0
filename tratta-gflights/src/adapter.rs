//! Page-fetch abstraction and the production adapter backed by `reqwest`.

#[cfg(feature = "test-adapters")]
use std::sync::Arc;

use async_trait::async_trait;

use tratta_core::TrattaError;

/// Default base URL of the fare-search page.
pub const DEFAULT_BASE_URL: &str = "https://www.google.com/travel/flights";

/// Default render-proxy endpoint used for the fallback fetch path.
///
/// The proxy loads the page in a headless browser and returns the rendered
/// markup, which is needed when the direct response comes back without the
/// results list.
pub const DEFAULT_RENDER_URL: &str = "https://flights-render.trattaorg.workers.dev";

const USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/122.0.0.0 Safari/537.36";

/// Fetch abstraction (so we can inject mocks in tests).
#[async_trait]
pub trait GfFetch: Send + Sync {
    /// Fetch the results page directly.
    async fn fetch_direct(&self, url: &str) -> Result<String, TrattaError>;

    /// Fetch the results page through the render proxy. Default is
    /// unsupported; adapters that have a proxy configured override this.
    async fn fetch_rendered(&self, _url: &str) -> Result<String, TrattaError> {
        Err(TrattaError::unsupported("fare-search/render"))
    }
}

/// Real adapter backed by a single `reqwest::Client`.
#[derive(Clone)]
pub struct RealAdapter {
    client: reqwest::Client,
    render_url: String,
}

impl RealAdapter {
    /// Build a default client with a browser user agent and a pre-accepted
    /// consent cookie, which keeps the EU consent interstitial out of the
    /// response.
    ///
    /// # Panics
    /// Panics if building the underlying `reqwest::Client` fails, which is
    /// unexpected in normal environments.
    #[must_use]
    pub fn new_default() -> Self {
        let http = reqwest::Client::builder()
            .cookie_store(true)
            .user_agent(USER_AGENT)
            .build()
            .expect("Failed to build reqwest client for fare search");
        Self::new(http)
    }

    /// Wrap an existing `reqwest::Client`.
    #[must_use]
    pub fn new(client: reqwest::Client) -> Self {
        Self {
            client,
            render_url: DEFAULT_RENDER_URL.to_string(),
        }
    }

    /// Override the render-proxy endpoint.
    #[must_use]
    pub fn with_render_url(mut self, url: impl Into<String>) -> Self {
        self.render_url = url.into();
        self
    }
}

fn map_http_err(e: &reqwest::Error, context: &str) -> TrattaError {
    if e.is_timeout() {
        TrattaError::connector("tratta-gflights", format!("timeout: {context}"))
    } else if let Some(status) = e.status() {
        TrattaError::connector("tratta-gflights", format!("status {status}: {context}"))
    } else {
        TrattaError::connector("tratta-gflights", format!("{e}: {context}"))
    }
}

#[async_trait]
impl GfFetch for RealAdapter {
    async fn fetch_direct(&self, url: &str) -> Result<String, TrattaError> {
        let resp = self
            .client
            .get(url)
            .header("Cookie", "CONSENT=YES+")
            .send()
            .await
            .map_err(|e| map_http_err(&e, "fare page"))?
            .error_for_status()
            .map_err(|e| map_http_err(&e, "fare page"))?;
        resp.text()
            .await
            .map_err(|e| map_http_err(&e, "fare page body"))
    }

    async fn fetch_rendered(&self, url: &str) -> Result<String, TrattaError> {
        let resp = self
            .client
            .post(&self.render_url)
            .form(&[("url", url)])
            .send()
            .await
            .map_err(|e| map_http_err(&e, "render proxy"))?
            .error_for_status()
            .map_err(|e| map_http_err(&e, "render proxy"))?;
        resp.text()
            .await
            .map_err(|e| map_http_err(&e, "render proxy body"))
    }
}

/* -------- Test-only lightweight adapter constructors ------- */

#[cfg(feature = "test-adapters")]
impl dyn GfFetch {
    /// Build a `GfFetch` from a direct-fetch closure (tests only).
    pub fn from_fn<F>(f: F) -> Arc<dyn GfFetch>
    where
        F: Send + Sync + 'static + Fn(String) -> Result<String, TrattaError>,
    {
        struct FnFetch<F>(F);
        #[async_trait]
        impl<F> GfFetch for FnFetch<F>
        where
            F: Send + Sync + 'static + Fn(String) -> Result<String, TrattaError>,
        {
            async fn fetch_direct(&self, url: &str) -> Result<String, TrattaError> {
                (self.0)(url.to_string())
            }
        }
        Arc::new(FnFetch(f))
    }

    /// Build a `GfFetch` from separate direct and rendered closures (tests only).
    pub fn from_fns<FD, FR>(direct: FD, rendered: FR) -> Arc<dyn GfFetch>
    where
        FD: Send + Sync + 'static + Fn(String) -> Result<String, TrattaError>,
        FR: Send + Sync + 'static + Fn(String) -> Result<String, TrattaError>,
    {
        struct FnFetch<FD, FR>(FD, FR);
        #[async_trait]
        impl<FD, FR> GfFetch for FnFetch<FD, FR>
        where
            FD: Send + Sync + 'static + Fn(String) -> Result<String, TrattaError>,
            FR: Send + Sync + 'static + Fn(String) -> Result<String, TrattaError>,
        {
            async fn fetch_direct(&self, url: &str) -> Result<String, TrattaError> {
                (self.0)(url.to_string())
            }
            async fn fetch_rendered(&self, url: &str) -> Result<String, TrattaError> {
                (self.1)(url.to_string())
            }
        }
        Arc::new(FnFetch(direct, rendered))
    }
}
