//! tratta-aerodata
//!
//! Connector that implements `TrattaConnector` on top of the AeroDataBox
//! FIDS API (airport departure/arrival boards) and its companion IATA
//! airport-metadata endpoint, both served through RapidAPI.
#![warn(missing_docs)]

mod model;

use async_trait::async_trait;
use chrono::Duration;
use tratta_core::{
    Airport, AirportCode, BoardDirection, BoardRequest, FlightBoard, TrattaError,
    connector::{AirportInfoProvider, BoardProvider, ConnectorKey, TrattaConnector},
};

use model::{AirportPayload, BoardPayload};

/// Default base URL for the FIDS endpoints.
pub const DEFAULT_BOARD_BASE_URL: &str = "https://aerodatabox.p.rapidapi.com";
/// Default base URL for the airport-metadata endpoints.
pub const DEFAULT_AIRPORTS_BASE_URL: &str = "https://iata-airports.p.rapidapi.com";

/// The provider serves at most this much board per request; wider windows
/// must be split by the caller.
const MAX_BOARD_WINDOW_HOURS: i64 = 12;

/// Public connector type. Construct through [`AdConnector::builder`].
#[derive(Debug)]
pub struct AdConnector {
    client: reqwest::Client,
    api_key: String,
    board_base: String,
    board_host: String,
    airports_base: String,
    airports_host: String,
}

/// Builder for [`AdConnector`]. The RapidAPI key is the only required field.
#[derive(Debug, Default)]
pub struct AdConnectorBuilder {
    api_key: Option<String>,
    client: Option<reqwest::Client>,
    board_base: Option<String>,
    airports_base: Option<String>,
}

impl AdConnectorBuilder {
    /// Set the RapidAPI key used for both endpoints.
    #[must_use]
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Provide a pre-configured `reqwest::Client`.
    #[must_use]
    pub fn client(mut self, client: reqwest::Client) -> Self {
        self.client = Some(client);
        self
    }

    /// Override the FIDS base URL (tests, proxies).
    #[must_use]
    pub fn board_base_url(mut self, url: impl Into<String>) -> Self {
        self.board_base = Some(url.into());
        self
    }

    /// Override the airport-metadata base URL (tests, proxies).
    #[must_use]
    pub fn airports_base_url(mut self, url: impl Into<String>) -> Self {
        self.airports_base = Some(url.into());
        self
    }

    /// Finalize the connector.
    ///
    /// # Errors
    /// Returns `InvalidArg` when no API key was provided.
    pub fn build(self) -> Result<AdConnector, TrattaError> {
        let api_key = self
            .api_key
            .ok_or_else(|| TrattaError::invalid_arg("an AeroDataBox API key is required"))?;
        let board_base = self
            .board_base
            .unwrap_or_else(|| DEFAULT_BOARD_BASE_URL.to_string());
        let airports_base = self
            .airports_base
            .unwrap_or_else(|| DEFAULT_AIRPORTS_BASE_URL.to_string());
        Ok(AdConnector {
            client: self.client.unwrap_or_default(),
            api_key,
            board_host: host_of(&board_base),
            airports_host: host_of(&airports_base),
            board_base,
            airports_base,
        })
    }
}

/// Extracts the authority from a base URL for the `x-rapidapi-host` header.
fn host_of(url: &str) -> String {
    url.split("://")
        .nth(1)
        .unwrap_or(url)
        .split('/')
        .next()
        .unwrap_or_default()
        .to_string()
}

impl AdConnector {
    /// Static connector key for orchestrator priority configuration.
    pub const KEY: ConnectorKey = ConnectorKey::new("tratta-aerodata");

    /// Returns an unconfigured builder.
    #[must_use]
    pub fn builder() -> AdConnectorBuilder {
        AdConnectorBuilder::default()
    }

    fn map_http_err(e: reqwest::Error) -> TrattaError {
        if e.is_timeout() {
            TrattaError::connector("tratta-aerodata", "request timed out")
        } else if let Some(status) = e.status() {
            TrattaError::connector("tratta-aerodata", format!("status {status}"))
        } else {
            TrattaError::connector("tratta-aerodata", e.to_string())
        }
    }

    fn board_url(&self, req: &BoardRequest) -> String {
        format!(
            "{}/flights/airports/iata/{}/{}/{}",
            self.board_base,
            req.airport,
            req.from.format("%Y-%m-%dT%H:%M"),
            req.to.format("%Y-%m-%dT%H:%M"),
        )
    }
}

#[async_trait]
impl BoardProvider for AdConnector {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(self, req), fields(airport = %req.airport))
    )]
    async fn board(&self, req: &BoardRequest) -> Result<FlightBoard, TrattaError> {
        if req.window() > self.max_board_window() {
            return Err(TrattaError::invalid_arg(format!(
                "board window of {} minutes exceeds the provider cap of {} hours",
                req.window().num_minutes(),
                MAX_BOARD_WINDOW_HOURS,
            )));
        }

        let direction = match req.direction {
            BoardDirection::Departures => "Departure",
            BoardDirection::Arrivals => "Arrival",
            _ => "Both",
        };

        let resp = self
            .client
            .get(self.board_url(req))
            .query(&[
                ("withLeg", "true"),
                ("direction", direction),
                ("withCancelled", "false"),
                ("withCodeshared", "false"),
                ("withCargo", "false"),
                ("withPrivate", "false"),
                ("withLocation", "false"),
            ])
            .header("x-rapidapi-key", &self.api_key)
            .header("x-rapidapi-host", &self.board_host)
            .send()
            .await
            .map_err(Self::map_http_err)?;

        // No traffic in the window comes back as 204.
        if resp.status() == reqwest::StatusCode::NO_CONTENT {
            return Ok(FlightBoard::default());
        }
        let payload: BoardPayload = resp
            .error_for_status()
            .map_err(Self::map_http_err)?
            .json()
            .await
            .map_err(|e| TrattaError::Data(format!("malformed board payload: {e}")))?;
        Ok(payload.into_board(&req.airport))
    }

    fn max_board_window(&self) -> Duration {
        Duration::hours(MAX_BOARD_WINDOW_HOURS)
    }
}

#[async_trait]
impl AirportInfoProvider for AdConnector {
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(skip(self, code), fields(airport = %code))
    )]
    async fn airport(&self, code: &AirportCode) -> Result<Airport, TrattaError> {
        let url = format!("{}/airports/{}/", self.airports_base, code);
        let resp = self
            .client
            .get(url)
            .header("x-rapidapi-key", &self.api_key)
            .header("x-rapidapi-host", &self.airports_host)
            .send()
            .await
            .map_err(Self::map_http_err)?;

        if resp.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(TrattaError::not_found(format!("airport {code}")));
        }
        let payload: AirportPayload = resp
            .error_for_status()
            .map_err(Self::map_http_err)?
            .json()
            .await
            .map_err(|e| TrattaError::Data(format!("malformed airport payload: {e}")))?;
        Airport::try_from(payload)
    }
}

#[async_trait]
impl TrattaConnector for AdConnector {
    fn name(&self) -> &'static str {
        "tratta-aerodata"
    }
    fn vendor(&self) -> &'static str {
        "AeroDataBox"
    }

    fn as_board_provider(&self) -> Option<&dyn BoardProvider> {
        Some(self as &dyn BoardProvider)
    }
    fn as_airport_info_provider(&self) -> Option<&dyn AirportInfoProvider> {
        Some(self as &dyn AirportInfoProvider)
    }
}
