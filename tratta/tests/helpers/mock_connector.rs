use std::sync::Arc;

use async_trait::async_trait;
use tokio::time::{Duration, sleep};
use tratta_core::connector::{AirportInfoProvider, BoardProvider, FareProvider, TrattaConnector};
use tratta_core::{
    Airport, AirportCode, BoardRequest, FareRequest, FareResponse, FetchMode, FlightBoard,
    TrattaError,
};

const ALL_MODES: &[FetchMode] = &[FetchMode::Common, FetchMode::Fallback, FetchMode::ForceFallback];

/// Simple in-memory connector used by integration tests.
/// You can tailor behavior (success/fail, supported modes, etc.) via the builder below.
pub struct MockConnector {
    pub name: &'static str,
    pub delay_ms: u64,
    pub fetch_modes: &'static [FetchMode],
    pub board_window: chrono::Duration,

    // Optional closures to customize behavior per test
    pub fares_fn:
        Option<Arc<dyn Fn(&FareRequest) -> Result<FareResponse, TrattaError> + Send + Sync>>,
    pub board_fn:
        Option<Arc<dyn Fn(&BoardRequest) -> Result<FlightBoard, TrattaError> + Send + Sync>>,
    pub airport_fn:
        Option<Arc<dyn Fn(&AirportCode) -> Result<Airport, TrattaError> + Send + Sync>>,
}

impl Default for MockConnector {
    fn default() -> Self {
        Self {
            name: "default_mock",
            delay_ms: 0,
            fetch_modes: ALL_MODES,
            board_window: chrono::Duration::hours(48),
            fares_fn: None,
            board_fn: None,
            airport_fn: None,
        }
    }
}

#[async_trait]
impl FareProvider for MockConnector {
    async fn search_fares(&self, req: &FareRequest) -> Result<FareResponse, TrattaError> {
        if self.delay_ms > 0 {
            sleep(Duration::from_millis(self.delay_ms)).await;
        }
        if let Some(f) = &self.fares_fn {
            return (f)(req);
        }
        Err(TrattaError::unsupported("fare-search"))
    }

    fn supported_fetch_modes(&self) -> &'static [FetchMode] {
        self.fetch_modes
    }
}

#[async_trait]
impl BoardProvider for MockConnector {
    async fn board(&self, req: &BoardRequest) -> Result<FlightBoard, TrattaError> {
        if self.delay_ms > 0 {
            sleep(Duration::from_millis(self.delay_ms)).await;
        }
        if let Some(f) = &self.board_fn {
            return (f)(req);
        }
        Err(TrattaError::unsupported("board"))
    }

    fn max_board_window(&self) -> chrono::Duration {
        self.board_window
    }
}

#[async_trait]
impl AirportInfoProvider for MockConnector {
    async fn airport(&self, code: &AirportCode) -> Result<Airport, TrattaError> {
        if self.delay_ms > 0 {
            sleep(Duration::from_millis(self.delay_ms)).await;
        }
        if let Some(f) = &self.airport_fn {
            return (f)(code);
        }
        Err(TrattaError::unsupported("airport-info"))
    }
}

#[async_trait]
impl TrattaConnector for MockConnector {
    fn name(&self) -> &'static str {
        self.name
    }

    fn as_fare_provider(&self) -> Option<&dyn FareProvider> {
        if self.fares_fn.is_some() {
            Some(self as &dyn FareProvider)
        } else {
            None
        }
    }

    fn as_board_provider(&self) -> Option<&dyn BoardProvider> {
        if self.board_fn.is_some() {
            Some(self as &dyn BoardProvider)
        } else {
            None
        }
    }

    fn as_airport_info_provider(&self) -> Option<&dyn AirportInfoProvider> {
        if self.airport_fn.is_some() {
            Some(self as &dyn AirportInfoProvider)
        } else {
            None
        }
    }
}

/* ---------- Tiny builder helpers used by tests ---------- */

impl MockConnector {
    #[allow(dead_code)]
    pub fn builder() -> MockConnectorBuilder {
        MockConnectorBuilder::new()
    }
}

pub struct MockConnectorBuilder {
    name: &'static str,
    delay_ms: u64,
    fetch_modes: &'static [FetchMode],
    board_window: chrono::Duration,
    fares_fn:
        Option<Arc<dyn Fn(&FareRequest) -> Result<FareResponse, TrattaError> + Send + Sync>>,
    board_fn:
        Option<Arc<dyn Fn(&BoardRequest) -> Result<FlightBoard, TrattaError> + Send + Sync>>,
    airport_fn:
        Option<Arc<dyn Fn(&AirportCode) -> Result<Airport, TrattaError> + Send + Sync>>,
}

impl MockConnectorBuilder {
    pub fn new() -> Self {
        Self {
            name: "mock",
            delay_ms: 0,
            fetch_modes: ALL_MODES,
            board_window: chrono::Duration::hours(48),
            fares_fn: None,
            board_fn: None,
            airport_fn: None,
        }
    }

    pub fn name(mut self, name: &'static str) -> Self {
        self.name = name;
        self
    }
    #[allow(dead_code)]
    pub fn delay(mut self, d: Duration) -> Self {
        self.delay_ms = u64::try_from(d.as_millis()).unwrap_or(u64::MAX);
        self
    }
    #[allow(dead_code)]
    pub fn fetch_modes(mut self, modes: &'static [FetchMode]) -> Self {
        self.fetch_modes = modes;
        self
    }
    #[allow(dead_code)]
    pub fn board_window(mut self, window: chrono::Duration) -> Self {
        self.board_window = window;
        self
    }

    // Fares
    pub fn with_fares_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&FareRequest) -> Result<FareResponse, TrattaError> + Send + Sync + 'static,
    {
        self.fares_fn = Some(Arc::new(f));
        self
    }
    #[allow(dead_code)]
    pub fn returns_fares_ok(self, resp: FareResponse) -> Self {
        self.with_fares_fn(move |_req| Ok(resp.clone()))
    }

    // Board
    pub fn with_board_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&BoardRequest) -> Result<FlightBoard, TrattaError> + Send + Sync + 'static,
    {
        self.board_fn = Some(Arc::new(f));
        self
    }
    #[allow(dead_code)]
    pub fn returns_board_ok(self, board: FlightBoard) -> Self {
        self.with_board_fn(move |_req| Ok(board.clone()))
    }

    // Airport metadata
    pub fn with_airport_fn<F>(mut self, f: F) -> Self
    where
        F: Fn(&AirportCode) -> Result<Airport, TrattaError> + Send + Sync + 'static,
    {
        self.airport_fn = Some(Arc::new(f));
        self
    }
    #[allow(dead_code)]
    pub fn returns_airport_ok(self, airport: Airport) -> Self {
        self.with_airport_fn(move |_code| Ok(airport.clone()))
    }

    pub fn build(self) -> Arc<MockConnector> {
        Arc::new(MockConnector {
            name: self.name,
            delay_ms: self.delay_ms,
            fetch_modes: self.fetch_modes,
            board_window: self.board_window,
            fares_fn: self.fares_fn,
            board_fn: self.board_fn,
            airport_fn: self.airport_fn,
        })
    }
}
