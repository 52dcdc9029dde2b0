use async_trait::async_trait;
use tratta_core::connector::{
    AirportInfoProvider, BoardProvider, FareProvider, TrattaConnector,
};
use tratta_core::{
    Airport, AirportCode, BoardRequest, FareRequest, FareResponse, FetchMode, FlightBoard,
    TrattaError,
};

mod fixtures;

/// Mock connector for CI-safe examples. Provides deterministic data from static fixtures.
pub struct MockConnector;

impl Default for MockConnector {
    fn default() -> Self {
        Self::new()
    }
}

impl MockConnector {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn not_found(what: &str) -> TrattaError {
        TrattaError::not_found(what.to_string())
    }

    async fn maybe_fail_or_timeout(
        airport: &str,
        capability: &'static str,
    ) -> Result<(), TrattaError> {
        match airport {
            "ZZF" => Err(TrattaError::connector(
                "tratta-mock",
                format!("forced failure: {capability}"),
            )),
            "ZZT" => {
                // Simulate brief latency; orchestrator may time out depending on config
                // Keep short to avoid slowing tests excessively
                tokio::time::sleep(std::time::Duration::from_millis(200)).await;
                Ok(())
            }
            _ => Ok(()),
        }
    }
}

#[async_trait]
impl TrattaConnector for MockConnector {
    fn name(&self) -> &'static str {
        "tratta-mock"
    }
    fn vendor(&self) -> &'static str {
        "Mock"
    }

    fn as_fare_provider(&self) -> Option<&dyn FareProvider> {
        Some(self as &dyn FareProvider)
    }
    fn as_board_provider(&self) -> Option<&dyn BoardProvider> {
        Some(self as &dyn BoardProvider)
    }
    fn as_airport_info_provider(&self) -> Option<&dyn AirportInfoProvider> {
        Some(self as &dyn AirportInfoProvider)
    }
}

#[async_trait]
impl FareProvider for MockConnector {
    async fn search_fares(&self, req: &FareRequest) -> Result<FareResponse, TrattaError> {
        let origin = req.origin().as_str();
        Self::maybe_fail_or_timeout(origin, "fare-search").await?;
        let route = req.legs()[0].route();
        fixtures::fares::by_route(&route)
            .ok_or_else(|| Self::not_found(&format!("fares for {route}")))
    }

    fn supported_fetch_modes(&self) -> &'static [FetchMode] {
        const ALL: &[FetchMode] = &[FetchMode::Common, FetchMode::Fallback, FetchMode::ForceFallback];
        ALL
    }
}

#[async_trait]
impl BoardProvider for MockConnector {
    async fn board(&self, req: &BoardRequest) -> Result<FlightBoard, TrattaError> {
        Self::maybe_fail_or_timeout(req.airport.as_str(), "board").await?;
        Ok(fixtures::boards::board_for(req))
    }

    fn max_board_window(&self) -> chrono::Duration {
        chrono::Duration::hours(48)
    }
}

#[async_trait]
impl AirportInfoProvider for MockConnector {
    async fn airport(&self, code: &AirportCode) -> Result<Airport, TrattaError> {
        let s = code.as_str();
        Self::maybe_fail_or_timeout(s, "airport-info").await?;
        fixtures::airports::by_code(s).ok_or_else(|| Self::not_found(&format!("airport {s}")))
    }
}
