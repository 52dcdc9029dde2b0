// Re-export helpers so tests can `use helpers::*;`
pub mod mock_connector;

pub use mock_connector::MockConnector;

use std::sync::Arc;

use tratta_core::TrattaConnector;
use tratta_core::{
    Airport, AirportCode, FareRequest, FareResponse, FlightLeg, FlightOption, PriceLevel,
    ScheduledFlight,
};

// ---------- Lightweight fixtures and helpers for tests ----------

/// Common airport code constants used across tests.
pub const BHX: &str = "BHX";
pub const CDG: &str = "CDG";
#[allow(dead_code)]
pub const AMS: &str = "AMS";

/// Construct a UTC `DateTime` from components for readability in tests.
pub fn dt(y: i32, m: u32, d: u32, hh: u32, mm: u32) -> chrono::DateTime<chrono::Utc> {
    use chrono::TimeZone;
    chrono::Utc
        .with_ymd_and_hms(y, m, d, hh, mm, 0)
        .single()
        .expect("valid date components")
}

/// Parse a static IATA code with infallible expectations.
pub fn code(s: &str) -> AirportCode {
    s.parse().expect("valid static test code")
}

/// One-way request with defaults (economy, one adult, common fetch mode).
pub fn fare_request(origin: &str, destination: &str) -> FareRequest {
    FareRequest::builder()
        .leg(
            FlightLeg::new(
                chrono::NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date"),
                code(origin),
                code(destination),
            )
            .expect("valid test leg"),
        )
        .build()
        .expect("valid test request")
}

/// Create a minimal single-option response at the given price level.
pub fn fare_response(level: PriceLevel) -> FareResponse {
    FareResponse {
        current_price: level,
        options: vec![FlightOption {
            carrier: "Test Air".to_string(),
            departure: "7:10 AM".to_string(),
            arrival: "9:45 AM".to_string(),
            arrival_days_offset: None,
            duration_minutes: Some(95),
            stops: 0,
            price: None,
            currency: None,
            is_best: true,
        }],
    }
}

/// Create a scheduled flight with published endpoints (handy in tests).
pub fn flight(
    number: &str,
    from: &str,
    to: &str,
    dep: chrono::DateTime<chrono::Utc>,
    arr: chrono::DateTime<chrono::Utc>,
) -> ScheduledFlight {
    ScheduledFlight {
        number: number.to_string(),
        airline: "Test Air".to_string(),
        origin: Some(code(from)),
        destination: Some(code(to)),
        departure_utc: dep,
        arrival_utc: arr,
        departure_local: None,
        arrival_local: None,
        status: None,
        terminal: None,
    }
}

/// Minimal airport metadata record.
#[allow(dead_code)]
pub fn airport_fixture(iata: &str, name: &str) -> Airport {
    Airport {
        code: code(iata),
        icao: None,
        name: name.to_string(),
        city: name.to_string(),
        country: "Testland".to_string(),
        time_zone: None,
    }
}

/// Convenience constructor for a fares-only mock connector.
pub fn m_fares(name: &'static str, level: PriceLevel) -> Arc<dyn TrattaConnector> {
    MockConnector::builder()
        .name(name)
        .returns_fares_ok(fare_response(level))
        .build()
}

/// Convenience constructor for a failing fares-only mock connector.
#[allow(dead_code)]
pub fn m_fares_err(name: &'static str, err: tratta_core::TrattaError) -> Arc<dyn TrattaConnector> {
    MockConnector::builder()
        .name(name)
        .with_fares_fn(move |_req| Err(err.clone()))
        .build()
}
