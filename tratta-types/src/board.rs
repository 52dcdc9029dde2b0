//! Airport board (FIDS) request and response types.

use chrono::{DateTime, Duration, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TrattaError;
use crate::fare::AirportCode;

/// Which side of the board a request is interested in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum BoardDirection {
    /// Departures only.
    Departures,
    /// Arrivals only.
    Arrivals,
    /// Both sides of the board.
    #[default]
    Both,
}

/// A request for the scheduled flights at an airport within a UTC time window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardRequest {
    /// Airport whose board is requested.
    pub airport: AirportCode,
    /// Inclusive window start (UTC).
    pub from: DateTime<Utc>,
    /// Exclusive window end (UTC).
    pub to: DateTime<Utc>,
    /// Board side(s) of interest.
    pub direction: BoardDirection,
}

impl BoardRequest {
    /// Build a board request, validating the window.
    ///
    /// # Errors
    /// Returns `InvalidArg` when the window is empty or reversed.
    pub fn new(
        airport: AirportCode,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
        direction: BoardDirection,
    ) -> Result<Self, TrattaError> {
        if from >= to {
            return Err(TrattaError::invalid_arg(format!(
                "board window must not be empty: {from}..{to}"
            )));
        }
        Ok(Self {
            airport,
            from,
            to,
            direction,
        })
    }

    /// Window length.
    #[must_use]
    pub fn window(&self) -> Duration {
        self.to - self.from
    }
}

/// One scheduled flight as listed on an airport board.
///
/// For departures rows the board airport is the origin; for arrivals it is the
/// destination. The counterpart airport may be absent when the provider does
/// not publish it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduledFlight {
    /// Flight number, e.g. "AF 1165".
    pub number: String,
    /// Operating airline display name.
    pub airline: String,
    /// Origin airport, when known.
    pub origin: Option<AirportCode>,
    /// Destination airport, when known.
    pub destination: Option<AirportCode>,
    /// Scheduled departure (UTC).
    pub departure_utc: DateTime<Utc>,
    /// Scheduled arrival (UTC).
    pub arrival_utc: DateTime<Utc>,
    /// Scheduled departure in origin local time, when published.
    pub departure_local: Option<NaiveDateTime>,
    /// Scheduled arrival in destination local time, when published.
    pub arrival_local: Option<NaiveDateTime>,
    /// Provider status string ("Expected", "Delayed", ...), when published.
    pub status: Option<String>,
    /// Terminal, when published.
    pub terminal: Option<String>,
}

/// The two sides of an airport board for a requested window.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FlightBoard {
    /// Flights departing the board airport, in departure-time order.
    pub departures: Vec<ScheduledFlight>,
    /// Flights arriving at the board airport, in arrival-time order.
    pub arrivals: Vec<ScheduledFlight>,
}

impl FlightBoard {
    /// True when neither side has any flights.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.departures.is_empty() && self.arrivals.is_empty()
    }
}

/// An outbound flight paired with a same-day return on the reversed route.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayTrip {
    /// Morning flight out.
    pub outbound: ScheduledFlight,
    /// Evening flight back.
    pub inbound: ScheduledFlight,
}

impl DayTrip {
    /// Time on the ground at the destination between arrival and the return
    /// departure.
    #[must_use]
    pub fn ground_time(&self) -> Duration {
        self.inbound.departure_utc - self.outbound.arrival_utc
    }
}
