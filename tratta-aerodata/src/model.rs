//! Wire types for the AeroDataBox FIDS and airport endpoints, and their
//! conversions into the shared board/airport models.

use chrono::{DateTime, NaiveDateTime, Utc};
use serde::Deserialize;

use tratta_core::{Airport, AirportCode, FlightBoard, ScheduledFlight, TrattaError};

/// Top-level FIDS payload. Either side may be absent depending on the
/// requested direction.
#[derive(Debug, Deserialize)]
pub(crate) struct BoardPayload {
    #[serde(default)]
    pub departures: Vec<BoardEntry>,
    #[serde(default)]
    pub arrivals: Vec<BoardEntry>,
}

/// One row of the board. The board airport's own side carries only times;
/// the counterpart side carries the other airport.
#[derive(Debug, Deserialize)]
pub(crate) struct BoardEntry {
    #[serde(default)]
    pub departure: Movement,
    #[serde(default)]
    pub arrival: Movement,
    pub number: String,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub airline: Option<AirlineRef>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Movement {
    #[serde(default)]
    pub airport: Option<AirportRef>,
    #[serde(default)]
    pub scheduled_time: Option<ScheduledTime>,
    #[serde(default)]
    pub terminal: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AirportRef {
    #[serde(default)]
    pub iata: Option<String>,
}

/// Scheduled time in both reference frames, e.g.
/// `{"utc": "2025-06-01 07:10Z", "local": "2025-06-01 08:10+01:00"}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ScheduledTime {
    pub utc: String,
    #[serde(default)]
    pub local: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AirlineRef {
    pub name: String,
}

/// Airport metadata payload from the IATA airports endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct AirportPayload {
    pub code: String,
    #[serde(default)]
    pub icao: Option<String>,
    pub name: String,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub time_zone: Option<String>,
}

/// Parses the provider's UTC stamp, `"2025-06-01 07:10Z"`, tolerating the
/// ISO `T` separator it occasionally emits.
fn parse_utc(s: &str) -> Option<DateTime<Utc>> {
    let trimmed = s.trim_end_matches('Z');
    NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M"))
        .ok()
        .map(|naive| naive.and_utc())
}

/// Parses the local stamp by dropping its zone suffix. The offset is not kept
/// because board consumers only display the wall-clock time.
fn parse_local(s: &str) -> Option<NaiveDateTime> {
    let head = s.get(..16)?;
    NaiveDateTime::parse_from_str(head, "%Y-%m-%d %H:%M")
        .or_else(|_| NaiveDateTime::parse_from_str(head, "%Y-%m-%dT%H:%M"))
        .ok()
}

fn parse_code(reference: Option<&AirportRef>) -> Option<AirportCode> {
    reference?.iata.as_deref()?.parse().ok()
}

impl BoardEntry {
    /// Maps one board row into the shared model. `is_departure` says which
    /// endpoint the board airport occupies. Rows missing either scheduled
    /// time are unusable for windowed queries and are dropped upstream.
    fn into_flight(self, board_airport: &AirportCode, is_departure: bool) -> Option<ScheduledFlight> {
        let dep = self.departure.scheduled_time.as_ref()?;
        let arr = self.arrival.scheduled_time.as_ref()?;
        let departure_utc = parse_utc(&dep.utc)?;
        let arrival_utc = parse_utc(&arr.utc)?;
        let departure_local = dep.local.as_deref().and_then(parse_local);
        let arrival_local = arr.local.as_deref().and_then(parse_local);

        let (origin, destination) = if is_departure {
            (
                Some(board_airport.clone()),
                parse_code(self.arrival.airport.as_ref()),
            )
        } else {
            (
                parse_code(self.departure.airport.as_ref()),
                Some(board_airport.clone()),
            )
        };

        let terminal = if is_departure {
            self.departure.terminal
        } else {
            self.arrival.terminal
        };

        Some(ScheduledFlight {
            number: self.number,
            airline: self
                .airline
                .map_or_else(|| "Unknown".to_string(), |a| a.name),
            origin,
            destination,
            departure_utc,
            arrival_utc,
            departure_local,
            arrival_local,
            status: self.status,
            terminal,
        })
    }
}

impl BoardPayload {
    /// Converts the payload into a [`FlightBoard`], dropping rows without a
    /// usable pair of scheduled times and sorting each side.
    pub(crate) fn into_board(self, board_airport: &AirportCode) -> FlightBoard {
        let mut departures: Vec<ScheduledFlight> = self
            .departures
            .into_iter()
            .filter_map(|entry| entry.into_flight(board_airport, true))
            .collect();
        let mut arrivals: Vec<ScheduledFlight> = self
            .arrivals
            .into_iter()
            .filter_map(|entry| entry.into_flight(board_airport, false))
            .collect();
        departures.sort_by(|a, b| (a.departure_utc, &a.number).cmp(&(b.departure_utc, &b.number)));
        arrivals.sort_by(|a, b| (a.arrival_utc, &a.number).cmp(&(b.arrival_utc, &b.number)));
        FlightBoard {
            departures,
            arrivals,
        }
    }
}

impl TryFrom<AirportPayload> for Airport {
    type Error = TrattaError;

    fn try_from(payload: AirportPayload) -> Result<Self, Self::Error> {
        let code: AirportCode = payload
            .code
            .parse()
            .map_err(|e: TrattaError| TrattaError::Data(e.to_string()))?;
        Ok(Airport {
            code,
            icao: payload.icao,
            name: payload.name,
            city: payload.city.unwrap_or_default(),
            country: payload.country.unwrap_or_default(),
            time_zone: payload.time_zone,
        })
    }
}
