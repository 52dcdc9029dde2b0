use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};

use tratta_types::{BoardRequest, FlightBoard, ScheduledFlight, TrattaError};

/// Split a board request into consecutive chunks of at most `max_window`.
///
/// Chunks tile the original window exactly: the first starts at `from`, the
/// last ends at `to`, and consecutive chunks share a boundary. Providers with
/// a capped lookahead get one request per chunk.
///
/// # Errors
/// Returns `InvalidArg` when `max_window` is zero or negative.
pub fn split_window(
    req: &BoardRequest,
    max_window: Duration,
) -> Result<Vec<BoardRequest>, TrattaError> {
    if max_window <= Duration::zero() {
        return Err(TrattaError::invalid_arg(
            "board chunk window must be positive",
        ));
    }
    let mut chunks = Vec::new();
    let mut start = req.from;
    while start < req.to {
        let end = std::cmp::min(start + max_window, req.to);
        chunks.push(BoardRequest {
            airport: req.airport.clone(),
            from: start,
            to: end,
            direction: req.direction,
        });
        start = end;
    }
    Ok(chunks)
}

/// Merge multiple boards fetched for adjacent (possibly overlapping) windows.
///
/// - Departures are keyed by `(departure_utc, number)`; the first appearance
///   wins for duplicates.
/// - Arrivals are keyed by `(arrival_utc, number)` likewise.
/// - Each side is returned sorted by its key time.
#[must_use]
pub fn merge_boards<I>(boards: I) -> FlightBoard
where
    I: IntoIterator<Item = FlightBoard>,
{
    let mut departures: BTreeMap<(DateTime<Utc>, String), ScheduledFlight> = BTreeMap::new();
    let mut arrivals: BTreeMap<(DateTime<Utc>, String), ScheduledFlight> = BTreeMap::new();
    for board in boards {
        for f in board.departures {
            departures
                .entry((f.departure_utc, f.number.clone()))
                .or_insert(f);
        }
        for f in board.arrivals {
            arrivals.entry((f.arrival_utc, f.number.clone())).or_insert(f);
        }
    }
    FlightBoard {
        departures: departures.into_values().collect(),
        arrivals: arrivals.into_values().collect(),
    }
}

/// Deduplicate a single list of flights by `(departure_utc, number)`,
/// keeping the first occurrence and sorting by departure time.
#[must_use]
pub fn dedup_flights(flights: Vec<ScheduledFlight>) -> Vec<ScheduledFlight> {
    let mut map: BTreeMap<(DateTime<Utc>, String), ScheduledFlight> = BTreeMap::new();
    for f in flights {
        map.entry((f.departure_utc, f.number.clone())).or_insert(f);
    }
    map.into_values().collect()
}
