use chrono::{DateTime, TimeZone, Utc};
use tratta_core::{BoardDirection, BoardRequest, FlightBoard, ScheduledFlight};

/// Filter the static schedule down to the requested airport, window, and
/// direction. Departures match on departure time, arrivals on arrival time.
pub fn board_for(req: &BoardRequest) -> FlightBoard {
    let airport = req.airport.as_str();
    let mut board = FlightBoard::default();
    for f in schedule() {
        let departs_here = f.origin.as_ref().is_some_and(|o| o.as_str() == airport);
        let arrives_here = f
            .destination
            .as_ref()
            .is_some_and(|d| d.as_str() == airport);
        if departs_here
            && matches!(req.direction, BoardDirection::Departures | BoardDirection::Both)
            && f.departure_utc >= req.from
            && f.departure_utc < req.to
        {
            board.departures.push(f.clone());
        }
        if arrives_here
            && matches!(req.direction, BoardDirection::Arrivals | BoardDirection::Both)
            && f.arrival_utc >= req.from
            && f.arrival_utc < req.to
        {
            board.arrivals.push(f);
        }
    }
    board.departures.sort_by_key(|f| f.departure_utc);
    board.arrivals.sort_by_key(|f| f.arrival_utc);
    board
}

/// All flights the mock knows about, centred on 2025-06-01.
fn schedule() -> Vec<ScheduledFlight> {
    vec![
        f("FR 1165", "Ryanair", "BHX", "CDG", at(1, 7, 10), at(1, 8, 30)),
        f("BA 562", "British Airways", "BHX", "CDG", at(1, 10, 5), at(1, 11, 25)),
        f("AF 1065", "Air France", "BHX", "CDG", at(1, 16, 40), at(1, 18, 0)),
        f("FR 1166", "Ryanair", "CDG", "BHX", at(1, 19, 30), at(1, 20, 50)),
        f("AF 1064", "Air France", "CDG", "BHX", at(1, 21, 5), at(1, 22, 25)),
        f("BA 563", "British Airways", "CDG", "BHX", at(2, 1, 30), at(2, 2, 50)),
        // Unrelated traffic so window filters have something to drop
        f("KL 1424", "KLM", "BHX", "AMS", at(1, 6, 45), at(1, 8, 10)),
        f("KL 1425", "KLM", "AMS", "BHX", at(1, 9, 0), at(1, 10, 25)),
        f("AF 1380", "Air France", "CDG", "AMS", at(1, 12, 15), at(1, 13, 30)),
    ]
}

fn f(
    number: &str,
    airline: &str,
    from: &str,
    to: &str,
    dep: DateTime<Utc>,
    arr: DateTime<Utc>,
) -> ScheduledFlight {
    ScheduledFlight {
        number: number.to_string(),
        airline: airline.to_string(),
        origin: Some(from.parse().unwrap()),
        destination: Some(to.parse().unwrap()),
        departure_utc: dep,
        arrival_utc: arr,
        departure_local: None,
        arrival_local: None,
        status: Some("Expected".to_string()),
        terminal: None,
    }
}

fn at(day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 6, day, hour, minute, 0).unwrap()
}
