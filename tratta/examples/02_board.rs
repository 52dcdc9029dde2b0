mod common;

use chrono::{Duration, TimeZone, Utc};
use common::board_connector;
use tratta::{AirportCode, BoardDirection, BoardRequest, Tratta};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let tratta = Tratta::builder().with_connector(board_connector()).build()?;

    // A 24h window; providers with a smaller cap are chunked transparently.
    let from = Utc.with_ymd_and_hms(2025, 6, 1, 0, 0, 0).unwrap();
    let request = BoardRequest::new(
        "BHX".parse::<AirportCode>()?,
        from,
        from + Duration::hours(24),
        BoardDirection::Both,
    )?;

    let board = tratta.board(&request).await?;
    println!(
        "{} departures, {} arrivals",
        board.departures.len(),
        board.arrivals.len()
    );
    for flight in board.departures.iter().take(10) {
        println!(
            "  {} {} -> {:?} at {}",
            flight.number, flight.airline, flight.destination, flight.departure_utc
        );
    }

    Ok(())
}
