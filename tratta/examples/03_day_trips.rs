mod common;

use chrono::NaiveDate;
use common::board_connector;
use tratta::{AirportCode, Tratta};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let tratta = Tratta::builder().with_connector(board_connector()).build()?;

    let report = tratta
        .day_trips()
        .origin("BHX".parse::<AirportCode>()?)
        .destination("CDG".parse::<AirportCode>()?)
        .date(NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date"))
        .run()
        .await?;

    if report.trips.is_empty() {
        println!("no day trips found");
    }
    for trip in &report.trips {
        println!(
            "out {} at {}, back {} at {} ({}h on the ground)",
            trip.outbound.number,
            trip.outbound.departure_utc,
            trip.inbound.number,
            trip.inbound.departure_utc,
            trip.ground_time().num_hours(),
        );
    }
    for warning in &report.warnings {
        eprintln!("warning: {warning}");
    }

    Ok(())
}
