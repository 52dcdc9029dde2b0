mod common;

use chrono::NaiveDate;
use common::fare_connector;
use tratta::{AirportCode, FareRequest, FlightLeg, Tratta};

/// Run with `--features tracing` and e.g. `RUST_LOG=tratta=debug` to see the
/// router's spans for provider selection and timeouts.
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let tratta = Tratta::builder().with_connector(fare_connector()).build()?;

    let request = FareRequest::builder()
        .leg(FlightLeg::new(
            NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date"),
            "BHX".parse::<AirportCode>()?,
            "CDG".parse::<AirportCode>()?,
        )?)
        .build()?;

    let result = tratta.search_fares(&request).await?;
    println!("{result}");

    Ok(())
}
