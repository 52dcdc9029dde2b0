mod common;

use chrono::NaiveDate;
use common::fare_connector;
use tratta::{AirportCode, FareRequest, FetchMode, FlightLeg, Passengers, Tratta};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 1. Create connector (mock in CI when TRATTA_EXAMPLES_USE_MOCK is set).
    let connector = fare_connector();

    // 2. Build the Tratta router and register the connector.
    let tratta = Tratta::builder().with_connector(connector).build()?;

    // 3. Define the itinerary: one-way BHX -> CDG, economy, two adults.
    let request = FareRequest::builder()
        .leg(FlightLeg::new(
            NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date"),
            "BHX".parse::<AirportCode>()?,
            "CDG".parse::<AirportCode>()?,
        )?)
        .passengers(Passengers::adults(2)?)
        .fetch_mode(FetchMode::Common)
        .build()?;

    // 4. Search. Tratta handles the routing and fallback.
    let result = tratta.search_fares(&request).await?;

    // 5. Print the result.
    println!("{result}");
    println!("The price is currently {}", result.current_price);

    Ok(())
}
