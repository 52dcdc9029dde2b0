mod common;

use std::time::Duration;

use chrono::NaiveDate;
use common::fare_connector;
use tratta::{
    AirportCode, ConnectorBuilder, FareRequest, FlightLeg, QuotaConfig, QuotaConsumptionStrategy,
    Tratta,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Wrap a connector with a quota-aware middleware.
    let cfg = QuotaConfig {
        limit: 1000,
        window: Duration::from_secs(24 * 60 * 60),
        strategy: QuotaConsumptionStrategy::Unit,
    };
    let wrapped = ConnectorBuilder::new(fare_connector()).with_quota(&cfg).build();

    let tratta = Tratta::builder().with_connector(wrapped).build()?;

    let request = FareRequest::builder()
        .leg(FlightLeg::new(
            NaiveDate::from_ymd_opt(2025, 6, 1).expect("valid date"),
            "BHX".parse::<AirportCode>()?,
            "CDG".parse::<AirportCode>()?,
        )?)
        .build()?;

    let result = tratta.search_fares(&request).await?;
    println!("fetched: {result}");

    Ok(())
}
