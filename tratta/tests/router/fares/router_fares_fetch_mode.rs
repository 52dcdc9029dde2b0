use chrono::NaiveDate;
use tratta::{FareRequest, FetchMode, FlightLeg, PriceLevel, Tratta, TrattaError};

use crate::helpers::{MockConnector, code, fare_response};

fn request(mode: FetchMode) -> FareRequest {
    FareRequest::builder()
        .leg(
            FlightLeg::new(
                NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
                code("BHX"),
                code("CDG"),
            )
            .unwrap(),
        )
        .fetch_mode(mode)
        .build()
        .unwrap()
}

#[tokio::test]
async fn providers_without_the_mode_are_skipped() {
    // "common_only" would be picked first but cannot serve ForceFallback.
    let common_only = MockConnector::builder()
        .name("common_only")
        .fetch_modes(&[FetchMode::Common])
        .returns_fares_ok(fare_response(PriceLevel::High))
        .build();
    let full = MockConnector::builder()
        .name("full")
        .returns_fares_ok(fare_response(PriceLevel::Low))
        .build();

    let tratta = Tratta::builder()
        .with_connector(common_only)
        .with_connector(full)
        .build()
        .unwrap();

    let resp = tratta
        .search_fares(&request(FetchMode::ForceFallback))
        .await
        .unwrap();
    assert_eq!(resp.current_price, PriceLevel::Low);
}

#[tokio::test]
async fn unsupported_when_nobody_serves_the_mode() {
    let common_only = MockConnector::builder()
        .name("common_only")
        .fetch_modes(&[FetchMode::Common])
        .returns_fares_ok(fare_response(PriceLevel::High))
        .build();

    let tratta = Tratta::builder().with_connector(common_only).build().unwrap();

    let err = tratta
        .search_fares(&request(FetchMode::ForceFallback))
        .await
        .unwrap_err();
    assert!(matches!(err, TrattaError::Unsupported { .. }));
}
