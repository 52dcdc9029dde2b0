use std::time::Duration;

use tratta::{PriceLevel, Tratta, TrattaError};

use crate::helpers::{MockConnector, fare_request, fare_response, m_fares};

#[tokio::test]
async fn provider_timeout_falls_back_to_the_next_provider() {
    let slow = MockConnector::builder()
        .name("slow")
        .delay(Duration::from_millis(200))
        .returns_fares_ok(fare_response(PriceLevel::High))
        .build();
    let fast = m_fares("fast", PriceLevel::Low);

    let tratta = Tratta::builder()
        .with_connector(slow)
        .with_connector(fast)
        .provider_timeout(Duration::from_millis(50))
        .build()
        .unwrap();

    let resp = tratta.search_fares(&fare_request("BHX", "CDG")).await.unwrap();
    assert_eq!(resp.current_price, PriceLevel::Low);
}

#[tokio::test]
async fn all_timeouts_collapse_to_all_providers_timed_out() {
    let slow = MockConnector::builder()
        .name("slow")
        .delay(Duration::from_millis(200))
        .returns_fares_ok(fare_response(PriceLevel::High))
        .build();

    let tratta = Tratta::builder()
        .with_connector(slow)
        .provider_timeout(Duration::from_millis(20))
        .build()
        .unwrap();

    let err = tratta.search_fares(&fare_request("BHX", "CDG")).await.unwrap_err();
    assert!(matches!(err, TrattaError::AllProvidersTimedOut { .. }));
}
