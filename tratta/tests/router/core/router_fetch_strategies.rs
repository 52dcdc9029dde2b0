use std::time::Duration;

use tratta::{FetchStrategy, PriceLevel, Tratta, TrattaError};

use crate::helpers::{MockConnector, fare_request, fare_response, m_fares, m_fares_err};

#[tokio::test]
async fn fallback_moves_past_a_failing_provider() {
    let broken = m_fares_err("broken", TrattaError::Other("boom".into()));
    let healthy = m_fares("healthy", PriceLevel::Typical);

    let tratta = Tratta::builder()
        .with_connector(broken)
        .with_connector(healthy)
        .build()
        .unwrap();

    let resp = tratta.search_fares(&fare_request("BHX", "CDG")).await.unwrap();
    assert_eq!(resp.current_price, PriceLevel::Typical);
}

#[tokio::test]
async fn all_failures_aggregate_with_connector_tags() {
    let a = m_fares_err("a", TrattaError::Other("boom".into()));
    let b = m_fares_err("b", TrattaError::Other("bang".into()));

    let tratta = Tratta::builder()
        .with_connector(a)
        .with_connector(b)
        .build()
        .unwrap();

    let err = tratta.search_fares(&fare_request("BHX", "CDG")).await.unwrap_err();
    match err {
        TrattaError::AllProvidersFailed(errors) => {
            assert_eq!(errors.len(), 2);
            assert!(errors
                .iter()
                .all(|e| matches!(e, TrattaError::Connector { .. })));
        }
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn all_not_found_collapses_to_not_found() {
    let a = m_fares_err("a", TrattaError::not_found("fares"));
    let b = m_fares_err("b", TrattaError::not_found("fares"));

    let tratta = Tratta::builder()
        .with_connector(a)
        .with_connector(b)
        .build()
        .unwrap();

    let err = tratta.search_fares(&fare_request("BHX", "CDG")).await.unwrap_err();
    match err {
        TrattaError::NotFound { what } => assert_eq!(what, "fares for BHX-CDG"),
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn unsupported_when_no_provider_has_the_capability() {
    // Board-only connector; fare search has nobody to ask.
    let board_only = MockConnector::builder()
        .name("board_only")
        .returns_board_ok(tratta::FlightBoard::default())
        .build();

    let tratta = Tratta::builder().with_connector(board_only).build().unwrap();

    let err = tratta.search_fares(&fare_request("BHX", "CDG")).await.unwrap_err();
    assert!(matches!(err, TrattaError::Unsupported { .. }));
}

#[tokio::test]
async fn latency_strategy_returns_the_fastest_success() {
    let slow = MockConnector::builder()
        .name("slow")
        .delay(Duration::from_millis(200))
        .returns_fares_ok(fare_response(PriceLevel::High))
        .build();
    let fast = m_fares("fast", PriceLevel::Low);

    let tratta = Tratta::builder()
        .with_connector(slow)
        .with_connector(fast)
        .fetch_strategy(FetchStrategy::Latency)
        .build()
        .unwrap();

    let resp = tratta.search_fares(&fare_request("BHX", "CDG")).await.unwrap();
    assert_eq!(resp.current_price, PriceLevel::Low);
}

#[tokio::test]
async fn latency_strategy_aggregates_when_everyone_fails() {
    let a = m_fares_err("a", TrattaError::Other("boom".into()));
    let b = m_fares_err("b", TrattaError::Other("bang".into()));

    let tratta = Tratta::builder()
        .with_connector(a)
        .with_connector(b)
        .fetch_strategy(FetchStrategy::Latency)
        .build()
        .unwrap();

    let err = tratta.search_fares(&fare_request("BHX", "CDG")).await.unwrap_err();
    assert!(matches!(err, TrattaError::AllProvidersFailed(v) if v.len() == 2));
}
