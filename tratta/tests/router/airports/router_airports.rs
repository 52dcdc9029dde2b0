use tratta::{Tratta, TrattaError};

use crate::helpers::{MockConnector, airport_fixture, code};

#[tokio::test]
async fn lookup_returns_provider_metadata() {
    let connector = MockConnector::builder()
        .name("meta")
        .returns_airport_ok(airport_fixture("CDG", "Charles de Gaulle"))
        .build();

    let tratta = Tratta::builder().with_connector(connector).build().unwrap();

    let airport = tratta.airport(&code("CDG")).await.unwrap();
    assert_eq!(airport.code, code("CDG"));
    assert_eq!(airport.name, "Charles de Gaulle");
}

#[tokio::test]
async fn lookup_not_found_names_the_code() {
    let connector = MockConnector::builder()
        .name("meta")
        .with_airport_fn(|c| Err(TrattaError::not_found(format!("airport {c}"))))
        .build();

    let tratta = Tratta::builder().with_connector(connector).build().unwrap();

    let err = tratta.airport(&code("XXZ")).await.unwrap_err();
    match err {
        TrattaError::NotFound { what } => assert_eq!(what, "airport XXZ"),
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn per_airport_priority_applies_to_lookups() {
    let fallback: std::sync::Arc<dyn tratta::TrattaConnector> = MockConnector::builder()
        .name("fallback")
        .returns_airport_ok(airport_fixture("CDG", "Fallback Name"))
        .build();
    let preferred: std::sync::Arc<dyn tratta::TrattaConnector> = MockConnector::builder()
        .name("preferred")
        .returns_airport_ok(airport_fixture("CDG", "Preferred Name"))
        .build();

    let tratta = Tratta::builder()
        .with_connector(fallback.clone())
        .with_connector(preferred.clone())
        .prefer_for_airport(code("CDG"), &[preferred, fallback])
        .build()
        .unwrap();

    let airport = tratta.airport(&code("CDG")).await.unwrap();
    assert_eq!(airport.name, "Preferred Name");
}
