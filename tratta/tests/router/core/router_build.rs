use tratta::{Capability, PriceLevel, Tratta, TrattaError};

use crate::helpers::m_fares;

#[test]
fn build_requires_at_least_one_connector() {
    let err = Tratta::builder().build().unwrap_err();
    assert!(matches!(err, TrattaError::InvalidArg(_)));
}

#[tokio::test]
async fn unknown_priority_keys_are_dropped() {
    let registered = m_fares("registered", PriceLevel::Low);
    let stranger = m_fares("stranger", PriceLevel::High);

    // "stranger" is listed in the priority but never registered; the list is
    // filtered at build time and routing falls back to registration order.
    let tratta = Tratta::builder()
        .with_connector(registered.clone())
        .prefer_for_capability(Capability::FareSearch, &[stranger, registered])
        .build()
        .unwrap();

    let resp = tratta
        .search_fares(&crate::helpers::fare_request("BHX", "CDG"))
        .await
        .unwrap();
    assert_eq!(resp.current_price, PriceLevel::Low);
}
