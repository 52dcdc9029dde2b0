use tratta::{Capability, PriceLevel, Tratta};

use crate::helpers::{code, fare_request, m_fares};

#[tokio::test]
async fn per_capability_priority_is_applied() {
    let first = m_fares("first", PriceLevel::High);
    let second = m_fares("second", PriceLevel::Low);

    let tratta = Tratta::builder()
        .with_connector(first.clone())
        .with_connector(second.clone())
        .prefer_for_capability(Capability::FareSearch, &[second, first])
        .build()
        .unwrap();

    let resp = tratta.search_fares(&fare_request("BHX", "CDG")).await.unwrap();
    assert_eq!(resp.current_price, PriceLevel::Low);
}

#[tokio::test]
async fn per_airport_priority_overrides_capability_priority() {
    let default_pick = m_fares("default_pick", PriceLevel::High);
    let bhx_pick = m_fares("bhx_pick", PriceLevel::Low);

    let tratta = Tratta::builder()
        .with_connector(default_pick.clone())
        .with_connector(bhx_pick.clone())
        .prefer_for_capability(Capability::FareSearch, &[default_pick.clone(), bhx_pick.clone()])
        .prefer_for_airport(code("BHX"), &[bhx_pick, default_pick])
        .build()
        .unwrap();

    // BHX origin matches the airport override.
    let resp = tratta.search_fares(&fare_request("BHX", "CDG")).await.unwrap();
    assert_eq!(resp.current_price, PriceLevel::Low);

    // Other origins follow the capability priority.
    let resp = tratta.search_fares(&fare_request("AMS", "CDG")).await.unwrap();
    assert_eq!(resp.current_price, PriceLevel::High);
}

#[tokio::test]
async fn registration_order_is_the_default_priority() {
    let first = m_fares("first", PriceLevel::Typical);
    let second = m_fares("second", PriceLevel::Low);

    let tratta = Tratta::builder()
        .with_connector(first)
        .with_connector(second)
        .build()
        .unwrap();

    let resp = tratta.search_fares(&fare_request("BHX", "CDG")).await.unwrap();
    assert_eq!(resp.current_price, PriceLevel::Typical);
}
