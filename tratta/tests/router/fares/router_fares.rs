use tratta::{PriceLevel, Tratta};

use crate::helpers::{fare_request, m_fares};

#[tokio::test]
async fn search_returns_the_provider_response() {
    let tratta = Tratta::builder()
        .with_connector(m_fares("only", PriceLevel::Low))
        .build()
        .unwrap();

    let resp = tratta.search_fares(&fare_request("BHX", "CDG")).await.unwrap();
    assert_eq!(resp.current_price, PriceLevel::Low);
    assert_eq!(resp.options.len(), 1);
    assert_eq!(resp.to_string(), "1 options (1 best), prices currently low");
}
