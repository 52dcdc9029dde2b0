#![cfg(feature = "test-adapters")]

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use chrono::NaiveDate;
use prost::Message;
use tratta_core::{
    AirportCode, FareRequest, FetchMode, FlightLeg, Passengers, PriceLevel,
    connector::FareProvider,
};
use tratta_gflights::{GfConnector, adapter, tfs};

fn results_page() -> String {
    concat!(
        r#"<html><body>"#,
        r#"<span class="gOatQ">Prices are currently <b>low</b></span>"#,
        r#"<ul class="Rk10dc"><li class="pIav2d">"#,
        r#"<span aria-label="Departure time: 7:10 AM."></span>"#,
        r#"<span aria-label="Arrival time: 9:40 AM."></span>"#,
        r#"<div class="sSHqwe tPgKwe ogfYpf">Air France</div>"#,
        r#"<div aria-label="Total duration 1 hr 30 min."></div>"#,
        r#"<span class="EfT7Ae"> Nonstop </span>"#,
        r#"<span aria-label="54 euros"></span>"#,
        r#"</li></ul>"#,
        r#"<ul class="Rk10dc"><li class="pIav2d">"#,
        r#"<span aria-label="Departure time: 1:20 PM."></span>"#,
        r#"<span aria-label="Arrival time: 6:05 PM."></span>"#,
        r#"<div class="sSHqwe tPgKwe ogfYpf">Lufthansa</div>"#,
        r#"<div aria-label="Total duration 3 hr 45 min."></div>"#,
        r#"<span class="EfT7Ae"> 1 stop </span>"#,
        r#"<span aria-label="112 euros"></span>"#,
        r#"</li></ul>"#,
        r#"</body></html>"#,
    )
    .to_string()
}

fn smoke_request() -> FareRequest {
    FareRequest::builder()
        .leg(
            FlightLeg::new(
                NaiveDate::from_ymd_opt(2025, 6, 1).unwrap(),
                "BHX".parse::<AirportCode>().unwrap(),
                "CDG".parse::<AirportCode>().unwrap(),
            )
            .unwrap(),
        )
        .passengers(Passengers::adults(2).unwrap())
        .fetch_mode(FetchMode::Common)
        .build()
        .unwrap()
}

#[tokio::test]
async fn search_uses_injected_adapter() {
    let fetch = <dyn adapter::GfFetch>::from_fn(|url| {
        assert!(url.starts_with(adapter::DEFAULT_BASE_URL));
        assert!(url.contains("tfs="));
        assert!(url.contains("hl=en"));
        Ok(results_page())
    });

    let gf = GfConnector::from_adapter(fetch);
    let resp = gf.search_fares(&smoke_request()).await.unwrap();

    assert_eq!(resp.current_price, PriceLevel::Low);
    assert_eq!(resp.options.len(), 2);
    assert!(resp.options[0].is_best);
    assert_eq!(resp.options[0].carrier, "Air France");
    assert_eq!(resp.to_string(), "2 options (1 best), prices currently low");
}

#[tokio::test]
async fn url_carries_a_decodable_search_message() {
    let fetch = <dyn adapter::GfFetch>::from_fn(|url| {
        let tfs_value = url
            .split("tfs=")
            .nth(1)
            .and_then(|rest| rest.split('&').next())
            .expect("tfs param");
        let bytes = URL_SAFE_NO_PAD.decode(tfs_value).expect("base64");
        let info = tfs::SearchInfo::decode(bytes.as_slice()).expect("protobuf");
        assert_eq!(info.segments[0].date, "2025-06-01");
        assert_eq!(info.segments[0].origin.as_ref().unwrap().code, "BHX");
        assert_eq!(info.travelers.len(), 2);
        Ok(results_page())
    });

    let gf = GfConnector::from_adapter(fetch);
    gf.search_fares(&smoke_request()).await.unwrap();
}

#[tokio::test]
async fn empty_results_map_to_not_found() {
    let fetch =
        <dyn adapter::GfFetch>::from_fn(|_| Ok("<html><body>nothing</body></html>".to_string()));
    let gf = GfConnector::from_adapter(fetch);
    let err = gf.search_fares(&smoke_request()).await.unwrap_err();
    assert!(matches!(err, tratta_core::TrattaError::NotFound { .. }));
}
