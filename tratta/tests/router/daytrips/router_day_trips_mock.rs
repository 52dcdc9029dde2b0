use std::sync::Arc;
use std::time::Duration;

use chrono::NaiveDate;
use tratta::{
    ConnectorBuilder, QuotaConfig, QuotaConsumptionStrategy, Tratta, TrattaConnector,
};

use crate::helpers::{code, fare_request};

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

#[tokio::test]
async fn fixture_schedule_yields_the_expected_pairings() {
    let tratta = Tratta::builder()
        .with_connector(Arc::new(tratta_mock::MockConnector::new()))
        .build()
        .unwrap();

    let report = tratta
        .day_trips()
        .origin(code("BHX"))
        .destination(code("CDG"))
        .date(date())
        .run()
        .await
        .unwrap();

    assert!(report.warnings.is_empty());
    // Morning departures FR 1165 and BA 562 each pair with both evening
    // returns; the 16:40 outbound leaves too little ground time and the
    // 01:30 next-day return is not a same-day trip.
    let pairs: Vec<(&str, &str)> = report
        .trips
        .iter()
        .map(|t| (t.outbound.number.as_str(), t.inbound.number.as_str()))
        .collect();
    assert_eq!(
        pairs,
        vec![
            ("FR 1165", "FR 1166"),
            ("FR 1165", "AF 1064"),
            ("BA 562", "FR 1166"),
            ("BA 562", "AF 1064"),
        ]
    );
}

#[tokio::test]
async fn board_fan_out_does_not_consume_external_quota() {
    let raw: Arc<dyn TrattaConnector> = Arc::new(tratta_mock::MockConnector::new());
    let wrapped = ConnectorBuilder::new(raw)
        .with_quota(&QuotaConfig {
            limit: 1,
            window: Duration::from_secs(60),
            strategy: QuotaConsumptionStrategy::Unit,
        })
        .build();

    let tratta = Tratta::builder().with_connector(wrapped).build().unwrap();

    // Two board fetches run under an internal origin and bypass the budget.
    let report = tratta
        .day_trips()
        .origin(code("BHX"))
        .destination(code("CDG"))
        .date(date())
        .run()
        .await
        .unwrap();
    assert!(report.warnings.is_empty());
    assert!(!report.trips.is_empty());

    // The single external unit is still available afterwards.
    tratta.search_fares(&fare_request("BHX", "CDG")).await.unwrap();
}
