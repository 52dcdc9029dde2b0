use std::sync::Arc;
use tratta_core::TrattaConnector;

/// Connector used by the fare-search examples.
///
/// Set `TRATTA_EXAMPLES_USE_MOCK` to run against deterministic fixtures in CI.
#[must_use]
pub fn fare_connector() -> Arc<dyn TrattaConnector> {
    if std::env::var("TRATTA_EXAMPLES_USE_MOCK").is_ok() {
        println!("--- (Using Mock Connector for CI) ---");
        Arc::new(tratta_mock::MockConnector::new())
    } else {
        // Use the raw connector to disable the rate limiting middleware
        Arc::new(tratta_gflights::GfConnector::new_raw())
    }
}

/// Connector used by the board and day-trip examples.
///
/// Needs `TRATTA_AERODATA_KEY` unless `TRATTA_EXAMPLES_USE_MOCK` is set.
#[must_use]
pub fn board_connector() -> Arc<dyn TrattaConnector> {
    if std::env::var("TRATTA_EXAMPLES_USE_MOCK").is_ok() {
        println!("--- (Using Mock Connector for CI) ---");
        return Arc::new(tratta_mock::MockConnector::new());
    }
    let key = std::env::var("TRATTA_AERODATA_KEY")
        .expect("set TRATTA_AERODATA_KEY or TRATTA_EXAMPLES_USE_MOCK");
    Arc::new(
        tratta_aerodata::AdConnector::builder()
            .api_key(key)
            .build()
            .expect("valid connector configuration"),
    )
}
