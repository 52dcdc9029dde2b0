use std::sync::Arc;
use std::time::Duration;

use tratta_core::connector::TrattaConnector;
use tratta_middleware::ConnectorBuilder as GenericConnectorBuilder;
use tratta_types::{QuotaConfig, QuotaConsumptionStrategy};

use crate::GfConnector;

/// Builder type alias specialized for fare-search connectors.
pub type GfConnectorBuilder = GenericConnectorBuilder;

impl GfConnector {
    /// Returns an unconfigured builder with the default connector.
    ///
    /// Customize with the builder methods before calling `.build()`.
    #[must_use]
    pub fn new() -> GfConnectorBuilder {
        let raw: Arc<dyn TrattaConnector> = Arc::new(Self::new_default());
        GenericConnectorBuilder::new(raw)
    }

    /// Returns a builder with a conservative rate limit (~1 request every 6 seconds).
    ///
    /// Scraped endpoints throttle aggressively; users can further customize
    /// before calling `.build()`.
    #[must_use]
    pub fn rate_limited() -> GfConnectorBuilder {
        let raw: Arc<dyn TrattaConnector> = Arc::new(Self::new_default());
        let cfg = QuotaConfig {
            // 10 per minute -> ~1 per 6 seconds when evenly spread
            limit: 10,
            window: Duration::from_secs(60),
            strategy: QuotaConsumptionStrategy::EvenSpread,
        };
        GenericConnectorBuilder::new(raw).with_quota(&cfg)
    }

    /// Expert-only: construct an unwrapped connector for manual composition.
    #[must_use]
    pub fn new_raw() -> Self {
        Self::new_default()
    }
}
