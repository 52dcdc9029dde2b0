use tratta_core::{Capability, FareRequest, FareResponse, TrattaError};

use crate::Tratta;

impl Tratta {
    /// Search fares for an itinerary.
    ///
    /// Behavior and trade-offs:
    /// - Only connectors that natively support the request's `FetchMode` are
    ///   eligible; others are skipped rather than asked to approximate.
    /// - Honors the builder's `FetchStrategy`: `PriorityWithFallback` applies the
    ///   per-provider timeout and aggregates errors; `Latency` races providers and
    ///   returns the first success (lower latency, higher request fanout).
    /// - `NotFound` from every attempted provider maps to a single `NotFound`
    ///   outcome naming the route.
    ///
    /// # Errors
    /// Returns an error if no eligible provider succeeds or none support the capability.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            target = "tratta::router",
            skip(self, req),
            fields(route = %req.legs()[0].route(), mode = ?req.fetch_mode()),
        )
    )]
    pub async fn search_fares(&self, req: &FareRequest) -> Result<FareResponse, TrattaError> {
        let origin = req.origin().clone();
        let route = req.legs()[0].route();
        self.fetch_single(
            Some(&origin),
            Capability::FareSearch,
            format!("fares for {route}"),
            move |c| {
                let mode = req.fetch_mode();
                if !c
                    .as_fare_provider()
                    .is_some_and(|p| p.supported_fetch_modes().contains(&mode))
                {
                    return None;
                }
                let req2 = req.clone();
                Some(async move {
                    if let Some(p) = c.as_fare_provider() {
                        p.search_fares(&req2).await
                    } else {
                        Err(TrattaError::connector(
                            c.name(),
                            "missing fare-search capability during call",
                        ))
                    }
                })
            },
        )
        .await
    }
}
