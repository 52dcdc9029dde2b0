use tratta_core::{Airport, AirportCode, Capability, TrattaError};

use crate::Tratta;

impl Tratta {
    /// Look up metadata for an airport code.
    ///
    /// Behavior and trade-offs:
    /// - Honors the builder's `FetchStrategy` like the other single-item endpoints.
    /// - Per-airport priorities are keyed by the looked-up code itself, so a
    ///   preferred metadata source can be pinned per airport.
    /// - `NotFound` from every attempted provider maps to `NotFound("airport {code}")`.
    ///
    /// # Errors
    /// Returns an error if no eligible provider succeeds or none support the capability.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(target = "tratta::router", skip(self), fields(code = %code))
    )]
    pub async fn airport(&self, code: &AirportCode) -> Result<Airport, TrattaError> {
        self.fetch_single(
            Some(code),
            Capability::AirportInfo,
            format!("airport {code}"),
            move |c| {
                c.as_airport_info_provider()?;
                let code2 = code.clone();
                Some(async move {
                    if let Some(p) = c.as_airport_info_provider() {
                        p.airport(&code2).await
                    } else {
                        Err(TrattaError::connector(
                            c.name(),
                            "missing airport-info capability during call",
                        ))
                    }
                })
            },
        )
        .await
    }
}
