use std::collections::HashMap;
use std::sync::Arc;

use tratta_core::connector::ConnectorKey;
use tratta_core::types::{AirportCode, Capability, FetchStrategy, TrattaConfig};
use tratta_core::{TrattaConnector, TrattaError};

/// Orchestrator that routes requests across registered providers.
pub struct Tratta {
    pub(crate) connectors: Vec<Arc<dyn TrattaConnector>>,
    pub(crate) cfg: TrattaConfig,
}

impl std::fmt::Debug for Tratta {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tratta")
            .field(
                "connectors",
                &self.connectors.iter().map(|c| c.name()).collect::<Vec<_>>(),
            )
            .field("cfg", &self.cfg)
            .finish()
    }
}

/// Builder for constructing a `Tratta` orchestrator with custom configuration.
pub struct TrattaBuilder {
    connectors: Vec<Arc<dyn TrattaConnector>>,
    cfg: TrattaConfig,
}

impl Default for TrattaBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TrattaBuilder {
    /// Create a new builder with sensible defaults.
    ///
    /// Behavior and trade-offs:
    /// - Starts with no connectors; you must register at least one via [`with_connector`].
    /// - Defaults are conservative: priority-with-fallback fetches, 10s provider
    ///   timeout, no overall request deadline, 6h minimum day-trip layover.
    /// - Use the builder modifiers below to steer provider selection and timeouts
    ///   to fit your use case.
    ///
    /// [`with_connector`]: TrattaBuilder::with_connector
    #[must_use]
    pub fn new() -> Self {
        Self {
            connectors: vec![],
            cfg: TrattaConfig::default(),
        }
    }

    /// Register a provider connector.
    ///
    /// Behavior and trade-offs:
    /// - The order in which you register connectors is used only when no explicit
    ///   priorities are set via `prefer_*` methods.
    /// - Multiple connectors can support the same capability; the orchestrator will
    ///   route based on priorities and the selected fetch strategy.
    /// - Duplicates are not deduplicated; avoid registering the same connector twice.
    #[must_use]
    pub fn with_connector(mut self, c: Arc<dyn TrattaConnector>) -> Self {
        self.connectors.push(c);
        self
    }

    /// Set preferred providers for a capability using connector instances.
    ///
    /// Behavior and trade-offs:
    /// - Influences ordering among eligible providers for the given capability; it
    ///   does not filter out non-listed connectors (they remain after the listed ones).
    /// - Per-airport preferences (see [`prefer_for_airport`]) take precedence over
    ///   capability-level preferences when both are specified.
    /// - Type-safe and ergonomic: eliminates the possibility of typos and makes
    ///   refactoring safer.
    ///
    /// [`prefer_for_airport`]: TrattaBuilder::prefer_for_airport
    #[must_use]
    pub fn prefer_for_capability(
        mut self,
        capability: Capability,
        connectors_desc: &[Arc<dyn TrattaConnector>],
    ) -> Self {
        let keys: Vec<ConnectorKey> = connectors_desc.iter().map(|c| c.key()).collect();
        self.cfg.per_capability_priority.insert(capability, keys);
        self
    }

    /// Set preferred providers for requests originating at an airport.
    ///
    /// Behavior and trade-offs:
    /// - Overrides any capability-level preference when the request's origin
    ///   airport matches.
    /// - The list is an ordering hint; unlisted but capable connectors are still
    ///   considered after the listed ones.
    #[must_use]
    pub fn prefer_for_airport(
        mut self,
        airport: AirportCode,
        connectors_desc: &[Arc<dyn TrattaConnector>],
    ) -> Self {
        let keys: Vec<ConnectorKey> = connectors_desc.iter().map(|c| c.key()).collect();
        self.cfg.per_airport_priority.insert(airport, keys);
        self
    }

    /// Select the fetch strategy for multi-provider requests.
    ///
    /// Behavior and trade-offs:
    /// - `PriorityWithFallback`: deterministic order, applies per-provider timeout,
    ///   aggregates errors; may be slower but predictable and economical on rate limits.
    /// - `Latency`: race all eligible providers and return the first success; fastest
    ///   typical latency but consumes more concurrent requests and can add load.
    #[must_use]
    pub const fn fetch_strategy(mut self, strategy: FetchStrategy) -> Self {
        self.cfg.fetch_strategy = strategy;
        self
    }

    /// Set the per-provider request timeout.
    ///
    /// Behavior and trade-offs:
    /// - Applied in both `PriorityWithFallback` and `Latency` strategies to bound
    ///   each provider call.
    /// - In `Latency` mode, the first success wins while timeouts cap stragglers.
    #[must_use]
    pub const fn provider_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.cfg.provider_timeout = timeout;
        self
    }

    /// Set an overall request timeout for fan-out aggregations (boards, day trips).
    ///
    /// Behavior and trade-offs:
    /// - Bounds total latency even when many providers time out sequentially.
    /// - When exceeded, returns a `RequestTimeout` error for the capability.
    #[must_use]
    pub const fn request_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.cfg.request_timeout = Some(timeout);
        self
    }

    /// Set the minimum ground time required for a day-trip pairing.
    ///
    /// Pairs whose return departs less than this after the outbound lands are
    /// dropped from day-trip reports.
    #[must_use]
    pub const fn min_layover(mut self, layover: chrono::Duration) -> Self {
        self.cfg.min_layover = layover;
        self
    }

    /// Build the `Tratta` orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` if no connectors have been registered via
    /// [`with_connector`](TrattaBuilder::with_connector).
    pub fn build(mut self) -> Result<Tratta, TrattaError> {
        // Validate connector keys against registered connectors; drop unknowns and dedup.
        let known: std::collections::HashSet<&'static str> =
            self.connectors.iter().map(|c| c.name()).collect();

        let filter_keys = |v: &mut Vec<ConnectorKey>| {
            let mut out: Vec<ConnectorKey> = Vec::new();
            let mut seen: std::collections::HashSet<&'static str> =
                std::collections::HashSet::new();
            for k in v.iter().copied() {
                let n = k.as_str();
                if known.contains(n) && seen.insert(n) {
                    out.push(k);
                }
            }
            *v = out;
        };

        for v in self.cfg.per_capability_priority.values_mut() {
            filter_keys(v);
        }
        for v in self.cfg.per_airport_priority.values_mut() {
            filter_keys(v);
        }

        if self.connectors.is_empty() {
            return Err(TrattaError::InvalidArg(
                "no connectors registered; add at least one via with_connector(...)".to_string(),
            ));
        }

        Ok(Tratta {
            connectors: self.connectors,
            cfg: self.cfg,
        })
    }
}

pub fn tag_err(connector: &str, e: TrattaError) -> TrattaError {
    match e {
        e @ (TrattaError::NotFound { .. }
        | TrattaError::ProviderTimeout { .. }
        | TrattaError::Connector { .. }
        | TrattaError::RequestTimeout { .. }
        | TrattaError::AllProvidersTimedOut { .. }
        | TrattaError::AllProvidersFailed(_)) => e,
        other => TrattaError::Connector {
            connector: connector.to_string(),
            msg: other.to_string(),
        },
    }
}

/// Apply an optional overall deadline to a future.
///
/// On timeout, returns `RequestTimeout` with a generic "request" label which
/// call sites can remap to a more specific capability label as needed.
pub(crate) async fn with_request_deadline<T, Fut>(
    deadline: Option<std::time::Duration>,
    fut: Fut,
) -> Result<T, TrattaError>
where
    Fut: core::future::Future<Output = T>,
{
    match deadline {
        Some(d) => (tokio::time::timeout(d, fut).await)
            .map_err(|_| TrattaError::request_timeout("request")),
        None => Ok(fut.await),
    }
}

impl Tratta {
    /// Wrap a provider future with a timeout and standardized timeout error mapping.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "tratta::core::provider_call_with_timeout",
            skip(fut),
            fields(
                connector = connector_name,
                capability = %capability,
                timeout_ms = u64::try_from(timeout.as_millis()).unwrap_or(u64::MAX),
            ),
        )
    )]
    pub(crate) async fn provider_call_with_timeout<T, Fut>(
        connector_name: &'static str,
        capability: Capability,
        timeout: std::time::Duration,
        fut: Fut,
    ) -> Result<T, TrattaError>
    where
        Fut: core::future::Future<Output = Result<T, TrattaError>>,
    {
        (tokio::time::timeout(timeout, fut).await)
            .unwrap_or_else(|_| Err(TrattaError::provider_timeout(connector_name, capability.as_str())))
    }

    /// Start building a new `Tratta` instance.
    ///
    /// Typical usage chains provider registration and preferences, e.g.:
    ///
    /// ```rust,ignore
    /// use std::sync::Arc;
    /// use tratta::{Capability, Tratta};
    ///
    /// let gf = Arc::new(tratta_gflights::GfConnector::new_default());
    /// let ad = Arc::new(tratta_aerodata::AdConnector::builder().api_key("...").build()?);
    ///
    /// let tratta = Tratta::builder()
    ///     .with_connector(gf.clone())
    ///     .with_connector(ad.clone())
    ///     .prefer_for_capability(Capability::Board, &[ad, gf])
    ///     .build()?;
    /// ```
    #[must_use]
    pub fn builder() -> TrattaBuilder {
        TrattaBuilder::new()
    }

    pub(crate) fn ordered(
        &self,
        origin: Option<&AirportCode>,
        capability: Capability,
    ) -> Vec<Arc<dyn TrattaConnector>> {
        let out: Vec<(usize, Arc<dyn TrattaConnector>)> =
            self.connectors.iter().cloned().enumerate().collect();

        let order_with = |pref: &Vec<ConnectorKey>,
                          mut v: Vec<(usize, Arc<dyn TrattaConnector>)>| {
            let pos: HashMap<_, _> = pref
                .iter()
                .enumerate()
                .map(|(i, n)| (n.as_str(), i))
                .collect();
            v.sort_by_key(|(orig_i, c)| {
                (pos.get(c.name()).copied().unwrap_or(usize::MAX), *orig_i)
            });
            v.into_iter().map(|(_, c)| c).collect()
        };

        if let Some(code) = origin
            && let Some(pref) = self.cfg.per_airport_priority.get(code)
        {
            return order_with(pref, out);
        }
        if let Some(pref) = self.cfg.per_capability_priority.get(&capability) {
            return order_with(pref, out);
        }
        out.into_iter().map(|(_, c)| c).collect()
    }

    /// Generic single-item fetch helper shared by the router endpoints.
    ///
    /// - Honors `FetchStrategy::{PriorityWithFallback, Latency}`
    /// - Applies per-provider timeout in both modes
    /// - Aggregates errors and treats `NotFound` specially in fallback mode
    /// - In latency mode, returns the first success; if all attempted providers fail,
    ///   aggregates and returns `AllProvidersFailed`; if no providers support the
    ///   capability, returns a capability error
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "tratta::core::fetch_single",
            skip(self, call),
            fields(capability = %capability, not_found = %not_found_what),
        )
    )]
    pub(crate) async fn fetch_single<T, F, Fut>(
        &self,
        origin: Option<&AirportCode>,
        capability: Capability,
        not_found_what: String,
        call: F,
    ) -> Result<T, TrattaError>
    where
        T: Send,
        F: Fn(Arc<dyn TrattaConnector>) -> Option<Fut> + Clone + Send,
        Fut: core::future::Future<Output = Result<T, TrattaError>> + Send,
    {
        match self.cfg.fetch_strategy {
            FetchStrategy::Latency => {
                self.fetch_single_latency(origin, capability, not_found_what, call)
                    .await
            }
            // `FetchStrategy` is non-exhaustive; fall back applies to any future variant.
            _ => {
                self.fetch_single_priority_with_fallback(origin, capability, not_found_what, call)
                    .await
            }
        }
    }

    async fn fetch_single_priority_with_fallback<T, F, Fut>(
        &self,
        origin: Option<&AirportCode>,
        capability: Capability,
        not_found_what: String,
        call: F,
    ) -> Result<T, TrattaError>
    where
        T: Send,
        F: Fn(Arc<dyn TrattaConnector>) -> Option<Fut> + Clone + Send,
        Fut: core::future::Future<Output = Result<T, TrattaError>> + Send,
    {
        let mut attempted_any = false;
        let mut errors: Vec<TrattaError> = Vec::new();

        for c in self.ordered(origin, capability) {
            if let Some(fut) = call(c.clone()) {
                attempted_any = true;
                match Self::provider_call_with_timeout(
                    c.name(),
                    capability,
                    self.cfg.provider_timeout,
                    fut,
                )
                .await
                {
                    Ok(v) => return Ok(v),
                    Err(e @ (TrattaError::NotFound { .. } | TrattaError::ProviderTimeout { .. })) => {
                        errors.push(e);
                    }
                    Err(e) => {
                        errors.push(tag_err(c.name(), e));
                    }
                }
            }
        }

        Err(crate::router::util::collapse_errors(
            capability,
            attempted_any,
            errors,
            Some(not_found_what),
        ))
    }

    async fn fetch_single_latency<T, F, Fut>(
        &self,
        origin: Option<&AirportCode>,
        capability: Capability,
        not_found_what: String,
        call: F,
    ) -> Result<T, TrattaError>
    where
        T: Send,
        F: Fn(Arc<dyn TrattaConnector>) -> Option<Fut> + Clone + Send,
        Fut: core::future::Future<Output = Result<T, TrattaError>> + Send,
    {
        use futures::stream::{FuturesUnordered, StreamExt};

        let mut futs = FuturesUnordered::new();
        let mut attempted_any = false;
        for c in self.ordered(origin, capability) {
            if let Some(fut) = call(c.clone()) {
                let name = c.name();
                let timeout = self.cfg.provider_timeout;
                futs.push(async move {
                    (
                        name,
                        Self::provider_call_with_timeout(name, capability, timeout, fut).await,
                    )
                });
                attempted_any = true;
            }
        }

        let mut errors: Vec<TrattaError> = Vec::new();
        while let Some((name, res)) = futs.next().await {
            match res {
                Ok(v) => return Ok(v),
                Err(e @ (TrattaError::ProviderTimeout { .. } | TrattaError::NotFound { .. })) => {
                    errors.push(e);
                }
                Err(e) => errors.push(tag_err(name, e)),
            }
        }

        Err(crate::router::util::collapse_errors(
            capability,
            attempted_any,
            errors,
            Some(not_found_what),
        ))
    }
}
