//! Quota-aware connector wrapper and implementations.
//!
//! Calls executed under [`CallOrigin::Internal`](tratta_core::CallOrigin) bypass quota
//! accounting so that orchestrator fan-outs do not consume end-user budget.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tratta_core::connector::TrattaConnector;
use tratta_core::{CallContext, CallOrigin, Middleware, TrattaError, ValidationContext};
use tratta_types::{QuotaConfig, QuotaConsumptionStrategy, QuotaState};

/// Wrapper that enforces quotas.
pub struct QuotaAwareConnector {
    inner: Arc<dyn TrattaConnector>,
    _config: QuotaConfig,
    runtime: Mutex<QuotaRuntime>,
}

struct QuotaRuntime {
    // Window tracking
    limit: u64,
    calls_made_in_window: u64,
    last_reset: Instant,
    window: Duration,

    // Even-spread slice tracking
    allowed_per_slice: u64,
    slice_duration: Duration,
    calls_made_in_slice: u64,
    slice_start: Instant,
    strategy: QuotaConsumptionStrategy,
}

/// Number of slices the window is divided into under `EvenSpread`.
const SPREAD_SLICES: u64 = 24;

impl QuotaAwareConnector {
    /// Create a new quota-aware wrapper around an existing connector.
    pub fn new(inner: Arc<dyn TrattaConnector>, config: QuotaConfig) -> Self {
        let window = config.window;
        let limit = config.limit;
        let strategy = config.strategy;
        let (allowed_per_slice, slice_duration) = match strategy {
            QuotaConsumptionStrategy::EvenSpread => {
                let per_slice = std::cmp::max(1, limit / SPREAD_SLICES);
                // Compute slice duration in milliseconds to handle small windows deterministically in tests.
                let window_ms = u128::from(u64::try_from(window.as_millis()).unwrap_or(u64::MAX));
                let raw_slice_ms = std::cmp::max(1u128, window_ms / u128::from(SPREAD_SLICES));
                let slice_ms = u64::try_from(raw_slice_ms).unwrap_or(u64::MAX);
                (per_slice, Duration::from_millis(slice_ms))
            }
            _ => (0, Duration::from_secs(0)),
        };

        Self {
            inner,
            _config: config,
            runtime: Mutex::new(QuotaRuntime {
                limit,
                calls_made_in_window: 0,
                last_reset: Instant::now(),
                window,

                allowed_per_slice,
                slice_duration,
                calls_made_in_slice: 0,
                slice_start: Instant::now(),
                strategy,
            }),
        }
    }

    /// Access the inner connector.
    pub fn inner(&self) -> &Arc<dyn TrattaConnector> {
        &self.inner
    }

    /// Snapshot of the remaining budget in the current window.
    ///
    /// # Panics
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn state(&self) -> QuotaState {
        let rt = self.runtime.lock().expect("mutex poisoned");
        let elapsed = Instant::now().duration_since(rt.last_reset);
        QuotaState {
            limit: rt.limit,
            remaining: rt.limit.saturating_sub(rt.calls_made_in_window),
            reset_in: rt.window.saturating_sub(elapsed),
        }
    }

    /// Check whether a call should be allowed under the configured quota strategy.
    ///
    /// # Errors
    /// Returns `TrattaError::QuotaExceeded` when the per-slice (for
    /// `EvenSpread`) or the overall window budget is exhausted. When the slice
    /// triggers the block but the window still has remaining units,
    /// `remaining` will be greater than zero and `reset_in_ms` reflects the
    /// time until the next slice boundary.
    ///
    /// # Panics
    /// Panics if the internal mutex is poisoned.
    pub fn should_allow_call(&self) -> Result<(), TrattaError> {
        let mut rt = self.runtime.lock().expect("mutex poisoned");
        let now = Instant::now();

        // Reset window if elapsed
        let elapsed = now.duration_since(rt.last_reset);
        if elapsed >= rt.window {
            rt.calls_made_in_window = 0;
            // Advance last_reset by the number of complete windows that have
            // passed so windows stay aligned to regular boundaries even with
            // gaps in usage.
            let windows_passed = elapsed.as_nanos() / rt.window.as_nanos();
            let boundary_offset = Duration::from_nanos(
                (windows_passed * rt.window.as_nanos())
                    .try_into()
                    .unwrap_or(u64::MAX),
            );
            rt.last_reset += boundary_offset;
        }

        if matches!(rt.strategy, QuotaConsumptionStrategy::EvenSpread) {
            let elapsed = now.duration_since(rt.slice_start);
            if elapsed >= rt.slice_duration {
                rt.calls_made_in_slice = 0;
                // Same boundary alignment as the window reset above.
                let slices_passed = elapsed.as_nanos() / rt.slice_duration.as_nanos();
                let boundary_offset = Duration::from_nanos(
                    (slices_passed * rt.slice_duration.as_nanos())
                        .try_into()
                        .unwrap_or(u64::MAX),
                );
                rt.slice_start += boundary_offset;
            }

            // If the slice is exhausted but the window still has room, block temporarily
            if rt.calls_made_in_slice >= rt.allowed_per_slice && rt.calls_made_in_window < rt.limit
            {
                let elapsed_in_slice = now.duration_since(rt.slice_start);
                let reset_in_ms: u64 = rt
                    .slice_duration
                    .saturating_sub(elapsed_in_slice)
                    .as_millis()
                    .try_into()
                    .unwrap_or(u64::MAX);
                let remaining_units = rt.limit.saturating_sub(rt.calls_made_in_window);
                return Err(TrattaError::QuotaExceeded {
                    remaining: remaining_units,
                    reset_in_ms,
                });
            }
        }

        // Allow under overall window
        if rt.calls_made_in_window < rt.limit {
            rt.calls_made_in_window += 1;
            if matches!(rt.strategy, QuotaConsumptionStrategy::EvenSpread) {
                rt.calls_made_in_slice += 1;
            }
            return Ok(());
        }

        // Window exceeded
        let elapsed = now.duration_since(rt.last_reset);
        let remaining_ms = rt
            .window
            .saturating_sub(elapsed)
            .as_millis()
            .try_into()
            .unwrap_or(u64::MAX);
        let remaining_units = rt.limit.saturating_sub(rt.calls_made_in_window);
        let err = TrattaError::QuotaExceeded {
            remaining: remaining_units,
            reset_in_ms: remaining_ms,
        };
        drop(rt);
        Err(err)
    }
}

/// Middleware config for constructing a [`QuotaAwareConnector`].
pub struct QuotaMiddleware {
    /// Quota budget the constructed wrapper will enforce.
    pub config: QuotaConfig,
}

impl QuotaMiddleware {
    /// Wrap a quota budget into a buildable middleware layer.
    #[must_use]
    pub const fn new(config: QuotaConfig) -> Self {
        Self { config }
    }
}

impl Middleware for QuotaMiddleware {
    fn apply(self: Box<Self>, inner: Arc<dyn TrattaConnector>) -> Arc<dyn TrattaConnector> {
        Arc::new(QuotaAwareConnector::new(inner, self.config))
    }

    fn name(&self) -> &'static str {
        "QuotaAwareConnector"
    }

    fn config_json(&self) -> serde_json::Value {
        let strategy = match self.config.strategy {
            QuotaConsumptionStrategy::EvenSpread => "EvenSpread",
            _ => "Unit",
        };
        serde_json::json!({
            "limit": self.config.limit,
            "window_ms": self.config.window.as_millis(),
            "strategy": strategy,
        })
    }

    fn validate(&self, _ctx: &ValidationContext) -> Result<(), TrattaError> {
        // Window alignment divides by the window length.
        if self.config.window.is_zero() {
            return Err(TrattaError::InvalidMiddlewareStack {
                message: "quota window must be longer than zero".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl Middleware for QuotaAwareConnector {
    fn apply(self: Box<Self>, _inner: Arc<dyn TrattaConnector>) -> Arc<dyn TrattaConnector> {
        unreachable!("QuotaAwareConnector is already applied")
    }

    fn name(&self) -> &'static str {
        "QuotaAwareConnector"
    }

    fn config_json(&self) -> serde_json::Value {
        serde_json::json!({})
    }

    async fn pre_call(&self, ctx: &CallContext) -> Result<(), TrattaError> {
        if matches!(ctx.origin(), CallOrigin::Internal) {
            #[cfg(feature = "tracing")]
            tracing::trace!(
                target: "tratta::middleware",
                capability = ?ctx.capability(),
                "internal call bypasses quota accounting"
            );
            return Ok(());
        }
        self.should_allow_call().inspect_err(|_e| {
            #[cfg(feature = "tracing")]
            if let TrattaError::QuotaExceeded {
                remaining,
                reset_in_ms,
            } = _e
            {
                tracing::debug!(
                    target: "tratta::middleware",
                    capability = ?ctx.capability(),
                    remaining,
                    reset_in_ms,
                    "quota budget exhausted"
                );
            }
        })
    }
}

#[async_trait]
impl TrattaConnector for QuotaAwareConnector {
    fn name(&self) -> &'static str {
        TrattaConnector::name(&*self.inner)
    }
    fn vendor(&self) -> &'static str {
        self.inner.vendor()
    }

    tratta_core::tratta_connector_accessors!(inner);
}

tratta_core::tratta_delegate_provider_impls!(QuotaAwareConnector, inner);
