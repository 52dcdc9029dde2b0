//! Configuration types shared across the orchestrator and connectors.

use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::capability::Capability;
use crate::connector::ConnectorKey;
use crate::fare::AirportCode;

/// Strategy for selecting among eligible data providers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum FetchStrategy {
    /// Use priority order and fall back to the next provider on failure.
    #[default]
    PriorityWithFallback,
    /// Race all eligible providers concurrently and return the first success.
    Latency,
}

/// Strategy for consuming units from a quota when handling requests.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[non_exhaustive]
pub enum QuotaConsumptionStrategy {
    /// Each request deducts exactly one unit from the quota budget.
    #[default]
    Unit,
    /// Spread the budget evenly across 24 slices of the window, blocking when
    /// the current slice is exhausted even if the window still has room.
    EvenSpread,
}

/// Configuration for a token-like quota budget over a sliding window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuotaConfig {
    /// Maximum number of units that may be consumed within a single window.
    pub limit: u64,
    /// Duration of the accounting window.
    pub window: Duration,
    /// Strategy for how requests consume units from the budget.
    pub strategy: QuotaConsumptionStrategy,
}

impl Default for QuotaConfig {
    fn default() -> Self {
        Self {
            limit: 1000,
            window: Duration::from_secs(60),
            strategy: QuotaConsumptionStrategy::Unit,
        }
    }
}

/// Snapshot of a quota budget at a point in time.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct QuotaState {
    /// Configured maximum units per window.
    pub limit: u64,
    /// Remaining units available in the current window.
    pub remaining: u64,
    /// Time remaining until the current window resets.
    pub reset_in: Duration,
}

/// Configuration for the response cache middleware.
///
/// A TTL of zero disables the store for that capability.
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// TTL applied to capabilities without an explicit override.
    pub default_ttl: Duration,
    /// Capacity applied to capabilities without an explicit override.
    pub default_max_entries: u64,
    /// Per-capability TTL overrides.
    pub per_capability_ttl: HashMap<Capability, Duration>,
    /// Per-capability capacity overrides.
    pub per_capability_max_entries: HashMap<Capability, u64>,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            default_ttl: Duration::from_secs(300),
            default_max_entries: 1024,
            per_capability_ttl: HashMap::new(),
            per_capability_max_entries: HashMap::new(),
        }
    }
}

impl CacheConfig {
    /// Effective TTL for a capability, or `None` when caching is disabled for it.
    #[must_use]
    pub fn ttl_for(&self, cap: Capability) -> Option<Duration> {
        let ttl = self
            .per_capability_ttl
            .get(&cap)
            .copied()
            .unwrap_or(self.default_ttl);
        if ttl.is_zero() { None } else { Some(ttl) }
    }

    /// Effective store capacity for a capability.
    #[must_use]
    pub fn capacity_for(&self, cap: Capability) -> u64 {
        self.per_capability_max_entries
            .get(&cap)
            .copied()
            .unwrap_or(self.default_max_entries)
            .max(1)
    }
}

/// Global configuration for the `Tratta` orchestrator.
#[derive(Debug, Clone)]
pub struct TrattaConfig {
    /// Ordering hints among eligible connectors, per capability.
    pub per_capability_priority: HashMap<Capability, Vec<ConnectorKey>>,
    /// Ordering hints keyed by the request's origin airport; takes precedence
    /// over the per-capability lists.
    pub per_airport_priority: HashMap<AirportCode, Vec<ConnectorKey>>,
    /// Strategy for fetching from multiple providers.
    pub fetch_strategy: FetchStrategy,
    /// Timeout for individual provider requests.
    pub provider_timeout: Duration,
    /// Optional overall deadline for fan-out aggregations (boards, day trips).
    pub request_timeout: Option<Duration>,
    /// Minimum ground time required for a day-trip pairing.
    pub min_layover: chrono::Duration,
}

impl Default for TrattaConfig {
    fn default() -> Self {
        Self {
            per_capability_priority: HashMap::new(),
            per_airport_priority: HashMap::new(),
            fetch_strategy: FetchStrategy::default(),
            provider_timeout: Duration::from_secs(10),
            request_timeout: None,
            min_layover: chrono::Duration::hours(6),
        }
    }
}
