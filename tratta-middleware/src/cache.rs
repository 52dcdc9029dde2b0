use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use moka::future::Cache;
use tratta_core::connector::{
    AirportInfoProvider, BoardProvider, FareProvider, TrattaConnector,
};
use tratta_core::{
    Airport, AirportCode, BoardDirection, BoardRequest, Cabin, FareRequest, FareResponse,
    FetchMode, FlightBoard, Passengers, TrattaError, TripType,
};
use tratta_types::{CacheConfig, Capability};

/// Full identity of a fare search for caching discrimination.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct FareKey {
    legs: Vec<(NaiveDate, AirportCode, AirportCode)>,
    trip: TripType,
    cabin: Cabin,
    passengers: Passengers,
    mode: FetchMode,
}

impl From<&FareRequest> for FareKey {
    fn from(req: &FareRequest) -> Self {
        Self {
            legs: req
                .legs()
                .iter()
                .map(|l| (l.date, l.origin.clone(), l.destination.clone()))
                .collect(),
            trip: req.trip(),
            cabin: req.cabin(),
            passengers: req.passengers(),
            mode: req.fetch_mode(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct BoardKey {
    airport: AirportCode,
    from: DateTime<Utc>,
    to: DateTime<Utc>,
    direction: BoardDirection,
}

impl From<&BoardRequest> for BoardKey {
    fn from(req: &BoardRequest) -> Self {
        Self {
            airport: req.airport.clone(),
            from: req.from,
            to: req.to,
            direction: req.direction,
        }
    }
}

/// Declarative wrapper that applies caching when building a connector stack.
pub struct CacheMiddleware {
    cfg: CacheConfig,
}

impl CacheMiddleware {
    /// Wrap a cache configuration into a buildable middleware layer.
    #[must_use]
    pub const fn new(cfg: CacheConfig) -> Self {
        Self { cfg }
    }
}

impl tratta_core::Middleware for CacheMiddleware {
    fn apply(self: Box<Self>, inner: Arc<dyn TrattaConnector>) -> Arc<dyn TrattaConnector> {
        let Self { cfg } = *self;
        Arc::new(CachingConnector::new(inner, &cfg))
    }

    fn name(&self) -> &'static str {
        "CachingMiddleware"
    }

    fn config_json(&self) -> serde_json::Value {
        let per_ttl: serde_json::Map<String, serde_json::Value> = self
            .cfg
            .per_capability_ttl
            .iter()
            .map(|(cap, ttl)| {
                (
                    cap.as_str().to_string(),
                    serde_json::json!(ttl.as_millis()),
                )
            })
            .collect();
        let per_cap: serde_json::Map<String, serde_json::Value> = self
            .cfg
            .per_capability_max_entries
            .iter()
            .map(|(cap, n)| (cap.as_str().to_string(), serde_json::json!(n)))
            .collect();
        serde_json::json!({
            "default_ttl_ms": self.cfg.default_ttl.as_millis(),
            "default_max_entries": self.cfg.default_max_entries,
            "per_capability_ttl_ms": per_ttl,
            "per_capability_max_entries": per_cap,
        })
    }
}

// Per-capability typed stores; `None` means disabled (TTL=0).
struct Stores {
    fares: Option<Cache<FareKey, Arc<FareResponse>>>,
    boards: Option<Cache<BoardKey, Arc<FlightBoard>>>,
    airports: Option<Cache<AirportCode, Arc<Airport>>>,
}

/// Wrapper connector that serves repeated requests from per-capability TTL caches.
pub struct CachingConnector {
    inner: Arc<dyn TrattaConnector>,
    stores: Stores,
}

impl CachingConnector {
    fn maybe_store<K, V>(cfg: &CacheConfig, cap: Capability) -> Option<Cache<K, Arc<V>>>
    where
        K: std::hash::Hash + Eq + Send + Sync + 'static,
        V: Send + Sync + 'static,
    {
        let ttl = cfg.ttl_for(cap)?;
        Some(
            Cache::builder()
                .max_capacity(cfg.capacity_for(cap))
                .time_to_live(ttl)
                .build(),
        )
    }

    /// Wrap a connector with caches sized and aged per `cfg`.
    #[must_use]
    pub fn new(inner: Arc<dyn TrattaConnector>, cfg: &CacheConfig) -> Self {
        let stores = Stores {
            fares: Self::maybe_store(cfg, Capability::FareSearch),
            boards: Self::maybe_store(cfg, Capability::Board),
            airports: Self::maybe_store(cfg, Capability::AirportInfo),
        };
        Self { inner, stores }
    }
}

#[async_trait]
impl tratta_core::Middleware for CachingConnector {
    fn apply(self: Box<Self>, _inner: Arc<dyn TrattaConnector>) -> Arc<dyn TrattaConnector> {
        unreachable!("CachingConnector is already applied")
    }
    fn name(&self) -> &'static str {
        "CachingMiddleware"
    }
    fn config_json(&self) -> serde_json::Value {
        serde_json::json!({})
    }
}

#[async_trait]
impl TrattaConnector for CachingConnector {
    fn name(&self) -> &'static str {
        TrattaConnector::name(&*self.inner)
    }
    fn vendor(&self) -> &'static str {
        self.inner.vendor()
    }

    tratta_core::tratta_connector_accessors!(inner);
}

#[async_trait]
impl FareProvider for CachingConnector {
    async fn search_fares(&self, req: &FareRequest) -> Result<FareResponse, TrattaError> {
        if let Some(store) = &self.stores.fares {
            let key = FareKey::from(req);
            if let Some(v) = store.get(&key).await {
                #[cfg(feature = "tracing")]
                tracing::trace!(target: "tratta::middleware", ?key, "fare cache hit");
                return Ok((*v).clone());
            }
            let inner = self
                .inner
                .as_fare_provider()
                .ok_or_else(|| TrattaError::unsupported("fare-search"))?;
            let value = inner.search_fares(req).await?;
            store.insert(key, Arc::new(value.clone())).await;
            return Ok(value);
        }
        self.inner
            .as_fare_provider()
            .ok_or_else(|| TrattaError::unsupported("fare-search"))?
            .search_fares(req)
            .await
    }

    fn supported_fetch_modes(&self) -> &'static [FetchMode] {
        if let Some(inner) = self.inner.as_fare_provider() {
            inner.supported_fetch_modes()
        } else {
            &[]
        }
    }
}

#[async_trait]
impl BoardProvider for CachingConnector {
    async fn board(&self, req: &BoardRequest) -> Result<FlightBoard, TrattaError> {
        if let Some(store) = &self.stores.boards {
            let key = BoardKey::from(req);
            if let Some(v) = store.get(&key).await {
                return Ok((*v).clone());
            }
            let inner = self
                .inner
                .as_board_provider()
                .ok_or_else(|| TrattaError::unsupported("board"))?;
            let value = inner.board(req).await?;
            store.insert(key, Arc::new(value.clone())).await;
            return Ok(value);
        }
        self.inner
            .as_board_provider()
            .ok_or_else(|| TrattaError::unsupported("board"))?
            .board(req)
            .await
    }

    fn max_board_window(&self) -> chrono::Duration {
        if let Some(inner) = self.inner.as_board_provider() {
            inner.max_board_window()
        } else {
            chrono::Duration::zero()
        }
    }
}

#[async_trait]
impl AirportInfoProvider for CachingConnector {
    async fn airport(&self, code: &AirportCode) -> Result<Airport, TrattaError> {
        if let Some(store) = &self.stores.airports {
            if let Some(v) = store.get(code).await {
                return Ok((*v).clone());
            }
            let inner = self
                .inner
                .as_airport_info_provider()
                .ok_or_else(|| TrattaError::unsupported("airport-info"))?;
            let value = inner.airport(code).await?;
            store.insert(code.clone(), Arc::new(value.clone())).await;
            return Ok(value);
        }
        self.inner
            .as_airport_info_provider()
            .ok_or_else(|| TrattaError::unsupported("airport-info"))?
            .airport(code)
            .await
    }
}
