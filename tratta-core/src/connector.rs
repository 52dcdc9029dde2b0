use async_trait::async_trait;

use crate::TrattaError;
pub use tratta_types::ConnectorKey;
use tratta_types::{
    Airport, AirportCode, BoardRequest, FareRequest, FareResponse, FetchMode, FlightBoard,
};

/// Focused role trait for connectors that can search fares.
#[async_trait]
pub trait FareProvider: Send + Sync {
    /// Run a fare search for the given request.
    async fn search_fares(&self, req: &FareRequest) -> Result<FareResponse, TrattaError>;

    /// REQUIRED: exact fetch modes this connector can natively serve.
    ///
    /// Returns the static slice of supported `FetchMode`s.
    fn supported_fetch_modes(&self) -> &'static [FetchMode];
}

/// Focused role trait for connectors that provide airport departure/arrival boards.
#[async_trait]
pub trait BoardProvider: Send + Sync {
    /// Fetch the board for the given airport and time window.
    async fn board(&self, req: &BoardRequest) -> Result<FlightBoard, TrattaError>;

    /// REQUIRED: the widest time window this connector can serve in one call.
    ///
    /// Requests spanning more than this must be split by the caller.
    fn max_board_window(&self) -> chrono::Duration;
}

/// Focused role trait for connectors that can look up airport metadata.
#[async_trait]
pub trait AirportInfoProvider: Send + Sync {
    /// Fetch metadata for the given airport code.
    async fn airport(&self, code: &AirportCode) -> Result<Airport, TrattaError>;
}

/// Main connector trait implemented by provider crates. Exposes capability discovery.
#[async_trait]
pub trait TrattaConnector: Send + Sync {
    /// A stable identifier for priority lists (e.g., "tratta-gflights", "tratta-aerodata").
    fn name(&self) -> &'static str;

    /// Canonical connector key constructed from the static name.
    ///
    /// Use this helper when configuring routing priorities.
    fn key(&self) -> ConnectorKey {
        ConnectorKey::new(self.name())
    }

    /// Human-friendly vendor string.
    fn vendor(&self) -> &'static str {
        "unknown"
    }

    /// Advertise fare-search capability by returning a usable trait object reference when supported.
    fn as_fare_provider(&self) -> Option<&dyn FareProvider> {
        None
    }

    /// Advertise board capability by returning a usable trait object reference when supported.
    fn as_board_provider(&self) -> Option<&dyn BoardProvider> {
        None
    }

    /// If implemented, returns a trait object for airport metadata lookup.
    fn as_airport_info_provider(&self) -> Option<&dyn AirportInfoProvider> {
        None
    }
}

/// Generate `as_*_provider` accessors for a wrapper that implements
/// `TrattaConnector` by delegating to an inner field.
#[macro_export]
macro_rules! tratta_connector_accessors {
    ($inner:ident) => {
        fn as_fare_provider(&self) -> Option<&dyn $crate::connector::FareProvider> {
            if self.$inner.as_fare_provider().is_some() {
                Some(self as &dyn $crate::connector::FareProvider)
            } else {
                None
            }
        }
        fn as_board_provider(&self) -> Option<&dyn $crate::connector::BoardProvider> {
            if self.$inner.as_board_provider().is_some() {
                Some(self as &dyn $crate::connector::BoardProvider)
            } else {
                None
            }
        }
        fn as_airport_info_provider(
            &self,
        ) -> Option<&dyn $crate::connector::AirportInfoProvider> {
            if self.$inner.as_airport_info_provider().is_some() {
                Some(self as &dyn $crate::connector::AirportInfoProvider)
            } else {
                None
            }
        }
    };
}

/// Generate all provider trait impls for a wrapper type `$self_ty`, delegating
/// to an inner field `$inner` and applying middleware hooks.
#[macro_export]
macro_rules! tratta_delegate_provider_impls {
    ($self_ty:ty, $inner:ident) => {
        #[async_trait::async_trait]
        impl $crate::connector::FareProvider for $self_ty {
            async fn search_fares(
                &self,
                req: &$crate::FareRequest,
            ) -> Result<$crate::FareResponse, $crate::TrattaError> {
                let ctx = $crate::middleware::CallContext::new($crate::Capability::FareSearch);
                <Self as $crate::Middleware>::pre_call(self, &ctx).await?;
                let inner = self
                    .$inner
                    .as_fare_provider()
                    .ok_or_else(|| $crate::TrattaError::unsupported("fare-search"))?;
                inner
                    .search_fares(req)
                    .await
                    .map_err(|e| <Self as $crate::Middleware>::map_error(self, e, &ctx))
            }
            fn supported_fetch_modes(&self) -> &'static [$crate::FetchMode] {
                if let Some(inner) = self.$inner.as_fare_provider() {
                    inner.supported_fetch_modes()
                } else {
                    &[]
                }
            }
        }

        #[async_trait::async_trait]
        impl $crate::connector::BoardProvider for $self_ty {
            async fn board(
                &self,
                req: &$crate::BoardRequest,
            ) -> Result<$crate::FlightBoard, $crate::TrattaError> {
                let ctx = $crate::middleware::CallContext::new($crate::Capability::Board);
                <Self as $crate::Middleware>::pre_call(self, &ctx).await?;
                let inner = self
                    .$inner
                    .as_board_provider()
                    .ok_or_else(|| $crate::TrattaError::unsupported("board"))?;
                inner
                    .board(req)
                    .await
                    .map_err(|e| <Self as $crate::Middleware>::map_error(self, e, &ctx))
            }
            fn max_board_window(&self) -> chrono::Duration {
                if let Some(inner) = self.$inner.as_board_provider() {
                    inner.max_board_window()
                } else {
                    chrono::Duration::zero()
                }
            }
        }

        #[async_trait::async_trait]
        impl $crate::connector::AirportInfoProvider for $self_ty {
            async fn airport(
                &self,
                code: &$crate::AirportCode,
            ) -> Result<$crate::Airport, $crate::TrattaError> {
                let ctx = $crate::middleware::CallContext::new($crate::Capability::AirportInfo);
                <Self as $crate::Middleware>::pre_call(self, &ctx).await?;
                let inner = self
                    .$inner
                    .as_airport_info_provider()
                    .ok_or_else(|| $crate::TrattaError::unsupported("airport-info"))?;
                inner
                    .airport(code)
                    .await
                    .map_err(|e| <Self as $crate::Middleware>::map_error(self, e, &ctx))
            }
        }
    };
}
