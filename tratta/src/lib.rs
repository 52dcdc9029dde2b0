//! Tratta orchestrates requests across multiple flight data providers.
//!
//! Overview
//! - Routes requests to connectors that implement the `tratta_core` contracts.
//! - Applies per-airport and per-capability priorities to influence provider order.
//! - Splits oversized board windows per provider and merges the chunked results.
//! - Normalizes error handling and exposes uniform domain types from `tratta_core`.
//!
//! Key behaviors and trade-offs
//! - Fetch strategy:
//!   - `PriorityWithFallback`: deterministic order, per-provider timeout, aggregates
//!     errors; fewer concurrent requests but potentially higher latency.
//!   - `Latency`: races eligible providers; lowest tail latency but higher request fanout.
//! - Fare searches only consider connectors that natively support the request's
//!   `FetchMode`; nothing is approximated on a provider's behalf.
//! - Board requests wider than a provider's window cap are chunked, fetched
//!   concurrently, merged, and deduplicated transparently.
//! - Day-trip searches fan out board fetches under an internal call origin so
//!   quota middleware does not bill them against external budgets.
//!
//! Examples
//! Building an orchestrator with preferences and strategies:
//! ```rust,ignore
//! use std::sync::Arc;
//! use tratta::{Capability, FetchStrategy, Tratta};
//!
//! let gf = Arc::new(tratta_gflights::GfConnector::new_default());
//! let ad = Arc::new(tratta_aerodata::AdConnector::builder().api_key("...").build()?);
//!
//! let tratta = Tratta::builder()
//!     .with_connector(gf.clone())
//!     .with_connector(ad.clone())
//!     // Type-safe, ergonomic API via typed connector keys
//!     .prefer_for_capability(Capability::Board, &[ad, gf])
//!     .fetch_strategy(FetchStrategy::PriorityWithFallback)
//!     .build()?;
//! ```
//!
//! Searching fares and fetching a board:
//! ```rust,ignore
//! use tratta::{AirportCode, BoardDirection, BoardRequest, FareRequest, FlightLeg};
//!
//! let req = FareRequest::builder()
//!     .leg(FlightLeg::new(date, "BHX".parse()?, "CDG".parse()?)?)
//!     .build()?;
//! let fares = tratta.search_fares(&req).await?;
//! println!("prices currently {}", fares.current_price);
//!
//! let board = tratta
//!     .board(&BoardRequest::new("BHX".parse()?, from, to, BoardDirection::Both)?)
//!     .await?;
//! ```
//!
//! Day-trip helper (same-day out-and-back pairing):
//! ```rust,ignore
//! let report = tratta
//!     .day_trips()
//!     .origin("BHX".parse()?)
//!     .destination("CDG".parse()?)
//!     .date(date)
//!     .run()
//!     .await?;
//! for trip in &report.trips {
//!     println!("{} out, {} back", trip.outbound.number, trip.inbound.number);
//! }
//! ```
//!
//! See `tratta/examples/` for runnable end-to-end demonstrations.
#![warn(missing_docs)]

pub(crate) mod core;
mod router;

pub use crate::core::{Tratta, TrattaBuilder};
pub use router::daytrips::DayTripsBuilder;
pub use router::util::{collapse_errors, join_with_deadline};

pub use tratta_middleware::{CacheMiddleware, ConnectorBuilder, QuotaMiddleware};

// Re-export core types for convenience
pub use tratta_core::{
    // Response types & data structures
    Airport,
    // Foundational types
    AirportCode,
    BoardDirection,
    // Request types
    BoardRequest,
    Cabin,
    CacheConfig,
    Capability,
    DayTrip,
    DayTripReport,
    FareRequest,
    FareRequestBuilder,
    FareResponse,
    FetchMode,
    FetchStrategy,
    FlightBoard,
    FlightLeg,
    FlightOption,
    Passengers,
    PriceLevel,
    QuotaConfig,
    QuotaConsumptionStrategy,
    QuotaState,
    ScheduledFlight,
    TrattaError,
    TripType,

    TrattaConnector,
};
