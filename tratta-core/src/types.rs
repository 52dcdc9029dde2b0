//! Re-export of foundational types from `tratta-types`.
// Consolidated re-exports so downstream crates can depend on `tratta-core` only

pub use tratta_types::{Capability, TrattaError};

pub use tratta_types::ConnectorKey;
pub use tratta_types::{
    Airport, AirportCode, BoardDirection, BoardRequest, Cabin, DayTrip, DayTripReport,
    FareRequest, FareRequestBuilder, FareResponse, FetchMode, FlightBoard, FlightLeg,
    FlightOption, Passengers, PriceLevel, ScheduledFlight, TripType,
};
pub use tratta_types::{
    CacheConfig, FetchStrategy, QuotaConfig, QuotaConsumptionStrategy, QuotaState, TrattaConfig,
};
pub use tratta_types::{MiddlewareLayer, MiddlewareStack};
