//! Tratta-specific data transfer objects and configuration primitives.
#![warn(missing_docs)]

mod airport;
mod board;
mod capability;
mod config;
mod connector;
mod error;
mod fare;
mod middleware;
mod reports;

pub use airport::Airport;
pub use board::{BoardDirection, BoardRequest, DayTrip, FlightBoard, ScheduledFlight};
pub use capability::Capability;
pub use config::{
    CacheConfig, FetchStrategy, QuotaConfig, QuotaConsumptionStrategy, QuotaState, TrattaConfig,
};
pub use connector::ConnectorKey;
pub use error::TrattaError;
pub use fare::{
    AirportCode, Cabin, FareRequest, FareRequestBuilder, FareResponse, FetchMode, FlightLeg,
    FlightOption, Passengers, PriceLevel, TripType,
};
pub use middleware::{MiddlewareLayer, MiddlewareStack};
pub use reports::DayTripReport;
