//! tratta-core
//!
//! Core traits and utilities shared across the tratta ecosystem.
//!
//! - `types`: common data structures (fare requests, boards, airports).
//! - `connector`: the `TrattaConnector` trait and capability provider traits.
//! - `board`: helpers to split, merge, and deduplicate flight boards.
//! - `daytrip`: day-trip window constants and outbound/return pairing.
//!
//! Async runtime (Tokio)
//! ---------------------
//! This crate assumes the Tokio ecosystem as the async runtime. The
//! middleware contract is explicitly coupled to Tokio facilities:
//! `middleware::CallOrigin` uses `tokio::task_local!` to track call origin
//! across async boundaries, so code that uses middleware must run under a
//! Tokio 1.x runtime.
#![warn(missing_docs)]

/// Helpers to split board windows and merge the resulting boards.
pub mod board;
/// Connector capability traits and the primary `TrattaConnector` interface.
pub mod connector;
/// Day-trip windows and outbound/return pairing.
pub mod daytrip;
/// Middleware trait implemented by connector wrappers.
pub mod middleware;
pub mod types;

pub use board::{dedup_flights, merge_boards, split_window};
pub use connector::TrattaConnector;
pub use daytrip::{day_trip_windows, pair_day_trips};
pub use middleware::{
    CallContext, CallOrigin, Middleware, MiddlewareDescriptor, ValidationContext,
};
pub use types::*;
