//! Report envelopes produced by the orchestrator.

use serde::{Deserialize, Serialize};

use crate::board::DayTrip;
use crate::error::TrattaError;

/// Summary of a day-trip search.
///
/// Contains the matched `trips` plus any non-fatal `warnings` collected while
/// fetching the underlying boards (e.g. a provider chunk that timed out).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct DayTripReport {
    /// Outbound/return pairings, outbound-departure order.
    pub trips: Vec<DayTrip>,
    /// Non-fatal issues encountered while building the report.
    pub warnings: Vec<TrattaError>,
}
