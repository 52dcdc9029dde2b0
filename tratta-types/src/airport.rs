//! Airport metadata.

use serde::{Deserialize, Serialize};

use crate::fare::AirportCode;

/// Metadata record for an airport, as returned by lookup providers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Airport {
    /// IATA code.
    pub code: AirportCode,
    /// ICAO code, when published.
    pub icao: Option<String>,
    /// Official airport name.
    pub name: String,
    /// City served.
    pub city: String,
    /// Country.
    pub country: String,
    /// IANA time zone identifier, when published.
    pub time_zone: Option<String>,
}
