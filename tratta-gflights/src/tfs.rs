//! Wire encoding of the `tfs` query parameter.
//!
//! Google Flights accepts the search as a base64-encoded protobuf blob in the
//! `tfs` URL parameter. The message layout below matches what the web UI
//! produces; field numbers are part of the wire contract and must not change.

use base64::Engine as _;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use prost::Message;

use tratta_core::{Cabin, FareRequest, TripType};

/// An airport endpoint inside a segment.
#[derive(Clone, PartialEq, prost::Message)]
pub struct AirportRef {
    /// IATA code.
    #[prost(string, tag = "2")]
    pub code: String,
}

/// One itinerary segment of the search.
#[derive(Clone, PartialEq, prost::Message)]
pub struct Segment {
    /// Travel date, `YYYY-MM-DD`.
    #[prost(string, tag = "2")]
    pub date: String,
    /// Maximum stops filter, absent when any number is fine.
    #[prost(int32, optional, tag = "5")]
    pub max_stops: Option<i32>,
    /// Origin airport.
    #[prost(message, optional, tag = "13")]
    pub origin: Option<AirportRef>,
    /// Destination airport.
    #[prost(message, optional, tag = "14")]
    pub destination: Option<AirportRef>,
}

/// Traveler category, one entry per traveller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, prost::Enumeration)]
#[repr(i32)]
pub enum Traveler {
    /// Placeholder, never encoded.
    Unknown = 0,
    /// Adult traveller.
    Adult = 1,
    /// Child traveller.
    Child = 2,
    /// Infant with a seat of their own.
    InfantInSeat = 3,
    /// Infant travelling on an adult's lap.
    InfantOnLap = 4,
}

/// Cabin selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, prost::Enumeration)]
#[repr(i32)]
pub enum Seat {
    /// Placeholder, never encoded.
    Unknown = 0,
    /// Economy.
    Economy = 1,
    /// Premium economy.
    PremiumEconomy = 2,
    /// Business.
    Business = 3,
    /// First.
    First = 4,
}

/// Trip shape selector.
#[derive(Clone, Copy, Debug, PartialEq, Eq, prost::Enumeration)]
#[repr(i32)]
pub enum Trip {
    /// Placeholder, never encoded.
    Unknown = 0,
    /// Outbound plus return.
    RoundTrip = 1,
    /// Single direction.
    OneWay = 2,
}

/// Top-level search message serialized into `tfs`.
#[derive(Clone, PartialEq, prost::Message)]
pub struct SearchInfo {
    /// Itinerary segments, in travel order.
    #[prost(message, repeated, tag = "3")]
    pub segments: Vec<Segment>,
    /// Traveller categories, one entry per traveller.
    #[prost(enumeration = "Traveler", repeated, tag = "8")]
    pub travelers: Vec<i32>,
    /// Cabin.
    #[prost(enumeration = "Seat", tag = "9")]
    pub seat: i32,
    /// Trip shape.
    #[prost(enumeration = "Trip", tag = "19")]
    pub trip: i32,
}

impl SearchInfo {
    /// Build the wire message from a validated request.
    #[must_use]
    pub fn from_request(req: &FareRequest) -> Self {
        let segments = req
            .legs()
            .iter()
            .map(|leg| Segment {
                date: leg.date.format("%Y-%m-%d").to_string(),
                max_stops: None,
                origin: Some(AirportRef {
                    code: leg.origin.as_str().to_string(),
                }),
                destination: Some(AirportRef {
                    code: leg.destination.as_str().to_string(),
                }),
            })
            .collect();

        let pax = req.passengers();
        let mut travelers = Vec::new();
        travelers.extend(std::iter::repeat_n(
            Traveler::Adult as i32,
            usize::from(pax.adult_count()),
        ));
        travelers.extend(std::iter::repeat_n(
            Traveler::Child as i32,
            usize::from(pax.child_count()),
        ));
        travelers.extend(std::iter::repeat_n(
            Traveler::InfantInSeat as i32,
            usize::from(pax.infants_in_seat()),
        ));
        travelers.extend(std::iter::repeat_n(
            Traveler::InfantOnLap as i32,
            usize::from(pax.infants_on_lap()),
        ));

        let seat = match req.cabin() {
            Cabin::PremiumEconomy => Seat::PremiumEconomy,
            Cabin::Business => Seat::Business,
            Cabin::First => Seat::First,
            // `Cabin` is non-exhaustive; unknown cabins encode as economy.
            _ => Seat::Economy,
        };
        let trip = match req.trip() {
            TripType::RoundTrip => Trip::RoundTrip,
            _ => Trip::OneWay,
        };

        Self {
            segments,
            travelers,
            seat: seat as i32,
            trip: trip as i32,
        }
    }
}

/// Encode a request into the `tfs` parameter value.
#[must_use]
pub fn encode_tfs(req: &FareRequest) -> String {
    URL_SAFE_NO_PAD.encode(SearchInfo::from_request(req).encode_to_vec())
}
