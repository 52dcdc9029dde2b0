//! Fare-search request and response types.

use core::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::TrattaError;

/// Validated uppercase three-letter IATA airport code.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AirportCode(String);

impl AirportCode {
    /// Parse and validate an IATA code. Lowercase input is folded to uppercase.
    ///
    /// # Errors
    /// Returns `InvalidArg` unless the input is exactly three ASCII letters.
    pub fn new(code: &str) -> Result<Self, TrattaError> {
        if code.len() == 3 && code.bytes().all(|b| b.is_ascii_alphabetic()) {
            Ok(Self(code.to_ascii_uppercase()))
        } else {
            Err(TrattaError::invalid_arg(format!(
                "invalid IATA airport code: {code:?}"
            )))
        }
    }

    /// Returns the code as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for AirportCode {
    type Err = TrattaError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for AirportCode {
    type Error = TrattaError;
    fn try_from(s: String) -> Result<Self, Self::Error> {
        Self::new(&s)
    }
}

impl From<AirportCode> for String {
    fn from(c: AirportCode) -> Self {
        c.0
    }
}

impl fmt::Display for AirportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One directional flight segment: a travel date, an origin, and a destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightLeg {
    /// Calendar date of travel.
    pub date: NaiveDate,
    /// Origin airport.
    pub origin: AirportCode,
    /// Destination airport.
    pub destination: AirportCode,
}

impl FlightLeg {
    /// Build a leg, rejecting same-airport routes.
    ///
    /// # Errors
    /// Returns `InvalidArg` when origin equals destination.
    pub fn new(
        date: NaiveDate,
        origin: AirportCode,
        destination: AirportCode,
    ) -> Result<Self, TrattaError> {
        if origin == destination {
            return Err(TrattaError::invalid_arg(format!(
                "leg origin and destination are both {origin}"
            )));
        }
        Ok(Self {
            date,
            origin,
            destination,
        })
    }

    /// Canonical "BHX-CDG" route label used in errors and cache keys.
    #[must_use]
    pub fn route(&self) -> String {
        format!("{}-{}", self.origin, self.destination)
    }
}

/// Trip type of a fare request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum TripType {
    /// Single direction, one or more consecutive legs.
    #[default]
    OneWay,
    /// Outbound plus return on the reversed route.
    RoundTrip,
}

/// Cabin class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum Cabin {
    /// Economy class.
    #[default]
    Economy,
    /// Premium economy class.
    PremiumEconomy,
    /// Business class.
    Business,
    /// First class.
    First,
}

/// Provider-defined retrieval strategy selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
#[non_exhaustive]
pub enum FetchMode {
    /// Direct request to the provider.
    #[default]
    Common,
    /// Direct request first, retrying through the render proxy on failure.
    Fallback,
    /// Always go through the render proxy.
    ForceFallback,
}

/// Passenger composition of a fare request.
///
/// Counts are validated on construction: at least one traveller, one adult per
/// lap infant, and at most nine seats in total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Passengers {
    adults: u8,
    children: u8,
    infants_in_seat: u8,
    infants_on_lap: u8,
}

impl Passengers {
    /// Build a passenger composition.
    ///
    /// # Errors
    /// Returns `InvalidArg` when no traveller is specified, when lap infants
    /// outnumber adults, or when more than nine travellers are requested.
    pub fn new(
        adults: u8,
        children: u8,
        infants_in_seat: u8,
        infants_on_lap: u8,
    ) -> Result<Self, TrattaError> {
        let total =
            u16::from(adults) + u16::from(children) + u16::from(infants_in_seat) + u16::from(infants_on_lap);
        if total == 0 {
            return Err(TrattaError::invalid_arg("at least one passenger is required"));
        }
        if infants_on_lap > adults {
            return Err(TrattaError::invalid_arg(
                "each infant on lap requires an accompanying adult",
            ));
        }
        if total > 9 {
            return Err(TrattaError::invalid_arg(format!(
                "at most 9 passengers are supported, got {total}"
            )));
        }
        Ok(Self {
            adults,
            children,
            infants_in_seat,
            infants_on_lap,
        })
    }

    /// Shortcut: `n` adults, no children or infants.
    ///
    /// # Errors
    /// Returns `InvalidArg` when `n` is zero or greater than nine.
    pub fn adults(n: u8) -> Result<Self, TrattaError> {
        Self::new(n, 0, 0, 0)
    }

    /// Number of adults.
    #[must_use]
    pub const fn adult_count(&self) -> u8 {
        self.adults
    }
    /// Number of children.
    #[must_use]
    pub const fn child_count(&self) -> u8 {
        self.children
    }
    /// Number of infants travelling in their own seat.
    #[must_use]
    pub const fn infants_in_seat(&self) -> u8 {
        self.infants_in_seat
    }
    /// Number of infants travelling on an adult's lap.
    #[must_use]
    pub const fn infants_on_lap(&self) -> u8 {
        self.infants_on_lap
    }
}

impl Default for Passengers {
    fn default() -> Self {
        Self {
            adults: 1,
            children: 0,
            infants_in_seat: 0,
            infants_on_lap: 0,
        }
    }
}

/// A validated fare-search request: legs, trip type, cabin, passengers, and
/// fetch mode. Construct via [`FareRequest::builder`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FareRequest {
    legs: Vec<FlightLeg>,
    trip: TripType,
    cabin: Cabin,
    passengers: Passengers,
    fetch_mode: FetchMode,
}

impl FareRequest {
    /// Start building a request.
    #[must_use]
    pub fn builder() -> FareRequestBuilder {
        FareRequestBuilder::default()
    }

    /// The itinerary legs, in travel order.
    #[must_use]
    pub fn legs(&self) -> &[FlightLeg] {
        &self.legs
    }
    /// Trip type.
    #[must_use]
    pub const fn trip(&self) -> TripType {
        self.trip
    }
    /// Cabin class.
    #[must_use]
    pub const fn cabin(&self) -> Cabin {
        self.cabin
    }
    /// Passenger composition.
    #[must_use]
    pub const fn passengers(&self) -> Passengers {
        self.passengers
    }
    /// Retrieval strategy selector.
    #[must_use]
    pub const fn fetch_mode(&self) -> FetchMode {
        self.fetch_mode
    }

    /// Origin airport of the first leg.
    #[must_use]
    pub fn origin(&self) -> &AirportCode {
        // invariant: builder rejects empty itineraries
        &self.legs[0].origin
    }
}

/// Builder for [`FareRequest`] with itinerary validation on `build`.
#[derive(Debug, Clone, Default)]
pub struct FareRequestBuilder {
    legs: Vec<FlightLeg>,
    trip: TripType,
    cabin: Cabin,
    passengers: Passengers,
    fetch_mode: FetchMode,
}

impl FareRequestBuilder {
    /// Append a leg to the itinerary.
    #[must_use]
    pub fn leg(mut self, leg: FlightLeg) -> Self {
        self.legs.push(leg);
        self
    }

    /// Set the trip type.
    #[must_use]
    pub const fn trip(mut self, trip: TripType) -> Self {
        self.trip = trip;
        self
    }

    /// Set the cabin class.
    #[must_use]
    pub const fn cabin(mut self, cabin: Cabin) -> Self {
        self.cabin = cabin;
        self
    }

    /// Set the passenger composition.
    #[must_use]
    pub const fn passengers(mut self, passengers: Passengers) -> Self {
        self.passengers = passengers;
        self
    }

    /// Set the retrieval strategy selector.
    #[must_use]
    pub const fn fetch_mode(mut self, mode: FetchMode) -> Self {
        self.fetch_mode = mode;
        self
    }

    /// Validate and build the request.
    ///
    /// # Errors
    /// Returns `InvalidArg` when the itinerary is empty, when legs are not in
    /// date order, or when a round trip is not exactly two legs forming a
    /// reversed route.
    pub fn build(self) -> Result<FareRequest, TrattaError> {
        if self.legs.is_empty() {
            return Err(TrattaError::invalid_arg(
                "a fare request needs at least one leg",
            ));
        }
        if self.legs.windows(2).any(|w| w[0].date > w[1].date) {
            return Err(TrattaError::invalid_arg("legs must be in date order"));
        }
        if self.trip == TripType::RoundTrip {
            let [out, back] = self.legs.as_slice() else {
                return Err(TrattaError::invalid_arg(
                    "a round trip is exactly two legs",
                ));
            };
            if out.origin != back.destination || out.destination != back.origin {
                return Err(TrattaError::invalid_arg(
                    "round-trip return must reverse the outbound route",
                ));
            }
        }
        Ok(FareRequest {
            legs: self.legs,
            trip: self.trip,
            cabin: self.cabin,
            passengers: self.passengers,
            fetch_mode: self.fetch_mode,
        })
    }
}

/// Qualitative classification of the quoted price relative to typical prices
/// for the route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum PriceLevel {
    /// Cheaper than usual for the route.
    Low,
    /// In line with typical prices.
    Typical,
    /// More expensive than usual.
    High,
    /// The provider did not classify the price.
    Unknown,
}

impl PriceLevel {
    /// Lowercase label matching the provider's wording.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Typical => "typical",
            Self::High => "high",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for PriceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriceLevel {
    type Err = TrattaError;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "low" => Ok(Self::Low),
            "typical" => Ok(Self::Typical),
            "high" => Ok(Self::High),
            other => Err(TrattaError::Data(format!(
                "unrecognized price level: {other:?}"
            ))),
        }
    }
}

/// A single bookable itinerary option returned by a fare search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlightOption {
    /// Operating carrier display name.
    pub carrier: String,
    /// Departure time as rendered by the provider (local to the origin).
    pub departure: String,
    /// Arrival time as rendered by the provider (local to the destination).
    pub arrival: String,
    /// Days the arrival lies past the departure date, when the provider says so.
    pub arrival_days_offset: Option<i8>,
    /// Total travel time in minutes, when stated.
    pub duration_minutes: Option<u32>,
    /// Number of stops.
    pub stops: u8,
    /// Quoted price, when it could be parsed.
    pub price: Option<Decimal>,
    /// ISO currency code of the quoted price, when stated.
    pub currency: Option<String>,
    /// Whether the provider flagged this option as a "best" result.
    pub is_best: bool,
}

/// The result of a fare search: a qualitative price indicator plus the
/// itinerary options the provider returned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FareResponse {
    /// Qualitative current-price indicator for the route.
    pub current_price: PriceLevel,
    /// Itinerary options, best results first.
    pub options: Vec<FlightOption>,
}

impl fmt::Display for FareResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let best = self.options.iter().filter(|o| o.is_best).count();
        write!(
            f,
            "{} options ({} best), prices currently {}",
            self.options.len(),
            best,
            self.current_price
        )
    }
}
