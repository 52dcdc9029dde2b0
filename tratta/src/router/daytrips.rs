use chrono::NaiveDate;

use tratta_core::{
    AirportCode, BoardDirection, BoardRequest, CallOrigin, DayTripReport, TrattaError,
    day_trip_windows, pair_day_trips,
};

use crate::Tratta;

/// Builder to orchestrate a same-day return search between two airports.
pub struct DayTripsBuilder<'a> {
    pub(crate) tratta: &'a Tratta,
    // Defer validation until run(), to avoid panics on input.
    pub(crate) origin: Option<AirportCode>,
    pub(crate) destination: Option<AirportCode>,
    pub(crate) date: Option<NaiveDate>,
}

impl<'a> DayTripsBuilder<'a> {
    /// Create a new builder bound to a `Tratta` instance.
    #[must_use]
    pub const fn new(tratta: &'a Tratta) -> Self {
        Self {
            tratta,
            origin: None,
            destination: None,
            date: None,
        }
    }

    /// Set the home airport the trip starts and ends at.
    #[must_use]
    pub fn origin(mut self, code: AirportCode) -> Self {
        self.origin = Some(code);
        self
    }

    /// Set the airport to spend the day at.
    #[must_use]
    pub fn destination(mut self, code: AirportCode) -> Self {
        self.destination = Some(code);
        self
    }

    /// Set the trip date. Board windows are derived from it in UTC.
    #[must_use]
    pub const fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    /// Execute the search and aggregate results into a report.
    ///
    /// Behavior and trade-offs:
    /// - Fetches the origin's departure board for the morning window and its
    ///   arrival board for the evening window concurrently, then pairs flights
    ///   whose return flies the reversed route with at least the configured
    ///   minimum layover on the ground.
    /// - Board fetches run under an internal call origin, so quota middleware
    ///   does not bill the fan-out against external budgets.
    /// - A failed board side becomes a warning in the report rather than
    ///   aborting the whole search; its side is treated as empty.
    ///
    /// # Errors
    /// Returns an error if origin, destination, or date is missing, if origin and
    /// destination are equal, or if an overall request-level timeout elapses.
    pub async fn run(self) -> Result<DayTripReport, TrattaError> {
        let origin = self
            .origin
            .ok_or_else(|| TrattaError::invalid_arg("day-trip search requires an origin airport"))?;
        let destination = self.destination.ok_or_else(|| {
            TrattaError::invalid_arg("day-trip search requires a destination airport")
        })?;
        let date = self
            .date
            .ok_or_else(|| TrattaError::invalid_arg("day-trip search requires a date"))?;
        if origin == destination {
            return Err(TrattaError::invalid_arg(
                "origin and destination must differ for a day trip",
            ));
        }

        let ((out_from, out_to), (in_from, in_to)) = day_trip_windows(date);
        let out_req =
            BoardRequest::new(origin.clone(), out_from, out_to, BoardDirection::Departures)?;
        let in_req = BoardRequest::new(origin, in_from, in_to, BoardDirection::Arrivals)?;

        let tratta = self.tratta;
        let boards = CallOrigin::Internal.scope(async {
            tokio::join!(tratta.board(&out_req), tratta.board(&in_req))
        });
        let (out_res, in_res) =
            crate::core::with_request_deadline(tratta.cfg.request_timeout, boards)
                .await
                .map_err(|_| TrattaError::request_timeout("day-trips"))?;

        let mut warnings: Vec<TrattaError> = Vec::new();
        let departures = match out_res {
            Ok(board) => board.departures,
            Err(e) => {
                warnings.push(e);
                Vec::new()
            }
        };
        let arrivals = match in_res {
            Ok(board) => board.arrivals,
            Err(e) => {
                warnings.push(e);
                Vec::new()
            }
        };

        let outbound: Vec<_> = departures
            .into_iter()
            .filter(|f| f.destination.as_ref() == Some(&destination))
            .collect();
        let inbound: Vec<_> = arrivals
            .into_iter()
            .filter(|f| f.origin.as_ref() == Some(&destination))
            .collect();

        Ok(DayTripReport {
            trips: pair_day_trips(&outbound, &inbound, tratta.cfg.min_layover),
            warnings,
        })
    }
}

impl Tratta {
    /// Begin building a day-trip search.
    ///
    /// Typical usage: chain `origin`/`destination`/`date` then call `run()`.
    #[must_use]
    pub const fn day_trips(&'_ self) -> DayTripsBuilder<'_> {
        DayTripsBuilder::new(self)
    }
}
