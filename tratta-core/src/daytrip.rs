use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};

use tratta_types::{DayTrip, ScheduledFlight};

/// Start of the outbound search window, local to the trip date.
const OUTBOUND_START: NaiveTime = NaiveTime::from_hms_opt(6, 0, 0).unwrap();
/// End of the outbound search window.
const OUTBOUND_END: NaiveTime = NaiveTime::from_hms_opt(18, 0, 0).unwrap();
/// Start of the return search window.
const INBOUND_START: NaiveTime = NaiveTime::from_hms_opt(18, 0, 0).unwrap();
/// End of the return search window, on the following day.
const INBOUND_END: NaiveTime = NaiveTime::from_hms_opt(2, 0, 0).unwrap();

/// The two board windows a day-trip search covers for a given date.
///
/// Outbound flights are searched between 06:00 and 18:00 on the trip date;
/// returns between 18:00 and 02:00 the next day. Both windows are expressed
/// in UTC.
#[must_use]
pub fn day_trip_windows(
    date: NaiveDate,
) -> (
    (DateTime<Utc>, DateTime<Utc>),
    (DateTime<Utc>, DateTime<Utc>),
) {
    let outbound = (
        date.and_time(OUTBOUND_START).and_utc(),
        date.and_time(OUTBOUND_END).and_utc(),
    );
    let inbound = (
        date.and_time(INBOUND_START).and_utc(),
        date.succ_opt()
            .unwrap_or(date)
            .and_time(INBOUND_END)
            .and_utc(),
    );
    (outbound, inbound)
}

/// Pair outbound flights with same-day returns on the reversed route.
///
/// A pair qualifies when the return flies the outbound route in reverse
/// (both endpoints must be published by the provider), departs on the same
/// calendar day the outbound departs, and leaves at least `min_layover`
/// after landing. Pairs are returned sorted by outbound departure, then
/// return departure.
#[must_use]
pub fn pair_day_trips(
    outbound: &[ScheduledFlight],
    inbound: &[ScheduledFlight],
    min_layover: Duration,
) -> Vec<DayTrip> {
    let mut trips = Vec::new();
    for out in outbound {
        let (Some(out_origin), Some(out_dest)) = (&out.origin, &out.destination) else {
            continue;
        };
        for back in inbound {
            let (Some(back_origin), Some(back_dest)) = (&back.origin, &back.destination) else {
                continue;
            };
            if back_origin != out_dest || back_dest != out_origin {
                continue;
            }
            // Same-day is keyed on the outbound departure date, so a red-eye
            // outbound cannot pair with returns on its arrival day.
            if back.departure_utc.date_naive() != out.departure_utc.date_naive() {
                continue;
            }
            if back.departure_utc - out.arrival_utc < min_layover {
                continue;
            }
            trips.push(DayTrip {
                outbound: out.clone(),
                inbound: back.clone(),
            });
        }
    }
    trips.sort_by(|a, b| {
        (a.outbound.departure_utc, a.inbound.departure_utc)
            .cmp(&(b.outbound.departure_utc, b.inbound.departure_utc))
    });
    trips
}
