use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use tratta::{BoardDirection, BoardRequest, FlightBoard, Tratta, TrattaError};

use crate::helpers::{MockConnector, code, dt, flight};

fn date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
}

#[tokio::test]
async fn pairs_same_day_returns_on_the_reversed_route() {
    let connector = MockConnector::builder()
        .name("boards")
        .with_board_fn(|req| match req.direction {
            BoardDirection::Departures => Ok(FlightBoard {
                departures: vec![
                    flight("FR 1", "BHX", "CDG", dt(2025, 6, 1, 7, 0), dt(2025, 6, 1, 9, 0)),
                    // wrong destination, filtered before pairing
                    flight("KL 9", "BHX", "AMS", dt(2025, 6, 1, 8, 0), dt(2025, 6, 1, 9, 30)),
                ],
                arrivals: vec![],
            }),
            BoardDirection::Arrivals => Ok(FlightBoard {
                departures: vec![],
                arrivals: vec![
                    flight("FR 2", "CDG", "BHX", dt(2025, 6, 1, 19, 0), dt(2025, 6, 1, 21, 0)),
                    flight("KL 10", "AMS", "BHX", dt(2025, 6, 1, 20, 0), dt(2025, 6, 1, 21, 30)),
                ],
            }),
            _ => panic!("unexpected direction"),
        })
        .build();

    let tratta = Tratta::builder().with_connector(connector).build().unwrap();

    let report = tratta
        .day_trips()
        .origin(code("BHX"))
        .destination(code("CDG"))
        .date(date())
        .run()
        .await
        .unwrap();

    assert!(report.warnings.is_empty());
    assert_eq!(report.trips.len(), 1);
    assert_eq!(report.trips[0].outbound.number, "FR 1");
    assert_eq!(report.trips[0].inbound.number, "FR 2");
}

#[tokio::test]
async fn board_windows_cover_morning_out_and_evening_back() {
    let seen: Arc<Mutex<Vec<BoardRequest>>> = Arc::new(Mutex::new(Vec::new()));
    let seen_in_fn = Arc::clone(&seen);

    let connector = MockConnector::builder()
        .name("boards")
        .with_board_fn(move |req| {
            seen_in_fn.lock().unwrap().push(req.clone());
            Ok(FlightBoard::default())
        })
        .build();

    let tratta = Tratta::builder().with_connector(connector).build().unwrap();
    tratta
        .day_trips()
        .origin(code("BHX"))
        .destination(code("CDG"))
        .date(date())
        .run()
        .await
        .unwrap();

    let mut reqs = seen.lock().unwrap().clone();
    reqs.sort_by_key(|r| r.from);
    assert_eq!(reqs.len(), 2);

    assert_eq!(reqs[0].direction, BoardDirection::Departures);
    assert_eq!(reqs[0].from, dt(2025, 6, 1, 6, 0));
    assert_eq!(reqs[0].to, dt(2025, 6, 1, 18, 0));

    assert_eq!(reqs[1].direction, BoardDirection::Arrivals);
    assert_eq!(reqs[1].from, dt(2025, 6, 1, 18, 0));
    assert_eq!(reqs[1].to, dt(2025, 6, 2, 2, 0));
}

#[tokio::test]
async fn a_failed_board_side_becomes_a_warning() {
    let connector = MockConnector::builder()
        .name("boards")
        .with_board_fn(|req| match req.direction {
            BoardDirection::Departures => Ok(FlightBoard {
                departures: vec![flight(
                    "FR 1",
                    "BHX",
                    "CDG",
                    dt(2025, 6, 1, 7, 0),
                    dt(2025, 6, 1, 9, 0),
                )],
                arrivals: vec![],
            }),
            _ => Err(TrattaError::Other("evening feed down".into())),
        })
        .build();

    let tratta = Tratta::builder().with_connector(connector).build().unwrap();

    let report = tratta
        .day_trips()
        .origin(code("BHX"))
        .destination(code("CDG"))
        .date(date())
        .run()
        .await
        .unwrap();

    assert!(report.trips.is_empty());
    assert_eq!(report.warnings.len(), 1);
}

#[tokio::test]
async fn missing_inputs_are_rejected() {
    let connector = MockConnector::builder()
        .name("boards")
        .returns_board_ok(FlightBoard::default())
        .build();
    let tratta = Tratta::builder().with_connector(connector).build().unwrap();

    let err = tratta.day_trips().origin(code("BHX")).run().await.unwrap_err();
    assert!(matches!(err, TrattaError::InvalidArg(_)));

    let err = tratta
        .day_trips()
        .origin(code("BHX"))
        .destination(code("BHX"))
        .date(date())
        .run()
        .await
        .unwrap_err();
    assert!(matches!(err, TrattaError::InvalidArg(_)));
}
