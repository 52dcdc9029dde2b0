use std::sync::{Arc, Mutex};

use chrono::Duration;
use tratta::{BoardDirection, BoardRequest, FlightBoard, Tratta};

use crate::helpers::{MockConnector, code, dt, flight};

#[tokio::test]
async fn wide_windows_are_chunked_to_the_provider_cap() {
    let seen: Arc<Mutex<Vec<BoardRequest>>> = Arc::new(Mutex::new(Vec::new()));
    let seen_in_fn = Arc::clone(&seen);

    // A flight at a chunk boundary appears in two responses; the merge dedups it.
    let shared = flight(
        "AF 1065",
        "BHX",
        "CDG",
        dt(2025, 6, 1, 12, 0),
        dt(2025, 6, 1, 13, 20),
    );
    let shared_in_fn = shared.clone();

    let connector = MockConnector::builder()
        .name("capped")
        .board_window(Duration::hours(6))
        .with_board_fn(move |req| {
            seen_in_fn.lock().unwrap().push(req.clone());
            Ok(FlightBoard {
                departures: vec![shared_in_fn.clone()],
                arrivals: vec![],
            })
        })
        .build();

    let tratta = Tratta::builder().with_connector(connector).build().unwrap();

    let req = BoardRequest::new(
        code("BHX"),
        dt(2025, 6, 1, 0, 0),
        dt(2025, 6, 2, 0, 0),
        BoardDirection::Both,
    )
    .unwrap();
    let board = tratta.board(&req).await.unwrap();

    let chunks = seen.lock().unwrap().clone();
    assert_eq!(chunks.len(), 4);
    assert_eq!(chunks[0].from, req.from);
    assert_eq!(chunks[3].to, req.to);
    for pair in chunks.windows(2) {
        assert_eq!(pair[0].to, pair[1].from);
    }
    assert!(chunks.iter().all(|c| c.window() <= Duration::hours(6)));

    // Every chunk returned the same flight; exactly one survives the merge.
    assert_eq!(board.departures.len(), 1);
    assert_eq!(board.departures[0], shared);
}

#[tokio::test]
async fn narrow_windows_reach_the_provider_untouched() {
    let seen: Arc<Mutex<Vec<BoardRequest>>> = Arc::new(Mutex::new(Vec::new()));
    let seen_in_fn = Arc::clone(&seen);

    let connector = MockConnector::builder()
        .name("roomy")
        .board_window(Duration::hours(48))
        .with_board_fn(move |req| {
            seen_in_fn.lock().unwrap().push(req.clone());
            Ok(FlightBoard::default())
        })
        .build();

    let tratta = Tratta::builder().with_connector(connector).build().unwrap();

    let req = BoardRequest::new(
        code("BHX"),
        dt(2025, 6, 1, 6, 0),
        dt(2025, 6, 1, 18, 0),
        BoardDirection::Departures,
    )
    .unwrap();
    tratta.board(&req).await.unwrap();

    let chunks = seen.lock().unwrap().clone();
    assert_eq!(chunks, vec![req]);
}
