use tratta::{BoardDirection, BoardRequest, FlightBoard, Tratta, TrattaError};

use crate::helpers::{MockConnector, code, dt, flight};

fn request() -> BoardRequest {
    BoardRequest::new(
        code("BHX"),
        dt(2025, 6, 1, 6, 0),
        dt(2025, 6, 1, 18, 0),
        BoardDirection::Both,
    )
    .unwrap()
}

fn sample_board() -> FlightBoard {
    FlightBoard {
        departures: vec![flight(
            "FR 1165",
            "BHX",
            "CDG",
            dt(2025, 6, 1, 7, 10),
            dt(2025, 6, 1, 8, 30),
        )],
        arrivals: vec![],
    }
}

#[tokio::test]
async fn board_returns_the_provider_board() {
    let connector = MockConnector::builder()
        .name("boards")
        .returns_board_ok(sample_board())
        .build();

    let tratta = Tratta::builder().with_connector(connector).build().unwrap();

    let board = tratta.board(&request()).await.unwrap();
    assert_eq!(board.departures.len(), 1);
    assert_eq!(board.departures[0].number, "FR 1165");
}

#[tokio::test]
async fn board_falls_back_when_a_provider_fails() {
    let broken = MockConnector::builder()
        .name("broken")
        .with_board_fn(|_req| Err(TrattaError::Other("boom".into())))
        .build();
    let healthy = MockConnector::builder()
        .name("healthy")
        .returns_board_ok(sample_board())
        .build();

    let tratta = Tratta::builder()
        .with_connector(broken)
        .with_connector(healthy)
        .build()
        .unwrap();

    let board = tratta.board(&request()).await.unwrap();
    assert_eq!(board.departures.len(), 1);
}

#[tokio::test]
async fn request_deadline_bounds_the_board_fetch() {
    use std::time::Duration;

    // Provider timeout is generous; the overall request deadline trips first.
    let slow = MockConnector::builder()
        .name("slow")
        .delay(Duration::from_millis(200))
        .returns_board_ok(sample_board())
        .build();

    let tratta = Tratta::builder()
        .with_connector(slow)
        .provider_timeout(Duration::from_secs(5))
        .request_timeout(Duration::from_millis(50))
        .build()
        .unwrap();

    let err = tratta.board(&request()).await.unwrap_err();
    match err {
        TrattaError::RequestTimeout { capability } => assert_eq!(capability, "board"),
        other => panic!("unexpected: {other:?}"),
    }
}

#[tokio::test]
async fn board_not_found_names_the_airport() {
    let empty = MockConnector::builder()
        .name("empty")
        .with_board_fn(|req| Err(TrattaError::not_found(format!("board at {}", req.airport))))
        .build();

    let tratta = Tratta::builder().with_connector(empty).build().unwrap();

    let err = tratta.board(&request()).await.unwrap_err();
    match err {
        TrattaError::NotFound { what } => assert_eq!(what, "board for BHX"),
        other => panic!("unexpected: {other:?}"),
    }
}
