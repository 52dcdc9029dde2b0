use tratta_core::{FareResponse, FlightOption, PriceLevel};

pub fn by_route(route: &str) -> Option<FareResponse> {
    match route {
        "BHX-CDG" => Some(FareResponse {
            current_price: PriceLevel::Low,
            options: vec![
                opt("Air France", "7:10 AM", "9:40 AM", 90, 0, "54.00", true),
                opt("Ryanair", "10:05 AM", "12:35 PM", 90, 0, "38.00", true),
                opt("Lufthansa", "1:20 PM", "6:05 PM", 225, 1, "112.00", false),
            ],
        }),
        "CDG-BHX" => Some(FareResponse {
            current_price: PriceLevel::Typical,
            options: vec![
                opt("Air France", "7:30 PM", "7:55 PM", 85, 0, "89.00", true),
                opt("KLM", "9:05 PM", "11:50 PM", 285, 1, "131.00", false),
            ],
        }),
        "BHX-AMS" => Some(FareResponse {
            current_price: PriceLevel::High,
            options: vec![opt("KLM", "6:45 AM", "9:10 AM", 85, 0, "204.00", true)],
        }),
        _ => None,
    }
}

fn opt(
    carrier: &str,
    dep: &str,
    arr: &str,
    minutes: u32,
    stops: u8,
    price: &str,
    best: bool,
) -> FlightOption {
    FlightOption {
        carrier: carrier.to_string(),
        departure: dep.to_string(),
        arrival: arr.to_string(),
        arrival_days_offset: None,
        duration_minutes: Some(minutes),
        stops,
        price: Some(price.parse().unwrap()),
        currency: Some("EUR".to_string()),
        is_best: best,
    }
}
