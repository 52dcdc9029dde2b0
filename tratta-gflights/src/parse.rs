//! Extraction of fare results from the rendered results page.
//!
//! The page carries no stable JSON payload, so results are pulled from the
//! markup itself. Extraction anchors on accessibility labels and the handful
//! of class names the results list has kept stable for years; anything that
//! cannot be parsed degrades to `None` rather than failing the whole search.

use std::sync::LazyLock;

use regex::Regex;
use rust_decimal::Decimal;

use tratta_core::{FareResponse, FlightOption, PriceLevel, TrattaError};

static PRICE_LEVEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Prices are currently\s*(?:<[^>]+>\s*)?(low|typical|high)").expect("static regex")
});
static LIST_BLOCK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?s)<ul class="Rk10dc">.*?</ul>"#).expect("static regex"));
static ROW: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?s)<li class="pIav2d".*?</li>"#).expect("static regex"));
static DEPARTURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"aria-label="Departure time: ([^".]+)"#).expect("static regex")
});
static ARRIVAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"aria-label="Arrival time: ([^".]+)"#).expect("static regex"));
static CARRIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"class="sSHqwe tPgKwe ogfYpf"[^>]*>\s*([^<]+?)\s*<"#).expect("static regex")
});
static DURATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Total duration (?:(\d+) hr)?\s*(?:(\d+) min)?").expect("static regex")
});
static STOPS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r">\s*(Nonstop|(\d+) stops?)\s*<").expect("static regex"));
static PRICE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"aria-label="(\d[\d,]*) (US dollars|euros|British pounds)""#)
        .expect("static regex")
});
static DAYS_OFFSET: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"<span class="bOzv6">\+(\d+)</span>"#).expect("static regex"));

/// Qualitative price indicator for the route, `Unknown` when the page does
/// not show the insight banner.
#[must_use]
pub fn parse_price_level(html: &str) -> PriceLevel {
    PRICE_LEVEL
        .captures(html)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(PriceLevel::Unknown)
}

/// All itinerary options on the page, best results first.
///
/// When the page shows separate "best" and "other" lists, options from the
/// first list are flagged `is_best`. A single list is treated as unranked.
#[must_use]
pub fn parse_options(html: &str) -> Vec<FlightOption> {
    let blocks: Vec<&str> = LIST_BLOCK.find_iter(html).map(|m| m.as_str()).collect();
    let ranked = blocks.len() > 1;
    let mut options = Vec::new();
    for (idx, block) in blocks.iter().enumerate() {
        let is_best = ranked && idx == 0;
        for row in ROW.find_iter(block) {
            if let Some(opt) = parse_row(row.as_str(), is_best) {
                options.push(opt);
            }
        }
    }
    options
}

/// Parse the whole page into a response.
///
/// # Errors
/// Returns `NotFound` when the page lists no itinerary options for the route.
pub fn parse_response(html: &str, route: &str) -> Result<FareResponse, TrattaError> {
    let options = parse_options(html);
    if options.is_empty() {
        return Err(TrattaError::not_found(format!("flights for {route}")));
    }
    Ok(FareResponse {
        current_price: parse_price_level(html),
        options,
    })
}

fn parse_row(row: &str, is_best: bool) -> Option<FlightOption> {
    let departure = DEPARTURE.captures(row)?.get(1)?.as_str().trim().to_string();
    let arrival = ARRIVAL.captures(row)?.get(1)?.as_str().trim().to_string();
    let carrier = CARRIER
        .captures(row)
        .and_then(|c| c.get(1))
        .map_or_else(String::new, |m| m.as_str().to_string());

    let duration_minutes = DURATION.captures(row).and_then(|c| {
        let hours: u32 = c.get(1).and_then(|m| m.as_str().parse().ok()).unwrap_or(0);
        let minutes: u32 = c.get(2).and_then(|m| m.as_str().parse().ok()).unwrap_or(0);
        (hours + minutes > 0).then_some(hours * 60 + minutes)
    });

    let stops = STOPS
        .captures(row)
        .map_or(0, |c| match c.get(2) {
            Some(n) => n.as_str().parse().unwrap_or(0),
            None => 0,
        });

    let (price, currency) = PRICE.captures(row).map_or((None, None), |c| {
        let digits = c[1].replace(',', "");
        let price = digits.parse::<u64>().ok().map(Decimal::from);
        let currency = match &c[2] {
            "US dollars" => "USD",
            "euros" => "EUR",
            "British pounds" => "GBP",
            _ => return (price, None),
        };
        (price, Some(currency.to_string()))
    });

    let arrival_days_offset = DAYS_OFFSET
        .captures(row)
        .and_then(|c| c[1].parse().ok());

    Some(FlightOption {
        carrier,
        departure,
        arrival,
        arrival_days_offset,
        duration_minutes,
        stops,
        price,
        currency,
        is_best,
    })
}
