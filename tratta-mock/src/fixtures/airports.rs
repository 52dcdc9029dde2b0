use tratta_core::Airport;

pub fn by_code(code: &str) -> Option<Airport> {
    match code {
        "BHX" => Some(airport(
            "BHX",
            "EGBB",
            "Birmingham Airport",
            "Birmingham",
            "United Kingdom",
            "Europe/London",
        )),
        "CDG" => Some(airport(
            "CDG",
            "LFPG",
            "Paris Charles de Gaulle",
            "Paris",
            "France",
            "Europe/Paris",
        )),
        "AMS" => Some(airport(
            "AMS",
            "EHAM",
            "Amsterdam Schiphol",
            "Amsterdam",
            "Netherlands",
            "Europe/Amsterdam",
        )),
        _ => None,
    }
}

fn airport(
    code: &str,
    icao: &str,
    name: &str,
    city: &str,
    country: &str,
    tz: &str,
) -> Airport {
    Airport {
        code: code.parse().unwrap(),
        icao: Some(icao.to_string()),
        name: name.to_string(),
        city: city.to_string(),
        country: country.to_string(),
        time_zone: Some(tz.to_string()),
    }
}
