use distance_calculator::{Coordinate, TravelMode};
use jiff::SpanRelativeTo;

pub fn parse_duration(input: &str) -> Result<jiff::SignedDuration, String> {
    if let Ok(duration) = input.parse::<jiff::SignedDuration>() {
        return Ok(duration);
    }

    if let Ok(duration) = input
        .parse::<jiff::Span>()
        .and_then(|span| span.to_duration(SpanRelativeTo::days_are_24_hours()))
    {
        return Ok(duration);
    }

    if let Some(seconds) = input.parse::<i64>().ok().and_then(i64::checked_abs) {
        return Ok(jiff::SignedDuration::from_secs(seconds));
    }

    Err(String::from("Invalid duration"))
}

/// Parses `lat,lng`.
pub fn parse_coordinate(input: &str) -> Result<Coordinate, String> {
    let (lat, lng) = input
        .split_once(',')
        .ok_or_else(|| format!("Expected 'lat,lng', got '{input}'"))?;

    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|_| format!("Invalid latitude '{lat}'"))?;
    let lng: f64 = lng
        .trim()
        .parse()
        .map_err(|_| format!("Invalid longitude '{lng}'"))?;

    let coordinate = Coordinate::new(lat, lng);
    coordinate.validate().map_err(|error| error.to_string())?;

    Ok(coordinate)
}

pub fn parse_travel_mode(input: &str) -> Result<TravelMode, String> {
    input.parse().map_err(|error: distance_calculator::DistanceError| error.to_string())
}
