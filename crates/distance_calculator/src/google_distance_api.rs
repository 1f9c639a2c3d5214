use serde::Deserialize;
use tracing::{debug, warn};

use crate::{
    coordinate::Coordinate,
    distance_error::DistanceError,
    distance_request::DistanceMatrixRequest,
    distance_result::{DistanceMatrixResult, DistanceResult},
    meters::Meters,
    transport::{TransportRequest, TransportResponse},
};

/// Request level status.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
enum ResponseStatus {
    Ok,
    InvalidRequest,
    MaxElementsExceeded,
    MaxDimensionsExceeded,
    OverDailyLimit,
    OverQueryLimit,
    RequestDenied,
    UnknownError,
    #[serde(other)]
    Unrecognized,
}

/// Per origin/destination pair status.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
enum ElementStatus {
    Ok,
    NotFound,
    ZeroResults,
    MaxRouteLengthExceeded,
    #[serde(other)]
    Unrecognized,
}

#[derive(Deserialize)]
struct DistanceMatrixResponse {
    status: ResponseStatus,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    rows: Vec<Row>,
}

#[derive(Deserialize)]
struct Row {
    elements: Vec<Element>,
}

#[derive(Deserialize)]
struct Element {
    status: ElementStatus,
    distance: Option<TextValue>,
}

#[derive(Deserialize)]
struct TextValue {
    /// Distance in meters
    value: f64,
}

fn join_coordinates(coordinates: &[Coordinate]) -> String {
    coordinates
        .iter()
        .map(|coordinate| coordinate.to_string())
        .collect::<Vec<_>>()
        .join("|")
}

pub fn build_request(
    api_url: &str,
    api_key: &str,
    request: &DistanceMatrixRequest,
) -> TransportRequest {
    TransportRequest {
        url: api_url.to_string(),
        query: vec![
            ("origins".to_string(), join_coordinates(request.origins())),
            (
                "destinations".to_string(),
                join_coordinates(request.destinations()),
            ),
            ("mode".to_string(), request.travel_mode().to_string()),
            ("units".to_string(), "metric".to_string()),
            ("key".to_string(), api_key.to_string()),
        ],
    }
}

pub fn parse_response(
    response: &TransportResponse,
    request: &DistanceMatrixRequest,
) -> Result<DistanceMatrixResult, DistanceError> {
    if !response.is_success() {
        warn!("GoogleDistanceApi: HTTP status {}", response.status);
        return Err(DistanceError::internal(format!(
            "Unexpected HTTP status {}",
            response.status
        )));
    }

    let body: DistanceMatrixResponse = serde_json::from_slice(&response.body)?;

    if body.status != ResponseStatus::Ok {
        warn!(
            "GoogleDistanceApi: request failed with {:?} {}",
            body.status,
            body.error_message.as_deref().unwrap_or_default()
        );
        return Err(DistanceError::internal(match body.error_message {
            Some(message) => format!("API status {:?}: {}", body.status, message),
            None => format!("API status {:?}", body.status),
        }));
    }

    let origins = request.origins().len();
    let destinations = request.destinations().len();

    if body.rows.len() != origins {
        return Err(DistanceError::internal(format!(
            "Expected {} rows, got {}",
            origins,
            body.rows.len()
        )));
    }

    let mut results = Vec::with_capacity(request.element_count());

    for (row_index, row) in body.rows.into_iter().enumerate() {
        if row.elements.len() != destinations {
            return Err(DistanceError::internal(format!(
                "Expected {} elements in row {}, got {}",
                destinations,
                row_index,
                row.elements.len()
            )));
        }

        for element in row.elements {
            results.push(parse_element(element)?);
        }
    }

    debug!(
        "GoogleDistanceApi: parsed {}x{} matrix",
        origins, destinations
    );

    Ok(DistanceMatrixResult::new(destinations, results))
}

fn parse_element(element: Element) -> Result<DistanceResult, DistanceError> {
    match element.status {
        ElementStatus::Ok => match element.distance {
            Some(distance) if distance.value >= 0.0 => {
                Ok(DistanceResult::Distance(Meters::new(distance.value)))
            }
            Some(distance) => Err(DistanceError::internal(format!(
                "Negative distance {}",
                distance.value
            ))),
            None => Err(DistanceError::internal("Element is missing its distance")),
        },
        ElementStatus::NotFound
        | ElementStatus::ZeroResults
        | ElementStatus::MaxRouteLengthExceeded
        | ElementStatus::Unrecognized => Ok(DistanceResult::NotFound),
    }
}
