use crate::{coordinate::Coordinate, distance_error::DistanceError, travel_mode::TravelMode};

/// Elements (origins x destinations) accepted by a single matrix request.
pub const MAX_ELEMENTS_PER_REQUEST: usize = 100;

#[derive(Debug, Clone, PartialEq)]
pub struct DistanceRequest {
    pub origin: Coordinate,
    pub destination: Coordinate,
    pub travel_mode: TravelMode,
}

impl DistanceRequest {
    pub fn new(
        origin: Coordinate,
        destination: Coordinate,
        travel_mode: TravelMode,
    ) -> Result<Self, DistanceError> {
        origin.validate()?;
        destination.validate()?;

        Ok(Self {
            origin,
            destination,
            travel_mode,
        })
    }
}

impl From<DistanceRequest> for DistanceMatrixRequest {
    fn from(request: DistanceRequest) -> Self {
        DistanceMatrixRequest {
            origins: vec![request.origin],
            destinations: vec![request.destination],
            travel_mode: request.travel_mode,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DistanceMatrixRequest {
    origins: Vec<Coordinate>,
    destinations: Vec<Coordinate>,
    travel_mode: TravelMode,
}

impl DistanceMatrixRequest {
    pub fn new(
        origins: Vec<Coordinate>,
        destinations: Vec<Coordinate>,
        travel_mode: TravelMode,
    ) -> Result<Self, DistanceError> {
        if origins.is_empty() || destinations.is_empty() {
            return Err(DistanceError::invalid_input(
                "At least one origin and one destination are required",
            ));
        }

        let elements = origins.len() * destinations.len();
        if elements > MAX_ELEMENTS_PER_REQUEST {
            return Err(DistanceError::OverLimit {
                elements,
                limit: MAX_ELEMENTS_PER_REQUEST,
            });
        }

        for coordinate in origins.iter().chain(destinations.iter()) {
            coordinate.validate()?;
        }

        Ok(Self {
            origins,
            destinations,
            travel_mode,
        })
    }

    pub fn origins(&self) -> &[Coordinate] {
        &self.origins
    }

    pub fn destinations(&self) -> &[Coordinate] {
        &self.destinations
    }

    pub fn travel_mode(&self) -> TravelMode {
        self.travel_mode
    }

    pub fn element_count(&self) -> usize {
        self.origins.len() * self.destinations.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coordinates(count: usize) -> Vec<Coordinate> {
        (0..count)
            .map(|i| Coordinate::new(50.0 + i as f64 * 0.01, 4.0))
            .collect()
    }

    #[test]
    fn accepts_exactly_the_limit() {
        let request =
            DistanceMatrixRequest::new(coordinates(10), coordinates(10), TravelMode::Driving)
                .unwrap();
        assert_eq!(request.element_count(), 100);
    }

    #[test]
    fn rejects_over_limit() {
        let result = DistanceMatrixRequest::new(coordinates(5), coordinates(21), TravelMode::Walking);
        assert_eq!(
            result,
            Err(DistanceError::OverLimit {
                elements: 105,
                limit: MAX_ELEMENTS_PER_REQUEST
            })
        );
    }

    #[test]
    fn rejects_empty_sides() {
        assert!(matches!(
            DistanceMatrixRequest::new(vec![], coordinates(3), TravelMode::Walking),
            Err(DistanceError::InvalidInput(_))
        ));
        assert!(matches!(
            DistanceMatrixRequest::new(coordinates(3), vec![], TravelMode::Walking),
            Err(DistanceError::InvalidInput(_))
        ));
    }

    #[test]
    fn rejects_invalid_coordinate() {
        let mut destinations = coordinates(2);
        destinations.push(Coordinate::new(0.0, 500.0));

        assert!(matches!(
            DistanceMatrixRequest::new(coordinates(2), destinations, TravelMode::Walking),
            Err(DistanceError::InvalidInput(_))
        ));
    }

    #[test]
    fn single_request_is_a_one_by_one_matrix() {
        let request = DistanceRequest::new(
            Coordinate::new(1.0, 2.0),
            Coordinate::new(3.0, 4.0),
            TravelMode::Bicycling,
        )
        .unwrap();
        let matrix = DistanceMatrixRequest::from(request);

        assert_eq!(matrix.element_count(), 1);
        assert_eq!(matrix.origins(), &[Coordinate::new(1.0, 2.0)]);
        assert_eq!(matrix.travel_mode(), TravelMode::Bicycling);
    }
}
