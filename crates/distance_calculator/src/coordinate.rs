use std::fmt::Display;

use geo::{Distance, Haversine};
use serde::{Deserialize, Serialize};

use crate::{distance_error::DistanceError, meters::Meters};

/// A geographic coordinate in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.lat) && (-180.0..=180.0).contains(&self.lng)
    }

    pub fn validate(&self) -> Result<(), DistanceError> {
        if self.is_valid() {
            Ok(())
        } else {
            Err(DistanceError::invalid_input(format!(
                "Coordinate ({}, {}) is out of range",
                self.lat, self.lng
            )))
        }
    }

    /// Great-circle distance on a spherical earth (mean radius).
    pub fn haversine_distance(&self, to: &Coordinate) -> Meters {
        let haversine = Haversine;
        Meters::new(haversine.distance(geo::Point::from(self), geo::Point::from(to)))
    }
}

impl Display for Coordinate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.lat, self.lng)
    }
}

impl From<&Coordinate> for geo::Point<f64> {
    fn from(coordinate: &Coordinate) -> Self {
        geo::Point::new(coordinate.lng, coordinate.lat)
    }
}

impl From<geo::Point<f64>> for Coordinate {
    fn from(point: geo::Point<f64>) -> Self {
        Coordinate::new(point.y(), point.x())
    }
}

pub fn geometry_distance(
    origin: &Coordinate,
    destination: &Coordinate,
) -> Result<Meters, DistanceError> {
    origin.validate()?;
    destination.validate()?;

    Ok(origin.haversine_distance(destination))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_be_zero_for_same_coordinate() {
        let paris = Coordinate::new(48.8566, 2.3522);
        assert_eq!(geometry_distance(&paris, &paris).unwrap(), Meters::ZERO);
    }

    #[test]
    fn should_be_symmetric() {
        let brussels = Coordinate::new(50.8503, 4.3517);
        let paris = Coordinate::new(48.8566, 2.3522);

        assert_eq!(
            geometry_distance(&brussels, &paris).unwrap(),
            geometry_distance(&paris, &brussels).unwrap()
        );
    }

    #[test]
    fn one_degree_of_latitude_at_the_equator() {
        let distance =
            geometry_distance(&Coordinate::new(0.0, 0.0), &Coordinate::new(1.0, 0.0)).unwrap();

        assert!((distance.value() - 111_195.0).abs() < 10.0, "{distance}");
    }

    #[test]
    fn brussels_to_paris() {
        let brussels = Coordinate::new(50.8503, 4.3517);
        let paris = Coordinate::new(48.8566, 2.3522);

        let distance = geometry_distance(&brussels, &paris).unwrap();
        assert!((distance.value() - 264_000.0).abs() < 2_000.0, "{distance}");
    }

    #[test]
    fn should_reject_out_of_range_coordinates() {
        let valid = Coordinate::new(0.0, 0.0);

        for invalid in [
            Coordinate::new(90.5, 0.0),
            Coordinate::new(-91.0, 0.0),
            Coordinate::new(0.0, 180.1),
            Coordinate::new(0.0, -200.0),
            Coordinate::new(f64::NAN, 0.0),
        ] {
            assert!(matches!(
                geometry_distance(&valid, &invalid),
                Err(DistanceError::InvalidInput(_))
            ));
            assert!(matches!(
                geometry_distance(&invalid, &valid),
                Err(DistanceError::InvalidInput(_))
            ));
        }
    }

    #[test]
    fn should_accept_boundaries() {
        assert!(Coordinate::new(90.0, 180.0).is_valid());
        assert!(Coordinate::new(-90.0, -180.0).is_valid());
    }

    #[test]
    fn display_is_lat_lng() {
        assert_eq!(Coordinate::new(50.5, 4.25).to_string(), "50.5,4.25");
    }
}
