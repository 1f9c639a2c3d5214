use serde::{Deserialize, Serialize};

use crate::meters::Meters;

/// Distance between one origin and one destination.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DistanceResult {
    Distance(Meters),
    /// The API found no route between the pair.
    NotFound,
}

impl DistanceResult {
    pub fn meters(&self) -> Option<Meters> {
        match self {
            DistanceResult::Distance(meters) => Some(*meters),
            DistanceResult::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, DistanceResult::Distance(_))
    }
}

/// Row-major results: entry `o * destinations + d` is origin `o` to destination `d`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DistanceMatrixResult {
    destinations: usize,
    results: Vec<DistanceResult>,
}

impl DistanceMatrixResult {
    pub(crate) fn new(destinations: usize, results: Vec<DistanceResult>) -> Self {
        Self {
            destinations,
            results,
        }
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn origin_count(&self) -> usize {
        self.results.len().checked_div(self.destinations).unwrap_or(0)
    }

    pub fn destination_count(&self) -> usize {
        self.destinations
    }

    pub fn get(&self, origin: usize, destination: usize) -> Option<DistanceResult> {
        if destination >= self.destinations {
            return None;
        }

        self.results
            .get(origin * self.destinations + destination)
            .copied()
    }

    pub fn rows(&self) -> impl Iterator<Item = &[DistanceResult]> {
        self.results.chunks(self.destinations.max(1))
    }

    pub fn iter(&self) -> impl Iterator<Item = &DistanceResult> {
        self.results.iter()
    }

    pub fn as_slice(&self) -> &[DistanceResult] {
        &self.results
    }

    pub fn into_vec(self) -> Vec<DistanceResult> {
        self.results
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn meters(value: f64) -> DistanceResult {
        DistanceResult::Distance(Meters::new(value))
    }

    #[test]
    fn indexes_row_major() {
        let matrix = DistanceMatrixResult::new(
            3,
            vec![
                meters(0.0),
                meters(1.0),
                meters(2.0),
                meters(10.0),
                DistanceResult::NotFound,
                meters(12.0),
            ],
        );

        assert_eq!(matrix.len(), 6);
        assert_eq!(matrix.origin_count(), 2);
        assert_eq!(matrix.get(1, 0), Some(meters(10.0)));
        assert_eq!(matrix.get(1, 1), Some(DistanceResult::NotFound));
        assert_eq!(matrix.get(0, 3), None);
        assert_eq!(matrix.get(2, 0), None);
        assert_eq!(matrix.rows().count(), 2);
    }

    #[test]
    fn not_found_has_no_meters() {
        assert_eq!(DistanceResult::NotFound.meters(), None);
        assert_eq!(meters(5.0).meters(), Some(Meters::new(5.0)));
    }
}
