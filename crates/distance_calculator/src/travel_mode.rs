use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::distance_error::DistanceError;

/// Mode of transport used by the distance matrix API.
#[derive(Debug, Default, Deserialize, Serialize, Copy, Clone, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum TravelMode {
    Driving,
    #[default]
    Walking,
    Bicycling,
    Transit,
}

impl TravelMode {
    pub const ALL: [TravelMode; 4] = [
        TravelMode::Driving,
        TravelMode::Walking,
        TravelMode::Bicycling,
        TravelMode::Transit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TravelMode::Driving => "driving",
            TravelMode::Walking => "walking",
            TravelMode::Bicycling => "bicycling",
            TravelMode::Transit => "transit",
        }
    }
}

impl Display for TravelMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TravelMode {
    type Err = DistanceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value = s.trim();
        TravelMode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| DistanceError::invalid_input(format!("Unknown travel mode '{value}'")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_walking() {
        assert_eq!(TravelMode::default(), TravelMode::Walking);
    }

    #[test]
    fn should_parse_api_names() {
        for mode in TravelMode::ALL {
            assert_eq!(mode.to_string().parse::<TravelMode>().unwrap(), mode);
        }
        assert_eq!(" Driving ".parse::<TravelMode>().unwrap(), TravelMode::Driving);
    }

    #[test]
    fn should_reject_unknown_mode() {
        assert!(matches!(
            "flying".parse::<TravelMode>(),
            Err(DistanceError::InvalidInput(_))
        ));
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&TravelMode::Bicycling).unwrap(),
            "\"bicycling\""
        );
    }
}
