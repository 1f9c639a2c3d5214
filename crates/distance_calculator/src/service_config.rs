use crate::{distance_error::DistanceError, travel_mode::TravelMode};

pub const GOOGLE_DISTANCE_MATRIX_API_URL: &str =
    "https://maps.googleapis.com/maps/api/distancematrix/json";

const API_KEY_ENV_VAR: &str = "GOOGLE_MAPS_API_KEY";
const TRAVEL_MODE_ENV_VAR: &str = "DISTANCE_TRAVEL_MODE";
const API_URL_ENV_VAR: &str = "DISTANCE_MATRIX_API_URL";

#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    /// Only needed for real distance calls.
    pub api_key: Option<String>,
    pub travel_mode: TravelMode,
    pub api_url: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            travel_mode: TravelMode::default(),
            api_url: GOOGLE_DISTANCE_MATRIX_API_URL.to_string(),
        }
    }
}

impl ServiceConfig {
    pub fn with_api_key(api_key: impl Into<String>) -> Self {
        Self {
            api_key: Some(api_key.into()),
            ..Self::default()
        }
    }

    pub fn from_env() -> Result<Self, DistanceError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self, DistanceError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        config.api_key = lookup(API_KEY_ENV_VAR).filter(|key| !key.trim().is_empty());

        if let Some(mode) = lookup(TRAVEL_MODE_ENV_VAR) {
            config.travel_mode = mode.parse()?;
        }

        if let Some(url) = lookup(API_URL_ENV_VAR) {
            config.api_url = url;
        }

        Ok(config)
    }

    /// Returns the API key, failing when it is unset or blank.
    pub fn require_api_key(&self) -> Result<&str, DistanceError> {
        match self.api_key.as_deref().map(str::trim) {
            Some(key) if !key.is_empty() => Ok(key),
            _ => Err(DistanceError::invalid_input("Missing API key")),
        }
    }
}
