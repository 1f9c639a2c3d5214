use clap::Args;
use distance_calculator::{
    DistanceService, ServiceConfig, TravelMode,
    transport::{ReqwestTransport, ReqwestTransportParams},
};
use tracing::debug;

use crate::parsers;

#[derive(Args)]
pub struct ServiceArgs {
    /// Google Maps API key, defaults to GOOGLE_MAPS_API_KEY
    #[arg(long)]
    api_key: Option<String>,

    /// driving, walking, bicycling or transit
    #[arg(short, long, value_parser = parsers::parse_travel_mode)]
    mode: Option<TravelMode>,

    /// Request timeout (e.g., "30s", "PT1M")
    #[arg(short, long, value_parser = parsers::parse_duration)]
    timeout: Option<jiff::SignedDuration>,
}

impl ServiceArgs {
    pub fn build(self) -> anyhow::Result<DistanceService> {
        let mut config = ServiceConfig::from_env()?;
        if let Some(api_key) = self.api_key {
            config.api_key = Some(api_key);
        }
        if let Some(mode) = self.mode {
            config.travel_mode = mode;
        }

        let timeout = self
            .timeout
            .map(|timeout| timeout.unsigned_abs());
        let transport = ReqwestTransport::new(ReqwestTransportParams { timeout })?;

        debug!(
            "Using {} at {} (timeout {:?})",
            config.travel_mode, config.api_url, timeout
        );

        Ok(DistanceService::with_handle(
            config,
            transport,
            tokio::runtime::Handle::current(),
        ))
    }
}
