pub mod coordinate;
pub mod distance_error;
pub mod distance_request;
pub mod distance_result;
pub mod distance_service;
mod executor;
pub mod google_distance_api;
pub mod meters;
pub mod pending_operation;
pub mod service_config;
pub mod transport;
pub mod travel_mode;

pub use coordinate::{Coordinate, geometry_distance};
pub use distance_error::DistanceError;
pub use distance_result::{DistanceMatrixResult, DistanceResult};
pub use distance_service::DistanceService;
pub use meters::Meters;
pub use pending_operation::CancellationHandle;
pub use service_config::ServiceConfig;
pub use travel_mode::TravelMode;
