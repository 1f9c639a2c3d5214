use std::{future::Future, sync::Arc};

use futures::future::Abortable;
use parking_lot::{Mutex, RwLock};
use tokio::runtime::Handle;
use tracing::{debug, info};

use crate::{
    coordinate::{self, Coordinate},
    distance_error::DistanceError,
    distance_request::DistanceMatrixRequest,
    distance_result::{DistanceMatrixResult, DistanceResult},
    executor::Executor,
    google_distance_api,
    meters::Meters,
    pending_operation::{CancellationHandle, PendingOperation},
    service_config::ServiceConfig,
    transport::{DistanceTransport, ReqwestTransport, TransportRequest},
    travel_mode::TravelMode,
};

struct PreparedRequest {
    transport_request: TransportRequest,
    matrix_request: DistanceMatrixRequest,
}

async fn execute<T>(
    transport: &T,
    prepared: PreparedRequest,
) -> Result<DistanceMatrixResult, DistanceError>
where
    T: DistanceTransport,
{
    debug!(
        "DistanceService: requesting {} elements ({})",
        prepared.matrix_request.element_count(),
        prepared.matrix_request.travel_mode()
    );

    let response = transport.get(prepared.transport_request).await?;
    google_distance_api::parse_response(&response, &prepared.matrix_request)
}

fn first_result(matrix: DistanceMatrixResult) -> Result<DistanceResult, DistanceError> {
    matrix
        .get(0, 0)
        .ok_or_else(|| DistanceError::internal("Empty distance matrix"))
}

/// Geometry and real world distances between coordinates.
///
/// Configuration is read when a call is issued, so changing the travel mode
/// only affects later calls. The blocking methods must not be called from
/// within an async context, use the `fetch_*` methods there.
pub struct DistanceService<T = ReqwestTransport> {
    config: RwLock<ServiceConfig>,
    transport: Arc<T>,
    executor: Executor,
    pending: Mutex<Vec<CancellationHandle>>,
}

impl DistanceService<ReqwestTransport> {
    pub fn new(config: ServiceConfig) -> Result<Self, DistanceError> {
        Self::with_transport(config, ReqwestTransport::default())
    }

    /// Default construction helper, reads the configuration from the environment.
    pub fn from_env() -> Result<Self, DistanceError> {
        Self::new(ServiceConfig::from_env()?)
    }
}

impl<T> DistanceService<T>
where
    T: DistanceTransport,
{
    pub fn with_transport(config: ServiceConfig, transport: T) -> Result<Self, DistanceError> {
        Ok(Self::build(config, transport, Executor::owned()?))
    }

    /// Runs the async work on an existing runtime instead of an owned one.
    pub fn with_handle(config: ServiceConfig, transport: T, handle: Handle) -> Self {
        Self::build(config, transport, Executor::from_handle(handle))
    }

    fn build(config: ServiceConfig, transport: T, executor: Executor) -> Self {
        Self {
            config: RwLock::new(config),
            transport: Arc::new(transport),
            executor,
            pending: Mutex::new(Vec::new()),
        }
    }

    /// Straight line distance, no API call and no API key needed.
    pub fn geometry_distance(
        &self,
        origin: &Coordinate,
        destination: &Coordinate,
    ) -> Result<Meters, DistanceError> {
        coordinate::geometry_distance(origin, destination)
    }

    pub fn config(&self) -> ServiceConfig {
        self.config.read().clone()
    }

    pub fn api_key(&self) -> Option<String> {
        self.config.read().api_key.clone()
    }

    pub fn set_api_key(&self, api_key: Option<String>) {
        self.config.write().api_key = api_key;
    }

    pub fn travel_mode(&self) -> TravelMode {
        self.config.read().travel_mode
    }

    pub fn set_travel_mode(&self, travel_mode: TravelMode) {
        self.config.write().travel_mode = travel_mode;
    }

    fn prepare(
        &self,
        origins: &[Coordinate],
        destinations: &[Coordinate],
    ) -> Result<PreparedRequest, DistanceError> {
        let config = self.config.read();

        let matrix_request = DistanceMatrixRequest::new(
            origins.to_vec(),
            destinations.to_vec(),
            config.travel_mode,
        )?;
        let api_key = config.require_api_key()?;

        Ok(PreparedRequest {
            transport_request: google_distance_api::build_request(
                &config.api_url,
                api_key,
                &matrix_request,
            ),
            matrix_request,
        })
    }

    pub async fn fetch_distance(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<DistanceResult, DistanceError> {
        let prepared = self.prepare(&[origin], &[destination])?;
        execute(&*self.transport, prepared)
            .await
            .and_then(first_result)
    }

    pub async fn fetch_distances(
        &self,
        origins: &[Coordinate],
        destinations: &[Coordinate],
    ) -> Result<DistanceMatrixResult, DistanceError> {
        let prepared = self.prepare(origins, destinations)?;
        execute(&*self.transport, prepared).await
    }

    /// Blocks the calling thread until the API answers.
    pub fn real_distance(
        &self,
        origin: Coordinate,
        destination: Coordinate,
    ) -> Result<DistanceResult, DistanceError> {
        self.executor
            .block_on(self.fetch_distance(origin, destination))
    }

    /// Blocks the calling thread until the API answers.
    pub fn real_distances(
        &self,
        origins: &[Coordinate],
        destinations: &[Coordinate],
    ) -> Result<DistanceMatrixResult, DistanceError> {
        self.executor
            .block_on(self.fetch_distances(origins, destinations))
    }

    /// The callback is invoked exactly once, with the distance or an error.
    /// Input errors are reported before this method returns.
    pub fn real_distance_with_callback<C>(
        &self,
        origin: Coordinate,
        destination: Coordinate,
        callback: C,
    ) -> CancellationHandle
    where
        C: FnOnce(Result<DistanceResult, DistanceError>) + Send + 'static,
    {
        match self.prepare(&[origin], &[destination]) {
            Ok(prepared) => {
                let transport = Arc::clone(&self.transport);
                self.spawn_operation(
                    async move {
                        execute(&*transport, prepared)
                            .await
                            .and_then(first_result)
                    },
                    callback,
                )
            }
            Err(error) => Self::rejected_operation(error, callback),
        }
    }

    /// The callback is invoked exactly once, with the matrix or an error.
    /// Input errors are reported before this method returns.
    pub fn real_distances_with_callback<C>(
        &self,
        origins: &[Coordinate],
        destinations: &[Coordinate],
        callback: C,
    ) -> CancellationHandle
    where
        C: FnOnce(Result<DistanceMatrixResult, DistanceError>) + Send + 'static,
    {
        match self.prepare(origins, destinations) {
            Ok(prepared) => {
                let transport = Arc::clone(&self.transport);
                self.spawn_operation(
                    async move { execute(&*transport, prepared).await },
                    callback,
                )
            }
            Err(error) => Self::rejected_operation(error, callback),
        }
    }

    /// Cancels the most recently issued operation that is still pending.
    pub fn cancel_calculator(&self) {
        loop {
            let Some(handle) = self.pending.lock().pop() else {
                debug!("DistanceService: nothing to cancel");
                return;
            };

            if handle.cancel() {
                info!("DistanceService: cancelled operation {}", handle.id());
                return;
            }
        }
    }

    pub fn pending_count(&self) -> usize {
        self.pending
            .lock()
            .iter()
            .filter(|handle| handle.is_pending())
            .count()
    }

    fn spawn_operation<R, F, C>(&self, work: F, callback: C) -> CancellationHandle
    where
        R: Send + 'static,
        F: Future<Output = Result<R, DistanceError>> + Send + 'static,
        C: FnOnce(Result<R, DistanceError>) + Send + 'static,
    {
        let (operation, registration) = PendingOperation::new(callback);
        operation.mark_requested();

        let handle = CancellationHandle::new(Arc::clone(&operation));
        {
            let mut pending = self.pending.lock();
            pending.retain(|handle| handle.is_pending());
            pending.push(handle.clone());
        }

        let guard = operation.cancel_on_drop();
        self.executor.spawn(async move {
            let _guard = guard;

            // Aborted means the cancellation already reached the callback.
            if let Ok(result) = Abortable::new(work, registration).await {
                operation.complete(result);
            }
        });

        handle
    }

    fn rejected_operation<R, C>(error: DistanceError, callback: C) -> CancellationHandle
    where
        R: Send + 'static,
        C: FnOnce(Result<R, DistanceError>) + Send + 'static,
    {
        debug!("DistanceService: rejected request: {}", error);

        let (operation, _registration) = PendingOperation::new(callback);
        operation.complete(Err(error));
        CancellationHandle::new(operation)
    }
}

impl<T> Drop for DistanceService<T> {
    fn drop(&mut self) {
        let pending = std::mem::take(&mut *self.pending.lock());

        for handle in pending.into_iter().rev() {
            if handle.cancel() {
                debug!(
                    "DistanceService: cancelled operation {} on drop",
                    handle.id()
                );
            }
        }
    }
}
