use std::{future::Future, sync::Arc, time::Duration};

use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Transport failure: {0}")]
    Other(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransportRequest {
    pub url: String,
    pub query: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Vec<u8>,
}

impl TransportResponse {
    pub fn is_success(&self) -> bool {
        self.status == 200
    }
}

/// HTTP collaborator used to reach the distance matrix API.
///
/// Dropping the returned future must abort the in-flight request, this is how
/// cancellation reaches the transport.
pub trait DistanceTransport: Send + Sync + 'static {
    fn get(
        &self,
        request: TransportRequest,
    ) -> impl Future<Output = Result<TransportResponse, TransportError>> + Send;
}

impl<T> DistanceTransport for Arc<T>
where
    T: DistanceTransport,
{
    fn get(
        &self,
        request: TransportRequest,
    ) -> impl Future<Output = Result<TransportResponse, TransportError>> + Send {
        (**self).get(request)
    }
}

#[derive(Default)]
pub struct ReqwestTransportParams {
    pub timeout: Option<Duration>,
}

pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(params: ReqwestTransportParams) -> Result<Self, TransportError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = params.timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
        })
    }
}

impl Default for ReqwestTransport {
    fn default() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}

impl DistanceTransport for ReqwestTransport {
    async fn get(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        debug!("ReqwestTransport: GET {}", request.url);

        let response = self
            .client
            .get(&request.url)
            .query(&request.query)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();

        debug!(
            "ReqwestTransport: received {} ({} bytes)",
            status,
            body.len()
        );

        Ok(TransportResponse { status, body })
    }
}
