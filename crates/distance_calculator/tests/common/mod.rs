#![allow(dead_code)]

use std::sync::{
    Arc,
    atomic::{AtomicBool, AtomicUsize, Ordering},
};

use distance_calculator::{
    Coordinate, ServiceConfig,
    transport::{DistanceTransport, TransportError, TransportRequest, TransportResponse},
};
use parking_lot::Mutex;
use serde_json::json;

/// Answers every request with the same response.
pub struct MockTransport {
    status: u16,
    body: Vec<u8>,
    calls: AtomicUsize,
    requests: Mutex<Vec<TransportRequest>>,
}

impl MockTransport {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Self {
            status,
            body: body.into(),
            calls: AtomicUsize::new(0),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn ok(body: serde_json::Value) -> Self {
        Self::new(200, body.to_string())
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_query(&self, name: &str) -> Option<String> {
        self.requests.lock().last().and_then(|request| {
            request
                .query
                .iter()
                .find(|(key, _)| key == name)
                .map(|(_, value)| value.clone())
        })
    }
}

impl DistanceTransport for MockTransport {
    async fn get(&self, request: TransportRequest) -> Result<TransportResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.requests.lock().push(request);

        Ok(TransportResponse {
            status: self.status,
            body: self.body.clone(),
        })
    }
}

struct DropFlag(Arc<AtomicBool>);

impl Drop for DropFlag {
    fn drop(&mut self) {
        self.0.store(true, Ordering::SeqCst);
    }
}

/// Never answers, records when the in-flight request gets dropped.
#[derive(Default)]
pub struct NeverTransport {
    calls: AtomicUsize,
    dropped: Arc<AtomicBool>,
}

impl NeverTransport {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn was_dropped(&self) -> bool {
        self.dropped.load(Ordering::SeqCst)
    }
}

impl DistanceTransport for NeverTransport {
    async fn get(&self, _request: TransportRequest) -> Result<TransportResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let _guard = DropFlag(Arc::clone(&self.dropped));

        std::future::pending().await
    }
}

/// Fails every request before any response arrives.
#[derive(Default)]
pub struct FailingTransport {
    calls: AtomicUsize,
}

impl FailingTransport {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl DistanceTransport for FailingTransport {
    async fn get(&self, _request: TransportRequest) -> Result<TransportResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(TransportError::Other("connection reset".to_string()))
    }
}

pub fn config() -> ServiceConfig {
    ServiceConfig::with_api_key("test-key")
}

pub fn coordinates(count: usize) -> Vec<Coordinate> {
    (0..count)
        .map(|i| Coordinate::new(50.80 + i as f64 * 0.01, 4.35))
        .collect()
}

/// Well formed response where origin `o` to destination `d` is `1000 * (o + 1) + d` meters.
pub fn matrix_body(origins: usize, destinations: usize) -> serde_json::Value {
    let rows: Vec<_> = (0..origins)
        .map(|o| {
            let elements: Vec<_> = (0..destinations)
                .map(|d| {
                    let value = 1000 * (o + 1) + d;
                    json!({
                        "status": "OK",
                        "distance": { "text": format!("{value} m"), "value": value },
                        "duration": { "text": "1 min", "value": 60 }
                    })
                })
                .collect();
            json!({ "elements": elements })
        })
        .collect();

    json!({
        "status": "OK",
        "origin_addresses": vec![""; origins],
        "destination_addresses": vec![""; destinations],
        "rows": rows
    })
}
