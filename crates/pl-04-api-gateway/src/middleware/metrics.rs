//! In-process request counters, served as JSON from `GET /metrics`.

use axum::{body::Body, http::Request, response::Response};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Instant;
use tower::{Layer, Service};

/// Which API route a request hit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    Generate,
    Log,
    Transactions,
    Other,
}

impl RouteKind {
    pub fn from_path(path: &str) -> Self {
        if path == "/api/generate" {
            Self::Generate
        } else if path == "/api/log" {
            Self::Log
        } else if path.starts_with("/api/transactions/") {
            Self::Transactions
        } else {
            Self::Other
        }
    }
}

/// API Gateway metrics
#[derive(Default)]
pub struct GatewayMetrics {
    // Request counters
    pub requests_total: AtomicU64,
    pub requests_success: AtomicU64,
    pub requests_error: AtomicU64,

    // Per-route counters
    pub generate_requests: AtomicU64,
    pub log_requests: AtomicU64,
    pub transactions_requests: AtomicU64,

    /// Generate responses that came back with a null proof
    pub degraded_responses: AtomicU64,
    pub timeouts: AtomicU64,

    // Latency tracking
    pub total_latency_ms: AtomicU64,
    pub request_count_for_latency: AtomicU64,
}

impl GatewayMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a finished request
    pub fn record_request(&self, route: RouteKind, success: bool, latency_ms: u64) {
        self.requests_total.fetch_add(1, Ordering::Relaxed);

        if success {
            self.requests_success.fetch_add(1, Ordering::Relaxed);
        } else {
            self.requests_error.fetch_add(1, Ordering::Relaxed);
        }

        let counter = match route {
            RouteKind::Generate => Some(&self.generate_requests),
            RouteKind::Log => Some(&self.log_requests),
            RouteKind::Transactions => Some(&self.transactions_requests),
            RouteKind::Other => None,
        };
        if let Some(counter) = counter {
            counter.fetch_add(1, Ordering::Relaxed);
        }

        self.total_latency_ms.fetch_add(latency_ms, Ordering::Relaxed);
        self.request_count_for_latency.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_degraded(&self) {
        self.degraded_responses.fetch_add(1, Ordering::Relaxed);
    }

    pub fn record_timeout(&self) {
        self.timeouts.fetch_add(1, Ordering::Relaxed);
    }

    /// Get average latency in ms
    pub fn average_latency_ms(&self) -> f64 {
        let total = self.total_latency_ms.load(Ordering::Relaxed);
        let count = self.request_count_for_latency.load(Ordering::Relaxed);
        if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        }
    }

    /// Export metrics as JSON
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "requests": {
                "total": self.requests_total.load(Ordering::Relaxed),
                "success": self.requests_success.load(Ordering::Relaxed),
                "error": self.requests_error.load(Ordering::Relaxed),
                "timeouts": self.timeouts.load(Ordering::Relaxed),
            },
            "routes": {
                "generate": self.generate_requests.load(Ordering::Relaxed),
                "log": self.log_requests.load(Ordering::Relaxed),
                "transactions": self.transactions_requests.load(Ordering::Relaxed),
            },
            "generate": {
                "degraded": self.degraded_responses.load(Ordering::Relaxed),
            },
            "latency": {
                "average_ms": self.average_latency_ms(),
            }
        })
    }
}

/// Request timing helper
pub struct RequestTimer {
    start: Instant,
    metrics: Arc<GatewayMetrics>,
    route: RouteKind,
}

impl RequestTimer {
    pub fn new(metrics: Arc<GatewayMetrics>, route: RouteKind) -> Self {
        Self {
            start: Instant::now(),
            metrics,
            route,
        }
    }

    pub fn finish(self, success: bool) {
        let latency_ms = self.start.elapsed().as_millis() as u64;
        self.metrics.record_request(self.route, success, latency_ms);
    }
}

/// Layer timing every request into [`GatewayMetrics`]
#[derive(Clone)]
pub struct MetricsLayer {
    metrics: Arc<GatewayMetrics>,
}

impl MetricsLayer {
    pub fn new(metrics: Arc<GatewayMetrics>) -> Self {
        Self { metrics }
    }
}

impl<S> Layer<S> for MetricsLayer {
    type Service = MetricsService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MetricsService {
            inner,
            metrics: Arc::clone(&self.metrics),
        }
    }
}

#[derive(Clone)]
pub struct MetricsService<S> {
    inner: S,
    metrics: Arc<GatewayMetrics>,
}

impl<S> Service<Request<Body>> for MetricsService<S>
where
    S: Service<Request<Body>, Response = Response> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = Response;
    type Error = S::Error;
    type Future = std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self::Response, Self::Error>> + Send>,
    >;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let route = RouteKind::from_path(req.uri().path());
        let timer = RequestTimer::new(Arc::clone(&self.metrics), route);
        let metrics = Arc::clone(&self.metrics);
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let result = inner.call(req).await;
            match &result {
                Ok(response) => {
                    let status = response.status();
                    if status == axum::http::StatusCode::GATEWAY_TIMEOUT {
                        metrics.record_timeout();
                    }
                    timer.finish(status.is_success());
                }
                Err(_) => timer.finish(false),
            }
            result
        })
    }
}
