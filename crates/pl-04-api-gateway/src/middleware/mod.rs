//! Middleware stack for the API Gateway.
//!
//! Layer order: Request → CORS → Tracing → Metrics → Timeout → Handler
//!
//! The timeout sits innermost so a 504 is still counted and traced.

pub mod cors;
pub mod metrics;
pub mod timeout;
pub mod tracing;

pub use cors::create_cors_layer;
pub use metrics::{GatewayMetrics, MetricsLayer, RequestTimer, RouteKind};
pub use timeout::TimeoutLayer;
pub use tracing::{TracingLayer, REQUEST_ID_HEADER};
