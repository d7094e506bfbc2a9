//! # sora-api — Axum API Services for the SORA Stack
//!
//! The serving layer above the pure calculation engines. Assembles the
//! calculation and reference routers into a single application with
//! tracing and metrics middleware.
//!
//! ## API Surface
//!
//! | Route                          | Module                  | Purpose            |
//! |--------------------------------|-------------------------|--------------------|
//! | `POST /v1/ground-risk`         | [`routes::ground`]      | Ground risk engine |
//! | `POST /v1/air-risk`            | [`routes::air`]         | Air risk engine    |
//! | `POST /v1/sail`                | [`routes::sail`]        | SAIL (local/remote)|
//! | `POST /v1/sora/complete`       | [`routes::complete`]    | Full pipeline      |
//! | `GET /v1/reference/*`          | [`routes::reference`]   | Static tables      |
//! | `GET /health/*`                | here                    | Probes             |
//! | `GET /metrics`                 | here                    | Prometheus scrape  |
//! | `GET /openapi.json`            | [`openapi`]             | Generated spec     |
//!
//! ## Middleware Stack (execution order)
//!
//! ```text
//! TraceLayer → MetricsMiddleware → Handler
//! ```
//!
//! ## Crate Policy
//!
//! - No business logic in route handlers — delegates to the engine
//!   crates. All errors map to structured HTTP responses via `AppError`.
//! - Regulatory outcomes (out of scope, Category C, compliance gaps)
//!   are 200-level responses; only malformed input is 4xx.

pub mod error;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod state;

use axum::extract::State;
use axum::http::StatusCode;
use axum::middleware::from_fn;
use axum::response::IntoResponse;
use axum::{Extension, Router};
use tower_http::trace::TraceLayer;

use crate::middleware::metrics::ApiMetrics;
use crate::state::AppState;

pub use error::AppError;

/// Check if metrics are enabled via the `SORA_METRICS_ENABLED` env var.
/// Defaults to `true` when the variable is absent or set to anything
/// other than `"false"`.
fn metrics_enabled() -> bool {
    std::env::var("SORA_METRICS_ENABLED")
        .map(|v| v.to_lowercase() != "false")
        .unwrap_or(true)
}

/// Assemble the full application router with all routes and middleware.
///
/// Health probes (`/health/*`) and `/metrics` are mounted outside the
/// API middleware so they stay reachable under any load shedding.
pub fn app(state: AppState) -> Router {
    let metrics = ApiMetrics::new();
    let metrics_on = metrics_enabled();

    let mut api = Router::new()
        .merge(routes::ground::router())
        .merge(routes::air::router())
        .merge(routes::sail::router())
        .merge(routes::complete::router())
        .merge(routes::reference::router())
        .merge(openapi::router());

    // Only register the metrics middleware when metrics are enabled.
    if metrics_on {
        api = api
            .layer(from_fn(middleware::metrics::metrics_middleware))
            .layer(Extension(metrics.clone()));
    }

    let api = api
        .layer(TraceLayer::new_for_http())
        .with_state(state.clone());

    let mut unauthenticated = Router::new()
        .route("/health/liveness", axum::routing::get(liveness))
        .route("/health/readiness", axum::routing::get(readiness));

    if metrics_on {
        unauthenticated = unauthenticated
            .route("/metrics", axum::routing::get(prometheus_metrics))
            .layer(Extension(metrics));
    }

    let unauthenticated = unauthenticated.with_state(state);

    Router::new().merge(unauthenticated).merge(api)
}

/// GET /health/liveness — process is up.
async fn liveness() -> &'static str {
    "ok"
}

/// GET /health/readiness — ready to serve.
///
/// The engines are pure functions over compiled-in tables, so readiness
/// equals liveness; the optional calculation service is not on the
/// readiness path because every route degrades to local computation.
async fn readiness(State(_state): State<AppState>) -> &'static str {
    "ok"
}

/// GET /metrics — Prometheus metrics scrape endpoint.
async fn prometheus_metrics(Extension(metrics): Extension<ApiMetrics>) -> impl IntoResponse {
    match metrics.gather_and_encode() {
        Ok(body) => (StatusCode::OK, body).into_response(),
        Err(err) => {
            tracing::error!(%err, "failed to encode metrics");
            (StatusCode::INTERNAL_SERVER_ERROR, "encoding error").into_response()
        }
    }
}
