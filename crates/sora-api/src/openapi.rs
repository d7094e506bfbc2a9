//! # OpenAPI Generation
//!
//! OpenAPI 3.x spec auto-generated from handler annotations via utoipa,
//! served at `/openapi.json`.

use axum::routing::get;
use axum::{Json, Router};
use utoipa::OpenApi;

use crate::state::AppState;

/// The assembled API documentation.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "SORA Stack API",
        description = "Regulatory risk classification for UAS operations under JARUS SORA 2.0 and 2.5: ground risk, air risk, SAIL, OSO/TMPR, and static reference data.",
        version = "0.3.0",
    ),
    paths(
        crate::routes::ground::compute,
        crate::routes::air::compute,
        crate::routes::sail::compute,
        crate::routes::complete::compute,
        crate::routes::reference::osos,
        crate::routes::reference::sail_matrix_listing,
        crate::routes::reference::aec,
        crate::routes::reference::tmpr,
        crate::routes::reference::mitigations,
    ),
    components(schemas(
        crate::routes::ground::GroundRiskRequest,
        crate::routes::air::AirRiskRequest,
        crate::routes::sail::SailRequest,
        crate::error::ErrorBody,
        crate::error::ErrorDetail,
    )),
    tags(
        (name = "calculations", description = "Risk classification calculations"),
        (name = "reference", description = "Static regulatory reference data"),
    )
)]
pub struct ApiDoc;

/// GET /openapi.json — the generated spec.
async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// The OpenAPI router.
pub fn router() -> Router<AppState> {
    Router::new().route("/openapi.json", get(openapi_json))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spec_contains_all_routes() {
        let spec = ApiDoc::openapi();
        let paths: Vec<&String> = spec.paths.paths.keys().collect();
        for expected in [
            "/v1/ground-risk",
            "/v1/air-risk",
            "/v1/sail",
            "/v1/sora/complete",
            "/v1/reference/osos",
            "/v1/reference/sail-matrix",
            "/v1/reference/aec",
            "/v1/reference/tmpr",
            "/v1/reference/mitigations",
        ] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing path {expected}"
            );
        }
    }
}
