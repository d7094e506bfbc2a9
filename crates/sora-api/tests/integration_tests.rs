//! # Integration Tests for sora-api
//!
//! Tests calculation routes end to end through the router: happy paths,
//! validation rejection, regulatory terminal outcomes as 200 responses,
//! reference data, health probes, metrics, and OpenAPI generation.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use http_body_util::BodyExt;
use tower::ServiceExt;

use sora_api::state::AppState;

/// Helper: build the test app with no remote calculation service.
fn test_app() -> axum::Router {
    sora_api::app(AppState::new())
}

/// Helper: read response body as JSON.
async fn body_json(response: axum::http::Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

// -- Health Probes ------------------------------------------------------------

#[tokio::test]
async fn test_liveness_probe() {
    let response = test_app().oneshot(get("/health/liveness")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_readiness_probe() {
    let response = test_app().oneshot(get("/health/readiness")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

// -- Ground Risk --------------------------------------------------------------

#[tokio::test]
async fn test_ground_risk_micro_uas() {
    let body = serde_json::json!({
        "sora_version": "2.5",
        "ua_dimension_m": 0.3,
        "ua_speed_mps": 20.0,
        "mtom_kg": 0.2,
        "population_density": 30000.0
    });
    let response = test_app()
        .oneshot(post_json("/v1/ground-risk", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["result"]["intrinsic_grc"], 1);
    assert_eq!(json["result"]["final_grc"], 1);
    assert!(json["calculation_id"].is_string());
}

#[tokio::test]
async fn test_ground_risk_with_mitigations() {
    let body = serde_json::json!({
        "sora_version": "2.0",
        "ua_dimension_m": 2.5,
        "ua_speed_mps": 30.0,
        "scenario": "bvlos_populated",
        "mitigations": [
            {"type": "m1", "robustness": "medium"},
            {"type": "m2", "robustness": "high"}
        ]
    });
    let response = test_app()
        .oneshot(post_json("/v1/ground-risk", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["result"]["intrinsic_grc"], 6);
    assert_eq!(json["result"]["final_grc"], 2);
}

#[tokio::test]
async fn test_ground_risk_validation_rejection() {
    let body = serde_json::json!({
        "sora_version": "2.5",
        "ua_dimension_m": -1.0,
        "ua_speed_mps": 20.0,
        "population_density": 100.0
    });
    let response = test_app()
        .oneshot(post_json("/v1/ground-risk", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let json = body_json(response).await;
    assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_ground_risk_missing_selector_rejected() {
    // 2.0 with no scenario at all.
    let body = serde_json::json!({
        "sora_version": "2.0",
        "ua_dimension_m": 1.0,
        "ua_speed_mps": 20.0
    });
    let response = test_app()
        .oneshot(post_json("/v1/ground-risk", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// -- Air Risk -----------------------------------------------------------------

#[tokio::test]
async fn test_air_risk_airport_class_c() {
    let body = serde_json::json!({
        "sora_version": "2.5",
        "max_height_agl_m": 100.0,
        "airspace_class": "c",
        "airspace_control": "controlled",
        "location_type": "airport",
        "environment": "suburban",
        "typicality": "typical"
    });
    let response = test_app()
        .oneshot(post_json("/v1/air-risk", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["result"]["aec"], 1);
    assert_eq!(json["result"]["initial_arc"], "d");
    assert_eq!(json["result"]["residual_arc"], "d");
}

#[tokio::test]
async fn test_air_risk_no_double_counting() {
    let body = serde_json::json!({
        "sora_version": "2.5",
        "max_height_agl_m": 100.0,
        "airspace_class": "c",
        "airspace_control": "controlled",
        "location_type": "airport",
        "environment": "suburban",
        "typicality": "typical",
        "local_density_rating": 4,
        "strategic_mitigations": ["s1", "s2", "s3"]
    });
    let response = test_app()
        .oneshot(post_json("/v1/air-risk", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    // max(one density step, two capped strategic steps) = 2: d -> b.
    assert_eq!(json["result"]["residual_arc"], "b");
}

// -- SAIL ---------------------------------------------------------------------

#[tokio::test]
async fn test_sail_local_determination() {
    let body = serde_json::json!({
        "sora_version": "2.0",
        "final_grc": 7,
        "residual_arc": "c"
    });
    let response = test_app().oneshot(post_json("/v1/sail", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["result"]["result"]["sail"], "VI");
    assert_eq!(json["result"]["source"], "local");
}

#[tokio::test]
async fn test_sail_category_c_is_200() {
    let body = serde_json::json!({
        "sora_version": "2.0",
        "final_grc": 8,
        "residual_arc": "a"
    });
    let response = test_app().oneshot(post_json("/v1/sail", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["result"]["result"]["outcome"], "category_c");
    assert!(json["result"]["result"]["sail"].is_null());
    assert!(json["result"]["required_oso_count"].is_null());
}

// -- Complete Pipeline --------------------------------------------------------

fn complete_request_v20() -> serde_json::Value {
    serde_json::json!({
        "sora_version": "2.0",
        "ua": {"dimension_m": 1.0, "max_speed_mps": 30.0},
        "scenario": "vlos_sparsely_populated",
        "airspace": {
            "max_height_agl_m": 100.0,
            "airspace_class": "g",
            "control": "uncontrolled",
            "location_type": "non_airport",
            "environment": "rural",
            "typicality": "typical"
        }
    })
}

#[tokio::test]
async fn test_complete_pipeline() {
    let response = test_app()
        .oneshot(post_json("/v1/sora/complete", complete_request_v20()))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["result"]["summary"]["final_grc"], 2);
    assert_eq!(json["result"]["summary"]["residual_arc"], "b");
    assert_eq!(json["result"]["summary"]["sail"], "II");
    assert_eq!(json["result"]["summary"]["tmpr"], "low");
}

#[tokio::test]
async fn test_complete_category_c_reason_code() {
    let mut body = complete_request_v20();
    body["ua"]["dimension_m"] = serde_json::json!(12.0);
    body["scenario"] = serde_json::json!("bvlos_populated");
    let response = test_app()
        .oneshot(post_json("/v1/sora/complete", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["result"]["reason_code"], "CATEGORY_C");
    assert!(json["result"]["summary"]["sail"].is_null());
    assert!(json["result"]["required_oso_count"].is_null());
}

// -- Reference Data -----------------------------------------------------------

#[tokio::test]
async fn test_reference_sail_matrix() {
    let response = test_app()
        .oneshot(get("/v1/reference/sail-matrix"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["rows"].as_array().unwrap().len(), 7);
    assert_eq!(json["rows"][6]["sail"][0], "VI");
}

#[tokio::test]
async fn test_reference_osos_v25_subset() {
    let response = test_app()
        .oneshot(get("/v1/reference/osos?sora_version=2.5"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["osos"].as_array().unwrap().len(), 17);
}

#[tokio::test]
async fn test_reference_osos_with_sail_filter() {
    let response = test_app()
        .oneshot(get("/v1/reference/osos?sora_version=2.0&sail=VI"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let osos = json["osos"].as_array().unwrap();
    assert_eq!(osos.len(), 24);
    assert!(osos
        .iter()
        .all(|oso| oso["required_robustness"] == "high"));
}

#[tokio::test]
async fn test_reference_aec_table() {
    let response = test_app().oneshot(get("/v1/reference/aec")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let rows = json.as_array().unwrap();
    assert_eq!(rows.len(), 12);
    assert_eq!(rows[0]["initial_arc"], "d");
    assert_eq!(rows[11]["initial_arc"], "a");
}

#[tokio::test]
async fn test_reference_tmpr_v25() {
    let response = test_app()
        .oneshot(get("/v1/reference/tmpr?sora_version=2.5"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let map = json["map"].as_array().unwrap();
    assert_eq!(map.len(), 4);
    assert_eq!(map[3]["level"], "very_high");
}

#[tokio::test]
async fn test_reference_mitigations_v20() {
    let response = test_app()
        .oneshot(get("/v1/reference/mitigations?sora_version=2.0"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let credits = json["credits"].as_array().unwrap();
    // Three 2.0 types x four robustness levels.
    assert_eq!(credits.len(), 12);
    assert!(credits
        .iter()
        .any(|row| row["type"] == "m1" && row["robustness"] == "high" && row["credit"] == -4));
}

// -- Metrics & OpenAPI --------------------------------------------------------

#[tokio::test]
async fn test_metrics_endpoint_counts_requests() {
    let app = test_app();
    let _ = app
        .clone()
        .oneshot(post_json("/v1/sora/complete", complete_request_v20()))
        .await
        .unwrap();
    let response = app.oneshot(get("/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("sora_http_requests_total"));
    assert!(text.contains("sora_calculations_total"));
}

#[tokio::test]
async fn test_openapi_spec_served() {
    let response = test_app().oneshot(get("/openapi.json")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert!(json["paths"]["/v1/sora/complete"].is_object());
    assert!(json["paths"]["/v1/reference/osos"].is_object());
}
