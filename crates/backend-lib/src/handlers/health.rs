use axum::Json;
use gatekeeper_common::HealthResponse;

/// `GET /health`
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        message: "Gatekeeper auth API".to_string(),
    })
}
