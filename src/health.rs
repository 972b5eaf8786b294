use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::{info, warn};
use utoipa::ToSchema;

use crate::app_state::AppState;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub classifier: String,
}

#[utoipa::path(
    get,
    path = "/healthz",
    tag = "health",
    responses(
        (status = 200, description = "Classifier loaded, scans accepted", body = HealthResponse),
        (status = 503, description = "Classifier artifacts missing", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Response {
    match state.scanner() {
        Ok(_) => {
            info!("Health check passed");
            Json(HealthResponse {
                status: "OK".to_string(),
                classifier: "loaded".to_string(),
            })
            .into_response()
        }
        Err(err) => {
            warn!(error = %err, "Health check failed: classifier unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "degraded".to_string(),
                    classifier: "missing".to_string(),
                }),
            )
                .into_response()
        }
    }
}
