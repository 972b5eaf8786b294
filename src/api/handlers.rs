use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::{
    api::dtos::{ErrorResponse, ScanTextRequest, ScanUrlRequest},
    app_state::AppState,
    classifier::ConfigurationError,
    reporter::ScanReport,
};

pub const TRAINING_REQUIRED: &str = "classifier unavailable; run training first";

fn error_response(status: StatusCode, error: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorResponse {
            error: error.into(),
        }),
    )
        .into_response()
}

fn classifier_unavailable(err: &ConfigurationError) -> Response {
    error!(error = %err, "refusing scan");
    error_response(
        StatusCode::SERVICE_UNAVAILABLE,
        format!("{TRAINING_REQUIRED} ({err})"),
    )
}

#[utoipa::path(
    post,
    path = "/v1/scan",
    tag = "scan",
    request_body = ScanUrlRequest,
    responses(
        (status = 200, description = "Scan finished; an unreadable page is reported in `outcome`", body = ScanReport),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 503, description = "Classifier artifacts missing", body = ErrorResponse)
    )
)]
pub async fn scan_url(
    State(state): State<AppState>,
    Json(payload): Json<ScanUrlRequest>,
) -> Response {
    if let Err(msg) = payload.validate() {
        return error_response(StatusCode::BAD_REQUEST, msg);
    }
    let scanner = match state.scanner() {
        Ok(scanner) => scanner,
        Err(err) => return classifier_unavailable(&err),
    };

    Json(scanner.scan_url(&payload.url).await).into_response()
}

#[utoipa::path(
    post,
    path = "/v1/scan/text",
    tag = "scan",
    request_body = ScanTextRequest,
    responses(
        (status = 200, description = "Text classified", body = ScanReport),
        (status = 400, description = "Invalid request", body = ErrorResponse),
        (status = 503, description = "Classifier artifacts missing", body = ErrorResponse)
    )
)]
pub async fn scan_text(
    State(state): State<AppState>,
    Json(payload): Json<ScanTextRequest>,
) -> Response {
    if let Err(msg) = payload.validate() {
        return error_response(StatusCode::BAD_REQUEST, msg);
    }
    let scanner = match state.scanner() {
        Ok(scanner) => scanner,
        Err(err) => return classifier_unavailable(&err),
    };

    Json(scanner.scan_text(&payload.text)).into_response()
}
