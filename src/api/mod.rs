//! HTTP shell around the scanner.

pub mod dtos;
pub mod handlers;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{app_state::AppState, health};

#[derive(OpenApi)]
#[openapi(
    paths(handlers::scan_url, handlers::scan_text, health::health_check),
    components(schemas(
        dtos::ScanUrlRequest,
        dtos::ScanTextRequest,
        dtos::ErrorResponse,
        crate::reporter::ScanReport,
        crate::reporter::ScanOutcome,
        health::HealthResponse
    )),
    tags(
        (name = "scan", description = "Dark pattern scanning"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(health::health_check))
        .route("/v1/scan", post(handlers::scan_url))
        .route("/v1/scan/text", post(handlers::scan_text))
        .with_state(state)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
