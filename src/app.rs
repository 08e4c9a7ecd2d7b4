use std::sync::Arc;

use axum::{http::StatusCode, routing::get, Router};
use tower_http::request_id::{PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::core::config::AppConfig;
use crate::core::middleware;
use crate::features::reports::ReportService;
use crate::features::{photos, reports};
use crate::modules::storage::LocalPhotoStorage;

/// Shared services handed to the feature routers
#[derive(Clone)]
pub struct AppServices {
    pub report_service: Arc<ReportService>,
    pub photo_storage: Arc<LocalPhotoStorage>,
}

/// Simple health check endpoint
async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// API router with CORS, request ids and request tracing; Swagger is added by the binary
pub fn api_router(services: &AppServices, config: &AppConfig) -> Router {
    Router::new()
        .merge(reports::routes(
            Arc::clone(&services.report_service),
            config.max_request_body_size,
        ))
        .merge(photos::routes(Arc::clone(&services.photo_storage)))
        .route("/health", get(health_check))
        .layer(middleware::cors_layer(&config.cors_allowed_origins))
        // Propagate X-Request-Id to response headers
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(middleware::MakeSpanWithRequestId)
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        // Generate X-Request-Id using UUID v7 (or use client-provided one)
        .layer(SetRequestIdLayer::x_request_id(middleware::MakeRequestUuid))
}
