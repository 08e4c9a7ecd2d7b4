use std::sync::Arc;

use axum::{extract::DefaultBodyLimit, routing::get, Router};

use crate::features::reports::handlers;
use crate::features::reports::services::ReportService;

/// Headroom on top of the configured body size for multipart boundaries and text fields
const MULTIPART_OVERHEAD: usize = 1024 * 1024;

/// Create routes for the reports feature
///
/// Note: No authentication; the admin view and citizen view share these endpoints.
pub fn routes(report_service: Arc<ReportService>, max_request_body_size: usize) -> Router {
    Router::new()
        .route(
            "/api/reports",
            get(handlers::list_reports).post(handlers::create_report),
        )
        .route("/api/reports/summary", get(handlers::get_summary))
        .route(
            "/api/reports/{id}",
            get(handlers::get_report).put(handlers::update_report),
        )
        .layer(DefaultBodyLimit::max(
            max_request_body_size + MULTIPART_OVERHEAD,
        ))
        .with_state(report_service)
}
