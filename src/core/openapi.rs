use utoipa::{Modify, OpenApi};

use crate::features::photos::handlers as photos_handlers;
use crate::features::reports::{
    dtos as reports_dtos, handlers as reports_handlers, models as reports_models,
};
use crate::shared::types::{ApiResponse, Meta};

#[derive(OpenApi)]
#[openapi(
    paths(
        // Reports
        reports_handlers::create_report,
        reports_handlers::list_reports,
        reports_handlers::get_summary,
        reports_handlers::get_report,
        reports_handlers::update_report,
        // Photos
        photos_handlers::get_photo,
    ),
    components(
        schemas(
            // Shared
            Meta,
            // Reports
            reports_models::ReportStatus,
            reports_models::ReportCounts,
            reports_dtos::ReportResponseDto,
            reports_dtos::UploadReportDto,
            reports_dtos::UpdateReportDto,
            ApiResponse<reports_dtos::ReportResponseDto>,
            ApiResponse<Vec<reports_dtos::ReportResponseDto>>,
            ApiResponse<reports_models::ReportCounts>,
        )
    ),
    tags(
        (name = "reports", description = "Citizen issue reports"),
        (name = "photos", description = "Stored report photos"),
    ),
    info(
        title = "Civic Reporter API",
        version = "0.1.0",
        description = "API documentation for Civic Reporter",
    )
)]
pub struct ApiDoc;

/// Modifier to override OpenAPI info from config
pub struct SwaggerInfoModifier {
    pub title: String,
    pub version: String,
    pub description: String,
}

impl Modify for SwaggerInfoModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        openapi.info.title = self.title.clone();
        openapi.info.version = self.version.clone();
        openapi.info.description = Some(self.description.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_report_paths() {
        let openapi = ApiDoc::openapi();
        let paths: Vec<&String> = openapi.paths.paths.keys().collect();

        assert!(paths.iter().any(|p| p.as_str() == "/api/reports"));
        assert!(paths.iter().any(|p| p.as_str() == "/api/reports/{id}"));
        assert!(paths.iter().any(|p| p.as_str() == "/uploads/{filename}"));
    }

    #[test]
    fn test_swagger_info_modifier() {
        let mut openapi = ApiDoc::openapi();
        SwaggerInfoModifier {
            title: "Town Hall".to_string(),
            version: "2.0.0".to_string(),
            description: "Issues".to_string(),
        }
        .modify(&mut openapi);

        assert_eq!(openapi.info.title, "Town Hall");
        assert_eq!(openapi.info.version, "2.0.0");
    }
}
