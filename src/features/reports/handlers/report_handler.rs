use std::sync::Arc;

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use tracing::debug;

use crate::core::error::{AppError, Result};
use crate::core::extractor::ValidatedJson;
use crate::features::reports::dtos::{
    CreateReportDto, PhotoUpload, ReportResponseDto, UpdateReportDto, UploadReportDto,
};
use crate::features::reports::models::ReportCounts;
use crate::features::reports::services::ReportService;
use crate::shared::types::ApiResponse;

/// Submit a new report
///
/// Accepts multipart/form-data with the five required text fields, an optional
/// `user_id` owner tag and an optional `photo` file.
#[utoipa::path(
    post,
    path = "/api/reports",
    tag = "reports",
    request_body(
        content = UploadReportDto,
        content_type = "multipart/form-data",
        description = "Report fields with an optional photo",
    ),
    responses(
        (status = 201, description = "Report created", body = ApiResponse<ReportResponseDto>),
        (status = 400, description = "Missing required fields or invalid photo")
    )
)]
pub async fn create_report(
    State(service): State<Arc<ReportService>>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<ReportResponseDto>>)> {
    let mut dto = CreateReportDto::default();
    let mut photo: Option<PhotoUpload> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        debug!("Failed to read multipart field: {}", e);
        AppError::BadRequest(format!("Failed to read multipart data: {}", e))
    })? {
        let field_name = field.name().unwrap_or("").to_string();

        if field_name == "photo" {
            let filename = field.file_name().unwrap_or("").to_string();
            let content_type = field
                .content_type()
                .unwrap_or("application/octet-stream")
                .to_string();
            let data = field.bytes().await.map_err(|e| {
                debug!("Failed to read photo bytes: {}", e);
                AppError::BadRequest(format!("Failed to read photo data: {}", e))
            })?;

            // Browsers send an empty part when no file was chosen
            if filename.is_empty() && data.is_empty() {
                continue;
            }

            photo = Some(PhotoUpload {
                filename,
                content_type,
                data: data.to_vec(),
            });
            continue;
        }

        let text = field.text().await.map_err(|e| {
            AppError::BadRequest(format!("Failed to read field '{}': {}", field_name, e))
        })?;
        if !dto.set_field(&field_name, &text) {
            debug!("Ignoring unknown field: {}", field_name);
        }
    }

    let report = service.create(dto, photo).await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(report.into()), None, None)),
    ))
}

/// List all reports in creation order
#[utoipa::path(
    get,
    path = "/api/reports",
    tag = "reports",
    responses(
        (status = 200, description = "All reports", body = ApiResponse<Vec<ReportResponseDto>>)
    )
)]
pub async fn list_reports(
    State(service): State<Arc<ReportService>>,
) -> Result<Json<ApiResponse<Vec<ReportResponseDto>>>> {
    let dtos: Vec<ReportResponseDto> = service.list().await.into_iter().map(Into::into).collect();
    Ok(Json(ApiResponse::listed(dtos)))
}

/// Report counts for the summary views
#[utoipa::path(
    get,
    path = "/api/reports/summary",
    tag = "reports",
    responses(
        (status = 200, description = "Report counts", body = ApiResponse<ReportCounts>)
    )
)]
pub async fn get_summary(
    State(service): State<Arc<ReportService>>,
) -> Result<Json<ApiResponse<ReportCounts>>> {
    let counts = service.summary().await;
    Ok(Json(ApiResponse::success(Some(counts), None, None)))
}

/// Get report by ID
#[utoipa::path(
    get,
    path = "/api/reports/{id}",
    tag = "reports",
    params(
        ("id" = i64, Path, description = "Report ID")
    ),
    responses(
        (status = 200, description = "Report found", body = ApiResponse<ReportResponseDto>),
        (status = 404, description = "Report not found")
    )
)]
pub async fn get_report(
    State(service): State<Arc<ReportService>>,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<ReportResponseDto>>> {
    let report = service.get_by_id(id).await?;
    Ok(Json(ApiResponse::success(Some(report.into()), None, None)))
}

/// Update a report's status and/or text fields
#[utoipa::path(
    put,
    path = "/api/reports/{id}",
    tag = "reports",
    params(
        ("id" = i64, Path, description = "Report ID")
    ),
    request_body = UpdateReportDto,
    responses(
        (status = 200, description = "Report updated", body = ApiResponse<ReportResponseDto>),
        (status = 400, description = "Invalid status or empty field"),
        (status = 404, description = "Report not found")
    )
)]
pub async fn update_report(
    State(service): State<Arc<ReportService>>,
    Path(id): Path<i64>,
    ValidatedJson(dto): ValidatedJson<UpdateReportDto>,
) -> Result<Json<ApiResponse<ReportResponseDto>>> {
    let report = service.update(id, dto).await?;
    Ok(Json(ApiResponse::success(Some(report.into()), None, None)))
}
