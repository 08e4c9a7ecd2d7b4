use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::reports::models::{CreateReport, Report, ReportChanges, ReportStatus};
use crate::shared::constants::{ALLOWED_PHOTO_MIME_TYPES, MAX_PHOTO_SIZE};
use crate::shared::validation::non_blank;

/// Response DTO for report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReportResponseDto {
    pub id: i64,
    pub title: String,
    pub category: String,
    pub priority: String,
    pub location: String,
    pub description: String,
    /// Photo reference (`/uploads/...`), null when no photo was attached
    pub photo: Option<String>,
    /// Owner tag, null when the submitter gave none
    #[serde(default)]
    pub user_id: Option<String>,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Report> for ReportResponseDto {
    fn from(r: Report) -> Self {
        Self {
            id: r.id,
            title: r.title,
            category: r.category,
            priority: r.priority,
            location: r.location,
            description: r.description,
            photo: r.photo,
            user_id: r.user_id,
            status: r.status,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

/// Text fields of a new report, collected from the multipart form
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateReportDto {
    #[validate(length(min = 1, message = "title is required"))]
    pub title: String,

    #[validate(length(min = 1, message = "category is required"))]
    pub category: String,

    #[validate(length(min = 1, message = "priority is required"))]
    pub priority: String,

    #[validate(length(min = 1, message = "location is required"))]
    pub location: String,

    #[validate(length(min = 1, message = "description is required"))]
    pub description: String,

    pub user_id: Option<String>,
}

impl CreateReportDto {
    /// Set a form field by name, trimming surrounding whitespace.
    /// Returns false for names that aren't report fields.
    pub fn set_field(&mut self, name: &str, value: &str) -> bool {
        let value = value.trim().to_string();
        match name {
            "title" => self.title = value,
            "category" => self.category = value,
            "priority" => self.priority = value,
            "location" => self.location = value,
            "description" => self.description = value,
            "user_id" => self.user_id = (!value.is_empty()).then_some(value),
            _ => return false,
        }
        true
    }

    pub fn into_create_report(self, photo: Option<String>) -> CreateReport {
        CreateReport {
            title: self.title,
            category: self.category,
            priority: self.priority,
            location: self.location,
            description: self.description,
            photo,
            user_id: self.user_id,
        }
    }
}

/// Photo attached to a new report
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoUpload {
    pub filename: String,
    pub content_type: String,
    pub data: Vec<u8>,
}

impl PhotoUpload {
    pub fn validate(&self) -> Result<()> {
        if self.data.len() > MAX_PHOTO_SIZE {
            return Err(AppError::BadRequest(format!(
                "Photo too large. Maximum size is {} bytes ({} MB)",
                MAX_PHOTO_SIZE,
                MAX_PHOTO_SIZE / 1024 / 1024
            )));
        }

        if !ALLOWED_PHOTO_MIME_TYPES.contains(&self.content_type.as_str()) {
            return Err(AppError::BadRequest(format!(
                "Photo type '{}' is not allowed. Allowed types: {}",
                self.content_type,
                ALLOWED_PHOTO_MIME_TYPES.join(", ")
            )));
        }

        Ok(())
    }
}

/// Create report request for OpenAPI documentation
/// Note: The handler reads the multipart form directly.
#[derive(Debug, ToSchema)]
#[allow(dead_code)]
pub struct UploadReportDto {
    #[schema(example = "Pothole on Main St")]
    pub title: String,
    #[schema(example = "Roads")]
    pub category: String,
    #[schema(example = "High")]
    pub priority: String,
    #[schema(example = "Main St & 5th Ave")]
    pub location: String,
    #[schema(example = "Large pothole in the right lane")]
    pub description: String,
    /// Optional owner tag for the "my reports" view
    pub user_id: Option<String>,
    /// Optional photo (JPEG, PNG, GIF or WebP, max 10MB)
    #[schema(format = Binary, content_media_type = "application/octet-stream")]
    pub photo: Option<String>,
}

/// Request DTO for updating a report; absent fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate, ToSchema)]
pub struct UpdateReportDto {
    /// One of "Submitted", "In Progress", "Resolved", "Rejected"
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[schema(example = "In Progress")]
    pub status: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "title must not be empty"))]
    pub title: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "category must not be empty"))]
    pub category: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "priority must not be empty"))]
    pub priority: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "location must not be empty"))]
    pub location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[validate(length(min = 1, message = "description must not be empty"))]
    pub description: Option<String>,
}

impl UpdateReportDto {
    pub fn status(status: ReportStatus) -> Self {
        Self {
            status: Some(status.to_string()),
            ..Self::default()
        }
    }

    /// Parse into typed changes. Unknown statuses and blank text fields are
    /// validation errors.
    pub fn into_changes(self) -> Result<ReportChanges> {
        let status = self
            .status
            .map(|s| s.trim().parse::<ReportStatus>())
            .transpose()
            .map_err(|e| AppError::Validation(e.to_string()))?;

        Ok(ReportChanges {
            status,
            title: present("title", self.title)?,
            category: present("category", self.category)?,
            priority: present("priority", self.priority)?,
            location: present("location", self.location)?,
            description: present("description", self.description)?,
        })
    }
}

fn present(name: &str, value: Option<String>) -> Result<Option<String>> {
    match value {
        None => Ok(None),
        Some(v) => non_blank(&v)
            .map(Some)
            .ok_or_else(|| AppError::Validation(format!("{} must not be empty", name))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_field_trims_and_ignores_unknown() {
        let mut dto = CreateReportDto::default();
        assert!(dto.set_field("title", "  Broken bench "));
        assert!(dto.set_field("user_id", "   "));
        assert!(!dto.set_field("photo_caption", "x"));

        assert_eq!(dto.title, "Broken bench");
        assert_eq!(dto.user_id, None);
    }

    #[test]
    fn test_create_dto_requires_all_fields() {
        let mut dto = CreateReportDto::default();
        dto.set_field("title", "Broken bench");
        dto.set_field("category", "Parks");
        dto.set_field("priority", "Low");
        dto.set_field("location", "Central Park");
        assert!(dto.validate().is_err());

        dto.set_field("description", "Seat plank missing");
        assert!(dto.validate().is_ok());
    }

    #[test]
    fn test_long_text_is_accepted() {
        let create = CreateReportDto {
            title: "t".repeat(1_000),
            category: "c".repeat(300),
            priority: "High".to_string(),
            location: "l".repeat(600),
            description: "d".repeat(20_000),
            user_id: Some("u".repeat(400)),
        };
        assert!(create.validate().is_ok());

        let update = UpdateReportDto {
            title: Some("t".repeat(1_000)),
            description: Some("d".repeat(20_000)),
            ..UpdateReportDto::default()
        };
        assert!(update.validate().is_ok());
        assert!(update.into_changes().is_ok());
    }

    #[test]
    fn test_photo_validation() {
        let photo = PhotoUpload {
            filename: "a.png".to_string(),
            content_type: "image/png".to_string(),
            data: vec![0; 16],
        };
        assert!(photo.validate().is_ok());

        let pdf = PhotoUpload {
            content_type: "application/pdf".to_string(),
            ..photo.clone()
        };
        assert!(matches!(pdf.validate(), Err(AppError::BadRequest(_))));

        let huge = PhotoUpload {
            data: vec![0; MAX_PHOTO_SIZE + 1],
            ..photo
        };
        assert!(matches!(huge.validate(), Err(AppError::BadRequest(_))));
    }

    #[test]
    fn test_update_into_changes() {
        let dto = UpdateReportDto {
            status: Some("In Progress".to_string()),
            location: Some(" Elm St ".to_string()),
            ..UpdateReportDto::default()
        };
        let changes = dto.into_changes().unwrap();
        assert_eq!(changes.status, Some(ReportStatus::InProgress));
        assert_eq!(changes.location, Some("Elm St".to_string()));
        assert_eq!(changes.title, None);
    }

    #[test]
    fn test_update_rejects_unknown_status() {
        let dto = UpdateReportDto {
            status: Some("Closed".to_string()),
            ..UpdateReportDto::default()
        };
        assert!(matches!(dto.into_changes(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_update_rejects_blank_text() {
        let dto = UpdateReportDto {
            title: Some("   ".to_string()),
            ..UpdateReportDto::default()
        };
        assert!(matches!(dto.into_changes(), Err(AppError::Validation(_))));
    }

    #[test]
    fn test_update_status_serializes_only_status() {
        let json =
            serde_json::to_value(UpdateReportDto::status(ReportStatus::Resolved)).unwrap();
        assert_eq!(json, serde_json::json!({ "status": "Resolved" }));
    }
}
