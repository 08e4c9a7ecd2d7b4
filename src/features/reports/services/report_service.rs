use std::sync::Arc;

use tokio::sync::RwLock;
use validator::Validate;

use crate::core::error::{AppError, Result};
use crate::features::reports::dtos::{CreateReportDto, PhotoUpload, UpdateReportDto};
use crate::features::reports::models::{Report, ReportChanges, ReportCounts, ReportStatus};
use crate::features::reports::services::ReportStore;
use crate::modules::storage::LocalPhotoStorage;

/// Service for report operations
///
/// Owns the single report store. Writers hold the lock only for the in-memory
/// step, so id order always matches creation order.
pub struct ReportService {
    store: RwLock<ReportStore>,
    photo_storage: Arc<LocalPhotoStorage>,
}

impl ReportService {
    pub fn new(photo_storage: Arc<LocalPhotoStorage>) -> Self {
        Self {
            store: RwLock::new(ReportStore::new()),
            photo_storage,
        }
    }

    /// Create a report, writing the photo (if any) before the record becomes visible.
    /// Nothing is written when the fields or the photo are rejected.
    pub async fn create(&self, dto: CreateReportDto, photo: Option<PhotoUpload>) -> Result<Report> {
        dto.validate()
            .map_err(|e| AppError::Validation(e.to_string()))?;
        let mut data = dto.into_create_report(None);
        let missing = data.missing_fields();
        if !missing.is_empty() {
            return Err(AppError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }
        if let Some(photo) = &photo {
            photo.validate()?;
        }

        if let Some(photo) = photo {
            let stored = self
                .photo_storage
                .store(&photo.data, &photo.filename)
                .await?;
            data.photo = Some(stored.url);
        }

        let report = self.store.write().await.create(data)?;

        tracing::info!(
            "Created report: id={}, category={}, photo={:?}",
            report.id,
            report.category,
            report.photo
        );

        Ok(report)
    }

    /// All reports in creation order
    pub async fn list(&self) -> Vec<Report> {
        self.store.read().await.list().to_vec()
    }

    pub async fn get_by_id(&self, id: i64) -> Result<Report> {
        self.store
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Report {} not found", id)))
    }

    /// Apply a partial update from the API
    pub async fn update(&self, id: i64, dto: UpdateReportDto) -> Result<Report> {
        let changes = dto.into_changes()?;
        self.apply_changes(id, &changes).await
    }

    pub async fn update_status(&self, id: i64, status: ReportStatus) -> Result<Report> {
        self.apply_changes(id, &ReportChanges::status(status)).await
    }

    /// Counts over the whole collection
    pub async fn summary(&self) -> ReportCounts {
        ReportCounts::from_statuses(self.store.read().await.list().iter().map(|r| r.status))
    }

    async fn apply_changes(&self, id: i64, changes: &ReportChanges) -> Result<Report> {
        let report = self
            .store
            .write()
            .await
            .update(id, changes)
            .inspect_err(|e| tracing::debug!("Report update rejected: {}", e))?;

        tracing::info!("Updated report: id={}, status={}", report.id, report.status);
        Ok(report)
    }
}
