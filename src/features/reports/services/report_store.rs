use chrono::{DateTime, Duration, Utc};

use crate::core::error::{AppError, Result};
use crate::features::reports::models::{CreateReport, Report, ReportChanges, ReportStatus};

/// Canonical report collection
///
/// Records are kept in creation order and ids are handed out sequentially
/// starting at 1. Ids are never reused since nothing is ever removed.
#[derive(Debug)]
pub struct ReportStore {
    reports: Vec<Report>,
    next_id: i64,
}

impl Default for ReportStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportStore {
    pub fn new() -> Self {
        Self {
            reports: Vec::new(),
            next_id: 1,
        }
    }

    /// Append a new report with status `Submitted`
    pub fn create(&mut self, data: CreateReport) -> Result<Report> {
        let missing = data.missing_fields();
        if !missing.is_empty() {
            return Err(AppError::Validation(format!(
                "Missing required fields: {}",
                missing.join(", ")
            )));
        }

        let now = Utc::now();
        let report = Report {
            id: self.next_id,
            title: data.title.trim().to_string(),
            category: data.category.trim().to_string(),
            priority: data.priority.trim().to_string(),
            location: data.location.trim().to_string(),
            description: data.description.trim().to_string(),
            photo: data.photo,
            user_id: data.user_id,
            status: ReportStatus::Submitted,
            created_at: now,
            updated_at: now,
        };

        self.next_id += 1;
        self.reports.push(report.clone());
        Ok(report)
    }

    /// All reports in creation order
    pub fn list(&self) -> &[Report] {
        &self.reports
    }

    pub fn get(&self, id: i64) -> Option<&Report> {
        self.reports.iter().find(|r| r.id == id)
    }

    /// Apply a partial update and refresh `updated_at`
    pub fn update(&mut self, id: i64, changes: &ReportChanges) -> Result<Report> {
        let report = self
            .reports
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| AppError::NotFound(format!("Report {} not found", id)))?;

        changes.apply(report);
        report.updated_at = next_timestamp(report.updated_at);
        Ok(report.clone())
    }

    /// Rebuild a store from existing records, continuing ids after the highest one
    #[cfg(test)]
    pub fn from_reports(reports: Vec<Report>) -> Self {
        let next_id = reports.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        Self { reports, next_id }
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}

/// Current time, forced strictly past `previous` when the clock hasn't moved
fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    Utc::now().max(previous + Duration::microseconds(1))
}
