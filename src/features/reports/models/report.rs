use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use utoipa::ToSchema;

/// Lifecycle stage of a report
///
/// Any status may move to any other; `Submitted` is the only initial state.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema,
)]
pub enum ReportStatus {
    #[default]
    Submitted,
    #[serde(rename = "In Progress")]
    InProgress,
    Resolved,
    Rejected,
}

impl ReportStatus {
    pub const ALL: [ReportStatus; 4] = [
        ReportStatus::Submitted,
        ReportStatus::InProgress,
        ReportStatus::Resolved,
        ReportStatus::Rejected,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Submitted => "Submitted",
            ReportStatus::InProgress => "In Progress",
            ReportStatus::Resolved => "Resolved",
            ReportStatus::Rejected => "Rejected",
        }
    }
}

impl std::fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid status '{0}'. Allowed values: Submitted, In Progress, Resolved, Rejected")]
pub struct ParseReportStatusError(pub String);

impl FromStr for ReportStatus {
    type Err = ParseReportStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ReportStatus::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| ParseReportStatusError(s.to_string()))
    }
}

/// In-memory model for a citizen report
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub id: i64,
    pub title: String,
    pub category: String,
    pub priority: String,
    pub location: String,
    pub description: String,
    /// Public reference of the attached photo, e.g. `/uploads/photo-...jpg`
    pub photo: Option<String>,
    /// Owner tag used by the "my reports" view
    pub user_id: Option<String>,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Data for creating a new report
#[derive(Debug, Clone, Default)]
pub struct CreateReport {
    pub title: String,
    pub category: String,
    pub priority: String,
    pub location: String,
    pub description: String,
    pub photo: Option<String>,
    pub user_id: Option<String>,
}

impl CreateReport {
    /// Names of required fields that are empty or whitespace only
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("title", &self.title),
            ("category", &self.category),
            ("priority", &self.priority),
            ("location", &self.location),
            ("description", &self.description),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

/// Partial update; `None` leaves the field untouched
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportChanges {
    pub status: Option<ReportStatus>,
    pub title: Option<String>,
    pub category: Option<String>,
    pub priority: Option<String>,
    pub location: Option<String>,
    pub description: Option<String>,
}

impl ReportChanges {
    pub fn status(status: ReportStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    pub fn apply(&self, report: &mut Report) {
        if let Some(status) = self.status {
            report.status = status;
        }

        let text_fields = [
            (&mut report.title, &self.title),
            (&mut report.category, &self.category),
            (&mut report.priority, &self.priority),
            (&mut report.location, &self.location),
            (&mut report.description, &self.description),
        ];
        for (target, change) in text_fields {
            if let Some(value) = change {
                *target = value.clone();
            }
        }
    }
}
