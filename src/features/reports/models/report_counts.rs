use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::features::reports::models::ReportStatus;

/// Aggregate counts over a report collection
///
/// `pending` counts `Submitted` reports. `Rejected` reports only show up in
/// `total`, so `resolved + pending + in_progress <= total` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ReportCounts {
    pub total: usize,
    pub resolved: usize,
    pub pending: usize,
    pub in_progress: usize,
}

impl ReportCounts {
    pub fn from_statuses<I>(statuses: I) -> Self
    where
        I: IntoIterator<Item = ReportStatus>,
    {
        statuses
            .into_iter()
            .fold(Self::default(), |mut counts, status| {
                counts.total += 1;
                match status {
                    ReportStatus::Resolved => counts.resolved += 1,
                    ReportStatus::Submitted => counts.pending += 1,
                    ReportStatus::InProgress => counts.in_progress += 1,
                    ReportStatus::Rejected => {}
                }
                counts
            })
    }

    /// Reports in any status not broken out above
    pub fn other(&self) -> usize {
        self.total - self.resolved - self.pending - self.in_progress
    }
}
