mod report;
mod report_counts;

pub use report::{CreateReport, ParseReportStatusError, Report, ReportChanges, ReportStatus};
pub use report_counts::ReportCounts;
