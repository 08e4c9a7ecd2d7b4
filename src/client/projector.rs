use crate::client::api::{ClientError, NewReport, ReportsApi};
use crate::core::config::ClientConfig;
use crate::features::reports::dtos::{ReportResponseDto, UpdateReportDto};
use crate::features::reports::models::{ReportCounts, ReportStatus};

/// Which records a view may show
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ViewScope {
    /// Reports owned by the viewer, plus every report with no owner tag
    MyReports,
    /// Every report
    #[default]
    Admin,
}

/// Predicates for a filtered view; all of them must match
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportFilter {
    search: String,
    status: Option<ReportStatus>,
    category: Option<String>,
    scope: ViewScope,
}

impl ReportFilter {
    pub fn new(scope: ViewScope) -> Self {
        Self {
            scope,
            ..Self::default()
        }
    }

    /// Case-insensitive term matched against title, description or location
    pub fn search(mut self, term: &str) -> Self {
        self.search = term.to_lowercase();
        self
    }

    pub fn status(mut self, status: Option<ReportStatus>) -> Self {
        self.status = status;
        self
    }

    /// Exact category; an empty string means no category filter
    pub fn category(mut self, category: Option<&str>) -> Self {
        self.category = category.filter(|c| !c.is_empty()).map(str::to_string);
        self
    }

    pub fn matches(&self, report: &ReportResponseDto, viewer_id: &str) -> bool {
        self.matches_search(report)
            && self.status.is_none_or(|status| report.status == status)
            && self
                .category
                .as_deref()
                .is_none_or(|category| report.category == category)
            && self.matches_scope(report, viewer_id)
    }

    fn matches_search(&self, report: &ReportResponseDto) -> bool {
        self.search.is_empty()
            || [&report.title, &report.description, &report.location]
                .iter()
                .any(|field| field.to_lowercase().contains(&self.search))
    }

    fn matches_scope(&self, report: &ReportResponseDto, viewer_id: &str) -> bool {
        match self.scope {
            ViewScope::Admin => true,
            // Untagged reports are visible to every viewer
            ViewScope::MyReports => report
                .user_id
                .as_deref()
                .is_none_or(|owner| owner == viewer_id),
        }
    }
}

/// Client-side cache of the report collection with derived views
///
/// The cache is only ever replaced wholesale by [`ViewProjector::refresh`] or
/// patched at one id by [`ViewProjector::apply_update_result`].
pub struct ViewProjector<A> {
    api: A,
    viewer_id: String,
    reports: Vec<ReportResponseDto>,
}

impl<A: ReportsApi> ViewProjector<A> {
    pub fn new(api: A, viewer_id: impl Into<String>) -> Self {
        Self {
            api,
            viewer_id: viewer_id.into(),
            reports: Vec::new(),
        }
    }

    /// Projector for the viewer configured in `CIVIC_VIEWER_ID`
    pub fn from_config(api: A, config: &ClientConfig) -> Self {
        Self::new(api, config.viewer_id.clone())
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn viewer_id(&self) -> &str {
        &self.viewer_id
    }

    /// Cached reports in creation order
    pub fn reports(&self) -> &[ReportResponseDto] {
        &self.reports
    }

    /// Replace the cache with the current collection. On failure the previous
    /// contents stay in place.
    pub async fn refresh(&mut self) -> Result<(), ClientError> {
        self.reports = self.api.list_reports().await?;
        tracing::debug!("Report cache refreshed: {} reports", self.reports.len());
        Ok(())
    }

    /// Replace the cached record with the same id. Returns false when the id
    /// isn't cached, in which case nothing changes.
    pub fn apply_update_result(&mut self, updated: ReportResponseDto) -> bool {
        match self.reports.iter_mut().find(|r| r.id == updated.id) {
            Some(slot) => {
                *slot = updated;
                true
            }
            None => {
                tracing::warn!("Update result for uncached report {}", updated.id);
                false
            }
        }
    }

    /// Submit a report, then reload the whole cache
    pub async fn submit(&mut self, report: &NewReport) -> Result<ReportResponseDto, ClientError> {
        let created = self.api.create_report(report).await?;
        tracing::info!("Report submitted: id={}", created.id);
        self.refresh().await?;
        Ok(created)
    }

    /// Change a report's status, then patch the cached copy
    pub async fn update_status(
        &mut self,
        id: i64,
        status: ReportStatus,
    ) -> Result<ReportResponseDto, ClientError> {
        let updated = self
            .api
            .update_report(id, &UpdateReportDto::status(status))
            .await?;
        tracing::info!("Report {} status updated to {}", id, status);
        self.apply_update_result(updated.clone());
        Ok(updated)
    }

    /// Lazily iterate cached reports matching `filter`; the iterator can be
    /// cloned to run the same view again
    pub fn filter<'a>(
        &'a self,
        filter: &'a ReportFilter,
    ) -> impl Iterator<Item = &'a ReportResponseDto> + Clone + 'a {
        let viewer_id = self.viewer_id.as_str();
        self.reports
            .iter()
            .filter(move |report| filter.matches(report, viewer_id))
    }

    /// Counts over the full cache, not a filtered subset
    pub fn compute_counts(&self) -> ReportCounts {
        ReportCounts::from_statuses(self.reports.iter().map(|r| r.status))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use tempfile::TempDir;

    use crate::core::config::StorageConfig;
    use crate::core::error::AppError;
    use crate::features::reports::dtos::CreateReportDto;
    use crate::features::reports::ReportService;
    use crate::modules::storage::LocalPhotoStorage;

    /// In-process API backed directly by a `ReportService`, with a switch to
    /// simulate network failures
    struct InProcessApi {
        service: ReportService,
        offline: AtomicBool,
        _upload_dir: TempDir,
    }

    impl InProcessApi {
        async fn new() -> Self {
            let upload_dir = TempDir::new().unwrap();
            let storage = LocalPhotoStorage::new(StorageConfig {
                upload_dir: upload_dir.path().to_path_buf(),
            })
            .await
            .unwrap();
            Self {
                service: ReportService::new(Arc::new(storage)),
                offline: AtomicBool::new(false),
                _upload_dir: upload_dir,
            }
        }

        fn check_online(&self) -> Result<(), ClientError> {
            if self.offline.load(Ordering::SeqCst) {
                return Err(ClientError::Decode("offline".to_string()));
            }
            Ok(())
        }
    }

    fn to_client_error(e: AppError) -> ClientError {
        let status = match e {
            AppError::NotFound(_) => 404,
            AppError::Validation(_) | AppError::BadRequest(_) => 400,
            _ => 500,
        };
        ClientError::Api {
            status,
            message: e.to_string(),
        }
    }

    #[async_trait]
    impl ReportsApi for InProcessApi {
        async fn list_reports(&self) -> Result<Vec<ReportResponseDto>, ClientError> {
            self.check_online()?;
            Ok(self.service.list().await.into_iter().map(Into::into).collect())
        }

        async fn create_report(&self, report: &NewReport) -> Result<ReportResponseDto, ClientError> {
            self.check_online()?;
            let dto = CreateReportDto {
                title: report.title.clone(),
                category: report.category.clone(),
                priority: report.priority.clone(),
                location: report.location.clone(),
                description: report.description.clone(),
                user_id: report.user_id.clone(),
            };
            self.service
                .create(dto, report.photo.clone())
                .await
                .map(Into::into)
                .map_err(to_client_error)
        }

        async fn update_report(
            &self,
            id: i64,
            changes: &UpdateReportDto,
        ) -> Result<ReportResponseDto, ClientError> {
            self.check_online()?;
            self.service
                .update(id, changes.clone())
                .await
                .map(Into::into)
                .map_err(to_client_error)
        }
    }

    fn report(title: &str, category: &str, description: &str, location: &str) -> NewReport {
        NewReport {
            title: title.to_string(),
            category: category.to_string(),
            priority: "High".to_string(),
            location: location.to_string(),
            description: description.to_string(),
            ..NewReport::default()
        }
    }

    fn owned(mut new_report: NewReport, owner: &str) -> NewReport {
        new_report.user_id = Some(owner.to_string());
        new_report
    }

    async fn projector() -> ViewProjector<InProcessApi> {
        ViewProjector::new(InProcessApi::new().await, "user1")
    }

    fn titles<'a>(reports: impl Iterator<Item = &'a ReportResponseDto>) -> Vec<&'a str> {
        reports.map(|r| r.title.as_str()).collect()
    }

    #[tokio::test]
    async fn test_submit_refreshes_cache() {
        let mut projector = projector().await;
        assert!(projector.reports().is_empty());

        let created = projector
            .submit(&report("Pothole", "Roads", "Deep hole", "Main St"))
            .await
            .unwrap();

        assert_eq!(projector.reports(), &[created]);
    }

    #[tokio::test]
    async fn test_counts_scenario() {
        let mut projector = projector().await;
        for title in ["A", "B", "C"] {
            projector
                .submit(&report(title, "Roads", "x", "y"))
                .await
                .unwrap();
        }
        projector
            .update_status(2, ReportStatus::Resolved)
            .await
            .unwrap();
        projector
            .update_status(3, ReportStatus::InProgress)
            .await
            .unwrap();

        assert_eq!(
            projector.compute_counts(),
            ReportCounts {
                total: 3,
                resolved: 1,
                pending: 1,
                in_progress: 1,
            }
        );
    }

    #[tokio::test]
    async fn test_counts_cover_full_cache_not_filtered_view() {
        let mut projector = projector().await;
        projector
            .submit(&report("A", "Roads", "x", "y"))
            .await
            .unwrap();
        projector
            .submit(&owned(report("B", "Parks", "x", "y"), "someone-else"))
            .await
            .unwrap();
        projector
            .update_status(2, ReportStatus::Rejected)
            .await
            .unwrap();

        let filter = ReportFilter::new(ViewScope::MyReports);
        assert_eq!(projector.filter(&filter).count(), 1);

        let counts = projector.compute_counts();
        assert_eq!(counts.total, 2);
        assert!(counts.resolved + counts.pending + counts.in_progress <= counts.total);
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_over_text_fields() {
        let mut projector = projector().await;
        projector
            .submit(&report("Road damage", "Roads", "Large pothole on Main St", "Downtown"))
            .await
            .unwrap();
        projector
            .submit(&report("Graffiti", "Vandalism", "Paint on wall", "Bridge"))
            .await
            .unwrap();
        projector
            .submit(&report("Bench", "Parks", "Broken seat", "Next to POTHOLE cafe"))
            .await
            .unwrap();

        let filter = ReportFilter::new(ViewScope::Admin).search("pothole");
        assert_eq!(
            titles(projector.filter(&filter)),
            vec!["Road damage", "Bench"]
        );

        let by_title = ReportFilter::new(ViewScope::Admin).search("GRAFF");
        assert_eq!(titles(projector.filter(&by_title)), vec!["Graffiti"]);
    }

    #[tokio::test]
    async fn test_empty_filter_matches_everything_in_order() {
        let mut projector = projector().await;
        for title in ["A", "B", "C"] {
            projector
                .submit(&report(title, "Roads", "x", "y"))
                .await
                .unwrap();
        }

        let filter = ReportFilter::new(ViewScope::Admin);
        assert_eq!(titles(projector.filter(&filter)), vec!["A", "B", "C"]);
    }

    #[tokio::test]
    async fn test_status_and_category_filters() {
        let mut projector = projector().await;
        projector
            .submit(&report("A", "Roads", "x", "y"))
            .await
            .unwrap();
        projector
            .submit(&report("B", "Parks", "x", "y"))
            .await
            .unwrap();
        projector
            .submit(&report("C", "Roads", "x", "y"))
            .await
            .unwrap();
        projector
            .update_status(3, ReportStatus::InProgress)
            .await
            .unwrap();

        let roads = ReportFilter::new(ViewScope::Admin).category(Some("Roads"));
        assert_eq!(titles(projector.filter(&roads)), vec!["A", "C"]);

        let roads_in_progress = roads.clone().status(Some(ReportStatus::InProgress));
        assert_eq!(titles(projector.filter(&roads_in_progress)), vec!["C"]);

        let empty_category = ReportFilter::new(ViewScope::Admin).category(Some(""));
        assert_eq!(projector.filter(&empty_category).count(), 3);

        // Category match is exact
        let lower = ReportFilter::new(ViewScope::Admin).category(Some("roads"));
        assert_eq!(projector.filter(&lower).count(), 0);
    }

    #[tokio::test]
    async fn test_my_reports_scope() {
        let mut projector = projector().await;
        projector
            .submit(&report("Untagged", "Roads", "x", "y"))
            .await
            .unwrap();
        projector
            .submit(&owned(report("Mine", "Roads", "x", "y"), "user1"))
            .await
            .unwrap();
        projector
            .submit(&owned(report("Theirs", "Roads", "x", "y"), "user2"))
            .await
            .unwrap();

        let mine = ReportFilter::new(ViewScope::MyReports);
        assert_eq!(titles(projector.filter(&mine)), vec!["Untagged", "Mine"]);

        let admin = ReportFilter::new(ViewScope::Admin);
        assert_eq!(
            titles(projector.filter(&admin)),
            vec!["Untagged", "Mine", "Theirs"]
        );
    }

    #[tokio::test]
    async fn test_from_config_scopes_my_reports_to_configured_viewer() {
        let config = ClientConfig {
            viewer_id: "user2".to_string(),
            ..ClientConfig::with_api_base("http://localhost:3001/api")
        };
        let mut projector = ViewProjector::from_config(InProcessApi::new().await, &config);
        projector
            .submit(&owned(report("Mine", "Roads", "x", "y"), "user1"))
            .await
            .unwrap();
        projector
            .submit(&owned(report("Theirs", "Roads", "x", "y"), "user2"))
            .await
            .unwrap();

        assert_eq!(projector.viewer_id(), "user2");
        let mine = ReportFilter::new(ViewScope::MyReports);
        assert_eq!(titles(projector.filter(&mine)), vec!["Theirs"]);
    }

    #[tokio::test]
    async fn test_filter_is_restartable_and_idempotent() {
        let mut projector = projector().await;
        for title in ["Pothole A", "Light", "Pothole B"] {
            projector
                .submit(&report(title, "Roads", "x", "y"))
                .await
                .unwrap();
        }

        let filter = ReportFilter::new(ViewScope::Admin).search("pothole");
        let view = projector.filter(&filter);
        let first = titles(view.clone());
        let second = titles(view);
        let third = titles(projector.filter(&filter));

        assert_eq!(first, vec!["Pothole A", "Pothole B"]);
        assert_eq!(first, second);
        assert_eq!(first, third);
    }

    #[tokio::test]
    async fn test_update_status_patches_cache_in_place() {
        let mut projector = projector().await;
        projector
            .submit(&report("A", "Roads", "x", "y"))
            .await
            .unwrap();
        projector
            .submit(&report("B", "Roads", "x", "y"))
            .await
            .unwrap();

        let updated = projector
            .update_status(1, ReportStatus::Resolved)
            .await
            .unwrap();

        assert_eq!(projector.reports().len(), 2);
        assert_eq!(projector.reports()[0], updated);
        assert_eq!(projector.reports()[1].status, ReportStatus::Submitted);
    }

    #[tokio::test]
    async fn test_apply_update_result_for_uncached_id() {
        let mut projector = projector().await;
        let created = projector
            .submit(&report("A", "Roads", "x", "y"))
            .await
            .unwrap();
        let before = projector.reports().to_vec();

        let stray = ReportResponseDto {
            id: 99,
            status: ReportStatus::Rejected,
            ..created
        };

        assert!(!projector.apply_update_result(stray));
        assert_eq!(projector.reports(), before.as_slice());
    }

    #[tokio::test]
    async fn test_update_unknown_id_leaves_cache() {
        let mut projector = projector().await;
        projector
            .submit(&report("A", "Roads", "x", "y"))
            .await
            .unwrap();
        let before = projector.reports().to_vec();

        let err = projector
            .update_status(2, ReportStatus::Resolved)
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(projector.reports(), before.as_slice());
    }

    #[tokio::test]
    async fn test_failed_refresh_keeps_last_known_good_cache() {
        let mut projector = projector().await;
        projector
            .submit(&report("A", "Roads", "x", "y"))
            .await
            .unwrap();
        let before = projector.reports().to_vec();

        projector.api().offline.store(true, Ordering::SeqCst);
        assert!(projector.refresh().await.is_err());
        assert_eq!(projector.reports(), before.as_slice());
    }

    #[tokio::test]
    async fn test_rejected_submit_leaves_cache() {
        let mut projector = projector().await;
        projector
            .submit(&report("A", "Roads", "x", "y"))
            .await
            .unwrap();

        let err = projector
            .submit(&report("", "Roads", "x", "y"))
            .await
            .unwrap_err();

        assert!(err.is_rejected());
        assert_eq!(projector.reports().len(), 1);
    }
}
