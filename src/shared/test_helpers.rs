#[cfg(test)]
use crate::app::{api_router, AppServices};
#[cfg(test)]
use crate::core::config::{AppConfig, StorageConfig};
#[cfg(test)]
use crate::features::reports::ReportService;
#[cfg(test)]
use crate::modules::storage::LocalPhotoStorage;
#[cfg(test)]
use axum_test::TestServer;
#[cfg(test)]
use std::sync::Arc;
#[cfg(test)]
use tempfile::TempDir;

/// Full API router over a fresh store and a temporary upload directory
#[cfg(test)]
pub struct TestApp {
    pub server: TestServer,
    pub photo_storage: Arc<LocalPhotoStorage>,
    upload_dir: TempDir,
}

#[cfg(test)]
impl TestApp {
    pub async fn new() -> Self {
        let upload_dir = TempDir::new().unwrap();
        let services = test_services(&upload_dir).await;
        let server = TestServer::new(api_router(&services, &AppConfig::default())).unwrap();

        Self {
            server,
            photo_storage: Arc::clone(&services.photo_storage),
            upload_dir,
        }
    }

    /// Number of files currently in the upload directory
    pub fn photo_count(&self) -> usize {
        std::fs::read_dir(self.upload_dir.path()).unwrap().count()
    }
}

#[cfg(test)]
pub async fn test_services(upload_dir: &TempDir) -> AppServices {
    let photo_storage = Arc::new(
        LocalPhotoStorage::new(StorageConfig {
            upload_dir: upload_dir.path().to_path_buf(),
        })
        .await
        .unwrap(),
    );
    let report_service = Arc::new(ReportService::new(Arc::clone(&photo_storage)));

    AppServices {
        report_service,
        photo_storage,
    }
}
