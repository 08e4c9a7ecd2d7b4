use axum::{routing::get, Router};
use std::sync::Arc;

use crate::features::photos::handlers::get_photo;
use crate::modules::storage::LocalPhotoStorage;
use crate::shared::constants::PHOTO_URL_PREFIX;

/// Create routes for serving stored photos
pub fn routes(photo_storage: Arc<LocalPhotoStorage>) -> Router {
    Router::new()
        .route(&format!("{}/{{filename}}", PHOTO_URL_PREFIX), get(get_photo))
        .with_state(photo_storage)
}
