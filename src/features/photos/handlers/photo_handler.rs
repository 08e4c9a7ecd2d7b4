use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
};

use crate::core::error::Result;
use crate::modules::storage::{content_type_for, LocalPhotoStorage};

/// Serve a stored report photo
///
/// The path is the reference returned in a report's `photo` field.
#[utoipa::path(
    get,
    path = "/uploads/{filename}",
    tag = "photos",
    params(
        ("filename" = String, Path, description = "Generated photo filename")
    ),
    responses(
        (status = 200, description = "Photo bytes"),
        (status = 400, description = "Malformed photo name"),
        (status = 404, description = "Photo not found")
    )
)]
pub async fn get_photo(
    State(storage): State<Arc<LocalPhotoStorage>>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse> {
    let data = storage.load(&filename).await?;

    Ok((
        [
            (header::CONTENT_TYPE, content_type_for(&filename)),
            // Stored photos are never rewritten under the same name
            (header::CACHE_CONTROL, "public, max-age=31536000, immutable"),
        ],
        data,
    ))
}
