/// Public path prefix under which stored photos are served
pub const PHOTO_URL_PREFIX: &str = "/uploads";

/// Filename prefix for stored photos
pub const PHOTO_FILE_PREFIX: &str = "photo";

/// Maximum photo size in bytes (10MB)
pub const MAX_PHOTO_SIZE: usize = 10 * 1024 * 1024;

/// Allowed MIME types for report photos
pub const ALLOWED_PHOTO_MIME_TYPES: &[&str] = &["image/jpeg", "image/png", "image/gif", "image/webp"];

