use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// Regex for stored photo filenames as generated at upload time
    /// `photo-<unix millis>-<random>` with an optional extension
    /// - Valid: "photo-1718000000000-42.jpg", "photo-1-999999999", "photo-5-7.JPEG"
    /// - Invalid: "../secret", "photo-abc-1.jpg", "photo-1-2.tar.gz", "photo-1-2."
    pub static ref PHOTO_FILENAME_REGEX: Regex =
        Regex::new(r"^photo-[0-9]+-[0-9]+(?:\.[A-Za-z0-9]{1,10})?$").unwrap();
}

/// Trim a required text field, returning `None` when nothing remains
pub fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
