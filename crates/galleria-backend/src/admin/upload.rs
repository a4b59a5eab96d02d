//! Object naming for product image uploads.

use chrono::{DateTime, Utc};

/// Folder inside the bucket that product images are written to.
pub const PRODUCT_IMAGE_FOLDER: &str = "public/products";

const FALLBACK_FILE_NAME: &str = "image";

/// Replace every character outside `[A-Za-z0-9_.-]` with `_`.
///
/// An empty name becomes `image`.
#[must_use]
pub fn sanitize_file_name(name: &str) -> String {
    let safe: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-') {
                c
            } else {
                '_'
            }
        })
        .collect();
    if safe.is_empty() {
        FALLBACK_FILE_NAME.to_string()
    } else {
        safe
    }
}

/// Object path `public/products/{unix_millis}_{random hex}_{safe_name}`.
#[must_use]
pub fn object_path(file_name: &str, now: DateTime<Utc>, nonce: u64) -> String {
    format!(
        "{PRODUCT_IMAGE_FOLDER}/{}_{nonce:x}_{}",
        now.timestamp_millis(),
        sanitize_file_name(file_name)
    )
}

/// [`object_path`] with the current time and a random nonce.
#[must_use]
pub fn fresh_object_path(file_name: &str) -> String {
    object_path(file_name, Utc::now(), rand::random::<u64>())
}

/// Content type from the file extension, defaulting to a generic binary type.
#[must_use]
pub fn guess_content_type(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "avif" => "image/avif",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}
