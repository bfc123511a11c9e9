//! Newest-first view of the images in a store.

use sb_core::Result;

use crate::store::ImageStore;

/// Suffixes (lowercase) recognised as images.
pub const IMAGE_EXTENSIONS: &[&str] = &[".png", ".jpg", ".jpeg", ".gif", ".bmp"];

/// Whether `key` ends in one of [`IMAGE_EXTENSIONS`], ignoring case.
pub fn is_image_key(key: &str) -> bool {
    let lower = key.to_lowercase();
    IMAGE_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// Image keys in the store, newest first.
///
/// Keys start with a fixed-width timestamp, so descending lexicographic
/// order is descending upload time.
pub fn list_images(store: &ImageStore) -> Result<Vec<String>> {
    let mut images: Vec<String> = store
        .list_keys()?
        .into_iter()
        .filter(|key| is_image_key(key))
        .collect();
    images.sort_unstable_by(|a, b| b.cmp(a));
    Ok(images)
}
