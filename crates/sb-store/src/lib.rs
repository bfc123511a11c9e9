//! sb-store: directory-backed storage for uploaded images.
//!
//! - [`naming`] derives a timestamp-prefixed storage key for each upload
//! - [`store::ImageStore`] owns the flat upload directory
//! - [`listing`] produces the newest-first, image-only view of the store

pub mod listing;
pub mod naming;
pub mod store;

pub use listing::{is_image_key, list_images, IMAGE_EXTENSIONS};
pub use naming::{sanitize_filename, storage_key, storage_key_now};
pub use store::ImageStore;
