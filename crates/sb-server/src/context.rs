//! Application context shared across route handlers via Axum state.

use std::sync::Arc;

use sb_core::config::Config;
use sb_store::ImageStore;

use crate::qr;

/// Everything a handler needs, cheap to clone.
#[derive(Clone)]
pub struct AppContext {
    pub config: Arc<Config>,
    pub store: Arc<ImageStore>,
    /// URL of the mobile upload page as reachable from the phone.
    pub upload_url: Arc<str>,
    /// `data:` URL of the PNG QR code encoding [`upload_url`](Self::upload_url).
    pub qr_code: Arc<str>,
}

impl AppContext {
    /// Build the context, rendering the QR code for `upload_url` once.
    pub fn new(config: Config, store: ImageStore, upload_url: String) -> sb_core::Result<Self> {
        let qr_code = qr::qr_data_url(&upload_url)?;
        Ok(Self {
            config: Arc::new(config),
            store: Arc::new(store),
            upload_url: upload_url.into(),
            qr_code: qr_code.into(),
        })
    }
}
