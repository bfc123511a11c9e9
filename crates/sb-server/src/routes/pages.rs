//! HTML page handlers.

use axum::extract::State;
use axum::response::Html;

use sb_store::list_images;

use crate::context::AppContext;
use crate::pages;

/// GET /
///
/// A listing failure still renders the page, with an empty gallery.
pub async fn landing(State(ctx): State<AppContext>) -> Html<String> {
    let images = list_images(&ctx.store).unwrap_or_else(|e| {
        tracing::warn!("Failed to list images for landing page: {e}");
        Vec::new()
    });

    Html(pages::landing_page(
        &ctx.qr_code,
        &ctx.upload_url,
        &images,
        ctx.config.listing.poll_interval_secs,
    ))
}

/// GET /upload-page
pub async fn upload_page() -> Html<&'static str> {
    Html(pages::upload_page())
}
