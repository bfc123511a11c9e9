//! Image listing and serving route handlers.

use axum::extract::{Path, State};
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::Json;

use sb_store::{list_images, ImageStore};

use crate::context::AppContext;
use crate::error::AppError;

/// GET /images
pub async fn list(State(ctx): State<AppContext>) -> Result<Json<Vec<String>>, AppError> {
    Ok(Json(list_images(&ctx.store)?))
}

/// GET /images/{filename}
pub async fn get_image(
    State(ctx): State<AppContext>,
    Path(filename): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let data = ctx.store.get_bytes(&filename)?;
    let content_type = ImageStore::content_type(&filename);

    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type),
            (header::CACHE_CONTROL, "no-cache".to_string()),
        ],
        data,
    ))
}
