//! Upload route handler.

use axum::extract::multipart::{MultipartError, MultipartRejection};
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::Json;

use sb_core::Error;

use crate::context::AppContext;
use crate::error::AppError;
use crate::upload::{handle_upload, UploadRequest, UploadResponse, UploadedFile, FILE_FIELD};

/// POST /upload
///
/// Validation failures are reported in the JSON body with a 200 status.
/// A body that is not multipart, or whose multipart framing is broken,
/// counts as a missing file. Only an exceeded upload limit fails the request.
pub async fn upload(
    State(ctx): State<AppContext>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, AppError> {
    let request = match multipart {
        Ok(multipart) => read_upload_request(multipart).await?,
        Err(rejection) => {
            tracing::debug!("Upload body is not multipart: {rejection}");
            UploadRequest::default()
        }
    };

    let store = ctx.store.clone();
    let now = chrono::Local::now().naive_local();
    let response = tokio::task::spawn_blocking(move || handle_upload(&store, now, request))
        .await
        .map_err(|e| Error::Internal(format!("upload task failed: {e}")))??;

    Ok(Json(response))
}

/// Pull the first `image` field that carries a filename out of the form.
/// Other fields are skipped.
async fn read_upload_request(multipart: Multipart) -> Result<UploadRequest, Error> {
    match read_file_field(multipart).await {
        Ok(file) => Ok(UploadRequest { file }),
        Err(e) if e.status() == StatusCode::PAYLOAD_TOO_LARGE => {
            Err(Error::PayloadTooLarge(e.body_text()))
        }
        Err(e) => {
            tracing::debug!("Malformed multipart upload: {}", e.body_text());
            Ok(UploadRequest::default())
        }
    }
}

async fn read_file_field(
    mut multipart: Multipart,
) -> Result<Option<UploadedFile>, MultipartError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let Some(filename) = field.file_name().map(str::to_owned) else {
            continue;
        };
        let bytes = field.bytes().await?;
        return Ok(Some(UploadedFile { filename, bytes }));
    }
    Ok(None)
}
