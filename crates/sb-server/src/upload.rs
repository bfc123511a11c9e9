//! Upload handling, independent of the HTTP binding.
//!
//! [`routes::upload`](crate::routes::upload) turns a multipart body into an
//! [`UploadRequest`]; everything after that happens here.

use bytes::Bytes;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use sb_core::{Error, Result};
use sb_store::{storage_key, ImageStore};

/// Multipart field the upload page sends the file under.
pub const FILE_FIELD: &str = "image";

/// One file attachment as declared by the client.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub bytes: Bytes,
}

/// What the client sent: at most one attachment under [`FILE_FIELD`].
#[derive(Debug, Clone, Default)]
pub struct UploadRequest {
    pub file: Option<UploadedFile>,
}

impl UploadRequest {
    pub fn with_file(filename: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file: Some(UploadedFile {
                filename: filename.into(),
                bytes: bytes.into(),
            }),
        }
    }
}

/// JSON body returned by `POST /upload`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl UploadResponse {
    pub fn stored(key: String) -> Self {
        Self {
            success: true,
            filename: Some(key),
            error: None,
        }
    }

    pub fn rejected(reason: &Error) -> Self {
        Self {
            success: false,
            filename: None,
            error: Some(reason.to_string()),
        }
    }
}

/// Validate `request`, name it for `now`, and persist it.
///
/// Missing or unnamed files come back as an unsuccessful response. Storage
/// failures are returned as errors.
pub fn handle_upload(
    store: &ImageStore,
    now: NaiveDateTime,
    request: UploadRequest,
) -> Result<UploadResponse> {
    match accept(store, now, request) {
        Ok(key) => Ok(UploadResponse::stored(key)),
        Err(e) if e.is_rejection() => {
            tracing::debug!("Upload rejected: {e}");
            Ok(UploadResponse::rejected(&e))
        }
        Err(e) => Err(e),
    }
}

fn accept(store: &ImageStore, now: NaiveDateTime, request: UploadRequest) -> Result<String> {
    let file = request.file.ok_or(Error::MissingFile)?;
    if file.filename.is_empty() {
        return Err(Error::NoFileSelected);
    }

    let key = storage_key(now, &file.filename);
    store.put(&key, &file.bytes)?;
    tracing::info!(key = %key, size = file.bytes.len(), "Image uploaded");
    Ok(key)
}
