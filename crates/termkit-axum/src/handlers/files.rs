//! Shared file handlers: list, upload, download and delete.

use axum::Json;
use axum::body::Body;
use axum::extract::{Multipart, Path, State};
use axum::http::header::{CONTENT_DISPOSITION, CONTENT_LENGTH, CONTENT_TYPE};
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use termkit_core::{HubEvent, SharedFile, UploadedFile, content_type_for};
use tokio_util::io::ReaderStream;
use tracing::{info, warn};

use crate::error::HttpError;
use crate::state::AppState;

/// Maximum number of files accepted by one multi-file upload.
pub const MAX_FILES_PER_UPLOAD: usize = 50;

#[derive(Debug, Serialize)]
pub struct FileListResponse {
    pub files: Vec<SharedFile>,
}

#[derive(Debug, Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub file: UploadedFile,
}

#[derive(Debug, Serialize)]
pub struct MultiUploadResponse {
    pub success: bool,
    pub count: usize,
    pub files: Vec<UploadedFile>,
}

#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

pub async fn list(State(state): State<AppState>) -> Result<Json<FileListResponse>, HttpError> {
    let files = state.uploads.list().await?;
    Ok(Json(FileListResponse { files }))
}

/// Single-file upload (multipart field `file`).
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, HttpError> {
    let mut saved = receive_files(&state, &mut multipart, "file", 1).await?;
    let Some(file) = saved.pop() else {
        return Err(HttpError::BadRequest("No file uploaded".to_string()));
    };

    state.sse.emit(HubEvent::FileUploaded { file: file.clone() });
    Ok(Json(UploadResponse {
        success: true,
        file,
    }))
}

/// Multi-file upload (multipart field `files`).
pub async fn upload_multiple(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<MultiUploadResponse>, HttpError> {
    let files = receive_files(&state, &mut multipart, "files", MAX_FILES_PER_UPLOAD).await?;
    if files.is_empty() {
        return Err(HttpError::BadRequest("No files uploaded".to_string()));
    }

    state.sse.emit(HubEvent::FilesUploaded {
        count: files.len(),
        files: files.clone(),
    });
    Ok(Json(MultiUploadResponse {
        success: true,
        count: files.len(),
        files,
    }))
}

/// Store every file part named `field_name`; other parts are skipped.
///
/// All-or-nothing: when any part fails (including exceeding `limit`), the
/// files already written for this request are removed again.
async fn receive_files(
    state: &AppState,
    multipart: &mut Multipart,
    field_name: &str,
    limit: usize,
) -> Result<Vec<UploadedFile>, HttpError> {
    let mut saved = Vec::new();

    match store_parts(state, multipart, field_name, limit, &mut saved).await {
        Ok(()) => {
            for file in &saved {
                info!(name = %file.name, size = file.size, "file uploaded");
            }
            Ok(saved)
        }
        Err(err) => {
            discard(state, &saved).await;
            Err(err)
        }
    }
}

async fn store_parts(
    state: &AppState,
    multipart: &mut Multipart,
    field_name: &str,
    limit: usize,
    saved: &mut Vec<UploadedFile>,
) -> Result<(), HttpError> {
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(field_name) {
            continue;
        }
        let Some(original_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        if saved.len() >= limit {
            return Err(HttpError::BadRequest(format!(
                "At most {limit} file(s) per upload"
            )));
        }

        let content_type = field.content_type().map(str::to_string);
        let bytes = field.bytes().await?;
        let file = state
            .uploads
            .save(&original_name, &bytes, content_type.as_deref())
            .await?;
        saved.push(file);
    }

    Ok(())
}

async fn discard(state: &AppState, files: &[UploadedFile]) {
    for file in files {
        if let Err(e) = state.uploads.delete(&file.name).await {
            warn!(name = %file.name, error = %e, "failed to remove partial upload");
        }
    }
}

pub async fn download(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Response, HttpError> {
    let path = state.uploads.resolve(&filename).await?;
    let file = tokio::fs::File::open(&path).await?;
    let len = file.metadata().await?.len();

    let headers = [
        (CONTENT_TYPE, content_type_for(&filename).to_string()),
        (CONTENT_DISPOSITION, attachment(&filename)),
        (CONTENT_LENGTH, len.to_string()),
    ];
    Ok((headers, Body::from_stream(ReaderStream::new(file))).into_response())
}

pub async fn remove(
    State(state): State<AppState>,
    Path(filename): Path<String>,
) -> Result<Json<SuccessResponse>, HttpError> {
    state.uploads.delete(&filename).await?;
    info!(name = %filename, "file deleted");

    state.sse.emit(HubEvent::FileDeleted { name: filename });
    Ok(Json(SuccessResponse { success: true }))
}

/// Zip of every stored file; 404 when the store is empty.
pub async fn download_all(State(state): State<AppState>) -> Result<Response, HttpError> {
    let archive = state.uploads.archive().await?;

    let headers = [
        (CONTENT_TYPE, "application/zip".to_string()),
        (CONTENT_DISPOSITION, attachment("all-files.zip")),
    ];
    Ok((headers, archive).into_response())
}

fn attachment(name: &str) -> String {
    format!("attachment; filename=\"{}\"", name.replace('"', "_"))
}
