//! Media handlers: multipart upload, metadata, and file serving.

use std::io::ErrorKind as IoErrorKind;
use std::path::Path as FsPath;

use axum::Json;
use axum::body::Body;
use axum::extract::{Multipart, Path, State};
use axum::http::{StatusCode, header};
use axum::response::Response;
use chrono::Utc;
use serde_json::{Value, json};
use tracing::{info, warn};

use reversevibe_core::error::AppError;
use reversevibe_core::types::MediaId;
use reversevibe_entity::Media;

use crate::dto::response::ApiResponse;
use crate::extractors::{CurrentSession, parse_id};
use crate::state::AppState;

const MEDIA_NOT_FOUND: &str = "Media not found";

struct Upload {
    file_name: String,
    content_type: String,
    data: Vec<u8>,
}

/// POST /media/upload
///
/// The file is written under the client-supplied base name, replacing any
/// file already stored under that name. The declared content type is the
/// only check on what the file contains.
pub async fn upload_media(
    State(state): State<AppState>,
    session: CurrentSession,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<ApiResponse<Media>>), AppError> {
    let owner = session.user()?.id;
    let storage = &state.config.storage;

    let mut upload: Option<Upload> = None;
    let mut exif_data = json!({});
    let mut metadata = json!({});
    let mut is_private = false;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::validation(format!("Multipart error: {e}")))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let content_type = field.content_type().unwrap_or("").to_string();
                if !storage.is_allowed(&content_type) {
                    return Err(AppError::validation("File type not allowed"));
                }
                let file_name = field.file_name().unwrap_or("").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::validation(format!("Read error: {e}")))?;
                if data.len() > storage.max_file_size_bytes {
                    return Err(AppError::validation("File too large"));
                }
                upload = Some(Upload {
                    file_name,
                    content_type,
                    data: data.to_vec(),
                });
            }
            "exifData" => exif_data = json_field(&name, &text(field).await?)?,
            "metadata" => metadata = json_field(&name, &text(field).await?)?,
            "isPrivate" => is_private = text(field).await? == "true",
            _ => {}
        }
    }

    let upload = upload.ok_or_else(|| AppError::validation("Please upload a file"))?;
    let base_name = FsPath::new(&upload.file_name)
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| AppError::validation("Invalid file name"))?
        .to_string();

    let file_path = FsPath::new(&storage.upload_dir).join(&base_name);
    tokio::fs::create_dir_all(&storage.upload_dir).await?;
    tokio::fs::write(&file_path, &upload.data).await?;

    let media = state
        .db
        .media
        .create(Media {
            id: MediaId::new(),
            user: owner,
            filename: base_name,
            file_type: upload.content_type,
            file_path: file_path.to_string_lossy().into_owned(),
            size: upload.data.len() as u64,
            exif_data,
            is_private,
            metadata,
            created_at: Utc::now(),
        })
        .await?;

    info!(media_id = %media.id, user_id = %owner, size = media.size, "Media uploaded");
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(media))))
}

async fn text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::validation(format!("Read error: {e}")))
}

fn json_field(name: &str, raw: &str) -> Result<Value, AppError> {
    serde_json::from_str(raw)
        .map_err(|e| AppError::validation(format!("Invalid JSON in {name}: {e}")))
}

/// GET /media
pub async fn my_media(
    State(state): State<AppState>,
    session: CurrentSession,
) -> Result<Json<ApiResponse<Vec<Media>>>, AppError> {
    let media = state.db.media.for_user(session.user()?.id).await?;
    Ok(Json(ApiResponse::list(media)))
}

/// GET /media/{id}
pub async fn get_media(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Media>>, AppError> {
    Ok(Json(ApiResponse::ok(find(&state, &id).await?)))
}

/// GET /media/file/{id}
pub async fn serve_media_file(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    let media = find(&state, &id).await?;
    let data = match tokio::fs::read(&media.file_path).await {
        Ok(data) => data,
        Err(e) if e.kind() == IoErrorKind::NotFound => {
            return Err(AppError::not_found("File not found"));
        }
        Err(e) => return Err(e.into()),
    };

    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, media.file_type)
        .header(header::CONTENT_LENGTH, data.len())
        .body(Body::from(data))
        .map_err(|e| AppError::internal(format!("Response build failed: {e}")))
}

/// DELETE /media/{id}
pub async fn delete_media(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ApiResponse<Value>>, AppError> {
    let media = find(&state, &id).await?;
    match tokio::fs::remove_file(&media.file_path).await {
        Ok(()) => {}
        Err(e) if e.kind() == IoErrorKind::NotFound => {
            warn!(media_id = %media.id, path = %media.file_path, "Media file already gone");
        }
        Err(e) => return Err(e.into()),
    }
    state.db.media.delete(media.id).await?;
    Ok(Json(ApiResponse::empty()))
}

async fn find(state: &AppState, id: &str) -> Result<Media, AppError> {
    let id: MediaId = parse_id(id)?;
    state
        .db
        .media
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::not_found(MEDIA_NOT_FOUND))
}
