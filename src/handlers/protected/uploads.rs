// handlers/protected/uploads.rs - the upload acceptor
//
// Authorization is enforced upstream by middleware::require_auth; this
// handler deliberately performs no session check of its own.

use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartError, Multipart, Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::{json, Map, Value};

use crate::error::ApiError;
use crate::state::AppState;
use crate::uploads::{validate, UploadCategory};

/// POST /api/uploads/:category - accept one multipart file field.
///
/// Validation order: find the file field (400 if absent), check its MIME type
/// against the category's allow-list before reading the body, buffer, check
/// the size ceiling, then hand the buffer to the store. Nothing touches disk
/// on any rejection path.
pub async fn upload_post(
    State(state): State<Arc<AppState>>,
    Extension(category): Extension<UploadCategory>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<Value>), ApiError> {
    let field = loop {
        match multipart.next_field().await.map_err(multipart_error)? {
            Some(field) if field.file_name().is_some() => break field,
            Some(_) => continue,
            None => return Err(validate::UploadError::NoFileProvided.into()),
        }
    };

    let original_name = field.file_name().unwrap_or("upload").to_string();
    let mime_type = field
        .content_type()
        .unwrap_or("application/octet-stream")
        .to_string();

    validate::check_content_type(category.kind, &mime_type)?;

    let data = field.bytes().await.map_err(multipart_error)?;
    validate::check_size(category.kind, data.len())?;

    let stored = state
        .store
        .put(&category, &original_name, &mime_type, data)
        .await?;

    let mut body = Map::new();
    body.insert(
        "message".to_string(),
        json!(format!("{} uploaded successfully", capitalize(category.kind.label()))),
    );
    body.insert(category.kind.url_field().to_string(), json!(stored.public_url));
    body.insert("file".to_string(), json!(stored.record));

    Ok((StatusCode::CREATED, Json(Value::Object(body))))
}

/// POST /api/uploads/:category fallback for slugs outside the registry.
pub async fn unknown_category_post(Path(slug): Path<String>) -> ApiError {
    if crate::uploads::category(&slug).is_some() {
        // Registered categories are served by their own literal routes;
        // a registry hit here means a routing gap
        tracing::error!(slug = %slug, "registered category fell through to fallback route");
    }
    ApiError::bad_request("Unknown upload category")
}

/// Map multipart stream failures. Oversize bodies trip the per-route body
/// limit and surface here as 413; anything else is a malformed request.
fn multipart_error(err: MultipartError) -> ApiError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        ApiError::payload_too_large("File too large")
    } else {
        ApiError::bad_request(format!("Malformed multipart request: {}", err.body_text()))
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
