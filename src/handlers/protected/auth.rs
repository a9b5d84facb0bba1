// handlers/protected/auth.rs - session endpoints behind the auth gate

use axum::{Extension, Json};
use serde_json::{json, Value};
use tower_sessions::Session;

use crate::auth::AuthUser;
use crate::error::ApiError;

/// POST /api/auth/logout - destroy the current session.
pub async fn logout_post(session: Session) -> Result<Json<Value>, ApiError> {
    session.flush().await?;

    Ok(Json(json!({
        "message": "Logged out successfully",
    })))
}

/// GET /api/auth/whoami - identity attached to the current session.
pub async fn whoami_get(Extension(user): Extension<AuthUser>) -> Json<Value> {
    Json(json!({ "user": user }))
}
