// handlers/public/auth.rs - session login and status endpoints

use axum::Json;
use serde::Deserialize;
use serde_json::{json, Value};
use tower_sessions::Session;

use crate::auth::{verify_credentials, AuthUser, SESSION_USER_KEY};
use crate::error::ApiError;
use crate::middleware::{authenticate, AuthState};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// POST /api/auth/login - verify admin credentials and open a session.
///
/// The session itself is created and persisted by the session layer; this
/// handler only stores the authenticated identity in it.
pub async fn login_post(
    session: Session,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<Value>, ApiError> {
    if !verify_credentials(&payload.username, &payload.password) {
        tracing::warn!(username = %payload.username, "failed login attempt");
        return Err(ApiError::unauthorized("Invalid username or password"));
    }

    let user = AuthUser::new(payload.username);
    session.insert(SESSION_USER_KEY, &user).await?;

    tracing::info!(username = %user.username, "admin logged in");

    Ok(Json(json!({
        "message": "Logged in successfully",
        "user": user,
    })))
}

/// GET /api/auth/status - public authentication probe for the frontend.
pub async fn status_get(session: Session) -> Json<Value> {
    match authenticate(&session).await {
        AuthState::Authenticated(user) => Json(json!({
            "authenticated": true,
            "user": user,
        })),
        AuthState::Anonymous => Json(json!({
            "authenticated": false,
        })),
    }
}
