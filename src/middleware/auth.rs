use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tower_sessions::Session;

use crate::auth::{AuthUser, SESSION_USER_KEY};
use crate::error::ApiError;

/// Outcome of the authentication predicate for the current request.
///
/// The gate only depends on this tagged result, not on the session library
/// beyond the [`authenticate`] seam.
#[derive(Clone, Debug)]
pub enum AuthState {
    Authenticated(AuthUser),
    Anonymous,
}

/// Authentication predicate: does the current request carry a valid session
/// with a logged-in admin? Read-only; never creates or mutates the session.
pub async fn authenticate(session: &Session) -> AuthState {
    match session.get::<AuthUser>(SESSION_USER_KEY).await {
        Ok(Some(user)) => AuthState::Authenticated(user),
        Ok(None) => AuthState::Anonymous,
        Err(e) => {
            // A session the store cannot read is treated as no session
            tracing::warn!("failed to read session: {}", e);
            AuthState::Anonymous
        }
    }
}

/// Session authentication middleware guarding protected routes.
///
/// Authenticated requests pass through unchanged with the admin identity
/// injected as an [`AuthUser`] extension. Unauthenticated requests are
/// terminated immediately with 401 and the next handler is never invoked.
pub async fn require_auth(session: Session, mut request: Request, next: Next) -> Response {
    match authenticate(&session).await {
        AuthState::Authenticated(user) => {
            request.extensions_mut().insert(user);
            next.run(request).await
        }
        AuthState::Anonymous => {
            ApiError::unauthorized("Unauthorized. Please log in to access this resource.")
                .into_response()
        }
    }
}
