use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config;

/// Session key under which the authenticated admin is stored.
pub const SESSION_USER_KEY: &str = "admin_user";

/// Authenticated admin identity carried in the session and injected into
/// protected requests as an extension.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AuthUser {
    pub username: String,
    pub logged_in_at: DateTime<Utc>,
}

impl AuthUser {
    pub fn new(username: String) -> Self {
        Self {
            username,
            logged_in_at: Utc::now(),
        }
    }
}

/// Check a login attempt against the configured admin credentials.
///
/// The stored hash is bcrypt; a malformed hash verifies as a failed login
/// rather than an error so credential state never leaks to the caller.
pub fn verify_credentials(username: &str, password: &str) -> bool {
    let security = &config::config().security;

    if username != security.admin_username {
        return false;
    }

    bcrypt::verify(password, &security.admin_password_hash).unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_user_records_login_time() {
        let user = AuthUser::new("admin".to_string());
        assert_eq!(user.username, "admin");
        assert!(user.logged_in_at <= Utc::now());
    }

    #[test]
    fn test_verify_rejects_unknown_username() {
        assert!(!verify_credentials("not-the-admin", "changeme"));
    }
}
