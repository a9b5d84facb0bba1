use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub uploads: UploadConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub enable_request_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadConfig {
    /// Root of publicly served content. Uploads live under `<public_root>/uploads/`.
    pub public_root: PathBuf,
    pub image_max_file_size: usize,
    pub video_max_file_size: usize,
    pub image_allowed_content_types: Vec<String>,
    pub video_allowed_content_types: Vec<String>,
}

impl UploadConfig {
    pub fn uploads_root(&self) -> PathBuf {
        self.public_root.join("uploads")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub admin_username: String,
    pub admin_password_hash: String,
    pub session_expiry_hours: u64,
    pub cookie_secure: bool,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Server overrides (port is also overridable at bind time, see main.rs)
        if let Ok(v) = env::var("ADMIN_API_PORT") {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }
        if let Ok(v) = env::var("SERVER_ENABLE_REQUEST_LOGGING") {
            self.server.enable_request_logging = v.parse().unwrap_or(self.server.enable_request_logging);
        }

        // Upload overrides
        if let Ok(v) = env::var("UPLOAD_PUBLIC_ROOT") {
            self.uploads.public_root = PathBuf::from(v);
        }
        if let Ok(v) = env::var("UPLOAD_IMAGE_MAX_BYTES") {
            self.uploads.image_max_file_size = v.parse().unwrap_or(self.uploads.image_max_file_size);
        }
        if let Ok(v) = env::var("UPLOAD_VIDEO_MAX_BYTES") {
            self.uploads.video_max_file_size = v.parse().unwrap_or(self.uploads.video_max_file_size);
        }

        // Security overrides
        if let Ok(v) = env::var("ADMIN_USERNAME") {
            self.security.admin_username = v;
        }
        if let Ok(v) = env::var("ADMIN_PASSWORD_HASH") {
            self.security.admin_password_hash = v;
        } else if let Ok(v) = env::var("ADMIN_PASSWORD") {
            self.security.admin_password_hash = hash_password(&v);
        }
        if let Ok(v) = env::var("SESSION_EXPIRY_HOURS") {
            self.security.session_expiry_hours = v.parse().unwrap_or(self.security.session_expiry_hours);
        }
        if let Ok(v) = env::var("SECURITY_COOKIE_SECURE") {
            self.security.cookie_secure = v.parse().unwrap_or(self.security.cookie_secure);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                port: 4000,
                enable_request_logging: true,
            },
            uploads: UploadConfig::defaults(),
            security: SecurityConfig {
                admin_username: "admin".to_string(),
                admin_password_hash: hash_password("changeme"),
                session_expiry_hours: 24 * 7, // 1 week
                cookie_secure: false,
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                port: 4000,
                enable_request_logging: true,
            },
            uploads: UploadConfig::defaults(),
            security: SecurityConfig {
                admin_username: "admin".to_string(),
                admin_password_hash: hash_password("changeme"),
                session_expiry_hours: 24,
                cookie_secure: true,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                port: 4000,
                enable_request_logging: false,
            },
            uploads: UploadConfig::defaults(),
            security: SecurityConfig {
                admin_username: "admin".to_string(),
                admin_password_hash: hash_password("changeme"),
                session_expiry_hours: 12,
                cookie_secure: true,
            },
        }
    }
}

impl UploadConfig {
    fn defaults() -> Self {
        Self {
            // The public root is anchored to the working directory at startup
            public_root: env::current_dir()
                .unwrap_or_else(|_| PathBuf::from("."))
                .join("public"),
            image_max_file_size: 5 * 1024 * 1024, // 5 MiB
            video_max_file_size: 100 * 1024 * 1024, // 100 MiB
            image_allowed_content_types: vec![
                "image/jpeg".to_string(),
                "image/png".to_string(),
                "image/gif".to_string(),
                "image/webp".to_string(),
            ],
            video_allowed_content_types: vec![
                "video/mp4".to_string(),
                "video/webm".to_string(),
                "video/ogg".to_string(),
                "video/quicktime".to_string(),
            ],
        }
    }
}

fn hash_password(password: &str) -> String {
    bcrypt::hash(password, bcrypt::DEFAULT_COST)
        .unwrap_or_else(|e| panic!("failed to hash admin password: {}", e))
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}
