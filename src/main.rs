use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Extension, Router,
};
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, services::ServeDir, trace::TraceLayer};
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

mod auth;
mod config;
mod error;
mod handlers;
mod middleware;
mod state;
mod uploads;

use state::AppState;
use uploads::storage::DiskStore;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up ADMIN_PASSWORD_HASH, UPLOAD_PUBLIC_ROOT, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Initialize configuration (this loads the config singleton)
    let config = crate::config::config();
    tracing::info!("Starting Harborview Admin API in {:?} mode", config.environment);

    let uploads_root = config.uploads.uploads_root();
    let store = DiskStore::new(&uploads_root)
        .await
        .unwrap_or_else(|e| panic!("failed to prepare upload storage at {}: {}", uploads_root.display(), e));

    let state = Arc::new(AppState {
        store: Arc::new(store),
    });

    let app = app(state);

    // Allow tests or deployments to override port via env
    let port = std::env::var("ADMIN_API_PORT")
        .ok()
        .or_else(|| std::env::var("PORT").ok())
        .and_then(|s| s.parse::<u16>().ok())
        .unwrap_or(config.server.port);

    let bind_addr = format!("0.0.0.0:{}", port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    tracing::info!("Harborview Admin API listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app(state: Arc<AppState>) -> Router {
    let config = crate::config::config();

    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_secure(config.security.cookie_secure)
        .with_expiry(Expiry::OnInactivity(time::Duration::hours(
            config.security.session_expiry_hours as i64,
        )));

    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Auth (login/status public, logout/whoami behind the gate)
        .merge(auth_routes())
        // Protected upload endpoints
        .merge(upload_routes())
        // Accepted uploads are public content
        .nest_service("/uploads", ServeDir::new(config.uploads.uploads_root()))
        .with_state(state)
        // Global middleware
        .layer(session_layer)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

fn auth_routes() -> Router<Arc<AppState>> {
    use handlers::{protected, public};

    let open = Router::new()
        .route("/api/auth/login", post(public::auth::login_post))
        .route("/api/auth/status", get(public::auth::status_get));

    let gated = Router::new()
        .route("/api/auth/logout", post(protected::auth::logout_post))
        .route("/api/auth/whoami", get(protected::auth::whoami_get))
        .route_layer(axum::middleware::from_fn(middleware::require_auth));

    open.merge(gated)
}

fn upload_routes() -> Router<Arc<AppState>> {
    use handlers::protected::uploads as handler;

    let mut router = Router::new();

    // One literal route per category so each carries its own body limit;
    // the :category fallback rejects slugs outside the registry.
    for category in uploads::CATEGORIES {
        let path = format!("/api/uploads/{}", category.slug);
        let method_router: axum::routing::MethodRouter<Arc<AppState>> =
            post(handler::upload_post)
                .layer::<_, std::convert::Infallible>(Extension(*category))
                .layer(DefaultBodyLimit::max(category.kind.body_limit()));
        router = router.route(&path, method_router);
    }

    router
        .route("/api/uploads/:category", post(handler::unknown_category_post))
        .route_layer(axum::middleware::from_fn(middleware::require_auth))
}

async fn root() -> axum::response::Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    axum::response::Json(json!({
        "name": "Harborview Admin API",
        "version": version,
        "description": "Content-management API for the Harborview treatment-center organization",
        "endpoints": {
            "home": "/ (public)",
            "health": "/health (public)",
            "auth": "/api/auth/login, /api/auth/status (public); /api/auth/logout, /api/auth/whoami (protected)",
            "uploads": "/api/uploads/:category (protected)",
            "files": "/uploads/* (public)",
        },
        "upload_categories": uploads::CATEGORIES.iter().map(|c| c.slug).collect::<Vec<_>>(),
    }))
}

async fn health() -> impl axum::response::IntoResponse {
    let now = chrono::Utc::now();
    let uploads_root = crate::config::config().uploads.uploads_root();

    match tokio::fs::metadata(&uploads_root).await {
        Ok(meta) if meta.is_dir() => (
            axum::http::StatusCode::OK,
            axum::response::Json(json!({
                "status": "ok",
                "timestamp": now,
                "storage": "ok",
            })),
        ),
        _ => (
            axum::http::StatusCode::SERVICE_UNAVAILABLE,
            axum::response::Json(json!({
                "status": "degraded",
                "timestamp": now,
                "storage": "upload directory unavailable",
            })),
        ),
    }
}
