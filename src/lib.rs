// src/lib.rs

use std::path::PathBuf;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post, put},
};
use sea_orm::DatabaseConnection;
use tower_http::services::ServeDir;

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub jwt_secret: String,
    pub upload_dir: PathBuf,
}

pub mod entities {
    pub mod prelude;

    pub mod callback_requests;
    pub mod nda_requests;
    pub mod projects;
    pub mod users;
}

pub mod services {
    pub mod access;
    pub mod attachment;
    pub mod password;
    pub mod reporting;
    pub mod search;
}

pub mod models {
    pub mod admin;
    pub mod error;
    pub mod project;
    pub mod request;
    pub mod search;
    pub mod user;
}

pub mod handlers {
    pub mod admin;
    pub mod auth;
    pub mod profile;
    pub mod project;
    pub mod request;
    pub mod search;
}

pub mod session;

/// Request body cap: 16 MiB, sized for attachment uploads.
const MAX_BODY_BYTES: usize = 16 * 1024 * 1024;

async fn root() -> &'static str {
    "CapMatch backend is running"
}

/// Build the full API router over the given state. Shared by `main` and the
/// integration tests.
pub fn api_router(state: AppState) -> Router {
    let upload_dir = state.upload_dir.clone();

    Router::new()
        .route("/", get(root))
        .route("/api/auth/register", post(handlers::auth::register))
        .route("/api/auth/login", post(handlers::auth::login))
        .route("/api/auth/me", get(handlers::auth::me))
        .route(
            "/api/projects",
            get(handlers::search::search_projects).post(handlers::project::create_project),
        )
        .route("/api/projects/mine", get(handlers::project::my_projects))
        .route(
            "/api/projects/{id}",
            get(handlers::project::get_project).put(handlers::project::update_project),
        )
        .route(
            "/api/projects/{id}/attachment",
            post(handlers::project::upload_attachment),
        )
        .route(
            "/api/profile",
            get(handlers::profile::get_profile).put(handlers::profile::update_profile),
        )
        .route(
            "/api/profile/preferences",
            get(handlers::profile::get_preferences).put(handlers::profile::update_preferences),
        )
        .route("/api/requests/nda", post(handlers::request::create_nda_request))
        .route(
            "/api/requests/callback",
            post(handlers::request::create_callback_request),
        )
        .route("/api/admin/counts", get(handlers::admin::counts))
        .route("/api/admin/recent/{entity}", get(handlers::admin::recent))
        .route("/api/admin/export/{entity}", get(handlers::admin::export))
        .route("/api/admin/users/{id}/role", put(handlers::admin::change_role))
        .route(
            "/api/admin/users/{id}/verified",
            put(handlers::admin::change_verified),
        )
        .nest_service("/api/uploads", ServeDir::new(upload_dir))
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .with_state(state)
}
