//! API service routes

use axum::{
    Json, Router,
    http::{HeaderValue, Method, StatusCode, Uri, header},
    routing::{get, post, put},
};
use serde_json::{Value, json};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::{config::CorsConfig, state::AppState};

pub mod auth;
pub mod folders;

/// Create the router for the API service
pub fn create_router(state: AppState) -> Router {
    let auth_routes = Router::new()
        .route("/login", post(auth::login))
        .route("/user", get(auth::current_user));

    let folder_routes = Router::new()
        .route("/", post(folders::create_folder))
        .route("/user/:user_id", get(folders::list_folders))
        .route(
            "/create-with-timetable",
            post(folders::create_folder_with_timetable),
        )
        .route(
            "/:folder_id",
            put(folders::update_folder).delete(folders::delete_folder),
        )
        .route("/:folder_id/timetables", post(folders::add_timetable))
        .route(
            "/:folder_id/timetables/:timetable_id",
            put(folders::update_timetable).delete(folders::delete_timetable),
        );

    Router::new()
        .route("/", get(home))
        .route("/health", get(health_check))
        .nest("/auth", auth_routes)
        .nest("/api/exam-folders", folder_routes)
        .fallback(handler404)
        .with_state(state)
}

/// CORS policy for the browser frontend
pub fn cors_layer(config: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .origins()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

pub async fn home() -> &'static str {
    "ExamPilot Application is running successfully!"
}

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "OK"
}

pub async fn handler404(path: Uri) -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": format!("Invalid path: {}", path),
        })),
    )
}
