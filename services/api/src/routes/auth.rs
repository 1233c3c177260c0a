//! Authentication routes

use axum::{Json, extract::State};

use crate::{
    credentials::BasicCredentials,
    error::ApiResult,
    models::{LoginResponse, UserProfile},
    state::AppState,
};

/// Validate Basic credentials
pub async fn login(
    State(state): State<AppState>,
    credentials: BasicCredentials,
) -> ApiResult<Json<LoginResponse>> {
    state.auth.login(&credentials).await.map(Json)
}

/// Resolve the user named in the Basic credentials
pub async fn current_user(
    State(state): State<AppState>,
    credentials: BasicCredentials,
) -> ApiResult<Json<UserProfile>> {
    state.auth.current_user(&credentials).await.map(Json)
}
