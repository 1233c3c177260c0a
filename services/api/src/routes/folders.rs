//! Exam folder and nested timetable routes

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde_json::{Value, json};

use crate::{
    error::{ApiError, ApiResult},
    models::exam::{
        CreateWithTimetableQuery, ExamFolder, NewExamFolder, Timetable, UpdateExamFolder,
    },
    state::AppState,
};

/// List every folder owned by a user
pub async fn list_folders(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Json<Vec<ExamFolder>> {
    Json(state.folders.list_by_user(&user_id).await)
}

pub async fn create_folder(
    State(state): State<AppState>,
    Json(payload): Json<NewExamFolder>,
) -> ApiResult<Json<ExamFolder>> {
    state.folders.create(payload).await.map(Json)
}

pub async fn update_folder(
    State(state): State<AppState>,
    Path(folder_id): Path<String>,
    Json(payload): Json<UpdateExamFolder>,
) -> ApiResult<Json<ExamFolder>> {
    state.folders.update(&folder_id, payload).await.map(Json)
}

pub async fn delete_folder(
    State(state): State<AppState>,
    Path(folder_id): Path<String>,
) -> ApiResult<Json<Value>> {
    if state.folders.delete(&folder_id).await? {
        Ok(Json(json!({"message": "Exam folder deleted successfully"})))
    } else {
        Err(ApiError::NotFound("Exam folder not found".to_string()))
    }
}

pub async fn add_timetable(
    State(state): State<AppState>,
    Path(folder_id): Path<String>,
    Json(timetable): Json<Timetable>,
) -> ApiResult<Json<ExamFolder>> {
    state
        .folders
        .add_timetable(&folder_id, timetable)
        .await
        .map(Json)
}

pub async fn update_timetable(
    State(state): State<AppState>,
    Path((folder_id, timetable_id)): Path<(String, String)>,
    Json(timetable): Json<Timetable>,
) -> ApiResult<Json<ExamFolder>> {
    state
        .folders
        .update_timetable(&folder_id, &timetable_id, timetable)
        .await
        .map(Json)
}

pub async fn delete_timetable(
    State(state): State<AppState>,
    Path((folder_id, timetable_id)): Path<(String, String)>,
) -> ApiResult<Json<ExamFolder>> {
    state
        .folders
        .delete_timetable(&folder_id, &timetable_id)
        .await
        .map(Json)
}

/// Create a new folder named after the timetable and holding only it
pub async fn create_folder_with_timetable(
    State(state): State<AppState>,
    Query(query): Query<CreateWithTimetableQuery>,
    Json(timetable): Json<Timetable>,
) -> ApiResult<Json<ExamFolder>> {
    state
        .folders
        .create_folder_for_timetable(&query.user_id, timetable)
        .await
        .map(Json)
}
