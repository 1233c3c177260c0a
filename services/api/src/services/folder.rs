//! Exam folder operations
//!
//! Every mutation is a single load, modify, save round trip on the whole
//! folder document. Nothing serializes concurrent edits of the same folder,
//! so the last save wins.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{error, info, warn};
use uuid::Uuid;

use super::{advance, now};
use crate::{
    error::{ApiError, ApiResult},
    models::exam::{ExamFolder, NewExamFolder, Timetable, UpdateExamFolder},
    repositories::FolderStore,
};

#[derive(Clone)]
pub struct FolderService {
    folders: Arc<dyn FolderStore>,
}

fn store_error(action: &'static str) -> impl FnOnce(anyhow::Error) -> ApiError {
    move |e| {
        error!("Failed to {}: {}", action, e);
        ApiError::from_store(e)
    }
}

fn folder_not_found() -> ApiError {
    ApiError::NotFound("Exam folder not found".to_string())
}

/// Give a timetable entering a folder its id and timestamps
///
/// The id comes from the wall clock in milliseconds when the caller did not
/// supply one, so two timetables created within the same millisecond share
/// an id.
fn stamp_new_timetable(timetable: &mut Timetable, at: DateTime<Utc>) {
    if timetable.identifier().is_none() {
        timetable.id = Some(Utc::now().timestamp_millis().to_string());
    }
    timetable.created_at = Some(at);
    timetable.updated_at = Some(at);
}

impl FolderService {
    pub fn new(folders: Arc<dyn FolderStore>) -> Self {
        Self { folders }
    }

    async fn load(&self, folder_id: &str) -> ApiResult<ExamFolder> {
        let id = Uuid::parse_str(folder_id).map_err(|_| folder_not_found())?;
        self.folders
            .find_by_id(id)
            .await
            .map_err(store_error("load exam folder"))?
            .ok_or_else(folder_not_found)
    }

    async fn persist(&self, folder: &ExamFolder) -> ApiResult<ExamFolder> {
        self.folders
            .save(folder)
            .await
            .map_err(store_error("save exam folder"))
    }

    /// Folders owned by `user_id`; empty when the store is unavailable
    pub async fn list_by_user(&self, user_id: &str) -> Vec<ExamFolder> {
        match self.folders.find_by_user(user_id).await {
            Ok(folders) => folders,
            Err(e) => {
                warn!("Listing exam folders for {} failed: {}", user_id, e);
                Vec::new()
            }
        }
    }

    pub async fn create(&self, payload: NewExamFolder) -> ApiResult<ExamFolder> {
        let now = now();
        let folder = ExamFolder {
            id: Uuid::new_v4(),
            user_id: payload.user_id,
            folder_name: payload.folder_name,
            description: payload.description,
            timetables: payload.timetables.unwrap_or_default(),
            created_at: now,
            updated_at: now,
        };

        info!("Creating exam folder '{}' for {}", folder.folder_name, folder.user_id);
        self.persist(&folder).await
    }

    /// Overwrite name, description and timetables wholesale
    pub async fn update(&self, folder_id: &str, patch: UpdateExamFolder) -> ApiResult<ExamFolder> {
        let mut folder = self.load(folder_id).await?;

        folder.folder_name = patch.folder_name;
        folder.description = patch.description;
        folder.timetables = patch.timetables;
        folder.updated_at = advance(folder.updated_at);

        self.persist(&folder).await
    }

    /// Returns whether the folder existed
    pub async fn delete(&self, folder_id: &str) -> ApiResult<bool> {
        let Ok(id) = Uuid::parse_str(folder_id) else {
            return Ok(false);
        };

        self.folders
            .delete(id)
            .await
            .map_err(store_error("delete exam folder"))
    }

    pub async fn add_timetable(
        &self,
        folder_id: &str,
        mut timetable: Timetable,
    ) -> ApiResult<ExamFolder> {
        let mut folder = self.load(folder_id).await?;

        let now = advance(folder.updated_at);
        stamp_new_timetable(&mut timetable, now);
        folder.timetables.push(timetable);
        folder.updated_at = now;

        self.persist(&folder).await
    }

    /// Replace the timetable with id `timetable_id`, keeping its original
    /// `createdAt` unless the replacement carries one
    pub async fn update_timetable(
        &self,
        folder_id: &str,
        timetable_id: &str,
        mut replacement: Timetable,
    ) -> ApiResult<ExamFolder> {
        let mut folder = self.load(folder_id).await?;

        let index = folder
            .timetables
            .iter()
            .position(|timetable| timetable.has_id(timetable_id))
            .ok_or_else(|| ApiError::NotFound("Timetable not found".to_string()))?;

        let now = advance(folder.updated_at);
        replacement.id = Some(timetable_id.to_string());
        replacement.updated_at = Some(now);
        if replacement.created_at.is_none() {
            replacement.created_at = folder.timetables[index].created_at;
        }
        folder.timetables[index] = replacement;
        folder.updated_at = now;

        self.persist(&folder).await
    }

    /// Remove every timetable with id `timetable_id`; absent ids are not an
    /// error
    pub async fn delete_timetable(
        &self,
        folder_id: &str,
        timetable_id: &str,
    ) -> ApiResult<ExamFolder> {
        let mut folder = self.load(folder_id).await?;

        folder
            .timetables
            .retain(|timetable| !timetable.has_id(timetable_id));
        folder.updated_at = advance(folder.updated_at);

        self.persist(&folder).await
    }

    /// Create a folder named after the timetable, holding only that
    /// timetable. Clashing names get a ` (n)` suffix.
    pub async fn create_folder_for_timetable(
        &self,
        user_id: &str,
        mut timetable: Timetable,
    ) -> ApiResult<ExamFolder> {
        let base_name = timetable
            .table_name
            .clone()
            .filter(|name| !name.trim().is_empty())
            .ok_or_else(|| ApiError::BadRequest("Timetable name is required".to_string()))?;

        let folder_name = self.unique_folder_name(user_id, &base_name).await?;

        let now = now();
        stamp_new_timetable(&mut timetable, now);
        let folder = ExamFolder {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            folder_name,
            description: Some(format!("Folder for {}", base_name)),
            timetables: vec![timetable],
            created_at: now,
            updated_at: now,
        };

        info!("Creating exam folder '{}' for {}", folder.folder_name, user_id);
        self.persist(&folder).await
    }

    async fn unique_folder_name(&self, user_id: &str, base_name: &str) -> ApiResult<String> {
        let mut candidate = base_name.to_string();
        let mut counter = 1;

        while self
            .folders
            .find_by_user_and_name(user_id, &candidate)
            .await
            .map_err(store_error("look up exam folder by name"))?
            .is_some()
        {
            candidate = format!("{} ({})", base_name, counter);
            counter += 1;
        }

        Ok(candidate)
    }
}
