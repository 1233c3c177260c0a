//! Exam folder repository for database operations

use anyhow::Result;
use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow, types::Json};
use tracing::info;
use uuid::Uuid;

use super::FolderStore;
use crate::models::exam::{ExamFolder, Timetable};

/// Exam folder repository backed by the `exam_folders` table
#[derive(Clone)]
pub struct FolderRepository {
    pool: PgPool,
}

impl FolderRepository {
    /// Create a new exam folder repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn folder_from_row(row: &PgRow) -> ExamFolder {
    let Json(timetables): Json<Vec<Timetable>> = row.get("timetables");
    ExamFolder {
        id: row.get("id"),
        user_id: row.get("user_id"),
        folder_name: row.get("folder_name"),
        description: row.get("description"),
        timetables,
        created_at: row.get("created_at"),
        updated_at: row.get("updated_at"),
    }
}

#[async_trait]
impl FolderStore for FolderRepository {
    async fn find_by_user(&self, user_id: &str) -> Result<Vec<ExamFolder>> {
        info!("Finding exam folders for user: {}", user_id);

        let rows = sqlx::query(
            r#"
            SELECT id, user_id, folder_name, description, timetables, created_at, updated_at
            FROM exam_folders
            WHERE user_id = $1
            ORDER BY created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.iter().map(folder_from_row).collect())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ExamFolder>> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, folder_name, description, timetables, created_at, updated_at
            FROM exam_folders
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(folder_from_row))
    }

    async fn find_by_user_and_name(
        &self,
        user_id: &str,
        folder_name: &str,
    ) -> Result<Option<ExamFolder>> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, folder_name, description, timetables, created_at, updated_at
            FROM exam_folders
            WHERE user_id = $1 AND folder_name = $2
            LIMIT 1
            "#,
        )
        .bind(user_id)
        .bind(folder_name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(folder_from_row))
    }

    async fn save(&self, folder: &ExamFolder) -> Result<ExamFolder> {
        info!("Saving exam folder: {}", folder.id);

        let row = sqlx::query(
            r#"
            INSERT INTO exam_folders
                (id, user_id, folder_name, description, timetables, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE SET
                user_id = EXCLUDED.user_id,
                folder_name = EXCLUDED.folder_name,
                description = EXCLUDED.description,
                timetables = EXCLUDED.timetables,
                created_at = EXCLUDED.created_at,
                updated_at = EXCLUDED.updated_at
            RETURNING id, user_id, folder_name, description, timetables, created_at, updated_at
            "#,
        )
        .bind(folder.id)
        .bind(&folder.user_id)
        .bind(&folder.folder_name)
        .bind(&folder.description)
        .bind(Json(&folder.timetables))
        .bind(folder.created_at)
        .bind(folder.updated_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(folder_from_row(&row))
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        info!("Deleting exam folder: {}", id);

        let result = sqlx::query(
            r#"
            DELETE FROM exam_folders
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
