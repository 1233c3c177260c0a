//! Repositories for document store operations
//!
//! The services talk to storage only through [`UserStore`] and
//! [`FolderStore`]. Three backends implement them: PostgreSQL (the
//! production store), an in-memory store, and [`OfflineStore`], which the
//! service is wired to when PostgreSQL cannot be reached at startup.

use anyhow::Result;
use async_trait::async_trait;
use common::error::DatabaseError;
use sqlx::{PgPool, Row, postgres::PgRow};
use tracing::info;
use uuid::Uuid;

use crate::models::{NewUser, User, exam::ExamFolder};

pub mod folder;
pub mod memory;

pub use folder::FolderRepository;
pub use memory::MemoryStore;

/// Access to the `users` collection
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find a user by username
    async fn find_by_username(&self, username: &str) -> Result<Option<User>>;

    /// Persist a new user
    async fn create(&self, new_user: &NewUser) -> Result<User>;
}

/// Access to the `exam_folders` collection
#[async_trait]
pub trait FolderStore: Send + Sync {
    /// All folders owned by `user_id`, oldest first
    async fn find_by_user(&self, user_id: &str) -> Result<Vec<ExamFolder>>;

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ExamFolder>>;

    async fn find_by_user_and_name(
        &self,
        user_id: &str,
        folder_name: &str,
    ) -> Result<Option<ExamFolder>>;

    /// Insert or replace the whole folder document
    async fn save(&self, folder: &ExamFolder) -> Result<ExamFolder>;

    /// Delete a folder, reporting whether it existed
    async fn delete(&self, id: Uuid) -> Result<bool>;
}

/// User repository for database operations
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn user_from_row(row: &PgRow) -> User {
    User {
        id: row.get("id"),
        username: row.get("username"),
        password: row.get("password"),
        role: row.get("role"),
        created_at: row.get("created_at"),
    }
}

#[async_trait]
impl UserStore for UserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        info!("Finding user by username: {}", username);

        let row = sqlx::query(
            r#"
            SELECT id, username, password, role, created_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.as_ref().map(user_from_row))
    }

    async fn create(&self, new_user: &NewUser) -> Result<User> {
        info!("Creating new user: {}", new_user.username);

        let row = sqlx::query(
            r#"
            INSERT INTO users (id, username, password, role)
            VALUES ($1, $2, $3, $4)
            RETURNING id, username, password, role, created_at
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&new_user.username)
        .bind(&new_user.password)
        .bind(&new_user.role)
        .fetch_one(&self.pool)
        .await?;

        Ok(user_from_row(&row))
    }
}

/// Stand-in store used when no document store could be reached
///
/// Every call fails with [`DatabaseError::Unavailable`]; the services turn
/// that into their degraded behavior.
#[derive(Clone, Copy, Default)]
pub struct OfflineStore;

#[async_trait]
impl UserStore for OfflineStore {
    async fn find_by_username(&self, _username: &str) -> Result<Option<User>> {
        Err(DatabaseError::Unavailable.into())
    }

    async fn create(&self, _new_user: &NewUser) -> Result<User> {
        Err(DatabaseError::Unavailable.into())
    }
}

#[async_trait]
impl FolderStore for OfflineStore {
    async fn find_by_user(&self, _user_id: &str) -> Result<Vec<ExamFolder>> {
        Err(DatabaseError::Unavailable.into())
    }

    async fn find_by_id(&self, _id: Uuid) -> Result<Option<ExamFolder>> {
        Err(DatabaseError::Unavailable.into())
    }

    async fn find_by_user_and_name(
        &self,
        _user_id: &str,
        _folder_name: &str,
    ) -> Result<Option<ExamFolder>> {
        Err(DatabaseError::Unavailable.into())
    }

    async fn save(&self, _folder: &ExamFolder) -> Result<ExamFolder> {
        Err(DatabaseError::Unavailable.into())
    }

    async fn delete(&self, _id: Uuid) -> Result<bool> {
        Err(DatabaseError::Unavailable.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_offline_store_reports_unavailable() {
        let store = OfflineStore;
        let err = UserStore::find_by_username(&store, "admin")
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<DatabaseError>(),
            Some(DatabaseError::Unavailable)
        ));
        assert!(FolderStore::delete(&store, Uuid::new_v4()).await.is_err());
    }
}
