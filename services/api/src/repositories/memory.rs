//! In-memory document store
//!
//! Same semantics as the PostgreSQL repositories, without persistence.
//! Selected with `EXAMPILOT_STORAGE__BACKEND=memory` and used by the tests.

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{Result, bail};
use async_trait::async_trait;
use chrono::{SubsecRound, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::{FolderStore, UserStore};
use crate::models::{NewUser, User, exam::ExamFolder};

#[derive(Clone, Default)]
pub struct MemoryStore {
    users: Arc<RwLock<HashMap<String, User>>>,
    folders: Arc<RwLock<HashMap<Uuid, ExamFolder>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        Ok(self.users.read().await.get(username).cloned())
    }

    async fn create(&self, new_user: &NewUser) -> Result<User> {
        let mut users = self.users.write().await;
        if users.contains_key(&new_user.username) {
            bail!("duplicate key value violates unique constraint on username");
        }

        let user = User {
            id: Uuid::new_v4(),
            username: new_user.username.clone(),
            password: new_user.password.clone(),
            role: new_user.role.clone(),
            created_at: Utc::now().trunc_subsecs(6),
        };
        users.insert(user.username.clone(), user.clone());
        Ok(user)
    }
}

#[async_trait]
impl FolderStore for MemoryStore {
    async fn find_by_user(&self, user_id: &str) -> Result<Vec<ExamFolder>> {
        let mut folders: Vec<ExamFolder> = self
            .folders
            .read()
            .await
            .values()
            .filter(|folder| folder.user_id == user_id)
            .cloned()
            .collect();
        folders.sort_by_key(|folder| folder.created_at);
        Ok(folders)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ExamFolder>> {
        Ok(self.folders.read().await.get(&id).cloned())
    }

    async fn find_by_user_and_name(
        &self,
        user_id: &str,
        folder_name: &str,
    ) -> Result<Option<ExamFolder>> {
        Ok(self
            .folders
            .read()
            .await
            .values()
            .find(|folder| folder.user_id == user_id && folder.folder_name == folder_name)
            .cloned())
    }

    async fn save(&self, folder: &ExamFolder) -> Result<ExamFolder> {
        self.folders.write().await.insert(folder.id, folder.clone());
        Ok(folder.clone())
    }

    async fn delete(&self, id: Uuid) -> Result<bool> {
        Ok(self.folders.write().await.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::USER_ROLE;

    fn folder(user_id: &str, name: &str) -> ExamFolder {
        let now = Utc::now();
        ExamFolder {
            id: Uuid::new_v4(),
            user_id: user_id.to_string(),
            folder_name: name.to_string(),
            description: None,
            timetables: vec![],
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    async fn test_usernames_are_unique() {
        let store = MemoryStore::new();
        let new_user = NewUser {
            username: "alice".to_string(),
            password: "pw".to_string(),
            role: USER_ROLE.to_string(),
        };

        store.create(&new_user).await.unwrap();
        assert!(store.create(&new_user).await.is_err());
        assert!(store.find_by_username("alice").await.unwrap().is_some());
        assert!(store.find_by_username("bob").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_folder_lookups_are_scoped_to_owner() {
        let store = MemoryStore::new();
        let mine = store.save(&folder("alice", "Finals")).await.unwrap();
        store.save(&folder("bob", "Finals")).await.unwrap();

        let found = store
            .find_by_user_and_name("alice", "Finals")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, mine.id);
        assert_eq!(store.find_by_user("alice").await.unwrap().len(), 1);

        assert!(store.delete(mine.id).await.unwrap());
        assert!(!store.delete(mine.id).await.unwrap());
        assert!(store.find_by_id(mine.id).await.unwrap().is_none());
    }
}
