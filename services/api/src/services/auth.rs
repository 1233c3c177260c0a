//! Authentication against the `users` collection
//!
//! Passwords are stored and compared as plain text. When the store cannot
//! answer, login degrades to the configured admin account instead of
//! failing closed.

use std::sync::Arc;

use tracing::{error, info, warn};

use crate::{
    config::AdminConfig,
    credentials::BasicCredentials,
    error::{ApiError, ApiResult},
    models::{ADMIN_ROLE, LoginResponse, NewUser, USER_ROLE, User, UserProfile},
    repositories::UserStore,
};

#[derive(Clone)]
pub struct AuthService {
    users: Arc<dyn UserStore>,
    admin: AdminConfig,
}

impl AuthService {
    pub fn new(users: Arc<dyn UserStore>, admin: AdminConfig) -> Self {
        Self { users, admin }
    }

    /// Create the configured admin account unless it already exists
    pub async fn seed_admin(&self) -> ApiResult<()> {
        let existing = self
            .users
            .find_by_username(&self.admin.username)
            .await
            .map_err(|e| {
                error!("Failed to look up admin user: {}", e);
                ApiError::from_store(e)
            })?;

        if existing.is_none() {
            let admin = self
                .insert_user(&self.admin.username, &self.admin.password, ADMIN_ROLE)
                .await?;
            info!("Admin user created: {}", admin.username);
        }

        Ok(())
    }

    /// Register a regular user; usernames are unique
    pub async fn create_user(&self, username: &str, password: &str) -> ApiResult<User> {
        self.insert_user(username, password, USER_ROLE).await
    }

    async fn insert_user(&self, username: &str, password: &str, role: &str) -> ApiResult<User> {
        let existing = self.users.find_by_username(username).await.map_err(|e| {
            error!("Failed to look up user {}: {}", username, e);
            ApiError::from_store(e)
        })?;
        if existing.is_some() {
            return Err(ApiError::Conflict("Username already exists".to_string()));
        }

        let new_user = NewUser {
            username: username.to_string(),
            password: password.to_string(),
            role: role.to_string(),
        };
        self.users.create(&new_user).await.map_err(|e| {
            error!("Failed to create user {}: {}", username, e);
            ApiError::from_store(e)
        })
    }

    /// Check a username/password pair
    pub async fn authenticate(&self, credentials: &BasicCredentials) -> bool {
        match self.users.find_by_username(&credentials.username).await {
            Ok(Some(user)) => user.password == credentials.password,
            Ok(None) => false,
            Err(e) => {
                warn!(
                    "User lookup failed, falling back to admin credentials: {}",
                    e
                );
                self.is_admin(credentials)
            }
        }
    }

    fn is_admin(&self, credentials: &BasicCredentials) -> bool {
        credentials.username == self.admin.username && credentials.password == self.admin.password
    }

    pub async fn login(&self, credentials: &BasicCredentials) -> ApiResult<LoginResponse> {
        info!("Login attempt for user: {}", credentials.username);

        if !self.authenticate(credentials).await {
            return Err(ApiError::Unauthorized);
        }

        Ok(LoginResponse {
            success: true,
            message: "Login successful".to_string(),
            username: credentials.username.clone(),
        })
    }

    /// Resolve the profile named by the credentials. The password is not
    /// checked here.
    pub async fn current_user(&self, credentials: &BasicCredentials) -> ApiResult<UserProfile> {
        let user = self
            .users
            .find_by_username(&credentials.username)
            .await
            .unwrap_or_else(|e| {
                warn!("User lookup failed: {}", e);
                None
            });

        user.map(UserProfile::from)
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))
    }
}
