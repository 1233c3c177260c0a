//! Application state shared across handlers

use std::sync::Arc;

use anyhow::{Result, bail};
use common::database::{DatabaseConfig, health_check, init_pool, run_migrations};
use sqlx::PgPool;
use tracing::{info, warn};

use crate::{
    config::{AdminConfig, AppConfig, StorageBackend},
    repositories::{
        FolderRepository, FolderStore, MemoryStore, OfflineStore, UserRepository, UserStore,
    },
    services::{AuthService, FolderService},
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub auth: AuthService,
    pub folders: FolderService,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserStore>,
        folders: Arc<dyn FolderStore>,
        admin: AdminConfig,
    ) -> Self {
        Self {
            auth: AuthService::new(users, admin),
            folders: FolderService::new(folders),
        }
    }

    pub fn postgres(pool: PgPool, admin: AdminConfig) -> Self {
        Self::new(
            Arc::new(UserRepository::new(pool.clone())),
            Arc::new(FolderRepository::new(pool)),
            admin,
        )
    }

    pub fn in_memory(admin: AdminConfig) -> Self {
        let store = Arc::new(MemoryStore::new());
        Self::new(store.clone(), store, admin)
    }

    /// State for running without a document store: logins fall back to the
    /// admin account and folder listings come back empty
    pub fn offline(admin: AdminConfig) -> Self {
        Self::new(Arc::new(OfflineStore), Arc::new(OfflineStore), admin)
    }

    /// Wire the configured backend, dropping to offline mode when
    /// PostgreSQL cannot be reached, then seed the admin account
    pub async fn connect(config: &AppConfig) -> Self {
        let admin = config.admin.clone();

        let state = match config.storage.backend {
            StorageBackend::Memory => {
                info!("Using the in-memory document store");
                Self::in_memory(admin)
            }
            StorageBackend::Postgres => match connect_postgres().await {
                Ok(pool) => {
                    info!("Database connection successful");
                    Self::postgres(pool, admin)
                }
                Err(e) => {
                    warn!("Database unavailable, continuing without a document store: {}", e);
                    return Self::offline(admin);
                }
            },
        };

        if let Err(e) = state.auth.seed_admin().await {
            warn!("Failed to initialize admin user: {}", e);
        }

        state
    }
}

async fn connect_postgres() -> Result<PgPool> {
    let db_config = DatabaseConfig::from_env()?;
    let pool = init_pool(&db_config).await?;

    if !health_check(&pool).await? {
        bail!("Database health check failed");
    }
    run_migrations(&pool).await?;

    Ok(pool)
}
