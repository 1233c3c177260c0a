//! Custom error types for the common library
//!
//! This module defines the storage error types shared by every service
//! in the ExamPilot workspace.

use sqlx::Error as SqlxError;
use sqlx::migrate::MigrateError;
use thiserror::Error;

/// Custom error type for database operations
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error occurred during database connection
    #[error("Database connection error: {0}")]
    Connection(#[source] SqlxError),

    /// Error occurred during database query execution
    #[error("Database query error: {0}")]
    Query(#[source] SqlxError),

    /// Error occurred during database migration
    #[error("Database migration error: {0}")]
    Migration(#[source] MigrateError),

    /// Configuration error
    #[error("Database configuration error: {0}")]
    Configuration(String),

    /// The service was started without a reachable document store
    #[error("Document store unavailable")]
    Unavailable,
}

/// Type alias for Result with DatabaseError
pub type DatabaseResult<T> = Result<T, DatabaseError>;
