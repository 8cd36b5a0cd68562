//! SQLite error types

use thiserror::Error;

const INVALID_FIELD_VALUE: &str = "Invalid field value";

#[derive(Error, Debug)]
pub enum SqliteError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration {version} ({name}) failed: {error}")]
    MigrationFailed {
        version: i32,
        name: String,
        error: String,
    },

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    #[error("Invalid value: {0}")]
    Invalid(String),
}

impl SqliteError {
    /// Classify constraint violations from a write statement
    ///
    /// Unique violations become `Conflict(conflict_msg)`, foreign key
    /// violations become `InvalidReference(reference_msg)`, CHECK violations
    /// become `Invalid`. Anything else is passed through as a database error.
    pub fn from_write(e: sqlx::Error, conflict_msg: &str, reference_msg: &str) -> Self {
        if let sqlx::Error::Database(ref db) = e {
            if db.is_unique_violation() {
                return Self::Conflict(conflict_msg.to_string());
            }
            if db.is_foreign_key_violation() {
                return Self::InvalidReference(reference_msg.to_string());
            }
            if db.is_check_violation() {
                return Self::Invalid(INVALID_FIELD_VALUE.to_string());
            }
        }
        Self::Database(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_migration_failed_error_display() {
        let err = SqliteError::MigrationFailed {
            version: 2,
            name: "add_rating_index".to_string(),
            error: "syntax error".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Migration 2 (add_rating_index) failed: syntax error"
        );
    }

    #[test]
    fn test_from_write_passes_through_other_errors() {
        let err = SqliteError::from_write(sqlx::Error::RowNotFound, "dup", "missing");
        assert!(matches!(err, SqliteError::Database(sqlx::Error::RowNotFound)));
    }
}
