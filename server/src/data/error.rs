//! Error type for the data layer

use thiserror::Error;

/// Error type for data layer operations
#[derive(Error, Debug)]
pub enum DataError {
    /// SQLite database error
    #[error("SQLite error: {0}")]
    Sqlite(sqlx::Error),

    /// Migration failed
    #[error("Migration {version} ({name}) failed on {backend}: {error}")]
    MigrationFailed {
        backend: &'static str,
        version: i32,
        name: String,
        error: String,
    },

    /// Unique constraint violated (duplicate email, second profile for a user)
    #[error("Conflict: {0}")]
    Conflict(String),

    /// A referenced row does not exist
    #[error("Invalid reference: {0}")]
    InvalidReference(String),

    /// A stored value fails a column constraint
    #[error("Invalid value: {0}")]
    Invalid(String),
}

impl DataError {
    /// Check if this is a connection-related error that might be transient
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Sqlite(e) => matches!(
                e,
                sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed | sqlx::Error::Io(_)
            ),
            _ => false,
        }
    }
}

impl From<crate::data::sqlite::SqliteError> for DataError {
    fn from(e: crate::data::sqlite::SqliteError) -> Self {
        match e {
            crate::data::sqlite::SqliteError::Database(e) => Self::Sqlite(e),
            crate::data::sqlite::SqliteError::MigrationFailed {
                version,
                name,
                error,
            } => Self::MigrationFailed {
                backend: "sqlite",
                version,
                name,
                error,
            },
            crate::data::sqlite::SqliteError::Conflict(msg) => Self::Conflict(msg),
            crate::data::sqlite::SqliteError::InvalidReference(msg) => Self::InvalidReference(msg),
            crate::data::sqlite::SqliteError::Invalid(msg) => Self::Invalid(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::sqlite::SqliteError;

    #[test]
    fn test_migration_failed_from_sqlite() {
        let err: DataError = SqliteError::MigrationFailed {
            version: 2,
            name: "add_rating_index".to_string(),
            error: "syntax error".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Migration 2 (add_rating_index) failed on sqlite: syntax error"
        );
    }

    #[test]
    fn test_conflict_and_reference_preserved() {
        let err: DataError = SqliteError::Conflict("Email already in use".into()).into();
        assert!(matches!(err, DataError::Conflict(ref m) if m == "Email already in use"));

        let err: DataError = SqliteError::InvalidReference("User not found".into()).into();
        assert!(matches!(err, DataError::InvalidReference(ref m) if m == "User not found"));

        let err: DataError = SqliteError::Invalid("Invalid field value".into()).into();
        assert!(matches!(err, DataError::Invalid(ref m) if m == "Invalid field value"));
    }

    #[test]
    fn test_is_transient() {
        assert!(DataError::Sqlite(sqlx::Error::PoolTimedOut).is_transient());
        assert!(!DataError::Sqlite(sqlx::Error::RowNotFound).is_transient());
        assert!(!DataError::Invalid("Invalid field value".into()).is_transient());
        assert!(!DataError::Conflict("dup".into()).is_transient());
    }
}
