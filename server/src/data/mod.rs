//! Data storage layer
//!
//! - `sqlite` - Transactional database for users and profiles
//! - `filters` - Comma-separated query values to AND-of-OR predicates
//! - `types` - Row and input types shared with the API layer
//! - `traits` - Repository trait the API talks to
//! - `error` - Unified error type

pub mod error;
pub mod filters;
pub mod sqlite;
pub mod traits;
pub mod types;

pub use error::DataError;
pub use sqlite::SqliteService;
pub use traits::TransactionalRepository;

use std::sync::Arc;
use tokio::sync::watch;
use tokio::task::JoinHandle;

use crate::core::config::DatabaseConfig;
use crate::core::storage::AppStorage;

/// Transactional database service
///
/// Process-wide owner of the SQLite backend. Created once at startup and
/// shared via `Arc`; `close()` is the single drain hook.
pub struct TransactionalService {
    sqlite: Arc<SqliteService>,
}

impl TransactionalService {
    /// Initialize the backend under the storage data directory
    pub async fn init(storage: &AppStorage, config: &DatabaseConfig) -> Result<Self, DataError> {
        let service = SqliteService::init(storage, config).await?;
        Ok(Self {
            sqlite: Arc::new(service),
        })
    }

    /// Migrated in-memory backend
    #[cfg(test)]
    pub async fn in_memory() -> Result<Self, DataError> {
        let service = SqliteService::in_memory().await?;
        Ok(Self {
            sqlite: Arc::new(service),
        })
    }

    /// Check that the database answers queries
    pub async fn ping(&self) -> Result<(), DataError> {
        self.sqlite.ping().await.map_err(Into::into)
    }

    /// Run a WAL checkpoint
    pub async fn checkpoint(&self) -> Result<(), DataError> {
        self.sqlite.checkpoint().await.map_err(Into::into)
    }

    /// Close the database connection gracefully
    pub async fn close(&self) {
        self.sqlite.close().await;
    }

    /// Start the background checkpoint task
    pub fn start_checkpoint_task(&self, shutdown_rx: watch::Receiver<bool>) -> JoinHandle<()> {
        self.sqlite.start_checkpoint_task(shutdown_rx)
    }

    /// Get a repository for data operations
    pub fn repository(&self) -> Box<dyn TransactionalRepository + Send + Sync> {
        Box::new(Arc::clone(&self.sqlite))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filters::Predicate;
    use crate::data::types::{NewUser, Role};

    #[tokio::test]
    async fn test_ping_fails_after_close() {
        let service = TransactionalService::in_memory().await.unwrap();
        service.ping().await.unwrap();

        service.close().await;
        let err = service.ping().await.unwrap_err();
        assert!(err.is_transient());
    }

    #[tokio::test]
    async fn test_repository_shares_backend() {
        let service = TransactionalService::in_memory().await.unwrap();
        let created = service
            .repository()
            .create_user(&NewUser {
                name: "Pat".into(),
                email: "pat@example.com".into(),
                password: "pw".into(),
                role: Role::Admin,
            })
            .await
            .unwrap();

        let users = service
            .repository()
            .list_users(&Predicate::match_all())
            .await
            .unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].user.id, created.user.id);
    }
}
