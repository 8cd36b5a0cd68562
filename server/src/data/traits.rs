//! Repository trait for the transactional backend
//!
//! Handlers talk to storage only through this trait, obtained from
//! `TransactionalService::repository()`.

use async_trait::async_trait;

use crate::data::error::DataError;
use crate::data::filters::Predicate;
use crate::data::types::{
    BelayerProfileChanges, BelayerWithUser, ClimberProfileChanges, ClimberWithUser,
    NewBelayerProfile, NewClimberProfile, NewUser, UserChanges, UserWithProfiles,
};

/// Repository trait for users and their climber/belayer profiles
///
/// Updates return `None` and deletes return `false` when the id does not exist.
#[async_trait]
pub trait TransactionalRepository: Send + Sync {
    // ==================== User Operations ====================

    /// List users matching the predicate, each with both profiles
    async fn list_users(&self, predicate: &Predicate) -> Result<Vec<UserWithProfiles>, DataError>;

    async fn get_user(&self, id: &str) -> Result<Option<UserWithProfiles>, DataError>;

    async fn create_user(&self, user: &NewUser) -> Result<UserWithProfiles, DataError>;

    /// Apply a partial update, including nested profile changes, in one transaction
    async fn update_user(
        &self,
        id: &str,
        changes: &UserChanges,
    ) -> Result<Option<UserWithProfiles>, DataError>;

    /// Delete a user (profiles cascade)
    async fn delete_user(&self, id: &str) -> Result<bool, DataError>;

    // ==================== Climber Profile Operations ====================

    async fn list_climbers(&self, predicate: &Predicate) -> Result<Vec<ClimberWithUser>, DataError>;

    async fn get_climber(&self, id: &str) -> Result<Option<ClimberWithUser>, DataError>;

    async fn create_climber(&self, profile: &NewClimberProfile)
    -> Result<ClimberWithUser, DataError>;

    async fn update_climber(
        &self,
        id: &str,
        changes: &ClimberProfileChanges,
    ) -> Result<Option<ClimberWithUser>, DataError>;

    async fn delete_climber(&self, id: &str) -> Result<bool, DataError>;

    // ==================== Belayer Profile Operations ====================

    async fn list_belayers(&self, predicate: &Predicate) -> Result<Vec<BelayerWithUser>, DataError>;

    async fn get_belayer(&self, id: &str) -> Result<Option<BelayerWithUser>, DataError>;

    async fn create_belayer(&self, profile: &NewBelayerProfile)
    -> Result<BelayerWithUser, DataError>;

    async fn update_belayer(
        &self,
        id: &str,
        changes: &BelayerProfileChanges,
    ) -> Result<Option<BelayerWithUser>, DataError>;

    async fn delete_belayer(&self, id: &str) -> Result<bool, DataError>;
}
