//! TransactionalRepository trait implementation for SQLite
//!
//! Implements the TransactionalRepository trait for Arc<SqliteService> by
//! delegating to the free functions in `repositories`.

use std::sync::Arc;

use async_trait::async_trait;

use crate::data::error::DataError;
use crate::data::filters::Predicate;
use crate::data::traits::TransactionalRepository;
use crate::data::types::{
    BelayerProfileChanges, BelayerWithUser, ClimberProfileChanges, ClimberWithUser,
    NewBelayerProfile, NewClimberProfile, NewUser, UserChanges, UserWithProfiles,
};

use super::SqliteService;
use super::repositories::{belayer, climber, user};

#[async_trait]
impl TransactionalRepository for Arc<SqliteService> {
    // ==================== User Operations ====================

    async fn list_users(&self, predicate: &Predicate) -> Result<Vec<UserWithProfiles>, DataError> {
        user::list_users(self.pool(), predicate)
            .await
            .map_err(Into::into)
    }

    async fn get_user(&self, id: &str) -> Result<Option<UserWithProfiles>, DataError> {
        user::get_user(self.pool(), id).await.map_err(Into::into)
    }

    async fn create_user(&self, new_user: &NewUser) -> Result<UserWithProfiles, DataError> {
        user::create_user(self.pool(), new_user)
            .await
            .map_err(Into::into)
    }

    async fn update_user(
        &self,
        id: &str,
        changes: &UserChanges,
    ) -> Result<Option<UserWithProfiles>, DataError> {
        user::update_user(self.pool(), id, changes)
            .await
            .map_err(Into::into)
    }

    async fn delete_user(&self, id: &str) -> Result<bool, DataError> {
        user::delete_user(self.pool(), id).await.map_err(Into::into)
    }

    // ==================== Climber Profile Operations ====================

    async fn list_climbers(&self, predicate: &Predicate) -> Result<Vec<ClimberWithUser>, DataError> {
        climber::list_climbers(self.pool(), predicate)
            .await
            .map_err(Into::into)
    }

    async fn get_climber(&self, id: &str) -> Result<Option<ClimberWithUser>, DataError> {
        climber::get_climber(self.pool(), id)
            .await
            .map_err(Into::into)
    }

    async fn create_climber(
        &self,
        profile: &NewClimberProfile,
    ) -> Result<ClimberWithUser, DataError> {
        climber::create_climber(self.pool(), profile)
            .await
            .map_err(Into::into)
    }

    async fn update_climber(
        &self,
        id: &str,
        changes: &ClimberProfileChanges,
    ) -> Result<Option<ClimberWithUser>, DataError> {
        climber::update_climber(self.pool(), id, changes)
            .await
            .map_err(Into::into)
    }

    async fn delete_climber(&self, id: &str) -> Result<bool, DataError> {
        climber::delete_climber(self.pool(), id)
            .await
            .map_err(Into::into)
    }

    // ==================== Belayer Profile Operations ====================

    async fn list_belayers(&self, predicate: &Predicate) -> Result<Vec<BelayerWithUser>, DataError> {
        belayer::list_belayers(self.pool(), predicate)
            .await
            .map_err(Into::into)
    }

    async fn get_belayer(&self, id: &str) -> Result<Option<BelayerWithUser>, DataError> {
        belayer::get_belayer(self.pool(), id)
            .await
            .map_err(Into::into)
    }

    async fn create_belayer(
        &self,
        profile: &NewBelayerProfile,
    ) -> Result<BelayerWithUser, DataError> {
        belayer::create_belayer(self.pool(), profile)
            .await
            .map_err(Into::into)
    }

    async fn update_belayer(
        &self,
        id: &str,
        changes: &BelayerProfileChanges,
    ) -> Result<Option<BelayerWithUser>, DataError> {
        belayer::update_belayer(self.pool(), id, changes)
            .await
            .map_err(Into::into)
    }

    async fn delete_belayer(&self, id: &str) -> Result<bool, DataError> {
        belayer::delete_belayer(self.pool(), id)
            .await
            .map_err(Into::into)
    }
}
