//! Climber profile API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::routes::users::types::UserDto;
use crate::api::types::{non_blank, timestamp};
use crate::core::constants::{MAX_ID_LENGTH, MAX_LOCATION_LENGTH, MAX_TEXT_LENGTH};
use crate::data::types::{ClimberProfileChanges, ClimberProfileRow, ClimberWithUser};

/// Climber profile DTO for API responses
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClimberProfileDto {
    pub id: String,
    pub user_id: String,
    pub bio: Option<String>,
    pub preferences: Option<String>,
    pub location: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ClimberProfileRow> for ClimberProfileDto {
    fn from(row: ClimberProfileRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            bio: row.bio,
            preferences: row.preferences,
            location: row.location,
            created_at: timestamp(row.created_at),
            updated_at: timestamp(row.updated_at),
        }
    }
}

/// Climber profile with its owning user
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ClimberDto {
    #[serde(flatten)]
    pub profile: ClimberProfileDto,
    pub user: UserDto,
}

impl From<ClimberWithUser> for ClimberDto {
    fn from(row: ClimberWithUser) -> Self {
        Self {
            profile: row.profile.into(),
            user: row.user.into(),
        }
    }
}

/// Request body for creating a climber profile
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateClimberRequest {
    /// Owning user (required)
    #[validate(length(max = MAX_ID_LENGTH, message = "userId is too long"))]
    pub user_id: Option<String>,

    #[validate(length(max = MAX_TEXT_LENGTH, message = "bio is too long"))]
    pub bio: Option<String>,

    #[validate(length(max = MAX_TEXT_LENGTH, message = "preferences is too long"))]
    pub preferences: Option<String>,

    #[validate(length(max = MAX_LOCATION_LENGTH, message = "location is too long"))]
    pub location: Option<String>,
}

/// Request body for updating a climber profile (also nested in user updates)
///
/// Absent or null fields are left unchanged.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClimberRequest {
    #[validate(length(max = MAX_TEXT_LENGTH, message = "bio is too long"))]
    pub bio: Option<String>,

    #[validate(length(max = MAX_TEXT_LENGTH, message = "preferences is too long"))]
    pub preferences: Option<String>,

    #[validate(length(max = MAX_LOCATION_LENGTH, message = "location is too long"))]
    pub location: Option<String>,
}

impl From<UpdateClimberRequest> for ClimberProfileChanges {
    fn from(body: UpdateClimberRequest) -> Self {
        Self {
            bio: body.bio,
            preferences: body.preferences,
            location: body.location,
        }
    }
}

/// Query params for listing climber profiles
///
/// Each value is a comma-separated list; a profile matches if it contains
/// any of the values (case-insensitive), and all given fields must match.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ListClimbersQuery {
    #[validate(length(max = MAX_TEXT_LENGTH))]
    pub location: Option<String>,
    #[validate(length(max = MAX_TEXT_LENGTH))]
    pub preferences: Option<String>,
    #[validate(length(max = MAX_TEXT_LENGTH))]
    pub bio: Option<String>,
}

impl CreateClimberRequest {
    /// Owning user ID, if present and not blank
    pub fn required_user_id(&self) -> Option<String> {
        non_blank(self.user_id.clone())
    }
}
