//! Belayer profile API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::routes::users::types::UserDto;
use crate::api::types::{non_blank, timestamp};
use crate::core::constants::{MAX_ID_LENGTH, MAX_LOCATION_LENGTH, MAX_TEXT_LENGTH};
use crate::data::types::{BelayerProfileChanges, BelayerProfileRow, BelayerWithUser};

/// Belayer profile DTO for API responses
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BelayerProfileDto {
    pub id: String,
    pub user_id: String,
    pub bio: Option<String>,
    pub certified_lead: bool,
    pub certified_top_rope: bool,
    pub hourly_rate: Option<f64>,
    pub rating: Option<f64>,
    pub location: Option<String>,
    pub availability: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<BelayerProfileRow> for BelayerProfileDto {
    fn from(row: BelayerProfileRow) -> Self {
        Self {
            id: row.id,
            user_id: row.user_id,
            bio: row.bio,
            certified_lead: row.certified_lead,
            certified_top_rope: row.certified_top_rope,
            hourly_rate: row.hourly_rate,
            rating: row.rating,
            location: row.location,
            availability: row.availability,
            created_at: timestamp(row.created_at),
            updated_at: timestamp(row.updated_at),
        }
    }
}

/// Belayer profile with its owning user
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BelayerDto {
    #[serde(flatten)]
    pub profile: BelayerProfileDto,
    pub user: UserDto,
}

impl From<BelayerWithUser> for BelayerDto {
    fn from(row: BelayerWithUser) -> Self {
        Self {
            profile: row.profile.into(),
            user: row.user.into(),
        }
    }
}

/// Request body for creating a belayer profile
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateBelayerRequest {
    /// Owning user (required)
    #[validate(length(max = MAX_ID_LENGTH, message = "userId is too long"))]
    pub user_id: Option<String>,

    #[validate(length(max = MAX_TEXT_LENGTH, message = "bio is too long"))]
    pub bio: Option<String>,

    #[serde(default)]
    pub certified_lead: bool,

    #[serde(default)]
    pub certified_top_rope: bool,

    #[validate(range(min = 0.0, message = "hourlyRate must be >= 0"))]
    pub hourly_rate: Option<f64>,

    #[validate(range(min = 0.0, message = "rating must be >= 0"))]
    pub rating: Option<f64>,

    #[validate(length(max = MAX_LOCATION_LENGTH, message = "location is too long"))]
    pub location: Option<String>,

    #[validate(length(max = MAX_TEXT_LENGTH, message = "availability is too long"))]
    pub availability: Option<String>,
}

impl CreateBelayerRequest {
    /// Owning user ID, if present and not blank
    pub fn required_user_id(&self) -> Option<String> {
        non_blank(self.user_id.clone())
    }
}

/// Request body for updating a belayer profile (also nested in user updates)
///
/// Absent or null fields are left unchanged.
#[derive(Debug, Default, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateBelayerRequest {
    #[validate(length(max = MAX_TEXT_LENGTH, message = "bio is too long"))]
    pub bio: Option<String>,

    pub certified_lead: Option<bool>,

    pub certified_top_rope: Option<bool>,

    #[validate(range(min = 0.0, message = "hourlyRate must be >= 0"))]
    pub hourly_rate: Option<f64>,

    #[validate(range(min = 0.0, message = "rating must be >= 0"))]
    pub rating: Option<f64>,

    #[validate(length(max = MAX_LOCATION_LENGTH, message = "location is too long"))]
    pub location: Option<String>,

    #[validate(length(max = MAX_TEXT_LENGTH, message = "availability is too long"))]
    pub availability: Option<String>,
}

impl From<UpdateBelayerRequest> for BelayerProfileChanges {
    fn from(body: UpdateBelayerRequest) -> Self {
        Self {
            bio: body.bio,
            certified_lead: body.certified_lead,
            certified_top_rope: body.certified_top_rope,
            hourly_rate: body.hourly_rate,
            rating: body.rating,
            location: body.location,
            availability: body.availability,
        }
    }
}

/// Query params for listing belayer profiles
///
/// Text and certification values are comma-separated lists (OR within a
/// field, AND across fields). Range bounds are inclusive; blank bounds are
/// ignored.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ListBelayersQuery {
    #[validate(length(max = MAX_TEXT_LENGTH))]
    pub bio: Option<String>,
    #[validate(length(max = MAX_TEXT_LENGTH))]
    pub location: Option<String>,
    #[validate(length(max = MAX_TEXT_LENGTH))]
    pub availability: Option<String>,
    #[validate(length(max = MAX_TEXT_LENGTH))]
    pub certified_lead: Option<String>,
    #[validate(length(max = MAX_TEXT_LENGTH))]
    pub certified_top_rope: Option<String>,
    pub hourly_rate_min: Option<String>,
    pub hourly_rate_max: Option<String>,
    pub rating_min: Option<String>,
    pub rating_max: Option<String>,
}
