//! User API types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::api::routes::belayers::types::{BelayerProfileDto, UpdateBelayerRequest};
use crate::api::routes::climbers::types::{ClimberProfileDto, UpdateClimberRequest};
use crate::api::types::{ApiError, non_blank, timestamp, validate_email_length};
use crate::core::constants::{MAX_NAME_LENGTH, MAX_TEXT_LENGTH};
use crate::data::types::{NewUser, Role, UserChanges, UserRow, UserWithProfiles};

/// User DTO for API responses. Never carries the password.
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<UserRow> for UserDto {
    fn from(row: UserRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            email: row.email,
            role: row.role,
            created_at: timestamp(row.created_at),
            updated_at: timestamp(row.updated_at),
        }
    }
}

/// User with both optional profiles
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserWithProfilesDto {
    #[serde(flatten)]
    pub user: UserDto,
    pub climber_profile: Option<ClimberProfileDto>,
    pub belayer_profile: Option<BelayerProfileDto>,
}

impl From<UserWithProfiles> for UserWithProfilesDto {
    fn from(row: UserWithProfiles) -> Self {
        Self {
            user: row.user.into(),
            climber_profile: row.climber_profile.map(Into::into),
            belayer_profile: row.belayer_profile.map(Into::into),
        }
    }
}

fn parse_role(raw: &str) -> Result<Role, ApiError> {
    Role::parse(raw).ok_or_else(|| {
        ApiError::bad_request(
            "INVALID_ROLE",
            format!("Invalid role: must be one of {}", Role::NAMES.join(", ")),
        )
    })
}

/// Request body for creating a user
///
/// All four fields are required; they are optional here so a missing field
/// yields "Missing required fields" instead of a parse error.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUserRequest {
    #[validate(length(max = MAX_NAME_LENGTH, message = "name must be at most 100 characters"))]
    pub name: Option<String>,

    #[validate(custom(function = "validate_email_length"))]
    pub email: Option<String>,

    /// Stored as given
    #[validate(length(max = MAX_TEXT_LENGTH, message = "password is too long"))]
    pub password: Option<String>,

    /// One of CLIMBER, BELAYER, ADMIN
    pub role: Option<String>,
}

impl TryFrom<CreateUserRequest> for NewUser {
    type Error = ApiError;

    fn try_from(body: CreateUserRequest) -> Result<Self, Self::Error> {
        let (Some(name), Some(email), Some(password), Some(role)) = (
            non_blank(body.name),
            non_blank(body.email),
            non_blank(body.password),
            non_blank(body.role),
        ) else {
            return Err(ApiError::bad_request(
                "MISSING_FIELDS",
                "Missing required fields",
            ));
        };

        Ok(Self {
            name,
            email,
            password,
            role: parse_role(&role)?,
        })
    }
}

/// Request body for updating a user
///
/// Absent, null or blank scalar fields are left unchanged. Nested profile
/// objects update the user's existing profile.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateUserRequest {
    #[validate(length(max = MAX_NAME_LENGTH, message = "name must be at most 100 characters"))]
    pub name: Option<String>,

    #[validate(custom(function = "validate_email_length"))]
    pub email: Option<String>,

    pub role: Option<String>,

    #[validate(nested)]
    pub climber_profile: Option<UpdateClimberRequest>,

    #[validate(nested)]
    pub belayer_profile: Option<UpdateBelayerRequest>,
}

impl TryFrom<UpdateUserRequest> for UserChanges {
    type Error = ApiError;

    fn try_from(body: UpdateUserRequest) -> Result<Self, Self::Error> {
        let role = non_blank(body.role)
            .map(|r| parse_role(&r))
            .transpose()?;

        Ok(Self {
            name: non_blank(body.name),
            email: non_blank(body.email),
            role,
            climber_profile: body.climber_profile.map(Into::into),
            belayer_profile: body.belayer_profile.map(Into::into),
        })
    }
}

/// Query params for listing users
///
/// Each value is a comma-separated list. `name` and `email` match by
/// case-insensitive substring; `role` keeps only exact role names.
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct ListUsersQuery {
    #[validate(length(max = MAX_TEXT_LENGTH))]
    pub name: Option<String>,
    #[validate(length(max = MAX_TEXT_LENGTH))]
    pub email: Option<String>,
    #[validate(length(max = MAX_TEXT_LENGTH))]
    pub role: Option<String>,
}
