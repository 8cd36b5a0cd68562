//! User API endpoints

pub mod types;

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::extractors::{IdPath, ValidatedJson, ValidatedQuery};
use crate::api::types::{ApiError, ListResponse};
use crate::data::TransactionalService;
use crate::data::filters::{PredicateBuilder, columns};
use crate::data::types::{NewUser, UserChanges};

use types::{CreateUserRequest, ListUsersQuery, UpdateUserRequest, UserWithProfilesDto};

const NO_USERS: &str = "No users found matching the criteria.";

/// Shared state for Users API endpoints
#[derive(Clone)]
pub struct UsersApiState {
    pub database: Arc<TransactionalService>,
}

/// Build Users API routes
pub fn routes(database: Arc<TransactionalService>) -> Router<()> {
    let state = UsersApiState { database };

    Router::new()
        .route("/", get(list_users).post(create_user))
        .route("/{id}", get(get_user).put(update_user).delete(delete_user))
        .with_state(state)
}

fn user_not_found(id: &str) -> ApiError {
    ApiError::not_found("USER_NOT_FOUND", format!("User not found: {}", id))
}

/// List users with optional comma-separated filters
#[utoipa::path(
    get,
    path = "/api/v1/users",
    tag = "users",
    params(
        ("name" = Option<String>, Query, description = "Name contains any of (comma-separated)"),
        ("email" = Option<String>, Query, description = "Email contains any of (comma-separated)"),
        ("role" = Option<String>, Query, description = "Role is any of CLIMBER, BELAYER, ADMIN")
    ),
    responses(
        (status = 200, description = "Users with their profiles; empty list carries a message"),
        (status = 400, description = "Invalid query", body = crate::api::types::ErrorBody)
    )
)]
pub async fn list_users(
    State(state): State<UsersApiState>,
    ValidatedQuery(query): ValidatedQuery<ListUsersQuery>,
) -> Result<Json<ListResponse<UserWithProfilesDto>>, ApiError> {
    let predicate = PredicateBuilder::new()
        .field(&columns::USER_NAME, query.name.as_deref())
        .field(&columns::USER_EMAIL, query.email.as_deref())
        .field(&columns::USER_ROLE, query.role.as_deref())
        .build();

    let users = state
        .database
        .repository()
        .list_users(&predicate)
        .await
        .map_err(ApiError::from_data)?;

    let data = users.into_iter().map(UserWithProfilesDto::from).collect();
    Ok(Json(ListResponse::new(data, NO_USERS)))
}

/// Create a user
#[utoipa::path(
    post,
    path = "/api/v1/users",
    tag = "users",
    request_body = CreateUserRequest,
    responses(
        (status = 201, description = "User created", body = UserWithProfilesDto),
        (status = 400, description = "Missing fields, invalid role or email taken", body = crate::api::types::ErrorBody)
    )
)]
pub async fn create_user(
    State(state): State<UsersApiState>,
    ValidatedJson(body): ValidatedJson<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserWithProfilesDto>), ApiError> {
    let new_user = NewUser::try_from(body)?;

    let user = state
        .database
        .repository()
        .create_user(&new_user)
        .await
        .map_err(ApiError::from_data)?;

    Ok((StatusCode::CREATED, Json(UserWithProfilesDto::from(user))))
}

/// Get a user with both profiles
#[utoipa::path(
    get,
    path = "/api/v1/users/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 200, description = "User details", body = UserWithProfilesDto),
        (status = 400, description = "Invalid ID", body = crate::api::types::ErrorBody),
        (status = 404, description = "User not found", body = crate::api::types::ErrorBody)
    )
)]
pub async fn get_user(
    State(state): State<UsersApiState>,
    IdPath { id }: IdPath,
) -> Result<Json<UserWithProfilesDto>, ApiError> {
    let user = state
        .database
        .repository()
        .get_user(&id)
        .await
        .map_err(ApiError::from_data)?
        .ok_or_else(|| user_not_found(&id))?;

    Ok(Json(UserWithProfilesDto::from(user)))
}

/// Partially update a user, optionally with nested profile changes
#[utoipa::path(
    put,
    path = "/api/v1/users/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User ID")),
    request_body = UpdateUserRequest,
    responses(
        (status = 200, description = "User updated", body = UserWithProfilesDto),
        (status = 400, description = "Invalid request", body = crate::api::types::ErrorBody),
        (status = 404, description = "User or nested profile not found", body = crate::api::types::ErrorBody)
    )
)]
pub async fn update_user(
    State(state): State<UsersApiState>,
    IdPath { id }: IdPath,
    ValidatedJson(body): ValidatedJson<UpdateUserRequest>,
) -> Result<Json<UserWithProfilesDto>, ApiError> {
    let changes = UserChanges::try_from(body)?;

    let user = state
        .database
        .repository()
        .update_user(&id, &changes)
        .await
        .map_err(ApiError::from_data)?
        .ok_or_else(|| user_not_found(&id))?;

    Ok(Json(UserWithProfilesDto::from(user)))
}

/// Delete a user and their profiles
#[utoipa::path(
    delete,
    path = "/api/v1/users/{id}",
    tag = "users",
    params(("id" = String, Path, description = "User ID")),
    responses(
        (status = 204, description = "User deleted"),
        (status = 400, description = "Invalid ID", body = crate::api::types::ErrorBody),
        (status = 404, description = "User not found", body = crate::api::types::ErrorBody)
    )
)]
pub async fn delete_user(
    State(state): State<UsersApiState>,
    IdPath { id }: IdPath,
) -> Result<StatusCode, ApiError> {
    let deleted = state
        .database
        .repository()
        .delete_user(&id)
        .await
        .map_err(ApiError::from_data)?;

    if !deleted {
        return Err(user_not_found(&id));
    }

    Ok(StatusCode::NO_CONTENT)
}
