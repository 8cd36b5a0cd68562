//! Climber profile API endpoints

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
use crate::data::types::{ClimberProfileChanges, NewClimberProfile};

use types::{ClimberDto, CreateClimberRequest, ListClimbersQuery, UpdateClimberRequest};

const NO_CLIMBERS: &str = "No climbers found matching the criteria.";

/// Shared state for Climbers API endpoints
#[derive(Clone)]
pub struct ClimbersApiState {
    pub database: Arc<TransactionalService>,
}

/// Build Climbers API routes
pub fn routes(database: Arc<TransactionalService>) -> Router<()> {
    let state = ClimbersApiState { database };

    Router::new()
        .route("/", get(list_climbers).post(create_climber))
        .route(
            "/{id}",
            get(get_climber).put(update_climber).delete(delete_climber),
        )
        .with_state(state)
}

fn climber_not_found(id: &str) -> ApiError {
    ApiError::not_found(
        "CLIMBER_NOT_FOUND",
        format!("Climber profile not found: {}", id),
    )
}

/// List climber profiles with optional comma-separated filters
#[utoipa::path(
    get,
    path = "/api/v1/climbers",
    tag = "climbers",
    params(
        ("location" = Option<String>, Query, description = "Location contains any of (comma-separated)"),
        ("preferences" = Option<String>, Query, description = "Preferences contain any of (comma-separated)"),
        ("bio" = Option<String>, Query, description = "Bio contains any of (comma-separated)")
    ),
    responses(
        (status = 200, description = "Climber profiles with users; empty list carries a message"),
        (status = 400, description = "Invalid query", body = crate::api::types::ErrorBody)
    )
)]
pub async fn list_climbers(
    State(state): State<ClimbersApiState>,
    ValidatedQuery(query): ValidatedQuery<ListClimbersQuery>,
) -> Result<Json<ListResponse<ClimberDto>>, ApiError> {
    let predicate = PredicateBuilder::new()
        .field(&columns::CLIMBER_LOCATION, query.location.as_deref())
        .field(&columns::CLIMBER_PREFERENCES, query.preferences.as_deref())
        .field(&columns::CLIMBER_BIO, query.bio.as_deref())
        .build();

    let climbers = state
        .database
        .repository()
        .list_climbers(&predicate)
        .await
        .map_err(ApiError::from_data)?;

    let data = climbers.into_iter().map(ClimberDto::from).collect();
    Ok(Json(ListResponse::new(data, NO_CLIMBERS)))
}

/// Create a climber profile for an existing user
#[utoipa::path(
    post,
    path = "/api/v1/climbers",
    tag = "climbers",
    request_body = CreateClimberRequest,
    responses(
        (status = 201, description = "Climber profile created", body = ClimberDto),
        (status = 400, description = "Missing userId or user already has a profile", body = crate::api::types::ErrorBody),
        (status = 404, description = "User not found", body = crate::api::types::ErrorBody)
    )
)]
pub async fn create_climber(
    State(state): State<ClimbersApiState>,
    ValidatedJson(body): ValidatedJson<CreateClimberRequest>,
) -> Result<(StatusCode, Json<ClimberDto>), ApiError> {
    let user_id = body
        .required_user_id()
        .ok_or_else(|| ApiError::bad_request("MISSING_FIELDS", "userId is required"))?;

    let climber = state
        .database
        .repository()
        .create_climber(&NewClimberProfile {
            user_id,
            bio: body.bio,
            preferences: body.preferences,
            location: body.location,
        })
        .await
        .map_err(ApiError::from_data)?;

    Ok((StatusCode::CREATED, Json(ClimberDto::from(climber))))
}

/// Get a climber profile with its user
#[utoipa::path(
    get,
    path = "/api/v1/climbers/{id}",
    tag = "climbers",
    params(("id" = String, Path, description = "Climber profile ID")),
    responses(
        (status = 200, description = "Climber profile details", body = ClimberDto),
        (status = 400, description = "Invalid ID", body = crate::api::types::ErrorBody),
        (status = 404, description = "Climber profile not found", body = crate::api::types::ErrorBody)
    )
)]
pub async fn get_climber(
    State(state): State<ClimbersApiState>,
    IdPath { id }: IdPath,
) -> Result<Json<ClimberDto>, ApiError> {
    let climber = state
        .database
        .repository()
        .get_climber(&id)
        .await
        .map_err(ApiError::from_data)?
        .ok_or_else(|| climber_not_found(&id))?;

    Ok(Json(ClimberDto::from(climber)))
}

/// Partially update a climber profile
#[utoipa::path(
    put,
    path = "/api/v1/climbers/{id}",
    tag = "climbers",
    params(("id" = String, Path, description = "Climber profile ID")),
    request_body = UpdateClimberRequest,
    responses(
        (status = 200, description = "Climber profile updated", body = ClimberDto),
        (status = 400, description = "Invalid request", body = crate::api::types::ErrorBody),
        (status = 404, description = "Climber profile not found", body = crate::api::types::ErrorBody)
    )
)]
pub async fn update_climber(
    State(state): State<ClimbersApiState>,
    IdPath { id }: IdPath,
    ValidatedJson(body): ValidatedJson<UpdateClimberRequest>,
) -> Result<Json<ClimberDto>, ApiError> {
    let changes = ClimberProfileChanges::from(body);

    let climber = state
        .database
        .repository()
        .update_climber(&id, &changes)
        .await
        .map_err(ApiError::from_data)?
        .ok_or_else(|| climber_not_found(&id))?;

    Ok(Json(ClimberDto::from(climber)))
}

/// Delete a climber profile
#[utoipa::path(
    delete,
    path = "/api/v1/climbers/{id}",
    tag = "climbers",
    params(("id" = String, Path, description = "Climber profile ID")),
    responses(
        (status = 204, description = "Climber profile deleted"),
        (status = 400, description = "Invalid ID", body = crate::api::types::ErrorBody),
        (status = 404, description = "Climber profile not found", body = crate::api::types::ErrorBody)
    )
)]
pub async fn delete_climber(
    State(state): State<ClimbersApiState>,
    IdPath { id }: IdPath,
) -> Result<StatusCode, ApiError> {
    let deleted = state
        .database
        .repository()
        .delete_climber(&id)
        .await
        .map_err(ApiError::from_data)?;

    if !deleted {
        return Err(climber_not_found(&id));
    }
    Ok(StatusCode::NO_CONTENT)
}
