//! Belayer profile API endpoints

pub mod types;

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::extractors::{IdPath, ValidatedJson, ValidatedQuery};
use crate::api::types::{ApiError, ListResponse, parse_bound};
use crate::data::TransactionalService;
use crate::data::filters::{Predicate, PredicateBuilder, columns};
use crate::data::types::{BelayerProfileChanges, NewBelayerProfile};

use types::{BelayerDto, CreateBelayerRequest, ListBelayersQuery, UpdateBelayerRequest};

const NO_BELAYERS: &str = "No belayers found matching the criteria.";

/// Shared state for Belayers API endpoints
#[derive(Clone)]
pub struct BelayersApiState {
    pub database: Arc<TransactionalService>,
}

/// Build Belayers API routes
pub fn routes(database: Arc<TransactionalService>) -> Router<()> {
    let state = BelayersApiState { database };

    Router::new()
        .route("/", get(list_belayers).post(create_belayer))
        .route(
            "/{id}",
            get(get_belayer).put(update_belayer).delete(delete_belayer),
        )
        .with_state(state)
}

fn belayer_not_found(id: &str) -> ApiError {
    ApiError::not_found(
        "BELAYER_NOT_FOUND",
        format!("Belayer profile not found: {}", id),
    )
}

fn list_predicate(query: &ListBelayersQuery) -> Result<Predicate, ApiError> {
    let rate_min = parse_bound("hourlyRateMin", query.hourly_rate_min.as_deref())?;
    let rate_max = parse_bound("hourlyRateMax", query.hourly_rate_max.as_deref())?;
    let rating_min = parse_bound("ratingMin", query.rating_min.as_deref())?;
    let rating_max = parse_bound("ratingMax", query.rating_max.as_deref())?;

    Ok(PredicateBuilder::new()
        .field(&columns::BELAYER_BIO, query.bio.as_deref())
        .field(&columns::BELAYER_LOCATION, query.location.as_deref())
        .field(&columns::BELAYER_AVAILABILITY, query.availability.as_deref())
        .field(
            &columns::BELAYER_CERTIFIED_LEAD,
            query.certified_lead.as_deref(),
        )
        .field(
            &columns::BELAYER_CERTIFIED_TOP_ROPE,
            query.certified_top_rope.as_deref(),
        )
        .range(columns::BELAYER_HOURLY_RATE, rate_min, rate_max)
        .range(columns::BELAYER_RATING, rating_min, rating_max)
        .build())
}

/// List belayer profiles with optional filters and numeric ranges
#[utoipa::path(
    get,
    path = "/api/v1/belayers",
    tag = "belayers",
    params(
        ("bio" = Option<String>, Query, description = "Bio contains any of (comma-separated)"),
        ("location" = Option<String>, Query, description = "Location contains any of (comma-separated)"),
        ("availability" = Option<String>, Query, description = "Availability contains any of (comma-separated)"),
        ("certifiedLead" = Option<String>, Query, description = "Each token is true only if it equals \"true\""),
        ("certifiedTopRope" = Option<String>, Query, description = "Each token is true only if it equals \"true\""),
        ("hourlyRateMin" = Option<f64>, Query, description = "Inclusive lower bound on hourly rate"),
        ("hourlyRateMax" = Option<f64>, Query, description = "Inclusive upper bound on hourly rate"),
        ("ratingMin" = Option<f64>, Query, description = "Inclusive lower bound on rating"),
        ("ratingMax" = Option<f64>, Query, description = "Inclusive upper bound on rating")
    ),
    responses(
        (status = 200, description = "Belayer profiles with users; empty list carries a message"),
        (status = 400, description = "Invalid query", body = crate::api::types::ErrorBody)
    )
)]
pub async fn list_belayers(
    State(state): State<BelayersApiState>,
    ValidatedQuery(query): ValidatedQuery<ListBelayersQuery>,
) -> Result<Json<ListResponse<BelayerDto>>, ApiError> {
    let predicate = list_predicate(&query)?;

    let belayers = state
        .database
        .repository()
        .list_belayers(&predicate)
        .await
        .map_err(ApiError::from_data)?;

    let data = belayers.into_iter().map(BelayerDto::from).collect();
    Ok(Json(ListResponse::new(data, NO_BELAYERS)))
}

/// Create a belayer profile for an existing user
#[utoipa::path(
    post,
    path = "/api/v1/belayers",
    tag = "belayers",
    request_body = CreateBelayerRequest,
    responses(
        (status = 201, description = "Belayer profile created", body = BelayerDto),
        (status = 400, description = "Missing userId, negative numbers or user already has a profile", body = crate::api::types::ErrorBody),
        (status = 404, description = "User not found", body = crate::api::types::ErrorBody)
    )
)]
pub async fn create_belayer(
    State(state): State<BelayersApiState>,
    ValidatedJson(body): ValidatedJson<CreateBelayerRequest>,
) -> Result<(StatusCode, Json<BelayerDto>), ApiError> {
    let user_id = body
        .required_user_id()
        .ok_or_else(|| ApiError::bad_request("MISSING_FIELDS", "userId is required"))?;

    let belayer = state
        .database
        .repository()
        .create_belayer(&NewBelayerProfile {
            user_id,
            bio: body.bio,
            certified_lead: body.certified_lead,
            certified_top_rope: body.certified_top_rope,
            hourly_rate: body.hourly_rate,
            rating: body.rating,
            location: body.location,
            availability: body.availability,
        })
        .await
        .map_err(ApiError::from_data)?;

    Ok((StatusCode::CREATED, Json(BelayerDto::from(belayer))))
}

/// Get a belayer profile with its user
#[utoipa::path(
    get,
    path = "/api/v1/belayers/{id}",
    tag = "belayers",
    params(("id" = String, Path, description = "Belayer profile ID")),
    responses(
        (status = 200, description = "Belayer profile details", body = BelayerDto),
        (status = 400, description = "Invalid ID", body = crate::api::types::ErrorBody),
        (status = 404, description = "Belayer profile not found", body = crate::api::types::ErrorBody)
    )
)]
pub async fn get_belayer(
    State(state): State<BelayersApiState>,
    IdPath { id }: IdPath,
) -> Result<Json<BelayerDto>, ApiError> {
    let belayer = state
        .database
        .repository()
        .get_belayer(&id)
        .await
        .map_err(ApiError::from_data)?
        .ok_or_else(|| belayer_not_found(&id))?;

    Ok(Json(BelayerDto::from(belayer)))
}

/// Partially update a belayer profile
#[utoipa::path(
    put,
    path = "/api/v1/belayers/{id}",
    tag = "belayers",
    params(("id" = String, Path, description = "Belayer profile ID")),
    request_body = UpdateBelayerRequest,
    responses(
        (status = 200, description = "Belayer profile updated", body = BelayerDto),
        (status = 400, description = "Invalid request", body = crate::api::types::ErrorBody),
        (status = 404, description = "Belayer profile not found", body = crate::api::types::ErrorBody)
    )
)]
pub async fn update_belayer(
    State(state): State<BelayersApiState>,
    IdPath { id }: IdPath,
    ValidatedJson(body): ValidatedJson<UpdateBelayerRequest>,
) -> Result<Json<BelayerDto>, ApiError> {
    let changes = BelayerProfileChanges::from(body);

    let belayer = state
        .database
        .repository()
        .update_belayer(&id, &changes)
        .await
        .map_err(ApiError::from_data)?
        .ok_or_else(|| belayer_not_found(&id))?;

    Ok(Json(BelayerDto::from(belayer)))
}

/// Delete a belayer profile
#[utoipa::path(
    delete,
    path = "/api/v1/belayers/{id}",
    tag = "belayers",
    params(("id" = String, Path, description = "Belayer profile ID")),
    responses(
        (status = 204, description = "Belayer profile deleted"),
        (status = 400, description = "Invalid ID", body = crate::api::types::ErrorBody),
        (status = 404, description = "Belayer profile not found", body = crate::api::types::ErrorBody)
    )
)]
pub async fn delete_belayer(
    State(state): State<BelayersApiState>,
    IdPath { id }: IdPath,
) -> Result<StatusCode, ApiError> {
    let deleted = state
        .database
        .repository()
        .delete_belayer(&id)
        .await
        .map_err(ApiError::from_data)?;

    if !deleted {
        return Err(belayer_not_found(&id));
    }
    Ok(StatusCode::NO_CONTENT)
}
