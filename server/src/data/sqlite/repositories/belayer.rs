//! Belayer profile repository for SQLite operations

use std::collections::HashMap;

use sqlx::{SqliteConnection, SqlitePool};

use crate::data::filters::{Predicate, SqlParams};
use crate::data::sqlite::SqliteError;
use crate::data::types::{
    BelayerProfileChanges, BelayerProfileRow, BelayerWithUser, NewBelayerProfile,
};

use super::{bind_params, fold, placeholders, user};

const BELAYER_COLUMNS: &str = "b.id, b.user_id, b.bio, b.certified_lead, b.certified_top_rope, \
     b.hourly_rate, b.rating, b.location, b.availability, b.created_at, b.updated_at";

type BelayerTuple = (
    String,
    String,
    Option<String>,
    bool,
    bool,
    Option<f64>,
    Option<f64>,
    Option<String>,
    Option<String>,
    i64,
    i64,
);

fn belayer_from_tuple(
    (
        id,
        user_id,
        bio,
        certified_lead,
        certified_top_rope,
        hourly_rate,
        rating,
        location,
        availability,
        created_at,
        updated_at,
    ): BelayerTuple,
) -> BelayerProfileRow {
    BelayerProfileRow {
        id,
        user_id,
        bio,
        certified_lead,
        certified_top_rope,
        hourly_rate,
        rating,
        location,
        availability,
        created_at,
        updated_at,
    }
}

/// Which column identifies the profile row to update
#[derive(Debug, Clone, Copy)]
pub enum Key<'a> {
    Id(&'a str),
    UserId(&'a str),
}

async fn with_users(
    pool: &SqlitePool,
    profiles: Vec<BelayerProfileRow>,
) -> Result<Vec<BelayerWithUser>, SqliteError> {
    let user_ids: Vec<String> = profiles.iter().map(|p| p.user_id.clone()).collect();
    let mut users = user::rows_by_ids(pool, &user_ids).await?;

    Ok(profiles
        .into_iter()
        .filter_map(|profile| {
            let user = users.remove(&profile.user_id)?;
            Some(BelayerWithUser { profile, user })
        })
        .collect())
}

/// Create a belayer profile with a generated CUID2 ID
///
/// Fails with `InvalidReference` if the user does not exist and with
/// `Conflict` if the user already has a belayer profile.
pub async fn create_belayer(
    pool: &SqlitePool,
    profile: &NewBelayerProfile,
) -> Result<BelayerWithUser, SqliteError> {
    let id = cuid2::create_id();
    let now = chrono::Utc::now().timestamp();

    sqlx::query(
        r#"
        INSERT INTO belayer_profiles (
            id, user_id, bio, bio_folded, certified_lead, certified_top_rope,
            hourly_rate, rating, location, location_folded,
            availability, availability_folded, created_at, updated_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&profile.user_id)
    .bind(profile.bio.as_deref())
    .bind(fold(profile.bio.as_deref()))
    .bind(profile.certified_lead)
    .bind(profile.certified_top_rope)
    .bind(profile.hourly_rate)
    .bind(profile.rating)
    .bind(profile.location.as_deref())
    .bind(fold(profile.location.as_deref()))
    .bind(profile.availability.as_deref())
    .bind(fold(profile.availability.as_deref()))
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .map_err(|e| {
        SqliteError::from_write(e, "User already has a belayer profile", "User not found")
    })?;

    tracing::debug!(belayer_id = %id, user_id = %profile.user_id, "Belayer profile created");

    get_belayer(pool, &id)
        .await?
        .ok_or(SqliteError::Database(sqlx::Error::RowNotFound))
}

/// Get a belayer profile by ID with its user
pub async fn get_belayer(
    pool: &SqlitePool,
    id: &str,
) -> Result<Option<BelayerWithUser>, SqliteError> {
    let sql = format!("SELECT {} FROM belayer_profiles b WHERE b.id = ?", BELAYER_COLUMNS);
    let Some(row) = sqlx::query_as::<_, BelayerTuple>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
    else {
        return Ok(None);
    };

    Ok(with_users(pool, vec![belayer_from_tuple(row)]).await?.pop())
}

/// Get the belayer profile owned by a user
pub async fn get_for_user(
    pool: &SqlitePool,
    user_id: &str,
) -> Result<Option<BelayerProfileRow>, SqliteError> {
    let sql = format!(
        "SELECT {} FROM belayer_profiles b WHERE b.user_id = ?",
        BELAYER_COLUMNS
    );
    let row = sqlx::query_as::<_, BelayerTuple>(&sql)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(belayer_from_tuple))
}

/// Belayer profiles for a set of users, keyed by user ID
pub async fn list_for_users(
    pool: &SqlitePool,
    user_ids: &[String],
) -> Result<HashMap<String, BelayerProfileRow>, SqliteError> {
    if user_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let sql = format!(
        "SELECT {} FROM belayer_profiles b WHERE b.user_id IN ({})",
        BELAYER_COLUMNS,
        placeholders(user_ids.len())
    );
    let mut query = sqlx::query_as::<_, BelayerTuple>(&sql);
    for id in user_ids {
        query = query.bind(id);
    }

    Ok(query
        .fetch_all(pool)
        .await?
        .into_iter()
        .map(|t| {
            let row = belayer_from_tuple(t);
            (row.user_id.clone(), row)
        })
        .collect())
}

/// List belayer profiles matching the predicate, oldest first, with their users
pub async fn list_belayers(
    pool: &SqlitePool,
    predicate: &Predicate,
) -> Result<Vec<BelayerWithUser>, SqliteError> {
    let mut params = SqlParams::default();
    let where_sql = predicate.to_sql(&mut params);
    let sql = format!(
        "SELECT {} FROM belayer_profiles b WHERE {} ORDER BY b.created_at, b.rowid",
        BELAYER_COLUMNS, where_sql
    );
    tracing::trace!(%sql, params = params.values.len(), "Listing belayer profiles");

    let profiles = bind_params(sqlx::query_as::<_, BelayerTuple>(&sql), &params)
        .fetch_all(pool)
        .await?
        .into_iter()
        .map(belayer_from_tuple)
        .collect();

    with_users(pool, profiles).await
}

/// Apply a partial update on an open connection or transaction
///
/// Returns `false` if no profile matched the key.
pub async fn apply_changes(
    conn: &mut SqliteConnection,
    key: Key<'_>,
    changes: &BelayerProfileChanges,
    now: i64,
) -> Result<bool, SqliteError> {
    let (column, value) = match key {
        Key::Id(id) => ("id", id),
        Key::UserId(user_id) => ("user_id", user_id),
    };

    let sql = format!(
        r#"
        UPDATE belayer_profiles SET
            bio = COALESCE(?, bio),
            bio_folded = COALESCE(?, bio_folded),
            certified_lead = COALESCE(?, certified_lead),
            certified_top_rope = COALESCE(?, certified_top_rope),
            hourly_rate = COALESCE(?, hourly_rate),
            rating = COALESCE(?, rating),
            location = COALESCE(?, location),
            location_folded = COALESCE(?, location_folded),
            availability = COALESCE(?, availability),
            availability_folded = COALESCE(?, availability_folded),
            updated_at = ?
        WHERE {} = ?
        "#,
        column
    );

    let result = sqlx::query(&sql)
        .bind(changes.bio.as_deref())
        .bind(fold(changes.bio.as_deref()))
        .bind(changes.certified_lead)
        .bind(changes.certified_top_rope)
        .bind(changes.hourly_rate)
        .bind(changes.rating)
        .bind(changes.location.as_deref())
        .bind(fold(changes.location.as_deref()))
        .bind(changes.availability.as_deref())
        .bind(fold(changes.availability.as_deref()))
        .bind(now)
        .bind(value)
        .execute(&mut *conn)
        .await
        .map_err(|e| {
            SqliteError::from_write(e, "User already has a belayer profile", "User not found")
        })?;

    Ok(result.rows_affected() > 0)
}

/// Update a belayer profile by ID
pub async fn update_belayer(
    pool: &SqlitePool,
    id: &str,
    changes: &BelayerProfileChanges,
) -> Result<Option<BelayerWithUser>, SqliteError> {
    let now = chrono::Utc::now().timestamp();
    let mut conn = pool.acquire().await?;
    let updated = apply_changes(&mut conn, Key::Id(id), changes, now).await?;
    drop(conn);

    if !updated {
        return Ok(None);
    }
    tracing::debug!(belayer_id = %id, "Belayer profile updated");
    get_belayer(pool, id).await
}

/// Delete a belayer profile by ID
pub async fn delete_belayer(pool: &SqlitePool, id: &str) -> Result<bool, SqliteError> {
    let result = sqlx::query("DELETE FROM belayer_profiles WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
