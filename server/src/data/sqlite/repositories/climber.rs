//! Climber profile repository for SQLite operations

use std::collections::HashMap;

use sqlx::{SqliteConnection, SqlitePool};

use crate::data::filters::{Predicate, SqlParams};
use crate::data::sqlite::SqliteError;
use crate::data::types::{
    ClimberProfileChanges, ClimberProfileRow, ClimberWithUser, NewClimberProfile,
};

use super::{bind_params, fold, placeholders, user};

const CLIMBER_COLUMNS: &str =
    "c.id, c.user_id, c.bio, c.preferences, c.location, c.created_at, c.updated_at";

type ClimberTuple = (
    String,
    String,
    Option<String>,
    Option<String>,
    Option<String>,
    i64,
    i64,
);

fn climber_from_tuple(
    (id, user_id, bio, preferences, location, created_at, updated_at): ClimberTuple,
) -> ClimberProfileRow {
    ClimberProfileRow {
        id,
        user_id,
        bio,
        preferences,
        location,
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

/// Attach owning users; profiles whose user vanished concurrently are skipped
async fn with_users(
    pool: &SqlitePool,
    profiles: Vec<ClimberProfileRow>,
) -> Result<Vec<ClimberWithUser>, SqliteError> {
    let user_ids: Vec<String> = profiles.iter().map(|p| p.user_id.clone()).collect();
    let mut users = user::rows_by_ids(pool, &user_ids).await?;

    Ok(profiles
        .into_iter()
        .filter_map(|profile| {
            let user = users.remove(&profile.user_id)?;
            Some(ClimberWithUser { profile, user })
        })
        .collect())
}

/// Create a climber profile with a generated CUID2 ID
///
/// Fails with `InvalidReference` if the user does not exist and with
/// `Conflict` if the user already has a climber profile.
pub async fn create_climber(
    pool: &SqlitePool,
    profile: &NewClimberProfile,
) -> Result<ClimberWithUser, SqliteError> {
    let id = cuid2::create_id();
    let now = chrono::Utc::now().timestamp();

    sqlx::query(
        r#"
        INSERT INTO climber_profiles (
            id, user_id, bio, bio_folded, preferences, preferences_folded,
            location, location_folded, created_at, updated_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&profile.user_id)
    .bind(profile.bio.as_deref())
    .bind(fold(profile.bio.as_deref()))
    .bind(profile.preferences.as_deref())
    .bind(fold(profile.preferences.as_deref()))
    .bind(profile.location.as_deref())
    .bind(fold(profile.location.as_deref()))
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .map_err(|e| {
        SqliteError::from_write(e, "User already has a climber profile", "User not found")
    })?;

    tracing::debug!(climber_id = %id, user_id = %profile.user_id, "Climber profile created");

    get_climber(pool, &id)
        .await?
        .ok_or(SqliteError::Database(sqlx::Error::RowNotFound))
}

/// Get a climber profile by ID with its user
pub async fn get_climber(
    pool: &SqlitePool,
    id: &str,
) -> Result<Option<ClimberWithUser>, SqliteError> {
    let sql = format!("SELECT {} FROM climber_profiles c WHERE c.id = ?", CLIMBER_COLUMNS);
    let Some(row) = sqlx::query_as::<_, ClimberTuple>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?
    else {
        return Ok(None);
    };

    Ok(with_users(pool, vec![climber_from_tuple(row)]).await?.pop())
}

/// Get the climber profile owned by a user
pub async fn get_for_user(
    pool: &SqlitePool,
    user_id: &str,
) -> Result<Option<ClimberProfileRow>, SqliteError> {
    let sql = format!(
        "SELECT {} FROM climber_profiles c WHERE c.user_id = ?",
        CLIMBER_COLUMNS
    );
    let row = sqlx::query_as::<_, ClimberTuple>(&sql)
        .bind(user_id)
        .fetch_optional(pool)
        .await?;
    Ok(row.map(climber_from_tuple))
}

/// Climber profiles for a set of users, keyed by user ID
pub async fn list_for_users(
    pool: &SqlitePool,
    user_ids: &[String],
) -> Result<HashMap<String, ClimberProfileRow>, SqliteError> {
    if user_ids.is_empty() {
        return Ok(HashMap::new());
    }

    let sql = format!(
        "SELECT {} FROM climber_profiles c WHERE c.user_id IN ({})",
        CLIMBER_COLUMNS,
        placeholders(user_ids.len())
    );
    let mut query = sqlx::query_as::<_, ClimberTuple>(&sql);
    for id in user_ids {
        query = query.bind(id);
    }

    Ok(query
        .fetch_all(pool)
        .await?
        .into_iter()
        .map(|t| {
            let row = climber_from_tuple(t);
            (row.user_id.clone(), row)
        })
        .collect())
}

/// List climber profiles matching the predicate, oldest first, with their users
pub async fn list_climbers(
    pool: &SqlitePool,
    predicate: &Predicate,
) -> Result<Vec<ClimberWithUser>, SqliteError> {
    let mut params = SqlParams::default();
    let where_sql = predicate.to_sql(&mut params);
    let sql = format!(
        "SELECT {} FROM climber_profiles c WHERE {} ORDER BY c.created_at, c.rowid",
        CLIMBER_COLUMNS, where_sql
    );
    tracing::trace!(%sql, params = params.values.len(), "Listing climber profiles");

    let profiles = bind_params(sqlx::query_as::<_, ClimberTuple>(&sql), &params)
        .fetch_all(pool)
        .await?
        .into_iter()
        .map(climber_from_tuple)
        .collect();

    with_users(pool, profiles).await
}

/// Apply a partial update on an open connection or transaction
///
/// Returns `false` if no profile matched the key.
pub async fn apply_changes(
    conn: &mut SqliteConnection,
    key: Key<'_>,
    changes: &ClimberProfileChanges,
    now: i64,
) -> Result<bool, SqliteError> {
    let (column, value) = match key {
        Key::Id(id) => ("id", id),
        Key::UserId(user_id) => ("user_id", user_id),
    };

    let sql = format!(
        r#"
        UPDATE climber_profiles SET
            bio = COALESCE(?, bio),
            bio_folded = COALESCE(?, bio_folded),
            preferences = COALESCE(?, preferences),
            preferences_folded = COALESCE(?, preferences_folded),
            location = COALESCE(?, location),
            location_folded = COALESCE(?, location_folded),
            updated_at = ?
        WHERE {} = ?
        "#,
        column
    );

    let result = sqlx::query(&sql)
        .bind(changes.bio.as_deref())
        .bind(fold(changes.bio.as_deref()))
        .bind(changes.preferences.as_deref())
        .bind(fold(changes.preferences.as_deref()))
        .bind(changes.location.as_deref())
        .bind(fold(changes.location.as_deref()))
        .bind(now)
        .bind(value)
        .execute(&mut *conn)
        .await?;

    Ok(result.rows_affected() > 0)
}

/// Update a climber profile by ID
pub async fn update_climber(
    pool: &SqlitePool,
    id: &str,
    changes: &ClimberProfileChanges,
) -> Result<Option<ClimberWithUser>, SqliteError> {
    let now = chrono::Utc::now().timestamp();
    let mut conn = pool.acquire().await?;
    let updated = apply_changes(&mut conn, Key::Id(id), changes, now).await?;
    drop(conn);

    if !updated {
        return Ok(None);
    }
    tracing::debug!(climber_id = %id, "Climber profile updated");
    get_climber(pool, id).await
}

/// Delete a climber profile by ID
pub async fn delete_climber(pool: &SqlitePool, id: &str) -> Result<bool, SqliteError> {
    let result = sqlx::query("DELETE FROM climber_profiles WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filters::{PredicateBuilder, columns};
    use crate::data::sqlite::repositories::test_support;
    use crate::data::types::Role;

    async fn climber_at(pool: &SqlitePool, name: &str, location: &str) -> ClimberWithUser {
        let user = test_support::user(pool, name, Role::Climber).await;
        create_climber(
            pool,
            &NewClimberProfile {
                user_id: user.id,
                location: Some(location.to_string()),
                preferences: Some("sport, trad".to_string()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_create_includes_user() {
        let pool = test_support::pool().await;
        let created = climber_at(&pool, "Ana", "Yosemite").await;
        assert_eq!(created.user.name, "Ana");
        assert_eq!(created.profile.location.as_deref(), Some("Yosemite"));
    }

    #[tokio::test]
    async fn test_create_for_missing_user_is_invalid_reference() {
        let pool = test_support::pool().await;
        let err = create_climber(
            &pool,
            &NewClimberProfile {
                user_id: "ghost".into(),
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, SqliteError::InvalidReference(_)));
    }

    #[tokio::test]
    async fn test_second_profile_for_user_is_conflict() {
        let pool = test_support::pool().await;
        let first = climber_at(&pool, "Bo", "Fontainebleau").await;
        let err = create_climber(
            &pool,
            &NewClimberProfile {
                user_id: first.user.id,
                ..Default::default()
            },
        )
        .await
        .unwrap_err();
        assert!(matches!(err, SqliteError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_location_filter_or_within_field() {
        let pool = test_support::pool().await;
        climber_at(&pool, "Cy", "NYC Gunks").await;
        climber_at(&pool, "Di", "nyc bouldering gym").await;
        climber_at(&pool, "Ed", "Red River Gorge").await;

        let predicate = PredicateBuilder::new()
            .field(&columns::CLIMBER_LOCATION, Some("NYC, , nyc"))
            .build();
        let climbers = list_climbers(&pool, &predicate).await.unwrap();
        let names: Vec<&str> = climbers.iter().map(|c| c.user.name.as_str()).collect();
        assert_eq!(names, vec!["Cy", "Di"]);
    }

    #[tokio::test]
    async fn test_filters_and_across_fields() {
        let pool = test_support::pool().await;
        climber_at(&pool, "Fi", "Boulder").await;

        let hit = PredicateBuilder::new()
            .field(&columns::CLIMBER_LOCATION, Some("boulder"))
            .field(&columns::CLIMBER_PREFERENCES, Some("trad"))
            .build();
        assert_eq!(list_climbers(&pool, &hit).await.unwrap().len(), 1);

        let miss = PredicateBuilder::new()
            .field(&columns::CLIMBER_LOCATION, Some("boulder"))
            .field(&columns::CLIMBER_PREFERENCES, Some("ice"))
            .build();
        assert!(list_climbers(&pool, &miss).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_like_metacharacters_match_literally() {
        let pool = test_support::pool().await;
        climber_at(&pool, "Gus", "Smith Rock").await;

        let predicate = PredicateBuilder::new()
            .field(&columns::CLIMBER_LOCATION, Some("%"))
            .build();
        assert!(list_climbers(&pool, &predicate).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_location_filter_folds_non_ascii_case() {
        let pool = test_support::pool().await;
        let created = climber_at(&pool, "Iris", "Écrins").await;
        climber_at(&pool, "Jon", "Ceüse").await;

        let predicate = PredicateBuilder::new()
            .field(&columns::CLIMBER_LOCATION, Some("ÉCRINS"))
            .build();
        let names: Vec<String> = list_climbers(&pool, &predicate)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.user.name)
            .collect();
        assert_eq!(names, vec!["Iris"]);

        update_climber(
            &pool,
            &created.profile.id,
            &ClimberProfileChanges {
                location: Some("CEÜSE sector".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let predicate = PredicateBuilder::new()
            .field(&columns::CLIMBER_LOCATION, Some("ceüse"))
            .build();
        assert_eq!(list_climbers(&pool, &predicate).await.unwrap().len(), 2);
        let predicate = PredicateBuilder::new()
            .field(&columns::CLIMBER_LOCATION, Some("écrins"))
            .build();
        assert!(list_climbers(&pool, &predicate).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_and_delete() {
        let pool = test_support::pool().await;
        let created = climber_at(&pool, "Hal", "Moab").await;
        let id = created.profile.id.clone();

        let updated = update_climber(
            &pool,
            &id,
            &ClimberProfileChanges {
                bio: Some("Desert towers".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap()
        .unwrap();
        assert_eq!(updated.profile.bio.as_deref(), Some("Desert towers"));
        assert_eq!(updated.profile.location.as_deref(), Some("Moab"));

        assert!(delete_climber(&pool, &id).await.unwrap());
        assert!(!delete_climber(&pool, &id).await.unwrap());
        assert!(
            update_climber(&pool, &id, &ClimberProfileChanges::default())
                .await
                .unwrap()
                .is_none()
        );
    }
}
