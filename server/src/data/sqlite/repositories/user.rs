//! User repository for SQLite operations

use std::collections::HashMap;

use sqlx::SqlitePool;

use crate::data::filters::{Predicate, SqlParams};
use crate::data::sqlite::SqliteError;
use crate::data::types::{NewUser, Role, UserChanges, UserRow, UserWithProfiles};

use super::{belayer, bind_params, climber, fold, placeholders};

const USER_COLUMNS: &str = "u.id, u.name, u.email, u.password, u.role, u.created_at, u.updated_at";

const EMAIL_TAKEN: &str = "Email already in use";

type UserTuple = (String, String, String, String, String, i64, i64);

fn user_from_tuple(
    (id, name, email, password, role, created_at, updated_at): UserTuple,
) -> Result<UserRow, SqliteError> {
    let role = Role::parse(&role).ok_or_else(|| {
        SqliteError::Database(sqlx::Error::Decode(
            format!("Invalid role in users table: {}", role).into(),
        ))
    })?;
    Ok(UserRow {
        id,
        name,
        email,
        password,
        role,
        created_at,
        updated_at,
    })
}

/// Create a new user with a generated CUID2 ID
pub async fn create_user(pool: &SqlitePool, user: &NewUser) -> Result<UserWithProfiles, SqliteError> {
    let id = cuid2::create_id();
    let now = chrono::Utc::now().timestamp();

    sqlx::query(
        r#"
        INSERT INTO users (
            id, name, name_folded, email, email_folded, password, role, created_at, updated_at
        ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&id)
    .bind(&user.name)
    .bind(user.name.to_lowercase())
    .bind(&user.email)
    .bind(user.email.to_lowercase())
    .bind(&user.password)
    .bind(user.role.as_str())
    .bind(now)
    .bind(now)
    .execute(pool)
    .await
    .map_err(|e| SqliteError::from_write(e, EMAIL_TAKEN, "User not found"))?;

    tracing::debug!(user_id = %id, role = %user.role, "User created");

    Ok(UserWithProfiles {
        user: UserRow {
            id,
            name: user.name.clone(),
            email: user.email.clone(),
            password: user.password.clone(),
            role: user.role,
            created_at: now,
            updated_at: now,
        },
        climber_profile: None,
        belayer_profile: None,
    })
}

/// Get a bare user row by ID
pub async fn get_user_row(pool: &SqlitePool, id: &str) -> Result<Option<UserRow>, SqliteError> {
    let sql = format!("SELECT {} FROM users u WHERE u.id = ?", USER_COLUMNS);
    let row = sqlx::query_as::<_, UserTuple>(&sql)
        .bind(id)
        .fetch_optional(pool)
        .await?;

    row.map(user_from_tuple).transpose()
}

/// Get a user by ID together with both profiles
pub async fn get_user(pool: &SqlitePool, id: &str) -> Result<Option<UserWithProfiles>, SqliteError> {
    let Some(user) = get_user_row(pool, id).await? else {
        return Ok(None);
    };

    let climber_profile = climber::get_for_user(pool, id).await?;
    let belayer_profile = belayer::get_for_user(pool, id).await?;

    Ok(Some(UserWithProfiles {
        user,
        climber_profile,
        belayer_profile,
    }))
}

/// Fetch user rows keyed by ID
pub async fn rows_by_ids(
    pool: &SqlitePool,
    ids: &[String],
) -> Result<HashMap<String, UserRow>, SqliteError> {
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let sql = format!(
        "SELECT {} FROM users u WHERE u.id IN ({})",
        USER_COLUMNS,
        placeholders(ids.len())
    );
    let mut query = sqlx::query_as::<_, UserTuple>(&sql);
    for id in ids {
        query = query.bind(id);
    }

    query
        .fetch_all(pool)
        .await?
        .into_iter()
        .map(|t| user_from_tuple(t).map(|u| (u.id.clone(), u)))
        .collect()
}

/// List users matching the predicate, oldest first, each with both profiles
pub async fn list_users(
    pool: &SqlitePool,
    predicate: &Predicate,
) -> Result<Vec<UserWithProfiles>, SqliteError> {
    let mut params = SqlParams::default();
    let where_sql = predicate.to_sql(&mut params);
    let sql = format!(
        "SELECT {} FROM users u WHERE {} ORDER BY u.created_at, u.rowid",
        USER_COLUMNS, where_sql
    );
    tracing::trace!(%sql, params = params.values.len(), "Listing users");

    let users = bind_params(sqlx::query_as::<_, UserTuple>(&sql), &params)
        .fetch_all(pool)
        .await?
        .into_iter()
        .map(user_from_tuple)
        .collect::<Result<Vec<_>, _>>()?;

    let ids: Vec<String> = users.iter().map(|u| u.id.clone()).collect();
    let mut climbers = climber::list_for_users(pool, &ids).await?;
    let mut belayers = belayer::list_for_users(pool, &ids).await?;

    Ok(users
        .into_iter()
        .map(|user| UserWithProfiles {
            climber_profile: climbers.remove(&user.id),
            belayer_profile: belayers.remove(&user.id),
            user,
        })
        .collect())
}

/// Update a user and any nested profile changes in one transaction
///
/// Returns `None` if the user does not exist. A nested change for a profile
/// the user does not have fails with `InvalidReference` and nothing is written.
pub async fn update_user(
    pool: &SqlitePool,
    id: &str,
    changes: &UserChanges,
) -> Result<Option<UserWithProfiles>, SqliteError> {
    let now = chrono::Utc::now().timestamp();
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        UPDATE users SET
            name = COALESCE(?, name),
            name_folded = COALESCE(?, name_folded),
            email = COALESCE(?, email),
            email_folded = COALESCE(?, email_folded),
            role = COALESCE(?, role),
            updated_at = ?
        WHERE id = ?
        "#,
    )
    .bind(changes.name.as_deref())
    .bind(fold(changes.name.as_deref()))
    .bind(changes.email.as_deref())
    .bind(fold(changes.email.as_deref()))
    .bind(changes.role.map(|r| r.as_str()))
    .bind(now)
    .bind(id)
    .execute(&mut *tx)
    .await
    .map_err(|e| SqliteError::from_write(e, EMAIL_TAKEN, "User not found"))?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    if let Some(profile) = &changes.climber_profile
        && !climber::apply_changes(&mut *tx, climber::Key::UserId(id), profile, now).await?
    {
        return Err(SqliteError::InvalidReference(
            "Climber profile not found".to_string(),
        ));
    }

    if let Some(profile) = &changes.belayer_profile
        && !belayer::apply_changes(&mut *tx, belayer::Key::UserId(id), profile, now).await?
    {
        return Err(SqliteError::InvalidReference(
            "Belayer profile not found".to_string(),
        ));
    }

    tx.commit().await?;
    tracing::debug!(user_id = %id, "User updated");

    get_user(pool, id).await
}

/// Delete a user. Profiles are removed by the foreign key cascade.
pub async fn delete_user(pool: &SqlitePool, id: &str) -> Result<bool, SqliteError> {
    let result = sqlx::query("DELETE FROM users WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    let deleted = result.rows_affected() > 0;
    if deleted {
        tracing::debug!(user_id = %id, "User deleted");
    }
    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::filters::{PredicateBuilder, columns};
    use crate::data::sqlite::repositories::test_support;
    use crate::data::types::{ClimberProfileChanges, NewClimberProfile};

    fn new_user(name: &str, email: &str, role: Role) -> NewUser {
        NewUser {
            name: name.to_string(),
            email: email.to_string(),
            password: "hunter2".to_string(),
            role,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_user() {
        let pool = test_support::pool().await;
        let created = create_user(&pool, &new_user("Alex", "alex@example.com", Role::Climber))
            .await
            .unwrap();

        let fetched = get_user(&pool, &created.user.id).await.unwrap().unwrap();
        assert_eq!(fetched.user.name, "Alex");
        assert_eq!(fetched.user.role, Role::Climber);
        assert_eq!(fetched.user.password, "hunter2");
        assert!(fetched.climber_profile.is_none());
        assert!(fetched.belayer_profile.is_none());
    }

    #[tokio::test]
    async fn test_get_user_missing() {
        let pool = test_support::pool().await;
        assert!(get_user(&pool, "nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_email_is_conflict() {
        let pool = test_support::pool().await;
        create_user(&pool, &new_user("A", "same@example.com", Role::Climber))
            .await
            .unwrap();
        let err = create_user(&pool, &new_user("B", "same@example.com", Role::Belayer))
            .await
            .unwrap_err();
        assert!(matches!(err, SqliteError::Conflict(ref m) if m == EMAIL_TAKEN));
    }

    #[tokio::test]
    async fn test_short_email_is_invalid() {
        let pool = test_support::pool().await;
        let err = create_user(&pool, &new_user("Al", "ab", Role::Admin))
            .await
            .unwrap_err();
        assert!(matches!(err, SqliteError::Invalid(_)));

        let all = list_users(&pool, &Predicate::match_all()).await.unwrap();
        assert!(all.is_empty());
    }

    #[tokio::test]
    async fn test_list_users_name_folds_non_ascii_case() {
        let pool = test_support::pool().await;
        let user = test_support::user(&pool, "Élodie", Role::Climber).await;
        test_support::user(&pool, "Sam", Role::Belayer).await;

        let predicate = PredicateBuilder::new()
            .field(&columns::USER_NAME, Some("élodie"))
            .build();
        let users = list_users(&pool, &predicate).await.unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].user.id, user.id);

        let changes = UserChanges {
            name: Some("ÖZGÜR".into()),
            ..Default::default()
        };
        update_user(&pool, &user.id, &changes).await.unwrap();

        let predicate = PredicateBuilder::new()
            .field(&columns::USER_NAME, Some("özgür"))
            .build();
        assert_eq!(list_users(&pool, &predicate).await.unwrap().len(), 1);
        assert!(list_users(
            &pool,
            &PredicateBuilder::new()
                .field(&columns::USER_NAME, Some("élodie"))
                .build()
        )
        .await
        .unwrap()
        .is_empty());
    }

    #[tokio::test]
    async fn test_list_users_role_filter_drops_invalid_tokens() {
        let pool = test_support::pool().await;
        test_support::user(&pool, "Admin", Role::Admin).await;
        test_support::user(&pool, "Climber", Role::Climber).await;

        let mixed = PredicateBuilder::new()
            .field(&columns::USER_ROLE, Some("ADMIN,bogus"))
            .build();
        let only_admin = PredicateBuilder::new()
            .field(&columns::USER_ROLE, Some("ADMIN"))
            .build();

        let a: Vec<String> = list_users(&pool, &mixed)
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.user.id)
            .collect();
        let b: Vec<String> = list_users(&pool, &only_admin)
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.user.id)
            .collect();
        assert_eq!(a, b);
        assert_eq!(a.len(), 1);
    }

    #[tokio::test]
    async fn test_list_users_name_contains_case_insensitive() {
        let pool = test_support::pool().await;
        test_support::user(&pool, "Sasha", Role::Climber).await;
        test_support::user(&pool, "Robin", Role::Belayer).await;

        let predicate = PredicateBuilder::new()
            .field(&columns::USER_NAME, Some("SASH, bin"))
            .build();
        let users = list_users(&pool, &predicate).await.unwrap();
        assert_eq!(users.len(), 2);

        let all = list_users(&pool, &Predicate::match_all()).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_list_users_includes_profiles() {
        let pool = test_support::pool().await;
        let user = test_support::user(&pool, "Kai", Role::Climber).await;
        climber::create_climber(
            &pool,
            &NewClimberProfile {
                user_id: user.id.clone(),
                location: Some("Boulder".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let users = list_users(&pool, &Predicate::match_all()).await.unwrap();
        assert_eq!(
            users[0]
                .climber_profile
                .as_ref()
                .and_then(|p| p.location.as_deref()),
            Some("Boulder")
        );
        assert!(users[0].belayer_profile.is_none());
    }

    #[tokio::test]
    async fn test_update_user_partial_with_nested_profile() {
        let pool = test_support::pool().await;
        let user = test_support::user(&pool, "Jo", Role::Climber).await;
        climber::create_climber(
            &pool,
            &NewClimberProfile {
                user_id: user.id.clone(),
                bio: Some("old".into()),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        let changes = UserChanges {
            name: Some("Joanna".into()),
            climber_profile: Some(ClimberProfileChanges {
                bio: Some("new".into()),
                ..Default::default()
            }),
            ..Default::default()
        };
        let updated = update_user(&pool, &user.id, &changes)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.user.name, "Joanna");
        assert_eq!(updated.user.email, user.email);
        assert_eq!(
            updated.climber_profile.unwrap().bio.as_deref(),
            Some("new")
        );
    }

    #[tokio::test]
    async fn test_update_user_missing_nested_profile_rolls_back() {
        let pool = test_support::pool().await;
        let user = test_support::user(&pool, "Lee", Role::Belayer).await;

        let changes = UserChanges {
            name: Some("Changed".into()),
            climber_profile: Some(ClimberProfileChanges::default()),
            ..Default::default()
        };
        let err = update_user(&pool, &user.id, &changes).await.unwrap_err();
        assert!(matches!(err, SqliteError::InvalidReference(_)));

        let unchanged = get_user_row(&pool, &user.id).await.unwrap().unwrap();
        assert_eq!(unchanged.name, "Lee");
    }

    #[tokio::test]
    async fn test_update_user_missing() {
        let pool = test_support::pool().await;
        let changes = UserChanges {
            name: Some("x".into()),
            ..Default::default()
        };
        assert!(update_user(&pool, "nope", &changes).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_user_cascades_profiles() {
        let pool = test_support::pool().await;
        let user = test_support::user(&pool, "Max", Role::Climber).await;
        let profile = climber::create_climber(
            &pool,
            &NewClimberProfile {
                user_id: user.id.clone(),
                ..Default::default()
            },
        )
        .await
        .unwrap();

        assert!(delete_user(&pool, &user.id).await.unwrap());
        assert!(!delete_user(&pool, &user.id).await.unwrap());
        assert!(
            climber::get_climber(&pool, &profile.profile.id)
                .await
                .unwrap()
                .is_none()
        );
    }
}
