//! SQLite repositories
//!
//! Types (UserRow, ClimberProfileRow, etc.) should be imported from `crate::data::types`.

pub mod belayer;
pub mod climber;
pub mod user;

use sqlx::Sqlite;
use sqlx::query::QueryAs;
use sqlx::sqlite::SqliteArguments;

use crate::data::filters::{SqlParams, SqlValue};

/// Bind collected filter parameters in order
fn bind_params<'q, O>(
    mut query: QueryAs<'q, Sqlite, O, SqliteArguments<'q>>,
    params: &SqlParams,
) -> QueryAs<'q, Sqlite, O, SqliteArguments<'q>> {
    for value in &params.values {
        query = match value {
            SqlValue::Text(s) => query.bind(s.clone()),
            SqlValue::Bool(b) => query.bind(*b),
            SqlValue::Real(f) => query.bind(*f),
        };
    }
    query
}

/// Lowercased copy for a `*_folded` filter column
fn fold(value: Option<&str>) -> Option<String> {
    value.map(str::to_lowercase)
}

/// `?, ?, ?` for an IN list of `n` values
fn placeholders(n: usize) -> String {
    vec!["?"; n].join(", ")
}

#[cfg(test)]
pub(crate) mod test_support {
    use sqlx::SqlitePool;

    use crate::data::sqlite::SqliteService;
    use crate::data::types::{NewUser, Role, UserRow};

    pub async fn pool() -> SqlitePool {
        SqliteService::in_memory().await.unwrap().pool().clone()
    }

    pub async fn user(pool: &SqlitePool, name: &str, role: Role) -> UserRow {
        super::user::create_user(
            pool,
            &NewUser {
                name: name.to_string(),
                email: format!("{}@example.com", name.to_lowercase()),
                password: "hunter2".to_string(),
                role,
            },
        )
        .await
        .unwrap()
        .user
    }
}
