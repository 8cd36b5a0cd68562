//! Health check endpoint

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use utoipa::ToSchema;

use crate::data::TransactionalService;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// `ok` or `unavailable`
    pub status: &'static str,
    pub version: &'static str,
    /// `ok` or `unavailable`
    pub database: &'static str,
}

/// Report service and database liveness
#[utoipa::path(
    get,
    path = "/api/v1/health",
    tag = "health",
    responses(
        (status = 200, description = "Service and database are healthy", body = HealthResponse),
        (status = 503, description = "Database is unreachable", body = HealthResponse)
    )
)]
pub async fn health(
    State(database): State<Arc<TransactionalService>>,
) -> (StatusCode, Json<HealthResponse>) {
    let (status, state) = match database.ping().await {
        Ok(()) => (StatusCode::OK, "ok"),
        Err(e) => {
            tracing::warn!(error = %e, "Health check database ping failed");
            (StatusCode::SERVICE_UNAVAILABLE, "unavailable")
        }
    };

    (
        status,
        Json(HealthResponse {
            status: state,
            version: env!("CARGO_PKG_VERSION"),
            database: state,
        }),
    )
}

/// Build the health route
pub fn routes(database: Arc<TransactionalService>) -> Router<()> {
    Router::new().route("/", get(health)).with_state(database)
}

#[cfg(test)]
mod tests {
    use axum::http::Method;

    use super::*;
    use crate::api::routes::test_support::send;

    #[tokio::test]
    async fn test_health_reports_database_ok() {
        let database = Arc::new(TransactionalService::in_memory().await.unwrap());
        let (status, body) = send(&routes(database), Method::GET, "/", None).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ok");
        assert_eq!(body["database"], "ok");
        assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    }

    #[tokio::test]
    async fn test_health_unavailable_after_close() {
        let database = Arc::new(TransactionalService::in_memory().await.unwrap());
        database.close().await;
        let (status, body) = send(&routes(database), Method::GET, "/", None).await;

        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "unavailable");
        assert_eq!(body["database"], "unavailable");
    }
}
