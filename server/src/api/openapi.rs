//! OpenAPI specification and Swagger UI

use axum::http::header;
use axum::response::{Html, IntoResponse, Json};
use utoipa::OpenApi;

use crate::api::routes::{belayers, climbers, health, users};
use crate::api::types::ErrorBody;
use crate::data::types::Role;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Belaymatch API",
        version = env!("CARGO_PKG_VERSION"),
        description = "Climbing partner matching"
    ),
    tags(
        (name = "health", description = "Health check endpoint"),
        (name = "users", description = "User management"),
        (name = "climbers", description = "Climber profiles"),
        (name = "belayers", description = "Belayer profiles")
    ),
    paths(
        // Health
        health::health,
        // Users
        users::list_users,
        users::create_user,
        users::get_user,
        users::update_user,
        users::delete_user,
        // Climbers
        climbers::list_climbers,
        climbers::create_climber,
        climbers::get_climber,
        climbers::update_climber,
        climbers::delete_climber,
        // Belayers
        belayers::list_belayers,
        belayers::create_belayer,
        belayers::get_belayer,
        belayers::update_belayer,
        belayers::delete_belayer,
    ),
    components(schemas(
        // API types
        ErrorBody,
        Role,
        // Health
        health::HealthResponse,
        // Users
        users::types::UserDto,
        users::types::UserWithProfilesDto,
        users::types::CreateUserRequest,
        users::types::UpdateUserRequest,
        users::types::ListUsersQuery,
        // Climbers
        climbers::types::ClimberProfileDto,
        climbers::types::ClimberDto,
        climbers::types::CreateClimberRequest,
        climbers::types::UpdateClimberRequest,
        climbers::types::ListClimbersQuery,
        // Belayers
        belayers::types::BelayerProfileDto,
        belayers::types::BelayerDto,
        belayers::types::CreateBelayerRequest,
        belayers::types::UpdateBelayerRequest,
        belayers::types::ListBelayersQuery,
    ))
)]
pub struct ApiDoc;

/// Serve OpenAPI JSON specification
pub async fn openapi_json() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "application/json")],
        Json(ApiDoc::openapi()),
    )
}

/// Serve Swagger UI from CDN
pub async fn swagger_ui_html() -> Html<&'static str> {
    Html(SWAGGER_UI_HTML)
}

const SWAGGER_UI_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Belaymatch API Documentation</title>
    <link rel="stylesheet" type="text/css" href="https://unpkg.com/swagger-ui-dist@5/swagger-ui.css">
    <style>
        html { box-sizing: border-box; overflow-y: scroll; }
        *, *:before, *:after { box-sizing: inherit; }
        body { margin: 0; background: #fafafa; }
    </style>
</head>
<body>
    <div id="swagger-ui"></div>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-bundle.js"></script>
    <script src="https://unpkg.com/swagger-ui-dist@5/swagger-ui-standalone-preset.js"></script>
    <script>
        window.onload = () => {
            window.ui = SwaggerUIBundle({
                url: "/api/openapi.json",
                dom_id: '#swagger-ui',
                presets: [
                    SwaggerUIBundle.presets.apis,
                    SwaggerUIStandalonePreset
                ],
                layout: "StandaloneLayout",
                deepLinking: true,
                showExtensions: true,
                showCommonExtensions: true
            });
        };
    </script>
</body>
</html>"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_resource_paths() {
        let doc = ApiDoc::openapi();
        for path in [
            "/api/v1/health",
            "/api/v1/users",
            "/api/v1/users/{id}",
            "/api/v1/climbers",
            "/api/v1/climbers/{id}",
            "/api/v1/belayers",
            "/api/v1/belayers/{id}",
        ] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
