//! HTTP middleware (CORS, 404 handler, 405 body)

use axum::Json;
use axum::body::{Body, to_bytes};
use axum::extract::Request;
use axum::http::{HeaderValue, Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use tower_http::cors::{AllowOrigin, CorsLayer};

use crate::core::config::is_all_interfaces;

/// Allowed origins configuration
#[derive(Debug, Clone)]
pub struct AllowedOrigins {
    origins: Vec<String>,
}

impl AllowedOrigins {
    /// Create allowed origins from host and port configuration
    pub fn new(host: &str, port: u16) -> Self {
        let mut origins = Vec::new();
        let is_all = is_all_interfaces(host);

        // Loopback and wildcard binds accept both loopback spellings
        let base_hosts: Vec<&str> = if is_all || host == "127.0.0.1" || host == "localhost" {
            vec!["localhost", "127.0.0.1"]
        } else {
            vec![host]
        };

        for h in &base_hosts {
            origins.push(format!("http://{}:{}", h, port));
            origins.push(format!("http://{}", h));
        }

        if is_all && let Ok(interfaces) = local_ip_address::list_afinet_netifas() {
            for (_, ip) in interfaces
                .iter()
                .filter(|(_, ip)| ip.is_ipv4() && !ip.is_loopback())
            {
                origins.push(format!("http://{}:{}", ip, port));
            }
        }

        Self { origins }
    }

    /// Check if an origin is allowed
    pub fn is_allowed(&self, origin: &str) -> bool {
        self.origins.iter().any(|o| o == origin)
    }

    fn as_header_values(&self) -> Vec<HeaderValue> {
        self.origins.iter().filter_map(|o| o.parse().ok()).collect()
    }
}

/// Create CORS layer
pub fn cors(allowed: &AllowedOrigins) -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed.as_header_values()))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT, header::ORIGIN])
}

const MAX_404_BODY_LOG: usize = 64 * 1024;

/// Handle 404 Not Found with debug logging of the request
pub async fn handle_404(req: Request) -> impl IntoResponse {
    let not_found = || {
        (
            StatusCode::NOT_FOUND,
            Json(serde_json::json!({ "error": "Not found", "code": "NOT_FOUND" })),
        )
    };

    if !tracing::enabled!(tracing::Level::DEBUG) {
        return not_found();
    }

    let method = req.method().clone();
    let uri = req.uri().clone();

    match to_bytes(req.into_body(), MAX_404_BODY_LOG).await {
        Ok(body) if body.is_empty() => tracing::debug!("[404] {} {}", method, uri),
        Ok(body) => tracing::debug!(
            body = %String::from_utf8_lossy(&body),
            "[404] {} {}",
            method,
            uri
        ),
        Err(_) => tracing::debug!("[404] {} {} (failed to read body)", method, uri),
    }

    not_found()
}

/// Give 405 responses a JSON body, keeping the router's `Allow` header
pub async fn method_not_allowed_json(response: Response) -> Response {
    if response.status() != StatusCode::METHOD_NOT_ALLOWED {
        return response;
    }

    let (mut parts, _) = response.into_parts();
    parts.headers.remove(header::CONTENT_LENGTH);
    parts.headers.insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    let body = serde_json::json!({
        "error": "Method not allowed",
        "code": "METHOD_NOT_ALLOWED"
    });
    Response::from_parts(parts, Body::from(body.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_origins_loopback() {
        let origins = AllowedOrigins::new("127.0.0.1", 5390);
        assert!(origins.is_allowed("http://localhost:5390"));
        assert!(origins.is_allowed("http://127.0.0.1:5390"));
        assert!(!origins.is_allowed("http://evil.example:5390"));
    }

    #[test]
    fn test_allowed_origins_custom_host() {
        let origins = AllowedOrigins::new("crag.local", 8080);
        assert!(origins.is_allowed("http://crag.local:8080"));
        assert!(!origins.is_allowed("http://localhost:8080"));
    }

    #[tokio::test]
    async fn test_method_not_allowed_keeps_allow_header() {
        let mut response = StatusCode::METHOD_NOT_ALLOWED.into_response();
        response
            .headers_mut()
            .insert(header::ALLOW, HeaderValue::from_static("GET,POST"));

        let response = method_not_allowed_json(response).await;
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(response.headers()[header::ALLOW], "GET,POST");

        let body = to_bytes(response.into_body(), 1024).await.unwrap();
        let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(json["code"], "METHOD_NOT_ALLOWED");
    }

    #[tokio::test]
    async fn test_other_statuses_untouched() {
        let response = method_not_allowed_json(StatusCode::OK.into_response()).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().get(header::CONTENT_TYPE).is_none());
    }
}
