use crate::catalog::{Catalog, CatalogItem};
use crate::error::{Result, TestrecError};
use crate::recommend;
use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Request body for POST /recommend
///
/// An absent `query` is treated as the empty string, which matches nothing
/// and yields the fallback items.
#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    #[serde(default)]
    pub query: String,
}

/// Response body for POST /recommend
#[derive(Debug, Serialize)]
pub struct RecommendResponse {
    pub recommendations: Vec<CatalogItem>,
}

/// Application state shared across handlers
#[derive(Clone)]
struct AppState {
    catalog: Arc<Catalog>,
}

/// Create the axum router
///
/// Public so tests can drive the full HTTP surface without binding a socket.
pub fn router(catalog: Catalog) -> Router {
    // Demo frontends run on arbitrary origins, so CORS stays wide open.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/recommend", post(handle_recommend))
        .route("/health", get(handle_health))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(AppState {
            catalog: Arc::new(catalog),
        })
}

/// Run the recommendation service until the process is stopped
pub async fn serve(catalog: Catalog, addr: &str) -> Result<()> {
    let app = router(catalog);

    log::info!("Starting recommendation service on http://{}", addr);
    log::info!("Recommend endpoint: http://{}/recommend", addr);

    let listener = tokio::net::TcpListener::bind(addr).await.map_err(|e| {
        TestrecError::Config(format!(
            "Failed to bind to {}: {}. Another process may be using the port; \
             change service.port in config.toml.",
            addr, e
        ))
    })?;

    axum::serve(listener, app).await.map_err(|e| {
        TestrecError::Io(std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("HTTP server error: {}", e),
        ))
    })?;

    Ok(())
}

/// Handle POST /recommend
async fn handle_recommend(State(state): State<AppState>, body: axum::body::Bytes) -> Response {
    let request: RecommendRequest = match serde_json::from_slice(&body) {
        Ok(r) => r,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(serde_json::json!({"error": format!("Invalid JSON: {}", e)})),
            )
                .into_response();
        }
    };

    let recommendations = recommend::recommend(&state.catalog, &request.query);
    log::debug!(
        "Query {:?} matched {} recommendation(s)",
        request.query,
        recommendations.len()
    );

    (StatusCode::OK, Json(RecommendResponse { recommendations })).into_response()
}

/// Handle health check endpoint
async fn handle_health() -> Response {
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "status": "ok",
            "service": "testrec",
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    fn test_catalog() -> Catalog {
        Catalog::new(vec![
            CatalogItem {
                name: "Python Basics".to_string(),
                skills: vec!["python".to_string()],
                duration: Some(30.0),
            },
            CatalogItem {
                name: "SQL Drill".to_string(),
                skills: vec!["sql".to_string()],
                duration: Some(45.0),
            },
            CatalogItem {
                name: "Java Fundamentals".to_string(),
                skills: vec!["java".to_string()],
                duration: None,
            },
            CatalogItem {
                name: "Frontend Quiz".to_string(),
                skills: vec!["javascript".to_string(), "css".to_string()],
                duration: Some(20.0),
            },
        ])
    }

    async fn body_json(response: Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_recommend_returns_matching_items() {
        let app = router(test_catalog());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/recommend")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"query": "looking for a python test"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let recs = json["recommendations"].as_array().unwrap();
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0]["name"], "Python Basics");
        assert_eq!(recs[0]["duration"], 30.0);
    }

    #[tokio::test]
    async fn test_recommend_falls_back_when_nothing_matches() {
        let app = router(test_catalog());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/recommend")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"query": "quantum basket weaving"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let recs = json["recommendations"].as_array().unwrap();
        assert_eq!(recs.len(), 3);
        assert_eq!(recs[0]["name"], "Python Basics");
    }

    #[tokio::test]
    async fn test_recommend_omits_missing_duration() {
        let app = router(test_catalog());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/recommend")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"query": "java"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        let json = body_json(response).await;
        let recs = json["recommendations"].as_array().unwrap();
        assert_eq!(recs[0]["name"], "Java Fundamentals");
        assert!(recs[0].get("duration").is_none());
    }

    #[tokio::test]
    async fn test_recommend_rejects_invalid_json() {
        let app = router(test_catalog());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/recommend")
                    .header("content-type", "application/json")
                    .body(Body::from("{not json"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert!(json["error"].as_str().unwrap().contains("Invalid JSON"));
    }

    #[tokio::test]
    async fn test_recommend_missing_query_acts_as_empty() {
        let app = router(test_catalog());

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/recommend")
                    .header("content-type", "application/json")
                    .body(Body::from("{}"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        // Empty query matches nothing, so the fallback items come back.
        assert_eq!(json["recommendations"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = router(test_catalog());

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn test_cors_preflight_allows_any_origin() {
        let app = router(test_catalog());

        let response = app
            .oneshot(
                Request::builder()
                    .method("OPTIONS")
                    .uri("/recommend")
                    .header("origin", "http://demo.example")
                    .header("access-control-request-method", "POST")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response
                .headers()
                .get("access-control-allow-origin")
                .and_then(|v| v.to_str().ok()),
            Some("*")
        );
    }
}
