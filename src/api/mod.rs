//! Dashboard HTTP API
//!
//! HTTP layer for the dashboard, built with Axum. Routes answer at the root,
//! where a reverse proxy that strips the path prefix forwards them. With a
//! prefix configured they also answer under it (`/prefix/`, `/prefix/api/..`),
//! and the page addresses the API through the prefix.
//!
//! # Endpoints
//!
//! ## Page
//! - `GET /` - The dashboard page
//!
//! ## Updates
//! - `GET /api/trend?category=` - Trend figure as JSON
//! - `GET /api/trend.svg?category=` - Trend figure as SVG
//! - `GET /api/questions?category=` - Question rows with net highlights
//!
//! ## Static views
//! - `GET /api/summary` - Category summary with net highlights
//! - `GET /api/categories` - Selector options
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe
//! - `GET /health` - Full health status
//!
//! # Example
//!
//! ```rust,ignore
//! use approval_trends::api::{serve, ApiConfig, AppState};
//! use approval_trends::polls::Dataset;
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let dataset = Dataset::load("https://example.com/polls.csv", Duration::from_secs(30)).await?;
//!     let config = ApiConfig::default();
//!
//!     let state = AppState::new(Arc::new(dataset), config.clone());
//!     serve(state, &config).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::{ApiConfig, AppState};

use axum::{http::Uri, routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Build the router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let prefix = state.config.path_prefix.clone();

    let mut app = Router::new()
        .route("/", get(routes::dashboard::index))
        .merge(endpoint_routes());

    if !prefix.is_empty() {
        app = app
            .route(&format!("{}/", prefix), get(routes::dashboard::index))
            .nest(&prefix, endpoint_routes());
    }

    let shared_state = Arc::new(state);

    app.fallback(not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(shared_state)
}

/// API and health routes, mounted at the root and again under the prefix
fn endpoint_routes() -> Router<Arc<AppState>> {
    let api_routes = Router::new()
        .route("/trend", get(routes::trend::trend_figure))
        .route("/trend.svg", get(routes::trend::trend_svg))
        .route("/questions", get(routes::questions::list_questions))
        .route("/summary", get(routes::summary::get_summary))
        .route("/categories", get(routes::summary::list_categories));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    Router::new()
        .nest("/api", api_routes)
        .nest("/health", health_routes)
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(uri.path().to_string())
}

/// Start the dashboard server
pub async fn serve(state: AppState, config: &ApiConfig) -> Result<(), ApiError> {
    let router = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!(
        "Dashboard listening on http://{}{}/",
        addr,
        config.path_prefix
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    tracing::info!("Dashboard shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install signal handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::polls::loader::parse_polls_str;
    use crate::polls::Dataset;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        response::Response,
    };
    use tower::util::ServiceExt;

    const SAMPLE: &str = "category,dates,yes,no,net,question
Economy,Jan. 3 - 10,40,50,-10,Do you approve of tariffs?
Economy,Jan. 12 - 17,42,52,-10,Do you approve of price controls?
Immigration,Jan. 3 - 10,55,40,15,Do you approve of deportations?
Law & Order,Jan. 12 - 17,48,47,1,Do you approve of pardons?";

    fn create_test_app(config: ApiConfig) -> Router {
        let rows = parse_polls_str(SAMPLE, 2025).unwrap();
        let state = AppState::new(Arc::new(Dataset::from_rows(rows)), config);
        build_router(state)
    }

    async fn get(app: Router, uri: &str) -> Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn body_text(response: Response) -> String {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn test_health_live() {
        let response = get(create_test_app(ApiConfig::default()), "/health/live").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_ready() {
        let response = get(create_test_app(ApiConfig::default()), "/health/ready").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_full() {
        let response = get(create_test_app(ApiConfig::default()), "/health").await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["rows"], 4);
        assert_eq!(json["categories"], 3);
    }

    #[tokio::test]
    async fn test_dashboard_page() {
        let response = get(create_test_app(ApiConfig::default()), "/").await;
        assert_eq!(response.status(), StatusCode::OK);

        let html = body_text(response).await;
        assert!(html.contains("<select id=\"category-dropdown\">"));
        assert!(html.contains("Poll Trend for All"));
        assert!(html.contains("Law &amp; Order"));
    }

    #[tokio::test]
    async fn test_questions_for_category() {
        let response = get(
            create_test_app(ApiConfig::default()),
            "/api/questions?category=Economy",
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        let rows = json["rows"].as_array().unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["question"], "Do you approve of tariffs?");
        assert_eq!(rows[0]["end_date"], "2025-01-10");
        assert_eq!(json["highlights"][0]["background"], "rgb(255,230,230)");
    }

    #[tokio::test]
    async fn test_questions_default_all() {
        let response = get(create_test_app(ApiConfig::default()), "/api/questions").await;
        let json = body_json(response).await;
        assert_eq!(json["rows"].as_array().unwrap().len(), 4);
        assert_eq!(json["highlights"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_questions_encoded_category() {
        let response = get(
            create_test_app(ApiConfig::default()),
            "/api/questions?category=Law%20%26%20Order",
        )
        .await;
        let json = body_json(response).await;
        assert_eq!(json["rows"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_category_rejected() {
        let response = get(
            create_test_app(ApiConfig::default()),
            "/api/questions?category=",
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_trend_all_uses_all_categories() {
        let response = get(create_test_app(ApiConfig::default()), "/api/trend?category=All").await;
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert_eq!(json["layout"]["title"], "Poll Trend for All");
        assert_eq!(json["layout"]["legend_title"], "Response");

        // Jan 10 mixes Economy (40) and Immigration (55)
        let yes = &json["series"][0];
        assert_eq!(yes["name"], "yes");
        assert_eq!(yes["points"][0]["date"], "2025-01-10");
        assert_eq!(yes["points"][0]["value"], 47.5);
    }

    #[tokio::test]
    async fn test_trend_for_category() {
        let response = get(
            create_test_app(ApiConfig::default()),
            "/api/trend?category=Immigration",
        )
        .await;
        let json = body_json(response).await;
        assert_eq!(json["series"][0]["points"].as_array().unwrap().len(), 1);
        assert_eq!(json["series"][0]["points"][0]["value"], 55.0);
    }

    #[tokio::test]
    async fn test_trend_svg() {
        let response = get(
            create_test_app(ApiConfig::default()),
            "/api/trend.svg?category=Economy",
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get("content-type").unwrap(),
            "image/svg+xml"
        );
        let svg = body_text(response).await;
        assert!(svg.contains("Poll Trend for Economy"));
    }

    #[tokio::test]
    async fn test_summary_sorted() {
        let response = get(create_test_app(ApiConfig::default()), "/api/summary").await;
        let json = body_json(response).await;
        let rows = json["rows"].as_array().unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0]["category"], "Immigration");
        assert_eq!(rows[2]["category"], "Economy");
    }

    #[tokio::test]
    async fn test_categories() {
        let response = get(create_test_app(ApiConfig::default()), "/api/categories").await;
        let json = body_json(response).await;
        assert_eq!(json["default"], "All");
        assert_eq!(json["options"][0], "All");
        assert_eq!(json["options"][1], "Economy");
        assert_eq!(json["options"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let response = get(create_test_app(ApiConfig::default()), "/nope").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_path_prefix_keeps_root_routes() {
        // A proxy that strips the prefix forwards plain root paths
        let config = ApiConfig::default().with_path_prefix("trends");

        let response = get(create_test_app(config.clone()), "/").await;
        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains("const BASE_PATH = \"/trends\";"));

        let response = get(create_test_app(config.clone()), "/api/summary").await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = get(create_test_app(config), "/health/live").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_path_prefix_served_directly() {
        let config = ApiConfig::default().with_path_prefix("/trends/");

        for uri in ["/trends/", "/trends/api/summary", "/trends/health/ready"] {
            let response = get(create_test_app(config.clone()), uri).await;
            assert_eq!(response.status(), StatusCode::OK, "{}", uri);
        }

        let response = get(
            create_test_app(config.clone()),
            "/trends/api/trend.svg?category=Economy",
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = get(create_test_app(config), "/trends/nope").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_prefix_named_like_a_route() {
        let config = ApiConfig::default().with_path_prefix("health");

        let response = get(create_test_app(config.clone()), "/health/").await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_text(response).await.contains("category-dropdown"));

        let response = get(create_test_app(config), "/health/health/live").await;
        assert_eq!(response.status(), StatusCode::OK);
    }
}
