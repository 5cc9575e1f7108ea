//! Fake Account Detection ML Service
//!
//! Trains a real-vs-fake account classifier from a labeled CSV, persists the
//! fitted model to disk, and serves predictions over HTTP.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                  FAKE ACCOUNT ML SERVICE                     │
//! ├──────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌──────────────┐  ┌───────────────────────┐ │
//! │  │  API      │  │  Training    │  │  Profile Ingestion    │ │
//! │  │  (Axum)   │  │  Pipeline    │  │  (scraper client)     │ │
//! │  └─────┬─────┘  └──────┬───────┘  └───────────┬───────────┘ │
//! │        └───────────────┼──────────────────────┘             │
//! │                        ▼                                    │
//! │               ┌─────────────────┐                           │
//! │               │  Model Artifact │                           │
//! │               │  (on disk)      │                           │
//! │               └─────────────────┘                           │
//! └──────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod handlers;
mod ml;
mod models;
mod scrape;

use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use error::{AppError, AppResult};

use ml::store::ModelStore;
use scrape::ScraperClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "fake_account_ml=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    tracing::info!("Fake Account ML Service starting...");
    tracing::info!("Dataset: {}", config.data_path.display());
    tracing::info!("Model artifact: {}", config.model_path.display());

    let scraper = match &config.scraper_url {
        Some(url) => Some(ScraperClient::new(url, config.scraper_timeout_seconds)?),
        None => {
            tracing::warn!("SCRAPER_URL not set; /scan will report the scraper as unavailable");
            None
        }
    };

    let state = AppState {
        store: ModelStore::new(config.model_path.clone()),
        scraper,
        config,
    };

    let app = create_router(state.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], state.config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: config::Config,
    pub store: ModelStore,
    /// Present only when a scraper is configured for this deployment.
    pub scraper: Option<ScraperClient>,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))
        .route("/train", post(handlers::train::run))
        .route("/predict", post(handlers::predict::run))
        .route("/scan/:platform/:username", get(handlers::scan::run))
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_state(dir: &std::path::Path, scraper: Option<ScraperClient>) -> AppState {
        let config = config::Config {
            port: 0,
            data_path: dir.join("fakeaccounts.csv"),
            model_path: dir.join("model.json"),
            scraper_url: None,
            scraper_timeout_seconds: 1,
        };
        AppState {
            store: ModelStore::new(config.model_path.clone()),
            scraper,
            config,
        }
    }

    fn write_dataset(dir: &std::path::Path) {
        let mut csv = String::from("Followers,Following,Posts,Bio,Labels\n");
        for i in 0..20 {
            csv.push_str(&format!("{},500,2,buy followers now,Scam\n", 10 + i));
            csv.push_str(&format!("5000,300,{},photographer,Real\n", 800 + i));
        }
        std::fs::write(dir.join("fakeaccounts.csv"), csv).unwrap();
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn health_reports_missing_model() {
        let dir = tempfile::tempdir().unwrap();
        let app = create_router(test_state(dir.path(), None));

        let response = app.oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["ok"], true);
        assert_eq!(json["model"], false);
    }

    #[tokio::test]
    async fn predict_before_train_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let app = create_router(test_state(dir.path(), None));

        let response = app.oneshot(post_json("/predict", "{}")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Model not trained. Call /train first.");
    }

    #[tokio::test]
    async fn train_without_dataset_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let app = create_router(test_state(dir.path(), None));

        let response = app.oneshot(post_json("/train", "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn train_with_bad_header_is_schema_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("fakeaccounts.csv"),
            "Followers,Following,Posts,Bio\n1,2,3,hello\n",
        )
        .unwrap();
        let app = create_router(test_state(dir.path(), None));

        let response = app.oneshot(post_json("/train", "")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Labels column not found in CSV");
    }

    #[tokio::test]
    async fn train_then_health_and_predict() {
        let dir = tempfile::tempdir().unwrap();
        write_dataset(dir.path());
        let state = test_state(dir.path(), None);

        let response = create_router(state.clone())
            .oneshot(post_json("/train", ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["success"], true);
        assert_eq!(json["target"], "Labels");
        assert!(json["metrics"]["roc_auc"].as_f64().unwrap() > 0.9);

        let response = create_router(state.clone()).oneshot(get("/health")).await.unwrap();
        let json = body_json(response).await;
        assert_eq!(json["model"], true);

        let scam = create_router(state.clone())
            .oneshot(post_json(
                "/predict",
                r#"{"follower_count": 10, "following_count": 500, "posts_count": 2, "Bio": "buy followers now"}"#,
            ))
            .await
            .unwrap();
        let scam_json = body_json(scam).await;

        let real = create_router(state)
            .oneshot(post_json(
                "/predict",
                r#"{"follower_count": 5000, "following_count": 300, "posts_count": 800, "Bio": "photographer"}"#,
            ))
            .await
            .unwrap();
        let real_json = body_json(real).await;

        let scam_prob = scam_json["prob_fake"].as_f64().unwrap();
        let real_prob = real_json["prob_fake"].as_f64().unwrap();
        assert!(scam_prob > real_prob);
        assert_eq!(scam_json["label"], 1);
        assert_eq!(scam_json["data_used"]["Followers"], 10.0);
    }

    #[tokio::test]
    async fn scan_without_scraper_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let app = create_router(test_state(dir.path(), None));

        let response = app.oneshot(get("/scan/twitter/someone")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"], "Scraper not available on server");
    }

    #[tokio::test]
    async fn scan_rejects_unsupported_platform() {
        let dir = tempfile::tempdir().unwrap();
        let scraper = Some(ScraperClient::new("http://127.0.0.1:1", 1).unwrap());
        let app = create_router(test_state(dir.path(), scraper));

        let response = app.oneshot(get("/scan/instagram/someone")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert!(json["error"].as_str().unwrap().contains("Twitter/X"));
    }
}
