//! HTTP surface: the generation endpoint, a health check and the static UI.

mod routes;
mod stream;

pub use routes::{generate_gdd, health, GenerateRequest, Health};
pub use stream::{ndjson_response, EVENT_BUFFER};

use crate::pipeline::Orchestrator;
use axum::routing::{get, post};
use axum::Router;
use std::path::Path;
use std::sync::Arc;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Shared handler state.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Runs submitted ideas.
    pub orchestrator: Arc<Orchestrator>,
}

impl AppState {
    /// Wraps an orchestrator.
    #[must_use]
    pub fn new(orchestrator: Orchestrator) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
        }
    }
}

/// Builds the application router. Unmatched paths are served from `public_dir`.
pub fn router(state: AppState, public_dir: impl AsRef<Path>) -> Router {
    Router::new()
        .route("/generate-gdd", post(generate_gdd))
        .route("/health", get(health))
        .fallback_service(ServeDir::new(public_dir.as_ref()))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{ScriptedCompletionProvider, StaticImageProvider};
    use axum::body::Body;
    use axum::http::{header, Method, Request, StatusCode};
    use http_body_util::BodyExt;
    use serde_json::Value;
    use tower::ServiceExt;

    struct TestApp {
        output: tempfile::TempDir,
        public: tempfile::TempDir,
        router: Router,
    }

    fn app(completion: ScriptedCompletionProvider) -> TestApp {
        let output = tempfile::tempdir().unwrap();
        let public = tempfile::tempdir().unwrap();
        std::fs::write(public.path().join("index.html"), "<h1>GDD Generator</h1>").unwrap();
        let orchestrator = Orchestrator::new(
            Arc::new(completion),
            Arc::new(StaticImageProvider::new("https://img.test/art.png")),
            output.path(),
        );
        let router = router(AppState::new(orchestrator), public.path());
        TestApp {
            output,
            public,
            router,
        }
    }

    fn generate_request(body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri("/generate-gdd")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_lines(response: axum::response::Response) -> Vec<Value> {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.is_empty() || text.ends_with('\n'));
        text.lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[tokio::test]
    async fn test_health() {
        let app = app(ScriptedCompletionProvider::numbered());
        let response = app
            .router
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json: Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn test_generate_streams_until_result() {
        let app = app(ScriptedCompletionProvider::numbered());
        let response = app
            .router
            .oneshot(generate_request(r#"{"baseIdea":"a puzzle game about gravity"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "text/event-stream");
        assert_eq!(response.headers()[header::CACHE_CONTROL], "no-cache");
        assert_eq!(response.headers()[header::CONNECTION], "keep-alive");

        let lines = body_lines(response).await;
        assert_eq!(lines.len(), 22);
        assert_eq!(lines[0]["type"], "progress");
        assert_eq!(lines[0]["step"], "base-idea");
        assert_eq!(lines[0]["output"], "a puzzle game about gravity");

        let result = lines.last().unwrap();
        assert_eq!(result["type"], "result");
        assert!(result["finalGdd"].as_str().unwrap().contains("<img"));
        assert_eq!(result["qaResults"].as_object().unwrap().len(), 5);

        let folder = result["folderPath"].as_str().unwrap();
        assert!(folder.ends_with("-a-puzzle-game-about-gravity"));
        assert!(std::path::Path::new(folder).starts_with(app.output.path()));
    }

    #[tokio::test]
    async fn test_failed_run_ends_stream_without_result() {
        let app = app(ScriptedCompletionProvider::numbered().fail_on(3, |messages| {
            messages
                .iter()
                .any(|m| m.content.starts_with("Discuss and iterate"))
        }));
        let response = app
            .router
            .oneshot(generate_request(r#"{"baseIdea":"gravity"}"#))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let lines = body_lines(response).await;
        assert!(!lines.is_empty());
        assert!(lines.iter().all(|line| line["type"] == "progress"));
        assert_eq!(lines.last().unwrap()["output"], "Round 2: response 2");
    }

    #[tokio::test]
    async fn test_generate_rejects_body_without_idea() {
        let app = app(ScriptedCompletionProvider::numbered());
        let response = app
            .router
            .oneshot(generate_request(r#"{"idea":"wrong key"}"#))
            .await
            .unwrap();

        assert!(response.status().is_client_error());
        assert!(std::fs::read_dir(app.output.path()).unwrap().next().is_none());
    }

    #[tokio::test]
    async fn test_static_fallback_serves_ui() {
        let app = app(ScriptedCompletionProvider::numbered());
        assert!(app.public.path().join("index.html").exists());

        let response = app
            .router
            .oneshot(Request::get("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], b"<h1>GDD Generator</h1>");
    }
}
