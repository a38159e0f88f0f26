//! Axum-based HTTP gateway for the Pitchside FAQ chat widget. Config-driven
//! via CoreConfig; the match engine is built once at startup and shared
//! read-only across handlers.

mod keepalive;

use axum::{
    extract::{Json, State},
    routing::{get, post},
    Router,
};
use pitchside_core::{CoreConfig, KnowledgeBase, MatchEngine};
use std::sync::Arc;
use tower_http::services::ServeFile;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    // Load .env file if present (before any env::var calls)
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("[pitchside-gateway] .env not loaded: {} (using system environment)", e);
    }

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Arc::new(CoreConfig::load().expect("load CoreConfig"));
    let knowledge =
        KnowledgeBase::load_json_path(&config.knowledge_path).expect("load knowledge document");
    let engine = Arc::new(MatchEngine::new(&knowledge).expect("build match engine"));
    tracing::info!(
        entries = knowledge.len(),
        corpus = engine.corpus_len(),
        "knowledge base loaded"
    );

    if let Some(url) = config.keepalive_url.clone() {
        tokio::spawn(keepalive::ping_loop(
            url,
            std::time::Duration::from_secs(config.keepalive_interval_secs.max(1)),
        ));
    }

    let port = config.port;
    let app_name = config.app_name.clone();
    let app = build_app(AppState {
        config: Arc::clone(&config),
        engine,
    });

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("{} listening on {}", app_name, addr);
    axum::serve(
        tokio::net::TcpListener::bind(addr).await.unwrap(),
        app,
    )
    .await
    .unwrap();
}

fn build_app(state: AppState) -> Router {
    let frontend_enabled = state.config.frontend_enabled;
    let mut app = Router::new()
        .route("/chat", post(chat))
        .route("/ping", get(ping))
        .route("/status", get(status))
        .with_state(state);

    if frontend_enabled {
        // Map `/` -> `frontend/index.html` (the chat widget)
        app = app.route_service("/", ServeFile::new("frontend/index.html"));
    }

    app
}

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) config: Arc<CoreConfig>,
    pub(crate) engine: Arc<MatchEngine>,
}

#[derive(serde::Deserialize)]
struct ChatRequest {
    message: String,
}

#[derive(serde::Serialize)]
struct ChatReply {
    reply: String,
}

/// POST /chat – runs the message through the match engine. A body without a
/// `message` string is rejected by the Json extractor as a client error.
async fn chat(State(state): State<AppState>, Json(req): Json<ChatRequest>) -> Json<ChatReply> {
    let reply = state.engine.reply(&req.message);
    Json(ChatReply { reply })
}

/// GET /ping – liveness probe for uptime monitors and the keep-alive pinger.
async fn ping() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// GET /status – app identity and corpus size from config.
async fn status(State(state): State<AppState>) -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "app_name": state.config.app_name,
        "port": state.config.port,
        "corpus_size": state.engine.corpus_len(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use pitchside_core::FALLBACK_REPLY;
    use tower::ServiceExt;

    fn test_config() -> CoreConfig {
        CoreConfig {
            app_name: "Pitchside Test".to_string(),
            port: 0,
            knowledge_path: "./data/knowledge.json".to_string(),
            frontend_enabled: false,
            keepalive_url: None,
            keepalive_interval_secs: 600,
        }
    }

    fn test_app() -> Router {
        let kb = KnowledgeBase::from_entries([
            ("What is the offside rule?", "A player is offside if..."),
            (
                "How can I buy match tickets?",
                "Tickets are sold online through the club shop.",
            ),
        ]);
        build_app(AppState {
            config: Arc::new(test_config()),
            engine: Arc::new(MatchEngine::new(&kb).unwrap()),
        })
    }

    async fn post_chat(app: Router, body: serde_json::Value) -> (StatusCode, serde_json::Value) {
        let req = Request::builder()
            .method("POST")
            .uri("/chat")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        let status = res.status();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null);
        (status, json)
    }

    #[tokio::test]
    async fn test_chat_answers_offside_question() {
        let (status, json) = post_chat(
            test_app(),
            serde_json::json!({ "message": "tell me about the offside rule" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["reply"], "A player is offside if...");
    }

    #[tokio::test]
    async fn test_chat_falls_back_on_nonsense() {
        let (status, json) = post_chat(
            test_app(),
            serde_json::json!({ "message": "asdkjhasd nonsense query zzz" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["reply"], FALLBACK_REPLY);
    }

    #[tokio::test]
    async fn test_chat_fuzzy_matches_ticket_question() {
        let (status, json) = post_chat(
            test_app(),
            serde_json::json!({ "message": "where can i buy tickets for the match" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["reply"], "Tickets are sold online through the club shop.");
    }

    #[tokio::test]
    async fn test_chat_missing_message_is_client_error() {
        let (status, _) = post_chat(test_app(), serde_json::json!({ "msg": "hello" })).await;
        assert!(status.is_client_error(), "got {}", status);
    }

    #[tokio::test]
    async fn test_ping_returns_ok() {
        let req = Request::builder()
            .method("GET")
            .uri("/ping")
            .body(Body::empty())
            .unwrap();
        let res = test_app().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn test_status_returns_app_identity_and_corpus_size() {
        let req = Request::builder()
            .method("GET")
            .uri("/status")
            .body(Body::empty())
            .unwrap();
        let res = test_app().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["app_name"], "Pitchside Test");
        assert_eq!(json["corpus_size"], 2);
    }
}
