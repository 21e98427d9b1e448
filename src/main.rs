use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json};
use axum::routing::{get, post};
use axum::Router;
use serde_json::{json, Value};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use hud_api_rust::config;
use hud_api_rust::handlers::{canvas, inference};
use hud_api_rust::middleware::auth::bearer_auth_middleware;
use hud_api_rust::state::AppState;

#[tokio::main]
async fn main() {
    // Load .env if present so cargo run picks up DATABASE_URL, HUD_WRITE_TOKEN, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt::init();

    // Initialize configuration (this loads the config singleton)
    let config = config::config();
    tracing::info!("Starting RPG HUD API in {:?} mode", config.environment);

    if config.security.write_token.is_empty() {
        tracing::warn!("HUD_WRITE_TOKEN is empty; every /save_canvas request will be rejected");
    }

    let state = AppState::from_config(config)
        .await
        .unwrap_or_else(|e| panic!("failed to initialize application state: {e}"));

    let app = app(state);

    let bind_addr = format!("0.0.0.0:{}", config.server.port);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {}: {}", bind_addr, e));

    println!("🚀 RPG HUD API server listening on http://{}", bind_addr);

    axum::serve(listener, app).await.expect("server");
}

fn app(state: AppState) -> Router {
    Router::new()
        // Public
        .route("/", get(root))
        .route("/health", get(health))
        // Canvas store gateway
        .merge(canvas_write_routes())
        .merge(canvas_read_routes())
        // Inference proxy
        .merge(inference_routes())
        // Global middleware
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn canvas_write_routes() -> Router<AppState> {
    Router::new()
        .route("/save_canvas", post(canvas::save_canvas))
        .route_layer(axum::middleware::from_fn(bearer_auth_middleware))
}

fn canvas_read_routes() -> Router<AppState> {
    Router::new()
        .route("/get_canvas", get(canvas::get_canvas))
        .route("/get_canvas_by_id", get(canvas::get_canvas_by_id))
        .route("/get_log", get(canvas::get_log))
        .route("/get_canvas_history", get(canvas::get_canvas_history))
}

fn inference_routes() -> Router<AppState> {
    Router::new().route("/query_nemotron", post(inference::query_nemotron))
}

async fn root() -> Json<Value> {
    let version = env!("CARGO_PKG_VERSION");

    Json(json!({
        "status": "success",
        "name": "RPG HUD API (Rust)",
        "version": version,
        "message": "RPG HUD API is live.",
        "endpoints": {
            "save": "POST /save_canvas (bearer token required)",
            "latest": "GET /get_canvas",
            "by_id": "GET /get_canvas_by_id?id=",
            "log": "GET /get_log?canvas&user&align",
            "history": "GET /get_canvas_history?user&campaign&canvas",
            "game_master": "POST /query_nemotron",
        },
    }))
}

async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.store.health().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "success",
                "health": {
                    "store": "ok",
                    "timestamp": now,
                },
            })),
        ),
        Err(e) => (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({
                "status": "error",
                "message": "canvas store unavailable",
                "health": {
                    "store": "degraded",
                    "timestamp": now,
                    "store_error": e.to_string(),
                },
            })),
        ),
    }
}
