//! Binary entry point: wires `ServerConfig`, `GameRegistry`, and the
//! HTTP/WebSocket routes into one axum `Router` and serves it.

use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tracing_subscriber::EnvFilter;

use poker_session::http::{create_single_play, delete_game, get_game, AppState};
use poker_session::ws::ws_handler;
use poker_session::{GameRegistry, ServerConfig};

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .init();

    let config = Arc::new(ServerConfig::from_env().expect("invalid server configuration"));
    let state = AppState {
        registry: GameRegistry::new(),
        config: Arc::clone(&config),
    };

    let app = Router::new()
        .route("/api/games/single-play", post(create_single_play))
        .route("/api/games/:game_id", get(get_game).delete(delete_game))
        .route("/ws/game/:game_id", get(ws_handler))
        .with_state(state);

    tracing::info!(addr = %config.bind_addr, "starting poker session server");
    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .expect("failed to bind server address");
    axum::serve(listener, app)
        .await
        .expect("server exited unexpectedly");
}
