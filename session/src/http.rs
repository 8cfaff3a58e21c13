//! `/api/games/...` REST surface (spec §6): create a single-play game
//! seeded with AI opponents, fetch a summary, or tear one down. Built
//! around `GameRegistry` rather than a room-code lobby, since this
//! server only ever hosts single-player-vs-AI tables.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use uuid::Uuid;

use poker_engine::{GameState, Player};

use crate::config::ServerConfig;
use crate::error::SessionError;
use crate::protocol::{CreateSinglePlayRequest, CreateSinglePlayResponse, GameSummary};
use crate::registry::GameRegistry;

const SEAT_COUNT: usize = 3;

#[derive(Clone)]
pub struct AppState {
    pub registry: GameRegistry,
    pub config: Arc<ServerConfig>,
}

/// `POST /api/games/single-play`: creates a three-seat table, seats two
/// AI opponents, and leaves seat 0 open for the human who connects over
/// `/ws/game/{id}`.
pub async fn create_single_play(
    State(state): State<AppState>,
    Json(req): Json<CreateSinglePlayRequest>,
) -> Result<impl IntoResponse, SessionError> {
    state
        .config
        .validate_single_play_request(req.big_blind, req.buy_in)?;

    let game_id = Uuid::new_v4().to_string();
    let small_blind = (req.big_blind / 2).max(1);
    let mut game = GameState::new(game_id.clone(), SEAT_COUNT, small_blind, req.big_blind);

    let ai_players = vec!["ai-1".to_string(), "ai-2".to_string()];
    for (seat_index, player_id) in ai_players.iter().enumerate() {
        game.seat_player(
            seat_index + 1,
            Player {
                id: player_id.clone(),
                name: format!("Table AI {}", seat_index + 1),
                is_ai: true,
            },
            req.buy_in,
        )
        .expect("freshly created table has empty non-zero seats");
    }

    state
        .registry
        .create(game_id.clone(), game, req.buy_in, Arc::clone(&state.config))
        .await;

    tracing::info!(game_id = %game_id, big_blind = req.big_blind, buy_in = req.buy_in, "game_created");

    let response = CreateSinglePlayResponse {
        game_id: game_id.clone(),
        ai_players,
        websocket_url: format!("/ws/game/{game_id}"),
    };
    Ok((StatusCode::CREATED, Json(response)))
}

/// `GET /api/games/{id}`: a coarse summary, not the full viewer-scoped
/// state — that only travels over the WebSocket (spec §6).
pub async fn get_game(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<impl IntoResponse, SessionError> {
    let handle = state
        .registry
        .get(&game_id)
        .await
        .ok_or_else(|| SessionError::GameNotFound(game_id.clone()))?;

    let game = handle.game.lock().await;
    let seated_count = game.table.seats.iter().filter(|s| s.is_occupied()).count();
    Ok(Json(GameSummary {
        game_id: game.id.clone(),
        status: game.status,
        player_count: game.table.seats.len(),
        seated_count,
    }))
}

/// `DELETE /api/games/{id}`: tears the game down and drops its
/// connections; any sockets still attached get no further broadcasts.
pub async fn delete_game(
    State(state): State<AppState>,
    Path(game_id): Path<String>,
) -> Result<StatusCode, SessionError> {
    state
        .registry
        .delete(&game_id)
        .await
        .ok_or_else(|| SessionError::GameNotFound(game_id))?;
    Ok(StatusCode::NO_CONTENT)
}
