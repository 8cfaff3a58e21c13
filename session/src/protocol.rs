//! Wire types for the WebSocket streaming surface: inbound client
//! messages, the outbound `{type, data, error?}` envelope, and the HTTP
//! request/response bodies. Grounded in the original `serializers.py` /
//! `websocket/routes.py` message shapes, expressed as tagged enums the
//! way a pair of inbound/outbound wire types usually is in axum services.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::view::GameStateView;

/// Inbound message, deserialized straight off the socket.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientMessage {
    StartGame,
    PlayerAction {
        action: ActionKind,
        #[serde(default)]
        amount: u32,
    },
    GetState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ActionKind {
    Fold,
    Check,
    Call,
    Bet,
    Raise,
}

impl ActionKind {
    pub fn into_player_action(self, amount: u32) -> poker_engine::PlayerAction {
        match self {
            ActionKind::Fold => poker_engine::PlayerAction::Fold,
            ActionKind::Check => poker_engine::PlayerAction::Check,
            ActionKind::Call => poker_engine::PlayerAction::Call,
            ActionKind::Bet => poker_engine::PlayerAction::Bet(amount),
            ActionKind::Raise => poker_engine::PlayerAction::Raise(amount),
        }
    }
}

/// Outbound envelope. `data` carries the payload for `connected` and
/// `game_state`; it is `null` for `error`.
#[derive(Debug, Clone, Serialize)]
pub struct ServerEnvelope {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub data: Value,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ServerEnvelope {
    pub fn connected(player_id: &str, game_id: &str) -> Self {
        Self {
            kind: "connected",
            data: serde_json::json!({ "player_id": player_id, "game_id": game_id }),
            error: None,
        }
    }

    pub fn game_state(view: &GameStateView) -> Self {
        Self {
            kind: "game_state",
            data: serde_json::to_value(view).expect("GameStateView always serializes"),
            error: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: "error",
            data: Value::Null,
            error: Some(message.into()),
        }
    }
}

/// `POST /api/games/single-play` request body.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateSinglePlayRequest {
    pub big_blind: u32,
    pub buy_in: u32,
}

/// `POST /api/games/single-play` response body.
#[derive(Debug, Clone, Serialize)]
pub struct CreateSinglePlayResponse {
    pub game_id: String,
    pub ai_players: Vec<String>,
    pub websocket_url: String,
}

/// `GET /api/games/{id}` response body.
#[derive(Debug, Clone, Serialize)]
pub struct GameSummary {
    pub game_id: String,
    pub status: poker_engine::GameStatus,
    pub player_count: usize,
    pub seated_count: usize,
}
