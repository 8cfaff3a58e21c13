//! `/ws/game/{game_id}?username=<name>` handler (spec §6). Seats the
//! connecting human at the game's one open seat on first connect,
//! registers an outbound channel in the game's `ConnectionTable`, and
//! pumps inbound `ClientMessage`s into the game's actor.

use std::sync::Arc;

use axum::extract::ws::{CloseFrame, Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, Query, State};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;
use uuid::Uuid;

use poker_engine::Player;

use crate::error::SessionError;
use crate::game_actor::ActorMessage;
use crate::http::AppState;
use crate::protocol::{ClientMessage, ServerEnvelope};

#[derive(Debug, Deserialize)]
pub struct WsQuery {
    pub username: Option<String>,
}

pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Path(game_id): Path<String>,
    Query(query): Query<WsQuery>,
    State(state): State<AppState>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, game_id, query.username, state))
}

const POLICY_VIOLATION: u16 = 1008;

async fn handle_socket(socket: WebSocket, game_id: String, username: Option<String>, state: AppState) {
    let (mut sink, mut stream) = socket.split();

    let username = match username.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => name.to_string(),
        _ => {
            let _ = sink
                .send(Message::Close(Some(CloseFrame {
                    code: POLICY_VIOLATION,
                    reason: "username is required".into(),
                })))
                .await;
            return;
        }
    };

    let Some(handle) = state.registry.get(&game_id).await else {
        let error = SessionError::GameNotFound(game_id);
        let _ = sink
            .send(Message::Text(
                serde_json::to_string(&ServerEnvelope::error(error.to_string()))
                    .expect("ServerEnvelope always serializes"),
            ))
            .await;
        return;
    };

    let player_id = {
        let mut game = handle.game.lock().await;
        match game.table.seats.iter().find(|s| !s.is_occupied()) {
            Some(open_seat) => {
                let seat_index = open_seat.index;
                let player_id = Uuid::new_v4().to_string();
                game.seat_player(
                    seat_index,
                    Player {
                        id: player_id.clone(),
                        name: username,
                        is_ai: false,
                    },
                    handle.buy_in,
                )
                .expect("the seat we just found empty did not change under the game lock");
                player_id
            }
            None => {
                drop(game);
                let error = SessionError::SeatUnavailable(game_id);
                let _ = sink
                    .send(Message::Text(
                        serde_json::to_string(&ServerEnvelope::error(error.to_string()))
                            .expect("ServerEnvelope always serializes"),
                    ))
                    .await;
                return;
            }
        }
    };

    let (out_tx, mut out_rx) = mpsc::unbounded_channel::<ServerEnvelope>();
    handle.connections.register(player_id.clone(), out_tx);

    let _ = sink
        .send(Message::Text(
            serde_json::to_string(&ServerEnvelope::connected(&player_id, &game_id))
                .expect("ServerEnvelope always serializes"),
        ))
        .await;
    let _ = handle.actor_tx.send(ActorMessage::GetState {
        player_id: player_id.clone(),
    });

    let mut writer = tokio::spawn(async move {
        while let Some(envelope) = out_rx.recv().await {
            let text = serde_json::to_string(&envelope).expect("ServerEnvelope always serializes");
            if sink.send(Message::Text(text)).await.is_err() {
                break;
            }
        }
    });

    loop {
        tokio::select! {
            _ = &mut writer => break,
            incoming = stream.next() => {
                let Some(Ok(message)) = incoming else { break };
                match message {
                    Message::Text(text) => dispatch(&handle.actor_tx, &handle.connections, &player_id, &text),
                    Message::Close(_) => break,
                    _ => {}
                }
            }
        }
    }

    handle.connections.remove(&player_id);
    writer.abort();
}

fn dispatch(
    actor_tx: &mpsc::UnboundedSender<ActorMessage>,
    connections: &crate::connections::ConnectionTable,
    player_id: &str,
    text: &str,
) {
    let client_message: ClientMessage = match serde_json::from_str(text) {
        Ok(m) => m,
        Err(e) => {
            let error = SessionError::Malformed(e.to_string());
            connections.send_to(player_id, ServerEnvelope::error(error.to_string()));
            return;
        }
    };
    let actor_message = match client_message {
        ClientMessage::StartGame => ActorMessage::StartHand,
        ClientMessage::PlayerAction { action, amount } => ActorMessage::PlayerAction {
            player_id: player_id.to_string(),
            action: action.into_player_action(amount),
        },
        ClientMessage::GetState => ActorMessage::GetState {
            player_id: player_id.to_string(),
        },
    };
    let _ = actor_tx.send(actor_message);
}
