//! One Tokio task per running game: the serialized critical section
//! spec §5 requires ("every mutation to a given game's `GameState` is
//! applied by exactly one task, in the order it was received"). All
//! human and AI actions funnel through this actor's `mpsc` channel
//! instead of touching `GameState` directly from a request handler.

use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::sync::{mpsc, Mutex};
use tracing::{debug, info, warn};

use poker_engine::{Engine, GameState, GameStatus, PlayerAction, Seat};

use crate::ai;
use crate::config::ServerConfig;
use crate::connections::ConnectionTable;
use crate::protocol::ServerEnvelope;
use crate::view;

pub enum ActorMessage {
    StartHand,
    PlayerAction {
        player_id: String,
        action: PlayerAction,
    },
    GetState {
        player_id: String,
    },
}

/// Spawns the actor task and returns the channel to send it messages on.
/// The task runs until every `mpsc::UnboundedSender` clone (held by
/// `GameHandle`s in the registry) is dropped.
pub fn spawn(
    game_id: String,
    game: Arc<Mutex<GameState>>,
    connections: Arc<ConnectionTable>,
    config: Arc<ServerConfig>,
) -> mpsc::UnboundedSender<ActorMessage> {
    let (tx, mut rx) = mpsc::unbounded_channel::<ActorMessage>();

    tokio::spawn(async move {
        while let Some(message) = rx.recv().await {
            match message {
                ActorMessage::StartHand => match Engine::start_new_hand(&mut *game.lock().await) {
                    Ok(()) => {
                        debug!(game_id = %game_id, "hand_started");
                        broadcast_state(&game, &connections).await;
                        drive_ai(&game, &connections, &config, &game_id).await;
                    }
                    Err(e) => {
                        warn!(game_id = %game_id, error = %e, "start_hand_rejected");
                        connections.broadcast(|_| ServerEnvelope::error(e.to_string()));
                    }
                },
                ActorMessage::PlayerAction { player_id, action } => {
                    let outcome = Engine::apply_action(&mut *game.lock().await, &player_id, action);
                    match outcome {
                        Ok(()) => {
                            debug!(game_id = %game_id, player_id = %player_id, "action_applied");
                            broadcast_state(&game, &connections).await;
                            drive_ai(&game, &connections, &config, &game_id).await;
                        }
                        Err(e) => {
                            warn!(
                                game_id = %game_id,
                                player_id = %player_id,
                                error = %e,
                                "action_rejected"
                            );
                            connections.send_to(&player_id, ServerEnvelope::error(e.to_string()));
                        }
                    }
                }
                ActorMessage::GetState { player_id } => {
                    let state = game.lock().await;
                    let view = view::build(&state, &player_id);
                    connections.send_to(&player_id, ServerEnvelope::game_state(&view));
                }
            }
        }
        info!(game_id = %game_id, "game_actor_stopped");
    });

    tx
}

async fn broadcast_state(game: &Arc<Mutex<GameState>>, connections: &Arc<ConnectionTable>) {
    let state = game.lock().await;
    connections.broadcast(|player_id| ServerEnvelope::game_state(&view::build(&state, player_id)));
}

/// Drives consecutive AI turns to completion after a human (or the
/// previous AI) action, bounded by `max_ai_iterations` so a logic bug
/// can never spin the actor task forever.
async fn drive_ai(
    game: &Arc<Mutex<GameState>>,
    connections: &Arc<ConnectionTable>,
    config: &ServerConfig,
    game_id: &str,
) {
    for _ in 0..config.max_ai_iterations {
        let next_ai: Option<(String, Seat)> = {
            let state = game.lock().await;
            if state.status != GameStatus::InProgress {
                None
            } else {
                state
                    .current_seat_index
                    .map(|idx| &state.table.seats[idx])
                    .filter(|seat| seat.player.as_ref().is_some_and(|p| p.is_ai))
                    .map(|seat| (seat.player.as_ref().unwrap().id.clone(), seat.clone()))
            }
        };
        let Some((player_id, seat)) = next_ai else {
            break;
        };

        let delay_ms = {
            let (lo, hi) = (
                *config.ai_think_delay_ms.start(),
                *config.ai_think_delay_ms.end(),
            );
            rand::rng().random_range(lo..=hi)
        };
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;

        let action = {
            let state = game.lock().await;
            ai::decide(&state, &seat)
        };

        let outcome = Engine::apply_action(&mut *game.lock().await, &player_id, action);
        match outcome {
            Ok(()) => broadcast_state(game, connections).await,
            Err(e) => {
                warn!(game_id = %game_id, player_id = %player_id, error = %e, "ai_action_rejected");
                break;
            }
        }
    }
}
