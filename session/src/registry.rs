//! `GameRegistry`: the process-wide map from game id to the running
//! game's handle. Grounded in `axiomind_web`'s `SessionStore`
//! (`Arc<RwLock<HashMap<SessionId, Arc<GameSession>>>>`), adapted so
//! that creating an entry also spawns the game's actor task (spec §5,
//! §4.9: "a single-threaded event loop per running game").

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{mpsc, Mutex, RwLock};

use poker_engine::GameState;

use crate::config::ServerConfig;
use crate::connections::ConnectionTable;
use crate::game_actor::{self, ActorMessage};

/// Everything the HTTP and WebSocket handlers need for one running game.
#[derive(Clone)]
pub struct GameHandle {
    pub game_id: String,
    pub game: Arc<Mutex<GameState>>,
    pub connections: Arc<ConnectionTable>,
    pub actor_tx: mpsc::UnboundedSender<ActorMessage>,
    /// The buy-in every seat (human or AI) was created with, so the
    /// WebSocket handler can seat a newly connecting human correctly.
    pub buy_in: u32,
}

#[derive(Clone, Default)]
pub struct GameRegistry {
    games: Arc<RwLock<HashMap<String, GameHandle>>>,
}

impl GameRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers `game` under `game_id` and spawns its actor task. The
    /// caller has already seated every AI player; seat 0 is left for the
    /// human who connects over the WebSocket.
    pub async fn create(
        &self,
        game_id: String,
        game: GameState,
        buy_in: u32,
        config: Arc<ServerConfig>,
    ) -> GameHandle {
        let game = Arc::new(Mutex::new(game));
        let connections = Arc::new(ConnectionTable::new());
        let actor_tx = game_actor::spawn(
            game_id.clone(),
            Arc::clone(&game),
            Arc::clone(&connections),
            config,
        );
        let handle = GameHandle {
            game_id: game_id.clone(),
            game,
            connections,
            actor_tx,
            buy_in,
        };
        self.games.write().await.insert(game_id, handle.clone());
        handle
    }

    pub async fn get(&self, game_id: &str) -> Option<GameHandle> {
        self.games.read().await.get(game_id).cloned()
    }

    /// Removes the game from the registry. Dropping the last `GameHandle`
    /// clone drops the actor's `mpsc::Sender`, which closes the channel
    /// and lets the actor task exit on its next `recv()`.
    pub async fn delete(&self, game_id: &str) -> Option<GameHandle> {
        self.games.write().await.remove(game_id)
    }

    pub async fn len(&self) -> usize {
        self.games.read().await.len()
    }
}
