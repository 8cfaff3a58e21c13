//! Multiplayer session layer: HTTP game creation and a per-game
//! WebSocket stream, both driven through `poker_engine`. Each running
//! game owns exactly one actor task (`game_actor`) so every mutation to
//! its `GameState` is serialized (spec §5).

pub mod ai;
pub mod config;
pub mod connections;
pub mod error;
pub mod game_actor;
pub mod http;
pub mod protocol;
pub mod registry;
pub mod view;
pub mod ws;

pub use config::ServerConfig;
pub use error::SessionError;
pub use http::AppState;
pub use registry::{GameHandle, GameRegistry};
