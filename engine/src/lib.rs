//! No-limit Texas Hold'em hand engine: deck, evaluator, seats, pots, turn
//! order, and the state machine that ties them into a playable hand.

pub mod action;
pub mod dealer;
pub mod engine;
pub mod error;
pub mod pot;
pub mod rules;
pub mod seat;
pub mod shared;
pub mod showdown;
pub mod table;
pub mod turn;

pub use action::ActionService;
pub use dealer::DealerService;
pub use engine::{Engine, GameState};
pub use error::{GameError, GameResult};
pub use pot::{Distribution, PotCalculator};
pub use rules::{evaluate_hand, hand_name, Deck, HandScore};
pub use seat::Seat;
pub use shared::{
    ActionRecord, ActionType, Card, GameStatus, Player, PlayerAction, Rank, Round, SeatStatus,
    Suit, WinnerShare,
};
pub use showdown::ShowdownService;
pub use table::{Pot, Table};
pub use turn::{LegalAction, TurnManager};
