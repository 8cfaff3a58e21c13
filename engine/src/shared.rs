use serde::{Deserialize, Serialize};
use std::fmt;

/// Card suit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Suit {
    Clubs,
    Diamonds,
    Hearts,
    Spades,
}

impl fmt::Display for Suit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let c = match self {
            Suit::Clubs => '♣',
            Suit::Diamonds => '♦',
            Suit::Hearts => '♥',
            Suit::Spades => '♠',
        };
        write!(f, "{c}")
    }
}

/// Card rank, Two low through Ace high.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Rank {
    Two = 2,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
    Ace,
}

impl Rank {
    pub fn value(&self) -> u8 {
        *self as u8
    }

    pub fn from_value(value: u8) -> Self {
        match value {
            2 => Rank::Two,
            3 => Rank::Three,
            4 => Rank::Four,
            5 => Rank::Five,
            6 => Rank::Six,
            7 => Rank::Seven,
            8 => Rank::Eight,
            9 => Rank::Nine,
            10 => Rank::Ten,
            11 => Rank::Jack,
            12 => Rank::Queen,
            13 => Rank::King,
            14 => Rank::Ace,
            other => panic!("invalid rank value: {other}"),
        }
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let c = match self {
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
            Rank::Ace => "A",
        };
        write!(f, "{c}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl fmt::Display for Card {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}{}", self.rank, self.suit)
    }
}

/// A street within a hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Round {
    PreFlop,
    Flop,
    Turn,
    River,
    Showdown,
}

/// Top-level game lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    Waiting,
    InProgress,
    HandComplete,
}

/// A seat's occupancy/participation state within the current hand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeatStatus {
    Empty,
    Active,
    Folded,
    AllIn,
    SittingOut,
}

/// The type of an action a seat may take or have taken.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionType {
    Fold,
    Check,
    Call,
    Bet,
    Raise,
    /// Convenience synonym: never stored as `Seat::last_action`, only
    /// accepted as shorthand input meaning "pay my whole stack" (see
    /// [`crate::action::PlayerAction::AllIn`]).
    AllIn,
}

/// A validated action a seat wants to take, as handed to `ActionService`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlayerAction {
    Fold,
    Check,
    Call,
    Bet(u32),
    Raise(u32),
    /// Shorthand for "bet/raise/call with my entire stack"; the engine
    /// resolves it to a concrete `Bet`/`Raise`/`Call` amount before
    /// reaching `ActionService`. Never the effect itself (see spec's
    /// all-in design note): all-in is what happens when a pay exhausts
    /// the stack, not a distinct action.
    AllIn,
}

/// Stable player identity. Chips live on the `Seat`, not here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: String,
    pub name: String,
    pub is_ai: bool,
}

/// One entry in a hand's action log, kept so a fatal invariant breach can
/// be logged with full replay context (spec §7).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionRecord {
    pub seat_index: usize,
    pub action: PlayerAction,
    pub round: Round,
}

/// One seat's share of a finished hand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WinnerShare {
    pub seat_index: usize,
    pub player_id: String,
    pub player_name: String,
    pub amount: u32,
    pub pot_type: String,
    pub hand_name: String,
    pub hand_score: u32,
    pub hole_cards: Vec<Card>,
}
