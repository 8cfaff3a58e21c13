//! Seat state and the per-seat operations the rest of the engine drives
//! (spec §4.2). A `Seat` is a fixed table position; the `Player` sitting
//! in it is identity only, chips live here.

use serde::{Deserialize, Serialize};

use crate::shared::{ActionType, Card, Player, SeatStatus};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Seat {
    pub index: usize,
    pub player: Option<Player>,
    pub stack: u32,
    pub hole_cards: Vec<Card>,
    pub bet_in_round: u32,
    pub bet_in_hand: u32,
    pub last_action: Option<ActionType>,
    pub status: SeatStatus,
    /// Has this seat acted since the last aggressive action (or since the
    /// street started)?
    pub acted: bool,
    /// Lower is stronger; only meaningful once set at showdown.
    pub hand_score: u32,
    /// Showdown reveal flag: true once this seat's cards are shown,
    /// independent of whether the viewer owns the seat.
    pub show_hand: bool,
}

const UNSCORED: u32 = u32::MAX;

impl Seat {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            player: None,
            stack: 0,
            hole_cards: Vec::new(),
            bet_in_round: 0,
            bet_in_hand: 0,
            last_action: None,
            status: SeatStatus::Empty,
            acted: false,
            hand_score: UNSCORED,
            show_hand: false,
        }
    }

    pub fn is_occupied(&self) -> bool {
        self.player.is_some()
    }

    pub fn is_active(&self) -> bool {
        self.is_occupied() && self.status == SeatStatus::Active && self.stack > 0
    }

    pub fn in_hand(&self) -> bool {
        self.is_occupied() && matches!(self.status, SeatStatus::Active | SeatStatus::AllIn)
    }

    /// Deducts `min(amount, stack)` from `stack`, adding it to both bet
    /// fields, and flips to all-in if the stack is exhausted. Returns the
    /// amount actually paid.
    pub fn pay(&mut self, amount: u32) -> u32 {
        let actual = amount.min(self.stack);
        self.stack -= actual;
        self.bet_in_round += actual;
        self.bet_in_hand += actual;
        if self.stack == 0 && self.status == SeatStatus::Active {
            self.status = SeatStatus::AllIn;
        }
        actual
    }

    pub fn refund(&mut self, amount: u32) {
        self.stack += amount;
    }

    pub fn sit_down(&mut self, player: Player, buy_in: u32) {
        self.player = Some(player);
        self.stack = buy_in;
        self.status = SeatStatus::Active;
    }

    pub fn stand_up(&mut self) {
        self.player = None;
        self.stack = 0;
        self.status = SeatStatus::Empty;
        self.hole_cards.clear();
        self.bet_in_round = 0;
        self.bet_in_hand = 0;
    }

    pub fn receive_cards(&mut self, cards: [Card; 2]) {
        self.hole_cards = cards.to_vec();
    }

    /// Clears per-hand state. Seats with chips return to ACTIVE; empty
    /// stacks sit out until they rebuy (out of scope here — they simply
    /// stay SITTING_OUT).
    pub fn clear_for_new_hand(&mut self) {
        self.hole_cards.clear();
        self.bet_in_round = 0;
        self.bet_in_hand = 0;
        self.hand_score = UNSCORED;
        self.show_hand = false;
        self.last_action = None;
        self.acted = false;
        if self.is_occupied() {
            self.status = if self.stack > 0 {
                SeatStatus::Active
            } else {
                SeatStatus::SittingOut
            };
        }
    }

    /// Clears per-round state for active seats only; `DealerService`'s
    /// `collect_bets_to_pots` is what zeros non-active seats' leftover
    /// `bet_in_round` before this ever runs.
    pub fn reset_for_new_round(&mut self) {
        if self.is_active() {
            self.bet_in_round = 0;
            self.last_action = None;
            self.acted = false;
        }
    }
}
