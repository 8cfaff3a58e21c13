//! Turn order: next-to-act, round-complete, and legal-action computation
//! (spec §4.4). Grounded in the original `TurnManager` service.

use serde::{Deserialize, Serialize};

use crate::engine::GameState;
use crate::shared::{ActionType, Round};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LegalAction {
    pub action_type: ActionType,
    pub amount: Option<u32>,
    pub min_amount: Option<u32>,
    pub max_amount: Option<u32>,
}

impl LegalAction {
    fn fold() -> Self {
        Self {
            action_type: ActionType::Fold,
            amount: None,
            min_amount: None,
            max_amount: None,
        }
    }
    fn check() -> Self {
        Self {
            action_type: ActionType::Check,
            amount: None,
            min_amount: None,
            max_amount: None,
        }
    }
    fn call(amount: u32) -> Self {
        Self {
            action_type: ActionType::Call,
            amount: Some(amount),
            min_amount: None,
            max_amount: None,
        }
    }
    fn bet(min_amount: u32, max_amount: u32) -> Self {
        Self {
            action_type: ActionType::Bet,
            amount: None,
            min_amount: Some(min_amount),
            max_amount: Some(max_amount),
        }
    }
    fn raise(min_amount: u32, max_amount: u32) -> Self {
        Self {
            action_type: ActionType::Raise,
            amount: None,
            min_amount: Some(min_amount),
            max_amount: Some(max_amount),
        }
    }
}

pub struct TurnManager;

impl TurnManager {
    /// Circles the table once from `current_seat_index`, returning the
    /// first active seat that either hasn't acted since the last
    /// aggressive action, or whose bet doesn't match `current_bet` yet.
    pub fn next_actionable_seat(game: &GameState) -> Option<usize> {
        let current = game.current_seat_index?;
        let n = game.table.seats.len();
        for step in 1..=n {
            let idx = (current + step) % n;
            let seat = &game.table.seats[idx];
            if !seat.is_active() {
                continue;
            }
            if !seat.acted || seat.bet_in_round < game.current_bet {
                return Some(idx);
            }
        }
        None
    }

    pub fn advance_to_next_actor(game: &mut GameState) -> bool {
        match Self::next_actionable_seat(game) {
            Some(idx) => {
                game.current_seat_index = Some(idx);
                true
            }
            None => false,
        }
    }

    /// True once every still-active seat (i.e. every seat that could still
    /// make a decision) has acted and matched `current_bet`. A seat that is
    /// all-in or folded makes no further decision and is not active, so
    /// this is vacuously true once at most all-in/folded seats remain —
    /// but a lone active seat facing an all-in opponent must still get its
    /// call/check before the street closes.
    pub fn round_complete(game: &GameState) -> bool {
        game.table.active_seats().iter().all(|&idx| {
            let seat = &game.table.seats[idx];
            seat.acted && seat.bet_in_round == game.current_bet
        })
    }

    pub fn set_first_actor_for_round(game: &mut GameState) {
        game.current_seat_index = match game.current_round {
            Round::PreFlop => game
                .big_blind_seat_index
                .and_then(|bb| game.table.next_active_seat_index(bb)),
            _ => game
                .dealer_seat_index
                .and_then(|btn| game.table.next_active_seat_index(btn)),
        };
    }

    pub fn reset_for_new_round(game: &mut GameState) {
        game.table.reset_for_new_round();
        game.current_bet = 0;
        game.last_aggressive_actor_index = None;
        game.last_raise_was_full = true;
    }

    /// The legal action set for the current actor, with amount ranges.
    /// Empty for anyone who isn't the current actor.
    pub fn legal_actions_for_player(game: &GameState, player_id: &str) -> Vec<LegalAction> {
        let Some(seat) = game.table.seat_by_player_id(player_id) else {
            return Vec::new();
        };
        if !seat.is_active() || game.current_seat_index != Some(seat.index) {
            return Vec::new();
        }

        let mut actions = vec![LegalAction::fold()];

        let call_amount = game.current_bet.saturating_sub(seat.bet_in_round);
        if call_amount == 0 {
            actions.push(LegalAction::check());
        } else if seat.stack >= call_amount {
            actions.push(LegalAction::call(call_amount));
        }

        if game.current_bet == 0 {
            if seat.stack > 0 {
                actions.push(LegalAction::bet(game.big_blind, seat.stack));
            }
        } else {
            let min_raise_total = game.current_bet + game.last_raise_delta.max(game.big_blind);
            let available_to_raise = seat.stack + seat.bet_in_round;
            let raise_allowed = game.last_raise_was_full;
            if available_to_raise >= min_raise_total && raise_allowed {
                actions.push(LegalAction::raise(min_raise_total, available_to_raise));
            }
        }

        actions
    }
}
