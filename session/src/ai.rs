//! The AI opponent policy (spec §4.9), plugged into the engine through
//! the same `PlayerAction` interface a human uses. `AiPolicy` is the
//! trait boundary spec §4.9 means by "may be swapped"; `DefaultAiPolicy`
//! is the one rule spec §4.9 actually asks for.

use poker_engine::{ActionType, GameState, PlayerAction, Seat, TurnManager};

pub trait AiPolicy: Send + Sync {
    fn decide(&self, game: &GameState, seat: &Seat) -> PlayerAction;
}

/// CHECK if available; otherwise CALL as long as the call costs at most
/// half the seat's remaining stack; otherwise FOLD.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultAiPolicy;

impl AiPolicy for DefaultAiPolicy {
    fn decide(&self, game: &GameState, seat: &Seat) -> PlayerAction {
        let call_amount = game.current_bet.saturating_sub(seat.bet_in_round);

        if call_amount == 0 {
            return PlayerAction::Check;
        }
        if seat.stack > 0 && (call_amount as u64) * 2 <= seat.stack as u64 {
            return PlayerAction::Call;
        }
        PlayerAction::Fold
    }
}

/// Convenience entry point using the default policy; `game_actor` drives
/// every table through this today, but takes `seat` rather than an
/// `&dyn AiPolicy` directly so swapping policies only touches this line.
pub fn decide(game: &GameState, seat: &Seat) -> PlayerAction {
    DefaultAiPolicy.decide(game, seat)
}

/// The legal-action set for `player_id`, or an empty vec for a seat whose
/// player is AI or not found — the viewer-scoped snapshot only ever shows
/// `valid_actions` to the human seated at the table.
pub fn human_legal_actions(game: &GameState, player_id: &str) -> Vec<poker_engine::LegalAction> {
    match game.table.seat_by_player_id(player_id) {
        Some(seat) if seat.player.as_ref().is_some_and(|p| !p.is_ai) => {
            TurnManager::legal_actions_for_player(game, player_id)
        }
        _ => Vec::new(),
    }
}

pub fn action_kind_name(action_type: ActionType) -> &'static str {
    match action_type {
        ActionType::Fold => "FOLD",
        ActionType::Check => "CHECK",
        ActionType::Call => "CALL",
        ActionType::Bet => "BET",
        ActionType::Raise => "RAISE",
        ActionType::AllIn => "ALL_IN",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use poker_engine::{Engine, GameState, Player};

    fn started_two_player_game() -> GameState {
        let mut game = GameState::new("g1".to_string(), 2, 5, 10);
        game.seat_player(
            0,
            Player {
                id: "p1".to_string(),
                name: "P1".to_string(),
                is_ai: false,
            },
            1000,
        )
        .unwrap();
        game.seat_player(
            1,
            Player {
                id: "p2".to_string(),
                name: "P2".to_string(),
                is_ai: true,
            },
            1000,
        )
        .unwrap();
        Engine::start_new_hand(&mut game).unwrap();
        game
    }

    #[test]
    fn checks_when_nothing_to_call() {
        let mut game = started_two_player_game();
        // Equalize bets so the next actor faces a zero call.
        let current = game.current_seat_index.unwrap();
        let other = 1 - current;
        game.table.seats[other].bet_in_round = game.table.seats[current].bet_in_round;
        game.current_bet = game.table.seats[current].bet_in_round;

        let action = decide(&game, &game.table.seats[current]);
        assert_eq!(action, PlayerAction::Check);
    }

    #[test]
    fn calls_a_cheap_bet_and_folds_an_expensive_one() {
        let mut game = started_two_player_game();
        let idx = game.current_seat_index.unwrap();

        game.current_bet = game.table.seats[idx].bet_in_round + 10;
        game.table.seats[idx].stack = 1000;
        assert_eq!(decide(&game, &game.table.seats[idx]), PlayerAction::Call);

        game.current_bet = game.table.seats[idx].bet_in_round + 900;
        game.table.seats[idx].stack = 1000;
        assert_eq!(decide(&game, &game.table.seats[idx]), PlayerAction::Fold);
    }

    #[test]
    fn human_legal_actions_are_empty_for_ai_seat() {
        let game = started_two_player_game();
        assert!(human_legal_actions(&game, "p2").is_empty());
    }
}
