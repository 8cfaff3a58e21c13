//! Validates and applies a single player action against seat/table state,
//! including re-open semantics for raises (spec §4.5).

use crate::error::{GameError, GameResult};
use crate::engine::GameState;
use crate::shared::{ActionType, GameStatus, PlayerAction};
use crate::turn::TurnManager;

pub struct ActionService;

impl ActionService {
    /// Validates `action` for `player_id` against the current legal-action
    /// set and, if legal, applies its effect to the seat/table. On any
    /// failure, `game` is left completely unchanged.
    pub fn validate_and_apply(
        game: &mut GameState,
        player_id: &str,
        action: PlayerAction,
    ) -> GameResult<()> {
        if game.status != GameStatus::InProgress {
            return Err(GameError::IllegalState(
                "game is not in progress".to_string(),
            ));
        }
        let seat_index = game
            .table
            .seat_by_player_id(player_id)
            .ok_or_else(|| GameError::NotFound(format!("player {player_id}")))?
            .index;
        if game.current_seat_index != Some(seat_index) {
            return Err(GameError::IllegalAction("not this seat's turn".to_string()));
        }

        let action = Self::resolve_all_in(game, seat_index, action);
        let full_commit =
            game.table.seats[seat_index].stack + game.table.seats[seat_index].bet_in_round;

        let action_type = match action {
            PlayerAction::Fold => ActionType::Fold,
            PlayerAction::Check => ActionType::Check,
            PlayerAction::Call => ActionType::Call,
            PlayerAction::Bet(_) => ActionType::Bet,
            PlayerAction::Raise(_) => ActionType::Raise,
            PlayerAction::AllIn => unreachable!("resolved above"),
        };

        // A bet/raise/call that commits this seat's entire remaining stack
        // is always legal — standard all-in-for-less — even below the
        // TurnManager minimum, per the ALL_IN design note (spec §9).
        let is_all_in_exception = match action {
            PlayerAction::Bet(amount) | PlayerAction::Raise(amount) => amount == full_commit,
            PlayerAction::Call => full_commit <= game.current_bet,
            _ => false,
        };

        if !is_all_in_exception {
            let legal = TurnManager::legal_actions_for_player(
                game,
                game.table.seats[seat_index]
                    .player
                    .as_ref()
                    .unwrap()
                    .id
                    .as_str(),
            );
            let matching = legal
                .iter()
                .find(|l| l.action_type == action_type)
                .ok_or_else(|| {
                    GameError::IllegalAction(format!("{action_type:?} is not legal here"))
                })?;

            if let PlayerAction::Bet(amount) | PlayerAction::Raise(amount) = action {
                let min = matching.min_amount.unwrap();
                let max = matching.max_amount.unwrap();
                if amount < min || amount > max {
                    return Err(GameError::IllegalAction(format!(
                        "amount {amount} out of range [{min}, {max}]"
                    )));
                }
            }
        }

        Self::apply(game, seat_index, action);
        Ok(())
    }

    /// Resolves the `AllIn` convenience synonym into the concrete
    /// Bet/Raise/Call that commits this seat's entire remaining stack.
    fn resolve_all_in(game: &GameState, seat_index: usize, action: PlayerAction) -> PlayerAction {
        if action != PlayerAction::AllIn {
            return action;
        }
        let seat = &game.table.seats[seat_index];
        let full_commit = seat.stack + seat.bet_in_round;
        if full_commit <= game.current_bet {
            PlayerAction::Call
        } else if game.current_bet == 0 {
            PlayerAction::Bet(full_commit)
        } else {
            PlayerAction::Raise(full_commit)
        }
    }

    fn apply(game: &mut GameState, seat_index: usize, action: PlayerAction) {
        match action {
            PlayerAction::Fold => {
                let seat = &mut game.table.seats[seat_index];
                seat.status = crate::shared::SeatStatus::Folded;
                seat.last_action = Some(ActionType::Fold);
                seat.acted = true;
            }
            PlayerAction::Check => {
                let seat = &mut game.table.seats[seat_index];
                seat.last_action = Some(ActionType::Check);
                seat.acted = true;
            }
            PlayerAction::Call => {
                let call_amount =
                    game.current_bet - game.table.seats[seat_index].bet_in_round;
                let seat = &mut game.table.seats[seat_index];
                seat.pay(call_amount);
                seat.last_action = Some(ActionType::Call);
                seat.acted = true;
            }
            PlayerAction::Bet(amount) => {
                let seat = &mut game.table.seats[seat_index];
                let paid = seat.pay(amount);
                seat.last_action = Some(ActionType::Bet);
                seat.acted = true;
                game.current_bet = seat.bet_in_round;
                game.last_aggressive_actor_index = Some(seat_index);
                game.last_raise_delta = paid;
                game.last_raise_was_full = true;
                Self::reset_acted_for_others(game, seat_index);
            }
            PlayerAction::Raise(total) => {
                let previous_bet = game.current_bet;
                let previous_delta = game.last_raise_delta;
                let seat_bet_in_round = game.table.seats[seat_index].bet_in_round;
                let raise_amount = total - seat_bet_in_round;
                let seat = &mut game.table.seats[seat_index];
                seat.pay(raise_amount);
                seat.last_action = Some(ActionType::Raise);
                seat.acted = true;
                game.current_bet = total;
                game.last_aggressive_actor_index = Some(seat_index);
                let increment = total - previous_bet;
                game.last_raise_delta = increment;
                game.last_raise_was_full = increment >= previous_delta;
                if game.last_raise_was_full {
                    Self::reset_acted_for_others(game, seat_index);
                }
                // A short all-in raise (increment < previous_delta) does
                // not re-open action for seats that already matched the
                // prior current_bet; their `acted` flag is untouched, and
                // `last_raise_was_full` keeps RAISE off their legal set
                // until a later full raise or a new street reopens it.
            }
            PlayerAction::AllIn => unreachable!("resolved before apply"),
        }

        if game.table.seats[seat_index].stack == 0
            && game.table.seats[seat_index].status == crate::shared::SeatStatus::Active
        {
            game.table.seats[seat_index].status = crate::shared::SeatStatus::AllIn;
        }
    }

    fn reset_acted_for_others(game: &mut GameState, raiser_index: usize) {
        for seat in &mut game.table.seats {
            if seat.index != raiser_index && seat.is_active() {
                seat.acted = false;
            }
        }
    }
}
