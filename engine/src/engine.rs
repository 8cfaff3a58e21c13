//! `GameState` (spec §3) and the hand state machine driving it (spec §4.8).

use serde::{Deserialize, Serialize};

use crate::action::ActionService;
use crate::dealer::DealerService;
use crate::error::{GameError, GameResult};
use crate::pot::PotCalculator;
use crate::shared::{ActionRecord, GameStatus, Player, PlayerAction, Round, WinnerShare};
use crate::showdown::ShowdownService;
use crate::table::Table;
use crate::turn::TurnManager;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub id: String,
    pub status: GameStatus,
    pub current_round: Round,
    pub table: Table,
    pub small_blind: u32,
    pub big_blind: u32,
    pub dealer_seat_index: Option<usize>,
    pub small_blind_seat_index: Option<usize>,
    pub big_blind_seat_index: Option<usize>,
    pub current_seat_index: Option<usize>,
    /// The highest `bet_in_round` anyone at the table still must match.
    pub current_bet: u32,
    /// Size of the most recent legal raise increment; reset to the big
    /// blind at the start of every street.
    pub last_raise_delta: u32,
    pub last_aggressive_actor_index: Option<usize>,
    /// False after a short all-in raise, until a full raise (or a new
    /// street) reopens the right to raise for seats that already acted.
    pub last_raise_was_full: bool,
    pub action_history: Vec<ActionRecord>,
    pub winners: Vec<WinnerShare>,
}

impl GameState {
    pub fn new(id: String, seat_count: usize, small_blind: u32, big_blind: u32) -> Self {
        Self {
            id,
            status: GameStatus::Waiting,
            current_round: Round::PreFlop,
            table: Table::new(seat_count),
            small_blind,
            big_blind,
            dealer_seat_index: None,
            small_blind_seat_index: None,
            big_blind_seat_index: None,
            current_seat_index: None,
            current_bet: 0,
            last_raise_delta: 0,
            last_aggressive_actor_index: None,
            last_raise_was_full: true,
            action_history: Vec::new(),
            winners: Vec::new(),
        }
    }

    /// Seats `player` at `seat_index` with `buy_in` chips. Only legal while
    /// WAITING or between hands; the seat must currently be empty.
    pub fn seat_player(
        &mut self,
        seat_index: usize,
        player: Player,
        buy_in: u32,
    ) -> GameResult<()> {
        let seat = self
            .table
            .seats
            .get_mut(seat_index)
            .ok_or_else(|| GameError::CapacityExceeded(format!("no seat {seat_index}")))?;
        if seat.is_occupied() {
            return Err(GameError::CapacityExceeded(format!(
                "seat {seat_index} is already occupied"
            )));
        }
        seat.sit_down(player, buy_in);
        Ok(())
    }
}

pub struct Engine;

impl Engine {
    /// WAITING → IN_PROGRESS(PREFLOP). Requires at least two active seats.
    pub fn start_new_hand(game: &mut GameState) -> GameResult<()> {
        DealerService::setup_new_hand(game)?;
        game.status = GameStatus::InProgress;
        game.winners.clear();
        game.action_history.clear();
        TurnManager::set_first_actor_for_round(game);
        Ok(())
    }

    /// Validates and applies `action` for `player_id`, then drives the hand
    /// forward exactly as far as that single action allows: advancing the
    /// actor, closing the street, running out the board, or completing the
    /// hand outright.
    pub fn apply_action(
        game: &mut GameState,
        player_id: &str,
        action: PlayerAction,
    ) -> GameResult<()> {
        let seat_index = game
            .table
            .seat_by_player_id(player_id)
            .ok_or_else(|| GameError::NotFound(format!("player {player_id}")))?
            .index;

        ActionService::validate_and_apply(game, player_id, action)?;
        game.action_history.push(ActionRecord {
            seat_index,
            action,
            round: game.current_round,
        });

        Self::advance(game)
    }

    fn advance(game: &mut GameState) -> GameResult<()> {
        if game.table.is_hand_over() {
            DealerService::collect_bets_to_pots(game);
            ShowdownService::resolve_fold_win(game);
            return Ok(());
        }

        if !TurnManager::round_complete(game) {
            TurnManager::advance_to_next_actor(game);
            return Ok(());
        }

        DealerService::collect_bets_to_pots(game);
        if let Err(msg) = PotCalculator::validate_pot_structure(&game.table.pots) {
            tracing::error!(
                action_history = ?game.action_history,
                game_id = %game.id,
                "pot invariant breach: {msg}",
            );
            return Err(GameError::Internal(msg));
        }

        if game.current_round == Round::River || game.table.is_betting_over() {
            ShowdownService::resolve(game);
            return Ok(());
        }

        let from_round = game.current_round;
        DealerService::deal_community_cards(game, from_round)
            .expect("community card count matches the round transition");
        game.current_round = match from_round {
            Round::PreFlop => Round::Flop,
            Round::Flop => Round::Turn,
            Round::Turn => Round::River,
            Round::River | Round::Showdown => unreachable!("handled above"),
        };
        TurnManager::reset_for_new_round(game);
        game.last_raise_delta = game.big_blind;
        TurnManager::set_first_actor_for_round(game);
        Ok(())
    }
}
