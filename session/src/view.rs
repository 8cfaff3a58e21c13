//! Builds the viewer-scoped `game_state` snapshot: everything in
//! `GameState` is visible except hole cards, which only appear for the
//! viewer's own seat, a seat whose `show_hand` flag is set, or any seat
//! once the hand is `HAND_COMPLETE`. Grounded in the original
//! `serialize_game_state` / `serialize_seat`.

use serde::Serialize;

use poker_engine::{ActionType, Card, GameState, GameStatus, Round, Seat, WinnerShare};

use crate::ai;

#[derive(Debug, Clone, Serialize)]
pub struct PlayerView {
    pub id: String,
    pub name: String,
    pub is_ai: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeatView {
    pub index: usize,
    pub player: Option<PlayerView>,
    pub stack: u32,
    pub status: String,
    pub bet_in_round: u32,
    pub bet_in_hand: u32,
    pub hole_cards: Vec<Card>,
    pub last_action: Option<ActionType>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PotView {
    pub amount: u32,
    pub eligible_seats: Vec<usize>,
}

#[derive(Debug, Clone, Serialize)]
pub struct GameStateView {
    pub game_id: String,
    pub status: GameStatus,
    pub current_round: Round,
    pub current_seat_index: Option<usize>,
    pub current_bet: u32,
    pub small_blind: u32,
    pub big_blind: u32,
    pub dealer_seat_index: Option<usize>,
    pub community_cards: Vec<Card>,
    pub pots: Vec<PotView>,
    pub seats: Vec<SeatView>,
    pub winners: Vec<WinnerShare>,
    pub valid_actions: Vec<poker_engine::LegalAction>,
}

fn seat_view(seat: &Seat, viewing_player_id: &str, hand_complete: bool) -> SeatView {
    let Some(player) = &seat.player else {
        return SeatView {
            index: seat.index,
            player: None,
            stack: 0,
            status: format!("{:?}", seat.status).to_uppercase(),
            bet_in_round: 0,
            bet_in_hand: 0,
            hole_cards: Vec::new(),
            last_action: None,
        };
    };

    let show_cards = player.id == viewing_player_id || seat.show_hand || hand_complete;

    SeatView {
        index: seat.index,
        player: Some(PlayerView {
            id: player.id.clone(),
            name: player.name.clone(),
            is_ai: player.is_ai,
        }),
        stack: seat.stack,
        status: format!("{:?}", seat.status).to_uppercase(),
        bet_in_round: seat.bet_in_round,
        bet_in_hand: seat.bet_in_hand,
        hole_cards: if show_cards {
            seat.hole_cards.clone()
        } else {
            Vec::new()
        },
        last_action: seat.last_action,
    }
}

/// Builds the snapshot `viewing_player_id` is allowed to see. `valid_actions`
/// is only non-empty when it is currently that player's turn — the engine's
/// own `legal_actions_for_player` already enforces that.
pub fn build(game: &GameState, viewing_player_id: &str) -> GameStateView {
    let hand_complete = game.status == GameStatus::HandComplete;
    let valid_actions = ai::human_legal_actions(game, viewing_player_id);

    GameStateView {
        game_id: game.id.clone(),
        status: game.status,
        current_round: game.current_round,
        current_seat_index: game.current_seat_index,
        current_bet: game.current_bet,
        small_blind: game.small_blind,
        big_blind: game.big_blind,
        dealer_seat_index: game.dealer_seat_index,
        community_cards: game.table.community_cards.clone(),
        pots: game
            .table
            .pots
            .iter()
            .map(|p| PotView {
                amount: p.amount,
                eligible_seats: p.eligible_seats.clone(),
            })
            .collect(),
        seats: game
            .table
            .seats
            .iter()
            .map(|s| seat_view(s, viewing_player_id, hand_complete))
            .collect(),
        winners: game.winners.clone(),
        valid_actions,
    }
}
