//! Hand setup, blinds, dealing, and end-of-street bet collection
//! (spec §4.6). Grounded in the original `DealerService`.

use std::collections::HashMap;

use crate::engine::GameState;
use crate::error::{GameError, GameResult};
use crate::pot::PotCalculator;
use crate::shared::{Round, SeatStatus};

pub struct DealerService;

impl DealerService {
    /// Requires at least two active seats. Rotates the button, computes
    /// blind seats, posts blinds, shuffles, and deals two cards to every
    /// in-hand seat in seat order.
    pub fn setup_new_hand(game: &mut GameState) -> GameResult<()> {
        game.table.reset_for_new_hand();

        let active: Vec<usize> = game.table.active_seats();
        if active.len() < 2 {
            return Err(GameError::PrecondUnmet(
                "at least two active seats are required to start a hand".to_string(),
            ));
        }

        let dealer = match game.dealer_seat_index {
            Some(prev) => game
                .table
                .next_active_seat_index(prev)
                .unwrap_or(active[0]),
            None => active[0],
        };
        game.dealer_seat_index = Some(dealer);

        let (sb, bb) = if active.len() == 2 {
            let other = game
                .table
                .next_active_seat_index(dealer)
                .expect("two active seats");
            (dealer, other)
        } else {
            let sb = game
                .table
                .next_active_seat_index(dealer)
                .expect("active seat after dealer");
            let bb = game
                .table
                .next_active_seat_index(sb)
                .expect("active seat after small blind");
            (sb, bb)
        };
        game.small_blind_seat_index = Some(sb);
        game.big_blind_seat_index = Some(bb);

        game.table.seats[sb].pay(game.small_blind);
        game.table.seats[bb].pay(game.big_blind);
        game.table.seats[bb].acted = false;

        game.current_bet = game.table.seats[sb]
            .bet_in_round
            .max(game.table.seats[bb].bet_in_round);
        game.last_raise_delta = game.big_blind;

        game.table.deck.shuffle();
        let in_hand: Vec<usize> = game.table.in_hand_seats();
        for idx in in_hand {
            let drawn = game.table.deck.draw(2);
            game.table.seats[idx].receive_cards([drawn[0], drawn[1]]);
        }

        game.current_round = Round::PreFlop;
        Ok(())
    }

    /// Gathers every seat's `bet_in_round` (folded seats included),
    /// folds it into the pot list via `PotCalculator`, and zeros
    /// `bet_in_round` on every seat.
    pub fn collect_bets_to_pots(game: &mut GameState) {
        let mut contributions = HashMap::new();
        let mut all_in_seats = Vec::new();
        let mut folded_seats = Vec::new();
        for seat in &game.table.seats {
            if seat.bet_in_round > 0 {
                contributions.insert(seat.index, seat.bet_in_round);
            }
            if seat.status == SeatStatus::AllIn {
                all_in_seats.push(seat.index);
            }
            if seat.status == SeatStatus::Folded {
                folded_seats.push(seat.index);
            }
        }

        game.table.pots = PotCalculator::create_pots_from_bets(
            &contributions,
            &all_in_seats,
            &folded_seats,
            std::mem::take(&mut game.table.pots),
        );

        for seat in &mut game.table.seats {
            seat.bet_in_round = 0;
        }
    }

    /// Deals the community cards for the transition out of `from_round`,
    /// enforcing that the table's current community length matches what
    /// that transition expects.
    pub fn deal_community_cards(game: &mut GameState, from_round: Round) -> GameResult<()> {
        let expected_len = match from_round {
            Round::PreFlop => 0,
            Round::Flop => 3,
            Round::Turn => 4,
            Round::River | Round::Showdown => {
                return Err(GameError::IllegalState(
                    "no community cards are dealt after the river".to_string(),
                ))
            }
        };
        if game.table.community_cards.len() != expected_len {
            return Err(GameError::IllegalState(format!(
                "expected {expected_len} community cards before dealing, found {}",
                game.table.community_cards.len()
            )));
        }
        let to_deal = match from_round {
            Round::PreFlop => 3,
            Round::Flop | Round::Turn => 1,
            Round::River | Round::Showdown => unreachable!(),
        };
        let cards = game.table.deck.draw(to_deal);
        game.table.community_cards.extend(cards);
        Ok(())
    }
}
