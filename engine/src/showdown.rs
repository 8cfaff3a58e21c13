//! Showdown resolution: scoring, distribution, and crediting winners
//! (spec §4.7). Grounded in the original `ShowdownService`.

use crate::dealer::DealerService;
use crate::engine::GameState;
use crate::pot::PotCalculator;
use crate::rules::{evaluate_hand, hand_name};
use crate::shared::{GameStatus, Round, WinnerShare};
use std::collections::HashMap;

pub struct ShowdownService;

impl ShowdownService {
    /// Deals any remaining streets with no further betting (the run-out
    /// path), scores every in-hand seat, distributes the pots, credits
    /// winners, and completes the hand.
    pub fn resolve(game: &mut GameState) {
        Self::run_out_remaining_streets(game);

        let in_hand = game.table.in_hand_seats();
        let mut hand_scores = HashMap::new();
        for &idx in &in_hand {
            let seat = &game.table.seats[idx];
            let hole = (seat.hole_cards[0], seat.hole_cards[1]);
            let score = evaluate_hand(&hole, &game.table.community_cards);
            hand_scores.insert(idx, score);
        }
        for (&idx, &score) in &hand_scores {
            game.table.seats[idx].hand_score = score;
            game.table.seats[idx].show_hand = true;
        }

        let distributions =
            PotCalculator::calculate_distribution(&game.table.pots, &hand_scores, &in_hand);

        let mut winners = Vec::new();
        for dist in &distributions {
            let seat = &mut game.table.seats[dist.seat_index];
            seat.refund(dist.amount);
            winners.push(WinnerShare {
                seat_index: dist.seat_index,
                player_id: seat.player.as_ref().map(|p| p.id.clone()).unwrap_or_default(),
                player_name: seat
                    .player
                    .as_ref()
                    .map(|p| p.name.clone())
                    .unwrap_or_default(),
                amount: dist.amount,
                pot_type: dist.pot_type.clone(),
                hand_name: hand_name(seat.hand_score).to_string(),
                hand_score: seat.hand_score,
                hole_cards: seat.hole_cards.clone(),
            });
        }

        game.winners = winners;
        game.current_round = Round::Showdown;
        game.status = GameStatus::HandComplete;
    }

    /// The single remaining in-hand seat takes the entire pot with no
    /// evaluator call.
    pub fn resolve_fold_win(game: &mut GameState) {
        let in_hand = game.table.in_hand_seats();
        debug_assert_eq!(in_hand.len(), 1, "fold-win requires exactly one seat left");
        let winner_index = in_hand[0];
        let total = game.table.total_pot();

        let seat = &mut game.table.seats[winner_index];
        seat.refund(total);
        game.winners = vec![WinnerShare {
            seat_index: winner_index,
            player_id: seat.player.as_ref().map(|p| p.id.clone()).unwrap_or_default(),
            player_name: seat
                .player
                .as_ref()
                .map(|p| p.name.clone())
                .unwrap_or_default(),
            amount: total,
            pot_type: "main".to_string(),
            hand_name: "fold-win".to_string(),
            hand_score: seat.hand_score,
            hole_cards: seat.hole_cards.clone(),
        }];

        game.status = GameStatus::HandComplete;
    }

    fn run_out_remaining_streets(game: &mut GameState) {
        loop {
            let before = game.current_round;
            match before {
                Round::PreFlop => {
                    let _ = DealerService::deal_community_cards(game, Round::PreFlop);
                    game.current_round = Round::Flop;
                }
                Round::Flop => {
                    let _ = DealerService::deal_community_cards(game, Round::Flop);
                    game.current_round = Round::Turn;
                }
                Round::Turn => {
                    let _ = DealerService::deal_community_cards(game, Round::Turn);
                    game.current_round = Round::River;
                }
                Round::River | Round::Showdown => break,
            }
        }
    }
}
