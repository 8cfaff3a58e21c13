//! Table composite: seats, deck, community cards, and pots (spec §3, §4.2).

use serde::{Deserialize, Serialize};

use crate::rules::Deck;
use crate::seat::Seat;
use crate::shared::Card;

/// One pot layer. Pot 0 is the main pot; later entries are side pots in
/// creation order, each eligible set a subset of its predecessor's.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Pot {
    pub amount: u32,
    pub eligible_seats: Vec<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Table {
    pub seats: Vec<Seat>,
    #[serde(skip)]
    pub deck: Deck,
    pub community_cards: Vec<Card>,
    pub pots: Vec<Pot>,
}

impl Table {
    pub fn new(seat_count: usize) -> Self {
        Self {
            seats: (0..seat_count).map(Seat::new).collect(),
            deck: Deck::new(),
            community_cards: Vec::new(),
            pots: vec![Pot::default()],
        }
    }

    pub fn total_pot(&self) -> u32 {
        self.pots.iter().map(|p| p.amount).sum()
    }

    pub fn in_hand_seats(&self) -> Vec<usize> {
        self.seats
            .iter()
            .filter(|s| s.in_hand())
            .map(|s| s.index)
            .collect()
    }

    pub fn active_seats(&self) -> Vec<usize> {
        self.seats
            .iter()
            .filter(|s| s.is_active())
            .map(|s| s.index)
            .collect()
    }

    pub fn empty_seats(&self) -> Vec<usize> {
        self.seats
            .iter()
            .filter(|s| !s.is_occupied())
            .map(|s| s.index)
            .collect()
    }

    pub fn is_hand_over(&self) -> bool {
        self.in_hand_seats().len() <= 1
    }

    pub fn is_betting_over(&self) -> bool {
        self.active_seats().len() <= 1
    }

    pub fn seat_by_player_id(&self, player_id: &str) -> Option<&Seat> {
        self.seats
            .iter()
            .find(|s| s.player.as_ref().is_some_and(|p| p.id == player_id))
    }

    pub fn seat_by_player_id_mut(&mut self, player_id: &str) -> Option<&mut Seat> {
        self.seats
            .iter_mut()
            .find(|s| s.player.as_ref().is_some_and(|p| p.id == player_id))
    }

    /// Lazily resets the table for a new hand: fresh deck, cleared
    /// community cards, a single empty pot, per-seat hand reset.
    pub fn reset_for_new_hand(&mut self) {
        self.deck = Deck::new();
        self.deck.shuffle();
        self.community_cards.clear();
        self.pots = vec![Pot::default()];
        for seat in &mut self.seats {
            seat.clear_for_new_hand();
        }
    }

    pub fn reset_for_new_round(&mut self) {
        for seat in &mut self.seats {
            seat.reset_for_new_round();
        }
    }

    pub fn next_active_seat_index(&self, from: usize) -> Option<usize> {
        let n = self.seats.len();
        for step in 1..=n {
            let idx = (from + step) % n;
            if self.seats[idx].is_active() {
                return Some(idx);
            }
        }
        None
    }
}
