//! Deck and hand evaluator (spec §4.1).
//!
//! The evaluator ranks any 2 hole + 3..5 community cards by checking
//! all `C(n, 5)` five-card combinations, folding the result into a
//! single `u32` score instead of a separate rank/kickers pair, so ties
//! compare with a plain integer comparison and the score is stable
//! across processes.

use std::cmp::Ordering;
use std::collections::HashMap;

use super::shared::{Card, Rank, Suit};
use itertools::Itertools;
use rand::rng;
use rand::seq::SliceRandom;

/// The 9 standard hand categories, worst to best. The discriminant is
/// inverted into the score so that stronger categories produce lower
/// scores (spec: "lower means stronger").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum HandCategory {
    HighCard,
    OnePair,
    TwoPair,
    ThreeOfAKind,
    Straight,
    Flush,
    FullHouse,
    FourOfAKind,
    StraightFlush,
}

impl HandCategory {
    fn display_name(self) -> &'static str {
        match self {
            HandCategory::HighCard => "High Card",
            HandCategory::OnePair => "One Pair",
            HandCategory::TwoPair => "Two Pair",
            HandCategory::ThreeOfAKind => "Three of a Kind",
            HandCategory::Straight => "Straight",
            HandCategory::Flush => "Flush",
            HandCategory::FullHouse => "Full House",
            HandCategory::FourOfAKind => "Four of a Kind",
            HandCategory::StraightFlush => "Straight Flush",
        }
    }
}

/// Every kicker slot packs into base `KICKER_BASE`, five slots deep, so the
/// strongest possible kicker run is still smaller than one category step.
const KICKER_BASE: u32 = 15;
const KICKER_SPAN: u32 = KICKER_BASE.pow(5); // 759_375
const CATEGORY_STEP: u32 = KICKER_SPAN + 1;

/// A totally ordered hand score: lower is stronger. Equal scores mean an
/// exact tie (chop), matching spec §4.1.
pub type HandScore = u32;

fn kicker_code(kickers: &[Rank]) -> u32 {
    let mut code = 0u32;
    for &k in kickers.iter().take(5) {
        code = code * KICKER_BASE + k.value() as u32;
    }
    // Left-pad so hands with fewer kickers still compare correctly.
    for _ in kickers.len()..5 {
        code *= KICKER_BASE;
    }
    code
}

fn score_for(category: HandCategory, kickers: &[Rank]) -> HandScore {
    let worst_first = HandCategory::StraightFlush as u32 - category as u32;
    worst_first * CATEGORY_STEP + (KICKER_SPAN - kicker_code(kickers))
}

/// Maps a score back to its display name. Used by the showdown result and
/// by the viewer-scoped snapshot.
pub fn hand_name(score: HandScore) -> &'static str {
    let worst_first = score / CATEGORY_STEP;
    let category_ord = HandCategory::StraightFlush as u32 - worst_first;
    let category = match category_ord {
        0 => HandCategory::HighCard,
        1 => HandCategory::OnePair,
        2 => HandCategory::TwoPair,
        3 => HandCategory::ThreeOfAKind,
        4 => HandCategory::Straight,
        5 => HandCategory::Flush,
        6 => HandCategory::FullHouse,
        7 => HandCategory::FourOfAKind,
        _ => HandCategory::StraightFlush,
    };
    category.display_name()
}

/// A shuffled 52-card deck with a draw cursor; `draw` consumes cards
/// without replacement and never reshuffles mid-deal.
#[derive(Debug, Clone)]
pub struct Deck {
    cards: Vec<Card>,
    cursor: usize,
}

impl Deck {
    pub fn new() -> Self {
        let mut cards = Vec::with_capacity(52);
        for &suit in &[Suit::Clubs, Suit::Diamonds, Suit::Hearts, Suit::Spades] {
            for value in 2..=14u8 {
                cards.push(Card {
                    suit,
                    rank: Rank::from_value(value),
                });
            }
        }
        Self { cards, cursor: 0 }
    }

    /// Fisher-Yates shuffle over the remaining (undrawn) cards and resets
    /// the cursor to the top of a fresh deck.
    pub fn shuffle(&mut self) {
        if self.cards.len() != 52 || self.cursor != 0 {
            *self = Self::new();
        }
        let mut rng = rng();
        self.cards.shuffle(&mut rng);
    }

    /// Draws `n` distinct cards, advancing the cursor. Panics if the deck
    /// doesn't have `n` cards left — callers (DealerService) only ever
    /// draw amounts bounded by the 52-card deck and the table size.
    pub fn draw(&mut self, n: usize) -> Vec<Card> {
        assert!(
            self.cursor + n <= self.cards.len(),
            "deck exhausted: {} left, {} requested",
            self.cards.len() - self.cursor,
            n
        );
        let drawn = self.cards[self.cursor..self.cursor + n].to_vec();
        self.cursor += n;
        drawn
    }

    pub fn remaining(&self) -> usize {
        self.cards.len() - self.cursor
    }
}

impl Default for Deck {
    fn default() -> Self {
        Self::new()
    }
}

/// Evaluates exactly 2 hole + 3..5 community cards and returns the best
/// achievable 5-card score.
pub fn evaluate_hand(hole_cards: &(Card, Card), community_cards: &[Card]) -> HandScore {
    assert!(
        (3..=5).contains(&community_cards.len()),
        "community cards must be 3..5, got {}",
        community_cards.len()
    );
    let mut all_cards = vec![hole_cards.0, hole_cards.1];
    all_cards.extend_from_slice(community_cards);
    best_five_card_score(&all_cards)
}

fn best_five_card_score(cards: &[Card]) -> HandScore {
    if cards.len() == 5 {
        return evaluate_five_cards(cards);
    }
    cards
        .iter()
        .copied()
        .combinations(5)
        .map(|hand| evaluate_five_cards(&hand))
        .min()
        .expect("at least one 5-card combination")
}

fn evaluate_five_cards(cards: &[Card]) -> HandScore {
    debug_assert_eq!(cards.len(), 5);

    let mut rank_counts: HashMap<Rank, u8> = HashMap::new();
    for card in cards {
        *rank_counts.entry(card.rank).or_insert(0) += 1;
    }
    let is_flush = cards.windows(2).all(|w| w[0].suit == w[1].suit);
    let (is_straight, straight_high) = check_straight(cards);

    if is_flush && is_straight {
        return score_for(HandCategory::StraightFlush, &[straight_high]);
    }

    if let Some(quad_rank) = rank_counts.iter().find(|(_, &c)| c == 4).map(|(r, _)| *r) {
        let kicker = *rank_counts
            .iter()
            .filter(|(r, _)| **r != quad_rank)
            .map(|(r, _)| r)
            .max()
            .unwrap();
        return score_for(HandCategory::FourOfAKind, &[quad_rank, kicker]);
    }

    if let Some(three_rank) = rank_counts.iter().find(|(_, &c)| c == 3).map(|(r, _)| *r) {
        if let Some(pair_rank) = rank_counts
            .iter()
            .filter(|(r, _)| **r != three_rank)
            .find(|(_, &c)| c >= 2)
            .map(|(r, _)| *r)
        {
            return score_for(HandCategory::FullHouse, &[three_rank, pair_rank]);
        }
    }

    if is_flush {
        let kickers = sorted_desc(cards.iter().map(|c| c.rank));
        return score_for(HandCategory::Flush, &kickers);
    }

    if is_straight {
        return score_for(HandCategory::Straight, &[straight_high]);
    }

    if let Some(three_rank) = rank_counts.iter().find(|(_, &c)| c == 3).map(|(r, _)| *r) {
        let mut kickers = sorted_desc(
            rank_counts
                .iter()
                .filter(|(r, _)| **r != three_rank)
                .map(|(r, _)| *r),
        );
        kickers.truncate(2);
        let mut full = vec![three_rank];
        full.extend(kickers);
        return score_for(HandCategory::ThreeOfAKind, &full);
    }

    let mut pairs: Vec<Rank> = rank_counts
        .iter()
        .filter(|(_, &c)| c == 2)
        .map(|(r, _)| *r)
        .collect();
    pairs.sort_by(|a, b| b.cmp(a));

    if pairs.len() >= 2 {
        let high_pair = pairs[0];
        let low_pair = pairs[1];
        let kicker = *rank_counts
            .iter()
            .filter(|(r, _)| **r != high_pair && **r != low_pair)
            .map(|(r, _)| r)
            .max()
            .unwrap();
        return score_for(HandCategory::TwoPair, &[high_pair, low_pair, kicker]);
    }

    if let Some(pair_rank) = pairs.first().copied() {
        let mut kickers = sorted_desc(
            rank_counts
                .iter()
                .filter(|(r, _)| **r != pair_rank)
                .map(|(r, _)| *r),
        );
        kickers.truncate(3);
        let mut full = vec![pair_rank];
        full.extend(kickers);
        return score_for(HandCategory::OnePair, &full);
    }

    let kickers = sorted_desc(cards.iter().map(|c| c.rank));
    score_for(HandCategory::HighCard, &kickers)
}

fn sorted_desc(ranks: impl Iterator<Item = Rank>) -> Vec<Rank> {
    let mut v: Vec<Rank> = ranks.collect();
    v.sort_by(|a, b| b.cmp(a));
    v
}

/// Checks whether `cards` (any 5) form a straight, treating Ace as both
/// high and low (the wheel, A-2-3-4-5). Returns the straight's high card.
fn check_straight(cards: &[Card]) -> (bool, Rank) {
    let mut values: Vec<u8> = cards.iter().map(|c| c.rank.value()).collect();
    values.sort_unstable();
    values.dedup();
    if values.len() < 5 {
        return (false, Rank::Two);
    }
    if values.contains(&14) {
        // wheel candidate: treat ace as 1 too
        let mut with_low_ace = values.clone();
        with_low_ace.insert(0, 1);
        if let (true, _) = run_of_five(&with_low_ace) {
            if with_low_ace
                .windows(5)
                .any(|w| w == [1, 2, 3, 4, 5])
            {
                return (true, Rank::Five);
            }
        }
    }
    run_of_five(&values)
}

fn run_of_five(sorted_unique: &[u8]) -> (bool, Rank) {
    let mut consecutive = 1;
    let mut high = 0u8;
    for i in 1..sorted_unique.len() {
        if sorted_unique[i] == sorted_unique[i - 1] + 1 {
            consecutive += 1;
            if consecutive >= 5 {
                high = sorted_unique[i];
            }
        } else {
            consecutive = 1;
        }
    }
    if high > 0 {
        (true, Rank::from_value(high))
    } else {
        (false, Rank::Two)
    }
}

pub fn compare_scores(a: HandScore, b: HandScore) -> Ordering {
    // Lower is stronger, so invert the natural integer order for callers
    // that want "greater means better".
    b.cmp(&a)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::{Card, Rank, Suit};

    fn card(rank: Rank, suit: Suit) -> Card {
        Card { suit, rank }
    }

    #[test]
    fn royal_flush_beats_straight_flush() {
        let royal = evaluate_five_cards(&[
            card(Rank::Ace, Suit::Hearts),
            card(Rank::King, Suit::Hearts),
            card(Rank::Queen, Suit::Hearts),
            card(Rank::Jack, Suit::Hearts),
            card(Rank::Ten, Suit::Hearts),
        ]);
        let straight_flush = evaluate_five_cards(&[
            card(Rank::Nine, Suit::Spades),
            card(Rank::Eight, Suit::Spades),
            card(Rank::Seven, Suit::Spades),
            card(Rank::Six, Suit::Spades),
            card(Rank::Five, Suit::Spades),
        ]);
        assert!(royal < straight_flush);
    }

    #[test]
    fn wheel_straight_ranks_below_six_high() {
        let wheel = evaluate_five_cards(&[
            card(Rank::Ace, Suit::Clubs),
            card(Rank::Two, Suit::Hearts),
            card(Rank::Three, Suit::Diamonds),
            card(Rank::Four, Suit::Spades),
            card(Rank::Five, Suit::Clubs),
        ]);
        let six_high = evaluate_five_cards(&[
            card(Rank::Six, Suit::Clubs),
            card(Rank::Two, Suit::Hearts),
            card(Rank::Three, Suit::Diamonds),
            card(Rank::Four, Suit::Spades),
            card(Rank::Five, Suit::Clubs),
        ]);
        assert!(wheel > six_high);
        assert_eq!(hand_name(wheel), "Straight");
    }

    #[test]
    fn identical_hands_tie_exactly() {
        let a = evaluate_five_cards(&[
            card(Rank::King, Suit::Hearts),
            card(Rank::King, Suit::Clubs),
            card(Rank::Four, Suit::Diamonds),
            card(Rank::Seven, Suit::Spades),
            card(Rank::Two, Suit::Hearts),
        ]);
        let b = evaluate_five_cards(&[
            card(Rank::King, Suit::Diamonds),
            card(Rank::King, Suit::Spades),
            card(Rank::Four, Suit::Clubs),
            card(Rank::Seven, Suit::Hearts),
            card(Rank::Two, Suit::Diamonds),
        ]);
        assert_eq!(a, b);
    }

    #[test]
    fn seven_card_evaluation_picks_best_five() {
        let hole = (card(Rank::Ace, Suit::Spades), card(Rank::Ace, Suit::Hearts));
        let community = vec![
            card(Rank::Ace, Suit::Clubs),
            card(Rank::Ace, Suit::Diamonds),
            card(Rank::King, Suit::Hearts),
            card(Rank::Two, Suit::Clubs),
            card(Rank::Three, Suit::Diamonds),
        ];
        let score = evaluate_hand(&hole, &community);
        assert_eq!(hand_name(score), "Four of a Kind");
    }
}
