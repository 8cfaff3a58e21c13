//! Pot construction and distribution (spec §4.3) — the hardest
//! non-flow logic in the engine. Grounded in the original
//! `PotCalculator`/`PotDistributor` services, generalized to treat
//! folded contributors' chips as still owed to the pots.

use std::collections::{HashMap, HashSet};

use crate::table::Pot;

/// One resolved payout: `pot_type` is "main" for pot 0, `side_N` after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Distribution {
    pub seat_index: usize,
    pub amount: u32,
    pub pot_type: String,
}

pub struct PotCalculator;

impl PotCalculator {
    /// Folds this street's `bet_contributions` (every seat that put
    /// chips in, folded or not) into `existing_pots`, splitting side pots
    /// off wherever an all-in seat capped its own contribution.
    /// `folded_seats` identifies contributors who are never eligible to
    /// win any pot, though their chips still fund every layer up to their
    /// committed amount (spec §4.3 point 4).
    pub fn create_pots_from_bets(
        bet_contributions: &HashMap<usize, u32>,
        all_in_seats: &[usize],
        folded_seats: &[usize],
        existing_pots: Vec<Pot>,
    ) -> Vec<Pot> {
        if bet_contributions.is_empty() {
            return existing_pots;
        }
        // A freshly-reset table carries a single empty sentinel pot
        // (amount 0, no eligible seats). Keeping it as a real pot 0 would
        // violate the nesting invariant the first time an all-in splits
        // the action, so collapse it before laying anything on top.
        let base = if existing_pots.len() == 1
            && existing_pots[0].amount == 0
            && existing_pots[0].eligible_seats.is_empty()
        {
            Vec::new()
        } else {
            existing_pots
        };
        let folded: HashSet<usize> = folded_seats.iter().copied().collect();
        if all_in_seats.is_empty() {
            return Self::add_to_main_pot(bet_contributions, &folded, base);
        }
        Self::create_side_pots(bet_contributions, all_in_seats, &folded, base)
    }

    fn add_to_main_pot(
        bet_contributions: &HashMap<usize, u32>,
        folded: &HashSet<usize>,
        mut existing_pots: Vec<Pot>,
    ) -> Vec<Pot> {
        let total: u32 = bet_contributions.values().sum();
        if existing_pots.is_empty() {
            existing_pots.push(Pot::default());
        }
        let main = &mut existing_pots[0];
        main.amount += total;
        for &seat_index in bet_contributions.keys() {
            if !folded.contains(&seat_index) && !main.eligible_seats.contains(&seat_index) {
                main.eligible_seats.push(seat_index);
            }
        }
        existing_pots
    }

    /// Ascending-level layering: at each distinct contribution level,
    /// everyone still contributing at or above it pays the increment
    /// over the prior level into a new pot layer eligible to everyone
    /// still "remaining" — all-in seats drop out of `remaining` once
    /// their total is reached, folded seats never enter `remaining` in
    /// the first place (their chips still fund every layer up to their
    /// committed amount, as required by spec §4.3 point 4).
    fn create_side_pots(
        bet_contributions: &HashMap<usize, u32>,
        all_in_seats: &[usize],
        folded: &HashSet<usize>,
        existing_pots: Vec<Pot>,
    ) -> Vec<Pot> {
        let mut sorted: Vec<(usize, u32)> = bet_contributions
            .iter()
            .map(|(&s, &a)| (s, a))
            .collect();
        sorted.sort_by_key(|&(_, amount)| amount);

        let mut current_level = 0u32;
        let mut remaining_eligible: Vec<usize> = bet_contributions
            .keys()
            .copied()
            .filter(|s| !folded.contains(s))
            .collect();
        remaining_eligible.sort_unstable();
        let mut pots = existing_pots;

        for &(seat_index, amount) in &sorted {
            if amount > current_level {
                let contribution = amount - current_level;
                // Every contributor still at or above this level (folded
                // or not) pays the increment; only non-folded survivors
                // in `remaining_eligible` may win the layer.
                let payers = bet_contributions
                    .values()
                    .filter(|&&a| a >= amount)
                    .count() as u32;
                let pot_amount = contribution * payers;
                if pot_amount > 0 {
                    pots.push(Pot {
                        amount: pot_amount,
                        eligible_seats: remaining_eligible.clone(),
                    });
                }
                current_level = amount;
            }
            if all_in_seats.contains(&seat_index) {
                remaining_eligible.retain(|&s| s != seat_index);
            }
        }

        pots
    }

    /// For each pot, splits `amount` among the eligible-and-still-in-hand
    /// seats with the lowest `hand_score`; the remainder (`amount %
    /// winners`) goes one chip at a time to the lowest seat indices.
    pub fn calculate_distribution(
        pots: &[Pot],
        hand_scores: &HashMap<usize, u32>,
        in_hand_seats: &[usize],
    ) -> Vec<Distribution> {
        let mut distributions = Vec::new();

        for (pot_index, pot) in pots.iter().enumerate() {
            if pot.amount == 0 {
                continue;
            }
            let mut eligible_in_hand: Vec<usize> = pot
                .eligible_seats
                .iter()
                .copied()
                .filter(|s| in_hand_seats.contains(s) && hand_scores.contains_key(s))
                .collect();
            if eligible_in_hand.is_empty() {
                continue;
            }
            eligible_in_hand.sort_unstable();

            let best_score = eligible_in_hand
                .iter()
                .map(|s| hand_scores[s])
                .min()
                .unwrap();
            let winners: Vec<usize> = eligible_in_hand
                .into_iter()
                .filter(|s| hand_scores[s] == best_score)
                .collect();

            let share = pot.amount / winners.len() as u32;
            let remainder = pot.amount % winners.len() as u32;
            let pot_type = if pot_index == 0 {
                "main".to_string()
            } else {
                format!("side_{pot_index}")
            };

            for (j, &seat_index) in winners.iter().enumerate() {
                let amount = share + if (j as u32) < remainder { 1 } else { 0 };
                distributions.push(Distribution {
                    seat_index,
                    amount,
                    pot_type: pot_type.clone(),
                });
            }
        }

        distributions
    }

    /// Used by tests (and available for a fatal-invariant check in the
    /// engine): amounts non-negative (trivially true for `u32`), every
    /// funded pot has eligible seats, and eligible sets nest.
    pub fn validate_pot_structure(pots: &[Pot]) -> Result<(), String> {
        for (i, pot) in pots.iter().enumerate() {
            if pot.amount > 0 && pot.eligible_seats.is_empty() {
                return Err(format!("pot {i} has amount but no eligible seats"));
            }
        }
        if pots.len() > 1 {
            let main_eligible: std::collections::HashSet<usize> =
                pots[0].eligible_seats.iter().copied().collect();
            for (i, pot) in pots.iter().enumerate().skip(1) {
                let side_eligible: std::collections::HashSet<usize> =
                    pot.eligible_seats.iter().copied().collect();
                if !side_eligible.is_subset(&main_eligible) {
                    return Err(format!(
                        "side pot {i} eligible seats are not a subset of the main pot"
                    ));
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_all_ins_adds_straight_to_main_pot() {
        let contributions = HashMap::from([(0, 100), (1, 100), (2, 100)]);
        let pots =
            PotCalculator::create_pots_from_bets(&contributions, &[], &[], vec![Pot::default()]);
        assert_eq!(pots.len(), 1);
        assert_eq!(pots[0].amount, 300);
        let mut eligible = pots[0].eligible_seats.clone();
        eligible.sort_unstable();
        assert_eq!(eligible, vec![0, 1, 2]);
    }

    #[test]
    fn single_all_in_creates_side_pot() {
        // Seat 0 all-in for 100, seats 1/2 cover to 300 each.
        let contributions = HashMap::from([(0, 100), (1, 300), (2, 300)]);
        let pots = PotCalculator::create_pots_from_bets(
            &contributions,
            &[0],
            &[],
            vec![Pot::default()],
        );
        assert_eq!(pots.len(), 2);
        assert_eq!(pots[0].amount, 300); // 100 * 3 contributors
        let mut main_eligible = pots[0].eligible_seats.clone();
        main_eligible.sort_unstable();
        assert_eq!(main_eligible, vec![0, 1, 2]);
        assert_eq!(pots[1].amount, 400); // (300-100) * 2 remaining
        let mut side_eligible = pots[1].eligible_seats.clone();
        side_eligible.sort_unstable();
        assert_eq!(side_eligible, vec![1, 2]);
    }

    #[test]
    fn folded_contributor_still_funds_pot_but_is_ineligible() {
        // Seat 0 bets 100 then folds; seats 1 and 2 call 100 each.
        let contributions = HashMap::from([(0, 100), (1, 100), (2, 100)]);
        let pots = PotCalculator::create_pots_from_bets(
            &contributions,
            &[],
            &[0],
            vec![Pot::default()],
        );
        assert_eq!(pots[0].amount, 300);
        let mut eligible = pots[0].eligible_seats.clone();
        eligible.sort_unstable();
        assert_eq!(eligible, vec![1, 2]);
        let hand_scores = HashMap::from([(1, 10u32), (2, 20u32)]);
        let dists = PotCalculator::calculate_distribution(&pots, &hand_scores, &[1, 2]);
        assert_eq!(dists.len(), 1);
        assert_eq!(dists[0].seat_index, 1);
        assert_eq!(dists[0].amount, 300);
    }

    #[test]
    fn folded_all_in_contributor_is_excluded_from_side_pot_eligibility() {
        // Seat 0 shoves for 100 then... a seat cannot fold after going
        // all-in (no further decision), but a seat can fold after
        // contributing less than another seat's later all-in. Seat 0
        // bets 50 and folds; seat 1 goes all-in for 200; seat 2 calls 200.
        let contributions = HashMap::from([(0, 50), (1, 200), (2, 200)]);
        let pots = PotCalculator::create_pots_from_bets(
            &contributions,
            &[1],
            &[0],
            vec![Pot::default()],
        );
        // Every layer must exclude seat 0 from eligibility even though its
        // 50 chips fund the lowest layer.
        for pot in &pots {
            assert!(!pot.eligible_seats.contains(&0));
        }
        let total: u32 = pots.iter().map(|p| p.amount).sum();
        assert_eq!(total, 450);
    }

    #[test]
    fn remainder_goes_to_lowest_seat_index_first() {
        let pots = vec![Pot {
            amount: 301,
            eligible_seats: vec![0, 1],
        }];
        let hand_scores = HashMap::from([(0, 5u32), (1, 5u32)]);
        let dists = PotCalculator::calculate_distribution(&pots, &hand_scores, &[0, 1]);
        assert_eq!(dists.len(), 2);
        let seat0 = dists.iter().find(|d| d.seat_index == 0).unwrap();
        let seat1 = dists.iter().find(|d| d.seat_index == 1).unwrap();
        assert_eq!(seat0.amount, 151);
        assert_eq!(seat1.amount, 150);
    }

    #[test]
    fn validate_rejects_non_nested_side_pots() {
        let pots = vec![
            Pot {
                amount: 100,
                eligible_seats: vec![0, 1],
            },
            Pot {
                amount: 50,
                eligible_seats: vec![1, 2],
            },
        ];
        assert!(PotCalculator::validate_pot_structure(&pots).is_err());
    }
}
