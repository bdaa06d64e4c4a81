//! Round scoring: a round is worth the sum of the five dice.

use std::cmp::Ordering;

use crate::dice::Hand;
use crate::state::Side;

/// Score of a hand: the sum of its values (5..=30 for a valid hand).
pub fn round_score(hand: Hand) -> u32 {
    hand.iter().map(|&d| u32::from(d)).sum()
}

/// Which side leads, if either, given the two accumulated totals.
pub fn leader(player_total: u32, computer_total: u32) -> Option<Side> {
    match player_total.cmp(&computer_total) {
        Ordering::Greater => Some(Side::Player),
        Ordering::Less => Some(Side::Computer),
        Ordering::Equal => None,
    }
}
