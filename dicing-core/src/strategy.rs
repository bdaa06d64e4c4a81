//! Computer reroll policies.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::dice::{self, Hand, SelectionMask, HAND_SIZE};

/// Maximum reroll attempts the computer may spend per round.
pub const COMPUTER_REROLL_CAP: u8 = 2;

/// Faces below this value get rerolled by the smart policy, biasing the hand
/// toward the upper half of the 1..=6 distribution.
const SMART_THRESHOLD: u8 = 3;

/// The computer's reroll decision strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    /// Reroll every die below the smart threshold.
    Smart,
    /// Reroll each die on an independent coin flip.
    Random,
}

impl Default for Policy {
    fn default() -> Self {
        Policy::Smart
    }
}

/// Decide and apply a single reroll attempt for the computer.
///
/// Returns the (possibly unchanged) hand and the updated attempt count.
/// With the budget exhausted the call is a no-op, not an error. An attempt
/// that marks nothing also comes back unchanged and costs no budget.
pub fn decide_reroll<R: Rng>(hand: Hand, used: u8, policy: Policy, rng: &mut R) -> (Hand, u8) {
    if used >= COMPUTER_REROLL_CAP {
        return (hand, used);
    }

    let mut marks: SelectionMask = [false; HAND_SIZE];
    for (mark, &die) in marks.iter_mut().zip(&hand) {
        *mark = match policy {
            Policy::Smart => die < SMART_THRESHOLD,
            Policy::Random => rng.gen_bool(0.5),
        };
    }

    if marks.iter().all(|&m| !m) {
        return (hand, used);
    }

    (dice::reroll_selected(hand, marks, rng), used + 1)
}
