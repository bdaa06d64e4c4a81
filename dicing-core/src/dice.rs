//! Dice hand primitives: rolling and selective rerolling.

use rand::Rng;

/// Number of dice in a hand.
pub const HAND_SIZE: usize = 5;

/// A hand of five dice, each in 1..=6.
///
/// Hands are position-significant: selection masks index into them. Dice are
/// replaced, never mutated in place.
pub type Hand = [u8; HAND_SIZE];

/// Per-position boolean mask over a hand.
///
/// `reroll_selected` reads it as "reroll this position". The session's
/// player-facing selection stores the opposite sense ("keep this position")
/// and negates it at throw time.
pub type SelectionMask = [bool; HAND_SIZE];

/// Roll a fresh hand: five independent uniform draws in 1..=6.
pub fn roll_all<R: Rng>(rng: &mut R) -> Hand {
    let mut hand = [0u8; HAND_SIZE];
    for d in &mut hand {
        *d = rng.gen_range(1..=6);
    }
    hand
}

/// Reroll the positions where `reroll` is true; the rest are copied unchanged.
///
/// Mask and hand lengths cannot disagree: both are fixed-size arrays.
pub fn reroll_selected<R: Rng>(hand: Hand, reroll: SelectionMask, rng: &mut R) -> Hand {
    let mut next = hand;
    for (die, flagged) in next.iter_mut().zip(reroll) {
        if flagged {
            *die = rng.gen_range(1..=6);
        }
    }
    next
}
