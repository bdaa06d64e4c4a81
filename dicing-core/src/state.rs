//! Canonical session state definitions.
//!
//! Plain data, mutated only through `engine` transitions. Everything here
//! serializes, so a session snapshots to disk and back.

use serde::{Deserialize, Serialize};

use crate::dice::{Hand, SelectionMask};
use crate::scoring::round_score;
use crate::strategy::Policy;

/// Throws the player may spend per round.
pub const PLAYER_THROW_CAP: u8 = 1;

/// Which side of the table a value refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Side {
    Player,
    Computer,
}

/// Per-side state: the current hand and the running total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideState {
    pub hand: Hand,
    /// Accumulated total across rounds. Only grows within a game.
    pub total: u32,
}

impl SideState {
    /// Score of the currently held hand.
    pub fn round_score(&self) -> u32 {
        round_score(self.hand)
    }
}

/// Win counters carried across back-to-back games by the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchTally {
    pub human_wins: u32,
    pub computer_wins: u32,
}

/// How a scored round resolved, when it did not simply continue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RoundOutcome {
    /// Both sides crossed the target with equal totals; a tie-breaker round
    /// follows once acknowledged.
    TieBreakerPending,
    /// A tie-breaker round tied again; another tie-breaker round follows.
    Tied,
    /// The game is over.
    Won { side: Side },
}

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Phase {
    /// Mid-round: the player may select, throw, and score.
    Rolling,
    /// A round resolved with an outcome awaiting acknowledgement.
    Resolved { outcome: RoundOutcome },
    /// A win was acknowledged; the session is over.
    Finished,
}

/// Canonical session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub player: SideState,
    pub computer: SideState,
    /// Player's per-die "keep through the next throw" selection.
    pub keep_mask: SelectionMask,
    /// Throws the player has used this round.
    pub throws_used: u8,
    pub target: u32,
    pub policy: Policy,
    pub tally: MatchTally,
    pub phase: Phase,
    /// Set while tie-breaker rounds are being played.
    pub tie_breaker: bool,
}

impl SessionState {
    /// True while the player may throw. The presentation layer must honor
    /// this by refusing throw input, not merely by greying a button.
    pub fn can_throw(&self) -> bool {
        self.phase == Phase::Rolling && self.throws_used < PLAYER_THROW_CAP
    }

    /// True while the player may change the keep selection.
    pub fn can_select(&self) -> bool {
        self.can_throw()
    }

    /// True once the throw budget is spent and the next action scores.
    pub fn is_last_throw(&self) -> bool {
        self.phase == Phase::Rolling && self.throws_used >= PLAYER_THROW_CAP
    }

    /// The outcome waiting to be acknowledged, if any.
    pub fn pending_outcome(&self) -> Option<RoundOutcome> {
        match self.phase {
            Phase::Resolved { outcome } => Some(outcome),
            _ => None,
        }
    }
}
