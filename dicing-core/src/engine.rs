//! Session rules engine: state transitions for the round/turn loop.
//!
//! This module is the single place that mutates `SessionState` via rules.

use rand::Rng;
use rand_chacha::ChaCha8Rng;
use rand_core::SeedableRng;
use thiserror::Error;

use crate::config::GameConfig;
use crate::dice::{self, Hand, HAND_SIZE};
use crate::scoring::leader;
use crate::state::{Phase, RoundOutcome, SessionState, Side, SideState, PLAYER_THROW_CAP};
use crate::strategy::{self, Policy, COMPUTER_REROLL_CAP};

/// Chance source for transitions: a small seedable PRNG.
///
/// Kept outside `SessionState` so states stay plain serializable data.
pub struct TurnContext {
    rng: ChaCha8Rng,
}

impl TurnContext {
    /// Reproducible context for tests and replays.
    pub fn new_rng(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// OS-entropy context for live play.
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Context honoring the config's optional fixed seed.
    pub fn for_config(config: &GameConfig) -> Self {
        match config.seed {
            Some(seed) => Self::new_rng(seed),
            None => Self::from_entropy(),
        }
    }
}

/// Inputs the presentation layer can feed into a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Mark or unmark a die (by hand position) to keep through the next throw.
    SetKeep { pos: u8, keep: bool },
    /// Reroll the dice not marked as kept.
    Throw,
    /// Bank both hands, run the computer's turn, resolve the round.
    Score,
    /// Consume a resolved outcome: advance to the next round or finish.
    Acknowledge,
}

#[derive(Debug, Error)]
pub enum ApplyError {
    /// A state-guarded rejection (disabled control), not a fault.
    #[error("action {action:?} is not available in the current phase")]
    Unavailable { action: Action },
    #[error("die position out of range: {pos}")]
    PositionOutOfRange { pos: u8 },
    #[error("invalid state: {msg}")]
    InvalidState { msg: &'static str },
}

/// Create a session with both hands freshly rolled, ready for the player.
pub fn new_session(config: &GameConfig, ctx: &mut TurnContext) -> SessionState {
    let player = SideState {
        hand: dice::roll_all(&mut ctx.rng),
        total: 0,
    };
    let computer = SideState {
        hand: dice::roll_all(&mut ctx.rng),
        total: 0,
    };

    SessionState {
        player,
        computer,
        keep_mask: [false; HAND_SIZE],
        throws_used: 0,
        target: config.target_score,
        policy: config.policy,
        tally: Default::default(),
        phase: Phase::Rolling,
        tie_breaker: false,
    }
}

/// Start a fresh game after a finished session, carrying the match tally.
pub fn next_game(prev: &SessionState, config: &GameConfig, ctx: &mut TurnContext) -> SessionState {
    let mut next = new_session(config, ctx);
    next.tally = prev.tally;
    next
}

/// Apply an action to a session, producing the next state (or an error if
/// the action is unavailable or the state is corrupt).
pub fn apply_action(
    mut state: SessionState,
    action: Action,
    ctx: &mut TurnContext,
) -> Result<SessionState, ApplyError> {
    validate_state(&state)?;

    match action {
        Action::SetKeep { pos, keep } => {
            if usize::from(pos) >= HAND_SIZE {
                return Err(ApplyError::PositionOutOfRange { pos });
            }
            if !state.can_select() {
                return Err(ApplyError::Unavailable { action });
            }
            state.keep_mask[usize::from(pos)] = keep;
            Ok(state)
        }
        Action::Throw => {
            if !state.can_throw() {
                return Err(ApplyError::Unavailable { action });
            }
            let reroll = state.keep_mask.map(|keep| !keep);
            state.player.hand = dice::reroll_selected(state.player.hand, reroll, &mut ctx.rng);
            state.keep_mask = [false; HAND_SIZE];
            state.throws_used += 1;
            Ok(state)
        }
        Action::Score => {
            if state.phase != Phase::Rolling {
                return Err(ApplyError::Unavailable { action });
            }
            Ok(score_round(state, ctx))
        }
        Action::Acknowledge => {
            let outcome = state
                .pending_outcome()
                .ok_or(ApplyError::Unavailable { action })?;
            match outcome {
                RoundOutcome::Won { .. } => {
                    state.phase = Phase::Finished;
                }
                RoundOutcome::TieBreakerPending | RoundOutcome::Tied => {
                    // The tie-breaker round plays on top of the tied totals.
                    reset_round(&mut state, ctx);
                    state.phase = Phase::Rolling;
                }
            }
            Ok(state)
        }
    }
}

/// One atomic scoring transition: bank the player's hand as held, run the
/// computer's turn, bank its post-reroll hand, then resolve the round.
fn score_round(mut state: SessionState, ctx: &mut TurnContext) -> SessionState {
    let new_player_total = state.player.total + state.player.round_score();

    state.computer.hand = computer_turn(state.computer.hand, state.policy, &mut ctx.rng);
    let new_computer_total = state.computer.total + state.computer.round_score();

    state.player.total = new_player_total;
    state.computer.total = new_computer_total;

    if state.tie_breaker {
        // Totals were equal entering the tie-breaker, so comparing them
        // compares this round's deltas.
        match leader(new_player_total, new_computer_total) {
            Some(side) => {
                bump_tally(&mut state, side);
                state.phase = Phase::Resolved {
                    outcome: RoundOutcome::Won { side },
                };
            }
            None => {
                state.phase = Phase::Resolved {
                    outcome: RoundOutcome::Tied,
                };
            }
        }
        return state;
    }

    if new_player_total >= state.target || new_computer_total >= state.target {
        match leader(new_player_total, new_computer_total) {
            Some(side) => {
                bump_tally(&mut state, side);
                state.phase = Phase::Resolved {
                    outcome: RoundOutcome::Won { side },
                };
            }
            None => {
                // Equal totals with the target reached means both crossed it.
                state.tie_breaker = true;
                state.phase = Phase::Resolved {
                    outcome: RoundOutcome::TieBreakerPending,
                };
            }
        }
        return state;
    }

    // Neither side reached the target: next round, totals kept.
    reset_round(&mut state, ctx);
    state
}

/// The computer's turn: reroll attempts up to the cap, each gated by a
/// fresh coin flip. Bounded, so it cannot hang.
fn computer_turn<R: Rng>(hand: Hand, policy: Policy, rng: &mut R) -> Hand {
    let mut hand = hand;
    let mut used = 0u8;
    for _ in 0..COMPUTER_REROLL_CAP {
        if used >= COMPUTER_REROLL_CAP || !rng.gen_bool(0.5) {
            break;
        }
        let (next, next_used) = strategy::decide_reroll(hand, used, policy, rng);
        hand = next;
        used = next_used;
    }
    hand
}

/// Round-start reset: fresh hands, cleared selection, zero throw budget.
/// Totals and tally are untouched.
fn reset_round(state: &mut SessionState, ctx: &mut TurnContext) {
    state.player.hand = dice::roll_all(&mut ctx.rng);
    state.computer.hand = dice::roll_all(&mut ctx.rng);
    state.keep_mask = [false; HAND_SIZE];
    state.throws_used = 0;
}

fn bump_tally(state: &mut SessionState, side: Side) {
    match side {
        Side::Player => state.tally.human_wins += 1,
        Side::Computer => state.tally.computer_wins += 1,
    }
}

fn validate_state(s: &SessionState) -> Result<(), ApplyError> {
    if s.target == 0 {
        return Err(ApplyError::InvalidState {
            msg: "target must be positive",
        });
    }
    if s.throws_used > PLAYER_THROW_CAP {
        return Err(ApplyError::InvalidState {
            msg: "throws_used exceeds the per-round cap",
        });
    }
    for &d in s.player.hand.iter().chain(s.computer.hand.iter()) {
        if !(1..=6).contains(&d) {
            return Err(ApplyError::InvalidState {
                msg: "dice values must be in 1..=6",
            });
        }
    }
    Ok(())
}
