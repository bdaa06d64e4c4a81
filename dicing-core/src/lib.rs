//! dicing-core: rules, scoring, state representation, and configuration for
//! the Dicing human-vs-computer dice game.

pub mod config;
pub mod dice;
pub mod engine;
pub mod scoring;
pub mod state;
pub mod strategy;

pub use config::{ConfigError, GameConfig};
pub use dice::{Hand, SelectionMask, HAND_SIZE};
pub use engine::{apply_action, new_session, next_game, Action, ApplyError, TurnContext};
pub use scoring::round_score;
pub use state::{
    MatchTally, Phase, RoundOutcome, SessionState, Side, SideState, PLAYER_THROW_CAP,
};
pub use strategy::{decide_reroll, Policy, COMPUTER_REROLL_CAP};

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
