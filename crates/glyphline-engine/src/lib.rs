//! The Glyphline game engine.
//!
//! A synchronous, single-session state machine for the cooperative
//! drawing-and-guessing match: one player renders a hidden term using a
//! constrained symbol alphabet, the other guesses it, over three rounds
//! with a shared score.
//!
//! # Key types
//!
//! - [`GameSession`] — the aggregate owning a match; the only mutation
//!   entry point
//! - [`TermCatalog`] / [`BuiltinCatalog`] — term and alphabet supply
//! - [`Turn`] / [`TurnPhase`] — the per-turn state machine
//! - [`ScoringEngine`] / [`ScoringConfig`] — the reward function
//! - [`GameConfig`] — match settings
//! - [`SessionRecord`] — the persistable history layout
//!
//! The engine performs no I/O and holds no locks; serializing access per
//! session is the job of the layer above (the `glyphline` crate runs
//! each session in its own actor task).

mod catalog;
mod config;
mod error;
mod history;
mod round;
mod scoring;
mod session;
mod turn;
pub mod validator;

pub use catalog::{BuiltinCatalog, CatalogError, TermCatalog};
pub use config::GameConfig;
pub use error::EngineError;
pub use history::{RoundRecord, SessionRecord, TurnRecord};
pub use round::{role_assignment, Round, TURNS_PER_ROUND};
pub use scoring::{ScoringConfig, ScoringEngine, TurnScore};
pub use session::{
    CompletedRound, GameSession, SessionSnapshot, TurnView,
};
pub use turn::{DrawingOutcome, GuessOutcome, Turn, TurnPhase};
pub use validator::{DrawingRejection, GlyphFault, GlyphViolation};
