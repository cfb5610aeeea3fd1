//! Shared value types for Glyphline.
//!
//! This crate defines the vocabulary every other layer speaks:
//!
//! - **Identity** ([`PlayerId`], [`SessionId`]) — newtype wrappers so a
//!   player id can never be confused with a session id.
//! - **Game values** ([`Term`], [`SymbolSet`], [`Drawing`],
//!   [`GuessAttempt`], [`TurnOutcome`], [`SessionStatus`], [`Role`]) —
//!   the immutable pieces a match is made of.
//! - **Errors** ([`CoreError`]) — what can go wrong constructing them.
//!
//! # Architecture
//!
//! The core layer has no game rules in it. It only knows what the values
//! ARE, not how they move — the engine crate owns the state machines.
//!
//! ```text
//! Session layer (actors, routing)
//!     ↕
//! Engine layer (turn/round/session state machines)
//!     ↕
//! Core layer (this crate — values and identities)
//! ```

mod error;
mod types;

pub use error::CoreError;
pub use types::{
    Drawing, GuessAttempt, PlayerId, Role, SessionId, SessionStatus,
    SymbolSet, Term, TurnOutcome,
};
