//! Concurrent session hosting for the Glyphline game.
//!
//! Each game session runs as an isolated Tokio task (actor model) that
//! owns its [`GameSession`](glyphline_engine::GameSession). Commands
//! arriving for one session are applied strictly one at a time in
//! arrival order; distinct sessions run in parallel and share nothing,
//! so one match can never observe or disturb another's score.
//!
//! # Key types
//!
//! - [`SessionManager`] — creates/destroys sessions, hands out handles
//! - [`SessionHandle`] — send commands to a running session actor
//! - [`GlyphlineError`] — hosting-layer failures, wrapping engine rule
//!   errors

mod error;
mod manager;
mod session;

pub use error::GlyphlineError;
pub use manager::SessionManager;
pub use session::SessionHandle;

pub use glyphline_core::{
    Drawing, PlayerId, Role, SessionId, SessionStatus, SymbolSet, Term,
};
pub use glyphline_engine::{
    CatalogError, DrawingOutcome, DrawingRejection, EngineError,
    GameConfig, GlyphFault, GlyphViolation, GuessOutcome, ScoringConfig,
    SessionRecord, SessionSnapshot, TermCatalog, TurnView,
};
