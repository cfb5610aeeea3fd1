//! Error types for the session-hosting layer.

use glyphline_core::SessionId;
use glyphline_engine::EngineError;

/// Errors that can occur while hosting sessions.
#[derive(Debug, thiserror::Error)]
pub enum GlyphlineError {
    /// The session does not exist (never created, or already reaped).
    #[error("session {0} not found")]
    NotFound(SessionId),

    /// The session's command channel is closed — its actor has stopped.
    #[error("session {0} is unavailable")]
    Unavailable(SessionId),

    /// A game rule rejected the operation.
    #[error(transparent)]
    Engine(#[from] EngineError),
}
