//! Error types for the engine layer.

use glyphline_core::{PlayerId, Role, SessionId, SessionStatus};

use crate::catalog::CatalogError;

/// Errors that can occur while driving a game session.
///
/// Recoverable conditions (a rejected drawing, a wrong guess) are NOT
/// errors — they come back as structured results so the caller can relay
/// them to the player. An `EngineError` means the call itself was not
/// allowed, or the session failed fatally.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// A session must bind exactly two distinct player identities.
    #[error("session requires two distinct player identities")]
    InvalidPlayers,

    /// The caller does not hold the role the current turn is waiting on.
    /// Recoverable: the right player can act, or this player can retry
    /// once the roles come around. Turn state is untouched.
    #[error(
        "{player} may not act: waiting on the {expected_role} ({expected_player})"
    )]
    OutOfTurn {
        /// Who tried to act.
        player: PlayerId,
        /// Who the turn is actually waiting on.
        expected_player: PlayerId,
        /// The role that player holds.
        expected_role: Role,
    },

    /// The session has already reached a terminal status. Covers both
    /// submissions after completion and any attempt to push a match past
    /// its round limit.
    #[error("session {session_id} is {status}: no further submissions accepted")]
    SessionClosed {
        /// The session that refused the call.
        session_id: SessionId,
        /// Its terminal status.
        status: SessionStatus,
    },

    /// The term catalog failed while starting a round. Fatal for the
    /// session — it transitions to `Aborted`. Carries the session id and
    /// how many attempts were made so a host can report without exposing
    /// engine internals.
    #[error("session {session_id}: term catalog failed after {attempts} attempt(s)")]
    CatalogFailed {
        /// The session that was aborted.
        session_id: SessionId,
        /// Lookup attempts made (including retries).
        attempts: u32,
        /// The final catalog error.
        #[source]
        source: CatalogError,
    },
}
