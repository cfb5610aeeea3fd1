//! Session manager: creates, tracks, and routes commands to sessions.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};

use glyphline_core::{PlayerId, SessionId, SessionStatus};
use glyphline_engine::{
    BuiltinCatalog, GameConfig, GameSession, ScoringConfig, TermCatalog,
};
use rand::RngCore;

use crate::session::spawn_session;
use crate::{GlyphlineError, SessionHandle};

/// Counter for generating unique session IDs.
static NEXT_SESSION_ID: AtomicU64 = AtomicU64::new(1);

/// Default command channel size for session actors.
const DEFAULT_CHANNEL_SIZE: usize = 32;

/// Manages all active sessions on a host.
///
/// This is the entry point for session operations from higher layers
/// (matchmaking, connection handlers). Each created session runs as its
/// own actor task; the manager keeps a [`SessionHandle`] per session
/// and hands out clones.
pub struct SessionManager {
    /// Active sessions, keyed by session ID.
    sessions: HashMap<SessionId, SessionHandle>,
    config: GameConfig,
    scoring: ScoringConfig,
}

impl SessionManager {
    /// Creates a manager with default match and scoring settings.
    pub fn new() -> Self {
        Self::with_configs(GameConfig::default(), ScoringConfig::default())
    }

    /// Creates a manager with explicit match and scoring settings,
    /// applied to every session it creates.
    pub fn with_configs(config: GameConfig, scoring: ScoringConfig) -> Self {
        Self {
            sessions: HashMap::new(),
            config,
            scoring,
        }
    }

    /// Creates a session for two players over the builtin term catalog
    /// and returns a handle to it.
    ///
    /// # Errors
    /// Relays [`EngineError::InvalidPlayers`] when the identities are
    /// not distinct, or [`EngineError::CatalogFailed`] if round 1 cannot
    /// be supplied.
    ///
    /// [`EngineError::InvalidPlayers`]: glyphline_engine::EngineError::InvalidPlayers
    /// [`EngineError::CatalogFailed`]: glyphline_engine::EngineError::CatalogFailed
    pub fn create_session(
        &mut self,
        player_a: PlayerId,
        player_b: PlayerId,
    ) -> Result<SessionHandle, GlyphlineError> {
        let seed = rand::rng().next_u64();
        self.create_session_with_catalog(
            player_a,
            player_b,
            Box::new(BuiltinCatalog::new(seed)),
        )
    }

    /// Creates a session over a custom term catalog.
    pub fn create_session_with_catalog(
        &mut self,
        player_a: PlayerId,
        player_b: PlayerId,
        catalog: Box<dyn TermCatalog>,
    ) -> Result<SessionHandle, GlyphlineError> {
        let session_id =
            SessionId(NEXT_SESSION_ID.fetch_add(1, Ordering::Relaxed));
        let session = GameSession::new(
            session_id,
            player_a,
            player_b,
            catalog,
            self.config.clone(),
            self.scoring.clone(),
        )?;

        let handle = spawn_session(session, DEFAULT_CHANNEL_SIZE);
        self.sessions.insert(session_id, handle.clone());
        tracing::info!(%session_id, %player_a, %player_b, "session created");
        Ok(handle)
    }

    /// Returns a handle to a tracked session.
    pub fn session(
        &self,
        session_id: SessionId,
    ) -> Result<SessionHandle, GlyphlineError> {
        self.sessions
            .get(&session_id)
            .cloned()
            .ok_or(GlyphlineError::NotFound(session_id))
    }

    /// Shuts down a session's actor and drops it from the index.
    pub async fn destroy_session(
        &mut self,
        session_id: SessionId,
    ) -> Result<(), GlyphlineError> {
        let handle = self
            .sessions
            .remove(&session_id)
            .ok_or(GlyphlineError::NotFound(session_id))?;
        let _ = handle.shutdown().await;
        tracing::info!(%session_id, "session destroyed");
        Ok(())
    }

    /// Drops every session whose match has reached a terminal status,
    /// shutting down its actor. Returns how many were reaped.
    ///
    /// Sessions that fail to answer a state query are treated as dead
    /// and reaped too.
    pub async fn reap_finished(&mut self) -> usize {
        let mut finished = Vec::new();
        for (session_id, handle) in &self.sessions {
            match handle.state().await {
                Ok(snapshot)
                    if snapshot.status == SessionStatus::InProgress => {}
                _ => finished.push(*session_id),
            }
        }
        for session_id in &finished {
            if let Some(handle) = self.sessions.remove(session_id) {
                let _ = handle.shutdown().await;
                tracing::info!(%session_id, "finished session reaped");
            }
        }
        finished.len()
    }

    /// Number of tracked sessions.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    /// IDs of all tracked sessions.
    pub fn session_ids(&self) -> Vec<SessionId> {
        self.sessions.keys().copied().collect()
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}
