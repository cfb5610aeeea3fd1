//! Session actor: an isolated Tokio task that owns one `GameSession`.
//!
//! Each session runs in its own task, communicating with the outside
//! world through an mpsc channel. The channel is the serialization
//! point: submissions arriving concurrently for one session are applied
//! one at a time in arrival order, while distinct sessions progress in
//! parallel with no shared state.

use glyphline_core::{Drawing, PlayerId, SessionId, SessionStatus};
use glyphline_engine::{
    DrawingOutcome, GameSession, GuessOutcome, SessionRecord,
    SessionSnapshot,
};
use tokio::sync::{mpsc, oneshot};

use crate::GlyphlineError;

/// Commands sent to a session actor through its channel.
///
/// Each variant carries a `oneshot::Sender` reply channel — the caller
/// sends a command and awaits the response.
pub(crate) enum SessionCommand {
    /// Apply a drawing submission from a player.
    SubmitDrawing {
        player: PlayerId,
        drawing: Drawing,
        reply: oneshot::Sender<Result<DrawingOutcome, GlyphlineError>>,
    },

    /// Apply a guess from a player.
    SubmitGuess {
        player: PlayerId,
        guess: String,
        reply: oneshot::Sender<Result<GuessOutcome, GlyphlineError>>,
    },

    /// Drive the current turn to exhaustion (deadline elapsed).
    ForfeitTurn {
        reply: oneshot::Sender<Result<(), GlyphlineError>>,
    },

    /// Abort the session.
    Abort {
        reply: oneshot::Sender<Result<(), GlyphlineError>>,
    },

    /// Request a read-only snapshot.
    GetState {
        reply: oneshot::Sender<SessionSnapshot>,
    },

    /// Capture the full match history.
    GetRecord {
        reply: oneshot::Sender<SessionRecord>,
    },

    /// Stop the actor.
    Shutdown,
}

/// Handle to a running session actor. Used to send commands to it.
///
/// Cheap to clone — it's just an `mpsc::Sender` wrapper, so one handle
/// can go to each player's connection handler while the
/// [`SessionManager`](crate::SessionManager) keeps another.
#[derive(Clone)]
pub struct SessionHandle {
    session_id: SessionId,
    sender: mpsc::Sender<SessionCommand>,
}

impl SessionHandle {
    /// The hosted session's id.
    pub fn session_id(&self) -> SessionId {
        self.session_id
    }

    /// Submits a drawing on behalf of `player`.
    ///
    /// Both [`DrawingOutcome`] cases are ordinary results to relay to
    /// the artist; `Err` means the operation itself was refused.
    pub async fn submit_drawing(
        &self,
        player: PlayerId,
        drawing: Drawing,
    ) -> Result<DrawingOutcome, GlyphlineError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(SessionCommand::SubmitDrawing {
                player,
                drawing,
                reply: reply_tx,
            })
            .await
            .map_err(|_| GlyphlineError::Unavailable(self.session_id))?;
        reply_rx
            .await
            .map_err(|_| GlyphlineError::Unavailable(self.session_id))?
    }

    /// Submits a guess on behalf of `player`.
    pub async fn submit_guess(
        &self,
        player: PlayerId,
        guess: impl Into<String>,
    ) -> Result<GuessOutcome, GlyphlineError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(SessionCommand::SubmitGuess {
                player,
                guess: guess.into(),
                reply: reply_tx,
            })
            .await
            .map_err(|_| GlyphlineError::Unavailable(self.session_id))?;
        reply_rx
            .await
            .map_err(|_| GlyphlineError::Unavailable(self.session_id))?
    }

    /// Forfeits the current turn (host-side deadline handling).
    pub async fn forfeit_turn(&self) -> Result<(), GlyphlineError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(SessionCommand::ForfeitTurn { reply: reply_tx })
            .await
            .map_err(|_| GlyphlineError::Unavailable(self.session_id))?;
        reply_rx
            .await
            .map_err(|_| GlyphlineError::Unavailable(self.session_id))?
    }

    /// Aborts the session.
    pub async fn abort(&self) -> Result<(), GlyphlineError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(SessionCommand::Abort { reply: reply_tx })
            .await
            .map_err(|_| GlyphlineError::Unavailable(self.session_id))?;
        reply_rx
            .await
            .map_err(|_| GlyphlineError::Unavailable(self.session_id))?
    }

    /// Requests a read-only snapshot of the session.
    pub async fn state(&self) -> Result<SessionSnapshot, GlyphlineError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(SessionCommand::GetState { reply: reply_tx })
            .await
            .map_err(|_| GlyphlineError::Unavailable(self.session_id))?;
        reply_rx
            .await
            .map_err(|_| GlyphlineError::Unavailable(self.session_id))
    }

    /// Captures the session's full history for persistence.
    pub async fn record(&self) -> Result<SessionRecord, GlyphlineError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(SessionCommand::GetRecord { reply: reply_tx })
            .await
            .map_err(|_| GlyphlineError::Unavailable(self.session_id))?;
        reply_rx
            .await
            .map_err(|_| GlyphlineError::Unavailable(self.session_id))
    }

    /// Tells the actor to stop. Pending queued commands are processed
    /// first; callers after shutdown see `Unavailable`.
    pub async fn shutdown(&self) -> Result<(), GlyphlineError> {
        self.sender
            .send(SessionCommand::Shutdown)
            .await
            .map_err(|_| GlyphlineError::Unavailable(self.session_id))
    }
}

/// The internal session actor. Runs inside a Tokio task.
struct SessionActor {
    session: GameSession,
    receiver: mpsc::Receiver<SessionCommand>,
}

impl SessionActor {
    /// Runs the actor loop, applying commands until shutdown or until
    /// every handle is dropped.
    async fn run(mut self) {
        let session_id = self.session.id();
        tracing::info!(%session_id, "session actor started");

        while let Some(cmd) = self.receiver.recv().await {
            match cmd {
                SessionCommand::SubmitDrawing {
                    player,
                    drawing,
                    reply,
                } => {
                    let result = self
                        .session
                        .submit_drawing(player, drawing)
                        .map_err(GlyphlineError::from);
                    let _ = reply.send(result);
                }
                SessionCommand::SubmitGuess {
                    player,
                    guess,
                    reply,
                } => {
                    let result = self
                        .session
                        .submit_guess(player, &guess)
                        .map_err(GlyphlineError::from);
                    let _ = reply.send(result);
                }
                SessionCommand::ForfeitTurn { reply } => {
                    let result = self
                        .session
                        .forfeit_turn()
                        .map_err(GlyphlineError::from);
                    let _ = reply.send(result);
                }
                SessionCommand::Abort { reply } => {
                    let result =
                        self.session.abort().map_err(GlyphlineError::from);
                    let _ = reply.send(result);
                }
                SessionCommand::GetState { reply } => {
                    let _ = reply.send(self.session.state());
                }
                SessionCommand::GetRecord { reply } => {
                    let _ = reply.send(SessionRecord::capture(&self.session));
                }
                SessionCommand::Shutdown => {
                    tracing::info!(%session_id, "session shutting down");
                    break;
                }
            }
        }

        tracing::info!(
            %session_id,
            status = %self.session.status(),
            shared_score = self.session.shared_score(),
            "session actor stopped"
        );
    }

    /// `true` once the owned session has reached a terminal status.
    fn is_finished(&self) -> bool {
        self.session.status() != SessionStatus::InProgress
    }
}

/// Spawns a session actor task around an already-created session and
/// returns a handle to communicate with it.
///
/// `channel_size` controls backpressure: if the command channel fills
/// up, senders wait.
pub(crate) fn spawn_session(
    session: GameSession,
    channel_size: usize,
) -> SessionHandle {
    let session_id = session.id();
    let (tx, rx) = mpsc::channel(channel_size);

    let actor = SessionActor {
        session,
        receiver: rx,
    };
    debug_assert!(!actor.is_finished(), "sessions start live");
    tokio::spawn(actor.run());

    SessionHandle {
        session_id,
        sender: tx,
    }
}
