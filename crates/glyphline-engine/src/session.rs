//! The `GameSession` aggregate: one three-round match.
//!
//! The session owns everything mutable about a match — current round,
//! shared score, status — and is the only entry point for mutations.
//! The shared score is a session field, never process-global state;
//! distinct sessions share nothing.
//!
//! ```text
//! submit_drawing ─┐
//! submit_guess  ──┤→ role check → active Turn → settle → next round /
//! forfeit_turn  ──┘                                       Completed
//! ```

use glyphline_core::{
    Drawing, PlayerId, Role, SessionId, SessionStatus,
};
use serde::{Deserialize, Serialize};

use crate::catalog::{CatalogError, TermCatalog};
use crate::config::GameConfig;
use crate::round::Round;
use crate::scoring::{ScoringConfig, ScoringEngine, TurnScore};
use crate::turn::{DrawingOutcome, GuessOutcome, Turn, TurnPhase};
use crate::EngineError;

// ---------------------------------------------------------------------------
// Snapshot types
// ---------------------------------------------------------------------------

/// The externally visible state of the current turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnView {
    /// Waiting on the artist's drawing.
    AwaitingDrawing,
    /// Waiting on a guess.
    AwaitingGuess {
        /// Guesses still available.
        attempts_remaining: u32,
    },
}

/// A read-only snapshot of a session.
///
/// Snapshots are pure: repeated calls without intervening submissions
/// return identical values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    /// The session this snapshot describes.
    pub session_id: SessionId,
    /// Lifecycle status.
    pub status: SessionStatus,
    /// 1-based index of the round in play (or the last round, once the
    /// session is terminal).
    pub round_index: u32,
    /// Rounds folded into the shared score so far.
    pub rounds_completed: u32,
    /// The shared cumulative score.
    pub shared_score: u32,
    /// The current turn's artist, while a turn is live.
    pub artist: Option<PlayerId>,
    /// The current turn's guesser, while a turn is live.
    pub guesser: Option<PlayerId>,
    /// The current turn's phase, while a turn is live.
    pub turn: Option<TurnView>,
}

/// A round whose score has been folded into the shared total.
#[derive(Debug)]
pub struct CompletedRound {
    /// The round, with both turns terminal.
    pub round: Round,
    /// Per-turn score breakdowns, aligned with `round.turns()`.
    pub turn_scores: Vec<TurnScore>,
    /// Sum of the two turn totals.
    pub score: u32,
}

// ---------------------------------------------------------------------------
// GameSession
// ---------------------------------------------------------------------------

/// A cooperative match between two players.
///
/// Created with two distinct player identities and a term catalog;
/// destroyed (frozen) when the status becomes [`SessionStatus::Completed`]
/// or [`SessionStatus::Aborted`].
pub struct GameSession {
    id: SessionId,
    players: [PlayerId; 2],
    status: SessionStatus,
    shared_score: u32,
    completed: Vec<CompletedRound>,
    current: Option<Round>,
    catalog: Box<dyn TermCatalog>,
    scorer: ScoringEngine,
    config: GameConfig,
}

impl GameSession {
    /// Creates a session and starts round 1.
    ///
    /// # Errors
    /// - [`EngineError::InvalidPlayers`] if the identities are not
    ///   distinct.
    /// - [`EngineError::CatalogFailed`] if the catalog cannot supply
    ///   round 1 within the retry budget.
    pub fn new(
        id: SessionId,
        player_a: PlayerId,
        player_b: PlayerId,
        catalog: Box<dyn TermCatalog>,
        config: GameConfig,
        scoring: ScoringConfig,
    ) -> Result<Self, EngineError> {
        if player_a == player_b {
            return Err(EngineError::InvalidPlayers);
        }
        let mut session = Self {
            id,
            players: [player_a, player_b],
            status: SessionStatus::InProgress,
            shared_score: 0,
            completed: Vec::new(),
            current: None,
            catalog,
            scorer: ScoringEngine::new(scoring),
            config,
        };
        session.begin_round(1)?;
        tracing::info!(
            session_id = %id,
            %player_a,
            %player_b,
            "session created"
        );
        Ok(session)
    }

    // -- Accessors --------------------------------------------------------

    /// The session's id.
    pub fn id(&self) -> SessionId {
        self.id
    }

    /// The two bound players.
    pub fn players(&self) -> [PlayerId; 2] {
        self.players
    }

    /// Current lifecycle status.
    pub fn status(&self) -> SessionStatus {
        self.status
    }

    /// The shared cumulative score.
    pub fn shared_score(&self) -> u32 {
        self.shared_score
    }

    /// Rounds already folded into the shared score.
    pub fn completed_rounds(&self) -> &[CompletedRound] {
        &self.completed
    }

    /// The round in play, if the session is live.
    pub fn current_round(&self) -> Option<&Round> {
        self.current.as_ref()
    }

    /// The match configuration.
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The scoring engine (and through it, the active weights).
    pub fn scorer(&self) -> &ScoringEngine {
        &self.scorer
    }

    /// Builds a read-only snapshot of the session.
    pub fn state(&self) -> SessionSnapshot {
        let turn = self.current.as_ref().and_then(Round::active_turn);
        SessionSnapshot {
            session_id: self.id,
            status: self.status,
            round_index: self
                .current
                .as_ref()
                .map(Round::index)
                .unwrap_or(self.completed.len() as u32),
            rounds_completed: self.completed.len() as u32,
            shared_score: self.shared_score,
            artist: turn.map(Turn::artist),
            guesser: turn.map(Turn::guesser),
            turn: turn.and_then(|t| match t.phase() {
                TurnPhase::AwaitingDrawing => {
                    Some(TurnView::AwaitingDrawing)
                }
                TurnPhase::AwaitingGuess => {
                    Some(TurnView::AwaitingGuess {
                        attempts_remaining: t.attempts_remaining(),
                    })
                }
                TurnPhase::Complete(_) => None,
            }),
        }
    }

    // -- Entry points -----------------------------------------------------

    /// Submits the artist's drawing for the current turn.
    ///
    /// Both results are relayed to the player: `Accepted` advances the
    /// turn, `Rejected` lists every offending glyph and permits
    /// resubmission.
    ///
    /// # Errors
    /// - [`EngineError::SessionClosed`] if the session is terminal.
    /// - [`EngineError::OutOfTurn`] if `player` is not the artist the
    ///   turn is waiting on. Turn state is untouched.
    pub fn submit_drawing(
        &mut self,
        player: PlayerId,
        drawing: Drawing,
    ) -> Result<DrawingOutcome, EngineError> {
        self.ensure_open()?;
        self.check_actor(player, Role::Artist)?;

        let outcome = self
            .active_turn_mut()
            .submit_drawing(drawing);
        if matches!(outcome, DrawingOutcome::Accepted) {
            tracing::debug!(
                session_id = %self.id,
                artist = %player,
                "drawing accepted"
            );
        }
        Ok(outcome)
    }

    /// Submits a guess for the current turn.
    ///
    /// A terminal outcome (solve or exhaustion) settles the turn: roles
    /// swap for the round's second turn, or the round score folds into
    /// the shared total and the next round starts.
    ///
    /// # Errors
    /// - [`EngineError::SessionClosed`] if the session is terminal.
    /// - [`EngineError::OutOfTurn`] if `player` is not the guesser the
    ///   turn is waiting on.
    /// - [`EngineError::CatalogFailed`] if settling needed a new round
    ///   and the catalog failed; the session is `Aborted`.
    pub fn submit_guess(
        &mut self,
        player: PlayerId,
        guess: &str,
    ) -> Result<GuessOutcome, EngineError> {
        self.ensure_open()?;
        self.check_actor(player, Role::Guesser)?;

        let turn = self.active_turn_mut();
        let outcome = turn.submit_guess(guess);
        let terminal = turn.phase().is_terminal();

        match &outcome {
            GuessOutcome::Correct { attempts_used } => {
                tracing::info!(
                    session_id = %self.id,
                    guesser = %player,
                    attempts_used,
                    "term solved"
                );
            }
            GuessOutcome::Exhausted => {
                tracing::info!(
                    session_id = %self.id,
                    guesser = %player,
                    "attempts exhausted"
                );
            }
            GuessOutcome::Incorrect { .. } => {}
        }

        if terminal {
            self.settle()?;
        }
        Ok(outcome)
    }

    /// Drives the current turn to `Exhausted` without a submission.
    ///
    /// Hosts call this when a per-turn deadline elapses: the elapsed
    /// deadline becomes a "no value" submission and the state machine
    /// proceeds normally.
    ///
    /// # Errors
    /// - [`EngineError::SessionClosed`] if the session is terminal.
    /// - [`EngineError::CatalogFailed`] if settling needed a new round
    ///   and the catalog failed.
    pub fn forfeit_turn(&mut self) -> Result<(), EngineError> {
        self.ensure_open()?;
        self.active_turn_mut().forfeit();
        tracing::info!(session_id = %self.id, "turn forfeited");
        self.settle()
    }

    /// Aborts the session: any live turn is marked `Abandoned`, the
    /// status freezes at `Aborted`, and the session is excluded from
    /// scoring comparisons.
    ///
    /// # Errors
    /// Returns [`EngineError::SessionClosed`] if already terminal.
    pub fn abort(&mut self) -> Result<(), EngineError> {
        self.ensure_open()?;
        if let Some(round) = self.current.as_mut() {
            round.abandon();
        }
        self.status = SessionStatus::Aborted;
        tracing::info!(session_id = %self.id, "session aborted");
        Ok(())
    }

    // -- Internals --------------------------------------------------------

    fn ensure_open(&self) -> Result<(), EngineError> {
        if self.status.is_open() {
            Ok(())
        } else {
            Err(EngineError::SessionClosed {
                session_id: self.id,
                status: self.status,
            })
        }
    }

    /// Verifies the caller holds the role the current turn waits on.
    fn check_actor(
        &self,
        player: PlayerId,
        role: Role,
    ) -> Result<(), EngineError> {
        let turn = self
            .current
            .as_ref()
            .and_then(Round::active_turn)
            .expect("open session always has an active turn");
        let (expected_player, expected_role) = turn
            .expected_actor()
            .expect("active turn is never terminal");
        if player != expected_player || role != expected_role {
            return Err(EngineError::OutOfTurn {
                player,
                expected_player,
                expected_role,
            });
        }
        Ok(())
    }

    fn active_turn_mut(&mut self) -> &mut Turn {
        self.current
            .as_mut()
            .and_then(Round::active_turn_mut)
            .expect("open session always has an active turn")
    }

    /// Reacts to a terminal turn: opens the round's second turn, or
    /// folds the finished round and advances the match.
    fn settle(&mut self) -> Result<(), EngineError> {
        let Some(round) = self.current.as_mut() else {
            return Ok(());
        };
        round.advance();
        if !round.is_complete() {
            return Ok(());
        }

        let round = self.current.take().expect("checked above");
        let turn_scores: Vec<TurnScore> = round
            .turns()
            .iter()
            .map(|turn| self.scorer.score_turn(turn))
            .collect();
        let round_score: u32 = turn_scores.iter().map(|s| s.total).sum();
        let index = round.index();

        // Score fold is the only place the shared score moves, and it
        // only ever moves up: per-turn penalties are already bounded by
        // the per-turn zero floor.
        self.shared_score += round_score;
        self.completed.push(CompletedRound {
            round,
            turn_scores,
            score: round_score,
        });
        tracing::info!(
            session_id = %self.id,
            round = index,
            round_score,
            shared_score = self.shared_score,
            "round complete"
        );

        if index >= self.config.rounds_per_match {
            let round_scores: Vec<u32> =
                self.completed.iter().map(|r| r.score).collect();
            let bonus = self.scorer.consistency_bonus(&round_scores);
            self.shared_score += bonus;
            self.status = SessionStatus::Completed;
            tracing::info!(
                session_id = %self.id,
                consistency_bonus = bonus,
                final_score = self.shared_score,
                "session completed"
            );
            Ok(())
        } else {
            self.begin_round(index + 1)
        }
    }

    fn begin_round(&mut self, index: u32) -> Result<(), EngineError> {
        let first = self.fetch_assignment(index, 1)?;
        let second = self.fetch_assignment(index, 2)?;
        self.current = Some(Round::begin(
            index,
            self.players,
            [first, second],
            self.config.max_guess_attempts,
        ));
        Ok(())
    }

    /// One catalog lookup with the configured retry budget. Transient
    /// failures are retried; exhaustion is final immediately. Any
    /// failure aborts the session.
    fn fetch_assignment(
        &mut self,
        round_index: u32,
        turn_index: u32,
    ) -> Result<(glyphline_core::Term, glyphline_core::SymbolSet), EngineError>
    {
        let budget = self.config.catalog_retries + 1;
        let mut attempts = 0;
        loop {
            attempts += 1;
            match self.catalog.next(round_index, turn_index) {
                Ok(assignment) => return Ok(assignment),
                Err(source @ CatalogError::Exhausted) => {
                    return Err(self.catalog_failure(attempts, source));
                }
                Err(source @ CatalogError::Unavailable(_)) => {
                    if attempts >= budget {
                        return Err(
                            self.catalog_failure(attempts, source)
                        );
                    }
                    tracing::warn!(
                        session_id = %self.id,
                        attempts,
                        budget,
                        %source,
                        "catalog lookup failed, retrying"
                    );
                }
            }
        }
    }

    /// Marks the session aborted after a fatal catalog failure and
    /// builds the error the host sees.
    fn catalog_failure(
        &mut self,
        attempts: u32,
        source: CatalogError,
    ) -> EngineError {
        if let Some(round) = self.current.as_mut() {
            round.abandon();
        }
        self.status = SessionStatus::Aborted;
        tracing::warn!(
            session_id = %self.id,
            attempts,
            %source,
            "session aborted: catalog failure"
        );
        EngineError::CatalogFailed {
            session_id: self.id,
            attempts,
            source,
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
