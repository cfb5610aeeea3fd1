//! Persistable match history.
//!
//! Hosts that store sessions persist a [`SessionRecord`]: the full
//! round/turn history with drawings and guess attempts, enough to audit
//! or replay a match. The engine never writes these anywhere — it only
//! defines the layout and captures it from a live session.

use glyphline_core::{
    Drawing, GuessAttempt, PlayerId, SessionId, SessionStatus, SymbolSet,
    Term, TurnOutcome,
};
use serde::{Deserialize, Serialize};

use crate::round::Round;
use crate::scoring::TurnScore;
use crate::session::GameSession;
use crate::turn::Turn;

/// One turn, as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnRecord {
    /// Who drew.
    pub artist: PlayerId,
    /// Who guessed.
    pub guesser: PlayerId,
    /// The hidden term (label and complexity).
    pub term: Term,
    /// The turn's fixed alphabet.
    pub symbols: SymbolSet,
    /// The accepted drawing, if one was accepted.
    pub drawing: Option<Drawing>,
    /// Every guess, in order.
    pub guesses: Vec<GuessAttempt>,
    /// Rejected drawing submissions (penalty count).
    pub invalid_submissions: u32,
    /// Terminal outcome; `None` only while the turn is live.
    pub outcome: Option<TurnOutcome>,
    /// Score breakdown; `None` until the round is folded.
    pub score: Option<TurnScore>,
}

impl TurnRecord {
    fn capture(turn: &Turn, score: Option<TurnScore>) -> Self {
        Self {
            artist: turn.artist(),
            guesser: turn.guesser(),
            term: turn.term().clone(),
            symbols: turn.symbols().clone(),
            drawing: turn.drawing().cloned(),
            guesses: turn.guesses().to_vec(),
            invalid_submissions: turn.invalid_submissions(),
            outcome: turn.outcome(),
            score,
        }
    }
}

/// One round, as persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundRecord {
    /// 1-based round index.
    pub index: u32,
    /// Turn records, in play order.
    pub turns: Vec<TurnRecord>,
    /// Round score contribution; `None` until the round completes.
    pub score: Option<u32>,
}

impl RoundRecord {
    fn capture(round: &Round, scores: Option<&[TurnScore]>, score: Option<u32>) -> Self {
        Self {
            index: round.index(),
            turns: round
                .turns()
                .iter()
                .enumerate()
                .map(|(i, turn)| {
                    TurnRecord::capture(
                        turn,
                        scores.and_then(|s| s.get(i)).copied(),
                    )
                })
                .collect(),
            score,
        }
    }
}

/// The full persisted layout of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// The session's id.
    pub session_id: SessionId,
    /// The two bound players.
    pub players: [PlayerId; 2],
    /// Lifecycle status at capture time.
    pub status: SessionStatus,
    /// All rounds: completed ones carry scores, a live one does not.
    pub rounds: Vec<RoundRecord>,
    /// The shared cumulative score (final once the status is terminal).
    pub shared_score: u32,
}

impl SessionRecord {
    /// Captures the session's full history.
    pub fn capture(session: &GameSession) -> Self {
        let mut rounds: Vec<RoundRecord> = session
            .completed_rounds()
            .iter()
            .map(|completed| {
                RoundRecord::capture(
                    &completed.round,
                    Some(&completed.turn_scores),
                    Some(completed.score),
                )
            })
            .collect();
        if let Some(current) = session.current_round() {
            rounds.push(RoundRecord::capture(current, None, None));
        }
        Self {
            session_id: session.id(),
            players: session.players(),
            status: session.status(),
            rounds,
            shared_score: session.shared_score(),
        }
    }
}
