//! The per-turn state machine.
//!
//! ```text
//! AwaitingDrawing ──(valid drawing)──→ AwaitingGuess ──┬──(match)──→ Solved(n)
//!       │ ↺                                            └──(ceiling)─→ Exhausted
//!       └─(invalid drawing: stay, count a penalty)
//! ```
//!
//! Terminality is mechanical: the phase is a tagged variant, a terminal
//! outcome is assigned exactly once, and every mutator refuses to touch
//! a completed turn. Mutators are `pub(crate)` — only the session drives
//! transitions, after it has checked who is calling.

use glyphline_core::{
    Drawing, GuessAttempt, PlayerId, Role, SymbolSet, Term, TurnOutcome,
};
use serde::{Deserialize, Serialize};

use crate::validator::{self, DrawingRejection};

// ---------------------------------------------------------------------------
// TurnPhase
// ---------------------------------------------------------------------------

/// Where a turn is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    /// Waiting on the artist's drawing. Rejected submissions keep the
    /// turn here; the artist may resubmit.
    AwaitingDrawing,
    /// A drawing was accepted; waiting on the guesser.
    AwaitingGuess,
    /// Terminal. No further submissions are accepted.
    Complete(TurnOutcome),
}

impl TurnPhase {
    /// `true` once the turn has its outcome.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Complete(_))
    }
}

// ---------------------------------------------------------------------------
// Submission results
// ---------------------------------------------------------------------------

/// Result of a drawing submission. Both cases are ordinary results the
/// host relays to the artist, not errors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DrawingOutcome {
    /// The drawing passed validation; the turn moved to `AwaitingGuess`.
    Accepted,
    /// The whole drawing was refused. The turn stays in
    /// `AwaitingDrawing` and one invalid-submission penalty was
    /// recorded.
    Rejected(DrawingRejection),
}

/// Result of a guess submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum GuessOutcome {
    /// The guess matched; the turn solved on the given 1-based attempt.
    Correct {
        /// Attempts consumed, including this one.
        attempts_used: u32,
    },
    /// No match, attempts remain.
    Incorrect {
        /// Attempts still available.
        attempts_remaining: u32,
    },
    /// No match and the ceiling was reached; the turn is exhausted.
    Exhausted,
}

// ---------------------------------------------------------------------------
// Turn
// ---------------------------------------------------------------------------

/// One artist/guesser interaction cycle for a single term.
#[derive(Debug, Clone)]
pub struct Turn {
    artist: PlayerId,
    guesser: PlayerId,
    term: Term,
    symbols: SymbolSet,
    max_attempts: u32,
    drawing: Option<Drawing>,
    guesses: Vec<GuessAttempt>,
    invalid_submissions: u32,
    phase: TurnPhase,
}

impl Turn {
    pub(crate) fn new(
        artist: PlayerId,
        guesser: PlayerId,
        term: Term,
        symbols: SymbolSet,
        max_attempts: u32,
    ) -> Self {
        debug_assert_ne!(artist, guesser, "roles must be complementary");
        Self {
            artist,
            guesser,
            term,
            symbols,
            max_attempts,
            drawing: None,
            guesses: Vec::new(),
            invalid_submissions: 0,
            phase: TurnPhase::AwaitingDrawing,
        }
    }

    // -- Accessors --------------------------------------------------------

    /// The player drawing this turn.
    pub fn artist(&self) -> PlayerId {
        self.artist
    }

    /// The player guessing this turn.
    pub fn guesser(&self) -> PlayerId {
        self.guesser
    }

    /// The hidden term.
    pub fn term(&self) -> &Term {
        &self.term
    }

    /// The fixed alphabet for this turn.
    pub fn symbols(&self) -> &SymbolSet {
        &self.symbols
    }

    /// The accepted drawing, once there is one.
    pub fn drawing(&self) -> Option<&Drawing> {
        self.drawing.as_ref()
    }

    /// Guesses recorded so far, in order.
    pub fn guesses(&self) -> &[GuessAttempt] {
        &self.guesses
    }

    /// Rejected drawing submissions, counted for the scoring penalty.
    /// Never counted against guess attempts.
    pub fn invalid_submissions(&self) -> u32 {
        self.invalid_submissions
    }

    /// The current phase.
    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// The terminal outcome, once the turn has one.
    pub fn outcome(&self) -> Option<TurnOutcome> {
        match self.phase {
            TurnPhase::Complete(outcome) => Some(outcome),
            _ => None,
        }
    }

    /// Guess attempts still available.
    pub fn attempts_remaining(&self) -> u32 {
        self.max_attempts.saturating_sub(self.guesses.len() as u32)
    }

    /// Who the turn is waiting on, and in which role. `None` once
    /// terminal.
    pub fn expected_actor(&self) -> Option<(PlayerId, Role)> {
        match self.phase {
            TurnPhase::AwaitingDrawing => Some((self.artist, Role::Artist)),
            TurnPhase::AwaitingGuess => Some((self.guesser, Role::Guesser)),
            TurnPhase::Complete(_) => None,
        }
    }

    /// The role a player holds this turn, if they are part of it.
    pub fn role_of(&self, player: PlayerId) -> Option<Role> {
        if player == self.artist {
            Some(Role::Artist)
        } else if player == self.guesser {
            Some(Role::Guesser)
        } else {
            None
        }
    }

    // -- Transitions ------------------------------------------------------

    /// Processes a drawing submission.
    ///
    /// Caller must have verified the phase is `AwaitingDrawing`. An
    /// invalid drawing keeps the turn in place and bumps the penalty
    /// counter; a valid one is stored and advances to `AwaitingGuess`
    /// (first accepted drawing wins — no revision afterwards).
    pub(crate) fn submit_drawing(&mut self, drawing: Drawing) -> DrawingOutcome {
        debug_assert_eq!(self.phase, TurnPhase::AwaitingDrawing);

        match validator::validate(&drawing, &self.symbols) {
            Ok(()) => {
                self.drawing = Some(drawing);
                self.phase = TurnPhase::AwaitingGuess;
                DrawingOutcome::Accepted
            }
            Err(rejection) => {
                self.invalid_submissions += 1;
                tracing::debug!(
                    artist = %self.artist,
                    invalid_submissions = self.invalid_submissions,
                    %rejection,
                    "drawing rejected"
                );
                DrawingOutcome::Rejected(rejection)
            }
        }
    }

    /// Processes a guess.
    ///
    /// Caller must have verified the phase is `AwaitingGuess`. A match
    /// solves the turn; a miss at the attempt ceiling exhausts it.
    pub(crate) fn submit_guess(&mut self, text: &str) -> GuessOutcome {
        debug_assert_eq!(self.phase, TurnPhase::AwaitingGuess);

        let index = self.guesses.len() as u32 + 1;
        let correct = self.term.matches(text);
        self.guesses.push(GuessAttempt {
            text: text.to_string(),
            index,
            correct,
        });

        if correct {
            self.phase = TurnPhase::Complete(TurnOutcome::Solved {
                attempts_used: index,
            });
            GuessOutcome::Correct {
                attempts_used: index,
            }
        } else if index >= self.max_attempts {
            self.phase = TurnPhase::Complete(TurnOutcome::Exhausted);
            GuessOutcome::Exhausted
        } else {
            GuessOutcome::Incorrect {
                attempts_remaining: self.max_attempts - index,
            }
        }
    }

    /// Drives a live turn straight to `Exhausted`.
    ///
    /// This is the "no value" submission a host uses when a per-turn
    /// deadline elapses. No-op on a terminal turn.
    pub(crate) fn forfeit(&mut self) {
        if !self.phase.is_terminal() {
            self.phase = TurnPhase::Complete(TurnOutcome::Exhausted);
        }
    }

    /// Marks a live turn `Abandoned` (session abort). No-op on a
    /// terminal turn.
    pub(crate) fn abandon(&mut self) {
        if !self.phase.is_terminal() {
            self.phase = TurnPhase::Complete(TurnOutcome::Abandoned);
        }
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn turn(max_attempts: u32) -> Turn {
        Turn::new(
            PlayerId(1),
            PlayerId(2),
            Term::new("cat", 2).unwrap(),
            SymbolSet::new(['#', '*', '.']).unwrap(),
            max_attempts,
        )
    }

    // =====================================================================
    // submit_drawing()
    // =====================================================================

    #[test]
    fn test_submit_drawing_valid_advances_to_awaiting_guess() {
        let mut t = turn(5);
        let outcome = t.submit_drawing(Drawing::from("#*#"));
        assert_eq!(outcome, DrawingOutcome::Accepted);
        assert_eq!(t.phase(), TurnPhase::AwaitingGuess);
        assert_eq!(t.drawing().unwrap().to_string(), "#*#");
    }

    #[test]
    fn test_submit_drawing_invalid_stays_and_counts_penalty() {
        let mut t = turn(5);
        let outcome = t.submit_drawing(Drawing::from("#*X"));
        assert!(matches!(outcome, DrawingOutcome::Rejected(_)));
        assert_eq!(t.phase(), TurnPhase::AwaitingDrawing);
        assert_eq!(t.invalid_submissions(), 1);
        assert!(t.drawing().is_none());
    }

    #[test]
    fn test_submit_drawing_resubmission_after_rejection_allowed() {
        let mut t = turn(5);
        t.submit_drawing(Drawing::from("#*X"));
        t.submit_drawing(Drawing::from("???"));
        assert_eq!(t.invalid_submissions(), 2);

        let outcome = t.submit_drawing(Drawing::from("#*#"));
        assert_eq!(outcome, DrawingOutcome::Accepted);
        // Earlier rejections still count for the penalty.
        assert_eq!(t.invalid_submissions(), 2);
    }

    #[test]
    fn test_submit_drawing_rejection_never_consumes_guess_attempts() {
        let mut t = turn(3);
        t.submit_drawing(Drawing::from("#*X"));
        t.submit_drawing(Drawing::from("#*X"));
        assert_eq!(t.attempts_remaining(), 3);
    }

    // =====================================================================
    // submit_guess()
    // =====================================================================

    fn guessing_turn(max_attempts: u32) -> Turn {
        let mut t = turn(max_attempts);
        t.submit_drawing(Drawing::from("#*#"));
        t
    }

    #[test]
    fn test_submit_guess_match_solves_with_attempt_count() {
        let mut t = guessing_turn(5);
        assert_eq!(
            t.submit_guess("dog"),
            GuessOutcome::Incorrect {
                attempts_remaining: 4
            }
        );
        assert_eq!(
            t.submit_guess("cat"),
            GuessOutcome::Correct { attempts_used: 2 }
        );
        assert_eq!(
            t.outcome(),
            Some(TurnOutcome::Solved { attempts_used: 2 })
        );
    }

    #[test]
    fn test_submit_guess_normalized_match() {
        let mut t = guessing_turn(5);
        assert_eq!(
            t.submit_guess("  CAT "),
            GuessOutcome::Correct { attempts_used: 1 }
        );
    }

    #[test]
    fn test_submit_guess_ceiling_exhausts_turn() {
        let mut t = guessing_turn(3);
        t.submit_guess("dog");
        t.submit_guess("sun");
        assert_eq!(t.submit_guess("car"), GuessOutcome::Exhausted);
        assert_eq!(t.outcome(), Some(TurnOutcome::Exhausted));
        assert_eq!(t.guesses().len(), 3);
    }

    #[test]
    fn test_submit_guess_records_attempts_in_order() {
        let mut t = guessing_turn(5);
        t.submit_guess("dog");
        t.submit_guess("cat");
        let guesses = t.guesses();
        assert_eq!(guesses[0].index, 1);
        assert!(!guesses[0].correct);
        assert_eq!(guesses[1].index, 2);
        assert!(guesses[1].correct);
    }

    #[test]
    fn test_rejected_drawing_then_accept_then_second_attempt_solve() {
        // One turn end to end: "#*X" refused naming the X, "#*#"
        // accepted, a miss, then a solve on attempt 2.
        let mut t = turn(5);
        match t.submit_drawing(Drawing::from("#*X")) {
            DrawingOutcome::Rejected(DrawingRejection::DisallowedGlyphs(
                violations,
            )) => {
                assert_eq!(violations.len(), 1);
                assert_eq!(violations[0].glyph, 'X');
                assert_eq!(violations[0].position, 2);
            }
            other => panic!("expected glyph rejection, got {other:?}"),
        }
        assert_eq!(
            t.submit_drawing(Drawing::from("#*#")),
            DrawingOutcome::Accepted
        );
        assert_eq!(
            t.submit_guess("dog"),
            GuessOutcome::Incorrect {
                attempts_remaining: 4
            }
        );
        assert_eq!(
            t.submit_guess("cat"),
            GuessOutcome::Correct { attempts_used: 2 }
        );
        assert_eq!(t.invalid_submissions(), 1);
    }

    #[test]
    fn test_solved_only_on_first_matching_attempt() {
        // Outcome must pin the FIRST match, not any later one.
        let mut t = guessing_turn(5);
        t.submit_guess("dog");
        t.submit_guess("cat");
        assert_eq!(
            t.outcome(),
            Some(TurnOutcome::Solved { attempts_used: 2 })
        );
    }

    // =====================================================================
    // expected_actor() / role_of()
    // =====================================================================

    #[test]
    fn test_expected_actor_follows_phase() {
        let mut t = turn(5);
        assert_eq!(t.expected_actor(), Some((PlayerId(1), Role::Artist)));
        t.submit_drawing(Drawing::from("#"));
        assert_eq!(t.expected_actor(), Some((PlayerId(2), Role::Guesser)));
        t.submit_guess("cat");
        assert_eq!(t.expected_actor(), None);
    }

    #[test]
    fn test_role_of_members_and_strangers() {
        let t = turn(5);
        assert_eq!(t.role_of(PlayerId(1)), Some(Role::Artist));
        assert_eq!(t.role_of(PlayerId(2)), Some(Role::Guesser));
        assert_eq!(t.role_of(PlayerId(9)), None);
    }

    // =====================================================================
    // forfeit() / abandon()
    // =====================================================================

    #[test]
    fn test_forfeit_exhausts_live_turn() {
        let mut t = guessing_turn(5);
        t.forfeit();
        assert_eq!(t.outcome(), Some(TurnOutcome::Exhausted));
    }

    #[test]
    fn test_forfeit_does_not_overwrite_terminal_outcome() {
        let mut t = guessing_turn(5);
        t.submit_guess("cat");
        t.forfeit();
        assert_eq!(
            t.outcome(),
            Some(TurnOutcome::Solved { attempts_used: 1 })
        );
    }

    #[test]
    fn test_abandon_marks_live_turn_abandoned() {
        let mut t = turn(5);
        t.abandon();
        assert_eq!(t.outcome(), Some(TurnOutcome::Abandoned));
    }
}
