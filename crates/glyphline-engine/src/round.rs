//! Round orchestration: two turns, roles swapped, strictly sequential.
//!
//! Role assignment is a pure function of (round index, turn index) —
//! no mutable counters to drift out of sync. Within a round each player
//! is artist exactly once; the opening artist alternates by round so a
//! match opens evenly.

use glyphline_core::{PlayerId, SymbolSet, Term};

use crate::turn::Turn;

/// Turns in a round: each player draws once.
pub const TURNS_PER_ROUND: u32 = 2;

/// Returns `(artist, guesser)` for a turn slot. Indices are 1-based.
///
/// The opener of round N is `players[(N − 1) mod 2]`; the second turn
/// inverts the pair. This guarantees both per-round invariants (each
/// player artist exactly once) and across-round fairness.
pub fn role_assignment(
    players: [PlayerId; 2],
    round_index: u32,
    turn_index: u32,
) -> (PlayerId, PlayerId) {
    let opener = ((round_index.max(1) - 1) % 2) as usize;
    let artist = if turn_index == 1 { opener } else { 1 - opener };
    (players[artist], players[1 - artist])
}

/// One round of a match: a pair of turns with inverted roles.
///
/// Both term assignments are pulled from the catalog before the round
/// starts, so a catalog failure can only surface at a round boundary,
/// never mid-round.
#[derive(Debug)]
pub struct Round {
    index: u32,
    players: [PlayerId; 2],
    max_attempts: u32,
    turns: Vec<Turn>,
    /// Term and alphabet reserved for the second turn.
    second_assignment: Option<(Term, SymbolSet)>,
}

impl Round {
    /// Starts a round with both turn assignments in hand. The first turn
    /// opens immediately; the second is held until the first is
    /// terminal.
    pub(crate) fn begin(
        index: u32,
        players: [PlayerId; 2],
        assignments: [(Term, SymbolSet); 2],
        max_attempts: u32,
    ) -> Self {
        let [first, second] = assignments;
        let (artist, guesser) = role_assignment(players, index, 1);
        let opening_turn =
            Turn::new(artist, guesser, first.0, first.1, max_attempts);
        tracing::info!(
            round = index,
            %artist,
            %guesser,
            "round started"
        );
        Self {
            index,
            players,
            max_attempts,
            turns: vec![opening_turn],
            second_assignment: Some(second),
        }
    }

    /// 1-based round index.
    pub fn index(&self) -> u32 {
        self.index
    }

    /// The turns opened so far (one or two).
    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    /// The turn currently accepting submissions, if any.
    pub fn active_turn(&self) -> Option<&Turn> {
        self.turns.last().filter(|t| !t.phase().is_terminal())
    }

    pub(crate) fn active_turn_mut(&mut self) -> Option<&mut Turn> {
        self.turns.last_mut().filter(|t| !t.phase().is_terminal())
    }

    /// Opens the second turn if the first just finished. Call after
    /// every terminal turn transition.
    pub(crate) fn advance(&mut self) {
        let last_terminal = self
            .turns
            .last()
            .is_some_and(|t| t.phase().is_terminal());
        if !last_terminal {
            return;
        }
        if let Some((term, symbols)) = self.second_assignment.take() {
            let (artist, guesser) =
                role_assignment(self.players, self.index, 2);
            tracing::debug!(
                round = self.index,
                %artist,
                %guesser,
                "roles swapped for second turn"
            );
            self.turns.push(Turn::new(
                artist,
                guesser,
                term,
                symbols,
                self.max_attempts,
            ));
        }
    }

    /// A round is complete only when both of its turns are terminal.
    pub fn is_complete(&self) -> bool {
        self.second_assignment.is_none()
            && self.turns.len() == TURNS_PER_ROUND as usize
            && self.turns.iter().all(|t| t.phase().is_terminal())
    }

    /// Marks any live turn `Abandoned` (session abort).
    pub(crate) fn abandon(&mut self) {
        if let Some(turn) = self.turns.last_mut() {
            turn.abandon();
        }
        self.second_assignment = None;
    }
}

// =========================================================================
// Tests
// =========================================================================
