//! Identity newtypes and game value types.
//!
//! Everything here is serde-(de)serializable so a host can persist full
//! match history (drawings, guesses, outcomes) for audit and replay.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::CoreError;

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// A unique identifier for a player.
///
/// Newtype over `u64` so a player id can't be passed where a session id
/// is expected. `#[serde(transparent)]` keeps the wire form a bare
/// integer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlayerId(pub u64);

impl fmt::Display for PlayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "P-{}", self.0)
    }
}

/// A unique identifier for a game session (one three-round match).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S-{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Role
// ---------------------------------------------------------------------------

/// The role a player holds for one turn.
///
/// Roles are always complementary: within a turn, one player is the
/// [`Artist`](Role::Artist) and the other is the
/// [`Guesser`](Role::Guesser). They swap between the two turns of a
/// round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    /// Submits a drawing for the turn's term.
    Artist,
    /// Submits guess attempts against the drawing.
    Guesser,
}

impl Role {
    /// Returns the complementary role.
    pub fn other(self) -> Self {
        match self {
            Self::Artist => Self::Guesser,
            Self::Guesser => Self::Artist,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Artist => write!(f, "artist"),
            Self::Guesser => write!(f, "guesser"),
        }
    }
}

// ---------------------------------------------------------------------------
// Term
// ---------------------------------------------------------------------------

/// A hidden term to draw and guess, with its complexity rating.
///
/// Immutable once constructed — a turn's term never changes after
/// assignment. Complexity is a positive integer (the builtin catalog
/// uses 1–5, where 5 is hardest) and feeds the scoring base.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Term {
    label: String,
    complexity: u8,
}

impl Term {
    /// Creates a term.
    ///
    /// # Errors
    /// - [`CoreError::BlankTerm`] if the label is empty or whitespace.
    /// - [`CoreError::InvalidComplexity`] if the rating is zero.
    pub fn new(
        label: impl Into<String>,
        complexity: u8,
    ) -> Result<Self, CoreError> {
        let label = label.into();
        if label.trim().is_empty() {
            return Err(CoreError::BlankTerm);
        }
        if complexity == 0 {
            return Err(CoreError::InvalidComplexity(complexity));
        }
        Ok(Self { label, complexity })
    }

    /// The term's text label.
    pub fn label(&self) -> &str {
        &self.label
    }

    /// The term's complexity rating (≥ 1).
    pub fn complexity(&self) -> u8 {
        self.complexity
    }

    /// Checks whether a guess matches this term.
    ///
    /// Matching is exact after normalization: case-insensitive, leading
    /// and trailing whitespace trimmed, internal whitespace runs
    /// collapsed to a single space. `"  Fire  Truck "` matches
    /// `"fire truck"`. No fuzzy or partial credit.
    pub fn matches(&self, guess: &str) -> bool {
        normalize(guess) == normalize(&self.label)
    }
}

/// Lowercases and collapses whitespace for guess comparison.
fn normalize(text: &str) -> String {
    text.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

// ---------------------------------------------------------------------------
// SymbolSet
// ---------------------------------------------------------------------------

/// The fixed alphabet of glyphs permitted for one turn's drawing.
///
/// An ordered set: members are unique, order is preserved from
/// construction, and the set is never empty. Fixed at turn start and
/// never mutated afterwards.
///
/// The `try_from`/`into` serde attributes route deserialization through
/// [`SymbolSet::new`], so a persisted set can't smuggle in duplicates or
/// emptiness.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<char>", into = "Vec<char>")]
pub struct SymbolSet {
    glyphs: Vec<char>,
}

impl SymbolSet {
    /// Builds a symbol set from glyphs, deduplicating while preserving
    /// first-seen order.
    ///
    /// # Errors
    /// Returns [`CoreError::EmptySymbolSet`] if no glyphs are given.
    pub fn new(
        glyphs: impl IntoIterator<Item = char>,
    ) -> Result<Self, CoreError> {
        let mut unique = Vec::new();
        for glyph in glyphs {
            if !unique.contains(&glyph) {
                unique.push(glyph);
            }
        }
        if unique.is_empty() {
            return Err(CoreError::EmptySymbolSet);
        }
        Ok(Self { glyphs: unique })
    }

    /// Returns `true` if the glyph belongs to the set.
    pub fn contains(&self, glyph: char) -> bool {
        self.glyphs.contains(&glyph)
    }

    /// Iterates the glyphs in order.
    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        self.glyphs.iter().copied()
    }

    /// Number of glyphs in the set.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// Always `false` — an empty set can't be constructed.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

impl TryFrom<Vec<char>> for SymbolSet {
    type Error = CoreError;

    fn try_from(glyphs: Vec<char>) -> Result<Self, Self::Error> {
        Self::new(glyphs)
    }
}

impl From<SymbolSet> for Vec<char> {
    fn from(set: SymbolSet) -> Self {
        set.glyphs
    }
}

impl fmt::Display for SymbolSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for glyph in &self.glyphs {
            if !first {
                write!(f, " ")?;
            }
            write!(f, "{glyph}")?;
            first = false;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Drawing
// ---------------------------------------------------------------------------

/// An ordered glyph sequence submitted by the artist.
///
/// A drawing carries every character the artist typed, including
/// whitespace used for layout. Validity (membership in the turn's symbol
/// set, non-emptiness) is checked by the engine's validator, not here —
/// a `Drawing` is just the submission as received.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct Drawing {
    glyphs: Vec<char>,
}

impl Drawing {
    /// The glyphs in submission order, whitespace included.
    pub fn glyphs(&self) -> &[char] {
        &self.glyphs
    }

    /// Total character count, whitespace included.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// `true` if the submission contains no characters at all.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    /// Number of non-whitespace glyphs (the "ink" in the drawing).
    pub fn ink_len(&self) -> usize {
        self.glyphs.iter().filter(|g| !g.is_whitespace()).count()
    }

    /// Number of distinct non-whitespace glyphs used.
    pub fn distinct_glyphs(&self) -> usize {
        let mut seen = Vec::new();
        for glyph in &self.glyphs {
            if !glyph.is_whitespace() && !seen.contains(glyph) {
                seen.push(*glyph);
            }
        }
        seen.len()
    }
}

impl From<&str> for Drawing {
    fn from(text: &str) -> Self {
        Self {
            glyphs: text.chars().collect(),
        }
    }
}

impl From<String> for Drawing {
    fn from(text: String) -> Self {
        Self::from(text.as_str())
    }
}

impl From<Drawing> for String {
    fn from(drawing: Drawing) -> Self {
        drawing.glyphs.iter().collect()
    }
}

impl fmt::Display for Drawing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for glyph in &self.glyphs {
            write!(f, "{glyph}")?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// GuessAttempt
// ---------------------------------------------------------------------------

/// One guess submitted by the guesser, recorded for history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GuessAttempt {
    /// The guess text as submitted (un-normalized).
    pub text: String,
    /// 1-based attempt index.
    pub index: u32,
    /// Whether this attempt matched the term.
    pub correct: bool,
}

// ---------------------------------------------------------------------------
// TurnOutcome
// ---------------------------------------------------------------------------

/// The terminal outcome of a turn.
///
/// A turn reaches exactly one outcome and is immutable afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnOutcome {
    /// The guesser matched the term on the given 1-based attempt.
    Solved {
        /// How many guesses it took (1 = first try).
        attempts_used: u32,
    },
    /// The attempt ceiling was reached without a match, or the turn was
    /// forfeited.
    Exhausted,
    /// The session was aborted while this turn was still live.
    Abandoned,
}

impl TurnOutcome {
    /// `true` only for [`TurnOutcome::Solved`].
    pub fn is_solved(&self) -> bool {
        matches!(self, Self::Solved { .. })
    }
}

impl fmt::Display for TurnOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Solved { attempts_used } => {
                write!(f, "solved in {attempts_used}")
            }
            Self::Exhausted => write!(f, "exhausted"),
            Self::Abandoned => write!(f, "abandoned"),
        }
    }
}

// ---------------------------------------------------------------------------
// SessionStatus
// ---------------------------------------------------------------------------

/// The lifecycle status of a game session.
///
/// ```text
/// InProgress ──(round 3 completes)──→ Completed
///     │
///     └──(abort / catalog failure)──→ Aborted
/// ```
///
/// Both terminal states freeze the session: no further submissions are
/// accepted and the shared score is final.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionStatus {
    /// The match is live and accepting submissions.
    InProgress,
    /// All rounds completed; shared score is final.
    Completed,
    /// The match was abandoned or failed fatally; excluded from scoring
    /// comparisons.
    Aborted,
}

impl SessionStatus {
    /// `true` while the session still accepts submissions.
    pub fn is_open(&self) -> bool {
        matches!(self, Self::InProgress)
    }
}

impl fmt::Display for SessionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InProgress => write!(f, "InProgress"),
            Self::Completed => write!(f, "Completed"),
            Self::Aborted => write!(f, "Aborted"),
        }
    }
}

// =========================================================================
// Tests
// =========================================================================
