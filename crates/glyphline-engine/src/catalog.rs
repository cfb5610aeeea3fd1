//! Term supply: the `TermCatalog` trait and the builtin catalog.
//!
//! The catalog is the engine's only external dependency. A session asks
//! it for a term and a symbol alphabet at the start of each turn slot;
//! everything after that is pure in-memory state machinery.

use glyphline_core::{SymbolSet, Term};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// ---------------------------------------------------------------------------
// CatalogError
// ---------------------------------------------------------------------------

/// Errors a term catalog can return.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// No eligible term remains for this session. Fatal — the session
    /// aborts, since a turn cannot start without a term.
    #[error("no eligible term remains")]
    Exhausted,

    /// A transient lookup failure (e.g. a backing store hiccup). The
    /// session retries these within its configured retry budget.
    #[error("catalog unavailable: {0}")]
    Unavailable(String),
}

// ---------------------------------------------------------------------------
// TermCatalog
// ---------------------------------------------------------------------------

/// Supplies a term and its symbol alphabet for a turn slot.
///
/// The engine requires only two things of an implementation:
///
/// 1. **Determinism per session** — the same catalog instance asked the
///    same sequence of questions answers the same way.
/// 2. **No repetition** — a term handed out once in a session is never
///    handed out again.
///
/// Complexity policy (e.g. ramping difficulty across rounds) is the
/// implementation's business; the engine scores whatever rating the
/// returned [`Term`] carries.
pub trait TermCatalog: Send {
    /// Returns the term and allowed alphabet for the given turn slot.
    ///
    /// `round_index` and `turn_index` are 1-based.
    ///
    /// # Errors
    /// - [`CatalogError::Exhausted`] if no eligible term remains.
    /// - [`CatalogError::Unavailable`] on a transient lookup failure.
    fn next(
        &mut self,
        round_index: u32,
        turn_index: u32,
    ) -> Result<(Term, SymbolSet), CatalogError>;
}

// ---------------------------------------------------------------------------
// BuiltinCatalog
// ---------------------------------------------------------------------------

/// The basic alphabet, used for round 1.
const BASIC_ALPHABET: &[char] =
    &['-', '|', '/', '\\', '+', '.', '*', '='];

/// The medium alphabet, used for round 2.
const MEDIUM_ALPHABET: &[char] = &[
    '-', '|', '/', '\\', '+', '.', '*', '=', '^', '<', '>', '(', ')',
    '[', ']', '~',
];

/// The full alphabet, used for round 3 and beyond.
const FULL_ALPHABET: &[char] = &[
    '-', '|', '/', '\\', '+', '.', '*', '=', '^', '<', '>', '(', ')',
    '[', ']', '~', '#', '_', ':', ';', '"', '\'', '`', ',', '@', '&',
];

/// The default term database: labels with complexity ratings 1–5,
/// where 5 is hardest.
fn default_terms() -> Vec<Term> {
    const ENTRIES: &[(&str, u8)] = &[
        // Easy (1-2)
        ("cat", 1),
        ("dog", 1),
        ("house", 1),
        ("tree", 1),
        ("sun", 1),
        ("moon", 1),
        ("car", 2),
        ("boat", 2),
        // Medium (3)
        ("bicycle", 3),
        ("airplane", 3),
        ("robot", 3),
        ("castle", 3),
        ("train", 3),
        // Hard (4-5)
        ("elephant", 4),
        ("giraffe", 4),
        ("skyscraper", 4),
        ("helicopter", 4),
        ("submarine", 5),
        ("dinosaur", 5),
        ("spacecraft", 5),
    ];
    ENTRIES
        .iter()
        .map(|(label, complexity)| {
            Term::new(*label, *complexity).expect("builtin terms are valid")
        })
        .collect()
}

/// The builtin term catalog: a seeded in-memory database.
///
/// - **Deterministic**: the pick sequence is a pure function of the seed.
/// - **No repetition**: a handed-out term leaves the pool.
/// - **Ramping difficulty**: round 1 draws from complexity 1–2, round 2
///   from complexity 3, round 3 (and beyond) from complexity 4–5, each
///   falling back to the whole remaining pool if its band is empty.
/// - **Ramping alphabets**: the allowed symbol set grows with the round
///   index (8 → 16 → 26 glyphs). Alphabets contain only ASCII symbol
///   characters, so a builtin set never trips the validator's hard
///   content rule.
pub struct BuiltinCatalog {
    pool: Vec<Term>,
    rng: StdRng,
}

impl BuiltinCatalog {
    /// Creates a catalog over the default term database.
    pub fn new(seed: u64) -> Self {
        Self::with_terms(default_terms(), seed)
    }

    /// Creates a catalog over a custom term pool.
    pub fn with_terms(
        terms: impl IntoIterator<Item = Term>,
        seed: u64,
    ) -> Self {
        Self {
            pool: terms.into_iter().collect(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Number of terms still available.
    pub fn remaining(&self) -> usize {
        self.pool.len()
    }

    /// The complexity band targeted for a round.
    fn band(round_index: u32) -> std::ops::RangeInclusive<u8> {
        match round_index {
            0 | 1 => 1..=2,
            2 => 3..=3,
            _ => 4..=u8::MAX,
        }
    }

    /// The symbol alphabet for a round.
    fn alphabet(round_index: u32) -> SymbolSet {
        let glyphs = match round_index {
            0 | 1 => BASIC_ALPHABET,
            2 => MEDIUM_ALPHABET,
            _ => FULL_ALPHABET,
        };
        SymbolSet::new(glyphs.iter().copied())
            .expect("builtin alphabets are non-empty")
    }
}

impl TermCatalog for BuiltinCatalog {
    fn next(
        &mut self,
        round_index: u32,
        _turn_index: u32,
    ) -> Result<(Term, SymbolSet), CatalogError> {
        if self.pool.is_empty() {
            return Err(CatalogError::Exhausted);
        }

        let band = Self::band(round_index);
        let in_band: Vec<usize> = self
            .pool
            .iter()
            .enumerate()
            .filter(|(_, term)| band.contains(&term.complexity()))
            .map(|(i, _)| i)
            .collect();

        // Prefer the round's band; fall back to anything left rather
        // than exhausting early.
        let index = if in_band.is_empty() {
            self.rng.random_range(0..self.pool.len())
        } else {
            in_band[self.rng.random_range(0..in_band.len())]
        };

        let term = self.pool.swap_remove(index);
        tracing::debug!(
            round_index,
            term = term.label(),
            complexity = term.complexity(),
            remaining = self.pool.len(),
            "catalog handed out term"
        );
        Ok((term, Self::alphabet(round_index)))
    }
}

// =========================================================================
// Tests
// =========================================================================
