//! Error types for the core value layer.
//!
//! Each crate in Glyphline defines its own error enum. A `CoreError`
//! always means a value failed its construction invariant — not that a
//! move was illegal (the engine layer owns those).

/// Errors raised while constructing core values.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A symbol set must contain at least one glyph.
    #[error("symbol set must not be empty")]
    EmptySymbolSet,

    /// A term's complexity rating must be a positive integer.
    #[error("term complexity must be at least 1, got {0}")]
    InvalidComplexity(u8),

    /// A term's label must not be blank.
    #[error("term label must not be blank")]
    BlankTerm,
}
