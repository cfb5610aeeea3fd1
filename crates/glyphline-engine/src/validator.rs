//! Drawing validation against a turn's symbol set.
//!
//! A pure check with no side effects: the caller (the turn state
//! machine) decides what a rejection means — in practice, the artist may
//! resubmit until a drawing is accepted.

use std::fmt;

use glyphline_core::{Drawing, SymbolSet};
use serde::{Deserialize, Serialize};

/// Why a single glyph was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GlyphFault {
    /// The glyph is not a member of this turn's symbol set.
    NotInSet,
    /// The glyph is text or pictographic content (a letter, digit, or
    /// non-ASCII character). Refused unconditionally, even if a
    /// misconfigured symbol set nominally contains it — drawings are
    /// ASCII symbols only.
    ForbiddenContent,
}

impl fmt::Display for GlyphFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotInSet => write!(f, "not in this turn's symbol set"),
            Self::ForbiddenContent => {
                write!(f, "letters, digits, and non-ASCII are not drawable")
            }
        }
    }
}

/// One offending glyph, with its position in the submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlyphViolation {
    /// 0-based character position within the drawing.
    pub position: usize,
    /// The offending glyph.
    pub glyph: char,
    /// Why it was refused.
    pub fault: GlyphFault,
}

/// A rejected drawing. The whole submission is refused — there is no
/// partial acceptance — and every offending position is reported so the
/// artist can fix them all in one pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
pub enum DrawingRejection {
    /// The drawing contains no glyphs. Whitespace is layout, not ink, so
    /// a whitespace-only submission is empty too.
    #[error("drawing contains no glyphs")]
    Empty,

    /// One or more glyphs were refused.
    #[error("drawing contains {} disallowed glyph(s)", .0.len())]
    DisallowedGlyphs(Vec<GlyphViolation>),
}

/// Checks a drawing against the turn's allowed alphabet.
///
/// Whitespace (space, newline, tab, carriage return) is always permitted
/// as layout. Every other character must be an ASCII symbol AND a member
/// of `symbols`; the ASCII-symbol rule is a hard layer on top of the
/// per-turn set, so letters, digits, and emoji are refused even when the
/// set contains them.
///
/// # Errors
/// - [`DrawingRejection::Empty`] if the drawing has no ink.
/// - [`DrawingRejection::DisallowedGlyphs`] listing ALL offending
///   positions, not just the first.
pub fn validate(
    drawing: &Drawing,
    symbols: &SymbolSet,
) -> Result<(), DrawingRejection> {
    if drawing.ink_len() == 0 {
        return Err(DrawingRejection::Empty);
    }

    let mut violations = Vec::new();
    for (position, &glyph) in drawing.glyphs().iter().enumerate() {
        if glyph.is_whitespace() {
            continue;
        }
        let fault = if !glyph.is_ascii() || glyph.is_ascii_alphanumeric() {
            GlyphFault::ForbiddenContent
        } else if !symbols.contains(glyph) {
            GlyphFault::NotInSet
        } else {
            continue;
        };
        violations.push(GlyphViolation {
            position,
            glyph,
            fault,
        });
    }

    if violations.is_empty() {
        Ok(())
    } else {
        Err(DrawingRejection::DisallowedGlyphs(violations))
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn set(glyphs: &[char]) -> SymbolSet {
        SymbolSet::new(glyphs.iter().copied()).unwrap()
    }

    #[test]
    fn test_validate_all_glyphs_in_set_accepted() {
        let symbols = set(&['#', '*', '.']);
        assert!(validate(&Drawing::from("#*#"), &symbols).is_ok());
    }

    #[test]
    fn test_validate_glyph_outside_set_rejected_with_position() {
        // Set {#, *, .}, drawing "#*X": only the X is reported.
        let symbols = set(&['#', '*', '.']);
        let err = validate(&Drawing::from("#*X"), &symbols).unwrap_err();
        match err {
            DrawingRejection::DisallowedGlyphs(violations) => {
                assert_eq!(violations.len(), 1);
                assert_eq!(violations[0].glyph, 'X');
                assert_eq!(violations[0].position, 2);
            }
            other => panic!("expected glyph rejection, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_reports_every_violation_not_just_first() {
        let symbols = set(&['#', '*']);
        let err = validate(&Drawing::from("#?*!#?"), &symbols).unwrap_err();
        match err {
            DrawingRejection::DisallowedGlyphs(violations) => {
                let positions: Vec<usize> =
                    violations.iter().map(|v| v.position).collect();
                assert_eq!(positions, vec![1, 3, 5]);
            }
            other => panic!("expected glyph rejection, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_empty_drawing_rejected() {
        let symbols = set(&['#']);
        assert_eq!(
            validate(&Drawing::from(""), &symbols),
            Err(DrawingRejection::Empty)
        );
    }

    #[test]
    fn test_validate_whitespace_only_drawing_is_empty() {
        let symbols = set(&['#']);
        assert_eq!(
            validate(&Drawing::from("  \n\t "), &symbols),
            Err(DrawingRejection::Empty)
        );
    }

    #[test]
    fn test_validate_whitespace_layout_always_allowed() {
        let symbols = set(&['#', '*']);
        assert!(validate(&Drawing::from(" #\n\t* #\r\n"), &symbols).is_ok());
    }

    #[test]
    fn test_validate_letters_rejected_even_when_in_set() {
        // A misconfigured set containing a letter does not make the
        // letter drawable: the ASCII-symbol rule is a hard layer.
        let symbols = set(&['#', 'o']);
        let err = validate(&Drawing::from("#o#"), &symbols).unwrap_err();
        match err {
            DrawingRejection::DisallowedGlyphs(violations) => {
                assert_eq!(violations[0].glyph, 'o');
                assert_eq!(violations[0].fault, GlyphFault::ForbiddenContent);
            }
            other => panic!("expected glyph rejection, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_digits_rejected() {
        let symbols = set(&['#']);
        let err = validate(&Drawing::from("#7"), &symbols).unwrap_err();
        assert!(matches!(err, DrawingRejection::DisallowedGlyphs(v)
            if v[0].fault == GlyphFault::ForbiddenContent));
    }

    #[test]
    fn test_validate_emoji_rejected_even_when_in_set() {
        let symbols = set(&['#', '🎨']);
        let err = validate(&Drawing::from("#🎨"), &symbols).unwrap_err();
        assert!(matches!(err, DrawingRejection::DisallowedGlyphs(v)
            if v[0].glyph == '🎨'
            && v[0].fault == GlyphFault::ForbiddenContent));
    }

    #[test]
    fn test_validate_mixed_faults_reported_together() {
        let symbols = set(&['#']);
        let err = validate(&Drawing::from("#a?"), &symbols).unwrap_err();
        match err {
            DrawingRejection::DisallowedGlyphs(violations) => {
                assert_eq!(violations.len(), 2);
                assert_eq!(violations[0].fault, GlyphFault::ForbiddenContent);
                assert_eq!(violations[1].fault, GlyphFault::NotInSet);
            }
            other => panic!("expected glyph rejection, got {other:?}"),
        }
    }
}
