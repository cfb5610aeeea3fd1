//! Turn and round scoring.
//!
//! All weights are explicit configuration — hosts tune the reward shape
//! without touching engine code. Defaults reproduce the classic scoring:
//! base points from term complexity, a bonus for fast solves, a small
//! bonus for lean drawings, and a per-rejected-submission penalty.

use glyphline_core::TurnOutcome;
use serde::{Deserialize, Serialize};

use crate::turn::Turn;

// ---------------------------------------------------------------------------
// ScoringConfig
// ---------------------------------------------------------------------------

/// Scoring weights for a session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoringConfig {
    /// Base points per complexity point on a solved turn.
    pub base_points_per_complexity: u32,

    /// Percentage bonus applied to the base for a first-attempt solve.
    pub first_attempt_bonus_percent: u32,

    /// Percentage bonus applied to the base for a second-attempt solve.
    pub second_attempt_bonus_percent: u32,

    /// Maximum efficiency bonus for a minimal drawing.
    pub efficiency_max_bonus: u32,

    /// The efficiency baseline, in non-whitespace glyphs per complexity
    /// point. Drawings at or beyond `complexity × baseline` glyphs earn
    /// no bonus; the bonus rises linearly as drawings get shorter.
    pub efficiency_baseline_per_complexity: u32,

    /// Flat deduction per invalid drawing submission recorded during the
    /// turn. Applied after base and bonus; the turn total is floored at
    /// zero, so penalties are bounded.
    pub invalid_submission_penalty: u32,

    /// End-of-match bonus added to the shared score when every round
    /// earned points.
    pub consistency_bonus: u32,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_points_per_complexity: 10,
            first_attempt_bonus_percent: 50,
            second_attempt_bonus_percent: 20,
            efficiency_max_bonus: 10,
            efficiency_baseline_per_complexity: 40,
            invalid_submission_penalty: 2,
            consistency_bonus: 20,
        }
    }
}

// ---------------------------------------------------------------------------
// TurnScore
// ---------------------------------------------------------------------------

/// The scored breakdown of one completed turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnScore {
    /// Complexity- and attempt-derived base. Zero unless solved.
    pub base: u32,
    /// Symbol-efficiency bonus for the accepted drawing.
    pub bonus: u32,
    /// Total penalty from invalid drawing submissions.
    pub penalty: u32,
    /// `max(0, base + bonus − penalty)`.
    pub total: u32,
}

// ---------------------------------------------------------------------------
// ScoringEngine
// ---------------------------------------------------------------------------

/// Computes points for completed turns and match-level bonuses.
#[derive(Debug, Clone, Default)]
pub struct ScoringEngine {
    config: ScoringConfig,
}

impl ScoringEngine {
    /// Creates a scoring engine with the given weights.
    pub fn new(config: ScoringConfig) -> Self {
        Self { config }
    }

    /// The active weights.
    pub fn config(&self) -> &ScoringConfig {
        &self.config
    }

    /// Scores a terminal turn.
    ///
    /// - **Base**: `complexity × base_points_per_complexity`, scaled up
    ///   for first/second-attempt solves. Zero for `Exhausted` and
    ///   `Abandoned` turns.
    /// - **Bonus**: earned by the accepted drawing even when the guesser
    ///   fails — information-dense drawings are rewarded regardless.
    /// - **Penalty**: per invalid submission, bounded by the zero floor.
    pub fn score_turn(&self, turn: &Turn) -> TurnScore {
        let outcome = turn
            .outcome()
            .unwrap_or(TurnOutcome::Abandoned);

        let base = match outcome {
            TurnOutcome::Solved { attempts_used } => {
                let raw = u32::from(turn.term().complexity())
                    * self.config.base_points_per_complexity;
                raw * self.attempt_percent(attempts_used) / 100
            }
            TurnOutcome::Exhausted | TurnOutcome::Abandoned => 0,
        };

        let bonus = turn
            .drawing()
            .map(|drawing| {
                self.efficiency_bonus(
                    drawing.ink_len(),
                    turn.term().complexity(),
                )
            })
            .unwrap_or(0);

        let penalty =
            turn.invalid_submissions() * self.config.invalid_submission_penalty;

        TurnScore {
            base,
            bonus,
            penalty,
            total: (base + bonus).saturating_sub(penalty),
        }
    }

    /// Match-level consistency bonus: awarded only when every round
    /// earned points.
    pub fn consistency_bonus(&self, round_scores: &[u32]) -> u32 {
        if !round_scores.is_empty() && round_scores.iter().all(|s| *s > 0) {
            self.config.consistency_bonus
        } else {
            0
        }
    }

    fn attempt_percent(&self, attempts_used: u32) -> u32 {
        match attempts_used {
            1 => 100 + self.config.first_attempt_bonus_percent,
            2 => 100 + self.config.second_attempt_bonus_percent,
            _ => 100,
        }
    }

    /// Linear ramp from `efficiency_max_bonus` (near-zero ink) down to
    /// zero at the complexity-scaled baseline.
    fn efficiency_bonus(&self, ink_len: usize, complexity: u8) -> u32 {
        let baseline = u32::from(complexity)
            * self.config.efficiency_baseline_per_complexity;
        let ink = ink_len as u32;
        if baseline == 0 || ink == 0 || ink >= baseline {
            return 0;
        }
        self.config.efficiency_max_bonus * (baseline - ink) / baseline
    }
}

// =========================================================================
// Tests
// =========================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use glyphline_core::{Drawing, PlayerId, SymbolSet, Term};

    fn scored_turn(
        complexity: u8,
        drawing: &str,
        guesses: &[&str],
        invalid_first: u32,
    ) -> Turn {
        let mut turn = Turn::new(
            PlayerId(1),
            PlayerId(2),
            Term::new("cat", complexity).unwrap(),
            SymbolSet::new(['#', '*', '.']).unwrap(),
            guesses.len().max(1) as u32,
        );
        for _ in 0..invalid_first {
            turn.submit_drawing(Drawing::from("#X"));
        }
        turn.submit_drawing(Drawing::from(drawing));
        for guess in guesses {
            turn.submit_guess(guess);
        }
        turn
    }

    fn engine() -> ScoringEngine {
        ScoringEngine::default()
    }

    #[test]
    fn test_score_turn_first_attempt_beats_second() {
        let first = engine().score_turn(&scored_turn(2, "#*#", &["cat"], 0));
        let second =
            engine().score_turn(&scored_turn(2, "#*#", &["dog", "cat"], 0));
        // complexity 2 → base 20; ×1.5 = 30 vs ×1.2 = 24.
        assert_eq!(first.base, 30);
        assert_eq!(second.base, 24);
        assert!(first.total > second.total);
    }

    #[test]
    fn test_score_turn_second_attempt_below_first_attempt_maximum() {
        // "cat" at complexity 2 solved on attempt 2
        // scores above zero but below the attempt-1 ceiling.
        let score =
            engine().score_turn(&scored_turn(2, "#*#", &["dog", "cat"], 0));
        let ceiling =
            engine().score_turn(&scored_turn(2, "#*#", &["cat"], 0));
        assert!(score.total > 0);
        assert!(score.total < ceiling.total);
    }

    #[test]
    fn test_score_turn_exhausted_zero_base_keeps_bonus() {
        // max attempts = guesses.len(), all wrong → Exhausted.
        let turn = scored_turn(2, "#*#", &["a", "b", "c"], 0);
        let score = engine().score_turn(&turn);
        assert_eq!(score.base, 0);
        assert!(score.bonus > 0, "lean drawing still earns its bonus");
        assert_eq!(score.total, score.bonus);
    }

    #[test]
    fn test_score_turn_penalty_deducted_after_base_and_bonus() {
        let clean = engine().score_turn(&scored_turn(2, "#*#", &["cat"], 0));
        let dirty = engine().score_turn(&scored_turn(2, "#*#", &["cat"], 3));
        assert_eq!(dirty.penalty, 6); // 3 × default penalty of 2
        assert_eq!(dirty.total, clean.total - 6);
    }

    #[test]
    fn test_score_turn_total_floored_at_zero() {
        // Exhausted turn with many rejected submissions: penalties
        // outweigh the bonus, but the total never goes negative.
        let turn = scored_turn(1, "#*#", &["a"], 20);
        let score = engine().score_turn(&turn);
        assert!(score.penalty > score.base + score.bonus);
        assert_eq!(score.total, 0);
    }

    #[test]
    fn test_score_turn_shorter_drawing_earns_larger_bonus() {
        let lean = engine().score_turn(&scored_turn(2, "#*#", &["cat"], 0));
        let bulky_drawing = "#".repeat(70);
        let bulky =
            engine().score_turn(&scored_turn(2, &bulky_drawing, &["cat"], 0));
        assert!(lean.bonus > bulky.bonus);
    }

    #[test]
    fn test_score_turn_bonus_zero_at_baseline() {
        // complexity 1 → baseline 40 ink glyphs.
        let at_baseline_drawing = "#".repeat(40);
        let score = engine()
            .score_turn(&scored_turn(1, &at_baseline_drawing, &["cat"], 0));
        assert_eq!(score.bonus, 0);
    }

    #[test]
    fn test_score_turn_higher_complexity_scores_higher() {
        let easy = engine().score_turn(&scored_turn(1, "#*#", &["cat"], 0));
        let hard = engine().score_turn(&scored_turn(5, "#*#", &["cat"], 0));
        assert!(hard.total > easy.total);
    }

    #[test]
    fn test_consistency_bonus_all_rounds_scored() {
        assert_eq!(engine().consistency_bonus(&[10, 5, 33]), 20);
    }

    #[test]
    fn test_consistency_bonus_withheld_on_zero_round() {
        assert_eq!(engine().consistency_bonus(&[10, 0, 33]), 0);
        assert_eq!(engine().consistency_bonus(&[]), 0);
    }

    #[test]
    fn test_scoring_config_default_weights() {
        let config = ScoringConfig::default();
        assert_eq!(config.base_points_per_complexity, 10);
        assert_eq!(config.first_attempt_bonus_percent, 50);
        assert_eq!(config.second_attempt_bonus_percent, 20);
        assert_eq!(config.invalid_submission_penalty, 2);
        assert_eq!(config.consistency_bonus, 20);
    }
}
