//! Match configuration.

use serde::{Deserialize, Serialize};

/// Configuration for a game session.
///
/// Hosts can override these when creating a session; the defaults give
/// the standard three-round match. Scoring weights live separately on
/// [`ScoringConfig`](crate::ScoringConfig).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Rounds per match. The standard match is exactly 3; every
    /// three-round invariant in the engine is stated against this
    /// default.
    pub rounds_per_match: u32,

    /// Guess attempts allowed per turn before it is exhausted.
    pub max_guess_attempts: u32,

    /// Extra catalog lookups attempted after a transient failure before
    /// the session gives up and aborts. An exhausted catalog is never
    /// retried — that failure is final by definition.
    pub catalog_retries: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            rounds_per_match: 3,
            max_guess_attempts: 5,
            catalog_retries: 2,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_game_config_default() {
        let config = GameConfig::default();
        assert_eq!(config.rounds_per_match, 3);
        assert_eq!(config.max_guess_attempts, 5);
        assert_eq!(config.catalog_retries, 2);
    }
}
