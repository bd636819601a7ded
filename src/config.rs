use std::time::Duration;

use crate::palette::Color;

/// Fixed parameters of a test session. These are constants, not user settings.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionConfig {
    pub session_duration: Duration,
    pub round_interval: Duration,
    pub countdown_secs: i64,
    pub words: Vec<Color>,
    pub inks: Vec<Color>,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            session_duration: Duration::from_secs(100),
            round_interval: Duration::from_secs(5),
            countdown_secs: 5,
            words: Color::ALL.to_vec(),
            inks: Color::ALL.to_vec(),
        }
    }
}

impl SessionConfig {
    /// Maximum number of trials a session may record
    pub fn trial_budget(&self) -> usize {
        let round = self.round_interval.as_millis();
        if round == 0 {
            return 0;
        }
        (self.session_duration.as_millis() / round) as usize
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_budget_is_duration_over_round_interval() {
        let cfg = SessionConfig::default();
        assert_eq!(cfg.session_duration, Duration::from_secs(100));
        assert_eq!(cfg.trial_budget(), 20);
    }

    #[test]
    fn budget_truncates_partial_rounds() {
        let cfg = SessionConfig {
            session_duration: Duration::from_secs(12),
            round_interval: Duration::from_secs(5),
            ..SessionConfig::default()
        };
        assert_eq!(cfg.trial_budget(), 2);
    }

    #[test]
    fn zero_round_interval_has_no_budget() {
        let cfg = SessionConfig {
            round_interval: Duration::ZERO,
            ..SessionConfig::default()
        };
        assert_eq!(cfg.trial_budget(), 0);
    }

    #[test]
    fn vocabularies_cover_every_color() {
        let cfg = SessionConfig::default();
        assert_eq!(cfg.words.len(), 7);
        assert_eq!(cfg.inks, cfg.words);
    }
}
