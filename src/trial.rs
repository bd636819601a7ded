use std::time::{Duration, Instant};

use rand::{seq::SliceRandom, Rng};

use crate::palette::Color;

/// A color word printed in some ink
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Stimulus {
    pub word: Color,
    pub ink: Color,
}

impl Stimulus {
    pub fn new(word: Color, ink: Color) -> Self {
        Self { word, ink }
    }

    pub fn is_congruent(&self) -> bool {
        self.word == self.ink
    }
}

/// A round that has been presented but not yet answered
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PendingTrial {
    pub index: usize,
    pub stimulus: Stimulus,
    pub presented_at: Instant,
}

impl PendingTrial {
    /// Complete the round with the participant's answer
    pub fn answer(self, response: Color, now: Instant) -> Trial {
        let reaction_time = now.saturating_duration_since(self.presented_at);
        Trial {
            index: self.index,
            stimulus: self.stimulus,
            response,
            reaction_time,
            correct: response == self.stimulus.ink,
        }
    }
}

/// One completed presentation-and-response cycle
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Trial {
    /// 1-based position in the session log
    pub index: usize,
    pub stimulus: Stimulus,
    pub response: Color,
    pub reaction_time: Duration,
    pub correct: bool,
}

impl Trial {
    pub fn reaction_secs(&self) -> f64 {
        self.reaction_time.as_secs_f64()
    }
}

/// Draws word and ink independently and uniformly from fixed vocabularies.
/// Consecutive trials may repeat the same pair.
#[derive(Debug)]
pub struct TrialGenerator<R: Rng> {
    words: Vec<Color>,
    inks: Vec<Color>,
    rng: R,
}

impl<R: Rng> TrialGenerator<R> {
    pub fn new(words: Vec<Color>, inks: Vec<Color>, rng: R) -> Self {
        Self { words, inks, rng }
    }

    pub fn next_stimulus(&mut self) -> Option<Stimulus> {
        let word = *self.words.choose(&mut self.rng)?;
        let ink = *self.inks.choose(&mut self.rng)?;
        Some(Stimulus { word, ink })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::HashSet;

    fn generator(seed: u64) -> TrialGenerator<StdRng> {
        TrialGenerator::new(
            Color::ALL.to_vec(),
            Color::ALL.to_vec(),
            StdRng::seed_from_u64(seed),
        )
    }

    #[test]
    fn test_congruence() {
        assert!(Stimulus::new(Color::Red, Color::Red).is_congruent());
        assert!(!Stimulus::new(Color::Red, Color::Blue).is_congruent());
    }

    #[test]
    fn test_answer_marks_correct_by_ink_not_word() {
        let t0 = Instant::now();
        let pending = PendingTrial {
            index: 1,
            stimulus: Stimulus::new(Color::Green, Color::Purple),
            presented_at: t0,
        };

        let trial = pending.answer(Color::Purple, t0 + Duration::from_millis(640));
        assert!(trial.correct);
        assert_eq!(trial.reaction_time, Duration::from_millis(640));

        let trial = pending.answer(Color::Green, t0 + Duration::from_millis(640));
        assert!(!trial.correct);
    }

    #[test]
    fn test_answer_before_presentation_clamps_to_zero() {
        let t0 = Instant::now() + Duration::from_secs(1);
        let pending = PendingTrial {
            index: 1,
            stimulus: Stimulus::new(Color::Red, Color::Red),
            presented_at: t0,
        };
        let trial = pending.answer(Color::Red, t0 - Duration::from_millis(10));
        assert_eq!(trial.reaction_time, Duration::ZERO);
        assert!(trial.reaction_secs() >= 0.0);
    }

    #[test]
    fn test_generator_draws_from_vocabulary() {
        let mut gen = generator(7);
        for _ in 0..200 {
            let s = gen.next_stimulus().unwrap();
            assert!(Color::ALL.contains(&s.word));
            assert!(Color::ALL.contains(&s.ink));
        }
    }

    #[test]
    fn test_generator_produces_both_congruent_and_incongruent() {
        let mut gen = generator(42);
        let draws: Vec<Stimulus> = (0..500).filter_map(|_| gen.next_stimulus()).collect();
        assert!(draws.iter().any(|s| s.is_congruent()));
        assert!(draws.iter().any(|s| !s.is_congruent()));

        let inks: HashSet<Color> = draws.iter().map(|s| s.ink).collect();
        assert_eq!(inks.len(), Color::ALL.len());
    }

    #[test]
    fn test_generator_allows_immediate_repeats() {
        let mut gen = TrialGenerator::new(
            vec![Color::Blue],
            vec![Color::Blue],
            StdRng::seed_from_u64(1),
        );
        let a = gen.next_stimulus();
        let b = gen.next_stimulus();
        assert_eq!(a, b);
    }

    #[test]
    fn test_generator_with_empty_vocabulary() {
        let mut gen = TrialGenerator::new(vec![], Color::ALL.to_vec(), StdRng::seed_from_u64(1));
        assert_eq!(gen.next_stimulus(), None);
    }
}
