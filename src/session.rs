use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use rand::rngs::StdRng;

use crate::config::SessionConfig;
use crate::palette::Color;
use crate::trial::{PendingTrial, Trial, TrialGenerator};

/// One timed run of the test: the scored, append-only trial log plus the
/// round currently on screen.
#[derive(Debug)]
pub struct Session {
    score: usize,
    trials: Vec<Trial>,
    current: Option<PendingTrial>,
    budget: usize,
    started_at: Instant,
    started_local: DateTime<Local>,
    deadline: Instant,
    generator: TrialGenerator<StdRng>,
}

impl Session {
    /// Start the session clock at `now` and present the first round.
    /// `started_local` is the wall-clock stamp shown on the results screen.
    pub fn start(
        config: &SessionConfig,
        rng: StdRng,
        now: Instant,
        started_local: DateTime<Local>,
    ) -> Self {
        let mut session = Self {
            score: 0,
            trials: Vec::new(),
            current: None,
            budget: config.trial_budget(),
            started_at: now,
            started_local,
            deadline: now + config.session_duration,
            generator: TrialGenerator::new(config.words.clone(), config.inks.clone(), rng),
        };
        session.next_round(now);
        session
    }

    fn next_round(&mut self, now: Instant) {
        self.current = if self.trials.len() < self.budget {
            self.generator
                .next_stimulus()
                .map(|stimulus| PendingTrial {
                    index: self.trials.len() + 1,
                    stimulus,
                    presented_at: now,
                })
        } else {
            None
        };

        match &self.current {
            Some(p) => tracing::debug!(
                index = p.index,
                word = %p.stimulus.word,
                ink = %p.stimulus.ink,
                "presented round"
            ),
            None => tracing::debug!(budget = self.budget, "trial budget exhausted"),
        }
    }

    /// Record the participant's answer for the round on screen and present
    /// the next one. Returns the recorded trial, or None when there was
    /// nothing to answer or the deadline has passed.
    pub fn respond(&mut self, response: Color, now: Instant) -> Option<&Trial> {
        if self.is_expired(now) {
            return None;
        }
        let pending = self.current.take()?;
        let trial = pending.answer(response, now);
        if trial.correct {
            self.score += 1;
        }
        tracing::debug!(
            index = trial.index,
            response = %response,
            correct = trial.correct,
            reaction_ms = trial.reaction_time.as_millis() as u64,
            "recorded response"
        );
        self.trials.push(trial);
        self.next_round(now);
        self.trials.last()
    }

    pub fn score(&self) -> usize {
        self.score
    }

    pub fn trials(&self) -> &[Trial] {
        &self.trials
    }

    pub fn current(&self) -> Option<&PendingTrial> {
        self.current.as_ref()
    }

    pub fn budget(&self) -> usize {
        self.budget
    }

    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    pub fn started_local(&self) -> DateTime<Local> {
        self.started_local
    }

    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.deadline
    }

    pub fn remaining(&self, now: Instant) -> Duration {
        self.deadline.saturating_duration_since(now)
    }

    pub fn budget_exhausted(&self) -> bool {
        self.trials.len() >= self.budget
    }
}
