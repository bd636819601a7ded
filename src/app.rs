use std::time::Instant;

use chrono::Local;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::{rngs::StdRng, SeedableRng};

use crate::config::SessionConfig;
use crate::countdown::{Countdown, CountdownStep};
use crate::palette::Color;
use crate::results::Results;
use crate::session::Session;
use crate::trial::Trial;

/// Screens of a run, in the only order they can occur
#[derive(Debug)]
pub enum AppState {
    Instructions,
    Countdown(Countdown),
    Testing(Session),
    Finished(Results),
}

impl AppState {
    pub fn name(&self) -> &'static str {
        match self {
            AppState::Instructions => "instructions",
            AppState::Countdown(_) => "countdown",
            AppState::Testing(_) => "testing",
            AppState::Finished(_) => "finished",
        }
    }
}

/// Scroll position of the results table
#[derive(Debug, Default)]
pub struct ResultsView {
    pub scroll_offset: usize,
}

/// What the event loop should do after a key press
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    Continue,
    Quit,
}

#[derive(Debug)]
pub struct App {
    pub state: AppState,
    pub config: SessionConfig,
    pub results_view: ResultsView,
    seed: Option<u64>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            state: AppState::Instructions,
            config: SessionConfig::default(),
            results_view: ResultsView::default(),
            seed: None,
        }
    }

    /// App whose trial sequence is reproducible
    pub fn with_seed(config: SessionConfig, seed: u64) -> Self {
        Self {
            config,
            seed: Some(seed),
            ..Self::new()
        }
    }

    fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        }
    }

    fn transition(&mut self, next: AppState) {
        tracing::info!(from = self.state.name(), to = next.name(), "state transition");
        self.state = next;
    }

    /// Leave the instructions screen and start the countdown
    pub fn start(&mut self, now: Instant) -> bool {
        if !matches!(self.state, AppState::Instructions) {
            return false;
        }
        let countdown = Countdown::new(self.config.countdown_secs, now);
        self.transition(AppState::Countdown(countdown));
        true
    }

    /// Advance timers: countdown seconds and the session deadline
    pub fn on_tick(&mut self, now: Instant) {
        match &mut self.state {
            AppState::Countdown(countdown) => match countdown.on_tick(now) {
                CountdownStep::Waiting => {}
                CountdownStep::Show(remaining) => {
                    tracing::debug!(remaining, "countdown");
                }
                CountdownStep::Expired => {
                    let session = Session::start(&self.config, self.rng(), now, Local::now());
                    self.transition(AppState::Testing(session));
                }
            },
            AppState::Testing(session) => {
                if session.is_expired(now) {
                    let results = Results::from_session(session);
                    let elapsed = now.duration_since(session.started_at());
                    tracing::info!(
                        score = results.score(),
                        trials = results.trials().len(),
                        mean = ?results.mean_reaction_time(),
                        elapsed_ms = elapsed.as_millis() as u64,
                        "session finished"
                    );
                    self.transition(AppState::Finished(results));
                }
            }
            AppState::Instructions | AppState::Finished(_) => {}
        }
    }

    /// Record a color choice for the round on screen
    pub fn respond(&mut self, color: Color, now: Instant) -> Option<Trial> {
        match &mut self.state {
            AppState::Testing(session) => session.respond(color, now).copied(),
            _ => None,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, AppState::Finished(_))
    }

    pub fn results(&self) -> Option<&Results> {
        match &self.state {
            AppState::Finished(results) => Some(results),
            _ => None,
        }
    }

    pub fn scroll_results(&mut self, delta: isize) {
        let rows = self.results().map_or(0, |r| r.trials().len());
        let offset = self.results_view.scroll_offset as isize + delta;
        self.results_view.scroll_offset = offset.clamp(0, rows.saturating_sub(1) as isize) as usize;
    }

    pub fn on_key(&mut self, key: KeyEvent, now: Instant) -> KeyOutcome {
        if key.code == KeyCode::Esc
            || (key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c'))
        {
            return KeyOutcome::Quit;
        }

        match self.state {
            AppState::Instructions => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Char('s') | KeyCode::Char(' ')) {
                    self.start(now);
                }
            }
            AppState::Testing(_) => {
                if let KeyCode::Char(c) = key.code {
                    if let Some(color) = Color::from_key(c) {
                        self.respond(color, now);
                    }
                }
            }
            AppState::Finished(_) => match key.code {
                KeyCode::Up => self.scroll_results(-1),
                KeyCode::Down => self.scroll_results(1),
                KeyCode::PageUp => self.scroll_results(-10),
                KeyCode::PageDown => self.scroll_results(10),
                KeyCode::Home => self.results_view.scroll_offset = 0,
                _ => {}
            },
            AppState::Countdown(_) => {}
        }
        KeyOutcome::Continue
    }
}
