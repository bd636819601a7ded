use std::time::Instant;

use ratatui::{buffer::Buffer, layout::Rect};

use crate::app::{App, AppState};
use crate::ui::{render_countdown, render_instructions, render_results, render_test};

/// A UI Screen boundary: one per stage of the run
pub trait Screen {
    fn render(&self, app: &App, now: Instant, area: Rect, buf: &mut Buffer);
}

pub struct InstructionsScreen;

impl Screen for InstructionsScreen {
    fn render(&self, _app: &App, _now: Instant, area: Rect, buf: &mut Buffer) {
        render_instructions(area, buf);
    }
}

pub struct CountdownScreen;

impl Screen for CountdownScreen {
    fn render(&self, app: &App, _now: Instant, area: Rect, buf: &mut Buffer) {
        if let AppState::Countdown(countdown) = &app.state {
            render_countdown(countdown.remaining(), area, buf);
        }
    }
}

pub struct TestScreen;

impl Screen for TestScreen {
    fn render(&self, app: &App, now: Instant, area: Rect, buf: &mut Buffer) {
        if let AppState::Testing(session) = &app.state {
            render_test(session, now, area, buf);
        }
    }
}

pub struct ResultsScreen;

impl Screen for ResultsScreen {
    fn render(&self, app: &App, _now: Instant, area: Rect, buf: &mut Buffer) {
        if let AppState::Finished(results) = &app.state {
            render_results(results, &app.results_view, area, buf);
        }
    }
}

/// Helper to construct the appropriate screen for the current state
pub fn current_screen(state: &AppState) -> Box<dyn Screen> {
    match state {
        AppState::Instructions => Box::new(InstructionsScreen),
        AppState::Countdown(_) => Box::new(CountdownScreen),
        AppState::Testing(_) => Box::new(TestScreen),
        AppState::Finished(_) => Box::new(ResultsScreen),
    }
}
