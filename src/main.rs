use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    Terminal,
};
use std::{
    error::Error,
    io::{self, stdin},
};
use stroop::{
    app::{App, KeyOutcome},
    runtime::{Clock, CrosstermEventSource, FixedTicker, Runner, StroopEvent, SystemClock},
    ui,
};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// stroop color-word test with reaction time table and chart
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "Presents color words printed in clashing inks for a fixed-length session, records how fast and how accurately you name the ink, then shows your reaction times as a table and a chart.",
    after_help = ui::key_reference()
)]
pub struct Cli {}

fn main() -> Result<(), Box<dyn Error>> {
    let _cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::from_default_env())
        .init();

    enable_raw_mode()?;

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let mut app = App::new();
    let result = start_tui(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn start_tui<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> Result<(), Box<dyn Error>> {
    let clock = SystemClock;
    let runner = Runner::new(CrosstermEventSource::new(), FixedTicker::default());

    terminal.draw(|f| ui::draw(f, app, clock.now()))?;

    loop {
        match runner.step() {
            StroopEvent::Tick => {
                let was_finished = app.is_finished();
                app.on_tick(clock.now());
                // the results screen is static, only redraw on the transition into it
                if !was_finished || !app.is_finished() {
                    terminal.draw(|f| ui::draw(f, app, clock.now()))?;
                }
            }
            StroopEvent::Resize => {
                terminal.draw(|f| ui::draw(f, app, clock.now()))?;
            }
            StroopEvent::Key(key) => {
                if app.on_key(key, clock.now()) == KeyOutcome::Quit {
                    tracing::info!(state = app.state.name(), "quit");
                    break;
                }
                terminal.draw(|f| ui::draw(f, app, clock.now()))?;
            }
        }
    }

    Ok(())
}
