use std::cell::Cell;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::{Duration, Instant};

use crossterm::event::{self, Event as CtEvent, KeyEvent};

/// Milliseconds the runner waits for input before it emits a tick
pub const TICK_RATE_MS: u64 = 100;

/// Input and timer events the app reacts to
#[derive(Clone, Debug)]
pub enum StroopEvent {
    Key(KeyEvent),
    Resize,
    Tick,
}

pub trait StroopEventSource: Send + 'static {
    /// Next pending event, or an error once `timeout` elapses without one
    fn recv_timeout(&self, timeout: Duration) -> Result<StroopEvent, RecvTimeoutError>;
}

/// Keep key presses and resizes; mouse, focus and paste events never reach the app
fn translate(ev: CtEvent) -> Option<StroopEvent> {
    match ev {
        CtEvent::Key(key) => Some(StroopEvent::Key(key)),
        CtEvent::Resize(..) => Some(StroopEvent::Resize),
        _ => None,
    }
}

/// Reads the real terminal on a background thread
pub struct CrosstermEventSource {
    rx: Receiver<StroopEvent>,
}

impl CrosstermEventSource {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();

        std::thread::spawn(move || loop {
            let ev = match event::read() {
                Ok(ev) => ev,
                Err(err) => {
                    tracing::warn!(error = %err, "terminal event reader stopped");
                    break;
                }
            };
            let Some(ev) = translate(ev) else { continue };
            if tx.send(ev).is_err() {
                break;
            }
        });

        Self { rx }
    }
}

impl Default for CrosstermEventSource {
    fn default() -> Self {
        Self::new()
    }
}

impl StroopEventSource for CrosstermEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<StroopEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

pub trait Ticker: Send + Sync + 'static {
    fn interval(&self) -> Duration;
}

#[derive(Clone, Copy, Debug)]
pub struct FixedTicker {
    interval: Duration,
}

impl FixedTicker {
    pub fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl Default for FixedTicker {
    fn default() -> Self {
        Self::new(Duration::from_millis(TICK_RATE_MS))
    }
}

impl Ticker for FixedTicker {
    fn interval(&self) -> Duration {
        self.interval
    }
}

/// Event source fed from a channel, for headless tests
pub struct TestEventSource {
    rx: Receiver<StroopEvent>,
}

impl TestEventSource {
    pub fn new(rx: Receiver<StroopEvent>) -> Self {
        Self { rx }
    }
}

impl StroopEventSource for TestEventSource {
    fn recv_timeout(&self, timeout: Duration) -> Result<StroopEvent, RecvTimeoutError> {
        self.rx.recv_timeout(timeout)
    }
}

/// Source of the current time for reaction times and deadlines
pub trait Clock {
    fn now(&self) -> Instant;
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to
#[derive(Debug)]
pub struct ManualClock {
    now: Cell<Instant>,
}

impl ManualClock {
    pub fn new(start: Instant) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.now.set(self.now.get() + by);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(Instant::now())
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.now.get()
    }
}

/// Turns an event source and a tick interval into a single event stream
pub struct Runner<E: StroopEventSource, T: Ticker> {
    event_source: E,
    ticker: T,
}

impl<E: StroopEventSource, T: Ticker> Runner<E, T> {
    pub fn new(event_source: E, ticker: T) -> Self {
        Self {
            event_source,
            ticker,
        }
    }

    /// Waits one tick interval for input. A quiet or closed source yields Tick.
    pub fn step(&self) -> StroopEvent {
        match self.event_source.recv_timeout(self.ticker.interval()) {
            Ok(ev) => ev,
            Err(RecvTimeoutError::Timeout) | Err(RecvTimeoutError::Disconnected) => {
                StroopEvent::Tick
            }
        }
    }
}
