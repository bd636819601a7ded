// Library surface for headless/integration tests; main.rs only owns the terminal.
pub mod app;
pub mod config;
pub mod countdown;
pub mod palette;
pub mod results;
pub mod runtime;
pub mod session;
pub mod time_series;
pub mod trial;
pub mod ui;
pub mod util;
