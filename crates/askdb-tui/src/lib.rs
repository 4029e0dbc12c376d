//! askdb-tui: terminal UI for asking a database questions in plain language.

pub mod app;
mod highlight;
pub mod state;
pub mod ui;
mod worker;

pub use app::run;
pub use state::{AppMode, AppState, FocusTarget};
