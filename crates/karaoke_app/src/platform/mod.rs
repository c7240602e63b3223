mod app;
pub mod config;
mod effects;
mod input;
pub mod logging;
mod render;
mod video;

pub use app::run_app;

use url::Url;

/// Page the session starts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StartPage {
    Upload,
    /// A result view link pasted on the command line.
    Result(Url),
}

/// Inputs to the page loop besides engine completions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Line(String),
    TypingTick,
    InputClosed,
}
