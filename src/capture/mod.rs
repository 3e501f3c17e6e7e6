//! Capture executor
//!
//! This module turns a crawl plan into screenshot artifacts:
//! - `browser`: the `BrowserSession` seam and its errors
//! - `chrome`: the headless Chromium implementation
//! - `decision`: continue-or-abort decisions after a failure
//! - `executor`: the sequential job loop and settle protocol
//! - `naming`: artifact file names
//! - `state`: run states

mod browser;
mod chrome;
mod compress;
mod decision;
mod executor;
mod naming;
mod state;

pub use browser::{BrowserError, BrowserSession, NavigationResponse};
pub use chrome::ChromeSession;
pub use compress::recompress_png;
pub use decision::{Decider, ScriptedDecider, TerminalDecider};
pub use executor::{run_capture, CaptureOptions, CaptureReport};
pub use naming::{artifact_file_name, INDEX_STEM};
pub use state::RunState;
