//! # CLI
//!
//! One possible client of the propflow library: it loads a manifest,
//! renders components, replays reducers and manages project config. The
//! CLI is the only layer that knows about stdout, stderr, exit codes and
//! terminal styling.
//!
//! - `setup`: clap argument definitions
//! - `commands`: context setup and per-command handlers calling the API
//! - `render`: turning a `CmdResult` into terminal output
//! - `logging`: tracing subscriber initialization
//! - `styles`: terminal styles for messages and listings

mod commands;
mod logging;
mod render;
pub mod setup;
mod styles;

pub use commands::run;
