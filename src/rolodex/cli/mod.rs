//! # CLI Behavior
//!
//! One possible UI client for rolodex. The CLI is the only place that knows
//! about terminal I/O, exit codes and output formatting.
//!
//! ## Naked Execution (`rolodex`)
//!
//! Running `rolodex` with no arguments lists contacts.
//!
//! ## Data Directory
//!
//! First match wins:
//!
//! 1. `--data-dir <DIR>`
//! 2. `ROLODEX_HOME`
//! 3. The platform data directory (e.g. `~/.local/share/rolodex`)
//!
//! ## Logging
//!
//! Log records go to stderr. `RUST_LOG` overrides everything, `--verbose`
//! selects `debug`, otherwise the `log-level` config key applies.
//!
//! ## Module Structure
//!
//! - `commands`: Context setup and per-command handlers
//! - `render`: Output formatting (lists, details, messages)
//! - `setup`: Argument parsing via clap

mod commands;
mod render;
pub mod setup;

pub use commands::run;
