//! # CLI Behavior
//!
//! This is one possible UI client for pwdm. It is the only place that knows
//! about terminal I/O, exit codes and output formatting.
//!
//! ## Naked Execution (`pwdm`)
//!
//! Running `pwdm` with no arguments opens the numbered menu and loops until
//! `Q`. Errors inside the menu are printed and the loop goes on.
//!
//! ## Short Flags
//!
//! `pwdm -a`, `-g`, `-d` and `-v` run one operation and prompt for whatever
//! they need. They are mutually exclusive and cannot be mixed with a
//! subcommand.
//!
//! ## Subcommands
//!
//! Subcommands take their inputs as arguments, so they can be scripted:
//! `pwdm add github --length 20 --yes`, `pwdm get github --no-clip`.
//!
//! ## Module Structure
//!
//! - `commands`: Per-command handlers that call the API and print results
//! - `menu`: Interactive menu
//! - `prompt`: Terminal prompts
//! - `render`: Output formatting
//! - `setup`: Argument parsing via clap
//! - `styles`: Terminal styles

mod commands;
mod menu;
mod prompt;
mod render;
pub mod setup;
mod styles;

pub use commands::run;
