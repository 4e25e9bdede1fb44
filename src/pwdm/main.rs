//! # Pwdm CLI
//!
//! The binary is intentionally thin: the CLI lives in `cli/`, and this file
//! only invokes `cli::run()` and turns an error into a message and exit code 1.
//!
//! - `cli/setup.rs`: clap argument parsing, including the short `-a/-g/-d/-v`
//!   flags
//! - `cli/commands.rs`: context wiring, logging setup and per-command handlers
//! - `cli/menu.rs`: the numbered interactive menu shown when no arguments are
//!   given
//! - `cli/prompt.rs`: line prompts on the terminal
//! - `cli/render.rs`: boxes, record listings and messages

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
