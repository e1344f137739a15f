//! # Jotter CLI
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/` and this file
//! only invokes `cli::run()` and handles process termination.
//!
//! ## Workspace Structure
//!
//! - `crates/jotterapp/`: UI-agnostic library (store, renderer, session)
//! - `crates/jotter/`: this terminal client
//!
//! ## Layering
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/jotter/src/cli/)                         │
//! │  - clap parsing (setup.rs), dispatch (commands.rs)          │
//! │  - interactive shell loop (repl.rs)                         │
//! │  - terminal formatting (render.rs, styles.rs)               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  jotterapp: Session → NotesApi → commands → DataStore       │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything in `jotterapp` is free of terminal I/O. The CLI owns argument
//! parsing, logging setup, printing and exit codes.
//!
//! ## Testing Approach
//!
//! - Shell commands are unit tested in `cli/repl.rs` against an in-memory
//!   session with captured output.
//! - `tests/cli_e2e.rs` runs the built binary with `assert_cmd`.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
