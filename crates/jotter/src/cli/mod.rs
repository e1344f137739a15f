//! # CLI Layer
//!
//! This module is **one possible UI client** for jotter, not the application
//! itself. It is the only place that knows about stdin/stdout, exit codes and
//! terminal formatting.
//!
//! ## Entry Points
//!
//! - `jotter` / `jotter shell`: an interactive session over the seeded notes.
//!   Reads one command per line, so it also works with piped input:
//!   `printf 'new\ntitle Plan\nshow\n' | jotter`.
//! - `jotter list`: print notes (optionally one folder, optionally JSON).
//! - `jotter render`: run the content renderer over a file or stdin.
//! - `jotter config`: print the effective configuration.
//!
//! Nothing is saved between runs; every process starts from the seed.
//!
//! ## Module Structure
//!
//! - `setup`: argument parsing via clap
//! - `commands`: top-level dispatch and logging setup
//! - `repl`: the shell loop and its command grammar
//! - `render`: output formatting (lists, trees, headers)
//! - `styles`: terminal styling constants

mod commands;
mod render;
mod repl;
pub mod setup;
mod styles;

pub use commands::run;
