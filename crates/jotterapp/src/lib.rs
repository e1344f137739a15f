//! # Jotter Architecture
//!
//! Jotter is a **UI-agnostic note-taking library**: notes with folders and
//! tags, Markdown or rich-text (HTML) content, and a renderer that turns
//! either into safe, highlighted HTML. The `jotter` binary is one client of
//! it; a web or desktop front end would be another.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Shell (shell.rs)                                           │
//! │  - Session state: active note, folder filter, drafts, mode  │
//! │  - Writes every draft change through to the API             │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands, owns store and renderer       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Pure business logic, no I/O assumptions                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - DataStore trait, InMemoryStore seeded from a Seed        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! The renderer ([`render`]) sits beside the command layer: commands hand it
//! notes, the shell hands it drafts.
//!
//! ## No Persistence
//!
//! Everything lives in process memory and is gone on exit. The
//! [`store::DataStore`] trait is where a durable backend would plug in.
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `shell.rs` inward, code takes Rust values and returns Rust values. It
//! never prints and never exits. The only exceptions are loading config and
//! seed files and the external editor, all of which are invoked explicitly
//! by the client.
//!
//! ## Testing Strategy
//!
//! 1. **Commands** (`commands/*.rs`): most unit tests live here.
//! 2. **API / Shell**: wiring and state transitions.
//! 3. **`tests/`**: end-to-end properties through `NotesApi<InMemoryStore>`.
//!
//! ## Module Overview
//!
//! - [`api`]: the facade, entry point for all operations
//! - [`commands`]: business logic for each operation
//! - [`store`]: storage abstraction and the in-memory store
//! - [`model`]: `Note`, `Folder`, `Tag`, `ContentFormat`
//! - [`seed`]: initial data for a store
//! - [`render`]: Markdown/HTML to sanitized, highlighted HTML
//! - [`shell`]: session state for interactive clients
//! - [`config`]: configuration management
//! - [`editor`]: external editor integration
//! - [`error`]: error types

pub mod api;
pub mod commands;
pub mod config;
pub mod editor;
pub mod error;
pub mod model;
pub mod render;
pub mod seed;
pub mod shell;
pub mod store;
