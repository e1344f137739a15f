//! # Storage Layer
//!
//! This module defines the storage abstraction for jotter. The [`DataStore`]
//! trait is the seam a durable backend plugs into; today the only
//! implementation keeps everything in process memory.
//!
//! ## Contract
//!
//! - **Copy-on-read**: every read returns owned values. Holding on to a
//!   returned `Vec` never aliases the store's internal state.
//! - **Absence is not an error**: lookups return `Ok(None)` and removals
//!   `Ok(false)` when nothing matches. `Err` is reserved for real backend
//!   failures (I/O, serialization).
//! - **Order**: notes are kept in insertion order. Saving an existing note
//!   replaces it in place.
//! - **Folders and tags** are read-only after seeding.
//!
//! ## Implementations
//!
//! - [`memory::InMemoryStore`]: ordered vectors seeded from a [`crate::seed::Seed`].
//!   Data is lost when the process exits.

use crate::error::Result;
use crate::model::{Folder, Note, NoteId, Tag};

pub mod memory;

/// Abstract interface for note storage.
pub trait DataStore {
    /// All notes in storage order.
    fn list_notes(&self) -> Result<Vec<Note>>;

    /// Point lookup by id.
    fn get_note(&self, id: &NoteId) -> Result<Option<Note>>;

    /// Save a note (replace in place if the id exists, append otherwise).
    fn save_note(&mut self, note: &Note) -> Result<()>;

    /// Remove a note. Returns whether anything was removed.
    fn remove_note(&mut self, id: &NoteId) -> Result<bool>;

    fn list_folders(&self) -> Result<Vec<Folder>>;

    fn list_tags(&self) -> Result<Vec<Tag>>;
}
