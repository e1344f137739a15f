//! # API Facade
//!
//! The API layer is a **thin facade** over the command layer. It is the single
//! entry point for every jotter operation, whichever UI drives it (the shell
//! [`Session`](crate::shell::Session), the one-shot CLI commands, tests).
//!
//! ## Role and Responsibilities
//!
//! The API facade:
//! - **Dispatches** to the appropriate command function
//! - **Owns** the store and the renderer, so callers never hold either directly
//! - **Returns structured types** (`Note`, `Rendered`, ...), never strings
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: that belongs in `commands/*.rs`
//! - **I/O**: no stdout, no terminal formatting
//! - **Session state**: active note, drafts and view mode live in the shell
//!
//! ## Generic Over DataStore
//!
//! `NotesApi<S: DataStore>` is generic over the storage backend. The only
//! backend today is [`InMemoryStore`]; a durable store plugs in here without
//! touching the callers.
//!
//! ## Testing Strategy
//!
//! API tests check wiring (the right command gets the right arguments).
//! Command semantics are tested in the command modules, end-to-end properties
//! in `tests/`.

use crate::commands::{self, list::FolderNode, NewNote, NoteUpdate};
use crate::config::JotterConfig;
use crate::error::Result;
use crate::model::{ContentFormat, Folder, FolderId, Note, NoteId, Tag};
use crate::render::{ContentRenderer, RenderOptions, Rendered};
use crate::store::memory::InMemoryStore;
use crate::store::DataStore;
use tracing::info;

/// The main API facade for jotter operations.
pub struct NotesApi<S: DataStore> {
    store: S,
    renderer: ContentRenderer,
    default_folder: FolderId,
}

impl<S: DataStore> NotesApi<S> {
    pub fn new(store: S, renderer: ContentRenderer, default_folder: impl Into<FolderId>) -> Self {
        Self {
            store,
            renderer,
            default_folder: default_folder.into(),
        }
    }

    /// Wraps an existing store with renderer and defaults taken from `config`.
    pub fn with_config(store: S, config: &JotterConfig) -> Self {
        Self::new(
            store,
            ContentRenderer::new(RenderOptions::from(&config.render)),
            config.default_folder.clone(),
        )
    }

    pub fn list_notes(&self) -> Result<Vec<Note>> {
        commands::list::notes(&self.store)
    }

    pub fn get_note(&self, id: &NoteId) -> Result<Option<Note>> {
        commands::get::run(&self.store, id)
    }

    pub fn create_note(&mut self, new: NewNote) -> Result<Note> {
        commands::create::run(&mut self.store, new, &self.default_folder)
    }

    pub fn update_note(&mut self, id: &NoteId, update: NoteUpdate) -> Result<Option<Note>> {
        commands::update::run(&mut self.store, id, update)
    }

    pub fn delete_note(&mut self, id: &NoteId) -> Result<bool> {
        commands::delete::run(&mut self.store, id)
    }

    pub fn list_folders(&self) -> Result<Vec<Folder>> {
        commands::list::folders(&self.store)
    }

    pub fn list_tags(&self) -> Result<Vec<Tag>> {
        commands::list::tags(&self.store)
    }

    /// Notes owned by `folder`; every note for `None`.
    pub fn notes_in_folder(&self, folder: Option<&str>) -> Result<Vec<Note>> {
        let notes = commands::list::notes(&self.store)?;
        Ok(commands::list::in_folder(&notes, folder))
    }

    pub fn tag_names(&self, note: &Note) -> Result<Vec<String>> {
        let tags = commands::list::tags(&self.store)?;
        Ok(commands::list::tag_names(note, &tags))
    }

    pub fn folder_tree(&self) -> Result<Vec<FolderNode>> {
        let folders = commands::list::folders(&self.store)?;
        Ok(commands::list::folder_tree(&folders))
    }

    pub fn render_note(&self, id: &NoteId) -> Result<Option<Rendered>> {
        commands::render::run(&self.store, &self.renderer, id)
    }

    /// Renders content that is not (yet) stored. `None` sniffs the format.
    pub fn render_content(&self, content: &str, format: Option<ContentFormat>) -> Rendered {
        match format {
            Some(format) => self.renderer.render_as(content, format),
            None => self.renderer.render(content),
        }
    }

    pub fn renderer(&self) -> &ContentRenderer {
        &self.renderer
    }

    pub fn default_folder(&self) -> &str {
        &self.default_folder
    }
}

impl NotesApi<InMemoryStore> {
    /// Builds an in-memory API seeded from `config.seed_file`, or from the
    /// sample data when no seed file is configured.
    pub fn from_config(config: &JotterConfig) -> Result<Self> {
        let seed = config.seed()?;
        info!(
            notes = seed.notes.len(),
            seed_file = ?config.seed_file,
            "Starting in-memory session"
        );
        Ok(Self::with_config(InMemoryStore::from_seed(seed), config))
    }
}
