//! # Application Shell
//!
//! [`Session`] is the UI-independent half of the application shell: it owns
//! the [`NotesApi`] and every piece of session state a front end needs to
//! draw itself.
//!
//! ## State
//!
//! - cached `notes`, `folders` and `tags`, re-read after every mutation
//! - the active note and the active folder filter
//! - draft `title` and `content`, copies of the active note's fields
//! - the [`ViewMode`]
//!
//! ## Edits Are Written Through
//!
//! There is no dirty state. Every draft change (`set_title`, `set_content`,
//! ...) is pushed to the store immediately and the cache is refreshed, so the
//! cached list always matches storage.
//!
//! ## Folder Filter
//!
//! Selecting a folder only changes what [`Session::visible_notes`] returns.
//! Notes are never moved or rescoped by it.

use crate::api::NotesApi;
use crate::commands::{list, NewNote, NoteUpdate};
use crate::error::{JotterError, Result};
use crate::model::{ContentFormat, Folder, FolderId, Note, NoteId, Tag, TagId, DEFAULT_TITLE};
use crate::render::Rendered;
use crate::store::DataStore;
use serde::Serialize;
use tracing::debug;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Edit,
    #[default]
    Preview,
}

impl ViewMode {
    pub fn toggled(self) -> Self {
        match self {
            ViewMode::Edit => ViewMode::Preview,
            ViewMode::Preview => ViewMode::Edit,
        }
    }
}

pub struct Session<S: DataStore> {
    api: NotesApi<S>,
    notes: Vec<Note>,
    folders: Vec<Folder>,
    tags: Vec<Tag>,
    active_note_id: Option<NoteId>,
    active_folder_id: Option<FolderId>,
    title: String,
    content: String,
    view_mode: ViewMode,
}

impl<S: DataStore> Session<S> {
    /// Starts a session and loads the initial lists.
    pub fn new(api: NotesApi<S>) -> Result<Self> {
        let mut session = Self {
            api,
            notes: Vec::new(),
            folders: Vec::new(),
            tags: Vec::new(),
            active_note_id: None,
            active_folder_id: None,
            title: String::new(),
            content: String::new(),
            view_mode: ViewMode::default(),
        };
        session.refresh()?;
        Ok(session)
    }

    /// Re-reads notes, folders and tags from the store.
    pub fn refresh(&mut self) -> Result<()> {
        self.notes = self.api.list_notes()?;
        self.folders = self.api.list_folders()?;
        self.tags = self.api.list_tags()?;
        Ok(())
    }

    /// Makes `id` the active note and loads its fields into the drafts.
    /// An unknown id returns `false` and leaves the session as it was.
    pub fn select_note(&mut self, id: &NoteId) -> Result<bool> {
        match self.api.get_note(id)? {
            Some(note) => {
                self.load(&note);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Sets the folder filter. `None` shows every note.
    pub fn select_folder(&mut self, folder: Option<FolderId>) {
        debug!(folder = ?folder, "Folder filter changed");
        self.active_folder_id = folder;
    }

    /// Creates an empty note in the active folder (or the default folder),
    /// selects it and switches to edit mode.
    pub fn create_note(&mut self) -> Result<Note> {
        let folder = self
            .active_folder_id
            .clone()
            .unwrap_or_else(|| self.api.default_folder().to_string());
        let note = self.api.create_note(
            NewNote::new()
                .title(DEFAULT_TITLE)
                .content("")
                .folder(folder),
        )?;
        self.refresh()?;
        self.load(&note);
        self.view_mode = ViewMode::Edit;
        Ok(note)
    }

    pub fn set_title(&mut self, title: impl Into<String>) -> Result<Note> {
        let title = title.into();
        self.write(NoteUpdate::new().title(title))
    }

    pub fn set_content(&mut self, content: impl Into<String>) -> Result<Note> {
        let content = content.into();
        self.write(NoteUpdate::new().content(content))
    }

    pub fn set_format(&mut self, format: ContentFormat) -> Result<Note> {
        self.write(NoteUpdate::new().format(format))
    }

    pub fn set_tags(&mut self, tags: Vec<TagId>) -> Result<Note> {
        self.write(NoteUpdate::new().tags(tags))
    }

    /// Moves the active note. The folder filter is left alone, so the note
    /// may drop out of [`Session::visible_notes`].
    pub fn move_to_folder(&mut self, folder: impl Into<FolderId>) -> Result<Note> {
        self.write(NoteUpdate::new().folder(folder))
    }

    /// Deletes the active note and clears the selection and drafts.
    pub fn delete_active(&mut self) -> Result<bool> {
        let id = self
            .active_note_id
            .clone()
            .ok_or(JotterError::NoActiveNote)?;
        let removed = self.api.delete_note(&id)?;
        self.clear_selection();
        self.refresh()?;
        Ok(removed)
    }

    pub fn toggle_view_mode(&mut self) -> ViewMode {
        self.view_mode = self.view_mode.toggled();
        self.view_mode
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    /// Notes passing the folder filter, in storage order.
    pub fn visible_notes(&self) -> Vec<Note> {
        list::in_folder(&self.notes, self.active_folder_id.as_deref())
    }

    /// Renders the drafts with the active note's format.
    pub fn preview(&self) -> Option<Rendered> {
        let note = self.active_note()?;
        Some(self.api.render_content(&self.content, Some(note.format)))
    }

    pub fn active_note(&self) -> Option<&Note> {
        let id = self.active_note_id.as_ref()?;
        self.notes.iter().find(|n| n.id == *id)
    }

    /// Display names of the active note's tags.
    pub fn active_tag_names(&self) -> Vec<String> {
        self.active_note()
            .map(|note| list::tag_names(note, &self.tags))
            .unwrap_or_default()
    }

    pub fn notes(&self) -> &[Note] {
        &self.notes
    }

    pub fn folders(&self) -> &[Folder] {
        &self.folders
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub fn active_note_id(&self) -> Option<&NoteId> {
        self.active_note_id.as_ref()
    }

    pub fn active_folder_id(&self) -> Option<&str> {
        self.active_folder_id.as_deref()
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn api(&self) -> &NotesApi<S> {
        &self.api
    }

    fn write(&mut self, update: NoteUpdate) -> Result<Note> {
        let id = self
            .active_note_id
            .clone()
            .ok_or(JotterError::NoActiveNote)?;
        match self.api.update_note(&id, update)? {
            Some(note) => {
                self.refresh()?;
                self.load(&note);
                Ok(note)
            }
            None => {
                // Removed behind the session's back.
                self.clear_selection();
                self.refresh()?;
                Err(JotterError::NoActiveNote)
            }
        }
    }

    fn load(&mut self, note: &Note) {
        self.active_note_id = Some(note.id.clone());
        self.title = note.title.clone();
        self.content = note.content.clone();
    }

    fn clear_selection(&mut self) {
        self.active_note_id = None;
        self.title.clear();
        self.content.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::ContentRenderer;
    use crate::store::memory::fixtures::StoreFixture;
    use crate::store::memory::InMemoryStore;

    fn session() -> Session<InMemoryStore> {
        let api = NotesApi::new(StoreFixture::sample().store, ContentRenderer::default(), "1");
        Session::new(api).unwrap()
    }

    #[test]
    fn starts_with_cached_lists_and_no_selection() {
        let s = session();
        assert_eq!(s.notes().len(), 2);
        assert_eq!(s.folders().len(), 3);
        assert_eq!(s.tags().len(), 3);
        assert!(s.active_note_id().is_none());
        assert_eq!(s.view_mode(), ViewMode::Preview);
        assert!(s.preview().is_none());
    }

    #[test]
    fn select_loads_drafts() {
        let mut s = session();
        let work = s.notes()[1].clone();

        assert!(s.select_note(&work.id).unwrap());
        assert_eq!(s.active_note_id(), Some(&work.id));
        assert_eq!(s.title(), "Work Tasks");
        assert_eq!(s.content(), work.content);
        assert_eq!(s.active_tag_names(), vec!["important", "todo"]);
    }

    #[test]
    fn select_unknown_keeps_state() {
        let mut s = session();
        let first = s.notes()[0].id.clone();
        s.select_note(&first).unwrap();

        assert!(!s.select_note(&NoteId::new()).unwrap());
        assert_eq!(s.active_note_id(), Some(&first));
        assert_eq!(s.title(), "Welcome Note");
    }

    #[test]
    fn create_selects_new_note_in_edit_mode() {
        let mut s = session();
        s.select_folder(Some("2".into()));

        let note = s.create_note().unwrap();

        assert_eq!(note.title, "Untitled");
        assert_eq!(note.content, "");
        assert_eq!(note.folder_id, "2");
        assert_eq!(s.active_note_id(), Some(&note.id));
        assert_eq!(s.view_mode(), ViewMode::Edit);
        assert_eq!(s.notes().len(), 3);
        assert_eq!(s.notes()[2].id, note.id);
    }

    #[test]
    fn create_without_folder_uses_default() {
        let mut s = session();
        let note = s.create_note().unwrap();
        assert_eq!(note.folder_id, "1");
    }

    #[test]
    fn edits_are_written_through() {
        let mut s = session();
        let id = s.notes()[0].id.clone();
        s.select_note(&id).unwrap();

        s.set_title("Renamed").unwrap();
        s.set_content("# New body").unwrap();

        assert_eq!(s.title(), "Renamed");
        assert_eq!(s.notes()[0].title, "Renamed");
        let stored = s.api().get_note(&id).unwrap().unwrap();
        assert_eq!(stored.title, "Renamed");
        assert_eq!(stored.content, "# New body");
    }

    #[test]
    fn edits_without_selection_are_rejected() {
        let mut s = session();
        assert!(matches!(s.set_title("x"), Err(JotterError::NoActiveNote)));
        assert!(matches!(s.delete_active(), Err(JotterError::NoActiveNote)));
    }

    #[test]
    fn folder_filter_only_changes_visibility() {
        let mut s = session();
        s.select_folder(Some("2".into()));
        let visible: Vec<_> = s.visible_notes().into_iter().map(|n| n.title).collect();
        assert_eq!(visible, vec!["Work Tasks"]);
        assert_eq!(s.notes().len(), 2);

        s.select_folder(Some("3".into()));
        assert!(s.visible_notes().is_empty());

        s.select_folder(None);
        assert_eq!(s.visible_notes().len(), 2);
    }

    #[test]
    fn moving_out_of_filtered_folder_hides_note() {
        let mut s = session();
        s.select_folder(Some("1".into()));
        let id = s.visible_notes()[0].id.clone();
        s.select_note(&id).unwrap();

        s.move_to_folder("3").unwrap();

        assert!(s.visible_notes().is_empty());
        assert_eq!(s.active_note().unwrap().folder_id, "3");
    }

    #[test]
    fn delete_clears_selection() {
        let mut s = session();
        let id = s.notes()[0].id.clone();
        s.select_note(&id).unwrap();

        assert!(s.delete_active().unwrap());
        assert!(s.active_note_id().is_none());
        assert_eq!(s.title(), "");
        assert_eq!(s.notes().len(), 1);
    }

    #[test]
    fn toggle_view_mode() {
        let mut s = session();
        assert_eq!(s.toggle_view_mode(), ViewMode::Edit);
        assert_eq!(s.toggle_view_mode(), ViewMode::Preview);
        s.set_view_mode(ViewMode::Edit);
        assert_eq!(s.view_mode(), ViewMode::Edit);
    }

    #[test]
    fn preview_uses_note_format() {
        let mut s = session();
        let id = s.notes()[0].id.clone();
        s.select_note(&id).unwrap();
        s.set_content("I <3 rust\n\n> and **this**").unwrap();

        let preview = s.preview().unwrap();
        assert_eq!(preview.format, ContentFormat::Markdown);
        assert!(preview.html.contains("<strong>this</strong>"));

        s.set_format(ContentFormat::Html).unwrap();
        assert_eq!(s.preview().unwrap().format, ContentFormat::Html);
    }

    #[test]
    fn set_tags_replaces_list() {
        let mut s = session();
        let id = s.notes()[0].id.clone();
        s.select_note(&id).unwrap();
        s.set_tags(vec!["2".into(), "missing".into()]).unwrap();
        assert_eq!(s.active_tag_names(), vec!["todo"]);
    }
}
