use super::NewNote;
use crate::error::Result;
use crate::model::{Note, DEFAULT_TITLE};
use crate::store::DataStore;
use tracing::debug;

/// Creates a note from partial fields and appends it to the store.
///
/// Defaults: an omitted or empty title becomes "Untitled", content becomes
/// empty, tags become empty, an omitted or empty folder becomes
/// `default_folder`. Without an explicit format the content is sniffed.
pub fn run<S: DataStore>(store: &mut S, new: NewNote, default_folder: &str) -> Result<Note> {
    let title = new
        .title
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| DEFAULT_TITLE.to_string());
    let folder_id = new
        .folder_id
        .filter(|f| !f.is_empty())
        .unwrap_or_else(|| default_folder.to_string());

    let mut note = Note::new(title, new.content.unwrap_or_default(), folder_id);
    note.tags = new.tags.unwrap_or_default();
    if let Some(format) = new.format {
        note.format = format;
    }

    store.save_note(&note)?;
    debug!(id = %note.id, title = %note.title, format = %note.format, "Note created");
    Ok(note)
}
