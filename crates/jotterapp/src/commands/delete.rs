use crate::error::Result;
use crate::model::NoteId;
use crate::store::DataStore;
use tracing::debug;

/// Removes a note. Returns `false` (and changes nothing) when the id is unknown.
pub fn run<S: DataStore>(store: &mut S, id: &NoteId) -> Result<bool> {
    let removed = store.remove_note(id)?;
    debug!(%id, removed, "Note delete");
    Ok(removed)
}
