use crate::error::Result;
use crate::model::{Note, NoteId};
use crate::store::DataStore;

/// Point lookup. A miss is `Ok(None)`, never an error.
pub fn run<S: DataStore>(store: &S, id: &NoteId) -> Result<Option<Note>> {
    store.get_note(id)
}
