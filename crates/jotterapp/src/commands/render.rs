use crate::error::Result;
use crate::model::NoteId;
use crate::render::{ContentRenderer, Rendered};
use crate::store::DataStore;

/// Renders a stored note using its own format. `Ok(None)` for unknown ids.
pub fn run<S: DataStore>(
    store: &S,
    renderer: &ContentRenderer,
    id: &NoteId,
) -> Result<Option<Rendered>> {
    Ok(store.get_note(id)?.map(|note| renderer.render_note(&note)))
}
