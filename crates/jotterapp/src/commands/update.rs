use super::NoteUpdate;
use crate::error::Result;
use crate::model::{Note, NoteId};
use crate::store::DataStore;
use tracing::debug;

/// Merges `update` over the stored note and saves it at its existing position.
///
/// Returns `Ok(None)` without touching storage when the id is unknown.
/// `updated_at` is refreshed even when no field changes.
pub fn run<S: DataStore>(store: &mut S, id: &NoteId, update: NoteUpdate) -> Result<Option<Note>> {
    let Some(note) = store.get_note(id)? else {
        debug!(%id, "Update skipped: note not found");
        return Ok(None);
    };

    let merged = apply(note, update);
    store.save_note(&merged)?;
    debug!(%id, title = %merged.title, "Note updated");
    Ok(Some(merged))
}

/// Structural merge: each `Some` field replaces the note's value, each `None`
/// keeps it. The id and `created_at` are never touched.
pub fn apply(mut note: Note, update: NoteUpdate) -> Note {
    let NoteUpdate {
        title,
        content,
        tags,
        folder_id,
        format,
    } = update;

    if let Some(title) = title {
        note.title = title;
    }
    if let Some(content) = content {
        note.content = content;
    }
    if let Some(tags) = tags {
        note.tags = tags;
    }
    if let Some(folder_id) = folder_id {
        note.folder_id = folder_id;
    }
    if let Some(format) = format {
        note.format = format;
    }
    note.touch();
    note
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::ContentFormat;
    use crate::store::memory::fixtures::StoreFixture;

    fn first(store: &impl DataStore) -> Note {
        store.list_notes().unwrap().remove(0)
    }

    #[test]
    fn title_only_preserves_other_fields() {
        let mut store = StoreFixture::sample().store;
        let before = first(&store);

        let after = run(&mut store, &before.id, NoteUpdate::new().title("X"))
            .unwrap()
            .unwrap();

        assert_eq!(after.title, "X");
        assert_eq!(after.content, before.content);
        assert_eq!(after.tags, before.tags);
        assert_eq!(after.folder_id, before.folder_id);
        assert_eq!(after.format, before.format);
        assert_eq!(after.created_at, before.created_at);
        assert!(after.updated_at >= before.updated_at);
    }

    #[test]
    fn keeps_position_in_storage() {
        let mut store = StoreFixture::new().with_notes(3, "1").store;
        let middle = store.list_notes().unwrap()[1].id.clone();

        run(&mut store, &middle, NoteUpdate::new().content("changed")).unwrap();

        let notes = store.list_notes().unwrap();
        assert_eq!(notes[1].id, middle);
        assert_eq!(notes[1].content, "changed");
    }

    #[test]
    fn unknown_id_is_absent_and_changes_nothing() {
        let mut store = StoreFixture::sample().store;
        let before = store.list_notes().unwrap();

        let result = run(&mut store, &NoteId::new(), NoteUpdate::new().title("X")).unwrap();

        assert!(result.is_none());
        assert_eq!(store.list_notes().unwrap(), before);
    }

    #[test]
    fn empty_update_still_refreshes_timestamp() {
        let mut store = StoreFixture::sample().store;
        let before = first(&store);

        let after = run(&mut store, &before.id, NoteUpdate::new())
            .unwrap()
            .unwrap();

        assert_eq!(after.title, before.title);
        assert!(after.updated_at >= before.updated_at);
        assert!(after.updated_at >= after.created_at);
    }

    #[test]
    fn empty_string_is_written() {
        let mut store = StoreFixture::sample().store;
        let id = first(&store).id;

        let after = run(&mut store, &id, NoteUpdate::new().title("").content(""))
            .unwrap()
            .unwrap();

        assert_eq!(after.title, "");
        assert_eq!(after.display_title(), "Untitled");
        assert_eq!(after.content, "");
    }

    #[test]
    fn content_change_keeps_declared_format() {
        let mut store = StoreFixture::new().with_note("M", "# md", "1").store;
        let id = first(&store).id;

        let after = run(&mut store, &id, NoteUpdate::new().content("a <b> c"))
            .unwrap()
            .unwrap();
        assert_eq!(after.format, ContentFormat::Markdown);

        let switched = run(&mut store, &id, NoteUpdate::new().format(ContentFormat::Html))
            .unwrap()
            .unwrap();
        assert_eq!(switched.format, ContentFormat::Html);
    }

    #[test]
    fn tags_and_folder_replace_wholesale() {
        let mut store = StoreFixture::sample().store;
        let id = first(&store).id;

        let after = run(
            &mut store,
            &id,
            NoteUpdate::new().tags(["2"]).folder("orphan-folder"),
        )
        .unwrap()
        .unwrap();

        assert_eq!(after.tags, vec!["2"]);
        assert_eq!(after.folder_id, "orphan-folder");
    }
}
