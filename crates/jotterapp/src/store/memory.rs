use super::DataStore;
use crate::error::Result;
use crate::model::{Folder, Note, NoteId, Tag};
use crate::seed::Seed;
use tracing::debug;

/// In-memory storage.
/// Does NOT persist data: everything is gone when the process exits.
#[derive(Debug, Default)]
pub struct InMemoryStore {
    notes: Vec<Note>,
    folders: Vec<Folder>,
    tags: Vec<Tag>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seed(seed: Seed) -> Self {
        debug!(
            notes = seed.notes.len(),
            folders = seed.folders.len(),
            tags = seed.tags.len(),
            "Seeding in-memory store"
        );
        Self {
            notes: seed.notes,
            folders: seed.folders,
            tags: seed.tags,
        }
    }

    fn position(&self, id: &NoteId) -> Option<usize> {
        self.notes.iter().position(|n| n.id == *id)
    }
}

impl DataStore for InMemoryStore {
    fn list_notes(&self) -> Result<Vec<Note>> {
        Ok(self.notes.clone())
    }

    fn get_note(&self, id: &NoteId) -> Result<Option<Note>> {
        Ok(self.notes.iter().find(|n| n.id == *id).cloned())
    }

    fn save_note(&mut self, note: &Note) -> Result<()> {
        match self.position(&note.id) {
            Some(idx) => self.notes[idx] = note.clone(),
            None => self.notes.push(note.clone()),
        }
        Ok(())
    }

    fn remove_note(&mut self, id: &NoteId) -> Result<bool> {
        match self.position(id) {
            Some(idx) => {
                self.notes.remove(idx);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    fn list_folders(&self) -> Result<Vec<Folder>> {
        Ok(self.folders.clone())
    }

    fn list_tags(&self) -> Result<Vec<Tag>> {
        Ok(self.tags.clone())
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;
    use crate::model::{ContentFormat, Folder, Tag};

    pub struct StoreFixture {
        pub store: InMemoryStore,
    }

    impl Default for StoreFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl StoreFixture {
        pub fn new() -> Self {
            Self {
                store: InMemoryStore::new(),
            }
        }

        pub fn sample() -> Self {
            Self {
                store: InMemoryStore::from_seed(Seed::sample()),
            }
        }

        pub fn with_folder(mut self, id: &str, name: &str, parent: Option<&str>) -> Self {
            self.store.folders.push(Folder::new(id, name, parent));
            self
        }

        pub fn with_tag(mut self, id: &str, name: &str) -> Self {
            self.store.tags.push(Tag::new(id, name));
            self
        }

        pub fn with_notes(mut self, count: usize, folder_id: &str) -> Self {
            for i in 0..count {
                let note = Note::new(
                    format!("Test Note {}", i + 1),
                    format!("Content for note {}", i + 1),
                    folder_id.to_string(),
                );
                self.store.save_note(&note).unwrap();
            }
            self
        }

        pub fn with_note(mut self, title: &str, content: &str, folder_id: &str) -> Self {
            let note = Note::new(title.to_string(), content.to_string(), folder_id.to_string());
            self.store.save_note(&note).unwrap();
            self
        }

        pub fn with_html_note(mut self, title: &str, html: &str, folder_id: &str) -> Self {
            let mut note = Note::new(title.to_string(), html.to_string(), folder_id.to_string());
            note.format = ContentFormat::Html;
            self.store.save_note(&note).unwrap();
            self
        }

        pub fn with_tagged_note(mut self, title: &str, tags: &[&str]) -> Self {
            let mut note = Note::new(title.to_string(), String::new(), "1".to_string());
            note.tags = tags.iter().map(|t| t.to_string()).collect();
            self.store.save_note(&note).unwrap();
            self
        }
    }
}
