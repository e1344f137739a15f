//! # Command Layer
//!
//! Pure business logic for every note operation. Each submodule exposes a
//! `run` (or a small set of functions) that takes a [`DataStore`] and returns
//! plain Rust values. No I/O assumptions, no printing.
//!
//! The two input records live here:
//!
//! - [`NewNote`]: the partial fields accepted by `create`.
//! - [`NoteUpdate`]: the partial fields accepted by `update`.
//!
//! Both use `Option` per field. `None` means "not given" and is distinct from
//! `Some(String::new())`, which means "given, and empty".
//!
//! [`DataStore`]: crate::store::DataStore

use crate::model::{ContentFormat, FolderId, TagId};

pub mod create;
pub mod delete;
pub mod get;
pub mod list;
pub mod render;
pub mod update;

/// Fields for a note about to be created. Anything left as `None` gets the
/// create defaults (see [`create::run`]).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewNote {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<TagId>>,
    pub folder_id: Option<FolderId>,
    pub format: Option<ContentFormat>,
}

impl NewNote {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn folder(mut self, folder_id: impl Into<String>) -> Self {
        self.folder_id = Some(folder_id.into());
        self
    }

    pub fn format(mut self, format: ContentFormat) -> Self {
        self.format = Some(format);
        self
    }
}

/// A partial update. Only the fields that are `Some` are written; the rest of
/// the note is preserved as-is.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<TagId>>,
    pub folder_id: Option<FolderId>,
    pub format: Option<ContentFormat>,
}

impl NoteUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn tags<I, T>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.tags = Some(tags.into_iter().map(Into::into).collect());
        self
    }

    pub fn folder(mut self, folder_id: impl Into<String>) -> Self {
        self.folder_id = Some(folder_id.into());
        self
    }

    pub fn format(mut self, format: ContentFormat) -> Self {
        self.format = Some(format);
        self
    }

    /// True when no field is set. Applying an empty update still refreshes
    /// `updated_at`.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.content.is_none()
            && self.tags.is_none()
            && self.folder_id.is_none()
            && self.format.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_set_only_named_fields() {
        let update = NoteUpdate::new().title("X");
        assert_eq!(update.title.as_deref(), Some("X"));
        assert!(update.content.is_none());
        assert!(update.tags.is_none());
        assert!(!update.is_empty());
        assert!(NoteUpdate::new().is_empty());
    }

    #[test]
    fn empty_string_is_not_omitted() {
        let update = NoteUpdate::new().content("");
        assert_eq!(update.content.as_deref(), Some(""));
        assert!(!update.is_empty());
    }

    #[test]
    fn new_note_builder() {
        let new = NewNote::new()
            .title("T")
            .tags(["1", "2"])
            .folder("3")
            .format(ContentFormat::Html);
        assert_eq!(new.tags, Some(vec!["1".to_string(), "2".to_string()]));
        assert_eq!(new.folder_id.as_deref(), Some("3"));
        assert_eq!(new.format, Some(ContentFormat::Html));
        assert!(new.content.is_none());
    }
}
