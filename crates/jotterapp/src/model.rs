//! # Domain Model
//!
//! The three entities of jotter: [`Note`], [`Folder`] and [`Tag`].
//!
//! ## Relationships
//!
//! ```text
//! Folder (parentId?) ──┐
//!   ▲                  └── nests under another Folder (any depth)
//!   │ folderId
//! Note ── tags[] ──▶ Tag
//! ```
//!
//! References are *soft*: a note may point at a folder or tag that does not
//! exist. Nothing validates them and nothing breaks when they dangle. The UI
//! simply fails to resolve a name (see `commands::list`).
//!
//! ## Content Format
//!
//! Note content is either Markdown source or HTML produced by a rich-text
//! editing surface. Every note carries an explicit [`ContentFormat`]; the
//! angle-bracket heuristic in [`ContentFormat::sniff`] is only consulted once,
//! when a note is created without saying which surface produced it.
//!
//! ## Wire Shape
//!
//! Notes serialize in camelCase (`folderId`, `createdAt`, ...). Deserialization
//! is lenient so hand-written seed files can omit ids, timestamps and defaults.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Title shown and stored when a note is created without one.
pub const DEFAULT_TITLE: &str = "Untitled";

/// Folder that owns notes created without an explicit folder.
pub const DEFAULT_FOLDER_ID: &str = "1";

/// Opaque note identifier.
///
/// New notes get a random UUID, but any non-empty string is accepted, so
/// seed files can keep short ids such as `"1"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NoteId(String);

impl NoteId {
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for NoteId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NoteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for NoteId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for NoteId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

pub type FolderId = String;
pub type TagId = String;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentFormat {
    #[default]
    Markdown,
    Html,
}

impl ContentFormat {
    /// Guesses the format of untagged content.
    ///
    /// Content holding both a `<` and a `>` anywhere is treated as HTML. This
    /// misroutes Markdown such as `"<3 ... a > b"`, which is why notes store
    /// their format instead of re-guessing at render time.
    pub fn sniff(content: &str) -> Self {
        if content.contains('<') && content.contains('>') {
            ContentFormat::Html
        } else {
            ContentFormat::Markdown
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ContentFormat::Markdown => "markdown",
            ContentFormat::Html => "html",
        }
    }

    /// File extension used when a note is handed to an external editor.
    pub fn file_ext(&self) -> &'static str {
        match self {
            ContentFormat::Markdown => ".md",
            ContentFormat::Html => ".html",
        }
    }
}

impl fmt::Display for ContentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "markdown" | "md" => Ok(ContentFormat::Markdown),
            "html" | "htm" => Ok(ContentFormat::Html),
            other => Err(format!("unknown content format '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub title: String,
    pub content: String,
    /// Tag ids in display order. Duplicates and dangling ids are tolerated.
    pub tags: Vec<TagId>,
    pub folder_id: FolderId,
    pub format: ContentFormat,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Note {
    pub fn new(title: String, content: String, folder_id: FolderId) -> Self {
        let now = Utc::now();
        let format = ContentFormat::sniff(&content);
        Self {
            id: NoteId::new(),
            title,
            content,
            tags: Vec::new(),
            folder_id,
            format,
            created_at: now,
            updated_at: now,
        }
    }

    /// Title for lists and headers; empty titles read as "Untitled".
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() {
            DEFAULT_TITLE
        } else {
            &self.title
        }
    }

    /// Refreshes `updated_at`. The timestamp never moves backwards, even when
    /// the wall clock does.
    pub fn touch(&mut self) {
        self.updated_at = Utc::now().max(self.updated_at);
    }
}

// Seed files are written by hand, so every field except the content itself
// may be missing. Missing values get the same defaults `create` would apply.
impl<'de> Deserialize<'de> for Note {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let helper = NoteHelper::deserialize(deserializer)?;

        let now = Utc::now();
        let content = helper.content.unwrap_or_default();
        let created_at = helper.created_at.unwrap_or(now);
        let updated_at = helper.updated_at.unwrap_or(created_at).max(created_at);
        let format = helper
            .format
            .unwrap_or_else(|| ContentFormat::sniff(&content));

        Ok(Note {
            id: helper
                .id
                .filter(|id| !id.as_str().is_empty())
                .unwrap_or_else(NoteId::new),
            title: helper
                .title
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            content,
            tags: helper.tags,
            folder_id: helper
                .folder_id
                .filter(|f| !f.is_empty())
                .unwrap_or_else(|| DEFAULT_FOLDER_ID.to_string()),
            format,
            created_at,
            updated_at,
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct NoteHelper {
    id: Option<NoteId>,
    title: Option<String>,
    content: Option<String>,
    #[serde(default)]
    tags: Vec<TagId>,
    folder_id: Option<FolderId>,
    format: Option<ContentFormat>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Folder {
    pub id: FolderId,
    pub name: String,
    /// `None` for top-level folders.
    #[serde(default)]
    pub parent_id: Option<FolderId>,
}

impl Folder {
    pub fn new(id: impl Into<String>, name: impl Into<String>, parent_id: Option<&str>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            parent_id: parent_id.map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: TagId,
    pub name: String,
}

impl Tag {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}
