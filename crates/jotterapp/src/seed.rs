//! Initial state for a store.
//!
//! A store starts from a [`Seed`] rather than from process-wide globals, so
//! every session (and every test) builds its own isolated data. The sample
//! seed is what a fresh session shows when no seed file is configured.

use crate::error::{JotterError, Result};
use crate::model::{ContentFormat, Folder, Note, Tag};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

const WELCOME_CONTENT: &str = r#"# Welcome to Notes App

This is a *markdown-based* note taking app with:

## Features
- Folders
- Tags
- Search
- Syntax highlighting

```typescript
// Code example with syntax highlighting
const greeting = (name: string): string => {
  return `Hello, ${name}!`;
};
```

> 繁體中文語言支持
"#;

const WORK_TASKS_CONTENT: &str =
    "# Work Tasks\n\n- [ ] Complete project proposal\n- [ ] Schedule meeting\n- [ ] Review code";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Seed {
    #[serde(default)]
    pub folders: Vec<Folder>,
    #[serde(default)]
    pub tags: Vec<Tag>,
    #[serde(default)]
    pub notes: Vec<Note>,
}

impl Seed {
    pub fn empty() -> Self {
        Self::default()
    }

    /// The fixed sample data: three folders (one nested), three tags and two
    /// Markdown notes.
    pub fn sample() -> Self {
        let folders = vec![
            Folder::new("1", "Personal", None),
            Folder::new("2", "Work", None),
            Folder::new("3", "Projects", Some("2")),
        ];
        let tags = vec![
            Tag::new("1", "important"),
            Tag::new("2", "todo"),
            Tag::new("3", "ideas"),
        ];

        // Stated, not sniffed: the code sample is free to grow angle brackets.
        let mut welcome = Note::new(
            "Welcome Note".to_string(),
            WELCOME_CONTENT.to_string(),
            "1".to_string(),
        );
        welcome.tags = vec!["1".to_string(), "3".to_string()];
        welcome.format = ContentFormat::Markdown;

        let mut work = Note::new(
            "Work Tasks".to_string(),
            WORK_TASKS_CONTENT.to_string(),
            "2".to_string(),
        );
        work.tags = vec!["1".to_string(), "2".to_string()];

        Self {
            folders,
            tags,
            notes: vec![welcome, work],
        }
    }

    /// Reads a JSON seed file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = fs::read_to_string(path.as_ref())?;
        let seed: Seed = serde_json::from_str(&raw)?;
        seed.validate()?;
        Ok(seed)
    }

    /// Note ids must be unique for the lifetime of a store.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for note in &self.notes {
            if !seen.insert(&note.id) {
                return Err(JotterError::Seed(format!("duplicate note id {}", note.id)));
            }
        }
        Ok(())
    }
}
