//! External editor support for the shell's `edit` command.
//!
//! A note is written to a temporary file as `title\n\ncontent`, handed to
//! `$EDITOR` (or `$VISUAL`), and read back once the editor exits. The file
//! extension follows the note's format so editors pick the right mode.

use crate::error::{JotterError, Result};
use crate::model::{ContentFormat, Note};
use std::env;
use std::fs;
use std::path::Path;
use std::process::Command;
use tracing::debug;

/// Title and content as laid out in an editor buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorContent {
    pub title: String,
    pub content: String,
}

impl EditorContent {
    pub fn new(title: String, content: String) -> Self {
        Self { title, content }
    }

    pub fn from_note(note: &Note) -> Self {
        Self::new(note.title.clone(), note.content.clone())
    }

    pub fn to_buffer(&self) -> String {
        if self.content.is_empty() {
            format!("{}\n\n", self.title)
        } else {
            format!("{}\n\n{}", self.title, self.content)
        }
    }

    /// First line is the title. A single blank line after it is the
    /// separator; without one, content starts on the second line.
    pub fn from_buffer(buffer: &str) -> Self {
        let mut lines = buffer.lines();
        let title = lines.next().unwrap_or_default().to_string();

        let rest: Vec<&str> = lines.collect();
        let body = match rest.first() {
            Some(first) if first.is_empty() => &rest[1..],
            _ => &rest[..],
        };

        Self {
            title,
            content: body.join("\n"),
        }
    }
}

/// `$EDITOR`, then `$VISUAL`, then the first of vim/vi/nano on the `PATH`.
pub fn get_editor() -> Result<String> {
    for var in ["EDITOR", "VISUAL"] {
        if let Ok(editor) = env::var(var) {
            if !editor.trim().is_empty() {
                return Ok(editor);
            }
        }
    }

    for fallback in ["vim", "vi", "nano"] {
        let found = Command::new("which")
            .arg(fallback)
            .output()
            .map(|o| o.status.success())
            .unwrap_or(false);
        if found {
            return Ok(fallback.to_string());
        }
    }

    Err(JotterError::Editor(
        "No editor found. Set $EDITOR environment variable.".to_string(),
    ))
}

/// Opens `file_path` in the editor, waits for it to exit and returns the
/// file's contents.
///
/// The editor value may carry arguments (`code --wait`).
pub fn open_in_editor<P: AsRef<Path>>(file_path: P) -> Result<String> {
    let editor = get_editor()?;
    let path = file_path.as_ref();

    let mut parts = editor.split_whitespace();
    let program = parts.next().unwrap_or_default();
    debug!(editor = %editor, path = %path.display(), "Launching editor");

    let status = Command::new(program)
        .args(parts)
        .arg(path)
        .status()
        .map_err(|e| JotterError::Editor(format!("Failed to launch editor '{}': {}", editor, e)))?;

    if !status.success() {
        return Err(JotterError::Editor(format!(
            "Editor '{}' exited with non-zero status",
            editor
        )));
    }

    Ok(fs::read_to_string(path)?)
}

/// Round-trips `initial` through the editor using a temp file named after
/// the note format.
pub fn edit_content(initial: &EditorContent, format: ContentFormat) -> Result<EditorContent> {
    let temp_file = env::temp_dir().join(format!(
        "jotter-{}{}",
        uuid::Uuid::new_v4(),
        format.file_ext()
    ));

    fs::write(&temp_file, initial.to_buffer())?;
    let result = open_in_editor(&temp_file);
    let _ = fs::remove_file(&temp_file);

    Ok(EditorContent::from_buffer(&result?))
}
