//! # Rendering Module
//!
//! Builds the strings the CLI prints. Every function returns a `String` so
//! the shell can write to any sink and tests can compare output directly.
//!
//! ## List Layout
//!
//! ```text
//!     1. Welcome Note                              Personal      3 seconds ago
//! ▸   2. Work Tasks                                Work          3 seconds ago
//! ```
//!
//! - marker (2 chars): `▸` on the active note
//! - index (4 chars): 1-based position in the visible list
//! - title (fill): truncated with `…` to fit
//! - folder (`COL_FOLDER`), time (`COL_TIME`, right-aligned)

use super::styles::{self, paint};
use chrono::{DateTime, Utc};
use jotterapp::commands::list::FolderNode;
use jotterapp::model::{Folder, Note, NoteId, Tag};
use jotterapp::shell::ViewMode;
use std::collections::HashMap;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const LINE_WIDTH: usize = 88;
pub const ACTIVE_MARKER: &str = "▸";

const COL_MARKER: usize = 2;
const COL_INDEX: usize = 4;
const COL_FOLDER: usize = 12;
const COL_TIME: usize = 14;

pub fn render_note_list(
    notes: &[Note],
    folders: &[Folder],
    active: Option<&NoteId>,
    use_color: Option<bool>,
) -> String {
    if notes.is_empty() {
        return format!("{}\n", paint(&styles::MUTED, "No notes found.", use_color));
    }

    let folder_names: HashMap<&str, &str> = folders
        .iter()
        .map(|f| (f.id.as_str(), f.name.as_str()))
        .collect();
    let title_width = LINE_WIDTH.saturating_sub(COL_MARKER + COL_INDEX + COL_FOLDER + COL_TIME + 2);

    let mut out = String::new();
    for (i, note) in notes.iter().enumerate() {
        let is_active = active == Some(&note.id);
        let marker = if is_active { ACTIVE_MARKER } else { " " };

        let title = truncate_to_width(note.display_title(), title_width);
        let title_pad = " ".repeat(title_width.saturating_sub(title.width()));
        let title_style = if is_active {
            &styles::ACTIVE
        } else {
            &styles::TITLE
        };

        let folder = folder_names
            .get(note.folder_id.as_str())
            .copied()
            .unwrap_or(note.folder_id.as_str());
        let folder = truncate_to_width(folder, COL_FOLDER);
        let folder_pad = " ".repeat(COL_FOLDER.saturating_sub(folder.width()));

        out.push_str(&format!(
            "{} {} {}{} {}{} {}\n",
            paint(&styles::ACTIVE, marker, use_color),
            paint(&styles::INDEX, &format!("{:>3}.", i + 1), use_color),
            paint(title_style, &title, use_color),
            title_pad,
            paint(&styles::FOLDER, &folder, use_color),
            folder_pad,
            paint(&styles::TIME, &format_time_ago(note.updated_at), use_color),
        ));
    }
    out
}

/// Folders indented by depth, with the active filter marked.
pub fn render_folder_tree(
    nodes: &[FolderNode],
    active: Option<&str>,
    use_color: Option<bool>,
) -> String {
    if nodes.is_empty() {
        return format!("{}\n", paint(&styles::MUTED, "No folders.", use_color));
    }

    let mut out = String::new();
    let all_marker = if active.is_none() { ACTIVE_MARKER } else { " " };
    out.push_str(&format!(
        "{} {}\n",
        paint(&styles::ACTIVE, all_marker, use_color),
        paint(&styles::MUTED, "all", use_color)
    ));
    for node in nodes {
        let is_active = active == Some(node.folder.id.as_str());
        let marker = if is_active { ACTIVE_MARKER } else { " " };
        out.push_str(&format!(
            "{} {}{} {}\n",
            paint(&styles::ACTIVE, marker, use_color),
            "  ".repeat(node.depth),
            paint(&styles::FOLDER, &node.folder.name, use_color),
            paint(&styles::MUTED, &format!("({})", node.folder.id), use_color),
        ));
    }
    out
}

pub fn render_tag_list(tags: &[Tag], use_color: Option<bool>) -> String {
    if tags.is_empty() {
        return format!("{}\n", paint(&styles::MUTED, "No tags.", use_color));
    }
    tags.iter()
        .map(|t| {
            format!(
                "  {} {}\n",
                paint(&styles::TAG, &format!("#{}", t.name), use_color),
                paint(&styles::MUTED, &format!("({})", t.id), use_color)
            )
        })
        .collect()
}

/// Header shown above a note's body: title, then a meta line.
pub fn render_note_header(
    title: &str,
    note: &Note,
    folder_name: Option<&str>,
    tag_names: &[String],
    mode: ViewMode,
    use_color: Option<bool>,
) -> String {
    let title = if title.is_empty() {
        note.display_title()
    } else {
        title
    };
    let tags = tag_names
        .iter()
        .map(|t| format!("#{}", t))
        .collect::<Vec<_>>()
        .join(" ");
    let mode = match mode {
        ViewMode::Edit => "edit",
        ViewMode::Preview => "preview",
    };

    let mut out = format!("{}\n", paint(&styles::TITLE, title, use_color));
    out.push_str(&format!(
        "{} · {} · {} · {}",
        paint(&styles::FOLDER, folder_name.unwrap_or(&note.folder_id), use_color),
        paint(&styles::MUTED, note.format.as_str(), use_color),
        paint(&styles::MUTED, mode, use_color),
        paint(&styles::TIME, format_time_ago(note.updated_at).trim(), use_color),
    ));
    if !tags.is_empty() {
        out.push_str(&format!(" · {}", paint(&styles::TAG, &tags, use_color)));
    }
    out.push_str(&format!("\n{}\n", "─".repeat(32)));
    out
}

pub fn success(message: &str, use_color: Option<bool>) -> String {
    format!("{}\n", paint(&styles::SUCCESS, message, use_color))
}

pub fn warning(message: &str, use_color: Option<bool>) -> String {
    format!("{}\n", paint(&styles::WARNING, message, use_color))
}

pub fn error(message: &str, use_color: Option<bool>) -> String {
    format!("{}\n", paint(&styles::ERROR, message, use_color))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    let limit = max_width.saturating_sub(1);

    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > limit {
            break;
        }
        result.push(c);
        current_width += char_width;
    }
    result.push('…');
    result
}

fn format_time_ago(timestamp: DateTime<Utc>) -> String {
    let duration = Utc::now().signed_duration_since(timestamp);
    let formatter = timeago::Formatter::new();
    let time_str = formatter.convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = COL_TIME)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jotterapp::model::ContentFormat;
    use jotterapp::seed::Seed;

    fn plain() -> Option<bool> {
        Some(false)
    }

    #[test]
    fn empty_list() {
        assert_eq!(render_note_list(&[], &[], None, plain()), "No notes found.\n");
    }

    #[test]
    fn list_shows_index_title_and_folder_name() {
        let seed = Seed::sample();
        let active = &seed.notes[1].id;
        let out = render_note_list(&seed.notes, &seed.folders, Some(active), plain());
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("    1. Welcome Note"));
        assert!(lines[0].contains("Personal"));
        assert!(lines[1].starts_with("▸   2. Work Tasks"));
        assert!(lines[1].contains("Work"));
    }

    #[test]
    fn list_falls_back_to_folder_id() {
        let note = Note::new("Lost".into(), String::new(), "gone".into());
        let out = render_note_list(&[note], &[], None, plain());
        assert!(out.contains("gone"));
    }

    #[test]
    fn long_titles_are_truncated() {
        let note = Note::new("x".repeat(200), String::new(), "1".into());
        let out = render_note_list(&[note], &[], None, plain());
        assert!(out.contains('…'));
        assert!(out.lines().next().unwrap().width() <= LINE_WIDTH + 2);
    }

    #[test]
    fn truncation_respects_wide_chars() {
        let truncated = truncate_to_width("繁體中文語言支持", 7);
        assert!(truncated.width() <= 7);
        assert!(truncated.ends_with('…'));
        assert_eq!(truncate_to_width("short", 10), "short");
    }

    #[test]
    fn folder_tree_indents_children() {
        let folders = Seed::sample().folders;
        let nodes = jotterapp::commands::list::folder_tree(&folders);
        let out = render_folder_tree(&nodes, Some("3"), plain());

        assert!(out.starts_with("  all\n"));
        assert!(out.contains("  Personal (1)"));
        assert!(out.contains("▸   Projects (3)"));
    }

    #[test]
    fn header_lists_meta() {
        let mut note = Note::new("Plan".into(), "body".into(), "2".into());
        note.format = ContentFormat::Html;
        let out = render_note_header(
            "Plan",
            &note,
            Some("Work"),
            &["todo".to_string()],
            ViewMode::Edit,
            plain(),
        );
        assert!(out.starts_with("Plan\n"));
        assert!(out.contains("Work · html · edit"));
        assert!(out.contains("#todo"));
    }

    #[test]
    fn time_ago_is_right_aligned() {
        let formatted = format_time_ago(Utc::now() - chrono::Duration::hours(2));
        assert_eq!(formatted.len(), COL_TIME);
        assert!(formatted.trim_start().starts_with('2'));
    }
}
