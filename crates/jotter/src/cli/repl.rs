//! # Interactive Shell
//!
//! A line-oriented front end over [`Session`]. Each input line is split into
//! words (double quotes group words and keep their spacing) and parsed with
//! clap, so the grammar and its error messages come from the same place.
//!
//! ```text
//! jotter> folder 2
//! jotter> new
//! jotter> title "Sprint plan"
//! jotter> write "# Goals\n\n- ship it"
//! jotter> show
//! ```
//!
//! Notes are referenced by their 1-based position in `ls`, by full id, or by
//! a unique id prefix. Errors are printed and the loop keeps going; only
//! `quit` (or end of input) ends the session.
//!
//! Text arguments understand `\n` and `\t` escapes, since a line can't
//! otherwise hold a multi-line note.

use super::render;
use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use jotterapp::editor::{edit_content, EditorContent};
use jotterapp::error::JotterError;
use jotterapp::model::{ContentFormat, NoteId};
use jotterapp::render::page::render_page;
use jotterapp::shell::{Session, ViewMode};
use jotterapp::store::DataStore;
use std::fs;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use tracing::debug;

const PROMPT: &str = "jotter> ";

#[derive(Parser, Debug)]
#[command(
    name = "jotter",
    no_binary_name = true,
    disable_help_flag = true,
    disable_help_subcommand = true,
    disable_version_flag = true
)]
struct ReplLine {
    #[command(subcommand)]
    command: ReplCommand,
}

#[derive(Subcommand, Debug)]
enum ReplCommand {
    /// List notes in the current folder
    #[command(alias = "list")]
    Ls,

    /// Show the folder tree
    Folders,

    /// Filter notes by folder id ("all" shows every note)
    Folder { id: String },

    /// Select a note by list position or id
    Open { note: String },

    /// Create a note in the current folder and start editing it
    New,

    /// Set the title of the open note
    Title {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },

    /// Replace the content of the open note
    Write {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },

    /// Add a line to the content of the open note
    Append {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },

    /// Set the content format (markdown or html)
    Format { format: ContentFormat },

    /// List tags, or set the open note's tags by id
    Tags { ids: Vec<String> },

    /// Move the open note to another folder
    Move { folder: String },

    /// Edit the open note in $EDITOR
    Edit,

    /// Switch between edit and preview (toggles without an argument)
    Mode {
        #[arg(value_enum)]
        mode: Option<ModeArg>,
    },

    /// Print the open note (raw in edit mode, rendered in preview mode)
    Show,

    /// Delete a note (the open one by default)
    Rm { note: Option<String> },

    /// Write the open note as a standalone HTML page
    Export { path: PathBuf },

    /// List commands
    Help,

    /// Leave the shell
    #[command(alias = "exit")]
    Quit,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ModeArg {
    Edit,
    Preview,
}

impl From<ModeArg> for ViewMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Edit => ViewMode::Edit,
            ModeArg::Preview => ViewMode::Preview,
        }
    }
}

enum Flow {
    Continue,
    Quit,
}

pub struct Repl<'a, S: DataStore> {
    session: &'a mut Session<S>,
    interactive: bool,
    use_color: Option<bool>,
}

impl<'a, S: DataStore> Repl<'a, S> {
    /// Interactive shells print a prompt and style output for the terminal;
    /// piped shells print plain text only.
    pub fn new(session: &'a mut Session<S>, interactive: bool) -> Self {
        Self {
            session,
            interactive,
            use_color: if interactive { None } else { Some(false) },
        }
    }

    pub fn run<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        if self.interactive {
            writeln!(out, "jotter {}. Type `help` for commands.", env!("CARGO_PKG_VERSION"))?;
        }

        let mut lines = input.lines();
        loop {
            if self.interactive {
                write!(out, "{}", PROMPT)?;
                out.flush()?;
            }
            let Some(line) = lines.next() else {
                break;
            };
            let line = line?;

            match self.execute(&line, out) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(e) => {
                    let message = format!("Error: {}", e);
                    out.write_all(render::error(&message, self.use_color).as_bytes())?;
                }
            }
        }
        Ok(())
    }

    fn execute<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Flow> {
        let words = split_line(line);
        if words.is_empty() || words[0].starts_with('#') {
            return Ok(Flow::Continue);
        }

        match ReplLine::try_parse_from(&words) {
            Ok(parsed) => {
                debug!(command = ?parsed.command, "Shell command");
                self.dispatch(parsed.command, out)
            }
            Err(e) => {
                write!(out, "{}", e)?;
                Ok(Flow::Continue)
            }
        }
    }

    fn dispatch<W: Write>(&mut self, command: ReplCommand, out: &mut W) -> Result<Flow> {
        let color = self.use_color;
        match command {
            ReplCommand::Ls => {
                let notes = self.session.visible_notes();
                out.write_all(
                    render::render_note_list(
                        &notes,
                        self.session.folders(),
                        self.session.active_note_id(),
                        color,
                    )
                    .as_bytes(),
                )?;
            }
            ReplCommand::Folders => {
                let tree = self.session.api().folder_tree()?;
                out.write_all(
                    render::render_folder_tree(&tree, self.session.active_folder_id(), color)
                        .as_bytes(),
                )?;
            }
            ReplCommand::Folder { id } => {
                if id == "all" {
                    self.session.select_folder(None);
                    out.write_all(render::success("Showing all notes", color).as_bytes())?;
                } else {
                    let name = self.folder_name(&id);
                    self.session.select_folder(Some(id.clone()));
                    let message = match name {
                        Some(name) => format!("Showing folder {}", name),
                        None => format!("No folder '{}', nothing will match", id),
                    };
                    out.write_all(render::success(&message, color).as_bytes())?;
                }
            }
            ReplCommand::Open { note } => {
                if self.select(&note)? {
                    self.print_header(out)?;
                } else {
                    let message = format!("No note matches '{}'", note);
                    out.write_all(render::warning(&message, color).as_bytes())?;
                }
            }
            ReplCommand::New => {
                self.session.create_note()?;
                out.write_all(render::success("Created note", color).as_bytes())?;
                self.print_header(out)?;
            }
            ReplCommand::Title { text } => {
                self.session.set_title(unescape(&text.join(" ")))?;
                out.write_all(render::success("Title updated", color).as_bytes())?;
            }
            ReplCommand::Write { text } => {
                self.session.set_content(unescape(&text.join(" ")))?;
                out.write_all(render::success("Content updated", color).as_bytes())?;
            }
            ReplCommand::Append { text } => {
                let addition = unescape(&text.join(" "));
                let content = if self.session.content().is_empty() {
                    addition
                } else {
                    format!("{}\n{}", self.session.content(), addition)
                };
                self.session.set_content(content)?;
                out.write_all(render::success("Content updated", color).as_bytes())?;
            }
            ReplCommand::Format { format } => {
                self.session.set_format(format)?;
                let message = format!("Format set to {}", format);
                out.write_all(render::success(&message, color).as_bytes())?;
            }
            ReplCommand::Tags { ids } => {
                if ids.is_empty() {
                    out.write_all(render::render_tag_list(self.session.tags(), color).as_bytes())?;
                } else {
                    self.session.set_tags(ids)?;
                    let names = self.session.active_tag_names();
                    let message = format!("Tags: {}", names.join(", "));
                    out.write_all(render::success(&message, color).as_bytes())?;
                }
            }
            ReplCommand::Move { folder } => {
                let name = self.folder_name(&folder).unwrap_or_else(|| folder.clone());
                self.session.move_to_folder(folder)?;
                let message = format!("Moved to {}", name);
                out.write_all(render::success(&message, color).as_bytes())?;
            }
            ReplCommand::Edit => self.edit(out)?,
            ReplCommand::Mode { mode } => {
                let mode = match mode {
                    Some(mode) => {
                        self.session.set_view_mode(mode.into());
                        self.session.view_mode()
                    }
                    None => self.session.toggle_view_mode(),
                };
                let message = match mode {
                    ViewMode::Edit => "Mode: edit",
                    ViewMode::Preview => "Mode: preview",
                };
                out.write_all(render::success(message, color).as_bytes())?;
            }
            ReplCommand::Show => self.show(out)?,
            ReplCommand::Rm { note } => {
                if let Some(reference) = note {
                    if !self.select(&reference)? {
                        let message = format!("No note matches '{}'", reference);
                        out.write_all(render::warning(&message, color).as_bytes())?;
                        return Ok(Flow::Continue);
                    }
                }
                self.session.delete_active()?;
                out.write_all(render::success("Note deleted", color).as_bytes())?;
            }
            ReplCommand::Export { path } => {
                let note = self
                    .session
                    .active_note()
                    .ok_or(JotterError::NoActiveNote)?
                    .clone();
                let rendered = self.session.preview().ok_or(JotterError::NoActiveNote)?;
                let css = self.session.api().renderer().theme_css();
                fs::write(&path, render_page(note.display_title(), &rendered, &css))?;
                let message = format!("Exported to {}", path.display());
                out.write_all(render::success(&message, color).as_bytes())?;
            }
            ReplCommand::Help => out.write_all(help_text().as_bytes())?,
            ReplCommand::Quit => return Ok(Flow::Quit),
        }
        Ok(Flow::Continue)
    }

    fn show<W: Write>(&mut self, out: &mut W) -> Result<()> {
        if self.session.active_note().is_none() {
            out.write_all(
                render::warning("No note selected. Use `open` or `new`.", self.use_color)
                    .as_bytes(),
            )?;
            return Ok(());
        }

        self.print_header(out)?;
        match self.session.view_mode() {
            ViewMode::Edit => writeln!(out, "{}", self.session.content())?,
            ViewMode::Preview => {
                if let Some(rendered) = self.session.preview() {
                    write!(out, "{}", rendered.html)?;
                }
            }
        }
        Ok(())
    }

    fn edit<W: Write>(&mut self, out: &mut W) -> Result<()> {
        let format = self
            .session
            .active_note()
            .map(|n| n.format)
            .ok_or(JotterError::NoActiveNote)?;

        let initial = EditorContent::new(
            self.session.title().to_string(),
            self.session.content().to_string(),
        );
        let edited = edit_content(&initial, format)?;

        if edited.title != initial.title {
            self.session.set_title(edited.title)?;
        }
        if edited.content != initial.content {
            self.session.set_content(edited.content)?;
        }
        out.write_all(render::success("Note saved", self.use_color).as_bytes())?;
        Ok(())
    }

    fn print_header<W: Write>(&self, out: &mut W) -> Result<()> {
        let Some(note) = self.session.active_note() else {
            return Ok(());
        };
        let folder = self.folder_name(&note.folder_id);
        let header = render::render_note_header(
            self.session.title(),
            note,
            folder.as_deref(),
            &self.session.active_tag_names(),
            self.session.view_mode(),
            self.use_color,
        );
        out.write_all(header.as_bytes())?;
        Ok(())
    }

    fn folder_name(&self, id: &str) -> Option<String> {
        self.session
            .folders()
            .iter()
            .find(|f| f.id == id)
            .map(|f| f.name.clone())
    }

    fn select(&mut self, reference: &str) -> Result<bool> {
        match self.resolve(reference) {
            Some(id) => Ok(self.session.select_note(&id)?),
            None => Ok(false),
        }
    }

    /// A list position (1-based, visible notes), a full id, or a unique id
    /// prefix. Digits that are not a valid position are tried as an id.
    fn resolve(&self, reference: &str) -> Option<NoteId> {
        if let Ok(position) = reference.parse::<usize>() {
            let visible = self.session.visible_notes();
            let by_position = position
                .checked_sub(1)
                .and_then(|i| visible.get(i))
                .map(|n| n.id.clone());
            if by_position.is_some() {
                return by_position;
            }
        }

        let notes = self.session.notes();
        if let Some(note) = notes.iter().find(|n| n.id.as_str() == reference) {
            return Some(note.id.clone());
        }
        let mut matches = notes
            .iter()
            .filter(|n| n.id.as_str().starts_with(reference));
        match (matches.next(), matches.next()) {
            (Some(note), None) => Some(note.id.clone()),
            _ => None,
        }
    }
}

fn help_text() -> String {
    let command = ReplLine::command();
    let mut out = String::from("Commands:\n");
    for sub in command.get_subcommands() {
        let about = sub.get_about().map(|a| a.to_string()).unwrap_or_default();
        out.push_str(&format!("  {:<10} {}\n", sub.get_name(), about));
    }
    out
}

/// Splits a line on whitespace. Double quotes group words and keep their
/// inner spacing; an unterminated quote runs to the end of the line.
fn split_line(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut in_word = false;

    for c in line.chars() {
        match c {
            '"' => {
                in_quotes = !in_quotes;
                in_word = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            c => {
                current.push(c);
                in_word = true;
            }
        }
    }
    if in_word {
        words.push(current);
    }
    words
}

fn unescape(text: &str) -> String {
    text.replace("\\n", "\n").replace("\\t", "\t")
}

#[cfg(test)]
mod tests {
    use super::*;
    use jotterapp::api::NotesApi;
    use jotterapp::render::ContentRenderer;
    use jotterapp::seed::Seed;
    use jotterapp::store::memory::InMemoryStore;
    use std::io::Cursor;

    fn session() -> Session<InMemoryStore> {
        let api = NotesApi::new(
            InMemoryStore::from_seed(Seed::sample()),
            ContentRenderer::default(),
            "1",
        );
        Session::new(api).unwrap()
    }

    fn run_on(session: &mut Session<InMemoryStore>, script: &str) -> String {
        let mut out = Vec::new();
        Repl::new(session, false)
            .run(Cursor::new(script), &mut out)
            .unwrap();
        String::from_utf8(out).unwrap()
    }

    fn run_script(script: &str) -> (Session<InMemoryStore>, String) {
        let mut session = session();
        let out = run_on(&mut session, script);
        (session, out)
    }

    #[test]
    fn grammar_is_valid() {
        ReplLine::command().debug_assert();
    }

    #[test]
    fn ls_lists_seeded_notes() {
        let (_, out) = run_script("ls\n");
        assert!(out.contains("1. Welcome Note"));
        assert!(out.contains("2. Work Tasks"));
    }

    #[test]
    fn folder_filter_narrows_ls() {
        let (session, out) = run_script("folder 2\nls\n");
        assert!(out.contains("Showing folder Work"));
        assert!(out.contains("Work Tasks"));
        assert!(!out.contains("Welcome Note"));
        assert_eq!(session.active_folder_id(), Some("2"));
    }

    #[test]
    fn folder_all_clears_filter() {
        let (session, _) = run_script("folder 2\nfolder all\n");
        assert_eq!(session.active_folder_id(), None);
    }

    #[test]
    fn new_title_write_flow() {
        let (session, out) = run_script("new\ntitle Groceries\nwrite \"- milk\\n- eggs\"\n");
        assert!(out.contains("Created note"));

        let note = session.active_note().unwrap();
        assert_eq!(note.title, "Groceries");
        assert_eq!(note.content, "- milk\n- eggs");
        assert_eq!(session.notes().len(), 3);
        assert_eq!(session.view_mode(), ViewMode::Edit);
    }

    #[test]
    fn append_adds_a_line() {
        let (session, _) = run_script("new\nappend first\nappend second\n");
        assert_eq!(session.content(), "first\nsecond");
    }

    #[test]
    fn show_renders_in_preview_mode() {
        let (_, out) = run_script("open 2\nshow\n");
        assert!(out.contains("<h1>Work Tasks</h1>"));
        assert!(out.contains("type=\"checkbox\""));
    }

    #[test]
    fn show_prints_source_in_edit_mode() {
        let (_, out) = run_script("open 1\nmode edit\nshow\n");
        assert!(out.contains("Mode: edit"));
        assert!(out.contains("# Welcome to Notes App"));
    }

    #[test]
    fn show_without_selection_warns() {
        let (_, out) = run_script("show\n");
        assert!(out.contains("No note selected"));
    }

    #[test]
    fn edits_without_selection_report_errors_and_continue() {
        let (session, out) = run_script("title Nope\nls\n");
        assert!(out.contains("Error: No note is selected"));
        assert!(out.contains("Welcome Note"));
        assert_eq!(session.notes()[0].title, "Welcome Note");
    }

    #[test]
    fn unknown_command_is_reported() {
        let (_, out) = run_script("frobnicate\n");
        assert!(out.contains("frobnicate"));
    }

    #[test]
    fn open_by_id_prefix() {
        let mut session = session();
        let id = session.notes()[1].id.to_string();

        run_on(&mut session, &format!("open {}\n", &id[..13]));

        assert_eq!(session.title(), "Work Tasks");
    }

    fn numeric_id_session() -> Session<InMemoryStore> {
        let mut seed = Seed::sample();
        seed.notes[0].id = NoteId::from("12345-a");
        seed.notes[1].id = NoteId::from("67890-b");
        let api = NotesApi::new(
            InMemoryStore::from_seed(seed),
            ContentRenderer::default(),
            "1",
        );
        Session::new(api).unwrap()
    }

    #[test]
    fn digits_beyond_the_list_fall_back_to_id_prefix() {
        let mut session = numeric_id_session();

        run_on(&mut session, "open 67890\n");
        assert_eq!(session.title(), "Work Tasks");

        run_on(&mut session, "open 1\n");
        assert_eq!(session.title(), "Welcome Note");

        let out = run_on(&mut session, "rm 12345\n");
        assert!(!out.contains("No note matches"));
        assert_eq!(session.notes().len(), 1);
        assert_eq!(session.notes()[0].id.as_str(), "67890-b");
    }

    #[test]
    fn open_by_full_string_id() {
        let mut session = numeric_id_session();
        run_on(&mut session, "open 12345-a\n");
        assert_eq!(session.title(), "Welcome Note");
    }

    #[test]
    fn open_out_of_range_warns() {
        let (session, out) = run_script("open 9\n");
        assert!(out.contains("No note matches '9'"));
        assert!(session.active_note_id().is_none());
    }

    #[test]
    fn rm_deletes_by_position() {
        let (session, out) = run_script("rm 1\n");
        assert!(out.contains("Note deleted"));
        assert_eq!(session.notes().len(), 1);
        assert_eq!(session.notes()[0].title, "Work Tasks");
    }

    #[test]
    fn format_tags_and_move() {
        let (session, out) = run_script("open 1\nformat html\ntags 2 3\nmove 3\n");
        let note = session.active_note().unwrap();
        assert_eq!(note.format, ContentFormat::Html);
        assert_eq!(session.active_tag_names(), vec!["todo", "ideas"]);
        assert_eq!(note.folder_id, "3");
        assert!(out.contains("Moved to Projects"));
    }

    #[test]
    fn tags_without_ids_lists_tags() {
        let (_, out) = run_script("tags\n");
        assert!(out.contains("#important"));
        assert!(out.contains("#ideas"));
    }

    #[test]
    fn folders_prints_tree() {
        let (_, out) = run_script("folders\n");
        assert!(out.contains("Personal (1)"));
        assert!(out.contains("    Projects (3)"));
    }

    #[test]
    fn export_writes_page() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("welcome.html");
        let (_, out) = run_script(&format!("open 1\nexport \"{}\"\n", path.display()));

        assert!(out.contains("Exported to"));
        let page = fs::read_to_string(&path).unwrap();
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>Welcome Note</title>"));
        assert!(page.contains("language-typescript"));
    }

    #[test]
    fn quit_stops_reading() {
        let (session, _) = run_script("quit\nnew\n");
        assert_eq!(session.notes().len(), 2);
    }

    #[test]
    fn comments_and_blank_lines_are_ignored() {
        let (_, out) = run_script("\n# a comment\n   \n");
        assert!(out.is_empty());
    }

    #[test]
    fn help_lists_commands() {
        let (_, out) = run_script("help\n");
        assert!(out.contains("open"));
        assert!(out.contains("export"));
    }

    #[test]
    fn split_line_handles_quotes() {
        assert_eq!(split_line("title  a   b"), vec!["title", "a", "b"]);
        assert_eq!(
            split_line("write \"  indented  text\""),
            vec!["write", "  indented  text"]
        );
        assert_eq!(split_line("write \"\""), vec!["write", ""]);
        assert!(split_line("   ").is_empty());
    }
}
