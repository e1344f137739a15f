//! Top-level dispatch for the `jotter` binary.

use super::render;
use super::repl::Repl;
use super::setup::{Cli, Commands, RenderFormat};
use anyhow::{Context, Result};
use clap::Parser;
use jotterapp::api::NotesApi;
use jotterapp::config::JotterConfig;
use jotterapp::model::{ContentFormat, DEFAULT_TITLE};
use jotterapp::render::page::render_page;
use jotterapp::render::{ContentRenderer, RenderOptions};
use jotterapp::shell::Session;
use std::fs;
use std::io::{self, IsTerminal, Read, Write};
use std::path::Path;
use tracing::debug;
use tracing_subscriber::EnvFilter;

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let mut config = JotterConfig::load(cli.config.as_deref())?;
    if let Some(seed) = cli.seed {
        config.seed_file = Some(seed);
    }
    debug!(?config, "Configuration loaded");

    match cli.command.unwrap_or(Commands::Shell) {
        Commands::Shell => handle_shell(&config),
        Commands::List { folder, json } => handle_list(&config, folder.as_deref(), json),
        Commands::Render {
            path,
            format,
            page,
            title,
        } => handle_render(&config, &path, format, page, title),
        Commands::Config => handle_config(&config),
    }
}

/// Logs go to stderr so stdout stays clean for piping. `RUST_LOG` still
/// applies to other targets.
fn init_logging(verbosity: u8) {
    let level = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let mut filter = EnvFilter::from_default_env();
    for target in ["jotter", "jotterapp"] {
        if let Ok(directive) = format!("{}={}", target, level).parse() {
            filter = filter.add_directive(directive);
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn handle_shell(config: &JotterConfig) -> Result<()> {
    let api = NotesApi::from_config(config)?;
    let mut session = Session::new(api)?;

    let stdin = io::stdin();
    let interactive = stdin.is_terminal();
    let mut stdout = io::stdout().lock();

    Repl::new(&mut session, interactive).run(stdin.lock(), &mut stdout)
}

fn handle_list(config: &JotterConfig, folder: Option<&str>, json: bool) -> Result<()> {
    let api = NotesApi::from_config(config)?;
    let notes = api.notes_in_folder(folder)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&notes)?);
    } else {
        let folders = api.list_folders()?;
        print!("{}", render::render_note_list(&notes, &folders, None, None));
    }
    Ok(())
}

fn handle_render(
    config: &JotterConfig,
    path: &str,
    format: RenderFormat,
    page: bool,
    title: Option<String>,
) -> Result<()> {
    let source = read_input(path)?;
    let renderer = ContentRenderer::new(RenderOptions::from(&config.render));

    let rendered = match format {
        RenderFormat::Auto => renderer.render(&source),
        RenderFormat::Markdown => renderer.render_as(&source, ContentFormat::Markdown),
        RenderFormat::Html => renderer.render_as(&source, ContentFormat::Html),
    };

    let mut stdout = io::stdout().lock();
    if page {
        let title = title.unwrap_or_else(|| default_title(path));
        stdout.write_all(render_page(&title, &rendered, &renderer.theme_css()).as_bytes())?;
    } else {
        stdout.write_all(rendered.html.as_bytes())?;
    }
    Ok(())
}

fn handle_config(config: &JotterConfig) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}

fn read_input(path: &str) -> Result<String> {
    if path == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("Failed to read stdin")?;
        Ok(buffer)
    } else {
        fs::read_to_string(path).with_context(|| format!("Failed to read {}", path))
    }
}

fn default_title(path: &str) -> String {
    if path == "-" {
        return DEFAULT_TITLE.to_string();
    }
    Path::new(path)
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| DEFAULT_TITLE.to_string())
}
