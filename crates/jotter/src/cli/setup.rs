use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "jotter",
    bin_name = "jotter",
    version,
    disable_help_subcommand = true,
    after_help = "Notes live in memory only: every run starts from the seed data."
)]
#[command(about = "Folders, tags and Markdown/rich-text notes in the terminal", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file (default: jotter.toml in the OS config directory)
    #[arg(long, global = true, value_name = "FILE", help_heading = "Options")]
    pub config: Option<PathBuf>,

    /// JSON seed file with folders, tags and notes
    #[arg(long, global = true, value_name = "FILE", help_heading = "Options")]
    pub seed: Option<PathBuf>,

    /// Verbose logging on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true, help_heading = "Options")]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Interactive session (the default)
    Shell,

    /// List notes
    #[command(alias = "ls")]
    List {
        /// Only notes in this folder id
        #[arg(long)]
        folder: Option<String>,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Render Markdown or HTML to sanitized, highlighted HTML
    Render {
        /// Input file, or "-" for stdin
        #[arg(default_value = "-")]
        path: String,

        #[arg(long, value_enum, default_value_t = RenderFormat::Auto)]
        format: RenderFormat,

        /// Emit a standalone HTML page with the highlight stylesheet
        #[arg(long)]
        page: bool,

        /// Page title (default: the input file name)
        #[arg(long)]
        title: Option<String>,
    },

    /// Print the effective configuration as JSON
    Config,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum RenderFormat {
    /// HTML when the input holds both '<' and '>', Markdown otherwise
    Auto,
    Markdown,
    Html,
}
