use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum JotterError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Config error: {0}")]
    Config(#[from] confique::Error),

    #[error("Seed error: {0}")]
    Seed(String),

    #[error("No note is selected")]
    NoActiveNote,

    #[error("Editor error: {0}")]
    Editor(String),

    #[error("Config file not found: {}", .0.display())]
    ConfigNotFound(PathBuf),
}

pub type Result<T> = std::result::Result<T, JotterError>;
