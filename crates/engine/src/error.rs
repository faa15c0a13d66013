use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Path does not exist: {}", .0.display())]
    PathNotFound(PathBuf),

    #[error("File is not a .eml file: {}", .0.display())]
    NotAnEml(PathBuf),

    #[error("Invalid file pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: globset::Error,
    },

    #[error("Failed to read file '{}': {source}", path.display())]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to set modification time of '{}': {source}", path.display())]
    SetTime {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Local time {value} does not exist for '{}'", path.display())]
    NonexistentLocalTime { path: PathBuf, value: String },
}

pub type Result<T> = std::result::Result<T, EngineError>;
