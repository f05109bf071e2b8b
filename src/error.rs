// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LecternError {
    #[error("I/O error: {source} (path: {})", path.display())]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("Malformed notebook JSON in {}: {source}", path.display())]
    NotebookJson {
        source: serde_json::Error,
        path: PathBuf,
    },

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Generic error: {0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, LecternError>;

impl LecternError {
    /// Wraps an I/O error with the path it occurred on.
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        Self::Io {
            source,
            path: path.into(),
        }
    }
}

// Allow `?` on std::io::Error by converting with unknown path.
impl From<std::io::Error> for LecternError {
    fn from(source: std::io::Error) -> Self {
        LecternError::Io {
            source,
            path: PathBuf::from("<unknown>"),
        }
    }
}

impl From<walkdir::Error> for LecternError {
    fn from(e: walkdir::Error) -> Self {
        LecternError::Other(e.to_string())
    }
}
