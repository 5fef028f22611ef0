use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DomainError {
    #[error("cannot read recording `{}`: {source}", path.display())]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("recording `{}` is {size} bytes, above the {limit} byte limit", path.display())]
    RecordingTooLarge { path: PathBuf, size: u64, limit: u64 },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("API responded with status code: {status}")]
    Api { status: u16, body: String },
}

impl DomainError {
    pub fn file_access(path: impl Into<PathBuf>, source: io::Error) -> Self {
        DomainError::FileAccess {
            path: path.into(),
            source,
        }
    }

    pub fn transport(message: impl Into<String>) -> Self {
        DomainError::Transport(message.into())
    }

    /// Status code carried by an API error, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            DomainError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
