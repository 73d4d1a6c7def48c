use std::io;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum EzjumpError {
    /// Bad or missing mode/keyword. The dispatcher exits quietly on this one.
    #[error("Usage error: {0}")]
    Usage(String),
    #[error("Storage error at {}: {source}", path.display())]
    Storage {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Terminal error: {0}")]
    Terminal(String),
    #[error("I/O error: {0}")]
    IoError(#[from] io::Error),
    #[error("Path error: {0}")]
    PathError(String),
}

impl EzjumpError {
    pub fn storage(path: impl Into<PathBuf>, source: io::Error) -> Self {
        EzjumpError::Storage {
            path: path.into(),
            source,
        }
    }

    pub fn is_usage(&self) -> bool {
        matches!(self, EzjumpError::Usage(_))
    }
}
