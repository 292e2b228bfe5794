use std::path::PathBuf;

use crate::convert;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("SQLite database file not found: {}", .0.display())]
    SqliteDbNotFound(PathBuf),
    #[error("Conversion failed: {0}")]
    ConvertFailed(convert::Error),
    #[error("std::io error: {0}")]
    IoError(std::io::Error),
}

impl From<convert::Error> for Error {
    fn from(err: convert::Error) -> Self {
        Self::ConvertFailed(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Self::IoError(err)
    }
}
