use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Ways in which producing a listing can fail.
///
/// Only opening or reading the directory itself is fatal; entries that cannot
/// be inspected are logged and left out of the listing instead.
#[derive(Error, Debug)]
pub enum ListingError {
    /// The path does not exist, is not a directory, or its name is too long.
    #[error("directory not found {path}: {how}")]
    NotFound {
        /// Directory that was requested.
        path: PathBuf,
        /// The reason reported by the operating system.
        how: String,
    },

    /// The directory exists but may not be read.
    #[error("access to directory {path} denied: {how}")]
    Forbidden {
        /// Directory that was requested.
        path: PathBuf,
        /// The reason reported by the operating system.
        how: String,
    },

    /// Any other failure, pointing at the platform rather than the client.
    #[error("failed to list {path}: {how}")]
    Internal {
        /// Directory that was requested.
        path: PathBuf,
        /// What went wrong.
        how: String,
    },
}

/// Host-visible outcome of a [`ListingError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorClass {
    NotFound,
    Forbidden,
    Internal,
}

impl ErrorClass {
    /// HTTP status a server should answer with.
    pub fn status_code(self) -> u16 {
        match self {
            Self::NotFound => 404,
            Self::Forbidden => 403,
            Self::Internal => 500,
        }
    }
}

impl ListingError {
    /// Classifies a failure to open or read the directory at `path`.
    pub fn from_io(path: &Path, err: &io::Error) -> Self {
        let path = path.to_path_buf();
        let how = err.to_string();
        match err.kind() {
            io::ErrorKind::NotFound
            | io::ErrorKind::NotADirectory
            | io::ErrorKind::InvalidFilename => Self::NotFound { path, how },
            io::ErrorKind::PermissionDenied => Self::Forbidden { path, how },
            _ => Self::Internal { path, how },
        }
    }

    pub fn internal(path: &Path, how: impl Into<String>) -> Self {
        Self::Internal {
            path: path.to_path_buf(),
            how: how.into(),
        }
    }

    pub fn class(&self) -> ErrorClass {
        match self {
            Self::NotFound { .. } => ErrorClass::NotFound,
            Self::Forbidden { .. } => ErrorClass::Forbidden,
            Self::Internal { .. } => ErrorClass::Internal,
        }
    }

    pub fn path(&self) -> &Path {
        match self {
            Self::NotFound { path, .. }
            | Self::Forbidden { path, .. }
            | Self::Internal { path, .. } => path,
        }
    }
}
