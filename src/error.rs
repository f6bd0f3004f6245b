use std::path::PathBuf;
use thiserror::Error;

/// Problems detected before any file is touched.
#[derive(Error, Debug)]
pub enum OrganizeError {
    #[error("directory does not exist: {}", path.display())]
    DirectoryNotFound { path: PathBuf },

    #[error("path is not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    #[error("small limit ({small} bytes) must not exceed medium limit ({medium} bytes)")]
    InvalidSizeLimits { small: u64, medium: u64 },
}
