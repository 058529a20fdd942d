//! Error types shared across the crate

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the photo library, the loader, and the user config.
///
/// Everything else in the crate (gesture math, tallies, cursor movement) is
/// total and never produces an error.
#[derive(Debug, Error)]
pub enum PswpError {
    /// The library refused access to its photos
    #[error("permission denied: {0}")]
    PermissionDenied(String),

    /// The library answered but had nothing to review
    #[error("no photos found in {}", .0.display())]
    NoPhotos(PathBuf),

    /// The library could not be reached at all
    #[error("photo library unavailable: {0}")]
    Unavailable(String),

    /// A load was requested while another one was still in flight
    #[error("a photo load is already in progress")]
    LoadBusy,

    #[error("config error: {0}")]
    ConfigError(String),

    #[error(transparent)]
    Io(#[from] io::Error),
}

impl PswpError {
    /// Maps an I/O failure coming from the photo store into a library error
    pub fn from_library_io(err: io::Error, path: &std::path::Path) -> Self {
        match err.kind() {
            io::ErrorKind::PermissionDenied => {
                PswpError::PermissionDenied(path.display().to_string())
            }
            io::ErrorKind::NotFound => {
                PswpError::Unavailable(format!("{} does not exist", path.display()))
            }
            _ => PswpError::Unavailable(format!("{}: {}", path.display(), err)),
        }
    }
}

pub type Result<T> = std::result::Result<T, PswpError>;
