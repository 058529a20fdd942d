//! Pswp - swipe through photos in the terminal
//!
//! This crate provides the core of the pswp application: the review session,
//! the swipe gesture model, photo libraries and the terminal interface.

pub mod app;
pub mod async_preview;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod feedback;
pub mod file_opener;
pub mod library;
pub mod loader;
pub mod platform;
pub mod preview;
pub mod tui;

// Re-export primary types for convenience
pub use app::App;
pub use config::UserConfig;
pub use domain::{
    discover_photos, DiscoveryOptions, PhotoRef, SessionController, SessionState, SortBy,
    SwipeConfig, SwipeDirection, SwipeSurface, Tally,
};
pub use error::{PswpError, Result};
pub use file_opener::open_file;
pub use library::{DemoLibrary, DirectoryLibrary, PhotoLibrary};
