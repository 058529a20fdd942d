//! Photo library access.
//!
//! A library hands back an ordered batch of [`PhotoRef`]s, optionally
//! reporting progress while it works. The session never talks to a library
//! directly; results go through the loader and the app's load boundary.

use crate::domain::{discover_photos, DiscoveryOptions, LoadProgress, PhotoRef};
use crate::error::{PswpError, Result};
use std::path::PathBuf;
use tracing::{debug, info};

/// Source of photos to review
pub trait PhotoLibrary: Send + Sync {
    /// Short human-readable name, used in notices and logs
    fn label(&self) -> String;

    /// Fetches a batch of photos. May call `on_progress` any number of times.
    fn request_photos(
        &self,
        options: &DiscoveryOptions,
        on_progress: &dyn Fn(LoadProgress),
    ) -> Result<Vec<PhotoRef>>;
}

/// Photos stored as image files in one folder
#[derive(Debug, Clone)]
pub struct DirectoryLibrary {
    root: PathBuf,
}

impl DirectoryLibrary {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl PhotoLibrary for DirectoryLibrary {
    fn label(&self) -> String {
        self.root.display().to_string()
    }

    fn request_photos(
        &self,
        options: &DiscoveryOptions,
        on_progress: &dyn Fn(LoadProgress),
    ) -> Result<Vec<PhotoRef>> {
        debug!(root = %self.root.display(), "scanning photo folder");

        let photos = discover_photos(&self.root, options, on_progress)
            .map_err(|e| PswpError::from_library_io(e, &self.root))?;

        if photos.is_empty() {
            return Err(PswpError::NoPhotos(self.root.clone()));
        }

        info!(count = photos.len(), root = %self.root.display(), "photos discovered");
        Ok(photos)
    }
}

/// Names of the built-in demo landscapes, in queue order
pub const DEMO_PHOTOS: [&str; 8] = [
    "Alpine Lake",
    "Mountain Valley",
    "Coastal Cliffs",
    "Sunrise Peaks",
    "Misty Forest",
    "Rolling Hills",
    "Desert Dunes",
    "Ocean Horizon",
];

/// Built-in demo photos, rendered procedurally by the previewer
#[derive(Debug, Clone, Copy, Default)]
pub struct DemoLibrary;

impl DemoLibrary {
    pub fn photos() -> Vec<PhotoRef> {
        DEMO_PHOTOS
            .iter()
            .enumerate()
            .map(|(id, name)| PhotoRef::demo(id, name))
            .collect()
    }
}

impl PhotoLibrary for DemoLibrary {
    fn label(&self) -> String {
        "demo photos".to_string()
    }

    fn request_photos(
        &self,
        options: &DiscoveryOptions,
        on_progress: &dyn Fn(LoadProgress),
    ) -> Result<Vec<PhotoRef>> {
        let mut photos = Self::photos();
        if options.reverse {
            photos.reverse();
        }
        if let Some(limit) = options.limit {
            photos.truncate(limit);
        }

        let total = photos.len();
        for loaded in 0..=total {
            on_progress(LoadProgress { loaded, total });
        }
        Ok(photos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::fs;
    use tempfile::TempDir;

    fn no_progress(_: LoadProgress) {}

    mod directory_tests {
        use super::*;

        #[test]
        fn test_directory_library_lists_photos() {
            let temp_dir = TempDir::new().unwrap();
            fs::write(temp_dir.path().join("one.jpg"), b"1").unwrap();
            fs::write(temp_dir.path().join("two.png"), b"2").unwrap();
            fs::write(temp_dir.path().join("readme.md"), b"3").unwrap();

            let library = DirectoryLibrary::new(temp_dir.path());
            let photos = library
                .request_photos(&DiscoveryOptions::default(), &no_progress)
                .unwrap();

            assert_eq!(photos.len(), 2);
            assert!(photos.iter().all(|p| !p.is_demo()));
        }

        #[test]
        fn test_directory_library_empty_result_is_an_error() {
            let temp_dir = TempDir::new().unwrap();
            fs::write(temp_dir.path().join("notes.txt"), b"not a photo").unwrap();

            let library = DirectoryLibrary::new(temp_dir.path());
            let result = library.request_photos(&DiscoveryOptions::default(), &no_progress);

            assert!(matches!(result, Err(PswpError::NoPhotos(_))));
        }

        #[test]
        fn test_directory_library_missing_folder() {
            let library = DirectoryLibrary::new("/nonexistent/photos/folder");
            let result = library.request_photos(&DiscoveryOptions::default(), &no_progress);

            let err = result.unwrap_err();
            assert!(matches!(err, PswpError::Unavailable(_)));
        }

        #[test]
        fn test_directory_library_respects_limit() {
            let temp_dir = TempDir::new().unwrap();
            for i in 0..10 {
                fs::write(temp_dir.path().join(format!("{:02}.jpg", i)), b"x").unwrap();
            }

            let library = DirectoryLibrary::new(temp_dir.path());
            let options = DiscoveryOptions {
                limit: Some(4),
                ..Default::default()
            };
            let photos = library.request_photos(&options, &no_progress).unwrap();

            assert_eq!(photos.len(), 4);
        }

        #[test]
        fn test_directory_library_label() {
            let library = DirectoryLibrary::new("/photos/2024");
            assert_eq!(library.label(), "/photos/2024");
        }
    }

    mod demo_tests {
        use super::*;

        #[test]
        fn test_demo_library_returns_all_demo_photos() {
            let photos = DemoLibrary
                .request_photos(&DiscoveryOptions::default(), &no_progress)
                .unwrap();

            assert_eq!(photos.len(), DEMO_PHOTOS.len());
            assert!(photos.iter().all(|p| p.is_demo()));
            assert_eq!(photos[0].display_name.as_deref(), Some("Alpine Lake"));
        }

        #[test]
        fn test_demo_library_reports_completion() {
            let last = Cell::new(LoadProgress::default());
            DemoLibrary
                .request_photos(&DiscoveryOptions::default(), &|p| last.set(p))
                .unwrap();

            assert_eq!(last.get(), LoadProgress { loaded: 8, total: 8 });
        }

        #[test]
        fn test_demo_library_limit_and_reverse() {
            let options = DiscoveryOptions {
                reverse: true,
                limit: Some(2),
                ..Default::default()
            };
            let photos = DemoLibrary.request_photos(&options, &no_progress).unwrap();

            assert_eq!(photos.len(), 2);
            assert_eq!(photos[0].display_name.as_deref(), Some("Ocean Horizon"));
        }
    }
}
