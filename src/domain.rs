pub mod session;
pub mod swipe;

pub use session::{OutcomeReport, SessionController, SessionState, Tally};
pub use swipe::{
    Badge, BadgeKind, CardTransform, GestureEnd, SettleTimer, SwipeConfig, SwipePhase,
    SwipeSurface,
};

use chrono::{DateTime, Utc};
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Direction a card left the surface in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SwipeDirection {
    /// Swiped left: mark the photo for removal
    Left,
    /// Swiped right: keep the photo
    Right,
}

impl SwipeDirection {
    /// Resolves the direction from the sign of a horizontal offset
    pub fn from_offset(offset_x: f32) -> Self {
        if offset_x > 0.0 {
            SwipeDirection::Right
        } else {
            SwipeDirection::Left
        }
    }

    /// +1.0 for right, -1.0 for left
    pub fn sign(self) -> f32 {
        match self {
            SwipeDirection::Left => -1.0,
            SwipeDirection::Right => 1.0,
        }
    }
}

/// Where a photo lives. Opaque to the session; only the renderer and the
/// external opener look inside.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Locator {
    /// A file in the user's photo folder
    Path(PathBuf),
    /// A built-in demo asset, identified by its index in the demo set
    Demo(usize),
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Path(path) => write!(f, "{}", path.display()),
            Locator::Demo(id) => write!(f, "demo://landscape-{}", id + 1),
        }
    }
}

/// Immutable reference to one photo in the review queue
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhotoRef {
    pub locator: Locator,
    pub display_name: Option<String>,
    pub size: u64,
    pub modified_date: Option<DateTime<Utc>>,
}

impl PhotoRef {
    pub fn from_path(path: &Path) -> io::Result<Self> {
        let metadata = fs::metadata(path)?;
        let modified_date = metadata.modified().ok().map(DateTime::<Utc>::from);

        let display_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(|s| s.to_string());

        Ok(PhotoRef {
            locator: Locator::Path(path.to_path_buf()),
            display_name,
            size: metadata.len(),
            modified_date,
        })
    }

    pub fn demo(id: usize, name: &str) -> Self {
        PhotoRef {
            locator: Locator::Demo(id),
            display_name: Some(name.to_string()),
            size: 0,
            modified_date: None,
        }
    }

    /// Demo assets are never added to the deletion candidate set
    pub fn is_demo(&self) -> bool {
        matches!(self.locator, Locator::Demo(_))
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.locator {
            Locator::Path(path) => Some(path),
            Locator::Demo(_) => None,
        }
    }

    /// Name shown on the card overlay, falling back to the queue position
    pub fn title(&self, index: usize) -> String {
        self.display_name
            .clone()
            .unwrap_or_else(|| format!("Photo {}", index + 1))
    }

    /// Secondary line of the card overlay
    pub fn subtitle(&self) -> String {
        match &self.locator {
            Locator::Path(path) => path.display().to_string(),
            Locator::Demo(_) => "Demo Photo".to_string(),
        }
    }
}

/// Returns true for extensions the previewer can decode
pub fn is_photo_extension(ext: &str) -> bool {
    matches!(
        ext.to_lowercase().as_str(),
        "png" | "jpg" | "jpeg" | "gif" | "bmp" | "webp" | "tif" | "tiff" | "ico"
    )
}

/// Incremental progress of a long batch fetch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LoadProgress {
    pub loaded: usize,
    pub total: usize,
}

impl LoadProgress {
    pub fn ratio(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            (self.loaded as f64 / self.total as f64).min(1.0)
        }
    }
}

/// Options for photo discovery
#[derive(Debug, Clone, Default)]
pub struct DiscoveryOptions {
    /// Show hidden files
    pub show_hidden: bool,
    /// Sort order
    pub sort_by: SortBy,
    /// Reverse sort order
    pub reverse: bool,
    /// Keep at most this many photos after sorting
    pub limit: Option<usize>,
}

/// Sort order for photos
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortBy {
    /// Sort by modification date
    #[default]
    Date,
    /// Sort by file name
    Name,
    /// Sort by file size
    Size,
}

/// Discovers photos in a directory.
///
/// # Behavior
/// - Keeps only files with a photo extension
/// - Filters out hidden files unless `show_hidden` is set
/// - Does not recurse into subdirectories
/// - Reports `(loaded, total)` after every inspected candidate
/// - Skips entries that cannot be read instead of failing the whole scan
///
/// Fails only when the directory itself cannot be listed.
pub fn discover_photos(
    dir_path: &Path,
    options: &DiscoveryOptions,
    on_progress: &dyn Fn(LoadProgress),
) -> io::Result<Vec<PhotoRef>> {
    let mut candidates = Vec::new();

    for entry_result in fs::read_dir(dir_path)? {
        let entry = match entry_result {
            Ok(e) => e,
            Err(_) => continue,
        };

        let path = entry.path();

        let file_name = match path.file_name().and_then(|n| n.to_str()) {
            Some(name) => name,
            None => continue,
        };

        if !options.show_hidden && file_name.starts_with('.') {
            continue;
        }

        let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("");
        if !is_photo_extension(extension) {
            continue;
        }

        candidates.push(path);
    }

    let total = candidates.len();
    on_progress(LoadProgress { loaded: 0, total });

    let mut photos = Vec::with_capacity(total);
    for (i, path) in candidates.iter().enumerate() {
        match fs::metadata(path) {
            Ok(m) if m.is_file() => {
                if let Ok(photo) = PhotoRef::from_path(path) {
                    photos.push(photo);
                }
            }
            _ => {}
        }
        on_progress(LoadProgress {
            loaded: i + 1,
            total,
        });
    }

    sort_photos(&mut photos, options.sort_by);

    if options.reverse {
        photos.reverse();
    }

    if let Some(limit) = options.limit {
        photos.truncate(limit);
    }

    Ok(photos)
}

fn sort_photos(photos: &mut [PhotoRef], sort_by: SortBy) {
    match sort_by {
        SortBy::Date => photos.sort_by(|a, b| a.modified_date.cmp(&b.modified_date)),
        SortBy::Name => photos.sort_by(|a, b| {
            let a = a.display_name.as_deref().unwrap_or("").to_lowercase();
            let b = b.display_name.as_deref().unwrap_or("").to_lowercase();
            a.cmp(&b)
        }),
        SortBy::Size => photos.sort_by(|a, b| a.size.cmp(&b.size)),
    }
}
