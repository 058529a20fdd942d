// Opens photos in the system's default image viewer

use crate::domain::PhotoRef;
use crate::error::{PswpError, Result};
use std::path::Path;
use tracing::info;

/// Opens a file with the OS default application. Returns once the viewer has been launched.
pub fn open_file(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(PswpError::Unavailable(format!(
            "{} no longer exists",
            path.display()
        )));
    }
    info!(path = %path.display(), "opening in external viewer");
    open::that_detached(path)?;
    Ok(())
}

/// Opens the photo behind a card. Demo photos only exist inside pswp.
pub fn open_photo(photo: &PhotoRef) -> Result<()> {
    match photo.path() {
        Some(path) => open_file(path),
        None => Err(PswpError::Unavailable(
            "Demo photos can't be opened outside pswp".to_string(),
        )),
    }
}
