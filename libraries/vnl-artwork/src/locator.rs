//! Locator resolution
//!
//! Tracks and covers arrive as opaque locators: `file://` URIs or plain paths
//! can be read here, anything else (e.g. `content://`) belongs to the host.

use crate::error::{ArtworkError, Result};
use std::path::PathBuf;
use url::Url;

/// Resolve a locator to a local file path
pub fn resolve(locator: &str) -> Result<PathBuf> {
    let locator = locator.trim();

    if locator.starts_with("file://") {
        let url = Url::parse(locator)
            .map_err(|_| ArtworkError::UnsupportedLocator(locator.to_string()))?;
        return url
            .to_file_path()
            .map_err(|()| ArtworkError::UnsupportedLocator(locator.to_string()));
    }

    if locator.contains("://") {
        return Err(ArtworkError::UnsupportedLocator(locator.to_string()));
    }

    Ok(PathBuf::from(locator))
}
