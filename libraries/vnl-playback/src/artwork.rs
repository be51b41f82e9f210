//! Artwork lookup for the media session and `metadataChanged` events
//!
//! Lookups run on blocking worker threads, so implementations may do file I/O.

use crate::error::Result;
use crate::types::CoverArt;

/// Source of cover images and embedded track pictures
#[cfg_attr(test, mockall::automock)]
pub trait ArtworkSource: Send + Sync + 'static {
    /// Load the playlist cover image behind `locator`
    ///
    /// `Ok(None)` means the locator resolved but held no usable image.
    fn cover_image(&self, locator: &str) -> Result<Option<CoverArt>>;

    /// Extract the picture embedded in the audio file behind `locator`
    fn embedded_picture(&self, locator: &str) -> Result<Option<CoverArt>>;
}

#[cfg(feature = "artwork")]
impl ArtworkSource for vnl_artwork::ArtworkExtractor {
    fn cover_image(&self, locator: &str) -> Result<Option<CoverArt>> {
        let image = self
            .load_image(locator)
            .map_err(|e| crate::error::PlaybackError::Artwork(e.to_string()))?;
        Ok(image.map(|a| CoverArt::new(a.data, a.mime_type)))
    }

    fn embedded_picture(&self, locator: &str) -> Result<Option<CoverArt>> {
        let picture = self
            .extract_locator(locator)
            .map_err(|e| crate::error::PlaybackError::Artwork(e.to_string()))?;
        Ok(picture.map(|a| CoverArt::new(a.data, a.mime_type)))
    }
}
