use crate::error::{ArtworkError, Result};
use crate::locator;
use crate::types::ArtworkData;
use lofty::{PictureType, TaggedFileExt};
use lru::LruCache;
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tracing::{debug, warn};

/// Maximum artwork size (5MB)
const MAX_ARTWORK_SIZE: usize = 5 * 1024 * 1024;

/// Loads cover images and extracts embedded artwork, with LRU caching
///
/// Both the cache and the extractor are `Sync`, so one instance can serve
/// blocking worker threads concurrently.
pub struct ArtworkExtractor {
    cache: Arc<Mutex<LruCache<PathBuf, Option<Arc<ArtworkData>>>>>,
}

impl ArtworkExtractor {
    /// Create a new extractor with the specified cache size
    ///
    /// # Arguments
    /// * `cache_size` - Maximum number of audio files to remember (0 caches one)
    pub fn new(cache_size: usize) -> Self {
        let capacity = NonZeroUsize::new(cache_size).unwrap_or(NonZeroUsize::MIN);

        Self {
            cache: Arc::new(Mutex::new(LruCache::new(capacity))),
        }
    }

    /// Extract embedded artwork from an audio file
    ///
    /// Returns `Ok(Some(artwork))` if artwork found, `Ok(None)` if the file has
    /// no picture, or `Err` if the file could not be read. Misses are cached too,
    /// so repeated plays of an artless track don't re-read it.
    pub fn extract(&self, path: &Path) -> Result<Option<ArtworkData>> {
        // Canonicalize path for consistent cache keys
        let canonical_path = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        if let Some(cached) = self.lock_cache().get(&canonical_path) {
            return Ok(cached.as_deref().cloned());
        }

        let artwork = Self::extract_from_file(path)?;
        self.lock_cache()
            .put(canonical_path, artwork.clone().map(Arc::new));
        Ok(artwork)
    }

    /// Extract embedded artwork from the audio file behind a locator
    pub fn extract_locator(&self, locator: &str) -> Result<Option<ArtworkData>> {
        let path = locator::resolve(locator)?;
        self.extract(&path)
    }

    /// Load a standalone cover image
    ///
    /// Returns `Ok(None)` for an empty file.
    pub fn load_image(&self, locator: &str) -> Result<Option<ArtworkData>> {
        let path = locator::resolve(locator)?;
        if !path.exists() {
            return Err(ArtworkError::FileNotFound(path));
        }

        let data = std::fs::read(&path)?;
        if data.is_empty() {
            debug!(path = %path.display(), "Cover image is empty");
            return Ok(None);
        }
        Self::check_size(&path, data.len())?;

        Ok(Some(ArtworkData::sniffed(data)))
    }

    fn lock_cache(&self) -> MutexGuard<'_, LruCache<PathBuf, Option<Arc<ArtworkData>>>> {
        self.cache.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_size(path: &Path, size: usize) -> Result<()> {
        if size > MAX_ARTWORK_SIZE {
            warn!(
                path = %path.display(),
                size,
                max = MAX_ARTWORK_SIZE,
                "Artwork too large, skipping"
            );
            return Err(ArtworkError::TooLarge(size, MAX_ARTWORK_SIZE));
        }
        Ok(())
    }

    /// Extract artwork from a file without caching
    fn extract_from_file(path: &Path) -> Result<Option<ArtworkData>> {
        if !path.exists() {
            return Err(ArtworkError::FileNotFound(path.to_path_buf()));
        }

        let tagged_file = lofty::read_from_path(path)?;

        // Get primary tag or first available tag
        let tag = tagged_file
            .primary_tag()
            .or_else(|| tagged_file.first_tag());

        let Some(tag) = tag else {
            return Ok(None);
        };

        // Prefer front cover, otherwise use first picture
        let pictures = tag.pictures();
        let picture = pictures
            .iter()
            .find(|p| matches!(p.pic_type(), PictureType::CoverFront))
            .or_else(|| pictures.first());

        let Some(picture) = picture else {
            return Ok(None);
        };

        let data = picture.data();
        Self::check_size(path, data.len())?;

        // Get MIME type (default to "image/jpeg" if not specified)
        let mime_type = picture
            .mime_type()
            .map(|m| m.as_str().to_string())
            .unwrap_or_else(|| "image/jpeg".to_string());

        Ok(Some(ArtworkData::new(data.to_vec(), mime_type)))
    }
}
