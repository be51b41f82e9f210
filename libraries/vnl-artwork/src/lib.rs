//! VNL Artwork - Cover image loading and embedded artwork extraction
//!
//! This library loads the images shown on the media session: standalone
//! playlist cover files, and pictures embedded in audio files (read with the
//! Lofty library: ID3v2 APIC frames, FLAC METADATA_BLOCK_PICTURE, MP4 covr).
//!
//! # Features
//!
//! - Resolve `file://` URIs and plain paths to local files
//! - Extract embedded artwork, preferring the front cover
//! - LRU caching of extraction results (hits and misses)
//! - Size limits to prevent memory issues
//!
//! # Example
//!
//! ```no_run
//! use vnl_artwork::ArtworkExtractor;
//!
//! let extractor = ArtworkExtractor::new(32);
//!
//! match extractor.extract_locator("file:///music/track.mp3") {
//!     Ok(Some(artwork)) => {
//!         println!("Found artwork: {} bytes, type: {}",
//!             artwork.data.len(), artwork.mime_type);
//!     }
//!     Ok(None) => println!("No artwork found"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

mod error;
mod extractor;
mod locator;
mod types;

// Re-export public API
pub use error::{ArtworkError, Result};
pub use extractor::ArtworkExtractor;
pub use locator::resolve;
pub use types::ArtworkData;
