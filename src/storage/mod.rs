//! Collection sources and the JSON document codec.
//!
//! This is the only I/O boundary of the crate. A source yields the raw bytes
//! of a `media.json` document; [`load`] parses them into a [`Collection`] and
//! [`export_document`] produces the bytes written back out.

pub mod local;
#[cfg(feature = "remote")]
pub mod remote;

use std::time::Duration;

use tracing::{debug, warn};

use crate::catalog::Collection;
use crate::config::expand_tilde;
use crate::storage::local::LocalFileSource;

/// Default file name of the collection document.
pub const DOCUMENT_FILE_NAME: &str = "media.json";

/// Errors that can occur while loading the collection document.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("Collection document not found: {0}")]
    NotFound(String),

    #[error("Failed to read {location}: {source}")]
    Read {
        location: String,
        source: std::io::Error,
    },

    #[error("{location} answered with HTTP status {status}")]
    Status { location: String, status: u16 },

    #[error("Failed to fetch {location}: {message}")]
    Transport { location: String, message: String },

    #[error("Unsupported collection source: {0}")]
    UnsupportedSource(String),

    #[error("Failed to parse collection document: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Errors that can occur while exporting or writing the collection document.
#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("Failed to serialize collection: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("Failed to write {location}: {source}")]
    Io {
        location: String,
        source: std::io::Error,
    },

    #[error("Collection source is read-only: {0}")]
    ReadOnly(String),
}

/// Trait for places a collection document can live (local file, HTTP, etc.).
pub trait CollectionSource {
    /// Fetch the raw document bytes.
    ///
    /// # Errors
    ///
    /// Returns `LoadError` if the document is missing or cannot be fetched.
    fn read_document(&self) -> Result<Vec<u8>, LoadError>;

    /// Replace the document with the given bytes.
    ///
    /// # Errors
    ///
    /// Returns `WriteError` if the source is read-only or the write fails.
    fn write_document(&self, contents: &[u8]) -> Result<(), WriteError>;

    /// Human-readable location used in logs and messages.
    fn location(&self) -> String;
}

/// Parse a collection document.
///
/// # Errors
///
/// Returns `LoadError::Parse` if the bytes are not a valid document.
pub fn parse_document(bytes: &[u8]) -> Result<Collection, LoadError> {
    Ok(serde_json::from_slice(bytes)?)
}

/// Serialize a collection as 2-space indented UTF-8 JSON.
///
/// # Errors
///
/// Returns `WriteError::Serialize` if serialization fails.
pub fn export_document(collection: &Collection) -> Result<Vec<u8>, WriteError> {
    Ok(serde_json::to_vec_pretty(collection)?)
}

/// Load and parse the collection from a source.
///
/// # Errors
///
/// Returns the source's `LoadError`, or `LoadError::Parse` for a malformed
/// document. Callers choose their own fallback.
pub fn load(source: &dyn CollectionSource) -> Result<Collection, LoadError> {
    let bytes = source.read_document()?;
    let collection = parse_document(&bytes)?;

    debug!(
        location = %source.location(),
        music = collection.music.len(),
        movies = collection.movies.len(),
        "loaded collection"
    );

    Ok(collection)
}

/// Load the collection, falling back to an empty one on any failure.
pub fn load_or_empty(source: &dyn CollectionSource) -> Collection {
    load(source).unwrap_or_else(|e| {
        warn!(location = %source.location(), error = %e, "using empty collection");
        Collection::empty()
    })
}

/// Export the collection and hand it to the source for writing.
///
/// # Errors
///
/// Returns `WriteError` if serialization or the write fails.
pub fn save(source: &dyn CollectionSource, collection: &Collection) -> Result<(), WriteError> {
    let bytes = export_document(collection)?;
    source.write_document(&bytes)?;

    debug!(location = %source.location(), bytes = bytes.len(), "saved collection");
    Ok(())
}

/// Returns true if the location names an HTTP(S) resource.
#[must_use]
pub fn is_remote(location: &str) -> bool {
    location.starts_with("http://") || location.starts_with("https://")
}

/// Open the source named by a configured location.
///
/// Paths get `~` expansion. URLs need the `remote` feature.
///
/// # Errors
///
/// Returns `LoadError::UnsupportedSource` for a URL when the `remote` feature
/// is disabled, or `LoadError::Transport` if the HTTP client cannot be built.
pub fn open_source(
    location: &str,
    timeout: Duration,
) -> Result<Box<dyn CollectionSource>, LoadError> {
    if is_remote(location) {
        #[cfg(feature = "remote")]
        {
            let source = remote::HttpSource::new(location, timeout)?;
            return Ok(Box::new(source));
        }

        #[cfg(not(feature = "remote"))]
        {
            let _ = timeout;
            return Err(LoadError::UnsupportedSource(format!(
                "{location} (rebuild with the `remote` feature to load over HTTP)"
            )));
        }
    }

    Ok(Box::new(LocalFileSource::new(expand_tilde(location))))
}
