//! Collection document and media entry types.
//!
//! The JSON keys are the literal labels used by existing `media.json` files
//! and must not be renamed.

use std::fmt;

use clap::ValueEnum;
use serde::{Deserialize, Deserializer, Serialize};

/// Document keys this crate does not model, kept so a rewrite loses nothing.
pub type Extra = serde_json::Map<String, serde_json::Value>;

/// Year used when `ROK` is missing or null.
pub const UNKNOWN_YEAR: i32 = 0;

/// Which sequence of a [`Collection`] an operation targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, ValueEnum)]
pub enum MediaKind {
    Music,
    Movies,
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Music => f.write_str("music"),
            Self::Movies => f.write_str("movies"),
        }
    }
}

/// Whether a music entry stands for a whole album or a single track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryType {
    Album,
    Track,
}

impl EntryType {
    /// Parse a filter or form value. Returns `None` for anything that is
    /// neither `"album"` nor `"track"`.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "album" => Some(Self::Album),
            "track" => Some(Self::Track),
            _ => None,
        }
    }
}

impl fmt::Display for EntryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Album => f.write_str("album"),
            Self::Track => f.write_str("track"),
        }
    }
}

/// One row of the music table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MusicEntry {
    /// Performing artist or band.
    #[serde(rename = "SKUPINA")]
    pub performer: String,
    #[serde(rename = "ALBUM", default)]
    pub album: Option<String>,
    #[serde(rename = "TRACK", default)]
    pub track: Option<String>,
    /// Release year, [`UNKNOWN_YEAR`] when the document has none.
    #[serde(rename = "ROK", default, deserialize_with = "year_or_unknown")]
    pub year: i32,
    /// Physical or digital medium (e.g., "CD", "LP").
    #[serde(rename = "FORMÁT")]
    pub format: String,
    #[serde(flatten)]
    pub extra: Extra,
}

fn year_or_unknown<'de, D: Deserializer<'de>>(deserializer: D) -> Result<i32, D::Error> {
    Ok(Option::<i32>::deserialize(deserializer)?.unwrap_or(UNKNOWN_YEAR))
}

impl MusicEntry {
    /// Classify the entry. Entries carrying both an album and a track, or
    /// neither, are not classified.
    #[must_use]
    pub fn entry_type(&self) -> Option<EntryType> {
        match (&self.album, &self.track) {
            (Some(_), None) => Some(EntryType::Album),
            (None, Some(_)) => Some(EntryType::Track),
            _ => None,
        }
    }
}

/// One row of the movie table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MovieEntry {
    #[serde(rename = "JMÉNO")]
    pub title: String,
    #[serde(rename = "REŽIE")]
    pub director: String,
    #[serde(rename = "FORMÁT")]
    pub format: String,
    #[serde(flatten)]
    pub extra: Extra,
}

/// Behavior shared by both entry shapes.
pub trait MediaEntry {
    fn format(&self) -> &str;
}

impl MediaEntry for MusicEntry {
    fn format(&self) -> &str {
        &self.format
    }
}

impl MediaEntry for MovieEntry {
    fn format(&self) -> &str {
        &self.format
    }
}

/// Table row rendering; absent fields show as `-`.
impl fmt::Display for MusicEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} | {} | {} | {} | {}",
            self.performer,
            self.album.as_deref().unwrap_or("-"),
            self.track.as_deref().unwrap_or("-"),
            self.year,
            self.format
        )
    }
}

impl fmt::Display for MovieEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} | {} | {}", self.title, self.director, self.format)
    }
}

/// An entry of either kind, as produced by a validated draft.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Entry {
    Music(MusicEntry),
    Movie(MovieEntry),
}

impl Entry {
    /// The same entry with its format replaced.
    #[must_use]
    pub fn with_format(self, format: String) -> Self {
        match self {
            Self::Music(music) => Self::Music(MusicEntry { format, ..music }),
            Self::Movie(movie) => Self::Movie(MovieEntry { format, ..movie }),
        }
    }

    #[must_use]
    pub fn kind(&self) -> MediaKind {
        match self {
            Self::Music(_) => MediaKind::Music,
            Self::Movie(_) => MediaKind::Movies,
        }
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Music(music) => fmt::Display::fmt(music, f),
            Self::Movie(movie) => fmt::Display::fmt(movie, f),
        }
    }
}

impl From<MusicEntry> for Entry {
    fn from(entry: MusicEntry) -> Self {
        Self::Music(entry)
    }
}

impl From<MovieEntry> for Entry {
    fn from(entry: MovieEntry) -> Self {
        Self::Movie(entry)
    }
}

/// The root `media.json` document.
///
/// Sequence order is insertion order, and position is the only identity an
/// entry has.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    #[serde(default)]
    pub music: Vec<MusicEntry>,
    #[serde(default)]
    pub movies: Vec<MovieEntry>,
    /// Top-level keys besides the two tables.
    #[serde(flatten)]
    pub extra: Extra,
}

impl Collection {
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Number of entries in the given sequence.
    #[must_use]
    pub fn len_of(&self, kind: MediaKind) -> usize {
        match kind {
            MediaKind::Music => self.music.len(),
            MediaKind::Movies => self.movies.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.music.is_empty() && self.movies.is_empty()
    }
}
