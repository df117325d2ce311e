//! Collection mutations and new-entry validation.
//!
//! Mutations never touch the collection they are called on; they return a
//! new value, so a rejected edit leaves the previous state intact.

use chrono::Datelike;
use tracing::debug;

use crate::catalog::{Collection, Entry, EntryType, Extra, MediaKind, MovieEntry, MusicEntry};

/// Maximum length for user-provided text fields.
pub const MAX_INPUT_LENGTH: usize = 200;

/// Earliest release year accepted for a new music entry.
pub const MIN_YEAR: i32 = 1900;

/// The current calendar year, the latest year accepted for a new entry.
#[must_use]
pub fn current_year() -> i32 {
    chrono::Local::now().year()
}

/// A position that does not exist.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IndexError {
    #[error("No {kind} entry at position {index} ({len} entries)")]
    OutOfBounds {
        kind: MediaKind,
        index: usize,
        len: usize,
    },

    #[error("No row {row} in the current view ({len} rows shown)")]
    NoSuchRow { row: usize, len: usize },
}

/// A new entry that cannot be added.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("{field} too long: {len} chars (max {max})", max = MAX_INPUT_LENGTH)]
    TooLong { field: &'static str, len: usize },

    #[error("Year {year} is out of range ({min}-{latest})", min = MIN_YEAR)]
    YearOutOfRange { year: i32, latest: i32 },
}

impl Collection {
    /// A copy of this collection with `entry` appended to its sequence.
    #[must_use]
    pub fn with_appended(&self, entry: impl Into<Entry>) -> Self {
        let mut next = self.clone();
        let entry = entry.into();
        let kind = entry.kind();

        match entry {
            Entry::Music(music) => next.music.push(music),
            Entry::Movie(movie) => next.movies.push(movie),
        }

        debug!(%kind, len = next.len_of(kind), "appended entry");
        next
    }

    /// A copy of this collection without the `kind` entry at `index`.
    ///
    /// # Errors
    ///
    /// Returns `IndexError::OutOfBounds` if `index` is past the end of the
    /// sequence.
    pub fn with_removed_at(&self, kind: MediaKind, index: usize) -> Result<Self, IndexError> {
        let len = self.len_of(kind);
        if index >= len {
            return Err(IndexError::OutOfBounds { kind, index, len });
        }

        let mut next = self.clone();
        match kind {
            MediaKind::Music => {
                next.music.remove(index);
            }
            MediaKind::Movies => {
                next.movies.remove(index);
            }
        }

        debug!(%kind, index, "removed entry");
        Ok(next)
    }
}

/// Trim `value` and check it is present and not too long.
fn required(value: &str, field: &'static str) -> Result<String, ValidationError> {
    let value = value.trim();

    if value.is_empty() {
        return Err(ValidationError::Missing(field));
    }

    let len = value.chars().count();
    if len > MAX_INPUT_LENGTH {
        return Err(ValidationError::TooLong { field, len });
    }

    Ok(value.to_string())
}

/// Form input for a new music entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MusicDraft {
    pub performer: String,
    pub entry_type: EntryType,
    /// Album or track name, depending on `entry_type`.
    pub name: String,
    pub year: i32,
    pub format: String,
}

impl MusicDraft {
    /// Validate the draft and build the entry. `latest_year` is the last
    /// year accepted, normally [`current_year`].
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the performer or name is blank or too
    /// long, or the year is before [`MIN_YEAR`] or after `latest_year`.
    pub fn into_entry(self, latest_year: i32) -> Result<MusicEntry, ValidationError> {
        let performer = required(&self.performer, "Performer")?;
        let name = match self.entry_type {
            EntryType::Album => required(&self.name, "Album name")?,
            EntryType::Track => required(&self.name, "Track name")?,
        };

        if !(MIN_YEAR..=latest_year).contains(&self.year) {
            return Err(ValidationError::YearOutOfRange {
                year: self.year,
                latest: latest_year,
            });
        }

        let format = self.format.trim().to_string();
        let (album, track) = match self.entry_type {
            EntryType::Album => (Some(name), None),
            EntryType::Track => (None, Some(name)),
        };

        Ok(MusicEntry {
            performer,
            album,
            track,
            year: self.year,
            format,
            extra: Extra::new(),
        })
    }
}

/// Form input for a new movie entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieDraft {
    pub title: String,
    pub director: String,
    pub format: String,
}

impl MovieDraft {
    /// Validate the draft and build the entry.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the title or director is blank or too
    /// long.
    pub fn into_entry(self) -> Result<MovieEntry, ValidationError> {
        Ok(MovieEntry {
            title: required(&self.title, "Title")?,
            director: required(&self.director, "Director")?,
            format: self.format.trim().to_string(),
            extra: Extra::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn music(performer: &str) -> MusicEntry {
        MusicEntry {
            performer: performer.to_string(),
            album: Some("Album".to_string()),
            track: None,
            year: 1980,
            format: "CD".to_string(),
            ..Default::default()
        }
    }

    fn movie(title: &str) -> MovieEntry {
        MovieEntry {
            title: title.to_string(),
            director: "Director".to_string(),
            format: "DVD".to_string(),
            ..Default::default()
        }
    }

    fn collection() -> Collection {
        Collection {
            music: vec![music("A"), music("B"), music("C")],
            movies: vec![movie("X")],
            ..Default::default()
        }
    }

    mod append_tests {
        use super::*;

        #[test]
        fn appends_music_at_end() {
            let original = collection();
            let next = original.with_appended(music("D"));

            assert_eq!(next.music.len(), 4);
            assert_eq!(next.music[3].performer, "D");
            assert_eq!(next.movies, original.movies);
        }

        #[test]
        fn appends_movie_at_end() {
            let original = collection();
            let next = original.with_appended(movie("Y"));

            assert_eq!(next.movies.len(), 2);
            assert_eq!(next.movies[1].title, "Y");
            assert_eq!(next.music, original.music);
        }

        #[test]
        fn original_is_untouched() {
            let original = collection();
            let snapshot = original.clone();
            let _ = original.with_appended(music("D"));
            assert_eq!(original, snapshot);
        }
    }

    mod remove_tests {
        use super::*;

        #[test]
        fn removes_the_indexed_entry() {
            let next = collection().with_removed_at(MediaKind::Music, 1).unwrap();

            let performers: Vec<_> = next.music.iter().map(|m| m.performer.as_str()).collect();
            assert_eq!(performers, vec!["A", "C"]);
            assert_eq!(next.movies.len(), 1);
        }

        #[test]
        fn out_of_bounds_is_rejected() {
            let original = collection();
            let snapshot = original.clone();

            let result = original.with_removed_at(MediaKind::Music, 5);

            assert_eq!(
                result,
                Err(IndexError::OutOfBounds {
                    kind: MediaKind::Music,
                    index: 5,
                    len: 3
                })
            );
            assert_eq!(original, snapshot);
        }

        #[test]
        fn index_equal_to_len_is_rejected() {
            let result = collection().with_removed_at(MediaKind::Movies, 1);
            assert!(result.is_err());
        }

        #[test]
        fn removes_last_movie() {
            let next = collection().with_removed_at(MediaKind::Movies, 0).unwrap();
            assert!(next.movies.is_empty());
        }
    }

    mod music_draft_tests {
        use super::*;

        const LATEST: i32 = 2024;

        fn draft(entry_type: EntryType) -> MusicDraft {
            MusicDraft {
                performer: "  Queen ".to_string(),
                entry_type,
                name: "Innuendo".to_string(),
                year: 1991,
                format: "CD".to_string(),
            }
        }

        #[test]
        fn album_draft_fills_album_only() {
            let entry = draft(EntryType::Album).into_entry(LATEST).unwrap();

            assert_eq!(entry.performer, "Queen");
            assert_eq!(entry.album.as_deref(), Some("Innuendo"));
            assert_eq!(entry.track, None);
            assert_eq!(entry.entry_type(), Some(EntryType::Album));
        }

        #[test]
        fn track_draft_fills_track_only() {
            let entry = draft(EntryType::Track).into_entry(LATEST).unwrap();

            assert_eq!(entry.album, None);
            assert_eq!(entry.track.as_deref(), Some("Innuendo"));
        }

        #[test]
        fn blank_performer_is_rejected() {
            let mut d = draft(EntryType::Album);
            d.performer = "   ".to_string();
            assert_eq!(d.into_entry(LATEST), Err(ValidationError::Missing("Performer")));
        }

        #[test]
        fn blank_name_reports_the_type() {
            let mut album = draft(EntryType::Album);
            album.name = String::new();
            assert_eq!(
                album.into_entry(LATEST),
                Err(ValidationError::Missing("Album name"))
            );

            let mut track = draft(EntryType::Track);
            track.name = String::new();
            assert_eq!(
                track.into_entry(LATEST),
                Err(ValidationError::Missing("Track name"))
            );
        }

        #[test]
        fn early_year_is_rejected() {
            let mut d = draft(EntryType::Album);
            d.year = 1899;
            assert_eq!(
                d.into_entry(LATEST),
                Err(ValidationError::YearOutOfRange {
                    year: 1899,
                    latest: LATEST
                })
            );
        }

        #[test]
        fn future_year_is_rejected() {
            let mut d = draft(EntryType::Album);
            d.year = 9999;
            let err = d.into_entry(LATEST).unwrap_err();

            assert_eq!(
                err,
                ValidationError::YearOutOfRange {
                    year: 9999,
                    latest: LATEST
                }
            );
            assert_eq!(err.to_string(), "Year 9999 is out of range (1900-2024)");
        }

        #[test]
        fn boundary_years_are_accepted() {
            for year in [MIN_YEAR, LATEST] {
                let mut d = draft(EntryType::Track);
                d.year = year;
                assert_eq!(d.into_entry(LATEST).unwrap().year, year);
            }
        }

        #[test]
        fn current_year_is_plausible() {
            assert!(current_year() >= 2024);
        }

        #[test]
        fn too_long_performer_is_rejected() {
            let mut d = draft(EntryType::Album);
            d.performer = "a".repeat(MAX_INPUT_LENGTH + 1);
            let err = d.into_entry(LATEST).unwrap_err();
            assert!(err.to_string().contains("too long"));
        }

        #[test]
        fn empty_format_is_allowed() {
            let mut d = draft(EntryType::Album);
            d.format = String::new();
            assert_eq!(d.into_entry(LATEST).unwrap().format, "");
        }
    }

    mod movie_draft_tests {
        use super::*;

        #[test]
        fn valid_movie() {
            let entry = MovieDraft {
                title: "Alien".to_string(),
                director: "Ridley Scott".to_string(),
                format: "DVD".to_string(),
            }
            .into_entry()
            .unwrap();

            assert_eq!(entry.title, "Alien");
        }

        #[test]
        fn missing_title_or_director() {
            let no_title = MovieDraft {
                title: String::new(),
                director: "Ridley Scott".to_string(),
                format: "DVD".to_string(),
            };
            assert_eq!(no_title.into_entry(), Err(ValidationError::Missing("Title")));

            let no_director = MovieDraft {
                title: "Alien".to_string(),
                director: " ".to_string(),
                format: "DVD".to_string(),
            };
            assert_eq!(
                no_director.into_entry(),
                Err(ValidationError::Missing("Director"))
            );
        }
    }
}
