//! Filter vocabulary derived from the collection.

use std::collections::BTreeSet;

use crate::catalog::{Collection, MediaEntry, MediaKind, MusicEntry, UNKNOWN_YEAR};

/// Distinct formats across `items`, sorted ascending.
#[must_use]
pub fn distinct_formats<T: MediaEntry>(items: &[T]) -> Vec<String> {
    items
        .iter()
        .map(|item| item.format().to_string())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Distinct release years as strings, most recent first.
///
/// [`UNKNOWN_YEAR`] means "unknown" and is left out.
#[must_use]
pub fn distinct_years(items: &[MusicEntry]) -> Vec<String> {
    items
        .iter()
        .map(|item| item.year)
        .filter(|&year| year != UNKNOWN_YEAR)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .rev()
        .map(|year| year.to_string())
        .collect()
}

/// Format preselected for a new entry of `kind`: the first non-empty
/// format already in that table, or empty when there is none.
#[must_use]
pub fn default_format(collection: &Collection, kind: MediaKind) -> String {
    let formats = match kind {
        MediaKind::Music => distinct_formats(&collection.music),
        MediaKind::Movies => distinct_formats(&collection.movies),
    };

    formats
        .into_iter()
        .find(|format| !format.is_empty())
        .unwrap_or_default()
}

/// Filter choices for both tables of a collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Facets {
    pub music_formats: Vec<String>,
    pub music_years: Vec<String>,
    pub movie_formats: Vec<String>,
}

impl Facets {
    #[must_use]
    pub fn of(collection: &Collection) -> Self {
        Self {
            music_formats: distinct_formats(&collection.music),
            music_years: distinct_years(&collection.music),
            movie_formats: distinct_formats(&collection.movies),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::MovieEntry;

    fn music(year: i32, format: &str) -> MusicEntry {
        MusicEntry {
            performer: "Band".to_string(),
            album: Some("Album".to_string()),
            track: None,
            year,
            format: format.to_string(),
            ..Default::default()
        }
    }

    mod distinct_formats_tests {
        use super::*;

        #[test]
        fn deduplicates_and_sorts() {
            let items = vec![
                music(1990, "LP"),
                music(1991, "CD"),
                music(1992, "LP"),
                music(1993, "MC"),
            ];
            assert_eq!(distinct_formats(&items), vec!["CD", "LP", "MC"]);
        }

        #[test]
        fn empty_format_participates() {
            let items = vec![music(1990, "LP"), music(1991, "")];
            assert_eq!(distinct_formats(&items), vec!["", "LP"]);
        }

        #[test]
        fn empty_input() {
            let items: Vec<MusicEntry> = vec![];
            assert!(distinct_formats(&items).is_empty());
        }

        #[test]
        fn works_for_movies() {
            let items = vec![
                MovieEntry {
                    title: "Alien".to_string(),
                    director: "Ridley Scott".to_string(),
                    format: "DVD".to_string(),
                    ..Default::default()
                },
                MovieEntry {
                    title: "Heat".to_string(),
                    director: "Michael Mann".to_string(),
                    format: "Blu-ray".to_string(),
                    ..Default::default()
                },
            ];
            assert_eq!(distinct_formats(&items), vec!["Blu-ray", "DVD"]);
        }
    }

    mod distinct_years_tests {
        use super::*;

        #[test]
        fn most_recent_first() {
            let items = vec![
                music(1975, "CD"),
                music(2001, "CD"),
                music(1975, "LP"),
                music(1989, "CD"),
            ];
            assert_eq!(distinct_years(&items), vec!["2001", "1989", "1975"]);
        }

        #[test]
        fn numeric_not_lexicographic_order() {
            let items = vec![music(999, "CD"), music(1000, "CD")];
            assert_eq!(distinct_years(&items), vec!["1000", "999"]);
        }

        #[test]
        fn unknown_year_is_skipped() {
            let items = vec![music(0, "CD"), music(1980, "CD")];
            assert_eq!(distinct_years(&items), vec!["1980"]);
        }
    }

    mod default_format_tests {
        use super::*;

        #[test]
        fn first_non_empty_format() {
            let collection = Collection {
                music: vec![music(1990, "LP"), music(1991, ""), music(1992, "CD")],
                ..Default::default()
            };

            assert_eq!(default_format(&collection, MediaKind::Music), "CD");
        }

        #[test]
        fn empty_table_has_no_format() {
            assert_eq!(default_format(&Collection::empty(), MediaKind::Movies), "");
        }
    }

    #[test]
    fn facets_cover_both_tables() {
        let collection = Collection {
            music: vec![music(1975, "CD")],
            movies: vec![MovieEntry {
                title: "Alien".to_string(),
                director: "Ridley Scott".to_string(),
                format: "DVD".to_string(),
                ..Default::default()
            }],
            ..Default::default()
        };

        let facets = Facets::of(&collection);

        assert_eq!(facets.music_formats, vec!["CD"]);
        assert_eq!(facets.music_years, vec!["1975"]);
        assert_eq!(facets.movie_formats, vec!["DVD"]);
    }
}
