//! Filter criteria and filtered views.
//!
//! Every criterion is a plain string as a form control would hold it. An
//! empty value or `"all"` matches everything for that dimension, and all
//! dimensions must match. Values that are not understood match nothing.

use crate::catalog::{EntryType, MovieEntry, MusicEntry};
use crate::edit::IndexError;

/// Criterion value meaning "no restriction".
pub const ANY: &str = "all";

fn is_any(value: &str) -> bool {
    value.is_empty() || value == ANY
}

/// Case-insensitive substring test. `term` must already be lowercase.
fn contains_term(haystack: &str, term: &str) -> bool {
    haystack.to_lowercase().contains(term)
}

/// A predicate over one entry type.
pub trait Criteria {
    type Item;

    fn matches(&self, item: &Self::Item) -> bool;
}

/// Filter state for the music table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MusicCriteria {
    /// Matched against performer, album and track.
    pub search: String,
    pub format: String,
    /// Compared with the decimal form of the year.
    pub year: String,
    /// `"album"`, `"track"`, or empty/`"all"`.
    pub entry_type: String,
}

impl MusicCriteria {
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }

    #[must_use]
    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = year.into();
        self
    }

    #[must_use]
    pub fn with_entry_type(mut self, entry_type: impl Into<String>) -> Self {
        self.entry_type = entry_type.into();
        self
    }

    fn matches_search(&self, item: &MusicEntry) -> bool {
        if self.search.is_empty() {
            return true;
        }

        let term = self.search.to_lowercase();
        contains_term(&item.performer, &term)
            || item.album.as_deref().is_some_and(|a| contains_term(a, &term))
            || item.track.as_deref().is_some_and(|t| contains_term(t, &term))
    }

    fn matches_entry_type(&self, item: &MusicEntry) -> bool {
        if is_any(&self.entry_type) {
            return true;
        }

        EntryType::parse(&self.entry_type).is_some_and(|wanted| item.entry_type() == Some(wanted))
    }
}

impl Criteria for MusicCriteria {
    type Item = MusicEntry;

    fn matches(&self, item: &MusicEntry) -> bool {
        self.matches_search(item)
            && (is_any(&self.format) || item.format == self.format)
            && (is_any(&self.year) || item.year.to_string() == self.year)
            && self.matches_entry_type(item)
    }
}

/// Filter state for the movie table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MovieCriteria {
    /// Matched against title and director.
    pub search: String,
    pub format: String,
}

impl MovieCriteria {
    #[must_use]
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: impl Into<String>) -> Self {
        self.format = format.into();
        self
    }
}

impl Criteria for MovieCriteria {
    type Item = MovieEntry;

    fn matches(&self, item: &MovieEntry) -> bool {
        let search_match = self.search.is_empty() || {
            let term = self.search.to_lowercase();
            contains_term(&item.title, &term) || contains_term(&item.director, &term)
        };

        search_match && (is_any(&self.format) || item.format == self.format)
    }
}

/// Entries matching `criteria`, in their original order.
#[must_use]
pub fn filter<'a, T, C: Criteria<Item = T>>(items: &'a [T], criteria: &C) -> Vec<&'a T> {
    items.iter().filter(|item| criteria.matches(item)).collect()
}

/// A visible row together with its position in the backing sequence.
#[derive(Debug)]
pub struct Row<'a, T> {
    pub index: usize,
    pub item: &'a T,
}

/// The filtered rows of one table.
#[derive(Debug)]
pub struct View<'a, T> {
    rows: Vec<Row<'a, T>>,
    total: usize,
}

impl<'a, T> View<'a, T> {
    #[must_use]
    pub fn rows(&self) -> &[Row<'a, T>] {
        &self.rows
    }

    /// The visible entries without their indices.
    #[must_use]
    pub fn items(&self) -> Vec<&'a T> {
        self.rows.iter().map(|row| row.item).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Size of the unfiltered sequence.
    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    /// Map a 0-based visible row to its index in the backing sequence.
    ///
    /// # Errors
    ///
    /// Returns `IndexError::NoSuchRow` if the view has no such row.
    pub fn backing_index(&self, row: usize) -> Result<usize, IndexError> {
        self.rows
            .get(row)
            .map(|r| r.index)
            .ok_or(IndexError::NoSuchRow {
                row,
                len: self.rows.len(),
            })
    }
}

/// Filter `items` and remember where each visible row came from.
#[must_use]
pub fn view<'a, T, C: Criteria<Item = T>>(items: &'a [T], criteria: &C) -> View<'a, T> {
    let rows = items
        .iter()
        .enumerate()
        .filter(|(_, item)| criteria.matches(item))
        .map(|(index, item)| Row { index, item })
        .collect();

    View {
        rows,
        total: items.len(),
    }
}
