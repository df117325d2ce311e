//! Frequency tables for chart display.

use std::collections::BTreeMap;
use std::fmt;

use crate::catalog::{MediaEntry, MusicEntry};
use crate::filter::View;

/// Above this many distinct years, [`count_by_year`] groups by decade.
pub const DECADE_THRESHOLD: usize = 15;

/// Width of a decade bucket in years.
pub const DECADE_WIDTH: i32 = 10;

/// Number of entries per format.
#[must_use]
pub fn count_by_format<'a, T: MediaEntry + 'a>(
    items: impl IntoIterator<Item = &'a T>,
) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for item in items {
        *counts.entry(item.format().to_string()).or_insert(0) += 1;
    }
    counts
}

/// One bar of the year chart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YearBucket {
    /// A year (`"1975"`) or a decade (`"1970s"`).
    pub label: String,
    pub count: usize,
}

/// Number of entries per year, ascending.
///
/// When there are more than [`DECADE_THRESHOLD`] distinct years the counts
/// are summed per decade and labelled like `"1970s"`.
#[must_use]
pub fn count_by_year<'a>(items: impl IntoIterator<Item = &'a MusicEntry>) -> Vec<YearBucket> {
    let mut years: BTreeMap<i32, usize> = BTreeMap::new();
    for item in items {
        *years.entry(item.year).or_insert(0) += 1;
    }

    if years.len() <= DECADE_THRESHOLD {
        return years
            .into_iter()
            .map(|(year, count)| YearBucket {
                label: year.to_string(),
                count,
            })
            .collect();
    }

    let mut decades: BTreeMap<i32, usize> = BTreeMap::new();
    for (year, count) in years {
        let decade = year.div_euclid(DECADE_WIDTH) * DECADE_WIDTH;
        *decades.entry(decade).or_insert(0) += count;
    }

    decades
        .into_iter()
        .map(|(decade, count)| YearBucket {
            label: format!("{decade}s"),
            count,
        })
        .collect()
}

/// How many rows a view shows out of the whole table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub shown: usize,
    pub total: usize,
}

impl Tally {
    #[must_use]
    pub fn of<T>(view: &View<'_, T>) -> Self {
        Self {
            shown: view.len(),
            total: view.total(),
        }
    }
}

impl fmt::Display for Tally {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Showing {} of {} items", self.shown, self.total)
    }
}
