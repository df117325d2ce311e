//! Command implementations behind the CLI.
//!
//! Each command loads the collection, runs one pure operation on it and,
//! for edits, writes the resulting collection back to its source.

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::Context;
use tracing::info;

use crate::catalog::{Collection, Entry, EntryType, MediaKind};
use crate::cli::FilterArgs;
use crate::config::{Config, expand_tilde};
use crate::edit::{IndexError, MovieDraft, MusicDraft, current_year};
use crate::facets::{Facets, default_format};
use crate::filter::{View, view};
use crate::stats::{Tally, YearBucket, count_by_format, count_by_year};
use crate::storage::local::LocalFileSource;
use crate::storage::{
    CollectionSource, LoadError, export_document, load, load_or_empty, open_source, save,
};

/// Output target meaning "write to stdout".
pub const STDOUT: &str = "-";

/// Configuration plus the source the command works on.
struct Workspace {
    config: Config,
    source: Box<dyn CollectionSource>,
}

impl Workspace {
    /// Resolve the source from `--file` or the configured location.
    fn open(file: Option<&str>) -> anyhow::Result<Self> {
        let config = Config::load()?;
        let location = file.unwrap_or(&config.collection.source);
        let source = open_source(location, config.remote.timeout())?;

        Ok(Self { config, source })
    }

    /// Load for display. Any failure degrades to an empty collection.
    fn read(&self) -> Collection {
        load_or_empty(self.source.as_ref())
    }

    /// Load for editing.
    ///
    /// A missing document starts a new collection. Any other failure is an
    /// error so an unreadable document is never overwritten.
    fn read_for_edit(&self) -> anyhow::Result<Collection> {
        match load(self.source.as_ref()) {
            Ok(collection) => Ok(collection),
            Err(LoadError::NotFound(location)) => {
                info!(%location, "starting a new collection");
                Ok(Collection::empty())
            }
            Err(e) => Err(e).with_context(|| {
                format!(
                    "Cannot edit {}; fix or remove the document first",
                    self.source.location()
                )
            }),
        }
    }

    fn write(&self, collection: &Collection) -> anyhow::Result<()> {
        save(self.source.as_ref(), collection)?;
        Ok(())
    }
}

/// Filtered entries of one table.
#[derive(Debug, Clone)]
pub struct Listing {
    pub entries: Vec<Entry>,
    pub tally: Tally,
}

impl Listing {
    fn from_view<T: Clone + Into<Entry>>(view: &View<'_, T>) -> Self {
        Self {
            entries: view.items().into_iter().cloned().map(Into::into).collect(),
            tally: Tally::of(view),
        }
    }
}

/// Aggregates over the filtered entries of one table.
#[derive(Debug, Clone)]
pub struct StatsReport {
    pub formats: BTreeMap<String, usize>,
    /// Present for music only.
    pub years: Option<Vec<YearBucket>>,
    pub tally: Tally,
}

/// List the entries of `kind` that match `filters`.
///
/// # Errors
///
/// Returns an error if the config or source cannot be opened, or a music-only
/// filter is used for movies. A document that fails to load lists as empty.
pub fn list(file: Option<&str>, kind: MediaKind, filters: &FilterArgs) -> anyhow::Result<Listing> {
    let workspace = Workspace::open(file)?;
    let collection = workspace.read();

    match kind {
        MediaKind::Music => Ok(Listing::from_view(&view(
            &collection.music,
            &filters.music_criteria(),
        ))),
        MediaKind::Movies => Ok(Listing::from_view(&view(
            &collection.movies,
            &filters.movie_criteria()?,
        ))),
    }
}

/// Distinct formats and years of the collection.
///
/// # Errors
///
/// Returns an error if the config or source cannot be opened.
pub fn facets(file: Option<&str>) -> anyhow::Result<Facets> {
    let workspace = Workspace::open(file)?;
    Ok(Facets::of(&workspace.read()))
}

/// Format and year counts of the entries of `kind` that match `filters`.
///
/// # Errors
///
/// Same conditions as [`list`].
pub fn stats(
    file: Option<&str>,
    kind: MediaKind,
    filters: &FilterArgs,
) -> anyhow::Result<StatsReport> {
    let workspace = Workspace::open(file)?;
    let collection = workspace.read();

    match kind {
        MediaKind::Music => {
            let visible = view(&collection.music, &filters.music_criteria());
            Ok(StatsReport {
                formats: count_by_format(visible.items()),
                years: Some(count_by_year(visible.items())),
                tally: Tally::of(&visible),
            })
        }
        MediaKind::Movies => {
            let visible = view(&collection.movies, &filters.movie_criteria()?);
            Ok(StatsReport {
                formats: count_by_format(visible.items()),
                years: None,
                tally: Tally::of(&visible),
            })
        }
    }
}

/// Result of adding an entry.
#[derive(Debug, Clone)]
pub struct Added {
    pub entry: Entry,
    /// Size of the table after the addition.
    pub len: usize,
}

/// Validate a music entry, append it and write the collection back.
///
/// Without a `format` the entry takes the first format already used in the
/// music table.
///
/// # Errors
///
/// Returns an error if validation fails (nothing is loaded or written), the
/// document cannot be loaded for editing, or the write fails.
pub fn add_music(
    file: Option<&str>,
    performer: &str,
    entry_type: EntryType,
    name: &str,
    year: i32,
    format: Option<&str>,
) -> anyhow::Result<Added> {
    let entry = MusicDraft {
        performer: performer.to_string(),
        entry_type,
        name: name.to_string(),
        year,
        format: format.unwrap_or_default().to_string(),
    }
    .into_entry(current_year())?;

    append(file, entry.into(), format.is_none())
}

/// Validate a movie entry, append it and write the collection back.
///
/// Without a `format` the entry takes the first format already used in the
/// movie table.
///
/// # Errors
///
/// Same conditions as [`add_music`].
pub fn add_movie(
    file: Option<&str>,
    title: &str,
    director: &str,
    format: Option<&str>,
) -> anyhow::Result<Added> {
    let entry = MovieDraft {
        title: title.to_string(),
        director: director.to_string(),
        format: format.unwrap_or_default().to_string(),
    }
    .into_entry()?;

    append(file, entry.into(), format.is_none())
}

fn append(file: Option<&str>, entry: Entry, preselect_format: bool) -> anyhow::Result<Added> {
    let workspace = Workspace::open(file)?;
    let current = workspace.read_for_edit()?;

    let entry = if preselect_format {
        let format = default_format(&current, entry.kind());
        info!(%format, "no format given, using the table's first format");
        entry.with_format(format)
    } else {
        entry
    };

    let collection = current.with_appended(entry.clone());
    workspace.write(&collection)?;

    Ok(Added {
        len: collection.len_of(entry.kind()),
        entry,
    })
}

/// Delete the entry shown at 1-based `row` of the listing for `filters`.
///
/// The row is mapped back to the entry's position in the unfiltered table
/// before removal.
///
/// # Errors
///
/// Returns an error if the row does not exist in that listing, the document
/// cannot be loaded for editing, or the write fails.
pub fn delete(
    file: Option<&str>,
    kind: MediaKind,
    row: usize,
    filters: &FilterArgs,
) -> anyhow::Result<Entry> {
    let workspace = Workspace::open(file)?;
    let collection = workspace.read_for_edit()?;

    let (index, removed) = match kind {
        MediaKind::Music => {
            let visible = view(&collection.music, &filters.music_criteria());
            let index = visible_to_backing(&visible, row)?;
            (index, Entry::from(collection.music[index].clone()))
        }
        MediaKind::Movies => {
            let visible = view(&collection.movies, &filters.movie_criteria()?);
            let index = visible_to_backing(&visible, row)?;
            (index, Entry::from(collection.movies[index].clone()))
        }
    };

    let next = collection.with_removed_at(kind, index)?;
    workspace.write(&next)?;

    Ok(removed)
}

/// Map a 1-based listing row to a backing index.
fn visible_to_backing<T>(visible: &View<'_, T>, row: usize) -> Result<usize, IndexError> {
    let position = row.checked_sub(1).ok_or(IndexError::NoSuchRow {
        row,
        len: visible.len(),
    })?;

    visible.backing_index(position).map_err(|_| IndexError::NoSuchRow {
        row,
        len: visible.len(),
    })
}

/// Where an export went.
#[derive(Debug, Clone)]
pub enum Exported {
    /// The document bytes, for printing.
    Stdout(Vec<u8>),
    File(PathBuf),
}

/// Export the collection to `output`, `-` for stdout, or the configured
/// export path.
///
/// # Errors
///
/// Returns an error if the document cannot be loaded (a missing document
/// exports as empty) or the output cannot be written.
pub fn export(file: Option<&str>, output: Option<&str>) -> anyhow::Result<Exported> {
    let workspace = Workspace::open(file)?;
    let collection = workspace.read_for_edit()?;

    let target = output.unwrap_or(&workspace.config.collection.export);
    if target == STDOUT {
        return Ok(Exported::Stdout(export_document(&collection)?));
    }

    let path = expand_tilde(target);
    save(&LocalFileSource::new(path.clone()), &collection)?;

    Ok(Exported::File(path))
}
