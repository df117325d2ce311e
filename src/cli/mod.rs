//! CLI interface for mediashelf.
//!
//! Provides command-line argument parsing using clap.

use clap::{Args, Parser, Subcommand};

use crate::catalog::{EntryType, MediaKind};
use crate::filter::{MovieCriteria, MusicCriteria};

/// Command-line interface for mediashelf.
#[derive(Parser)]
#[command(name = "mediashelf")]
#[command(author, version, about = "Music and movie collection catalog", long_about = None)]
pub struct Cli {
    /// Collection document to use instead of the configured source.
    #[arg(short, long, global = true)]
    pub file: Option<String>,

    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Filter flags shared by `list`, `stats` and `delete`.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    /// Case-insensitive text to look for (performer/album/track or title/director).
    #[arg(short, long)]
    pub search: Option<String>,

    /// Only this format (e.g., "CD"); "all" for any.
    #[arg(short = 'F', long)]
    pub format: Option<String>,

    /// Only this release year (music only).
    #[arg(short, long)]
    pub year: Option<String>,

    /// Only albums or only tracks: "album", "track" or "all" (music only).
    #[arg(short = 't', long = "type")]
    pub entry_type: Option<String>,
}

impl FilterArgs {
    #[must_use]
    pub fn music_criteria(&self) -> MusicCriteria {
        MusicCriteria {
            search: self.search.clone().unwrap_or_default(),
            format: self.format.clone().unwrap_or_default(),
            year: self.year.clone().unwrap_or_default(),
            entry_type: self.entry_type.clone().unwrap_or_default(),
        }
    }

    /// Movie criteria, or an error if a music-only flag was given.
    ///
    /// # Errors
    ///
    /// Returns an error if `--year` or `--type` is set.
    pub fn movie_criteria(&self) -> anyhow::Result<MovieCriteria> {
        if self.year.is_some() {
            anyhow::bail!("--year only applies to music");
        }
        if self.entry_type.is_some() {
            anyhow::bail!("--type only applies to music");
        }

        Ok(MovieCriteria {
            search: self.search.clone().unwrap_or_default(),
            format: self.format.clone().unwrap_or_default(),
        })
    }
}

/// Available CLI commands.
#[derive(Subcommand)]
pub enum Commands {
    /// List the entries of one table, optionally filtered.
    List {
        /// Which table to show.
        #[arg(value_enum)]
        kind: MediaKind,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Show the formats (and years, for music) present in a table.
    Facets {
        #[arg(value_enum)]
        kind: MediaKind,
    },

    /// Show format and year counts for the filtered entries of a table.
    Stats {
        #[arg(value_enum)]
        kind: MediaKind,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Add an album or a track to the music table.
    AddMusic {
        /// Performing artist or band.
        #[arg(short, long)]
        performer: String,

        /// Album name (adds an album entry).
        #[arg(short, long, conflicts_with = "track", required_unless_present = "track")]
        album: Option<String>,

        /// Track name (adds a track entry).
        #[arg(short, long)]
        track: Option<String>,

        /// Release year.
        #[arg(short, long)]
        year: i32,

        /// Format (e.g., "CD", "LP"). Defaults to the first format already
        /// in the music table.
        #[arg(short = 'F', long)]
        format: Option<String>,
    },

    /// Add a movie to the movie table.
    AddMovie {
        #[arg(short, long)]
        title: String,

        #[arg(short, long)]
        director: String,

        /// Format (e.g., "DVD"). Defaults to the first format already in
        /// the movie table.
        #[arg(short = 'F', long)]
        format: Option<String>,
    },

    /// Delete the entry shown at ROW of a (filtered) listing.
    Delete {
        #[arg(value_enum)]
        kind: MediaKind,

        /// 1-based row number as printed by `list` with the same filters.
        row: usize,

        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Write the collection document.
    Export {
        /// Output file, or "-" for stdout. Defaults to the configured export path.
        #[arg(short, long)]
        output: Option<String>,
    },
}

/// Resolve the album/track flags of `add-music` into a type and name.
///
/// # Errors
///
/// Returns an error unless exactly one of the two is given.
pub fn music_name(
    album: Option<String>,
    track: Option<String>,
) -> anyhow::Result<(EntryType, String)> {
    match (album, track) {
        (Some(album), None) => Ok((EntryType::Album, album)),
        (None, Some(track)) => Ok((EntryType::Track, track)),
        _ => anyhow::bail!("Give exactly one of --album or --track"),
    }
}
