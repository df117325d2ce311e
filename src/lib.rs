//! mediashelf - A catalog for a personal music and movie collection.
//!
//! The collection is a single JSON document (`media.json`) with a music
//! table and a movie table. This library loads it, filters and summarizes
//! its tables, produces edited copies, and writes it back out.
//!
//! # Modules
//!
//! - [`catalog`] - Entry and collection types
//! - [`storage`] - Collection sources and the document codec
//! - [`facets`] - Distinct formats and years for filter choices
//! - [`filter`] - Filter criteria and filtered views
//! - [`stats`] - Format and year frequency tables
//! - [`edit`] - Append/remove operations and new-entry validation
//! - [`commands`] - High-level operations used by the CLI
//! - [`config`] - Configuration loading
//! - [`cli`] - Command-line interface definitions
//! - [`logging`] - Tracing subscriber setup

pub mod catalog;
pub mod cli;
pub mod commands;
pub mod config;
pub mod edit;
pub mod facets;
pub mod filter;
pub mod logging;
pub mod stats;
pub mod storage;
