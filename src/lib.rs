// src/lib.rs
//! Load a table from a local file, a JSON endpoint or a Google Sheet, keep it
//! as the base for live filtering, and remember a light/dark preference.
//!
//! A selector string decides where the data comes from:
//!
//! - `local_data/scores.xlsx|Results` reads a local file (the prefix is
//!   configurable), picking a sheet for workbooks;
//! - `https://example.com/scores.json` fetches a JSON document;
//! - anything else is `<spreadsheetId>|<sheetName>` for the spreadsheet
//!   service.

pub mod cloud_handler;
pub mod config;
pub mod csv_handler;
pub mod data_types;
pub mod error;
pub mod loader;
pub mod local_handler;
pub mod remote_handler;
pub mod shell;
pub mod source;
pub mod theme;
pub mod ui;
pub mod xlsx_handler;

pub use config::{Config, SourceEntry, UnwrapMode};
pub use data_types::{filter, Row, TableData};
pub use error::{ErrorKind, LoadError, LoadResult, SetupError};
pub use loader::{LoadOutcome, Loader, Severity};
pub use shell::ShellState;
pub use source::{classify, DataSource, SourceKind};
pub use theme::{JsonFileStore, MemoryStore, PreferenceStore, ThemePreference};
