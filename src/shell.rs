// src/shell.rs
use chrono::{DateTime, Local};
use tracing::{debug, warn};

use crate::data_types::{filter, TableData};
use crate::loader::{LoadOutcome, Severity};
use crate::theme::{PreferenceStore, ThemePreference};

pub const NO_RESULTS: &str = "No results.";
const LOADING_MESSAGE: &str = "Loading data...";

#[derive(Debug, Clone)]
pub struct Status {
    pub message: String,
    pub severity: Severity,
    pub at: DateTime<Local>,
}

/// Everything the front-end shows, independent of the toolkit.
///
/// Each load gets a generation number; only the completion carrying the most
/// recent generation is applied, so a slow earlier load can never overwrite
/// the result of a later one.
#[derive(Debug)]
pub struct ShellState {
    selector: String,
    current: TableData,
    visible: TableData,
    query: String,
    status: Option<Status>,
    theme: ThemePreference,
    generation: u64,
}

impl ShellState {
    pub fn new(theme: ThemePreference) -> Self {
        ShellState {
            selector: String::new(),
            current: TableData::empty(),
            visible: TableData::empty(),
            query: String::new(),
            status: None,
            theme,
            generation: 0,
        }
    }

    pub fn selector(&self) -> &str {
        &self.selector
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn current(&self) -> &TableData {
        &self.current
    }

    pub fn visible(&self) -> &TableData {
        &self.visible
    }

    pub fn status(&self) -> Option<&Status> {
        self.status.as_ref()
    }

    pub fn theme(&self) -> ThemePreference {
        self.theme
    }

    /// Start loading `selector`. Returns the generation to hand back to
    /// [`ShellState::finish_load`].
    pub fn begin_load(&mut self, selector: &str) -> u64 {
        self.generation += 1;
        self.selector = selector.to_string();
        self.visible = TableData::empty();
        self.set_status(LOADING_MESSAGE.to_string(), Severity::Loading);
        self.generation
    }

    /// Apply a finished load. Returns false when a newer load has started
    /// since, in which case nothing changes.
    pub fn finish_load(&mut self, generation: u64, outcome: LoadOutcome) -> bool {
        if generation != self.generation {
            debug!(generation, latest = self.generation, "discarding stale load");
            return false;
        }

        let message = outcome.message().to_string();
        let severity = outcome.severity();
        // A failed load leaves an empty table, never the previous one
        self.current = outcome.into_table();
        self.visible = filter(&self.current, &self.query);
        self.set_status(message, severity);
        true
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
        self.visible = filter(&self.current, &self.query);
    }

    /// Flip the theme and persist it. The in-memory theme flips even if the
    /// store cannot be written.
    pub fn toggle_theme(&mut self, store: &mut dyn PreferenceStore) -> ThemePreference {
        self.theme = self.theme.toggled();
        if let Err(e) = self.theme.save(store) {
            warn!(error = %e, "could not persist theme");
        }
        self.theme
    }

    /// One display line per visible row, cells joined with `" | "`, or a
    /// single placeholder line when nothing is visible.
    pub fn rendered_rows(&self) -> Vec<String> {
        if self.visible.is_empty() {
            return vec![NO_RESULTS.to_string()];
        }
        self.visible.rows.iter().map(|row| row.join(" | ")).collect()
    }

    fn set_status(&mut self, message: String, severity: Severity) {
        self.status = Some(Status {
            message,
            severity,
            at: Local::now(),
        });
    }
}
