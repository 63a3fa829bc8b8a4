// src/loader.rs
use std::time::Duration;

use tracing::{debug, info, warn};

use crate::cloud_handler::CloudHandler;
use crate::config::Config;
use crate::data_types::TableData;
use crate::error::{ErrorKind, LoadError, LoadResult, SetupError};
use crate::local_handler::LocalHandler;
use crate::remote_handler::{build_client, RemoteHandler};
use crate::source::{DataSource, SourceKind};

/// Severity shown next to a status message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Loading,
    Ok,
    Error,
}

/// Result of one load, always returned, never raised.
#[derive(Debug, Clone)]
pub enum LoadOutcome {
    Loaded { table: TableData, message: String },
    Failed { error: LoadError, message: String },
}

impl LoadOutcome {
    pub fn severity(&self) -> Severity {
        match self {
            LoadOutcome::Loaded { .. } => Severity::Ok,
            LoadOutcome::Failed { .. } => Severity::Error,
        }
    }

    pub fn message(&self) -> &str {
        match self {
            LoadOutcome::Loaded { message, .. } | LoadOutcome::Failed { message, .. } => message,
        }
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        match self {
            LoadOutcome::Loaded { .. } => None,
            LoadOutcome::Failed { error, .. } => Some(error.kind()),
        }
    }

    /// The loaded table, or an empty one after a failure.
    pub fn into_table(self) -> TableData {
        match self {
            LoadOutcome::Loaded { table, .. } => table,
            LoadOutcome::Failed { .. } => TableData::empty(),
        }
    }

    pub fn table(&self) -> Option<&TableData> {
        match self {
            LoadOutcome::Loaded { table, .. } => Some(table),
            LoadOutcome::Failed { .. } => None,
        }
    }
}

/// Routes a selector to the right handler and normalizes the result.
pub struct Loader {
    local_prefix: String,
    local: LocalHandler,
    remote: RemoteHandler,
    cloud: CloudHandler,
}

impl Loader {
    /// Fails only if the HTTP client cannot be set up; load failures are
    /// reported per call through [`LoadOutcome`].
    pub fn new(config: &Config) -> Result<Self, SetupError> {
        let client = build_client(Duration::from_secs(config.http_timeout_secs))?;

        Ok(Loader {
            local_prefix: config.local_prefix.clone(),
            local: LocalHandler::new(config.local_root.clone()),
            remote: RemoteHandler::new(client.clone()),
            cloud: CloudHandler::new(client, config.service_base.clone(), config.unwrap.clone()),
        })
    }

    pub fn classify(&self, selector: &str) -> SourceKind {
        crate::source::classify(selector, &self.local_prefix)
    }

    /// Load `selector`. Every failure comes back as [`LoadOutcome::Failed`].
    pub async fn load(&self, selector: &str) -> LoadOutcome {
        let source = DataSource::parse(selector, &self.local_prefix);
        debug!(selector, kind = %source.kind(), "dispatching load");

        match self.fetch(&source).await {
            Ok(table) => {
                info!(selector, kind = %source.kind(), rows = table.len(), "load finished");
                LoadOutcome::Loaded {
                    table,
                    message: success_message(source.kind()),
                }
            }
            Err(error) => {
                warn!(selector, error = %error, "load failed");
                LoadOutcome::Failed {
                    message: error.to_string(),
                    error,
                }
            }
        }
    }

    async fn fetch(&self, source: &DataSource) -> LoadResult<TableData> {
        match source {
            DataSource::Local { path, sheet } => self.local.load(path, sheet.as_deref()).await,
            DataSource::Remote { url } => self.remote.fetch_json(url).await,
            DataSource::Cloud { id, sheet } => self.cloud.fetch_data(id, sheet.as_deref()).await,
        }
    }
}

fn success_message(kind: SourceKind) -> String {
    match kind {
        SourceKind::LocalFile => "Local file loaded".to_string(),
        SourceKind::RemoteJson => "Data loaded from web endpoint".to_string(),
        SourceKind::SpreadsheetService => "Spreadsheet loaded".to_string(),
    }
}
