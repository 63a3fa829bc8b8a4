// src/error.rs
use thiserror::Error;

/// Result type for loader operations
pub type LoadResult<T> = std::result::Result<T, LoadError>;

/// Everything that can go wrong between a selector and a table.
#[derive(Debug, Clone, Error)]
pub enum LoadError {
    /// Local file could not be read
    #[error("File not found: {path}")]
    NotFound { path: String },

    /// Extension is not one of json/csv/txt/xlsx
    #[error("Unsupported format: '{extension}'")]
    UnsupportedFormat { extension: String },

    /// Requested sheet is not in the workbook
    #[error("Sheet '{sheet}' does not exist")]
    SheetNotFound { sheet: String },

    /// Remote endpoint failed or answered with a non-success status
    #[error("Could not reach {target}: {reason}")]
    Unreachable { target: String, reason: String },

    /// Payload could not be parsed or unwrapped
    #[error("Malformed response: {0}")]
    MalformedResponse(String),
}

impl LoadError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            LoadError::NotFound { .. } => ErrorKind::NotFound,
            LoadError::UnsupportedFormat { .. } => ErrorKind::UnsupportedFormat,
            LoadError::SheetNotFound { .. } => ErrorKind::SheetNotFound,
            LoadError::Unreachable { .. } => ErrorKind::Unreachable,
            LoadError::MalformedResponse(_) => ErrorKind::MalformedResponse,
        }
    }

    pub(crate) fn unreachable(target: &str, reason: impl ToString) -> Self {
        LoadError::Unreachable {
            target: target.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// Fieldless mirror of [`LoadError`], handy for matching on outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    UnsupportedFormat,
    SheetNotFound,
    Unreachable,
    MalformedResponse,
}

/// Failures while wiring up the loader, before any selector is seen.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[from] reqwest::Error),
}

impl From<serde_json::Error> for LoadError {
    fn from(err: serde_json::Error) -> Self {
        LoadError::MalformedResponse(format!("invalid JSON: {}", err))
    }
}

impl From<calamine::XlsxError> for LoadError {
    fn from(err: calamine::XlsxError) -> Self {
        LoadError::MalformedResponse(format!("invalid workbook: {}", err))
    }
}

impl From<csv::Error> for LoadError {
    fn from(err: csv::Error) -> Self {
        LoadError::MalformedResponse(format!("invalid CSV: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_offending_input() {
        let err = LoadError::NotFound {
            path: "local_data/missing.csv".to_string(),
        };
        assert_eq!(err.to_string(), "File not found: local_data/missing.csv");

        let err = LoadError::UnsupportedFormat {
            extension: "pdf".to_string(),
        };
        assert_eq!(err.to_string(), "Unsupported format: 'pdf'");
        assert_eq!(err.kind(), ErrorKind::UnsupportedFormat);
    }

    #[test]
    fn json_errors_become_malformed() {
        let err: LoadError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert_eq!(err.kind(), ErrorKind::MalformedResponse);
    }

    #[test]
    fn client_setup_errors_are_not_load_errors() {
        // a relative URL never builds a request
        let reqwest_err = reqwest::Client::new().get("no-scheme").build().unwrap_err();
        let err = SetupError::from(reqwest_err);
        assert!(err.to_string().starts_with("Failed to build HTTP client: "));
    }
}
