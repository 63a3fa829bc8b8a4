// src/local_handler.rs
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::csv_handler::CSVHandler;
use crate::data_types::TableData;
use crate::error::{LoadError, LoadResult};
use crate::xlsx_handler::XlsxHandler;

/// File formats recognised by extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Csv,
    Txt,
    XlsxBinary,
    Unsupported(String),
}

impl FileFormat {
    /// Format from the text after the last `.` of the path, ignoring case.
    /// A path without a dot is judged by its whole name.
    pub fn from_path(path: &str) -> Self {
        let extension = path.rsplit('.').next().unwrap_or_default().to_lowercase();
        match extension.as_str() {
            "json" => FileFormat::Json,
            "csv" => FileFormat::Csv,
            "txt" => FileFormat::Txt,
            "xlsx" => FileFormat::XlsxBinary,
            _ => FileFormat::Unsupported(extension),
        }
    }
}

pub struct LocalHandler {
    root: PathBuf,
}

impl LocalHandler {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        LocalHandler { root: root.into() }
    }

    /// Load `path` (relative to the handler's root unless absolute) and parse
    /// it according to its extension.
    pub async fn load(&self, path: &str, sheet: Option<&str>) -> LoadResult<TableData> {
        let format = FileFormat::from_path(path);
        debug!(path, ?format, "loading local file");

        // Reject before touching the disk
        if let FileFormat::Unsupported(ref extension) = format {
            return Err(LoadError::UnsupportedFormat {
                extension: extension.clone(),
            });
        }

        let bytes = self.read(path).await?;

        match format {
            FileFormat::Json => {
                let value = serde_json::from_slice(&bytes)?;
                TableData::from_json(value)
            }
            FileFormat::Csv => CSVHandler::parse_csv(&String::from_utf8_lossy(&bytes)),
            FileFormat::Txt => Ok(CSVHandler::parse_lines(&String::from_utf8_lossy(&bytes))),
            FileFormat::XlsxBinary => XlsxHandler::read_sheet(bytes, sheet),
            FileFormat::Unsupported(extension) => Err(LoadError::UnsupportedFormat { extension }),
        }
    }

    fn resolve(&self, path: &str) -> PathBuf {
        let path = Path::new(path);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        }
    }

    async fn read(&self, path: &str) -> LoadResult<Vec<u8>> {
        let full = self.resolve(path);
        tokio::fs::read(&full).await.map_err(|e| {
            debug!(path = %full.display(), error = %e, "local read failed");
            LoadError::NotFound {
                path: path.to_string(),
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_path() {
        assert_eq!(FileFormat::from_path("local_data/a.json"), FileFormat::Json);
        assert_eq!(FileFormat::from_path("local_data/A.CSV"), FileFormat::Csv);
        assert_eq!(FileFormat::from_path("notes.Txt"), FileFormat::Txt);
        assert_eq!(FileFormat::from_path("book.v2.xlsx"), FileFormat::XlsxBinary);
        assert_eq!(
            FileFormat::from_path("report.pdf"),
            FileFormat::Unsupported("pdf".to_string())
        );
        assert_eq!(
            FileFormat::from_path("legacy.xls"),
            FileFormat::Unsupported("xls".to_string())
        );
    }

    #[test]
    fn test_resolve() {
        let handler = LocalHandler::new("/srv/data");
        assert_eq!(
            handler.resolve("local_data/a.csv"),
            PathBuf::from("/srv/data/local_data/a.csv")
        );
    }

    #[tokio::test]
    async fn test_unsupported_checked_before_read() {
        let handler = LocalHandler::new("/definitely/not/here");
        let err = handler.load("local_data/a.pdf", None).await.unwrap_err();
        assert!(matches!(err, LoadError::UnsupportedFormat { ref extension } if extension == "pdf"));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let handler = LocalHandler::new(dir.path());
        let err = handler.load("local_data/missing.csv", None).await.unwrap_err();
        assert!(matches!(err, LoadError::NotFound { ref path } if path == "local_data/missing.csv"));
    }

    #[tokio::test]
    async fn test_invalid_json() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("bad.json"), "[1,").unwrap();
        let handler = LocalHandler::new(dir.path());
        let err = handler.load("bad.json", None).await.unwrap_err();
        assert!(matches!(err, LoadError::MalformedResponse(_)));
    }
}
