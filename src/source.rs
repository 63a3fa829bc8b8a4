// src/source.rs
use std::fmt;

/// Which loader a selector is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    LocalFile,
    RemoteJson,
    SpreadsheetService,
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SourceKind::LocalFile => "local file",
            SourceKind::RemoteJson => "remote JSON",
            SourceKind::SpreadsheetService => "spreadsheet service",
        };
        f.write_str(name)
    }
}

/// A selector split into what its loader needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataSource {
    Local { path: String, sheet: Option<String> },
    Remote { url: String },
    Cloud { id: String, sheet: Option<String> },
}

impl DataSource {
    pub fn parse(selector: &str, local_prefix: &str) -> Self {
        match classify(selector, local_prefix) {
            SourceKind::LocalFile => {
                let (path, sheet) = split_selector(selector);
                DataSource::Local { path, sheet }
            }
            SourceKind::RemoteJson => DataSource::Remote {
                url: selector.to_string(),
            },
            SourceKind::SpreadsheetService => {
                let (id, sheet) = split_selector(selector);
                DataSource::Cloud { id, sheet }
            }
        }
    }

    pub fn kind(&self) -> SourceKind {
        match self {
            DataSource::Local { .. } => SourceKind::LocalFile,
            DataSource::Remote { .. } => SourceKind::RemoteJson,
            DataSource::Cloud { .. } => SourceKind::SpreadsheetService,
        }
    }
}

/// Classify a selector. Checked in order: local prefix, `http`, otherwise
/// a spreadsheet-service reference. Never fails; bad selectors fail later.
pub fn classify(selector: &str, local_prefix: &str) -> SourceKind {
    if !local_prefix.is_empty() && selector.starts_with(local_prefix) {
        SourceKind::LocalFile
    } else if selector.starts_with("http") {
        SourceKind::RemoteJson
    } else {
        SourceKind::SpreadsheetService
    }
}

/// `head|sheet|ignored` -> (head, Some(sheet)). Anything past the second
/// segment is dropped.
fn split_selector(selector: &str) -> (String, Option<String>) {
    let mut parts = selector.split('|');
    let head = parts.next().unwrap_or_default().to_string();
    let sheet = parts.next().map(str::to_string);
    (head, sheet)
}

#[cfg(test)]
mod tests {
    use super::*;

    const PREFIX: &str = "local_data";

    #[test]
    fn test_classify_order() {
        assert_eq!(classify("local_data/a.csv", PREFIX), SourceKind::LocalFile);
        assert_eq!(classify("https://x.test/a.json", PREFIX), SourceKind::RemoteJson);
        assert_eq!(classify("http://x.test", PREFIX), SourceKind::RemoteJson);
        assert_eq!(classify("abc123|Sheet1", PREFIX), SourceKind::SpreadsheetService);
        assert_eq!(classify("", PREFIX), SourceKind::SpreadsheetService);
    }

    #[test]
    fn test_local_prefix_wins_over_http() {
        assert_eq!(classify("httpdata/a.csv", "httpdata"), SourceKind::LocalFile);
    }

    #[test]
    fn test_parse_local_with_sheet() {
        let source = DataSource::parse("local_data/book.xlsx|SheetTwo", PREFIX);
        assert_eq!(
            source,
            DataSource::Local {
                path: "local_data/book.xlsx".to_string(),
                sheet: Some("SheetTwo".to_string()),
            }
        );
        assert_eq!(source.kind(), SourceKind::LocalFile);
    }

    #[test]
    fn test_parse_cloud() {
        let source = DataSource::parse("1AbC|Results|extra", PREFIX);
        assert_eq!(
            source,
            DataSource::Cloud {
                id: "1AbC".to_string(),
                sheet: Some("Results".to_string()),
            }
        );

        let source = DataSource::parse("1AbC", PREFIX);
        assert_eq!(
            source,
            DataSource::Cloud {
                id: "1AbC".to_string(),
                sheet: None,
            }
        );
    }

    #[test]
    fn test_parse_remote_keeps_pipes() {
        let source = DataSource::parse("https://x.test/q?a=1|2", PREFIX);
        assert_eq!(
            source,
            DataSource::Remote {
                url: "https://x.test/q?a=1|2".to_string()
            }
        );
    }
}
