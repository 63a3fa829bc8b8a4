// src/cloud_handler.rs
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::config::UnwrapMode;
use crate::data_types::{cell_to_string, TableData};
use crate::error::{LoadError, LoadResult};
use crate::remote_handler::get_text;

// Shape of the gviz `tq` response, limited to what we read.
#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    errors: Vec<QueryError>,
    table: Option<QueryTable>,
}

#[derive(Debug, Deserialize)]
struct QueryError {
    #[serde(default)]
    reason: Option<String>,
    #[serde(default)]
    detailed_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct QueryTable {
    #[serde(default)]
    rows: Vec<QueryRow>,
}

#[derive(Debug, Deserialize)]
struct QueryRow {
    #[serde(default)]
    c: Vec<Option<QueryCell>>,
}

#[derive(Debug, Deserialize)]
struct QueryCell {
    #[serde(default)]
    v: Value,
}

/// Google Sheets through the public visualization query endpoint. No
/// credentials: the sheet has to be shared for reading.
pub struct CloudHandler {
    client: Client,
    service_base: String,
    unwrap: UnwrapMode,
}

impl CloudHandler {
    pub fn new(client: Client, service_base: impl Into<String>, unwrap: UnwrapMode) -> Self {
        CloudHandler {
            client,
            service_base: service_base.into(),
            unwrap,
        }
    }

    pub async fn fetch_data(&self, spreadsheet_id: &str, sheet_name: Option<&str>) -> LoadResult<TableData> {
        let url = self.query_url(spreadsheet_id, sheet_name);
        debug!(%url, "querying spreadsheet service");

        let body = get_text(&self.client, &url).await?;
        Self::process_data(&body, &self.unwrap)
    }

    /// `<base>/spreadsheets/d/<id>/gviz/tq?sheet=<name>`. Without a sheet name
    /// the parameter is left out and the service answers with the first sheet.
    pub fn query_url(&self, spreadsheet_id: &str, sheet_name: Option<&str>) -> String {
        let mut url = format!(
            "{}/spreadsheets/d/{}/gviz/tq",
            self.service_base.trim_end_matches('/'),
            spreadsheet_id
        );
        if let Some(sheet) = sheet_name {
            url.push_str("?sheet=");
            url.push_str(&urlencoding::encode(sheet));
        }
        url
    }

    /// Unwrap the service response and turn `table.rows[*].c[*].v` into a
    /// table. Null or missing cells become empty strings.
    pub fn process_data(body: &str, unwrap: &UnwrapMode) -> LoadResult<TableData> {
        let payload = Self::unwrap_payload(body, unwrap)?;
        let response: QueryResponse = serde_json::from_str(payload)?;

        if response.status.as_deref() == Some("error") {
            let reason = response
                .errors
                .first()
                .and_then(|e| e.detailed_message.clone().or_else(|| e.reason.clone()))
                .unwrap_or_else(|| "unknown error".to_string());
            return Err(LoadError::MalformedResponse(format!(
                "spreadsheet service error: {}",
                reason
            )));
        }

        let table = response.table.ok_or_else(|| {
            LoadError::MalformedResponse("response has no table".to_string())
        })?;

        let rows = table
            .rows
            .into_iter()
            .map(|row| {
                row.c
                    .iter()
                    .map(|cell| cell.as_ref().map(|c| cell_to_string(&c.v)).unwrap_or_default())
                    .collect()
            })
            .collect();

        Ok(TableData::new(rows))
    }

    /// Strip the non-JSON prologue/epilogue around the payload.
    pub fn unwrap_payload<'a>(body: &'a str, unwrap: &UnwrapMode) -> LoadResult<&'a str> {
        let payload = match *unwrap {
            UnwrapMode::Offsets {
                prefix_len,
                suffix_len,
            } => body
                .len()
                .checked_sub(suffix_len)
                .filter(|end| *end >= prefix_len)
                .and_then(|end| body.get(prefix_len..end)),
            UnwrapMode::Braces => match (body.find('{'), body.rfind('}')) {
                (Some(start), Some(end)) if start < end => body.get(start..=end),
                _ => None,
            },
        };

        payload.ok_or_else(|| {
            LoadError::MalformedResponse(format!(
                "response does not match the expected wrapper ({} bytes)",
                body.len()
            ))
        })
    }
}
