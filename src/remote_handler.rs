// src/remote_handler.rs
use std::time::Duration;

use reqwest::Client;
use tracing::debug;

use crate::data_types::TableData;
use crate::error::{LoadError, LoadResult, SetupError};

/// Plain JSON endpoints reached with a single GET.
pub struct RemoteHandler {
    client: Client,
}

impl RemoteHandler {
    pub fn new(client: Client) -> Self {
        RemoteHandler { client }
    }

    pub async fn fetch_json(&self, url: &str) -> LoadResult<TableData> {
        let body = get_text(&self.client, url).await?;
        let value = serde_json::from_str(&body)?;
        TableData::from_json(value)
    }
}

pub fn build_client(timeout: Duration) -> Result<Client, SetupError> {
    Ok(Client::builder().timeout(timeout).build()?)
}

/// GET `url` and return the body; any transport failure or non-2xx status is
/// `Unreachable`.
pub(crate) async fn get_text(client: &Client, url: &str) -> LoadResult<String> {
    let response = client
        .get(url)
        .send()
        .await
        .map_err(|e| LoadError::unreachable(url, e))?;

    let status = response.status();
    debug!(url, %status, "GET finished");
    if !status.is_success() {
        return Err(LoadError::unreachable(url, format!("HTTP {}", status)));
    }

    response
        .text()
        .await
        .map_err(|e| LoadError::unreachable(url, e))
}
