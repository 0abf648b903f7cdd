use reqwest::Client;
use tracing::debug;

use crate::error::{Result, ScrapeError};
use crate::table::TabularPayload;

/// Artifact name the registry is persisted under.
pub const REGISTRY_ARTIFACT: &str = "cad_fi";

/// Fetch the fund registry: a direct CSV, no archive, no period routing.
pub async fn fetch_registry(client: &Client, url: &str) -> Result<TabularPayload> {
    debug!(%url, "fetching fund registry");
    let resp = client
        .get(url)
        .send()
        .await
        .and_then(|resp| resp.error_for_status())
        .map_err(|source| ScrapeError::Network {
            url: url.to_string(),
            source,
        })?;
    let bytes = resp.bytes().await.map_err(|source| ScrapeError::Network {
        url: url.to_string(),
        source,
    })?;
    TabularPayload::from_latin1_csv(&bytes).map_err(|source| ScrapeError::ArchiveFormat {
        archive: url.to_string(),
        source: Box::new(source),
    })
}
