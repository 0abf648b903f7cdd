use std::io::{Cursor, Read, Write};
use std::path::PathBuf;

use reqwest::{Client, Response};
use tempfile::NamedTempFile;
use tracing::debug;
use zip::result::ZipError;
use zip::ZipArchive;

use crate::error::{Result, ScrapeError};
use crate::fetch::urls;
use crate::periods::ReportingPeriod;
use crate::route::Scheme;
use crate::table::TabularPayload;

/// Retrieves one reporting period's payload from the portal, under either
/// publication scheme. Requests are issued one at a time; the orchestrator
/// is the only caller and never interleaves fetches.
pub struct ArchiveFetcher {
    client: Client,
    base: String,
    work_dir: PathBuf,
}

impl ArchiveFetcher {
    pub fn new(client: Client) -> Self {
        Self {
            client,
            base: urls::PORTAL_BASE.to_string(),
            work_dir: PathBuf::from("."),
        }
    }

    /// Point the fetcher at a different portal root. Tests use this to
    /// swap in a local server.
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = base.into();
        self
    }

    /// Directory for the historical scheme's temporary download blob.
    pub fn with_work_dir(mut self, work_dir: impl Into<PathBuf>) -> Self {
        self.work_dir = work_dir.into();
        self
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub async fn fetch(&self, period: ReportingPeriod, scheme: Scheme) -> Result<TabularPayload> {
        match scheme {
            Scheme::Recent => self.fetch_recent(period).await,
            Scheme::Historical => self.fetch_historical(period).await,
        }
    }

    /// Recent scheme: one round trip, the monthly zip is small enough to
    /// open straight from memory.
    async fn fetch_recent(&self, period: ReportingPeriod) -> Result<TabularPayload> {
        let url = urls::recent_archive(&self.base, period);
        debug!(%url, "fetching monthly archive");
        let resp = self.get(&url).await?;
        let bytes = resp.bytes().await.map_err(|source| ScrapeError::Network {
            url: url.clone(),
            source,
        })?;
        let mut archive =
            ZipArchive::new(Cursor::new(bytes)).map_err(|e| archive_format(&url, e))?;
        // the portal packs exactly one CSV per monthly zip
        let mut member = archive.by_index(0).map_err(|e| archive_format(&url, e))?;
        read_payload(&mut member, &url)
    }

    /// Historical scheme: stream the yearly zip to a temporary blob, then
    /// pull the requested month's member out of it. The blob is acquired
    /// only after the request succeeds and is dropped (closed and unlinked)
    /// on every path out of this function, success and failure alike;
    /// unlink errors never displace the error being returned.
    async fn fetch_historical(&self, period: ReportingPeriod) -> Result<TabularPayload> {
        let url = urls::historical_archive(&self.base, period.year);
        debug!(%url, "fetching yearly archive");
        let mut resp = self.get(&url).await?;

        let mut blob =
            NamedTempFile::new_in(&self.work_dir).map_err(|source| ScrapeError::Persistence {
                path: self.work_dir.clone(),
                source: Box::new(source),
            })?;
        while let Some(chunk) = resp.chunk().await.map_err(|source| ScrapeError::Network {
            url: url.clone(),
            source,
        })? {
            blob.write_all(&chunk)
                .map_err(|source| ScrapeError::Persistence {
                    path: blob.path().to_path_buf(),
                    source: Box::new(source),
                })?;
        }
        debug!(blob = %blob.path().display(), "yearly archive downloaded");

        let file = blob.reopen().map_err(|e| archive_format(&url, e))?;
        let mut archive = ZipArchive::new(file).map_err(|e| archive_format(&url, e))?;
        let member_name = period.member_name();
        let mut member = match archive.by_name(&member_name) {
            Ok(member) => member,
            Err(ZipError::FileNotFound) => {
                return Err(ScrapeError::MissingMember {
                    archive: url,
                    member: member_name,
                })
            }
            Err(e) => return Err(archive_format(&url, e)),
        };
        read_payload(&mut member, &url)
    }

    async fn get(&self, url: &str) -> Result<Response> {
        self.client
            .get(url)
            .send()
            .await
            .and_then(|resp| resp.error_for_status())
            .map_err(|source| ScrapeError::Network {
                url: url.to_string(),
                source,
            })
    }
}

fn archive_format(url: &str, source: impl std::error::Error + Send + Sync + 'static) -> ScrapeError {
    ScrapeError::ArchiveFormat {
        archive: url.to_string(),
        source: Box::new(source),
    }
}

fn read_payload(member: &mut impl Read, url: &str) -> Result<TabularPayload> {
    let mut buf = Vec::new();
    member
        .read_to_end(&mut buf)
        .map_err(|e| archive_format(url, e))?;
    TabularPayload::from_latin1_csv(&buf).map_err(|e| archive_format(url, e))
}
