use std::path::PathBuf;

use thiserror::Error;

use crate::periods::ReportingPeriod;

pub type Result<T> = std::result::Result<T, ScrapeError>;

/// Everything that can stop a scrape run. The orchestrator never retries:
/// the first of these it sees aborts the whole run.
#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("network failure for {url}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("unreadable archive {archive}")]
    ArchiveFormat {
        archive: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The yearly archive exists but does not carry the requested month.
    /// Distinct from `Network`: the transport worked, the data is absent.
    #[error("{member} not found in {archive}")]
    MissingMember { archive: String, member: String },

    #[error("no reports exist for {year}; the portal publishes nothing before 2005")]
    UnsupportedPeriod { year: i32 },

    #[error("period range starts at {start}, after its end {end}")]
    InvalidRange {
        start: ReportingPeriod,
        end: ReportingPeriod,
    },

    #[error("cannot persist {}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}
