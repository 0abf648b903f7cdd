use std::path::PathBuf;

use chrono::NaiveDate;
use tracing::{debug, error, info};

use crate::error::Result;
use crate::fetch::registry::{fetch_registry, REGISTRY_ARTIFACT};
use crate::fetch::{urls, ArchiveFetcher};
use crate::periods::{PeriodRange, ReportingPeriod, SweepMode};
use crate::persist::RawSink;
use crate::route::{self, Scheme};

/// Progress/failure notifications emitted by the orchestrator. The sink is
/// injected so the core stays agnostic of where notifications land; the
/// binary wires in [`TracingNotifier`].
pub trait Notifier {
    fn debug(&self, message: &str);
    fn info(&self, message: &str);
    fn error(&self, message: &str);
    fn critical(&self, message: &str);
}

/// Forwards notifications to `tracing`.
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn debug(&self, message: &str) {
        debug!("{message}");
    }

    fn info(&self, message: &str) {
        info!("{message}");
    }

    fn error(&self, message: &str) {
        error!("{message}");
    }

    fn critical(&self, message: &str) {
        error!(critical = true, "{message}");
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Init,
    FetchingPeriods,
    FetchingRegistry,
    Done,
    Aborted,
}

/// Drives a full acquisition run: enumerate periods, route and fetch each
/// one in chronological order, persist, then fetch the registry once.
/// Fail-fast: the first error aborts the run with nothing skipped and no
/// partial-run marker; a rerun re-sweeps the whole range and converges
/// through the sink's overwrite idempotence.
pub struct Runner<N> {
    fetcher: ArchiveFetcher,
    registry_url: String,
    sink: RawSink,
    notifier: N,
    state: RunState,
}

impl<N: Notifier> Runner<N> {
    pub fn new(fetcher: ArchiveFetcher, sink: RawSink, notifier: N) -> Self {
        Self {
            fetcher,
            registry_url: urls::REGISTRY_URL.to_string(),
            sink,
            notifier,
            state: RunState::Init,
        }
    }

    pub fn with_registry_url(mut self, url: impl Into<String>) -> Self {
        self.registry_url = url.into();
        self
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Run a sweep anchored at the as-of business day.
    pub async fn run(&mut self, as_of: NaiveDate, mode: SweepMode) -> Result<()> {
        self.state = RunState::FetchingPeriods;
        let cutover = route::cutover_year(as_of);
        let periods = match PeriodRange::for_sweep(as_of, mode) {
            Ok(periods) => periods,
            Err(e) => {
                self.notifier.critical(&format!("cannot enumerate periods: {e}"));
                self.state = RunState::Aborted;
                return Err(e);
            }
        };
        self.run_periods(periods, cutover).await
    }

    /// Run over an explicit period range with a given cutover year.
    pub async fn run_periods(&mut self, periods: PeriodRange, cutover: i32) -> Result<()> {
        self.state = RunState::FetchingPeriods;
        for period in periods {
            self.notifier.info(&format!("fetching report {period}"));
            match self.fetch_one(period, cutover).await {
                Ok(path) => self
                    .notifier
                    .debug(&format!("report {period} stored at {}", path.display())),
                Err(e) => {
                    self.notifier
                        .critical(&format!("report {period} failed: {e}; aborting run"));
                    self.state = RunState::Aborted;
                    return Err(e);
                }
            }
        }

        self.notifier.info("all reports stored; fetching fund registry");
        self.state = RunState::FetchingRegistry;
        let registry = match fetch_registry(self.fetcher.client(), &self.registry_url).await {
            Ok(payload) => payload,
            Err(e) => {
                self.notifier
                    .critical(&format!("fund registry failed: {e}; aborting run"));
                self.state = RunState::Aborted;
                return Err(e);
            }
        };
        match self.sink.write(REGISTRY_ARTIFACT, &registry) {
            Ok(_) => {
                self.notifier.info("fund registry stored; run complete");
                self.state = RunState::Done;
                Ok(())
            }
            Err(e) => {
                self.notifier
                    .critical(&format!("fund registry failed: {e}; aborting run"));
                self.state = RunState::Aborted;
                Err(e)
            }
        }
    }

    async fn fetch_one(&self, period: ReportingPeriod, cutover: i32) -> Result<PathBuf> {
        let scheme = route::route(period.year, cutover)?;
        self.notifier.debug(&format!(
            "{period} routed to the {} scheme",
            match scheme {
                Scheme::Recent => "recent",
                Scheme::Historical => "historical",
            }
        ));
        let payload = self.fetcher.fetch(period, scheme).await?;
        self.sink.write(&period.artifact_name(), &payload)
    }
}
