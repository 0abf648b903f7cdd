use std::fmt;

use chrono::{Datelike, NaiveDate};

use crate::error::{Result, ScrapeError};

/// First year the portal publishes daily reports for.
pub const EPOCH_YEAR: i32 = 2005;

/// A rebuild re-syncs the as-of month plus this many months before it.
const REBUILD_LOOKBACK_MONTHS: i32 = 11;

/// One calendar month of daily fund reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ReportingPeriod {
    pub year: i32,
    pub month: u32,
}

impl ReportingPeriod {
    pub fn new(year: i32, month: u32) -> Self {
        debug_assert!((1..=12).contains(&month));
        Self { year, month }
    }

    /// Base name shared by the local artifact and the portal's files,
    /// e.g. `inf_diario_fi_202108`.
    pub fn artifact_name(&self) -> String {
        format!("inf_diario_fi_{}{:02}", self.year, self.month)
    }

    /// Name of this month's member inside a yearly archive.
    pub fn member_name(&self) -> String {
        format!("{}.csv", self.artifact_name())
    }

    fn index(self) -> i32 {
        self.year * 12 + self.month as i32 - 1
    }

    fn from_index(index: i32) -> Self {
        Self {
            year: index.div_euclid(12),
            month: index.rem_euclid(12) as u32 + 1,
        }
    }
}

impl fmt::Display for ReportingPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{}", self.month, self.year)
    }
}

/// How far back a run sweeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SweepMode {
    /// Everything since the epoch. The portal revises recent months, so the
    /// full history is re-swept and overwritten; reruns converge.
    Incremental,
    /// Only the trailing twelve months, for a bounded re-sync.
    Rebuild,
}

impl SweepMode {
    /// Entry flag convention: `0` sweeps from the epoch, anything else
    /// rebuilds the trailing window.
    pub fn from_flag(flag: i64) -> Self {
        if flag == 0 {
            SweepMode::Incremental
        } else {
            SweepMode::Rebuild
        }
    }
}

/// Lazy, inclusive, chronological range of reporting periods.
pub struct PeriodRange {
    next: i32,
    end: i32,
}

impl PeriodRange {
    pub fn new(start: ReportingPeriod, end: ReportingPeriod) -> Result<Self> {
        if start > end {
            return Err(ScrapeError::InvalidRange { start, end });
        }
        Ok(Self {
            next: start.index(),
            end: end.index(),
        })
    }

    /// The months a run must acquire, anchored to the as-of business day.
    pub fn for_sweep(as_of: NaiveDate, mode: SweepMode) -> Result<Self> {
        let end = ReportingPeriod::new(as_of.year(), as_of.month());
        let start = match mode {
            SweepMode::Incremental => ReportingPeriod::new(EPOCH_YEAR, 1),
            SweepMode::Rebuild => {
                ReportingPeriod::from_index(end.index() - REBUILD_LOOKBACK_MONTHS)
            }
        };
        Self::new(start, end)
    }
}

impl Iterator for PeriodRange {
    type Item = ReportingPeriod;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next > self.end {
            return None;
        }
        let period = ReportingPeriod::from_index(self.next);
        self.next += 1;
        Some(period)
    }
}
