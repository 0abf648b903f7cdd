use chrono::{Datelike, NaiveDate};

use crate::error::{Result, ScrapeError};
use crate::periods::EPOCH_YEAR;

/// Which of the portal's two publication formats serves a given year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    /// One zip per month, a single CSV inside.
    Recent,
    /// One zip per year under `HIST/`, one CSV member per month.
    Historical,
}

/// Years at or past the cutover are still served month by month; the portal
/// re-archives them into yearly bundles roughly a year behind the present.
pub fn cutover_year(as_of: NaiveDate) -> i32 {
    as_of.year() - 1
}

/// Decide the retrieval scheme for `year`. The pre-epoch floor is checked
/// first: the portal has no yearly bundle for those years either, so the
/// historical branch must not be attempted.
pub fn route(year: i32, cutover: i32) -> Result<Scheme> {
    if year < EPOCH_YEAR {
        return Err(ScrapeError::UnsupportedPeriod { year });
    }
    if year >= cutover {
        Ok(Scheme::Recent)
    } else {
        Ok(Scheme::Historical)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cutover_is_the_year_before_the_as_of_date() {
        let as_of = NaiveDate::from_ymd_opt(2021, 8, 15).unwrap();
        assert_eq!(cutover_year(as_of), 2020);
    }

    #[test]
    fn years_at_or_after_the_cutover_are_recent() {
        assert_eq!(route(2020, 2020).unwrap(), Scheme::Recent);
        assert_eq!(route(2021, 2020).unwrap(), Scheme::Recent);
        assert_eq!(route(2035, 2020).unwrap(), Scheme::Recent);
    }

    #[test]
    fn years_between_epoch_and_cutover_are_historical() {
        assert_eq!(route(2005, 2020).unwrap(), Scheme::Historical);
        assert_eq!(route(2019, 2020).unwrap(), Scheme::Historical);
    }

    #[test]
    fn pre_epoch_years_are_unsupported_on_both_branches() {
        for year in [1999, 2004] {
            let err = route(year, 2020).err().unwrap();
            assert!(matches!(err, ScrapeError::UnsupportedPeriod { year: y } if y == year));
        }
        // even a cutover low enough to select the recent branch
        let err = route(2004, 2003).err().unwrap();
        assert!(matches!(err, ScrapeError::UnsupportedPeriod { .. }));
    }
}
