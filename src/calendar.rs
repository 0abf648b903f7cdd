use std::collections::HashSet;

use chrono::{Datelike, Duration, NaiveDate, Weekday};

/// Source of market holidays for the business-day arithmetic. Real holiday
/// data comes from outside the scraper; tests and the default wiring supply
/// fixed sets.
pub trait HolidayProvider {
    fn holidays(&self) -> HashSet<NaiveDate>;
}

/// Weekend-only calendar.
pub struct NoHolidays;

impl HolidayProvider for NoHolidays {
    fn holidays(&self) -> HashSet<NaiveDate> {
        HashSet::new()
    }
}

fn is_business_day(date: NaiveDate, holidays: &HashSet<NaiveDate>) -> bool {
    !matches!(date.weekday(), Weekday::Sat | Weekday::Sun) && !holidays.contains(&date)
}

/// The business day `offset` days away from `date`, skipping weekends and
/// `holidays`. Negative offsets walk backwards; zero returns `date` as-is.
pub fn workday(date: NaiveDate, offset: i32, holidays: &HashSet<NaiveDate>) -> NaiveDate {
    let step = if offset < 0 { -1 } else { 1 };
    let mut remaining = offset.abs();
    let mut day = date;
    while remaining > 0 {
        day = day + Duration::days(step);
        if is_business_day(day, holidays) {
            remaining -= 1;
        }
    }
    day
}

#[cfg(test)]
mod tests {
    use super::*;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn two_business_days_before_a_monday_is_the_prior_thursday() {
        // 2021-08-16 is a Monday.
        let as_of = workday(day(2021, 8, 16), -2, &HashSet::new());
        assert_eq!(as_of, day(2021, 8, 12));
    }

    #[test]
    fn holidays_are_skipped_like_weekends() {
        // Friday the 13th declared a holiday: Monday minus two lands Wednesday.
        let holidays = HashSet::from([day(2021, 8, 13)]);
        let as_of = workday(day(2021, 8, 16), -2, &holidays);
        assert_eq!(as_of, day(2021, 8, 11));
    }

    #[test]
    fn zero_offset_keeps_the_date() {
        assert_eq!(workday(day(2021, 8, 15), 0, &HashSet::new()), day(2021, 8, 15));
    }
}
