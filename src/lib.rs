//! Scraper for the CVM open-data portal: pulls the monthly daily-fund-report
//! archives and the fund registry into a local raw-CSV directory.
//!
//! Reports up to roughly a year old are served one zip per month; older ones
//! are re-archived into one zip per year. [`route`] decides which scheme a
//! period uses, [`fetch`] retrieves and extracts the payload, [`persist`]
//! writes it, and [`run`] sequences the whole sweep fail-fast.

pub mod calendar;
pub mod error;
pub mod fetch;
pub mod periods;
pub mod persist;
pub mod route;
pub mod run;
pub mod table;

pub use error::{Result, ScrapeError};
