use anyhow::Result;
use chrono::Local;
use cvmscraper::{
    calendar::{workday, HolidayProvider, NoHolidays},
    fetch::ArchiveFetcher,
    periods::SweepMode,
    persist::RawSink,
    run::{Runner, TracingNotifier},
};
use reqwest::Client;
use std::env;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();

    // 0 (default): full sweep since the epoch; anything else: trailing-year rebuild
    let flag = env::args()
        .nth(1)
        .map(|arg| arg.parse::<i64>())
        .transpose()?
        .unwrap_or(0);
    let mode = SweepMode::from_flag(flag);

    // data lags the calendar: aim two business days behind today
    let today = Local::now().date_naive();
    let as_of = workday(today, -2, &NoHolidays.holidays());
    info!(%as_of, ?mode, "starting CVM extraction");

    let fetcher = ArchiveFetcher::new(Client::new());
    let sink = RawSink::new("raw")?;
    let mut runner = Runner::new(fetcher, sink, TracingNotifier);
    runner.run(as_of, mode).await?;

    info!("all done");
    Ok(())
}
