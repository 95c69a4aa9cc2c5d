// ABOUTME: Runboard CLI - terminal dashboard over a running activity history
// ABOUTME: Fetches live or mocked data and renders stats, heatmaps, and charts
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
//!
//! Usage:
//! ```bash
//! # Stat row over the mocked dataset
//! runboard-cli --mock summary
//!
//! # Weekly heatmap for a date range, live Strava credentials from the env
//! runboard-cli --start 2025-01-01 --end 2025-06-30 heatmap
//!
//! # Pace distribution over the current filter
//! runboard-cli --mock histogram --kind speed
//!
//! # Speed curves for selected activities
//! runboard-cli --mock curve --ids 123456,123457
//! ```

mod commands;
mod display;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::warn;

use runboard::config::Config;
use runboard::dataset::FilterSpec;
use runboard::logging::{init_logging, LoggingConfig};
use runboard::models::{ActivityId, SportType};
use runboard::providers::{MockSource, StravaSource};
use runboard::session::DashboardSession;

#[derive(Parser)]
#[command(
    name = "runboard-cli",
    about = "Running-activity analytics dashboard",
    long_about = "Fetches a running activity history (live Strava or mocked data) and renders summary statistics, weekly heatmaps, distributions, and speed curves."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Use the static mocked dataset instead of live credentials
    #[arg(long, global = true)]
    mock: bool,

    /// First day of the filter range (YYYY-MM-DD)
    #[arg(long, global = true)]
    start: Option<NaiveDate>,

    /// Last day of the filter range, inclusive (YYYY-MM-DD)
    #[arg(long, global = true)]
    end: Option<NaiveDate>,

    /// Sport to keep (defaults to Run)
    #[arg(long, global = true)]
    sport: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

/// Which distribution chart to render
#[derive(Clone, Copy, ValueEnum)]
enum HistogramArg {
    /// Distance in kilometers
    Distance,
    /// Average speed as min/km pace
    Speed,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// Fetch the activity history and report page counts
    Fetch,
    /// Stat row: count, totals, mean distance/duration/pace
    Summary,
    /// Weekly calendar heatmap of kilometers
    Heatmap,
    /// Distribution histogram over the filtered activities
    Histogram {
        /// Which column to bucket
        #[arg(long, value_enum, default_value = "distance")]
        kind: HistogramArg,
    },
    /// Speed curves for specific activities
    Curve {
        /// Comma-separated activity ids
        #[arg(long, value_delimiter = ',', required = true)]
        ids: Vec<ActivityId>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging.level = "debug".into();
    }
    init_logging(&logging)?;

    let config = Config::from_env()?;
    config.validate()?;

    let mut session = build_session(&cli, &config).await?;
    apply_filter(&cli, &mut session);

    let report = session.activities().await;
    if !report.is_complete() {
        warn!(
            "Activity list may be incomplete: pages {:?} were skipped",
            report.skipped_pages
        );
    }

    match cli.command {
        Command::Fetch => commands::fetch(&report),
        Command::Summary => commands::summary(&session).await,
        Command::Heatmap => commands::heatmap(&session).await,
        Command::Histogram { kind } => {
            let kind = match kind {
                HistogramArg::Distance => runboard::session::HistogramKind::Distance,
                HistogramArg::Speed => runboard::session::HistogramKind::Speed,
            };
            commands::histogram(&session, kind).await;
        }
        Command::Curve { ids } => commands::curve(&session, &ids).await,
    }

    Ok(())
}

async fn build_session(cli: &Cli, config: &Config) -> Result<DashboardSession> {
    let client = config.http.client()?;

    if cli.mock {
        let source = MockSource::new(config.mock.clone(), client);
        return Ok(DashboardSession::new(
            Box::new(source),
            config.fetch.clone(),
        ));
    }

    let source = StravaSource::new(config.strava.clone(), client);
    source.authenticate().await?;
    Ok(DashboardSession::new(
        Box::new(source),
        config.fetch.clone(),
    ))
}

fn apply_filter(cli: &Cli, session: &mut DashboardSession) {
    let mut filter = FilterSpec::default();
    if let Some(start) = cli.start {
        filter.start = start;
    }
    if let Some(end) = cli.end {
        filter.end = end;
    }
    if let Some(sport) = &cli.sport {
        filter.sport = SportType::from(sport.clone());
    }
    session.set_filter(filter);
}
