// ABOUTME: Main library entry point for the runboard activity-analytics crate
// ABOUTME: Fetches running history and derives heatmaps, distributions, and curves
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

#![deny(unsafe_code)]

//! # Runboard
//!
//! Analytics over a runner's activity history. The crate fetches activity
//! summaries from the Strava API (or a static mocked dataset), builds a
//! columnar view with computed columns, and derives the dashboard's views:
//! summary statistics, a weekly calendar heatmap, distance/pace distribution
//! histograms, and per-activity speed curves.
//!
//! ## Architecture
//!
//! - **Providers**: the [`providers::ActivitySource`] seam with live Strava
//!   and mocked-data implementations
//! - **Fetcher**: pagination with bounded retries and exponential backoff;
//!   failed pages are skipped and reported, never fatal
//! - **Cache**: session-scoped memoization of the activity list and streams
//! - **Dataset**: pure filtering and selection over [`dataset::ActivityFrame`]
//! - **Metrics / Histogram / Heatmap / Curve**: stateless derivations
//! - **Session**: [`session::DashboardSession`] wires state changes to
//!   recomputation
//!
//! ## Example
//!
//! ```rust,no_run
//! use runboard::config::Config;
//! use runboard::providers::MockSource;
//! use runboard::session::DashboardSession;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let source = MockSource::new(config.mock.clone(), config.http.client()?);
//!     let session = DashboardSession::new(Box::new(source), config.fetch.clone());
//!
//!     let summary = session.summary().await;
//!     println!("{} activities, {:.0} km total", summary.count, summary.total_km);
//!     Ok(())
//! }
//! ```

pub mod cache;
pub mod config;
pub mod curve;
pub mod dataset;
pub mod errors;
pub mod fetcher;
pub mod heatmap;
pub mod histogram;
pub mod logging;
pub mod metrics;
pub mod models;
pub mod providers;
pub mod session;
