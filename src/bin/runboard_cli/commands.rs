// ABOUTME: Subcommand handlers for the runboard CLI
// ABOUTME: Each handler derives one view from the session and renders it
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

use runboard::fetcher::FetchReport;
use runboard::models::ActivityId;
use runboard::session::{DashboardSession, HistogramKind};

use crate::display;

/// Report the session fetch: counts, pages, and skipped pages
pub fn fetch(report: &FetchReport) {
    println!(
        "Fetched {} activities over {} pages",
        report.activities.len(),
        report.pages_fetched
    );
    if !report.is_complete() {
        println!(
            "Warning: {} page(s) skipped after retries: {:?}",
            report.skipped_pages.len(),
            report.skipped_pages
        );
    }
}

/// Render the stat row over the displayed activities
pub async fn summary(session: &DashboardSession) {
    display::render_summary(&session.summary().await);
}

/// Render the weekly heatmap over the filtered activities
pub async fn heatmap(session: &DashboardSession) {
    display::render_heatmap(&session.heatmap().await);
}

/// Render one distribution histogram over the displayed activities
pub async fn histogram(session: &DashboardSession, kind: HistogramKind) {
    let title = match kind {
        HistogramKind::Distance => "Distance Distribution (km)",
        HistogramKind::Speed => "Speed Distribution (min/km)",
    };
    display::render_histogram(title, &session.histogram(kind).await);
}

/// Render speed curves for the requested activities
pub async fn curve(session: &DashboardSession, ids: &[ActivityId]) {
    match session.speed_curves(ids).await {
        Some(set) => display::render_curves(&set),
        None => println!("Select at least one activity with telemetry to plot!"),
    }
}
