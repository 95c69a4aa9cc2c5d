// ABOUTME: Plain-text rendering helpers for the runboard CLI
// ABOUTME: Tables for summaries, heatmap cells, histograms, and curves
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

use runboard::curve::SpeedCurveSet;
use runboard::heatmap::{day_name, WeeklyHeatmap};
use runboard::histogram::Histogram;
use runboard::metrics::SummaryStats;

/// Print the stat row
pub fn render_summary(stats: &SummaryStats) {
    println!("Activities:       {}", stats.count);
    println!("Total km:         {:.0}", stats.total_km);
    println!("Average distance: {:.2} km", stats.mean_km);
    println!("Average duration: {}", stats.mean_duration);
    println!("Average pace:     {} min/km", stats.mean_pace);
}

/// Print the heatmap, most recent week first
pub fn render_heatmap(heatmap: &WeeklyHeatmap) {
    if heatmap.cells.is_empty() {
        println!("No activities in range.");
        return;
    }

    for week in &heatmap.week_order {
        println!("{week}");
        for cell in heatmap
            .cells
            .iter()
            .filter(|cell| cell.year_week == *week)
        {
            println!(
                "  {:<9} {:>7.2} km  ({} activities, first {})",
                day_name(cell.weekday),
                cell.kms,
                cell.ids.len(),
                cell.earliest.format("%Y/%m/%d %H:%M")
            );
        }
    }
}

/// Print one histogram as a label + bar table
pub fn render_histogram(title: &str, histogram: &Histogram) {
    println!("{title}");
    match histogram {
        Histogram::TooFewActivities => {
            println!("Select more than one activity to view the distribution!");
        }
        Histogram::Buckets(buckets) if buckets.is_empty() => {
            println!("No activities in range.");
        }
        Histogram::Buckets(buckets) => {
            for bucket in buckets {
                println!(
                    "  {:<16} {:>4}  {}",
                    bucket.range,
                    bucket.count,
                    "#".repeat(bucket.count)
                );
            }
        }
    }
}

/// Print each curve's label, point count, and velocity envelope
pub fn render_curves(set: &SpeedCurveSet) {
    println!(
        "Speed curves ({} activities, velocity {:.2}-{:.2} m/s)",
        set.curves.len(),
        set.min_velocity,
        set.max_velocity
    );
    for curve in &set.curves {
        let fastest = curve
            .points
            .iter()
            .map(|p| p.velocity)
            .fold(f64::NEG_INFINITY, f64::max);
        println!(
            "  {}  {} points, best pace {}",
            curve.label,
            curve.points.len(),
            runboard::metrics::pace_label(fastest)
        );
    }
}
