// ABOUTME: Weekly calendar heatmap aggregation over the activity frame
// ABOUTME: (ISO year, ISO week, weekday) cells with summed kilometers
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

use chrono::{DateTime, Utc, Weekday};
use std::collections::BTreeMap;

use crate::dataset::ActivityFrame;
use crate::models::ActivityId;

/// Full weekday name for the heatmap axis, Monday first
#[must_use]
pub const fn day_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}

/// One aggregation cell of the calendar heatmap
#[derive(Debug, Clone, PartialEq)]
pub struct HeatmapCell {
    /// ISO week-numbering year
    pub iso_year: i32,
    /// ISO week number
    pub iso_week: u32,
    /// Day of week
    pub weekday: Weekday,
    /// Synthetic `"year - week"` row label
    pub year_week: String,
    /// Kilometers summed over the cell, rounded to two decimals
    pub kms: f64,
    /// Earliest start timestamp among contributing activities
    pub earliest: DateTime<Utc>,
    /// Contributing activity identifiers
    pub ids: Vec<ActivityId>,
}

/// The calendar heatmap: cells plus the week axis order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WeeklyHeatmap {
    /// Cells sorted ascending by (year, week, weekday)
    pub cells: Vec<HeatmapCell>,
    /// `"year - week"` labels, most recent week first
    pub week_order: Vec<String>,
}

/// Parse a `"year - week"` label back into its integer parts
///
/// String order is lexicographic ("2025 - 10" < "2025 - 3"), so the axis must
/// be ordered by the parsed integers instead.
#[must_use]
pub fn parse_year_week(label: &str) -> Option<(i32, u32)> {
    let (year, week) = label.split_once(" - ")?;
    Some((year.trim().parse().ok()?, week.trim().parse().ok()?))
}

/// Aggregate a frame into weekly heatmap cells
///
/// Rows group by (ISO year, ISO week, weekday); each cell sums kilometers,
/// keeps the earliest start timestamp for display, and records which
/// activities contributed so cell selection can resolve back to rows.
#[must_use]
pub fn weekly_heatmap(frame: &ActivityFrame) -> WeeklyHeatmap {
    let mut cells: BTreeMap<(i32, u32, u32), HeatmapCell> = BTreeMap::new();

    for row in frame.rows() {
        let key = (
            row.iso_year,
            row.iso_week,
            row.weekday.number_from_monday(),
        );
        cells
            .entry(key)
            .and_modify(|cell| {
                cell.kms += row.kms;
                cell.earliest = cell.earliest.min(row.start_date);
                cell.ids.push(row.id);
            })
            .or_insert_with(|| HeatmapCell {
                iso_year: row.iso_year,
                iso_week: row.iso_week,
                weekday: row.weekday,
                year_week: format!("{} - {}", row.iso_year, row.iso_week),
                kms: row.kms,
                earliest: row.start_date,
                ids: vec![row.id],
            });
    }

    let mut cells: Vec<HeatmapCell> = cells.into_values().collect();
    for cell in &mut cells {
        cell.kms = (cell.kms * 100.0).round() / 100.0;
    }

    let mut week_order: Vec<String> = cells.iter().map(|c| c.year_week.clone()).collect();
    week_order.sort_by_key(|label| {
        // Descending numeric order; unparseable labels sink to the end
        parse_year_week(label).map_or((i32::MAX, i32::MAX), |(y, w)| (-y, -(w as i32)))
    });
    week_order.dedup();

    WeeklyHeatmap { cells, week_order }
}
