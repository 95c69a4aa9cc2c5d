// ABOUTME: Aggregate statistics and unit-conversion helpers for display
// ABOUTME: Column sums/means, HH:MM:SS durations, and m/s to min/km pace
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

use serde::Serialize;

use crate::dataset::{ActivityFrame, NumericColumn};

/// Sum of a numeric column; 0.0 for an empty frame
#[must_use]
pub fn column_sum(frame: &ActivityFrame, column: NumericColumn) -> f64 {
    frame.column(column).iter().sum()
}

/// Mean of a numeric column; 0.0 for an empty frame
///
/// The empty default sidesteps division by zero so stat tiles always render.
#[must_use]
pub fn column_mean(frame: &ActivityFrame, column: NumericColumn) -> f64 {
    if frame.is_empty() {
        return 0.0;
    }
    column_sum(frame, column) / frame.len() as f64
}

/// Seconds to a zero-padded `HH:MM:SS` string
///
/// Fractional seconds are truncated, matching how mean durations are shown.
#[must_use]
pub fn format_duration(seconds: f64) -> String {
    let secs = seconds.max(0.0) as u64;
    let hours = secs / 3600;
    let minutes = secs % 3600 / 60;
    let seconds = secs % 60;
    format!("{hours:02}:{minutes:02}:{seconds:02}")
}

/// Convert meters-per-second into minutes-per-kilometer pace
///
/// `min_per_km = 1 / (v * 0.06)`; the integer part is minutes and the
/// fractional part times 60 is seconds. A zero (or negative, from bad sensor
/// data) speed maps to `(0, 0.0)` instead of dividing by zero.
#[must_use]
pub fn pace_from_speed(velocity_ms: f64) -> (u32, f64) {
    if velocity_ms <= 0.0 {
        return (0, 0.0);
    }

    let min_per_km = 1.0 / (velocity_ms * 0.06);
    let minutes = min_per_km as u32;
    let seconds = min_per_km.fract() * 60.0;
    (minutes, seconds)
}

/// Pace as a zero-padded `MM:SS` label
#[must_use]
pub fn pace_label(velocity_ms: f64) -> String {
    let (minutes, seconds) = pace_from_speed(velocity_ms);
    format!("{minutes:02}:{:02}", seconds as u32)
}

/// Pace folded into a sortable float, `MM.SS`
///
/// `4:05 min/km` becomes `4.05`. Used for axis tick labels where charts need
/// a numeric value that still reads as a pace.
#[must_use]
pub fn pace_float(velocity_ms: f64) -> f64 {
    let (minutes, seconds) = pace_from_speed(velocity_ms);
    f64::from(minutes) + f64::from(seconds as u32) / 100.0
}

/// The dashboard's stat row over one displayed subset
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SummaryStats {
    /// Number of activities in the subset
    pub count: usize,
    /// Total kilometers
    pub total_km: f64,
    /// Mean distance in kilometers
    pub mean_km: f64,
    /// Mean duration, formatted `HH:MM:SS`
    pub mean_duration: String,
    /// Mean pace, formatted `MM:SS` min/km
    pub mean_pace: String,
}

impl SummaryStats {
    /// Compute the stat row for a frame subset
    ///
    /// Empty subsets produce zeros and `00:00:00` / `00:00` rather than
    /// failing, so the view stays renderable.
    #[must_use]
    pub fn compute(frame: &ActivityFrame) -> Self {
        Self {
            count: frame.len(),
            total_km: column_sum(frame, NumericColumn::Kms),
            mean_km: column_mean(frame, NumericColumn::Kms),
            mean_duration: format_duration(column_mean(frame, NumericColumn::ElapsedTime)),
            mean_pace: pace_label(column_mean(frame, NumericColumn::AverageSpeed)),
        }
    }
}
