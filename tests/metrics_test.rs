// ABOUTME: Tests for aggregate statistics and unit-conversion helpers
// ABOUTME: Sum/mean defaults, duration formatting, and pace conversion
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
#![allow(missing_docs)]

mod common;

use common::{make_activity, make_activity_with};
use runboard::dataset::{ActivityFrame, NumericColumn};
use runboard::metrics::{
    column_mean, column_sum, format_duration, pace_from_speed, pace_label, SummaryStats,
};
use runboard::models::SportType;

fn sample_frame() -> ActivityFrame {
    ActivityFrame::from_activities(&[
        make_activity(1, "2025-03-03T08:00:00Z", 5000.0),
        make_activity(2, "2025-03-04T08:00:00Z", 10000.0),
        make_activity(3, "2025-03-05T08:00:00Z", 15000.0),
    ])
}

#[test]
fn test_column_sum_matches_direct_total() {
    let frame = sample_frame();
    assert!((column_sum(&frame, NumericColumn::Kms) - 30.0).abs() < 1e-9);
}

#[test]
fn test_column_mean_matches_direct_average() {
    let frame = sample_frame();
    assert!((column_mean(&frame, NumericColumn::Kms) - 10.0).abs() < 1e-9);
}

#[test]
fn test_empty_frame_aggregates_to_zero() {
    let empty = ActivityFrame::default();
    assert_eq!(column_sum(&empty, NumericColumn::Kms), 0.0);
    assert_eq!(column_mean(&empty, NumericColumn::Kms), 0.0);
    assert_eq!(column_mean(&empty, NumericColumn::ElapsedTime), 0.0);
}

#[test]
fn test_format_duration_zero_pads() {
    assert_eq!(format_duration(3661.0), "01:01:01");
    assert_eq!(format_duration(0.0), "00:00:00");
    assert_eq!(format_duration(59.0), "00:00:59");
    assert_eq!(format_duration(7200.0), "02:00:00");
}

#[test]
fn test_format_duration_truncates_fractional_seconds() {
    assert_eq!(format_duration(90.9), "00:01:30");
}

#[test]
fn test_pace_zero_speed_maps_to_zero_pace() {
    assert_eq!(pace_from_speed(0.0), (0, 0.0));
    assert_eq!(pace_label(0.0), "00:00");
}

#[test]
fn test_pace_conversion_inverts_speed() {
    // 2.78 m/s is almost exactly 6:00 min/km
    let (minutes, seconds) = pace_from_speed(2.78);
    let reconstructed = f64::from(minutes) + seconds / 60.0;
    let expected = 1.0 / (2.78 * 0.06);
    assert!((reconstructed - expected).abs() < 1e-6);
    assert_eq!(minutes, 5);
}

#[test]
fn test_pace_label_zero_pads_both_parts() {
    // 3.5 m/s -> 4.7619 min/km -> 4:45
    assert_eq!(pace_label(3.5), "04:45");
}

#[test]
fn test_summary_stats_over_subset() {
    let frame = sample_frame();
    let stats = SummaryStats::compute(&frame);

    assert_eq!(stats.count, 3);
    assert!((stats.total_km - 30.0).abs() < 1e-9);
    assert!((stats.mean_km - 10.0).abs() < 1e-9);
    assert_eq!(stats.mean_duration, "00:30:00");
    assert_eq!(stats.mean_pace, "05:59");
}

#[test]
fn test_summary_stats_empty_subset_stays_renderable() {
    let stats = SummaryStats::compute(&ActivityFrame::default());
    assert_eq!(stats.count, 0);
    assert_eq!(stats.total_km, 0.0);
    assert_eq!(stats.mean_duration, "00:00:00");
    assert_eq!(stats.mean_pace, "00:00");
}

#[test]
fn test_summary_uses_elapsed_time_column() {
    let frame = ActivityFrame::from_activities(&[make_activity_with(
        1,
        "2025-03-03T08:00:00Z",
        5000.0,
        3661,
        2.78,
        SportType::Run,
    )]);
    let stats = SummaryStats::compute(&frame);
    assert_eq!(stats.mean_duration, "01:01:01");
}
