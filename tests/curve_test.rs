// ABOUTME: Tests for speed curve derivation from telemetry streams
// ABOUTME: Downsampling stride, noise filtering, and pace axis ticks
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
#![allow(missing_docs)]

use runboard::curve::{
    speed_curve, SpeedCurve, SpeedCurveSet, DOWNSAMPLE_STRIDE, MIN_PLAUSIBLE_VELOCITY, TICK_STEP,
};
use runboard::models::StreamSet;

fn streams(distance: Vec<f64>, velocity: Vec<f64>) -> StreamSet {
    StreamSet {
        distance,
        velocity_smooth: velocity,
    }
}

#[test]
fn test_every_third_sample_is_kept() {
    let s = streams(
        (0..9).map(|i| f64::from(i) * 100.0).collect(),
        vec![3.0; 9],
    );
    let curve = speed_curve(1, "label", &s);
    // Indices 0, 3, 6
    assert_eq!(curve.points.len(), 3);
    assert!((curve.points[1].distance_km - 0.3).abs() < 1e-9);
    assert_eq!(DOWNSAMPLE_STRIDE, 3);
}

#[test]
fn test_slow_samples_are_dropped_as_noise() {
    // Samples at indices 0 and 3 survive the stride; index 3 is below 1 m/s
    let s = streams(
        vec![0.0, 100.0, 200.0, 300.0, 400.0, 500.0, 600.0],
        vec![3.0, 3.0, 3.0, 0.4, 3.0, 3.0, 3.1],
    );
    let curve = speed_curve(1, "label", &s);
    let velocities: Vec<f64> = curve.points.iter().map(|p| p.velocity).collect();
    assert_eq!(velocities, vec![3.0, 3.1]);
    assert!(velocities.iter().all(|&v| v >= MIN_PLAUSIBLE_VELOCITY));
}

#[test]
fn test_point_carries_pace_hover_label() {
    let s = streams(vec![0.0], vec![3.5]);
    let curve = speed_curve(1, "label", &s);
    // 1 / (3.5 * 0.06) = 4.761..., so 4 min and .761 * 60 = 45 s
    assert_eq!(curve.points[0].pace, "04:45");
}

#[test]
fn test_empty_streams_yield_empty_curve() {
    let curve = speed_curve(1, "label", &StreamSet::default());
    assert!(curve.points.is_empty());
}

#[test]
fn test_set_drops_empty_curves() {
    let full = speed_curve(1, "a", &streams(vec![0.0], vec![3.0]));
    let empty = speed_curve(2, "b", &StreamSet::default());

    let set = SpeedCurveSet::from_curves(vec![full, empty]).expect("one curve remains");
    assert_eq!(set.curves.len(), 1);
    assert_eq!(set.curves[0].id, 1);
}

#[test]
fn test_set_is_none_when_nothing_plottable() {
    assert!(SpeedCurveSet::from_curves(Vec::new()).is_none());

    let empty = speed_curve(1, "a", &StreamSet::default());
    assert!(SpeedCurveSet::from_curves(vec![empty]).is_none());
}

#[test]
fn test_velocity_extent_spans_all_curves() {
    let a = speed_curve(1, "a", &streams(vec![0.0], vec![2.5]));
    let b = speed_curve(2, "b", &streams(vec![0.0], vec![4.0]));

    let set = SpeedCurveSet::from_curves(vec![a, b]).expect("curves");
    assert!((set.min_velocity - 2.5).abs() < 1e-9);
    assert!((set.max_velocity - 4.0).abs() < 1e-9);
}

#[test]
fn test_pace_ticks_cover_range_at_quarter_steps() {
    let set = SpeedCurveSet {
        curves: vec![SpeedCurve {
            id: 1,
            label: "a".to_owned(),
            points: Vec::new(),
        }],
        min_velocity: 2.3,
        max_velocity: 3.6,
    };

    let ticks = set.pace_ticks();
    // floor(2.3) = 2.0 up to but excluding floor(3.6) + 1 = 4.0
    assert!((ticks[0].velocity - 2.0).abs() < 1e-9);
    let last = ticks.last().expect("ticks");
    assert!((last.velocity - 3.75).abs() < 1e-9);
    assert_eq!(ticks.len(), 8);
    assert!((ticks[1].velocity - ticks[0].velocity - TICK_STEP).abs() < 1e-9);

    // Tick labels read as pace floats: 2 m/s is 8.2 min/km (8 min 20 s)
    assert!((ticks[0].pace - 8.2).abs() < 1e-2);
}
