// ABOUTME: Per-activity speed curves derived from telemetry streams
// ABOUTME: Downsampling, implausible-sample filtering, and pace axis ticks
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

use crate::metrics::{pace_float, pace_label};
use crate::models::{ActivityId, StreamSet};

/// Keep every Nth stream sample to smooth the rendered curve
pub const DOWNSAMPLE_STRIDE: usize = 3;

/// Samples slower than this (m/s) are sensor noise and are dropped
pub const MIN_PLAUSIBLE_VELOCITY: f64 = 1.0;

/// Velocity spacing between pace axis ticks, in m/s
pub const TICK_STEP: f64 = 0.25;

/// Cap on simultaneously plotted activities
pub const MAX_SELECTED_ACTIVITIES: usize = 10;

/// One point of a speed curve
#[derive(Debug, Clone, PartialEq)]
pub struct CurvePoint {
    /// Cumulative distance in kilometers, rounded to two decimals
    pub distance_km: f64,
    /// Raw smoothed velocity in m/s (the plotted y value)
    pub velocity: f64,
    /// Pace label shown on hover, `MM:SS` min/km
    pub pace: String,
}

/// The speed curve of one activity
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedCurve {
    /// Activity identifier
    pub id: ActivityId,
    /// Trace label (the activity's displayed start date)
    pub label: String,
    /// Curve points in distance order
    pub points: Vec<CurvePoint>,
}

/// One pace axis tick: raw velocity position and its pace float label
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PaceTick {
    /// Tick position in m/s
    pub velocity: f64,
    /// Label value as an `MM.SS` pace float
    pub pace: f64,
}

/// A set of curves sharing one velocity axis
#[derive(Debug, Clone, PartialEq)]
pub struct SpeedCurveSet {
    /// One curve per selected activity
    pub curves: Vec<SpeedCurve>,
    /// Smallest retained velocity across all curves
    pub min_velocity: f64,
    /// Largest retained velocity across all curves
    pub max_velocity: f64,
}

/// Build one activity's curve from its streams
///
/// Takes every third sample, pairs distance with smoothed velocity, and drops
/// samples below [`MIN_PLAUSIBLE_VELOCITY`]. An empty or missing stream set
/// yields an empty curve, which the set builder then omits.
#[must_use]
pub fn speed_curve(id: ActivityId, label: &str, streams: &StreamSet) -> SpeedCurve {
    let n = streams.len();
    let points = (0..n)
        .step_by(DOWNSAMPLE_STRIDE)
        .filter_map(|i| {
            let velocity = streams.velocity_smooth[i];
            if velocity < MIN_PLAUSIBLE_VELOCITY {
                return None;
            }
            Some(CurvePoint {
                distance_km: (streams.distance[i] / 1000.0 * 100.0).round() / 100.0,
                velocity,
                pace: pace_label(velocity),
            })
        })
        .collect();

    SpeedCurve {
        id,
        label: label.to_owned(),
        points,
    }
}

impl SpeedCurveSet {
    /// Assemble a set from individual curves, dropping empty ones
    ///
    /// Returns `None` when nothing remains to plot — no selection, or every
    /// selected activity degraded to an empty stream — so the caller can show
    /// an explanatory placeholder instead.
    #[must_use]
    pub fn from_curves(curves: Vec<SpeedCurve>) -> Option<Self> {
        let curves: Vec<SpeedCurve> = curves.into_iter().filter(|c| !c.points.is_empty()).collect();
        if curves.is_empty() {
            return None;
        }

        let mut min_velocity = f64::INFINITY;
        let mut max_velocity = f64::NEG_INFINITY;
        for point in curves.iter().flat_map(|c| &c.points) {
            min_velocity = min_velocity.min(point.velocity);
            max_velocity = max_velocity.max(point.velocity);
        }

        Some(Self {
            curves,
            min_velocity,
            max_velocity,
        })
    }

    /// Pace axis ticks every [`TICK_STEP`] m/s across the velocity range
    ///
    /// Positions are raw velocities from `floor(min)` up to but excluding
    /// `floor(max) + 1`; labels are their min/km conversions, so the chart
    /// plots in velocity space but reads in pace.
    #[must_use]
    pub fn pace_ticks(&self) -> Vec<PaceTick> {
        let start = self.min_velocity.floor();
        let end = self.max_velocity.floor() + 1.0;

        let mut ticks = Vec::new();
        let mut v = start;
        while v < end {
            ticks.push(PaceTick {
                velocity: v,
                pace: pace_float(v),
            });
            v += TICK_STEP;
        }
        ticks
    }
}
