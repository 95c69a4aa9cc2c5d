// ABOUTME: Equal-width histogram bucketing for distance and pace distributions
// ABOUTME: Bucket labels parse back to numeric bounds for correct ordering
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

use regex::Regex;
use std::sync::OnceLock;

use crate::dataset::{ActivityFrame, NumericColumn};
use crate::metrics::{pace_float, pace_label};

/// Number of equal-width buckets
pub const DEFAULT_BIN_COUNT: usize = 10;

/// Extracts the floating bounds embedded in a bucket label
const NUMERIC_PATTERN: &str = r"[-+]?\d*\.?\d+(?:[eE][-+]?\d+)?";

static NUMERIC_RE: OnceLock<Regex> = OnceLock::new();

#[allow(clippy::expect_used)]
fn numeric_re() -> &'static Regex {
    NUMERIC_RE.get_or_init(|| {
        Regex::new(NUMERIC_PATTERN).expect("constant pattern compiles") // Safe: verified by tests
    })
}

/// One display bucket of a distribution chart
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBucket {
    /// Display label, `"lo - hi"` in the chart's unit
    pub range: String,
    /// Numeric lower bound used for ordering (km, or pace as `MM.SS` float)
    pub lower: f64,
    /// Numeric upper bound
    pub upper: f64,
    /// Observations in this bucket
    pub count: usize,
}

/// A distribution chart, or the reason it cannot be drawn
#[derive(Debug, Clone, PartialEq)]
pub enum Histogram {
    /// Buckets in ascending numeric order; empty when the subset is empty
    Buckets(Vec<HistogramBucket>),
    /// One activity has no distribution; the view shows a prompt instead
    TooFewActivities,
}

/// Parse the two bounds embedded in a bucket label
///
/// Returns `None` unless the label contains at least two numbers. The parsed
/// values are the bounds downstream code orders and converts with, which is
/// what makes re-sorting textual buckets numerically possible.
#[must_use]
pub fn parse_bucket_bounds(label: &str) -> Option<(f64, f64)> {
    let mut numbers = numeric_re()
        .find_iter(label)
        .filter_map(|m| m.as_str().parse::<f64>().ok());
    let lower = numbers.next()?;
    let upper = numbers.next()?;
    Some((lower, upper))
}

/// Equal-width binning producing `"(lo, hi]"` labels and counts
///
/// Bounds use the shortest round-trip float formatting, so a label parses
/// back to exactly the bounds that produced it. All-equal values collapse
/// into a single bucket.
#[must_use]
pub fn equal_width_bins(values: &[f64], bin_count: usize) -> Vec<(String, usize)> {
    if values.is_empty() || bin_count == 0 {
        return Vec::new();
    }

    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let width = (max - min) / bin_count as f64;

    if width <= 0.0 {
        return vec![(format!("({min}, {max}]"), values.len())];
    }

    let mut counts = vec![0_usize; bin_count];
    for &v in values {
        let idx = (((v - min) / width) as usize).min(bin_count - 1);
        counts[idx] += 1;
    }

    counts
        .into_iter()
        .enumerate()
        .map(|(i, count)| {
            let lo = min + width * i as f64;
            let hi = min + width * (i + 1) as f64;
            (format!("({lo}, {hi}]"), count)
        })
        .collect()
}

/// Distance distribution over the kilometers column
///
/// Bucket bounds are parsed back out of the labels, rounded to two decimals,
/// and the buckets re-sorted ascending by the parsed minimum — textual labels
/// do not sort numerically ("9" > "10" as strings).
#[must_use]
pub fn distance_histogram(frame: &ActivityFrame) -> Histogram {
    if frame.len() == 1 {
        return Histogram::TooFewActivities;
    }

    let mut buckets: Vec<HistogramBucket> =
        equal_width_bins(&frame.column(NumericColumn::Kms), DEFAULT_BIN_COUNT)
            .iter()
            .filter_map(|(label, count)| {
                let (lo, hi) = parse_bucket_bounds(label)?;
                let lower = round2(lo);
                let upper = round2(hi);
                Some(HistogramBucket {
                    range: format!("{lower:.2} - {upper:.2}"),
                    lower,
                    upper,
                    count: *count,
                })
            })
            .collect();

    buckets.sort_by(|a, b| a.lower.total_cmp(&b.lower));
    Histogram::Buckets(buckets)
}

/// Speed distribution over the average-speed column, displayed as pace
///
/// Bounds are converted from m/s to min/km, which inverts the ordering:
/// higher raw speed is lower pace, so each bucket's min and max swap after
/// conversion, and the buckets are re-sorted by the converted minimum.
#[must_use]
pub fn speed_histogram(frame: &ActivityFrame) -> Histogram {
    if frame.len() == 1 {
        return Histogram::TooFewActivities;
    }

    let mut buckets: Vec<HistogramBucket> =
        equal_width_bins(&frame.column(NumericColumn::AverageSpeed), DEFAULT_BIN_COUNT)
            .iter()
            .filter_map(|(label, count)| {
                let (lo_speed, hi_speed) = parse_bucket_bounds(label)?;
                // Faster bound becomes the pace minimum
                let pace_min = pace_label(hi_speed);
                let pace_max = pace_label(lo_speed);
                Some(HistogramBucket {
                    range: format!("{pace_min} - {pace_max}"),
                    lower: pace_float(hi_speed),
                    upper: pace_float(lo_speed),
                    count: *count,
                })
            })
            .collect();

    buckets.sort_by(|a, b| a.lower.total_cmp(&b.lower));
    Histogram::Buckets(buckets)
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
