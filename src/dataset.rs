// ABOUTME: Columnar tabular view over the fetched activity collection
// ABOUTME: Computed columns, date-range/sport filtering, and selection resolution
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc, Weekday};
use std::collections::HashSet;

use crate::models::{Activity, ActivityId, SportType};

/// Format used for the displayed start-date string
pub const START_DATE_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// One row of the tabular dataset with its computed columns
#[derive(Debug, Clone, PartialEq)]
pub struct ActivityRow {
    /// Activity identifier
    pub id: ActivityId,
    /// Sport type
    pub sport: SportType,
    /// Start timestamp (UTC)
    pub start_date: DateTime<Utc>,
    /// Start timestamp formatted for display and selection labels
    pub start_date_str: String,
    /// Elapsed time in seconds
    pub elapsed_time: u64,
    /// Distance in kilometers (`distance / 1000`)
    pub kms: f64,
    /// Average speed in meters per second
    pub average_speed: f64,
    /// ISO-8601 week-numbering year
    pub iso_year: i32,
    /// ISO-8601 week number
    pub iso_week: u32,
    /// Day of week
    pub weekday: Weekday,
}

impl From<&Activity> for ActivityRow {
    fn from(activity: &Activity) -> Self {
        let iso = activity.start_date.iso_week();
        Self {
            id: activity.id,
            sport: activity.sport_type.clone(),
            start_date: activity.start_date,
            start_date_str: activity.start_date.format(START_DATE_FORMAT).to_string(),
            elapsed_time: activity.elapsed_time,
            kms: activity.distance / 1000.0,
            average_speed: activity.average_speed,
            iso_year: iso.year(),
            iso_week: iso.week(),
            weekday: activity.start_date.weekday(),
        }
    }
}

/// Numeric columns aggregate helpers can address by name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumericColumn {
    /// Kilometers column
    Kms,
    /// Elapsed time in seconds
    ElapsedTime,
    /// Average speed in meters per second
    AverageSpeed,
}

/// Date range and sport filter applied to the raw collection
///
/// The end date is treated as inclusive by extending it to 23:59:59, matching
/// the date-picker semantics of the dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterSpec {
    /// First day included
    pub start: NaiveDate,
    /// Last day included
    pub end: NaiveDate,
    /// Sport to keep
    pub sport: SportType,
}

impl Default for FilterSpec {
    /// Initial dashboard state: runs since 2025-01-01 up to today
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2025, 1, 1).unwrap_or(NaiveDate::MIN),
            end: Utc::now().date_naive(),
            sport: SportType::Run,
        }
    }
}

impl FilterSpec {
    /// Filter for one sport over a closed date range
    #[must_use]
    pub const fn new(start: NaiveDate, end: NaiveDate, sport: SportType) -> Self {
        Self { start, end, sport }
    }

    fn range_utc(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        let start = Utc.from_utc_datetime(&self.start.and_time(chrono::NaiveTime::MIN));
        let end_of_day = self
            .end
            .and_hms_opt(23, 59, 59)
            .unwrap_or_else(|| self.end.and_time(chrono::NaiveTime::MIN));
        (start, Utc.from_utc_datetime(&end_of_day))
    }
}

/// Derived columnar view over the activity collection
///
/// Every transformation produces a new frame; nothing mutates in place, so a
/// frame is always a deterministic function of (raw collection, filter,
/// selection).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActivityFrame {
    rows: Vec<ActivityRow>,
}

impl ActivityFrame {
    /// Build the frame from the raw fetched collection
    #[must_use]
    pub fn from_activities(activities: &[Activity]) -> Self {
        Self {
            rows: activities.iter().map(ActivityRow::from).collect(),
        }
    }

    /// Rows in fetch order
    #[must_use]
    pub fn rows(&self) -> &[ActivityRow] {
        &self.rows
    }

    /// Number of rows
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the frame has no rows
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// New frame keeping rows matching the filter's sport and date range
    #[must_use]
    pub fn filter(&self, spec: &FilterSpec) -> Self {
        let (start, end) = spec.range_utc();
        Self {
            rows: self
                .rows
                .iter()
                .filter(|row| {
                    row.sport == spec.sport && row.start_date >= start && row.start_date <= end
                })
                .cloned()
                .collect(),
        }
    }

    /// New frame keeping rows whose id is in the selection
    ///
    /// An empty selection means "no restriction": the frame is returned whole,
    /// mirroring the dashboard's behavior when no heatmap cell is selected.
    #[must_use]
    pub fn select(&self, selected_ids: &HashSet<ActivityId>) -> Self {
        if selected_ids.is_empty() {
            return self.clone();
        }
        Self {
            rows: self
                .rows
                .iter()
                .filter(|row| selected_ids.contains(&row.id))
                .cloned()
                .collect(),
        }
    }

    /// Values of one numeric column, in row order
    #[must_use]
    pub fn column(&self, column: NumericColumn) -> Vec<f64> {
        self.rows
            .iter()
            .map(|row| match column {
                NumericColumn::Kms => row.kms,
                NumericColumn::ElapsedTime => row.elapsed_time as f64,
                NumericColumn::AverageSpeed => row.average_speed,
            })
            .collect()
    }
}
