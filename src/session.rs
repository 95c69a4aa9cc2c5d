// ABOUTME: Dashboard session state and explicit recompute-on-change wiring
// ABOUTME: Owns the source, caches, filter, and selection; derives all views
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.

use std::collections::HashSet;
use std::sync::Arc;
use tracing::debug;

use crate::cache::SessionCache;
use crate::config::FetchConfig;
use crate::curve::{speed_curve, SpeedCurveSet, MAX_SELECTED_ACTIVITIES};
use crate::dataset::{ActivityFrame, FilterSpec};
use crate::fetcher::{fetch_all_activities, fetch_stream, FetchReport};
use crate::heatmap::{weekly_heatmap, HeatmapCell, WeeklyHeatmap};
use crate::histogram::{distance_histogram, speed_histogram, Histogram};
use crate::metrics::SummaryStats;
use crate::models::{ActivityId, StreamKey};
use crate::providers::ActivitySource;

/// Which distribution chart to derive
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistogramKind {
    /// Distance in kilometers
    Distance,
    /// Average speed shown as min/km pace
    Speed,
}

/// One dashboard session: source, caches, and ephemeral UI state
///
/// Each setter only mutates state; every accessor recomputes its derived view
/// from (cached raw collection, filter, selection) on demand. That keeps the
/// invariant that a displayed frame is a pure function of those inputs.
pub struct DashboardSession {
    source: Box<dyn ActivitySource>,
    cache: SessionCache,
    fetch_config: FetchConfig,
    filter: FilterSpec,
    selected_ids: HashSet<ActivityId>,
}

impl DashboardSession {
    /// Create a session over a source with the given fetch limits
    #[must_use]
    pub fn new(source: Box<dyn ActivitySource>, fetch_config: FetchConfig) -> Self {
        Self {
            source,
            cache: SessionCache::default(),
            fetch_config,
            filter: FilterSpec::default(),
            selected_ids: HashSet::new(),
        }
    }

    /// The session's fetch report, fetching on first access
    pub async fn activities(&self) -> Arc<FetchReport> {
        self.cache
            .activities_or_fetch(|| fetch_all_activities(self.source.as_ref(), &self.fetch_config))
            .await
    }

    /// Replace the date-range/sport filter
    pub fn set_filter(&mut self, filter: FilterSpec) {
        debug!("Filter changed to {filter:?}");
        self.filter = filter;
    }

    /// Current filter
    #[must_use]
    pub const fn filter(&self) -> &FilterSpec {
        &self.filter
    }

    /// Select activities by id (clicked directly or via cells)
    pub fn set_selection(&mut self, ids: impl IntoIterator<Item = ActivityId>) {
        self.selected_ids = ids.into_iter().collect();
        debug!("Selection now holds {} activities", self.selected_ids.len());
    }

    /// Select every activity contributing to the given heatmap cells
    pub fn select_cells<'a>(&mut self, cells: impl IntoIterator<Item = &'a HeatmapCell>) {
        self.selected_ids = cells
            .into_iter()
            .flat_map(|cell| cell.ids.iter().copied())
            .collect();
        debug!("Selection now holds {} activities", self.selected_ids.len());
    }

    /// Clear the selection; views fall back to the whole filtered frame
    pub fn clear_selection(&mut self) {
        self.selected_ids.clear();
    }

    /// Drop cached fetches so the next access hits the source again
    pub async fn refresh(&self) {
        self.cache.invalidate().await;
    }

    /// The filtered frame (date range + sport, no selection applied)
    pub async fn filtered(&self) -> ActivityFrame {
        let report = self.activities().await;
        ActivityFrame::from_activities(&report.activities).filter(&self.filter)
    }

    /// The displayed frame: filtered, then narrowed to the selection
    pub async fn displayed(&self) -> ActivityFrame {
        self.filtered().await.select(&self.selected_ids)
    }

    /// Stat row over the displayed frame
    pub async fn summary(&self) -> SummaryStats {
        SummaryStats::compute(&self.displayed().await)
    }

    /// Weekly heatmap over the filtered frame
    ///
    /// The heatmap reflects the filter only — it is the selection surface, so
    /// narrowing it to the selection would hide the cells being clicked.
    pub async fn heatmap(&self) -> WeeklyHeatmap {
        weekly_heatmap(&self.filtered().await)
    }

    /// Distribution chart over the displayed frame
    pub async fn histogram(&self, kind: HistogramKind) -> Histogram {
        let frame = self.displayed().await;
        match kind {
            HistogramKind::Distance => distance_histogram(&frame),
            HistogramKind::Speed => speed_histogram(&frame),
        }
    }

    /// Speed curves for up to [`MAX_SELECTED_ACTIVITIES`] displayed activities
    ///
    /// Streams are fetched lazily through the session cache with the bounded
    /// no-backoff retry policy; activities whose stream degrades to empty are
    /// omitted. `None` means there is nothing to plot and the caller should
    /// show a placeholder.
    pub async fn speed_curves(&self, ids: &[ActivityId]) -> Option<SpeedCurveSet> {
        let frame = self.displayed().await;
        let keys = [StreamKey::Distance, StreamKey::VelocitySmooth];

        let mut curves = Vec::new();
        for row in frame
            .rows()
            .iter()
            .filter(|row| ids.contains(&row.id))
            .take(MAX_SELECTED_ACTIVITIES)
        {
            let streams = self
                .cache
                .stream_or_fetch(row.id, &keys, || {
                    fetch_stream(
                        self.source.as_ref(),
                        row.id,
                        &keys,
                        &self.fetch_config.retry,
                    )
                })
                .await;
            curves.push(speed_curve(row.id, &row.start_date_str, &streams));
        }

        SpeedCurveSet::from_curves(curves)
    }
}
