// ABOUTME: End-to-end tests for the dashboard session over a scripted source
// ABOUTME: Cached fetches, selection narrowing, derived views, and curves
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
#![allow(missing_docs)]

mod common;

use chrono::NaiveDate;
use common::{make_activity, make_activity_with, PageScript, ScriptedSource, SharedSource};
use runboard::config::FetchConfig;
use runboard::dataset::FilterSpec;
use runboard::histogram::Histogram;
use runboard::models::{SportType, StreamSet};
use runboard::session::{DashboardSession, HistogramKind};
use std::collections::HashMap;
use std::sync::Arc;

fn march_2025_runs() -> FilterSpec {
    FilterSpec::new(
        NaiveDate::from_ymd_opt(2025, 3, 1).expect("date"),
        NaiveDate::from_ymd_opt(2025, 3, 31).expect("date"),
        SportType::Run,
    )
}

fn scripted_session(source: ScriptedSource) -> (DashboardSession, Arc<ScriptedSource>) {
    let source = Arc::new(source);
    let mut session = DashboardSession::new(
        Box::new(SharedSource(Arc::clone(&source))),
        FetchConfig::default(),
    );
    session.set_filter(march_2025_runs());
    (session, source)
}

fn three_runs() -> ScriptedSource {
    ScriptedSource::with_pages(vec![PageScript::Ok(vec![
        make_activity(1, "2025-03-03T07:00:00Z", 5000.0),
        make_activity(2, "2025-03-04T07:00:00Z", 8000.0),
        make_activity(3, "2025-03-10T07:00:00Z", 10000.0),
    ])])
}

#[tokio::test]
async fn test_activities_fetched_once_across_views() {
    let (session, source) = scripted_session(three_runs());

    let _ = session.summary().await;
    let _ = session.heatmap().await;
    let _ = session.filtered().await;

    // One scripted page plus the empty terminator, never refetched
    assert_eq!(source.list_call_count(), 2);
}

#[tokio::test]
async fn test_refresh_invalidates_the_activity_cache() {
    let (session, source) = scripted_session(three_runs());

    let _ = session.summary().await;
    session.refresh().await;
    let _ = session.summary().await;

    assert_eq!(source.list_call_count(), 4);
}

#[tokio::test]
async fn test_summary_over_the_filtered_frame() {
    let (session, _) = scripted_session(three_runs());

    let stats = session.summary().await;
    assert_eq!(stats.count, 3);
    assert!((stats.total_km - 23.0).abs() < 1e-9);
    assert!((stats.mean_km - 23.0 / 3.0).abs() < 1e-9);
    assert_eq!(stats.mean_duration, "00:30:00");
}

#[tokio::test]
async fn test_filter_excludes_other_sports_and_dates() {
    let source = ScriptedSource::with_pages(vec![PageScript::Ok(vec![
        make_activity(1, "2025-03-03T07:00:00Z", 5000.0),
        make_activity_with(2, "2025-03-04T07:00:00Z", 20000.0, 3600, 5.5, SportType::Ride),
        make_activity(3, "2025-04-01T07:00:00Z", 10000.0),
    ])]);
    let (session, _) = scripted_session(source);

    let frame = session.filtered().await;
    assert_eq!(frame.len(), 1);
    assert_eq!(frame.rows()[0].id, 1);
}

#[tokio::test]
async fn test_cell_selection_narrows_displayed_but_not_heatmap() {
    let (mut session, _) = scripted_session(three_runs());

    let heatmap = session.heatmap().await;
    let cell = heatmap
        .cells
        .iter()
        .find(|c| c.ids.contains(&1))
        .expect("cell for activity 1")
        .clone();
    session.select_cells([&cell]);

    let displayed = session.displayed().await;
    assert_eq!(displayed.len(), 1);
    assert_eq!(displayed.rows()[0].id, 1);

    // The heatmap is the selection surface and stays filter-wide
    assert_eq!(session.heatmap().await.cells.len(), heatmap.cells.len());
}

#[tokio::test]
async fn test_clear_selection_restores_the_full_frame() {
    let (mut session, _) = scripted_session(three_runs());

    session.set_selection([2]);
    assert_eq!(session.displayed().await.len(), 1);

    session.clear_selection();
    assert_eq!(session.displayed().await.len(), 3);
}

#[tokio::test]
async fn test_histogram_placeholder_when_selection_is_a_single_activity() {
    let (mut session, _) = scripted_session(three_runs());
    session.set_selection([1]);

    assert_eq!(
        session.histogram(HistogramKind::Distance).await,
        Histogram::TooFewActivities
    );
}

#[tokio::test]
async fn test_speed_curves_fetch_streams_through_the_cache() {
    let streams: HashMap<_, _> = [
        (
            1,
            StreamSet {
                distance: vec![0.0, 100.0, 200.0, 300.0],
                velocity_smooth: vec![3.0, 3.1, 3.2, 3.3],
            },
        ),
        (
            2,
            StreamSet {
                distance: vec![0.0, 150.0],
                velocity_smooth: vec![2.8, 2.9],
            },
        ),
    ]
    .into_iter()
    .collect();
    let source = three_runs().with_streams(streams);
    let (session, source) = scripted_session(source);

    let set = session.speed_curves(&[1, 2]).await.expect("curves");
    assert_eq!(set.curves.len(), 2);
    assert_eq!(source.stream_call_count(), 2);

    // Second request for the same activities hits the stream cache
    let _ = session.speed_curves(&[1, 2]).await.expect("curves");
    assert_eq!(source.stream_call_count(), 2);
}

#[tokio::test]
async fn test_speed_curves_none_when_no_id_matches() {
    let (session, _) = scripted_session(three_runs());
    assert!(session.speed_curves(&[99]).await.is_none());
}

#[tokio::test]
async fn test_curve_labels_use_displayed_start_dates() {
    let streams: HashMap<_, _> = [(
        1,
        StreamSet {
            distance: vec![0.0],
            velocity_smooth: vec![3.0],
        },
    )]
    .into_iter()
    .collect();
    let source = three_runs().with_streams(streams);
    let (session, _) = scripted_session(source);

    let set = session.speed_curves(&[1]).await.expect("curves");
    assert_eq!(set.curves[0].label, "2025/03/03 07:00:00");
}
