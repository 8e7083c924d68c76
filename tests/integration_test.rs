// Integration tests for full layout passes, the scheduler store and settings files

mod fixtures;

use fixtures::{config, resources, selected_date, timed, utc};
use pretty_assertions::assert_eq;
use serde_json::json;

use rust_scheduler::models::layout::ScheduleLayout;
use rust_scheduler::models::ui::{ResourceViewMode, ViewMode};
use rust_scheduler::services::indicator::{CurrentTimeTracker, FixedClock, IndicatorState};
use rust_scheduler::services::scheduler::{EventSource, FetchQuery};
use rust_scheduler::services::settings;
use rust_scheduler::{
    build_schedule_layout, Event, Key, LayoutRequest, Resource, ResourceFields, Scheduler,
    SchedulerSettings, ViewConfig,
};

fn layout(config: &ViewConfig, resources: &[Resource], events: &[Event]) -> ScheduleLayout {
    build_schedule_layout(&LayoutRequest {
        config,
        resources,
        fields: &ResourceFields::default(),
        events,
        selected_tab: None,
    })
}

#[test]
fn test_staggered_events_share_width_in_thirds() {
    let events = vec![
        timed(1, (9, 0), (9, 30)),
        timed(2, (9, 10), (9, 40)),
        timed(3, (9, 20), (9, 50)),
    ];
    let layout = layout(&config(ViewMode::Day, ResourceViewMode::Default), &[], &events);

    let timed = &layout.groups[0].buckets[0].timed;
    let geometry: Vec<_> = timed
        .iter()
        .map(|p| (p.column, p.column_count, (p.left_percent * 10.0).round() / 10.0))
        .collect();
    assert_eq!(geometry, vec![(0, 3, 0.0), (1, 3, 33.3), (2, 3, 66.7)]);
    assert!(timed.iter().all(|p| (p.width_percent - 100.0 / 3.0).abs() < 1e-9));
}

#[test]
fn test_touching_events_share_first_column() {
    let events = vec![timed(1, (9, 0), (9, 30)), timed(2, (9, 30), (10, 0))];
    let layout = layout(&config(ViewMode::Day, ResourceViewMode::Default), &[], &events);

    for placement in &layout.groups[0].buckets[0].timed {
        assert_eq!(placement.column, 0);
        assert_eq!(placement.width_percent, 100.0);
    }
}

#[test]
fn test_three_day_event_continues_across_week_columns() {
    let events = vec![Event::new(1, utc(2025, 1, 14, 10, 0), utc(2025, 1, 16, 15, 0))];
    let layout = layout(&config(ViewMode::Week, ResourceViewMode::Default), &[], &events);

    let flags: Vec<_> = layout.groups[0]
        .buckets
        .iter()
        .flat_map(|bucket| {
            bucket
                .multi_day
                .iter()
                .map(move |p| (bucket.date, p.continues_before, p.continues_after))
        })
        .collect();

    let day = |d| chrono::NaiveDate::from_ymd_opt(2025, 1, d).unwrap();
    assert_eq!(
        flags,
        vec![
            (day(14), false, true),
            (day(15), true, true),
            (day(16), true, false),
        ]
    );
}

#[test]
fn test_full_day_grid_has_72_marks() {
    let mut config = config(ViewMode::Workload, ResourceViewMode::Default);
    config.start_hour = 0;
    config.end_hour = 24;
    config.step = 20;

    let layout = layout(&config, &resources(2), &[]);
    assert_eq!(layout.grid.marks.len(), 72);
    assert_eq!(layout.grid.labels[71], "23:40");
}

#[test]
fn test_layout_is_deterministic_regardless_of_input_order() {
    let mut events = vec![
        timed(3, (9, 0), (10, 0)).with_field("assignee", 1),
        timed(1, (9, 0), (10, 0)).with_field("assignee", 1),
        timed(2, (9, 30), (11, 0)).with_field("assignee", json!([1, 2])),
        Event::new(4, utc(2025, 1, 14, 8, 0), utc(2025, 1, 17, 8, 0)).with_field("assignee", 2),
    ];
    let config = config(ViewMode::Week, ResourceViewMode::Default);
    let first = serde_json::to_string(&layout(&config, &resources(2), &events)).unwrap();

    events.reverse();
    let second = serde_json::to_string(&layout(&config, &resources(2), &events)).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_workload_sentinel_collects_unassigned_events() {
    let events = vec![
        timed(1, (9, 0), (10, 0)).with_field("assignee", 1),
        timed(2, (9, 0), (10, 0)),
        timed(3, (11, 0), (12, 0)).with_field("assignee", 99),
    ];
    let layout = layout(&config(ViewMode::Workload, ResourceViewMode::Default), &resources(2), &events);

    let sentinel = layout.group(&Key::SENTINEL).unwrap();
    let ids: Vec<_> = sentinel.buckets[0].timed.iter().map(|p| p.event_id.clone()).collect();
    assert_eq!(ids, vec![Key::from(2), Key::from(3)]);
    assert_eq!(layout.groups[1].subtext.as_deref(), Some("Sales"));
    assert_eq!(layout.container.resource_count, 3);
}

struct StaticSource(Vec<Event>);

impl EventSource for StaticSource {
    async fn fetch_events(&self, query: &FetchQuery) -> anyhow::Result<Vec<Event>> {
        Ok(self
            .0
            .iter()
            .filter(|event| event.start < query.end && event.end > query.start)
            .cloned()
            .collect())
    }
}

#[tokio::test]
async fn test_scheduler_refresh_then_tab_selection() {
    let mut settings = SchedulerSettings::default();
    settings.view = config(ViewMode::Day, ResourceViewMode::Tabs);
    let mut scheduler = Scheduler::new(settings).with_resources(resources(3));

    let source = StaticSource(vec![
        timed(1, (9, 0), (10, 0)).with_field("assignee", 1),
        timed(2, (9, 0), (10, 0)).with_field("assignee", 2),
        Event::new(3, utc(2025, 3, 1, 9, 0), utc(2025, 3, 1, 10, 0)).with_field("assignee", 2),
    ]);
    assert_eq!(scheduler.refresh(&source).await.unwrap(), 2);

    let snapshot = scheduler.snapshot();
    assert_eq!(snapshot.selected_tab, Some(Key::from(1)));
    assert_eq!(snapshot.layout.placed_event_count(), 1);

    scheduler.select_tab(&Key::from(2));
    let layout = scheduler.layout();
    assert_eq!(layout.groups[0].key, Some(Key::from(2)));
    assert_eq!(layout.groups[0].buckets[0].timed[0].event_id, Key::from(2));
}

#[test]
fn test_indicator_shares_grid_coordinates_with_events() {
    let mut settings = SchedulerSettings::default();
    settings.view = config(ViewMode::Day, ResourceViewMode::Default);
    // Half a minute past, so whole-minute rounding would show up
    let now = utc(2025, 1, 15, 13, 0) + chrono::Duration::seconds(30);
    let mut scheduler =
        Scheduler::new(settings).with_events(vec![Event::new(1, now, utc(2025, 1, 15, 14, 0))]);

    let event_top = scheduler.layout().groups[0].buckets[0].timed[0].top;
    let params = scheduler.indicator_params();
    let update = CurrentTimeTracker::new(params).tick(&FixedClock(now));

    assert_eq!(update.state, IndicatorState::Visible { offset: event_top });
    assert_eq!(update.today, selected_date());
}

#[test]
fn test_settings_file_drives_layout() {
    let dir = tempfile::TempDir::new().unwrap();
    let path = dir.path().join("scheduler.toml");
    std::fs::write(
        &path,
        r#"
        [view]
        start_hour = 8
        end_hour = 12
        step = 30
        view = "day"
        timezone = "America/New_York"
        selected_date = "2025-01-15"
        height = 320.0

        [resource_fields]
        id_field = "owner"
        "#,
    )
    .unwrap();

    let settings = settings::load(&path).unwrap();
    let resources = vec![Resource::new().with_field("owner", "ann").with_field("color", "#4caf50")];
    // 13:00 UTC is 08:00 in New York
    let events = vec![Event::new(1, utc(2025, 1, 15, 13, 0), utc(2025, 1, 15, 14, 0)).with_field("owner", "ann")];

    let layout = build_schedule_layout(&LayoutRequest {
        config: &settings.view,
        resources: &resources,
        fields: &settings.resource_fields,
        events: &events,
        selected_tab: None,
    });

    assert_eq!(layout.timezone, "America/New_York");
    assert_eq!(layout.grid.slot_count(), 8);
    let placement = &layout.group(&Key::from("ann")).unwrap().buckets[0].timed[0];
    assert_eq!(placement.top, 0.0);
    assert_eq!(placement.color.as_deref(), Some("#4caf50"));
}
