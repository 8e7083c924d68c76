// Test fixtures - reusable test data
// Events, resources and view configurations shared by the integration tests

#![allow(dead_code)]

use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use rust_scheduler::models::ui::{ResourceViewMode, ViewMode};
use rust_scheduler::{Event, Resource, ViewConfig};

/// Wed Jan 15, 2025; every scenario is laid out around this date
pub fn selected_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
}

pub fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

/// Event on the selected date, times given as (hour, minute)
pub fn timed(id: i64, start: (u32, u32), end: (u32, u32)) -> Event {
    Event::new(
        id,
        utc(2025, 1, 15, start.0, start.1),
        utc(2025, 1, 15, end.0, end.1),
    )
}

/// View configuration in UTC so wall-clock times equal the fixture instants
pub fn config(view: ViewMode, mode: ResourceViewMode) -> ViewConfig {
    ViewConfig {
        view,
        resource_view_mode: mode,
        timezone: Some("UTC".to_string()),
        ..ViewConfig::for_date(selected_date())
    }
}

/// `count` resources with ids 1..=count
pub fn resources(count: i64) -> Vec<Resource> {
    (1..=count)
        .map(|id| {
            Resource::new()
                .with_field("assignee", id)
                .with_field("text", format!("User {}", id))
                .with_field("subtext", "Sales")
        })
        .collect()
}
