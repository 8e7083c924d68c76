//! Column layout of timed events inside one (resource, day) bucket.

use chrono::{Duration, NaiveDate, NaiveDateTime};

use super::columns::{assign_columns, Span};
use super::{sort_for_layout, NormalizedEvent};
use crate::models::layout::{TimeSlotGrid, TimedPlacement};
use crate::services::grid::{offset_for_minutes, BORDER_HEIGHT};
use crate::utils::date::{day_start, intersects_day, minutes_between};

/// Smallest rendered height of a timed event, in pixels. Zero-duration
/// events get exactly this.
pub const MIN_EVENT_HEIGHT: f64 = 12.0;

/// The day and grid a bucket is laid out against.
#[derive(Debug, Clone, Copy)]
pub struct TimedBucket<'g> {
    pub date: NaiveDate,
    pub grid: &'g TimeSlotGrid,
    pub rtl: bool,
    /// Color for events that carry none (the owning resource's color)
    pub fallback_color: Option<&'g str>,
}

impl TimedBucket<'_> {
    /// Visible wall-clock window `[start, end)` of this day.
    pub fn window(&self) -> (NaiveDateTime, NaiveDateTime) {
        let start = day_start(self.date) + Duration::hours(self.grid.start_hour as i64);
        (start, start + Duration::minutes(self.grid.window_minutes()))
    }

    fn minutes_from_start(&self, at: NaiveDateTime) -> f64 {
        let (start, _) = self.window();
        minutes_between(start, at)
    }
}

/// Place every single-day event of `events` that falls inside the bucket's
/// visible window.
///
/// Multi-day events and events on other days are ignored, so callers can pass
/// a resource's whole event list.
pub fn layout_timed_events(
    events: &[&NormalizedEvent<'_>],
    bucket: &TimedBucket<'_>,
) -> Vec<TimedPlacement> {
    if bucket.grid.is_empty() {
        return Vec::new();
    }

    let (window_start, window_end) = bucket.window();
    let window = Span::new(window_start, window_end);

    let mut visible: Vec<&NormalizedEvent<'_>> = events
        .iter()
        .copied()
        .filter(|event| !event.multi_day)
        .filter(|event| intersects_day(event.start, event.end, bucket.date))
        .filter(|event| event.span().overlaps(&window))
        .collect();
    sort_for_layout(&mut visible);

    let spans: Vec<Span> = visible.iter().map(|event| event.span()).collect();
    let coloring = assign_columns(&spans);
    let grid = bucket.grid;

    visible
        .iter()
        .enumerate()
        .map(|(index, event)| {
            let column = coloring.assignments[index].column;
            let column_count = coloring.column_count(index);
            let width_percent = 100.0 / column_count as f64;
            let left_percent = if bucket.rtl {
                100.0 - (column + 1) as f64 * width_percent
            } else {
                column as f64 * width_percent
            };

            let start = bucket.minutes_from_start(event.start.max(window_start));
            let end = bucket.minutes_from_start(event.end.min(window_end));
            let top = offset_for_minutes(start, grid.minute_height, grid.step);
            let bottom = offset_for_minutes(end, grid.minute_height, grid.step);

            TimedPlacement {
                event_id: event.id().clone(),
                column,
                column_count,
                left_percent,
                width_percent,
                top,
                height: (bottom - top - BORDER_HEIGHT).max(MIN_EVENT_HEIGHT),
                z_index: column,
                color: event
                    .event
                    .color()
                    .or(bucket.fallback_color)
                    .map(str::to_string),
            }
        })
        .collect()
}
