//! Layout results handed to rendering collaborators.
//!
//! Everything here is derived data: rebuilt from scratch on every pass and
//! never mutated afterwards.

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

use crate::models::key::Key;
use crate::models::ui::{ResourceViewMode, ViewMode};

/// Ordered time marks of the visible window plus pixel metrics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeSlotGrid {
    pub date: NaiveDate,
    pub start_hour: u32,
    pub end_hour: u32,
    pub step: u32,
    pub marks: Vec<NaiveDateTime>,
    pub labels: Vec<String>,
    /// Pixels per slot
    pub cell_height: f64,
    /// Pixels per minute (`cell_height / step`)
    pub minute_height: f64,
    /// Height every day/workload column is stretched to
    pub min_height: f64,
    /// Width of the reserved time-axis column, if the view has one
    pub time_axis_width: Option<f64>,
}

impl TimeSlotGrid {
    pub fn slot_count(&self) -> usize {
        self.marks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.marks.is_empty()
    }

    /// Minutes covered by the whole slots of the grid.
    pub fn window_minutes(&self) -> i64 {
        self.slot_count() as i64 * self.step as i64
    }
}

/// Geometry of a timed (single-day) event inside its bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimedPlacement {
    pub event_id: Key,
    /// 0-based column, unique among overlapping events
    pub column: usize,
    /// Columns in this event's overlap cluster
    pub column_count: usize,
    pub left_percent: f64,
    pub width_percent: f64,
    pub top: f64,
    pub height: f64,
    pub z_index: usize,
    pub color: Option<String>,
}

/// Geometry of a multi-day event in the band above the grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MultiDayPlacement {
    pub event_id: Key,
    pub lane: usize,
    pub top: f64,
    /// Event started before this day
    pub continues_before: bool,
    /// Event ends after this day
    pub continues_after: bool,
    pub color: Option<String>,
}

/// A row of the agenda list that replaces the grid when agenda mode is on.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgendaEntry {
    pub event_id: Key,
    /// Wall-clock start in the display zone
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub all_day: bool,
    pub color: Option<String>,
}

/// One (resource, day) partition.
///
/// In agenda mode only `agenda` is filled; otherwise it stays empty.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayBucket {
    pub date: NaiveDate,
    /// Height of the multi-day band, shared by every day of the same lane group
    pub band_height: f64,
    pub multi_day: Vec<MultiDayPlacement>,
    pub timed: Vec<TimedPlacement>,
    pub agenda: Vec<AgendaEntry>,
}

/// All buckets rendered for one resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceGroup {
    /// `None` when there are no resources and every event is shown unfiltered
    pub key: Option<Key>,
    pub is_sentinel: bool,
    pub label: Option<String>,
    pub subtext: Option<String>,
    pub avatar: Option<String>,
    /// Whether this group carries the shared time axis
    pub shows_time_axis: bool,
    pub buckets: Vec<DayBucket>,
}

/// Sizing hints for the outer scroll container.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContainerLayout {
    pub resource_count: usize,
    pub scroll_x: bool,
    pub scroll_y: bool,
    pub fixed_height: Option<f64>,
    pub stack_vertically: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TabStrip {
    pub tabs: Vec<Key>,
    pub selected: Key,
}

/// Full output of one layout pass.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleLayout {
    pub view: ViewMode,
    pub resource_view_mode: ResourceViewMode,
    pub timezone: String,
    pub grid: TimeSlotGrid,
    pub container: ContainerLayout,
    pub tabs: Option<TabStrip>,
    pub groups: Vec<ResourceGroup>,
}

impl ScheduleLayout {
    pub fn group(&self, key: &Key) -> Option<&ResourceGroup> {
        self.groups.iter().find(|group| group.key.as_ref() == Some(key))
    }

    pub fn placed_event_count(&self) -> usize {
        self.groups
            .iter()
            .flat_map(|group| &group.buckets)
            .map(|bucket| bucket.timed.len() + bucket.multi_day.len() + bucket.agenda.len())
            .sum()
    }
}
