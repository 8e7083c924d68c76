//! Per-bucket event layout.
//!
//! Events are first normalized into the display zone, then split: events
//! spanning days go to [`lanes`], the rest are packed into columns by
//! [`overlap`]. Both use the greedy colorer in [`columns`]. Agenda mode skips
//! the geometry and lists events through [`agenda`].

pub mod agenda;
pub mod columns;
pub mod lanes;
pub mod overlap;

use chrono::NaiveDateTime;

use crate::models::event::Event;
use crate::models::key::Key;
use crate::services::timezone::DisplayZone;
use crate::utils::date::is_multi_day;

pub use agenda::agenda_for_day;
pub use columns::{assign_columns, Coloring, Span};
pub use lanes::{assign_multi_day_lanes, LaneBand, MULTI_DAY_EVENT_HEIGHT};
pub use overlap::{layout_timed_events, TimedBucket, MIN_EVENT_HEIGHT};

/// An event with its interval expressed as wall-clock time in the display zone.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedEvent<'a> {
    pub event: &'a Event,
    pub start: NaiveDateTime,
    /// Never before `start`
    pub end: NaiveDateTime,
    /// All-day, or covering more than one calendar day
    pub multi_day: bool,
}

impl<'a> NormalizedEvent<'a> {
    pub fn new(event: &'a Event, zone: &DisplayZone) -> Self {
        if let Err(e) = event.validate() {
            log::warn!("Event {}: {}, clamping end to start", event.event_id, e);
        }

        let start = zone.normalize(event.start);
        // A DST fold can also reverse the wall-clock order of a valid interval.
        let end = zone.normalize(event.end).max(start);

        Self {
            event,
            start,
            end,
            multi_day: event.all_day || is_multi_day(start, end),
        }
    }

    pub fn id(&self) -> &Key {
        &self.event.event_id
    }

    pub fn span(&self) -> Span {
        Span::new(self.start, self.end)
    }

    /// Deterministic layout order: start, then end, then id.
    pub fn sort_key(&self) -> (NaiveDateTime, NaiveDateTime, &Key) {
        (self.start, self.end, self.id())
    }
}

/// Normalize a whole event list into `zone`.
pub fn normalize_events<'a>(events: &'a [Event], zone: &DisplayZone) -> Vec<NormalizedEvent<'a>> {
    events
        .iter()
        .map(|event| NormalizedEvent::new(event, zone))
        .collect()
}

/// Sort events into layout order.
pub(crate) fn sort_for_layout(events: &mut [&NormalizedEvent<'_>]) {
    events.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
}
