//! Multi-day band: lane rows for events that span days.
//!
//! Lanes are assigned once per lane group (the visible day, a week, or a
//! month row) so an event keeps the same row across every day it covers.

use chrono::NaiveDate;

use super::columns::assign_columns;
use super::{sort_for_layout, NormalizedEvent};
use crate::models::layout::MultiDayPlacement;
use crate::utils::date::{day_start, intersects_day, next_day_start};

/// Height of one lane row, in pixels.
pub const MULTI_DAY_EVENT_HEIGHT: f64 = 28.0;

/// Lane assignment for one lane group.
#[derive(Debug, Clone)]
pub struct LaneBand<'e, 'a> {
    entries: Vec<(&'e NormalizedEvent<'a>, usize)>,
    pub lane_count: usize,
}

impl<'e, 'a> LaneBand<'e, 'a> {
    /// Total height of the band; shared by every day in the group.
    pub fn band_height(&self) -> f64 {
        self.lane_count as f64 * MULTI_DAY_EVENT_HEIGHT
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lane of `event_id`, if it sits in this band.
    pub fn lane_of(&self, event: &NormalizedEvent<'_>) -> Option<usize> {
        self.entries
            .iter()
            .find(|(entry, _)| entry.id() == event.id())
            .map(|(_, lane)| *lane)
    }

    /// Placements visible on `date`, with continuation flags relative to it.
    pub fn placements_for(&self, date: NaiveDate, fallback_color: Option<&str>) -> Vec<MultiDayPlacement> {
        let from = day_start(date);
        let to = next_day_start(date);

        self.entries
            .iter()
            .filter(|(event, _)| intersects_day(event.start, event.end, date))
            .map(|(event, lane)| MultiDayPlacement {
                event_id: event.id().clone(),
                lane: *lane,
                top: *lane as f64 * MULTI_DAY_EVENT_HEIGHT,
                continues_before: event.start < from,
                continues_after: event.end > to,
                color: event
                    .event
                    .color()
                    .or(fallback_color)
                    .map(str::to_string),
            })
            .collect()
    }
}

/// Assign lanes to the multi-day events of `events` that touch any of `days`.
pub fn assign_multi_day_lanes<'e, 'a>(
    events: &[&'e NormalizedEvent<'a>],
    days: &[NaiveDate],
) -> LaneBand<'e, 'a> {
    let mut qualifying: Vec<&'e NormalizedEvent<'a>> = events
        .iter()
        .copied()
        .filter(|event| event.multi_day)
        .filter(|event| days.iter().any(|day| intersects_day(event.start, event.end, *day)))
        .collect();
    sort_for_layout(&mut qualifying);

    let spans: Vec<_> = qualifying.iter().map(|event| event.span()).collect();
    let coloring = assign_columns(&spans);

    LaneBand {
        lane_count: coloring.max_width(),
        entries: qualifying
            .into_iter()
            .zip(coloring.assignments.iter().map(|assignment| assignment.column))
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::event::Event;
    use crate::models::key::Key;
    use crate::services::layout::normalize_events;
    use crate::services::timezone::DisplayZone;
    use crate::utils::date::week_dates;
    use chrono::{TimeZone, Utc};

    fn date(d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, d).unwrap()
    }

    fn event(id: i64, start: (u32, u32), end: (u32, u32)) -> Event {
        Event::new(
            id,
            Utc.with_ymd_and_hms(2025, 3, start.0, start.1, 0, 0).unwrap(),
            Utc.with_ymd_and_hms(2025, 3, end.0, end.1, 0, 0).unwrap(),
        )
    }

    fn utc() -> DisplayZone {
        DisplayZone::resolve(Some("UTC"))
    }

    #[test]
    fn test_three_day_event_continuation_flags() {
        let events = vec![event(1, (10, 9), (12, 17))];
        let normalized = normalize_events(&events, &utc());
        let refs: Vec<_> = normalized.iter().collect();
        let days = [date(10), date(11), date(12)];
        let band = assign_multi_day_lanes(&refs, &days);

        let flags: Vec<_> = days
            .iter()
            .map(|day| {
                let placement = &band.placements_for(*day, None)[0];
                (placement.continues_before, placement.continues_after)
            })
            .collect();
        assert_eq!(flags, vec![(false, true), (true, true), (true, false)]);
    }

    #[test]
    fn test_overlapping_spans_take_separate_lanes() {
        let events = vec![
            event(1, (10, 9), (12, 9)),
            event(2, (11, 9), (13, 9)),
            event(3, (12, 9), (14, 9)),
        ];
        let normalized = normalize_events(&events, &utc());
        let refs: Vec<_> = normalized.iter().collect();
        let band = assign_multi_day_lanes(&refs, &week_dates(date(12), 1));

        assert_eq!(band.lane_count, 2);
        assert_eq!(band.band_height(), 56.0);
        assert_eq!(band.lane_of(&normalized[0]), Some(0));
        assert_eq!(band.lane_of(&normalized[1]), Some(1));
        // Event 1 ends exactly when event 3 starts
        assert_eq!(band.lane_of(&normalized[2]), Some(0));

        let on_thirteenth: Vec<_> = band
            .placements_for(date(13), None)
            .into_iter()
            .map(|p| (p.event_id, p.top))
            .collect();
        assert_eq!(on_thirteenth, vec![(Key::from(2), 28.0), (Key::from(3), 0.0)]);
    }

    #[test]
    fn test_timed_events_and_other_weeks_are_ignored() {
        let events = vec![event(1, (10, 9), (10, 10)), event(2, (24, 9), (26, 9))];
        let normalized = normalize_events(&events, &utc());
        let refs: Vec<_> = normalized.iter().collect();
        let band = assign_multi_day_lanes(&refs, &week_dates(date(12), 1));

        assert!(band.is_empty());
        assert_eq!(band.band_height(), 0.0);
    }

    #[test]
    fn test_all_day_single_date_has_no_continuation() {
        let events = vec![event(1, (11, 0), (12, 0))
            .all_day(true)
            .with_field("color", "#ff9800")];
        let normalized = normalize_events(&events, &utc());
        let refs: Vec<_> = normalized.iter().collect();
        let band = assign_multi_day_lanes(&refs, &[date(11)]);

        let placements = band.placements_for(date(11), Some("#000"));
        assert_eq!(placements.len(), 1);
        assert!(!placements[0].continues_before);
        assert!(!placements[0].continues_after);
        assert_eq!(placements[0].color.as_deref(), Some("#ff9800"));
        assert!(band.placements_for(date(12), None).is_empty());
    }
}
