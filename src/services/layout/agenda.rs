//! Agenda lists: a day's events in order, without grid geometry.

use chrono::NaiveDate;

use super::{sort_for_layout, NormalizedEvent};
use crate::models::layout::AgendaEntry;
use crate::utils::date::intersects_day;

/// Every event of `events` touching `date`, timed and multi-day alike, in
/// layout order.
pub fn agenda_for_day(
    events: &[&NormalizedEvent<'_>],
    date: NaiveDate,
    fallback_color: Option<&str>,
) -> Vec<AgendaEntry> {
    let mut day: Vec<&NormalizedEvent<'_>> = events
        .iter()
        .copied()
        .filter(|event| intersects_day(event.start, event.end, date))
        .collect();
    sort_for_layout(&mut day);

    day.into_iter()
        .map(|event| AgendaEntry {
            event_id: event.id().clone(),
            start: event.start,
            end: event.end,
            all_day: event.event.all_day,
            color: event.event.color().or(fallback_color).map(str::to_string),
        })
        .collect()
}
