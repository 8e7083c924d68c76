//! Time grid metrics.
//!
//! Derives the ordered slot marks of the visible hour window and the
//! pixel metrics that translate minutes into vertical offsets. Event
//! placements and the current-time marker both go through
//! [`offset_for_minutes`], so they share one coordinate space.

use chrono::{Duration, Locale, NaiveDateTime, NaiveTime, TimeZone, Utc};

use crate::models::layout::TimeSlotGrid;
use crate::models::ui::{ResourceViewMode, ViewConfig, ViewMode};
use crate::utils::date::day_start;

/// Cell height used when there are no slots to divide the container by.
pub const MIN_CELL_HEIGHT: f64 = 20.0;
/// Width of the leading time-axis column in the default workload view.
pub const TIME_AXIS_WIDTH: f64 = 60.0;
/// Height of the border drawn between slots.
pub const BORDER_HEIGHT: f64 = 1.0;

/// Vertical offset of `minutes` past the grid start, including one border per
/// slot crossed.
pub fn offset_for_minutes(minutes: f64, minute_height: f64, step: u32) -> f64 {
    let slots_crossed = if step == 0 { 0.0 } else { minutes / step as f64 };
    minutes * minute_height + slots_crossed * BORDER_HEIGHT
}

/// Build the grid for `config.selected_date`.
///
/// Degenerate configurations (empty hour range, zero step) produce an empty
/// grid with a minimal cell height instead of an error.
pub fn build_time_grid(config: &ViewConfig) -> TimeSlotGrid {
    let config = config.sanitized();
    let slot_count = config.slot_count();

    let start = NaiveTime::from_hms_opt(config.start_hour.min(23), 0, 0).unwrap_or(NaiveTime::MIN);
    let window_start = if config.start_hour >= 24 {
        day_start(config.selected_date) + Duration::days(1)
    } else {
        config.selected_date.and_time(start)
    };

    let marks: Vec<_> = (0..slot_count)
        .map(|slot| window_start + Duration::minutes(slot as i64 * config.step as i64))
        .collect();

    let cell_height = if slot_count == 0 {
        log::warn!(
            "Degenerate time grid (hours {}..{}, step {}), using minimal cell height",
            config.start_hour,
            config.end_hour,
            config.step
        );
        MIN_CELL_HEIGHT
    } else {
        // Day and workload both divide the container evenly; workload's time
        // axis is a separate column reported through `time_axis_width`.
        config.height / slot_count as f64
    };

    let minute_height = if config.step == 0 {
        0.0
    } else {
        cell_height / config.step as f64
    };

    let time_axis_width = (config.view == ViewMode::Workload
        && config.resource_view_mode == ResourceViewMode::Default)
        .then_some(TIME_AXIS_WIDTH);

    let labels = hour_labels(&marks, config.hour_format.pattern(), &config.locale);

    TimeSlotGrid {
        date: config.selected_date,
        start_hour: config.start_hour,
        end_hour: config.end_hour,
        step: config.step,
        marks,
        labels,
        cell_height,
        minute_height,
        min_height: slot_count as f64 * cell_height,
        time_axis_width,
    }
}

/// Slot labels in `locale` (BCP 47 `en-US` or POSIX `en_US`). Unknown
/// locales fall back to the C locale.
fn hour_labels(marks: &[NaiveDateTime], pattern: &str, locale: &str) -> Vec<String> {
    let locale = match Locale::try_from(locale.replace('-', "_").as_str()) {
        Ok(locale) => Some(locale),
        Err(_) => {
            log::warn!("Unknown locale '{}', using default hour labels", locale);
            None
        }
    };

    marks
        .iter()
        .map(|mark| match &locale {
            Some(locale) => Utc.from_utc_datetime(mark).format_localized(pattern, *locale).to_string(),
            None => mark.format(pattern).to_string(),
        })
        .collect()
}
