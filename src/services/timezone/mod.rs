//! Display timezone normalization.
//!
//! Every downstream comparison (overlap, day boundaries, "today") works on
//! wall-clock `NaiveDateTime` values in the display zone produced here.

use chrono::{DateTime, Duration, Local, LocalResult, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;
use std::str::FromStr;

/// Timezone used to render the schedule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayZone {
    Named(Tz),
    SystemLocal,
}

impl DisplayZone {
    /// Resolve a configured zone name; unknown names fall back to system local time.
    pub fn resolve(name: Option<&str>) -> Self {
        let Some(name) = name.map(str::trim).filter(|name| !name.is_empty()) else {
            return DisplayZone::SystemLocal;
        };

        match Tz::from_str(name) {
            Ok(tz) => DisplayZone::Named(tz),
            Err(_) => {
                log::warn!("Unknown timezone '{}', falling back to system local time", name);
                DisplayZone::SystemLocal
            }
        }
    }

    /// Wall-clock time of `instant` in this zone.
    pub fn normalize(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        match self {
            DisplayZone::Named(tz) => instant.with_timezone(tz).naive_local(),
            DisplayZone::SystemLocal => instant.with_timezone(&Local).naive_local(),
        }
    }

    /// Instant of a wall-clock time in this zone.
    ///
    /// Ambiguous times (DST fold) take the earlier instant; times inside a DST
    /// gap are shifted forward by the gap.
    pub fn localize(&self, wall: NaiveDateTime) -> DateTime<Utc> {
        match self {
            DisplayZone::Named(tz) => localize_in(tz, wall),
            DisplayZone::SystemLocal => localize_in(&Local, wall),
        }
    }

    /// Calendar date of `instant` in this zone.
    pub fn today(&self, instant: DateTime<Utc>) -> NaiveDate {
        self.normalize(instant).date()
    }

    pub fn name(&self) -> String {
        match self {
            DisplayZone::Named(tz) => tz.name().to_string(),
            DisplayZone::SystemLocal => "local".to_string(),
        }
    }
}

fn localize_in<Z: TimeZone>(zone: &Z, wall: NaiveDateTime) -> DateTime<Utc> {
    match zone.from_local_datetime(&wall) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        LocalResult::None => {
            let shifted = wall + gap_length(zone, wall);
            zone.from_local_datetime(&shifted)
                .earliest()
                .map(|dt| dt.with_timezone(&Utc))
                .unwrap_or_else(|| Utc.from_utc_datetime(&wall))
        }
    }
}

/// Offset change across the transition around `wall`. Transitions are never
/// closer than a day apart, so the offsets a day either side bracket it.
fn gap_length<Z: TimeZone>(zone: &Z, wall: NaiveDateTime) -> Duration {
    let offset_at = |at: NaiveDateTime| zone.offset_from_utc_datetime(&at).fix().local_minus_utc();
    let before = offset_at(wall - Duration::days(1));
    let after = offset_at(wall + Duration::days(1));
    Duration::seconds((after - before).max(0) as i64)
}
