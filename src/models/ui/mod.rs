// UI models module
// View configuration threaded through every layout pass

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

/// Active calendar view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Day,
    #[default]
    Week,
    Month,
    /// Aggregated per-resource day view with a shared time axis
    Workload,
}

impl ViewMode {
    /// Views that render a single day column per resource.
    pub fn is_single_day(&self) -> bool {
        matches!(self, ViewMode::Day | ViewMode::Workload)
    }
}

/// How several resources share the screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceViewMode {
    /// Side by side in one scroll container
    #[default]
    Default,
    /// One resource at a time behind a tab strip
    Tabs,
    /// Stacked top to bottom, each with its own header
    Vertical,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    #[default]
    Ltr,
    Rtl,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum HourFormat {
    #[serde(rename = "12")]
    Twelve,
    #[default]
    #[serde(rename = "24")]
    TwentyFour,
}

impl HourFormat {
    pub fn pattern(&self) -> &'static str {
        match self {
            HourFormat::Twelve => "%-I:%M %p",
            HourFormat::TwentyFour => "%H:%M",
        }
    }
}

/// Immutable view configuration.
///
/// Hours follow the `0 <= start_hour < end_hour <= 24` contract, but nothing
/// here enforces it: layout passes call [`ViewConfig::sanitized`] and cope
/// with degenerate values instead of failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewConfig {
    pub start_hour: u32,
    pub end_hour: u32,
    /// Slot length in minutes
    pub step: u32,
    pub view: ViewMode,
    pub resource_view_mode: ResourceViewMode,
    /// IANA timezone name; `None` means system local time
    pub timezone: Option<String>,
    /// Locale of the hour labels, e.g. `en-US`
    pub locale: String,
    pub direction: Direction,
    /// Container height in pixels
    pub height: f64,
    pub hour_format: HourFormat,
    /// 0 = Sunday, 1 = Monday, etc.
    pub week_start_on: u8,
    /// Navigation date in the display timezone
    pub selected_date: NaiveDate,
    /// List each day's events instead of laying them out on the grid
    pub agenda: bool,
}

impl Default for ViewConfig {
    fn default() -> Self {
        Self::for_date(Local::now().date_naive())
    }
}

impl ViewConfig {
    pub fn for_date(selected_date: NaiveDate) -> Self {
        Self {
            start_hour: 9,
            end_hour: 17,
            step: 60,
            view: ViewMode::Week,
            resource_view_mode: ResourceViewMode::Default,
            timezone: None,
            locale: "en-US".to_string(),
            direction: Direction::Ltr,
            height: 600.0,
            hour_format: HourFormat::TwentyFour,
            week_start_on: 0,
            selected_date,
            agenda: false,
        }
    }

    /// Copy with hours pulled back into range.
    ///
    /// `end_hour` is clamped to 24 and `start_hour` to `end_hour`; an empty
    /// range is kept empty so the grid builder can report it.
    pub fn sanitized(&self) -> Self {
        let mut config = self.clone();
        if config.end_hour > 24 {
            log::warn!("end_hour {} is past midnight, clamping to 24", config.end_hour);
            config.end_hour = 24;
        }
        if config.start_hour > config.end_hour {
            log::warn!(
                "start_hour {} is after end_hour {}, collapsing the hour range",
                config.start_hour,
                config.end_hour
            );
            config.start_hour = config.end_hour;
        }
        if !config.height.is_finite() || config.height < 0.0 {
            log::warn!("container height {} is invalid, using 0", config.height);
            config.height = 0.0;
        }
        config.week_start_on %= 7;
        config
    }

    /// Minutes between the start and end hour.
    pub fn hour_span_minutes(&self) -> i64 {
        (self.end_hour as i64 - self.start_hour as i64).max(0) * 60
    }

    /// Number of whole slots; a trailing partial slot is dropped.
    pub fn slot_count(&self) -> usize {
        if self.step == 0 {
            return 0;
        }
        (self.hour_span_minutes() / self.step as i64) as usize
    }

    pub fn is_rtl(&self) -> bool {
        self.direction == Direction::Rtl
    }
}
