//! Current-time marker.
//!
//! [`CurrentTimeTracker`] is the synchronous state machine; [`ticker`] drives
//! it from a tokio task on a fixed interval.

pub mod ticker;

use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;

use crate::models::layout::TimeSlotGrid;
use crate::models::ui::{ResourceViewMode, ViewConfig, ViewMode};
use crate::services::grid::offset_for_minutes;
use crate::services::timezone::DisplayZone;
use crate::utils::date::{day_start, minutes_between};

pub use ticker::IndicatorTicker;

/// How often the marker is recomputed.
pub const TICK_INTERVAL: std::time::Duration = std::time::Duration::from_secs(60);
/// Space kept above the marker when scrolling it into view.
pub const SCROLL_MARGIN: f64 = 50.0;
/// Smallest offset change that triggers another scroll.
const MIN_SCROLL_DELTA: f64 = 1.0;

/// Source of "now".
#[cfg_attr(test, mockall::automock)]
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock of the host.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock stopped at one instant.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Scrollable element the marker lives in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollContainer {
    Scheduler,
    /// The per-tab day container
    Day,
}

impl ScrollContainer {
    pub fn for_view(view: ViewMode, mode: ResourceViewMode) -> Self {
        match (view, mode) {
            (ViewMode::Day, ResourceViewMode::Tabs) => ScrollContainer::Day,
            _ => ScrollContainer::Scheduler,
        }
    }

    pub fn id(&self) -> &'static str {
        match self {
            ScrollContainer::Scheduler => "schedulerContainerId",
            ScrollContainer::Day => "dayContainerId",
        }
    }
}

/// Everything the marker position depends on.
#[derive(Debug, Clone, PartialEq)]
pub struct IndicatorParams {
    pub start_hour: u32,
    pub step: u32,
    pub minute_height: f64,
    pub zone: DisplayZone,
    pub view: ViewMode,
    pub resource_view_mode: ResourceViewMode,
}

impl IndicatorParams {
    pub fn from_view(config: &ViewConfig, grid: &TimeSlotGrid) -> Self {
        Self {
            start_hour: grid.start_hour,
            step: grid.step,
            minute_height: grid.minute_height,
            zone: DisplayZone::resolve(config.timezone.as_deref()),
            view: config.view,
            resource_view_mode: config.resource_view_mode,
        }
    }

    /// Marker offset for `now`; negative before the grid starts.
    pub fn offset_at(&self, now: DateTime<Utc>) -> f64 {
        let local = self.zone.normalize(now);
        let grid_start = day_start(local.date()) + Duration::hours(self.start_hour as i64);
        offset_for_minutes(minutes_between(grid_start, local), self.minute_height, self.step)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum IndicatorState {
    Hidden,
    Visible { offset: f64 },
}

impl IndicatorState {
    pub fn offset(&self) -> Option<f64> {
        match self {
            IndicatorState::Hidden => None,
            IndicatorState::Visible { offset } => Some(*offset),
        }
    }
}

/// Result of one tick.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorUpdate {
    #[serde(flatten)]
    pub state: IndicatorState,
    pub container: ScrollContainer,
    /// Today in the display zone
    pub today: NaiveDate,
    /// Scroll position to apply, if the container should move
    pub scroll_to: Option<f64>,
}

#[derive(Debug, Clone)]
pub struct CurrentTimeTracker {
    params: IndicatorParams,
    state: IndicatorState,
    last_scrolled_offset: Option<f64>,
}

impl CurrentTimeTracker {
    pub fn new(params: IndicatorParams) -> Self {
        Self {
            params,
            state: IndicatorState::Hidden,
            last_scrolled_offset: None,
        }
    }

    pub fn params(&self) -> &IndicatorParams {
        &self.params
    }

    pub fn state(&self) -> IndicatorState {
        self.state
    }

    pub fn set_params(&mut self, params: IndicatorParams) {
        self.params = params;
    }

    pub fn tick(&mut self, clock: &dyn Clock) -> IndicatorUpdate {
        self.tick_at(clock.now())
    }

    /// Recompute the marker for `now`.
    pub fn tick_at(&mut self, now: DateTime<Utc>) -> IndicatorUpdate {
        let offset = self.params.offset_at(now);

        let (state, scroll_to) = if offset < 0.0 {
            self.last_scrolled_offset = None;
            (IndicatorState::Hidden, None)
        } else {
            let moved = match self.last_scrolled_offset {
                Some(last) => (offset - last).abs() >= MIN_SCROLL_DELTA,
                None => true,
            };
            let scroll_to = if moved || self.state == IndicatorState::Hidden {
                self.last_scrolled_offset = Some(offset);
                Some((offset - SCROLL_MARGIN).max(0.0))
            } else {
                None
            };
            (IndicatorState::Visible { offset }, scroll_to)
        };

        if state != self.state {
            log::debug!("Current time indicator {:?} -> {:?}", self.state, state);
        }
        self.state = state;

        IndicatorUpdate {
            state,
            container: ScrollContainer::for_view(self.params.view, self.params.resource_view_mode),
            today: self.params.zone.today(now),
            scroll_to,
        }
    }
}
