//! Scheduler store.
//!
//! Owns the current input tuple, memoises the last layout, and talks to the
//! remote event source. Hosts read it through [`SchedulerSnapshot`].

use anyhow::Result;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use serde::Serialize;
use tokio::sync::watch;

use crate::models::event::Event;
use crate::models::key::Key;
use crate::models::layout::ScheduleLayout;
use crate::models::resource::{Resource, ResourceFields};
use crate::models::settings::SchedulerSettings;
use crate::models::ui::{ViewConfig, ViewMode};
use crate::services::grid::build_time_grid;
use crate::services::indicator::IndicatorParams;
use crate::services::router::{build_schedule_layout, lane_groups, LayoutRequest};
use crate::services::timezone::DisplayZone;
use crate::utils::date::day_start;

/// Window and view hint sent to the remote source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchQuery {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub view: ViewMode,
}

/// Remote provider of events for a window.
#[allow(async_fn_in_trait)]
pub trait EventSource {
    async fn fetch_events(&self, query: &FetchQuery) -> Result<Vec<Event>>;
}

/// Owned, read-only view of the scheduler state.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SchedulerSnapshot {
    pub config: ViewConfig,
    pub selected_tab: Option<Key>,
    pub event_count: usize,
    pub resource_count: usize,
    pub loading: bool,
    pub layout: ScheduleLayout,
}

#[derive(Debug)]
pub struct Scheduler {
    config: ViewConfig,
    fields: ResourceFields,
    resources: Vec<Resource>,
    events: Vec<Event>,
    selected_tab: Option<Key>,
    layout: Option<ScheduleLayout>,
    /// Raised while a fetch is in flight
    loading: watch::Sender<bool>,
}

impl Scheduler {
    pub fn new(settings: SchedulerSettings) -> Self {
        Self {
            config: settings.view,
            fields: settings.resource_fields,
            resources: Vec::new(),
            events: Vec::new(),
            selected_tab: None,
            layout: None,
            loading: watch::channel(false).0,
        }
    }

    pub fn with_resources(mut self, resources: Vec<Resource>) -> Self {
        self.set_resources(resources);
        self
    }

    pub fn with_events(mut self, events: Vec<Event>) -> Self {
        self.set_events(events);
        self
    }

    pub fn config(&self) -> &ViewConfig {
        &self.config
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    /// Subscribe to the loading flag. Receivers see it change while
    /// [`Scheduler::refresh`] holds the store.
    pub fn loading_watch(&self) -> watch::Receiver<bool> {
        self.loading.subscribe()
    }

    pub fn set_config(&mut self, config: ViewConfig) {
        self.config = config;
        self.invalidate();
    }

    pub fn set_view(&mut self, view: ViewMode) {
        self.config.view = view;
        self.invalidate();
    }

    pub fn navigate(&mut self, date: NaiveDate) {
        self.config.selected_date = date;
        self.invalidate();
    }

    pub fn set_resource_fields(&mut self, fields: ResourceFields) {
        self.fields = fields;
        self.invalidate();
    }

    pub fn set_resources(&mut self, resources: Vec<Resource>) {
        self.resources = resources;
        self.invalidate();
    }

    pub fn set_events(&mut self, events: Vec<Event>) {
        self.events = events;
        self.invalidate();
    }

    /// Select a tab by resource key. Unknown keys leave the selection as is.
    pub fn select_tab(&mut self, key: &Key) -> Option<&Resource> {
        let position = self
            .resources
            .iter()
            .position(|resource| resource.key(&self.fields).as_ref() == Some(key));

        match position {
            Some(index) => {
                self.selected_tab = Some(key.clone());
                self.invalidate();
                self.resources.get(index)
            }
            None => {
                log::warn!("Cannot select tab {}: no such resource", key);
                None
            }
        }
    }

    /// Current layout, recomputed only after an input changed.
    pub fn layout(&mut self) -> &ScheduleLayout {
        self.layout.get_or_insert_with(|| {
            build_schedule_layout(&LayoutRequest {
                config: &self.config,
                resources: &self.resources,
                fields: &self.fields,
                events: &self.events,
                selected_tab: self.selected_tab.as_ref(),
            })
        })
    }

    pub fn snapshot(&mut self) -> SchedulerSnapshot {
        let layout = self.layout().clone();
        SchedulerSnapshot {
            config: self.config.clone(),
            // Report the tab the router actually resolved
            selected_tab: layout.tabs.as_ref().map(|tabs| tabs.selected.clone()),
            event_count: self.events.len(),
            resource_count: self.resources.len(),
            loading: self.is_loading(),
            layout,
        }
    }

    /// Parameters for a current-time marker matching the current layout.
    pub fn indicator_params(&mut self) -> IndicatorParams {
        let config = self.config.clone();
        IndicatorParams::from_view(&config, &self.layout().grid)
    }

    /// Remote window: one day of padding around the visible days.
    pub fn fetch_query(&self) -> FetchQuery {
        let config = self.config.sanitized();
        let zone = DisplayZone::resolve(config.timezone.as_deref());
        let grid = build_time_grid(&config);

        let days: Vec<NaiveDate> = lane_groups(&config).into_iter().flatten().collect();
        let first = days.first().copied().unwrap_or(config.selected_date);
        let last = days.last().copied().unwrap_or(config.selected_date);

        let start = day_start(first) + Duration::hours(config.start_hour as i64);
        let last_mark = day_start(last)
            + Duration::hours(config.start_hour as i64)
            + Duration::minutes((grid.window_minutes() - config.step as i64).max(0));

        FetchQuery {
            start: zone.localize(start) - Duration::days(1),
            end: zone.localize(last_mark) + Duration::days(1),
            view: match config.view {
                ViewMode::Workload => ViewMode::Day,
                view => view,
            },
        }
    }

    /// Fetch events for the visible window.
    ///
    /// A non-empty result replaces the event set; an empty one keeps the
    /// current events. Errors are returned as-is and leave the previous
    /// layout in place. Returns the number of events now held.
    pub async fn refresh<S: EventSource>(&mut self, source: &S) -> Result<usize> {
        let query = self.fetch_query();
        log::debug!("Fetching events {} .. {} ({:?})", query.start, query.end, query.view);

        self.loading.send_replace(true);
        let fetched = source.fetch_events(&query).await;
        self.loading.send_replace(false);

        let events = fetched?;
        if events.is_empty() {
            log::debug!("Fetch returned no events, keeping {}", self.events.len());
        } else {
            self.set_events(events);
        }
        Ok(self.events.len())
    }

    fn invalidate(&mut self) {
        self.layout = None;
    }
}
