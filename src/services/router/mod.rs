//! Resource grouping and per-bucket orchestration.
//!
//! Decides which resources are mounted for the active resource view mode,
//! which events belong to each, and runs the lane and column engines once
//! per (resource, day) bucket.

use chrono::NaiveDate;

use crate::models::event::Event;
use crate::models::key::Key;
use crate::models::layout::{ContainerLayout, DayBucket, ResourceGroup, ScheduleLayout, TabStrip, TimeSlotGrid};
use crate::models::resource::{Resource, ResourceFields};
use crate::models::ui::{ResourceViewMode, ViewConfig, ViewMode};
use crate::services::grid::build_time_grid;
use crate::services::layout::{
    agenda_for_day, assign_multi_day_lanes, layout_timed_events, normalize_events, NormalizedEvent,
    TimedBucket,
};
use crate::services::timezone::DisplayZone;
use crate::utils::date::{month_weeks, week_dates};

/// The full input tuple of one layout pass.
#[derive(Debug, Clone, Copy)]
pub struct LayoutRequest<'a> {
    pub config: &'a ViewConfig,
    pub resources: &'a [Resource],
    pub fields: &'a ResourceFields,
    pub events: &'a [Event],
    /// Tab the host last selected; only read in tabs mode
    pub selected_tab: Option<&'a Key>,
}

/// What a rendered group filters on.
enum GroupTarget<'a> {
    /// No resources configured: every event, unfiltered
    All,
    /// Workload "unassigned/all" column
    Sentinel,
    Resource(&'a Resource, Key),
}

/// Run one full layout pass.
///
/// The result depends only on the request, so equal requests always produce
/// equal layouts.
pub fn build_schedule_layout(request: &LayoutRequest<'_>) -> ScheduleLayout {
    let config = request.config.sanitized();
    let zone = DisplayZone::resolve(config.timezone.as_deref());
    let grid = build_time_grid(&config);
    let normalized = normalize_events(request.events, &zone);

    let keyed = keyed_resources(request.resources, request.fields);
    let resource_keys: Vec<Key> = keyed.iter().map(|(_, key)| key.clone()).collect();

    let selected = match config.resource_view_mode {
        ResourceViewMode::Tabs => resolve_selected_tab(&resource_keys, request.selected_tab),
        _ => None,
    };
    let tabs = selected.clone().map(|selected| TabStrip {
        tabs: resource_keys.clone(),
        selected,
    });

    let targets = group_targets(&config, &keyed, selected.as_ref());
    let lane_groups = lane_groups(&config);
    let axis_on_sentinel =
        config.view == ViewMode::Workload && config.resource_view_mode == ResourceViewMode::Default;

    let groups: Vec<ResourceGroup> = targets
        .into_iter()
        .map(|target| {
            let events = events_for(&target, &normalized, &resource_keys, request.fields);
            let fallback_color = match &target {
                GroupTarget::Resource(resource, _) => resource.color(request.fields),
                _ => None,
            };
            let buckets = layout_buckets(&events, &lane_groups, &grid, &config, fallback_color);

            match target {
                GroupTarget::All => ResourceGroup {
                    key: None,
                    is_sentinel: false,
                    label: None,
                    subtext: None,
                    avatar: None,
                    shows_time_axis: true,
                    buckets,
                },
                GroupTarget::Sentinel => ResourceGroup {
                    key: Some(Key::SENTINEL),
                    is_sentinel: true,
                    label: None,
                    subtext: None,
                    avatar: None,
                    shows_time_axis: true,
                    buckets,
                },
                GroupTarget::Resource(resource, key) => ResourceGroup {
                    key: Some(key),
                    is_sentinel: false,
                    label: resource.label(request.fields).map(str::to_string),
                    subtext: resource.subtext(request.fields).map(str::to_string),
                    avatar: resource.avatar(request.fields).map(str::to_string),
                    shows_time_axis: !axis_on_sentinel,
                    buckets,
                },
            }
        })
        .collect();

    let layout = ScheduleLayout {
        view: config.view,
        resource_view_mode: config.resource_view_mode,
        timezone: zone.name(),
        container: container_layout(&config, keyed.len()),
        grid,
        tabs,
        groups,
    };

    log::debug!(
        "Layout pass: view {:?}/{:?}, {} events, {} groups, {} placements",
        layout.view,
        layout.resource_view_mode,
        request.events.len(),
        layout.groups.len(),
        layout.placed_event_count()
    );

    layout
}

/// Selected tab, falling back to the first resource when the requested one is
/// missing. `None` only when there are no resources.
pub fn resolve_selected_tab(resource_keys: &[Key], requested: Option<&Key>) -> Option<Key> {
    if let Some(key) = requested {
        if resource_keys.contains(key) {
            return Some(key.clone());
        }
        log::warn!("Selected tab {} is not a known resource, falling back to the first", key);
    }
    resource_keys.first().cloned()
}

/// Days sharing one multi-day band, per active view.
pub fn lane_groups(config: &ViewConfig) -> Vec<Vec<NaiveDate>> {
    match config.view {
        ViewMode::Day | ViewMode::Workload => vec![vec![config.selected_date]],
        ViewMode::Week => vec![week_dates(config.selected_date, config.week_start_on)],
        ViewMode::Month => month_weeks(config.selected_date, config.week_start_on),
    }
}

/// Sizing of the outer container.
pub fn container_layout(config: &ViewConfig, resource_count: usize) -> ContainerLayout {
    let default_mode = resource_count > 0 && config.resource_view_mode == ResourceViewMode::Default;

    let columns = match (default_mode, config.view) {
        (true, ViewMode::Workload) => resource_count + 1,
        (true, _) => resource_count,
        (false, _) => 1,
    };

    ContainerLayout {
        resource_count: columns,
        scroll_x: default_mode && resource_count > 1,
        scroll_y: default_mode,
        fixed_height: default_mode.then_some(config.height),
        stack_vertically: resource_count > 0
            && config.resource_view_mode == ResourceViewMode::Vertical,
    }
}

fn keyed_resources<'a>(resources: &'a [Resource], fields: &ResourceFields) -> Vec<(&'a Resource, Key)> {
    resources
        .iter()
        .filter_map(|resource| match resource.key(fields) {
            Some(key) => Some((resource, key)),
            None => {
                log::warn!("Skipping resource without an '{}' id", fields.id_field);
                None
            }
        })
        .collect()
}

fn group_targets<'a>(
    config: &ViewConfig,
    keyed: &[(&'a Resource, Key)],
    selected: Option<&Key>,
) -> Vec<GroupTarget<'a>> {
    if keyed.is_empty() {
        return vec![GroupTarget::All];
    }

    let all = || {
        keyed
            .iter()
            .map(|(resource, key)| GroupTarget::Resource(*resource, key.clone()))
    };

    match config.resource_view_mode {
        ResourceViewMode::Tabs => all()
            .filter(|target| matches!(target, GroupTarget::Resource(_, key) if Some(key) == selected))
            .collect(),
        ResourceViewMode::Vertical => all().collect(),
        ResourceViewMode::Default if config.view == ViewMode::Workload => {
            std::iter::once(GroupTarget::Sentinel).chain(all()).collect()
        }
        ResourceViewMode::Default => all().collect(),
    }
}

/// Events shown for a group. The sentinel takes events assigned to it
/// explicitly and those that match no resource.
fn events_for<'n, 'a>(
    target: &GroupTarget<'_>,
    events: &'n [NormalizedEvent<'a>],
    resource_keys: &[Key],
    fields: &ResourceFields,
) -> Vec<&'n NormalizedEvent<'a>> {
    events
        .iter()
        .filter(|event| {
            let assigned = event.event.resource_keys(&fields.id_field);
            match target {
                GroupTarget::All => true,
                GroupTarget::Resource(_, key) => assigned.contains(key),
                GroupTarget::Sentinel => {
                    assigned.contains(&Key::SENTINEL)
                        || !assigned.iter().any(|key| resource_keys.contains(key))
                }
            }
        })
        .collect()
}

fn layout_buckets(
    events: &[&NormalizedEvent<'_>],
    lane_groups: &[Vec<NaiveDate>],
    grid: &TimeSlotGrid,
    config: &ViewConfig,
    fallback_color: Option<&str>,
) -> Vec<DayBucket> {
    let mut buckets = Vec::new();

    if config.agenda {
        for date in lane_groups.iter().flatten() {
            buckets.push(DayBucket {
                date: *date,
                band_height: 0.0,
                multi_day: Vec::new(),
                timed: Vec::new(),
                agenda: agenda_for_day(events, *date, fallback_color),
            });
        }
        return buckets;
    }

    for days in lane_groups {
        let band = assign_multi_day_lanes(events, days);

        for date in days {
            let bucket = TimedBucket {
                date: *date,
                grid,
                rtl: config.is_rtl(),
                fallback_color,
            };
            buckets.push(DayBucket {
                date: *date,
                band_height: band.band_height(),
                multi_day: band.placements_for(*date, fallback_color),
                timed: layout_timed_events(events, &bucket),
                agenda: Vec::new(),
            });
        }
    }

    buckets
}
