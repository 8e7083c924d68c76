// Settings module
// On-disk scheduler configuration

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::resource::ResourceFields;
use crate::models::ui::ViewConfig;

/// Problems found when checking a configuration file.
///
/// Layout passes never fail on these; they are reported so callers can warn.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("hour range {start}..{end} is invalid (expected 0 <= start < end <= 24)")]
    InvalidHourRange { start: u32, end: u32 },

    #[error("step must be a positive number of minutes")]
    ZeroStep,

    #[error("step of {step} minutes does not divide the {span}-minute hour range")]
    UnevenStep { step: u32, span: i64 },

    #[error("container height {0} must be a non-negative number")]
    InvalidHeight(f64),

    #[error("week_start_on {0} is out of range (0 = Sunday .. 6 = Saturday)")]
    InvalidWeekStart(u8),

    #[error("resource id field name cannot be empty")]
    EmptyIdField,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulerSettings {
    pub view: ViewConfig,
    pub resource_fields: ResourceFields,
}

impl SchedulerSettings {
    /// Check the configuration against the documented contract
    pub fn validate(&self) -> Result<(), ConfigError> {
        let view = &self.view;

        if view.end_hour > 24 || view.start_hour >= view.end_hour {
            return Err(ConfigError::InvalidHourRange {
                start: view.start_hour,
                end: view.end_hour,
            });
        }

        if view.step == 0 {
            return Err(ConfigError::ZeroStep);
        }

        let span = view.hour_span_minutes();
        if span % view.step as i64 != 0 {
            return Err(ConfigError::UnevenStep {
                step: view.step,
                span,
            });
        }

        if !view.height.is_finite() || view.height < 0.0 {
            return Err(ConfigError::InvalidHeight(view.height));
        }

        if view.week_start_on > 6 {
            return Err(ConfigError::InvalidWeekStart(view.week_start_on));
        }

        if self.resource_fields.id_field.trim().is_empty() {
            return Err(ConfigError::EmptyIdField);
        }

        Ok(())
    }
}
