// Settings service
// Loads and saves the scheduler configuration file

use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;

use crate::models::settings::SchedulerSettings;

/// Environment variable that points at a configuration file.
pub const CONFIG_ENV_VAR: &str = "RUST_SCHEDULER_CONFIG";
const CONFIG_FILE_NAME: &str = "scheduler.toml";

/// Pick the configuration file: explicit path, then the environment, then the
/// platform config directory.
pub fn resolve_path(explicit: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = explicit {
        return Some(path.to_path_buf());
    }

    if let Some(path) = env::var_os(CONFIG_ENV_VAR).filter(|value| !value.is_empty()) {
        return Some(PathBuf::from(path));
    }

    ProjectDirs::from("com", "RustScheduler", "Scheduler")
        .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
}

/// Read settings from `path`. A missing file yields the defaults.
pub fn load(path: &Path) -> Result<SchedulerSettings> {
    if !path.exists() {
        log::debug!("No settings at {}, using defaults", path.display());
        return Ok(SchedulerSettings::default());
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read settings from {}", path.display()))?;
    let settings: SchedulerSettings = toml::from_str(&data)
        .with_context(|| format!("failed to parse settings from {}", path.display()))?;

    if let Err(e) = settings.validate() {
        log::warn!("Settings in {}: {}", path.display(), e);
    }

    Ok(settings)
}

pub fn save(path: &Path, settings: &SchedulerSettings) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create dir {}", parent.display()))?;
    }

    let data = toml::to_string_pretty(settings).context("Failed to serialise settings")?;
    fs::write(path, data)
        .with_context(|| format!("failed to write settings to {}", path.display()))?;
    Ok(())
}

/// Resolve and load settings, falling back to defaults on any failure.
pub fn load_settings_or_default(explicit: Option<&Path>) -> SchedulerSettings {
    let Some(path) = resolve_path(explicit) else {
        log::warn!("No configuration directory available, using default settings");
        return SchedulerSettings::default();
    };

    match load(&path) {
        Ok(settings) => settings,
        Err(e) => {
            log::warn!("Failed to load settings: {:#}, using defaults", e);
            SchedulerSettings::default()
        }
    }
}
