//! Settings loading.
//!
//! Settings are loaded once from RON files in the `data/settings` directory.
//! If multiple RON files are present, the first one (by file name) that parses
//! is used. If no file parses, default settings are used.
use crate::ron_loader::load_ron_files;
use crate::settings::{Settings, SettingsError};
use bevy::log::{info, warn};
use std::path::Path;

/// Load settings from `path` (directory). If multiple `.ron` files are present
/// the first parsed `Settings` will be used. If none exist the `Default` is used.
///
/// # Example
/// ```
/// use finisher_arena::settings::loader::load_settings_from_dir;
///
/// let settings = load_settings_from_dir("no/such/dir");
/// assert_eq!(settings.finisher.duration_seconds, 1.35);
/// ```
#[must_use]
pub fn load_settings_from_dir(path: impl AsRef<Path>) -> Settings {
    let items: Vec<Settings> = load_ron_files(path.as_ref());
    if let Some(first) = items.into_iter().next() {
        first
    } else {
        info!("no settings found in {}, using defaults", path.as_ref().display());
        Settings::defaults()
    }
}

/// Load settings and check them, falling back to defaults when the loaded
/// values cannot describe a playable arena.
///
/// # Return
/// The settings actually in use, plus the validation error that forced the
/// fallback, if any.
pub fn load_validated_settings(path: impl AsRef<Path>) -> (Settings, Option<SettingsError>) {
    let settings = load_settings_from_dir(path);
    match settings.validate() {
        Ok(()) => (settings, None),
        Err(e) => {
            warn!("invalid settings ({e}), falling back to defaults");
            (Settings::defaults(), Some(e))
        }
    }
}
