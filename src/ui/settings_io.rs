use std::fs;
use std::path::PathBuf;

use tracing::warn;

use crate::config::app_config_dir;
use crate::storage::atomic_io::write_text_atomic;
use crate::ui::settings::UiSettings;

fn settings_path() -> PathBuf {
    app_config_dir().join("ui_settings.json")
}

pub fn load_settings() -> UiSettings {
    let path = settings_path();
    let Ok(text) = fs::read_to_string(&path) else {
        return UiSettings::default();
    };
    serde_json::from_str(&text).unwrap_or_else(|err| {
        warn!(path = %path.display(), error = %err, "ui_settings_unreadable");
        UiSettings::default()
    })
}

pub fn save_settings(settings: &UiSettings) {
    let path = settings_path();
    let result = serde_json::to_string_pretty(settings)
        .map_err(std::io::Error::other)
        .and_then(|json| write_text_atomic(&path, &json));
    if let Err(err) = result {
        warn!(path = %path.display(), error = %err, "ui_settings_not_saved");
    }
}
