use serde::Deserialize;
use std::path::PathBuf;

use crate::theme::Theme;

/// Settings read from `~/.config/pairdiff/config.toml`. Fields the file
/// leaves out stay `None` so CLI flags and defaults can fill them.
#[derive(Debug, Clone)]
pub struct PairdiffConfig {
    pub theme: Theme,
    pub unified: Option<bool>,
    pub overscan: Option<usize>,
    pub highlight: Option<bool>,
    pub old_title: Option<String>,
    pub new_title: Option<String>,
}

impl Default for PairdiffConfig {
    fn default() -> Self {
        Self {
            theme: Theme::from_name("one-dark"),
            unified: None,
            overscan: None,
            highlight: None,
            old_title: None,
            new_title: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    theme: Option<String>,
    #[serde(default)]
    unified: Option<bool>,
    #[serde(default)]
    overscan: Option<usize>,
    #[serde(default)]
    highlight: Option<bool>,
    #[serde(default)]
    old_title: Option<String>,
    #[serde(default)]
    new_title: Option<String>,
}

/// Directory holding the config file and the default log file.
pub fn config_dir() -> PathBuf {
    let mut path = dirs_home().unwrap_or_else(|| PathBuf::from("."));
    path.push(".config");
    path.push("pairdiff");
    path
}

fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

fn dirs_home() -> Option<PathBuf> {
    std::env::var_os("HOME").map(PathBuf::from)
}

/// Load config from `~/.config/pairdiff/config.toml`, falling back to defaults.
pub fn load_config() -> PairdiffConfig {
    let path = config_path();
    match std::fs::read_to_string(&path) {
        Ok(contents) => parse_config(&contents),
        Err(_) => {
            log::debug!("no config at {}", path.display());
            PairdiffConfig::default()
        }
    }
}

fn parse_config(contents: &str) -> PairdiffConfig {
    let file: ConfigFile = match toml::from_str(contents) {
        Ok(f) => f,
        Err(e) => {
            log::warn!("ignoring malformed config: {e}");
            return PairdiffConfig::default();
        }
    };

    let theme_name = file.theme.as_deref().unwrap_or("one-dark");
    PairdiffConfig {
        theme: Theme::from_name(theme_name),
        unified: file.unified,
        overscan: file.overscan,
        highlight: file.highlight,
        old_title: file.old_title,
        new_title: file.new_title,
    }
}

/// Settings written back when the user changes them in the viewer.
pub struct PersistentSettings {
    pub theme: String,
    pub unified: bool,
}

/// Save persistent settings to `~/.config/pairdiff/config.toml`.
/// Reads the existing file (if any), updates only the settings fields, and writes back.
pub fn save_settings(settings: &PersistentSettings) {
    let path = config_path();
    let existing = std::fs::read_to_string(&path).unwrap_or_default();
    let toml_string = merge_settings(&existing, settings);

    if let Some(parent) = path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    if let Err(e) = std::fs::write(&path, toml_string) {
        log::warn!("could not save settings to {}: {e}", path.display());
    }
}

fn merge_settings(existing: &str, settings: &PersistentSettings) -> String {
    // Read existing config as a TOML table to preserve unknown fields
    let mut table = existing
        .parse::<toml::Table>()
        .unwrap_or_else(|_| toml::Table::new());

    table.insert(
        "theme".to_string(),
        toml::Value::String(settings.theme.clone()),
    );
    table.insert(
        "unified".to_string(),
        toml::Value::Boolean(settings.unified),
    );

    toml::to_string_pretty(&table).unwrap_or_default()
}
