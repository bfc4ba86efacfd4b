use std::path::Path;
use std::str::FromStr;

use serde::Deserialize;

pub const CONFIG_FILE: &str = "presenter.toml";

pub const ENV_FORMAT: &str = "PRESENTER_FORMAT";
pub const ENV_SHOW_TIMES: &str = "PRESENTER_SHOW_TIMES";
pub const ENV_COLOURS: &str = "PRESENTER_COLOURS";
pub const ENV_HIDE_SUCCESSFUL: &str = "PRESENTER_HIDE_SUCCESSFUL";

/// How per-test progress is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Placeholder line per test, rewritten in place when it ends.
    #[default]
    Default,
    /// Append-only lines, safe for CI logs.
    Feed,
    /// One glyph per test, inline after the suite name.
    Condensed,
}

impl FromStr for Format {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "default" => Ok(Format::Default),
            "feed" => Ok(Format::Feed),
            "condensed" => Ok(Format::Condensed),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub format: Format,
    pub show_times: bool,
    pub colours: bool,
    pub hide_successful: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            format: Format::Default,
            show_times: true,
            colours: true,
            hide_successful: false,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    display: DisplayConfig,
}

/// `[display]` table of `presenter.toml`. Unset keys keep their defaults.
#[derive(Debug, Default, Deserialize)]
struct DisplayConfig {
    format: Option<Format>,
    show_times: Option<bool>,
    colours: Option<bool>,
    hide_successful: Option<bool>,
}

impl Config {
    /// Load `presenter.toml` from `dir`, then apply `PRESENTER_*` environment overrides.
    pub fn load(dir: &Path) -> Self {
        let mut config = Self::from_file(&dir.join(CONFIG_FILE));
        config.apply_env(|name| std::env::var(name).ok());
        config
    }

    /// Defaults overlaid with the file at `path`, if it exists and parses.
    pub fn from_file(path: &Path) -> Self {
        let mut config = Self::default();
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "unreadable config file, using defaults");
                return config;
            }
        };
        match toml::from_str::<ConfigFile>(&content) {
            Ok(file) => {
                let display = file.display;
                config.format = display.format.unwrap_or(config.format);
                config.show_times = display.show_times.unwrap_or(config.show_times);
                config.colours = display.colours.unwrap_or(config.colours);
                config.hide_successful = display.hide_successful.unwrap_or(config.hide_successful);
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "invalid config file, using defaults");
            }
        }
        config
    }

    /// Override fields from environment variables resolved through `var`.
    pub fn apply_env(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(raw) = var(ENV_FORMAT) {
            self.format = raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "unknown {}, using default", ENV_FORMAT);
                Format::Default
            });
        }
        override_bool(&mut self.show_times, ENV_SHOW_TIMES, &var);
        override_bool(&mut self.colours, ENV_COLOURS, &var);
        override_bool(&mut self.hide_successful, ENV_HIDE_SUCCESSFUL, &var);
    }

    /// Condensed output never shows per-test durations.
    pub fn effective_show_times(&self) -> bool {
        self.show_times && self.format != Format::Condensed
    }
}

fn override_bool(field: &mut bool, name: &str, var: &impl Fn(&str) -> Option<String>) {
    let Some(raw) = var(name) else { return };
    match parse_bool(&raw) {
        Some(value) => *field = value,
        None => tracing::warn!(value = %raw, "ignoring non-boolean {}", name),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" | "" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn defaults_without_env() {
        let mut config = Config::default();
        config.apply_env(env(&[]));
        assert_eq!(config, Config::default());
        assert!(config.show_times);
        assert!(config.colours);
        assert!(!config.hide_successful);
    }

    #[test]
    fn env_overrides_every_field() {
        let mut config = Config::default();
        config.apply_env(env(&[
            (ENV_FORMAT, "feed"),
            (ENV_SHOW_TIMES, "0"),
            (ENV_COLOURS, "false"),
            (ENV_HIDE_SUCCESSFUL, "YES"),
        ]));
        assert_eq!(config.format, Format::Feed);
        assert!(!config.show_times);
        assert!(!config.colours);
        assert!(config.hide_successful);
    }

    #[test]
    fn invalid_format_falls_back_to_default() {
        let mut config = Config {
            format: Format::Feed,
            ..Config::default()
        };
        config.apply_env(env(&[(ENV_FORMAT, "fancy")]));
        assert_eq!(config.format, Format::Default);
    }

    #[test]
    fn unparseable_bool_keeps_previous_value() {
        let mut config = Config::default();
        config.apply_env(env(&[(ENV_SHOW_TIMES, "sometimes")]));
        assert!(config.show_times);
    }

    #[test]
    fn condensed_hides_times() {
        let config = Config {
            format: Format::Condensed,
            ..Config::default()
        };
        assert!(config.show_times);
        assert!(!config.effective_show_times());
    }

    #[test]
    fn reads_display_table_from_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "[display]\nformat = \"condensed\"\ncolours = false\n",
        )
        .unwrap();

        let config = Config::from_file(&dir.path().join(CONFIG_FILE));
        assert_eq!(config.format, Format::Condensed);
        assert!(!config.colours);
        assert!(config.show_times);
    }

    #[test]
    fn invalid_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "[display\nformat = ").unwrap();
        assert_eq!(Config::from_file(&dir.path().join(CONFIG_FILE)), Config::default());
    }

    #[test]
    fn missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Config::from_file(&dir.path().join(CONFIG_FILE)), Config::default());
    }
}
