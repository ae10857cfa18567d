use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use cross_xdg::BaseDirs;
use tracing::debug;

/// Settings for a single run of the command-line interpreter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Abort after this many executed instructions. `None` means unlimited.
    pub max_steps: Option<u64>,
    /// Print each '.' as it happens instead of once at the end.
    pub stream: bool,
    /// Print a newline after the program output.
    pub trailing_newline: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_steps: None,
            stream: false,
            trailing_newline: true,
        }
    }
}

impl Settings {
    /// Resolve settings from the config file, then the environment.
    /// Command-line flags are applied on top by the caller.
    pub fn load() -> Self {
        let mut settings = config_path()
            .and_then(|path| fs::read_to_string(path).ok())
            .map(|content| Self::from_toml(&content))
            .unwrap_or_default();
        settings.apply_env(|key| std::env::var(key).ok());
        debug!(?settings, "settings resolved");
        settings
    }

    /// Very small hand-rolled parser: look for the [run] section and key = value pairs.
    /// Unknown keys and unparsable values are ignored.
    pub fn from_toml(content: &str) -> Self {
        let mut in_run = false;
        let mut map: HashMap<String, String> = HashMap::new();
        for line in content.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') { continue; }
            if line.starts_with('[') && line.ends_with(']') {
                in_run = &line[1..line.len() - 1] == "run";
                continue;
            }
            if !in_run { continue; }
            if let Some((key, val_raw)) = line.split_once('=') {
                let val_raw = val_raw.trim();
                // Accept quoted or unquoted
                let val = val_raw
                    .strip_prefix('"')
                    .and_then(|v| v.strip_suffix('"'))
                    .unwrap_or(val_raw);
                map.insert(key.trim().to_string(), val.to_string());
            }
        }

        let mut settings = Settings::default();
        if let Some(v) = map.get("max_steps").and_then(|s| s.parse::<u64>().ok()) {
            settings.max_steps = Some(v);
        }
        if let Some(v) = map.get("stream").and_then(|s| parse_bool(s)) {
            settings.stream = v;
        }
        if let Some(v) = map.get("trailing_newline").and_then(|s| parse_bool(s)) {
            settings.trailing_newline = v;
        }
        settings
    }

    /// Override from `BFI_MAX_STEPS` and `BFI_STREAM` as seen through `lookup`.
    pub fn apply_env<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(v) = lookup("BFI_MAX_STEPS").and_then(|s| s.trim().parse::<u64>().ok()) {
            self.max_steps = Some(v);
        }
        if let Some(v) = lookup("BFI_STREAM").and_then(|s| parse_bool(&s)) {
            self.stream = v;
        }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

/// `<config home>/bfi.toml`, e.g. `~/.config/bfi.toml` on Linux.
fn config_path() -> Option<PathBuf> {
    let base_dirs = BaseDirs::new().ok()?;
    let mut path = PathBuf::from(base_dirs.config_home());
    path.push("bfi.toml");
    Some(path)
}
