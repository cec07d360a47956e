use std::path::{Path, PathBuf};

use {
    anyhow::Context,
    tracing::{debug, warn},
};

use crate::schema::BotConfig;

/// Standard settings file names, checked in order.
const CONFIG_FILENAMES: &[&str] = &[
    "bootstrapbot.toml",
    "bootstrapbot.yaml",
    "bootstrapbot.yml",
    "bootstrapbot.json",
];

/// Load settings from the given path (any supported format).
pub fn load_config(path: &Path) -> anyhow::Result<BotConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_config(&raw, path).with_context(|| format!("failed to parse {}", path.display()))
}

/// Discover and load settings from standard locations.
///
/// Search order:
/// 1. `./bootstrapbot.{toml,yaml,yml,json}` (working directory)
/// 2. `~/.config/bootstrapbot/bootstrapbot.{toml,yaml,yml,json}`
///
/// Returns `BotConfig::default()` if no settings file is found or the one
/// found cannot be parsed.
pub fn discover_and_load() -> BotConfig {
    if let Some(path) = find_config_file() {
        debug!(path = %path.display(), "loading settings");
        match load_config(&path) {
            Ok(cfg) => return cfg,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "failed to load settings, using defaults");
            },
        }
    } else {
        debug!("no settings file found, using defaults");
    }
    BotConfig::default()
}

/// Find the first settings file in standard locations.
pub fn find_config_file() -> Option<PathBuf> {
    find_in(Path::new(".")).or_else(|| config_dir().and_then(|dir| find_in(&dir)))
}

fn find_in(dir: &Path) -> Option<PathBuf> {
    CONFIG_FILENAMES
        .iter()
        .map(|name| dir.join(name))
        .find(|p| p.exists())
}

/// Returns the user-global settings directory (`~/.config/bootstrapbot/`).
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "bootstrapbot").map(|d| d.config_dir().to_path_buf())
}

fn parse_config(raw: &str, path: &Path) -> anyhow::Result<BotConfig> {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    match ext {
        "toml" => Ok(toml::from_str(raw)?),
        "yaml" | "yml" => Ok(serde_yaml::from_str(raw)?),
        "json" => Ok(serde_json::from_str(raw)?),
        _ => anyhow::bail!("unsupported settings format: .{ext}"),
    }
}
