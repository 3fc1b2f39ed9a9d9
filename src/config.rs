//! User configuration loaded from TOML.
//!
//! Lookup order: an explicit path (CLI `--config`), otherwise
//! `<config_dir>/legend-harmonizer/config.toml`. A missing file means defaults; a file
//! that exists but does not parse is an error, so typos in a mode name never fall back
//! silently.

use log::{debug, info};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::path::{Path, PathBuf};

use crate::chart::{DEFAULT_CHART_TITLE, LegendDisplayPolicy};
use crate::error::Result;
use crate::models::GroupingMode;
use crate::presentation::LegendPlacement;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HarmonizerConfig {
    /// Mode the selector starts in.
    pub default_mode: GroupingMode,
    pub placement: LegendPlacement,
    /// Written as a string: `native-ungrouped`, `native-grouped` (follows the active mode)
    /// or `disabled`.
    #[serde(serialize_with = "ser_policy", deserialize_with = "de_policy")]
    pub policy: LegendDisplayPolicy,
    pub width: u32,
    pub height: u32,
    pub title: String,
    /// Number formatting locale tag (`en`, `de`, `fr`, ...).
    pub locale: String,
}

impl Default for HarmonizerConfig {
    fn default() -> Self {
        Self {
            default_mode: GroupingMode::ByVariable,
            placement: LegendPlacement::Panel,
            policy: LegendDisplayPolicy::NativeUngrouped,
            width: 1000,
            height: 600,
            title: DEFAULT_CHART_TITLE.to_string(),
            locale: "en".to_string(),
        }
    }
}

fn ser_policy<S: Serializer>(policy: &LegendDisplayPolicy, s: S) -> Result<S::Ok, S::Error> {
    s.serialize_str(&policy.to_string())
}

fn de_policy<'de, D: Deserializer<'de>>(d: D) -> Result<LegendDisplayPolicy, D::Error> {
    let raw = String::deserialize(d)?;
    raw.parse().map_err(serde::de::Error::custom)
}

/// Default config file location.
pub fn config_path() -> Option<PathBuf> {
    Some(dirs::config_dir()?.join("legend-harmonizer").join("config.toml"))
}

/// Parse a config from TOML text.
pub fn parse_config(text: &str) -> Result<HarmonizerConfig> {
    Ok(toml::from_str(text)?)
}

/// Load the config from `path` (or the default location). Missing file → defaults.
pub fn load_config(path: Option<&Path>) -> Result<HarmonizerConfig> {
    let path = match path.map(Path::to_path_buf).or_else(config_path) {
        Some(p) => p,
        None => return Ok(HarmonizerConfig::default()),
    };
    match std::fs::read_to_string(&path) {
        Ok(text) => {
            info!("loading config from {}", path.display());
            parse_config(&text)
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!("no config at {}, using defaults", path.display());
            Ok(HarmonizerConfig::default())
        }
        Err(e) => Err(e.into()),
    }
}
