//! Error type for the library boundary (parsing, config, storage).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum HarmonizerError {
    /// A grouping mode string that is not one of `variable`, `version`, `variable-version`.
    #[error("unknown grouping mode: {0:?} (expected variable, version or variable-version)")]
    UnknownMode(String),

    #[error("unknown legend placement: {0:?} (expected panel, overlay or native)")]
    UnknownPlacement(String),

    #[error("unknown legend policy: {0:?} (expected native-ungrouped, native-grouped or disabled)")]
    UnknownPolicy(String),

    #[error("invalid color: {0:?} (expected #rrggbb or #rgb)")]
    InvalidColor(String),

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

pub type Result<T, E = HarmonizerError> = std::result::Result<T, E>;
