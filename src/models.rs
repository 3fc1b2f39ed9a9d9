use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::color::Rgb8;
use crate::error::HarmonizerError;

/// Separator between variable and version in combined labels ("Actuals • Q1 2024").
pub const PAIR_SEPARATOR: &str = " • ";

/// Positional identity of a record: its index in the source sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub usize);

impl RecordId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// One observation (one row = one bar in the chart).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Record {
    pub variable: String,
    pub version: String,
    pub value: f64,
    pub color: Rgb8,
}

impl Record {
    pub fn new(variable: impl Into<String>, version: impl Into<String>, value: f64, color: Rgb8) -> Self {
        Self {
            variable: variable.into(),
            version: version.into(),
            value,
            color,
        }
    }

    /// "variable • version"
    pub fn pair_label(&self) -> String {
        format!("{}{}{}", self.variable, PAIR_SEPARATOR, self.version)
    }
}

/// How legend entries are folded together.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum GroupingMode {
    /// One entry per distinct `variable`.
    #[default]
    #[serde(rename = "variable")]
    ByVariable,
    /// One entry per distinct `version`.
    #[serde(rename = "version")]
    ByVersion,
    /// One entry per record (no folding).
    #[serde(rename = "variable-version")]
    ByVariableAndVersion,
}

impl GroupingMode {
    pub const ALL: [GroupingMode; 3] = [
        GroupingMode::ByVariable,
        GroupingMode::ByVersion,
        GroupingMode::ByVariableAndVersion,
    ];

    /// Stable identifier, also accepted by `FromStr`.
    pub fn as_str(self) -> &'static str {
        match self {
            GroupingMode::ByVariable => "variable",
            GroupingMode::ByVersion => "version",
            GroupingMode::ByVariableAndVersion => "variable-version",
        }
    }

    /// Short human label for toggle buttons.
    pub fn title(self) -> &'static str {
        match self {
            GroupingMode::ByVariable => "Variable",
            GroupingMode::ByVersion => "Version",
            GroupingMode::ByVariableAndVersion => "Variable & Version",
        }
    }

    /// Whether legend items may fold several records.
    pub fn folds(self) -> bool {
        !matches!(self, GroupingMode::ByVariableAndVersion)
    }
}

impl fmt::Display for GroupingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for GroupingMode {
    type Err = HarmonizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "variable" => Ok(GroupingMode::ByVariable),
            "version" => Ok(GroupingMode::ByVersion),
            "variable-version" | "variable_version" | "variable&version" => {
                Ok(GroupingMode::ByVariableAndVersion)
            }
            _ => Err(HarmonizerError::UnknownMode(s.to_string())),
        }
    }
}

/// A derived, displayable group of one or more records sharing a grouping key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LegendItem {
    pub id: String,
    pub label: String,
    /// One color per folded record, in input order.
    pub colors: Vec<Rgb8>,
    pub tooltip_text: String,
    pub members: Vec<RecordId>,
}

impl LegendItem {
    pub fn is_composite(&self) -> bool {
        self.colors.len() > 1
    }
}
