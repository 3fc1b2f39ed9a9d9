//! Chart adapter: turn records into a declarative, serializable column-chart config.
//!
//! The config is what a rendering surface consumes (see [`crate::viz`] for the
//! plotters renderer and the `harmonizer-gui` binary for the egui one). Series
//! never depend on the grouping mode; only the native legend does.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::color::Rgb8;
use crate::error::HarmonizerError;
use crate::grouping::{group_legend_items, ordered_partition};
use crate::models::{GroupingMode, LegendItem, Record, RecordId};

pub const DEFAULT_CHART_TITLE: &str = "Chart Legend Harmonizer";

/// How the chart's own (native) legend is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "kind", content = "mode")]
pub enum LegendDisplayPolicy {
    /// Native legend with one entry per series.
    NativeUngrouped,
    /// Native legend with composite entries folded by the active mode
    /// (kept in step by [`LegendDisplayPolicy::with_mode`]).
    NativeGrouped(GroupingMode),
    /// Native legend hidden; a legend presenter draws it instead.
    Disabled,
}

impl LegendDisplayPolicy {
    /// True when the chart config has to be rebuilt after a mode change.
    pub fn depends_on_grouping(self) -> bool {
        matches!(self, LegendDisplayPolicy::NativeGrouped(_))
    }

    /// Same policy, re-targeted at `mode` when it is mode-dependent.
    pub fn with_mode(self, mode: GroupingMode) -> Self {
        match self {
            LegendDisplayPolicy::NativeGrouped(_) => LegendDisplayPolicy::NativeGrouped(mode),
            other => other,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LegendDisplayPolicy::NativeUngrouped => "native-ungrouped",
            LegendDisplayPolicy::NativeGrouped(_) => "native-grouped",
            LegendDisplayPolicy::Disabled => "disabled",
        }
    }
}

impl fmt::Display for LegendDisplayPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LegendDisplayPolicy {
    type Err = HarmonizerError;

    /// Accepts `native-ungrouped`, `native-grouped` and `disabled`. A grouped policy
    /// follows the active mode, so it takes no mode of its own.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "native-ungrouped" => Ok(LegendDisplayPolicy::NativeUngrouped),
            "native-grouped" => Ok(LegendDisplayPolicy::NativeGrouped(GroupingMode::default())),
            "disabled" => Ok(LegendDisplayPolicy::Disabled),
            _ => Err(HarmonizerError::UnknownPolicy(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSeries {
    /// `"<variable>-<version>-<index>"`
    pub id: String,
    /// `"variable • version"`
    pub name: String,
    pub value: f64,
    pub color: Rgb8,
    pub record: RecordId,
    /// Index into [`CategoryAxis::categories`].
    pub category: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryAxis {
    pub categories: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueAxis {
    pub title: Option<String>,
    pub min: f64,
    pub max: f64,
    pub grid_lines: bool,
}

/// Legend marker geometry, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SymbolStyle {
    pub width: u32,
    pub height: u32,
    pub radius: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NativeLegend {
    pub enabled: bool,
    /// Mode the entries were folded with (`ByVariableAndVersion` when ungrouped).
    pub mode: GroupingMode,
    pub items: Vec<LegendItem>,
    pub symbol: SymbolStyle,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnOptions {
    pub group_padding: f64,
    pub point_padding: f64,
    pub border_width: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartConfig {
    pub title: String,
    pub policy: LegendDisplayPolicy,
    pub x_axis: CategoryAxis,
    pub y_axis: ValueAxis,
    pub series: Vec<ChartSeries>,
    pub legend: NativeLegend,
    pub columns: ColumnOptions,
}

impl ChartConfig {
    /// Series that sit in category `idx`, in input order.
    pub fn series_in_category(&self, idx: usize) -> impl Iterator<Item = &ChartSeries> {
        self.series.iter().filter(move |s| s.category == idx)
    }
}

/// Build a chart config with the default title.
pub fn build_chart_config(records: &[Record], policy: LegendDisplayPolicy) -> ChartConfig {
    build_chart_config_titled(records, policy, DEFAULT_CHART_TITLE)
}

pub fn build_chart_config_titled(
    records: &[Record],
    policy: LegendDisplayPolicy,
    title: &str,
) -> ChartConfig {
    let categories = ordered_partition(records, |r| r.version.as_str());
    let mut category_of = vec![0usize; records.len()];
    for (ci, (_, members)) in categories.iter().enumerate() {
        for id in members {
            category_of[id.index()] = ci;
        }
    }

    let series: Vec<ChartSeries> = records
        .iter()
        .enumerate()
        .map(|(idx, r)| ChartSeries {
            id: format!("{}-{}-{}", r.variable, r.version, idx),
            name: r.pair_label(),
            value: r.value,
            color: r.color,
            record: RecordId(idx),
            category: category_of[idx],
        })
        .collect();

    let (legend_enabled, legend_mode) = match policy {
        LegendDisplayPolicy::NativeUngrouped => (true, GroupingMode::ByVariableAndVersion),
        LegendDisplayPolicy::NativeGrouped(mode) => (true, mode),
        LegendDisplayPolicy::Disabled => (false, GroupingMode::ByVariableAndVersion),
    };
    let legend_items = if legend_enabled {
        group_legend_items(records, legend_mode)
    } else {
        Vec::new()
    };

    let (min, max) = value_axis_range(records.iter().map(|r| r.value));

    ChartConfig {
        title: title.to_string(),
        policy,
        x_axis: CategoryAxis {
            categories: categories.into_iter().map(|(k, _)| k.to_string()).collect(),
        },
        y_axis: ValueAxis {
            title: None,
            min,
            max,
            grid_lines: true,
        },
        series,
        legend: NativeLegend {
            enabled: legend_enabled,
            mode: legend_mode,
            items: legend_items,
            symbol: SymbolStyle {
                width: 8,
                height: 8,
                radius: 4,
            },
        },
        columns: ColumnOptions {
            group_padding: 0.1,
            point_padding: 0.05,
            border_width: 0,
        },
    }
}

/// Value axis range: always includes zero, padded out to a "nice" step.
/// Empty or all-zero input yields `0..1`.
pub fn value_axis_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = values
        .filter(|v| v.is_finite())
        .fold((0.0f64, 0.0f64), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if lo == 0.0 && hi == 0.0 {
        return (0.0, 1.0);
    }
    let step = nice_step(hi.abs().max(lo.abs()));
    // Subnormal magnitudes underflow the decade to zero.
    if !step.is_normal() {
        let min = if lo < 0.0 { -1.0 } else { 0.0 };
        let max = if hi > 0.0 { 1.0 } else { 0.0 };
        return (min, max);
    }
    let max = (hi / step).ceil() * step;
    let min = (lo / step).floor() * step;
    (min, max)
}

/// A round step of one fifth of the leading decade: 1420 -> 200, 38 -> 2.
fn nice_step(magnitude: f64) -> f64 {
    let decade = 10f64.powf(magnitude.log10().floor());
    decade / 5.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_range_matches_quarterly_sample() {
        let (min, max) = value_axis_range([1200.0, 1420.0, 1100.0].into_iter());
        assert_eq!(min, 0.0);
        assert_eq!(max, 1600.0);
    }

    #[test]
    fn axis_range_handles_negatives_and_empty() {
        let (min, max) = value_axis_range([-35.0, 12.0].into_iter());
        assert_eq!(min, -36.0);
        assert_eq!(max, 12.0);
        assert_eq!(value_axis_range(std::iter::empty()), (0.0, 1.0));
    }

    #[test]
    fn policy_parsing_is_closed() {
        assert_eq!(
            "native-grouped".parse::<LegendDisplayPolicy>().unwrap(),
            LegendDisplayPolicy::NativeGrouped(GroupingMode::ByVariable)
        );
        assert_eq!(
            "Disabled".parse::<LegendDisplayPolicy>().unwrap(),
            LegendDisplayPolicy::Disabled
        );
        // Modes are not part of the policy string.
        assert!("native-grouped:version".parse::<LegendDisplayPolicy>().is_err());
        assert!("floating".parse::<LegendDisplayPolicy>().is_err());
    }

    #[test]
    fn policy_display_parses_back() {
        for p in [
            LegendDisplayPolicy::NativeUngrouped,
            LegendDisplayPolicy::NativeGrouped(GroupingMode::ByVersion),
            LegendDisplayPolicy::Disabled,
        ] {
            let back: LegendDisplayPolicy = p.to_string().parse().unwrap();
            assert_eq!(back.as_str(), p.as_str());
        }
        assert_eq!(
            LegendDisplayPolicy::NativeGrouped(GroupingMode::ByVersion).to_string(),
            "native-grouped"
        );
    }

    #[test]
    fn axis_range_survives_subnormal_values() {
        assert_eq!(value_axis_range([5e-324].into_iter()), (0.0, 1.0));
        assert_eq!(value_axis_range([-5e-324].into_iter()), (-1.0, 0.0));
        let (min, max) = value_axis_range([1e-310, 2.0].into_iter());
        assert!(min.is_finite() && max.is_finite());
    }

    #[test]
    fn with_mode_only_touches_grouped_policy() {
        let p = LegendDisplayPolicy::NativeGrouped(GroupingMode::ByVariable);
        assert_eq!(
            p.with_mode(GroupingMode::ByVersion),
            LegendDisplayPolicy::NativeGrouped(GroupingMode::ByVersion)
        );
        assert_eq!(
            LegendDisplayPolicy::Disabled.with_mode(GroupingMode::ByVersion),
            LegendDisplayPolicy::Disabled
        );
    }
}
