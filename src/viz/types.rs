//! Public types and constants for the visualization module.

use crate::models::GroupingMode;
use crate::presentation::LegendPlacement;

/// Default legend placement: the detail panel keeps long composite labels readable.
pub const DEFAULT_PLACEMENT: LegendPlacement = LegendPlacement::Panel;

/// Output options for [`super::plot_chart`].
#[derive(Debug, Clone, PartialEq)]
pub struct RenderOptions {
    pub width: u32,
    pub height: u32,
    /// Number formatting locale tag (`en`, `de`, ...).
    pub locale: String,
    pub placement: LegendPlacement,
    /// Grouping used by the panel/overlay legends. The native placement uses the
    /// chart config's own legend instead.
    pub mode: GroupingMode,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 600,
            locale: "en".to_string(),
            placement: DEFAULT_PLACEMENT,
            mode: GroupingMode::default(),
        }
    }
}
