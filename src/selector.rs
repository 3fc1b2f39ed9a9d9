//! Mode selector: the single piece of mutable UI state.
//!
//! Holds the active [`GroupingMode`] and lazily recomputes the legend items (memoized on
//! the mode) and the chart config (memoized on the legend policy, which only changes with
//! the mode when the native legend is grouped).

use log::debug;

use crate::chart::{ChartConfig, DEFAULT_CHART_TITLE, LegendDisplayPolicy, build_chart_config_titled};
use crate::error::Result;
use crate::grouping::group_legend_items;
use crate::models::{GroupingMode, LegendItem, Record};

#[derive(Debug, Clone)]
pub struct ModeSelector {
    records: Vec<Record>,
    mode: GroupingMode,
    policy: LegendDisplayPolicy,
    title: String,
    items: Option<(GroupingMode, Vec<LegendItem>)>,
    chart: Option<ChartConfig>,
    chart_builds: usize,
}

impl ModeSelector {
    pub fn new(records: Vec<Record>, initial: GroupingMode, policy: LegendDisplayPolicy) -> Self {
        Self {
            records,
            mode: initial,
            policy: policy.with_mode(initial),
            title: DEFAULT_CHART_TITLE.to_string(),
            items: None,
            chart: None,
            chart_builds: 0,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self.chart = None;
        self
    }

    pub fn mode(&self) -> GroupingMode {
        self.mode
    }

    pub fn policy(&self) -> LegendDisplayPolicy {
        self.policy
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    /// Switch the active mode. Any mode may follow any other.
    pub fn set_mode(&mut self, mode: GroupingMode) {
        if mode != self.mode {
            debug!(
                "grouping mode {} -> {}{}",
                self.mode,
                mode,
                if self.policy.depends_on_grouping() { " (chart legend follows)" } else { "" }
            );
        }
        self.mode = mode;
        self.policy = self.policy.with_mode(mode);
    }

    /// Parse and switch; unknown names are rejected and leave the state untouched.
    pub fn set_mode_str(&mut self, mode: &str) -> Result<()> {
        let parsed: GroupingMode = mode.parse()?;
        self.set_mode(parsed);
        Ok(())
    }

    pub fn set_policy(&mut self, policy: LegendDisplayPolicy) {
        self.policy = policy.with_mode(self.mode);
    }

    /// Swap in a new dataset; every derived structure is rebuilt on next access.
    pub fn set_records(&mut self, records: Vec<Record>) {
        self.records = records;
        self.items = None;
        self.chart = None;
    }

    /// Legend items for the active mode.
    pub fn legend_items(&mut self) -> &[LegendItem] {
        if self.items.as_ref().map(|(m, _)| *m) != Some(self.mode) {
            self.items = None;
        }
        let (records, mode) = (&self.records, self.mode);
        let (_, items) = self.items.get_or_insert_with(|| {
            debug!("regrouping {} records by {}", records.len(), mode);
            (mode, group_legend_items(records, mode))
        });
        items
    }

    /// Chart config for the active policy.
    pub fn chart_config(&mut self) -> &ChartConfig {
        if self.chart.as_ref().map(|c| c.policy) != Some(self.policy) {
            self.chart = None;
        }
        let (records, policy, title) = (&self.records, self.policy, &self.title);
        let builds = &mut self.chart_builds;
        self.chart.get_or_insert_with(|| {
            debug!("rebuilding chart config (policy {policy})");
            *builds += 1;
            build_chart_config_titled(records, policy, title)
        })
    }

    /// How many times the chart config has been built (for diagnostics and tests).
    pub fn chart_builds(&self) -> usize {
        self.chart_builds
    }
}
