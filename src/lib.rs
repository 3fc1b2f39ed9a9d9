//! legend_harmonizer
//!
//! Group chart legend entries by *variable*, by *version*, or by the exact
//! (variable, version) pair, and render the chart with a matching legend.
//!
//! ### Features
//! - One total, order-stable grouping function over a closed [`GroupingMode`]
//! - Declarative, serializable [`chart::ChartConfig`] (one series per record)
//! - Three legend placements behind one [`presentation::LegendPresenter`] trait:
//!   side panel, overlay pill bar, native legend band
//! - Composite swatches and count badges for folded entries, member tooltips
//! - SVG/PNG rendering via plotters, plus an egui desktop viewer (`harmonizer-gui`)
//!
//! ### Example
//! ```no_run
//! use legend_harmonizer::{GroupingMode, ModeSelector, dataset};
//! use legend_harmonizer::chart::LegendDisplayPolicy;
//! use legend_harmonizer::viz::{self, RenderOptions};
//!
//! let mut selector = ModeSelector::new(
//!     dataset::sample_records(),
//!     GroupingMode::ByVariable,
//!     LegendDisplayPolicy::Disabled,
//! );
//! for item in selector.legend_items() {
//!     println!("{} ({} colors)", item.label, item.colors.len());
//! }
//! selector.set_mode(GroupingMode::ByVersion);
//! let config = selector.chart_config().clone();
//! let options = RenderOptions { mode: selector.mode(), ..RenderOptions::default() };
//! viz::plot_chart(&config, selector.records(), &options, "legend.svg")?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod chart;
pub mod color;
pub mod config;
pub mod dataset;
pub mod error;
pub mod grouping;
pub mod models;
pub mod presentation;
pub mod selector;
pub mod storage;
pub mod viz;

pub use chart::{ChartConfig, LegendDisplayPolicy, build_chart_config};
pub use color::Rgb8;
pub use error::HarmonizerError;
pub use grouping::group_legend_items;
pub use models::{GroupingMode, LegendItem, Record, RecordId};
pub use selector::ModeSelector;
