//! Visualization: render a [`ChartConfig`] as a grouped column chart to **SVG** or **PNG**.
//!
//! - One bar per series; bars sharing a version category sit side by side
//! - Locale-aware value ticks (`1,350` vs `1.350`)
//! - Legend placement: `Panel` (right), `Overlay` (inside the plot), `Native` (band below)
//! - The chart's own legend band is drawn whenever the config enables it, next to a panel
//!   or overlay legend
//! - Single-color entries get a dot, folded entries a composite swatch and a count badge

pub mod legend;
pub mod types;
pub mod util;

pub use types::{DEFAULT_PLACEMENT, RenderOptions};

use anyhow::{Result, anyhow};
use log::info;

use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use plotters_bitmap::BitMapBackend;
use plotters_svg::SVGBackend;

use std::path::Path;
use std::sync::Once;

use crate::chart::ChartConfig;
use crate::grouping::group_legend_items;
use crate::models::{GroupingMode, LegendItem, Record};
use crate::presentation::native::NativeLegend;
use crate::presentation::{
    LegendContext, LegendPlacement, LegendPresenter, PxRect, Reserve, presenter_for,
};
use legend::draw_legend_layout;
use util::{compute_left_label_area_px, format_value, rgb_color};

/// One-time registration for a fallback "sans-serif" font when using the `ab_glyph` text path.
/// Required because `ab_glyph` doesn't discover OS fonts.
static INIT_FONTS: Once = Once::new();

fn ensure_fonts_registered() {
    INIT_FONTS.call_once(|| {
        // From `src/viz/mod.rs` → project root → `assets/DejaVuSans.ttf`
        let _ = plotters::style::register_font(
            "sans-serif",
            plotters::style::FontStyle::Normal,
            include_bytes!("../../assets/DejaVuSans.ttf"),
        );
    });
}

const MARGIN: u32 = 16;
const Y_TICKS: usize = 8;
const AXIS_FONT_PX: u32 = 12;

/// Legend entries plus the mode they were folded with.
pub type LegendEntries = (Vec<LegendItem>, GroupingMode);

/// Every legend drawn for one chart.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartLegends {
    /// The chart's own legend band, present whenever the config enables it.
    pub native: Option<LegendEntries>,
    /// Panel or overlay legend, regrouped with `options.mode`. `None` for the
    /// native placement, which shows the band alone.
    pub detail: Option<LegendEntries>,
}

/// Legends for `config` under `options`.
pub fn legends_for(config: &ChartConfig, records: &[Record], options: &RenderOptions) -> ChartLegends {
    let native = config
        .legend
        .enabled
        .then(|| (config.legend.items.clone(), config.legend.mode));
    let detail = match options.placement {
        LegendPlacement::Native => None,
        LegendPlacement::Panel | LegendPlacement::Overlay => {
            Some((group_legend_items(records, options.mode), options.mode))
        }
    };
    ChartLegends { native, detail }
}

/// Render `config` to `out_path`; `.svg` selects the SVG backend, anything else PNG.
pub fn plot_chart<P: AsRef<Path>>(
    config: &ChartConfig,
    records: &[Record],
    options: &RenderOptions,
    out_path: P,
) -> Result<()> {
    if options.width < 100 || options.height < 100 {
        return Err(anyhow!(
            "canvas too small: {}x{} (minimum 100x100)",
            options.width,
            options.height
        ));
    }
    ensure_fonts_registered();
    let out_path = out_path.as_ref();
    let path_string = out_path.to_string_lossy().into_owned();
    let size = (options.width, options.height);

    let is_svg = out_path
        .extension()
        .and_then(|s| s.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("svg"));
    if is_svg {
        let root = SVGBackend::new(path_string.as_str(), size).into_drawing_area();
        draw_chart(root, config, records, options)?;
    } else {
        let root = BitMapBackend::new(path_string.as_str(), size).into_drawing_area();
        draw_chart(root, config, records, options)?;
    }
    info!(
        "wrote {} chart ({} series, legend {}) to {}",
        if is_svg { "SVG" } else { "PNG" },
        config.series.len(),
        options.placement,
        out_path.display()
    );
    Ok(())
}

fn draw_chart<DB>(
    root: DrawingArea<DB, Shift>,
    config: &ChartConfig,
    records: &[Record],
    options: &RenderOptions,
) -> Result<()>
where
    DB: DrawingBackend,
{
    // ----------------------------
    // 1) Legend entries & space
    // ----------------------------
    let legends = legends_for(config, records, options);
    let detail_presenter: Box<dyn LegendPresenter> = presenter_for(options.placement);
    let band_presenter = NativeLegend::default();

    let (root_w_u32, root_h_u32) = root.dim_in_pixel();
    let (root_w, root_h) = (root_w_u32 as i32, root_h_u32 as i32);
    root.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;

    // Side panel takes the full height on the right; the native band sits under the plot.
    let side_w = match &legends.detail {
        Some((items, _)) => match detail_presenter.reserve(items, root_w, root_h) {
            Reserve::Right(w) => w.max(0),
            _ => 0,
        },
        None => 0,
    };
    let (main_area, side_area) = if side_w > 0 {
        let (main, side) = root.split_horizontally((root_w - side_w).max(40));
        (main, Some(side))
    } else {
        (root.margin(0, 0, 0, 0), None)
    };

    let main_w = main_area.dim_in_pixel().0 as i32;
    let band_h = match &legends.native {
        Some((items, _)) => band_presenter.band_height(items, main_w).min(root_h * 3 / 5),
        None => 0,
    };
    let (plot_area, band_area) = if band_h > 0 {
        let (plot, band) = main_area.split_vertically((root_h - band_h).max(40));
        (plot, Some(band))
    } else {
        (main_area, None)
    };

    // ----------------------------
    // 2) Axes
    // ----------------------------
    let categories = &config.x_axis.categories;
    let n_cat = categories.len().max(1);
    let (ymin, ymax) = (config.y_axis.min, config.y_axis.max);
    let locale = options.locale.as_str();

    let left_label_px = compute_left_label_area_px(ymin, ymax, Y_TICKS, AXIS_FONT_PX, locale);
    let x_label_fmt = |x: &f64| {
        let i = x.round();
        if (x - i).abs() < 1e-6 && i >= 0.0 && (i as usize) < categories.len() {
            categories[i as usize].clone()
        } else {
            String::new()
        }
    };
    let y_label_fmt = |v: &f64| format_value(*v, locale);

    let mut chart = ChartBuilder::on(&plot_area)
        .margin(MARGIN)
        .caption(config.title.as_str(), (FontFamily::SansSerif, 20))
        .set_label_area_size(LabelAreaPosition::Left, left_label_px)
        .set_label_area_size(LabelAreaPosition::Bottom, 40)
        .build_cartesian_2d(-0.5f64..(n_cat as f64 - 0.5), ymin..ymax)
        .map_err(|e| anyhow!("{:?}", e))?;

    let mut mesh = chart.configure_mesh();
    mesh.disable_x_mesh()
        .x_labels(n_cat)
        .y_labels(Y_TICKS)
        .x_label_formatter(&x_label_fmt)
        .y_label_formatter(&y_label_fmt)
        .label_style((FontFamily::SansSerif, AXIS_FONT_PX));
    if let Some(title) = &config.y_axis.title {
        mesh.y_desc(title.as_str());
    }
    if !config.y_axis.grid_lines {
        mesh.disable_y_mesh();
    }
    mesh.draw().map_err(|e| anyhow!("{:?}", e))?;

    // ----------------------------
    // 3) Bars
    // ----------------------------
    let group_w = (1.0 - 2.0 * config.columns.group_padding).clamp(0.1, 1.0);
    for ci in 0..categories.len() {
        let in_cat: Vec<_> = config.series_in_category(ci).collect();
        let bar_w = group_w / in_cat.len().max(1) as f64;
        let inset = bar_w * config.columns.point_padding;
        for (j, s) in in_cat.iter().enumerate() {
            let x0 = ci as f64 - group_w / 2.0 + j as f64 * bar_w;
            let rect = Rectangle::new(
                [(x0 + inset, 0.0f64.min(s.value)), (x0 + bar_w - inset, 0.0f64.max(s.value))],
                rgb_color(s.color).filled(),
            );
            chart
                .draw_series(std::iter::once(rect))
                .map_err(|e| anyhow!("{:?}", e))?;
        }
    }

    let (px_range, py_range) = chart.plotting_area().get_pixel_range();
    let plot_rect = PxRect::new(
        px_range.start,
        py_range.start,
        px_range.end - px_range.start,
        py_range.end - py_range.start,
    );

    if config.series.is_empty() {
        let style = TextStyle::from((FontFamily::SansSerif, 16))
            .pos(Pos::new(HPos::Center, VPos::Center))
            .color(&RGBColor(100, 116, 139));
        plot_area
            .draw(&Text::new(
                "No data",
                (plot_rect.x + plot_rect.w / 2, plot_rect.y + plot_rect.h / 2),
                style,
            ))
            .map_err(|e| anyhow!("{:?}", e))?;
    }

    // ----------------------------
    // 4) Legends
    // ----------------------------
    if let (Some((items, mode)), Some(area)) = (&legends.native, &band_area) {
        draw_in_area(area, &band_presenter, items, records, *mode)?;
    }
    if let Some((items, mode)) = &legends.detail {
        match &side_area {
            Some(area) => draw_in_area(area, detail_presenter.as_ref(), items, records, *mode)?,
            None => {
                // Overlay: plot_area starts at the canvas origin, so pixel ranges are area coordinates.
                let ctx = LegendContext {
                    records,
                    mode: *mode,
                    area: plot_rect,
                };
                draw_legend_layout(&plot_area, &detail_presenter.layout(items, &ctx))?;
            }
        }
    }

    // ----------------------------
    // 5) Present
    // ----------------------------
    root.present().map_err(|e| anyhow!("{:?}", e))?;
    Ok(())
}

/// Clear `area` and lay `items` out over all of it.
fn draw_in_area<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    presenter: &dyn LegendPresenter,
    items: &[LegendItem],
    records: &[Record],
    mode: GroupingMode,
) -> Result<()> {
    area.fill(&WHITE).map_err(|e| anyhow!("{:?}", e))?;
    let (w, h) = area.dim_in_pixel();
    let ctx = LegendContext {
        records,
        mode,
        area: PxRect::new(0, 0, w as i32, h as i32),
    };
    draw_legend_layout(area, &presenter.layout(items, &ctx))
}
