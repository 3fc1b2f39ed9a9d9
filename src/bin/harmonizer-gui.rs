/*!
 * GUI for legend-harmonizer
 *
 * Shows the grouped column chart with a switchable legend:
 * - Grouping mode buttons (variable, version, variable & version)
 * - Legend placement (side panel, overlay pills, native band) and chart legend policy
 * - Hover a legend entry to see the series it stands for
 * - Export the current view as SVG or PNG
 */

use eframe::egui;
use eframe::egui::{Align2, Color32, FontId, Pos2, Rect, Rounding, Sense, Stroke, Vec2};
use std::path::PathBuf;

use legend_harmonizer::chart::{ChartConfig, LegendDisplayPolicy};
use legend_harmonizer::config::{HarmonizerConfig, load_config};
use legend_harmonizer::presentation::native::NativeLegend;
use legend_harmonizer::presentation::{
    Frame, LegendContext, LegendLayout, LegendPlacement, LegendPresenter, PxRect, Reserve, Swatch,
    presenter_for,
};
use legend_harmonizer::viz::{self, ChartLegends, RenderOptions, util::format_value};
use legend_harmonizer::{GroupingMode, ModeSelector, Rgb8, dataset, storage};

const BORDER: Color32 = Color32::from_rgb(203, 213, 225);
const TEXT: Color32 = Color32::from_rgb(15, 23, 42);
const AXIS: Color32 = Color32::from_rgb(100, 116, 139);
const BADGE_FILL: Color32 = Color32::from_rgb(226, 232, 240);

fn main() -> Result<(), eframe::Error> {
    env_logger::init();

    let config = load_config(None).unwrap_or_else(|e| {
        log::warn!("ignoring config: {e}");
        HarmonizerConfig::default()
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1000.0, 640.0])
            .with_min_inner_size([600.0, 400.0])
            .with_title("Chart Legend Harmonizer"),
        ..Default::default()
    };

    eframe::run_native(
        "Chart Legend Harmonizer",
        options,
        Box::new(|_cc| Ok(Box::new(HarmonizerApp::new(config)))),
    )
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum PolicyOption {
    Ungrouped,
    Grouped,
    Disabled,
}

impl PolicyOption {
    fn from_policy(p: LegendDisplayPolicy) -> Self {
        match p {
            LegendDisplayPolicy::NativeUngrouped => PolicyOption::Ungrouped,
            LegendDisplayPolicy::NativeGrouped(_) => PolicyOption::Grouped,
            LegendDisplayPolicy::Disabled => PolicyOption::Disabled,
        }
    }

    fn to_policy(self, mode: GroupingMode) -> LegendDisplayPolicy {
        match self {
            PolicyOption::Ungrouped => LegendDisplayPolicy::NativeUngrouped,
            PolicyOption::Grouped => LegendDisplayPolicy::NativeGrouped(mode),
            PolicyOption::Disabled => LegendDisplayPolicy::Disabled,
        }
    }

    fn label(self) -> &'static str {
        match self {
            PolicyOption::Ungrouped => "One entry per series",
            PolicyOption::Grouped => "Grouped",
            PolicyOption::Disabled => "Hidden",
        }
    }
}

struct HarmonizerApp {
    selector: ModeSelector,
    placement: LegendPlacement,
    native_policy: PolicyOption,
    locale: String,
    export_size: (u32, u32),

    status_message: String,
    error_message: String,
}

impl HarmonizerApp {
    fn new(config: HarmonizerConfig) -> Self {
        Self {
            selector: ModeSelector::new(dataset::sample_records(), config.default_mode, config.policy)
                .with_title(config.title.clone()),
            placement: config.placement,
            native_policy: PolicyOption::from_policy(config.policy),
            locale: config.locale,
            export_size: (config.width, config.height),
            status_message: String::new(),
            error_message: String::new(),
        }
    }

    /// Same split as the static renderer, but the detail items come from the selector's cache.
    fn legends(&mut self, chart: &ChartConfig) -> ChartLegends {
        let native = chart
            .legend
            .enabled
            .then(|| (chart.legend.items.clone(), chart.legend.mode));
        let detail = match self.placement {
            LegendPlacement::Native => None,
            LegendPlacement::Panel | LegendPlacement::Overlay => {
                Some((self.selector.legend_items().to_vec(), self.selector.mode()))
            }
        };
        ChartLegends { native, detail }
    }

    fn controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Legend mode:");
            for mode in GroupingMode::ALL {
                if ui
                    .selectable_label(self.selector.mode() == mode, mode.title())
                    .clicked()
                {
                    self.selector.set_mode(mode);
                }
            }

            ui.separator();
            ui.label("Placement:");
            egui::ComboBox::from_id_salt("placement")
                .selected_text(placement_label(self.placement))
                .show_ui(ui, |ui| {
                    for p in LegendPlacement::ALL {
                        ui.selectable_value(&mut self.placement, p, placement_label(p));
                    }
                });

            ui.separator();
            ui.label("Chart legend:");
            let policy_before = self.native_policy;
            egui::ComboBox::from_id_salt("native_policy")
                .selected_text(self.native_policy.label())
                .show_ui(ui, |ui| {
                    for p in [
                        PolicyOption::Ungrouped,
                        PolicyOption::Grouped,
                        PolicyOption::Disabled,
                    ] {
                        ui.selectable_value(&mut self.native_policy, p, p.label());
                    }
                });
            if policy_before != self.native_policy {
                let policy = self.native_policy.to_policy(self.selector.mode());
                self.selector.set_policy(policy);
            }

            ui.separator();
            if ui.button("Open data…").clicked() {
                self.open_dataset();
            }
            if ui.button("Export chart…").clicked() {
                self.export_chart();
            }
        });

        if !self.status_message.is_empty() {
            ui.colored_label(Color32::from_rgb(22, 101, 52), &self.status_message);
        }
        if !self.error_message.is_empty() {
            ui.colored_label(Color32::from_rgb(185, 28, 28), &self.error_message);
        }
    }

    fn open_dataset(&mut self) {
        let Some(path) = rfd::FileDialog::new()
            .add_filter("Data", &["csv", "json"])
            .pick_file()
        else {
            return;
        };
        match storage::load_records(&path) {
            Ok(records) => {
                self.status_message = format!("Loaded {} records from {}", records.len(), path.display());
                self.error_message.clear();
                self.selector.set_records(records);
            }
            Err(e) => {
                self.error_message = format!("Failed to load {}: {}", path.display(), e);
                self.status_message.clear();
            }
        }
    }

    fn export_chart(&mut self) {
        let start_dir = dirs::picture_dir()
            .or_else(dirs::home_dir)
            .unwrap_or_else(|| PathBuf::from("."));
        let Some(path) = rfd::FileDialog::new()
            .set_directory(start_dir)
            .set_file_name("legend_chart.svg")
            .add_filter("SVG", &["svg"])
            .add_filter("PNG", &["png"])
            .save_file()
        else {
            return;
        };

        let options = RenderOptions {
            width: self.export_size.0,
            height: self.export_size.1,
            locale: self.locale.clone(),
            placement: self.placement,
            mode: self.selector.mode(),
        };
        let chart = self.selector.chart_config().clone();
        match viz::plot_chart(&chart, self.selector.records(), &options, &path) {
            Ok(()) => {
                self.status_message = format!("Chart saved to {}", path.display());
                self.error_message.clear();
            }
            Err(e) => {
                self.error_message = format!("Failed to create chart: {e}");
                self.status_message.clear();
            }
        }
    }

    fn chart_canvas(&mut self, ui: &mut egui::Ui) {
        let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::hover());
        let canvas = response.rect;
        painter.rect_filled(canvas, Rounding::ZERO, Color32::WHITE);

        let chart = self.selector.chart_config().clone();
        let legends = self.legends(&chart);
        let detail_presenter = presenter_for(self.placement);
        let band_presenter = NativeLegend::default();

        let (cw, ch) = (canvas.width() as i32, canvas.height() as i32);
        let side_w = match &legends.detail {
            Some((items, _)) => match detail_presenter.reserve(items, cw, ch) {
                Reserve::Right(w) => w.max(0),
                _ => 0,
            },
            None => 0,
        };
        let main_w = if side_w > 0 { (cw - side_w).max(40) } else { cw };
        let band_h = match &legends.native {
            Some((items, _)) => band_presenter.band_height(items, main_w).min(ch * 3 / 5),
            None => 0,
        };
        let plot_h = if band_h > 0 { (ch - band_h).max(40) } else { ch };

        let plot_px = PxRect::new(0, 0, main_w, plot_h);
        let plot_inner = paint_bars(&painter, canvas.min, plot_px, &chart, &self.locale);

        // Each painted legend with its origin, for hover lookup.
        let mut painted: Vec<(Pos2, LegendLayout)> = Vec::new();
        let records = self.selector.records();
        if let Some((items, mode)) = &legends.native
            && band_h > 0
        {
            let ctx = LegendContext {
                records,
                mode: *mode,
                area: PxRect::new(0, 0, main_w, ch - plot_h),
            };
            let origin = canvas.min + Vec2::new(0.0, plot_h as f32);
            painted.push((origin, band_presenter.layout(items, &ctx)));
        }
        if let Some((items, mode)) = &legends.detail {
            let (area, offset) = if side_w > 0 {
                (PxRect::new(0, 0, cw - main_w, ch), (main_w, 0))
            } else {
                (plot_inner, (0, 0))
            };
            let ctx = LegendContext {
                records,
                mode: *mode,
                area,
            };
            let origin = canvas.min + Vec2::new(offset.0 as f32, offset.1 as f32);
            painted.push((origin, detail_presenter.layout(items, &ctx)));
        }

        for (origin, layout) in &painted {
            paint_legend(&painter, *origin, layout);
        }

        if let Some(pos) = response.hover_pos() {
            let hit = painted.iter().find_map(|(origin, layout)| {
                let local = pos - *origin;
                layout.hit_test(local.x as i32, local.y as i32)
            });
            if let Some(hit) = hit {
                response.on_hover_text(hit.tooltip.join("\n"));
            }
        }
    }
}

impl eframe::App for HarmonizerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.add_space(4.0);
            ui.heading("Chart Legend Harmonizer");
            ui.add_space(4.0);
            self.controls(ui);
            ui.add_space(4.0);
        });
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_canvas(ui);
        });
    }
}

fn placement_label(p: LegendPlacement) -> &'static str {
    match p {
        LegendPlacement::Panel => "Side panel",
        LegendPlacement::Overlay => "Overlay",
        LegendPlacement::Native => "Chart legend",
    }
}

fn color32(c: Rgb8) -> Color32 {
    Color32::from_rgb(c.r, c.g, c.b)
}

fn to_rect(origin: Pos2, r: &PxRect) -> Rect {
    Rect::from_min_size(
        origin + Vec2::new(r.x as f32, r.y as f32),
        Vec2::new(r.w as f32, r.h as f32),
    )
}

fn to_pos(origin: Pos2, (x, y): (i32, i32)) -> Pos2 {
    origin + Vec2::new(x as f32, y as f32)
}

/// Paint axes and grouped bars inside `area`; returns the inner plot rectangle.
fn paint_bars(
    painter: &egui::Painter,
    origin: Pos2,
    area: PxRect,
    chart: &ChartConfig,
    locale: &str,
) -> PxRect {
    const TICKS: usize = 8;
    let font = FontId::proportional(12.0);

    painter.text(
        to_pos(origin, (area.x + area.w / 2, area.y + 14)),
        Align2::CENTER_CENTER,
        &chart.title,
        FontId::proportional(18.0),
        TEXT,
    );

    let inner = PxRect::new(area.x + 64, area.y + 36, (area.w - 84).max(10), (area.h - 72).max(10));
    let (ymin, ymax) = (chart.y_axis.min, chart.y_axis.max);
    let span = (ymax - ymin).max(f64::EPSILON);
    let y_of = |v: f64| inner.bottom() as f32 - ((v - ymin) / span) as f32 * inner.h as f32;

    for i in 0..=TICKS {
        let v = ymin + span * i as f64 / TICKS as f64;
        let y = y_of(v);
        if chart.y_axis.grid_lines {
            painter.line_segment(
                [
                    Pos2::new(origin.x + inner.x as f32, origin.y + y),
                    Pos2::new(origin.x + inner.right() as f32, origin.y + y),
                ],
                Stroke::new(1.0, Color32::from_gray(235)),
            );
        }
        painter.text(
            Pos2::new(origin.x + inner.x as f32 - 6.0, origin.y + y),
            Align2::RIGHT_CENTER,
            format_value(v, locale),
            font.clone(),
            AXIS,
        );
    }
    painter.line_segment(
        [
            to_pos(origin, (inner.x, inner.bottom())),
            to_pos(origin, (inner.right(), inner.bottom())),
        ],
        Stroke::new(1.0, AXIS),
    );

    let categories = &chart.x_axis.categories;
    if chart.series.is_empty() {
        painter.text(
            to_rect(origin, &inner).center(),
            Align2::CENTER_CENTER,
            "No data",
            FontId::proportional(16.0),
            AXIS,
        );
        return inner;
    }

    let slot = inner.w as f32 / categories.len().max(1) as f32;
    let group_w = (1.0 - 2.0 * chart.columns.group_padding as f32).clamp(0.1, 1.0) * slot;
    for (ci, name) in categories.iter().enumerate() {
        let center = inner.x as f32 + slot * (ci as f32 + 0.5);
        let in_cat: Vec<_> = chart.series_in_category(ci).collect();
        let bar_w = group_w / in_cat.len().max(1) as f32;
        let inset = bar_w * chart.columns.point_padding as f32;
        for (j, s) in in_cat.iter().enumerate() {
            let x0 = center - group_w / 2.0 + j as f32 * bar_w + inset;
            let (top, bottom) = (y_of(s.value.max(0.0)), y_of(s.value.min(0.0)));
            let rect = Rect::from_min_max(
                Pos2::new(origin.x + x0, origin.y + top),
                Pos2::new(origin.x + x0 + bar_w - 2.0 * inset, origin.y + bottom),
            );
            painter.rect_filled(rect, Rounding::ZERO, color32(s.color));
        }
        painter.text(
            Pos2::new(origin.x + center, origin.y + inner.bottom() as f32 + 6.0),
            Align2::CENTER_TOP,
            name,
            font.clone(),
            AXIS,
        );
    }
    inner
}

fn paint_legend(painter: &egui::Painter, origin: Pos2, layout: &LegendLayout) {
    if let Some((text, at, font_px)) = &layout.heading {
        painter.text(
            to_pos(origin, *at),
            Align2::LEFT_TOP,
            text,
            FontId::proportional(*font_px as f32),
            TEXT,
        );
    }
    if let Some((rect, frame)) = &layout.container {
        paint_frame(painter, to_rect(origin, rect), *frame, Color32::from_white_alpha(235));
    }

    for item in &layout.items {
        paint_frame(painter, to_rect(origin, &item.bounds), item.frame, Color32::WHITE);
        match &item.swatch {
            Swatch::Dot {
                center,
                radius,
                color,
            } => {
                let c = to_pos(origin, *center);
                painter.circle_filled(c, *radius as f32, color32(*color));
                painter.circle_stroke(c, *radius as f32, Stroke::new(1.0, BORDER));
            }
            Swatch::Composite { cells } => {
                for cell in cells {
                    let r = to_rect(origin, &cell.rect);
                    painter.rect_filled(r, Rounding::same(1.0), color32(cell.color));
                    painter.rect_stroke(r, Rounding::same(1.0), Stroke::new(1.0, BORDER));
                }
            }
        }

        let font = FontId::proportional(item.font_px as f32);
        for (i, line) in item.label_lines.iter().enumerate() {
            let (x, y) = item.label_origin;
            painter.text(
                to_pos(origin, (x, y + i as i32 * item.line_height)),
                Align2::LEFT_CENTER,
                line,
                font.clone(),
                TEXT,
            );
        }

        if let Some(badge) = &item.badge {
            let r = to_rect(origin, &badge.rect);
            painter.rect_filled(r, Rounding::same(r.height() / 2.0), BADGE_FILL);
            painter.text(
                r.center(),
                Align2::CENTER_CENTER,
                badge.count.to_string(),
                FontId::proportional(item.font_px.saturating_sub(2) as f32),
                TEXT,
            );
        }
    }
}

fn paint_frame(painter: &egui::Painter, rect: Rect, frame: Frame, fill: Color32) {
    let rounding = match frame {
        Frame::None => return,
        Frame::Card => Rounding::same(6.0),
        Frame::Pill => Rounding::same(rect.height() / 2.0),
    };
    painter.rect_filled(rect, rounding, fill);
    painter.rect_stroke(rect, rounding, Stroke::new(1.0, BORDER));
}
