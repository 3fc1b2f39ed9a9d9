//! Legend presentation: position legend items as interactive blocks.
//!
//! A presenter turns the grouping engine's items into a [`LegendLayout`]: pixel
//! rectangles for swatches, labels, count badges and the hover area of every entry,
//! plus the tooltip lines to show on hover. Renderers (plotters in [`crate::viz`], egui in
//! the GUI binary) only paint a layout; they never look at records or modes.
//!
//! Placements:
//! - [`LegendPlacement::Panel`]: detail panel beside the chart (one card per row)
//! - [`LegendPlacement::Overlay`]: floating pill bar inside the plot area
//! - [`LegendPlacement::Native`]: band below the plot, like a chart library's own legend

pub mod native;
pub mod overlay;
pub mod panel;
pub mod text;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::color::Rgb8;
use crate::error::HarmonizerError;
use crate::models::{GroupingMode, LegendItem, Record, PAIR_SEPARATOR};

pub use native::NativeLegend;
pub use overlay::OverlayPills;
pub use panel::SidePanel;
use text::TextMetrics;

/// Where the legend is drawn relative to the chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum LegendPlacement {
    /// Detail panel on the right of the chart.
    #[default]
    Panel,
    /// Pill bar floating over the top of the plot area.
    Overlay,
    /// Centered band under the plot.
    Native,
}

impl LegendPlacement {
    pub const ALL: [LegendPlacement; 3] = [
        LegendPlacement::Panel,
        LegendPlacement::Overlay,
        LegendPlacement::Native,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            LegendPlacement::Panel => "panel",
            LegendPlacement::Overlay => "overlay",
            LegendPlacement::Native => "native",
        }
    }
}

impl fmt::Display for LegendPlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LegendPlacement {
    type Err = HarmonizerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "panel" => Ok(LegendPlacement::Panel),
            "overlay" => Ok(LegendPlacement::Overlay),
            "native" => Ok(LegendPlacement::Native),
            _ => Err(HarmonizerError::UnknownPlacement(s.to_string())),
        }
    }
}

/// Axis-aligned pixel rectangle (origin top-left, y grows downward).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct PxRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl PxRect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.w, self.h)
    }

    pub fn union(&self, other: &PxRect) -> PxRect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        PxRect::new(x, y, self.right().max(other.right()) - x, self.bottom().max(other.bottom()) - y)
    }

    /// Grow by `pad` on every side.
    pub fn inflate(&self, pad: i32) -> PxRect {
        PxRect::new(self.x - pad, self.y - pad, self.w + 2 * pad, self.h + 2 * pad)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SwatchCell {
    pub rect: PxRect,
    pub color: Rgb8,
}

/// Color indicator of one legend entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Swatch {
    /// Single filled dot.
    Dot {
        center: (i32, i32),
        radius: i32,
        color: Rgb8,
    },
    /// Row of adjacent bordered cells, one per folded record.
    Composite { cells: Vec<SwatchCell> },
}

impl Swatch {
    fn translated(&self, dx: i32, dy: i32) -> Swatch {
        match self {
            Swatch::Dot {
                center,
                radius,
                color,
            } => Swatch::Dot {
                center: (center.0 + dx, center.1 + dy),
                radius: *radius,
                color: *color,
            },
            Swatch::Composite { cells } => Swatch::Composite {
                cells: cells
                    .iter()
                    .map(|c| SwatchCell {
                        rect: c.rect.translated(dx, dy),
                        color: c.color,
                    })
                    .collect(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Badge {
    pub rect: PxRect,
    pub count: usize,
}

/// Visual container drawn behind an entry (or behind the whole legend).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Frame {
    None,
    /// Bordered card with square-ish corners.
    Card,
    /// Rounded pill.
    Pill,
}

/// One positioned legend entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedLegendItem {
    pub item_id: String,
    /// Full, untruncated label.
    pub label: String,
    /// Label as displayed (wrapped or truncated to fit).
    pub label_lines: Vec<String>,
    /// Left edge and vertical center of the first label line.
    pub label_origin: (i32, i32),
    pub line_height: i32,
    pub font_px: u32,
    /// Hover/click area of the whole entry.
    pub bounds: PxRect,
    pub frame: Frame,
    pub swatch: Swatch,
    pub badge: Option<Badge>,
    pub tooltip: Vec<String>,
}

impl PlacedLegendItem {
    pub fn translated(&self, dx: i32, dy: i32) -> Self {
        Self {
            label_origin: (self.label_origin.0 + dx, self.label_origin.1 + dy),
            bounds: self.bounds.translated(dx, dy),
            swatch: self.swatch.translated(dx, dy),
            badge: self.badge.as_ref().map(|b| Badge {
                rect: b.rect.translated(dx, dy),
                count: b.count,
            }),
            ..self.clone()
        }
    }
}

/// A fully positioned legend, ready to paint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LegendLayout {
    pub placement: LegendPlacement,
    pub mode: GroupingMode,
    /// Optional heading (text, top-left anchor, font px).
    pub heading: Option<(String, (i32, i32), u32)>,
    /// Container behind all entries, when the placement draws one.
    pub container: Option<(PxRect, Frame)>,
    pub items: Vec<PlacedLegendItem>,
}

impl LegendLayout {
    /// Entry under the pointer, if any.
    pub fn hit_test(&self, x: i32, y: i32) -> Option<&PlacedLegendItem> {
        self.items.iter().find(|it| it.bounds.contains(x, y))
    }

    /// Union of all entry bounds (empty rect when there are no entries).
    pub fn bounds(&self) -> PxRect {
        let mut it = self.items.iter().map(|i| i.bounds);
        match it.next() {
            Some(first) => it.fold(first, |acc, r| acc.union(&r)),
            None => PxRect::default(),
        }
    }
}

/// Everything a presenter needs besides the items themselves.
#[derive(Debug, Clone, Copy)]
pub struct LegendContext<'a> {
    pub records: &'a [Record],
    pub mode: GroupingMode,
    /// Area the legend may occupy (panel/band area, or the plot area for overlays).
    pub area: PxRect,
}

/// Space a placement carves out of the canvas before the chart is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reserve {
    None,
    Right(i32),
    Bottom(i32),
}

/// A legend placement strategy. All strategies consume the same item sequence.
pub trait LegendPresenter {
    fn placement(&self) -> LegendPlacement;

    /// Space to reserve on a canvas of `canvas_w` x `canvas_h` pixels.
    fn reserve(&self, items: &[LegendItem], canvas_w: i32, canvas_h: i32) -> Reserve;

    fn layout(&self, items: &[LegendItem], ctx: &LegendContext<'_>) -> LegendLayout;
}

/// Presenter with default styling for a placement.
pub fn presenter_for(placement: LegendPlacement) -> Box<dyn LegendPresenter> {
    match placement {
        LegendPlacement::Panel => Box::new(SidePanel::default()),
        LegendPlacement::Overlay => Box::new(OverlayPills::default()),
        LegendPlacement::Native => Box::new(NativeLegend::default()),
    }
}

/// Tooltip content for an entry: folded members as variable/version/color triples,
/// or just the label when nothing is folded.
pub fn tooltip_lines(item: &LegendItem, records: &[Record], mode: GroupingMode) -> Vec<String> {
    if !mode.folds() {
        return vec![item.label.clone()];
    }
    item.members
        .iter()
        .filter_map(|id| records.get(id.index()))
        .map(|r| format!("{}{}{} ({})", r.variable, PAIR_SEPARATOR, r.version, r.color))
        .collect()
}

// ---------------------------------------------------------------------------
// Shared block geometry
// ---------------------------------------------------------------------------

const DOT_RADIUS: i32 = 4;
const CELL_W: i32 = 6;
const CELL_H: i32 = 8;
const CELL_GAP: i32 = 2;
const SWATCH_TO_TEXT: i32 = 8;
const TEXT_TO_BADGE: i32 = 8;
const BADGE_PAD_X: i32 = 5;

/// Per-placement knobs for [`build_block`].
#[derive(Debug, Clone, Copy)]
pub(crate) struct BlockStyle {
    pub metrics: TextMetrics,
    pub pad_x: i32,
    pub pad_y: i32,
    pub frame: Frame,
    /// Fixed block width (panel cards); `None` means shrink to content.
    pub fixed_width: Option<i32>,
}

pub(crate) fn swatch_width(n_colors: usize) -> i32 {
    if n_colors <= 1 {
        2 * DOT_RADIUS
    } else {
        n_colors as i32 * CELL_W + (n_colors as i32 - 1) * CELL_GAP
    }
}

pub(crate) fn badge_width(metrics: TextMetrics, count: usize) -> i32 {
    metrics.width(&count.to_string()) + 2 * BADGE_PAD_X
}

/// Horizontal space taken by everything except the label text.
pub(crate) fn chrome_width(item: &LegendItem, style: &BlockStyle) -> i32 {
    let badge = if item.is_composite() {
        TEXT_TO_BADGE + badge_width(style.metrics, item.colors.len())
    } else {
        0
    };
    2 * style.pad_x + swatch_width(item.colors.len()) + SWATCH_TO_TEXT + badge
}

/// Lay out one entry with its top-left corner at `(x, y)`.
pub(crate) fn build_block(
    item: &LegendItem,
    label_lines: Vec<String>,
    tooltip: Vec<String>,
    x: i32,
    y: i32,
    style: &BlockStyle,
) -> PlacedLegendItem {
    let m = style.metrics;
    let line_h = m.line_height();
    let n_lines = label_lines.len().max(1) as i32;
    let height = n_lines * line_h + 2 * style.pad_y;
    // Swatch and badge align with the first label line.
    let cy = y + style.pad_y + line_h / 2;

    let swatch_x = x + style.pad_x;
    let swatch = if item.colors.len() == 1 {
        Swatch::Dot {
            center: (swatch_x + DOT_RADIUS, cy),
            radius: DOT_RADIUS,
            color: item.colors[0],
        }
    } else {
        Swatch::Composite {
            cells: item
                .colors
                .iter()
                .enumerate()
                .map(|(i, c)| SwatchCell {
                    rect: PxRect::new(
                        swatch_x + i as i32 * (CELL_W + CELL_GAP),
                        cy - CELL_H / 2,
                        CELL_W,
                        CELL_H,
                    ),
                    color: *c,
                })
                .collect(),
        }
    };

    let text_x = swatch_x + swatch_width(item.colors.len()) + SWATCH_TO_TEXT;
    let text_w = label_lines.iter().map(|l| m.width(l)).max().unwrap_or(0);

    let badge = item.is_composite().then(|| {
        let bw = badge_width(m, item.colors.len());
        let bx = match style.fixed_width {
            // Cards pin the badge to the right edge.
            Some(w) => x + w - style.pad_x - bw,
            None => text_x + text_w + TEXT_TO_BADGE,
        };
        Badge {
            rect: PxRect::new(bx, cy - line_h / 2, bw, line_h),
            count: item.colors.len(),
        }
    });

    let content_right = badge
        .as_ref()
        .map(|b| b.rect.right())
        .unwrap_or(text_x + text_w);
    let width = style
        .fixed_width
        .unwrap_or(content_right + style.pad_x - x);

    PlacedLegendItem {
        item_id: item.id.clone(),
        label: item.label.clone(),
        label_lines,
        label_origin: (text_x, cy),
        line_height: line_h,
        font_px: m.font_px,
        bounds: PxRect::new(x, y, width, height),
        frame: style.frame,
        swatch,
        badge,
        tooltip,
    }
}

/// Greedy row packing: indices of blocks per row, given block widths.
pub(crate) fn flow_rows(widths: &[i32], avail: i32, gap: i32) -> Vec<Vec<usize>> {
    let mut rows: Vec<Vec<usize>> = Vec::new();
    let mut cur: Vec<usize> = Vec::new();
    let mut x = 0;
    for (i, w) in widths.iter().enumerate() {
        let needed = if cur.is_empty() { *w } else { x + gap + w };
        if needed > avail && !cur.is_empty() {
            rows.push(std::mem::take(&mut cur));
            x = *w;
        } else {
            x = needed;
        }
        cur.push(i);
    }
    if !cur.is_empty() {
        rows.push(cur);
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flow_wraps_when_row_is_full() {
        let rows = flow_rows(&[40, 40, 40], 90, 5);
        assert_eq!(rows, vec![vec![0, 1], vec![2]]);
        // A block wider than the row still gets its own row.
        let rows = flow_rows(&[200, 10], 90, 5);
        assert_eq!(rows, vec![vec![0], vec![1]]);
        assert!(flow_rows(&[], 90, 5).is_empty());
    }

    #[test]
    fn placement_parse_rejects_unknown() {
        assert_eq!("Overlay".parse::<LegendPlacement>().unwrap(), LegendPlacement::Overlay);
        assert!("sidebar".parse::<LegendPlacement>().is_err());
    }

    #[test]
    fn rect_helpers() {
        let r = PxRect::new(10, 10, 20, 10);
        assert!(r.contains(10, 10));
        assert!(!r.contains(30, 10));
        assert_eq!(r.union(&PxRect::new(0, 15, 5, 20)), PxRect::new(0, 10, 30, 25));
        assert_eq!(r.inflate(2), PxRect::new(8, 8, 24, 14));
    }
}
