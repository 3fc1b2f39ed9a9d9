//! Floating pill bar drawn over the top of the plot area.

use super::text::TextMetrics;
use super::{
    BlockStyle, Frame, LegendContext, LegendItem, LegendLayout, LegendPlacement, LegendPresenter,
    PxRect, Reserve, build_block, chrome_width, flow_rows, tooltip_lines,
};

#[derive(Debug, Clone)]
pub struct OverlayPills {
    pub metrics: TextMetrics,
    /// Inset from the plot area's top-left corner.
    pub inset: i32,
    pub gap: i32,
    /// Maximum label width as a share of the plot width.
    pub label_cap_fraction: f32,
}

impl Default for OverlayPills {
    fn default() -> Self {
        Self {
            metrics: TextMetrics::new(12),
            inset: 10,
            gap: 6,
            label_cap_fraction: 0.35,
        }
    }
}

impl LegendPresenter for OverlayPills {
    fn placement(&self) -> LegendPlacement {
        LegendPlacement::Overlay
    }

    fn reserve(&self, _items: &[LegendItem], _canvas_w: i32, _canvas_h: i32) -> Reserve {
        Reserve::None
    }

    fn layout(&self, items: &[LegendItem], ctx: &LegendContext<'_>) -> LegendLayout {
        let area = ctx.area;
        let style = BlockStyle {
            metrics: self.metrics,
            pad_x: 8,
            pad_y: 3,
            frame: Frame::Pill,
            fixed_width: None,
        };
        let avail = (area.w - 2 * self.inset).max(40);
        let cap = ((avail as f32) * self.label_cap_fraction).max(60.0) as i32;

        let blocks: Vec<_> = items
            .iter()
            .map(|item| {
                let text_cap = cap.min(avail - chrome_width(item, &style)).max(20);
                let label = self.metrics.truncate(&item.label, text_cap);
                build_block(
                    item,
                    vec![label],
                    tooltip_lines(item, ctx.records, ctx.mode),
                    0,
                    0,
                    &style,
                )
            })
            .collect();

        let widths: Vec<i32> = blocks.iter().map(|b| b.bounds.w).collect();
        let mut placed = Vec::with_capacity(blocks.len());
        let mut y = area.y + self.inset;
        for row in flow_rows(&widths, avail, self.gap) {
            let mut x = area.x + self.inset;
            let row_h = row.iter().map(|&i| blocks[i].bounds.h).max().unwrap_or(0);
            for i in row {
                let b = blocks[i].translated(x, y);
                x = b.bounds.right() + self.gap;
                placed.push(b);
            }
            y += row_h + self.gap;
        }

        let mut layout = LegendLayout {
            placement: LegendPlacement::Overlay,
            mode: ctx.mode,
            heading: None,
            container: None,
            items: placed,
        };
        if !layout.items.is_empty() {
            let bar: PxRect = layout.bounds().inflate(4);
            layout.container = Some((bar, Frame::Card));
        }
        layout
    }
}
