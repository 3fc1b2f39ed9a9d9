//! Detail panel beside the chart: heading plus one full-width card per entry.

use super::text::TextMetrics;
use super::{
    BlockStyle, Frame, LegendContext, LegendItem, LegendLayout, LegendPlacement, LegendPresenter,
    Reserve, build_block, chrome_width, tooltip_lines,
};

#[derive(Debug, Clone)]
pub struct SidePanel {
    pub metrics: TextMetrics,
    pub heading_px: u32,
    /// Share of the canvas width given to the panel.
    pub width_fraction: f32,
    pub min_width: i32,
    pub margin: i32,
    pub row_gap: i32,
    pub show_heading: bool,
}

impl Default for SidePanel {
    fn default() -> Self {
        Self {
            metrics: TextMetrics::new(14),
            heading_px: 15,
            width_fraction: 0.28,
            min_width: 200,
            margin: 10,
            row_gap: 6,
            show_heading: true,
        }
    }
}

impl SidePanel {
    fn style(&self, card_w: i32) -> BlockStyle {
        BlockStyle {
            metrics: self.metrics,
            pad_x: 10,
            pad_y: 8,
            frame: Frame::Card,
            fixed_width: Some(card_w),
        }
    }
}

impl LegendPresenter for SidePanel {
    fn placement(&self) -> LegendPlacement {
        LegendPlacement::Panel
    }

    fn reserve(&self, _items: &[LegendItem], canvas_w: i32, _canvas_h: i32) -> Reserve {
        let w = ((canvas_w as f32) * self.width_fraction) as i32;
        // Never take more than half the canvas.
        Reserve::Right(w.max(self.min_width).min(canvas_w / 2))
    }

    fn layout(&self, items: &[LegendItem], ctx: &LegendContext<'_>) -> LegendLayout {
        let area = ctx.area;
        let card_w = (area.w - 2 * self.margin).max(40);
        let style = self.style(card_w);

        let mut y = area.y + self.margin;
        let heading = self.show_heading.then(|| {
            let text = format!("Mode: {}", ctx.mode.title().to_uppercase());
            let text = TextMetrics::new(self.heading_px).truncate(&text, card_w);
            let pos = (area.x + self.margin, y);
            y += self.heading_px as i32 + 10;
            (text, pos, self.heading_px)
        });

        let mut placed = Vec::with_capacity(items.len());
        for item in items {
            let text_cap = (card_w - chrome_width(item, &style)).max(20);
            let lines = self.metrics.wrap(&item.label, text_cap);
            let block = build_block(
                item,
                lines,
                tooltip_lines(item, ctx.records, ctx.mode),
                area.x + self.margin,
                y,
                &style,
            );
            y = block.bounds.bottom() + self.row_gap;
            placed.push(block);
        }

        LegendLayout {
            placement: LegendPlacement::Panel,
            mode: ctx.mode,
            heading,
            container: None,
            items: placed,
        }
    }
}
