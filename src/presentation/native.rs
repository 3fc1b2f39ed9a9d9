//! Native-style legend band under the plot: centered rows of swatch + label entries.

use crate::models::{GroupingMode, Record};

use super::text::TextMetrics;
use super::{
    BlockStyle, Frame, LegendContext, LegendItem, LegendLayout, LegendPlacement, LegendPresenter,
    PlacedLegendItem, Reserve, build_block, chrome_width, flow_rows, tooltip_lines,
};

#[derive(Debug, Clone)]
pub struct NativeLegend {
    pub metrics: TextMetrics,
    pub pad_band: i32,
    pub item_gap: i32,
    pub row_gap: i32,
}

impl Default for NativeLegend {
    fn default() -> Self {
        Self {
            metrics: TextMetrics::new(12),
            pad_band: 8,
            item_gap: 12,
            row_gap: 4,
        }
    }
}

impl NativeLegend {
    fn style(&self) -> BlockStyle {
        BlockStyle {
            metrics: self.metrics,
            pad_x: 2,
            pad_y: 1,
            frame: Frame::None,
            fixed_width: None,
        }
    }

    /// Blocks at the origin, labels truncated to what one row can hold.
    fn blocks(
        &self,
        items: &[LegendItem],
        records: &[Record],
        mode: GroupingMode,
        avail: i32,
    ) -> Vec<PlacedLegendItem> {
        let style = self.style();
        items
            .iter()
            .map(|item| {
                let cap = (avail - chrome_width(item, &style)).max(20);
                let label = self.metrics.truncate(&item.label, cap);
                build_block(
                    item,
                    vec![label],
                    tooltip_lines(item, records, mode),
                    0,
                    0,
                    &style,
                )
            })
            .collect()
    }

    /// Height of the band needed to show every entry at `width` pixels.
    pub fn band_height(&self, items: &[LegendItem], width: i32) -> i32 {
        if items.is_empty() {
            return 0;
        }
        let avail = (width - 2 * self.pad_band).max(40);
        let style = self.style();
        let widths: Vec<i32> = items
            .iter()
            .map(|item| {
                let cap = (avail - chrome_width(item, &style)).max(20);
                let text_w = self.metrics.width(&self.metrics.truncate(&item.label, cap));
                chrome_width(item, &style) + text_w
            })
            .collect();
        let rows = flow_rows(&widths, avail, self.item_gap).len() as i32;
        let row_h = self.metrics.line_height() + 2 * style.pad_y;
        2 * self.pad_band + rows * row_h + (rows - 1) * self.row_gap
    }
}

impl LegendPresenter for NativeLegend {
    fn placement(&self) -> LegendPlacement {
        LegendPlacement::Native
    }

    fn reserve(&self, items: &[LegendItem], canvas_w: i32, canvas_h: i32) -> Reserve {
        // Keep at least 40% of the canvas for the plot.
        Reserve::Bottom(self.band_height(items, canvas_w).min(canvas_h * 3 / 5))
    }

    fn layout(&self, items: &[LegendItem], ctx: &LegendContext<'_>) -> LegendLayout {
        let area = ctx.area;
        let avail = (area.w - 2 * self.pad_band).max(40);
        let blocks = self.blocks(items, ctx.records, ctx.mode, avail);
        let widths: Vec<i32> = blocks.iter().map(|b| b.bounds.w).collect();

        let mut placed = Vec::with_capacity(blocks.len());
        let mut y = area.y + self.pad_band;
        for row in flow_rows(&widths, avail, self.item_gap) {
            let row_w: i32 = row.iter().map(|&i| widths[i]).sum::<i32>()
                + (row.len() as i32 - 1) * self.item_gap;
            let row_h = row.iter().map(|&i| blocks[i].bounds.h).max().unwrap_or(0);
            // Centered rows, like a chart library's bottom legend.
            let mut x = area.x + (area.w - row_w).max(0) / 2;
            for i in row {
                let b = blocks[i].translated(x, y);
                x = b.bounds.right() + self.item_gap;
                placed.push(b);
            }
            y += row_h + self.row_gap;
        }

        LegendLayout {
            placement: LegendPlacement::Native,
            mode: ctx.mode,
            heading: None,
            container: None,
            items: placed,
        }
    }
}
