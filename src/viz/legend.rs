//! Paint a [`LegendLayout`] onto a plotters drawing area.

use anyhow::Result;
use plotters::backend::DrawingBackend;
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::FontFamily;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use super::util::rgb_color;
use crate::presentation::{Frame, LegendLayout, PlacedLegendItem, PxRect, Swatch};

const BORDER: RGBColor = RGBColor(203, 213, 225);
const TEXT: RGBColor = RGBColor(15, 23, 42);
const BADGE_FILL: RGBColor = RGBColor(226, 232, 240);

/// Draw every entry of `layout`. Coordinates are relative to `area`.
pub fn draw_legend_layout<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    layout: &LegendLayout,
) -> Result<()> {
    if let Some((text, (x, y), font_px)) = &layout.heading {
        let style = TextStyle::from((FontFamily::SansSerif, *font_px))
            .pos(Pos::new(HPos::Left, VPos::Top))
            .color(&TEXT);
        area.draw(&Text::new(text.as_str(), (*x, *y), style))
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    }

    if let Some((rect, frame)) = &layout.container {
        draw_frame(area, rect, *frame, &WHITE.mix(0.92))?;
    }

    for item in &layout.items {
        draw_item(area, item)?;
    }
    Ok(())
}

fn draw_item<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    item: &PlacedLegendItem,
) -> Result<()> {
    draw_frame(area, &item.bounds, item.frame, &WHITE.to_rgba())?;
    draw_swatch(area, &item.swatch)?;

    let label_style = TextStyle::from((FontFamily::SansSerif, item.font_px))
        .pos(Pos::new(HPos::Left, VPos::Center))
        .color(&TEXT);
    let (tx, ty) = item.label_origin;
    for (i, line) in item.label_lines.iter().enumerate() {
        area.draw(&Text::new(
            line.as_str(),
            (tx, ty + i as i32 * item.line_height),
            label_style.clone(),
        ))
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    }

    if let Some(badge) = &item.badge {
        let r = badge.rect;
        area.draw(&Rectangle::new(
            [(r.x, r.y + 1), (r.right(), r.bottom() - 1)],
            BADGE_FILL.filled(),
        ))
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        let badge_style = TextStyle::from((FontFamily::SansSerif, item.font_px.saturating_sub(2)))
            .pos(Pos::new(HPos::Center, VPos::Center))
            .color(&TEXT);
        area.draw(&Text::new(
            badge.count.to_string(),
            (r.x + r.w / 2, r.y + r.h / 2),
            badge_style,
        ))
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    }
    Ok(())
}

fn draw_swatch<DB: DrawingBackend>(area: &DrawingArea<DB, Shift>, swatch: &Swatch) -> Result<()> {
    match swatch {
        Swatch::Dot {
            center,
            radius,
            color,
        } => {
            area.draw(&Circle::new(*center, *radius, rgb_color(*color).filled()))
                .map_err(|e| anyhow::anyhow!("{:?}", e))?;
            area.draw(&Circle::new(*center, *radius, BORDER.stroke_width(1)))
                .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        }
        Swatch::Composite { cells } => {
            for cell in cells {
                let r = cell.rect;
                let corners = [(r.x, r.y), (r.right(), r.bottom())];
                area.draw(&Rectangle::new(corners, rgb_color(cell.color).filled()))
                    .map_err(|e| anyhow::anyhow!("{:?}", e))?;
                area.draw(&Rectangle::new(corners, BORDER.stroke_width(1)))
                    .map_err(|e| anyhow::anyhow!("{:?}", e))?;
            }
        }
    }
    Ok(())
}

fn draw_frame<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    rect: &PxRect,
    frame: Frame,
    fill: &RGBAColor,
) -> Result<()> {
    let corners = [(rect.x, rect.y), (rect.right(), rect.bottom())];
    match frame {
        Frame::None => {}
        Frame::Card => {
            area.draw(&Rectangle::new(corners, fill.filled()))
                .map_err(|e| anyhow::anyhow!("{:?}", e))?;
            area.draw(&Rectangle::new(corners, BORDER.stroke_width(1)))
                .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        }
        Frame::Pill => {
            // Plotters has no rounded rectangle; approximate with end caps.
            let r = rect.h / 2;
            let cy = rect.y + r;
            area.draw(&Circle::new((rect.x + r, cy), r, fill.filled()))
                .map_err(|e| anyhow::anyhow!("{:?}", e))?;
            area.draw(&Circle::new((rect.right() - r, cy), r, fill.filled()))
                .map_err(|e| anyhow::anyhow!("{:?}", e))?;
            area.draw(&Rectangle::new(
                [(rect.x + r, rect.y), (rect.right() - r, rect.bottom())],
                fill.filled(),
            ))
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
            area.draw(&PathElement::new(
                vec![(rect.x + r, rect.y), (rect.right() - r, rect.y)],
                BORDER.stroke_width(1),
            ))
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
            area.draw(&PathElement::new(
                vec![(rect.x + r, rect.bottom()), (rect.right() - r, rect.bottom())],
                BORDER.stroke_width(1),
            ))
            .map_err(|e| anyhow::anyhow!("{:?}", e))?;
        }
    }
    Ok(())
}
