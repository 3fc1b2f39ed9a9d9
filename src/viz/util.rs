//! Utility functions for visualization: colors, locale mapping, tick labels, gutters.

use num_format::{Locale, ToFormattedString};
use plotters::prelude::*;

use crate::color::Rgb8;
use crate::presentation::text::TextMetrics;

#[inline]
pub fn rgb_color(c: Rgb8) -> RGBColor {
    RGBColor(c.r, c.g, c.b)
}

/// Map a user-provided locale tag to a `num_format::Locale` and its decimal separator char.
///
/// Supported tags (case-insensitive): `en`, `us`, `en_US`, `de`, `de_DE`, `german`,
/// `fr`, `es`, `it`, `pt`, `nl`. Defaults to English.
pub fn map_locale(tag: &str) -> (&'static Locale, char) {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => (&Locale::de, ','),
        "fr" | "fr_fr" => (&Locale::fr, ','),
        "es" | "es_es" => (&Locale::es, ','),
        "it" | "it_it" => (&Locale::it, ','),
        "pt" | "pt_pt" | "pt_br" => (&Locale::pt, ','),
        "nl" | "nl_nl" => (&Locale::nl, ','),
        _ => (&Locale::en, '.'), // default
    }
}

/// Locale-aware value label: grouped integer part, up to two decimals for small values.
/// `1350.0` → `"1,350"` (en) / `"1.350"` (de); `2.5` → `"2.50"` / `"2,50"`.
pub fn format_value(v: f64, locale_tag: &str) -> String {
    let (locale, dec_sep) = map_locale(locale_tag);
    let a = v.abs();
    let prec = if a >= 100.0 {
        0
    } else if a >= 10.0 {
        1
    } else {
        2
    };
    let scaled = (a * 10f64.powi(prec)).round() as i64;
    let div = 10i64.pow(prec as u32);
    let int_part = (scaled / div).to_formatted_string(locale);
    let sign = if v < 0.0 && scaled != 0 { "-" } else { "" };
    if prec == 0 {
        format!("{sign}{int_part}")
    } else {
        let frac = scaled % div;
        format!("{sign}{int_part}{dec_sep}{frac:0width$}", width = prec as usize)
    }
}

/// Compute a tight left label area width for the Y axis (in pixels), based on the
/// formatted tick labels that will appear between `ymin..ymax` with `ticks` labels.
///
/// Returns a width clamped to a sensible range to avoid extremes.
pub fn compute_left_label_area_px(
    ymin: f64,
    ymax: f64,
    ticks: usize,
    font_px: u32,
    locale_tag: &str,
) -> u32 {
    let metrics = TextMetrics::new(font_px);
    let mut max_px = 0i32;
    for i in 0..=ticks {
        let t = if ticks == 0 {
            0.0
        } else {
            i as f64 / ticks as f64
        };
        let v = ymin + (ymax - ymin) * t;
        max_px = max_px.max(metrics.width(&format_value(v, locale_tag)));
    }
    // Tick marks plus breathing room.
    (max_px.saturating_add(18)).clamp(48, 140) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn values_follow_locale() {
        assert_eq!(format_value(1350.0, "en"), "1,350");
        assert_eq!(format_value(1350.0, "de"), "1.350");
        assert_eq!(format_value(2.5, "en"), "2.50");
        assert_eq!(format_value(2.5, "de"), "2,50");
        assert_eq!(format_value(-12.25, "en"), "-12.3");
        assert_eq!(format_value(0.0, "en"), "0.00");
    }

    #[test]
    fn gutter_is_clamped() {
        let w = compute_left_label_area_px(0.0, 1600.0, 8, 12, "en");
        assert!((48..=140).contains(&w));
    }
}
