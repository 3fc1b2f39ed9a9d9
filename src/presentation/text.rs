//! Text measurement, truncation, and wrapping for legend layout.
//!
//! Neither plotters nor the layout code has a real text shaper available, so widths are
//! estimated from the character count. Both renderers use the same estimate, which keeps
//! the static image and the GUI legend identical.

/// Heuristic glyph metrics for one font size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextMetrics {
    pub font_px: u32,
}

impl TextMetrics {
    pub const fn new(font_px: u32) -> Self {
        Self { font_px }
    }

    /// Line height: font size plus a little leading.
    pub fn line_height(self) -> i32 {
        self.font_px as i32 + 4
    }

    /// Estimated pixel width of `text`: 0.6 em per char, rounded up.
    pub fn width(self, text: &str) -> i32 {
        let tenths = text.chars().count() as u64 * self.font_px as u64 * 3;
        tenths.div_ceil(5) as i32
    }

    /// Truncate to fit `max_px`, ending in a single ellipsis if anything was cut.
    pub fn truncate(self, text: &str, max_px: i32) -> String {
        if self.width(text) <= max_px {
            return text.to_string();
        }
        let mut out = String::new();
        for ch in text.chars() {
            out.push(ch);
            if self.width(&out) + self.width("…") > max_px {
                out.pop();
                break;
            }
        }
        if out.is_empty() {
            return String::new();
        }
        out.push('…');
        out
    }

    /// Wrap on word boundaries to fit `max_px`; a single word that is too long is truncated.
    pub fn wrap(self, text: &str, max_px: i32) -> Vec<String> {
        let mut lines: Vec<String> = Vec::new();
        let mut cur = String::new();
        for word in text.split_whitespace() {
            let candidate = if cur.is_empty() {
                word.to_string()
            } else {
                format!("{cur} {word}")
            };
            if self.width(&candidate) <= max_px {
                cur = candidate;
            } else if cur.is_empty() {
                lines.push(self.truncate(word, max_px));
            } else {
                lines.push(std::mem::take(&mut cur));
                if self.width(word) <= max_px {
                    cur = word.to_string();
                } else {
                    lines.push(self.truncate(word, max_px));
                }
            }
        }
        if !cur.is_empty() {
            lines.push(cur);
        }
        if lines.is_empty() {
            lines.push(String::new());
        }
        lines
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const M: TextMetrics = TextMetrics::new(10);

    #[test]
    fn width_scales_with_chars() {
        assert_eq!(M.width(""), 0);
        assert_eq!(M.width("abcde"), 30);
        // 7 * 12 * 0.6 = 50.4
        assert_eq!(TextMetrics::new(12).width("abcdefg"), 51);
        assert_eq!(TextMetrics::new(15).width("Mode: VERSION"), 117);
    }

    #[test]
    fn truncate_adds_one_ellipsis() {
        assert_eq!(M.truncate("short", 100), "short");
        let t = M.truncate("a rather long label", 60);
        assert!(t.ends_with('…'));
        assert!(M.width(&t) <= 60);
        assert_eq!(t.matches('…').count(), 1);
    }

    #[test]
    fn wrap_breaks_on_words() {
        let lines = M.wrap("Plan 2024 • Q1 2024", 60);
        assert!(lines.len() > 1);
        assert!(lines.iter().all(|l| M.width(l) <= 60));
        assert_eq!(M.wrap("", 60), vec![String::new()]);
    }
}
