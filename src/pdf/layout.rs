//! Low-level page composition: a vertical-cursor writer over lopdf
//! content operations, plus text wrapping and Indian number formatting.

use lopdf::Object;
use lopdf::content::Operation;
use rust_decimal::Decimal;

use crate::core::round_half_up;

/// A4 portrait.
pub const PAGE_WIDTH: f32 = 595.28;
pub const PAGE_HEIGHT: f32 = 841.89;
pub const MARGIN: f32 = 40.0;

/// Baseline-to-baseline distance for body text.
pub const LINE_HEIGHT: f32 = 13.0;

/// Resource names registered on the page tree.
pub const FONT_REGULAR: &str = "F1";
pub const FONT_BOLD: &str = "F2";
pub const QR_XOBJECT: &str = "Im1";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Font {
    Regular,
    Bold,
}

impl Font {
    fn name(self) -> &'static str {
        match self {
            Self::Regular => FONT_REGULAR,
            Self::Bold => FONT_BOLD,
        }
    }
}

/// Accumulates content operations page by page, tracking a downward
/// vertical cursor. Sections call [`Composer::ensure`] before drawing;
/// an overflow starts a fresh page.
pub struct Composer {
    ops: Vec<Operation>,
    finished: Vec<Vec<Operation>>,
    /// Current baseline. Decreases as content is drawn.
    pub y: f32,
}

impl Composer {
    pub fn new() -> Self {
        Self {
            ops: Vec::new(),
            finished: Vec::new(),
            y: PAGE_HEIGHT - MARGIN,
        }
    }

    /// Make room for `needed` points of content; returns true when that
    /// forced a page break.
    pub fn ensure(&mut self, needed: f32) -> bool {
        if self.y - needed < MARGIN {
            self.new_page();
            true
        } else {
            false
        }
    }

    pub fn new_page(&mut self) {
        let ops = std::mem::take(&mut self.ops);
        self.finished.push(ops);
        self.y = PAGE_HEIGHT - MARGIN;
    }

    /// Move the cursor down.
    pub fn advance(&mut self, dy: f32) {
        self.y -= dy;
    }

    /// Draw a single line of text with its baseline at `y`.
    pub fn text_at(&mut self, x: f32, y: f32, size: f32, font: Font, s: &str) {
        self.ops.push(Operation::new("BT", vec![]));
        self.ops.push(Operation::new(
            "Tf",
            vec![Object::Name(font.name().into()), size.into()],
        ));
        self.ops
            .push(Operation::new("Td", vec![x.into(), y.into()]));
        self.ops
            .push(Operation::new("Tj", vec![Object::string_literal(s)]));
        self.ops.push(Operation::new("ET", vec![]));
    }

    /// Draw text at the current cursor without advancing it.
    pub fn text(&mut self, x: f32, size: f32, font: Font, s: &str) {
        let y = self.y;
        self.text_at(x, y, size, font, s);
    }

    /// Right-aligned text ending at `x_right`, using an approximate
    /// Helvetica advance of half the font size per character.
    pub fn text_right(&mut self, x_right: f32, size: f32, font: Font, s: &str) {
        let width = s.chars().count() as f32 * size * 0.5;
        let y = self.y;
        self.text_at(x_right - width, y, size, font, s);
    }

    /// Horizontal rule at the current cursor.
    pub fn hline(&mut self, x1: f32, x2: f32) {
        let y = self.y;
        self.ops
            .push(Operation::new("w", vec![Object::Real(0.5)]));
        self.ops
            .push(Operation::new("m", vec![x1.into(), y.into()]));
        self.ops
            .push(Operation::new("l", vec![x2.into(), y.into()]));
        self.ops.push(Operation::new("S", vec![]));
    }

    /// Place an image XObject with its lower-left corner at (x, y).
    pub fn image(&mut self, name: &str, x: f32, y: f32, w: f32, h: f32) {
        self.ops.push(Operation::new("q", vec![]));
        self.ops.push(Operation::new(
            "cm",
            vec![
                w.into(),
                0f32.into(),
                0f32.into(),
                h.into(),
                x.into(),
                y.into(),
            ],
        ));
        self.ops
            .push(Operation::new("Do", vec![Object::Name(name.into())]));
        self.ops.push(Operation::new("Q", vec![]));
    }

    /// Finish composition, yielding the operation list per page.
    pub fn into_pages(mut self) -> Vec<Vec<Operation>> {
        if !self.ops.is_empty() || self.finished.is_empty() {
            let ops = std::mem::take(&mut self.ops);
            self.finished.push(ops);
        }
        self.finished
    }
}

impl Default for Composer {
    fn default() -> Self {
        Self::new()
    }
}

/// Word-wrap `s` into lines of at most `budget` characters. Words longer
/// than the budget are hard-split; the result is never empty.
pub fn wrap_text(s: &str, budget: usize) -> Vec<String> {
    debug_assert!(budget > 0);
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in s.split_whitespace() {
        let mut word: String = word.to_string();
        let mut word_len = word.chars().count();

        while word_len > budget {
            if current_len > 0 {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            let head: String = word.chars().take(budget).collect();
            word = word.chars().skip(budget).collect();
            word_len -= budget;
            lines.push(head);
        }

        let needed = if current_len == 0 {
            word_len
        } else {
            current_len + 1 + word_len
        };
        if needed > budget {
            lines.push(std::mem::take(&mut current));
            current = word;
            current_len = word_len;
        } else {
            if current_len > 0 {
                current.push(' ');
            }
            current.push_str(&word);
            current_len = needed;
        }
    }

    if current_len > 0 || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Format a rupee amount with Indian digit grouping: `123456.7` → "1,23,456.70".
pub fn fmt_inr(amount: Decimal) -> String {
    let rounded = round_half_up(amount, 2);
    let negative = rounded.is_sign_negative();
    let s = rounded.abs().to_string();
    let (int_part, frac_part) = match s.split_once('.') {
        Some((i, f)) => (i.to_string(), format!("{f:0<2}")),
        None => (s, "00".to_string()),
    };

    // Indian grouping: rightmost group of 3, then groups of 2.
    let digits: Vec<char> = int_part.chars().collect();
    let mut grouped = String::new();
    let n = digits.len();
    for (i, c) in digits.iter().enumerate() {
        grouped.push(*c);
        let remaining = n - i - 1;
        if remaining > 0 && (remaining == 3 || (remaining > 3 && (remaining - 3) % 2 == 0)) {
            grouped.push(',');
        }
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}{grouped}.{frac_part}")
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn wrap_short_text_is_single_line() {
        assert_eq!(wrap_text("Paper cup", 38), vec!["Paper cup"]);
    }

    #[test]
    fn wrap_sixty_char_name_spans_lines() {
        let name = "Premium biodegradable kraft paper container with vented lids";
        assert_eq!(name.chars().count(), 60);
        let lines = wrap_text(name, 38);
        assert!(lines.len() >= 2);
        assert!(lines.iter().all(|l| l.chars().count() <= 38));
        // No words lost
        let rejoined = lines.join(" ");
        assert_eq!(rejoined, name);
    }

    #[test]
    fn wrap_hard_splits_oversized_words() {
        let lines = wrap_text("abcdefghij", 4);
        assert_eq!(lines, vec!["abcd", "efgh", "ij"]);
    }

    #[test]
    fn wrap_empty_yields_one_empty_line() {
        assert_eq!(wrap_text("", 10), vec![String::new()]);
    }

    #[test]
    fn composer_breaks_page_when_out_of_room() {
        let mut c = Composer::new();
        assert!(!c.ensure(100.0));
        c.text(MARGIN, 9.0, Font::Regular, "first page");
        c.y = MARGIN + 10.0;
        assert!(c.ensure(50.0));
        assert_eq!(c.y, PAGE_HEIGHT - MARGIN);
        c.text(MARGIN, 9.0, Font::Regular, "second page");
        assert_eq!(c.into_pages().len(), 2);
    }

    #[test]
    fn composer_always_yields_at_least_one_page() {
        assert_eq!(Composer::new().into_pages().len(), 1);
    }

    #[test]
    fn inr_grouping() {
        assert_eq!(fmt_inr(dec!(0)), "0.00");
        assert_eq!(fmt_inr(dec!(999)), "999.00");
        assert_eq!(fmt_inr(dec!(1234)), "1,234.00");
        assert_eq!(fmt_inr(dec!(123456.7)), "1,23,456.70");
        assert_eq!(fmt_inr(dec!(12345678.90)), "1,23,45,678.90");
        assert_eq!(fmt_inr(dec!(-1500)), "-1,500.00");
    }
}
