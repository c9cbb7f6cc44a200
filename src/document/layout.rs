//! Page layout for plain-text notices.
//!
//! Positions are in millimetres measured from the top-left corner of the
//! page. The PDF writer converts them to its bottom-left origin.

pub const PAGE_WIDTH_MM: f32 = 210.0;
pub const PAGE_HEIGHT_MM: f32 = 297.0;
pub const MARGIN_MM: f32 = 20.0;
pub const LINE_HEIGHT_MM: f32 = 8.0;
pub const BLANK_LINE_ADVANCE_MM: f32 = 5.0;
pub const FONT_SIZE_PT: f32 = 11.0;

const PT_TO_MM: f32 = 25.4 / 72.0;

/// Helvetica advance widths (1/1000 em) for 0x20..=0x7E.
const HELVETICA_ASCII_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // 0..9
    278, 278, 584, 584, 584, 556, 1015, // :..@
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // A..M
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // N..Z
    278, 278, 278, 469, 556, 333, // [..`
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // a..m
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // n..z
    334, 260, 334, 584, // {..~
];

/// Width used for characters above the ASCII block.
const HELVETICA_DEFAULT_WIDTH: u16 = 556;

#[derive(Debug, Clone, Copy)]
pub struct LayoutOptions {
    pub page_width: f32,
    pub page_height: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    pub margin_top: f32,
    pub margin_bottom: f32,
    pub font_size_pt: f32,
    pub line_height: f32,
    pub blank_line_advance: f32,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            page_width: PAGE_WIDTH_MM,
            page_height: PAGE_HEIGHT_MM,
            margin_left: MARGIN_MM,
            margin_right: MARGIN_MM,
            margin_top: MARGIN_MM,
            margin_bottom: MARGIN_MM,
            font_size_pt: FONT_SIZE_PT,
            line_height: LINE_HEIGHT_MM,
            blank_line_advance: BLANK_LINE_ADVANCE_MM,
        }
    }
}

impl LayoutOptions {
    pub fn usable_width(&self) -> f32 {
        self.page_width - self.margin_left - self.margin_right
    }

    /// Lowest y a line box may reach before a page break.
    pub fn break_threshold(&self) -> f32 {
        self.page_height - self.margin_bottom
    }
}

/// A single line of text and the top of its line box.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedLine {
    pub text: String,
    pub y: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub lines: Vec<PlacedLine>,
}

/// Split text into pages.
///
/// Blank lines advance by `blank_line_advance`; every other line is trimmed,
/// wrapped to the usable width and advances by `line_height` per wrapped
/// line. The result always holds at least one page.
pub fn layout(text: &str, options: &LayoutOptions) -> Vec<Page> {
    let threshold = options.break_threshold();
    let max_width = options.usable_width();

    let mut pages = vec![Page::default()];
    let mut y = options.margin_top;

    for raw in text.split('\n') {
        let line = raw.trim();
        if line.is_empty() {
            y += options.blank_line_advance;
            continue;
        }

        for segment in wrap_line(line, max_width, options.font_size_pt) {
            if y + options.line_height > threshold {
                pages.push(Page::default());
                y = options.margin_top;
            }
            if let Some(page) = pages.last_mut() {
                page.lines.push(PlacedLine { text: segment, y });
            }
            y += options.line_height;
        }
    }

    pages
}

fn char_width_units(ch: char) -> u16 {
    let code = ch as u32;
    if (0x20..=0x7E).contains(&code) {
        HELVETICA_ASCII_WIDTHS[(code - 0x20) as usize]
    } else {
        HELVETICA_DEFAULT_WIDTH
    }
}

/// Rendered width of `text` in millimetres.
pub fn text_width_mm(text: &str, font_size_pt: f32) -> f32 {
    let units: u32 = text.chars().map(|c| u32::from(char_width_units(c))).sum();
    units as f32 / 1000.0 * font_size_pt * PT_TO_MM
}

/// Greedy word wrap. Words wider than the line are broken by character.
pub fn wrap_line(line: &str, max_width: f32, font_size_pt: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in line.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_string()
        } else {
            format!("{current} {word}")
        };

        if text_width_mm(&candidate, font_size_pt) <= max_width {
            current = candidate;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }

        if text_width_mm(word, font_size_pt) <= max_width {
            current = word.to_string();
            continue;
        }

        for ch in word.chars() {
            current.push(ch);
            if text_width_mm(&current, font_size_pt) > max_width {
                current.pop();
                if !current.is_empty() {
                    lines.push(std::mem::take(&mut current));
                }
                current.push(ch);
            }
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered_lines(count: usize) -> String {
        (1..=count)
            .map(|i| format!("Line {i}"))
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_empty_text_has_one_page() {
        let pages = layout("", &LayoutOptions::default());
        assert_eq!(pages.len(), 1);
        assert!(pages[0].lines.is_empty());
    }

    #[test]
    fn test_thirty_two_lines_fit_on_one_page() {
        let pages = layout(&numbered_lines(32), &LayoutOptions::default());
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].lines.len(), 32);
        assert_eq!(pages[0].lines[0].y, MARGIN_MM);
    }

    #[test]
    fn test_overflow_starts_second_page() {
        let pages = layout(&numbered_lines(33), &LayoutOptions::default());
        assert_eq!(pages.len(), 2);
        assert_eq!(pages[1].lines.len(), 1);
        assert_eq!(pages[1].lines[0].text, "Line 33");
        assert_eq!(pages[1].lines[0].y, MARGIN_MM);
    }

    #[test]
    fn test_blank_lines_advance_by_paragraph_gap() {
        let pages = layout("First\n\nSecond", &LayoutOptions::default());
        let lines = &pages[0].lines;
        assert_eq!(lines.len(), 2);
        let gap = lines[1].y - lines[0].y;
        assert!((gap - (LINE_HEIGHT_MM + BLANK_LINE_ADVANCE_MM)).abs() < f32::EPSILON);
    }

    #[test]
    fn test_lines_are_trimmed() {
        let pages = layout("   indented   \r\n", &LayoutOptions::default());
        assert_eq!(pages[0].lines[0].text, "indented");
    }

    #[test]
    fn test_long_line_wraps_within_width() {
        let options = LayoutOptions::default();
        let sentence = "The party has failed to deliver goods as agreed. ".repeat(10);
        let wrapped = wrap_line(sentence.trim(), options.usable_width(), options.font_size_pt);
        assert!(wrapped.len() > 1);
        for line in &wrapped {
            assert!(text_width_mm(line, options.font_size_pt) <= options.usable_width());
        }
        assert_eq!(wrapped.join(" "), sentence.trim());
    }

    #[test]
    fn test_overlong_word_is_broken() {
        let options = LayoutOptions::default();
        let word = "W".repeat(200);
        let wrapped = wrap_line(&word, options.usable_width(), options.font_size_pt);
        assert!(wrapped.len() > 1);
        assert_eq!(wrapped.concat(), word);
    }

    #[test]
    fn test_text_width_uses_metrics() {
        assert!(text_width_mm("WWW", FONT_SIZE_PT) > text_width_mm("iii", FONT_SIZE_PT));
        assert_eq!(text_width_mm("", FONT_SIZE_PT), 0.0);
    }
}
