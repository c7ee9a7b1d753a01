use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::layout::{CellKind, Column};

pub struct TextMetrics {
    pub char_width: f64,
    pub line_height: f64,
    pub padding_x: f64,
    pub avatar_size: f64,
    pub header_height: f64,
    pub gutter_width: f64,
    pub min_column_width: f64,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            char_width: 7.0,
            line_height: 14.0,
            padding_x: 8.0,
            avatar_size: 32.0,
            header_height: 64.0,
            gutter_width: 56.0,
            min_column_width: 250.0,
        }
    }
}

impl TextMetrics {
    pub fn text_width(&self, text: &str) -> f64 {
        let width = UnicodeWidthStr::width(text);
        width as f64 * self.char_width
    }

    /// Cut `text` so it fits in `max_width`, marking the cut with an ellipsis.
    pub fn truncate(&self, text: &str, max_width: f64) -> String {
        if self.text_width(text) <= max_width {
            return text.to_string();
        }

        let budget = ((max_width / self.char_width).floor() as usize).saturating_sub(1);
        let mut used = 0;
        let mut out = String::new();
        for c in text.chars() {
            let w = c.width().unwrap_or(0);
            if used + w > budget {
                break;
            }
            used += w;
            out.push(c);
        }
        out.push('…');
        out
    }

    /// Width a column needs for its header and event text.
    pub fn column_width(&self, column: &Column) -> f64 {
        let header = self.avatar_size
            + self.padding_x * 3.0
            + self.text_width(&column.resource.name);

        let events = column
            .cells
            .iter()
            .filter_map(|c| match &c.kind {
                CellKind::Event { display, .. } => Some(
                    self.text_width(&display.title)
                        .max(self.text_width(&display.category))
                        + self.padding_x * 2.0,
                ),
                _ => None,
            })
            .fold(0.0, f64::max);

        header.max(events).max(self.min_column_width)
    }
}
