use ratatui::prelude::*;
use ratatui::widgets::Widget;

/// Glyph height in rows
pub const GLYPH_HEIGHT: u16 = 5;
const SPACING: u16 = 1;

/// Clock digits drawn with block characters.
pub struct BigText<'a> {
    text: &'a str,
    style: Style,
}

impl<'a> BigText<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            style: Style::default(),
        }
    }

    pub fn style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Columns needed to draw the whole text.
    pub fn width(&self) -> u16 {
        let glyphs: u16 = self.text.chars().map(|ch| glyph(ch)[0].len() as u16).sum();
        let gaps = (self.text.chars().count() as u16).saturating_sub(1) * SPACING;
        glyphs + gaps
    }
}

impl Widget for BigText<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let area = area.intersection(buf.area);
        let mut x = area.left();

        for ch in self.text.chars() {
            let rows = glyph(ch);
            let width = rows[0].len() as u16;
            if x + width > area.right() {
                break;
            }

            for (dy, row) in rows.iter().enumerate().take(area.height as usize) {
                for (dx, pixel) in row.bytes().enumerate() {
                    if pixel != b'#' {
                        continue;
                    }
                    if let Some(cell) = buf.cell_mut((x + dx as u16, area.top() + dy as u16)) {
                        cell.set_style(self.style).set_symbol("█");
                    }
                }
            }
            x += width + SPACING;
        }
    }
}

fn glyph(ch: char) -> [&'static str; GLYPH_HEIGHT as usize] {
    match ch {
        '0' => ["###", "# #", "# #", "# #", "###"],
        '1' => [" # ", "## ", " # ", " # ", "###"],
        '2' => ["###", "  #", "###", "#  ", "###"],
        '3' => ["###", "  #", "###", "  #", "###"],
        '4' => ["# #", "# #", "###", "  #", "  #"],
        '5' => ["###", "#  ", "###", "  #", "###"],
        '6' => ["###", "#  ", "###", "# #", "###"],
        '7' => ["###", "  #", "  #", "  #", "  #"],
        '8' => ["###", "# #", "###", "# #", "###"],
        '9' => ["###", "# #", "###", "  #", "###"],
        ':' => [" ", "#", " ", "#", " "],
        _ => ["   ", "   ", "   ", "   ", "   "],
    }
}
