use pomotimer_core::models::Mode;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

pub fn mode_color(mode: Mode) -> Color {
    match mode {
        Mode::Work => Color::Red,
        Mode::ShortBreak => Color::Green,
        Mode::LongBreak => Color::Blue,
    }
}

/// Rect of the given size centered in `area`, shrunk to fit.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    let x = area.x + (area.width - width) / 2;
    let y = area.y + (area.height - height) / 2;
    Rect::new(x, y, width, height)
}

pub fn key_hint<'a>(key: &'a str, action: &'a str) -> Vec<Span<'a>> {
    vec![
        Span::styled(
            format!("[{}]", key),
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!("{} ", action)),
    ]
}

pub fn hint_line<'a>(hints: &[(&'a str, &'a str)]) -> Line<'a> {
    Line::from(
        hints
            .iter()
            .flat_map(|&(key, action)| key_hint(key, action))
            .collect::<Vec<_>>(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_centered_rect_fits_inside() {
        let area = Rect::new(10, 5, 40, 10);
        let rect = centered_rect(area, 20, 4);
        assert_eq!(rect, Rect::new(20, 8, 20, 4));

        let clipped = centered_rect(area, 100, 100);
        assert_eq!(clipped, area);
    }
}
