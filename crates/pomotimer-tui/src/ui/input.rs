use super::helpers::centered_rect;
use crate::app::App;
use ratatui::{
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

pub fn draw_input_modal(f: &mut Frame, app: &App) {
    let modal_area = centered_rect(f.area(), 60, 3);
    f.render_widget(Clear, modal_area);

    let title = if app.status_message.is_empty() {
        "Minutes"
    } else {
        &app.status_message
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title)
        .title_bottom("[Enter] Save  [Esc] Cancel")
        .border_style(Style::default().fg(Color::Cyan));

    let input = Paragraph::new(app.input_buffer.as_str()).block(block);
    f.render_widget(input, modal_area);

    // Keep the cursor inside the borders
    let cursor_x = (modal_area.x + 1 + app.input_buffer.chars().count() as u16)
        .min(modal_area.right().saturating_sub(2));
    f.set_cursor_position((cursor_x, modal_area.y + 1));
}
