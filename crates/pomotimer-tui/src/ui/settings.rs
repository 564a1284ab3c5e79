use crate::app::App;
use pomotimer_core::models::SettingsField;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

pub fn draw_settings(f: &mut Frame, app: &App, area: Rect) {
    let items: Vec<ListItem> = SettingsField::ALL
        .iter()
        .enumerate()
        .map(|(i, &field)| {
            let is_selected = i == app.selected_setting_index;
            let style = if is_selected {
                Style::default().bg(Color::DarkGray)
            } else {
                Style::default()
            };

            let hint = match (is_selected, field.is_duration()) {
                (false, _) => "",
                (true, true) => "  <[h/l] to change, [Enter] to type>",
                (true, false) => "  <[h/l] or [Enter] to toggle>",
            };

            let line = Line::from(vec![
                Span::styled(
                    format!("{:<26}", field.label()),
                    Style::default().add_modifier(Modifier::BOLD),
                ),
                Span::raw(app.settings.display_value(field)),
                Span::styled(hint, Style::default().fg(Color::Gray)),
            ]);
            ListItem::new(line).style(style)
        })
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("⚙️ Settings"))
        .highlight_symbol("→ ");

    let mut state = ListState::default();
    state.select(Some(app.selected_setting_index));

    f.render_stateful_widget(list, area, &mut state);
}
