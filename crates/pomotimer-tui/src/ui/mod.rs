mod big_text;
mod helpers;
mod input;
mod settings;
mod timer;

use crate::app::{App, AppView, InputMode};
use helpers::{centered_rect, hint_line};
use input::draw_input_modal;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};
use settings::draw_settings;
use timer::draw_timer;

pub fn draw(f: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(0),
            Constraint::Length(3),
        ])
        .split(f.area());

    draw_title_bar(f, app, chunks[0]);

    match app.current_view {
        AppView::Timer => draw_timer(f, app, chunks[1]),
        AppView::Settings => draw_settings(f, app, chunks[1]),
    }

    draw_status_bar(f, app, chunks[2]);

    if app.show_help {
        draw_help_modal(f);
    }

    if let InputMode::EditSetting(_) = app.input_mode {
        draw_input_modal(f, app);
    }
}

fn draw_title_bar(f: &mut Frame, app: &App, area: Rect) {
    let tabs = [("⏱️", "Timer", AppView::Timer), ("⚙️", "Settings", AppView::Settings)];

    let mut spans = vec![Span::styled(
        "🍅 Pomotimer │ ",
        Style::default()
            .fg(Color::Red)
            .add_modifier(Modifier::BOLD),
    )];

    for (icon, name, view) in tabs {
        let style = if view == app.current_view {
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(format!(" {}{} ", icon, name), style));
        spans.push(Span::raw(" "));
    }

    spans.push(Span::raw("│ [Tab]Switch [?]Help [q]Quit"));

    let title = Paragraph::new(Line::from(spans))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::ALL));

    f.render_widget(title, area);
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let content = if !app.status_message.is_empty() && app.input_mode == InputMode::Normal {
        Line::from(Span::styled(
            format!(" {} ", app.status_message),
            Style::default().fg(Color::Black).bg(Color::Yellow),
        ))
    } else {
        match app.current_view {
            AppView::Timer => hint_line(&[
                ("Space", "Start/Pause"),
                ("r", "Reset"),
                ("s", "Skip"),
                ("1-3", "Mode"),
            ]),
            AppView::Settings => hint_line(&[
                ("j/k", "Select"),
                ("h/l", "Change"),
                ("Enter", "Edit"),
                ("Space", "Start/Pause"),
            ]),
        }
    };

    let status = Paragraph::new(content).block(Block::default().borders(Borders::ALL));
    f.render_widget(status, area);
}

fn draw_help_modal(f: &mut Frame) {
    let area = f.area();
    let modal_area = centered_rect(area, 56, 22);

    f.render_widget(Clear, modal_area);

    let heading = |text: &'static str| {
        Line::from(Span::styled(
            text,
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        ))
    };

    let help_text = vec![
        Line::from(Span::styled(
            "  🍅 Pomotimer - Keyboard Shortcuts",
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        heading("  TIMER"),
        Line::from("    [Space]      Start / pause"),
        Line::from("    [r]          Reset current session"),
        Line::from("    [s]          Skip to next session"),
        Line::from("    [1]          Focus"),
        Line::from("    [2]          Short break"),
        Line::from("    [3]          Long break"),
        Line::from(""),
        heading("  SETTINGS"),
        Line::from("    [j/k]        Select setting"),
        Line::from("    [h/l]        Decrease / increase, toggle"),
        Line::from("    [Enter]      Type a duration, toggle"),
        Line::from(""),
        heading("  GENERAL"),
        Line::from("    [Tab]        Switch view"),
        Line::from("    [?]          This help"),
        Line::from("    [q] [Esc]    Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "  Press any key to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let help = Paragraph::new(help_text).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Help ")
            .border_style(Style::default().fg(Color::Cyan)),
    );

    f.render_widget(help, modal_area);
}
