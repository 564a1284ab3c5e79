use super::big_text::{BigText, GLYPH_HEIGHT};
use super::helpers::{centered_rect, mode_color};
use crate::app::App;
use pomotimer_core::models::Mode;
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

pub fn draw_timer(f: &mut Frame, app: &App, area: Rect) {
    let display = &app.display;
    let color = mode_color(display.mode);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" 🍅 Timer ")
        .border_style(Style::default().fg(color));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2),
            Constraint::Length(GLYPH_HEIGHT + 2),
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Min(0),
        ])
        .split(inner);

    draw_mode_selector(f, display.mode, chunks[0]);

    let clock = BigText::new(&display.time).style(Style::default().fg(color));
    let clock_area = centered_rect(chunks[1], clock.width(), GLYPH_HEIGHT);
    f.render_widget(clock, clock_area);

    let state = if display.is_running { "▶" } else { "⏸" };
    let label = Paragraph::new(Line::from(vec![
        Span::styled(
            format!("{} {}", state, display.label),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            format!("  •  Session #{}", display.session_number),
            Style::default().fg(Color::Gray),
        ),
    ]))
    .alignment(Alignment::Center);
    f.render_widget(label, chunks[2]);

    let gauge = Gauge::default()
        .block(Block::default().borders(Borders::ALL).title("Progress"))
        .gauge_style(Style::default().fg(color).bg(Color::Black))
        .ratio(display.progress.clamp(0.0, 1.0))
        .label(format!("{:.0}%", display.progress * 100.0));
    f.render_widget(gauge, centered_rect(chunks[3], 60, 3));

    draw_stats(f, app, chunks[4]);
}

fn draw_mode_selector(f: &mut Frame, active: Mode, area: Rect) {
    let mut spans = Vec::new();
    for (i, mode) in Mode::ALL.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        let style = if *mode == active {
            Style::default()
                .fg(Color::Black)
                .bg(mode_color(*mode))
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::Gray)
        };
        spans.push(Span::styled(
            format!(" [{}] {} ", i + 1, mode.short_name()),
            style,
        ));
    }

    let selector = Paragraph::new(Line::from(spans)).alignment(Alignment::Center);
    f.render_widget(selector, area);
}

fn draw_stats(f: &mut Frame, app: &App, area: Rect) {
    let display = &app.display;
    let label_style = Style::default().fg(Color::Gray);
    let value_style = Style::default()
        .fg(Color::White)
        .add_modifier(Modifier::BOLD);

    let stats = Line::from(vec![
        Span::styled("Completed ", label_style),
        Span::styled(display.completed_sessions.to_string(), value_style),
        Span::raw("   "),
        Span::styled("Focus ", label_style),
        Span::styled(display.total_focus.clone(), value_style),
        Span::raw("   "),
        Span::styled("Streak ", label_style),
        Span::styled(format!("{} 🔥", display.current_streak), value_style),
    ]);

    let paragraph = Paragraph::new(vec![Line::from(""), stats])
        .alignment(Alignment::Center)
        .block(Block::default().title(Line::from(" Today ").centered()));
    f.render_widget(paragraph, area);
}
