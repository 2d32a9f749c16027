use crate::{
    app::{App, AppScreen},
    chat_message::render_message,
    constants::APP_TITLE,
};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use unicode_width::UnicodeWidthStr;

const SEND_LABEL: &str = " Send ";

pub fn draw_chat(f: &mut Frame<'_>, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(1),    // Messages
            Constraint::Length(1), // Typing indicator
            Constraint::Length(3), // Input
        ])
        .split(area);

    if app.session.messages().is_empty() {
        draw_welcome(f, chunks[0], app);
    } else {
        draw_messages(f, chunks[0], app);
    }
    app.typing.render(f, chunks[1]);
    draw_input(f, chunks[2], app);
}

fn draw_welcome(f: &mut Frame<'_>, area: Rect, app: &App) {
    let source = if app.settings.settings().mode.is_mock() {
        "mock responses"
    } else {
        "Lambda integration"
    };

    let lines = vec![
        Line::from(""),
        Line::from(Span::styled(
            format!("Welcome to {}", APP_TITLE),
            Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(
            "Ask me anything about DevOps, CI/CD, infrastructure as code, or cloud services!",
        ),
        Line::from(""),
        Line::from(vec![
            Span::styled("Currently using ", Style::default().fg(Color::DarkGray)),
            Span::styled(source, Style::default().add_modifier(Modifier::BOLD)),
        ]),
        Line::from(Span::styled(
            "You can change this in Settings (Ctrl+S)",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let welcome = Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    f.render_widget(welcome, area);
}

fn draw_messages(f: &mut Frame<'_>, area: Rect, app: &App) {
    let mut lines = Vec::new();
    for message in app.session.messages() {
        if !lines.is_empty() {
            lines.push(Line::from(""));
        }
        lines.extend(render_message(message, area.width));
    }

    // `app.scroll` counts up from the newest line. Only the visible window is
    // handed to the paragraph, so history length is not bound by its u16 scroll.
    let height = area.height as usize;
    let max_scroll = lines.len().saturating_sub(height);
    let end = lines.len() - (app.scroll as usize).min(max_scroll);
    let start = end.saturating_sub(height);
    lines.truncate(end);
    lines.drain(..start);

    f.render_widget(Paragraph::new(lines), area);
}

fn draw_input(f: &mut Frame<'_>, area: Rect, app: &App) {
    let pending = app.session.is_pending();
    let can_send = app.session.can_send(&app.input);

    let border_style = if pending {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::LightYellow)
    };
    let send_style = if can_send {
        Style::default()
            .fg(Color::Black)
            .bg(Color::LightGreen)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style)
        .title(if pending { " Message (waiting) " } else { " Message " })
        .title_bottom(Line::from(Span::styled(SEND_LABEL, send_style)).right_aligned());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let (text, text_style) = if app.input.is_empty() {
        ("Type your message...", Style::default().fg(Color::DarkGray))
    } else {
        (app.input.as_str(), Style::default().fg(Color::White))
    };

    // Keep the end of a long draft visible.
    let visible_width = inner.width.saturating_sub(1);
    let input_width = u16::try_from(app.input.width()).unwrap_or(u16::MAX);
    let scroll_offset = input_width.saturating_sub(visible_width);

    f.render_widget(
        Paragraph::new(Span::styled(text, text_style)).scroll((0, scroll_offset)),
        inner,
    );

    if app.screen == AppScreen::Chat && !pending {
        f.set_cursor_position((inner.x + (input_width - scroll_offset), inner.y));
    }
}
