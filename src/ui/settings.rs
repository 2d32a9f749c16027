use crate::app::{App, SettingsField};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Settings panel: response source toggle, Lambda URL and current status.
pub fn draw_settings(f: &mut Frame<'_>, area: Rect, app: &App) {
    let settings = app.settings.settings();
    let use_mock = settings.mode.is_mock();

    let label = |field: SettingsField, text: &'static str| {
        let style = if app.settings_focus == field {
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(Color::White)
        };
        let marker = if app.settings_focus == field { "▶ " } else { "  " };
        Span::styled(format!("{}{}", marker, text), style)
    };
    let toggle = |active: bool, text: &'static str| {
        if active {
            Span::styled(
                format!("[{}]", text),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::LightGreen)
                    .add_modifier(Modifier::BOLD),
            )
        } else {
            Span::styled(format!(" {} ", text), Style::default().fg(Color::DarkGray))
        }
    };

    let url_style = if use_mock {
        Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM)
    } else {
        Style::default().fg(Color::White)
    };
    let url_text = if settings.remote_url.is_empty() {
        Span::styled("https://your-api-gateway-url", Style::default().fg(Color::DarkGray))
    } else {
        Span::styled(settings.remote_url.clone(), url_style)
    };

    let lines = vec![
        Line::from(""),
        Line::from(vec![
            label(SettingsField::Mode, "Use Mock Responses: "),
            toggle(use_mock, "On"),
            Span::raw(" "),
            toggle(!use_mock, "Off"),
        ]),
        Line::from(""),
        Line::from(label(SettingsField::RemoteUrl, "Lambda API URL:")),
        Line::from(vec![Span::raw("    "), url_text]),
        Line::from(""),
        Line::from(vec![
            Span::raw("  Status: "),
            Span::styled(
                settings.status_line(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]),
    ];

    let panel = Paragraph::new(lines).block(
        Block::default()
            .borders(Borders::ALL)
            .title(" Settings ")
            .style(Style::default().bg(Color::Black)),
    );
    f.render_widget(panel, area);
}
