use crate::app::{App, AppScreen};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

/// Draws the footer with dynamic instructions
pub fn draw_footer(f: &mut Frame<'_>, area: Rect, app: &App) {
    if let Some(notice) = app.notice.as_ref().or(app.storage_warning.as_ref()) {
        let footer = Paragraph::new(notice.as_str())
            .style(Style::default().fg(Color::Red))
            .alignment(Alignment::Center);
        f.render_widget(footer, area);
        return;
    }

    let instructions = match app.screen {
        AppScreen::Chat if app.session.is_pending() => {
            "Waiting for the assistant... PgUp/PgDn to scroll, Ctrl+C to quit."
        }
        AppScreen::Chat => "Enter to send, PgUp/PgDn to scroll, Ctrl+S for settings, Esc to quit.",
        AppScreen::Settings => "Tab to switch field, ←/→ or Space to toggle, type to edit the URL, Esc to close.",
        AppScreen::QuitConfirm => "Press 'y' to confirm quit or 'n' to cancel.",
        AppScreen::Quit => "",
    };

    let footer = Paragraph::new(instructions)
        .style(Style::default().fg(Color::LightCyan))
        .alignment(Alignment::Center);

    f.render_widget(footer, area);
}
