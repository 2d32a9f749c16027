use crate::{app::App, constants::APP_TITLE};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

pub fn draw_header(f: &mut Frame<'_>, area: Rect, app: &App) {
    let block = Block::default()
        .borders(Borders::BOTTOM)
        .border_style(Style::default().fg(Color::DarkGray));
    let inner = block.inner(area);
    f.render_widget(block, area);

    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(inner);

    let title = Paragraph::new(APP_TITLE)
        .style(
            Style::default()
                .fg(Color::LightCyan)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Left);
    f.render_widget(title, chunks[0]);

    let mode = format!("[{}]  ⚙ Settings (Ctrl+S)", app.settings.settings().mode);
    let toggle = Paragraph::new(mode)
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Right);
    f.render_widget(toggle, chunks[1]);
}
