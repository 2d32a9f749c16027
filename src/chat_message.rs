use crate::models::{Message, Role};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};
use textwrap::wrap;

const USER_COLOR: Color = Color::Rgb(255, 223, 128);
const ASSISTANT_COLOR: Color = Color::Rgb(144, 238, 144);
const CODE_COLOR: Color = Color::Rgb(209, 154, 102);

/// Renders one message as a bubble of lines fitting in `width` columns.
pub fn render_message(message: &Message, width: u16) -> Vec<Line<'static>> {
    let style = base_style(message);
    let indent = if message.role() == Role::User { "  " } else { "" };
    let mut lines = Vec::new();

    render_header(&mut lines, message, style, indent);
    render_content(&mut lines, message.content(), width, style, indent);
    lines.push(Line::from(vec![
        Span::styled(indent.to_string(), style),
        Span::styled("╰─".to_string(), style),
    ]));

    lines
}

fn base_style(message: &Message) -> Style {
    if message.is_error() {
        return Style::default().fg(Color::Red);
    }
    match message.role() {
        Role::User => Style::default().fg(USER_COLOR),
        Role::Assistant => Style::default().fg(ASSISTANT_COLOR),
    }
}

fn render_header(lines: &mut Vec<Line<'static>>, message: &Message, style: Style, indent: &str) {
    let who = match message.role() {
        Role::User => "You",
        Role::Assistant => "Assistant",
    };
    let icon = if message.is_error() { "✗" } else { "●" };
    let timestamp = message.timestamp().format("%H:%M:%S").to_string();

    lines.push(Line::from(vec![
        Span::styled(indent.to_string(), style),
        Span::styled("┌─".to_string(), style),
        Span::styled(who.to_string(), style.add_modifier(Modifier::BOLD)),
        Span::styled(" ".to_string(), style),
        Span::styled(timestamp, style.add_modifier(Modifier::DIM)),
        Span::styled(format!(" {}", icon), style),
    ]));
}

fn render_content(
    lines: &mut Vec<Line<'static>>,
    content: &str,
    width: u16,
    style: Style,
    indent: &str,
) {
    let mut in_code_block = false;
    let mut code_buffer = String::new();
    let mut text_buffer = String::new();

    for line in content.lines() {
        if line.trim().starts_with("```") {
            flush_text(lines, &text_buffer, width, style, indent);
            flush_code(lines, &code_buffer, style, indent);
            text_buffer.clear();
            code_buffer.clear();
            in_code_block = !in_code_block;
            continue;
        }

        let buffer = if in_code_block {
            &mut code_buffer
        } else {
            &mut text_buffer
        };
        buffer.push_str(line);
        buffer.push('\n');
    }

    flush_text(lines, &text_buffer, width, style, indent);
    flush_code(lines, &code_buffer, style, indent);
}

fn flush_text(lines: &mut Vec<Line<'static>>, buffer: &str, width: u16, style: Style, indent: &str) {
    if buffer.is_empty() {
        return;
    }

    let wrap_width = (width as usize).saturating_sub(indent.len() + 2).max(1);
    for source_line in buffer.lines() {
        // Keep blank lines; the canned replies use them as paragraph breaks.
        if source_line.is_empty() {
            lines.push(Line::from(vec![
                Span::styled(indent.to_string(), style),
                Span::styled("│".to_string(), style),
            ]));
            continue;
        }
        for wrapped in wrap(source_line, wrap_width) {
            lines.push(Line::from(vec![
                Span::styled(indent.to_string(), style),
                Span::styled("│ ".to_string(), style),
                Span::styled(wrapped.into_owned(), style),
            ]));
        }
    }
}

fn flush_code(lines: &mut Vec<Line<'static>>, buffer: &str, style: Style, indent: &str) {
    if buffer.is_empty() {
        return;
    }

    let code_style = Style::default().fg(CODE_COLOR).add_modifier(Modifier::BOLD);
    for code_line in buffer.lines() {
        lines.push(Line::from(vec![
            Span::styled(indent.to_string(), style),
            Span::styled("│ ".to_string(), style),
            Span::styled("▎".to_string(), Style::default().fg(Color::DarkGray)),
            Span::styled(format!(" {}", code_line), code_style),
        ]));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(line: &Line) -> String {
        line.spans.iter().map(|span| span.content.as_ref()).collect()
    }

    #[test]
    fn test_long_content_wraps_to_width() {
        let message = Message::assistant("word ".repeat(40));
        let lines = render_message(&message, 30);

        // header + wrapped body + footer
        assert!(lines.len() > 3);
        for line in &lines[1..lines.len() - 1] {
            assert!(text_of(line).chars().count() <= 30);
        }
    }

    #[test]
    fn test_error_messages_are_red() {
        let message = Message::error("HTTP error! status: 500");
        let lines = render_message(&message, 80);
        assert!(lines
            .iter()
            .flat_map(|line| line.spans.iter())
            .filter(|span| span.content.contains("500"))
            .all(|span| span.style.fg == Some(Color::Red)));
        assert!(text_of(&lines[0]).contains('✗'));
    }

    #[test]
    fn test_blank_lines_and_code_blocks_survive() {
        let message = Message::assistant("Run this:\n\n```\nkubectl get pods\n```");
        let lines = render_message(&message, 80);
        let rendered: Vec<String> = lines.iter().map(text_of).collect();

        assert!(rendered.iter().any(|l| l == "│"));
        assert!(rendered.iter().any(|l| l.contains("▎ kubectl get pods")));
        assert!(!rendered.iter().any(|l| l.contains("```")));
    }

    #[test]
    fn test_user_messages_are_indented() {
        let lines = render_message(&Message::user("hi"), 80);
        assert!(text_of(&lines[0]).starts_with("  ┌─You"));
    }
}
