use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::Paragraph,
    Frame,
};

const TYPING_FRAMES: [&str; 4] = ["●○○", "○●○", "○○●", "○●○"];

/// Typing dots shown while a reply is pending.
#[derive(Debug, Default)]
pub struct StatusIndicator {
    thinking: bool,
    spinner_idx: usize,
}

impl StatusIndicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_thinking(&mut self, thinking: bool) {
        if !thinking {
            self.spinner_idx = 0;
        }
        self.thinking = thinking;
    }

    pub fn is_thinking(&self) -> bool {
        self.thinking
    }

    pub fn update_spinner(&mut self) {
        if self.thinking {
            self.spinner_idx = self.spinner_idx.wrapping_add(1);
        }
    }

    pub fn frame(&self) -> &'static str {
        TYPING_FRAMES[self.spinner_idx % TYPING_FRAMES.len()]
    }

    pub fn render(&self, frame: &mut Frame, area: Rect) {
        if !self.thinking {
            return;
        }

        let status = Line::from(vec![
            Span::styled(self.frame(), Style::default().fg(Color::Rgb(144, 238, 144))),
            Span::raw(" "),
            Span::styled("Assistant is typing...", Style::default().fg(Color::DarkGray)),
        ]);

        frame.render_widget(Paragraph::new(status), area);
    }
}
