//! # Header Component
//!
//! Top row of the chat window: title on the left, info and close buttons
//! on the right. Button positions come from `WindowLayout` so that clicks
//! and drawing always agree.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;

use crate::tui::component::Component;
use crate::tui::layout::{CLOSE_BUTTON, INFO_BUTTON};

pub const TITLE: &str = "MILO Chatbot";

/// Stateless header; all fields are props.
pub struct Header {
    pub info_button: Rect,
    pub close_button: Rect,
    /// Highlights the info button while the help panel is shown.
    pub info_visible: bool,
}

impl Component for Header {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let title_style = Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD);
        frame.render_widget(Span::styled(format!(" {TITLE}"), title_style), area);

        let info_style = if self.info_visible {
            Style::default().fg(Color::Black).bg(Color::Cyan)
        } else {
            Style::default().fg(Color::Cyan)
        };
        frame.render_widget(Span::styled(INFO_BUTTON, info_style), self.info_button);
        frame.render_widget(
            Span::styled(CLOSE_BUTTON, Style::default().fg(Color::Cyan)),
            self.close_button,
        );
    }
}
