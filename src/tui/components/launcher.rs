//! # Launcher Component
//!
//! The floating toggle button shown while the chat window is closed.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::tui::component::Component;
use crate::tui::layout::LAUNCHER_LABEL;

pub struct Launcher;

impl Component for Launcher {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let button = Paragraph::new(LAUNCHER_LABEL).block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(Color::Cyan)),
        );
        frame.render_widget(button, area);
    }
}
