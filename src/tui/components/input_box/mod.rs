//! # InputBox Component
//!
//! Edits the widget's draft message.
//!
//! ## Responsibilities
//!
//! - Insert typed and pasted text at the cursor
//! - Handle editing (backspace, delete, cursor movement)
//! - Enter submits, Shift+Enter breaks the line
//! - Show a placeholder while the draft is empty
//!
//! ## State Management
//!
//! The draft itself lives in `App` (it is widget state, cleared by the
//! reducer on submit). The box only owns the cursor and its scroll offset,
//! and re-clamps the cursor whenever the draft changed underneath it.

mod wrapped;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};

use crate::tui::event::TuiEvent;

use wrapped::{CHROME_ROWS, TEXT_ORIGIN, VISIBLE_LINES, Wrapped, char_after, char_before, text_cols};

pub const PLACEHOLDER: &str = "Scrie un mesaj...";

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Enter pressed; the caller submits the current draft
    Submit,
    /// Draft text or cursor changed
    ContentChanged,
}

/// Cursor state for the draft editor.
pub struct InputBox {
    /// Cursor position as byte offset in the draft (0..=draft.len())
    cursor: usize,
    /// First visible wrapped line (0 when content fits)
    scroll_offset: u16,
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBox {
    pub fn new() -> Self {
        Self {
            cursor: 0,
            scroll_offset: 0,
        }
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Required height for `draft`, clamped to the visible-lines limit.
    pub fn calculate_height(draft: &str, content_width: u16) -> u16 {
        let cols = text_cols(content_width);
        let lines = if cols == 0 { 1 } else { Wrapped::new(draft, cols).height() };
        lines.min(VISIBLE_LINES) + CHROME_ROWS
    }

    /// Keep the cursor on a valid char boundary of `draft`.
    fn clamp(&mut self, draft: &str) {
        if self.cursor > draft.len() {
            self.cursor = draft.len();
            self.scroll_offset = 0;
        }
        while !draft.is_char_boundary(self.cursor) {
            self.cursor -= 1;
        }
    }

    pub fn handle_event(&mut self, event: &TuiEvent, draft: &mut String) -> Option<InputEvent> {
        self.clamp(draft);
        match event {
            TuiEvent::InputChar(c) => {
                draft.insert(self.cursor, *c);
                self.cursor += c.len_utf8();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Newline => {
                draft.insert(self.cursor, '\n');
                self.cursor += 1;
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                draft.insert_str(self.cursor, text);
                self.cursor += text.len();
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => (self.cursor > 0).then(|| {
                let prev = char_before(draft, self.cursor);
                draft.drain(prev..self.cursor);
                self.cursor = prev;
                InputEvent::ContentChanged
            }),
            TuiEvent::Delete => (self.cursor < draft.len()).then(|| {
                let next = char_after(draft, self.cursor);
                draft.drain(self.cursor..next);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorLeft => (self.cursor > 0).then(|| {
                self.cursor = char_before(draft, self.cursor);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorRight => (self.cursor < draft.len()).then(|| {
                self.cursor = char_after(draft, self.cursor);
                InputEvent::ContentChanged
            }),
            TuiEvent::CursorHome => {
                let line_start = draft[..self.cursor].rfind('\n').map_or(0, |i| i + 1);
                (self.cursor != line_start).then(|| {
                    self.cursor = line_start;
                    InputEvent::ContentChanged
                })
            }
            TuiEvent::CursorEnd => {
                let line_end = draft[self.cursor..]
                    .find('\n')
                    .map_or(draft.len(), |i| self.cursor + i);
                (self.cursor != line_end).then(|| {
                    self.cursor = line_end;
                    InputEvent::ContentChanged
                })
            }
            TuiEvent::Submit => Some(InputEvent::Submit),
            _ => None,
        }
    }

    fn update_scroll_offset(&mut self, cursor_line: u16) {
        if cursor_line < self.scroll_offset {
            self.scroll_offset = cursor_line;
        } else if cursor_line >= self.scroll_offset + VISIBLE_LINES {
            self.scroll_offset = cursor_line + 1 - VISIBLE_LINES;
        }
    }

    /// Render the box and place the terminal cursor.
    pub fn render(&mut self, frame: &mut Frame, area: Rect, draft: &str) {
        self.clamp(draft);
        let cols = text_cols(area.width);
        let (origin_x, origin_y) = (area.x + TEXT_ORIGIN.0, area.y + TEXT_ORIGIN.1);

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::Green).add_modifier(Modifier::DIM))
            .padding(Padding::horizontal(1));

        if draft.is_empty() || cols == 0 {
            self.scroll_offset = 0;
            let placeholder = Paragraph::new(if draft.is_empty() { PLACEHOLDER } else { "" })
                .block(block)
                .style(Style::default().fg(Color::DarkGray));
            frame.render_widget(placeholder, area);
            frame.set_cursor_position((origin_x, origin_y));
            return;
        }

        let (line, col) = Wrapped::end_position(&draft[..self.cursor], cols);
        let wrapped = Wrapped::new(draft, cols);
        if wrapped.height() <= VISIBLE_LINES {
            self.scroll_offset = 0;
        } else {
            self.update_scroll_offset(line);
        }

        let start = usize::from(self.scroll_offset).min(wrapped.lines.len());
        let end = (start + usize::from(VISIBLE_LINES)).min(wrapped.lines.len());
        let visible = wrapped.lines[start..end].join("\n");

        let input = Paragraph::new(visible)
            .block(block)
            .style(Style::default().fg(Color::Green));
        frame.render_widget(input, area);

        let visible_line = line.saturating_sub(self.scroll_offset);
        frame.set_cursor_position((origin_x + col, origin_y + visible_line));
    }
}
