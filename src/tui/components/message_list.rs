//! # MessageList Component
//!
//! Scrollable view of the conversation.
//!
//! ## Responsibilities
//!
//! - Show the welcome line while there are no turns
//! - Lay out bubbles (user right, bot left) in a `ScrollView`
//! - Show a typing indicator while a request is outstanding
//! - Stick to the newest turn unless the user scrolled up
//! - Record where quick-reply buttons landed on screen for click handling
//!
//! ## Architecture
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent state) and the turns (props).

use ratatui::Frame;
use ratatui::layout::{Alignment, Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::turn::{Author, FallbackOption, Turn};
use crate::tui::component::Component;
use crate::tui::components::message::{BOT_TITLE, Bubble};
use crate::tui::event::TuiEvent;

pub const WELCOME_TEXT: &str = "Bun venit! Scrie ceva pentru a începe conversația.";

/// Rows taken by the typing indicator bubble.
const TYPING_HEIGHT: u16 = 3;
const TYPING_WIDTH: u16 = 9;

/// A quick-reply button as last drawn on screen.
#[derive(Debug, Clone, PartialEq)]
pub struct OptionHit {
    pub rect: Rect,
    pub option: FallbackOption,
}

/// Scroll state and click targets for the message list.
/// Must be persisted in the parent TuiState.
pub struct MessageListState {
    pub scroll_state: ScrollViewState,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    /// Last known viewport height (for re-pinning between frames)
    pub viewport_height: u16,
    /// Last rendered content height
    pub content_height: u16,
    /// Visible quick-reply buttons from the last frame, in screen cells
    pub option_hits: Vec<OptionHit>,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            stick_to_bottom: true, // Start attached to bottom
            viewport_height: 0,
            content_height: 0,
            option_hits: Vec::new(),
        }
    }

    /// Apply a scroll event. Returns `true` if the event was a scroll.
    pub fn handle_scroll(&mut self, event: &TuiEvent) -> bool {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            _ => return false,
        }
        true
    }

    /// Re-engage auto-scroll once the user is back at the bottom.
    fn repin_if_at_bottom(&mut self) {
        let max_y = self.content_height.saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Quick-reply button under the given cell, if any.
    pub fn option_at(&self, col: u16, row: u16) -> Option<&FallbackOption> {
        self.option_hits
            .iter()
            .find(|hit| hit.rect.contains(Position::new(col, row)))
            .map(|hit| &hit.option)
    }
}

/// Scrollable conversation view component.
/// Created fresh each frame with references to state and data.
pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub turns: &'a [Turn],
    pub loading: bool,
    pub spinner_frame: usize,
}

impl<'a> MessageList<'a> {
    pub fn new(
        state: &'a mut MessageListState,
        turns: &'a [Turn],
        loading: bool,
        spinner_frame: usize,
    ) -> Self {
        Self {
            state,
            turns,
            loading,
            spinner_frame,
        }
    }

    fn typing_dots(&self) -> &'static str {
        match self.spinner_frame % 3 {
            0 => ".",
            1 => "..",
            _ => "...",
        }
    }
}

impl<'a> Component for MessageList<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        self.state.option_hits.clear();
        self.state.viewport_height = area.height;

        if self.turns.is_empty() && !self.loading {
            self.state.content_height = 0;
            let welcome = Paragraph::new(WELCOME_TEXT)
                .alignment(Alignment::Center)
                .style(Style::default().fg(Color::DarkGray))
                .wrap(ratatui::widgets::Wrap { trim: true });
            let top = area.height / 3;
            let welcome_area = Rect::new(area.x, area.y + top, area.width, area.height - top);
            frame.render_widget(welcome, welcome_area);
            return;
        }

        let content_width = area.width.saturating_sub(1); // -1 for scrollbar

        // 1. Place every bubble on the canvas
        let mut placements: Vec<Rect> = Vec::with_capacity(self.turns.len());
        let mut y: u16 = 0;
        for turn in self.turns {
            let width = Bubble::width(turn, content_width);
            let height = Bubble::calculate_height(turn, width);
            let x = match turn.author {
                Author::User => content_width.saturating_sub(width),
                Author::Bot => 0,
            };
            placements.push(Rect::new(x, y, width, height));
            y = y.saturating_add(height);
        }
        let typing_rect = self.loading.then(|| {
            Rect::new(0, y, TYPING_WIDTH.min(content_width), TYPING_HEIGHT)
        });
        let total_height = y.saturating_add(typing_rect.map_or(0, |r| r.height));
        self.state.content_height = total_height;

        // 2. Render into a ScrollView
        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        for (turn, rect) in self.turns.iter().zip(&placements) {
            scroll_view.render_widget(Bubble::new(turn), *rect);
        }

        if let Some(rect) = typing_rect {
            let indicator = Paragraph::new(self.typing_dots())
                .style(Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD))
                .block(
                    Block::bordered()
                        .title(BOT_TITLE)
                        .border_type(BorderType::Rounded)
                        .border_style(Style::default().fg(Color::Blue).add_modifier(Modifier::DIM)),
                );
            scroll_view.render_widget(indicator, rect);
        }

        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);

        // 3. Record visible option buttons in screen coordinates
        let offset = self.state.scroll_state.offset().y;
        for (turn, rect) in self.turns.iter().zip(&placements) {
            if !turn.has_options() {
                continue;
            }
            for (option, button) in turn.options.iter().zip(Bubble::option_rects(turn, *rect)) {
                if button.y < offset || button.y - offset >= area.height {
                    continue;
                }
                self.state.option_hits.push(OptionHit {
                    rect: Rect::new(
                        area.x + button.x,
                        area.y + (button.y - offset),
                        button.width,
                        1,
                    ),
                    option: option.clone(),
                });
            }
        }
    }
}
