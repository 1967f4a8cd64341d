use ratatui::buffer::Buffer;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget, Wrap};

use crate::core::turn::{Author, Turn};

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// Share of the conversation width a bubble may take, in percent.
const MAX_BUBBLE_PERCENT: u16 = 80;

pub const BOT_TITLE: &str = "MILO";
pub const USER_TITLE: &str = "tu";

/// Wrapping options matching `Paragraph`'s `Wrap { trim: true }`.
fn wrap_options(width: u16) -> textwrap::Options<'static> {
    textwrap::Options::new(width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
}

fn wrapped_lines(text: &str, width: u16) -> u16 {
    let text = text.trim();
    if text.is_empty() || width == 0 {
        return 1;
    }
    (textwrap::wrap(text, wrap_options(width)).len() as u16).max(1)
}

/// Text of a quick-reply button.
pub fn option_button_text(label: &str) -> String {
    format!("[ {label} ]")
}

/// A single chat bubble: one turn plus its quick-reply buttons.
///
/// Transient: built every frame from a borrowed `Turn`. The parent decides
/// where the bubble goes; [`Bubble::width`] and [`Bubble::calculate_height`]
/// let it do so without rendering.
#[derive(Clone, Copy)]
pub struct Bubble<'a> {
    pub turn: &'a Turn,
}

impl<'a> Bubble<'a> {
    pub fn new(turn: &'a Turn) -> Self {
        Self { turn }
    }

    /// Bubble width for a conversation `content_width` wide.
    ///
    /// Short messages hug their text; long ones stop at the max share.
    pub fn width(turn: &Turn, content_width: u16) -> u16 {
        let share = u32::from(content_width) * u32::from(MAX_BUBBLE_PERCENT) / 100;
        let max = (share as u16).max(HORIZONTAL_OVERHEAD + 1);
        let text_width = turn
            .text
            .trim()
            .lines()
            .map(|line| unicode_width::UnicodeWidthStr::width(line) as u16)
            .max()
            .unwrap_or(0);
        let options_width = turn
            .options
            .iter()
            .map(|o| unicode_width::UnicodeWidthStr::width(option_button_text(&o.label).as_str()) as u16)
            .max()
            .unwrap_or(0);
        let title_width = match turn.author {
            Author::Bot => BOT_TITLE.len() as u16,
            Author::User => USER_TITLE.len() as u16,
        };

        (text_width.max(options_width).max(title_width) + HORIZONTAL_OVERHEAD)
            .min(max)
            .min(content_width)
    }

    /// Rows needed for a bubble `width` wide.
    pub fn calculate_height(turn: &Turn, width: u16) -> u16 {
        let inner = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if inner == 0 {
            return 1;
        }
        wrapped_lines(&turn.text, inner) + turn.options.len() as u16 + VERTICAL_OVERHEAD
    }

    /// Rects of the option buttons, relative to the bubble's own `area`.
    pub fn option_rects(turn: &Turn, area: Rect) -> Vec<Rect> {
        let inner_width = area.width.saturating_sub(HORIZONTAL_OVERHEAD);
        if inner_width == 0 {
            return Vec::new();
        }
        let first_row = area.y + 1 + wrapped_lines(&turn.text, inner_width);
        turn.options
            .iter()
            .enumerate()
            .map(|(i, option)| {
                let text_width =
                    unicode_width::UnicodeWidthStr::width(option_button_text(&option.label).as_str())
                        as u16;
                Rect::new(
                    area.x + 1 + CONTENT_PAD_H,
                    first_row + i as u16,
                    text_width.min(inner_width),
                    1,
                )
            })
            .filter(|r| r.bottom() < area.bottom())
            .collect()
    }
}

impl<'a> Widget for Bubble<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (title, style, alignment) = match self.turn.author {
            Author::User => (USER_TITLE, Style::default().fg(Color::Green), Alignment::Right),
            Author::Bot => (BOT_TITLE, Style::default().fg(Color::Blue), Alignment::Left),
        };

        let block = Block::bordered()
            .title(title)
            .title_alignment(alignment)
            .border_type(BorderType::Rounded)
            .border_style(style.add_modifier(Modifier::DIM))
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner_area = block.inner(area);
        block.render(area, buf);

        let text_height = wrapped_lines(&self.turn.text, inner_area.width).min(inner_area.height);
        let text_area = Rect::new(inner_area.x, inner_area.y, inner_area.width, text_height);
        Paragraph::new(self.turn.text.trim())
            .style(style)
            .wrap(Wrap { trim: true })
            .render(text_area, buf);

        let button_style = Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD);
        for (option, rect) in self
            .turn
            .options
            .iter()
            .zip(Bubble::option_rects(self.turn, area))
        {
            Paragraph::new(option_button_text(&option.label))
                .style(button_style)
                .render(rect, buf);
        }
    }
}
