//! Soft-wrapped view of the draft, shared by height calculation, cursor
//! placement and rendering so all three agree on line breaks.

use unicode_width::UnicodeWidthStr;

/// Columns taken by the rounded border and one cell of padding per side.
pub(super) const CHROME_COLS: u16 = 4;
/// Rows taken by the top and bottom border.
pub(super) const CHROME_ROWS: u16 = 2;
/// Text origin relative to the box's top-left corner.
pub(super) const TEXT_ORIGIN: (u16, u16) = (2, 1);
/// Lines shown before the box scrolls internally.
pub(super) const VISIBLE_LINES: u16 = 5;

/// Text columns available inside a box `box_width` cells wide.
pub(super) fn text_cols(box_width: u16) -> u16 {
    box_width.saturating_sub(CHROME_COLS)
}

fn options(cols: u16) -> textwrap::Options<'static> {
    textwrap::Options::new(usize::from(cols.max(1)))
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace)
}

/// `text` broken into display lines `cols` wide.
pub(super) struct Wrapped {
    pub lines: Vec<String>,
}

impl Wrapped {
    pub fn new(text: &str, cols: u16) -> Self {
        let mut lines: Vec<String> = textwrap::wrap(text, options(cols))
            .into_iter()
            .map(|line| line.into_owned())
            .collect();
        // textwrap drops the empty line after a trailing newline
        if lines.is_empty() || (text.ends_with('\n') && lines.last().is_some_and(|l| !l.is_empty())) {
            lines.push(String::new());
        }
        Self { lines }
    }

    pub fn height(&self) -> u16 {
        u16::try_from(self.lines.len()).unwrap_or(u16::MAX)
    }

    /// Line and display column where the end of `before` lands.
    ///
    /// Columns are counted in cells from the logical line start because
    /// textwrap trims the spaces it breaks on.
    pub fn end_position(before: &str, cols: u16) -> (u16, u16) {
        let row = Self::new(before, cols).height() - 1;
        if before.ends_with('\n') {
            return (row, 0);
        }
        let logical = &before[before.rfind('\n').map_or(0, |i| i + 1)..];
        let segments = Self::new(logical, cols).lines;
        let consumed: usize = segments[..segments.len() - 1]
            .iter()
            .map(|s| s.width())
            .sum();
        let col = logical.width().saturating_sub(consumed);
        let col = u16::try_from(col).unwrap_or(u16::MAX);
        (row, col.min(cols.saturating_sub(1)))
    }
}

/// Byte offset of the char ending at `pos`.
pub(super) fn char_before(text: &str, pos: usize) -> usize {
    text[..pos]
        .chars()
        .next_back()
        .map_or(0, |c| pos - c.len_utf8())
}

/// Byte offset just past the char starting at `pos`.
pub(super) fn char_after(text: &str, pos: usize) -> usize {
    text[pos..]
        .chars()
        .next()
        .map_or(text.len(), |c| pos + c.len_utf8())
}
