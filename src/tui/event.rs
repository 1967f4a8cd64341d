use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

/// TUI-specific input events
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TuiEvent {
    // Global
    ForceQuit, // Ctrl+C
    Escape,
    ToggleInfo, // F1
    Resize(u16, u16),

    // Input box
    Submit,  // Enter
    Newline, // Shift+Enter or Ctrl+J
    InputChar(char),
    Paste(String), // Bracketed paste - preserves newlines
    Backspace,
    Delete,
    CursorLeft,
    CursorRight,
    CursorHome,
    CursorEnd,

    // Conversation scrolling
    ScrollUp,
    ScrollDown,
    ScrollPageUp,
    ScrollPageDown,

    // Pointer (column, row)
    MouseDown(u16, u16),
    MouseDrag(u16, u16),
    MouseUp(u16, u16),
}

/// Poll for an event without blocking (returns immediately)
pub fn poll_event_immediate() -> std::io::Result<Option<TuiEvent>> {
    poll_event_timeout(Duration::ZERO)
}

/// Poll for an event, waiting at most `timeout`.
pub fn poll_event_timeout(timeout: Duration) -> std::io::Result<Option<TuiEvent>> {
    if !event::poll(timeout)? {
        return Ok(None);
    }
    Ok(translate(event::read()?))
}

fn translate(event: Event) -> Option<TuiEvent> {
    match event {
        Event::Key(key_event) => translate_key(key_event),
        Event::Mouse(mouse_event) => translate_mouse(mouse_event),
        Event::Paste(data) => Some(TuiEvent::Paste(data)),
        Event::Resize(width, height) => Some(TuiEvent::Resize(width, height)),
        _ => None,
    }
}

fn translate_key(key_event: KeyEvent) -> Option<TuiEvent> {
    // Keyboard enhancement reports releases too; only presses and repeats count.
    if key_event.kind == KeyEventKind::Release {
        return None;
    }
    log::debug!(
        "Key event: {:?} with modifiers {:?}",
        key_event.code,
        key_event.modifiers
    );

    let modifiers = key_event.modifiers;
    match key_event.code {
        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => {
            Some(TuiEvent::ForceQuit)
        }
        // Ctrl+J inserts newline (ASCII LF; some terminals send it for Ctrl+Enter)
        KeyCode::Char('j') if modifiers.contains(KeyModifiers::CONTROL) => {
            Some(TuiEvent::Newline)
        }
        KeyCode::Enter if modifiers.contains(KeyModifiers::SHIFT) => Some(TuiEvent::Newline),
        KeyCode::Enter => Some(TuiEvent::Submit),
        KeyCode::Char(c) if !modifiers.contains(KeyModifiers::CONTROL) => {
            Some(TuiEvent::InputChar(c))
        }
        KeyCode::Backspace => Some(TuiEvent::Backspace),
        KeyCode::Delete => Some(TuiEvent::Delete),
        KeyCode::Left => Some(TuiEvent::CursorLeft),
        KeyCode::Right => Some(TuiEvent::CursorRight),
        KeyCode::Home => Some(TuiEvent::CursorHome),
        KeyCode::End => Some(TuiEvent::CursorEnd),
        KeyCode::Up => Some(TuiEvent::ScrollUp),
        KeyCode::Down => Some(TuiEvent::ScrollDown),
        KeyCode::PageUp => Some(TuiEvent::ScrollPageUp),
        KeyCode::PageDown => Some(TuiEvent::ScrollPageDown),
        KeyCode::F(1) => Some(TuiEvent::ToggleInfo),
        KeyCode::Esc => Some(TuiEvent::Escape),
        _ => None,
    }
}

fn translate_mouse(mouse_event: MouseEvent) -> Option<TuiEvent> {
    let (col, row) = (mouse_event.column, mouse_event.row);
    match mouse_event.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(TuiEvent::MouseDown(col, row)),
        MouseEventKind::Drag(MouseButton::Left) => Some(TuiEvent::MouseDrag(col, row)),
        MouseEventKind::Up(MouseButton::Left) => Some(TuiEvent::MouseUp(col, row)),
        MouseEventKind::ScrollUp => Some(TuiEvent::ScrollUp),
        MouseEventKind::ScrollDown => Some(TuiEvent::ScrollDown),
        _ => None,
    }
}
