use ratatui::Frame;
use ratatui::layout::{Alignment, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use ratatui::widgets::{Block, BorderType, Clear, Paragraph};

use crate::core::state::App;
use crate::core::turn::FallbackOption;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{Header, InfoPanel, InputBox, Launcher, MessageList};
use crate::tui::layout::{
    CellMetrics, SEND_GLYPH, WindowLayout, hits, input_cols, launcher_rect,
};

/// Glyph drawn on the resize handle (top-left corner of the window).
const RESIZE_HANDLE_GLYPH: &str = "◤";

/// Lay out the open window for the current state.
///
/// The input box height depends on its width, so the layout is probed once
/// without it first.
pub fn window_layout(app: &App, metrics: CellMetrics, area: Rect) -> WindowLayout {
    let probe = WindowLayout::compute(area, app.geometry, metrics, None);
    let input_height = app
        .conversation_visible()
        .then(|| InputBox::calculate_height(&app.draft, input_cols(probe.body.width)));
    WindowLayout::compute(area, app.geometry, metrics, input_height)
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    let area = frame.area();

    if !app.open {
        tui.message_list.option_hits.clear();
        Launcher.render(frame, launcher_rect(area));
        return;
    }

    let layout = window_layout(app, tui.metrics, area);

    let border_style = if app.resize.is_active() {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::DarkGray)
    };
    frame.render_widget(Clear, layout.window);
    frame.render_widget(
        Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(border_style),
        layout.window,
    );
    frame.render_widget(
        Span::styled(
            RESIZE_HANDLE_GLYPH,
            Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD),
        ),
        layout.resize_handle,
    );

    Header {
        info_button: layout.info_button,
        close_button: layout.close_button,
        info_visible: app.info_visible,
    }
    .render(frame, layout.header);

    if app.info_visible {
        tui.message_list.option_hits.clear();
        InfoPanel::new(tui.info_scroll).render(frame, layout.body);
        return;
    }

    MessageList::new(&mut tui.message_list, &app.turns, app.loading, spinner_frame)
        .render(frame, layout.body);

    if let Some(input_area) = layout.input {
        tui.input_box.render(frame, input_area, &app.draft);
    }
    if let Some(send_area) = layout.send_button {
        render_send_button(frame, send_area, !app.draft.trim().is_empty());
    }
}

fn render_send_button(frame: &mut Frame, area: Rect, ready: bool) {
    let color = if ready { Color::Green } else { Color::DarkGray };
    let button = Paragraph::new(SEND_GLYPH)
        .alignment(Alignment::Center)
        .style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(color)),
        );
    frame.render_widget(button, area);
}

/// What a mouse press landed on.
#[derive(Debug, Clone, PartialEq)]
pub enum Hit {
    Launcher,
    ResizeHandle,
    InfoButton,
    CloseButton,
    SendButton,
    Option(FallbackOption),
}

/// Hit test a press at (`col`, `row`) against the last drawn frame.
pub fn hit_test(col: u16, row: u16, app: &App, tui: &TuiState, area: Rect) -> Option<Hit> {
    if !app.open {
        return hits(launcher_rect(area), col, row).then_some(Hit::Launcher);
    }

    let layout = window_layout(app, tui.metrics, area);
    if hits(layout.resize_handle, col, row) {
        return Some(Hit::ResizeHandle);
    }
    if hits(layout.close_button, col, row) {
        return Some(Hit::CloseButton);
    }
    if hits(layout.info_button, col, row) {
        return Some(Hit::InfoButton);
    }
    if layout.send_button.is_some_and(|rect| hits(rect, col, row)) {
        return Some(Hit::SendButton);
    }
    if app.conversation_visible() {
        return tui
            .message_list
            .option_at(col, row)
            .cloned()
            .map(Hit::Option);
    }
    None
}
