//! # TUI Adapter
//!
//! The ratatui-specific layer. Draws the widget and turns terminal events
//! into core `Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Loop
//!
//! - Terminal events are drained in batches, translated, and fed to
//!   `update()`. An `Effect::SendRequest` spawns a tokio task that posts the
//!   outcome back through an mpsc channel as another `Action`.
//! - Requests are never awaited on the loop thread, so typing, resizing and
//!   closing stay live while a reply is pending.
//! - While a request is pending the loop redraws every ~150ms to animate the
//!   typing indicator; otherwise it sleeps up to 500ms between events.

mod component;
pub mod components;
pub mod event;
pub mod layout;
pub mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
    KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
};
use crossterm::execute;
use ratatui::layout::Rect;

use crate::core::action::{Action, Effect, SubmitOrigin, update};
use crate::core::config::ResolvedConfig;
use crate::core::state::App;
use crate::oracle::{HttpOracle, Oracle};
use crate::tui::components::info_panel;
use crate::tui::components::{InputBox, InputEvent, MessageListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};
use crate::tui::layout::CellMetrics;
use crate::tui::ui::Hit;

/// TUI-specific presentation state (not part of core widget state)
pub struct TuiState {
    pub metrics: CellMetrics,
    pub message_list: MessageListState,
    pub input_box: InputBox,
    /// First visible row of the help panel
    pub info_scroll: u16,
}

impl TuiState {
    pub fn new(metrics: CellMetrics) -> Self {
        Self {
            metrics,
            message_list: MessageListState::new(),
            input_box: InputBox::new(),
            info_scroll: 0,
        }
    }
}

/// Enables mouse capture, bracketed paste and keyboard enhancement for as
/// long as it lives; restores the terminal on drop.
struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        // Keyboard enhancement lets Shift+Enter be told apart from Enter.
        // Terminals without support ignore the request.
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,
            SetCursorStyle::SteadyBlock,
            PushKeyboardEnhancementFlags(
                KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
                    | KeyboardEnhancementFlags::REPORT_EVENT_TYPES
            )
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, keyboard enhancement)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            PopKeyboardEnhancementFlags,
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide
        );
        info!("Terminal modes released");
    }
}

/// Keep going without `result`'s value, logging why it is missing.
fn ok_or_warn<T>(result: std::io::Result<T>, what: &str) -> Option<T> {
    result
        .inspect_err(|e| warn!("Failed to {}: {}", what, e))
        .ok()
}

/// Build the oracle described by the resolved config.
pub fn build_oracle(config: &ResolvedConfig) -> std::io::Result<Arc<dyn Oracle>> {
    let oracle = HttpOracle::new(config.endpoint.clone(), config.timeout)
        .map_err(std::io::Error::other)?;
    info!(
        "Oracle ready: endpoint={}, timeout={:?}",
        oracle.endpoint(),
        config.timeout
    );
    Ok(Arc::new(oracle))
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let oracle = build_oracle(&config)?;
    let metrics = CellMetrics::from_config(&config);

    let mut terminal = ratatui::init();
    // Without these modes the widget still works from the keyboard
    let _terminal_mode_guard = ok_or_warn(TerminalModeGuard::new(), "enable terminal modes");

    let size = terminal.size()?;
    let mut app = App::new(oracle, metrics.viewport(size.width, size.height));
    let mut tui = TuiState::new(metrics);

    // Channel for actions from request tasks
    let (tx, rx) = mpsc::channel();

    let start_time = Instant::now();
    let mut needs_redraw = true;
    let mut should_quit = false;

    while !should_quit {
        if app.loading {
            needs_redraw = true;
        }

        if needs_redraw {
            let spinner_frame = (start_time.elapsed().as_millis() / 300) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        let timeout = if app.loading {
            Duration::from_millis(150)
        } else {
            Duration::from_millis(500)
        };

        // Process first event + drain ALL pending events before next draw
        let mut pending = poll_event_timeout(timeout)?;
        while let Some(event) = pending {
            needs_redraw = true;
            let area = terminal.get_frame().area();
            if let Some(action) = handle_event(&mut app, &mut tui, event, area) {
                should_quit |= apply(&mut app, action, &tx);
            }
            pending = poll_event_immediate()?;
        }

        // Settled requests
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            should_quit |= apply(&mut app, action, &tx);
        }
    }

    drop(_terminal_mode_guard);
    ratatui::restore();
    info!("MILO shutting down");
    Ok(())
}

/// Run an action through the reducer and carry out its effect.
/// Returns `true` when the loop should exit.
fn apply(app: &mut App, action: Action, tx: &mpsc::Sender<Action>) -> bool {
    match update(app, action) {
        Effect::None => false,
        Effect::SendRequest(message) => {
            spawn_request(app.oracle.clone(), message, tx.clone());
            false
        }
        Effect::Quit => true,
    }
}

/// Translate one terminal event into at most one core action, handling
/// presentation-only events (editing, scrolling) in place.
fn handle_event(app: &mut App, tui: &mut TuiState, event: TuiEvent, area: Rect) -> Option<Action> {
    match event {
        TuiEvent::ForceQuit => return Some(Action::Quit),
        TuiEvent::Resize(width, height) => {
            return Some(Action::ViewportResized(tui.metrics.viewport(width, height)));
        }
        TuiEvent::MouseDown(col, row) => {
            return match ui::hit_test(col, row, app, tui, area)? {
                Hit::Launcher => Some(Action::Open),
                Hit::ResizeHandle => Some(Action::BeginResize(tui.metrics.pointer(col, row))),
                Hit::CloseButton => Some(Action::Close),
                Hit::SendButton => Some(Action::Submit {
                    text: app.draft.clone(),
                    origin: SubmitOrigin::Draft,
                }),
                Hit::InfoButton => {
                    tui.info_scroll = 0;
                    Some(Action::ToggleInfo)
                }
                Hit::Option(option) => Some(Action::FallbackChosen(option)),
            };
        }
        TuiEvent::MouseDrag(col, row) => {
            return app
                .resize
                .is_active()
                .then(|| Action::UpdateResize(tui.metrics.pointer(col, row)));
        }
        TuiEvent::MouseUp(..) => {
            return app.resize.is_active().then_some(Action::EndResize);
        }
        _ => {}
    }

    if !app.open {
        return match event {
            TuiEvent::Submit | TuiEvent::InputChar(' ') => Some(Action::Open),
            TuiEvent::Escape | TuiEvent::InputChar('q') => Some(Action::Quit),
            _ => None,
        };
    }

    match event {
        TuiEvent::Escape => return Some(Action::Close),
        TuiEvent::ToggleInfo => {
            tui.info_scroll = 0;
            return Some(Action::ToggleInfo);
        }
        _ => {}
    }

    if app.info_visible {
        scroll_info(app, tui, &event, area);
        return None;
    }

    if tui.message_list.handle_scroll(&event) {
        return None;
    }

    match tui.input_box.handle_event(&event, &mut app.draft)? {
        InputEvent::Submit => Some(Action::Submit {
            text: app.draft.clone(),
            origin: SubmitOrigin::Draft,
        }),
        InputEvent::ContentChanged => None,
    }
}

fn scroll_info(app: &App, tui: &mut TuiState, event: &TuiEvent, area: Rect) {
    let body = ui::window_layout(app, tui.metrics, area).body;
    let max_scroll = info_panel::content_height(body.width).saturating_sub(body.height);
    tui.info_scroll = match event {
        TuiEvent::ScrollUp => tui.info_scroll.saturating_sub(1),
        TuiEvent::ScrollDown => tui.info_scroll.saturating_add(1),
        TuiEvent::ScrollPageUp => tui.info_scroll.saturating_sub(body.height),
        TuiEvent::ScrollPageDown => tui.info_scroll.saturating_add(body.height),
        _ => tui.info_scroll,
    }
    .min(max_scroll);
}

fn spawn_request(oracle: Arc<dyn Oracle>, message: String, tx: mpsc::Sender<Action>) {
    info!("Spawning {} request ({} chars)", oracle.name(), message.len());
    tokio::spawn(async move {
        let started = Instant::now();
        let outcome = oracle.predict(&message).await;
        debug!(
            "Request settled after {}ms (ok={})",
            started.elapsed().as_millis(),
            outcome.is_ok()
        );
        if tx.send(Action::from_outcome(outcome)).is_err() {
            warn!("Failed to deliver request outcome: receiver dropped");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::geometry::{Geometry, Point};
    use crate::core::turn::{FallbackOption, Turn};
    use crate::test_support::test_app;
    use crate::tui::components::message_list::OptionHit;
    use crate::tui::layout::launcher_rect;

    fn area() -> Rect {
        Rect::new(0, 0, 200, 60)
    }

    fn tui_state() -> TuiState {
        TuiState::new(CellMetrics::new(8.0, 16.0))
    }

    #[test]
    fn test_closed_keys() {
        let mut app = test_app();
        let mut tui = tui_state();
        assert_eq!(
            handle_event(&mut app, &mut tui, TuiEvent::Submit, area()),
            Some(Action::Open)
        );
        assert_eq!(
            handle_event(&mut app, &mut tui, TuiEvent::InputChar('q'), area()),
            Some(Action::Quit)
        );
        assert_eq!(
            handle_event(&mut app, &mut tui, TuiEvent::InputChar('x'), area()),
            None
        );
        assert!(app.draft.is_empty());
    }

    #[test]
    fn test_click_launcher_opens() {
        let mut app = test_app();
        let mut tui = tui_state();
        let launcher = launcher_rect(area());
        assert_eq!(
            handle_event(
                &mut app,
                &mut tui,
                TuiEvent::MouseDown(launcher.x + 1, launcher.y + 1),
                area()
            ),
            Some(Action::Open)
        );
    }

    #[test]
    fn test_typing_then_enter_submits_draft() {
        let mut app = test_app();
        app.open = true;
        let mut tui = tui_state();
        for c in "salut".chars() {
            assert_eq!(
                handle_event(&mut app, &mut tui, TuiEvent::InputChar(c), area()),
                None
            );
        }
        assert_eq!(app.draft, "salut");

        let action = handle_event(&mut app, &mut tui, TuiEvent::Submit, area());
        assert_eq!(
            action,
            Some(Action::Submit {
                text: "salut".to_string(),
                origin: SubmitOrigin::Draft
            })
        );
    }

    #[tokio::test]
    async fn test_click_send_button_submits_draft() {
        let mut app = test_app();
        app.open = true;
        app.draft = "salut".to_string();
        let mut tui = tui_state();
        let send = ui::window_layout(&app, tui.metrics, area())
            .send_button
            .unwrap();

        let action = handle_event(
            &mut app,
            &mut tui,
            TuiEvent::MouseDown(send.x + 2, send.y + 1),
            area(),
        );
        assert_eq!(
            action,
            Some(Action::Submit {
                text: "salut".to_string(),
                origin: SubmitOrigin::Draft
            })
        );

        let tx = mpsc::channel().0;
        apply(&mut app, action.unwrap(), &tx);
        assert!(app.draft.is_empty());
        assert_eq!(app.turns, vec![Turn::user("salut")]);
    }

    #[test]
    fn test_click_inside_input_does_not_submit() {
        let mut app = test_app();
        app.open = true;
        app.draft = "salut".to_string();
        let mut tui = tui_state();
        let input = ui::window_layout(&app, tui.metrics, area()).input.unwrap();
        assert_eq!(
            handle_event(
                &mut app,
                &mut tui,
                TuiEvent::MouseDown(input.x + 1, input.y + 1),
                area()
            ),
            None
        );
    }

    #[test]
    fn test_ok_or_warn() {
        assert_eq!(ok_or_warn(Ok(3), "count"), Some(3));
        let failed: std::io::Result<u8> = Err(std::io::Error::other("no tty"));
        assert_eq!(ok_or_warn(failed, "enable terminal modes"), None);
    }

    #[test]
    fn test_shift_enter_adds_newline_without_submitting() {
        let mut app = test_app();
        app.open = true;
        let mut tui = tui_state();
        handle_event(&mut app, &mut tui, TuiEvent::InputChar('a'), area());
        assert_eq!(
            handle_event(&mut app, &mut tui, TuiEvent::Newline, area()),
            None
        );
        assert_eq!(app.draft, "a\n");
    }

    #[test]
    fn test_escape_closes_and_f1_toggles_info() {
        let mut app = test_app();
        app.open = true;
        let mut tui = tui_state();
        assert_eq!(
            handle_event(&mut app, &mut tui, TuiEvent::ToggleInfo, area()),
            Some(Action::ToggleInfo)
        );
        assert_eq!(
            handle_event(&mut app, &mut tui, TuiEvent::Escape, area()),
            Some(Action::Close)
        );
    }

    #[test]
    fn test_typing_ignored_while_info_visible() {
        let mut app = test_app();
        app.open = true;
        app.info_visible = true;
        let mut tui = tui_state();
        assert_eq!(
            handle_event(&mut app, &mut tui, TuiEvent::InputChar('a'), area()),
            None
        );
        assert!(app.draft.is_empty());
    }

    #[test]
    fn test_info_scroll_is_bounded() {
        let mut app = test_app();
        app.open = true;
        app.info_visible = true;
        let mut tui = tui_state();
        handle_event(&mut app, &mut tui, TuiEvent::ScrollUp, area());
        assert_eq!(tui.info_scroll, 0);
        for _ in 0..500 {
            handle_event(&mut app, &mut tui, TuiEvent::ScrollDown, area());
        }
        assert!(tui.info_scroll < 500);
    }

    #[test]
    fn test_drag_gesture_maps_cells_to_pixels() {
        let mut app = test_app();
        app.open = true;
        let mut tui = tui_state();
        let layout = ui::window_layout(&app, tui.metrics, area());
        let (x, y) = (layout.window.x, layout.window.y);

        let begin = handle_event(&mut app, &mut tui, TuiEvent::MouseDown(x, y), area());
        assert_eq!(
            begin,
            Some(Action::BeginResize(Point::new(
                f64::from(x) * 8.0,
                f64::from(y) * 16.0
            )))
        );
        let tx = mpsc::channel().0;
        apply(&mut app, begin.unwrap(), &tx);

        let drag = handle_event(&mut app, &mut tui, TuiEvent::MouseDrag(x - 2, y - 1), area());
        apply(&mut app, drag.unwrap(), &tx);
        assert_eq!(
            app.geometry,
            Geometry {
                width: 500.0 + 16.0,
                height: 600.0 + 16.0
            }
        );

        let end = handle_event(&mut app, &mut tui, TuiEvent::MouseUp(x - 2, y - 1), area());
        assert_eq!(end, Some(Action::EndResize));
    }

    #[test]
    fn test_drag_without_begin_ignored() {
        let mut app = test_app();
        app.open = true;
        let mut tui = tui_state();
        assert_eq!(
            handle_event(&mut app, &mut tui, TuiEvent::MouseDrag(10, 10), area()),
            None
        );
        assert_eq!(
            handle_event(&mut app, &mut tui, TuiEvent::MouseUp(10, 10), area()),
            None
        );
    }

    #[test]
    fn test_click_option_chooses_it() {
        let mut app = test_app();
        app.open = true;
        let option = FallbackOption {
            label: "Costuri".to_string(),
            query: "Cât costă?".to_string(),
        };
        app.turns
            .push(Turn::bot_with_options("Poate:", vec![option.clone()]));
        let mut tui = tui_state();
        tui.message_list.option_hits.push(OptionHit {
            rect: Rect::new(150, 30, 11, 1),
            option: option.clone(),
        });

        assert_eq!(
            handle_event(&mut app, &mut tui, TuiEvent::MouseDown(155, 30), area()),
            Some(Action::FallbackChosen(option))
        );
    }

    #[test]
    fn test_terminal_resize_becomes_viewport_action() {
        let mut app = test_app();
        let mut tui = tui_state();
        assert_eq!(
            handle_event(&mut app, &mut tui, TuiEvent::Resize(70, 40), area()),
            Some(Action::ViewportResized(crate::core::geometry::Viewport::new(
                560.0, 640.0
            )))
        );
    }

    #[tokio::test]
    async fn test_apply_send_request_posts_outcome() {
        let mut app = test_app();
        let (tx, rx) = mpsc::channel();
        let quit = apply(
            &mut app,
            Action::Submit {
                text: "salut".to_string(),
                origin: SubmitOrigin::Draft,
            },
            &tx,
        );
        assert!(!quit);
        assert!(app.loading);

        let action = tokio::task::spawn_blocking(move || rx.recv_timeout(Duration::from_secs(5)))
            .await
            .unwrap()
            .unwrap();
        apply(&mut app, action, &tx);
        assert!(!app.loading);
        assert_eq!(app.turns.last(), Some(&Turn::bot("stub reply")));
    }
}
