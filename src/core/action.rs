//! # Actions
//!
//! Everything that can happen to the widget becomes an `Action`.
//! User presses Enter? That's `Action::Submit`.
//! The oracle answers? That's `Action::ReplyReceived(reply)`.
//!
//! `update()` applies an action to the state and returns an `Effect`
//! describing the I/O the caller should perform. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Request lifecycle for one submission:
//!
//! ```text
//! idle ──Submit──▶ sending ──ReplyReceived──▶ idle
//!                     └─────RequestFailed───▶ idle
//! ```
//!
//! Submissions are not serialized. A second `Submit` while one request is
//! outstanding starts another, and bot turns land in completion order.

use log::{debug, info, warn};

use crate::core::geometry::{Geometry, Point, Resize, Viewport};
use crate::core::state::App;
use crate::core::turn::{FallbackOption, Turn};
use crate::oracle::{OracleError, Reply};

/// Bot text shown for any failed request.
pub const SERVER_ERROR_TEXT: &str = "Eroare la server.";

/// Where submitted text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOrigin {
    /// Typed into the input box; the draft is cleared on submit.
    Draft,
    /// A quick-reply button; the draft is left alone.
    FallbackOption,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    Open,
    Close,
    ToggleInfo,
    Submit { text: String, origin: SubmitOrigin },
    FallbackChosen(FallbackOption),
    ReplyReceived(Reply),
    RequestFailed(String),
    BeginResize(Point),
    UpdateResize(Point),
    EndResize,
    ViewportResized(Viewport),
    Quit,
}

impl Action {
    /// Turn a settled request into the action that records it.
    pub fn from_outcome(outcome: Result<Reply, OracleError>) -> Self {
        match outcome {
            Ok(reply) => Action::ReplyReceived(reply),
            Err(e) => Action::RequestFailed(e.to_string()),
        }
    }
}

/// I/O requested by `update`.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Send exactly one request carrying this message.
    SendRequest(String),
    Quit,
}

pub fn update(app: &mut App, action: Action) -> Effect {
    match action {
        Action::Open => {
            app.open = true;
            Effect::None
        }
        Action::Close => {
            app.open = false;
            Effect::None
        }
        Action::ToggleInfo => {
            app.info_visible = !app.info_visible;
            Effect::None
        }
        Action::Submit { text, origin } => submit(app, text, origin),
        Action::FallbackChosen(option) => {
            debug!("Fallback option chosen: {}", option.label);
            submit(app, option.query, SubmitOrigin::FallbackOption)
        }
        Action::ReplyReceived(reply) => {
            info!("Reply received ({} chars)", reply.message().len());
            app.turns.push(reply.into_turn());
            app.loading = false;
            Effect::None
        }
        Action::RequestFailed(reason) => {
            warn!("Request failed: {}", reason);
            app.turns.push(Turn::bot(SERVER_ERROR_TEXT));
            app.loading = false;
            Effect::None
        }
        Action::BeginResize(pointer) => {
            app.resize = Resize::Dragging { last: pointer };
            Effect::None
        }
        Action::UpdateResize(pointer) => {
            let Resize::Dragging { last } = app.resize else {
                return Effect::None;
            };
            if app.viewport.is_mobile() {
                return Effect::None;
            }
            let dx = last.x - pointer.x;
            let dy = last.y - pointer.y;
            app.geometry = app.geometry.resized_by(dx, dy, app.viewport);
            app.resize = Resize::Dragging { last: pointer };
            Effect::None
        }
        Action::EndResize => {
            app.resize = Resize::Idle;
            Effect::None
        }
        Action::ViewportResized(viewport) => {
            app.viewport = viewport;
            app.geometry = Geometry::for_viewport(viewport);
            debug!(
                "Viewport {}x{} -> geometry {}x{}",
                viewport.width, viewport.height, app.geometry.width, app.geometry.height
            );
            Effect::None
        }
        Action::Quit => Effect::Quit,
    }
}

fn submit(app: &mut App, text: String, origin: SubmitOrigin) -> Effect {
    if text.trim().is_empty() {
        return Effect::None;
    }
    if app.loading {
        debug!("Submitting while a request is still outstanding");
    }

    app.turns.push(Turn::user(text.clone()));
    if origin == SubmitOrigin::Draft {
        app.draft.clear();
    }
    app.loading = true;
    Effect::SendRequest(text)
}
