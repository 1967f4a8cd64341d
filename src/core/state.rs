//! # Widget State
//!
//! Everything the chat widget knows, in one struct. No terminal types live
//! here; presentation-only state (scroll offsets, cursor) belongs to `tui`.
//!
//! ```text
//! App
//! ├── oracle: Arc<dyn Oracle>   // where messages go
//! ├── open: bool                // window visible (vs. toggle button)
//! ├── turns: Vec<Turn>          // conversation, in append order
//! ├── draft: String             // unsent input
//! ├── loading: bool             // a request is outstanding
//! ├── info_visible: bool        // help panel replaces the conversation
//! ├── viewport: Viewport        // hosting surface, logical pixels
//! ├── geometry: Geometry        // window size, logical pixels
//! └── resize: Resize            // drag-resize gesture
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use std::sync::Arc;

use crate::core::geometry::{Geometry, Resize, Viewport};
use crate::core::turn::Turn;
use crate::oracle::Oracle;

pub struct App {
    pub oracle: Arc<dyn Oracle>,
    pub open: bool,
    pub turns: Vec<Turn>,
    pub draft: String,
    pub loading: bool,
    pub info_visible: bool,
    pub viewport: Viewport,
    pub geometry: Geometry,
    pub resize: Resize,
}

impl App {
    /// Creates a closed widget sized for `viewport`.
    pub fn new(oracle: Arc<dyn Oracle>, viewport: Viewport) -> Self {
        Self {
            oracle,
            open: false,
            turns: Vec::new(),
            draft: String::new(),
            loading: false,
            info_visible: false,
            viewport,
            geometry: Geometry::for_viewport(viewport),
            resize: Resize::Idle,
        }
    }

    /// Whether the conversation and input are on screen.
    pub fn conversation_visible(&self) -> bool {
        self.open && !self.info_visible
    }
}
