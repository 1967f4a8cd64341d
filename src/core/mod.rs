//! # Core Widget Logic
//!
//! The chat widget's state machine. It knows nothing about terminals,
//! HTTP clients or event loops.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (App)          │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │                         │
//!                    │  No I/O. No UI. Pure.   │
//!                    └───────────┬─────────────┘
//!                                │
//!                  ┌─────────────┴─────────────┐
//!                  ▼                           ▼
//!           ┌────────────┐              ┌────────────┐
//!           │    TUI     │              │   Oracle   │
//!           │  Adapter   │──Effect────▶ │  (HTTP)    │
//!           │ (ratatui)  │◀──Action──── │            │
//!           └────────────┘              └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: The `App` struct, all widget state in one place
//! - [`action`]: The `Action` enum and the `update` reducer
//! - [`geometry`]: Window sizing and drag-resize math
//! - [`turn`]: Conversation entries and quick-reply options
//! - [`config`]: Settings file and override resolution

pub mod action;
pub mod config;
pub mod geometry;
pub mod state;
pub mod turn;
