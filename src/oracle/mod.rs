//! # Remote Oracle
//!
//! The external service that answers user messages. The controller never
//! talks to it directly: the TUI spawns a task per request and feeds the
//! outcome back as an [`Action`](crate::core::action::Action).

pub mod client;
pub mod http;
pub mod reply;

pub use client::{Oracle, OracleError};
pub use http::{DEFAULT_ENDPOINT, HttpOracle};
pub use reply::{PredictRequest, Reply};
