//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::sync::Arc;

use async_trait::async_trait;

use crate::core::geometry::Viewport;
use crate::core::state::App;
use crate::oracle::{Oracle, OracleError, Reply};

/// An oracle that answers every message with the same canned reply.
pub struct StubOracle {
    reply: Reply,
}

impl StubOracle {
    pub fn plain(message: &str) -> Self {
        Self {
            reply: Reply::Plain {
                message: message.to_string(),
            },
        }
    }
}

#[async_trait]
impl Oracle for StubOracle {
    fn name(&self) -> &str {
        "stub"
    }

    async fn predict(&self, _message: &str) -> Result<Reply, OracleError> {
        Ok(self.reply.clone())
    }
}

/// A desktop-sized viewport, wide enough that drag-resize is enabled.
pub fn desktop_viewport() -> Viewport {
    Viewport::new(1920.0, 1080.0)
}

/// Creates a test App with a StubOracle on a desktop viewport.
pub fn test_app() -> App {
    App::new(Arc::new(StubOracle::plain("stub reply")), desktop_viewport())
}

#[test]
fn test_stub_oracle_answers() {
    let oracle = StubOracle::plain("salut");
    let reply = tokio_test::block_on(oracle.predict("anything")).unwrap();
    assert_eq!(reply.message(), "salut");
    assert_eq!(oracle.name(), "stub");
}
