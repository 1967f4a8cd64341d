//! Wire types for the `/predict` endpoint.
//!
//! ```text
//! request:   {"message": "..."}
//! fallback:  {"type": "fallback", "message": "...", "options": [{"label": "...", "query": "..."}]}
//! anything else is read as {"message": "..."}
//! ```
//!
//! Only `type == "fallback"` is checked. Missing fields become empty
//! values instead of errors, so a sparse reply still renders.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::client::OracleError;
use crate::core::turn::{FallbackOption, Turn};

const FALLBACK_TYPE: &str = "fallback";

/// Request body sent to the oracle.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct PredictRequest<'a> {
    pub message: &'a str,
}

/// A decoded reply.
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    Plain {
        message: String,
    },
    Fallback {
        message: String,
        options: Vec<FallbackOption>,
    },
}

#[derive(Deserialize)]
struct PlainBody {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Deserialize)]
struct FallbackBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    options: Option<Vec<FallbackOption>>,
}

impl Reply {
    /// Interpret a JSON body.
    pub fn from_json(body: Value) -> Result<Self, OracleError> {
        if !body.is_object() {
            return Err(OracleError::Parse(format!("expected a JSON object, got {body}")));
        }

        if body.get("type").and_then(Value::as_str) == Some(FALLBACK_TYPE) {
            let parsed: FallbackBody =
                serde_json::from_value(body).map_err(|e| OracleError::Parse(e.to_string()))?;
            return Ok(Reply::Fallback {
                message: parsed.message.unwrap_or_default(),
                options: parsed.options.unwrap_or_default(),
            });
        }

        let parsed: PlainBody =
            serde_json::from_value(body).map_err(|e| OracleError::Parse(e.to_string()))?;
        Ok(Reply::Plain {
            message: parsed.message.unwrap_or_default(),
        })
    }

    pub fn message(&self) -> &str {
        match self {
            Reply::Plain { message } | Reply::Fallback { message, .. } => message,
        }
    }

    /// Build the bot turn that displays this reply.
    pub fn into_turn(self) -> Turn {
        match self {
            Reply::Plain { message } => Turn::bot(message),
            Reply::Fallback { message, options } => Turn::bot_with_options(message, options),
        }
    }
}
