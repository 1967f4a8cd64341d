//! HTTP oracle: one `POST` per message against the `/predict` endpoint.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};

use super::client::{Oracle, OracleError};
use super::reply::{PredictRequest, Reply};

pub const DEFAULT_ENDPOINT: &str = "https://milo-backend-testing.onrender.com/predict";

pub struct HttpOracle {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpOracle {
    /// Build a client for `endpoint`.
    ///
    /// `timeout` of `None` leaves reqwest's default in place, which never
    /// gives up on a hung request.
    pub fn new(endpoint: String, timeout: Option<Duration>) -> Result<Self, OracleError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| OracleError::Network(e.to_string()))?;

        Ok(Self { endpoint, client })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl Oracle for HttpOracle {
    fn name(&self) -> &str {
        "http"
    }

    async fn predict(&self, message: &str) -> Result<Reply, OracleError> {
        info!(
            "Predict request: endpoint={}, message_len={}",
            self.endpoint,
            message.len()
        );

        let response = self
            .client
            .post(&self.endpoint)
            .json(&PredictRequest { message })
            .send()
            .await
            .map_err(|e| OracleError::Network(e.to_string()))?;

        let status = response.status();
        debug!("Predict response status: {}", status);

        if !status.is_success() {
            let err_body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Oracle API error: {} - {}", status.as_u16(), err_body);
            return Err(OracleError::Api {
                status: status.as_u16(),
                message: err_body,
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| OracleError::Network(e.to_string()))?;
        let json: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| OracleError::Parse(e.to_string()))?;

        let reply = Reply::from_json(json)?;
        debug!("Predict reply decoded: {:?}", reply);
        Ok(reply)
    }
}
