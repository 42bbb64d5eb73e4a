//! HTTP client for the remote evaluation service.
//!
//! The whole wire contract is one endpoint: `POST /calculate` with a JSON
//! body `{"expression": "<string>"}`. A 2xx response carries
//! `{"result": <string|number>}`; anything else carries an optional
//! `{"error": "<string>"}`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

/// Path of the evaluation endpoint, relative to the server base URL.
pub const CALCULATE_PATH: &str = "/calculate";

/// Request body for the evaluation endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluateRequest {
    /// The expression in canonical operator form.
    pub expression: String,
}

/// The server's `result` value, kept in whichever JSON shape it arrived.
///
/// The server decides the textual form of a result; the client renders it
/// verbatim instead of re-parsing it into a float and back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResultValue {
    /// A JSON number, preserved exactly as serialized.
    Number(serde_json::Number),
    /// A JSON string.
    Text(String),
}

impl fmt::Display for ResultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => write!(f, "{s}"),
        }
    }
}

/// Successful response body from the evaluation endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluateResponse {
    /// The evaluated result.
    pub result: ResultValue,
}

/// Error response body. The `error` field is optional on the wire.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    error: Option<String>,
}

/// Errors from the evaluation client.
#[derive(Debug, thiserror::Error)]
pub enum EvalError {
    /// The request could not complete: network failure, unreachable host,
    /// or a malformed response body.
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn std::error::Error + Send + Sync>),
    /// The server accepted the request but evaluation failed.
    #[error("evaluation rejected with status {status}")]
    Rejected {
        /// HTTP status code.
        status: u16,
        /// Server-supplied error text, if any.
        message: Option<String>,
    },
}

impl From<reqwest::Error> for EvalError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(Box::new(err))
    }
}

/// Seam for the evaluation service, so the controller can be exercised
/// with a scripted evaluator in tests.
#[async_trait]
pub trait Evaluate {
    /// Evaluates a canonical-form expression on the server.
    async fn evaluate(&self, expression: &str) -> Result<EvaluateResponse, EvalError>;
}

/// HTTP evaluation client backed by reqwest.
#[derive(Debug, Clone)]
pub struct EvalClient {
    base_url: String,
    client: reqwest::Client,
}

impl EvalClient {
    /// Overall request timeout. The suspension while a request is in
    /// flight is bounded by this alone.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

    /// Creates a client pointing at the given base URL
    /// (e.g. `http://127.0.0.1:8080`).
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Self::REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Creates a client with a custom reqwest client (for custom
    /// timeouts, proxies, etc.).
    #[must_use]
    pub fn with_client(base_url: impl Into<String>, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl Evaluate for EvalClient {
    async fn evaluate(&self, expression: &str) -> Result<EvaluateResponse, EvalError> {
        let request = EvaluateRequest {
            expression: expression.to_string(),
        };
        let url = format!("{}{CALCULATE_PATH}", self.base_url);

        let resp = self.client.post(&url).json(&request).send().await?;

        let status = resp.status();
        if !status.is_success() {
            // A missing or unparseable error body still yields a Rejected
            // error; the caller substitutes the fallback message.
            let body: ErrorBody = resp.json().await.unwrap_or_default();
            return Err(EvalError::Rejected {
                status: status.as_u16(),
                message: body.error,
            });
        }

        Ok(resp.json().await?)
    }
}
