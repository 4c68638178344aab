//! HTTP client for the model endpoint, plus the trait seam and its mock.

use std::io::{BufRead, BufReader};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::mpsc;

use serde::{Deserialize, Serialize};

use crate::config;

use super::GatewayError;

/// Model client abstraction (allows mocking).
///
/// `generate` is single-shot request/response. `generate_streaming`
/// forwards each text chunk over `tx` as it arrives and returns the
/// accumulated text; the producer checks `cancel` at every chunk
/// boundary and stops promptly when it is set or when the receiver has
/// been dropped.
pub trait LlmClient: Send + Sync {
    fn generate(&self, system: &str, prompt: &str) -> Result<String, GatewayError>;

    fn generate_streaming(
        &self,
        system: &str,
        prompt: &str,
        tx: mpsc::Sender<String>,
        cancel: &AtomicBool,
    ) -> Result<String, GatewayError>;
}

/// Client for an HTTP inference endpoint speaking the generate protocol:
/// POST `{base}/api/generate` with `{model, prompt, system, stream}`,
/// answering either a single JSON object or newline-delimited chunks.
pub struct HttpLlmClient {
    base_url: String,
    model: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl HttpLlmClient {
    pub fn new(base_url: &str, model: &str, timeout_secs: u64) -> Result<Self, GatewayError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| GatewayError::HttpClient(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            client,
            timeout_secs,
        })
    }

    /// Client for the default local endpoint.
    pub fn default_local() -> Result<Self, GatewayError> {
        Self::new(
            config::DEFAULT_LLM_BASE_URL,
            config::DEFAULT_LLM_MODEL,
            config::DEFAULT_LLM_TIMEOUT_SECS,
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn send(&self, body: &GenerateRequest) -> Result<reqwest::blocking::Response, GatewayError> {
        let url = format!("{}/api/generate", self.base_url);
        let response = self.client.post(&url).json(body).send().map_err(|e| {
            if e.is_connect() {
                GatewayError::Connection(self.base_url.clone())
            } else if e.is_timeout() {
                GatewayError::Timeout(self.timeout_secs)
            } else {
                GatewayError::HttpClient(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(GatewayError::Service {
                status: status.as_u16(),
                body,
            });
        }
        Ok(response)
    }
}

/// Request body for the generate endpoint.
#[derive(Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    system: &'a str,
    stream: bool,
}

/// Single-shot response body.
#[derive(Deserialize)]
struct GenerateResponse {
    response: String,
}

/// One newline-delimited chunk of a streamed response.
#[derive(Deserialize)]
struct StreamChunk {
    #[serde(default)]
    response: String,
    #[serde(default)]
    done: bool,
}

impl LlmClient for HttpLlmClient {
    fn generate(&self, system: &str, prompt: &str) -> Result<String, GatewayError> {
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            system,
            stream: false,
        };
        let response = self.send(&body)?;
        let parsed: GenerateResponse = response
            .json()
            .map_err(|e| GatewayError::InvalidResponse(e.to_string()))?;
        Ok(parsed.response)
    }

    fn generate_streaming(
        &self,
        system: &str,
        prompt: &str,
        tx: mpsc::Sender<String>,
        cancel: &AtomicBool,
    ) -> Result<String, GatewayError> {
        let body = GenerateRequest {
            model: &self.model,
            prompt,
            system,
            stream: true,
        };
        let response = self.send(&body)?;

        let mut full = String::new();
        let reader = BufReader::new(response);
        for line in reader.lines() {
            if cancel.load(Ordering::Relaxed) {
                tracing::debug!("stream cancelled by consumer");
                break;
            }
            let line = line.map_err(|e| GatewayError::HttpClient(e.to_string()))?;
            if line.trim().is_empty() {
                continue;
            }
            let chunk: StreamChunk = serde_json::from_str(&line)
                .map_err(|e| GatewayError::InvalidResponse(format!("bad stream chunk: {e}")))?;
            if !chunk.response.is_empty() {
                full.push_str(&chunk.response);
                if tx.send(chunk.response).is_err() {
                    // Receiver dropped; release the connection.
                    tracing::debug!("stream consumer gone, stopping producer");
                    break;
                }
            }
            if chunk.done {
                break;
            }
        }
        Ok(full)
    }
}

/// Mock model client for tests: canned reply, call counter, and an
/// optional forced failure.
pub struct MockLlmClient {
    response: String,
    fail: bool,
    calls: AtomicUsize,
}

impl MockLlmClient {
    pub fn new(response: &str) -> Self {
        Self {
            response: response.to_string(),
            fail: false,
            calls: AtomicUsize::new(0),
        }
    }

    /// A client whose every call fails with a connection error.
    pub fn failing() -> Self {
        Self {
            response: String::new(),
            fail: true,
            calls: AtomicUsize::new(0),
        }
    }

    /// How many generate calls were made.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl LlmClient for MockLlmClient {
    fn generate(&self, _system: &str, _prompt: &str) -> Result<String, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(GatewayError::Connection("mock".into()));
        }
        Ok(self.response.clone())
    }

    fn generate_streaming(
        &self,
        _system: &str,
        _prompt: &str,
        tx: mpsc::Sender<String>,
        cancel: &AtomicBool,
    ) -> Result<String, GatewayError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(GatewayError::Connection("mock".into()));
        }
        let mut full = String::new();
        for piece in self.response.split_inclusive(' ') {
            if cancel.load(Ordering::Relaxed) {
                break;
            }
            full.push_str(piece);
            if tx.send(piece.to_string()).is_err() {
                break;
            }
        }
        Ok(full)
    }
}
