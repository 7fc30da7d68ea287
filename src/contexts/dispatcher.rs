use crate::contexts::classifier::GenerationMode;
use crate::contexts::synthesizer::SynthesizedSpec;
use serde::{Deserialize, Serialize};
use std::env;
use std::fmt;

/// Environment variable naming the generation backend base URL.
pub const BACKEND_URL_VAR: &str = "TESTOPS_BACKEND_URL";
/// Backend base URL used when the environment does not name one.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Message surfaced when the backend reports a failure without one.
const BACKEND_FAILURE_FALLBACK: &str = "generation backend reported a failure";

/// Errors that can occur while dispatching a generation request
#[derive(Debug)]
pub enum DispatchError {
    /// The request never produced a usable response: connection errors,
    /// timeouts, DNS failures, or a non-success HTTP status.
    Transport(String),
    /// The backend answered with a well-formed response whose status marks
    /// the generation as failed. Carries the backend's own message.
    Backend(String),
    /// The response body could not be parsed into the expected shape.
    Malformed(String),
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            DispatchError::Transport(details) => {
                write!(f, "Transport failure: {}", details)
            }
            DispatchError::Backend(message) => {
                write!(f, "Backend rejected the request: {}", message)
            }
            DispatchError::Malformed(details) => {
                write!(f, "Malformed backend response: {}", details)
            }
        }
    }
}

impl std::error::Error for DispatchError {}

/// A single generation request: the synthesized spec paired with the mode
/// selected for it, plus the raw requirement text for the prompt.
///
/// Constructed fresh per user action; it has no identity beyond the call
/// that created it.
#[derive(Debug, Clone, Serialize)]
pub struct GenerationRequest {
    pub spec: SynthesizedSpec,
    pub test_type: GenerationMode,
    pub requirements: String,
}

impl GenerationRequest {
    pub fn new(spec: SynthesizedSpec, test_type: GenerationMode, requirement: &str) -> Self {
        Self {
            spec,
            test_type,
            requirements: requirement.to_string(),
        }
    }
}

/// Wire shape of the backend response. Extra fields (metadata) are ignored.
#[derive(Debug, Deserialize)]
struct BackendResponse {
    status: String,
    #[serde(default)]
    code_text: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

/// Dispatches generation requests to the backend over HTTP.
///
/// One outbound call per invocation: no retry, no deduplication, no
/// coalescing across concurrent dispatches. No timeout is enforced here;
/// the transport's default behavior applies.
pub struct Dispatcher {
    base_url: String,
    client: reqwest::Client,
}

impl Dispatcher {
    /// Creates a dispatcher for the given backend base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::new(),
        }
    }

    /// Creates a dispatcher from `TESTOPS_BACKEND_URL`, falling back to
    /// the default local backend.
    pub fn from_env() -> Self {
        let url = env::var(BACKEND_URL_VAR).unwrap_or_else(|_| DEFAULT_BACKEND_URL.to_string());
        Self::new(url)
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Sends a generation request and returns the generated code text.
    ///
    /// Failure handling follows the taxonomy on `DispatchError`. History is
    /// never written here; that is the caller's responsibility on success.
    pub async fn dispatch(&self, request: &GenerationRequest) -> Result<String, DispatchError> {
        let url = format!("{}/api/generate", self.base_url);

        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| DispatchError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DispatchError::Transport(e.to_string()))?;

        if !status.is_success() {
            let detail = if body.trim().is_empty() {
                status.to_string()
            } else {
                format!("{}: {}", status, body.trim())
            };
            return Err(DispatchError::Transport(format!(
                "backend returned HTTP {}",
                detail
            )));
        }

        parse_generation_response(&body)
    }

    /// Queries the backend health endpoint and returns the reported status.
    pub async fn health(&self) -> Result<String, DispatchError> {
        let url = format!("{}/health", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| DispatchError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| DispatchError::Transport(e.to_string()))?;

        if !status.is_success() {
            return Err(DispatchError::Transport(format!(
                "backend returned HTTP {}",
                status
            )));
        }

        let value: serde_json::Value =
            serde_json::from_str(&body).map_err(|e| DispatchError::Malformed(e.to_string()))?;

        Ok(value
            .get("status")
            .and_then(|s| s.as_str())
            .unwrap_or("unknown")
            .to_string())
    }
}

/// Parses a success-status response body into the generated code text.
fn parse_generation_response(body: &str) -> Result<String, DispatchError> {
    let response: BackendResponse =
        serde_json::from_str(body).map_err(|e| DispatchError::Malformed(e.to_string()))?;

    if response.status == "success" {
        response.code_text.ok_or_else(|| {
            DispatchError::Malformed("success response carried no code_text".to_string())
        })
    } else {
        Err(DispatchError::Backend(
            response
                .message
                .unwrap_or_else(|| BACKEND_FAILURE_FALLBACK.to_string()),
        ))
    }
}

/// State of the single-flight dispatch gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    Idle,
    Pending,
}

/// Gates the interactive surface to one in-flight dispatch at a time.
///
/// Transitions: idle → pending on dispatch start, pending → idle on result
/// (success or failure). A dispatch attempted while another is pending is
/// rejected; the gate state is otherwise untouched.
#[derive(Debug)]
pub struct DispatchGate {
    state: DispatchState,
}

impl DispatchGate {
    pub fn new() -> Self {
        Self {
            state: DispatchState::Idle,
        }
    }

    pub fn state(&self) -> DispatchState {
        self.state
    }

    /// Attempts the idle → pending transition.
    ///
    /// Returns false, leaving the state untouched, if a dispatch is
    /// already pending.
    pub fn try_begin(&mut self) -> bool {
        match self.state {
            DispatchState::Idle => {
                self.state = DispatchState::Pending;
                true
            }
            DispatchState::Pending => false,
        }
    }

    /// Returns the gate to idle once a dispatch has resolved.
    pub fn finish(&mut self) {
        self.state = DispatchState::Idle;
    }
}

impl Default for DispatchGate {
    fn default() -> Self {
        Self::new()
    }
}
