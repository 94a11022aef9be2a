use serde_json::Value;

/// Failure taxonomy shared by the upstream client, the CLI and the HTTP server.
///
/// Every variant is terminal for the call that raised it. Nothing in this
/// layer retries.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum CodegenError {
    /// Bad caller input, e.g. an empty prompt.
    #[error("{0}")]
    Validation(String),

    /// Upstream server unreachable, timed out, or answering with 0 / 5xx.
    #[error("Ollama service is not available: {0}")]
    UpstreamUnavailable(String),

    /// Upstream rejected the request with a non-2xx, non-5xx status.
    #[error("Ollama request failed with status {status}")]
    UpstreamRequest {
        status: u16,
        payload: Option<Value>,
    },

    /// Upstream answered successfully but produced no text.
    #[error("No code was generated. Please try again with a different prompt.")]
    EmptyGeneration,
}

impl CodegenError {
    /// HTTP status the inbound endpoint answers with for this error.
    pub fn http_status(&self) -> u16 {
        match self {
            CodegenError::Validation(_) => 400,
            CodegenError::UpstreamUnavailable(_) => 503,
            CodegenError::UpstreamRequest { .. } | CodegenError::EmptyGeneration => 500,
        }
    }

    /// Stable identifier used in error bodies.
    pub fn kind(&self) -> &'static str {
        match self {
            CodegenError::Validation(_) => "validation_error",
            CodegenError::UpstreamUnavailable(_) => "upstream_unavailable",
            CodegenError::UpstreamRequest { .. } => "upstream_request_error",
            CodegenError::EmptyGeneration => "empty_generation",
        }
    }

    /// Extra data passed through to the caller, if any.
    pub fn details(&self) -> Option<&Value> {
        match self {
            CodegenError::UpstreamRequest { payload, .. } => payload.as_ref(),
            _ => None,
        }
    }
}

/// Map an upstream HTTP status (and its body) onto the error taxonomy.
///
/// 2xx is success. 0 and >= 500 mean the service is down. Anything else is a
/// rejected request carrying the upstream body when it parses as JSON.
pub fn classify_upstream_status(status: u16, body: &str) -> Result<(), CodegenError> {
    match status {
        200..=299 => Ok(()),
        0 | 500..=u16::MAX => Err(CodegenError::UpstreamUnavailable(format!(
            "upstream responded with status {status}"
        ))),
        _ => Err(CodegenError::UpstreamRequest {
            status,
            payload: serde_json::from_str(body).ok(),
        }),
    }
}
