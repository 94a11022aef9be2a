use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

fn default_language() -> String {
    "javascript".to_string()
}

/// A request for code generation, as received by the inbound endpoint.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct GenerationRequest {
    /// Natural-language description of the code to generate.
    pub prompt: String,
    /// Target language. Only used to template the prompt.
    #[serde(default = "default_language")]
    pub language: String,
    /// Model identifier. Falls back to the configured default when absent.
    #[serde(default)]
    pub model: Option<String>,
}

/// Generated code and the model that produced it.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct GenerationResult {
    pub code: String,
    pub model: String,
}

/// Body sent to the upstream `/api/generate` endpoint.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct UpstreamGenerateRequest {
    pub model: String,
    pub prompt: String,
    pub stream: bool,
}

impl UpstreamGenerateRequest {
    /// Streaming is always disabled for the proxy.
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            stream: false,
        }
    }
}

/// One JSON fragment of an upstream reply.
///
/// A `null` response counts as empty text, and `done` follows JSON truthiness.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct UpstreamChunk {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub response: String,
    #[serde(default, deserialize_with = "truthy")]
    pub done: bool,
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn truthy<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    Ok(is_truthy(&Value::deserialize(deserializer)?))
}

/// `false`, `null`, `0` and `""` are falsy; everything else is truthy.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Upstream reply after framing detection.
#[derive(Debug, Clone, PartialEq)]
pub enum UpstreamBody {
    /// The whole body was a single JSON object.
    Single(UpstreamChunk),
    /// Newline-delimited fragments, truncated after the first truthy `done`.
    Stream(Vec<UpstreamChunk>),
}

impl UpstreamBody {
    /// Concatenated response text, in order.
    pub fn into_text(self) -> String {
        match self {
            UpstreamBody::Single(chunk) => chunk.response,
            UpstreamBody::Stream(chunks) => chunks.into_iter().map(|c| c.response).collect(),
        }
    }
}
