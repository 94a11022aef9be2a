use super::types::{UpstreamBody, UpstreamChunk};
use crate::error::CodegenError;
use serde_json::{Map, Value};

/// Decode `text` as a JSON object. Arrays, strings and other scalars are rejected.
fn decode_object(text: &str) -> Option<UpstreamChunk> {
    let object: Map<String, Value> = serde_json::from_str(text).ok()?;
    serde_json::from_value(Value::Object(object)).ok()
}

/// Detect the framing of an upstream reply.
///
/// The whole body is first decoded as one JSON object. When that fails it is
/// read as newline-delimited JSON: blank and undecodable lines are skipped, and
/// nothing after the first chunk flagged `done` is kept.
pub fn decode_upstream_body(body: &str) -> UpstreamBody {
    if let Some(chunk) = decode_object(body) {
        return UpstreamBody::Single(chunk);
    }

    let mut chunks = Vec::new();
    for line in body.split('\n').map(str::trim).filter(|l| !l.is_empty()) {
        let Some(chunk) = decode_object(line) else {
            continue;
        };
        let done = chunk.done;
        chunks.push(chunk);
        if done {
            break;
        }
    }

    UpstreamBody::Stream(chunks)
}

/// Turn an upstream reply of either framing into the generated code.
///
/// A reply without any text is an error, never an empty success.
pub fn normalize_response(body: &str) -> Result<String, CodegenError> {
    let text = decode_upstream_body(body).into_text();
    if text.is_empty() {
        return Err(CodegenError::EmptyGeneration);
    }
    Ok(text)
}
