pub mod normalize;
pub mod prompt;
pub mod types;

pub use normalize::{decode_upstream_body, normalize_response};
pub use prompt::{build_prompt, resolve_model, validate_prompt};
pub use types::{
    GenerationRequest, GenerationResult, UpstreamBody, UpstreamChunk, UpstreamGenerateRequest,
};
