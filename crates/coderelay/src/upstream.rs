use crate::config::UpstreamConfig;
use crate::prelude::*;
use coderelay_core::error::classify_upstream_status;
use coderelay_core::generate::{
    build_prompt, normalize_response, resolve_model, validate_prompt, GenerationRequest,
    GenerationResult, UpstreamGenerateRequest,
};
use coderelay_core::CodegenError;
use std::time::Duration;

/// Raw upstream answer: status and undecoded body.
#[derive(Debug, Clone)]
pub struct UpstreamReply {
    pub status: u16,
    pub body: String,
}

/// HTTP client for the Ollama-compatible upstream.
///
/// Every call issues exactly one request with its own timeout. Nothing is
/// retried. When a timeout fires, reqwest drops the in-flight request, which
/// closes the underlying connection.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    http: reqwest::Client,
    config: UpstreamConfig,
}

impl OllamaClient {
    pub fn new(config: UpstreamConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("coderelay/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| eyre!("Failed to build HTTP client: {}", e))?;

        Ok(Self { http, config })
    }

    pub fn config(&self) -> &UpstreamConfig {
        &self.config
    }

    /// Generate code for `request`.
    ///
    /// The prompt is validated before any I/O, so an invalid request never
    /// reaches the upstream.
    pub async fn generate(
        &self,
        request: &GenerationRequest,
    ) -> Result<GenerationResult, CodegenError> {
        let prompt = validate_prompt(&request.prompt)?;
        let model = resolve_model(request.model.as_deref(), &self.config.default_model);
        let upstream_request =
            UpstreamGenerateRequest::new(model.clone(), build_prompt(prompt, &request.language));

        log::debug!(
            "Generating {} code with model {} ({} prompt chars)",
            request.language,
            model,
            upstream_request.prompt.len()
        );

        let reply = self.send_generate(&upstream_request).await?;
        classify_upstream_status(reply.status, &reply.body)?;
        let code = normalize_response(&reply.body)?;

        Ok(GenerationResult { code, model })
    }

    /// Submit a prepared request to `/api/generate` and return the raw reply.
    pub async fn send_generate(
        &self,
        body: &UpstreamGenerateRequest,
    ) -> Result<UpstreamReply, CodegenError> {
        let response = self
            .http
            .post(self.config.generate_url())
            .json(body)
            .timeout(self.config.generate_timeout)
            .send()
            .await
            .map_err(|e| self.unavailable(e, self.config.generate_timeout))?;

        self.read_reply(response, self.config.generate_timeout).await
    }

    /// Fetch the model listing from `/api/tags`, bounded by the health timeout.
    pub async fn list_models(&self) -> Result<UpstreamReply, CodegenError> {
        let response = self
            .http
            .get(self.config.tags_url())
            .timeout(self.config.health_timeout)
            .send()
            .await
            .map_err(|e| self.unavailable(e, self.config.health_timeout))?;

        self.read_reply(response, self.config.health_timeout).await
    }

    async fn read_reply(
        &self,
        response: reqwest::Response,
        timeout: Duration,
    ) -> Result<UpstreamReply, CodegenError> {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .map_err(|e| self.unavailable(e, timeout))?;

        Ok(UpstreamReply { status, body })
    }

    fn unavailable(&self, error: reqwest::Error, timeout: Duration) -> CodegenError {
        let message = if error.is_timeout() {
            format!("request timed out after {:?}", timeout)
        } else if error.is_connect() {
            format!("could not connect to {}", self.config.base_url)
        } else {
            error.to_string()
        };

        log::warn!("Upstream call failed: {}", message);
        CodegenError::UpstreamUnavailable(message)
    }
}
