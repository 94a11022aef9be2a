use std::time::Duration;

/// Where the upstream model server lives and how long to wait for it.
#[derive(Debug, Clone)]
pub struct UpstreamConfig {
    pub base_url: String,
    pub default_model: String,
    pub generate_timeout: Duration,
    pub health_timeout: Duration,
}

impl UpstreamConfig {
    pub const DEFAULT_BASE_URL: &'static str = "http://localhost:11434";
    pub const DEFAULT_MODEL: &'static str = "codellama";
    pub const DEFAULT_GENERATE_TIMEOUT: Duration = Duration::from_secs(60);
    pub const DEFAULT_HEALTH_TIMEOUT: Duration = Duration::from_secs(5);

    /// Configuration with the default timeouts.
    pub fn new(base_url: impl Into<String>, default_model: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            default_model: default_model.into(),
            generate_timeout: Self::DEFAULT_GENERATE_TIMEOUT,
            health_timeout: Self::DEFAULT_HEALTH_TIMEOUT,
        }
    }

    /// Build the configuration from the global CLI flags (and their env fallbacks).
    pub fn from_global(global: &crate::Global) -> Self {
        Self::new(&global.ollama_url, &global.default_model).with_timeouts(
            Duration::from_secs(global.generate_timeout),
            Duration::from_secs(global.health_timeout),
        )
    }

    pub fn with_timeouts(mut self, generate: Duration, health: Duration) -> Self {
        self.generate_timeout = generate;
        self.health_timeout = health;
        self
    }

    pub fn generate_url(&self) -> String {
        format!("{}/api/generate", self.base_url)
    }

    pub fn tags_url(&self) -> String {
        format!("{}/api/tags", self.base_url)
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self::new(Self::DEFAULT_BASE_URL, Self::DEFAULT_MODEL)
    }
}
