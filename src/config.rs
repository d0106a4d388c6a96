//! Configuration for the splitter.

/// Model name used when none is configured.
pub const DEFAULT_MODEL: &str = "gpt-4o";

/// Per-chunk token budget used when none is configured.
pub const DEFAULT_TOKEN_LIMIT: usize = 500;

/// Configuration for a [`Splitter`](crate::Splitter) instance.
#[derive(Debug, Clone)]
pub struct SplitConfig {
    /// Model name that selects the token-counting encoding.
    ///
    /// Names without a known encoding fall back to `cl100k_base`; see
    /// [`TokenCounter::for_model`](crate::TokenCounter::for_model).
    pub model_name: String,
    /// Maximum tokens per chunk, framing overhead included.
    pub limit: usize,
}

impl Default for SplitConfig {
    fn default() -> Self {
        Self {
            model_name: DEFAULT_MODEL.to_string(),
            limit: DEFAULT_TOKEN_LIMIT,
        }
    }
}

impl SplitConfig {
    /// Creates a configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder for custom configuration.
    #[must_use]
    pub fn builder() -> SplitConfigBuilder {
        SplitConfigBuilder::new()
    }
}

/// Builder for splitter configuration.
#[derive(Debug, Default)]
pub struct SplitConfigBuilder {
    config: SplitConfig,
}

impl SplitConfigBuilder {
    /// Creates a new configuration builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self {
            config: SplitConfig::default(),
        }
    }

    /// Sets the model name that selects the token-counting encoding.
    #[must_use]
    pub fn model_name(mut self, model_name: impl Into<String>) -> Self {
        self.config.model_name = model_name.into();
        self
    }

    /// Sets the per-chunk token budget.
    #[must_use]
    pub const fn limit(mut self, limit: usize) -> Self {
        self.config.limit = limit;
        self
    }

    /// Builds the configuration.
    #[must_use]
    pub fn build(self) -> SplitConfig {
        self.config
    }
}
