//! Search configuration

use serde::{Deserialize, Serialize};

/// Search service configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Result limit used when a request does not specify one
    #[serde(default = "default_limit")]
    pub default_limit: usize,

    /// Upper bound accepted for `limit`
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,

    /// Enable query suggestions
    #[serde(default = "default_true")]
    pub enable_suggestions: bool,

    /// Maximum number of suggestions returned
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
            enable_suggestions: true,
            max_suggestions: default_max_suggestions(),
        }
    }
}

fn default_limit() -> usize {
    20
}

fn default_max_limit() -> usize {
    50
}

fn default_max_suggestions() -> usize {
    5
}

fn default_true() -> bool {
    true
}

/// Builder for SearchConfig
pub struct SearchConfigBuilder {
    config: SearchConfig,
}

impl SearchConfigBuilder {
    pub fn new() -> Self {
        Self {
            config: SearchConfig::default(),
        }
    }

    pub fn default_limit(mut self, limit: usize) -> Self {
        self.config.default_limit = limit;
        self
    }

    pub fn max_limit(mut self, limit: usize) -> Self {
        self.config.max_limit = limit;
        self
    }

    pub fn enable_suggestions(mut self, enabled: bool) -> Self {
        self.config.enable_suggestions = enabled;
        self
    }

    pub fn max_suggestions(mut self, max: usize) -> Self {
        self.config.max_suggestions = max;
        self
    }

    pub fn build(self) -> SearchConfig {
        self.config
    }
}

impl Default for SearchConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}
