//! Model configuration
//!
//! Switches that tune the checks run by every builder. A process-wide value is
//! read by `Builder::build()`; `Builder::build_with()` takes one explicitly.
//!
//! ```rust
//! use ferrum_model::ModelConfig;
//!
//! let cfg = ModelConfig::from_yaml("check_reference_types: false").unwrap();
//! assert!(!cfg.check_reference_types);
//! assert!(cfg.check_control_chars);
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::sync::RwLock;

/// 1024 * 1024 characters
pub const DEFAULT_MAX_STRING_LENGTH: usize = 1_048_576;

static CURRENT: RwLock<ModelConfig> = RwLock::new(ModelConfig::DEFAULT);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Check reference literals and `Reference.type` against the element's targets
    pub check_reference_types: bool,
    /// Reject ASCII control characters (other than tab, CR, LF) in string values
    pub check_control_chars: bool,
    /// Maximum length of string, uri and code values
    pub max_string_length: usize,
}

impl ModelConfig {
    pub const DEFAULT: ModelConfig = ModelConfig {
        check_reference_types: true,
        check_control_chars: true,
        max_string_length: DEFAULT_MAX_STRING_LENGTH,
    };

    pub fn builder() -> ModelConfigBuilder {
        ModelConfigBuilder::default()
    }

    /// Snapshot of the process-wide configuration
    pub fn current() -> ModelConfig {
        match CURRENT.read() {
            Ok(guard) => *guard,
            Err(poisoned) => *poisoned.into_inner(),
        }
    }

    /// Replace the process-wide configuration, returning the previous one
    pub fn install(config: ModelConfig) -> Result<ModelConfig, ConfigError> {
        config.check()?;
        let mut guard = match CURRENT.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        };
        let previous = std::mem::replace(&mut *guard, config);
        tracing::debug!(?config, "installed model configuration");
        Ok(previous)
    }

    pub fn from_yaml(yaml: &str) -> Result<Self, ConfigError> {
        let config: ModelConfig = serde_yaml::from_str(yaml)?;
        config.check()?;
        Ok(config)
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        Ok(serde_yaml::to_string(self)?)
    }

    fn check(&self) -> Result<(), ConfigError> {
        if self.max_string_length == 0 {
            return Err(ConfigError::InvalidConfig(
                "max_string_length must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self::DEFAULT
    }
}

#[derive(Debug, Clone, Default)]
pub struct ModelConfigBuilder {
    config: ModelConfig,
}

impl ModelConfigBuilder {
    pub fn check_reference_types(mut self, check: bool) -> Self {
        self.config.check_reference_types = check;
        self
    }

    pub fn check_control_chars(mut self, check: bool) -> Self {
        self.config.check_control_chars = check;
        self
    }

    pub fn max_string_length(mut self, max: usize) -> Self {
        self.config.max_string_length = max;
        self
    }

    pub fn build(self) -> ModelConfig {
        self.config
    }
}
