use serde::{Deserialize, Serialize};
use std::env;
use thiserror::Error;
use validator::Validate;

/// Configuration errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Environment variable error: {0}")]
    EnvVar(#[from] std::env::VarError),

    #[error("Parse error for {field}: {value} - {source}")]
    Parse {
        field: String,
        value: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),
}

/// Query compiler configuration with validation
#[derive(Clone, Debug, Validate, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CompilerConfig {
    /// Put every clause on its own line instead of one space-separated line
    pub multiline: bool,

    /// How many times a colliding node alias is bumped before giving up (1-26)
    #[validate(range(
        min = 1,
        max = 26,
        message = "Max alias probes must be between 1 and 26"
    ))]
    pub max_alias_probes: u32,

    /// Variable used when nothing else is bound (`MATCH (n)`, unknown condition targets)
    #[validate(length(min = 1, message = "Fallback alias cannot be empty"))]
    pub fallback_alias: String,
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            multiline: false,
            max_alias_probes: 26,
            fallback_alias: "n".to_string(),
        }
    }
}

impl CompilerConfig {
    /// Create configuration from environment variables with validation
    pub fn from_env() -> Result<Self, ConfigError> {
        let config = Self {
            multiline: parse_env_var("CYPHER_STUDIO_MULTILINE", "false")?,
            max_alias_probes: parse_env_var("CYPHER_STUDIO_MAX_ALIAS_PROBES", "26")?,
            fallback_alias: env::var("CYPHER_STUDIO_FALLBACK_ALIAS")
                .unwrap_or_else(|_| "n".to_string()),
        };

        config.validate()?;
        Ok(config)
    }

    /// Create configuration from CLI arguments with validation.
    ///
    /// Flags the user did not pass keep the values from `base`.
    pub fn from_cli(base: Self, cli: CliConfig) -> Result<Self, ConfigError> {
        let config = Self {
            multiline: cli.multiline || base.multiline,
            max_alias_probes: cli.max_alias_probes.unwrap_or(base.max_alias_probes),
            fallback_alias: cli.fallback_alias.unwrap_or(base.fallback_alias),
        };

        config.validate()?;
        Ok(config)
    }

    /// Create configuration from YAML file
    pub fn from_yaml_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Parse {
            field: "yaml_file".to_string(),
            value: "file read failed".to_string(),
            source: Box::new(e),
        })?;

        let config: Self = serde_yaml::from_str(&content).map_err(|e| ConfigError::Parse {
            field: "yaml_content".to_string(),
            value: content,
            source: Box::new(e),
        })?;

        config.validate()?;
        Ok(config)
    }
}

/// CLI configuration (parsed from command line arguments)
#[derive(Clone, Debug, Default)]
pub struct CliConfig {
    pub multiline: bool,
    pub max_alias_probes: Option<u32>,
    pub fallback_alias: Option<String>,
}

/// Parse an environment variable with a default value
fn parse_env_var<T: std::str::FromStr>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let value = env::var(key).unwrap_or_else(|_| default.to_string());
    value.parse().map_err(|e| ConfigError::Parse {
        field: key.to_string(),
        value,
        source: Box::new(e),
    })
}
