//! Model configuration loading.
//!
//! Model settings are loaded from a TOML file or assembled in code,
//! then range-validated against the model's parameter schema before
//! the simulation starts.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::params::{ParamError, ParamSchema};

/// Settings for an opinion-model run.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelConfig {
    /// Bounded confidence threshold
    pub epsilon: f64,
    /// Fraction of the extreme-opinion pool to mark stubborn
    pub perc_stubbornness: f64,
    /// Pool selection: -1 negatives, +1 positives, 0 their union
    pub option_for_stubbornness: i64,
    /// Weight assigned to edges with no explicit value
    pub default_edge_weight: f64,
    /// Draw unset edge weights uniformly from [0, 1] instead
    pub random_weights: bool,
    /// RNG seed; a fresh entropy seed is used when absent
    pub seed: Option<u64>,
    /// Nodes flagged stubborn before the run starts
    pub stubborn_nodes: Vec<u32>,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            epsilon: 0.1,
            perc_stubbornness: 0.0,
            option_for_stubbornness: 0,
            default_edge_weight: 0.1,
            random_weights: false,
            seed: None,
            stubborn_nodes: Vec::new(),
        }
    }
}

impl ModelConfig {
    /// Loads configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(ConfigError::IoError)?;
        Self::from_str(&content)
    }

    /// Parses configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(ConfigError::TomlError)
    }

    /// Range-validate the settings against a parameter schema.
    pub fn validate(&self, schema: &ParamSchema) -> Result<(), ConfigError> {
        let model_checks = [
            ("epsilon", self.epsilon),
            ("perc_stubbornness", self.perc_stubbornness),
        ];
        for (name, value) in model_checks {
            if let Some(spec) = schema.model.get(name) {
                if !spec.in_range(value) {
                    return Err(ConfigError::Param(ParamError::OutOfRange {
                        name: name.to_string(),
                        value,
                        range: spec.range,
                    }));
                }
            }
        }
        if let Some(spec) = schema.edges.get("weight") {
            if !spec.in_range(self.default_edge_weight) {
                return Err(ConfigError::Param(ParamError::OutOfRange {
                    name: "weight".to_string(),
                    value: self.default_edge_weight,
                    range: spec.range,
                }));
            }
        }
        if !matches!(self.option_for_stubbornness, -1 | 0 | 1) {
            return Err(ConfigError::InvalidPoolOption(self.option_for_stubbornness));
        }
        Ok(())
    }
}

/// Errors that can occur during configuration loading and validation.
#[derive(Debug)]
pub enum ConfigError {
    /// IO error reading config file
    IoError(std::io::Error),
    /// Error parsing TOML config
    TomlError(toml::de::Error),
    /// Parameter value outside its declared range
    Param(ParamError),
    /// `option_for_stubbornness` outside {-1, 0, 1}
    InvalidPoolOption(i64),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::IoError(e) => write!(f, "IO error: {}", e),
            ConfigError::TomlError(e) => write!(f, "TOML parse error: {}", e),
            ConfigError::Param(e) => write!(f, "Parameter error: {}", e),
            ConfigError::InvalidPoolOption(v) => {
                write!(f, "option_for_stubbornness must be -1, 0 or 1, got {}", v)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::IoError(e) => Some(e),
            ConfigError::TomlError(e) => Some(e),
            ConfigError::Param(e) => Some(e),
            ConfigError::InvalidPoolOption(_) => None,
        }
    }
}

impl From<ParamError> for ConfigError {
    fn from(e: ParamError) -> Self {
        ConfigError::Param(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::ParamSpec;

    fn schema() -> ParamSchema {
        ParamSchema::new()
            .with_model("epsilon", ParamSpec::new("Threshold", (0.0, 1.0), false, 0.1))
            .with_model(
                "perc_stubbornness",
                ParamSpec::new("Stubborn fraction", (0.0, 1.0), true, 0.0),
            )
            .with_edge("weight", ParamSpec::new("Edge weight", (0.0, 1.0), true, 0.1))
    }

    #[test]
    fn test_default_config() {
        let config = ModelConfig::default();

        assert_eq!(config.epsilon, 0.1);
        assert_eq!(config.perc_stubbornness, 0.0);
        assert_eq!(config.option_for_stubbornness, 0);
        assert_eq!(config.default_edge_weight, 0.1);
        assert!(!config.random_weights);
        assert!(config.seed.is_none());
        assert!(config.stubborn_nodes.is_empty());
    }

    #[test]
    fn test_parse_config_from_toml() {
        let toml = r#"
            epsilon = 0.3
            perc_stubbornness = 0.2
            option_for_stubbornness = -1
            seed = 42
            stubborn_nodes = [1, 5]
        "#;

        let config = ModelConfig::from_str(toml).unwrap();

        assert_eq!(config.epsilon, 0.3);
        assert_eq!(config.perc_stubbornness, 0.2);
        assert_eq!(config.option_for_stubbornness, -1);
        assert_eq!(config.seed, Some(42));
        assert_eq!(config.stubborn_nodes, vec![1, 5]);
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let toml = r#"
            epsilon = 0.5
        "#;

        let config = ModelConfig::from_str(toml).unwrap();

        assert_eq!(config.epsilon, 0.5);
        assert_eq!(config.perc_stubbornness, 0.0);
        assert_eq!(config.default_edge_weight, 0.1);
    }

    #[test]
    fn test_invalid_toml_rejected() {
        let result = ModelConfig::from_str("epsilon = \"high\"");
        assert!(matches!(result, Err(ConfigError::TomlError(_))));
    }

    #[test]
    fn test_validate_accepts_defaults() {
        let config = ModelConfig::default();
        assert!(config.validate(&schema()).is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range_epsilon() {
        let config = ModelConfig {
            epsilon: 1.5,
            ..ModelConfig::default()
        };

        let err = config.validate(&schema()).unwrap_err();
        assert!(matches!(err, ConfigError::Param(ParamError::OutOfRange { .. })));
    }

    #[test]
    fn test_validate_rejects_negative_perc() {
        let config = ModelConfig {
            perc_stubbornness: -0.1,
            ..ModelConfig::default()
        };

        assert!(config.validate(&schema()).is_err());
    }

    #[test]
    fn test_validate_rejects_bad_pool_option() {
        let config = ModelConfig {
            option_for_stubbornness: 2,
            ..ModelConfig::default()
        };

        let err = config.validate(&schema()).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPoolOption(2)));
    }

    #[test]
    fn test_boundary_values_accepted() {
        let config = ModelConfig {
            epsilon: 1.0,
            perc_stubbornness: 1.0,
            default_edge_weight: 0.0,
            ..ModelConfig::default()
        };

        assert!(config.validate(&schema()).is_ok());
    }
}
