// =============================================================================
// QKDC Feature Maps - Configuration
// =============================================================================
// Table of Contents:
//   1. FeatureMapConfiguration - Loading, overrides and validation
//   2. Section types (pipeline, angle embedding, entangling, logging)
// =============================================================================
// Purpose: Resolves configuration from built-in defaults, then `qkdc.toml`
//          (or an explicit file), then `QKDC_*` environment variables. Later
//          sources override earlier ones.
// =============================================================================

use crate::embedding_strategies::RotationAxis;
use crate::error::ConfigurationError;
use qkdc_runtime::gate_operations::EntanglingGateKind;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::Path;

/// File read when no explicit path is given.
pub const DEFAULT_CONFIGURATION_FILE: &str = "qkdc.toml";

/// Upper bound on `entangling.layers`.
pub const MAX_ENTANGLING_LAYERS: usize = 1024;

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

// =============================================================================
// 1. FeatureMapConfiguration - Loading, overrides and validation
// =============================================================================

/// Main configuration structure.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureMapConfiguration {
    #[serde(default)]
    pub pipeline: PipelineConfig,

    #[serde(default)]
    pub angle_embedding: AngleEmbeddingConfig,

    #[serde(default)]
    pub entangling: EntanglingConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl FeatureMapConfiguration {
    /// Loads configuration from `path`, or from [`DEFAULT_CONFIGURATION_FILE`]
    /// when it exists, then applies environment overrides.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigurationError> {
        let mut configuration = match path {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIGURATION_FILE);
                if default_path.exists() {
                    Self::from_file(default_path)?
                } else {
                    Self::default()
                }
            }
        };

        configuration.apply_env_overrides();
        Ok(configuration)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigurationError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigurationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigurationError> {
        Ok(toml::from_str(content)?)
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = env::var("QKDC_SEED") {
            match val.parse() {
                Ok(seed) => self.pipeline.seed = seed,
                Err(_) => tracing::warn!(value = %val, "ignoring unparsable QKDC_SEED"),
            }
        }
        if let Ok(val) = env::var("QKDC_ENTANGLING_LAYERS") {
            match val.parse() {
                Ok(layers) => self.entangling.layers = layers,
                Err(_) => tracing::warn!(value = %val, "ignoring unparsable QKDC_ENTANGLING_LAYERS"),
            }
        }
        if let Ok(val) = env::var("QKDC_LOG_LEVEL") {
            self.logging.level = val;
        }
    }

    /// Validate configuration.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.pipeline.strategies.is_empty() {
            return Err(ConfigurationError::Invalid(
                "pipeline.strategies must name at least one strategy".into(),
            ));
        }
        if self.entangling.layers == 0 || self.entangling.layers > MAX_ENTANGLING_LAYERS {
            return Err(ConfigurationError::Invalid(format!(
                "entangling.layers must be between 1 and {}, got {}",
                MAX_ENTANGLING_LAYERS, self.entangling.layers
            )));
        }
        if !LOG_LEVELS.contains(&self.logging.level.to_lowercase().as_str()) {
            return Err(ConfigurationError::Invalid(format!(
                "unknown log level '{}'",
                self.logging.level
            )));
        }
        Ok(())
    }
}

// =============================================================================
// 2. Section types
// =============================================================================

/// Strategy names accepted in `pipeline.strategies`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    AngleEmbedding,
    Superposition,
    RotationLoop,
    SingleExcitation,
    StronglyEntangling,
}

/// Pipeline configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Stages applied in order
    #[serde(default = "default_strategies")]
    pub strategies: Vec<StrategyKind>,

    /// Seed for entangling weight draws
    #[serde(default)]
    pub seed: u64,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            strategies: default_strategies(),
            seed: 0,
        }
    }
}

fn default_strategies() -> Vec<StrategyKind> {
    vec![
        StrategyKind::AngleEmbedding,
        StrategyKind::RotationLoop,
        StrategyKind::SingleExcitation,
        StrategyKind::StronglyEntangling,
    ]
}

/// Angle embedding settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AngleEmbeddingConfig {
    #[serde(default)]
    pub rotation_axis: RotationAxis,
}

/// Strongly entangling layer settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntanglingConfig {
    #[serde(default = "default_layers")]
    pub layers: usize,

    #[serde(default = "default_imprimitive")]
    pub imprimitive: EntanglingGateKind,
}

impl Default for EntanglingConfig {
    fn default() -> Self {
        Self {
            layers: default_layers(),
            imprimitive: default_imprimitive(),
        }
    }
}

fn default_layers() -> usize {
    1
}

fn default_imprimitive() -> EntanglingGateKind {
    EntanglingGateKind::ControlledZ
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let configuration = FeatureMapConfiguration::default();
        assert_eq!(configuration.pipeline.seed, 0);
        assert_eq!(configuration.entangling.layers, 1);
        assert_eq!(
            configuration.entangling.imprimitive,
            EntanglingGateKind::ControlledZ
        );
        assert_eq!(configuration.angle_embedding.rotation_axis, RotationAxis::X);
        assert!(configuration.validate().is_ok());
    }

    #[test]
    fn test_parse_full_document() {
        let configuration = FeatureMapConfiguration::from_toml_str(
            r#"
            [pipeline]
            strategies = ["superposition", "strongly_entangling"]
            seed = 1234

            [angle_embedding]
            rotation_axis = "y"

            [entangling]
            layers = 3
            imprimitive = "controlled_not"

            [logging]
            level = "debug"
            "#,
        )
        .unwrap();

        assert_eq!(
            configuration.pipeline.strategies,
            vec![StrategyKind::Superposition, StrategyKind::StronglyEntangling]
        );
        assert_eq!(configuration.pipeline.seed, 1234);
        assert_eq!(configuration.angle_embedding.rotation_axis, RotationAxis::Y);
        assert_eq!(configuration.entangling.layers, 3);
        assert_eq!(
            configuration.entangling.imprimitive,
            EntanglingGateKind::ControlledNot
        );
        assert_eq!(configuration.logging.level, "debug");
    }

    #[test]
    fn test_partial_document_uses_defaults() {
        let configuration =
            FeatureMapConfiguration::from_toml_str("[pipeline]\nseed = 9\n").unwrap();
        assert_eq!(configuration.pipeline.seed, 9);
        assert_eq!(configuration.pipeline.strategies, default_strategies());
        assert_eq!(configuration.logging.level, "info");
    }

    #[test]
    fn test_unknown_strategy_is_a_parse_error() {
        let result = FeatureMapConfiguration::from_toml_str(
            "[pipeline]\nstrategies = [\"amplitude_embedding\"]\n",
        );
        assert!(matches!(result, Err(ConfigurationError::Parse(_))));
    }

    #[test]
    fn test_layer_count_is_capped() {
        let mut configuration = FeatureMapConfiguration::default();
        configuration.entangling.layers = MAX_ENTANGLING_LAYERS;
        assert!(configuration.validate().is_ok());

        configuration.entangling.layers = usize::MAX / 2;
        assert!(matches!(
            configuration.validate(),
            Err(ConfigurationError::Invalid(_))
        ));
    }

    #[test]
    fn test_validation_failures() {
        let mut configuration = FeatureMapConfiguration::default();
        configuration.pipeline.strategies.clear();
        assert!(configuration.validate().is_err());

        let mut configuration = FeatureMapConfiguration::default();
        configuration.entangling.layers = 0;
        assert!(configuration.validate().is_err());

        let mut configuration = FeatureMapConfiguration::default();
        configuration.logging.level = "loud".into();
        assert!(configuration.validate().is_err());
    }

    #[test]
    fn test_load_from_file() {
        let path = std::env::temp_dir().join(format!("qkdc-{}.toml", uuid::Uuid::new_v4()));
        std::fs::write(&path, "[entangling]\nlayers = 2\n").unwrap();

        let configuration = FeatureMapConfiguration::from_file(&path).unwrap();
        assert_eq!(configuration.entangling.layers, 2);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let path = std::env::temp_dir().join(format!("qkdc-missing-{}.toml", uuid::Uuid::new_v4()));
        let result = FeatureMapConfiguration::from_file(&path);
        assert!(matches!(result, Err(ConfigurationError::Io { .. })));
    }

    mod environment {
        use super::*;
        use std::sync::Mutex;

        // Serializes tests that touch QKDC_* process environment variables
        static ENV_LOCK: Mutex<()> = Mutex::new(());

        const VARIABLES: [&str; 3] = ["QKDC_SEED", "QKDC_ENTANGLING_LAYERS", "QKDC_LOG_LEVEL"];

        fn with_env<F: FnOnce()>(vars: &[(&str, &str)], f: F) {
            let _guard = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            for name in VARIABLES {
                unsafe { env::remove_var(name) };
            }
            for (name, value) in vars {
                unsafe { env::set_var(name, value) };
            }
            f();
            for name in VARIABLES {
                unsafe { env::remove_var(name) };
            }
        }

        fn write_config(content: &str) -> std::path::PathBuf {
            let path = std::env::temp_dir().join(format!("qkdc-env-{}.toml", uuid::Uuid::new_v4()));
            std::fs::write(&path, content).unwrap();
            path
        }

        #[test]
        fn test_env_override_seed() {
            let path = write_config("[pipeline]\nseed = 5\n");
            with_env(&[("QKDC_SEED", "77")], || {
                let configuration = FeatureMapConfiguration::load(Some(path.as_path())).unwrap();
                assert_eq!(configuration.pipeline.seed, 77);
            });
            std::fs::remove_file(&path).unwrap();
        }

        #[test]
        fn test_env_override_entangling_layers() {
            with_env(&[("QKDC_ENTANGLING_LAYERS", "4")], || {
                let mut configuration = FeatureMapConfiguration::default();
                configuration.apply_env_overrides();
                assert_eq!(configuration.entangling.layers, 4);
            });
        }

        #[test]
        fn test_env_override_log_level() {
            with_env(&[("QKDC_LOG_LEVEL", "trace")], || {
                let mut configuration = FeatureMapConfiguration::default();
                configuration.apply_env_overrides();
                assert_eq!(configuration.logging.level, "trace");
            });
        }

        #[test]
        fn test_unparsable_seed_keeps_file_value() {
            let path = write_config("[pipeline]\nseed = 5\n[entangling]\nlayers = 2\n");
            with_env(
                &[("QKDC_SEED", "not-a-number"), ("QKDC_ENTANGLING_LAYERS", "-3")],
                || {
                    let configuration = FeatureMapConfiguration::load(Some(path.as_path())).unwrap();
                    assert_eq!(configuration.pipeline.seed, 5);
                    assert_eq!(configuration.entangling.layers, 2);
                },
            );
            std::fs::remove_file(&path).unwrap();
        }

        #[test]
        fn test_load_without_file_uses_defaults() {
            assert!(!Path::new(DEFAULT_CONFIGURATION_FILE).exists());
            with_env(&[], || {
                let configuration = FeatureMapConfiguration::load(None).unwrap();
                assert_eq!(configuration, FeatureMapConfiguration::default());
            });
        }
    }
}
