// =============================================================================
// QKDC Feature Maps - Embedding Error Types
// =============================================================================
// Table of Contents:
//   1. EmbeddingError - Strategy and template errors
//   2. ConfigurationError - Configuration loading errors
// =============================================================================

use qkdc_runtime::error::QuantumRuntimeError;
use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// 1. EmbeddingError - Strategy and template errors
// =============================================================================

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("Circuit rejected gate: {0}")]
    Circuit(#[from] QuantumRuntimeError),

    #[error("{features} features cannot be embedded into {wires} wires")]
    FeatureWireMismatch { features: usize, wires: usize },

    #[error("Weight tensor has shape {actual:?}, expected {expected:?}")]
    InvalidWeightShape {
        expected: (usize, usize, usize),
        actual: (usize, usize, usize),
    },

    #[error("Entangling range {range} is invalid for {wires} wires")]
    InvalidEntanglingRange { range: usize, wires: usize },

    #[error("Weight tensor for {layers} layers over {wires} wires is too large")]
    WeightTensorTooLarge { layers: usize, wires: usize },

    #[error("Expected {layers} entangling ranges, got {provided}")]
    RangeCountMismatch { layers: usize, provided: usize },

    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigurationError),
}

// =============================================================================
// 2. ConfigurationError - Configuration loading errors
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigurationError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse configuration: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type EmbeddingResult<T> = Result<T, EmbeddingError>;

#[cfg(test)]
mod tests {
    use super::*;
    use qkdc_runtime::error::CircuitError;

    #[test]
    fn test_circuit_error_bridges_into_embedding_error() {
        let runtime: QuantumRuntimeError =
            CircuitError::InvalidQubitIndex { index: 0, total: 0 }.into();
        let err: EmbeddingError = runtime.into();
        assert!(matches!(err, EmbeddingError::Circuit(_)));
        assert!(err.to_string().contains("Invalid qubit index 0"));
    }

    #[test]
    fn test_shape_error_message() {
        let err = EmbeddingError::InvalidWeightShape {
            expected: (1, 4, 3),
            actual: (1, 3, 3),
        };
        assert_eq!(
            err.to_string(),
            "Weight tensor has shape (1, 3, 3), expected (1, 4, 3)"
        );
    }
}
