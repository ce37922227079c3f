// =============================================================================
// QKDC Feature Maps - Runtime Error Types
// =============================================================================
// Table of Contents:
//   1. QuantumRuntimeError - Main error enum
//   2. CircuitError - Circuit construction errors
//   3. ExportError - Serialization and OpenQASM export errors
// =============================================================================
// Purpose: Error handling for the circuit runtime. Every rejected gate
//          application surfaces as a CircuitError wrapped in
//          QuantumRuntimeError.
// =============================================================================

use thiserror::Error;

// =============================================================================
// 1. QuantumRuntimeError - Main error enum
// =============================================================================

#[derive(Debug, Error)]
pub enum QuantumRuntimeError {
    #[error("Circuit error: {0}")]
    Circuit(#[from] CircuitError),

    #[error("Export error: {0}")]
    Export(#[from] ExportError),
}

// =============================================================================
// 2. CircuitError - Circuit construction errors
// =============================================================================

#[derive(Debug, Clone, PartialEq, Error)]
pub enum CircuitError {
    #[error("Invalid qubit index {index}: circuit has {total} qubits")]
    InvalidQubitIndex { index: usize, total: usize },

    #[error("Gate {gate} requires {required} qubits, but {provided} were provided")]
    QubitCountMismatch {
        gate: String,
        required: usize,
        provided: usize,
    },

    #[error("Parameter count mismatch: expected {expected}, got {actual}")]
    ParameterCountMismatch { expected: usize, actual: usize },

    #[error("Invalid gate parameter: {0}")]
    InvalidGateParameter(String),

    #[error("Duplicate qubit in gate targets: qubit {0}")]
    DuplicateQubit(usize),
}

// =============================================================================
// 3. ExportError - Serialization and OpenQASM export errors
// =============================================================================

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Gate {0} has no OpenQASM mapping")]
    UnsupportedGate(String),

    #[error("Gate record serialization failed: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Formatting failed: {0}")]
    Formatting(#[from] std::fmt::Error),
}

// =============================================================================
// Result type alias
// =============================================================================

pub type QuantumResult<T> = Result<T, QuantumRuntimeError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circuit_error_message() {
        let err = CircuitError::InvalidQubitIndex { index: 5, total: 3 };
        assert!(err.to_string().contains("5"));
        assert!(err.to_string().contains("3"));
    }

    #[test]
    fn test_error_conversion() {
        let circuit_err = CircuitError::DuplicateQubit(1);
        let runtime_err: QuantumRuntimeError = circuit_err.into();
        assert!(matches!(runtime_err, QuantumRuntimeError::Circuit(_)));
    }
}
