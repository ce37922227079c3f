// =============================================================================
// QKDC Feature Maps - Circuit Runtime
// =============================================================================
// Table of Contents:
//   1. Module Declarations
//   2. Prelude Module
// =============================================================================
// Purpose: Circuit runtime layer providing the gate IR, the circuit
//          construction context that embedding strategies append to, a
//          validated recording circuit, resource summaries and OpenQASM 3
//          export.
// =============================================================================

pub mod circuit_program;
pub mod error;
pub mod gate_operations;
pub mod qasm;

pub mod prelude {
    pub use crate::circuit_program::*;
    pub use crate::error::*;
    pub use crate::gate_operations::*;
    pub use crate::qasm::to_openqasm3;
}
