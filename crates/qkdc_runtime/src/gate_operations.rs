// =============================================================================
// QKDC Feature Maps - Gate Operations
// =============================================================================
// Table of Contents:
//   1. QuantumGateInterface - Core trait for all gates
//   2. Fixed single-qubit gates (Hadamard, Pauli X)
//   3. Parametrized single-qubit gates (RX, RY, RZ, Rot)
//   4. Two-qubit gates (CNOT, CZ, SingleExcitation)
//   5. EntanglingGateKind - Imprimitive selection
// =============================================================================
// Purpose: Describes the gates that embedding strategies place on a circuit.
//          A gate is a name, an ordered list of target wires and its
//          parameters. Unitaries are left to whichever framework executes
//          the recorded circuit.
// =============================================================================

use serde::{Deserialize, Serialize};
use std::sync::Arc;

// =============================================================================
// 1. QuantumGateInterface - Core trait for all gates
// =============================================================================

pub trait QuantumGateInterface: Send + Sync + std::fmt::Debug {
    fn gate_name(&self) -> &str;
    fn target_quantum_bits(&self) -> Vec<usize>;

    /// Number of wires the gate acts on.
    fn quantum_bit_count(&self) -> usize;

    fn gate_parameters(&self) -> Vec<f64> {
        Vec::new()
    }

    /// Identifier used by the OpenQASM 3 exporter.
    fn openqasm_name(&self) -> &str;

    fn is_parameterized(&self) -> bool {
        !self.gate_parameters().is_empty()
    }
}

// =============================================================================
// 2. Fixed single-qubit gates
// =============================================================================

#[derive(Debug, Clone)]
pub struct HadamardGate {
    target_qubit: usize,
}

impl HadamardGate {
    pub fn new(target_qubit: usize) -> Self {
        Self { target_qubit }
    }
}

impl QuantumGateInterface for HadamardGate {
    fn gate_name(&self) -> &str {
        "hadamard_gate"
    }

    fn target_quantum_bits(&self) -> Vec<usize> {
        vec![self.target_qubit]
    }

    fn quantum_bit_count(&self) -> usize {
        1
    }

    fn openqasm_name(&self) -> &str {
        "h"
    }
}

#[derive(Debug, Clone)]
pub struct PauliXGate {
    target_qubit: usize,
}

impl PauliXGate {
    pub fn new(target_qubit: usize) -> Self {
        Self { target_qubit }
    }
}

impl QuantumGateInterface for PauliXGate {
    fn gate_name(&self) -> &str {
        "pauli_x_gate"
    }

    fn target_quantum_bits(&self) -> Vec<usize> {
        vec![self.target_qubit]
    }

    fn quantum_bit_count(&self) -> usize {
        1
    }

    fn openqasm_name(&self) -> &str {
        "x"
    }
}

// =============================================================================
// 3. Parametrized single-qubit gates
// =============================================================================

#[derive(Debug, Clone)]
pub struct RotationXGate {
    target_qubit: usize,
    theta: f64,
}

impl RotationXGate {
    pub fn new(target_qubit: usize, theta: f64) -> Self {
        Self { target_qubit, theta }
    }
}

impl QuantumGateInterface for RotationXGate {
    fn gate_name(&self) -> &str {
        "rotation_x_gate"
    }

    fn target_quantum_bits(&self) -> Vec<usize> {
        vec![self.target_qubit]
    }

    fn quantum_bit_count(&self) -> usize {
        1
    }

    fn gate_parameters(&self) -> Vec<f64> {
        vec![self.theta]
    }

    fn openqasm_name(&self) -> &str {
        "rx"
    }
}

#[derive(Debug, Clone)]
pub struct RotationYGate {
    target_qubit: usize,
    theta: f64,
}

impl RotationYGate {
    pub fn new(target_qubit: usize, theta: f64) -> Self {
        Self { target_qubit, theta }
    }
}

impl QuantumGateInterface for RotationYGate {
    fn gate_name(&self) -> &str {
        "rotation_y_gate"
    }

    fn target_quantum_bits(&self) -> Vec<usize> {
        vec![self.target_qubit]
    }

    fn quantum_bit_count(&self) -> usize {
        1
    }

    fn gate_parameters(&self) -> Vec<f64> {
        vec![self.theta]
    }

    fn openqasm_name(&self) -> &str {
        "ry"
    }
}

#[derive(Debug, Clone)]
pub struct RotationZGate {
    target_qubit: usize,
    theta: f64,
}

impl RotationZGate {
    pub fn new(target_qubit: usize, theta: f64) -> Self {
        Self { target_qubit, theta }
    }
}

impl QuantumGateInterface for RotationZGate {
    fn gate_name(&self) -> &str {
        "rotation_z_gate"
    }

    fn target_quantum_bits(&self) -> Vec<usize> {
        vec![self.target_qubit]
    }

    fn quantum_bit_count(&self) -> usize {
        1
    }

    fn gate_parameters(&self) -> Vec<f64> {
        vec![self.theta]
    }

    fn openqasm_name(&self) -> &str {
        "rz"
    }
}

/// General single-qubit rotation `RZ(omega) RY(theta) RZ(phi)`.
///
/// Parameters are reported in application order: `[phi, theta, omega]`.
#[derive(Debug, Clone)]
pub struct GeneralRotationGate {
    target_qubit: usize,
    phi: f64,
    theta: f64,
    omega: f64,
}

impl GeneralRotationGate {
    pub fn new(target_qubit: usize, phi: f64, theta: f64, omega: f64) -> Self {
        Self {
            target_qubit,
            phi,
            theta,
            omega,
        }
    }
}

impl QuantumGateInterface for GeneralRotationGate {
    fn gate_name(&self) -> &str {
        "general_rotation_gate"
    }

    fn target_quantum_bits(&self) -> Vec<usize> {
        vec![self.target_qubit]
    }

    fn quantum_bit_count(&self) -> usize {
        1
    }

    fn gate_parameters(&self) -> Vec<f64> {
        vec![self.phi, self.theta, self.omega]
    }

    fn openqasm_name(&self) -> &str {
        "rot"
    }
}

// =============================================================================
// 4. Two-qubit gates
// =============================================================================

#[derive(Debug, Clone)]
pub struct ControlledNotGate {
    control_qubit: usize,
    target_qubit: usize,
}

impl ControlledNotGate {
    pub fn new(control_qubit: usize, target_qubit: usize) -> Self {
        Self {
            control_qubit,
            target_qubit,
        }
    }
}

impl QuantumGateInterface for ControlledNotGate {
    fn gate_name(&self) -> &str {
        "controlled_not_gate"
    }

    fn target_quantum_bits(&self) -> Vec<usize> {
        vec![self.control_qubit, self.target_qubit]
    }

    fn quantum_bit_count(&self) -> usize {
        2
    }

    fn openqasm_name(&self) -> &str {
        "cx"
    }
}

#[derive(Debug, Clone)]
pub struct ControlledZGate {
    control_qubit: usize,
    target_qubit: usize,
}

impl ControlledZGate {
    pub fn new(control_qubit: usize, target_qubit: usize) -> Self {
        Self {
            control_qubit,
            target_qubit,
        }
    }
}

impl QuantumGateInterface for ControlledZGate {
    fn gate_name(&self) -> &str {
        "controlled_z_gate"
    }

    fn target_quantum_bits(&self) -> Vec<usize> {
        vec![self.control_qubit, self.target_qubit]
    }

    fn quantum_bit_count(&self) -> usize {
        2
    }

    fn openqasm_name(&self) -> &str {
        "cz"
    }
}

/// Givens rotation by `phi` in the `{|01>, |10>}` subspace of two wires.
#[derive(Debug, Clone)]
pub struct SingleExcitationGate {
    first_qubit: usize,
    second_qubit: usize,
    phi: f64,
}

impl SingleExcitationGate {
    pub fn new(first_qubit: usize, second_qubit: usize, phi: f64) -> Self {
        Self {
            first_qubit,
            second_qubit,
            phi,
        }
    }
}

impl QuantumGateInterface for SingleExcitationGate {
    fn gate_name(&self) -> &str {
        "single_excitation_gate"
    }

    fn target_quantum_bits(&self) -> Vec<usize> {
        vec![self.first_qubit, self.second_qubit]
    }

    fn quantum_bit_count(&self) -> usize {
        2
    }

    fn gate_parameters(&self) -> Vec<f64> {
        vec![self.phi]
    }

    fn openqasm_name(&self) -> &str {
        "single_excitation"
    }
}

// =============================================================================
// 5. EntanglingGateKind - Imprimitive selection
// =============================================================================

/// Two-qubit gate used to entangle neighbouring wires in layered templates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntanglingGateKind {
    #[default]
    ControlledNot,
    ControlledZ,
}

impl EntanglingGateKind {
    pub fn build(self, control: usize, target: usize) -> Arc<dyn QuantumGateInterface> {
        match self {
            EntanglingGateKind::ControlledNot => Arc::new(ControlledNotGate::new(control, target)),
            EntanglingGateKind::ControlledZ => Arc::new(ControlledZGate::new(control, target)),
        }
    }
}
