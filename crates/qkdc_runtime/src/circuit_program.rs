// =============================================================================
// QKDC Feature Maps - Circuit Program IR
// =============================================================================
// Table of Contents:
//   1. CircuitConstructionContext - Target of every embedding strategy
//   2. QuantumCircuitStructure - Recording circuit container
//   3. GateApplicationInstance / GateRecord - Single gate operation
//   4. CircuitResourceSummary - Gate counts and depth
//   5. ParameterizedQuantumCircuit - Variational circuit support
//   6. VariationalCircuitTemplate - Template trait
// =============================================================================
// Purpose: Provides the circuit construction context that embedding
//          strategies append to, and the validated recording circuit that
//          implements it.
// =============================================================================

use crate::error::{CircuitError, QuantumResult};
use crate::gate_operations::{
    ControlledNotGate, ControlledZGate, GeneralRotationGate, HadamardGate, PauliXGate,
    QuantumGateInterface, RotationXGate, RotationYGate, RotationZGate, SingleExcitationGate,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use uuid::Uuid;

// =============================================================================
// 1. CircuitConstructionContext - Target of every embedding strategy
// =============================================================================

/// A circuit under construction that gates can be appended to.
///
/// Implementors only provide the wire count and `append_gate`. The
/// `apply_*` helpers build the gate and forward to `append_gate`, so an
/// external framework can adapt its own circuit type by implementing the two
/// required methods.
pub trait CircuitConstructionContext {
    fn number_of_quantum_bits(&self) -> usize;

    /// Appends a gate. Implementations reject gates that target wires the
    /// circuit does not have.
    fn append_gate(&mut self, gate: Arc<dyn QuantumGateInterface>) -> QuantumResult<()>;

    fn apply_hadamard_gate(&mut self, qubit: usize) -> QuantumResult<()> {
        self.append_gate(Arc::new(HadamardGate::new(qubit)))
    }

    fn apply_pauli_x_gate(&mut self, qubit: usize) -> QuantumResult<()> {
        self.append_gate(Arc::new(PauliXGate::new(qubit)))
    }

    fn apply_rotation_x_gate(&mut self, qubit: usize, theta: f64) -> QuantumResult<()> {
        self.append_gate(Arc::new(RotationXGate::new(qubit, theta)))
    }

    fn apply_rotation_y_gate(&mut self, qubit: usize, theta: f64) -> QuantumResult<()> {
        self.append_gate(Arc::new(RotationYGate::new(qubit, theta)))
    }

    fn apply_rotation_z_gate(&mut self, qubit: usize, theta: f64) -> QuantumResult<()> {
        self.append_gate(Arc::new(RotationZGate::new(qubit, theta)))
    }

    fn apply_general_rotation_gate(
        &mut self,
        qubit: usize,
        phi: f64,
        theta: f64,
        omega: f64,
    ) -> QuantumResult<()> {
        self.append_gate(Arc::new(GeneralRotationGate::new(qubit, phi, theta, omega)))
    }

    fn apply_controlled_not_gate(&mut self, control: usize, target: usize) -> QuantumResult<()> {
        self.append_gate(Arc::new(ControlledNotGate::new(control, target)))
    }

    fn apply_controlled_z_gate(&mut self, control: usize, target: usize) -> QuantumResult<()> {
        self.append_gate(Arc::new(ControlledZGate::new(control, target)))
    }

    fn apply_single_excitation_gate(
        &mut self,
        first: usize,
        second: usize,
        phi: f64,
    ) -> QuantumResult<()> {
        self.append_gate(Arc::new(SingleExcitationGate::new(first, second, phi)))
    }
}

// =============================================================================
// 2. QuantumCircuitStructure - Recording circuit container
// =============================================================================

#[derive(Debug, Clone)]
pub struct QuantumCircuitStructure {
    id: Uuid,
    number_of_quantum_bits: usize,
    gate_application_instances: Vec<GateApplicationInstance>,
}

impl QuantumCircuitStructure {
    pub fn new(number_of_quantum_bits: usize) -> Self {
        Self {
            id: Uuid::new_v4(),
            number_of_quantum_bits,
            gate_application_instances: Vec::new(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn number_of_quantum_bits(&self) -> usize {
        self.number_of_quantum_bits
    }

    pub fn gate_count(&self) -> usize {
        self.gate_application_instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gate_application_instances.is_empty()
    }

    pub fn gate_application_instances(&self) -> &[GateApplicationInstance] {
        &self.gate_application_instances
    }

    /// Names of the recorded gates, in application order.
    pub fn gate_names(&self) -> Vec<&str> {
        self.gate_application_instances
            .iter()
            .map(|instance| instance.gate_name())
            .collect()
    }

    pub fn to_gate_records(&self) -> Vec<GateRecord> {
        self.gate_application_instances
            .iter()
            .map(GateApplicationInstance::to_record)
            .collect()
    }

    pub fn to_json(&self) -> QuantumResult<String> {
        let records = self.to_gate_records();
        serde_json::to_string_pretty(&records)
            .map_err(|e| crate::error::ExportError::from(e).into())
    }

    pub fn resource_summary(&self) -> CircuitResourceSummary {
        CircuitResourceSummary::from_circuit(self)
    }

    fn validate_gate(&self, gate: &dyn QuantumGateInterface) -> Result<Vec<usize>, CircuitError> {
        let targets = gate.target_quantum_bits();
        if targets.len() != gate.quantum_bit_count() {
            return Err(CircuitError::QubitCountMismatch {
                gate: gate.gate_name().to_string(),
                required: gate.quantum_bit_count(),
                provided: targets.len(),
            });
        }

        for (position, &qubit) in targets.iter().enumerate() {
            if qubit >= self.number_of_quantum_bits {
                return Err(CircuitError::InvalidQubitIndex {
                    index: qubit,
                    total: self.number_of_quantum_bits,
                });
            }
            if targets[..position].contains(&qubit) {
                return Err(CircuitError::DuplicateQubit(qubit));
            }
        }

        Ok(targets)
    }
}

impl CircuitConstructionContext for QuantumCircuitStructure {
    fn number_of_quantum_bits(&self) -> usize {
        self.number_of_quantum_bits
    }

    fn append_gate(&mut self, gate: Arc<dyn QuantumGateInterface>) -> QuantumResult<()> {
        let target_quantum_bits = match self.validate_gate(gate.as_ref()) {
            Ok(targets) => targets,
            Err(err) => {
                tracing::debug!(gate = gate.gate_name(), error = %err, "gate rejected");
                return Err(err.into());
            }
        };

        self.gate_application_instances.push(GateApplicationInstance {
            quantum_gate_interface: gate,
            target_quantum_bits,
        });
        Ok(())
    }
}

// =============================================================================
// 3. GateApplicationInstance / GateRecord - Single gate operation
// =============================================================================

#[derive(Debug, Clone)]
pub struct GateApplicationInstance {
    pub quantum_gate_interface: Arc<dyn QuantumGateInterface>,
    pub target_quantum_bits: Vec<usize>,
}

impl GateApplicationInstance {
    pub fn gate_name(&self) -> &str {
        self.quantum_gate_interface.gate_name()
    }

    pub fn target_qubits(&self) -> &[usize] {
        &self.target_quantum_bits
    }

    pub fn parameters(&self) -> Vec<f64> {
        self.quantum_gate_interface.gate_parameters()
    }

    pub fn to_record(&self) -> GateRecord {
        GateRecord {
            gate_name: self.gate_name().to_string(),
            wires: self.target_quantum_bits.clone(),
            parameters: self.parameters(),
        }
    }
}

/// Serializable snapshot of one recorded gate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GateRecord {
    pub gate_name: String,
    pub wires: Vec<usize>,
    pub parameters: Vec<f64>,
}

// =============================================================================
// 4. CircuitResourceSummary - Gate counts and depth
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CircuitResourceSummary {
    pub number_of_quantum_bits: usize,
    pub gate_count: usize,
    pub parameter_count: usize,
    pub two_qubit_gate_count: usize,
    pub depth: usize,
    pub gate_counts_by_name: BTreeMap<String, usize>,
}

impl CircuitResourceSummary {
    pub fn from_circuit(circuit: &QuantumCircuitStructure) -> Self {
        let mut gate_counts_by_name = BTreeMap::new();
        let mut wire_layers = vec![0usize; circuit.number_of_quantum_bits()];
        let mut parameter_count = 0;
        let mut two_qubit_gate_count = 0;
        let mut depth = 0;

        for instance in circuit.gate_application_instances() {
            *gate_counts_by_name
                .entry(instance.gate_name().to_string())
                .or_insert(0) += 1;
            parameter_count += instance.parameters().len();
            if instance.target_qubits().len() == 2 {
                two_qubit_gate_count += 1;
            }

            let layer = instance
                .target_qubits()
                .iter()
                .map(|&wire| wire_layers[wire])
                .max()
                .unwrap_or(0)
                + 1;
            for &wire in instance.target_qubits() {
                wire_layers[wire] = layer;
            }
            depth = depth.max(layer);
        }

        Self {
            number_of_quantum_bits: circuit.number_of_quantum_bits(),
            gate_count: circuit.gate_count(),
            parameter_count,
            two_qubit_gate_count,
            depth,
            gate_counts_by_name,
        }
    }

    pub fn count_of(&self, gate_name: &str) -> usize {
        self.gate_counts_by_name.get(gate_name).copied().unwrap_or(0)
    }
}

// =============================================================================
// 5. ParameterizedQuantumCircuit - Variational circuit
// =============================================================================

type CircuitBuilder = dyn Fn(&[f64]) -> QuantumResult<QuantumCircuitStructure> + Send + Sync;

pub struct ParameterizedQuantumCircuit {
    number_of_quantum_bits: usize,
    number_of_parameters: usize,
    circuit_builder: Box<CircuitBuilder>,
}

impl ParameterizedQuantumCircuit {
    pub fn new<F>(number_of_quantum_bits: usize, number_of_parameters: usize, builder: F) -> Self
    where
        F: Fn(&[f64]) -> QuantumResult<QuantumCircuitStructure> + Send + Sync + 'static,
    {
        Self {
            number_of_quantum_bits,
            number_of_parameters,
            circuit_builder: Box::new(builder),
        }
    }

    pub fn construct_quantum_circuit(
        &self,
        parameters: &[f64],
    ) -> QuantumResult<QuantumCircuitStructure> {
        if parameters.len() != self.number_of_parameters {
            return Err(CircuitError::ParameterCountMismatch {
                expected: self.number_of_parameters,
                actual: parameters.len(),
            }
            .into());
        }
        (self.circuit_builder)(parameters)
    }

    pub fn number_of_quantum_bits(&self) -> usize {
        self.number_of_quantum_bits
    }

    pub fn number_of_parameters(&self) -> usize {
        self.number_of_parameters
    }
}

impl std::fmt::Debug for ParameterizedQuantumCircuit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ParameterizedQuantumCircuit")
            .field("number_of_quantum_bits", &self.number_of_quantum_bits)
            .field("number_of_parameters", &self.number_of_parameters)
            .finish()
    }
}

// =============================================================================
// 6. VariationalCircuitTemplate - Template trait
// =============================================================================

pub trait VariationalCircuitTemplate: Send + Sync {
    fn construct_quantum_circuit(
        &self,
        parameters: &[f64],
    ) -> QuantumResult<QuantumCircuitStructure>;
    fn number_of_parameters(&self) -> usize;
    fn number_of_quantum_bits(&self) -> usize;
}

impl VariationalCircuitTemplate for ParameterizedQuantumCircuit {
    fn construct_quantum_circuit(
        &self,
        parameters: &[f64],
    ) -> QuantumResult<QuantumCircuitStructure> {
        ParameterizedQuantumCircuit::construct_quantum_circuit(self, parameters)
    }

    fn number_of_parameters(&self) -> usize {
        self.number_of_parameters
    }

    fn number_of_quantum_bits(&self) -> usize {
        self.number_of_quantum_bits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::QuantumRuntimeError;

    #[test]
    fn test_circuit_creation() {
        let mut circuit = QuantumCircuitStructure::new(2);
        circuit.apply_hadamard_gate(0).unwrap();
        circuit.apply_controlled_z_gate(0, 1).unwrap();

        assert_eq!(circuit.number_of_quantum_bits(), 2);
        assert_eq!(circuit.gate_count(), 2);
        assert_eq!(
            circuit.gate_names(),
            vec!["hadamard_gate", "controlled_z_gate"]
        );
    }

    #[test]
    fn test_out_of_range_wire_is_rejected() {
        let mut circuit = QuantumCircuitStructure::new(2);
        let err = circuit.apply_rotation_x_gate(2, 0.5).unwrap_err();

        assert!(matches!(
            err,
            QuantumRuntimeError::Circuit(CircuitError::InvalidQubitIndex { index: 2, total: 2 })
        ));
        assert!(circuit.is_empty());
    }

    #[test]
    fn test_empty_circuit_rejects_every_gate() {
        let mut circuit = QuantumCircuitStructure::new(0);
        assert!(circuit.apply_pauli_x_gate(0).is_err());
        assert_eq!(circuit.gate_count(), 0);
    }

    #[test]
    fn test_duplicate_wire_is_rejected() {
        let mut circuit = QuantumCircuitStructure::new(3);
        circuit.apply_hadamard_gate(1).unwrap();
        let err = circuit.apply_single_excitation_gate(1, 1, 0.3).unwrap_err();

        assert!(matches!(
            err,
            QuantumRuntimeError::Circuit(CircuitError::DuplicateQubit(1))
        ));
        assert_eq!(circuit.gate_count(), 1);
    }

    #[test]
    fn test_gate_records_preserve_order_and_parameters() {
        let mut circuit = QuantumCircuitStructure::new(2);
        circuit.apply_rotation_y_gate(1, 0.75).unwrap();
        circuit.apply_single_excitation_gate(0, 1, -0.5).unwrap();

        let records = circuit.to_gate_records();
        assert_eq!(
            records,
            vec![
                GateRecord {
                    gate_name: "rotation_y_gate".into(),
                    wires: vec![1],
                    parameters: vec![0.75],
                },
                GateRecord {
                    gate_name: "single_excitation_gate".into(),
                    wires: vec![0, 1],
                    parameters: vec![-0.5],
                },
            ]
        );

        let json = circuit.to_json().unwrap();
        let parsed: Vec<GateRecord> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, records);
    }

    #[test]
    fn test_resource_summary_depth() {
        let mut circuit = QuantumCircuitStructure::new(3);
        circuit.apply_hadamard_gate(0).unwrap();
        circuit.apply_hadamard_gate(1).unwrap();
        circuit.apply_hadamard_gate(2).unwrap();
        circuit.apply_controlled_not_gate(0, 1).unwrap();
        circuit.apply_controlled_not_gate(1, 2).unwrap();
        circuit.apply_general_rotation_gate(0, 0.1, 0.2, 0.3).unwrap();

        let summary = circuit.resource_summary();
        assert_eq!(summary.gate_count, 6);
        assert_eq!(summary.depth, 3);
        assert_eq!(summary.parameter_count, 3);
        assert_eq!(summary.two_qubit_gate_count, 2);
        assert_eq!(summary.count_of("hadamard_gate"), 3);
        assert_eq!(summary.count_of("pauli_x_gate"), 0);
    }

    #[test]
    fn test_parameterized_circuit() {
        let param_circuit = ParameterizedQuantumCircuit::new(2, 2, |params| {
            let mut circuit = QuantumCircuitStructure::new(2);
            circuit.apply_rotation_x_gate(0, params[0])?;
            circuit.apply_rotation_y_gate(1, params[1])?;
            circuit.apply_controlled_not_gate(0, 1)?;
            Ok(circuit)
        });

        let circuit = param_circuit.construct_quantum_circuit(&[0.5, 1.0]).unwrap();
        assert_eq!(circuit.gate_count(), 3);

        let err = param_circuit.construct_quantum_circuit(&[0.5]).unwrap_err();
        assert!(matches!(
            err,
            QuantumRuntimeError::Circuit(CircuitError::ParameterCountMismatch {
                expected: 2,
                actual: 1
            })
        ));
    }
}
