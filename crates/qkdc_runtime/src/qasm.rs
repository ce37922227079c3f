// =============================================================================
// QKDC Feature Maps - OpenQASM 3 Export
// =============================================================================
// Table of Contents:
//   1. Angle formatting
//   2. Gate definitions for non-standard gates
//   3. Program rendering
// =============================================================================
// Purpose: Renders a recorded circuit as an OpenQASM 3.0 program so feature
//          maps can be handed to any toolchain that reads QASM. Gates outside
//          stdgates.inc are emitted through local `gate` definitions.
// =============================================================================

use crate::circuit_program::{GateApplicationInstance, QuantumCircuitStructure};
use crate::error::{CircuitError, ExportError, QuantumResult};
use std::collections::BTreeSet;
use std::fmt::Write;

// =============================================================================
// 1. Angle formatting
// =============================================================================

fn format_angle(angle: f64) -> QuantumResult<String> {
    if !angle.is_finite() {
        return Err(CircuitError::InvalidGateParameter(format!(
            "angle {} cannot be written to OpenQASM",
            angle
        ))
        .into());
    }

    let magnitude = angle.abs();
    if magnitude == 0.0 {
        return Ok("0".to_string());
    }

    if (1e-4..1e6).contains(&magnitude) {
        let fixed = format!("{:.15}", angle);
        let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
        Ok(trimmed.to_string())
    } else {
        Ok(format!("{:.15e}", angle))
    }
}

// =============================================================================
// 2. Gate definitions for non-standard gates
// =============================================================================

const GENERAL_ROTATION_DEFINITION: &str =
    "gate rot(phi, theta, omega) a {\n  rz(phi) a;\n  ry(theta) a;\n  rz(omega) a;\n}\n";

const SINGLE_EXCITATION_DEFINITION: &str =
    "gate single_excitation(theta) a, b {\n  cx b, a;\n  cry(-theta) a, b;\n  cx b, a;\n}\n";

const STANDARD_GATES: [&str; 7] = ["h", "x", "rx", "ry", "rz", "cx", "cz"];

fn gate_definition(openqasm_name: &str) -> Option<&'static str> {
    match openqasm_name {
        "rot" => Some(GENERAL_ROTATION_DEFINITION),
        "single_excitation" => Some(SINGLE_EXCITATION_DEFINITION),
        _ => None,
    }
}

// =============================================================================
// 3. Program rendering
// =============================================================================

/// Converts a recorded circuit into an OpenQASM 3.0 program.
///
/// Definitions for `rot` and `single_excitation` are emitted only when the
/// circuit uses them. Fails on a gate with no OpenQASM mapping or a
/// non-finite parameter.
pub fn to_openqasm3(circuit: &QuantumCircuitStructure) -> QuantumResult<String> {
    let mut program = String::with_capacity(128 + circuit.gate_count() * 32);

    writeln!(program, "OPENQASM 3.0;").map_err(ExportError::from)?;
    writeln!(program, "include \"stdgates.inc\";").map_err(ExportError::from)?;

    let mut defined = BTreeSet::new();
    for instance in circuit.gate_application_instances() {
        let name = instance.quantum_gate_interface.openqasm_name();
        if STANDARD_GATES.contains(&name) {
            continue;
        }
        match gate_definition(name) {
            Some(definition) => {
                if defined.insert(name) {
                    program.push_str(definition);
                }
            }
            None => return Err(ExportError::UnsupportedGate(name.to_string()).into()),
        }
    }

    writeln!(program, "qubit[{}] q;", circuit.number_of_quantum_bits())
        .map_err(ExportError::from)?;

    for instance in circuit.gate_application_instances() {
        emit_gate(&mut program, instance)?;
    }

    Ok(program)
}

fn emit_gate(program: &mut String, instance: &GateApplicationInstance) -> QuantumResult<()> {
    let name = instance.quantum_gate_interface.openqasm_name();
    let wires = instance
        .target_qubits()
        .iter()
        .map(|wire| format!("q[{}]", wire))
        .collect::<Vec<_>>()
        .join(", ");

    let parameters = instance.parameters();
    if parameters.is_empty() {
        writeln!(program, "{} {};", name, wires).map_err(ExportError::from)?;
    } else {
        let angles = parameters
            .into_iter()
            .map(format_angle)
            .collect::<QuantumResult<Vec<_>>>()?
            .join(", ");
        writeln!(program, "{}({}) {};", name, angles, wires).map_err(ExportError::from)?;
    }
    Ok(())
}
