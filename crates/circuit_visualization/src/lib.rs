// =============================================================================
// QKDC Feature Maps - Circuit Visualization
// =============================================================================
// Table of Contents:
//   1. DiagramColumn - One gate laid out across every wire
//   2. CircuitDiagramRenderer - Abstract renderer interface
//   3. AsciiCircuitRenderer - Text wire diagrams
// =============================================================================
// Purpose: Renders recorded feature-map circuits for inspection. Each gate
//          occupies its own column; two-wire gates mark the wires they
//          cross.
// =============================================================================

use qkdc_runtime::circuit_program::{
    CircuitResourceSummary, GateApplicationInstance, QuantumCircuitStructure,
};
use serde::{Deserialize, Serialize};

const WIRE: char = '─';
const CROSSING: &str = "│";
const CONTROL: &str = "●";

// =============================================================================
// 1. DiagramColumn - One gate laid out across every wire
// =============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagramColumn {
    /// One entry per wire; `None` where the wire is idle.
    pub cells: Vec<Option<String>>,
}

impl DiagramColumn {
    pub fn from_instance(
        instance: &GateApplicationInstance,
        number_of_quantum_bits: usize,
        precision: usize,
    ) -> Self {
        let mut cells = vec![None; number_of_quantum_bits];
        let label = gate_label(instance, precision);
        let wires = instance.target_qubits();

        match wires {
            [wire] => cells[*wire] = Some(label),
            [first, second] => {
                let (low, high) = if first < second {
                    (*first, *second)
                } else {
                    (*second, *first)
                };
                for cell in cells.iter_mut().take(high).skip(low + 1) {
                    *cell = Some(CROSSING.to_string());
                }
                let first_label = if is_controlled(instance.gate_name()) {
                    CONTROL.to_string()
                } else {
                    label.clone()
                };
                cells[*first] = Some(first_label);
                cells[*second] = Some(label);
            }
            _ => {
                for &wire in wires {
                    cells[wire] = Some(label.clone());
                }
            }
        }

        Self { cells }
    }

    pub fn width(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .map(|cell| cell.chars().count())
            .max()
            .unwrap_or(0)
    }
}

fn is_controlled(gate_name: &str) -> bool {
    matches!(gate_name, "controlled_not_gate" | "controlled_z_gate")
}

fn base_label(gate_name: &str) -> &str {
    match gate_name {
        "hadamard_gate" => "H",
        "pauli_x_gate" => "X",
        "rotation_x_gate" => "RX",
        "rotation_y_gate" => "RY",
        "rotation_z_gate" => "RZ",
        "general_rotation_gate" => "Rot",
        "controlled_not_gate" => "X",
        "controlled_z_gate" => "Z",
        "single_excitation_gate" => "G",
        other => other,
    }
}

fn gate_label(instance: &GateApplicationInstance, precision: usize) -> String {
    let base = base_label(instance.gate_name());
    let parameters = instance.parameters();
    if parameters.is_empty() {
        return base.to_string();
    }
    let formatted = parameters
        .iter()
        .map(|p| format!("{:.*}", precision, p))
        .collect::<Vec<_>>()
        .join(",");
    format!("{}({})", base, formatted)
}

// =============================================================================
// 2. CircuitDiagramRenderer - Abstract renderer interface
// =============================================================================

pub trait CircuitDiagramRenderer: Send + Sync {
    fn render_circuit(&self, circuit: &QuantumCircuitStructure) -> RenderOutput;
    fn render_summary(&self, summary: &CircuitResourceSummary) -> RenderOutput;
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderOutput {
    pub format: RenderFormat,
    pub data: Vec<u8>,
    pub width: Option<u32>,
    pub height: Option<u32>,
}

impl RenderOutput {
    fn ascii(text: String) -> Self {
        let width = text.lines().map(|line| line.chars().count()).max();
        let height = text.lines().count();
        Self {
            format: RenderFormat::Ascii,
            data: text.into_bytes(),
            width: width.map(|w| w as u32),
            height: Some(height as u32),
        }
    }

    pub fn as_text(&self) -> String {
        String::from_utf8_lossy(&self.data).into_owned()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RenderFormat {
    Ascii,
}

// =============================================================================
// 3. AsciiCircuitRenderer - Text wire diagrams
// =============================================================================

#[derive(Debug, Clone, Copy)]
pub struct AsciiCircuitRenderer {
    precision: usize,
}

impl Default for AsciiCircuitRenderer {
    fn default() -> Self {
        Self { precision: 2 }
    }
}

impl AsciiCircuitRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Digits after the decimal point in gate parameters.
    pub fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    pub fn layout(&self, circuit: &QuantumCircuitStructure) -> Vec<DiagramColumn> {
        circuit
            .gate_application_instances()
            .iter()
            .map(|instance| {
                DiagramColumn::from_instance(
                    instance,
                    circuit.number_of_quantum_bits(),
                    self.precision,
                )
            })
            .collect()
    }
}

impl CircuitDiagramRenderer for AsciiCircuitRenderer {
    fn render_circuit(&self, circuit: &QuantumCircuitStructure) -> RenderOutput {
        let wire_count = circuit.number_of_quantum_bits();
        let columns = self.layout(circuit);
        let index_width = wire_count.saturating_sub(1).to_string().len();

        let mut lines: Vec<String> = (0..wire_count)
            .map(|wire| format!("{:>width$}: {}", wire, WIRE, width = index_width))
            .collect();

        for column in &columns {
            let width = column.width();
            for (line, cell) in lines.iter_mut().zip(&column.cells) {
                let text = cell.as_deref().unwrap_or("");
                line.push_str(text);
                for _ in text.chars().count()..width {
                    line.push(WIRE);
                }
                line.push(WIRE);
            }
        }

        for line in &mut lines {
            line.push('┤');
        }

        RenderOutput::ascii(lines.join("\n"))
    }

    fn render_summary(&self, summary: &CircuitResourceSummary) -> RenderOutput {
        let mut lines = vec![
            format!("wires: {}", summary.number_of_quantum_bits),
            format!("gates: {}", summary.gate_count),
            format!("depth: {}", summary.depth),
            format!("parameters: {}", summary.parameter_count),
            format!("two-qubit gates: {}", summary.two_qubit_gate_count),
        ];
        for (name, count) in &summary.gate_counts_by_name {
            lines.push(format!("  {}: {}", name, count));
        }

        RenderOutput::ascii(lines.join("\n"))
    }
}
