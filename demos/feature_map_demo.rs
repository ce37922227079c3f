// =============================================================================
// QKDC Feature Maps - Feature Map Demo
// =============================================================================
// Table of Contents:
//   1. Configuration and logging
//   2. Circuit construction through the pipeline
//   3. Resource summary and diagram
//   4. OpenQASM and JSON export
// =============================================================================
// Purpose: Builds a feature-map circuit for one sample vector and prints the
//          artefacts a kernel experiment would hand to an execution backend.
// =============================================================================

use anyhow::Context;
use circuit_visualization::{AsciiCircuitRenderer, CircuitDiagramRenderer};
use feature_embedding::prelude::*;
use qkdc_runtime::qasm::to_openqasm3;
use std::path::PathBuf;

fn main() -> anyhow::Result<()> {
    // =========================================================================
    // 1. Configuration and logging
    // =========================================================================
    let config_path = std::env::args().nth(1).map(PathBuf::from);
    let configuration = FeatureMapConfiguration::load(config_path.as_deref())
        .context("loading feature map configuration")?;
    initialize_tracing(&configuration.logging.level);

    tracing::info!(
        strategies = configuration.pipeline.strategies.len(),
        seed = configuration.pipeline.seed,
        "configuration loaded"
    );

    // =========================================================================
    // 2. Circuit construction through the pipeline
    // =========================================================================
    let sample = [0.12, 0.57, 0.91, 0.33];
    let pepper = [0.8, 0.1, 0.4, 0.6];

    let mut pipeline = FeatureMapPipeline::from_configuration(&configuration)?;
    let circuit = pipeline
        .build_circuit(&sample, Some(&pepper))
        .context("building feature map circuit")?;

    // =========================================================================
    // 3. Resource summary and diagram
    // =========================================================================
    let renderer = AsciiCircuitRenderer::new();
    let summary = circuit.resource_summary();
    tracing::info!(
        circuit_id = %circuit.id(),
        gates = summary.gate_count,
        depth = summary.depth,
        "feature map ready"
    );

    println!("{}\n", renderer.render_circuit(&circuit).as_text());
    println!("{}\n", renderer.render_summary(&summary).as_text());

    // =========================================================================
    // 4. OpenQASM and JSON export
    // =========================================================================
    let program = to_openqasm3(&circuit).context("exporting OpenQASM")?;
    println!("{}", program);
    println!("{}", circuit.to_json()?);

    Ok(())
}
