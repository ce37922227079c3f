//! Benchmarks for feature-map circuit construction.
//!
//! Run with: `cargo bench -p feature_embedding`

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use feature_embedding::prelude::*;
use qkdc_runtime::circuit_program::QuantumCircuitStructure;
use qkdc_runtime::gate_operations::EntanglingGateKind;

fn sample(wires: usize) -> Vec<f64> {
    (0..wires).map(|i| 0.1 + 0.05 * i as f64).collect()
}

/// Benchmark each strategy on its own
fn bench_strategies(c: &mut Criterion) {
    let mut group = c.benchmark_group("strategies");

    for wires in [4usize, 16, 64] {
        let inputs = sample(wires);
        group.throughput(Throughput::Elements(wires as u64));

        group.bench_with_input(BenchmarkId::new("rot_loop", wires), &inputs, |b, inputs| {
            b.iter(|| {
                let mut circuit = QuantumCircuitStructure::new(inputs.len());
                rot_loop(&mut circuit, black_box(inputs)).unwrap();
                black_box(circuit);
            });
        });

        group.bench_with_input(BenchmarkId::new("single_x", wires), &inputs, |b, inputs| {
            b.iter(|| {
                let mut circuit = QuantumCircuitStructure::new(inputs.len());
                single_x(&mut circuit, black_box(inputs)).unwrap();
                black_box(circuit);
            });
        });

        group.bench_with_input(BenchmarkId::new("strong_tangle", wires), &inputs, |b, inputs| {
            b.iter(|| {
                let mut circuit = QuantumCircuitStructure::new(inputs.len());
                strong_tangle(&mut circuit, black_box(inputs), EntanglementKey::from_seed(7))
                    .unwrap();
                black_box(circuit);
            });
        });
    }

    group.finish();
}

/// Benchmark a full pipeline over a batch of samples
fn bench_pipeline(c: &mut Criterion) {
    let samples: Vec<Vec<f64>> = (0..32).map(|_| sample(8)).collect();

    c.bench_function("pipeline_batch_32x8", |b| {
        b.iter(|| {
            let mut pipeline = FeatureMapPipeline::new(
                vec![
                    EmbeddingStrategy::Superposition,
                    EmbeddingStrategy::RotationLoop,
                    EmbeddingStrategy::SingleExcitation,
                    EmbeddingStrategy::StronglyEntangling {
                        layers: 2,
                        imprimitive: EntanglingGateKind::ControlledZ,
                    },
                ],
                42,
            );
            black_box(pipeline.build_circuits(&samples).unwrap());
        });
    });
}

criterion_group!(benches, bench_strategies, bench_pipeline);
criterion_main!(benches);
