// =============================================================================
// QKDC Feature Maps - Feature Map Pipeline
// =============================================================================
// Table of Contents:
//   1. EmbeddingStrategy - One stage of a feature map
//   2. FeatureMapPipeline - Ordered stages applied per sample
// =============================================================================
// Purpose: Composes embedding strategies into a feature-map circuit for one
//          input vector. Strongly entangling stages draw their weights from a
//          key derived from the pipeline seed and a running draw counter, so
//          a pipeline rebuilt from the same seed reproduces its circuits.
// =============================================================================

use crate::config::{FeatureMapConfiguration, StrategyKind};
use crate::embedding_strategies::{RotationAxis, angle_embed_about, rot_loop, single_x, super_pos};
use crate::error::EmbeddingResult;
use crate::strongly_entangling::{EntanglementKey, strong_tangle_layers};
use qkdc_runtime::circuit_program::{CircuitConstructionContext, QuantumCircuitStructure};
use qkdc_runtime::gate_operations::EntanglingGateKind;
use serde::{Deserialize, Serialize};

// =============================================================================
// 1. EmbeddingStrategy - One stage of a feature map
// =============================================================================

/// Stages are tagged by `kind` when serialized, e.g.
/// `{ kind = "strongly_entangling", layers = 2, imprimitive = "controlled_z" }`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EmbeddingStrategy {
    /// Embeds the pepper vector. Without a pepper the stage induces
    /// superposition instead.
    AngleEmbedding { axis: RotationAxis },
    Superposition,
    RotationLoop,
    SingleExcitation,
    StronglyEntangling {
        layers: usize,
        imprimitive: EntanglingGateKind,
    },
}

impl EmbeddingStrategy {
    pub fn strategy_name(&self) -> &'static str {
        match self {
            EmbeddingStrategy::AngleEmbedding { .. } => "angle_embedding",
            EmbeddingStrategy::Superposition => "superposition",
            EmbeddingStrategy::RotationLoop => "rotation_loop",
            EmbeddingStrategy::SingleExcitation => "single_excitation",
            EmbeddingStrategy::StronglyEntangling { .. } => "strongly_entangling",
        }
    }
}

// =============================================================================
// 2. FeatureMapPipeline - Ordered stages applied per sample
// =============================================================================

#[derive(Debug)]
pub struct FeatureMapPipeline {
    strategies: Vec<EmbeddingStrategy>,
    base_key: EntanglementKey,
    draw_count: u64,
}

impl FeatureMapPipeline {
    pub fn new(strategies: Vec<EmbeddingStrategy>, seed: u64) -> Self {
        Self {
            strategies,
            base_key: EntanglementKey::from_seed(seed),
            draw_count: 0,
        }
    }

    pub fn from_configuration(configuration: &FeatureMapConfiguration) -> EmbeddingResult<Self> {
        configuration.validate()?;

        let strategies = configuration
            .pipeline
            .strategies
            .iter()
            .map(|kind| match kind {
                StrategyKind::AngleEmbedding => EmbeddingStrategy::AngleEmbedding {
                    axis: configuration.angle_embedding.rotation_axis,
                },
                StrategyKind::Superposition => EmbeddingStrategy::Superposition,
                StrategyKind::RotationLoop => EmbeddingStrategy::RotationLoop,
                StrategyKind::SingleExcitation => EmbeddingStrategy::SingleExcitation,
                StrategyKind::StronglyEntangling => EmbeddingStrategy::StronglyEntangling {
                    layers: configuration.entangling.layers,
                    imprimitive: configuration.entangling.imprimitive,
                },
            })
            .collect();

        Ok(Self::new(strategies, configuration.pipeline.seed))
    }

    pub fn strategies(&self) -> &[EmbeddingStrategy] {
        &self.strategies
    }

    /// Number of weight draws made so far.
    pub fn draw_count(&self) -> u64 {
        self.draw_count
    }

    fn next_key(&mut self) -> EntanglementKey {
        let key = self.base_key.fold_in(self.draw_count);
        self.draw_count += 1;
        key
    }

    /// Applies every stage, in order, to an existing context.
    pub fn apply_to<C>(
        &mut self,
        context: &mut C,
        inputs: &[f64],
        pepper: Option<&[f64]>,
    ) -> EmbeddingResult<()>
    where
        C: CircuitConstructionContext + ?Sized,
    {
        for strategy in self.strategies.clone() {
            match strategy {
                EmbeddingStrategy::AngleEmbedding { axis } => match pepper {
                    Some(pepper) => angle_embed_about(context, inputs, pepper, axis)?,
                    None => {
                        tracing::debug!("no pepper supplied, inducing superposition instead");
                        super_pos(context, inputs)?
                    }
                },
                EmbeddingStrategy::Superposition => super_pos(context, inputs)?,
                EmbeddingStrategy::RotationLoop => rot_loop(context, inputs)?,
                EmbeddingStrategy::SingleExcitation => single_x(context, inputs)?,
                EmbeddingStrategy::StronglyEntangling {
                    layers,
                    imprimitive,
                } => {
                    let key = self.next_key();
                    strong_tangle_layers(context, inputs, key, layers, imprimitive)?
                }
            }
        }
        Ok(())
    }

    /// Builds a fresh circuit with one wire per input value.
    pub fn build_circuit(
        &mut self,
        inputs: &[f64],
        pepper: Option<&[f64]>,
    ) -> EmbeddingResult<QuantumCircuitStructure> {
        let mut circuit = QuantumCircuitStructure::new(inputs.len());
        self.apply_to(&mut circuit, inputs, pepper)?;

        tracing::debug!(
            circuit_id = %circuit.id(),
            wires = inputs.len(),
            stages = self.strategies.len(),
            gates = circuit.gate_count(),
            "feature map circuit built"
        );
        Ok(circuit)
    }

    /// Builds one circuit per sample, without pepper.
    pub fn build_circuits<S>(&mut self, samples: &[S]) -> EmbeddingResult<Vec<QuantumCircuitStructure>>
    where
        S: AsRef<[f64]>,
    {
        samples
            .iter()
            .map(|sample| self.build_circuit(sample.as_ref(), None))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EmbeddingError;

    fn full_pipeline(seed: u64) -> FeatureMapPipeline {
        FeatureMapPipeline::new(
            vec![
                EmbeddingStrategy::AngleEmbedding {
                    axis: RotationAxis::X,
                },
                EmbeddingStrategy::RotationLoop,
                EmbeddingStrategy::SingleExcitation,
                EmbeddingStrategy::StronglyEntangling {
                    layers: 1,
                    imprimitive: EntanglingGateKind::ControlledZ,
                },
            ],
            seed,
        )
    }

    #[test]
    fn test_stages_applied_in_order() {
        let inputs = [0.1, 0.2, 0.3];
        let pepper = [1.0, 2.0, 3.0];
        let mut pipeline = full_pipeline(5);

        let circuit = pipeline.build_circuit(&inputs, Some(&pepper)).unwrap();
        let names = circuit.gate_names();

        assert_eq!(circuit.number_of_quantum_bits(), 3);
        assert_eq!(circuit.gate_count(), 3 + 9 + 3 + 6);
        assert_eq!(&names[..3], &["rotation_x_gate"; 3]);
        assert_eq!(names[12], "pauli_x_gate");
        assert_eq!(names[15], "general_rotation_gate");
        assert_eq!(pipeline.draw_count(), 1);
    }

    #[test]
    fn test_missing_pepper_falls_back_to_superposition() {
        let mut pipeline = FeatureMapPipeline::new(
            vec![EmbeddingStrategy::AngleEmbedding {
                axis: RotationAxis::Z,
            }],
            0,
        );
        let circuit = pipeline.build_circuit(&[0.5, 0.5], None).unwrap();
        assert_eq!(circuit.gate_names(), vec!["hadamard_gate", "hadamard_gate"]);
    }

    #[test]
    fn test_successive_circuits_draw_fresh_weights() {
        let inputs = [0.1, 0.2];
        let mut pipeline = full_pipeline(17);
        let first = pipeline.build_circuit(&inputs, None).unwrap();
        let second = pipeline.build_circuit(&inputs, None).unwrap();
        assert_ne!(first.to_gate_records(), second.to_gate_records());

        let mut replay = full_pipeline(17);
        let replayed = replay.build_circuit(&inputs, None).unwrap();
        assert_eq!(first.to_gate_records(), replayed.to_gate_records());
    }

    #[test]
    fn test_build_circuits_per_sample() {
        let samples = vec![vec![0.1, 0.2], vec![0.3, 0.4, 0.5]];
        let mut pipeline = FeatureMapPipeline::new(vec![EmbeddingStrategy::Superposition], 0);
        let circuits = pipeline.build_circuits(&samples).unwrap();

        assert_eq!(circuits.len(), 2);
        assert_eq!(circuits[0].number_of_quantum_bits(), 2);
        assert_eq!(circuits[1].gate_count(), 3);
    }

    #[test]
    fn test_empty_input_surfaces_context_error() {
        let mut pipeline = FeatureMapPipeline::new(vec![EmbeddingStrategy::SingleExcitation], 0);
        let err = pipeline.build_circuit(&[], None).unwrap_err();
        assert!(matches!(err, EmbeddingError::Circuit(_)));
    }

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Stages {
        stages: Vec<EmbeddingStrategy>,
    }

    #[test]
    fn test_strategies_parse_from_toml() {
        let parsed: Stages = toml::from_str(
            r#"
            [[stages]]
            kind = "angle_embedding"
            axis = "z"

            [[stages]]
            kind = "rotation_loop"

            [[stages]]
            kind = "strongly_entangling"
            layers = 2
            imprimitive = "controlled_not"
            "#,
        )
        .unwrap();

        assert_eq!(
            parsed.stages,
            vec![
                EmbeddingStrategy::AngleEmbedding {
                    axis: RotationAxis::Z
                },
                EmbeddingStrategy::RotationLoop,
                EmbeddingStrategy::StronglyEntangling {
                    layers: 2,
                    imprimitive: EntanglingGateKind::ControlledNot,
                },
            ]
        );

        let written = toml::to_string(&parsed).unwrap();
        assert!(written.contains("kind = \"strongly_entangling\""));
        assert_eq!(toml::from_str::<Stages>(&written).unwrap(), parsed);
    }

    #[test]
    fn test_unknown_stage_kind_is_rejected() {
        let result = toml::from_str::<Stages>("[[stages]]\nkind = \"amplitude\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_from_default_configuration() {
        let configuration = FeatureMapConfiguration::default();
        let pipeline = FeatureMapPipeline::from_configuration(&configuration).unwrap();
        assert_eq!(
            pipeline.strategies().len(),
            configuration.pipeline.strategies.len()
        );
        assert_eq!(
            pipeline.strategies()[0].strategy_name(),
            "angle_embedding"
        );
    }
}
