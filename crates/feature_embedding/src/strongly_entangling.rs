// =============================================================================
// QKDC Feature Maps - Strongly Entangling Layers
// =============================================================================
// Table of Contents:
//   1. EntanglementKey - Explicit, single-use random key
//   2. StronglyEntanglingWeights - (layers, wires, 3) rotation tensor
//   3. Layer template (apply_strongly_entangling_layers)
//   4. strong_tangle - Randomly initialised single layer
// =============================================================================
// Purpose: General rotations on every wire followed by a ring of two-qubit
//          entangling gates whose stride changes per layer. Weights are drawn
//          from an explicit key so every circuit is reproducible from its
//          seed.
// =============================================================================

use crate::error::{EmbeddingError, EmbeddingResult};
use ndarray::{Array3, s};
use qkdc_runtime::circuit_program::CircuitConstructionContext;
use qkdc_runtime::error::{CircuitError, QuantumRuntimeError};
use qkdc_runtime::gate_operations::EntanglingGateKind;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Rotation angles per wire in one layer: `phi`, `theta`, `omega`.
pub const ROTATIONS_PER_WIRE: usize = 3;

// =============================================================================
// 1. EntanglementKey - Explicit, single-use random key
// =============================================================================

/// Random generator state consumed by exactly one weight draw.
///
/// Keys are neither `Copy` nor `Clone`; drawing weights moves the key, so a
/// key cannot feed two draws. Use [`EntanglementKey::split`] or
/// [`EntanglementKey::fold_in`] to obtain independent keys.
#[derive(Debug, PartialEq, Eq)]
pub struct EntanglementKey {
    seed: u64,
}

impl EntanglementKey {
    pub fn from_seed(seed: u64) -> Self {
        Self { seed }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Consumes the key and returns two independent child keys.
    pub fn split(self) -> (Self, Self) {
        let mut rng = self.generator();
        let first = Self::from_seed(rng.r#gen::<u64>());
        let second = Self::from_seed(rng.r#gen::<u64>());
        (first, second)
    }

    /// Derives a child key from this key and `data` without consuming it.
    pub fn fold_in(&self, data: u64) -> Self {
        Self::from_seed(mix_seed(self.seed ^ mix_seed(data)))
    }

    fn generator(self) -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(self.seed)
    }
}

// SplitMix64 finalizer.
fn mix_seed(mut value: u64) -> u64 {
    value = value.wrapping_add(0x9E37_79B9_7F4A_7C15);
    value = (value ^ (value >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    value = (value ^ (value >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    value ^ (value >> 31)
}

// =============================================================================
// 2. StronglyEntanglingWeights - (layers, wires, 3) rotation tensor
// =============================================================================

/// Weight tensor shape for `layers` layers over `wires` wires.
pub fn strongly_entangling_shape(layers: usize, wires: usize) -> (usize, usize, usize) {
    (layers, wires, ROTATIONS_PER_WIRE)
}

#[derive(Debug, Clone, PartialEq)]
pub struct StronglyEntanglingWeights {
    tensor: Array3<f64>,
}

impl StronglyEntanglingWeights {
    /// Wraps an existing tensor. The last axis must hold three angles.
    pub fn from_array(tensor: Array3<f64>) -> EmbeddingResult<Self> {
        let (layers, wires, rotations) = tensor.dim();
        if rotations != ROTATIONS_PER_WIRE {
            return Err(EmbeddingError::InvalidWeightShape {
                expected: strongly_entangling_shape(layers, wires),
                actual: (layers, wires, rotations),
            });
        }
        Ok(Self { tensor })
    }

    /// Draws every angle uniformly from `[0, 1)`, consuming `key`.
    ///
    /// Fails when the tensor element count does not fit in `isize`.
    pub fn sample_uniform(
        key: EntanglementKey,
        layers: usize,
        wires: usize,
    ) -> EmbeddingResult<Self> {
        let fits = layers
            .checked_mul(wires)
            .and_then(|count| count.checked_mul(ROTATIONS_PER_WIRE))
            .is_some_and(|count| count <= isize::MAX as usize);
        if !fits {
            return Err(EmbeddingError::WeightTensorTooLarge { layers, wires });
        }

        let mut rng = key.generator();
        let tensor = Array3::from_shape_simple_fn(strongly_entangling_shape(layers, wires), || {
            rng.r#gen::<f64>()
        });
        Ok(Self { tensor })
    }

    pub fn shape(&self) -> (usize, usize, usize) {
        self.tensor.dim()
    }

    pub fn number_of_layers(&self) -> usize {
        self.tensor.dim().0
    }

    pub fn number_of_wires(&self) -> usize {
        self.tensor.dim().1
    }

    /// `[phi, theta, omega]` for one wire of one layer.
    pub fn rotation(&self, layer: usize, wire: usize) -> [f64; 3] {
        let angles = self.tensor.slice(s![layer, wire, ..]);
        [angles[0], angles[1], angles[2]]
    }

    pub fn as_array(&self) -> &Array3<f64> {
        &self.tensor
    }

    pub fn into_array(self) -> Array3<f64> {
        self.tensor
    }
}

// =============================================================================
// 3. Layer template
// =============================================================================

/// Stride used by layer `layer` when no explicit ranges are given.
pub fn default_entangling_range(layer: usize, wires: usize) -> usize {
    if wires > 1 { (layer % (wires - 1)) + 1 } else { 0 }
}

fn resolve_ranges(
    ranges: Option<&[usize]>,
    layers: usize,
    wires: usize,
) -> EmbeddingResult<Vec<usize>> {
    let Some(ranges) = ranges else {
        return Ok((0..layers)
            .map(|layer| default_entangling_range(layer, wires))
            .collect());
    };

    if ranges.len() != layers {
        return Err(EmbeddingError::RangeCountMismatch {
            layers,
            provided: ranges.len(),
        });
    }
    if wires > 1 {
        if let Some(&range) = ranges.iter().find(|&&r| r == 0 || r >= wires) {
            return Err(EmbeddingError::InvalidEntanglingRange { range, wires });
        }
    }
    Ok(ranges.to_vec())
}

fn check_wires(wires: &[usize], total: usize) -> EmbeddingResult<()> {
    for (position, &wire) in wires.iter().enumerate() {
        let error = if wire >= total {
            CircuitError::InvalidQubitIndex { index: wire, total }
        } else if wires[..position].contains(&wire) {
            CircuitError::DuplicateQubit(wire)
        } else {
            continue;
        };
        return Err(QuantumRuntimeError::from(error).into());
    }
    Ok(())
}

/// Applies one block per weight layer: a general rotation on every wire,
/// then (with two or more wires) `imprimitive` on `(wires[i], wires[(i + r) % n])`
/// for every `i`.
///
/// Shape, wire and range checks run before any gate is appended.
pub fn apply_strongly_entangling_layers<C>(
    context: &mut C,
    weights: &StronglyEntanglingWeights,
    wires: &[usize],
    ranges: Option<&[usize]>,
    imprimitive: EntanglingGateKind,
) -> EmbeddingResult<()>
where
    C: CircuitConstructionContext + ?Sized,
{
    let layers = weights.number_of_layers();
    let wire_count = wires.len();
    if weights.number_of_wires() != wire_count {
        return Err(EmbeddingError::InvalidWeightShape {
            expected: strongly_entangling_shape(layers, wire_count),
            actual: weights.shape(),
        });
    }
    check_wires(wires, context.number_of_quantum_bits())?;
    let ranges = resolve_ranges(ranges, layers, wire_count)?;

    let mut appended = 0usize;
    for (layer, &range) in ranges.iter().enumerate() {
        for (index, &wire) in wires.iter().enumerate() {
            let [phi, theta, omega] = weights.rotation(layer, index);
            context.apply_general_rotation_gate(wire, phi, theta, omega)?;
            appended += 1;
        }

        if wire_count > 1 {
            for index in 0..wire_count {
                let partner = wires[(index + range) % wire_count];
                context.append_gate(imprimitive.build(wires[index], partner))?;
                appended += 1;
            }
        }
    }

    tracing::debug!(
        strategy = "strongly_entangling",
        layers,
        wires = wire_count,
        ?imprimitive,
        gates = appended,
        "strategy applied"
    );
    Ok(())
}

// =============================================================================
// 4. strong_tangle - Randomly initialised single layer
// =============================================================================

/// One strongly entangling layer over `0..inputs.len()` with controlled-Z
/// entanglers and weights drawn uniformly from `[0, 1)` with `key`.
pub fn strong_tangle<C>(context: &mut C, inputs: &[f64], key: EntanglementKey) -> EmbeddingResult<()>
where
    C: CircuitConstructionContext + ?Sized,
{
    strong_tangle_layers(context, inputs, key, 1, EntanglingGateKind::ControlledZ)
}

/// [`strong_tangle`] with a configurable layer count and entangling gate.
pub fn strong_tangle_layers<C>(
    context: &mut C,
    inputs: &[f64],
    key: EntanglementKey,
    layers: usize,
    imprimitive: EntanglingGateKind,
) -> EmbeddingResult<()>
where
    C: CircuitConstructionContext + ?Sized,
{
    let weights = StronglyEntanglingWeights::sample_uniform(key, layers, inputs.len())?;
    let wires: Vec<usize> = (0..inputs.len()).collect();
    apply_strongly_entangling_layers(context, &weights, &wires, None, imprimitive)
}
