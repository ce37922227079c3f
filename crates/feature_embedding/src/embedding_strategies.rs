// =============================================================================
// QKDC Feature Maps - Embedding Strategies
// =============================================================================
// Table of Contents:
//   1. RotationAxis - Axis selection for angle embedding
//   2. Angle embedding (angle_embed, apply_angle_embedding)
//   3. Superposition induction (super_pos)
//   4. Rotation loop (rot_loop)
//   5. Single-excitation coupling (single_x)
// =============================================================================
// Purpose: Strategies that append a fixed gate pattern to a circuit
//          construction context. The wire count always equals the length of
//          the input vector. Gates are appended in ascending wire order.
// =============================================================================

use crate::error::{EmbeddingError, EmbeddingResult};
use crate::feature_transform::checked_feature_angle;
use qkdc_runtime::circuit_program::CircuitConstructionContext;
use serde::{Deserialize, Serialize};

// =============================================================================
// 1. RotationAxis - Axis selection for angle embedding
// =============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RotationAxis {
    #[default]
    X,
    Y,
    Z,
}

// =============================================================================
// 2. Angle embedding
// =============================================================================

/// Embeds `features` as rotation angles, one rotation per wire.
///
/// `features[i]` drives `wires[i]`. Fewer features than wires leaves the
/// trailing wires untouched; more features than wires is an error and
/// appends nothing.
pub fn apply_angle_embedding<C>(
    context: &mut C,
    features: &[f64],
    wires: &[usize],
    axis: RotationAxis,
) -> EmbeddingResult<()>
where
    C: CircuitConstructionContext + ?Sized,
{
    if features.len() > wires.len() {
        return Err(EmbeddingError::FeatureWireMismatch {
            features: features.len(),
            wires: wires.len(),
        });
    }

    for (&angle, &wire) in features.iter().zip(wires) {
        match axis {
            RotationAxis::X => context.apply_rotation_x_gate(wire, angle)?,
            RotationAxis::Y => context.apply_rotation_y_gate(wire, angle)?,
            RotationAxis::Z => context.apply_rotation_z_gate(wire, angle)?,
        }
    }

    tracing::debug!(
        strategy = "angle_embedding",
        ?axis,
        wires = wires.len(),
        gates = features.len(),
        "strategy applied"
    );
    Ok(())
}

/// Embeds `pepper` as X rotations over wires `0..input.len()`.
pub fn angle_embed<C>(context: &mut C, input: &[f64], pepper: &[f64]) -> EmbeddingResult<()>
where
    C: CircuitConstructionContext + ?Sized,
{
    angle_embed_about(context, input, pepper, RotationAxis::X)
}

/// Same as [`angle_embed`] with a selectable rotation axis.
pub fn angle_embed_about<C>(
    context: &mut C,
    input: &[f64],
    pepper: &[f64],
    axis: RotationAxis,
) -> EmbeddingResult<()>
where
    C: CircuitConstructionContext + ?Sized,
{
    let wires: Vec<usize> = (0..input.len()).collect();
    apply_angle_embedding(context, pepper, &wires, axis)
}

// =============================================================================
// 3. Superposition induction
// =============================================================================

/// Applies a Hadamard gate to every wire.
pub fn super_pos<C>(context: &mut C, inputs: &[f64]) -> EmbeddingResult<()>
where
    C: CircuitConstructionContext + ?Sized,
{
    for wire in 0..inputs.len() {
        context.apply_hadamard_gate(wire)?;
    }

    tracing::debug!(
        strategy = "superposition",
        wires = inputs.len(),
        gates = inputs.len(),
        "strategy applied"
    );
    Ok(())
}

// =============================================================================
// 4. Rotation loop
// =============================================================================

/// Applies `RX(phi)`, `RY(phi)`, `RZ(phi)` to each wire, where `phi` is the
/// feature angle of that wire's input.
pub fn rot_loop<C>(context: &mut C, inputs: &[f64]) -> EmbeddingResult<()>
where
    C: CircuitConstructionContext + ?Sized,
{
    for (wire, &value) in inputs.iter().enumerate() {
        let phi = checked_feature_angle(wire, value);
        context.apply_rotation_x_gate(wire, phi)?;
        context.apply_rotation_y_gate(wire, phi)?;
        context.apply_rotation_z_gate(wire, phi)?;
    }

    tracing::debug!(
        strategy = "rotation_loop",
        wires = inputs.len(),
        gates = inputs.len() * 3,
        "strategy applied"
    );
    Ok(())
}

// =============================================================================
// 5. Single-excitation coupling
// =============================================================================

/// Flips wire 0, then couples it to the other wires with single excitations.
///
/// Input `w` (for `w >= 1`) drives the excitation on wires `[0, n - w]`, so
/// the second input couples to the last wire and the last input to wire 1.
/// The flip on wire 0 is applied even when `inputs` is empty, in which case
/// the context rejects it.
pub fn single_x<C>(context: &mut C, inputs: &[f64]) -> EmbeddingResult<()>
where
    C: CircuitConstructionContext + ?Sized,
{
    let wire_count = inputs.len();
    context.apply_pauli_x_gate(0)?;

    for (index, &value) in inputs.iter().enumerate().skip(1) {
        let phi = checked_feature_angle(index, value);
        context.apply_single_excitation_gate(0, wire_count - index, phi)?;
    }

    tracing::debug!(
        strategy = "single_excitation",
        wires = wire_count,
        gates = wire_count,
        "strategy applied"
    );
    Ok(())
}
