// =============================================================================
// QKDC Feature Maps - Feature Transform
// =============================================================================
// Purpose: Nonlinear map from an encoded feature value to a rotation angle,
//          shared by the rotation loop and single-excitation strategies.
// =============================================================================

/// Rotation angle for a feature value: `tan(q) * sin(q)`.
///
/// Near odd multiples of `pi/2` the tangent diverges; the result is returned
/// as computed, which may be very large or non-finite.
pub fn feature_angle(value: f64) -> f64 {
    value.tan() * value.sin()
}

/// Computes the feature angle and logs a warning when it is not finite.
pub(crate) fn checked_feature_angle(wire: usize, value: f64) -> f64 {
    let phi = feature_angle(value);
    if !phi.is_finite() {
        tracing::warn!(wire, value, phi, "feature angle is not finite");
    }
    phi
}
