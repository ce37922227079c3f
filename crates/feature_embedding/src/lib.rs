// =============================================================================
// QKDC Feature Maps - Feature Embedding
// =============================================================================
// Table of Contents:
//   1. Module Declarations
//   2. Prelude Module
// =============================================================================
// Purpose: Embedding strategies that append gate patterns to a circuit
//          construction context, composed into quantum kernel feature maps.
//          Strategies: angle embedding, superposition induction, rotation
//          loops, single-excitation coupling and strongly entangling layers.
// =============================================================================

pub mod config;
pub mod embedding_strategies;
pub mod error;
pub mod feature_transform;
pub mod pipeline;
pub mod strongly_entangling;
pub mod telemetry;

pub mod prelude {
    pub use crate::config::*;
    pub use crate::embedding_strategies::*;
    pub use crate::error::*;
    pub use crate::feature_transform::feature_angle;
    pub use crate::pipeline::*;
    pub use crate::strongly_entangling::*;
    pub use crate::telemetry::initialize_tracing;
}
