//! CPU-side preparation of the two full-screen passes. Each pass holds the
//! inputs prepared for the current frame; a pass with nothing prepared is
//! skipped when the host executes its hook.

pub mod effect;
pub mod mask;

pub use effect::{EffectPassInputs, UnderwaterEffectPass};
pub use mask::{MaskPassInputs, OceanMaskPass};
