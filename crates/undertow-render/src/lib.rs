pub mod frustum;
pub mod globals;
pub mod lighting;
pub mod matrices;
pub mod pass_state;
pub mod passes;
pub mod pipeline;
pub mod registrar;

pub use frustum::FrustumPlanes;
pub use globals::{
    GpuShaderGlobals, OceanMaterialGlobals, ShaderGlobals, ShadingSink, UnderwaterUniforms,
    UNIFORMS_WGSL,
};
pub use lighting::{AmbientLightingProvider, SphericalHarmonicsL2};
pub use matrices::{DepthRange, GpuProjection, InverseViewProjection, MatrixDerivation};
pub use pass_state::PassState;
pub use passes::{EffectPassInputs, MaskPassInputs, OceanMaskPass, UnderwaterEffectPass};
pub use pipeline::{
    submission_index, BuiltinStage, HostPipeline, InjectionPoint, PassId, RecordingPipeline,
    Submission,
};
pub use registrar::PassRegistrar;
