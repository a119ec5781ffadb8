//! Fakes shared by the orchestrator tests.

use glam::{Mat4, Vec3};
use undertow_core::config::UnderwaterConfig;
use undertow_core::types::{RenderCamera, StereoContext};
use undertow_render::globals::{ShaderGlobals, ShadingSink};
use undertow_render::lighting::SphericalHarmonicsL2;
use undertow_render::matrices::{GpuProjection, MatrixDerivation};
use undertow_render::pass_state::PassState;
use undertow_render::pipeline::RecordingPipeline;
use undertow_world::ocean::OceanSnapshot;

use crate::orchestrator::{FrameHost, FrameInput, FrameOrchestrator, FrameReport};
use crate::registry::InstanceRegistry;

/// Keeps every published set of globals and pass state.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub published: Vec<ShaderGlobals>,
    pub pass_states: Vec<PassState>,
}

impl ShadingSink for RecordingSink {
    fn publish_globals(&mut self, globals: &ShaderGlobals) {
        self.published.push(*globals);
    }

    fn publish_pass_state(&mut self, state: &PassState) {
        self.pass_states.push(*state);
    }
}

pub fn camera() -> RenderCamera {
    RenderCamera::look_at(
        Vec3::new(0.0, -1.0, 5.0),
        Vec3::new(0.0, -1.0, 0.0),
        60f32.to_radians(),
        16.0 / 9.0,
        0.1,
        1000.0,
    )
}

/// Camera whose projection collapses everything to a point.
pub fn degenerate_camera() -> RenderCamera {
    RenderCamera {
        projection: Mat4::ZERO,
        ..camera()
    }
}

/// One host camera with its pipeline, registry and shading sink.
pub struct Rig {
    pub registry: InstanceRegistry,
    pub pipeline: RecordingPipeline,
    pub sink: RecordingSink,
    pub lighting: SphericalHarmonicsL2,
    pub camera: RenderCamera,
    pub stereo: StereoContext,
    pub wireframe: bool,
}

impl Rig {
    pub fn new() -> Self {
        Self {
            registry: InstanceRegistry::new(),
            pipeline: RecordingPipeline::new(),
            sink: RecordingSink::default(),
            lighting: SphericalHarmonicsL2::uniform(Vec3::new(0.2, 0.3, 0.4)),
            camera: camera(),
            stereo: StereoContext::new(),
            wireframe: false,
        }
    }

    /// Create an orchestrator and enable it, as the host does on component start.
    pub fn orchestrator(&mut self, config: UnderwaterConfig) -> FrameOrchestrator {
        let mut orch = FrameOrchestrator::new(
            &mut self.registry,
            config,
            MatrixDerivation::new(GpuProjection::WGPU),
        );
        orch.enable(&mut self.registry);
        orch
    }

    /// Run one camera callback and carry the stereo context forward.
    pub fn frame(&mut self, orch: &mut FrameOrchestrator, ocean: &OceanSnapshot) -> FrameReport {
        let report = orch.on_pre_render(
            &mut FrameHost {
                registry: &mut self.registry,
                pipeline: &mut self.pipeline,
                shading: &mut self.sink,
            },
            &FrameInput {
                camera: &self.camera,
                ocean,
                lighting: &self.lighting,
                stereo: self.stereo,
                wireframe: self.wireframe,
            },
        );
        self.stereo = report.stereo;
        report
    }
}
