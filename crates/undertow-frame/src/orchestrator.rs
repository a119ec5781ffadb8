use serde::{Deserialize, Serialize};
use undertow_core::config::UnderwaterConfig;
use undertow_core::error::UnderwaterError;
use undertow_core::types::{RenderCamera, StereoContext};
use undertow_render::frustum::FrustumPlanes;
use undertow_render::globals::{OceanMaterialGlobals, ShaderGlobals, ShadingSink};
use undertow_render::lighting::{ambient_lighting_at, AmbientLightingProvider};
use undertow_render::matrices::MatrixDerivation;
use undertow_render::pass_state::PassState;
use undertow_render::passes::{OceanMaskPass, UnderwaterEffectPass};
use undertow_render::pipeline::{HostPipeline, InjectionPoint, PassId};
use undertow_render::registrar::PassRegistrar;
use undertow_world::activation::is_active;
use undertow_world::ocean::OceanProvider;

use crate::registry::{InstanceId, InstanceLease, InstanceRegistry};

/// Whether the passes are attached to the host pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectState {
    Disabled,
    Enabled,
}

/// Why a frame did not run the effect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InactiveReason {
    /// The host has not enabled this instance.
    HostDisabled,
    /// Another instance was enabled after this one.
    Superseded,
    /// A newer instance waits for the previous one to release its passes.
    AwaitingHandover,
    /// No ocean exists.
    NoWorld,
    /// Viewer is too far above the water to be underwater.
    AboveWater,
    /// The host is drawing in wireframe.
    Wireframe,
}

/// Result of one camera callback.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    Inactive(InactiveReason),
    /// Mask and effect passes are prepared.
    Rendered,
    /// Passes are attached but the effect cannot run this frame. The next
    /// frame tries again.
    Skipped(UnderwaterError),
}

/// What [`FrameOrchestrator::on_pre_render`] hands back to the host.
#[derive(Debug, Clone, PartialEq)]
pub struct FrameReport {
    pub outcome: FrameOutcome,
    pub state: EffectState,
    /// Stereo context to pass into the next callback.
    pub stereo: StereoContext,
}

/// Host services touched by a frame.
pub struct FrameHost<'a> {
    pub registry: &'a mut InstanceRegistry,
    pub pipeline: &'a mut dyn HostPipeline,
    pub shading: &'a mut dyn ShadingSink,
}

/// Per-camera inputs for one frame.
pub struct FrameInput<'a> {
    pub camera: &'a RenderCamera,
    pub ocean: &'a dyn OceanProvider,
    pub lighting: &'a dyn AmbientLightingProvider,
    pub stereo: StereoContext,
    pub wireframe: bool,
}

/// Drives the underwater effect for one camera: decides each frame whether
/// the effect runs, keeps the passes attached accordingly, and prepares the
/// mask and effect passes.
///
/// State machine:
///   Disabled -> Enabled when the host has enabled this instance and the
///   viewer may be underwater. Passes are attached and the frustum cached.
///   Enabled -> Disabled when the viewer cannot be underwater, the host draws
///   wireframe, the host disables the instance or another instance takes
///   over. Passes are detached.
///
/// Dropping an enabled orchestrator without disabling it releases its claim
/// on the registry; the next instance to attach clears its leftover hooks.
pub struct FrameOrchestrator {
    lease: InstanceLease,
    config: UnderwaterConfig,
    state: EffectState,
    host_enabled: bool,
    first_render: bool,
    registrar: PassRegistrar,
    derivation: MatrixDerivation,
    mask_pass: OceanMaskPass,
    effect_pass: UnderwaterEffectPass,
    pass_state: Option<PassState>,
    last_inactive: Option<InactiveReason>,
}

impl FrameOrchestrator {
    pub fn new(
        registry: &mut InstanceRegistry,
        config: UnderwaterConfig,
        derivation: MatrixDerivation,
    ) -> Self {
        Self {
            lease: registry.register(),
            config: config.sanitized(),
            state: EffectState::Disabled,
            host_enabled: false,
            first_render: true,
            registrar: PassRegistrar::default(),
            derivation,
            mask_pass: OceanMaskPass::new(),
            effect_pass: UnderwaterEffectPass::new(),
            pass_state: None,
            last_inactive: None,
        }
    }

    pub fn id(&self) -> InstanceId {
        self.lease.id()
    }

    pub fn state(&self) -> EffectState {
        self.state
    }

    pub fn config(&self) -> &UnderwaterConfig {
        &self.config
    }

    /// True until the first frame that prepares the passes.
    pub fn first_render(&self) -> bool {
        self.first_render
    }

    /// Pass inputs of the latest rendered frame; None on other frames.
    pub fn pass_state(&self) -> Option<&PassState> {
        self.pass_state.as_ref()
    }

    pub fn mask_pass(&self) -> &OceanMaskPass {
        &self.mask_pass
    }

    pub fn effect_pass(&self) -> &UnderwaterEffectPass {
        &self.effect_pass
    }

    /// Injection point of the effect pass while attached.
    pub fn effect_point(&self) -> Option<InjectionPoint> {
        self.registrar.effect_point()
    }

    /// Whether `pass` has inputs for the current frame. Hosts skip passes
    /// that are not ready.
    pub fn is_pass_ready(&self, pass: PassId) -> bool {
        match pass {
            PassId::OceanMask => self.mask_pass.prepared().is_some(),
            PassId::UnderwaterEffect => {
                self.mask_pass.prepared().is_some() && self.effect_pass.prepared().is_some()
            }
        }
    }

    /// Replace the configuration. Out-of-range values are clamped. A change
    /// of `before_transparent` applies from the next enable.
    pub fn set_config(&mut self, config: UnderwaterConfig) {
        let config = config.sanitized();
        if self.state == EffectState::Enabled
            && config.before_transparent != self.config.before_transparent
        {
            log::warn!(
                "before_transparent changed to {} while enabled; applies on next enable",
                config.before_transparent
            );
        }
        self.config = config;
    }

    /// Host enabled this instance. It becomes the instance allowed to drive
    /// passes; an instance enabled earlier gives up its passes on its next frame.
    pub fn enable(&mut self, registry: &mut InstanceRegistry) {
        self.host_enabled = true;
        if let Some(previous) = registry.enable(self.id()) {
            log::info!("Underwater instance {:?} supersedes {:?}", self.id(), previous);
        }
    }

    /// Host disabled this instance. Detaches its passes right away.
    pub fn disable(&mut self, registry: &mut InstanceRegistry, pipeline: &mut dyn HostPipeline) {
        self.host_enabled = false;
        self.deactivate(registry, pipeline, InactiveReason::HostDisabled);
        registry.disable(self.id());
    }

    /// Run once per camera callback, before the camera renders.
    pub fn on_pre_render(&mut self, host: &mut FrameHost<'_>, input: &FrameInput<'_>) -> FrameReport {
        self.mask_pass.begin_frame();
        self.effect_pass.begin_frame();
        self.pass_state = None;

        if let Some(reason) = self.inactive_reason(host.registry, input) {
            self.deactivate(host.registry, host.pipeline, reason);
            return self.report(FrameOutcome::Inactive(reason), input.stereo);
        }

        if self.state == EffectState::Disabled {
            if !host.registry.can_become_current(self.id()) {
                let reason = InactiveReason::AwaitingHandover;
                self.note_inactive(reason);
                return self.report(FrameOutcome::Inactive(reason), input.stereo);
            }
            self.activate(host.registry, host.pipeline, input.camera);
        }
        self.last_inactive = None;

        let stereo = input.stereo.advance();
        let material = input.ocean.ocean_material_parameters();

        let before_transparent = self.effect_point() == Some(InjectionPoint::BeforeTransparent);
        host.shading.publish_globals(&ShaderGlobals {
            ambient_lighting: ambient_lighting_at(input.lighting, input.camera.position),
            data_slice_offset: self.config.filter_ocean_data,
            before_transparent,
            ocean_material: before_transparent.then(|| OceanMaterialGlobals::from_material(&material)),
        });

        let matrices = match self.derivation.derive(input.camera, &stereo) {
            Ok(matrices) => matrices,
            Err(e) => {
                log::error!("Skipping underwater effect this frame: {e}");
                return self.report(FrameOutcome::Skipped(e), stereo);
            }
        };

        let state = PassState::new(&self.config, matrices, &stereo, self.first_render);
        host.shading.publish_pass_state(&state);
        self.mask_pass.prepare(&state);
        self.effect_pass.prepare(
            &state,
            &material,
            self.config.copy_ocean_material_params_each_frame,
        );
        self.pass_state = Some(state);
        self.first_render = false;

        self.report(FrameOutcome::Rendered, stereo)
    }

    fn inactive_reason(&self, registry: &InstanceRegistry, input: &FrameInput<'_>) -> Option<InactiveReason> {
        if !self.host_enabled {
            return Some(InactiveReason::HostDisabled);
        }
        if !registry.is_latest_enabled(self.id()) {
            return Some(InactiveReason::Superseded);
        }
        let disable_optimization = self.config.debug.disable_height_above_water_optimization;
        if !is_active(input.ocean, disable_optimization) {
            return Some(if input.ocean.has_active_world() {
                InactiveReason::AboveWater
            } else {
                InactiveReason::NoWorld
            });
        }
        if input.wireframe {
            return Some(InactiveReason::Wireframe);
        }
        None
    }

    fn activate(&mut self, registry: &mut InstanceRegistry, pipeline: &mut dyn HostPipeline, camera: &RenderCamera) {
        self.registrar.attach(pipeline, self.config.before_transparent);
        registry.make_current(self.id());
        self.mask_pass.set_frustum(FrustumPlanes::from_view_projection(
            camera.projection * camera.world_to_camera,
        ));
        self.state = EffectState::Enabled;
        log::info!(
            "Underwater effect enabled (effect pass {:?})",
            self.registrar.effect_point()
        );
    }

    fn deactivate(
        &mut self,
        registry: &mut InstanceRegistry,
        pipeline: &mut dyn HostPipeline,
        reason: InactiveReason,
    ) {
        if self.state == EffectState::Enabled {
            self.registrar.detach(pipeline);
            registry.clear_current(self.id());
            self.state = EffectState::Disabled;
            log::info!("Underwater effect disabled: {reason:?}");
        }
        self.note_inactive(reason);
    }

    fn note_inactive(&mut self, reason: InactiveReason) {
        if self.last_inactive != Some(reason) {
            log::debug!("Underwater effect inactive: {reason:?}");
            self.last_inactive = Some(reason);
        }
    }

    fn report(&self, outcome: FrameOutcome, stereo: StereoContext) -> FrameReport {
        FrameReport {
            outcome,
            state: self.state,
            stereo,
        }
    }
}
