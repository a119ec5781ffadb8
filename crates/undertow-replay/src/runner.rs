use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};
use undertow_core::types::{RenderCamera, StereoContext};
use undertow_frame::{
    EffectState, FrameHost, FrameInput, FrameOrchestrator, FrameOutcome, InactiveReason,
    InstanceRegistry,
};
use undertow_render::globals::{ShaderGlobals, ShadingSink};
use undertow_render::lighting::SphericalHarmonicsL2;
use undertow_render::matrices::{GpuProjection, MatrixDerivation};
use undertow_render::pass_state::PassState;
use undertow_render::pipeline::{
    submission_index, InjectionPoint, PassId, RecordingPipeline, Submission,
};

use crate::scenarios::Scenario;

/// Ambient probe colour used for every replay.
const REPLAY_AMBIENT: [f32; 3] = [0.18, 0.26, 0.32];

/// Outcome of one replayed frame, in report form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum OutcomeKind {
    Rendered,
    Skipped { error: String },
    Inactive { reason: InactiveReason },
}

impl From<&FrameOutcome> for OutcomeKind {
    fn from(outcome: &FrameOutcome) -> Self {
        match outcome {
            FrameOutcome::Rendered => Self::Rendered,
            FrameOutcome::Skipped(e) => Self::Skipped {
                error: e.to_string(),
            },
            FrameOutcome::Inactive(reason) => Self::Inactive { reason: *reason },
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FrameRecord {
    pub index: u32,
    pub outcome: OutcomeKind,
    pub state: EffectState,
    pub eye_pass_index: i32,
    pub hooks_before_transparent: Vec<PassId>,
    pub hooks_after_transparent: Vec<PassId>,
    /// Stages and passes the host ran, in order.
    pub submitted: Vec<Submission>,
}

impl FrameRecord {
    pub fn hook_count(&self) -> usize {
        self.hooks_before_transparent.len() + self.hooks_after_transparent.len()
    }

    /// Number of underwater passes the host ran.
    pub fn passes_run(&self) -> usize {
        self.submitted
            .iter()
            .filter(|s| matches!(s, Submission::Pass(_)))
            .count()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioResult {
    pub name: String,
    pub frames: Vec<FrameRecord>,
    pub rendered: u32,
    pub skipped: u32,
    pub inactive: u32,
    pub globals_published: u32,
    pub pass_states_published: u32,
    /// Whether every frame that ran the effect ran the mask first.
    pub mask_before_effect: bool,
    /// Expectation failures; empty when the scenario passed.
    pub failures: Vec<String>,
}

impl ScenarioResult {
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Default)]
struct CountingSink {
    published: u32,
    pass_states: u32,
    last: Option<ShaderGlobals>,
}

impl ShadingSink for CountingSink {
    fn publish_globals(&mut self, globals: &ShaderGlobals) {
        self.published += 1;
        self.last = Some(*globals);
    }

    fn publish_pass_state(&mut self, _state: &PassState) {
        self.pass_states += 1;
    }
}

/// Drive a fresh orchestrator through every frame of `scenario` against a
/// recording pipeline.
pub fn run_scenario(scenario: &Scenario) -> ScenarioResult {
    log::info!("Replaying scenario '{}'...", scenario.name);

    let mut registry = InstanceRegistry::new();
    let mut pipeline = RecordingPipeline::new();
    let mut sink = CountingSink::default();
    let lighting = SphericalHarmonicsL2::uniform(Vec3::from_array(REPLAY_AMBIENT));
    let base_camera = scenario.camera.to_camera();

    let mut orch = FrameOrchestrator::new(
        &mut registry,
        scenario.config,
        MatrixDerivation::new(GpuProjection::WGPU),
    );
    orch.enable(&mut registry);

    let mut stereo = StereoContext::new();
    let mut frames = Vec::new();
    let mut index = 0u32;

    for step in &scenario.frames {
        let camera = if step.collapse_projection {
            RenderCamera {
                projection: Mat4::ZERO,
                ..base_camera
            }
        } else {
            base_camera
        };

        for _ in 0..step.repeat {
            stereo = stereo.with_mode(step.stereo.to_mode(&camera));
            let report = orch.on_pre_render(
                &mut FrameHost {
                    registry: &mut registry,
                    pipeline: &mut pipeline,
                    shading: &mut sink,
                },
                &FrameInput {
                    camera: &camera,
                    ocean: &step.ocean,
                    lighting: &lighting,
                    stereo,
                    wireframe: step.wireframe,
                },
            );
            stereo = report.stereo;

            let submitted = pipeline.execute_frame(|pass| orch.is_pass_ready(pass));

            frames.push(FrameRecord {
                index,
                outcome: OutcomeKind::from(&report.outcome),
                state: report.state,
                eye_pass_index: report.stereo.eye_pass_index,
                hooks_before_transparent: pipeline.hooks(InjectionPoint::BeforeTransparent).to_vec(),
                hooks_after_transparent: pipeline.hooks(InjectionPoint::AfterTransparent).to_vec(),
                submitted,
            });
            index += 1;
        }
    }

    if let Some(globals) = sink.last {
        log::debug!(
            "Last ambient lighting for '{}': {:?}",
            scenario.name,
            globals.ambient_lighting
        );
    }

    summarize(scenario, frames, &sink)
}

fn summarize(scenario: &Scenario, frames: Vec<FrameRecord>, sink: &CountingSink) -> ScenarioResult {
    let count = |f: fn(&OutcomeKind) -> bool| frames.iter().filter(|r| f(&r.outcome)).count() as u32;
    let rendered = count(|o| matches!(o, OutcomeKind::Rendered));
    let skipped = count(|o| matches!(o, OutcomeKind::Skipped { .. }));
    let inactive = count(|o| matches!(o, OutcomeKind::Inactive { .. }));

    let mask_before_effect = frames
        .iter()
        .filter(|r| r.outcome == OutcomeKind::Rendered)
        .all(|r| {
            let mask = submission_index(&r.submitted, PassId::OceanMask);
            let effect = submission_index(&r.submitted, PassId::UnderwaterEffect);
            matches!((mask, effect), (Some(m), Some(e)) if m < e)
        });

    let mut failures = Vec::new();
    if !mask_before_effect {
        failures.push("mask pass did not precede the effect pass".to_string());
    }
    if sink.pass_states != rendered {
        failures.push(format!(
            "{} pass states published for {rendered} rendered frames",
            sink.pass_states
        ));
    }
    if frames.iter().any(|r| r.hook_count() > 2) {
        failures.push("more than two hooks registered".to_string());
    }
    let last = frames.last();
    if let Some(expected) = scenario.expect.final_state {
        let actual = last.map(|r| r.state);
        if actual != Some(expected) {
            failures.push(format!("final state {actual:?}, expected {expected:?}"));
        }
    }
    if let Some(expected) = scenario.expect.final_hook_count {
        let actual = last.map_or(0, FrameRecord::hook_count);
        if actual != expected {
            failures.push(format!("final hook count {actual}, expected {expected}"));
        }
    }

    for failure in &failures {
        log::warn!("Scenario '{}': {}", scenario.name, failure);
    }

    ScenarioResult {
        name: scenario.name.clone(),
        frames,
        rendered,
        skipped,
        inactive,
        globals_published: sink.published,
        pass_states_published: sink.pass_states,
        mask_before_effect,
        failures,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenarios::{builtin_scenarios, load_scenario_from_str};
    use undertow_render::pipeline::BuiltinStage;

    fn builtin(prefix: &str) -> Scenario {
        builtin_scenarios()
            .into_iter()
            .find(|s| s.name.starts_with(prefix))
            .expect("builtin scenario should exist")
    }

    #[test]
    fn test_builtin_scenarios_pass() {
        for scenario in builtin_scenarios() {
            let result = run_scenario(&scenario);
            assert!(result.passed(), "{}: {:?}", result.name, result.failures);
        }
    }

    #[test]
    fn test_no_world_registers_nothing() {
        let result = run_scenario(&builtin("A"));
        assert_eq!(result.rendered, 0);
        assert_eq!(result.inactive, 3);
        assert_eq!(result.globals_published, 0);
        assert_eq!(result.pass_states_published, 0);
        assert!(result.frames.iter().all(|r| r.hook_count() == 0 && r.passes_run() == 0));
    }

    #[test]
    fn test_submerged_runs_mask_then_effect() {
        let result = run_scenario(&builtin("B"));
        assert_eq!(result.rendered, 3);
        for record in &result.frames {
            assert_eq!(record.hooks_before_transparent, vec![PassId::OceanMask]);
            assert_eq!(record.hooks_after_transparent, vec![PassId::UnderwaterEffect]);
            assert_eq!(
                record.submitted,
                vec![
                    Submission::Stage(BuiltinStage::Opaque),
                    Submission::Pass(PassId::OceanMask),
                    Submission::Stage(BuiltinStage::Transparent),
                    Submission::Pass(PassId::UnderwaterEffect),
                ]
            );
        }
    }

    #[test]
    fn test_surfacing_removes_hooks_same_frame() {
        let result = run_scenario(&builtin("C"));
        let last = result.frames.last().expect("scenario has frames");
        assert_eq!(
            last.outcome,
            OutcomeKind::Inactive {
                reason: InactiveReason::AboveWater
            }
        );
        assert_eq!(last.hook_count(), 0);
        assert_eq!(last.passes_run(), 0);
    }

    #[test]
    fn test_wireframe_forces_disabled() {
        let result = run_scenario(&builtin("D"));
        let last = result.frames.last().expect("scenario has frames");
        assert_eq!(
            last.outcome,
            OutcomeKind::Inactive {
                reason: InactiveReason::Wireframe
            }
        );
        assert_eq!(last.state, EffectState::Disabled);
    }

    #[test]
    fn test_collapsed_projection_skips_and_recovers() {
        let scenario = load_scenario_from_str(
            r#"(
                name: "collapse",
                frames: [
                    (ocean: (present: true, viewer_height_above_water: -1.0)),
                    (ocean: (present: true, viewer_height_above_water: -1.0), collapse_projection: true),
                    (ocean: (present: true, viewer_height_above_water: -1.0)),
                ],
                expect: (final_state: Some(Enabled), final_hook_count: Some(2)),
            )"#,
        )
        .expect("scenario should parse");

        let result = run_scenario(&scenario);
        assert!(result.passed(), "{:?}", result.failures);
        assert_eq!(result.rendered, 2);
        assert_eq!(result.skipped, 1);
        assert_eq!(result.globals_published, 3);
        assert_eq!(result.pass_states_published, 2);
        let skipped = &result.frames[1];
        assert_eq!(skipped.passes_run(), 0);
        assert_eq!(skipped.state, EffectState::Enabled);
    }

    #[test]
    fn test_multi_pass_eye_indices_recorded() {
        let scenario = load_scenario_from_str(
            r#"(
                name: "xr",
                frames: [
                    (ocean: (present: true, viewer_height_above_water: -1.0), stereo: MultiPass, repeat: 3),
                ],
            )"#,
        )
        .expect("scenario should parse");

        let result = run_scenario(&scenario);
        let indices: Vec<i32> = result.frames.iter().map(|r| r.eye_pass_index).collect();
        assert_eq!(indices, vec![0, 1, 0]);
    }

    #[test]
    fn test_failed_expectation_is_reported() {
        let mut scenario = builtin("B");
        scenario.expect.final_hook_count = Some(0);
        let result = run_scenario(&scenario);
        assert!(!result.passed());
        assert_eq!(result.failures.len(), 1);
    }

    #[test]
    fn test_bundled_dive_scenario() {
        let scenario = load_scenario_from_str(include_str!("../scenarios/dive.ron"))
            .expect("bundled scenario should parse");
        let result = run_scenario(&scenario);
        assert!(result.passed(), "{:?}", result.failures);
        assert_eq!(result.frames.len(), 13);
        assert_eq!(result.rendered, 9);
        assert_eq!(result.inactive, 4);
        assert!(result
            .frames
            .iter()
            .filter(|r| r.outcome == OutcomeKind::Rendered)
            .all(|r| r.hooks_before_transparent == vec![PassId::OceanMask, PassId::UnderwaterEffect]));
    }
}
