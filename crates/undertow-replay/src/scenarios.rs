use std::path::Path;

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};
use undertow_core::config::UnderwaterConfig;
use undertow_core::types::{RenderCamera, StereoMode};
use undertow_frame::EffectState;
use undertow_world::ocean::OceanSnapshot;

use crate::ReplayError;

/// Camera placement for a whole scenario.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSetup {
    pub position: [f32; 3],
    pub target: [f32; 3],
    pub fov_y_deg: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
}

impl Default for CameraSetup {
    fn default() -> Self {
        Self {
            position: [0.0, -1.0, 5.0],
            target: [0.0, -1.0, 0.0],
            fov_y_deg: 60.0,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 1000.0,
        }
    }
}

impl CameraSetup {
    pub fn to_camera(&self) -> RenderCamera {
        RenderCamera::look_at(
            Vec3::from_array(self.position),
            Vec3::from_array(self.target),
            self.fov_y_deg.to_radians(),
            self.aspect,
            self.near,
            self.far,
        )
    }
}

/// Stereo setup of a replayed frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ReplayStereo {
    #[default]
    Mono,
    MultiPass,
    /// Both eyes offset from the scenario camera by `EYE_SEPARATION`.
    SinglePass,
}

/// Half the distance between the eyes for single-pass replay.
pub const EYE_SEPARATION: f32 = 0.032;

impl ReplayStereo {
    pub fn to_mode(self, camera: &RenderCamera) -> StereoMode {
        match self {
            Self::Mono => StereoMode::Mono,
            Self::MultiPass => StereoMode::MultiPass,
            Self::SinglePass => {
                let eye = |offset: f32| undertow_core::types::EyeTransforms {
                    projection: camera.projection,
                    view: Mat4::from_translation(Vec3::new(offset, 0.0, 0.0)) * camera.world_to_camera,
                };
                StereoMode::SinglePass {
                    left: eye(EYE_SEPARATION),
                    right: eye(-EYE_SEPARATION),
                }
            }
        }
    }
}

/// One step of a scenario. `repeat` runs the same inputs several frames in a row.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameStep {
    pub ocean: OceanSnapshot,
    #[serde(default)]
    pub wireframe: bool,
    #[serde(default)]
    pub stereo: ReplayStereo,
    /// Replace the projection with a singular one for this step.
    #[serde(default)]
    pub collapse_projection: bool,
    #[serde(default = "default_repeat")]
    pub repeat: u32,
}

fn default_repeat() -> u32 {
    1
}

impl FrameStep {
    fn ocean(ocean: OceanSnapshot) -> Self {
        Self {
            ocean,
            wireframe: false,
            stereo: ReplayStereo::Mono,
            collapse_projection: false,
            repeat: 1,
        }
    }
}

/// What must hold after the last frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Expectations {
    pub final_state: Option<EffectState>,
    pub final_hook_count: Option<usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub config: UnderwaterConfig,
    #[serde(default)]
    pub camera: CameraSetup,
    pub frames: Vec<FrameStep>,
    #[serde(default)]
    pub expect: Expectations,
}

/// Parse one scenario from RON. The config is clamped into range.
pub fn load_scenario_from_str(ron_str: &str) -> Result<Scenario, ReplayError> {
    let options = ron::Options::default();
    let mut scenario: Scenario = options
        .from_str(ron_str)
        .map_err(|e| ReplayError::ScenarioParse(e.to_string()))?;
    scenario.config = scenario.config.sanitized();
    Ok(scenario)
}

pub fn load_scenario(path: &Path) -> Result<Scenario, ReplayError> {
    let contents = std::fs::read_to_string(path).map_err(|source| ReplayError::Io {
        path: path.display().to_string(),
        source,
    })?;
    load_scenario_from_str(&contents)
}

/// The four reference scenarios: no world, submerged, surfacing, wireframe.
pub fn builtin_scenarios() -> Vec<Scenario> {
    let submerged = FrameStep::ocean(OceanSnapshot::at_height(0.5));
    vec![
        Scenario {
            name: "A: no world".to_string(),
            config: UnderwaterConfig::default(),
            camera: CameraSetup::default(),
            frames: vec![
                FrameStep {
                    repeat: 2,
                    ..FrameStep::ocean(OceanSnapshot::absent())
                },
                FrameStep::ocean(OceanSnapshot {
                    viewer_height_above_water: -20.0,
                    ..OceanSnapshot::absent()
                }),
            ],
            expect: Expectations {
                final_state: Some(EffectState::Disabled),
                final_hook_count: Some(0),
            },
        },
        Scenario {
            name: "B: submerged".to_string(),
            config: UnderwaterConfig::default(),
            camera: CameraSetup::default(),
            frames: vec![FrameStep {
                repeat: 3,
                ..submerged
            }],
            expect: Expectations {
                final_state: Some(EffectState::Enabled),
                final_hook_count: Some(2),
            },
        },
        Scenario {
            name: "C: surfacing".to_string(),
            config: UnderwaterConfig::default(),
            camera: CameraSetup::default(),
            frames: vec![submerged, FrameStep::ocean(OceanSnapshot::at_height(5.0))],
            expect: Expectations {
                final_state: Some(EffectState::Disabled),
                final_hook_count: Some(0),
            },
        },
        Scenario {
            name: "D: wireframe".to_string(),
            config: UnderwaterConfig::default(),
            camera: CameraSetup::default(),
            frames: vec![
                submerged,
                FrameStep {
                    wireframe: true,
                    ..submerged
                },
            ],
            expect: Expectations {
                final_state: Some(EffectState::Disabled),
                final_hook_count: Some(0),
            },
        },
    ]
}
