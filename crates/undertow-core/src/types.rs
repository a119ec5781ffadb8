use glam::{Mat4, Vec3};

use crate::constants::NO_EYE_PASS;

/// Which view a matrix belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Eye {
    /// Non-stereo camera, or the current eye of a multi-pass stereo callback.
    Center,
    Left,
    Right,
}

/// Camera transforms owned by the host pipeline. Read-only to this crate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderCamera {
    /// Projection in OpenGL convention (clip depth -1..1, right-handed view).
    pub projection: Mat4,
    /// World-to-camera (view) transform.
    pub world_to_camera: Mat4,
    /// World-space camera position.
    pub position: Vec3,
}

impl RenderCamera {
    /// Build a camera looking from `eye` at `target` with a right-handed perspective.
    pub fn look_at(eye: Vec3, target: Vec3, fov_y_rad: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self {
            projection: Mat4::perspective_rh_gl(fov_y_rad, aspect, near, far),
            world_to_camera: Mat4::look_at_rh(eye, target, Vec3::Y),
            position: eye,
        }
    }
}

/// Projection and view transform for one stereo eye.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EyeTransforms {
    pub projection: Mat4,
    pub view: Mat4,
}

/// How the host renders stereo, if at all.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StereoMode {
    /// No XR device running.
    Mono,
    /// One camera callback per eye; each callback carries that eye's camera transforms.
    MultiPass,
    /// Both eyes drawn by one batch; per-eye transforms come from the XR device.
    SinglePass {
        left: EyeTransforms,
        right: EyeTransforms,
    },
}

/// Stereo state carried between frames by the host and passed into each
/// frame's orchestration, which returns the advanced value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StereoContext {
    pub mode: StereoMode,
    /// -1 outside XR, 0/1 alternating in multi-pass, always 0 in single-pass.
    pub eye_pass_index: i32,
}

impl Default for StereoContext {
    fn default() -> Self {
        Self::new()
    }
}

impl StereoContext {
    /// Fresh context as it is after subsystem initialisation.
    pub fn new() -> Self {
        Self {
            mode: StereoMode::Mono,
            eye_pass_index: NO_EYE_PASS,
        }
    }

    /// Replace the stereo mode, keeping the eye pass index.
    pub fn with_mode(self, mode: StereoMode) -> Self {
        Self { mode, ..self }
    }

    pub fn is_single_pass(&self) -> bool {
        matches!(self.mode, StereoMode::SinglePass { .. })
    }

    /// Advance the eye pass index for one camera callback.
    pub fn advance(self) -> Self {
        let eye_pass_index = match self.mode {
            StereoMode::Mono => NO_EYE_PASS,
            StereoMode::MultiPass => (self.eye_pass_index + 1).rem_euclid(2),
            StereoMode::SinglePass { .. } => 0,
        };
        Self {
            eye_pass_index,
            ..self
        }
    }
}
