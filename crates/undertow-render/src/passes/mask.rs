use glam::Vec3;

use crate::frustum::FrustumPlanes;
use crate::matrices::InverseViewProjection;
use crate::pass_state::PassState;
use crate::pipeline::PassId;

/// What the ocean mask pass needs to draw one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaskPassInputs {
    pub inverse_view_projection: InverseViewProjection,
    /// Horizon line is placed at this fraction of the far plane.
    pub far_plane_multiplier: f32,
    pub eye_pass_index: i32,
    /// Clear the mask but draw no ocean surface into it.
    pub disabled: bool,
}

/// Ocean mask pass. Runs before the transparent stage.
#[derive(Debug, Clone, Default)]
pub struct OceanMaskPass {
    frustum: Option<FrustumPlanes>,
    prepared: Option<MaskPassInputs>,
}

impl OceanMaskPass {
    pub const ID: PassId = PassId::OceanMask;

    pub fn new() -> Self {
        Self::default()
    }

    /// Cache the camera frustum used to cull ocean tiles.
    pub fn set_frustum(&mut self, frustum: FrustumPlanes) {
        self.frustum = Some(frustum);
    }

    pub fn frustum(&self) -> Option<&FrustumPlanes> {
        self.frustum.as_ref()
    }

    /// Drop last frame's inputs.
    pub fn begin_frame(&mut self) {
        self.prepared = None;
    }

    pub fn prepare(&mut self, state: &PassState) {
        self.prepared = Some(MaskPassInputs {
            inverse_view_projection: state.inverse_view_projection,
            far_plane_multiplier: state.far_plane_multiplier,
            eye_pass_index: state.eye_pass_index,
            disabled: state.debug.disable_ocean_mask,
        });
    }

    pub fn prepared(&self) -> Option<&MaskPassInputs> {
        self.prepared.as_ref()
    }

    /// Indices of ocean tiles (given as AABB min/max) to draw into the mask.
    /// Without a cached frustum every tile is kept.
    pub fn visible_tiles(&self, tiles: &[(Vec3, Vec3)]) -> Vec<usize> {
        if self.prepared.is_some_and(|p| p.disabled) {
            return Vec::new();
        }
        tiles
            .iter()
            .enumerate()
            .filter(|(_, (min, max))| {
                self.frustum
                    .as_ref()
                    .is_none_or(|f| f.intersects_aabb(*min, *max))
            })
            .map(|(i, _)| i)
            .collect()
    }
}
