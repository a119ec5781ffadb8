use undertow_core::config::{DebugOverrides, UnderwaterConfig};
use undertow_core::types::StereoContext;

use crate::matrices::InverseViewProjection;

/// Per-frame inputs shared by the mask and effect passes. Rebuilt on every
/// active frame and never carried over.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PassState {
    pub inverse_view_projection: InverseViewProjection,
    /// Cascade offset for ocean data sampling.
    pub data_slice_offset: i32,
    pub depth_fog_density_factor: f32,
    pub meniscus: bool,
    pub far_plane_multiplier: f32,
    pub eye_pass_index: i32,
    pub single_pass_stereo: bool,
    /// True only on the first active frame after the instance was created.
    pub first_render: bool,
    pub debug: DebugOverrides,
}

impl PassState {
    pub fn new(
        config: &UnderwaterConfig,
        inverse_view_projection: InverseViewProjection,
        stereo: &StereoContext,
        first_render: bool,
    ) -> Self {
        Self {
            inverse_view_projection,
            data_slice_offset: config.filter_ocean_data,
            depth_fog_density_factor: config.depth_fog_density_factor,
            meniscus: config.meniscus,
            far_plane_multiplier: config.far_plane_multiplier,
            eye_pass_index: stereo.eye_pass_index,
            single_pass_stereo: stereo.is_single_pass(),
            first_render,
            debug: config.debug,
        }
    }
}
