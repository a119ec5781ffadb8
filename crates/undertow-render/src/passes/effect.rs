use undertow_world::ocean::OceanMaterialParams;

use crate::globals::OceanMaterialGlobals;
use crate::matrices::InverseViewProjection;
use crate::pass_state::PassState;
use crate::pipeline::PassId;

/// What the underwater fog/compositing pass needs to draw one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EffectPassInputs {
    pub inverse_view_projection: InverseViewProjection,
    pub data_slice_offset: i32,
    pub depth_fog_density_factor: f32,
    pub meniscus: bool,
    pub eye_pass_index: i32,
    pub view_ocean_mask: bool,
    pub disable_artifact_correction: bool,
    /// Ocean material values last copied into the effect material.
    pub material: OceanMaterialGlobals,
}

/// Underwater fog pass. Samples the mask written by [`super::OceanMaskPass`]
/// earlier in the same frame.
#[derive(Debug, Clone, Default)]
pub struct UnderwaterEffectPass {
    material: Option<OceanMaterialGlobals>,
    material_copies: u64,
    prepared: Option<EffectPassInputs>,
}

impl UnderwaterEffectPass {
    pub const ID: PassId = PassId::UnderwaterEffect;

    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin_frame(&mut self) {
        self.prepared = None;
    }

    /// Prepare this frame's inputs. Ocean material parameters are copied on the
    /// first render, and every frame when `copy_each_frame` is set.
    pub fn prepare(&mut self, state: &PassState, ocean: &OceanMaterialParams, copy_each_frame: bool) {
        let material = match self.material {
            Some(material) if !state.first_render && !copy_each_frame => material,
            _ => {
                let copied = OceanMaterialGlobals::from_material(ocean);
                self.material = Some(copied);
                self.material_copies += 1;
                copied
            }
        };

        self.prepared = Some(EffectPassInputs {
            inverse_view_projection: state.inverse_view_projection,
            data_slice_offset: state.data_slice_offset,
            depth_fog_density_factor: state.depth_fog_density_factor,
            meniscus: state.meniscus,
            eye_pass_index: state.eye_pass_index,
            view_ocean_mask: state.debug.view_ocean_mask,
            disable_artifact_correction: state.debug.disable_artifact_correction,
            material,
        });
    }

    pub fn prepared(&self) -> Option<&EffectPassInputs> {
        self.prepared.as_ref()
    }

    /// How many times ocean material parameters have been copied.
    pub fn material_copies(&self) -> u64 {
        self.material_copies
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Mat4, Vec3};
    use undertow_core::config::UnderwaterConfig;
    use undertow_core::types::StereoContext;

    fn state(first_render: bool) -> PassState {
        PassState::new(
            &UnderwaterConfig::default(),
            InverseViewProjection {
                primary: Mat4::IDENTITY,
                secondary: None,
            },
            &StereoContext::new(),
            first_render,
        )
    }

    #[test]
    fn test_copies_every_frame_when_enabled() {
        let mut pass = UnderwaterEffectPass::new();
        let ocean = OceanMaterialParams::default();
        pass.prepare(&state(true), &ocean, true);
        pass.prepare(&state(false), &ocean, true);
        pass.prepare(&state(false), &ocean, true);
        assert_eq!(pass.material_copies(), 3);
    }

    #[test]
    fn test_copies_only_on_first_render_when_disabled() {
        let mut pass = UnderwaterEffectPass::new();
        let first = OceanMaterialParams::default();
        let changed = OceanMaterialParams {
            depth_fog_density: Vec3::splat(9.0),
            ..Default::default()
        };
        pass.prepare(&state(true), &first, false);
        pass.prepare(&state(false), &changed, false);
        assert_eq!(pass.material_copies(), 1);
        let inputs = pass.prepared().expect("prepared");
        assert_eq!(inputs.material.depth_fog_density, first.depth_fog_density);
    }

    #[test]
    fn test_missing_copy_is_filled_even_after_first_render() {
        let mut pass = UnderwaterEffectPass::new();
        pass.prepare(&state(false), &OceanMaterialParams::default(), false);
        assert_eq!(pass.material_copies(), 1);
    }

    #[test]
    fn test_begin_frame_clears_inputs() {
        let mut pass = UnderwaterEffectPass::new();
        pass.prepare(&state(true), &OceanMaterialParams::default(), true);
        assert!(pass.prepared().is_some());
        pass.begin_frame();
        assert!(pass.prepared().is_none());
    }
}
