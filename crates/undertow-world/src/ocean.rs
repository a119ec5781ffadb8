use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

/// Ocean material values mirrored into the underwater shaders.
/// Colours are sRGB as authored on the ocean material.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OceanMaterialParams {
    pub depth_fog_density: Vec3,
    pub diffuse: Vec4,
    pub diffuse_grazing: Vec4,
    pub diffuse_shadow: Vec4,
    pub subsurface_color: Vec4,
    pub subsurface_sun: f32,
    pub subsurface_base: f32,
    pub subsurface_sun_falloff: f32,
    pub subsurface_scattering_enabled: bool,
    pub shadows_enabled: bool,
}

impl Default for OceanMaterialParams {
    fn default() -> Self {
        Self {
            depth_fog_density: Vec3::new(0.33, 0.23, 0.37),
            diffuse: Vec4::new(0.0, 0.0124, 0.566, 1.0),
            diffuse_grazing: Vec4::new(0.184, 0.393, 0.519, 1.0),
            diffuse_shadow: Vec4::new(0.0, 0.0, 0.1, 1.0),
            subsurface_color: Vec4::new(0.0, 0.48, 0.36, 1.0),
            subsurface_sun: 0.8,
            subsurface_base: 0.6,
            subsurface_sun_falloff: 4.0,
            subsurface_scattering_enabled: true,
            shadows_enabled: true,
        }
    }
}

/// World/ocean state as seen by the underwater effect.
pub trait OceanProvider {
    /// Whether an ocean instance currently exists.
    fn has_active_world(&self) -> bool;
    /// Signed height of the viewer above the water surface.
    fn viewer_height_above_water(&self) -> f32;
    fn ocean_material_parameters(&self) -> OceanMaterialParams;
}

/// Plain value implementation of [`OceanProvider`], for hosts that sample the
/// ocean once per frame and for tests.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OceanSnapshot {
    pub present: bool,
    pub viewer_height_above_water: f32,
    #[serde(default)]
    pub material: OceanMaterialParams,
}

impl OceanSnapshot {
    /// An ocean exists and the viewer sits `height` above its surface.
    pub fn at_height(height: f32) -> Self {
        Self {
            present: true,
            viewer_height_above_water: height,
            material: OceanMaterialParams::default(),
        }
    }

    /// No ocean in the world.
    pub fn absent() -> Self {
        Self::default()
    }
}

impl OceanProvider for OceanSnapshot {
    fn has_active_world(&self) -> bool {
        self.present
    }

    fn viewer_height_above_water(&self) -> f32 {
        self.viewer_height_above_water
    }

    fn ocean_material_parameters(&self) -> OceanMaterialParams {
        self.material
    }
}
