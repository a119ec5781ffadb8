use glam::{Vec3, Vec4};
use undertow_core::math::srgb_color_to_linear;
use undertow_world::ocean::OceanMaterialParams;

use crate::pass_state::PassState;

/// Ocean material values in the form the underwater shaders read them.
/// Colours are linear.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OceanMaterialGlobals {
    pub depth_fog_density: Vec3,
    pub diffuse: Vec4,
    pub diffuse_grazing: Vec4,
    pub diffuse_shadow: Vec4,
    pub subsurface_color: Vec4,
    pub subsurface_sun: f32,
    pub subsurface_base: f32,
    pub subsurface_sun_falloff: f32,
    pub subsurface_scattering: bool,
    pub shadows: bool,
}

impl OceanMaterialGlobals {
    pub fn from_material(material: &OceanMaterialParams) -> Self {
        Self {
            depth_fog_density: material.depth_fog_density,
            diffuse: srgb_color_to_linear(material.diffuse),
            diffuse_grazing: srgb_color_to_linear(material.diffuse_grazing),
            diffuse_shadow: srgb_color_to_linear(material.diffuse_shadow),
            subsurface_color: srgb_color_to_linear(material.subsurface_color),
            subsurface_sun: material.subsurface_sun,
            subsurface_base: material.subsurface_base,
            subsurface_sun_falloff: material.subsurface_sun_falloff,
            subsurface_scattering: material.subsurface_scattering_enabled,
            shadows: material.shadows_enabled,
        }
    }
}

/// Global shader state published once per active frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShaderGlobals {
    pub ambient_lighting: Vec4,
    pub data_slice_offset: i32,
    /// The effect runs before transparents; external shaders apply fog themselves.
    pub before_transparent: bool,
    /// Only set when `before_transparent` is on.
    pub ocean_material: Option<OceanMaterialGlobals>,
}

/// Receives shader globals. Implemented by the GPU uniform uploader and by test recorders.
pub trait ShadingSink {
    fn publish_globals(&mut self, globals: &ShaderGlobals);

    /// Per-pass inputs of a frame that prepared its passes: inverse
    /// view-projection matrices, fog density factor, meniscus and eye index.
    /// Published after [`publish_globals`](Self::publish_globals) of the same frame.
    fn publish_pass_state(&mut self, state: &PassState);
}

pub const FLAG_MENISCUS: u32 = 1 << 0;
pub const FLAG_BEFORE_TRANSPARENT: u32 = 1 << 1;
pub const FLAG_SUBSURFACE_SCATTERING: u32 = 1 << 2;
pub const FLAG_SHADOWS: u32 = 1 << 3;
pub const FLAG_SINGLE_PASS_STEREO: u32 = 1 << 4;
pub const FLAG_VIEW_OCEAN_MASK: u32 = 1 << 5;
pub const FLAG_DISABLE_OCEAN_MASK: u32 = 1 << 6;
pub const FLAG_DISABLE_ARTIFACT_CORRECTION: u32 = 1 << 7;

/// WGSL declaration of [`UnderwaterUniforms`] and its flag constants, for
/// hosts to prepend to their mask and effect shaders.
pub const UNIFORMS_WGSL: &str = include_str!("../../../shaders/underwater/uniforms.wgsl");

/// GPU-uploadable underwater uniforms (256 bytes). Must match UnderwaterUniforms in uniforms.wgsl.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct UnderwaterUniforms {
    pub inv_view_proj: [[f32; 4]; 4],
    pub inv_view_proj_right: [[f32; 4]; 4],
    pub ambient_lighting: [f32; 4],
    pub depth_fog_density: [f32; 4],
    pub diffuse: [f32; 4],
    pub diffuse_grazing: [f32; 4],
    pub diffuse_shadow: [f32; 4],
    pub subsurface_color: [f32; 4],
    pub data_slice_offset: i32,
    pub depth_fog_density_factor: f32,
    pub far_plane_multiplier: f32,
    pub flags: u32,
    pub subsurface_sun: f32,
    pub subsurface_base: f32,
    pub subsurface_sun_falloff: f32,
    pub eye_pass_index: i32,
}

impl UnderwaterUniforms {
    /// Write the per-pass part: matrices, scalars and pass flags.
    pub fn set_pass_state(&mut self, state: &PassState) {
        let matrices = state.inverse_view_projection;
        self.inv_view_proj = matrices.primary.to_cols_array_2d();
        self.inv_view_proj_right = matrices
            .secondary
            .unwrap_or(matrices.primary)
            .to_cols_array_2d();
        self.data_slice_offset = state.data_slice_offset;
        self.depth_fog_density_factor = state.depth_fog_density_factor;
        self.far_plane_multiplier = state.far_plane_multiplier;
        self.eye_pass_index = state.eye_pass_index;

        let pass_flags = FLAG_MENISCUS
            | FLAG_SINGLE_PASS_STEREO
            | FLAG_VIEW_OCEAN_MASK
            | FLAG_DISABLE_OCEAN_MASK
            | FLAG_DISABLE_ARTIFACT_CORRECTION;
        self.flags &= !pass_flags;
        self.flags |= flag(state.meniscus, FLAG_MENISCUS)
            | flag(state.single_pass_stereo, FLAG_SINGLE_PASS_STEREO)
            | flag(state.debug.view_ocean_mask, FLAG_VIEW_OCEAN_MASK)
            | flag(state.debug.disable_ocean_mask, FLAG_DISABLE_OCEAN_MASK)
            | flag(
                state.debug.disable_artifact_correction,
                FLAG_DISABLE_ARTIFACT_CORRECTION,
            );
    }

    /// Write the global part. Material fields keep their last values when the
    /// globals carry no ocean material.
    pub fn set_globals(&mut self, globals: &ShaderGlobals) {
        self.ambient_lighting = globals.ambient_lighting.to_array();
        self.data_slice_offset = globals.data_slice_offset;

        let global_flags = FLAG_BEFORE_TRANSPARENT | FLAG_SUBSURFACE_SCATTERING | FLAG_SHADOWS;
        self.flags &= !global_flags;
        self.flags |= flag(globals.before_transparent, FLAG_BEFORE_TRANSPARENT);

        if let Some(material) = &globals.ocean_material {
            self.depth_fog_density = material.depth_fog_density.extend(0.0).to_array();
            self.diffuse = material.diffuse.to_array();
            self.diffuse_grazing = material.diffuse_grazing.to_array();
            self.diffuse_shadow = material.diffuse_shadow.to_array();
            self.subsurface_color = material.subsurface_color.to_array();
            self.subsurface_sun = material.subsurface_sun;
            self.subsurface_base = material.subsurface_base;
            self.subsurface_sun_falloff = material.subsurface_sun_falloff;
            self.flags |= flag(material.subsurface_scattering, FLAG_SUBSURFACE_SCATTERING)
                | flag(material.shadows, FLAG_SHADOWS);
        }
    }
}

fn flag(on: bool, bit: u32) -> u32 {
    if on {
        bit
    } else {
        0
    }
}

/// Uniform buffer holding [`UnderwaterUniforms`] for wgpu hosts.
/// The buffer is created once; each frame only rewrites its contents.
pub struct GpuShaderGlobals {
    pub buffer: wgpu::Buffer,
    uniforms: UnderwaterUniforms,
}

impl GpuShaderGlobals {
    pub fn new(device: &wgpu::Device) -> Self {
        let buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("underwater-uniforms"),
            size: std::mem::size_of::<UnderwaterUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        Self {
            buffer,
            uniforms: bytemuck::Zeroable::zeroed(),
        }
    }

    pub fn uniforms(&self) -> &UnderwaterUniforms {
        &self.uniforms
    }

    /// Upload the CPU copy. Called once per active frame after publishing.
    pub fn upload(&self, queue: &wgpu::Queue) {
        queue.write_buffer(&self.buffer, 0, bytemuck::bytes_of(&self.uniforms));
    }
}

impl ShadingSink for GpuShaderGlobals {
    fn publish_globals(&mut self, globals: &ShaderGlobals) {
        self.uniforms.set_globals(globals);
    }

    fn publish_pass_state(&mut self, state: &PassState) {
        self.uniforms.set_pass_state(state);
    }
}
