use glam::{Mat4, Vec4};
use undertow_core::error::UnderwaterError;
use undertow_core::math::checked_inverse;
use undertow_core::types::{Eye, RenderCamera, StereoContext, StereoMode};

/// Clip-space depth range expected by the graphics backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DepthRange {
    /// OpenGL convention; projections pass through unchanged.
    NegativeOneToOne,
    /// Direct3D/Metal/Vulkan/WebGPU convention.
    ZeroToOne,
    /// 0..1 with near mapped to 1 and far to 0.
    ReversedZ,
}

/// Adjusts an OpenGL-convention projection to what the backend rasterizes with.
/// Chosen once when the host pipeline is set up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GpuProjection {
    pub depth: DepthRange,
    /// Flip clip-space Y, for backends rendering into textures upside down.
    pub flip_y: bool,
}

impl Default for GpuProjection {
    fn default() -> Self {
        Self::WGPU
    }
}

impl GpuProjection {
    /// wgpu normalizes every backend to 0..1 depth with Y up.
    pub const WGPU: Self = Self {
        depth: DepthRange::ZeroToOne,
        flip_y: false,
    };

    pub const OPENGL: Self = Self {
        depth: DepthRange::NegativeOneToOne,
        flip_y: false,
    };

    pub fn apply(&self, projection: Mat4) -> Mat4 {
        let depth = match self.depth {
            DepthRange::NegativeOneToOne => Mat4::IDENTITY,
            // z' = 0.5 z + 0.5 w
            DepthRange::ZeroToOne => Mat4::from_cols(
                Vec4::X,
                Vec4::Y,
                Vec4::new(0.0, 0.0, 0.5, 0.0),
                Vec4::new(0.0, 0.0, 0.5, 1.0),
            ),
            // z' = 0.5 w - 0.5 z
            DepthRange::ReversedZ => Mat4::from_cols(
                Vec4::X,
                Vec4::Y,
                Vec4::new(0.0, 0.0, -0.5, 0.0),
                Vec4::new(0.0, 0.0, 0.5, 1.0),
            ),
        };
        let flip = if self.flip_y {
            Mat4::from_scale(glam::Vec3::new(1.0, -1.0, 1.0))
        } else {
            Mat4::IDENTITY
        };
        flip * depth * projection
    }
}

/// Inverse view-projection for the current frame. `secondary` holds the right
/// eye in single-pass stereo, where `primary` is the left eye.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InverseViewProjection {
    pub primary: Mat4,
    pub secondary: Option<Mat4>,
}

/// Derives inverse view-projection matrices used to rebuild world positions
/// from depth.
#[derive(Debug, Clone, Copy, Default)]
pub struct MatrixDerivation {
    gpu_projection: GpuProjection,
}

impl MatrixDerivation {
    pub fn new(gpu_projection: GpuProjection) -> Self {
        Self { gpu_projection }
    }

    pub fn gpu_projection(&self) -> GpuProjection {
        self.gpu_projection
    }

    /// `inverse(gpu(P) * V)` for the camera, or per eye in single-pass stereo.
    /// Multi-pass stereo uses the camera transforms of the current eye callback.
    pub fn derive(
        &self,
        camera: &RenderCamera,
        stereo: &StereoContext,
    ) -> Result<InverseViewProjection, UnderwaterError> {
        match stereo.mode {
            StereoMode::SinglePass { left, right } => Ok(InverseViewProjection {
                primary: self.inverse_view_projection(left.projection, left.view, Eye::Left)?,
                secondary: Some(self.inverse_view_projection(
                    right.projection,
                    right.view,
                    Eye::Right,
                )?),
            }),
            StereoMode::Mono | StereoMode::MultiPass => Ok(InverseViewProjection {
                primary: self.inverse_view_projection(
                    camera.projection,
                    camera.world_to_camera,
                    Eye::Center,
                )?,
                secondary: None,
            }),
        }
    }

    /// GPU view-projection (not inverted) for the camera's own transforms.
    pub fn view_projection(&self, camera: &RenderCamera) -> Mat4 {
        self.gpu_projection.apply(camera.projection) * camera.world_to_camera
    }

    fn inverse_view_projection(
        &self,
        projection: Mat4,
        view: Mat4,
        eye: Eye,
    ) -> Result<Mat4, UnderwaterError> {
        let view_projection = self.gpu_projection.apply(projection) * view;
        checked_inverse(view_projection).ok_or(UnderwaterError::NonInvertibleViewProjection { eye })
    }
}
