//! Ambient lighting for the underwater fog, sampled from light probes.
//! The interpolated probe at the viewer is evaluated once per active frame
//! and published as a single colour.

use glam::{Vec3, Vec4};
use undertow_core::constants::AMBIENT_SAMPLE_DIRECTION;

/// Real spherical harmonics basis constants for bands 0..=2.
const SH_C0: f32 = 0.282_095;
const SH_C1: f32 = 0.488_603;
const SH_C2: f32 = 1.092_548;
const SH_C3: f32 = 0.315_392;
const SH_C4: f32 = 0.546_274;

/// L2 spherical harmonics probe: nine coefficients per colour channel.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SphericalHarmonicsL2 {
    /// `[channel][coefficient]`, channels in R, G, B order.
    pub coefficients: [[f32; 9]; 3],
}

impl SphericalHarmonicsL2 {
    /// Probe that evaluates to `color` in every direction.
    pub fn uniform(color: Vec3) -> Self {
        let mut coefficients = [[0.0; 9]; 3];
        for (channel, value) in color.to_array().into_iter().enumerate() {
            coefficients[channel][0] = value / SH_C0;
        }
        Self { coefficients }
    }

    /// Evaluate the probe in `direction`. Not normalized: the zero vector
    /// yields only the direction-independent part.
    pub fn evaluate(&self, direction: Vec3) -> Vec3 {
        let Vec3 { x, y, z } = direction;
        let basis = [
            SH_C0,
            -SH_C1 * y,
            SH_C1 * z,
            -SH_C1 * x,
            SH_C2 * x * y,
            -SH_C2 * y * z,
            SH_C3 * (3.0 * z * z - 1.0),
            -SH_C2 * x * z,
            SH_C4 * (x * x - y * y),
        ];
        let channel = |c: &[f32; 9]| c.iter().zip(basis.iter()).map(|(a, b)| a * b).sum::<f32>();
        Vec3::new(
            channel(&self.coefficients[0]),
            channel(&self.coefficients[1]),
            channel(&self.coefficients[2]),
        )
    }
}

/// Light probe lookup supplied by the host.
pub trait AmbientLightingProvider {
    fn interpolated_probe_at(&self, position: Vec3) -> SphericalHarmonicsL2;
}

/// A single probe used everywhere.
impl AmbientLightingProvider for SphericalHarmonicsL2 {
    fn interpolated_probe_at(&self, _position: Vec3) -> SphericalHarmonicsL2 {
        *self
    }
}

/// Ambient colour at `position`, alpha 1.
pub fn ambient_lighting_at<P: AmbientLightingProvider + ?Sized>(provider: &P, position: Vec3) -> Vec4 {
    provider
        .interpolated_probe_at(position)
        .evaluate(Vec3::from_array(AMBIENT_SAMPLE_DIRECTION))
        .extend(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uniform_probe_evaluates_to_color() {
        let color = Vec3::new(0.2, 0.4, 0.6);
        let sh = SphericalHarmonicsL2::uniform(color);
        for dir in [Vec3::ZERO, Vec3::X, Vec3::NEG_Y, Vec3::new(0.6, 0.0, 0.8)] {
            assert!((sh.evaluate(dir) - color).length() < 1e-5, "dir {dir}");
        }
    }

    #[test]
    fn test_zero_direction_keeps_constant_terms_only() {
        let mut sh = SphericalHarmonicsL2::default();
        for channel in 0..3 {
            sh.coefficients[channel] = [1.0, 5.0, 5.0, 5.0, 5.0, 5.0, 1.0, 5.0, 5.0];
        }
        let expected = SH_C0 - SH_C3;
        let value = sh.evaluate(Vec3::ZERO);
        assert!((value.x - expected).abs() < 1e-6);
        assert!((value.z - expected).abs() < 1e-6);
    }

    #[test]
    fn test_linear_band_depends_on_direction() {
        let mut sh = SphericalHarmonicsL2::default();
        sh.coefficients[1][2] = 1.0; // green, z term
        assert!(sh.evaluate(Vec3::Z).y > 0.0);
        assert!(sh.evaluate(Vec3::NEG_Z).y < 0.0);
    }

    #[test]
    fn test_ambient_lighting_alpha_is_one() {
        let sh = SphericalHarmonicsL2::uniform(Vec3::splat(0.5));
        let ambient = ambient_lighting_at(&sh, Vec3::new(10.0, -3.0, 2.0));
        assert_eq!(ambient.w, 1.0);
        assert!((ambient.x - 0.5).abs() < 1e-5);
    }
}
