//! Cel (toon) shading model
//!
//! CPU reference of the fragment program in `banzai-scene`'s `cel.wgsl`.
//! Lighting comes from a fixed direction rather than the scene lights:
//!
//! 1. Lambert diffuse is quantized into three hard bands (0, 0.5, 1) and
//!    used to mix between the dark and light colors.
//! 2. A Phong specular term is binarized at 0.7 into a flat 0.3 white.
//! 3. A fresnel rim term is added unclamped, so output may exceed 1.0.

use glam::{Vec3, Vec4};
use serde::{Deserialize, Serialize};

use crate::theme::Rgb;

/// Unnormalized fixed light direction
pub const LIGHT_DIR_RAW: [f32; 3] = [0.5, 0.8, 0.6];

/// Diffuse factors below this are fully dark
pub const SHADOW_THRESHOLD: f32 = 0.5;
/// Diffuse factors at or above this are fully lit
pub const LIT_THRESHOLD: f32 = 0.75;
/// Specular factors strictly above this produce a highlight
pub const SPECULAR_THRESHOLD: f32 = 0.7;
/// Flat highlight added per channel
pub const SPECULAR_INTENSITY: f32 = 0.3;

/// Normalized fixed light direction
pub fn light_dir() -> Vec3 {
    Vec3::from_array(LIGHT_DIR_RAW).normalize()
}

/// Quantize a diffuse factor into {0.0, 0.5, 1.0}
pub fn cel_band(diffuse: f32) -> f32 {
    if diffuse < SHADOW_THRESHOLD {
        0.0
    } else if diffuse < LIT_THRESHOLD {
        0.5
    } else {
        1.0
    }
}

/// Binarize a specular factor into {0.0, 1.0}
pub fn specular_band(specular: f32) -> f32 {
    if specular > SPECULAR_THRESHOLD {
        1.0
    } else {
        0.0
    }
}

/// GLSL `reflect`: mirror `incident` about `normal`
fn reflect(incident: Vec3, normal: Vec3) -> Vec3 {
    incident - 2.0 * normal.dot(incident) * normal
}

/// Uniform parameters of the cel material
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CelParams {
    pub dark_color: Rgb,
    pub light_color: Rgb,
    pub fresnel_color: Rgb,
    pub fresnel_power: f32,
    pub glossiness: f32,
}

impl Default for CelParams {
    /// Foliage palette used by the tree model
    fn default() -> Self {
        Self {
            dark_color: Rgb::new(0.03, 0.15, 0.02),
            light_color: Rgb::new(0.4, 0.8, 0.1),
            fresnel_color: Rgb::new(0.6, 1.0, 0.3),
            fresnel_power: 1.4,
            glossiness: 3.0,
        }
    }
}

impl CelParams {
    /// Derive the three material colors from a theme color
    pub fn for_theme(color: Rgb, shading: &ShadingConfig) -> Self {
        Self {
            dark_color: color.scaled(shading.shadow_factor),
            light_color: color,
            fresnel_color: color.lerp(Rgb::WHITE, shading.rim_whiten),
            fresnel_power: shading.fresnel_power,
            glossiness: shading.glossiness,
        }
    }
}

/// `[shading]` section of the scene configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShadingConfig {
    #[serde(default = "default_fresnel_power")]
    pub fresnel_power: f32,
    #[serde(default = "default_glossiness")]
    pub glossiness: f32,
    /// Dark band color as a fraction of the theme color
    #[serde(default = "default_shadow_factor")]
    pub shadow_factor: f32,
    /// How far the rim color is pushed from the theme color toward white
    #[serde(default = "default_rim_whiten")]
    pub rim_whiten: f32,
}

impl Default for ShadingConfig {
    fn default() -> Self {
        Self {
            fresnel_power: default_fresnel_power(),
            glossiness: default_glossiness(),
            shadow_factor: default_shadow_factor(),
            rim_whiten: default_rim_whiten(),
        }
    }
}

fn default_fresnel_power() -> f32 {
    1.4
}

fn default_glossiness() -> f32 {
    3.0
}

fn default_shadow_factor() -> f32 {
    0.25
}

fn default_rim_whiten() -> f32 {
    0.5
}

/// Shade one pixel from its world-space normal and view direction
pub fn shade(normal: Vec3, view: Vec3, params: &CelParams) -> Vec4 {
    let n = normal.normalize_or_zero();
    let v = view.normalize_or_zero();
    let l = light_dir();

    let diffuse = n.dot(l).max(0.0);
    let band = cel_band(diffuse);
    let base = Vec3::from(params.dark_color).lerp(Vec3::from(params.light_color), band);

    let reflected = reflect(-l, n);
    let specular = v.dot(reflected).max(0.0).powf(params.glossiness);
    let highlight = Vec3::splat(specular_band(specular) * SPECULAR_INTENSITY);

    let fresnel = (1.0 - n.dot(v).max(0.0)).powf(params.fresnel_power);
    let rim = fresnel * Vec3::from(params.fresnel_color);

    (base + highlight + rim).extend(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).abs().max_element() < 1e-5
    }

    #[test]
    fn test_band_boundaries() {
        assert_eq!(cel_band(0.0), 0.0);
        assert_eq!(cel_band(0.4999), 0.0);
        assert_eq!(cel_band(0.5), 0.5);
        assert_eq!(cel_band(0.7499), 0.5);
        assert_eq!(cel_band(0.75), 1.0);
        assert_eq!(cel_band(1.0), 1.0);
    }

    #[test]
    fn test_band_is_always_discrete() {
        for i in 0..=1000 {
            let d = i as f32 / 1000.0;
            let b = cel_band(d);
            assert!(b == 0.0 || b == 0.5 || b == 1.0, "band({d}) = {b}");
        }
    }

    #[test]
    fn test_specular_threshold_is_strict() {
        assert_eq!(specular_band(0.7), 0.0);
        assert_eq!(specular_band(0.7001), 1.0);
    }

    #[test]
    fn test_facing_light_is_lit_with_highlight() {
        let params = CelParams::default();
        let l = light_dir();
        let out = shade(l, l, &params);

        let expected = Vec3::from(params.light_color) + Vec3::splat(SPECULAR_INTENSITY);
        assert!(approx(out.truncate(), expected));
        assert_eq!(out.w, 1.0);
    }

    #[test]
    fn test_facing_away_is_dark() {
        let params = CelParams::default();
        let n = -light_dir();
        let out = shade(n, n, &params);
        assert!(approx(out.truncate(), Vec3::from(params.dark_color)));
    }

    #[test]
    fn test_only_three_diffuse_colors() {
        // With the view along the normal, specular and rim drop out for
        // most normals, leaving only the banded base color.
        let params = CelParams {
            glossiness: 1000.0,
            ..CelParams::default()
        };
        let dark = Vec3::from(params.dark_color);
        let light = Vec3::from(params.light_color);
        let mid = dark.lerp(light, 0.5);

        for i in 0..64 {
            let theta = i as f32 / 64.0 * std::f32::consts::TAU;
            let n = Vec3::new(theta.cos(), 0.3, theta.sin()).normalize();
            let out = shade(n, n, &params).truncate();
            assert!(
                approx(out, dark) || approx(out, mid) || approx(out, light)
                    || approx(out, light + Vec3::splat(SPECULAR_INTENSITY)),
                "unexpected color {out:?}"
            );
        }
    }

    #[test]
    fn test_rim_is_unclamped() {
        let params = CelParams {
            light_color: Rgb::new(1.0, 1.0, 1.0),
            fresnel_color: Rgb::new(1.0, 1.0, 1.0),
            ..CelParams::default()
        };
        // Lit normal viewed at grazing angle: full rim on top of full light
        let n = light_dir();
        let view = n.any_orthonormal_vector();
        let out = shade(n, view, &params);
        assert!(out.x > 1.0);
    }

    #[test]
    fn test_theme_tint() {
        let color = Rgb::new(0.8, 0.4, 0.2);
        let params = CelParams::for_theme(color, &ShadingConfig::default());
        assert_eq!(params.light_color, color);
        assert!(approx(params.dark_color.into(), Vec3::new(0.2, 0.1, 0.05)));
        assert!(approx(params.fresnel_color.into(), Vec3::new(0.9, 0.7, 0.6)));
        assert_eq!(params.fresnel_power, 1.4);
        assert_eq!(params.glossiness, 3.0);
    }
}
