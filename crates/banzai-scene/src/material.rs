//! Cel-shaded material
//!
//! Extends `StandardMaterial` so the mesh keeps the stock vertex stage,
//! shadow prepass and double-sided pipeline, and swaps in the toon
//! fragment program from `shaders/cel.wgsl`.

use bevy::asset::embedded_asset;
use bevy::pbr::{ExtendedMaterial, MaterialExtension};
use bevy::prelude::*;
use bevy::render::render_resource::{AsBindGroup, ShaderType};
use bevy::shader::ShaderRef;

use banzai_core::{CelParams, Rgb};

use crate::types::to_color;

const SHADER_ASSET_PATH: &str = "embedded://banzai_scene/shaders/cel.wgsl";

/// The material every scene object mesh is drawn with
pub type CelMaterial = ExtendedMaterial<StandardMaterial, CelExtension>;

/// Uniform block matching `CelUniform` in the shader
///
/// Colors stay in sRGB so the band mix, highlight and rim add happen in the
/// same space as `banzai_core::shading::shade`. The shader converts only its
/// final color to linear for the sRGB render target.
#[derive(Debug, Clone, Copy, PartialEq, Reflect, ShaderType)]
pub struct CelUniform {
    pub dark_color: Vec4,
    pub light_color: Vec4,
    pub fresnel_color: Vec4,
    pub fresnel_power: f32,
    pub glossiness: f32,
}

impl From<&CelParams> for CelUniform {
    fn from(params: &CelParams) -> Self {
        let srgb = |c: Rgb| Vec4::new(c.r, c.g, c.b, 1.0);
        Self {
            dark_color: srgb(params.dark_color),
            light_color: srgb(params.light_color),
            fresnel_color: srgb(params.fresnel_color),
            fresnel_power: params.fresnel_power,
            glossiness: params.glossiness,
        }
    }
}

#[derive(Asset, AsBindGroup, Reflect, Debug, Clone)]
pub struct CelExtension {
    #[uniform(100)]
    pub params: CelUniform,
}

impl Default for CelExtension {
    fn default() -> Self {
        Self {
            params: CelUniform::from(&CelParams::default()),
        }
    }
}

impl MaterialExtension for CelExtension {
    fn fragment_shader() -> ShaderRef {
        SHADER_ASSET_PATH.into()
    }
}

/// Build a double-sided opaque cel material
pub fn cel_material(params: &CelParams) -> CelMaterial {
    ExtendedMaterial {
        base: StandardMaterial {
            base_color: to_color(params.light_color),
            double_sided: true,
            cull_mode: None,
            ..default()
        },
        extension: CelExtension {
            params: CelUniform::from(params),
        },
    }
}

/// Rewrite the shading parameters of an existing material
pub fn retint(material: &mut CelMaterial, params: &CelParams) {
    material.base.base_color = to_color(params.light_color);
    material.extension.params = CelUniform::from(params);
}

/// Registers the cel material and embeds its shader
pub struct CelMaterialPlugin;

impl Plugin for CelMaterialPlugin {
    fn build(&self, app: &mut App) {
        embedded_asset!(app, "shaders/cel.wgsl");
        app.add_plugins(MaterialPlugin::<CelMaterial>::default());
    }
}
