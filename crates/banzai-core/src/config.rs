//! Scene configuration loading
//!
//! The configuration is a small TOML document. Every section and field
//! has a default, so an empty document (or a missing file) yields the
//! stock demo: a spinning cube in the lavender theme.

use serde::{Deserialize, Serialize};
use std::f32::consts::FRAC_PI_2;
use std::path::Path;
use tracing::{info, warn};

use crate::error::{Result, SceneError};
use crate::shading::ShadingConfig;
use crate::state::ZoomRange;
use crate::theme::{default_themes, Theme, ThemeSet};

/// Main configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneConfig {
    #[serde(default)]
    pub scene: SceneSection,
    #[serde(default)]
    pub camera: CameraConfig,
    #[serde(default)]
    pub lights: LightsConfig,
    #[serde(default)]
    pub shading: ShadingConfig,
    #[serde(default = "default_themes", rename = "theme")]
    pub themes: Vec<Theme>,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            scene: SceneSection::default(),
            camera: CameraConfig::default(),
            lights: LightsConfig::default(),
            shading: ShadingConfig::default(),
            themes: default_themes(),
        }
    }
}

/// What the scene object shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SceneMode {
    /// One of the built-in primitives, chosen with the shape picker
    #[default]
    Primitive,
    /// The glTF model at `scene.model_path`
    Model,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneSection {
    #[serde(default)]
    pub mode: SceneMode,
    /// Binary glTF path, relative to the asset root
    #[serde(default = "default_model_path")]
    pub model_path: String,
    /// Redraw the model's meshes with the cel material instead of their own
    #[serde(default = "default_true")]
    pub cel_model: bool,
    /// Whether the scene object casts and receives shadows
    #[serde(default = "default_true")]
    pub shadows: bool,
}

impl Default for SceneSection {
    fn default() -> Self {
        Self {
            mode: SceneMode::default(),
            model_path: default_model_path(),
            cel_model: true,
            shadows: true,
        }
    }
}

fn default_model_path() -> String {
    "models/old_tree.glb".to_string()
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraConfig {
    /// Vertical field of view in degrees
    #[serde(default = "default_fov")]
    pub fov_degrees: f32,
    #[serde(default = "default_initial_distance")]
    pub initial_distance: f32,
    /// Overrides the mode's stock zoom range when both bounds are set
    #[serde(default)]
    pub min_distance: Option<f32>,
    #[serde(default)]
    pub max_distance: Option<f32>,
    /// Largest polar angle from straight up; π/2 keeps the camera above the horizon
    #[serde(default = "default_max_polar")]
    pub max_polar_angle: f32,
    /// Orbit sensitivity in radians per pixel
    #[serde(default = "default_sensitivity")]
    pub sensitivity: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            fov_degrees: default_fov(),
            initial_distance: default_initial_distance(),
            min_distance: None,
            max_distance: None,
            max_polar_angle: default_max_polar(),
            sensitivity: default_sensitivity(),
        }
    }
}

fn default_fov() -> f32 {
    25.0
}

fn default_initial_distance() -> f32 {
    5.0
}

fn default_max_polar() -> f32 {
    FRAC_PI_2
}

fn default_sensitivity() -> f32 {
    0.005
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightsConfig {
    #[serde(default = "default_ambient_intensity")]
    pub ambient_intensity: f32,
    #[serde(default = "default_directional_position")]
    pub directional_position: [f32; 3],
    #[serde(default = "default_directional_intensity")]
    pub directional_intensity: f32,
    /// Shadow map resolution (square)
    #[serde(default = "default_shadow_map_size")]
    pub shadow_map_size: usize,
    /// Distance covered by the sharp near shadow cascade
    #[serde(default = "default_shadow_extent")]
    pub shadow_extent: f32,
    /// Distance beyond which nothing casts shadows
    #[serde(default = "default_shadow_far")]
    pub shadow_far: f32,
    #[serde(default = "default_point_position")]
    pub point_position: [f32; 3],
    #[serde(default = "default_point_intensity")]
    pub point_intensity: f32,
}

impl Default for LightsConfig {
    fn default() -> Self {
        Self {
            ambient_intensity: default_ambient_intensity(),
            directional_position: default_directional_position(),
            directional_intensity: default_directional_intensity(),
            shadow_map_size: default_shadow_map_size(),
            shadow_extent: default_shadow_extent(),
            shadow_far: default_shadow_far(),
            point_position: default_point_position(),
            point_intensity: default_point_intensity(),
        }
    }
}

fn default_ambient_intensity() -> f32 {
    0.4
}

fn default_directional_position() -> [f32; 3] {
    [5.0, 8.0, 7.5]
}

fn default_directional_intensity() -> f32 {
    0.8
}

fn default_shadow_map_size() -> usize {
    2048
}

fn default_shadow_extent() -> f32 {
    10.0
}

fn default_shadow_far() -> f32 {
    50.0
}

fn default_point_position() -> [f32; 3] {
    [-3.0, 2.0, -3.0]
}

fn default_point_intensity() -> f32 {
    1.0
}

/// Nearest distance the directional light's shadow cascades start at
pub const SHADOW_NEAR: f32 = 0.1;

impl CameraConfig {
    pub fn validate(&self) -> Result<()> {
        if !(self.fov_degrees > 0.0 && self.fov_degrees < 180.0) {
            return Err(SceneError::invalid_setting(
                "camera.fov_degrees",
                self.fov_degrees,
                "must be between 0 and 180",
            ));
        }
        if !(0.0..=FRAC_PI_2).contains(&self.max_polar_angle) {
            return Err(SceneError::invalid_setting(
                "camera.max_polar_angle",
                self.max_polar_angle,
                "must be within [0, π/2]",
            ));
        }
        if !(self.sensitivity.is_finite() && self.sensitivity > 0.0) {
            return Err(SceneError::invalid_setting(
                "camera.sensitivity",
                self.sensitivity,
                "must be positive",
            ));
        }
        Ok(())
    }
}

impl LightsConfig {
    pub fn validate(&self) -> Result<()> {
        if self.shadow_map_size == 0 {
            return Err(SceneError::invalid_setting(
                "lights.shadow_map_size",
                0.0,
                "must be positive",
            ));
        }
        if !(self.shadow_far.is_finite() && self.shadow_far > SHADOW_NEAR) {
            return Err(SceneError::invalid_setting(
                "lights.shadow_far",
                self.shadow_far,
                "must be greater than 0.1",
            ));
        }
        if !(self.shadow_extent > SHADOW_NEAR && self.shadow_extent < self.shadow_far) {
            return Err(SceneError::invalid_setting(
                "lights.shadow_extent",
                self.shadow_extent,
                "must lie between 0.1 and shadow_far",
            ));
        }
        Ok(())
    }
}

impl SceneConfig {
    /// Parse configuration from a TOML string
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: SceneConfig = toml::from_str(content)?;
        // Validate eagerly so a bad file fails at startup, not on first click
        config.theme_set()?;
        config.camera.validate()?;
        config.lights.validate()?;
        if let (Some(min), Some(max)) = (config.camera.min_distance, config.camera.max_distance) {
            ZoomRange::new(min, max)?;
        }
        Ok(config)
    }

    /// Zoom range: explicit bounds if both are configured, else the mode's stock range
    pub fn zoom_range(&self) -> ZoomRange {
        let stock = match self.scene.mode {
            SceneMode::Primitive => ZoomRange::PRIMITIVE,
            SceneMode::Model => ZoomRange::MODEL,
        };

        match (self.camera.min_distance, self.camera.max_distance) {
            (Some(min), Some(max)) => ZoomRange::new(min, max).unwrap_or_else(|e| {
                warn!(error = %e, "Ignoring configured zoom range");
                stock
            }),
            _ => stock,
        }
    }

    pub fn theme_set(&self) -> Result<ThemeSet> {
        ThemeSet::new(self.themes.clone())
    }
}

/// Load configuration from file, falling back to defaults when it is absent
pub fn load_config(path: &Path) -> Result<SceneConfig> {
    if path.exists() {
        let content = std::fs::read_to_string(path)?;
        let config = SceneConfig::from_toml(&content)?;
        info!(path = %path.display(), "Loaded configuration");
        Ok(config)
    } else {
        info!(
            path = %path.display(),
            "Configuration file not found, using defaults"
        );
        Ok(SceneConfig::default())
    }
}
