//! Banzai Scene - Cel-shaded 3D scene for banzai.box
//!
//! This crate provides the Bevy side of the demo: the cel material, the
//! scene host (camera, orbit controls, lights), the spinning scene object
//! and the egui widgets of the control panel.

pub mod camera;
pub mod material;
pub mod models;
pub mod scene;
pub mod types;
pub mod ui;

use bevy::prelude::*;

use banzai_core::{SceneConfig, UiState};

/// Plugin that sets up the scene
///
/// Inserts the scene resources from `config` unless the app already has them.
pub struct BanzaiScenePlugin {
    pub config: SceneConfig,
}

impl Plugin for BanzaiScenePlugin {
    fn build(&self, app: &mut App) {
        let themes = self.config.theme_set().unwrap_or_else(|e| {
            tracing::warn!("{}, using stock themes", e);
            banzai_core::ThemeSet::default()
        });

        if !app.world().contains_resource::<SceneState>() {
            app.insert_resource(SceneState(UiState::from_config(&self.config)));
        }

        app.insert_resource(SceneSettings(self.config.clone()))
            .insert_resource(Themes(themes))
            .add_plugins(material::CelMaterialPlugin)
            .add_plugins(camera::CameraPlugin)
            .add_plugins(scene::SceneSetupPlugin)
            .add_plugins(models::ModelsPlugin);
    }
}

// Re-export commonly used types
pub use camera::CameraSettings;
pub use material::CelMaterial;
pub use types::*;
