//! Bevy application setup

use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use bevy_picking::DefaultPickingPlugins;

use banzai_core::{SceneConfig, UiState};
use banzai_scene::{BanzaiScenePlugin, SceneState, UiLayout};

use crate::ui::UiPlugin;

/// Initial control panel state for `config`, with page overrides on the web
fn initial_state(config: &SceneConfig) -> UiState {
    #[allow(unused_mut)]
    let mut state = UiState::from_config(config);

    #[cfg(target_arch = "wasm32")]
    {
        let themes = config.theme_set().unwrap_or_default();
        crate::bootstrap::apply_page_query(&mut state, &themes);
    }

    state
}

/// Run the Bevy application
///
/// `asset_root` is where `scene.model_path` is resolved: empty on the web
/// (the page's own origin), a directory natively.
pub fn run(config: SceneConfig, asset_root: &str) {
    let state = initial_state(&config);

    App::new()
        // Transparent so the page background shows through the canvas
        .insert_resource(ClearColor(Color::NONE))
        .add_plugins(DefaultPlugins
            .set(WindowPlugin {
                primary_window: Some(Window {
                    title: "banzai.box - Interactive Shapes".to_string(),
                    canvas: Some("#banzai-canvas".to_string()),
                    fit_canvas_to_parent: true,
                    prevent_default_event_handling: false,
                    transparent: true,
                    ..default()
                }),
                ..default()
            })
            .set(AssetPlugin {
                file_path: asset_root.to_string(),
                // Don't look for .meta files - the static host doesn't have them
                meta_check: bevy::asset::AssetMetaCheck::Never,
                ..default()
            })
        )
        // bevy_egui looks for the bevy_picking crate's PickingPlugin, so it
        // must be added before EguiPlugin
        .add_plugins(DefaultPickingPlugins)
        .add_plugins(EguiPlugin::default())
        .insert_resource(SceneState(state))
        .init_resource::<UiLayout>()
        .add_plugins(BanzaiScenePlugin { config })
        .add_plugins(UiPlugin)
        .run();
}
