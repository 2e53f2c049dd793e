//! Scene host lighting
//!
//! A soft ambient term, one shadow-casting directional light, and a point
//! light tinted with the active theme.

use bevy::light::{CascadeShadowConfig, CascadeShadowConfigBuilder, DirectionalLightShadowMap};
use bevy::prelude::*;

use banzai_core::config::LightsConfig;
use banzai_core::SHADOW_NEAR;

use crate::types::{to_color, SceneSettings, SceneState, Themes};

/// Bevy's lights are photometric; config intensities are unitless multipliers
const AMBIENT_BRIGHTNESS_PER_UNIT: f32 = 500.0;
const DIRECTIONAL_LUX_PER_UNIT: f32 = 10_000.0;
const POINT_LUMENS_PER_UNIT: f32 = 100_000.0;

/// Marker component for the main directional light
#[derive(Component)]
pub struct MainDirectionalLight;

/// Marker for the accent light that follows the theme color
#[derive(Component)]
pub struct ThemeLight;

/// Plugin for scene setup
pub struct SceneSetupPlugin;

impl Plugin for SceneSetupPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_lights)
            .add_systems(Update, sync_theme_light.run_if(resource_changed::<SceneState>));
    }
}

fn setup_lights(
    mut commands: Commands,
    settings: Res<SceneSettings>,
    themes: Res<Themes>,
    state: Res<SceneState>,
) {
    let lights = &settings.lights;

    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: lights.ambient_intensity * AMBIENT_BRIGHTNESS_PER_UNIT,
        ..default()
    });

    commands.insert_resource(DirectionalLightShadowMap {
        size: lights.shadow_map_size,
    });

    let cascades = shadow_cascades(lights);

    commands.spawn((
        DirectionalLight {
            illuminance: lights.directional_intensity * DIRECTIONAL_LUX_PER_UNIT,
            shadows_enabled: true,
            ..default()
        },
        Transform::from_translation(Vec3::from_array(lights.directional_position))
            .looking_at(Vec3::ZERO, Vec3::Y),
        cascades,
        MainDirectionalLight,
    ));

    let theme = themes.active(state.active_theme());
    commands.spawn((
        PointLight {
            intensity: lights.point_intensity * POINT_LUMENS_PER_UNIT,
            color: to_color(theme.color),
            shadows_enabled: false,
            ..default()
        },
        Transform::from_translation(Vec3::from_array(lights.point_position)),
        ThemeLight,
    ));
}

/// Two cascades: a sharp one out to `shadow_extent`, a coarse one to `shadow_far`
///
/// The ranges are checked when the configuration is parsed.
pub fn shadow_cascades(lights: &LightsConfig) -> CascadeShadowConfig {
    CascadeShadowConfigBuilder {
        num_cascades: 2,
        minimum_distance: SHADOW_NEAR,
        maximum_distance: lights.shadow_far,
        first_cascade_far_bound: lights.shadow_extent,
        ..default()
    }
    .build()
}

/// Recolor the accent light when the theme changes
fn sync_theme_light(
    state: Res<SceneState>,
    themes: Res<Themes>,
    mut lights: Query<&mut PointLight, With<ThemeLight>>,
    mut applied: Local<Option<usize>>,
) {
    let index = state.active_theme();
    if *applied == Some(index) {
        return;
    }

    let color = to_color(themes.active(index).color);
    for mut light in &mut lights {
        light.color = color;
    }
    *applied = Some(index);
}

#[cfg(test)]
mod tests {
    use super::*;
    use banzai_core::{Action, SceneConfig};

    fn test_app() -> App {
        let mut app = App::new();
        app.insert_resource(SceneSettings(SceneConfig::default()))
            .insert_resource(Themes::default())
            .insert_resource(SceneState::default())
            .add_plugins(SceneSetupPlugin);
        app
    }

    #[test]
    fn test_point_light_follows_theme() {
        let mut app = test_app();
        app.update();

        let themes = app.world().resource::<Themes>().clone();
        let expected = to_color(themes.get(3).unwrap().color);
        app.world_mut()
            .resource_mut::<SceneState>()
            .apply(Action::SelectTheme(3), &themes)
            .unwrap();
        app.update();

        let mut query = app.world_mut().query_filtered::<&PointLight, With<ThemeLight>>();
        let light = query.single(app.world()).unwrap();
        assert_eq!(light.color, expected);
    }

    #[test]
    fn test_shadow_map_size_from_config() {
        let mut app = test_app();
        app.update();
        assert_eq!(app.world().resource::<DirectionalLightShadowMap>().size, 2048);

        let mut query = app.world_mut().query::<(&DirectionalLight, &CascadeShadowConfig)>();
        let (light, cascades) = query.single(app.world()).unwrap();
        assert!(light.shadows_enabled);
        assert_eq!(cascades.bounds, vec![10.0, 50.0]);
    }

    #[test]
    fn test_shadow_extent_sets_near_cascade() {
        let near = LightsConfig {
            shadow_extent: 2.0,
            ..LightsConfig::default()
        };
        let far = LightsConfig {
            shadow_extent: 25.0,
            shadow_far: 80.0,
            ..LightsConfig::default()
        };
        assert_eq!(shadow_cascades(&near).bounds, vec![2.0, 50.0]);
        assert_eq!(shadow_cascades(&far).bounds, vec![25.0, 80.0]);
        assert_eq!(shadow_cascades(&near).minimum_distance, SHADOW_NEAR);
    }
}
