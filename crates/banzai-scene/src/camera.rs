//! Camera and orbit navigation
//!
//! The camera orbits the origin. Drag rotates, wheel and pinch zoom.
//! Panning is disabled and the polar angle is limited so the camera never
//! dips below the horizon. Zoom goes through `UiState` so the same clamp
//! covers the zoom buttons and direct input.

use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::input::mouse::{AccumulatedMouseMotion, AccumulatedMouseScroll, MouseScrollUnit};
use bevy::prelude::*;
use bevy_egui::EguiContexts;
use std::f32::consts::FRAC_PI_2;

use banzai_core::config::CameraConfig;

use crate::types::{SceneSettings, SceneState};

/// Smallest angle kept between the camera and the vertical axis
const POLE_EPSILON: f32 = 1e-3;

/// Camera controller settings
#[derive(Debug, Clone, Resource)]
pub struct CameraSettings {
    /// Current (eased) distance from the target
    pub distance: f32,
    pub azimuth: f32,
    /// Angle above the horizon
    pub elevation: f32,
    pub min_elevation: f32,
    pub target: Vec3,
    pub sensitivity: f32,
    pub zoom_speed: f32,
    pub smooth_factor: f32,
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default(), 5.0)
    }
}

impl CameraSettings {
    pub fn from_config(config: &CameraConfig, distance: f32) -> Self {
        let min_elevation = (FRAC_PI_2 - config.max_polar_angle).clamp(0.0, FRAC_PI_2 - POLE_EPSILON);
        Self {
            distance,
            azimuth: 0.0,
            elevation: min_elevation,
            min_elevation,
            target: Vec3::ZERO,
            sensitivity: config.sensitivity,
            zoom_speed: 0.1,
            smooth_factor: 0.15,
        }
    }

    /// Rotate by a drag delta in pixels
    pub fn orbit(&mut self, delta: Vec2) {
        self.azimuth -= delta.x * self.sensitivity;
        self.elevation = self.clamp_elevation(self.elevation + delta.y * self.sensitivity);
    }

    pub fn clamp_elevation(&self, elevation: f32) -> f32 {
        elevation.clamp(self.min_elevation, FRAC_PI_2 - POLE_EPSILON)
    }

    /// Camera position for the current angles and distance (Y up)
    pub fn eye(&self) -> Vec3 {
        let horizontal = self.distance * self.elevation.cos();
        self.target
            + Vec3::new(
                horizontal * self.azimuth.sin(),
                self.distance * self.elevation.sin(),
                horizontal * self.azimuth.cos(),
            )
    }
}

/// Marker component for the main camera
#[derive(Component)]
pub struct MainCamera;

/// Plugin for camera controls
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CameraSettings>()
            .add_systems(Startup, spawn_camera)
            .add_systems(Update, (orbit_input, update_camera).chain());
    }
}

fn spawn_camera(
    mut commands: Commands,
    settings: Res<SceneSettings>,
    state: Res<SceneState>,
) {
    let camera_settings = CameraSettings::from_config(&settings.camera, state.camera_distance());

    commands.spawn((
        Camera3d::default(),
        // The cel shader writes display colors directly
        Tonemapping::None,
        Projection::Perspective(PerspectiveProjection {
            fov: settings.camera.fov_degrees.to_radians(),
            ..default()
        }),
        Transform::from_translation(camera_settings.eye()).looking_at(camera_settings.target, Vec3::Y),
        MainCamera,
    ));

    commands.insert_resource(camera_settings);
}

fn orbit_input(
    mut settings: ResMut<CameraSettings>,
    mut state: ResMut<SceneState>,
    mouse_motion: Res<AccumulatedMouseMotion>,
    mouse_scroll: Res<AccumulatedMouseScroll>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    touch_input: Res<Touches>,
    mut contexts: EguiContexts,
) {
    // Panels and buttons keep the pointer while egui is using it
    let egui_wants_pointer = contexts
        .ctx_mut()
        .map(|ctx| ctx.wants_pointer_input() || ctx.is_pointer_over_area())
        .unwrap_or(false);
    if egui_wants_pointer {
        return;
    }

    if mouse_button.pressed(MouseButton::Left) && mouse_motion.delta != Vec2::ZERO {
        settings.orbit(mouse_motion.delta);
    }

    if mouse_scroll.delta.y != 0.0 {
        let lines = match mouse_scroll.unit {
            MouseScrollUnit::Line => mouse_scroll.delta.y,
            MouseScrollUnit::Pixel => mouse_scroll.delta.y / 100.0,
        };
        let zoom_factor = 1.0 - lines * settings.zoom_speed;
        let distance = state.camera_distance() * zoom_factor;
        state.set_camera_distance(distance);
    }

    // Single finger orbits
    if touch_input.iter().count() == 1 {
        for touch in touch_input.iter() {
            let delta = touch.delta();
            if delta != Vec2::ZERO {
                settings.orbit(delta);
            }
        }
    }

    // Pinch to zoom
    if touch_input.iter().count() == 2 {
        let touches: Vec<_> = touch_input.iter().collect();
        if let (Some(t1), Some(t2)) = (touches.first(), touches.get(1)) {
            let curr_dist = t1.position().distance(t2.position());
            let prev_dist = (t1.position() - t1.delta()).distance(t2.position() - t2.delta());
            if curr_dist > 1.0 && (curr_dist - prev_dist).abs() > f32::EPSILON {
                let distance = state.camera_distance() * prev_dist / curr_dist;
                state.set_camera_distance(distance);
            }
        }
    }
}

/// Ease toward the requested distance and place the camera
fn update_camera(
    mut camera_query: Query<&mut Transform, With<MainCamera>>,
    mut settings: ResMut<CameraSettings>,
    state: Res<SceneState>,
    time: Res<Time>,
) {
    let dt = time.delta_secs();
    let lerp_factor = 1.0 - (-settings.smooth_factor * 60.0 * dt).exp();
    let requested = state.camera_distance();
    settings.distance += (requested - settings.distance) * lerp_factor;

    if let Ok(mut transform) = camera_query.single_mut() {
        transform.translation = settings.eye();
        transform.look_at(settings.target, Vec3::Y);
    }
}
