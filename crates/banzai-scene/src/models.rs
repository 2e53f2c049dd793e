//! Scene object: the spinning primitive or loaded model
//!
//! A pivot entity at the origin carries the spin angle; its single child is
//! either a primitive mesh, the glTF scene, or the fallback cube spawned
//! when the model cannot be loaded. Shape and theme changes are applied
//! only when the UI state resource changes, and only if the visible value
//! actually differs from what was last applied.

use bevy::asset::LoadState;
use bevy::gltf::Gltf;
use bevy::light::{NotShadowCaster, NotShadowReceiver};
use bevy::prelude::*;
use std::collections::HashMap;
use std::f32::consts::FRAC_PI_2;

use banzai_core::{CelParams, SceneError, SceneMode, ShapeKind, Spin};

use crate::material::{cel_material, retint, CelMaterial};
use crate::types::{to_color, AssetStatus, SceneSettings, SceneState, Themes};

/// Pivot of the scene object; rotates about +Y
#[derive(Component, Debug, Default)]
pub struct SceneObject {
    pub spin: Spin,
}

/// Primitive mesh child, remembering which shape it shows
#[derive(Component, Debug)]
pub struct ShapeMesh {
    pub shape: ShapeKind,
}

/// Root of the spawned glTF scene
#[derive(Component)]
pub struct ModelRoot;

/// Placeholder cube shown when the model fails to load
#[derive(Component)]
pub struct FallbackCube;

/// Prebuilt mesh for every primitive, so a shape change only swaps a handle
#[derive(Resource, Debug, Default)]
pub struct ShapeMeshes {
    meshes: HashMap<ShapeKind, Handle<Mesh>>,
}

impl ShapeMeshes {
    pub fn build(meshes: &mut Assets<Mesh>) -> Self {
        let meshes = ShapeKind::ALL
            .into_iter()
            .map(|kind| (kind, meshes.add(shape_mesh(kind))))
            .collect();
        Self { meshes }
    }

    pub fn get(&self, kind: ShapeKind) -> Option<Handle<Mesh>> {
        self.meshes.get(&kind).cloned()
    }
}

/// Shared cel material of the scene object
#[derive(Resource, Debug, Clone)]
pub struct CelMaterialHandle(pub Handle<CelMaterial>);

/// In-flight glTF load
#[derive(Resource, Debug)]
pub struct ModelLoad {
    pub path: String,
    pub handle: Handle<Gltf>,
}

/// Mesh for a primitive shape
pub fn shape_mesh(kind: ShapeKind) -> Mesh {
    match kind {
        ShapeKind::Box => Cuboid::new(1.0, 1.0, 1.0).into(),
        ShapeKind::Sphere => Sphere::new(0.7).mesh().uv(48, 32),
        ShapeKind::Cylinder => Cylinder::new(0.5, 1.2).into(),
        ShapeKind::Torus => Torus::new(0.4, 0.8).into(),
    }
}

/// Local transform of a primitive under the pivot
pub fn shape_transform(kind: ShapeKind) -> Transform {
    match kind {
        // Stand the ring up so the spin about Y is visible
        ShapeKind::Torus => Transform::from_rotation(Quat::from_rotation_x(FRAC_PI_2)),
        _ => Transform::IDENTITY,
    }
}

/// Plugin for the scene object and its animation
pub struct ModelsPlugin;

impl Plugin for ModelsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<AssetStatus>()
            .add_systems(Startup, spawn_scene_object)
            .add_systems(
                Update,
                (
                    poll_model_load.run_if(resource_exists::<ModelLoad>),
                    apply_cel_to_model,
                    (apply_shape, apply_theme).run_if(resource_changed::<SceneState>),
                    spin_scene_object,
                ),
            );
    }
}

fn spawn_scene_object(
    mut commands: Commands,
    settings: Res<SceneSettings>,
    themes: Res<Themes>,
    state: Res<SceneState>,
    asset_server: Res<AssetServer>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<CelMaterial>>,
    mut status: ResMut<AssetStatus>,
) {
    let theme = themes.active(state.active_theme());
    let params = CelParams::for_theme(theme.color, &settings.shading);
    let material = materials.add(cel_material(&params));
    commands.insert_resource(CelMaterialHandle(material.clone()));

    let pivot = commands
        .spawn((
            Transform::IDENTITY,
            Visibility::default(),
            SceneObject::default(),
        ))
        .id();

    match settings.scene.mode {
        SceneMode::Primitive => {
            let shape_meshes = ShapeMeshes::build(&mut meshes);
            let shape = state.active_shape();
            if let Some(mesh) = shape_meshes.get(shape) {
                let child = commands
                    .spawn((
                        Mesh3d(mesh),
                        MeshMaterial3d(material),
                        shape_transform(shape),
                        ShapeMesh { shape },
                    ))
                    .id();
                set_shadows(&mut commands, child, settings.scene.shadows);
                commands.entity(pivot).add_child(child);
            }
            commands.insert_resource(shape_meshes);
        }
        SceneMode::Model => {
            let path = settings.scene.model_path.clone();
            tracing::info!("Starting to load model: {}", path);
            let handle: Handle<Gltf> = asset_server.load(&path);
            status.loading = true;
            commands.insert_resource(ModelLoad { path, handle });
        }
    }
}

fn set_shadows(commands: &mut Commands, entity: Entity, enabled: bool) {
    if !enabled {
        commands.entity(entity).insert((NotShadowCaster, NotShadowReceiver));
    }
}

/// Check the glTF load and spawn the model or the fallback cube
fn poll_model_load(
    mut commands: Commands,
    load: Res<ModelLoad>,
    asset_server: Res<AssetServer>,
    gltf_assets: Res<Assets<Gltf>>,
    settings: Res<SceneSettings>,
    themes: Res<Themes>,
    state: Res<SceneState>,
    pivots: Query<Entity, With<SceneObject>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut status: ResMut<AssetStatus>,
) {
    let outcome = match asset_server.get_load_state(load.handle.id()) {
        Some(LoadState::Loaded) => match gltf_assets.get(&load.handle) {
            Some(gltf) => gltf
                .default_scene
                .clone()
                .or_else(|| gltf.scenes.first().cloned())
                .ok_or_else(|| SceneError::asset_load(&load.path, "file contains no scenes")),
            // Loaded but not yet in Assets; try again next frame
            None => return,
        },
        Some(LoadState::Failed(err)) => Err(SceneError::asset_load(&load.path, err)),
        _ => return,
    };

    commands.remove_resource::<ModelLoad>();
    status.loading = false;

    let Ok(pivot) = pivots.single() else {
        tracing::warn!("No scene object to attach model to");
        return;
    };

    let child = match outcome {
        Ok(scene) => {
            tracing::info!("Model loaded: {}", load.path);
            commands.spawn((SceneRoot(scene), Transform::IDENTITY, ModelRoot)).id()
        }
        Err(err) => {
            tracing::error!("{}", err);
            let theme = themes.active(state.active_theme());
            let child = commands
                .spawn((
                    Mesh3d(meshes.add(Cuboid::new(1.0, 1.0, 1.0))),
                    MeshMaterial3d(materials.add(StandardMaterial {
                        base_color: to_color(theme.color),
                        ..default()
                    })),
                    Transform::IDENTITY,
                    FallbackCube,
                ))
                .id();
            status.error = Some(err);
            child
        }
    };

    set_shadows(&mut commands, child, settings.scene.shadows);
    commands.entity(pivot).add_child(child);
}

/// Give meshes spawned from the glTF scene the cel material
fn apply_cel_to_model(
    mut commands: Commands,
    added: Query<Entity, Added<MeshMaterial3d<StandardMaterial>>>,
    parents: Query<&ChildOf>,
    roots: Query<(), With<ModelRoot>>,
    material: Option<Res<CelMaterialHandle>>,
    settings: Res<SceneSettings>,
) {
    let Some(material) = material else { return };
    if !settings.scene.cel_model {
        return;
    }

    for entity in &added {
        if parents.iter_ancestors(entity).any(|a| roots.contains(a)) {
            let mut entity = commands.entity(entity);
            entity
                .remove::<MeshMaterial3d<StandardMaterial>>()
                .insert(MeshMaterial3d(material.0.clone()));
            if !settings.scene.shadows {
                entity.insert((NotShadowCaster, NotShadowReceiver));
            }
        }
    }
}

/// Swap the primitive mesh when a different shape is selected
fn apply_shape(
    state: Res<SceneState>,
    shape_meshes: Option<Res<ShapeMeshes>>,
    mut query: Query<(&mut ShapeMesh, &mut Mesh3d, &mut Transform)>,
) {
    let Some(shape_meshes) = shape_meshes else { return };
    let shape = state.active_shape();

    for (mut current, mut mesh, mut transform) in &mut query {
        if current.shape == shape {
            continue;
        }
        let Some(handle) = shape_meshes.get(shape) else { continue };
        mesh.0 = handle;
        *transform = shape_transform(shape);
        current.shape = shape;
        tracing::debug!("Shape changed to {}", shape);
    }
}

/// Retint the cel material and fallback cube when the theme changes
fn apply_theme(
    state: Res<SceneState>,
    themes: Res<Themes>,
    settings: Res<SceneSettings>,
    material: Option<Res<CelMaterialHandle>>,
    mut cel_materials: ResMut<Assets<CelMaterial>>,
    mut standard_materials: ResMut<Assets<StandardMaterial>>,
    fallback: Query<&MeshMaterial3d<StandardMaterial>, With<FallbackCube>>,
    mut applied: Local<Option<usize>>,
) {
    let index = state.active_theme();
    if *applied == Some(index) {
        return;
    }
    // The material is created in the same frame as the first run
    let Some(material) = material else { return };

    let theme = themes.active(index);
    if let Some(cel) = cel_materials.get_mut(&material.0) {
        retint(cel, &CelParams::for_theme(theme.color, &settings.shading));
    }
    for handle in &fallback {
        if let Some(standard) = standard_materials.get_mut(&handle.0) {
            standard.base_color = to_color(theme.color);
        }
    }

    *applied = Some(index);
}

/// Advance the spin and rotate the pivot about the vertical axis
fn spin_scene_object(
    state: Res<SceneState>,
    time: Res<Time>,
    mut query: Query<(&mut SceneObject, &mut Transform)>,
) {
    let spin_state = state.spin();
    let dt = time.delta_secs();

    for (mut object, mut transform) in &mut query {
        object.spin.advance(spin_state, dt);
        transform.rotation = Quat::from_rotation_y(object.spin.angle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::material::CelUniform;
    use banzai_core::{Action, SceneConfig, ShadingConfig, ThemeSet, UiState};
    use std::time::Duration;

    fn test_app() -> App {
        let mut app = App::new();
        app.insert_resource(SceneSettings(SceneConfig::default()))
            .insert_resource(Themes::default())
            .insert_resource(SceneState::default())
            .init_resource::<Time>()
            .init_resource::<Assets<Mesh>>()
            .add_systems(
                Update,
                (
                    apply_shape.run_if(resource_changed::<SceneState>),
                    spin_scene_object,
                ),
            );

        let shape_meshes = ShapeMeshes::build(&mut app.world_mut().resource_mut::<Assets<Mesh>>());
        let mesh = shape_meshes.get(ShapeKind::Box).unwrap();
        app.insert_resource(shape_meshes);

        app.world_mut()
            .spawn((Transform::IDENTITY, SceneObject::default()))
            .with_child((
                Mesh3d(mesh),
                Transform::IDENTITY,
                ShapeMesh {
                    shape: ShapeKind::Box,
                },
            ));
        app
    }

    fn act(app: &mut App, action: Action) {
        let themes = ThemeSet::default();
        app.world_mut()
            .resource_mut::<SceneState>()
            .apply(action, &themes)
            .unwrap();
    }

    fn advance(app: &mut App, secs: f32) {
        app.world_mut()
            .resource_mut::<Time>()
            .advance_by(Duration::from_secs_f32(secs));
        app.update();
    }

    fn angle(app: &mut App) -> f32 {
        let mut query = app.world_mut().query::<&SceneObject>();
        query.single(app.world()).unwrap().spin.angle
    }

    fn rotation(app: &mut App) -> Quat {
        let mut query = app.world_mut().query_filtered::<&Transform, With<SceneObject>>();
        query.single(app.world()).unwrap().rotation
    }

    #[test]
    fn test_spins_by_default() {
        let mut app = test_app();
        advance(&mut app, 1.0);
        assert!((angle(&mut app) - 0.5).abs() < 1e-5);
        assert!(rotation(&mut app).angle_between(Quat::from_rotation_y(0.5)) < 1e-4);
    }

    #[test]
    fn test_sphere_stop_then_start() {
        let mut app = test_app();
        app.update();

        act(&mut app, Action::SelectShape(ShapeKind::Sphere));
        act(&mut app, Action::ToggleSpin);
        let start = angle(&mut app);

        advance(&mut app, 1.0);
        advance(&mut app, 1.0);
        assert_eq!(angle(&mut app), start);

        let expected = app
            .world()
            .resource::<ShapeMeshes>()
            .get(ShapeKind::Sphere)
            .unwrap();
        let mut query = app.world_mut().query::<(&ShapeMesh, &Mesh3d)>();
        let (shape, mesh) = query.single(app.world()).unwrap();
        assert_eq!(shape.shape, ShapeKind::Sphere);
        assert_eq!(mesh.0, expected);

        act(&mut app, Action::ToggleSpin);
        advance(&mut app, 1.0);
        assert!((angle(&mut app) - (start + 0.5)).abs() < 1e-5);
    }

    #[test]
    fn test_torus_is_stood_up() {
        let mut app = test_app();
        act(&mut app, Action::SelectShape(ShapeKind::Torus));
        app.update();

        let mut query = app.world_mut().query_filtered::<&Transform, With<ShapeMesh>>();
        let transform = query.single(app.world()).unwrap();
        assert_eq!(*transform, shape_transform(ShapeKind::Torus));
    }

    #[test]
    fn test_theme_change_retints_cel_material() {
        let shading = ShadingConfig::default();
        let themes = ThemeSet::default();

        let mut app = App::new();
        app.insert_resource(SceneSettings(SceneConfig::default()))
            .insert_resource(Themes::default())
            .insert_resource(SceneState::default())
            .init_resource::<Assets<CelMaterial>>()
            .init_resource::<Assets<StandardMaterial>>()
            .add_systems(Update, apply_theme.run_if(resource_changed::<SceneState>));

        let first = CelParams::for_theme(themes.first().color, &shading);
        let handle = app
            .world_mut()
            .resource_mut::<Assets<CelMaterial>>()
            .add(cel_material(&first));
        app.insert_resource(CelMaterialHandle(handle.clone()));
        app.update();

        act(&mut app, Action::SelectTheme(2));
        app.update();

        let spring = themes.get(2).unwrap();
        let expected = CelParams::for_theme(spring.color, &shading);
        let materials = app.world().resource::<Assets<CelMaterial>>();
        let material = materials.get(&handle).unwrap();
        assert_eq!(material.extension.params, CelUniform::from(&expected));
        assert_eq!(material.base.base_color, to_color(spring.color));
        assert!(material.base.double_sided);
        assert!(material.base.cull_mode.is_none());

        let state = app.world().resource::<SceneState>();
        assert_eq!(state.active_shape(), ShapeKind::Box);
        assert!(state.spin().is_spinning());
    }

    /// App that tries to load a model that does not exist
    fn missing_model_app() -> App {
        let mut config = SceneConfig::default();
        config.scene.mode = SceneMode::Model;
        config.scene.model_path = "models/does_not_exist.glb".to_string();

        let mut app = App::new();
        app.add_plugins((
            MinimalPlugins,
            AssetPlugin {
                meta_check: bevy::asset::AssetMetaCheck::Never,
                ..default()
            },
        ))
        .init_asset::<Gltf>()
        .init_asset::<Mesh>()
        .init_asset::<StandardMaterial>()
        .init_asset::<CelMaterial>()
        .insert_resource(SceneState(UiState::from_config(&config)))
        .insert_resource(SceneSettings(config))
        .insert_resource(Themes::default())
        .add_plugins(ModelsPlugin);
        app
    }

    fn wait_for_load(app: &mut App) {
        for _ in 0..500 {
            app.update();
            if !app.world().resource::<AssetStatus>().loading {
                return;
            }
            std::thread::sleep(Duration::from_millis(5));
        }
        panic!("model load never finished");
    }

    #[test]
    fn test_missing_model_spawns_fallback_cube() {
        let mut app = missing_model_app();
        wait_for_load(&mut app);
        app.update();

        let status = app.world().resource::<AssetStatus>();
        assert!(
            matches!(&status.error, Some(SceneError::AssetLoad { path, .. }) if path == "models/does_not_exist.glb"),
            "unexpected status {:?}",
            status.error
        );
        assert!(status.error_message().unwrap().contains("does_not_exist.glb"));
        assert!(!app.world().contains_resource::<ModelLoad>());

        let mut pivots = app.world_mut().query_filtered::<Entity, With<SceneObject>>();
        let pivot = pivots.single(app.world()).unwrap();
        let mut cubes = app.world_mut().query_filtered::<&ChildOf, With<FallbackCube>>();
        let parents: Vec<Entity> = cubes.iter(app.world()).map(|c| c.parent()).collect();
        assert_eq!(parents, vec![pivot]);

        let mut roots = app.world_mut().query_filtered::<(), With<ModelRoot>>();
        assert_eq!(roots.iter(app.world()).count(), 0);
    }

    #[test]
    fn test_fallback_cube_follows_theme() {
        let mut app = missing_model_app();
        wait_for_load(&mut app);
        app.update();

        act(&mut app, Action::SelectTheme(3));
        app.update();

        let winter = to_color(ThemeSet::default().get(3).unwrap().color);
        let mut cubes = app
            .world_mut()
            .query_filtered::<&MeshMaterial3d<StandardMaterial>, With<FallbackCube>>();
        let handle = cubes.single(app.world()).unwrap().0.clone();
        let materials = app.world().resource::<Assets<StandardMaterial>>();
        assert_eq!(materials.get(&handle).unwrap().base_color, winter);
    }

    #[test]
    fn test_every_shape_has_a_mesh() {
        let mut meshes = Assets::<Mesh>::default();
        let shape_meshes = ShapeMeshes::build(&mut meshes);
        for kind in ShapeKind::ALL {
            let handle = shape_meshes.get(kind).unwrap();
            assert!(meshes.get(&handle).is_some());
        }
    }
}
