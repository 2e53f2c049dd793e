//! Page layout using bevy_egui

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts, EguiPrimaryContextPass};

use banzai_core::{Action, SceneMode, ThemeSet};
use banzai_scene::ui::{load_error_panel, shape_buttons, spin_button, theme_swatches, zoom_buttons};
use banzai_scene::{AssetStatus, SceneSettings, SceneState, Themes, UiLayout};

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        // UI layout updates run in Update
        app.add_systems(Update, update_ui_layout)
            // Main UI system runs in EguiPrimaryContextPass for proper input handling (bevy_egui 0.38+)
            .add_systems(EguiPrimaryContextPass, ui_system);

        #[cfg(target_arch = "wasm32")]
        app.add_systems(Update, sync_body_theme.run_if(resource_changed::<SceneState>))
            .add_systems(Last, clear_body_theme);
    }
}

/// Update UI layout based on window size
fn update_ui_layout(
    windows: Query<&Window>,
    mut ui_layout: ResMut<UiLayout>,
) {
    if let Ok(window) = windows.single() {
        let width = window.width();
        let height = window.height();

        // Only update if dimensions changed significantly
        if (ui_layout.screen_width - width).abs() > 1.0
            || (ui_layout.screen_height - height).abs() > 1.0
        {
            ui_layout.update_for_screen(width, height);
        }
    }
}

fn ui_system(
    mut contexts: EguiContexts,
    mut state: ResMut<SceneState>,
    themes: Res<Themes>,
    settings: Res<SceneSettings>,
    status: Res<AssetStatus>,
    mut ui_layout: ResMut<UiLayout>,
) {
    let is_mobile = ui_layout.is_mobile;
    let panel_width = ui_layout.panel_width();
    let ui_scale = ui_layout.ui_scale;
    let show_shapes = settings.scene.mode == SceneMode::Primitive;

    // Get the egui context - early return if not available
    let Ok(ctx) = contexts.ctx_mut() else { return };

    let mut actions: Vec<Action> = Vec::new();

    // Mobile: collapsible panel behind a toolbar toggle
    if is_mobile {
        egui::TopBottomPanel::top("mobile_toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let menu_text = if ui_layout.show_panel { "☰ Controls" } else { "☰" };
                if ui.button(egui::RichText::new(menu_text).size(16.0 * ui_scale)).clicked() {
                    ui_layout.show_panel = !ui_layout.show_panel;
                }
                ui.separator();
                ui.label(egui::RichText::new("banzai·box").strong());
            });
        });
    }

    if !is_mobile || ui_layout.show_panel {
        egui::SidePanel::left("control_panel")
            .default_width(panel_width)
            .resizable(!is_mobile)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    project_info(ui, ui_scale);
                    ui.separator();

                    ui.heading(egui::RichText::new("Experience interactive 3D shapes with style").size(20.0 * ui_scale));
                    ui.label(
                        egui::RichText::new("Interactive Demo")
                            .small()
                            .background_color(egui::Color32::from_white_alpha(24)),
                    );
                    ui.add_space(4.0);
                    ui.label(
                        "Welcome to banzai.box, your playground for 3D shape exploration. \
                         Choose different shapes, colors, and watch them come to life with smooth animations.",
                    );
                    ui.add_space(12.0);

                    actions.extend(control_panel(ui, &state, &themes, show_shapes, ui_scale));

                    if let Some(message) = status.error_message() {
                        ui.add_space(12.0);
                        load_error_panel(ui, &message, ui_scale);
                    } else if status.loading {
                        ui.add_space(12.0);
                        ui.horizontal(|ui| {
                            ui.spinner();
                            ui.label("Loading model...");
                        });
                    }

                    ui.add_space(16.0);
                    ui.separator();
                    ui.horizontal(|ui| {
                        ui.label(egui::RichText::new("Design by").small().color(egui::Color32::GRAY));
                        ui.hyperlink_to(
                            egui::RichText::new("Deividas Koncius").small(),
                            "https://www.linkedin.com/in/deividas-koncius/",
                        );
                    });
                });
            });
    }

    // Only touch the state resource when something was clicked, so the scene
    // does not see a change every frame
    if !actions.is_empty() {
        for action in actions {
            if let Err(e) = state.apply(action, &themes) {
                tracing::warn!("Ignoring {:?}: {}", action, e);
            }
        }
    }
}

/// Project summary block at the top of the panel
fn project_info(ui: &mut egui::Ui, ui_scale: f32) {
    egui::Grid::new("project_info").num_columns(2).spacing([12.0, 2.0]).show(ui, |ui| {
        for (key, value) in [
            ("Project:", "BANZAI BOX"),
            ("Services:", "3D VISUALIZATION"),
            ("Type of project:", "INTERACTIVE SHAPES"),
        ] {
            ui.label(egui::RichText::new(key).small().color(egui::Color32::GRAY));
            ui.label(egui::RichText::new(value).small().strong());
            ui.end_row();
        }
    });
    ui.add_space(8.0);
    ui.label(egui::RichText::new("banzai·box").size(32.0 * ui_scale).strong());
}

/// Theme, shape, zoom and spin controls; returns this frame's clicks
fn control_panel(
    ui: &mut egui::Ui,
    state: &SceneState,
    themes: &ThemeSet,
    show_shapes: bool,
    ui_scale: f32,
) -> Vec<Action> {
    let mut actions = Vec::new();

    actions.extend(theme_swatches(ui, themes, state.active_theme(), ui_scale));
    ui.add_space(8.0);

    if show_shapes {
        actions.extend(shape_buttons(ui, state.active_shape(), ui_scale));
        ui.add_space(8.0);
    }

    actions.extend(zoom_buttons(ui, state, ui_scale));
    ui.add_space(8.0);
    actions.extend(spin_button(ui, state.spin(), ui_scale));

    actions
}

/// Body classes to remove and add for the theme at `index`
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
fn body_theme_classes(themes: &ThemeSet, index: usize) -> (Vec<String>, Option<String>) {
    (themes.css_classes(), themes.get(index).map(|t| t.css_class()))
}

#[cfg(target_arch = "wasm32")]
fn document_body() -> Option<web_sys::HtmlElement> {
    web_sys::window()?.document()?.body()
}

/// Keep exactly one `theme-*` class on the page body
#[cfg(target_arch = "wasm32")]
fn sync_body_theme(
    state: Res<SceneState>,
    themes: Res<Themes>,
    mut applied: Local<Option<usize>>,
) {
    let index = state.active_theme();
    if *applied == Some(index) {
        return;
    }
    let Some(body) = document_body() else { return };

    let (remove, add) = body_theme_classes(&themes, index);
    let class_list = body.class_list();
    for class in &remove {
        let _ = class_list.remove_1(class);
    }
    if let Some(class) = add {
        if let Err(e) = class_list.add_1(&class) {
            tracing::warn!("Failed to set body class {}: {:?}", class, e);
        }
    }
    *applied = Some(index);
}

/// Remove theme classes when the app shuts down
#[cfg(target_arch = "wasm32")]
fn clear_body_theme(mut exits: MessageReader<AppExit>, themes: Res<Themes>) {
    if exits.read().next().is_none() {
        return;
    }
    let Some(body) = document_body() else { return };
    let class_list = body.class_list();
    for class in themes.css_classes() {
        let _ = class_list.remove_1(&class);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_theme_classes() {
        let themes = ThemeSet::default();
        let (remove, add) = body_theme_classes(&themes, 1);
        assert_eq!(remove.len(), 5);
        assert!(remove.contains(&"theme-default".to_string()));
        assert_eq!(add.as_deref(), Some("theme-autumn"));

        let (_, none) = body_theme_classes(&themes, 7);
        assert!(none.is_none());
    }
}
