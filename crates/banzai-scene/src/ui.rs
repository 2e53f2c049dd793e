//! Control panel widgets
//!
//! Each widget draws its controls and returns the action the user picked
//! this frame, if any. The caller applies actions to the UI state.

use bevy_egui::egui;

use banzai_core::{Action, Rgb, ShapeKind, SpinState, ThemeSet, UiState};

fn to_color32(rgb: Rgb) -> egui::Color32 {
    let byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    egui::Color32::from_rgb(byte(rgb.r), byte(rgb.g), byte(rgb.b))
}

fn option_title(ui: &mut egui::Ui, text: &str, ui_scale: f32) {
    ui.label(
        egui::RichText::new(text)
            .size(12.0 * ui_scale)
            .color(egui::Color32::GRAY),
    );
}

/// Row of round color swatches
pub fn theme_swatches(
    ui: &mut egui::Ui,
    themes: &ThemeSet,
    active: usize,
    ui_scale: f32,
) -> Option<Action> {
    let mut action = None;
    let size = 28.0 * ui_scale;

    option_title(ui, "Choose your theme", ui_scale);
    ui.horizontal(|ui| {
        for (index, theme) in themes.iter().enumerate() {
            let stroke = if index == active {
                egui::Stroke::new(3.0, egui::Color32::WHITE)
            } else {
                egui::Stroke::new(1.0, egui::Color32::from_white_alpha(120))
            };
            let swatch = egui::Button::new("")
                .fill(to_color32(theme.color))
                .stroke(stroke)
                .corner_radius(size / 2.0)
                .min_size(egui::vec2(size, size));
            if ui.add(swatch).on_hover_text(theme.name.as_str()).clicked() {
                action = Some(Action::SelectTheme(index));
            }
        }
    });

    action
}

/// One button per primitive shape
pub fn shape_buttons(ui: &mut egui::Ui, active: ShapeKind, ui_scale: f32) -> Option<Action> {
    let mut action = None;

    option_title(ui, "Choose shape", ui_scale);
    ui.horizontal_wrapped(|ui| {
        for kind in ShapeKind::ALL {
            let text = egui::RichText::new(kind.label()).size(14.0 * ui_scale);
            if ui.selectable_label(kind == active, text).clicked() {
                action = Some(Action::SelectShape(kind));
            }
        }
    });

    action
}

/// Zoom in/out buttons with the current distance
pub fn zoom_buttons(ui: &mut egui::Ui, state: &UiState, ui_scale: f32) -> Option<Action> {
    let mut action = None;
    let range = state.zoom_range();
    let distance = state.camera_distance();

    ui.horizontal(|ui| {
        let zoom_in = egui::Button::new(egui::RichText::new("Zoom In").size(14.0 * ui_scale));
        if ui.add_enabled(distance > range.min(), zoom_in).clicked() {
            action = Some(Action::ZoomIn);
        }
        let zoom_out = egui::Button::new(egui::RichText::new("Zoom Out").size(14.0 * ui_scale));
        if ui.add_enabled(distance < range.max(), zoom_out).clicked() {
            action = Some(Action::ZoomOut);
        }
        ui.label(
            egui::RichText::new(format!("{:.1}", distance))
                .small()
                .color(egui::Color32::GRAY),
        );
    });

    action
}

/// Start/stop toggle
pub fn spin_button(ui: &mut egui::Ui, spin: SpinState, ui_scale: f32) -> Option<Action> {
    let button = egui::Button::new(egui::RichText::new(spin.button_label()).size(16.0 * ui_scale).strong())
        .min_size(egui::vec2(0.0, 36.0 * ui_scale));
    ui.add(button).clicked().then_some(Action::ToggleSpin)
}

/// Visible fallback shown when the model failed to load
pub fn load_error_panel(ui: &mut egui::Ui, message: &str, ui_scale: f32) {
    egui::Frame::new()
        .fill(egui::Color32::from_rgb(0xf8, 0xd7, 0xda))
        .corner_radius(4.0)
        .inner_margin(egui::Margin::same(12))
        .show(ui, |ui| {
            let text_color = egui::Color32::from_rgb(0x72, 0x1c, 0x24);
            ui.label(
                egui::RichText::new("Something went wrong:")
                    .size(16.0 * ui_scale)
                    .strong()
                    .color(text_color),
            );
            ui.label(egui::RichText::new(message).color(text_color));
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swatch_color_conversion() {
        let c = to_color32(Rgb::from_hex("#e67e22").unwrap());
        assert_eq!(c, egui::Color32::from_rgb(0xe6, 0x7e, 0x22));
    }
}
