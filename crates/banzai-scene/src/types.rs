//! Resources shared by the scene plugins and the control panel

use bevy::prelude::*;

use banzai_core::{SceneConfig, SceneError, Theme, ThemeSet, UiState};

/// Scene configuration, inserted by the application before the plugins run
#[derive(Debug, Clone, Resource, Default, Deref)]
pub struct SceneSettings(pub SceneConfig);

/// Ordered theme swatches
#[derive(Debug, Clone, Resource, Default, Deref)]
pub struct Themes(pub ThemeSet);

impl Themes {
    /// Theme at `index`, falling back to the first one
    pub fn active(&self, index: usize) -> &Theme {
        self.0.get(index).unwrap_or_else(|| self.0.first())
    }
}

/// Control panel state, written by the UI and read by the scene each frame
#[derive(Debug, Clone, Resource, Default, Deref, DerefMut)]
pub struct SceneState(pub UiState);

/// Outcome of loading the external model
#[derive(Debug, Resource, Default)]
pub struct AssetStatus {
    pub loading: bool,
    pub error: Option<SceneError>,
}

impl AssetStatus {
    /// Message for the fallback panel, if the model failed to load
    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }
}

/// Convert a core color to a Bevy color
pub fn to_color(rgb: banzai_core::Rgb) -> Color {
    Color::srgb(rgb.r, rgb.g, rgb.b)
}

/// UI layout settings for responsive design
#[derive(Debug, Clone, Resource)]
pub struct UiLayout {
    /// Whether the control panel is expanded (mobile only; always shown on desktop)
    pub show_panel: bool,
    pub screen_width: f32,
    pub screen_height: f32,
    /// Whether we're on a small screen (mobile/tablet)
    pub is_mobile: bool,
    /// Scale factor for UI elements on mobile
    pub ui_scale: f32,
}

impl Default for UiLayout {
    fn default() -> Self {
        Self {
            show_panel: true,
            screen_width: 1920.0,
            screen_height: 1080.0,
            is_mobile: false,
            ui_scale: 1.0,
        }
    }
}

impl UiLayout {
    /// Update layout based on screen dimensions
    pub fn update_for_screen(&mut self, width: f32, height: f32) {
        self.screen_width = width;
        self.screen_height = height;

        // Consider mobile if width < 800 or if it's a portrait orientation with width < 600
        self.is_mobile = width < 800.0 || (width < height && width < 600.0);

        // Scale up UI elements on mobile for better touch targets
        self.ui_scale = if self.is_mobile { 1.3 } else { 1.0 };
    }

    /// Width of the control panel
    pub fn panel_width(&self) -> f32 {
        if self.is_mobile {
            (self.screen_width * 0.85).min(350.0)
        } else {
            340.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mobile_breakpoint() {
        let mut layout = UiLayout::default();
        layout.update_for_screen(1280.0, 720.0);
        assert!(!layout.is_mobile);
        assert_eq!(layout.ui_scale, 1.0);
        assert_eq!(layout.panel_width(), 340.0);

        layout.update_for_screen(390.0, 844.0);
        assert!(layout.is_mobile);
        assert_eq!(layout.ui_scale, 1.3);
        assert!((layout.panel_width() - 331.5).abs() < 1e-3);
    }

    #[test]
    fn test_active_theme_falls_back_to_first() {
        let themes = Themes::default();
        assert_eq!(themes.active(2).name, "spring");
        assert_eq!(themes.active(99).name, "default");
    }
}
