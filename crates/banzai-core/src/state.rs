//! UI state shared between the control panel and the scene
//!
//! The control panel mutates this only through the named actions below;
//! the scene reads it on the next frame. Every action keeps the
//! invariants: the theme index is valid and the camera distance sits
//! inside the zoom range.

use crate::animation::SpinState;
use crate::config::SceneConfig;
use crate::error::{Result, SceneError};
use crate::shape::ShapeKind;
use crate::theme::{Theme, ThemeSet};

/// Distance change per zoom button click
pub const ZOOM_STEP: f32 = 2.0;

/// Allowed camera distance, inclusive on both ends
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ZoomRange {
    min: f32,
    max: f32,
}

impl ZoomRange {
    /// Range used when showing a primitive shape
    pub const PRIMITIVE: ZoomRange = ZoomRange { min: 3.0, max: 10.0 };
    /// Range used when showing the loaded model
    pub const MODEL: ZoomRange = ZoomRange { min: 5.0, max: 25.0 };

    pub fn new(min: f32, max: f32) -> Result<Self> {
        if !(min.is_finite() && max.is_finite()) || min <= 0.0 || min > max {
            return Err(SceneError::InvalidZoomRange { min, max });
        }
        Ok(Self { min, max })
    }

    pub fn min(&self) -> f32 {
        self.min
    }

    pub fn max(&self) -> f32 {
        self.max
    }

    pub fn clamp(&self, distance: f32) -> f32 {
        if distance.is_nan() {
            return self.min;
        }
        distance.clamp(self.min, self.max)
    }

    pub fn contains(&self, distance: f32) -> bool {
        (self.min..=self.max).contains(&distance)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct UiState {
    active_theme: usize,
    active_shape: ShapeKind,
    spin: SpinState,
    camera_distance: f32,
    zoom: ZoomRange,
}

impl UiState {
    pub fn new(zoom: ZoomRange, initial_distance: f32) -> Self {
        Self {
            active_theme: 0,
            active_shape: ShapeKind::default(),
            spin: SpinState::Spinning,
            camera_distance: zoom.clamp(initial_distance),
            zoom,
        }
    }

    pub fn from_config(config: &SceneConfig) -> Self {
        Self::new(config.zoom_range(), config.camera.initial_distance)
    }

    pub fn active_theme(&self) -> usize {
        self.active_theme
    }

    pub fn active_shape(&self) -> ShapeKind {
        self.active_shape
    }

    pub fn spin(&self) -> SpinState {
        self.spin
    }

    pub fn camera_distance(&self) -> f32 {
        self.camera_distance
    }

    pub fn zoom_range(&self) -> ZoomRange {
        self.zoom
    }

    /// Select the theme at `index`; out-of-range indices leave the state as is
    pub fn select_theme<'a>(&mut self, index: usize, themes: &'a ThemeSet) -> Result<&'a Theme> {
        let theme = themes.get(index).ok_or(SceneError::ThemeOutOfRange {
            index,
            len: themes.len(),
        })?;
        self.active_theme = index;
        Ok(theme)
    }

    pub fn select_shape(&mut self, shape: ShapeKind) {
        self.active_shape = shape;
    }

    /// Move the camera closer by one step
    pub fn zoom_in(&mut self) {
        self.set_camera_distance(self.camera_distance - ZOOM_STEP);
    }

    /// Move the camera away by one step
    pub fn zoom_out(&mut self) {
        self.set_camera_distance(self.camera_distance + ZOOM_STEP);
    }

    pub fn set_camera_distance(&mut self, distance: f32) {
        self.camera_distance = self.zoom.clamp(distance);
    }

    pub fn toggle_spin(&mut self) {
        self.spin = self.spin.toggle();
    }

    pub fn set_spin(&mut self, spin: SpinState) {
        self.spin = spin;
    }
}

/// A single control panel interaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    SelectTheme(usize),
    SelectShape(ShapeKind),
    ZoomIn,
    ZoomOut,
    ToggleSpin,
}

impl UiState {
    /// Apply one control panel action
    pub fn apply(&mut self, action: Action, themes: &ThemeSet) -> Result<()> {
        match action {
            Action::SelectTheme(index) => {
                self.select_theme(index, themes)?;
            }
            Action::SelectShape(shape) => self.select_shape(shape),
            Action::ZoomIn => self.zoom_in(),
            Action::ZoomOut => self.zoom_out(),
            Action::ToggleSpin => self.toggle_spin(),
        }
        Ok(())
    }
}

impl Default for UiState {
    fn default() -> Self {
        Self::from_config(&SceneConfig::default())
    }
}
