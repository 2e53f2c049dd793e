//! Banzai Core - Engine-free model of the banzai.box scene
//!
//! This crate holds everything about the demo that does not need a renderer:
//! - Themes and shapes offered by the control panel
//! - UI state and the named actions that mutate it
//! - Spin animation
//! - The cel-shading model (CPU reference of the WGSL shader)
//! - TOML scene configuration

pub mod animation;
pub mod config;
pub mod error;
pub mod shading;
pub mod shape;
pub mod state;
pub mod theme;

pub use animation::{Spin, SpinState, SPIN_RATE};
pub use config::{load_config, SceneConfig, SceneMode, SHADOW_NEAR};
pub use error::{Result, SceneError};
pub use shading::{shade, CelParams, ShadingConfig};
pub use shape::ShapeKind;
pub use state::{Action, UiState, ZoomRange, ZOOM_STEP};
pub use theme::{Rgb, Theme, ThemeSet};
