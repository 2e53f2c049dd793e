//! Error types shared by every banzai crate

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SceneError {
    #[error("Failed to load asset {path}: {reason}")]
    AssetLoad { path: String, reason: String },
    #[error("Invalid color '{0}', expected #rrggbb")]
    InvalidColor(String),
    #[error("Unknown shape '{0}'")]
    UnknownShape(String),
    #[error("Theme index {index} out of range (have {len} themes)")]
    ThemeOutOfRange { index: usize, len: usize },
    #[error("Theme set must contain at least one theme")]
    EmptyThemeSet,
    #[error("Invalid zoom range [{min}, {max}]")]
    InvalidZoomRange { min: f32, max: f32 },
    #[error("Invalid {field} = {value}: {reason}")]
    InvalidSetting {
        field: &'static str,
        value: f32,
        reason: &'static str,
    },
    #[error("Failed to read configuration: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse configuration: {0}")]
    Config(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, SceneError>;

impl SceneError {
    /// Build an asset load failure from any displayable cause
    pub fn asset_load(path: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::AssetLoad {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn invalid_setting(field: &'static str, value: f32, reason: &'static str) -> Self {
        Self::InvalidSetting { field, value, reason }
    }
}
