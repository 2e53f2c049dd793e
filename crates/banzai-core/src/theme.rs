//! Color themes
//!
//! A theme is a named swatch color. The set is fixed and ordered; the UI
//! selects a theme by index, and the same color tints the scene object's
//! material and the accent point light.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SceneError};

/// sRGB color with components in 0.0..=1.0
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Rgb {
    pub r: f32,
    pub g: f32,
    pub b: f32,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(1.0, 1.0, 1.0);

    pub const fn new(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b }
    }

    pub fn from_rgb8(r: u8, g: u8, b: u8) -> Self {
        Self::new(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0)
    }

    /// Parse `#rrggbb` (leading `#` optional)
    pub fn from_hex(hex: &str) -> Result<Self> {
        let digits = hex.strip_prefix('#').unwrap_or(hex);
        if digits.len() != 6 || !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(SceneError::InvalidColor(hex.to_string()));
        }

        let channel = |range: std::ops::Range<usize>| {
            u8::from_str_radix(&digits[range], 16)
                .map_err(|_| SceneError::InvalidColor(hex.to_string()))
        };

        Ok(Self::from_rgb8(channel(0..2)?, channel(2..4)?, channel(4..6)?))
    }

    /// Format as lowercase `#rrggbb`
    pub fn to_hex(&self) -> String {
        let byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
        format!("#{:02x}{:02x}{:02x}", byte(self.r), byte(self.g), byte(self.b))
    }

    /// Scale every channel by `factor`
    pub fn scaled(self, factor: f32) -> Self {
        Self::new(self.r * factor, self.g * factor, self.b * factor)
    }

    /// Linear mix toward `other` by `t`
    pub fn lerp(self, other: Rgb, t: f32) -> Self {
        Self::new(
            self.r + (other.r - self.r) * t,
            self.g + (other.g - self.g) * t,
            self.b + (other.b - self.b) * t,
        )
    }
}

impl From<Rgb> for glam::Vec3 {
    fn from(c: Rgb) -> Self {
        glam::Vec3::new(c.r, c.g, c.b)
    }
}

impl FromStr for Rgb {
    type Err = SceneError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_hex(s)
    }
}

impl TryFrom<String> for Rgb {
    type Error = SceneError;

    fn try_from(value: String) -> Result<Self> {
        Self::from_hex(&value)
    }
}

impl From<Rgb> for String {
    fn from(c: Rgb) -> Self {
        c.to_hex()
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

/// A named swatch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub color: Rgb,
}

impl Theme {
    pub fn new(name: impl Into<String>, color: Rgb) -> Self {
        Self {
            name: name.into(),
            color,
        }
    }

    /// Class applied to the page body while this theme is active
    pub fn css_class(&self) -> String {
        format!("theme-{}", self.name)
    }
}

/// Ordered, non-empty set of themes
#[derive(Debug, Clone, PartialEq)]
pub struct ThemeSet {
    themes: Vec<Theme>,
}

impl ThemeSet {
    pub fn new(themes: Vec<Theme>) -> Result<Self> {
        if themes.is_empty() {
            return Err(SceneError::EmptyThemeSet);
        }
        Ok(Self { themes })
    }

    pub fn get(&self, index: usize) -> Option<&Theme> {
        self.themes.get(index)
    }

    /// First theme; the set is never empty
    pub fn first(&self) -> &Theme {
        &self.themes[0]
    }

    pub fn len(&self) -> usize {
        self.themes.len()
    }

    /// Always false; kept for clippy's `len_without_is_empty`
    pub fn is_empty(&self) -> bool {
        self.themes.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Theme> {
        self.themes.iter()
    }

    /// Every css class this set can put on the page body
    pub fn css_classes(&self) -> Vec<String> {
        self.themes.iter().map(Theme::css_class).collect()
    }
}

impl Default for ThemeSet {
    fn default() -> Self {
        Self {
            themes: default_themes(),
        }
    }
}

/// The five stock themes, in swatch order
pub fn default_themes() -> Vec<Theme> {
    [
        ("default", Rgb::from_rgb8(0xb4, 0x99, 0xe4)),
        ("autumn", Rgb::from_rgb8(0xe6, 0x7e, 0x22)),
        ("spring", Rgb::from_rgb8(0xf4, 0x8f, 0xb1)),
        ("winter", Rgb::from_rgb8(0x90, 0xca, 0xf9)),
        ("purple", Rgb::from_rgb8(0x95, 0x75, 0xcd)),
    ]
    .into_iter()
    .map(|(name, color)| Theme::new(name, color))
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        let c = Rgb::from_hex("#e67e22").unwrap();
        assert_eq!(c.to_hex(), "#e67e22");

        let bare = Rgb::from_hex("90caf9").unwrap();
        assert_eq!(bare.to_hex(), "#90caf9");
        assert!((bare.b - 249.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn test_parse_hex_rejects_garbage() {
        assert!(Rgb::from_hex("#fff").is_err());
        assert!(Rgb::from_hex("#gg0000").is_err());
        assert!(Rgb::from_hex("#b499e4ff").is_err());
        assert!(Rgb::from_hex("#ééé").is_err());
        // from_str_radix alone would take the sign
        assert!(Rgb::from_hex("#+f+f+f").is_err());
        assert!(Rgb::from_hex("+f+f+f").is_err());
    }

    #[test]
    fn test_default_theme_order() {
        let set = ThemeSet::default();
        let names: Vec<_> = set.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, ["default", "autumn", "spring", "winter", "purple"]);

        let hexes: Vec<_> = set.iter().map(|t| t.color.to_hex()).collect();
        assert_eq!(hexes, ["#b499e4", "#e67e22", "#f48fb1", "#90caf9", "#9575cd"]);
    }

    #[test]
    fn test_empty_set_rejected() {
        assert!(matches!(ThemeSet::new(Vec::new()), Err(SceneError::EmptyThemeSet)));
    }

    #[test]
    fn test_css_class() {
        let set = ThemeSet::default();
        assert_eq!(set.get(3).unwrap().css_class(), "theme-winter");
        assert_eq!(set.css_classes().len(), 5);
    }
}
