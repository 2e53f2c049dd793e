//! Initial state from URL query parameters
//!
//! `?shape=sphere&theme=2&spin=false` seeds the control panel so a link can
//! open the demo in a given configuration. Bad values are logged and
//! skipped; the rest still apply.

use banzai_core::{ShapeKind, SpinState, ThemeSet, UiState};

/// Apply recognized parameters from `get` to `state`
pub fn apply_query(state: &mut UiState, themes: &ThemeSet, get: impl Fn(&str) -> Option<String>) {
    if let Some(shape) = get("shape") {
        match shape.parse::<ShapeKind>() {
            Ok(kind) => state.select_shape(kind),
            Err(e) => tracing::warn!("Ignoring shape parameter: {}", e),
        }
    }

    if let Some(theme) = get("theme") {
        // Accept either an index or a theme name
        let index = theme
            .parse::<usize>()
            .ok()
            .or_else(|| themes.iter().position(|t| t.name.eq_ignore_ascii_case(&theme)));
        match index.map(|i| state.select_theme(i, themes)) {
            Some(Ok(_)) => {}
            Some(Err(e)) => tracing::warn!("Ignoring theme parameter: {}", e),
            None => tracing::warn!("Ignoring theme parameter: unknown theme '{}'", theme),
        }
    }

    if let Some(spin) = get("spin") {
        match parse_flag(&spin) {
            Some(spinning) => state.set_spin(SpinState::from(spinning)),
            None => tracing::warn!("Ignoring spin parameter '{}'", spin),
        }
    }

    if let Some(zoom) = get("zoom") {
        match zoom.parse::<f32>() {
            Ok(distance) => state.set_camera_distance(distance),
            Err(_) => tracing::warn!("Ignoring zoom parameter '{}'", zoom),
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "on" | "yes" => Some(true),
        "0" | "false" | "off" | "no" => Some(false),
        _ => None,
    }
}

/// Apply the query string of the current page
#[cfg(target_arch = "wasm32")]
pub fn apply_page_query(state: &mut UiState, themes: &ThemeSet) {
    let Some(window) = web_sys::window() else { return };
    let Ok(href) = window.location().href() else { return };
    let Ok(url) = web_sys::Url::new(&href) else { return };

    let params = url.search_params();
    apply_query(state, themes, |key| params.get(key));
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn apply(pairs: &[(&str, &str)]) -> UiState {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        let mut state = UiState::default();
        apply_query(&mut state, &ThemeSet::default(), |key| map.get(key).cloned());
        state
    }

    #[test]
    fn test_no_params_keeps_defaults() {
        assert_eq!(apply(&[]), UiState::default());
    }

    #[test]
    fn test_all_params() {
        let state = apply(&[("shape", "torus"), ("theme", "2"), ("spin", "false"), ("zoom", "8")]);
        assert_eq!(state.active_shape(), ShapeKind::Torus);
        assert_eq!(state.active_theme(), 2);
        assert!(!state.spin().is_spinning());
        assert_eq!(state.camera_distance(), 8.0);
    }

    #[test]
    fn test_theme_by_name() {
        let state = apply(&[("theme", "Winter")]);
        assert_eq!(state.active_theme(), 3);
    }

    #[test]
    fn test_bad_values_ignored() {
        let state = apply(&[("shape", "pyramid"), ("theme", "42"), ("spin", "maybe"), ("zoom", "far")]);
        assert_eq!(state, UiState::default());
    }

    #[test]
    fn test_zoom_param_is_clamped() {
        let state = apply(&[("zoom", "100")]);
        assert_eq!(state.camera_distance(), 10.0);
    }
}
