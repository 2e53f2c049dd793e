//! Banzai Web - WebGPU-powered interactive shapes demo
//!
//! This crate assembles the Bevy application: the scene from
//! `banzai-scene`, the egui page layout and, in the browser, the body
//! theme class and URL query bootstrap.

mod app;
#[cfg_attr(not(target_arch = "wasm32"), allow(dead_code))]
mod bootstrap;
mod ui;

pub use app::run;

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

/// Scene configuration shipped with the page
pub const DEFAULT_CONFIG: &str = include_str!("../banzai.toml");

/// Entry point for WASM module
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn main() {
    // Set panic hook for better error messages
    console_error_panic_hook::set_once();

    // Initialize logging with filtering to reduce wgpu noise
    tracing_wasm::set_as_global_default_with_config(
        tracing_wasm::WASMLayerConfigBuilder::new()
            .set_max_level(tracing::Level::WARN)
            .build()
    );

    let config = banzai_core::SceneConfig::from_toml(DEFAULT_CONFIG).unwrap_or_else(|e| {
        tracing::error!("Bundled configuration is invalid, using defaults: {}", e);
        banzai_core::SceneConfig::default()
    });

    // Run the Bevy app
    app::run(config, "");
}
