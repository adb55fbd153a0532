//! Console Logging
//!
//! Installs a `tracing` subscriber that writes to the browser console.

use tracing_wasm::WASMLayerConfigBuilder;

use crate::config;

/// Install the console subscriber; call once at start-up
pub fn init() {
    let config = WASMLayerConfigBuilder::new()
        .set_max_level(config::log_level())
        .build();
    tracing_wasm::set_as_global_default_with_config(config);
}
