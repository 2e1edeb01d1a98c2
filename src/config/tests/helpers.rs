//! Shared test helpers for configuration tests.

use ortho_config::MergeComposer;
use serde_json::Value;

use crate::MarginaliaConfig;

/// Applies a configuration layer to the composer based on the layer type.
pub fn apply_layer(composer: &mut MergeComposer, layer_type: &str, value: Value) {
    match layer_type {
        "defaults" => composer.push_defaults(value),
        "file" => composer.push_file(value, None),
        "environment" => composer.push_environment(value),
        "cli" => composer.push_cli(value),
        _ => panic!("unknown layer type: {layer_type}"),
    }
}

/// Built-in defaults as a merge layer, as `load` seeds them.
pub fn default_layer() -> Value {
    serde_json::to_value(MarginaliaConfig::default()).expect("defaults should serialise")
}

/// Composes a [`MarginaliaConfig`] from the built-in defaults followed by a
/// sequence of `(layer_type, value)` pairs.
pub fn build_config_from_layers(layers: &[(&str, Value)]) -> MarginaliaConfig {
    let mut composer = MergeComposer::new();
    composer.push_defaults(default_layer());

    for (layer_type, value) in layers {
        apply_layer(&mut composer, layer_type, value.clone());
    }

    MarginaliaConfig::merge_from_layers(composer.layers()).expect("merge should succeed")
}

/// A valid 32-byte cookie key.
pub const COOKIE_KEY: &str = "0123456789abcdef0123456789abcdef";
