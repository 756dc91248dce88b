// Environment overlays and the deep merge that applies them.
//
// Merge rules: objects merge key by key, arrays concatenate (base first),
// anything else is replaced by the overlay. Keys absent from the overlay
// leave the base untouched.

use crate::core::models::*;
use crate::core::preset::Preset;
use crate::plugins::{BundleAnalyzerPlugin, PluginSpec};
use crate::utils::{Logger, Result};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::path::PathBuf;

pub const DEV_DEVTOOL: &str = "inline-source-map";

/// Partial configuration laid over a base record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Overlay {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub devtool: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry: Option<EntryDescriptor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<OutputOverlay>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolve: Option<ResolveDescriptor>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub module: Option<ModuleConfig>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub plugins: Vec<PluginSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dev_server: Option<DevServerConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optimization: Option<Optimization>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputOverlay {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_path: Option<String>,
}

impl Overlay {
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn with_plugin(mut self, plugin: PluginSpec) -> Self {
        self.plugins.push(plugin);
        self
    }
}

/// Merge `overlay` into `base` in place
pub fn merge_values(base: &mut Value, overlay: Value) {
    match (base, overlay) {
        (Value::Object(base_map), Value::Object(overlay_map)) => {
            for (key, overlay_value) in overlay_map {
                match base_map.get_mut(&key) {
                    Some(base_value) => merge_values(base_value, overlay_value),
                    None => {
                        base_map.insert(key, overlay_value);
                    }
                }
            }
        }
        (Value::Array(base_items), Value::Array(overlay_items)) => {
            base_items.extend(overlay_items);
        }
        (base_slot, overlay_value) => *base_slot = overlay_value,
    }
}

/// Produce a new record from `base` with `overlay` applied. Pure: the inputs
/// are not modified and equal inputs give equal outputs. No validation.
pub fn merge(base: &BundlerConfig, overlay: &Overlay) -> Result<BundlerConfig> {
    let mut merged = serde_json::to_value(base)?;
    merge_values(&mut merged, serde_json::to_value(overlay)?);

    let config: BundlerConfig = serde_json::from_value(merged)?;
    Logger::overlay_merged(
        config.mode.map(|m| m.as_str()).unwrap_or("unnamed"),
        config.plugins.len(),
        config.module.rules.len(),
    );

    Ok(config)
}

/// Dev server, inline source maps and, for the nested preset, the analyzer
pub fn development_overlay(preset: Preset, paths: &ProjectPaths) -> Overlay {
    let mut overlay = Overlay {
        devtool: Some(DEV_DEVTOOL.to_string()),
        dev_server: Some(DevServerConfig::serving(paths.output_dir.clone())),
        ..Overlay::default()
    }
    .with_mode(Mode::Development);

    if preset.uses_dev_analyzer() {
        overlay = overlay.with_plugin(PluginSpec::BundleAnalyzer(BundleAnalyzerPlugin::default()));
    }

    overlay
}

/// Minification: comments extracted, console calls stripped
pub fn production_overlay(preset: Preset) -> Overlay {
    let mut minimizers = vec![MinimizerSpec::Terser {
        extract_comments: CommentExtraction::All,
        drop_console: true,
    }];

    if preset.minifies_css() {
        minimizers.push(MinimizerSpec::CssMinimizer {
            discard_comments: true,
        });
    }

    Overlay {
        optimization: Some(Optimization {
            minimize: true,
            minimizers,
        }),
        ..Overlay::default()
    }
    .with_mode(Mode::Production)
}
