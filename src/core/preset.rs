use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The two known shapes of the configuration. They differ in thresholds and
/// plugin sets and are kept apart on purpose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Preset {
    /// Everything at the output root, 20 KiB inline limit, `images/` for assets
    #[default]
    Flat,
    /// `js/`, `css/` and `statics/` subdirectories, 8 KiB inline limit,
    /// build cache and a bundle analyzer in development
    Nested,
}

impl Preset {
    pub const ALL: [Preset; 2] = [Preset::Flat, Preset::Nested];

    pub fn name(&self) -> &'static str {
        match self {
            Preset::Flat => "flat",
            Preset::Nested => "nested",
        }
    }

    /// Assets at or below this many bytes are embedded in the bundle
    pub fn inline_limit(&self) -> u64 {
        match self {
            Preset::Flat => 20 * 1024,
            Preset::Nested => 8 * 1024,
        }
    }

    pub fn asset_dir(&self) -> &'static str {
        match self {
            Preset::Flat => "images",
            Preset::Nested => "statics",
        }
    }

    /// url-loader `name` template for emitted assets
    pub fn asset_name_template(&self) -> String {
        format!("./{}/[name].[ext]", self.asset_dir())
    }

    pub fn bundle_filename(&self) -> &'static str {
        match self {
            Preset::Flat => "bundle.js",
            Preset::Nested => "js/bundle.js",
        }
    }

    pub fn css_filename(&self) -> &'static str {
        match self {
            Preset::Flat => "index.css",
            Preset::Nested => "css/index.css",
        }
    }

    pub fn uses_build_cache(&self) -> bool {
        matches!(self, Preset::Nested)
    }

    pub fn uses_dev_analyzer(&self) -> bool {
        matches!(self, Preset::Nested)
    }

    pub fn minifies_css(&self) -> bool {
        matches!(self, Preset::Nested)
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "flat" => Ok(Preset::Flat),
            "nested" => Ok(Preset::Nested),
            other => Err(format!("unknown preset `{}` (expected flat or nested)", other)),
        }
    }
}
