// Build plugin descriptors handed to the bundler.
// Each variant maps to one external plugin; list order is preserved on merge.

pub mod analyzer_plugin;
pub mod cache_plugin;
pub mod env_plugin;
pub mod extract_plugin;
pub mod html_plugin;

pub use analyzer_plugin::{AnalyzerMode, BundleAnalyzerPlugin};
pub use cache_plugin::BuildCachePlugin;
pub use env_plugin::DotEnvPlugin;
pub use extract_plugin::CssExtractPlugin;
pub use html_plugin::HtmlPlugin;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "plugin", rename_all = "kebab-case")]
pub enum PluginSpec {
    /// Generates the HTML page that references the emitted bundle
    HtmlTemplate(HtmlPlugin),
    /// Empties the output directory before every build
    CleanOutput,
    CssExtract(CssExtractPlugin),
    DotEnv(DotEnvPlugin),
    BuildCache(BuildCachePlugin),
    BundleAnalyzer(BundleAnalyzerPlugin),
}

impl PluginSpec {
    pub fn name(&self) -> &'static str {
        match self {
            PluginSpec::HtmlTemplate(_) => "html-template",
            PluginSpec::CleanOutput => "clean-output",
            PluginSpec::CssExtract(_) => "css-extract",
            PluginSpec::DotEnv(_) => "dot-env",
            PluginSpec::BuildCache(_) => "build-cache",
            PluginSpec::BundleAnalyzer(_) => "bundle-analyzer",
        }
    }
}
