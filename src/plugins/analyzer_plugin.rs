// Bundle size analyzer, development builds only

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalyzerMode {
    /// Serve an interactive treemap next to the dev server
    Server,
    /// Write a standalone HTML report into the output directory
    Static,
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleAnalyzerPlugin {
    pub analyzer_mode: AnalyzerMode,
    pub analyzer_host: String,
    pub analyzer_port: u16,
    pub open_analyzer: bool,
}

impl Default for BundleAnalyzerPlugin {
    fn default() -> Self {
        Self {
            analyzer_mode: AnalyzerMode::Server,
            analyzer_host: "127.0.0.1".to_string(),
            analyzer_port: 8888,
            open_analyzer: false,
        }
    }
}
