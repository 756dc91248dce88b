// HTML template plugin: emits index.html referencing the built assets

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HtmlPlugin {
    /// Source template the page is generated from
    pub template: PathBuf,
    /// Name of the generated page inside the output directory
    pub filename: String,
    /// Append a compilation hash query to injected script/style URLs
    pub hash: bool,
}

impl HtmlPlugin {
    pub fn new(template: PathBuf) -> Self {
        Self {
            template,
            filename: "index.html".to_string(),
            hash: true,
        }
    }
}
