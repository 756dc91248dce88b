use serde::{Deserialize, Serialize};

/// Writes compiled stylesheets to a standalone file instead of injecting them
/// at runtime. Must precede any stylesheet minimizer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CssExtractPlugin {
    pub filename: String,
}

impl CssExtractPlugin {
    pub fn new(filename: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
        }
    }
}
