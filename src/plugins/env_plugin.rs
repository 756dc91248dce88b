use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Injects variables from a `.env` file into the bundle's `process.env`
/// namespace. Loading and substitution are done by the bundler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DotEnvPlugin {
    pub path: PathBuf,
    /// Also expose the build machine's environment
    pub systemvars: bool,
    /// Do not fail when the file is missing
    pub silent: bool,
}

impl DotEnvPlugin {
    pub fn new(root: PathBuf) -> Self {
        Self::from_file(root.join(".env"))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            systemvars: false,
            silent: false,
        }
    }
}
