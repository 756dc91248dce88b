// Build cache plugin: persists intermediate module results between builds

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_CACHE_DIR: &str = "node_modules/.cache/kiln";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildCachePlugin {
    pub cache_directory: PathBuf,
    /// Prime the cache before the first compilation
    pub warm: bool,
}

impl BuildCachePlugin {
    pub fn new(root: PathBuf) -> Self {
        Self {
            cache_directory: root.join(DEFAULT_CACHE_DIR),
            warm: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_directory_under_dependencies() {
        let plugin = BuildCachePlugin::new(PathBuf::from("/project"));
        assert!(plugin.cache_directory.starts_with("/project/node_modules"));
        assert!(plugin.warm);
    }
}
