// Inline-or-emit decision for static assets, mirroring url-loader semantics:
// files at or below `limit` bytes become data URIs inside the bundle, larger
// files are copied to the output directory under the `name` template.

use crate::core::assembler::URL_LOADER;
use crate::core::models::BundlerConfig;
use crate::core::rules::normalize;
use crate::utils::{ErrorContext, KilnError, Logger, Result};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

static PLACEHOLDER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[(name|ext|hash)\]").expect("placeholder pattern is valid"));

const HASH_LENGTH: usize = 8;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlLoaderOptions {
    pub limit: u64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetRoute {
    /// Embedded into the bundle as a data URI
    Inline { mime: &'static str },
    /// Emitted as a standalone file, relative to the output directory
    Emit { path: PathBuf },
}

impl AssetRoute {
    pub fn is_inline(&self) -> bool {
        matches!(self, AssetRoute::Inline { .. })
    }
}

#[derive(Debug, Clone)]
pub struct AssetRouter {
    options: UrlLoaderOptions,
    test: Regex,
    exclude: Option<Regex>,
}

impl AssetRouter {
    pub fn new(test: &str, options: UrlLoaderOptions) -> Result<Self> {
        let test = Regex::new(test).map_err(|e| KilnError::pattern(test, e))?;
        Ok(Self {
            options,
            test,
            exclude: None,
        })
    }

    /// Skip paths matching `pattern`, like a rule's `exclude`
    pub fn with_exclude(mut self, pattern: &str) -> Result<Self> {
        let exclude = Regex::new(pattern).map_err(|e| KilnError::pattern(pattern, e))?;
        self.exclude = Some(exclude);
        Ok(self)
    }

    /// Read limit and name template from the config's url-loader rule
    pub fn from_config(config: &BundlerConfig) -> Result<Self> {
        let rule = config.rule_with_loader(URL_LOADER).ok_or_else(|| {
            KilnError::config_with_context(
                "no asset rule in configuration",
                ErrorContext::new().with_field("module.rules"),
            )
        })?;

        let loader = rule
            .loaders
            .iter()
            .find(|l| l.loader == URL_LOADER)
            .ok_or_else(|| KilnError::config("asset rule has no url-loader step"))?;

        let options: UrlLoaderOptions =
            serde_json::from_value(loader.options.clone()).map_err(|e| {
                KilnError::config_with_context(
                    format!("invalid url-loader options: {}", e),
                    ErrorContext::new()
                        .with_field("module.rules[].use[].options")
                        .with_hint("expected { \"limit\": <bytes>, \"name\": <template> }"),
                )
            })?;

        let router = Self::new(&rule.test, options)?;
        match rule.exclude.as_deref() {
            Some(pattern) => router.with_exclude(pattern),
            None => Ok(router),
        }
    }

    pub fn limit(&self) -> u64 {
        self.options.limit
    }

    /// Whether `path` is a static asset outside the excluded directories
    pub fn handles(&self, path: &str) -> bool {
        let normalized = normalize(Path::new(path));
        self.test.is_match(&normalized)
            && !self
                .exclude
                .as_ref()
                .is_some_and(|exclude| exclude.is_match(&normalized))
    }

    /// Route by size alone; `[hash]` is derived from the file name
    pub fn route(&self, name: &str, size: u64) -> AssetRoute {
        self.decide(name, size, name.as_bytes())
    }

    /// Route with the real content so `[hash]` tracks the bytes
    pub fn route_bytes(&self, name: &str, content: &[u8]) -> AssetRoute {
        self.decide(name, content.len() as u64, content)
    }

    /// `None` when the file is not a static asset
    pub fn route_file(&self, path: &Path) -> Result<Option<AssetRoute>> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| KilnError::InvalidPath(path.display().to_string()))?;

        if !self.handles(&path.to_string_lossy()) {
            Logger::debug(&format!("Not a routed asset: {}", path.display()));
            return Ok(None);
        }
        if !path.is_file() {
            return Err(KilnError::FileNotFound(path.to_path_buf()));
        }

        let content = std::fs::read(path)?;
        Ok(Some(self.route_bytes(name, &content)))
    }

    fn decide(&self, name: &str, size: u64, hash_source: &[u8]) -> AssetRoute {
        let route = if size <= self.options.limit {
            AssetRoute::Inline {
                mime: mime_for(name),
            }
        } else {
            AssetRoute::Emit {
                path: expand_name(&self.options.name, name, hash_source),
            }
        };

        Logger::debug(&format!(
            "🖼️  {} ({} bytes, limit {}): {:?}",
            name, size, self.options.limit, route
        ));
        route
    }
}

/// Fill `[name]`, `[ext]` and `[hash]` in a url-loader name template
pub fn expand_name(template: &str, file_name: &str, hash_source: &[u8]) -> PathBuf {
    let path = Path::new(file_name);
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or(file_name);
    let ext = path.extension().and_then(|s| s.to_str()).unwrap_or("");

    let expanded = PLACEHOLDER_REGEX.replace_all(template, |caps: &regex::Captures| {
        match &caps[1] {
            "name" => stem.to_string(),
            "ext" => ext.to_string(),
            _ => short_hash(hash_source),
        }
    });

    let relative = expanded.strip_prefix("./").unwrap_or(expanded.as_ref());
    PathBuf::from(relative)
}

fn short_hash(bytes: &[u8]) -> String {
    let hex = blake3::hash(bytes).to_hex();
    hex.as_str()[..HASH_LENGTH].to_string()
}

pub fn mime_for(file_name: &str) -> &'static str {
    let ext = Path::new(file_name)
        .extension()
        .and_then(|s| s.to_str())
        .map(|s| s.to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "gif" => "image/gif",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "svg" => "image/svg+xml",
        "ttf" => "font/ttf",
        "eot" => "application/vnd.ms-fontobject",
        "woff" | "wof" => "font/woff",
        "woff2" => "font/woff2",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::assembler::{ConfigAssembler, ASSET_TEST};
    use crate::core::models::ProjectPaths;
    use crate::core::preset::Preset;

    fn router(preset: Preset) -> AssetRouter {
        let config = ConfigAssembler::new(ProjectPaths::new("/project"), preset).base();
        AssetRouter::from_config(&config).unwrap()
    }

    #[test]
    fn test_nested_threshold() {
        let router = router(Preset::Nested);

        assert_eq!(
            router.route("icon.png", 5 * 1024),
            AssetRoute::Inline { mime: "image/png" }
        );
        assert_eq!(
            router.route("hero.jpg", 50 * 1024),
            AssetRoute::Emit {
                path: PathBuf::from("statics/hero.jpg")
            }
        );
    }

    #[test]
    fn test_limit_is_inclusive() {
        let router = router(Preset::Flat);
        assert!(router.route("a.svg", 20480).is_inline());
        assert!(!router.route("a.svg", 20481).is_inline());
    }

    #[test]
    fn test_flat_emits_under_images() {
        let router = router(Preset::Flat);
        assert_eq!(
            router.route("photo.jpeg", 64 * 1024),
            AssetRoute::Emit {
                path: PathBuf::from("images/photo.jpeg")
            }
        );
    }

    #[test]
    fn test_hash_placeholder() {
        let router = AssetRouter::new(
            ASSET_TEST,
            UrlLoaderOptions {
                limit: 0,
                name: "assets/[name].[hash].[ext]".to_string(),
            },
        )
        .unwrap();

        let first = router.route_bytes("logo.png", b"one");
        let second = router.route_bytes("logo.png", b"two");
        assert_ne!(first, second);

        match first {
            AssetRoute::Emit { path } => {
                let name = path.file_name().unwrap().to_str().unwrap();
                assert!(path.starts_with("assets"));
                assert!(name.starts_with("logo."));
                assert!(name.ends_with(".png"));
                assert_eq!(name.len(), "logo.".len() + HASH_LENGTH + ".png".len());
            }
            other => panic!("expected emission, got {:?}", other),
        }
    }

    #[test]
    fn test_route_file() {
        let dir = tempfile::tempdir().unwrap();
        let small = dir.path().join("small.gif");
        let large = dir.path().join("large.woff2");
        let script = dir.path().join("main.ts");
        std::fs::write(&small, vec![0u8; 1024]).unwrap();
        std::fs::write(&large, vec![0u8; 30 * 1024]).unwrap();
        std::fs::write(&script, "export {}").unwrap();

        let router = router(Preset::Flat);
        assert_eq!(
            router.route_file(&small).unwrap(),
            Some(AssetRoute::Inline { mime: "image/gif" })
        );
        assert_eq!(
            router.route_file(&large).unwrap(),
            Some(AssetRoute::Emit {
                path: PathBuf::from("images/large.woff2")
            })
        );
        assert_eq!(router.route_file(&script).unwrap(), None);
        assert!(router.route_file(&dir.path().join("missing.png")).is_err());
    }

    #[test]
    fn test_dependency_assets_not_routed() {
        let router = router(Preset::Nested);

        assert!(router.handles("src/assets/logo.png"));
        assert!(!router.handles("node_modules/pkg/logo.png"));
        assert!(!router.handles("node_modules\\pkg\\logo.png"));

        let bare = AssetRouter::new(ASSET_TEST, router.options.clone()).unwrap();
        assert!(bare.handles("node_modules/pkg/logo.png"));
    }

    #[test]
    fn test_missing_asset_rule() {
        let mut config = ConfigAssembler::new(ProjectPaths::new("/project"), Preset::Flat).base();
        config.module.rules.truncate(2);
        assert!(matches!(
            AssetRouter::from_config(&config),
            Err(KilnError::Config { .. })
        ));
    }
}
