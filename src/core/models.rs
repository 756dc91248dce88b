use crate::plugins::PluginSpec;
use crate::utils::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Dependency directory every transform rule skips
pub const DEPENDENCY_DIR_PATTERN: &str = "node_modules";

pub const DEFAULT_DEV_PORT: u16 = 3030;
pub const DEFAULT_DEV_HOST: &str = "0.0.0.0";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    Development,
    Production,
    None,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Development => "development",
            Mode::Production => "production",
            Mode::None => "none",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "development" | "dev" => Ok(Mode::Development),
            "production" | "prod" => Ok(Mode::Production),
            "none" => Ok(Mode::None),
            other => Err(format!(
                "unknown mode `{}` (expected development, production or none)",
                other
            )),
        }
    }
}

/// Logical bundle name → source file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryDescriptor(pub BTreeMap<String, PathBuf>);

impl EntryDescriptor {
    pub fn single(name: impl Into<String>, path: PathBuf) -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(name.into(), path);
        Self(entries)
    }

    pub fn get(&self, name: &str) -> Option<&Path> {
        self.0.get(name).map(PathBuf::as_path)
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.0.values().map(PathBuf::as_path)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputDescriptor {
    /// Absolute destination directory, emptied before each build
    pub path: PathBuf,
    /// Bundle filename pattern, relative to `path`
    pub filename: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public_path: Option<String>,
}

impl OutputDescriptor {
    /// Where the main bundle lands on disk
    pub fn bundle_path(&self) -> PathBuf {
        self.path.join(&self.filename)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResolveDescriptor {
    /// Tried in order for extension-less imports
    pub extensions: Vec<String>,
}

impl Default for ResolveDescriptor {
    fn default() -> Self {
        Self {
            extensions: [".ts", ".tsx", ".js", ".jsx"]
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }
}

/// One step of a transform chain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoaderSpec {
    pub loader: String,
    #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
    pub options: serde_json::Value,
}

impl LoaderSpec {
    pub fn new(loader: impl Into<String>) -> Self {
        Self {
            loader: loader.into(),
            options: serde_json::Value::Null,
        }
    }

    pub fn with_options(loader: impl Into<String>, options: serde_json::Value) -> Self {
        Self {
            loader: loader.into(),
            options,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransformRule {
    /// Regex matched against the module path
    pub test: String,
    /// Loader chain in declaration order
    #[serde(rename = "use")]
    pub loaders: Vec<LoaderSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exclude: Option<String>,
}

impl TransformRule {
    /// New rule that never applies inside the dependency directory
    pub fn new(test: impl Into<String>, loaders: Vec<LoaderSpec>) -> Self {
        Self {
            test: test.into(),
            loaders,
            exclude: Some(DEPENDENCY_DIR_PATTERN.to_string()),
        }
    }

    pub fn loader_names(&self) -> Vec<&str> {
        self.loaders.iter().map(|l| l.loader.as_str()).collect()
    }

    pub fn uses_loader(&self, name: &str) -> bool {
        self.loaders.iter().any(|l| l.loader == name)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModuleConfig {
    pub rules: Vec<TransformRule>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevServerConfig {
    pub host: String,
    pub port: u16,
    pub hot: bool,
    /// Open a browser once the server is listening
    pub open: bool,
    pub public_path: String,
    pub content_base: PathBuf,
    pub watch_content_base: bool,
    /// gzip responses
    pub compress: bool,
    /// Serve index.html for unknown routes (client-side routing)
    pub history_api_fallback: bool,
}

impl DevServerConfig {
    pub fn serving(content_base: PathBuf) -> Self {
        Self {
            host: DEFAULT_DEV_HOST.to_string(),
            port: DEFAULT_DEV_PORT,
            hot: true,
            open: true,
            public_path: "/".to_string(),
            content_base,
            watch_content_base: true,
            compress: true,
            history_api_fallback: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CommentExtraction {
    /// Move every comment into a separate license file
    All,
    /// Only `@license`/`@preserve` comments
    Legal,
    Off,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "minimizer", rename_all = "kebab-case", rename_all_fields = "camelCase")]
pub enum MinimizerSpec {
    Terser {
        extract_comments: CommentExtraction,
        drop_console: bool,
    },
    CssMinimizer {
        discard_comments: bool,
    },
}

impl MinimizerSpec {
    pub fn name(&self) -> &'static str {
        match self {
            MinimizerSpec::Terser { .. } => "terser",
            MinimizerSpec::CssMinimizer { .. } => "css-minimizer",
        }
    }

    pub fn drops_console(&self) -> bool {
        matches!(self, MinimizerSpec::Terser { drop_console: true, .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Optimization {
    pub minimize: bool,
    #[serde(rename = "minimizer")]
    pub minimizers: Vec<MinimizerSpec>,
}

/// The complete record an external bundler consumes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundlerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<Mode>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub devtool: Option<String>,
    pub entry: EntryDescriptor,
    pub output: OutputDescriptor,
    pub resolve: ResolveDescriptor,
    pub module: ModuleConfig,
    #[serde(default)]
    pub plugins: Vec<PluginSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dev_server: Option<DevServerConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub optimization: Option<Optimization>,
}

impl BundlerConfig {
    pub fn plugin_names(&self) -> Vec<&'static str> {
        self.plugins.iter().map(PluginSpec::name).collect()
    }

    pub fn has_plugin(&self, name: &str) -> bool {
        self.plugins.iter().any(|p| p.name() == name)
    }

    /// First rule whose chain contains `loader`
    pub fn rule_with_loader(&self, loader: &str) -> Option<&TransformRule> {
        self.module.rules.iter().find(|rule| rule.uses_loader(loader))
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Fixed filesystem inputs of one project
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectPaths {
    pub root: PathBuf,
    pub entry: PathBuf,
    pub template: PathBuf,
    pub output_dir: PathBuf,
}

impl ProjectPaths {
    /// Conventional layout: `src/index.tsx`, `public/index.html`, `dist`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        let root = root.into();
        Self {
            entry: root.join("src/index.tsx"),
            template: root.join("public/index.html"),
            output_dir: root.join("dist"),
            root,
        }
    }

    pub fn with_entry(mut self, entry: impl AsRef<Path>) -> Self {
        self.entry = self.under_root(entry.as_ref());
        self
    }

    pub fn with_template(mut self, template: impl AsRef<Path>) -> Self {
        self.template = self.under_root(template.as_ref());
        self
    }

    pub fn with_output_dir(mut self, output_dir: impl AsRef<Path>) -> Self {
        self.output_dir = self.under_root(output_dir.as_ref());
        self
    }

    fn under_root(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path.strip_prefix("./").unwrap_or(path))
        }
    }
}
