// Base configuration shared by every environment

use crate::core::merge::{development_overlay, merge, production_overlay};
use crate::core::models::*;
use crate::core::preset::Preset;
use crate::plugins::{BuildCachePlugin, CssExtractPlugin, DotEnvPlugin, HtmlPlugin, PluginSpec};
use crate::utils::{KilnError, Logger, Result, Timer};
use serde_json::json;

pub const MAIN_ENTRY: &str = "main";

pub const TYPESCRIPT_TEST: &str = r"\.tsx?$";
pub const STYLESHEET_TEST: &str = r"\.(sass|css|scss)$";
pub const ASSET_TEST: &str = r"\.(gif|png|jpg|jpeg|svg|ttf|eot|wof|woff|woff2)$";

pub const TS_LOADER: &str = "ts-loader";
pub const CSS_EXTRACT_LOADER: &str = "css-extract-loader";
pub const CSS_LOADER: &str = "css-loader";
pub const SASS_LOADER: &str = "sass-loader";
pub const URL_LOADER: &str = "url-loader";

/// Builds the base record and the two environment variants for one project
#[derive(Debug, Clone)]
pub struct ConfigAssembler {
    paths: ProjectPaths,
    preset: Preset,
}

impl ConfigAssembler {
    pub fn new(paths: ProjectPaths, preset: Preset) -> Self {
        Self { paths, preset }
    }

    pub fn paths(&self) -> &ProjectPaths {
        &self.paths
    }

    pub fn preset(&self) -> Preset {
        self.preset
    }

    pub fn base(&self) -> BundlerConfig {
        let _timer = Timer::start("base configuration");
        Logger::assembling(self.preset.name(), &self.paths.root.display().to_string());

        BundlerConfig {
            mode: None,
            devtool: None,
            entry: EntryDescriptor::single(MAIN_ENTRY, self.paths.entry.clone()),
            output: OutputDescriptor {
                path: self.paths.output_dir.clone(),
                filename: self.preset.bundle_filename().to_string(),
                public_path: None,
            },
            resolve: ResolveDescriptor::default(),
            module: ModuleConfig {
                rules: base_rules(self.preset),
            },
            plugins: base_plugins(self.preset, &self.paths),
            dev_server: None,
            optimization: None,
        }
    }

    pub fn development(&self) -> Result<BundlerConfig> {
        merge(&self.base(), &development_overlay(self.preset, &self.paths))
    }

    pub fn production(&self) -> Result<BundlerConfig> {
        merge(&self.base(), &production_overlay(self.preset))
    }

    /// `Mode::None` yields the unmerged base
    pub fn for_mode(&self, mode: Mode) -> Result<BundlerConfig> {
        match mode {
            Mode::Development => self.development(),
            Mode::Production => self.production(),
            Mode::None => Ok(self.base()),
        }
    }

    /// Report the first missing input file. Assembly itself never checks.
    pub fn check_inputs(&self) -> Result<()> {
        if !self.paths.root.is_dir() {
            return Err(KilnError::InvalidPath(format!(
                "project root {} is not a directory",
                self.paths.root.display()
            )));
        }

        for path in [&self.paths.entry, &self.paths.template] {
            if !path.is_file() {
                return Err(KilnError::FileNotFound(path.clone()));
            }
        }

        Ok(())
    }
}

/// TypeScript, stylesheets, static assets; first match wins
pub fn base_rules(preset: Preset) -> Vec<TransformRule> {
    let typescript = TransformRule::new(TYPESCRIPT_TEST, vec![LoaderSpec::new(TS_LOADER)]);

    let stylesheets = TransformRule::new(
        STYLESHEET_TEST,
        vec![
            LoaderSpec::new(CSS_EXTRACT_LOADER),
            LoaderSpec::with_options(CSS_LOADER, json!({ "url": true })),
            LoaderSpec::new(SASS_LOADER),
        ],
    );

    let assets = TransformRule::new(
        ASSET_TEST,
        vec![LoaderSpec::with_options(
            URL_LOADER,
            json!({
                "limit": preset.inline_limit(),
                "name": preset.asset_name_template(),
            }),
        )],
    );

    vec![typescript, stylesheets, assets]
}

pub fn base_plugins(preset: Preset, paths: &ProjectPaths) -> Vec<PluginSpec> {
    let mut plugins = vec![
        PluginSpec::HtmlTemplate(HtmlPlugin::new(paths.template.clone())),
        PluginSpec::CleanOutput,
        PluginSpec::CssExtract(CssExtractPlugin::new(preset.css_filename())),
        PluginSpec::DotEnv(DotEnvPlugin::new(paths.root.clone())),
    ];

    if preset.uses_build_cache() {
        plugins.push(PluginSpec::BuildCache(BuildCachePlugin::new(paths.root.clone())));
    }

    plugins
}
