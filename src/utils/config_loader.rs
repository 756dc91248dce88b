use crate::core::merge::Overlay;
use crate::core::models::ProjectPaths;
use crate::core::preset::Preset;
use crate::utils::{ErrorContext, KilnError, Logger, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE_NAME: &str = "kiln.config.json";

/// Project settings file (kiln.config.json). Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct KilnConfig {
    /// Entry file, relative to the project root (default: "src/index.tsx")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entry: Option<String>,

    /// HTML template (default: "public/index.html")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,

    /// Output directory (default: "dist")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outdir: Option<String>,

    /// "flat" or "nested" (default: "flat")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preset: Option<Preset>,

    /// Dev server bind address (default: "0.0.0.0")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    /// Dev server port (default: 3030)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    /// Open a browser when the dev server starts (default: true)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open: Option<bool>,
}

/// Values given on the command line; they win over the file
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub entry: Option<String>,
    pub template: Option<String>,
    pub outdir: Option<String>,
    pub preset: Option<Preset>,
    pub port: Option<u16>,
}

/// Dev server fields a project may change
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ServerOverrides {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub open: Option<bool>,
}

impl ServerOverrides {
    pub fn is_empty(&self) -> bool {
        self.host.is_none() && self.port.is_none() && self.open.is_none()
    }

    /// Patch the dev server of a development overlay; other overlays are left alone
    pub fn apply(&self, overlay: &mut Overlay) {
        if let Some(server) = overlay.dev_server.as_mut() {
            if let Some(ref host) = self.host {
                server.host = host.clone();
            }
            if let Some(port) = self.port {
                server.port = port;
            }
            if let Some(open) = self.open {
                server.open = open;
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedSettings {
    pub paths: ProjectPaths,
    pub preset: Preset,
    pub server: ServerOverrides,
}

pub struct ConfigLoader;

impl ConfigLoader {
    /// Load kiln.config.json from the project root, if present
    pub fn load_from_file(root: &Path) -> Result<Option<KilnConfig>> {
        let config_path = root.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            Logger::debug(&format!("No {} found, using defaults", CONFIG_FILE_NAME));
            return Ok(None);
        }

        let content = std::fs::read_to_string(&config_path)?;

        let config: KilnConfig = serde_json::from_str(&content).map_err(|e| {
            KilnError::config_with_context(
                format!("failed to parse {}: {}", CONFIG_FILE_NAME, e),
                ErrorContext::new()
                    .with_file(config_path.clone())
                    .with_hint("run `kiln init --force` to regenerate an example"),
            )
        })?;

        Logger::config_loaded(&config_path.display().to_string());
        Ok(Some(config))
    }

    /// CLI > config file > defaults
    pub fn merge_with_cli(
        file_config: Option<KilnConfig>,
        root: PathBuf,
        cli: &CliOverrides,
    ) -> ResolvedSettings {
        let file = file_config.unwrap_or_default();
        let mut paths = ProjectPaths::new(root);

        if let Some(entry) = cli.entry.as_ref().or(file.entry.as_ref()) {
            paths = paths.with_entry(entry);
        }
        if let Some(template) = cli.template.as_ref().or(file.template.as_ref()) {
            paths = paths.with_template(template);
        }
        if let Some(outdir) = cli.outdir.as_ref().or(file.outdir.as_ref()) {
            paths = paths.with_output_dir(outdir);
        }

        ResolvedSettings {
            paths,
            preset: cli.preset.or(file.preset).unwrap_or_default(),
            server: ServerOverrides {
                host: file.host,
                port: cli.port.or(file.port),
                open: file.open,
            },
        }
    }

    /// Contents written by `kiln init`
    pub fn generate_example() -> String {
        let example = KilnConfig {
            entry: Some("src/index.tsx".to_string()),
            template: Some("public/index.html".to_string()),
            outdir: Some("dist".to_string()),
            preset: Some(Preset::Flat),
            host: Some("0.0.0.0".to_string()),
            port: Some(3030),
            open: Some(true),
        };

        serde_json::to_string_pretty(&example).unwrap_or_else(|_| {
            r#"{
  "entry": "src/index.tsx",
  "template": "public/index.html",
  "outdir": "dist",
  "preset": "flat",
  "host": "0.0.0.0",
  "port": 3030,
  "open": true
}"#
            .to_string()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::merge::development_overlay;

    #[test]
    fn test_load_from_file_not_exists() {
        let temp_dir = tempfile::tempdir().unwrap();
        let result = ConfigLoader::load_from_file(temp_dir.path()).unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_load_from_file_valid() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::write(
            temp_dir.path().join(CONFIG_FILE_NAME),
            r#"{"outdir": "build", "preset": "nested", "port": 4000}"#,
        )
        .unwrap();

        let config = ConfigLoader::load_from_file(temp_dir.path()).unwrap().unwrap();
        assert_eq!(config.outdir.as_deref(), Some("build"));
        assert_eq!(config.preset, Some(Preset::Nested));
        assert_eq!(config.port, Some(4000));
    }

    #[test]
    fn test_load_from_file_rejects_unknown_preset() {
        let temp_dir = tempfile::tempdir().unwrap();
        std::fs::write(temp_dir.path().join(CONFIG_FILE_NAME), r#"{"preset": "tiny"}"#).unwrap();

        let err = ConfigLoader::load_from_file(temp_dir.path()).unwrap_err();
        assert!(matches!(err, KilnError::Config { .. }));
        assert!(err.format_detailed().contains(CONFIG_FILE_NAME));
    }

    #[test]
    fn test_merge_with_cli_override() {
        let file_config = KilnConfig {
            outdir: Some("build".to_string()),
            preset: Some(Preset::Nested),
            port: Some(4000),
            ..Default::default()
        };
        let cli = CliOverrides {
            outdir: Some("dist-override".to_string()),
            port: Some(5000),
            ..Default::default()
        };

        let settings = ConfigLoader::merge_with_cli(Some(file_config), PathBuf::from("/project"), &cli);

        assert_eq!(settings.paths.output_dir, PathBuf::from("/project/dist-override"));
        assert_eq!(settings.paths.entry, PathBuf::from("/project/src/index.tsx"));
        assert_eq!(settings.preset, Preset::Nested);
        assert_eq!(settings.server.port, Some(5000));
    }

    #[test]
    fn test_server_overrides_empty_without_file_or_flags() {
        let settings =
            ConfigLoader::merge_with_cli(None, PathBuf::from("/project"), &CliOverrides::default());
        assert!(settings.server.is_empty());

        let cli = CliOverrides {
            port: Some(4000),
            ..Default::default()
        };
        let settings = ConfigLoader::merge_with_cli(None, PathBuf::from("/project"), &cli);
        assert!(!settings.server.is_empty());
    }

    #[test]
    fn test_server_overrides_patch_dev_overlay() {
        let paths = ProjectPaths::new("/project");
        let mut overlay = development_overlay(Preset::Flat, &paths);
        let overrides = ServerOverrides {
            host: Some("localhost".to_string()),
            port: Some(8080),
            open: Some(false),
        };

        overrides.apply(&mut overlay);

        let server = overlay.dev_server.unwrap();
        assert_eq!(server.host, "localhost");
        assert_eq!(server.port, 8080);
        assert!(!server.open);
        assert!(server.hot);
    }

    #[test]
    fn test_generate_example_parses() {
        let example = ConfigLoader::generate_example();
        let parsed: KilnConfig = serde_json::from_str(&example).unwrap();
        assert_eq!(parsed.preset, Some(Preset::Flat));
        assert_eq!(parsed.port, Some(3030));
    }
}
