use crate::core::{
    development_overlay, merge, production_overlay, AssetRoute, AssetRouter, BundlerConfig,
    ConfigAssembler, Mode, Preset, RuleSet,
};
use crate::utils::{
    CliOverrides, ConfigLoader, KilnError, Logger, ResolvedSettings, Result, CONFIG_FILE_NAME,
};
use clap::{Args, Parser, Subcommand};
use colored::*;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "kiln")]
#[command(about = "Kiln - bundler configuration presets for TypeScript/React apps")]
pub struct Cli {
    /// Log debug details to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone)]
pub struct ProjectArgs {
    /// Project root directory
    #[arg(short, long, default_value = ".")]
    pub root: PathBuf,
    /// Configuration preset (flat or nested)
    #[arg(long)]
    pub preset: Option<Preset>,
    /// Entry file, relative to the root
    #[arg(long)]
    pub entry: Option<String>,
    /// HTML template, relative to the root
    #[arg(long)]
    pub template: Option<String>,
    /// Output directory, relative to the root
    #[arg(long)]
    pub outdir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the merged configuration as JSON
    Print {
        #[command(flatten)]
        project: ProjectArgs,
        /// Target environment (development, production or none)
        #[arg(short, long, default_value = "development")]
        env: Mode,
        /// Dev server port
        #[arg(short, long)]
        port: Option<u16>,
        /// Write to a file instead of stdout
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Fail when the entry or template file is missing
        #[arg(long)]
        check: bool,
    },
    /// Show whether static assets are inlined or emitted
    Route {
        #[command(flatten)]
        project: ProjectArgs,
        /// Target environment whose merged configuration is used
        #[arg(short, long, default_value = "development")]
        env: Mode,
        /// Asset files to inspect
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Show which transform rule applies to each path
    Rule {
        #[command(flatten)]
        project: ProjectArgs,
        #[arg(required = true)]
        paths: Vec<PathBuf>,
    },
    /// Write an example kiln.config.json
    Init {
        /// Project root directory
        #[arg(short, long, default_value = ".")]
        root: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

pub struct CliHandler;

impl CliHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn run(&self) -> Result<()> {
        let cli = Cli::parse();
        Logger::init(cli.verbose);
        self.dispatch(cli.command)
    }

    pub fn dispatch(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Print {
                project,
                env,
                port,
                out,
                check,
            } => self.handle_print_command(&project, env, port, out.as_deref(), check),
            Commands::Route {
                project,
                env,
                files,
            } => self.handle_route_command(&project, env, &files),
            Commands::Rule { project, paths } => self.handle_rule_command(&project, &paths),
            Commands::Init { root, force } => self.handle_init_command(&root, force),
        }
    }

    fn handle_print_command(
        &self,
        project: &ProjectArgs,
        env: Mode,
        port: Option<u16>,
        out: Option<&Path>,
        check: bool,
    ) -> Result<()> {
        let settings = self.resolve_settings(project, port)?;
        let assembler = ConfigAssembler::new(settings.paths.clone(), settings.preset);

        if check {
            if !settings.paths.root.join(CONFIG_FILE_NAME).exists() {
                Logger::warn(&format!(
                    "No {} in {}, checking default paths",
                    CONFIG_FILE_NAME,
                    settings.paths.root.display()
                ));
            }
            assembler.check_inputs()?;
        }

        let config = Self::assemble(&assembler, &settings, env)?;
        let json = config.to_json_pretty()?;

        match out {
            Some(path) => {
                if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                    std::fs::create_dir_all(parent)?;
                }
                std::fs::write(path, format!("{}\n", json))?;
                Logger::info(&format!("📦 Wrote {} configuration to {}", env, path.display()));
            }
            None => println!("{}", json),
        }

        Ok(())
    }

    /// Base record, then the environment overlay with project server tweaks
    pub fn assemble(
        assembler: &ConfigAssembler,
        settings: &ResolvedSettings,
        env: Mode,
    ) -> Result<BundlerConfig> {
        let base = assembler.base();

        match env {
            Mode::Development => {
                let mut overlay = development_overlay(settings.preset, &settings.paths);
                if !settings.server.is_empty() {
                    Logger::debug(&format!("Dev server overrides: {:?}", settings.server));
                    settings.server.apply(&mut overlay);
                }
                merge(&base, &overlay)
            }
            Mode::Production => merge(&base, &production_overlay(settings.preset)),
            Mode::None => Ok(base),
        }
    }

    fn handle_route_command(&self, project: &ProjectArgs, env: Mode, files: &[PathBuf]) -> Result<()> {
        let settings = self.resolve_settings(project, None)?;
        let assembler = ConfigAssembler::new(settings.paths.clone(), settings.preset);
        let config = Self::assemble(&assembler, &settings, env)?;
        let router = AssetRouter::from_config(&config)?;

        println!(
            "\n  {} preset, {}, inline limit {}\n",
            settings.preset.to_string().bright_cyan().bold(),
            env,
            format_size(router.limit()).bright_white()
        );

        for file in files {
            match router.route_file(file)? {
                Some(AssetRoute::Inline { mime }) => println!(
                    "  {}  {} {}",
                    "inline".bright_green(),
                    file.display(),
                    format!("({}, {})", mime, format_size(std::fs::metadata(file)?.len()))
                        .bright_black()
                ),
                Some(AssetRoute::Emit { path }) => println!(
                    "  {}    {} → {} {}",
                    "emit".bright_yellow(),
                    file.display(),
                    config.output.path.join(path).display(),
                    format!("({})", format_size(std::fs::metadata(file)?.len())).bright_black()
                ),
                None => println!("  {}    {}", "skip".bright_black(), file.display()),
            }
        }
        println!();

        Ok(())
    }

    fn handle_rule_command(&self, project: &ProjectArgs, paths: &[PathBuf]) -> Result<()> {
        let settings = self.resolve_settings(project, None)?;
        let config = ConfigAssembler::new(settings.paths, settings.preset).base();
        let rules = RuleSet::from_config(&config)?;

        for path in paths {
            match rules.match_path(path) {
                Some(rule) => println!(
                    "  {} → {}",
                    path.display(),
                    rule.loader_names().join(" → ").bright_cyan()
                ),
                None => println!("  {} → {}", path.display(), "no rule".bright_black()),
            }
        }

        Ok(())
    }

    fn handle_init_command(&self, root: &Path, force: bool) -> Result<()> {
        let path = root.join(CONFIG_FILE_NAME);

        if path.exists() && !force {
            return Err(KilnError::config(format!(
                "{} already exists (use --force to overwrite)",
                path.display()
            )));
        }

        std::fs::create_dir_all(root)?;
        std::fs::write(&path, format!("{}\n", ConfigLoader::generate_example()))?;
        println!("  {} {}", "✓".bright_green(), path.display());

        Ok(())
    }

    fn resolve_settings(&self, project: &ProjectArgs, port: Option<u16>) -> Result<ResolvedSettings> {
        let root = project.root.canonicalize().map_err(|e| {
            KilnError::InvalidPath(format!("{}: {}", project.root.display(), e))
        })?;

        let file_config = ConfigLoader::load_from_file(&root)?;
        let overrides = CliOverrides {
            entry: project.entry.clone(),
            template: project.template.clone(),
            outdir: project.outdir.clone(),
            preset: project.preset,
            port,
        };

        Ok(ConfigLoader::merge_with_cli(file_config, root, &overrides))
    }
}

impl Default for CliHandler {
    fn default() -> Self {
        Self::new()
    }
}

fn format_size(bytes: u64) -> String {
    const KB: f64 = 1024.0;

    if bytes < 1024 {
        format!("{} B", bytes)
    } else {
        format!("{:.2} kB", bytes as f64 / KB)
    }
}
