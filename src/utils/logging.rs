use std::time::Instant;
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

pub struct Logger;

impl Logger {
    /// Install the global subscriber. `RUST_LOG` wins over the verbosity flag.
    pub fn init(verbose: bool) {
        let default_directive = if verbose { "kiln=debug" } else { "kiln=info" };
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_directive));

        // A second init (tests, embedding) keeps the first subscriber.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_writer(std::io::stderr)
            .try_init();
    }

    pub fn assembling(preset: &str, root: &str) {
        debug!("🧱 Assembling base configuration ({} preset) for {}", preset, root);
    }

    pub fn config_loaded(path: &str) {
        debug!("📄 Loaded {}", path);
    }

    pub fn overlay_merged(mode: &str, plugin_count: usize, rule_count: usize) {
        info!(
            "🔀 Merged {} overlay: {} plugins, {} rules",
            mode, plugin_count, rule_count
        );
    }

    pub fn info(msg: &str) {
        info!("{}", msg);
    }

    pub fn debug(msg: &str) {
        debug!("{}", msg);
    }

    pub fn warn(msg: &str) {
        warn!("⚠️  {}", msg);
    }
}

pub struct Timer {
    start: Instant,
    name: String,
}

impl Timer {
    pub fn start(name: &str) -> Self {
        debug!("⏱️  Starting: {}", name);
        Self {
            start: Instant::now(),
            name: name.to_string(),
        }
    }

    pub fn elapsed(&self) -> std::time::Duration {
        self.start.elapsed()
    }
}

impl Drop for Timer {
    fn drop(&mut self) {
        debug!("⏱️  Completed: {} in {:.2?}", self.name, self.elapsed());
    }
}
