mod app;
mod convert;
mod messages;
mod panels;
mod states;
mod workers;

use std::path::Path;

use anyhow::Context;
use pixscope_core::config::InspectorConfig;
use tracing::{info, warn};

/// Environment variable naming an optional TOML settings file.
const CONFIG_ENV: &str = "PIXSCOPE_CONFIG";

fn main() -> eframe::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let config = startup_config();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1280.0, 800.0])
            .with_min_inner_size([720.0, 520.0])
            .with_title("Pixscope")
            .with_drag_and_drop(true),
        ..Default::default()
    };

    eframe::run_native(
        "Pixscope",
        options,
        Box::new(move |cc| Ok(Box::new(app::PixscopeApp::new(&cc.egui_ctx, config)))),
    )
}

/// Settings for this session. A broken settings file falls back to defaults.
fn startup_config() -> InspectorConfig {
    let Some(path) = std::env::var_os(CONFIG_ENV) else {
        return InspectorConfig::default();
    };

    match read_config(Path::new(&path)) {
        Ok(config) => {
            info!(path = %Path::new(&path).display(), "loaded settings");
            config
        }
        Err(e) => {
            warn!("{e:#}; using defaults");
            InspectorConfig::default()
        }
    }
}

fn read_config(path: &Path) -> anyhow::Result<InspectorConfig> {
    InspectorConfig::load(path)
        .with_context(|| format!("failed to load settings from {}", path.display()))
}
