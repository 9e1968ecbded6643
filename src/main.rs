//! dial-timer - a 60-second circular countdown in the terminal
//!
//! This is the main entry point for the dial-timer application.

use anyhow::{anyhow, Context};
use bubbletea_rs::Program;
use dial_timer::config::Config;
use dial_timer::widget::Model;
use std::fs::File;
use std::sync::Mutex;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    init_logging(&config)?;

    let settings = config.settings();
    settings.install();
    info!(
        interval = ?settings.interval,
        radius = settings.radius,
        "starting dial-timer"
    );

    let program = Program::<Model>::builder()
        .alt_screen(!config.no_alt_screen)
        .build()
        .map_err(|e| anyhow!("failed to build program: {}", e))?;

    program
        .run()
        .await
        .map_err(|e| anyhow!("program failed: {}", e))?;

    info!("dial-timer exited");
    Ok(())
}

// The terminal belongs to the UI, so logs only go to a file.
fn init_logging(config: &Config) -> anyhow::Result<()> {
    let Some(path) = &config.log_file else {
        return Ok(());
    };

    let file = File::create(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("dial_timer={}", config.log_level())));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}
