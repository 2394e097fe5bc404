mod actions;
mod components;
mod config;
mod constants;
mod core;
mod javitor;

use std::{fs::OpenOptions, path::PathBuf, sync::Mutex};

use anyhow::Context;
use tracing_subscriber::EnvFilter;

const LOG_ENV: &str = "JAVITOR_LOG";

/// Logs go to the file named by `JAVITOR_LOG`; the terminal itself is the editor surface.
fn init_logging() -> anyhow::Result<()> {
    let Some(path) = std::env::var_os(LOG_ENV) else {
        return Ok(());
    };

    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("opening log file {}", PathBuf::from(&path).display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .init();

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_logging()?;

    let config = config::Config::load()?;
    let file_path = std::env::args_os().nth(1).map(PathBuf::from);

    tracing::info!(?config, "starting javitor");

    javitor::Javitor::new(std::io::stdout(), config, file_path)
        .await?
        .start()
        .await
}
