use std::{fs::File, io, path::Path, sync::Mutex};

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str = "warn,sawm_core=info,sawm_provider_aladhan=info,sawm_tui=info";
const VERBOSE_FILTER: &str = "info,sawm_core=debug,sawm_provider_aladhan=debug,sawm_tui=debug";

/// Where log lines go.
pub(crate) enum LogTarget<'a> {
    /// Headless runs: stdout carries the table, logs go to stderr.
    Stderr,
    /// The terminal UI owns the screen, so logs only go to a file if asked.
    File(&'a Path),
    Disabled,
}

pub(crate) fn init(verbose: bool, target: LogTarget<'_>) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_err| {
        EnvFilter::new(if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER })
    });

    let registry = tracing_subscriber::registry().with(filter);

    match target {
        LogTarget::Stderr => registry
            .with(
                fmt::layer()
                    .with_writer(io::stderr)
                    .with_target(false)
                    .compact(),
            )
            .try_init()?,
        LogTarget::File(path) => {
            let file = File::create(path)
                .with_context(|| format!("failed to create log file {}", path.display()))?;
            registry
                .with(
                    fmt::layer()
                        .with_writer(Mutex::new(file))
                        .with_ansi(false)
                        .compact(),
                )
                .try_init()?;
        }
        LogTarget::Disabled => {}
    }
    Ok(())
}
