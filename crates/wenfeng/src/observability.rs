//! Logging and tracing setup.
//!
//! Two sinks share one [`EnvFilter`]:
//! - a compact human-readable layer on stderr
//! - a JSONL file layer written through a non-blocking `tracing-appender`
//!
//! Log file location, highest precedence first: `WENFENG_LOG_PATH`,
//! `WENFENG_LOG_DIR`, the config `log_dir`, then the platform data directory.
//! Directory targets rotate daily; an explicit path never rotates.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, fmt};

const ENV_LOG_PATH: &str = "WENFENG_LOG_PATH";
const ENV_LOG_DIR: &str = "WENFENG_LOG_DIR";
const LOG_FILE_NAME: &str = "wenfeng.jsonl";

/// Where log files go.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservabilityConfig {
    /// Exact log file, from `WENFENG_LOG_PATH`.
    pub log_path: Option<PathBuf>,
    /// Directory for daily-rotated log files.
    pub log_dir: Option<PathBuf>,
}

impl ObservabilityConfig {
    /// Resolve log locations from the environment, falling back to
    /// `config_log_dir` and then the platform data directory.
    pub fn from_env_with_overrides(config_log_dir: Option<PathBuf>) -> Self {
        Self::resolve(
            std::env::var_os(ENV_LOG_PATH).map(PathBuf::from),
            std::env::var_os(ENV_LOG_DIR).map(PathBuf::from),
            config_log_dir,
        )
    }

    fn resolve(
        env_path: Option<PathBuf>,
        env_dir: Option<PathBuf>,
        config_log_dir: Option<PathBuf>,
    ) -> Self {
        let log_dir = env_dir.or(config_log_dir).or_else(|| {
            wenfeng_core::config::user_data_dir().map(|dir| dir.join("logs").into_std_path_buf())
        });
        Self {
            log_path: env_path.filter(|path| !path.as_os_str().is_empty()),
            log_dir,
        }
    }

    /// Split the target into a directory, a file name, and whether it rotates.
    fn target(&self) -> Option<(PathBuf, String, bool)> {
        if let Some(ref path) = self.log_path {
            let dir = path
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .map_or_else(|| PathBuf::from("."), Path::to_path_buf);
            let name = path.file_name()?.to_string_lossy().into_owned();
            return Some((dir, name, false));
        }
        self.log_dir
            .as_ref()
            .map(|dir| (dir.clone(), LOG_FILE_NAME.to_string(), true))
    }
}

/// Build the filter: `RUST_LOG` wins, then `-q` (error), `-v` (debug),
/// `-vv` (trace), then the configured level.
pub fn env_filter(quiet: bool, verbose: u8, default_level: &str) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return filter;
    }
    EnvFilter::new(level_directive(quiet, verbose, default_level))
}

fn level_directive(quiet: bool, verbose: u8, default_level: &str) -> &str {
    if quiet {
        return "error";
    }
    match verbose {
        0 => default_level,
        1 => "debug",
        _ => "trace",
    }
}

/// Install the global subscriber.
///
/// Returns the worker guard of the file writer; keep it alive until exit so
/// buffered lines are flushed. File logging is skipped when the log directory
/// cannot be created.
pub fn init_observability(
    config: &ObservabilityConfig,
    filter: EnvFilter,
) -> anyhow::Result<Option<WorkerGuard>> {
    let stderr_layer = fmt::layer()
        .compact()
        .with_target(false)
        .with_writer(std::io::stderr);

    let (file_layer, guard) = match config.target() {
        Some((dir, name, rotate)) if std::fs::create_dir_all(&dir).is_ok() => {
            let appender = if rotate {
                tracing_appender::rolling::daily(&dir, &name)
            } else {
                tracing_appender::rolling::never(&dir, &name)
            };
            let (writer, guard) = tracing_appender::non_blocking(appender);
            let layer = fmt::layer().json().with_ansi(false).with_writer(writer);
            (Some(layer), Some(guard))
        }
        _ => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .context("failed to install tracing subscriber")?;

    Ok(guard)
}
