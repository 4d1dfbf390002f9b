//! Tracing subscriber setup
//!
//! Console output always; a daily-rolling file when `logging.file` is set.
//! Events raised before the configuration is known go through a temporary
//! console subscriber instead.

use std::path::Path;

use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{
    EnvFilter, fmt::MakeWriter, layer::SubscriberExt, util::SubscriberInitExt,
};

const BOOTSTRAP_LEVEL: &str = "info";

/// Run `f` with a console subscriber scoped to the current thread.
///
/// Used around configuration loading, which happens before `init_logging`
/// can know the configured level or log file.
pub fn with_bootstrap_logging<T>(f: impl FnOnce() -> T) -> T {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(BOOTSTRAP_LEVEL));
    with_bootstrap_writer(filter, std::io::stderr, true, f)
}

pub(crate) fn with_bootstrap_writer<W, T>(
    filter: EnvFilter,
    writer: W,
    ansi: bool,
    f: impl FnOnce() -> T,
) -> T
where
    W: for<'w> MakeWriter<'w> + Send + Sync + 'static,
{
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(true)
        .finish();

    tracing::subscriber::with_default(subscriber, f)
}

use crate::config::LoggingConfig;

/// Install the global subscriber.
///
/// `RUST_LOG` wins over `logging.level`. The returned guard must be held for
/// the lifetime of the process or buffered file output is lost.
pub fn init_logging(config: &LoggingConfig) -> Option<WorkerGuard> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.level));

    let console = tracing_subscriber::fmt::layer().with_target(true);

    match config.file.as_deref().and_then(split_log_path) {
        Some((dir, file_name)) => {
            let appender = tracing_appender::rolling::daily(dir, file_name);
            let (writer, guard) = tracing_appender::non_blocking(appender);

            tracing_subscriber::registry()
                .with(filter)
                .with(console)
                .with(tracing_subscriber::fmt::layer().with_writer(writer).with_ansi(false))
                .init();

            Some(guard)
        },
        None => {
            tracing_subscriber::registry().with(filter).with(console).init();
            None
        },
    }
}

fn split_log_path(path: &str) -> Option<(String, String)> {
    let path = Path::new(path);
    let file_name = path.file_name()?.to_str()?.to_string();
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_string_lossy().into_owned(),
        _ => ".".to_string(),
    };
    Some((dir, file_name))
}
