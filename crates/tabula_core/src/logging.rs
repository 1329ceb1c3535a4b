use anyhow::Result;
use std::path::Path;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Initializes console logging, plus a daily-rotated file when `logs_dir` is
/// given. `RUST_LOG` overrides `filter`.
///
/// The returned guard (file logging only) must be kept alive for the duration
/// of the program.
pub fn init_logging(filter: &str, logs_dir: Option<&Path>) -> Result<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match logs_dir {
        Some(dir) => {
            std::fs::create_dir_all(dir)?;
            let file_appender = tracing_appender::rolling::daily(dir, "tabula");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            tracing_subscriber::registry()
                .with(env_filter)
                .with(
                    fmt::layer()
                        .with_target(true)
                        .with_thread_ids(false)
                        .with_ansi(false)
                        .with_writer(non_blocking),
                )
                .with(fmt::layer().with_target(false).compact())
                .try_init()
                .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_target(false).compact())
                .try_init()
                .map_err(|e| anyhow::anyhow!("Failed to initialize logging: {e}"))?;

            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_logging_creates_directory() {
        let tmp = tempfile::tempdir().expect("Failed to create tempdir");
        let logs_dir = tmp.path().join("nested").join("logs");
        assert!(!logs_dir.exists());

        // Only one global subscriber per process; a second init in the same
        // test binary reports an error but the directory is still created.
        let result = init_logging("warn", Some(&logs_dir));
        assert!(logs_dir.exists());
        if let Err(e) = result {
            assert!(e.to_string().contains("logging"), "unexpected error: {e}");
        }
    }

    #[test]
    fn test_env_filter_fallback() {
        let filters = ["info", "debug", "warn", "tabula_core=debug,warn"];
        for f in &filters {
            let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(f));
            drop(filter);
        }
    }
}
