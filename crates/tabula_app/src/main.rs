use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{error, info};

use tabula_core::config::{CONFIG_FILE_NAME, ExportConfig};
use tabula_core::{ExportError, ExportInvoker, Product, command_for, logging, sample_products};

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Export the sample products: the first configured format on its own, then
/// every configured format bundled into one archive.
fn run(config: &ExportConfig) -> Result<()> {
    config.validate()?;

    let records: Arc<[Product]> = sample_products(config.record_count).into();
    let mut invoker = ExportInvoker::from_config(config);

    for format in &config.formats {
        invoker.register(command_for(*format, Arc::clone(&records)));
    }
    if let Some(first) = config.formats.first() {
        invoker.set_command(command_for(*first, Arc::clone(&records)));
    }

    let file = invoker.run_active().context("Standalone export failed")?;
    info!("Wrote {}", file.display());

    let archive = invoker
        .run_all_into_one_archive()
        .context("Archive export failed")?;
    info!(
        "Wrote {} ({} entries)",
        archive.display(),
        invoker.registered()
    );

    Ok(())
}

fn main() {
    let config = match ExportConfig::load_from_path(Path::new(CONFIG_FILE_NAME)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("tabula: {e:#}");
            std::process::exit(2);
        }
    };

    let _log_guard = match logging::init_logging(&config.log_filter, config.log_dir.as_deref()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("tabula: {e:#}");
            None
        }
    };
    info!("Starting tabula v{VERSION}");
    match &config.loaded_from {
        Some(path) => info!("Loaded config from {}", path.display()),
        None => info!("No {CONFIG_FILE_NAME} found, using defaults"),
    }

    if let Err(e) = run(&config) {
        error!("{e:#}");
        match e.downcast_ref::<ExportError>() {
            Some(export) => eprintln!("tabula: {}", export.user_message()),
            None => eprintln!("tabula: {e:#}"),
        }
        std::process::exit(1);
    }
}
