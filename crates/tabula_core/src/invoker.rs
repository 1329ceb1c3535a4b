use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::archive::ArchiveWriter;
use crate::command::SharedCommand;
use crate::config::{DEFAULT_ARCHIVE_NAME, ExportConfig};
use crate::error::ExportError;
use crate::output::write_atomically;

/// Runs export commands: one active command on its own, or every registered
/// command into one archive.
pub struct ExportInvoker {
    active: Option<SharedCommand>,
    commands: Vec<SharedCommand>,
    output_dir: PathBuf,
    archive_name: String,
}

impl ExportInvoker {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            active: None,
            commands: Vec::new(),
            output_dir: output_dir.into(),
            archive_name: DEFAULT_ARCHIVE_NAME.to_string(),
        }
    }

    pub fn from_config(config: &ExportConfig) -> Self {
        Self::new(&config.output_dir).with_archive_name(&config.archive_name)
    }

    pub fn with_archive_name(mut self, name: impl Into<String>) -> Self {
        self.archive_name = name.into();
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    pub fn archive_path(&self) -> PathBuf {
        self.output_dir.join(&self.archive_name)
    }

    /// Replace the active command.
    pub fn set_command(&mut self, command: SharedCommand) {
        self.active = Some(command);
    }

    /// Append to the batch. Registration order is archive order.
    pub fn register(&mut self, command: SharedCommand) {
        self.commands.push(command);
    }

    pub fn registered(&self) -> usize {
        self.commands.len()
    }

    /// Run the active command standalone.
    pub fn run_active(&self) -> Result<PathBuf, ExportError> {
        let command = self
            .active
            .as_ref()
            .ok_or_else(|| ExportError::Precondition("no command set".into()))?;
        command.write_standalone(&self.output_dir)
    }

    /// Render every registered command into one archive and write it.
    ///
    /// All or nothing: on the first failure the in-memory archive is dropped
    /// and no archive file is written. An empty registry yields an empty,
    /// valid archive.
    pub fn run_all_into_one_archive(&self) -> Result<PathBuf, ExportError> {
        self.check_unique_names()?;

        let mut archive = ArchiveWriter::new();
        for command in &self.commands {
            if let Err(e) = command.write_into_archive(&mut archive) {
                warn!(
                    entry = %command.file_name(),
                    error = %e,
                    "Archive export aborted, nothing written"
                );
                return Err(e);
            }
        }

        let entries = archive.len();
        let bytes = archive.finish()?;
        let path = self.archive_path();
        write_atomically(&path, &bytes)?;

        info!(
            path = %path.display(),
            entries,
            bytes = bytes.len(),
            "Exported archive"
        );
        Ok(path)
    }

    fn check_unique_names(&self) -> Result<(), ExportError> {
        let mut seen = HashSet::new();
        for command in &self.commands {
            let name = command.file_name();
            if !seen.insert(name.clone()) {
                return Err(ExportError::Archive(format!(
                    "two registered commands produce {name}"
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::pdf_command;
    use crate::sample::sample_products;
    use std::sync::Arc;

    #[test]
    fn test_run_active_without_command_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let invoker = ExportInvoker::new(tmp.path());
        let err = invoker.run_active().unwrap_err();
        assert!(matches!(err, ExportError::Precondition(ref m) if m == "no command set"));
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 0);
    }

    #[test]
    fn test_set_command_replaces_previous() {
        let tmp = tempfile::tempdir().unwrap();
        let mut invoker = ExportInvoker::new(tmp.path());
        invoker.set_command(Arc::new(crate::command::xlsx_command(sample_products(1))));
        invoker.set_command(Arc::new(pdf_command(sample_products(1))));

        let path = invoker.run_active().unwrap();
        assert_eq!(path.file_name().unwrap(), "Product.pdf");
        assert!(!tmp.path().join("Product.xlsx").exists());
    }

    #[test]
    fn test_register_does_not_deduplicate() {
        let mut invoker = ExportInvoker::new(".");
        let command: SharedCommand = Arc::new(pdf_command(sample_products(1)));
        invoker.register(Arc::clone(&command));
        invoker.register(command);
        assert_eq!(invoker.registered(), 2);
    }

    #[test]
    fn test_archive_path_uses_configured_name() {
        let invoker = ExportInvoker::new("out").with_archive_name("bundle.zip");
        assert_eq!(invoker.archive_path(), Path::new("out").join("bundle.zip"));
        assert_eq!(invoker.output_dir(), Path::new("out"));
    }
}
