use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tabula_docs::ExportFormat;

/// Config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "tabula.json";

/// Archive written by batch exports unless configured otherwise.
pub const DEFAULT_ARCHIVE_NAME: &str = "files.zip";

pub const DEFAULT_LOG_FILTER: &str = "info,tabula_core=debug,tabula_docs=debug";

/// Export settings, read from `tabula.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Directory receiving standalone files and the archive.
    pub output_dir: PathBuf,
    pub archive_name: String,
    /// Formats registered for the batch; the first is also run standalone.
    pub formats: Vec<ExportFormat>,
    /// Number of sample products to export.
    pub record_count: usize,
    pub log_filter: String,
    /// When set, logs are also written here with daily rotation.
    pub log_dir: Option<PathBuf>,
    /// File this config was read from; `None` for defaults.
    #[serde(skip)]
    pub loaded_from: Option<PathBuf>,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            archive_name: DEFAULT_ARCHIVE_NAME.to_string(),
            formats: vec![ExportFormat::Xlsx, ExportFormat::Pdf],
            record_count: 30,
            log_filter: DEFAULT_LOG_FILTER.to_string(),
            log_dir: None,
            loaded_from: None,
        }
    }
}

impl ExportConfig {
    /// Load config from a specific file path. A missing file yields the
    /// defaults; nothing is written back.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config: {}", path.display()))?;
            let mut config: Self = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse {}", path.display()))?;
            config.loaded_from = Some(path.to_path_buf());
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config: {}", path.display()))?;
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.archive_name.trim().is_empty() {
            bail!("archive_name must not be empty");
        }
        if matches!(self.archive_name.trim(), "." | "..") {
            bail!("archive_name must name a file, got {:?}", self.archive_name);
        }
        if self.archive_name.contains(['/', '\\']) {
            bail!(
                "archive_name must be a bare file name, got {:?}",
                self.archive_name
            );
        }
        if self.formats.is_empty() {
            bail!("formats must list at least one export format");
        }
        Ok(())
    }
}
