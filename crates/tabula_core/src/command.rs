use std::path::{Path, PathBuf};
use std::sync::Arc;

use tabula_docs::{DocumentListRenderer, ExportFormat, Record, Render, TabularRenderer};
use tracing::info;

use crate::archive::ArchiveWriter;
use crate::error::ExportError;
use crate::output::write_atomically;

/// A file-producing operation that can run on its own or feed an archive.
pub trait ExportCommand {
    /// Name of the file (or archive entry) this command produces.
    fn file_name(&self) -> String;

    /// Render and write `dir/<file_name>`, replacing any existing file.
    fn write_standalone(&self, dir: &Path) -> Result<PathBuf, ExportError>;

    /// Render and append one entry to an archive owned by the caller.
    fn write_into_archive(&self, archive: &mut ArchiveWriter) -> Result<(), ExportError>;
}

/// Commands are shared between the active slot and the batch registry.
pub type SharedCommand = Arc<dyn ExportCommand>;

/// Export command bound to a single renderer.
pub struct RenderCommand<T> {
    renderer: T,
}

impl<T: Render> RenderCommand<T> {
    pub fn new(renderer: T) -> Self {
        Self { renderer }
    }

    pub fn renderer(&self) -> &T {
        &self.renderer
    }
}

impl<T: Render> ExportCommand for RenderCommand<T> {
    fn file_name(&self) -> String {
        self.renderer.file_name()
    }

    fn write_standalone(&self, dir: &Path) -> Result<PathBuf, ExportError> {
        let output = self.renderer.render()?;
        let path = dir.join(&output.file_name);
        write_atomically(&path, &output.bytes)?;
        info!(
            path = %path.display(),
            format = self.renderer.format().extension(),
            bytes = output.bytes.len(),
            "Exported file"
        );
        Ok(path)
    }

    fn write_into_archive(&self, archive: &mut ArchiveWriter) -> Result<(), ExportError> {
        let name = self.renderer.file_name();
        if archive.contains(&name) {
            return Err(ExportError::Archive(format!("duplicate entry name: {name}")));
        }
        let output = self.renderer.render()?;
        archive.append(&output.file_name, &output.bytes)
    }
}

/// Spreadsheet export of `records`.
pub type XlsxExportCommand<R> = RenderCommand<TabularRenderer<R>>;

/// Bulleted PDF export of `records`.
pub type PdfExportCommand<R> = RenderCommand<DocumentListRenderer<R>>;

pub fn xlsx_command<R: Record>(records: impl Into<Arc<[R]>>) -> XlsxExportCommand<R> {
    RenderCommand::new(TabularRenderer::new(records))
}

pub fn pdf_command<R: Record>(records: impl Into<Arc<[R]>>) -> PdfExportCommand<R> {
    RenderCommand::new(DocumentListRenderer::new(records))
}

/// Build the command for `format` over a shared record sequence.
pub fn command_for<R: Record + 'static>(format: ExportFormat, records: Arc<[R]>) -> SharedCommand {
    match format {
        ExportFormat::Xlsx => Arc::new(xlsx_command(records)),
        ExportFormat::Pdf => Arc::new(pdf_command(records)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample::{Product, sample_products};

    #[test]
    fn test_file_names_follow_record_type() {
        let records: Arc<[Product]> = sample_products(3).into();
        assert_eq!(command_for(ExportFormat::Xlsx, Arc::clone(&records)).file_name(), "Product.xlsx");
        assert_eq!(command_for(ExportFormat::Pdf, records).file_name(), "Product.pdf");
    }

    #[test]
    fn test_standalone_matches_direct_render() {
        let tmp = tempfile::tempdir().unwrap();
        let command = pdf_command(sample_products(4));

        let path = command.write_standalone(tmp.path()).unwrap();
        assert_eq!(path, tmp.path().join("Product.pdf"));

        let direct = command.renderer().render().unwrap().bytes;
        assert_eq!(std::fs::read(&path).unwrap(), direct);
    }

    #[test]
    fn test_render_failure_writes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let command = xlsx_command(Vec::<Product>::new());

        let err = command.write_standalone(tmp.path()).unwrap_err();
        assert!(matches!(err, ExportError::Render(_)));
        assert!(!tmp.path().join("Product.xlsx").exists());
    }

    #[test]
    fn test_write_into_archive_appends_one_entry() {
        let mut archive = ArchiveWriter::new();
        xlsx_command(sample_products(2))
            .write_into_archive(&mut archive)
            .unwrap();
        pdf_command(sample_products(2))
            .write_into_archive(&mut archive)
            .unwrap();
        assert_eq!(archive.entry_names(), ["Product.xlsx", "Product.pdf"]);
    }

    #[test]
    fn test_write_into_archive_rejects_duplicate() {
        let mut archive = ArchiveWriter::new();
        let command = pdf_command(sample_products(2));
        command.write_into_archive(&mut archive).unwrap();

        let err = command.write_into_archive(&mut archive).unwrap_err();
        assert!(matches!(err, ExportError::Archive(_)));
        assert_eq!(archive.len(), 1);
    }
}
