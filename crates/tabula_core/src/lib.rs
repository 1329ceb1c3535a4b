pub mod archive;
pub mod command;
pub mod config;
pub mod error;
pub mod invoker;
pub mod logging;
pub mod output;
pub mod sample;

pub use archive::ArchiveWriter;
pub use command::{
    ExportCommand, PdfExportCommand, RenderCommand, SharedCommand, XlsxExportCommand, command_for,
    pdf_command, xlsx_command,
};
pub use config::ExportConfig;
pub use error::ExportError;
pub use invoker::ExportInvoker;
pub use sample::{Product, sample_products};
