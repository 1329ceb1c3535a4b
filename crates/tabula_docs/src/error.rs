use rust_xlsxwriter::XlsxError;
use thiserror::Error;

/// Failure to turn a record sequence into document bytes.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Cannot render {type_name}: no records to tabulate")]
    EmptyInput { type_name: String },

    #[error("Cannot render {type_name}: schema declares no fields")]
    EmptySchema { type_name: String },

    #[error("Spreadsheet error: {0}")]
    Xlsx(#[from] XlsxError),
}
