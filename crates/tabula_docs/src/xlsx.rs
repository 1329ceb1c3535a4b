use std::sync::Arc;

use rust_xlsxwriter::{DocProperties, ExcelDateTime, Format, Workbook};

use crate::error::RenderError;
use crate::render::{ExportFormat, Render, RenderedOutput};
use crate::schema::{FieldValue, Record, Schema};
use crate::table::Table;

/// Document properties with a fixed creation stamp, so identical tables
/// produce identical bytes.
fn fixed_properties() -> Result<DocProperties, RenderError> {
    let created = ExcelDateTime::from_ymd(2000, 1, 1)?;
    Ok(DocProperties::new().set_creation_datetime(&created))
}

/// Excel caps sheet names at 31 characters.
const MAX_SHEET_NAME_LEN: usize = 31;

/// Turn a record type name into a sheet name Excel accepts: illegal
/// characters become `_`, the result is cut to 31 characters and may not be
/// blank, wrapped in apostrophes or the reserved `History`.
fn sheet_name(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .map(|c| match c {
            '[' | ']' | ':' | '*' | '?' | '/' | '\\' => '_',
            c => c,
        })
        .take(MAX_SHEET_NAME_LEN)
        .collect();
    let cleaned = cleaned.trim_matches('\'');

    if cleaned.trim().is_empty() || cleaned.eq_ignore_ascii_case("history") {
        "Sheet1".to_string()
    } else {
        cleaned.to_string()
    }
}

/// Generate an XLSX workbook holding `table` as its only worksheet.
///
/// Row 0 carries the bold column names; data rows follow in table order with
/// cell types taken from each value.
pub fn generate_xlsx_table(table: &Table) -> Result<Vec<u8>, RenderError> {
    let mut workbook = Workbook::new();
    workbook.set_properties(&fixed_properties()?);

    let worksheet = workbook.add_worksheet();
    worksheet.set_name(sheet_name(table.name()))?;

    let header_format = Format::new().set_bold();
    let currency_format = Format::new().set_num_format("0.00");

    for (col, column) in table.columns().iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, &column.name, &header_format)?;
    }

    for (row_idx, row) in table.rows().iter().enumerate() {
        let excel_row = (row_idx + 1) as u32;
        for (col_idx, value) in row.iter().enumerate() {
            let col = col_idx as u16;
            match value {
                FieldValue::Integer(v) | FieldValue::Quantity(v) => {
                    worksheet.write_number(excel_row, col, *v as f64)?;
                }
                FieldValue::Text(s) => {
                    worksheet.write_string(excel_row, col, s)?;
                }
                FieldValue::Currency(m) => {
                    worksheet.write_number_with_format(excel_row, col, m.as_f64(), &currency_format)?;
                }
            }
        }
    }

    worksheet.autofit();

    Ok(workbook.save_to_buffer()?)
}

/// Renders records as a single-sheet spreadsheet, one row per record.
pub struct TabularRenderer<R> {
    schema: Schema<R>,
    records: Arc<[R]>,
}

impl<R: Record> TabularRenderer<R> {
    pub fn new(records: impl Into<Arc<[R]>>) -> Self {
        Self::with_schema(R::schema(), records)
    }
}

impl<R> TabularRenderer<R> {
    pub fn with_schema(schema: Schema<R>, records: impl Into<Arc<[R]>>) -> Self {
        Self {
            schema,
            records: records.into(),
        }
    }

    pub fn tabulate(&self, records: &[R]) -> Result<Table, RenderError> {
        Table::from_records(&self.schema, records)
    }

    /// Render an arbitrary record slice under this renderer's schema.
    pub fn render_records(&self, records: &[R]) -> Result<Vec<u8>, RenderError> {
        generate_xlsx_table(&self.tabulate(records)?)
    }
}

impl<R> Render for TabularRenderer<R> {
    fn format(&self) -> ExportFormat {
        ExportFormat::Xlsx
    }

    fn file_name(&self) -> String {
        self.schema.file_name(ExportFormat::Xlsx.extension())
    }

    fn render(&self) -> Result<RenderedOutput, RenderError> {
        Ok(RenderedOutput {
            file_name: self.file_name(),
            bytes: self.render_records(&self.records)?,
        })
    }
}
