//! PDF document generation.
//!
//! Builds minimal but valid PDF 1.4 files by hand. Records are laid out as a
//! single unordered bullet list; content that does not fit on one A4 page
//! flows onto further pages. Uses the built-in Helvetica fonts, so no font
//! files are needed.

use std::sync::Arc;

use encoding_rs::WINDOWS_1252;

use crate::error::RenderError;
use crate::render::{ExportFormat, Render, RenderedOutput};
use crate::schema::{Record, Schema};

const PAGE_WIDTH: f64 = 595.0;
const PAGE_HEIGHT: f64 = 842.0;
const MARGIN: f64 = 72.0;
const TOP: f64 = PAGE_HEIGHT - MARGIN;
const BODY_SIZE: f64 = 11.0;
const LEADING: f64 = 14.4;
const ITEM_GAP: f64 = 7.0;
const TITLE_SIZE: f64 = 18.0;
const TITLE_GAP: f64 = 30.0;
const BULLET_INDENT: f64 = 14.0;

/// WinAnsi code for the bullet glyph, as a PDF string escape.
const BULLET: &str = "\\225";

/// An unordered list: one item per record, each item possibly multi-line.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BulletList {
    items: Vec<String>,
}

impl BulletList {
    pub fn new(items: Vec<String>) -> Self {
        Self { items }
    }

    pub fn from_records<R>(schema: &Schema<R>, records: &[R]) -> Self {
        Self {
            items: records.iter().map(|r| schema.describe(r)).collect(),
        }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Generate a PDF with a bold title followed by `list` as bullets.
///
/// An empty list still yields one (titled) page.
pub fn generate_pdf_list(title: &str, list: &BulletList) -> Vec<u8> {
    let mut pages: Vec<String> = Vec::new();
    let mut content = String::new();
    let mut y = TOP;

    content.push_str("BT\n");
    content.push_str(&format!("/F1 {TITLE_SIZE:.0} Tf\n"));
    content.push_str(&format!("{MARGIN:.0} {y:.0} Td\n"));
    content.push_str(&format!("({}) Tj\n", pdf_escape(title)));
    content.push_str("ET\n");
    y -= TITLE_GAP;

    for item in list.items() {
        let lines: Vec<&str> = if item.is_empty() {
            vec![""]
        } else {
            item.lines().collect()
        };
        let height = lines.len() as f64 * LEADING;

        // Keep an item on one page when it fits on a fresh one.
        if y - height < MARGIN && y < TOP {
            pages.push(std::mem::take(&mut content));
            y = TOP;
        }

        for (i, line) in lines.iter().enumerate() {
            if y - LEADING < MARGIN {
                pages.push(std::mem::take(&mut content));
                y = TOP;
            }
            y -= LEADING;

            content.push_str("BT\n");
            content.push_str(&format!("/F2 {BODY_SIZE:.0} Tf\n"));
            if i == 0 {
                content.push_str(&format!("{MARGIN:.0} {y:.1} Td\n"));
                content.push_str(&format!("({BULLET}) Tj\n"));
                content.push_str(&format!("{BULLET_INDENT:.0} 0 Td\n"));
            } else {
                content.push_str(&format!("{:.0} {y:.1} Td\n", MARGIN + BULLET_INDENT));
            }
            content.push_str(&format!("({}) Tj\n", pdf_escape(line)));
            content.push_str("ET\n");
        }
        y -= ITEM_GAP;
    }
    pages.push(content);

    let mut builder = PdfBuilder::new();
    for page in pages {
        builder.add_page(page);
    }
    builder.build(title)
}

/// Encode `s` for a WinAnsi-encoded PDF string literal.
///
/// Delimiters are backslash-escaped and bytes above 0x7F are written as octal
/// escapes; characters outside Windows-1252 become `?`.
fn pdf_escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut buf = [0u8; 4];
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '(' => out.push_str("\\("),
            ')' => out.push_str("\\)"),
            '\r' => {}
            c if c.is_ascii() => out.push(c),
            c => {
                let (bytes, _, unmappable) = WINDOWS_1252.encode(c.encode_utf8(&mut buf));
                if unmappable {
                    out.push('?');
                } else {
                    for b in bytes.iter() {
                        out.push_str(&format!("\\{b:03o}"));
                    }
                }
            }
        }
    }
    out
}

/// Minimal PDF file builder. Constructs valid PDF 1.4 files.
struct PdfBuilder {
    pages: Vec<String>,
}

impl PdfBuilder {
    fn new() -> Self {
        Self { pages: Vec::new() }
    }

    fn add_page(&mut self, content: String) {
        self.pages.push(content);
    }

    /// Build the complete PDF file as bytes.
    ///
    /// Object layout: 1 catalog, 2 page tree, 3-4 fonts, 5 info, then a
    /// (page, content stream) pair per page.
    fn build(&self, title: &str) -> Vec<u8> {
        let mut pdf = String::new();
        let mut offsets: Vec<usize> = Vec::new();
        let page_ids: Vec<usize> = (0..self.pages.len()).map(|i| 6 + 2 * i).collect();

        pdf.push_str("%PDF-1.4\n");

        offsets.push(pdf.len());
        pdf.push_str("1 0 obj\n<< /Type /Catalog /Pages 2 0 R >>\nendobj\n");

        offsets.push(pdf.len());
        let kids = page_ids
            .iter()
            .map(|id| format!("{id} 0 R"))
            .collect::<Vec<_>>()
            .join(" ");
        pdf.push_str(&format!(
            "2 0 obj\n<< /Type /Pages /Kids [{kids}] /Count {} >>\nendobj\n",
            page_ids.len()
        ));

        offsets.push(pdf.len());
        pdf.push_str(
            "3 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica-Bold /Encoding /WinAnsiEncoding >>\nendobj\n",
        );

        offsets.push(pdf.len());
        pdf.push_str(
            "4 0 obj\n<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding /WinAnsiEncoding >>\nendobj\n",
        );

        offsets.push(pdf.len());
        pdf.push_str(&format!(
            "5 0 obj\n<< /Title ({}) /Producer (Tabula) >>\nendobj\n",
            pdf_escape(title)
        ));

        for (content, page_id) in self.pages.iter().zip(&page_ids) {
            let content_id = page_id + 1;

            offsets.push(pdf.len());
            pdf.push_str(&format!("{page_id} 0 obj\n<< /Type /Page /Parent 2 0 R "));
            pdf.push_str(&format!("/MediaBox [0 0 {PAGE_WIDTH:.0} {PAGE_HEIGHT:.0}] "));
            pdf.push_str(&format!("/Contents {content_id} 0 R /Resources << /Font << "));
            pdf.push_str("/F1 3 0 R /F2 4 0 R >> >> >>\nendobj\n");

            offsets.push(pdf.len());
            pdf.push_str(&format!(
                "{content_id} 0 obj\n<< /Length {} >>\nstream\n{}\nendstream\nendobj\n",
                content.len(),
                content
            ));
        }

        let xref_offset = pdf.len();
        let num_objects = offsets.len() + 1; // +1 for free entry
        pdf.push_str(&format!("xref\n0 {num_objects}\n"));
        pdf.push_str("0000000000 65535 f \n");
        for offset in &offsets {
            pdf.push_str(&format!("{:010} 00000 n \n", offset));
        }

        pdf.push_str(&format!(
            "trailer\n<< /Size {num_objects} /Root 1 0 R /Info 5 0 R >>\n"
        ));
        pdf.push_str(&format!("startxref\n{xref_offset}\n%%EOF\n"));

        pdf.into_bytes()
    }
}

/// Renders records as a bulleted PDF list, one bullet per record.
pub struct DocumentListRenderer<R> {
    schema: Schema<R>,
    records: Arc<[R]>,
}

impl<R: Record> DocumentListRenderer<R> {
    pub fn new(records: impl Into<Arc<[R]>>) -> Self {
        Self::with_schema(R::schema(), records)
    }
}

impl<R> DocumentListRenderer<R> {
    pub fn with_schema(schema: Schema<R>, records: impl Into<Arc<[R]>>) -> Self {
        Self {
            schema,
            records: records.into(),
        }
    }

    pub fn list(&self, records: &[R]) -> BulletList {
        BulletList::from_records(&self.schema, records)
    }

    pub fn render_records(&self, records: &[R]) -> Vec<u8> {
        generate_pdf_list(self.schema.type_name(), &self.list(records))
    }
}

impl<R> Render for DocumentListRenderer<R> {
    fn format(&self) -> ExportFormat {
        ExportFormat::Pdf
    }

    fn file_name(&self) -> String {
        self.schema.file_name(ExportFormat::Pdf.extension())
    }

    fn render(&self) -> Result<RenderedOutput, RenderError> {
        Ok(RenderedOutput {
            file_name: self.file_name(),
            bytes: self.render_records(&self.records),
        })
    }
}
