// Record rendering: static schemas, the table model, XLSX and PDF renderers.

pub mod error;
pub mod pdf;
pub mod render;
pub mod schema;
pub mod table;
pub mod xlsx;

pub use error::RenderError;
pub use pdf::{BulletList, DocumentListRenderer};
pub use render::{ExportFormat, Render, RenderedOutput};
pub use schema::{Field, FieldKind, FieldValue, Money, Record, Schema};
pub use table::{Column, Table};
pub use xlsx::TabularRenderer;
