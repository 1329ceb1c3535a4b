use serde::{Deserialize, Serialize};

use crate::error::RenderError;

/// Output formats a renderer can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    Xlsx,
    Pdf,
}

impl ExportFormat {
    /// Conventional file extension, without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Xlsx => "xlsx",
            Self::Pdf => "pdf",
        }
    }
}

/// A named byte buffer fresh from a renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedOutput {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Something that turns its bound records into a document.
///
/// `file_name` is part of the renderer's identity and must not depend on
/// rendering having happened.
pub trait Render {
    fn format(&self) -> ExportFormat;

    fn file_name(&self) -> String;

    /// Produce a fresh buffer. Never cached.
    fn render(&self) -> Result<RenderedOutput, RenderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extensions() {
        assert_eq!(ExportFormat::Xlsx.extension(), "xlsx");
        assert_eq!(ExportFormat::Pdf.extension(), "pdf");
    }

    #[test]
    fn test_format_serde_lowercase() {
        let json = serde_json::to_string(&[ExportFormat::Xlsx, ExportFormat::Pdf]).unwrap();
        assert_eq!(json, r#"["xlsx","pdf"]"#);
        let back: Vec<ExportFormat> = serde_json::from_str(&json).unwrap();
        assert_eq!(back, vec![ExportFormat::Xlsx, ExportFormat::Pdf]);
    }
}
