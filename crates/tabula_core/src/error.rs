use std::path::PathBuf;

use tabula_docs::RenderError;
use thiserror::Error;

/// Failure of an export command or the invoker driving it.
#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Render error: {0}")]
    Render(#[from] RenderError),

    #[error("I/O error at {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Archive error: {0}")]
    Archive(String),

    #[error("Precondition failed: {0}")]
    Precondition(String),
}

impl ExportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Returns a user-friendly message (hides internal details).
    pub fn user_message(&self) -> String {
        match self {
            Self::Render(e) => format!("Could not render the document: {e}"),
            Self::Io { path, .. } => format!(
                "Could not write {}. Check disk space and permissions.",
                path.display()
            ),
            Self::Archive(msg) => format!("Could not build the archive: {msg}"),
            Self::Precondition(msg) => format!("Nothing to do: {msg}"),
        }
    }
}

impl From<zip::result::ZipError> for ExportError {
    fn from(e: zip::result::ZipError) -> Self {
        Self::Archive(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_names_path() {
        let err = ExportError::io(
            "out/Product.pdf",
            std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("out/Product.pdf"));
        assert!(err.user_message().contains("permissions"));
    }

    #[test]
    fn test_render_error_converts() {
        let err: ExportError = RenderError::EmptyInput {
            type_name: "Product".into(),
        }
        .into();
        assert!(matches!(err, ExportError::Render(_)));
        assert!(err.user_message().contains("Product"));
    }

    #[test]
    fn test_precondition_message() {
        let err = ExportError::Precondition("no command set".into());
        assert_eq!(err.to_string(), "Precondition failed: no command set");
    }
}
