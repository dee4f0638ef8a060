//! Catalog error types.

use std::path::PathBuf;

/// Errors that abort a catalog build.
///
/// A catalog is either complete or absent; no variant describes a partial
/// result.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The service directory or one of its files could not be read
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A document is structurally invalid or has an unknown segment type
    #[error("malformed catalog document {document}: {reason}")]
    Malformed { document: String, reason: String },
}

impl CatalogError {
    pub(crate) fn malformed(document: impl Into<String>, reason: impl Into<String>) -> Self {
        CatalogError::Malformed {
            document: document.into(),
            reason: reason.into(),
        }
    }
}
