//! Stop directory error types.

use std::path::PathBuf;

/// Errors that can occur when loading the stop directory.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// File could not be read
    #[error("failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File is not the expected JSON array
    #[error("failed to parse {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
