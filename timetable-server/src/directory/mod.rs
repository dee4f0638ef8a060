//! Bus stop and stop group directory.
//!
//! Loaded from two JSON files in the data directory at startup and
//! read-only afterwards. Supplies stop names and coordinates to the
//! timetable builder.

mod error;
mod stops;

pub use error::DirectoryError;
pub use stops::StopDirectory;
