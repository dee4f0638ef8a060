//! Timetable assembly.
//!
//! Turns catalog services into per-date departure rows for a stop or a
//! stop group.

mod builder;
mod lookup;
mod resolver;
mod row;

pub use builder::{TimetableBuilder, TimetableError};
pub use lookup::{GroupLookup, StopLookup};
pub use resolver::resolve_origin_segments;
pub use row::{Coordinates, Destination, FixedRow, ShuttleRow, Timetable, TimetableRow, TimetableTarget};
