//! Domain types shared by the catalog, the stop directory and the web layer.
//!
//! Identifiers are newtypes so a stop id can never be passed where a group id
//! is expected. Times are validated at construction.

mod stop;
mod time;

pub use stop::{BusStop, GroupId, StopGroup, StopId};
pub use time::{ClockTime, TimeError};
