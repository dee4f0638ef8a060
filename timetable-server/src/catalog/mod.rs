//! Service catalog: route definitions with their calendar rules.
//!
//! The catalog is built from one JSON document per service and is
//! immutable afterwards. Building is all-or-nothing: schedule answers depend
//! on a complete catalog, so a single malformed document fails the build.

mod document;
mod error;
mod loader;
mod model;
mod service_catalog;

pub use document::{RawDocument, parse_document, read_service_documents};
pub use error::CatalogError;
pub use loader::CatalogLoader;
pub use model::{
    Direction, FixedSegment, IntervalRange, Segment, SegmentCondition, ServiceDefinition,
    ShuttleSegment, StopRef, TimePair, ValidityPeriod,
};
pub use service_catalog::ServiceCatalog;
