//! Parsing of per-service JSON documents.
//!
//! Each file under `<data dir>/services/` holds one service. Segments are a
//! discriminated union on `segmentType`; the discriminator is read first and
//! the segment body is then decoded into the matching variant.

use std::path::Path;

use serde::Deserialize;
use serde_json::Value;
use tracing::warn;

use super::error::CatalogError;
use super::model::{
    Direction, FixedSegment, Segment, SegmentCondition, ServiceDefinition, ShuttleSegment,
    StopRef, ValidityPeriod,
};

/// The unparsed text of one service document.
#[derive(Debug, Clone)]
pub struct RawDocument {
    /// Where the document came from, for error messages (usually a file name).
    pub name: String,
    pub contents: String,
}

impl RawDocument {
    pub fn new(name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            contents: contents.into(),
        }
    }
}

/// Top-level shape of a service document, segments still undecoded.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ServiceDocument {
    id: String,
    name: String,
    from: StopRef,
    to: StopRef,
    direction: Direction,
    #[serde(default)]
    validity_periods: Option<Vec<ValidityPeriod>>,
    segments: Vec<Value>,
}

/// Parse one document into a service definition.
pub fn parse_document(document: &RawDocument) -> Result<ServiceDefinition, CatalogError> {
    let parsed: ServiceDocument = serde_json::from_str(&document.contents)
        .map_err(|e| CatalogError::malformed(&document.name, e.to_string()))?;

    if parsed.segments.is_empty() {
        return Err(CatalogError::malformed(
            &document.name,
            format!("service {} has no segments", parsed.id),
        ));
    }

    let segments = parsed
        .segments
        .into_iter()
        .enumerate()
        .map(|(index, raw)| {
            parse_segment(raw).map_err(|reason| {
                CatalogError::malformed(&document.name, format!("segment {index}: {reason}"))
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    for segment in &segments {
        if let SegmentCondition::Unrecognized(kind) = segment.condition() {
            warn!(
                document = %document.name,
                service = %parsed.id,
                segment_type = segment.kind(),
                condition_type = %kind,
                "unrecognized segment condition type; segment will match every date"
            );
        }
    }

    Ok(ServiceDefinition {
        id: parsed.id,
        name: parsed.name,
        from: parsed.from,
        to: parsed.to,
        direction: parsed.direction,
        validity_periods: parsed.validity_periods.unwrap_or_default(),
        segments,
    })
}

/// Decode one segment according to its `segmentType` discriminator.
fn parse_segment(raw: Value) -> Result<Segment, String> {
    let kind = raw
        .get("segmentType")
        .and_then(Value::as_str)
        .map(str::to_string);

    match kind.as_deref() {
        Some("fixed") => serde_json::from_value::<FixedSegment>(raw)
            .map(Segment::Fixed)
            .map_err(|e| e.to_string()),
        Some("shuttle") => {
            let shuttle: ShuttleSegment = serde_json::from_value(raw).map_err(|e| e.to_string())?;
            if shuttle.interval_range.min > shuttle.interval_range.max {
                return Err(format!(
                    "interval range min {} exceeds max {}",
                    shuttle.interval_range.min, shuttle.interval_range.max
                ));
            }
            Ok(Segment::Shuttle(shuttle))
        }
        Some(other) => Err(format!("unknown segment type {other:?}")),
        None => Err("missing segmentType".to_string()),
    }
}

/// Read every `*.json` file in `<data_dir>/services`, ordered by file name.
///
/// Subdirectories and other files are ignored.
pub fn read_service_documents(data_dir: &Path) -> Result<Vec<RawDocument>, CatalogError> {
    let services_dir = data_dir.join("services");

    let mut paths = Vec::new();
    for entry in std::fs::read_dir(&services_dir).map_err(read_error(&services_dir))? {
        let path = entry.map_err(read_error(&services_dir))?.path();
        if path.is_file() && path.extension().and_then(|s| s.to_str()) == Some("json") {
            paths.push(path);
        }
    }
    paths.sort();

    paths
        .into_iter()
        .map(|path| {
            let contents = std::fs::read_to_string(&path).map_err(read_error(&path))?;
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            Ok(RawDocument::new(name, contents))
        })
        .collect()
}

fn read_error(path: &Path) -> impl FnOnce(std::io::Error) -> CatalogError {
    let path = path.to_path_buf();
    move |source| CatalogError::Read { path, source }
}
