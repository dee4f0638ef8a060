//! The immutable service catalog.

use std::collections::HashSet;

use tracing::debug;

use crate::domain::StopId;

use super::document::{RawDocument, parse_document};
use super::error::CatalogError;
use super::model::ServiceDefinition;

/// All service definitions known to the server, in declaration order.
///
/// A catalog is built once and never mutated afterwards; share it behind an
/// `Arc` for concurrent readers.
#[derive(Debug, Clone, Default)]
pub struct ServiceCatalog {
    services: Vec<ServiceDefinition>,
}

impl ServiceCatalog {
    /// Build a catalog from already-parsed services.
    ///
    /// Fails if two services share an id or a service has no segments.
    pub fn new(services: Vec<ServiceDefinition>) -> Result<Self, CatalogError> {
        let mut seen = HashSet::new();
        for service in &services {
            if service.segments.is_empty() {
                return Err(CatalogError::malformed(
                    &service.id,
                    format!("service {} has no segments", service.id),
                ));
            }
            if !seen.insert(service.id.as_str()) {
                return Err(CatalogError::malformed(
                    &service.id,
                    format!("duplicate service id {}", service.id),
                ));
            }
        }

        Ok(Self { services })
    }

    /// Parse raw documents and build a catalog.
    ///
    /// Any malformed document fails the whole build.
    pub fn build<I>(documents: I) -> Result<Self, CatalogError>
    where
        I: IntoIterator<Item = RawDocument>,
    {
        let services = documents
            .into_iter()
            .map(|doc| {
                let service = parse_document(&doc)?;
                debug!(
                    document = %doc.name,
                    service = %service.id,
                    segments = service.segments.len(),
                    "parsed service document"
                );
                Ok(service)
            })
            .collect::<Result<Vec<_>, CatalogError>>()?;

        Self::new(services)
    }

    /// All services, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &ServiceDefinition> {
        self.services.iter()
    }

    /// Services that start or end at `stop`.
    pub fn entries_from_or_to(&self, stop: StopId) -> impl Iterator<Item = &ServiceDefinition> {
        self.services
            .iter()
            .filter(move |s| s.from.stop_id == stop || s.to.stop_id == stop)
    }

    /// Services departing from `stop`.
    pub fn entries_from(&self, stop: StopId) -> impl Iterator<Item = &ServiceDefinition> {
        self.services.iter().filter(move |s| s.from.stop_id == stop)
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }
}
