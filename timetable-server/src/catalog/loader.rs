//! One-time catalog initialization.
//!
//! The catalog is built at most once per loader, even when several callers
//! ask for it at the same time. Callers either wait for the build in
//! progress or read the finished snapshot; nobody sees a partial catalog.

use std::path::Path;
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use tracing::info;

use super::document::read_service_documents;
use super::error::CatalogError;
use super::service_catalog::ServiceCatalog;

/// Process-lifetime holder for the service catalog.
///
/// Lifecycle is `Unloaded -> Loaded`; once loaded the catalog is never
/// replaced. A failed build leaves the loader unloaded.
#[derive(Debug, Default)]
pub struct CatalogLoader {
    catalog: OnceLock<Arc<ServiceCatalog>>,
    /// Held for the duration of a build so only one runs at a time.
    build_gate: Mutex<()>,
}

impl CatalogLoader {
    pub const fn new() -> Self {
        Self {
            catalog: OnceLock::new(),
            build_gate: Mutex::new(()),
        }
    }

    /// The catalog, if it has been built.
    pub fn get(&self) -> Option<Arc<ServiceCatalog>> {
        self.catalog.get().cloned()
    }

    pub fn is_loaded(&self) -> bool {
        self.catalog.get().is_some()
    }

    /// Return the catalog, running `build` first if nothing is loaded yet.
    ///
    /// `build` runs at most once across all successful calls. Errors are
    /// returned to the caller that ran the build and nothing is cached.
    pub fn get_or_build<F>(&self, build: F) -> Result<Arc<ServiceCatalog>, CatalogError>
    where
        F: FnOnce() -> Result<ServiceCatalog, CatalogError>,
    {
        if let Some(catalog) = self.catalog.get() {
            return Ok(Arc::clone(catalog));
        }

        // The gate protects no data, so a panic in another builder is harmless.
        let _gate = self
            .build_gate
            .lock()
            .unwrap_or_else(PoisonError::into_inner);

        if let Some(catalog) = self.catalog.get() {
            return Ok(Arc::clone(catalog));
        }

        let catalog = Arc::new(build()?);
        info!(services = catalog.len(), "service catalog loaded");
        Ok(Arc::clone(self.catalog.get_or_init(|| catalog)))
    }

    /// Load the catalog from `<data_dir>/services` unless already loaded.
    pub fn load_from_dir(&self, data_dir: &Path) -> Result<Arc<ServiceCatalog>, CatalogError> {
        self.get_or_build(|| ServiceCatalog::build(read_service_documents(data_dir)?))
    }
}
