//! Application state for the web layer.

use std::sync::Arc;

use chrono::NaiveDate;
use tracing::debug;

use crate::cache::{TimetableCache, TimetableCacheConfig};
use crate::catalog::ServiceCatalog;
use crate::directory::StopDirectory;
use crate::timetable::{Timetable, TimetableBuilder, TimetableError, TimetableTarget};

/// Shared application state.
///
/// Contains all the services needed to handle requests.
#[derive(Clone)]
pub struct AppState {
    /// Loaded service catalog
    pub catalog: Arc<ServiceCatalog>,

    /// Stops and stop groups
    pub directory: Arc<StopDirectory>,

    /// Built timetables
    pub timetables: Arc<TimetableCache>,
}

impl AppState {
    /// Create a new app state.
    pub fn new(
        catalog: Arc<ServiceCatalog>,
        directory: StopDirectory,
        cache_config: &TimetableCacheConfig,
    ) -> Self {
        Self {
            catalog,
            directory: Arc::new(directory),
            timetables: Arc::new(TimetableCache::new(cache_config)),
        }
    }

    /// Timetable for `target` on `date`, from the cache when possible.
    pub async fn timetable(
        &self,
        target: TimetableTarget,
        date: NaiveDate,
    ) -> Result<Arc<Timetable>, TimetableError> {
        let directory = &*self.directory;
        let builder = TimetableBuilder::new(&self.catalog, directory, directory);
        let timetable = self
            .timetables
            .get_or_build(target, date, || builder.build(target, date))
            .await?;
        debug!(
            ?target,
            %date,
            cached = self.timetables.entry_count(),
            "timetable served"
        );
        Ok(timetable)
    }
}
