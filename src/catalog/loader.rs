//! Catalog lifecycle: single-flight load, then immutable fuzzy lookup.

use std::sync::{Arc, Condvar, Mutex, MutexGuard};

use crate::search::FuzzyIndex;

use super::csv::CsvTable;
use super::record::{ColumnMap, DrugRecord};
use super::source::DatasetSource;
use super::CatalogError;

/// Match threshold on the 0–1 score scale (0 = exact).
const SIMILARITY_THRESHOLD: f64 = 0.4;
/// Queries shorter than this yield no matches.
const MIN_QUERY_LEN: usize = 2;
/// Presentation limit for drug search results.
const MAX_RESULTS: usize = 50;

/// The loaded collection plus its index. Immutable once built.
struct LoadedCatalog {
    records: Vec<DrugRecord>,
    index: FuzzyIndex,
}

enum LoadState {
    NotLoaded,
    Loading,
    Ready(Arc<LoadedCatalog>),
}

/// The drug catalog: owns the record collection and its fuzzy index.
///
/// `ensure_loaded` is idempotent and single-flight: the first caller
/// performs the fetch/parse while concurrent callers block on the same
/// in-flight load and observe its outcome. A failed load resets the
/// state so the next call retries from scratch.
pub struct DrugCatalog {
    source: Box<dyn DatasetSource>,
    state: Mutex<LoadState>,
    loaded: Condvar,
}

impl DrugCatalog {
    pub fn new(source: Box<dyn DatasetSource>) -> Self {
        Self {
            source,
            state: Mutex::new(LoadState::NotLoaded),
            loaded: Condvar::new(),
        }
    }

    /// Load the dataset if it has not been loaded yet.
    ///
    /// Returns `Ok(true)` once the catalog is ready and `Ok(false)` when
    /// the source is unavailable in this environment (silent no-op).
    pub fn ensure_loaded(&self) -> Result<bool, CatalogError> {
        let mut state = lock(&self.state);
        loop {
            match &*state {
                LoadState::Ready(_) => return Ok(true),
                LoadState::NotLoaded => {
                    if !self.source.is_available() {
                        tracing::debug!(
                            source = %self.source.describe(),
                            "dataset source unavailable, skipping load"
                        );
                        return Ok(false);
                    }
                    *state = LoadState::Loading;
                    break;
                }
                // Another caller owns the in-flight load; wait for it.
                LoadState::Loading => {}
            }
            state = match self.loaded.wait(state) {
                Ok(guard) => guard,
                Err(poisoned) => poisoned.into_inner(),
            };
        }
        drop(state);

        let outcome = self.load();
        let mut state = lock(&self.state);
        match outcome {
            Ok(catalog) => {
                tracing::info!(
                    records = catalog.records.len(),
                    source = %self.source.describe(),
                    "drug catalog loaded"
                );
                *state = LoadState::Ready(Arc::new(catalog));
                self.loaded.notify_all();
                Ok(true)
            }
            Err(e) => {
                // Not cached as failed: the next call retries the load.
                *state = LoadState::NotLoaded;
                self.loaded.notify_all();
                tracing::error!(error = %e, "drug dataset load failed");
                Err(e)
            }
        }
    }

    /// Whether the catalog is ready to answer queries.
    pub fn is_loaded(&self) -> bool {
        matches!(&*lock(&self.state), LoadState::Ready(_))
    }

    /// Number of records, zero before load.
    pub fn len(&self) -> usize {
        match &*lock(&self.state) {
            LoadState::Ready(catalog) => catalog.records.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Rank records against a free-text query, best match first.
    ///
    /// Never panics: before the catalog is loaded this logs a warning
    /// and returns an empty list.
    pub fn search(&self, query: &str) -> Vec<DrugRecord> {
        let catalog = match &*lock(&self.state) {
            LoadState::Ready(catalog) => Arc::clone(catalog),
            _ => {
                tracing::warn!("drug search before catalog load, returning no results");
                return Vec::new();
            }
        };

        catalog
            .index
            .search(query)
            .into_iter()
            .take(MAX_RESULTS)
            .map(|hit| catalog.records[hit.index].clone())
            .collect()
    }

    fn load(&self) -> Result<LoadedCatalog, CatalogError> {
        let text = self.source.fetch()?;
        let table = CsvTable::parse(&text)?;
        let columns = ColumnMap::resolve(&table)?;

        let mut records = Vec::with_capacity(table.row_count());
        let mut index = FuzzyIndex::new(SIMILARITY_THRESHOLD, MIN_QUERY_LEN);
        for row in 0..table.row_count() {
            let record = columns.record(&table, row);
            index.insert(&record.name);
            records.push(record);
        }

        Ok(LoadedCatalog { records, index })
    }
}

fn lock<'a, T>(mutex: &'a Mutex<T>) -> MutexGuard<'a, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
