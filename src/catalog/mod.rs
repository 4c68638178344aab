//! Drug catalog: dataset loading, parsing, and fuzzy lookup.
//!
//! The catalog owns the `DrugRecord` collection and its fuzzy index.
//! It is an explicit object with a `new` → `ensure_loaded` → query
//! lifecycle; callers only ever receive cloned records.

pub mod csv;
pub mod loader;
pub mod record;
pub mod source;

pub use loader::DrugCatalog;
pub use record::DrugRecord;
pub use source::{DatasetSource, FileDatasetSource, HttpDatasetSource};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Dataset endpoint unreachable at {0}")]
    Connection(String),

    #[error("Dataset fetch timed out after {0}s")]
    Timeout(u64),

    #[error("Dataset fetch failed (status {status}): {body}")]
    FetchFailed { status: u16, body: String },

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Dataset is empty")]
    EmptyDataset,

    #[error("Dataset is missing required column: {0}")]
    MissingColumn(String),

    #[error("Malformed CSV at line {line}: {reason}")]
    MalformedCsv { line: usize, reason: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
