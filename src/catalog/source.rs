//! Where the drug dataset comes from.
//!
//! The loader talks to a `DatasetSource` so the fetch transport can be
//! swapped (HTTP resource, bundled file, mock in tests). `is_available`
//! is the guard that turns `ensure_loaded` into a no-op in environments
//! without access to the resource.

use std::path::PathBuf;

use super::CatalogError;

/// A fetchable location of the raw CSV dataset.
pub trait DatasetSource: Send + Sync {
    /// Whether the resource can be reached from this environment.
    fn is_available(&self) -> bool;

    /// Fetch the raw CSV text.
    fn fetch(&self) -> Result<String, CatalogError>;

    /// Human-readable location, for logs.
    fn describe(&self) -> String;
}

/// Dataset served over HTTP.
pub struct HttpDatasetSource {
    url: String,
    client: reqwest::blocking::Client,
    timeout_secs: u64,
}

impl HttpDatasetSource {
    pub fn new(url: &str, timeout_secs: u64) -> Result<Self, CatalogError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| CatalogError::HttpClient(e.to_string()))?;
        Ok(Self {
            url: url.to_string(),
            client,
            timeout_secs,
        })
    }
}

impl DatasetSource for HttpDatasetSource {
    fn is_available(&self) -> bool {
        // Reachability is only known at fetch time; the HTTP source is
        // always eligible and failures surface as fetch errors.
        true
    }

    fn fetch(&self) -> Result<String, CatalogError> {
        let response = self.client.get(&self.url).send().map_err(|e| {
            if e.is_connect() {
                CatalogError::Connection(self.url.clone())
            } else if e.is_timeout() {
                CatalogError::Timeout(self.timeout_secs)
            } else {
                CatalogError::HttpClient(e.to_string())
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(CatalogError::FetchFailed {
                status: status.as_u16(),
                body,
            });
        }

        response
            .text()
            .map_err(|e| CatalogError::HttpClient(e.to_string()))
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// Dataset read from a local file.
pub struct FileDatasetSource {
    path: PathBuf,
}

impl FileDatasetSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The dataset at its default location under the app data dir.
    pub fn default_location() -> Self {
        Self::new(crate::config::default_dataset_path())
    }
}

impl DatasetSource for FileDatasetSource {
    fn is_available(&self) -> bool {
        self.path.is_file()
    }

    fn fetch(&self) -> Result<String, CatalogError> {
        Ok(std::fs::read_to_string(&self.path)?)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
