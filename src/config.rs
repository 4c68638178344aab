use std::path::PathBuf;

use tracing_subscriber::EnvFilter;

/// Application-level constants
pub const APP_NAME: &str = "IDA";
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// File name of the client-state database inside the app data dir.
pub const STORE_FILE: &str = "ida.db";

/// File name of the drug dataset inside the app data dir.
pub const DATASET_FILE: &str = "drugs.csv";

/// Default inference endpoint for the LLM gateway.
pub const DEFAULT_LLM_BASE_URL: &str = "http://localhost:11434";
pub const DEFAULT_LLM_MODEL: &str = "medgemma";
pub const DEFAULT_LLM_TIMEOUT_SECS: u64 = 300;

/// Get the application data directory
/// ~/IDA/ on all platforms (user-visible, easy to find and back up)
pub fn app_data_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_NAME)
}

/// Default location of the drug dataset CSV.
pub fn default_dataset_path() -> PathBuf {
    app_data_dir().join(DATASET_FILE)
}

/// Default tracing filter when RUST_LOG is unset.
pub fn default_log_filter() -> &'static str {
    "ida_core=info"
}

/// Initialize tracing with the env filter, falling back to the default.
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_log_filter())),
        )
        .try_init();
}
