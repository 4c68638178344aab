//! LLM gateway adapter.
//!
//! Every AI-backed capability (assistant chat, package analysis,
//! medicine lookup, bundle translation, emergency summary) goes through
//! a declared contract: typed input, prompt template, and a typed output
//! parsed out of the model's reply. The model itself is an external
//! collaborator behind the [`LlmClient`] trait; replies are treated as
//! untyped blobs until they survive schema validation.

pub mod assistant;
pub mod client;
pub mod lookup;
pub mod package;
pub mod parser;
pub mod prompts;
pub mod stream;
pub mod summarize;
pub mod translate;

pub use assistant::{ask, ask_streaming};
pub use client::{HttpLlmClient, LlmClient, MockLlmClient};
pub use lookup::{get_medicine_info, MedicineInfo};
pub use package::{analyze_package, PackageAnalysis};
pub use stream::StreamHandle;
pub use summarize::summarize_emergency_info;
pub use translate::{translate_bundle, BundleSection, TranslatedSection};

use thiserror::Error;

use crate::content;
use crate::language::Language;

#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Model endpoint unreachable at {0}")]
    Connection(String),

    #[error("Request timed out after {0}s")]
    Timeout(u64),

    #[error("HTTP client error: {0}")]
    HttpClient(String),

    #[error("Model endpoint returned error (status {status}): {body}")]
    Service { status: u16, body: String },

    #[error("Invalid model response: {0}")]
    InvalidResponse(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl GatewayError {
    /// The localized, generic message shown to the user.
    ///
    /// Raw diagnostic detail never reaches the end user; validation
    /// failures read the same as service failures.
    pub fn user_message(&self, lang: Language) -> &'static str {
        content::generic_error_message(lang)
    }
}
