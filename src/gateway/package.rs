//! Medicine-package image analysis capability.

use base64::Engine;
use serde::{Deserialize, Serialize};

use super::client::LlmClient;
use super::parser::parse_reply;
use super::prompts::build_package_prompt;
use super::GatewayError;

/// Decoded image payloads above this size are rejected up front.
const MAX_IMAGE_BYTES: usize = 10 * 1024 * 1024;

/// Structured result of analyzing a medicine package photo.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PackageAnalysis {
    pub name: String,
    pub pros: String,
    pub cons: String,
    pub usage: String,
}

/// Analyze a base64-encoded package image.
///
/// Accepts either a raw base64 string or a `data:image/...;base64,`
/// URL. Invalid encoding is an input error and never reaches the model.
pub fn analyze_package<C: LlmClient + ?Sized>(
    client: &C,
    image_data: &str,
) -> Result<PackageAnalysis, GatewayError> {
    let payload = strip_data_url(image_data.trim());
    if payload.is_empty() {
        return Err(GatewayError::InvalidInput("empty image payload".into()));
    }

    let decoded = base64::engine::general_purpose::STANDARD
        .decode(payload)
        .map_err(|e| GatewayError::InvalidInput(format!("image is not valid base64: {e}")))?;
    if decoded.len() > MAX_IMAGE_BYTES {
        return Err(GatewayError::InvalidInput(format!(
            "image too large: {} bytes",
            decoded.len()
        )));
    }

    let reply = client.generate("", &build_package_prompt(payload))?;
    parse_reply(&reply)
}

/// Drop the `data:<mime>;base64,` prefix when present.
fn strip_data_url(input: &str) -> &str {
    if input.starts_with("data:") {
        match input.find(',') {
            Some(comma) => &input[comma + 1..],
            None => input,
        }
    } else {
        input
    }
}
