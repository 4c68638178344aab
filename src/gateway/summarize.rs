//! Emergency-summary capability: condensed medical info for QR payloads.

use serde::Deserialize;

use super::client::LlmClient;
use super::parser::parse_reply;
use super::prompts::build_summary_prompt;
use super::GatewayError;

/// Maximum length of the compact payload, in characters.
pub const MAX_SUMMARY_CHARS: usize = 200;

/// The only keys the compact object may carry:
/// name, blood type, allergies, medications, conditions.
const ALLOWED_KEYS: &[&str] = &["N", "B", "A", "M", "C"];

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SummaryReply {
    summarized_json: String,
}

/// Summarize raw emergency medical info into the compact QR payload.
///
/// The payload must be a single-line JSON object of at most 200
/// characters using only the fixed short keys; anything else is an
/// invalid response.
pub fn summarize_emergency_info<C: LlmClient + ?Sized>(
    client: &C,
    raw_text: &str,
) -> Result<String, GatewayError> {
    let raw = raw_text.trim();
    if raw.is_empty() {
        return Err(GatewayError::InvalidInput(
            "no emergency info to summarize".into(),
        ));
    }

    let reply = client.generate("", &build_summary_prompt(raw))?;
    let parsed: SummaryReply = parse_reply(&reply)?;
    validate_payload(&parsed.summarized_json)?;
    Ok(parsed.summarized_json)
}

fn validate_payload(payload: &str) -> Result<(), GatewayError> {
    if payload.chars().count() > MAX_SUMMARY_CHARS {
        return Err(GatewayError::InvalidResponse(format!(
            "summary exceeds {MAX_SUMMARY_CHARS} characters"
        )));
    }
    if payload.contains('\n') {
        return Err(GatewayError::InvalidResponse(
            "summary must be a single line".into(),
        ));
    }

    let value: serde_json::Value = serde_json::from_str(payload)
        .map_err(|e| GatewayError::InvalidResponse(format!("summary is not JSON: {e}")))?;
    let object = value
        .as_object()
        .ok_or_else(|| GatewayError::InvalidResponse("summary is not a JSON object".into()))?;

    for key in object.keys() {
        if !ALLOWED_KEYS.contains(&key.as_str()) {
            return Err(GatewayError::InvalidResponse(format!(
                "summary uses unknown key: {key}"
            )));
        }
    }
    Ok(())
}
