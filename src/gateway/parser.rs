//! Reply parsing: untyped blob in, validated typed output out.

use serde::de::DeserializeOwned;

use super::GatewayError;

/// Extract the JSON payload from a model reply.
///
/// Prefers a fenced ```json block; a bare reply that is itself a JSON
/// object is also accepted. Anything else is an invalid response.
pub fn extract_json_block(response: &str) -> Result<String, GatewayError> {
    if let Some(fence_start) = response.find("```json") {
        let content_start = fence_start + 7;
        let fence_end = response[content_start..].find("```").ok_or_else(|| {
            GatewayError::InvalidResponse("unclosed JSON block in reply".into())
        })?;
        return Ok(response[content_start..content_start + fence_end]
            .trim()
            .to_string());
    }

    let trimmed = response.trim();
    if trimmed.starts_with('{') {
        return Ok(trimmed.to_string());
    }

    Err(GatewayError::InvalidResponse(
        "no JSON object in reply".into(),
    ))
}

/// Parse a model reply into a typed output.
pub fn parse_reply<T: DeserializeOwned>(response: &str) -> Result<T, GatewayError> {
    let json = extract_json_block(response)?;
    serde_json::from_str(&json)
        .map_err(|e| GatewayError::InvalidResponse(format!("malformed reply JSON: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize, Debug, PartialEq)]
    struct Reply {
        name: String,
    }

    #[test]
    fn fenced_block_is_extracted() {
        let response = "Here you go:\n```json\n{\"name\": \"Amoxicillin\"}\n```\nDone.";
        let parsed: Reply = parse_reply(response).unwrap();
        assert_eq!(parsed.name, "Amoxicillin");
    }

    #[test]
    fn bare_json_object_is_accepted() {
        let parsed: Reply = parse_reply("  {\"name\": \"Aspirin\"}  ").unwrap();
        assert_eq!(parsed.name, "Aspirin");
    }

    #[test]
    fn prose_reply_is_invalid() {
        let err = parse_reply::<Reply>("Sorry, I cannot help with that.").unwrap_err();
        assert!(matches!(err, GatewayError::InvalidResponse(_)));
    }

    #[test]
    fn unclosed_fence_is_invalid() {
        let err = extract_json_block("```json\n{\"name\": \"x\"}").unwrap_err();
        assert!(matches!(err, GatewayError::InvalidResponse(_)));
    }

    #[test]
    fn malformed_json_is_invalid() {
        let err = parse_reply::<Reply>("```json\n{not json}\n```").unwrap_err();
        assert!(matches!(err, GatewayError::InvalidResponse(_)));
    }

    #[test]
    fn missing_required_field_is_invalid() {
        let err = parse_reply::<Reply>("{\"other\": 1}").unwrap_err();
        assert!(matches!(err, GatewayError::InvalidResponse(_)));
    }
}
