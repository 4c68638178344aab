//! Conversational assistant capability.

use std::sync::Arc;

use crate::language::Language;

use super::client::LlmClient;
use super::prompts::{build_assistant_prompt, safety_disclaimer, ASSISTANT_SYSTEM_PROMPT};
use super::stream::StreamHandle;
use super::GatewayError;

/// Single-shot assistant reply.
pub fn ask<C: LlmClient + ?Sized>(
    client: &C,
    query: &str,
    lang: Language,
) -> Result<String, GatewayError> {
    let prompt = build_assistant_prompt(query, lang);
    let reply = client.generate(ASSISTANT_SYSTEM_PROMPT, &prompt)?;
    Ok(ensure_disclaimer(reply, lang))
}

/// Streamed assistant reply.
///
/// Chunks arrive on the returned handle as the model produces them.
/// If the model omitted the disclaimer, it is sent as a final chunk so
/// the streamed text and the finished text agree.
pub fn ask_streaming(
    client: Arc<dyn LlmClient>,
    query: &str,
    lang: Language,
) -> StreamHandle {
    let prompt = build_assistant_prompt(query, lang);
    StreamHandle::spawn(move |tx, cancel| {
        let text = client.generate_streaming(ASSISTANT_SYSTEM_PROMPT, &prompt, tx.clone(), &cancel)?;
        let disclaimer = safety_disclaimer(lang);
        if text.trim_end().ends_with(disclaimer) {
            return Ok(text);
        }
        let suffix = format!("\n\n{disclaimer}");
        let _ = tx.send(suffix.clone());
        Ok(text + &suffix)
    })
}

/// Append the fixed disclaimer when the model left it out.
fn ensure_disclaimer(reply: String, lang: Language) -> String {
    let disclaimer = safety_disclaimer(lang);
    if reply.trim_end().ends_with(disclaimer) {
        reply
    } else {
        format!("{reply}\n\n{disclaimer}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gateway::client::MockLlmClient;

    #[test]
    fn reply_without_disclaimer_gets_one_appended() {
        let client = MockLlmClient::new("Amoxicillin is an antibiotic.");
        let reply = ask(&client, "What is amoxicillin?", Language::En).unwrap();
        assert!(reply.starts_with("Amoxicillin is an antibiotic."));
        assert!(reply.trim_end().ends_with(safety_disclaimer(Language::En)));
    }

    #[test]
    fn existing_disclaimer_is_not_duplicated() {
        let canned = format!("Some answer.\n\n{}", safety_disclaimer(Language::Am));
        let client = MockLlmClient::new(&canned);
        let reply = ask(&client, "ጥያቄ", Language::Am).unwrap();
        assert_eq!(reply.matches(safety_disclaimer(Language::Am)).count(), 1);
    }

    #[test]
    fn service_failure_propagates() {
        let client = MockLlmClient::failing();
        assert!(matches!(
            ask(&client, "anything", Language::En),
            Err(GatewayError::Connection(_))
        ));
    }

    #[test]
    fn streamed_reply_ends_with_disclaimer() {
        let client: Arc<dyn LlmClient> = Arc::new(MockLlmClient::new("Short answer."));
        let handle = ask_streaming(client, "question", Language::Om);
        let streamed: String = handle.chunks().collect();
        let full = handle.finish().unwrap();
        assert_eq!(streamed, full);
        assert!(full.trim_end().ends_with(safety_disclaimer(Language::Om)));
    }
}
