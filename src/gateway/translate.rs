//! Bundle translation capability.

use serde::{Deserialize, Serialize};

use crate::language::Language;

use super::client::LlmClient;
use super::parser::parse_reply;
use super::prompts::build_translation_prompt;
use super::GatewayError;

/// One titled section of content to translate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BundleSection {
    pub title: String,
    pub content: String,
}

/// A translated section, aligned by position with its input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TranslatedSection {
    pub translated_title: String,
    pub translated_content: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct TranslatedBundle {
    translated_sections: Vec<TranslatedSection>,
}

/// Translate a bundle of sections into the target language.
///
/// English short-circuits to an identity mapping without invoking the
/// model. The reply must preserve section count and order; a length
/// mismatch is an invalid response.
pub fn translate_bundle<C: LlmClient + ?Sized>(
    client: &C,
    sections: &[BundleSection],
    target: Language,
) -> Result<Vec<TranslatedSection>, GatewayError> {
    if sections.is_empty() {
        return Ok(Vec::new());
    }

    if target == Language::En {
        return Ok(sections
            .iter()
            .map(|s| TranslatedSection {
                translated_title: s.title.clone(),
                translated_content: s.content.clone(),
            })
            .collect());
    }

    let reply = client.generate("", &build_translation_prompt(sections, target))?;
    let bundle: TranslatedBundle = parse_reply(&reply)?;

    if bundle.translated_sections.len() != sections.len() {
        return Err(GatewayError::InvalidResponse(format!(
            "expected {} translated sections, got {}",
            sections.len(),
            bundle.translated_sections.len()
        )));
    }
    Ok(bundle.translated_sections)
}
