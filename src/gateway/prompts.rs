//! Prompt templates for every gateway capability.
//!
//! The assistant's safety contract lives in instruction text: replies
//! must never contain specific dosages and must end with the fixed
//! disclaimer for the active language. The adapter re-checks the
//! disclaimer on the way out (see `assistant::ensure_disclaimer`)
//! because instruction text alone cannot be trusted.

use crate::language::Language;

use super::translate::BundleSection;

pub const ASSISTANT_SYSTEM_PROMPT: &str = r#"You are IDA, a health information assistant for users in Ethiopia. You help people understand medications and general health topics. You are NOT a doctor.

ABSOLUTE RULES — NO EXCEPTIONS:
1. NEVER state a specific drug dosage, dose schedule, or quantity to take.
2. NEVER diagnose, prescribe, or recommend starting or stopping a medication.
3. Answer in the language requested below, and only that language.
4. Use plain, patient-friendly wording. Explain medical terms simply.
5. If you do not know, say so clearly instead of guessing.
6. End every reply with the exact safety disclaimer you are given, on its own line, unchanged."#;

/// Fixed safety disclaimer per language. Appended verbatim to every
/// assistant reply.
pub fn safety_disclaimer(lang: Language) -> &'static str {
    match lang {
        Language::En => {
            "This information is for educational purposes only. Always consult a doctor or pharmacist before taking any medication."
        }
        Language::Am => {
            "ይህ መረጃ ለትምህርት ብቻ ነው። ማንኛውንም መድሃኒት ከመውሰድዎ በፊት ሁልጊዜ ሐኪም ወይም ፋርማሲስት ያማክሩ።"
        }
        Language::Om => {
            "Odeeffannoon kun barnootaaf qofa. Qoricha kamiyyuu osoo hin fudhatin dura yeroo hunda ogeessa fayyaa yookiin ogeessa qorichaa mariʼadhaa."
        }
    }
}

/// Conversational assistant prompt.
pub fn build_assistant_prompt(query: &str, lang: Language) -> String {
    format!(
        "Respond in {language}.\n\nUser question: {query}\n\nEnd your reply with this exact disclaimer:\n{disclaimer}",
        language = lang.display_name(),
        query = query,
        disclaimer = safety_disclaimer(lang),
    )
}

/// Medicine-package image analysis prompt.
pub fn build_package_prompt(image_data: &str) -> String {
    format!(
        r#"Analyze the medicine package in the attached image and reply with a single fenced JSON block:

```json
{{"name": "<product name>", "pros": "<benefits>", "cons": "<drawbacks>", "usage": "<what it is used for>"}}
```

All four fields are required strings. Do not include dosage amounts.

IMAGE (base64): {image_data}"#
    )
}

/// Medicine lookup prompt.
pub fn build_lookup_prompt(medicine_name: &str) -> String {
    format!(
        r#"The user asked about "{medicine_name}". If this is a real medicine, describe it; if it is not a medicine, set isMedicine to false and leave every other field empty. Reply with a single fenced JSON block:

```json
{{"isMedicine": true, "whatItIs": "", "usage": "", "foodInstructions": "", "timeTaken": "", "sideEffects": [], "localSummaryAmharic": "", "localSummaryOromo": ""}}
```

Do not include specific dosages anywhere. localSummaryAmharic must be written in Amharic and localSummaryOromo in Afaan Oromo."#
    )
}

/// Bundle translation prompt.
pub fn build_translation_prompt(sections: &[BundleSection], target: Language) -> String {
    // Input sections are embedded as JSON so titles/content survive intact.
    let payload = serde_json::to_string(sections).unwrap_or_default();
    format!(
        r#"Translate each section below into {language}. Keep medical meaning exact; translate nothing else. Reply with a single fenced JSON block:

```json
{{"translatedSections": [{{"translatedTitle": "", "translatedContent": ""}}]}}
```

The array must have exactly one entry per input section, in the same order.

SECTIONS: {payload}"#,
        language = target.display_name(),
    )
}

/// Emergency-summary prompt (QR payload generation).
pub fn build_summary_prompt(raw_text: &str) -> String {
    format!(
        r#"Condense the emergency medical information below into a compact single-line JSON object using ONLY these keys: "N" (name), "B" (blood type), "A" (allergies), "M" (medications), "C" (conditions). The whole object must be at most 200 characters. Reply with a single fenced JSON block:

```json
{{"summarizedJson": "{{\"N\":\"...\",\"B\":\"...\",\"A\":\"...\",\"M\":\"...\",\"C\":\"...\"}}"}}
```

INFORMATION:
{raw_text}"#
    )
}
