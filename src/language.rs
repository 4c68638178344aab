//! Language resolution for user-facing text.
//!
//! IDA ships in three languages: English, Amharic, and Afaan Oromo.
//! Every piece of localized content carries a mandatory English entry;
//! the other two are optional and fall back to English when absent.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// The fixed set of supported language codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    En,
    Am,
    Om,
}

impl Language {
    /// The two-letter code used on the wire and in persisted state.
    pub fn code(&self) -> &'static str {
        match self {
            Self::En => "en",
            Self::Am => "am",
            Self::Om => "om",
        }
    }

    /// Human-readable name, used in prompts sent to the model.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::En => "English",
            Self::Am => "Amharic",
            Self::Om => "Afaan Oromo",
        }
    }
}

impl Default for Language {
    fn default() -> Self {
        Self::En
    }
}

impl std::fmt::Display for Language {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

impl FromStr for Language {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "en" => Ok(Self::En),
            "am" => Ok(Self::Am),
            "om" => Ok(Self::Om),
            other => Err(format!("Unsupported language code: {other}")),
        }
    }
}

/// A string localized into the supported languages.
///
/// The English entry is required by construction, which guarantees the
/// fallback in [`LocalizedText::get`] always resolves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocalizedText {
    en: String,
    am: Option<String>,
    om: Option<String>,
}

impl LocalizedText {
    /// English-only text.
    pub fn new(en: impl Into<String>) -> Self {
        Self {
            en: en.into(),
            am: None,
            om: None,
        }
    }

    /// Text with all three languages populated.
    pub fn trilingual(
        en: impl Into<String>,
        am: impl Into<String>,
        om: impl Into<String>,
    ) -> Self {
        Self {
            en: en.into(),
            am: Some(am.into()),
            om: Some(om.into()),
        }
    }

    pub fn with_am(mut self, am: impl Into<String>) -> Self {
        self.am = Some(am.into());
        self
    }

    pub fn with_om(mut self, om: impl Into<String>) -> Self {
        self.om = Some(om.into());
        self
    }

    /// Resolve the text for a language, falling back to English when the
    /// requested entry is absent.
    pub fn get(&self, lang: Language) -> &str {
        match lang {
            Language::En => &self.en,
            Language::Am => self.am.as_deref().unwrap_or(&self.en),
            Language::Om => self.om.as_deref().unwrap_or(&self.en),
        }
    }

    /// All populated variants, English first. Used as fuzzy-index keys.
    pub fn variants(&self) -> Vec<&str> {
        let mut out = vec![self.en.as_str()];
        if let Some(am) = &self.am {
            out.push(am);
        }
        if let Some(om) = &self.om {
            out.push(om);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_round_trips() {
        for lang in [Language::En, Language::Am, Language::Om] {
            assert_eq!(lang.code().parse::<Language>().unwrap(), lang);
        }
    }

    #[test]
    fn unknown_code_rejected() {
        assert!("fr".parse::<Language>().is_err());
        assert!("".parse::<Language>().is_err());
    }

    #[test]
    fn serde_uses_lowercase_codes() {
        assert_eq!(serde_json::to_string(&Language::Am).unwrap(), "\"am\"");
        let lang: Language = serde_json::from_str("\"om\"").unwrap();
        assert_eq!(lang, Language::Om);
    }

    #[test]
    fn english_only_mapping_falls_back() {
        let text = LocalizedText::new("X");
        assert_eq!(text.get(Language::Am), "X");
        assert_eq!(text.get(Language::Om), "X");
        assert_eq!(text.get(Language::En), "X");
    }

    #[test]
    fn populated_entry_wins_over_fallback() {
        let text = LocalizedText::trilingual("hello", "ሰላም", "akkam");
        assert_eq!(text.get(Language::Am), "ሰላም");
        assert_eq!(text.get(Language::Om), "akkam");
    }

    #[test]
    fn variants_list_english_first() {
        let text = LocalizedText::new("hello").with_om("akkam");
        assert_eq!(text.variants(), vec!["hello", "akkam"]);
    }
}
