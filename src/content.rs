//! Localized content store: FAQ entries and onboarding copy.
//!
//! Static, compiled into the artifact, never mutated at runtime. Every
//! entry populates all three languages so resolution never needs the
//! English fallback here, but the fallback still guards future entries.

use serde::{Deserialize, Serialize};

use crate::language::{Language, LocalizedText};
use crate::search::FuzzyIndex;

/// FAQ search shares the drug-search score semantics.
const SIMILARITY_THRESHOLD: f64 = 0.4;
const MIN_QUERY_LEN: usize = 2;
/// Presentation limit for FAQ matches.
const MAX_FAQ_RESULTS: usize = 5;

/// A frequently-asked question with localized question and answer.
/// The question is index input; the answer is what the user sees.
#[derive(Debug, Clone, PartialEq)]
pub struct FaqRecord {
    pub id: &'static str,
    pub question: LocalizedText,
    pub answer: LocalizedText,
}

/// A surfaced FAQ hit, already resolved to the active language.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaqMatch {
    pub id: String,
    pub question: String,
    pub answer: String,
}

/// The FAQ collection plus its fuzzy index over question text in every
/// populated language.
pub struct FaqStore {
    entries: Vec<FaqRecord>,
    index: FuzzyIndex,
}

impl FaqStore {
    /// Build the store from the built-in entries.
    pub fn new() -> Self {
        Self::from_entries(builtin_faq())
    }

    fn from_entries(entries: Vec<FaqRecord>) -> Self {
        let mut index = FuzzyIndex::new(SIMILARITY_THRESHOLD, MIN_QUERY_LEN);
        for entry in &entries {
            index.insert_keys(&entry.question.variants());
        }
        Self { entries, index }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Match a free-text question and surface answers in the active
    /// language.
    pub fn search(&self, query: &str, lang: Language) -> Vec<FaqMatch> {
        self.index
            .search(query)
            .into_iter()
            .take(MAX_FAQ_RESULTS)
            .map(|hit| {
                let entry = &self.entries[hit.index];
                FaqMatch {
                    id: entry.id.to_string(),
                    question: entry.question.get(lang).to_string(),
                    answer: entry.answer.get(lang).to_string(),
                }
            })
            .collect()
    }
}

impl Default for FaqStore {
    fn default() -> Self {
        Self::new()
    }
}

/// The built-in FAQ entries shipped with the app.
fn builtin_faq() -> Vec<FaqRecord> {
    vec![
        FaqRecord {
            id: "missed-dose",
            question: LocalizedText::trilingual(
                "What should I do if I miss a dose?",
                "መድሃኒት መውሰድ ከረሳሁ ምን ማድረግ አለብኝ?",
                "Yeroo qorichaa yoon irraanfadhe maal gochuu qaba?",
            ),
            answer: LocalizedText::trilingual(
                "Take it as soon as you remember, unless it is almost time for the next dose. Never take a double dose to catch up. If unsure, ask your pharmacist.",
                "እንዳስታወሱ ወዲያውኑ ይውሰዱ፤ ነገር ግን የሚቀጥለው ጊዜ ከተቃረበ ይዝለሉት። በአንድ ጊዜ ሁለት እጥፍ በፍጹም አይውሰዱ። እርግጠኛ ካልሆኑ ፋርማሲስትዎን ይጠይቁ።",
                "Akkuma yaadattaniin fudhadhaa; garuu yeroon isa itti aanu dhiyoo yoo ta'e dhiisaa. Yeroo tokkotti dachaa hin fudhatinaa. Yoo hin mirkanoofne ogeessa qorichaa gaafadhaa.",
            ),
        },
        FaqRecord {
            id: "empty-stomach",
            question: LocalizedText::trilingual(
                "Can I take medicine on an empty stomach?",
                "መድሃኒት ባዶ ሆድ መውሰድ እችላለሁ?",
                "Qoricha garaa duwwaadhaan fudhachuu nan danda'aa?",
            ),
            answer: LocalizedText::trilingual(
                "Some medicines need food and others work best on an empty stomach. Check the label or ask your pharmacist before taking anything.",
                "አንዳንድ መድሃኒቶች ከምግብ ጋር መወሰድ አለባቸው፤ ሌሎች ደግሞ ባዶ ሆድ ላይ በተሻለ ይሰራሉ። መለያውን ያንብቡ ወይም ፋርማሲስት ይጠይቁ።",
                "Qorichi tokko tokko nyaata waliin fudhatamuu qaba; kaan immoo garaa duwwaadhaan caalaatti hojjeta. Ragaa isaa dubbisaa yookiin ogeessa qorichaa gaafadhaa.",
            ),
        },
        FaqRecord {
            id: "storage",
            question: LocalizedText::trilingual(
                "How should I store my medicines?",
                "መድሃኒቶቼን እንዴት ማስቀመጥ አለብኝ?",
                "Qoricha koo akkamitti kaa'uu qaba?",
            ),
            answer: LocalizedText::trilingual(
                "Keep medicines in a cool, dry place away from direct sunlight and out of reach of children. Some must be refrigerated; check the package.",
                "መድሃኒቶችን ከፀሐይ ብርሃን ርቆ በቀዝቃዛና ደረቅ ቦታ፣ ከልጆች እጅ ርቀው ያስቀምጡ። አንዳንዶቹ በማቀዝቀዣ መቀመጥ አለባቸው፤ ማሸጊያውን ይመልከቱ።",
                "Qoricha iddoo qabbanaa'aa fi goggogaa, aduu irraa fagoo fi harka ijoollee irraa fagootti kaa'aa. Kaan firiijii keessa kaa'amuu qaba; paakeejii ilaalaa.",
            ),
        },
        FaqRecord {
            id: "expired",
            question: LocalizedText::trilingual(
                "Is it safe to use expired medicine?",
                "ጊዜው ያለፈበት መድሃኒት መጠቀም ደህና ነው?",
                "Qoricha yeroon isaa darbe fayyadamuun nagaa dhaa?",
            ),
            answer: LocalizedText::trilingual(
                "No. Expired medicine can lose strength or become harmful. Return expired medicines to a pharmacy for safe disposal.",
                "አይደለም። ጊዜው ያለፈበት መድሃኒት ኃይሉን ሊያጣ ወይም ጎጂ ሊሆን ይችላል። ለደህንነቱ ወደ ፋርማሲ ይመልሱ።",
                "Lakki. Qorichi yeroon isaa darbe humna dhabuu yookiin miidhaa geessisuu danda'a. Gara faarmaasii deebisaa.",
            ),
        },
        FaqRecord {
            id: "see-doctor",
            question: LocalizedText::trilingual(
                "When should I see a doctor instead of self-treating?",
                "መቼ ነው ሐኪም ማየት ያለብኝ?",
                "Yoom mana yaalaa deemuu qaba?",
            ),
            answer: LocalizedText::trilingual(
                "See a doctor for high fever, severe or lasting pain, trouble breathing, or any symptom that worsens after two days of self-care.",
                "ከፍተኛ ትኩሳት፣ ከባድ ወይም የሚቆይ ህመም፣ የመተንፈስ ችግር፣ ወይም ከሁለት ቀን ራስ እንክብካቤ በኋላ የሚባባስ ምልክት ካለ ሐኪም ያማክሩ።",
                "Ho'a olaanaa, dhukkubbii cimaa yookiin turaa, rakkoo hafuura baafachuu, yookiin mallattoo guyyaa lama booda hammaatu yoo qabaattan ogeessa fayyaa ilaalaa.",
            ),
        },
    ]
}

// ── Onboarding copy ─────────────────────────────────────────

pub fn onboarding_welcome() -> LocalizedText {
    LocalizedText::trilingual(
        "Welcome to IDA, your health information assistant.",
        "እንኳን ወደ አይዳ በደህና መጡ፤ የጤና መረጃ ረዳትዎ።",
        "Baga gara IDA dhuftan; gargaaraa odeeffannoo fayyaa keessanii.",
    )
}

pub fn onboarding_language_prompt() -> LocalizedText {
    LocalizedText::trilingual("Choose your language.", "ቋንቋዎን ይምረጡ።", "Afaan keessan filadhaa.")
}

pub fn onboarding_disclaimer() -> LocalizedText {
    LocalizedText::trilingual(
        "IDA provides general health information, not medical advice.",
        "አይዳ አጠቃላይ የጤና መረጃ ይሰጣል፤ የህክምና ምክር አይደለም።",
        "IDA odeeffannoo fayyaa waliigalaa kenna; gorsa yaalaa miti.",
    )
}

/// Generic user-facing error message; failures never surface raw detail.
pub fn generic_error_message(lang: Language) -> &'static str {
    match lang {
        Language::En => "Something went wrong. Please try again.",
        Language::Am => "የሆነ ስህተት ተፈጥሯል። እባክዎ እንደገና ይሞክሩ።",
        Language::Om => "Dogoggorri uumameera. Irra deebi'ii yaali.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_entries_populate_all_languages() {
        for entry in builtin_faq() {
            assert_eq!(entry.question.variants().len(), 3, "{}", entry.id);
            assert_eq!(entry.answer.variants().len(), 3, "{}", entry.id);
        }
    }

    #[test]
    fn english_question_finds_entry() {
        let store = FaqStore::new();
        let hits = store.search("miss a dose", Language::En);
        assert_eq!(hits[0].id, "missed-dose");
        assert!(hits[0].answer.contains("double dose"));
    }

    #[test]
    fn answer_resolves_to_active_language() {
        let store = FaqStore::new();
        let hits = store.search("miss a dose", Language::Am);
        assert_eq!(hits[0].id, "missed-dose");
        assert!(hits[0].answer.contains("ፋርማሲስት"));
    }

    #[test]
    fn amharic_question_finds_entry() {
        let store = FaqStore::new();
        let hits = store.search("ባዶ ሆድ", Language::Am);
        assert_eq!(hits[0].id, "empty-stomach");
    }

    #[test]
    fn short_query_returns_nothing() {
        let store = FaqStore::new();
        assert!(store.search("a", Language::En).is_empty());
        assert!(store.search("", Language::En).is_empty());
    }

    #[test]
    fn results_cap_at_presentation_limit() {
        let store = FaqStore::new();
        assert!(store.search("medicine", Language::En).len() <= MAX_FAQ_RESULTS);
    }

    #[test]
    fn onboarding_copy_is_trilingual() {
        assert_eq!(onboarding_welcome().variants().len(), 3);
        assert_eq!(onboarding_language_prompt().variants().len(), 3);
        assert_eq!(onboarding_disclaimer().variants().len(), 3);
    }

    #[test]
    fn error_message_localized_per_language() {
        assert_ne!(
            generic_error_message(Language::En),
            generic_error_message(Language::Am)
        );
    }
}
