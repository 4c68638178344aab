//! IDA core — backend of a localized health-information assistant for
//! Ethiopian users.
//!
//! What lives here:
//! - [`catalog`]: drug dataset loading (CSV) and fuzzy lookup
//! - [`search`]: the fuzzy query router shared by drugs and FAQ
//! - [`content`]: static localized FAQ and onboarding copy
//! - [`language`]: language codes and English-fallback resolution
//! - [`gateway`]: typed contracts around the external LLM service
//! - [`store`]: best-effort persisted client state
//!
//! The presentation layer is a separate concern; this crate only hands
//! back data.

pub mod catalog;
pub mod config;
pub mod content;
pub mod gateway;
pub mod language;
pub mod search;
pub mod store;

pub use catalog::{CatalogError, DrugCatalog, DrugRecord};
pub use content::{FaqMatch, FaqStore};
pub use gateway::{GatewayError, HttpLlmClient, LlmClient};
pub use language::{Language, LocalizedText};
pub use store::{ClientStore, StoreError};

#[cfg(test)]
mod tests {
    //! End-to-end flow: load the dataset, find a drug, localize its
    //! sections through the translation capability.

    use crate::catalog::{CatalogError, DatasetSource, DrugCatalog};
    use crate::gateway::client::MockLlmClient;
    use crate::gateway::translate::{translate_bundle, BundleSection};
    use crate::language::Language;

    struct InlineCsv(&'static str);

    impl DatasetSource for InlineCsv {
        fn is_available(&self) -> bool {
            true
        }
        fn fetch(&self) -> Result<String, CatalogError> {
            Ok(self.0.to_string())
        }
        fn describe(&self) -> String {
            "inline".into()
        }
    }

    const DATASET: &str = "\
unii,name,classes,usage,side_effects,contraindications
804826J2HU,Amoxicillin,Penicillin antibiotic,Treats bacterial infections,Nausea and rash,Penicillin allergy
362O9ITL9D,Paracetamol,Analgesic,Relieves pain and fever,Rare at normal doses,Severe liver disease
";

    #[test]
    fn drug_search_to_translated_sections() {
        let catalog = DrugCatalog::new(Box::new(InlineCsv(DATASET)));
        assert!(catalog.ensure_loaded().unwrap());

        let results = catalog.search("amoxicillin");
        let top = &results[0];
        assert_eq!(top.name, "Amoxicillin");
        assert_eq!(top.id, "804826J2HU");

        let sections = vec![
            BundleSection {
                title: "Usage".into(),
                content: top.usage.clone(),
            },
            BundleSection {
                title: "Classes".into(),
                content: top.classes.clone(),
            },
            BundleSection {
                title: "Side effects".into(),
                content: top.side_effects.clone(),
            },
            BundleSection {
                title: "Contraindications".into(),
                content: top.contraindications.clone(),
            },
        ];

        // Active language English: identity, no model involved.
        let client = MockLlmClient::failing();
        let translated = translate_bundle(&client, &sections, Language::En).unwrap();
        assert_eq!(translated.len(), 4);
        assert_eq!(
            translated[0].translated_content,
            "Treats bacterial infections"
        );
        assert_eq!(client.calls(), 0);

        // Non-English goes through the model and keeps order.
        let client = MockLlmClient::new(
            r#"```json
{"translatedSections": [
  {"translatedTitle": "አጠቃቀም", "translatedContent": "የባክቴሪያ ኢንፌክሽኖችን ያክማል"},
  {"translatedTitle": "ክፍሎች", "translatedContent": "ፔኒሲሊን አንቲባዮቲክ"},
  {"translatedTitle": "የጎንዮሽ ጉዳቶች", "translatedContent": "ማቅለሽለሽ እና ሽፍታ"},
  {"translatedTitle": "ተቃራኒዎች", "translatedContent": "የፔኒሲሊን አለርጂ"}
]}
```"#,
        );
        let translated = translate_bundle(&client, &sections, Language::Am).unwrap();
        assert_eq!(translated.len(), 4);
        assert_eq!(translated[0].translated_title, "አጠቃቀም");
        assert_eq!(client.calls(), 1);
    }
}
