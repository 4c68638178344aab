//! Medicine lookup capability.

use serde::{Deserialize, Serialize};

use super::client::LlmClient;
use super::parser::parse_reply;
use super::prompts::build_lookup_prompt;
use super::GatewayError;

/// Structured answer for a medicine-name lookup.
///
/// When `is_medicine` is false every other field is empty — the adapter
/// enforces this whatever the model returned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicineInfo {
    pub is_medicine: bool,
    #[serde(default)]
    pub what_it_is: String,
    #[serde(default)]
    pub usage: String,
    #[serde(default)]
    pub food_instructions: String,
    #[serde(default)]
    pub time_taken: String,
    #[serde(default)]
    pub side_effects: Vec<String>,
    #[serde(default)]
    pub local_summary_amharic: String,
    #[serde(default)]
    pub local_summary_oromo: String,
}

impl MedicineInfo {
    /// Normalize a parsed reply: a non-medicine answer keeps nothing
    /// but the flag.
    fn normalized(self) -> Self {
        if self.is_medicine {
            self
        } else {
            Self::default()
        }
    }
}

/// Look up a medicine by name.
pub fn get_medicine_info<C: LlmClient + ?Sized>(
    client: &C,
    medicine_name: &str,
) -> Result<MedicineInfo, GatewayError> {
    let name = medicine_name.trim();
    if name.is_empty() {
        return Err(GatewayError::InvalidInput("empty medicine name".into()));
    }
    let reply = client.generate("", &build_lookup_prompt(name))?;
    let info: MedicineInfo = parse_reply(&reply)?;
    Ok(info.normalized())
}
