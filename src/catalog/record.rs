//! Drug record shape and the row-to-record mapping rules.

use serde::{Deserialize, Serialize};

use super::csv::CsvTable;
use super::CatalogError;

/// Placeholder for blank descriptive fields.
pub const SENTINEL_NA: &str = "N/A";
/// Placeholder for a blank drug name.
pub const SENTINEL_UNKNOWN: &str = "Unknown";

/// One entry of the drug database.
///
/// `id` and `name` are always non-empty. Id uniqueness is best-effort:
/// the source code wins when present, otherwise `{name}-{row_index}` is
/// synthesized, which keeps same-named rows at different indices distinct.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrugRecord {
    pub id: String,
    pub name: String,
    pub classes: String,
    pub usage: String,
    pub side_effects: String,
    pub contraindications: String,
}

/// Resolved column positions for the required dataset headers.
#[derive(Debug, Clone, Copy)]
pub(crate) struct ColumnMap {
    unii: usize,
    name: usize,
    classes: usize,
    usage: usize,
    side_effects: usize,
    contraindications: usize,
}

impl ColumnMap {
    /// Resolve all required columns or report the first one missing.
    pub(crate) fn resolve(table: &CsvTable) -> Result<Self, CatalogError> {
        let find = |name: &str| {
            table
                .column(name)
                .ok_or_else(|| CatalogError::MissingColumn(name.to_string()))
        };
        Ok(Self {
            unii: find("unii")?,
            name: find("name")?,
            classes: find("classes")?,
            usage: find("usage")?,
            side_effects: find("side_effects")?,
            contraindications: find("contraindications")?,
        })
    }

    /// Map one row into a record, applying the default-value rules.
    pub(crate) fn record(&self, table: &CsvTable, row: usize) -> DrugRecord {
        let name = non_blank(table.field(row, self.name), SENTINEL_UNKNOWN);
        let id = match table.field(row, self.unii) {
            "" => format!("{name}-{row}"),
            code => code.to_string(),
        };
        DrugRecord {
            id,
            name,
            classes: non_blank(table.field(row, self.classes), SENTINEL_NA),
            usage: non_blank(table.field(row, self.usage), SENTINEL_NA),
            side_effects: non_blank(table.field(row, self.side_effects), SENTINEL_NA),
            contraindications: non_blank(table.field(row, self.contraindications), SENTINEL_NA),
        }
    }
}

fn non_blank(value: &str, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "unii,name,classes,usage,side_effects,contraindications";

    fn parse(rows: &str) -> (CsvTable, ColumnMap) {
        let table = CsvTable::parse(&format!("{HEADER}\n{rows}")).unwrap();
        let map = ColumnMap::resolve(&table).unwrap();
        (table, map)
    }

    #[test]
    fn full_row_maps_verbatim() {
        let (table, map) = parse("X81B0,Amoxicillin,Penicillin,Antibiotic,Nausea,Allergy\n");
        let record = map.record(&table, 0);
        assert_eq!(record.id, "X81B0");
        assert_eq!(record.name, "Amoxicillin");
        assert_eq!(record.classes, "Penicillin");
        assert_eq!(record.contraindications, "Allergy");
    }

    #[test]
    fn blank_descriptive_fields_become_na() {
        let (table, map) = parse("X81B0,Amoxicillin,,,,\n");
        let record = map.record(&table, 0);
        assert_eq!(record.classes, SENTINEL_NA);
        assert_eq!(record.usage, SENTINEL_NA);
        assert_eq!(record.side_effects, SENTINEL_NA);
        assert_eq!(record.contraindications, SENTINEL_NA);
    }

    #[test]
    fn blank_name_becomes_unknown() {
        let (table, map) = parse(",,,,,\n");
        let record = map.record(&table, 0);
        assert_eq!(record.name, SENTINEL_UNKNOWN);
    }

    #[test]
    fn missing_code_synthesizes_name_and_index() {
        let (table, map) = parse(",Aspirin,,,,\n,Aspirin,,,,\n");
        let first = map.record(&table, 0);
        let second = map.record(&table, 1);
        assert_eq!(first.id, "Aspirin-0");
        assert_eq!(second.id, "Aspirin-1");
        assert_ne!(first.id, second.id);
    }

    #[test]
    fn missing_required_column_is_reported() {
        let table = CsvTable::parse("unii,name\nX,Y\n").unwrap();
        let err = ColumnMap::resolve(&table).unwrap_err();
        assert!(matches!(err, CatalogError::MissingColumn(col) if col == "classes"));
    }

    #[test]
    fn serializes_with_camel_case_field_names() {
        let (table, map) = parse("X,Amoxicillin,,,,\n");
        let json = serde_json::to_value(map.record(&table, 0)).unwrap();
        assert!(json.get("sideEffects").is_some());
        assert!(json.get("side_effects").is_none());
    }
}
