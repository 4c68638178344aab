//! Header-driven CSV parsing for the drug dataset.
//!
//! Handles quoted fields with embedded commas, doubled quotes, and
//! embedded line breaks. Header names are lowercased and trimmed so
//! column lookup is case-insensitive. Rows shorter than the header are
//! padded with empty fields rather than rejected.

use super::CatalogError;

/// A parsed CSV document: lowercased headers plus data rows in source order.
#[derive(Debug, Clone)]
pub struct CsvTable {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl CsvTable {
    /// Parse raw CSV text. The first row is the header.
    pub fn parse(text: &str) -> Result<Self, CatalogError> {
        let mut records = split_records(text)?;
        if records.is_empty() {
            return Err(CatalogError::EmptyDataset);
        }
        let headers = records
            .remove(0)
            .iter()
            .map(|h| h.trim().to_lowercase())
            .collect();
        Ok(Self {
            headers,
            rows: records,
        })
    }

    /// Index of a column by (case-insensitive) header name.
    pub fn column(&self, name: &str) -> Option<usize> {
        let name = name.to_lowercase();
        self.headers.iter().position(|h| *h == name)
    }

    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    /// Field value, trimmed. Missing cells read as empty.
    pub fn field(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(|s| s.trim())
            .unwrap_or("")
    }
}

/// Split CSV text into records of fields, honoring quoting rules.
fn split_records(text: &str) -> Result<Vec<Vec<String>>, CatalogError> {
    let mut records = Vec::new();
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut line = 1usize;

    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        match ch {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' if field.is_empty() => in_quotes = true,
            '"' => {
                return Err(CatalogError::MalformedCsv {
                    line,
                    reason: "quote inside unquoted field".into(),
                });
            }
            ',' if !in_quotes => {
                fields.push(std::mem::take(&mut field));
            }
            '\r' if !in_quotes => {
                // CRLF handled at the '\n'; a bare CR is ignored.
            }
            '\n' if !in_quotes => {
                line += 1;
                fields.push(std::mem::take(&mut field));
                if !(fields.len() == 1 && fields[0].is_empty()) {
                    records.push(std::mem::take(&mut fields));
                } else {
                    fields.clear();
                }
            }
            '\n' => {
                line += 1;
                field.push(ch);
            }
            _ => field.push(ch),
        }
    }

    if in_quotes {
        return Err(CatalogError::MalformedCsv {
            line,
            reason: "unterminated quoted field".into(),
        });
    }

    if !field.is_empty() || !fields.is_empty() {
        fields.push(field);
        records.push(fields);
    }

    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_simple_table() {
        let table = CsvTable::parse("name,usage\nAspirin,Pain relief\n").unwrap();
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.column("name"), Some(0));
        assert_eq!(table.field(0, 1), "Pain relief");
    }

    #[test]
    fn header_lookup_is_case_insensitive() {
        let table = CsvTable::parse("UNII,Name\nX1,Aspirin\n").unwrap();
        assert_eq!(table.column("unii"), Some(0));
        assert_eq!(table.column("NAME"), Some(1));
        assert_eq!(table.column("missing"), None);
    }

    #[test]
    fn quoted_field_keeps_commas_and_quotes() {
        let table =
            CsvTable::parse("name,usage\n\"Amoxicillin, 500mg\",\"Take \"\"twice\"\" daily\"\n")
                .unwrap();
        assert_eq!(table.field(0, 0), "Amoxicillin, 500mg");
        assert_eq!(table.field(0, 1), "Take \"twice\" daily");
    }

    #[test]
    fn quoted_field_keeps_newlines() {
        let table = CsvTable::parse("name,notes\nAspirin,\"line one\nline two\"\n").unwrap();
        assert_eq!(table.field(0, 1), "line one\nline two");
    }

    #[test]
    fn crlf_and_trailing_blank_lines_ignored() {
        let table = CsvTable::parse("name,usage\r\nAspirin,Pain\r\n\r\n").unwrap();
        assert_eq!(table.row_count(), 1);
        assert_eq!(table.field(0, 0), "Aspirin");
    }

    #[test]
    fn short_row_reads_as_empty_fields() {
        let table = CsvTable::parse("name,usage,classes\nAspirin\n").unwrap();
        assert_eq!(table.field(0, 0), "Aspirin");
        assert_eq!(table.field(0, 1), "");
        assert_eq!(table.field(0, 2), "");
    }

    #[test]
    fn empty_input_is_empty_dataset() {
        assert!(matches!(
            CsvTable::parse(""),
            Err(CatalogError::EmptyDataset)
        ));
    }

    #[test]
    fn unterminated_quote_is_malformed() {
        assert!(matches!(
            CsvTable::parse("name\n\"unclosed\n"),
            Err(CatalogError::MalformedCsv { .. })
        ));
    }

    #[test]
    fn row_order_is_preserved() {
        let table = CsvTable::parse("name\nfirst\nsecond\nthird\n").unwrap();
        assert_eq!(table.field(0, 0), "first");
        assert_eq!(table.field(2, 0), "third");
    }
}
