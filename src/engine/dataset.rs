//! Tabular record model
//!
//! Uploaded CSV rows are held as loosely-typed records: every cell is a
//! number, a string, or absent. Records are immutable once loaded and are
//! addressed by their zero-based position within the dataset.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// A single cell value.
///
/// Untagged so the serialized form is plain JSON: `12.5`, `"Bihar"`, `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Number(f64),
    Text(String),
    Null,
}

impl FieldValue {
    /// Numeric coercion. Text values are parsed; anything else is `None`.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) if n.is_finite() => Some(*n),
            FieldValue::Number(_) => None,
            FieldValue::Text(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
            FieldValue::Null => None,
        }
    }

    /// Canonical string form, used for duplicate counting and display.
    ///
    /// Integral numbers render without a fractional part so `123456789012`
    /// read from CSV as a number still matches the same value read as text.
    pub fn canonical(&self) -> Option<String> {
        match self {
            FieldValue::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    Some(format!("{}", *n as i64))
                } else {
                    Some(n.to_string())
                }
            }
            FieldValue::Text(s) => Some(s.clone()),
            FieldValue::Null => None,
        }
    }

    /// Parse a raw CSV cell into a typed value.
    pub fn from_csv_cell(cell: &str) -> Self {
        let trimmed = cell.trim();
        if trimmed.is_empty() {
            return FieldValue::Null;
        }
        match trimmed.parse::<f64>() {
            Ok(n) if n.is_finite() => FieldValue::Number(n),
            _ => FieldValue::Text(trimmed.to_string()),
        }
    }
}

/// One beneficiary row: field name -> value.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Record {
    #[serde(flatten)]
    pub fields: HashMap<String, FieldValue>,
}

impl Record {
    pub fn field(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    /// Numeric view of a field; missing or non-coercible values are `None`.
    pub fn number(&self, name: &str) -> Option<f64> {
        self.field(name).and_then(FieldValue::as_number)
    }

    /// Canonical string view of a field.
    pub fn text(&self, name: &str) -> Option<String> {
        self.field(name).and_then(FieldValue::canonical)
    }
}

/// An ordered, possibly empty, collection of records sharing a loose schema.
///
/// Serialized shape is `{"records": [...]}`, the payload stored alongside the
/// upload row.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    pub records: Vec<Record>,
}

impl Dataset {
    pub fn new(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Whether any record carries the named field.
    pub fn has_field(&self, name: &str) -> bool {
        self.records.iter().any(|r| r.fields.contains_key(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, FieldValue)]) -> Record {
        Record {
            fields: pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        }
    }

    #[test]
    fn test_csv_cell_typing() {
        assert_eq!(FieldValue::from_csv_cell("12000.50"), FieldValue::Number(12000.5));
        assert_eq!(
            FieldValue::from_csv_cell("PM-KISAN"),
            FieldValue::Text("PM-KISAN".to_string())
        );
        assert_eq!(FieldValue::from_csv_cell("   "), FieldValue::Null);
    }

    #[test]
    fn test_numeric_coercion_from_text() {
        let r = record(&[("income", FieldValue::Text(" 300000 ".to_string()))]);
        assert_eq!(r.number("income"), Some(300000.0));

        let r = record(&[("income", FieldValue::Text("unknown".to_string()))]);
        assert_eq!(r.number("income"), None);
    }

    #[test]
    fn test_canonical_matches_across_types() {
        let as_number = FieldValue::Number(123456789012.0);
        let as_text = FieldValue::Text("123456789012".to_string());
        assert_eq!(as_number.canonical(), as_text.canonical());
    }

    #[test]
    fn test_dataset_round_trip() {
        let ds = Dataset::new(vec![record(&[
            ("name", FieldValue::Text("Asha".to_string())),
            ("amount", FieldValue::Number(12000.0)),
            ("district", FieldValue::Null),
        ])]);

        let json = serde_json::to_string(&ds).unwrap();
        assert!(json.starts_with("{\"records\":["));

        let back: Dataset = serde_json::from_str(&json).unwrap();
        assert_eq!(back.len(), 1);
        assert_eq!(back.records[0].number("amount"), Some(12000.0));
        assert_eq!(back.records[0].field("district"), Some(&FieldValue::Null));
    }
}
