//! Deterministic rule checks
//!
//! Each rule is evaluated independently and additively: a record may collect
//! several reasons. Reason order follows rule declaration order so output is
//! stable across runs.

use std::collections::HashMap;

use super::dataset::Dataset;

// ============================================================================
// THRESHOLDS
// ============================================================================

/// Annual income above this disqualifies a beneficiary (₹2.5L)
pub const INCOME_THRESHOLD: f64 = 250_000.0;

/// Single claim amounts above this are suspicious (₹50k)
pub const AMOUNT_THRESHOLD: f64 = 50_000.0;

// ============================================================================
// FIELD NAMES
// ============================================================================

pub const IDENTIFIER_FIELD: &str = "aadhaar";
pub const INCOME_FIELD: &str = "income";
pub const AMOUNT_FIELD: &str = "amount";

// ============================================================================
// REASON STRINGS
// ============================================================================

pub const REASON_DUPLICATE_AADHAAR: &str = "Duplicate Aadhaar Number";
pub const REASON_INCOME_THRESHOLD: &str = "Income exceeds threshold (₹2.5L)";
pub const REASON_AMOUNT_THRESHOLD: &str = "Unusually high claim amount (>₹50k)";

/// Evaluate every rule over the dataset.
///
/// Returns record index -> non-empty reason list; indices with no violation
/// are absent. Missing or non-numeric values never trigger a rule.
pub fn evaluate(dataset: &Dataset) -> HashMap<usize, Vec<String>> {
    let mut flags: HashMap<usize, Vec<String>> = HashMap::new();

    // Pre-count identifiers so duplicates flag every occurrence, not just
    // the second one.
    let mut id_counts: HashMap<String, usize> = HashMap::new();
    for record in &dataset.records {
        if let Some(id) = record.text(IDENTIFIER_FIELD) {
            *id_counts.entry(id).or_insert(0) += 1;
        }
    }

    for (idx, record) in dataset.records.iter().enumerate() {
        let mut reasons = Vec::new();

        // Rule 1: Duplicate Aadhaar
        if let Some(id) = record.text(IDENTIFIER_FIELD) {
            if id_counts.get(&id).copied().unwrap_or(0) > 1 {
                reasons.push(REASON_DUPLICATE_AADHAAR.to_string());
            }
        }

        // Rule 2: High income threshold
        if let Some(income) = record.number(INCOME_FIELD) {
            if income > INCOME_THRESHOLD {
                reasons.push(REASON_INCOME_THRESHOLD.to_string());
            }
        }

        // Rule 3: High claim amount
        if let Some(amount) = record.number(AMOUNT_FIELD) {
            if amount > AMOUNT_THRESHOLD {
                reasons.push(REASON_AMOUNT_THRESHOLD.to_string());
            }
        }

        if !reasons.is_empty() {
            flags.insert(idx, reasons);
        }
    }

    flags
}
