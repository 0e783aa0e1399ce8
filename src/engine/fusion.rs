//! Score fusion and case building
//!
//! Merges rule reasons with the statistical outcome into per-record verdicts
//! and projects flagged records into reportable fraud cases.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::dataset::Dataset;
use super::stats::StatOutcome;

/// Any deterministic rule hit (or statistical flag) floors the final score
/// here: a borderline z-score is weak evidence, a rule violation is not.
pub const RULE_SCORE_FLOOR: f64 = 0.9;

pub const REASON_STATISTICAL_ANOMALY: &str = "Statistical Anomaly (High Deviation)";

const NAME_FIELD: &str = "name";
const SCHEME_FIELD: &str = "subsidy_type";
const UNKNOWN: &str = "Unknown";

/// Final per-record verdict; only produced for records with at least one
/// reason.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FraudVerdict {
    pub record_id: usize,
    pub fraud_score: f64,
    pub is_fraud: bool,
    pub reasons: Vec<String>,
}

/// A verdict projected into case-report fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FraudCase {
    pub id: String,
    pub beneficiary_name: String,
    pub scheme: String,
    pub amount: f64,
    pub risk_score: i64,
    pub fraud_reasons: Vec<String>,
}

/// Combine rule reasons and statistical outcome into verdicts for every
/// flagged record, in record order.
pub fn fuse(
    dataset: &Dataset,
    rule_flags: &HashMap<usize, Vec<String>>,
    stats: &StatOutcome,
) -> Vec<FraudVerdict> {
    let mut verdicts = Vec::new();

    for idx in 0..dataset.len() {
        let mut reasons = rule_flags.get(&idx).cloned().unwrap_or_default();

        if stats.flags.get(idx).copied().unwrap_or(false) {
            reasons.push(REASON_STATISTICAL_ANOMALY.to_string());
        }

        if reasons.is_empty() {
            continue;
        }

        let mut score = stats.scores.get(idx).copied().unwrap_or(0.0);
        score = score.max(RULE_SCORE_FLOOR);
        score = score.clamp(0.0, 1.0);

        verdicts.push(FraudVerdict {
            record_id: idx,
            fraud_score: score,
            is_fraud: true,
            reasons,
        });
    }

    verdicts
}

/// Project a verdict into a case using the underlying record's identity
/// fields. Missing identity fields fall back to `Unknown`, a missing amount
/// to 0.
pub fn build_case(dataset: &Dataset, verdict: &FraudVerdict) -> FraudCase {
    let record = &dataset.records[verdict.record_id];

    FraudCase {
        id: verdict.record_id.to_string(),
        beneficiary_name: record
            .text(NAME_FIELD)
            .unwrap_or_else(|| UNKNOWN.to_string()),
        scheme: record
            .text(SCHEME_FIELD)
            .unwrap_or_else(|| UNKNOWN.to_string()),
        amount: record.number(super::rules::AMOUNT_FIELD).unwrap_or(0.0),
        risk_score: (verdict.fraud_score * 100.0).round() as i64,
        fraud_reasons: verdict.reasons.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::dataset::{FieldValue, Record};
    use std::collections::HashMap;

    fn dataset(n: usize) -> Dataset {
        Dataset::new(
            (0..n)
                .map(|i| Record {
                    fields: [
                        ("name".to_string(), FieldValue::Text(format!("B{}", i))),
                        ("subsidy_type".to_string(), FieldValue::Text("PM-KISAN".to_string())),
                        ("amount".to_string(), FieldValue::Number(1000.0 * (i + 1) as f64)),
                    ]
                    .into_iter()
                    .collect(),
                })
                .collect(),
        )
    }

    fn stats(n: usize) -> StatOutcome {
        StatOutcome {
            flags: vec![false; n],
            scores: vec![0.0; n],
        }
    }

    #[test]
    fn test_rule_hit_floors_score() {
        let ds = dataset(2);
        let mut rules = HashMap::new();
        rules.insert(0usize, vec!["Duplicate Aadhaar Number".to_string()]);
        let mut st = stats(2);
        st.scores[0] = 0.12;

        let verdicts = fuse(&ds, &rules, &st);
        assert_eq!(verdicts.len(), 1);
        assert_eq!(verdicts[0].record_id, 0);
        assert!(verdicts[0].fraud_score >= RULE_SCORE_FLOOR);
        assert!(verdicts[0].is_fraud);
    }

    #[test]
    fn test_statistical_flag_appends_reason_and_floors() {
        let ds = dataset(1);
        let mut st = stats(1);
        st.flags[0] = true;
        st.scores[0] = 0.61; // just over |z| = 3 on the /5 scale

        let verdicts = fuse(&ds, &HashMap::new(), &st);
        assert_eq!(verdicts.len(), 1);
        assert_eq!(verdicts[0].reasons, vec![REASON_STATISTICAL_ANOMALY.to_string()]);
        assert!(verdicts[0].fraud_score >= RULE_SCORE_FLOOR);
    }

    #[test]
    fn test_clean_records_produce_no_verdict() {
        let ds = dataset(3);
        let mut st = stats(3);
        st.scores[1] = 0.5; // elevated score without a flag is not a reason

        assert!(fuse(&ds, &HashMap::new(), &st).is_empty());
    }

    #[test]
    fn test_statistical_reason_comes_after_rule_reasons() {
        let ds = dataset(1);
        let mut rules = HashMap::new();
        rules.insert(0usize, vec!["Income exceeds threshold (₹2.5L)".to_string()]);
        let mut st = stats(1);
        st.flags[0] = true;
        st.scores[0] = 1.0;

        let verdicts = fuse(&ds, &rules, &st);
        assert_eq!(
            verdicts[0].reasons,
            vec![
                "Income exceeds threshold (₹2.5L)".to_string(),
                REASON_STATISTICAL_ANOMALY.to_string()
            ]
        );
        assert_eq!(verdicts[0].fraud_score, 1.0);
    }

    #[test]
    fn test_case_projection() {
        let ds = dataset(2);
        let verdict = FraudVerdict {
            record_id: 1,
            fraud_score: 0.9,
            is_fraud: true,
            reasons: vec!["Duplicate Aadhaar Number".to_string()],
        };

        let case = build_case(&ds, &verdict);
        assert_eq!(case.id, "1");
        assert_eq!(case.beneficiary_name, "B1");
        assert_eq!(case.scheme, "PM-KISAN");
        assert_eq!(case.amount, 2000.0);
        assert_eq!(case.risk_score, 90);
    }

    #[test]
    fn test_case_defaults_for_missing_identity() {
        let ds = Dataset::new(vec![Record::default()]);
        let verdict = FraudVerdict {
            record_id: 0,
            fraud_score: 1.0,
            is_fraud: true,
            reasons: vec![REASON_STATISTICAL_ANOMALY.to_string()],
        };

        let case = build_case(&ds, &verdict);
        assert_eq!(case.beneficiary_name, "Unknown");
        assert_eq!(case.scheme, "Unknown");
        assert_eq!(case.amount, 0.0);
        assert_eq!(case.risk_score, 100);
    }
}
