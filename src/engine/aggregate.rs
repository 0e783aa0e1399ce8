//! Dataset-level summary aggregation

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::dataset::Dataset;
use super::fusion::{FraudCase, FraudVerdict};

/// Grouping field for the top-risk reduction
pub const STATE_FIELD: &str = "state";

/// Sentinel when no cases exist or the grouping field is absent
pub const NO_TOP_RISK_STATE: &str = "N/A";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisSummary {
    pub total_leakage_amount: f64,
    pub flagged_count: i64,
    pub total_records: i64,
    pub average_risk_score: i64,
    pub top_risk_state: String,
}

/// Reduce the case list into the per-file summary.
///
/// Leakage is the case-amount sum rounded to 2 decimals; the average risk
/// score is a truncating integer mean (0 when no cases). The top-risk state
/// is the most frequent `state` value among flagged records; ties resolve to
/// the first value reaching the maximum count in original record order.
pub fn summarize(dataset: &Dataset, verdicts: &[FraudVerdict], cases: &[FraudCase]) -> AnalysisSummary {
    let flagged_count = cases.len() as i64;

    let total_leakage: f64 = cases.iter().map(|c| c.amount).sum();
    let total_leakage_amount = (total_leakage * 100.0).round() / 100.0;

    let average_risk_score = if flagged_count > 0 {
        cases.iter().map(|c| c.risk_score).sum::<i64>() / flagged_count
    } else {
        0
    };

    AnalysisSummary {
        total_leakage_amount,
        flagged_count,
        total_records: dataset.len() as i64,
        average_risk_score,
        top_risk_state: top_risk_state(dataset, verdicts),
    }
}

fn top_risk_state(dataset: &Dataset, verdicts: &[FraudVerdict]) -> String {
    let mut counts: HashMap<String, i64> = HashMap::new();
    let mut best: Option<(String, i64)> = None;

    for verdict in verdicts {
        let Some(state) = dataset.records[verdict.record_id].text(STATE_FIELD) else {
            continue;
        };
        let count = counts.entry(state.clone()).or_insert(0);
        *count += 1;
        // Strictly-greater keeps the first value that reached this count.
        if best.as_ref().map_or(true, |(_, c)| *count > *c) {
            best = Some((state, *count));
        }
    }

    best.map(|(state, _)| state)
        .unwrap_or_else(|| NO_TOP_RISK_STATE.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::dataset::{FieldValue, Record};
    use std::collections::HashMap;

    fn record(state: Option<&str>) -> Record {
        let mut fields = HashMap::new();
        if let Some(s) = state {
            fields.insert("state".to_string(), FieldValue::Text(s.to_string()));
        }
        Record { fields }
    }

    fn verdict(idx: usize) -> FraudVerdict {
        FraudVerdict {
            record_id: idx,
            fraud_score: 0.9,
            is_fraud: true,
            reasons: vec!["Duplicate Aadhaar Number".to_string()],
        }
    }

    fn case(amount: f64, risk: i64) -> FraudCase {
        FraudCase {
            id: "0".to_string(),
            beneficiary_name: "B".to_string(),
            scheme: "PM-KISAN".to_string(),
            amount,
            risk_score: risk,
            fraud_reasons: vec![],
        }
    }

    #[test]
    fn test_empty_case_list() {
        let ds = Dataset::new(vec![record(Some("Bihar"))]);
        let summary = summarize(&ds, &[], &[]);

        assert_eq!(summary.flagged_count, 0);
        assert_eq!(summary.total_records, 1);
        assert_eq!(summary.total_leakage_amount, 0.0);
        assert_eq!(summary.average_risk_score, 0);
        assert_eq!(summary.top_risk_state, NO_TOP_RISK_STATE);
    }

    #[test]
    fn test_leakage_rounded_and_mean_truncates() {
        let ds = Dataset::new(vec![record(None), record(None)]);
        let verdicts = vec![verdict(0), verdict(1)];
        let cases = vec![case(100.005, 90), case(200.001, 95)];

        let summary = summarize(&ds, &verdicts, &cases);
        assert_eq!(summary.total_leakage_amount, 300.01);
        // (90 + 95) / 2 truncates to 92
        assert_eq!(summary.average_risk_score, 92);
        assert_eq!(summary.flagged_count, 2);
    }

    #[test]
    fn test_top_risk_state_mode() {
        let ds = Dataset::new(vec![
            record(Some("Bihar")),
            record(Some("Kerala")),
            record(Some("Bihar")),
        ]);
        let verdicts = vec![verdict(0), verdict(1), verdict(2)];
        let cases = vec![case(1.0, 90); 3];

        assert_eq!(summarize(&ds, &verdicts, &cases).top_risk_state, "Bihar");
    }

    #[test]
    fn test_top_risk_state_tie_break_first_in_order() {
        let ds = Dataset::new(vec![
            record(Some("Kerala")),
            record(Some("Bihar")),
            record(Some("Bihar")),
            record(Some("Kerala")),
        ]);
        let verdicts = vec![verdict(0), verdict(1), verdict(2), verdict(3)];
        let cases = vec![case(1.0, 90); 4];

        // Bihar reaches count 2 first (record 2), before Kerala does.
        assert_eq!(summarize(&ds, &verdicts, &cases).top_risk_state, "Bihar");
    }

    #[test]
    fn test_missing_state_field() {
        let ds = Dataset::new(vec![record(None)]);
        let verdicts = vec![verdict(0)];
        let cases = vec![case(1.0, 90)];

        assert_eq!(summarize(&ds, &verdicts, &cases).top_risk_state, NO_TOP_RISK_STATE);
    }
}
