//! Narrative report synthesis
//!
//! Pure string templating over the already-computed summary; no new analysis
//! happens here.

use serde::{Deserialize, Serialize};

use super::aggregate::AnalysisSummary;

/// ₹ per Crore, used to express leakage in the denomination auditors expect
const RUPEES_PER_CRORE: f64 = 10_000_000.0;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReportDetails {
    pub executive_summary: String,
    pub key_findings: Vec<String>,
    pub recommendations: Vec<String>,
    pub conclusion: String,
}

/// Render the audit narrative from the file summary.
pub fn synthesize(summary: &AnalysisSummary) -> AnalysisReportDetails {
    let flagged_percent = if summary.total_records > 0 {
        summary.flagged_count as f64 / summary.total_records as f64 * 100.0
    } else {
        0.0
    };
    let compliant_percent = 100.0 - flagged_percent;
    let leakage_crore = summary.total_leakage_amount / RUPEES_PER_CRORE;

    let executive_summary = format!(
        "The automated audit of the provided beneficiary dataset flagged {:.1}% of the \
         total records ({} of {}) as 'High Risk'. The primary drivers are duplicate \
         identity registrations and income threshold violations. Immediate corrective \
         action is advised to prevent estimated leakage of ₹{:.2} Cr.",
        flagged_percent, summary.flagged_count, summary.total_records, leakage_crore
    );

    let key_findings = vec![
        format!(
            "{} beneficiaries flagged by the hybrid detection engine (rule-based + statistical), \
             with an average risk score of {}.",
            summary.flagged_count, summary.average_risk_score
        ),
        format!(
            "'{}' accounts for the highest concentration of flagged cases.",
            summary.top_risk_state
        ),
        "Duplicate Aadhaar registrations indicate possible ghost beneficiaries drawing \
         benefits under multiple schemes."
            .to_string(),
        "Income threshold violations suggest ineligible beneficiaries in the subsidy rolls."
            .to_string(),
    ];

    let recommendations = vec![
        format!(
            "Immediately freeze payments for the {} high-risk cases pending physical verification.",
            summary.flagged_count
        ),
        "Initiate e-KYC re-verification for beneficiaries sharing identical Aadhaar numbers."
            .to_string(),
        format!(
            "Deploy field inspection teams to '{}', where flagged cases are concentrated.",
            summary.top_risk_state
        ),
        "Integrate real-time income and identity validation to prevent future duplicate entries."
            .to_string(),
    ];

    let conclusion = format!(
        "While the majority of records ({:.1}%) appear compliant, the concentrated nature of \
         the flagged cases suggests coordinated leakage. Implementing the recommended freeze \
         and re-verification protocols could save the exchequer approximately ₹{:.2} Cr in \
         this cycle alone.",
        compliant_percent, leakage_crore
    );

    AnalysisReportDetails {
        executive_summary,
        key_findings,
        recommendations,
        conclusion,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary() -> AnalysisSummary {
        AnalysisSummary {
            total_leakage_amount: 14_500_000.0,
            flagged_count: 22,
            total_records: 1000,
            average_risk_score: 91,
            top_risk_state: "Uttar Pradesh".to_string(),
        }
    }

    #[test]
    fn test_executive_summary_interpolation() {
        let report = synthesize(&summary());
        assert!(report.executive_summary.contains("2.2%"));
        assert!(report.executive_summary.contains("₹1.45 Cr"));
    }

    #[test]
    fn test_findings_and_recommendations_shape() {
        let report = synthesize(&summary());
        assert_eq!(report.key_findings.len(), 4);
        assert_eq!(report.recommendations.len(), 4);
        assert!(report.key_findings[0].contains("22"));
        assert!(report.key_findings[1].contains("Uttar Pradesh"));
        assert!(report.recommendations[2].contains("Uttar Pradesh"));
    }

    #[test]
    fn test_conclusion_complement_percentage() {
        let report = synthesize(&summary());
        assert!(report.conclusion.contains("97.8%"));
        assert!(report.conclusion.contains("₹1.45 Cr"));
    }

    #[test]
    fn test_empty_dataset_does_not_divide_by_zero() {
        let report = synthesize(&AnalysisSummary {
            total_leakage_amount: 0.0,
            flagged_count: 0,
            total_records: 0,
            average_risk_score: 0,
            top_risk_state: "N/A".to_string(),
        });
        assert!(report.executive_summary.contains("0.0%"));
        assert!(report.conclusion.contains("100.0%"));
    }
}
