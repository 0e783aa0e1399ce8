//! Fraud scoring engine
//!
//! A pure, stateless pipeline from an in-memory [`Dataset`] to an
//! [`AnalysisResult`]: deterministic rules and z-score outlier detection run
//! independently over the records, their outputs are fused per record, and
//! flagged cases are reduced into a summary plus a narrative report. The
//! engine holds no state between runs; identical input yields identical
//! output.

pub mod aggregate;
pub mod dataset;
pub mod fusion;
pub mod report;
pub mod rules;
pub mod stats;

use serde::{Deserialize, Serialize};

pub use aggregate::AnalysisSummary;
pub use dataset::{Dataset, FieldValue, Record};
pub use fusion::{FraudCase, FraudVerdict};
pub use report::AnalysisReportDetails;

/// Full result of one analysis run, JSON-serializable for storage and the
/// API response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub file_id: String,
    pub summary: AnalysisSummary,
    pub cases: Vec<FraudCase>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_details: Option<AnalysisReportDetails>,
}

/// Engine facade. Stateless; safe to share across concurrent analysis runs.
#[derive(Debug, Clone, Default)]
pub struct FraudDetector;

impl FraudDetector {
    pub fn new() -> Self {
        Self
    }

    /// Run the full pipeline over one dataset.
    pub fn detect(&self, file_id: &str, dataset: &Dataset) -> AnalysisResult {
        let rule_flags = rules::evaluate(dataset);
        let stat_outcome = stats::analyze(dataset);

        let verdicts = fusion::fuse(dataset, &rule_flags, &stat_outcome);
        let cases: Vec<FraudCase> = verdicts
            .iter()
            .map(|v| fusion::build_case(dataset, v))
            .collect();

        let summary = aggregate::summarize(dataset, &verdicts, &cases);

        tracing::info!(
            file_id,
            total_records = summary.total_records,
            flagged = summary.flagged_count,
            "analysis complete"
        );

        let report_details = Some(report::synthesize(&summary));

        AnalysisResult {
            file_id: file_id.to_string(),
            summary,
            cases,
            report_details,
        }
    }
}
