//! Statistical anomaly detection
//!
//! Closed-form z-score outlier detection over the numeric features. This
//! replaces the isolation-forest approach used earlier in this product line:
//! no training step, no persisted model, identical output for identical input.

use super::dataset::Dataset;

// ============================================================================
// CONSTANTS
// ============================================================================

/// Numeric features examined per record
pub const FEATURES: [&str; 2] = ["amount", "income"];

/// |z| above this marks a record as a statistical outlier
pub const OUTLIER_Z: f64 = 3.0;

/// z-score cap used to normalize the risk contribution into [0, 1]
pub const NORMALIZATION_Z: f64 = 5.0;

/// Per-record output of the detector, index-aligned with the dataset.
#[derive(Debug, Clone, Default)]
pub struct StatOutcome {
    /// Outlier flag, OR-ed across features
    pub flags: Vec<bool>,
    /// Risk contribution in [0, 1], max across features
    pub scores: Vec<f64>,
}

/// Run z-score analysis over the whole dataset.
///
/// Per feature: coerce values (non-numeric and missing become 0), compute
/// mean and sample standard deviation, skip the feature when it is degenerate
/// (fewer than two records or zero deviation), otherwise flag |z| > 3 and
/// contribute min(|z| / 5, 1). A record anomalous on several axes keeps the
/// maximum contribution, not the sum.
pub fn analyze(dataset: &Dataset) -> StatOutcome {
    let n = dataset.len();
    let mut outcome = StatOutcome {
        flags: vec![false; n],
        scores: vec![0.0; n],
    };

    if n == 0 {
        return outcome;
    }

    for feature in FEATURES {
        if !dataset.has_field(feature) {
            continue;
        }

        let values: Vec<f64> = dataset
            .records
            .iter()
            .map(|r| r.number(feature).unwrap_or(0.0))
            .collect();

        let Some((mean, std_dev)) = mean_and_sample_std(&values) else {
            continue;
        };

        for (idx, value) in values.iter().enumerate() {
            let z = (value - mean) / std_dev;
            if z.abs() > OUTLIER_Z {
                outcome.flags[idx] = true;
            }
            let contribution = (z.abs() / NORMALIZATION_Z).min(1.0);
            if contribution > outcome.scores[idx] {
                outcome.scores[idx] = contribution;
            }
        }
    }

    outcome
}

/// Mean and sample (n-1) standard deviation, or `None` for degenerate
/// features (single value or zero spread).
fn mean_and_sample_std(values: &[f64]) -> Option<(f64, f64)> {
    let n = values.len();
    if n < 2 {
        return None;
    }

    let mean = values.iter().sum::<f64>() / n as f64;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n as f64 - 1.0);
    let std_dev = variance.sqrt();

    if std_dev == 0.0 || !std_dev.is_finite() {
        return None;
    }

    Some((mean, std_dev))
}
