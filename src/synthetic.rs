//! Synthetic beneficiary data generator
//!
//! Demo-only helper: produces plausible subsidy records and injects roughly
//! 10% known fraud patterns (duplicate Aadhaar, ineligible high-income
//! claimants, one colluding distributor cluster) so the engine has something
//! to find.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::engine::{FieldValue, Record};

const INDIAN_STATES: &[&str] = &[
    "Andhra Pradesh", "Arunachal Pradesh", "Assam", "Bihar", "Chhattisgarh",
    "Goa", "Gujarat", "Haryana", "Himachal Pradesh", "Jharkhand", "Karnataka",
    "Kerala", "Madhya Pradesh", "Maharashtra", "Manipur", "Meghalaya", "Mizoram",
    "Nagaland", "Odisha", "Punjab", "Rajasthan", "Sikkim", "Tamil Nadu",
    "Telangana", "Tripura", "Uttar Pradesh", "Uttarakhand", "West Bengal",
];

const SUBSIDY_TYPES: &[&str] = &[
    "PM-KISAN", "MGNREGA", "LPG Subsidy", "Fertilizer Subsidy", "PMAY",
];

const FIRST_NAMES: &[&str] = &[
    "Aarav", "Asha", "Deepak", "Farhan", "Geeta", "Ishaan", "Kavita", "Lakshmi",
    "Manoj", "Neha", "Pooja", "Rahul", "Ravi", "Sanjay", "Sunita", "Vikram",
];

const LAST_NAMES: &[&str] = &[
    "Sharma", "Verma", "Patel", "Reddy", "Nair", "Singh", "Das", "Yadav",
    "Khan", "Iyer", "Chauhan", "Mishra",
];

const DISTRICTS: &[&str] = &[
    "Patna", "Lucknow", "Jaipur", "Nagpur", "Kochi", "Indore", "Ranchi",
    "Varanasi", "Madurai", "Guwahati", "Raipur", "Amritsar",
];

/// Generate `num_rows` base records plus the injected fraud patterns.
pub fn generate(num_rows: usize) -> Vec<Record> {
    let mut rng = rand::thread_rng();
    let mut data: Vec<Record> = (0..num_rows).map(|_| base_record(&mut rng)).collect();

    let num_fraud = num_rows / 10;

    // 1. Duplicate Aadhaar (identity theft): copy an existing Aadhaar onto a
    //    record with a different name.
    for _ in 0..num_fraud / 3 {
        if data.is_empty() {
            break;
        }
        let source = data[rng.gen_range(0..data.len())].clone();
        let mut duplicate = source;
        set_text(&mut duplicate, "beneficiary_id", &uuid::Uuid::new_v4().to_string());
        set_text(&mut duplicate, "name", &random_name(&mut rng));
        set_number(&mut duplicate, "amount", round2(rng.gen_range(1000.0..50_000.0)));
        data.push(duplicate);
    }

    // 2. High income + high subsidy (ineligible beneficiary)
    for _ in 0..num_fraud / 3 {
        let mut record = base_record(&mut rng);
        set_number(&mut record, "amount", round2(rng.gen_range(80_000.0..150_000.0)));
        set_number(&mut record, "income", round2(rng.gen_range(1_500_000.0..5_000_000.0)));
        data.push(record);
    }

    // 3. Multiple claims through the same distributor on the same day
    //    (collusion)
    let distributor = format!("FRAUD-DIST-{:04}", rng.gen_range(0..10_000));
    let claim_date = random_date(&mut rng);
    for _ in 0..num_fraud / 3 {
        let mut record = base_record(&mut rng);
        set_number(&mut record, "amount", round2(rng.gen_range(5000.0..20_000.0)));
        set_number(&mut record, "income", round2(rng.gen_range(50_000.0..300_000.0)));
        set_text(&mut record, "distributor_id", &distributor);
        set_text(&mut record, "claim_date", &claim_date);
        data.push(record);
    }

    data.shuffle(&mut rng);
    data
}

fn base_record(rng: &mut impl Rng) -> Record {
    let mut record = Record::default();
    set_text(&mut record, "beneficiary_id", &uuid::Uuid::new_v4().to_string());
    set_text(&mut record, "aadhaar", &random_aadhaar(rng));
    set_text(&mut record, "name", &random_name(rng));
    set_text(&mut record, "state", INDIAN_STATES.choose(rng).unwrap());
    set_text(&mut record, "district", DISTRICTS.choose(rng).unwrap());
    set_text(&mut record, "subsidy_type", SUBSIDY_TYPES.choose(rng).unwrap());
    set_number(&mut record, "amount", round2(rng.gen_range(1000.0..50_000.0)));
    set_number(&mut record, "income", round2(rng.gen_range(50_000.0..1_000_000.0)));
    set_text(&mut record, "distributor_id", &format!("DIST-{:04}", rng.gen_range(0..10_000)));
    set_text(&mut record, "claim_date", &random_date(rng));
    record
}

fn set_text(record: &mut Record, field: &str, value: &str) {
    record
        .fields
        .insert(field.to_string(), FieldValue::Text(value.to_string()));
}

fn set_number(record: &mut Record, field: &str, value: f64) {
    record
        .fields
        .insert(field.to_string(), FieldValue::Number(value));
}

fn random_aadhaar(rng: &mut impl Rng) -> String {
    rng.gen_range(100_000_000_000u64..=999_999_999_999u64).to_string()
}

fn random_name(rng: &mut impl Rng) -> String {
    format!(
        "{} {}",
        FIRST_NAMES.choose(rng).unwrap(),
        LAST_NAMES.choose(rng).unwrap()
    )
}

/// ISO date within roughly the last year
fn random_date(rng: &mut impl Rng) -> String {
    let days_back = rng.gen_range(0..365i64);
    (chrono::Utc::now() - chrono::Duration::days(days_back))
        .format("%Y-%m-%d")
        .to_string()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_generates_requested_rows_plus_injection() {
        let data = generate(100);
        // 100 base + 3 * (10 / 3) injected
        assert_eq!(data.len(), 109);
    }

    #[test]
    fn test_records_carry_required_columns() {
        for record in generate(30) {
            assert!(record.field("aadhaar").is_some());
            assert!(record.number("amount").is_some());
            assert!(record.number("income").is_some());
        }
    }

    #[test]
    fn test_duplicate_aadhaar_injected() {
        let data = generate(100);
        let mut counts: HashMap<String, usize> = HashMap::new();
        for record in &data {
            if let Some(id) = record.text("aadhaar") {
                *counts.entry(id).or_insert(0) += 1;
            }
        }
        assert!(counts.values().any(|c| *c > 1));
    }

    #[test]
    fn test_small_counts_do_not_panic() {
        assert_eq!(generate(0).len(), 0);
        assert_eq!(generate(5).len(), 5);
    }
}
