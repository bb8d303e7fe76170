use chrono::{Days, NaiveDate};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::Deserialize;
use serde_json::Number;
use uuid::Builder;

use crate::contract::EXPIRY_DATE_FORMAT;
use crate::records::{IncentiveRecord, VendorRecord};

pub const DEFAULT_SEED_COUNT: usize = 100;
pub const MAX_SEED_COUNT: usize = 10_000;

pub const COMPANY_NAMES: [&str; 5] = [
    "TechCorp",
    "Innovative Solutions",
    "Global Ventures",
    "NextGen Solutions",
    "BusinessCo",
];
pub const COUNTRIES: [&str; 5] = ["USA", "Canada", "UK", "Germany", "France"];
pub const INDUSTRIES: [&str; 5] = ["Technology", "Healthcare", "Finance", "Retail", "Education"];
pub const EMAIL_DOMAINS: [&str; 5] = [
    "example.com",
    "techcorp.com",
    "innovations.com",
    "ventures.com",
    "nextgen.com",
];
pub const DISCOUNT_TYPES: [&str; 2] = ["percentage", "flat"];

pub const MIN_DISCOUNT: f64 = 5.0;
pub const MAX_DISCOUNT: f64 = 30.0;
pub const MIN_EXPIRY_DAYS: u64 = 1;
pub const MAX_EXPIRY_DAYS: u64 = 365;
pub const EMAIL_LOCAL_PART_LEN: usize = 10;

const EMAIL_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SeedRequest {
    #[serde(default = "default_seed_count")]
    pub count: usize,
    /// Fixes the generator for reproducible demo data.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl Default for SeedRequest {
    fn default() -> Self {
        Self {
            count: DEFAULT_SEED_COUNT,
            seed: None,
        }
    }
}

pub fn default_seed_count() -> usize {
    DEFAULT_SEED_COUNT
}

pub fn validate_seed_request(request: &SeedRequest) -> Result<(), String> {
    if request.count > MAX_SEED_COUNT {
        return Err(format!(
            "count {} exceeds MAX_SEED_COUNT={MAX_SEED_COUNT}",
            request.count
        ));
    }
    Ok(())
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SeedBatch {
    pub vendors: Vec<VendorRecord>,
    pub incentives: Vec<IncentiveRecord>,
}

pub struct SeedGenerator {
    rng: StdRng,
    today: NaiveDate,
}

impl SeedGenerator {
    pub fn new(seed: Option<u64>, today: NaiveDate) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng, today }
    }

    pub fn generate(&mut self, count: usize) -> SeedBatch {
        let mut batch = SeedBatch {
            vendors: Vec::with_capacity(count),
            incentives: Vec::with_capacity(count),
        };
        for _ in 0..count {
            let vendor = self.vendor_record();
            batch.incentives.push(self.incentive_record(&vendor.vendor_id));
            batch.vendors.push(vendor);
        }
        batch
    }

    pub fn vendor_record(&mut self) -> VendorRecord {
        VendorRecord {
            vendor_id: self.vendor_id(),
            vendor_name: self.pick(&COMPANY_NAMES).to_string(),
            key_account: self.rng.gen(),
            region: Some(self.pick(&COUNTRIES).to_string()),
            industry: Some(self.pick(&INDUSTRIES).to_string()),
            contact_email: Some(self.email()),
        }
    }

    pub fn incentive_record(&mut self, vendor_id: &str) -> IncentiveRecord {
        IncentiveRecord {
            vendor_id: vendor_id.to_string(),
            available_discount: self.discount(),
            discount_type: Some(self.pick(&DISCOUNT_TYPES).to_string()),
            discount_expiry_date: Some(self.expiry_date()),
        }
    }

    /// v4 uuid drawn from this generator, so seeded runs repeat their ids.
    fn vendor_id(&mut self) -> String {
        let bytes: [u8; 16] = self.rng.gen();
        Builder::from_random_bytes(bytes).into_uuid().to_string()
    }

    fn discount(&mut self) -> Number {
        let raw = self.rng.gen_range(MIN_DISCOUNT..=MAX_DISCOUNT);
        Number::from(raw.round() as i64)
    }

    fn expiry_date(&mut self) -> String {
        let offset = self.rng.gen_range(MIN_EXPIRY_DAYS..=MAX_EXPIRY_DAYS);
        (self.today + Days::new(offset))
            .format(EXPIRY_DATE_FORMAT)
            .to_string()
    }

    fn email(&mut self) -> String {
        let local: String = (0..EMAIL_LOCAL_PART_LEN)
            .map(|_| EMAIL_ALPHABET[self.rng.gen_range(0..EMAIL_ALPHABET.len())] as char)
            .collect();
        format!("{local}@{}", self.pick(&EMAIL_DOMAINS))
    }

    fn pick(&mut self, options: &[&'static str]) -> &'static str {
        options[self.rng.gen_range(0..options.len())]
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use uuid::Uuid;

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 14).expect("valid date")
    }

    #[test]
    fn generates_requested_number_of_pairs() {
        let batch = SeedGenerator::new(Some(7), today()).generate(DEFAULT_SEED_COUNT);

        assert_eq!(batch.vendors.len(), 100);
        assert_eq!(batch.incentives.len(), 100);
        for (vendor, incentive) in batch.vendors.iter().zip(&batch.incentives) {
            assert_eq!(vendor.vendor_id, incentive.vendor_id);
        }
    }

    #[test]
    fn vendor_ids_are_unique_v4_uuids() {
        let batch = SeedGenerator::new(Some(11), today()).generate(500);
        let ids: HashSet<&str> = batch.vendors.iter().map(|v| v.vendor_id.as_str()).collect();

        assert_eq!(ids.len(), 500);
        for id in ids {
            let parsed = Uuid::parse_str(id).expect("seeded id should parse");
            assert_eq!(parsed.get_version_num(), 4);
        }
    }

    #[test]
    fn discounts_are_whole_numbers_within_bounds() {
        let batch = SeedGenerator::new(Some(3), today()).generate(1_000);
        for incentive in &batch.incentives {
            let discount = incentive
                .available_discount
                .as_i64()
                .expect("discount should be an integer");
            assert!((5..=30).contains(&discount), "discount {discount} out of range");
        }
    }

    #[test]
    fn expiry_dates_fall_within_a_year_of_generation() {
        let batch = SeedGenerator::new(Some(5), today()).generate(1_000);
        for incentive in &batch.incentives {
            let text = incentive
                .discount_expiry_date
                .as_deref()
                .expect("seeded incentives carry an expiry date");
            let date = NaiveDate::parse_from_str(text, EXPIRY_DATE_FORMAT)
                .expect("expiry should be an ISO date");
            let offset = (date - today()).num_days();
            assert!((1..=365).contains(&offset), "offset {offset} out of range");
        }
    }

    #[test]
    fn fields_come_from_fixed_enumerations() {
        let batch = SeedGenerator::new(Some(9), today()).generate(200);
        for vendor in &batch.vendors {
            assert!(COMPANY_NAMES.contains(&vendor.vendor_name.as_str()));
            assert!(COUNTRIES.contains(&vendor.region.as_deref().expect("region")));
            assert!(INDUSTRIES.contains(&vendor.industry.as_deref().expect("industry")));

            let email = vendor.contact_email.as_deref().expect("email");
            let (local, domain) = email.split_once('@').expect("email has a domain");
            assert_eq!(local.len(), EMAIL_LOCAL_PART_LEN);
            assert!(local.chars().all(|c| c.is_ascii_alphabetic()));
            assert!(EMAIL_DOMAINS.contains(&domain));
        }
        for incentive in &batch.incentives {
            assert!(DISCOUNT_TYPES.contains(&incentive.discount_type.as_deref().expect("type")));
        }
    }

    #[test]
    fn same_seed_reproduces_batch() {
        let first = SeedGenerator::new(Some(42), today()).generate(20);
        let second = SeedGenerator::new(Some(42), today()).generate(20);
        assert_eq!(first, second);
    }

    #[test]
    fn seed_request_defaults_to_one_hundred() {
        let request: SeedRequest = serde_json::from_str("{}").expect("empty event should parse");
        assert_eq!(request, SeedRequest::default());
        assert_eq!(request.count, 100);
    }

    #[test]
    fn rejects_oversized_seed_request() {
        let request = SeedRequest {
            count: MAX_SEED_COUNT + 1,
            seed: None,
        };
        let error = validate_seed_request(&request).expect_err("request should fail");
        assert!(error.contains("MAX_SEED_COUNT"));
    }
}
