use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use vendor_core::records::{IncentiveRecord, VendorRecord};
use vendor_core::seeding::{validate_seed_request, SeedGenerator, SeedRequest};
use vendor_core::tables::Table;

use crate::adapters::record_store::RecordStore;
use crate::logging::{log_error, log_info};

const COMPONENT: &str = "seed_vendor";

/// Plain status/message pair; the seed function is not browser-facing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SeedResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedHandlerConfig {
    pub today: NaiveDate,
    pub request_id: String,
}

pub fn handle_seed_event(
    event: Value,
    config: &SeedHandlerConfig,
    store: &impl RecordStore,
) -> SeedResponse {
    let result = parse_seed_request(event).and_then(|request| {
        log_info(
            COMPONENT,
            "seeding_started",
            json!({"request_id": config.request_id, "count": request.count}),
        );
        seed_records(&request, config.today, store)
    });

    match result {
        Ok(count) => {
            log_info(
                COMPONENT,
                "seeding_completed",
                json!({"request_id": config.request_id, "count": count}),
            );
            SeedResponse {
                status_code: 200,
                body: format!("Seeded {count} records successfully."),
            }
        }
        Err(error) => {
            log_error(
                COMPONENT,
                "seeding_failed",
                json!({"request_id": config.request_id, "error": error}),
            );
            SeedResponse {
                status_code: 500,
                body: format!("Error seeding data: {error}"),
            }
        }
    }
}

pub fn parse_seed_request(event: Value) -> Result<SeedRequest, String> {
    if event.is_null() {
        return Ok(SeedRequest::default());
    }
    serde_json::from_value(event).map_err(|error| format!("invalid seed event: {error}"))
}

/// Generates `request.count` pairs and bulk-writes every vendor before any
/// incentive. Returns the number of pairs written.
pub fn seed_records(
    request: &SeedRequest,
    today: NaiveDate,
    store: &impl RecordStore,
) -> Result<usize, String> {
    validate_seed_request(request)?;
    if request.count == 0 {
        return Ok(0);
    }

    let batch = SeedGenerator::new(request.seed, today).generate(request.count);
    let vendor_items = batch
        .vendors
        .iter()
        .map(VendorRecord::to_item)
        .collect::<Result<Vec<_>, _>>()?;
    let incentive_items = batch
        .incentives
        .iter()
        .map(IncentiveRecord::to_item)
        .collect::<Result<Vec<_>, _>>()?;

    store.batch_put_items(Table::Vendors, vendor_items)?;
    store.batch_put_items(Table::Incentives, incentive_items)?;
    Ok(batch.vendors.len())
}
