use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use vendor_core::contract::{parse_create_request, validate_create_request};
use vendor_core::records::{build_records, new_vendor_id};
use vendor_core::tables::Table;

use crate::adapters::metrics::MetricsSink;
use crate::adapters::record_store::RecordStore;
use crate::handlers::http::{
    is_preflight, json_response, preflight_response, request_body, ApiGatewayResponse,
    HttpHandlerConfig, OperationError,
};
use crate::logging::{log_error, log_info};

const COMPONENT: &str = "create_vendor";

pub const CREATED_METRIC: &str = "VendorIncentiveCreated";
pub const CREATION_FAILED_METRIC: &str = "VendorIncentiveCreationFailed";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreateVendorResponse {
    pub vendor_id: String,
}

pub fn handle_create_event(
    event: Value,
    config: &HttpHandlerConfig,
    store: &impl RecordStore,
    metrics: &impl MetricsSink,
) -> ApiGatewayResponse {
    if is_preflight(&event) {
        return preflight_response(&config.cors);
    }

    log_info(
        COMPONENT,
        "event_received",
        json!({"request_id": config.request_id, "event": event}),
    );

    match create_vendor(&event, &config.request_id, store) {
        Ok(vendor_id) => {
            log_info(
                COMPONENT,
                "vendor_created",
                json!({"request_id": config.request_id, "vendor_id": vendor_id}),
            );
            metrics.add_count(CREATED_METRIC, 1);
            json_response(201, &config.cors, &CreateVendorResponse { vendor_id })
        }
        Err(error) => {
            log_error(
                COMPONENT,
                "vendor_creation_failed",
                json!({
                    "request_id": config.request_id,
                    "status_code": error.status_code(),
                    "error": error.to_string(),
                }),
            );
            metrics.add_count(CREATION_FAILED_METRIC, 1);
            error.into_response(&config.cors)
        }
    }
}

/// Validates the whole request, then writes the vendor record followed by the
/// incentive record. The writes are independent: if the second one fails the
/// vendor record stays behind and the error is returned.
pub fn create_vendor(
    event: &Value,
    request_id: &str,
    store: &impl RecordStore,
) -> Result<String, OperationError> {
    let body = request_body(event)?;
    let new_vendor = validate_create_request(parse_create_request(body)?)?;

    let vendor_id = new_vendor_id();
    log_info(
        COMPONENT,
        "vendor_id_generated",
        json!({"request_id": request_id, "vendor_id": vendor_id}),
    );

    let (vendor, incentive) = build_records(vendor_id.clone(), new_vendor);
    let vendor_item = vendor.to_item().map_err(OperationError::Store)?;
    let incentive_item = incentive.to_item().map_err(OperationError::Store)?;

    store
        .put_item(Table::Vendors, vendor_item)
        .map_err(OperationError::Store)?;

    if let Err(error) = store.put_item(Table::Incentives, incentive_item) {
        log_error(
            COMPONENT,
            "partial_write",
            json!({
                "request_id": request_id,
                "vendor_id": vendor_id,
                "written": [Table::Vendors.to_string()],
                "failed": Table::Incentives.to_string(),
                "error": error,
            }),
        );
        return Err(OperationError::Store(error));
    }

    Ok(vendor_id)
}
