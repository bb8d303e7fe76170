use serde_json::{json, Value};
use vendor_core::contract::ValidationError;
use vendor_core::records::{merge_vendor_view, Item};
use vendor_core::tables::Table;

use crate::adapters::metrics::MetricsSink;
use crate::adapters::record_store::RecordStore;
use crate::handlers::http::{
    is_preflight, json_response, path_parameter, preflight_response, ApiGatewayResponse,
    HttpHandlerConfig, OperationError,
};
use crate::logging::{log_error, log_info};

const COMPONENT: &str = "get_vendor";

pub const FETCH_SUCCESS_METRIC: &str = "VendorFetchSuccess";
pub const FETCH_FAILED_METRIC: &str = "VendorFetchFailed";

pub fn handle_fetch_event(
    event: Value,
    config: &HttpHandlerConfig,
    store: &impl RecordStore,
    metrics: &impl MetricsSink,
) -> ApiGatewayResponse {
    if is_preflight(&event) {
        return preflight_response(&config.cors);
    }

    let Some(vendor_id) = path_parameter(&event, "vendor_id") else {
        log_error(
            COMPONENT,
            "missing_vendor_id",
            json!({"request_id": config.request_id}),
        );
        return OperationError::from(ValidationError::MissingPathParameter("vendor_id"))
            .into_response(&config.cors);
    };

    log_info(
        COMPONENT,
        "fetch_started",
        json!({"request_id": config.request_id, "vendor_id": vendor_id}),
    );

    match fetch_vendor(vendor_id, store) {
        Ok(view) => {
            log_info(
                COMPONENT,
                "fetch_completed",
                json!({
                    "request_id": config.request_id,
                    "vendor_id": vendor_id,
                    "has_incentive": view.contains_key("available_discount"),
                }),
            );
            metrics.add_count(FETCH_SUCCESS_METRIC, 1);
            json_response(200, &config.cors, &view)
        }
        Err(OperationError::NotFound) => {
            log_error(
                COMPONENT,
                "vendor_not_found",
                json!({"request_id": config.request_id, "vendor_id": vendor_id}),
            );
            OperationError::NotFound.into_response(&config.cors)
        }
        Err(error) => {
            log_error(
                COMPONENT,
                "fetch_failed",
                json!({
                    "request_id": config.request_id,
                    "vendor_id": vendor_id,
                    "error": error.to_string(),
                }),
            );
            metrics.add_count(FETCH_FAILED_METRIC, 1);
            error.into_response(&config.cors)
        }
    }
}

/// Reads both records and merges them. A vendor without an incentive is
/// still returned; an incentive without a vendor is not found.
pub fn fetch_vendor(vendor_id: &str, store: &impl RecordStore) -> Result<Item, OperationError> {
    let vendor = store
        .get_item(Table::Vendors, vendor_id)
        .map_err(OperationError::Store)?;
    let incentive = store
        .get_item(Table::Incentives, vendor_id)
        .map_err(OperationError::Store)?;

    let vendor = vendor.ok_or(OperationError::NotFound)?;
    Ok(merge_vendor_view(vendor, incentive))
}
