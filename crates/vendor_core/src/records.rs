use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};
use uuid::Uuid;

use crate::contract::NewVendor;
use crate::tables::PARTITION_KEY;

/// A stored record: one flat attribute map per key.
pub type Item = Map<String, Value>;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct VendorRecord {
    pub vendor_id: String,
    pub vendor_name: String,
    pub key_account: bool,
    pub region: Option<String>,
    pub industry: Option<String>,
    pub contact_email: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IncentiveRecord {
    pub vendor_id: String,
    pub available_discount: Number,
    pub discount_type: Option<String>,
    pub discount_expiry_date: Option<String>,
}

impl VendorRecord {
    pub fn to_item(&self) -> Result<Item, String> {
        to_item(self)
    }
}

impl IncentiveRecord {
    pub fn to_item(&self) -> Result<Item, String> {
        to_item(self)
    }
}

pub fn new_vendor_id() -> String {
    Uuid::new_v4().to_string()
}

/// Splits a validated request into the two independently stored records.
pub fn build_records(vendor_id: String, vendor: NewVendor) -> (VendorRecord, IncentiveRecord) {
    let incentive = IncentiveRecord {
        vendor_id: vendor_id.clone(),
        available_discount: vendor.available_discount,
        discount_type: vendor.discount_type,
        discount_expiry_date: vendor.discount_expiry_date,
    };
    let vendor = VendorRecord {
        vendor_id,
        vendor_name: vendor.vendor_name,
        key_account: vendor.key_account,
        region: vendor.region,
        industry: vendor.industry,
        contact_email: vendor.contact_email,
    };
    (vendor, incentive)
}

/// Flat view of a vendor and its incentive. Incentive attributes win on a
/// key collision; a vendor with no incentive is returned as-is.
pub fn merge_vendor_view(vendor: Item, incentive: Option<Item>) -> Item {
    let mut merged = vendor;
    if let Some(incentive) = incentive {
        merged.extend(incentive);
    }
    merged
}

pub fn item_partition_key(item: &Item) -> Option<&str> {
    item.get(PARTITION_KEY).and_then(Value::as_str)
}

fn to_item(value: &impl Serialize) -> Result<Item, String> {
    match serde_json::to_value(value) {
        Ok(Value::Object(item)) => Ok(item),
        Ok(other) => Err(format!("record must serialize to an object, got {other}")),
        Err(error) => Err(format!("failed to serialize record: {error}")),
    }
}
