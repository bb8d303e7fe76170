use std::fmt;

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::{Number, Value};

pub const EXPIRY_DATE_FORMAT: &str = "%Y-%m-%d";

/// Required create fields, in the order they are checked.
pub const REQUIRED_CREATE_FIELDS: [&str; 3] =
    ["vendor_name", "key_account", "available_discount"];

/// Create payload as received. Every field is optional here so that a missing
/// required field is reported by name instead of as a generic decode error.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct CreateVendorRequest {
    pub vendor_name: Option<String>,
    pub key_account: Option<bool>,
    pub region: Option<String>,
    pub industry: Option<String>,
    pub contact_email: Option<String>,
    pub available_discount: Option<Number>,
    pub discount_type: Option<String>,
    pub discount_expiry_date: Option<String>,
}

/// A create request that passed validation. No identifier exists yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewVendor {
    pub vendor_name: String,
    pub key_account: bool,
    pub region: Option<String>,
    pub industry: Option<String>,
    pub contact_email: Option<String>,
    pub available_discount: Number,
    pub discount_type: Option<String>,
    pub discount_expiry_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    MissingField(&'static str),
    MissingPathParameter(&'static str),
    InvalidField {
        field: &'static str,
        message: String,
    },
    Malformed(String),
}

impl ValidationError {
    pub fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidField {
            field,
            message: message.into(),
        }
    }

    pub fn field(&self) -> Option<&'static str> {
        match self {
            Self::MissingField(field) | Self::MissingPathParameter(field) => Some(*field),
            Self::InvalidField { field, .. } => Some(*field),
            Self::Malformed(_) => None,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "Missing required field: {field}"),
            Self::MissingPathParameter(name) => write!(f, "Missing path parameter: {name}"),
            Self::InvalidField { field, message } => write!(f, "Invalid field {field}: {message}"),
            Self::Malformed(message) => write!(f, "Malformed request: {message}"),
        }
    }
}

impl std::error::Error for ValidationError {}

pub fn parse_create_request(body: Value) -> Result<CreateVendorRequest, ValidationError> {
    if !body.is_object() {
        return Err(ValidationError::Malformed(
            "request body must be a JSON object".to_string(),
        ));
    }

    serde_json::from_value(body).map_err(|error| ValidationError::Malformed(error.to_string()))
}

/// Checks every required field before anything else happens, so a rejected
/// request never reaches id generation or the store.
pub fn validate_create_request(
    request: CreateVendorRequest,
) -> Result<NewVendor, ValidationError> {
    let Some(vendor_name) = request.vendor_name else {
        return Err(ValidationError::MissingField("vendor_name"));
    };
    let Some(key_account) = request.key_account else {
        return Err(ValidationError::MissingField("key_account"));
    };
    let Some(available_discount) = request.available_discount else {
        return Err(ValidationError::MissingField("available_discount"));
    };

    let discount_expiry_date = request
        .discount_expiry_date
        .map(|text| normalize_expiry_date(&text))
        .transpose()?;

    Ok(NewVendor {
        vendor_name,
        key_account,
        region: request.region,
        industry: request.industry,
        contact_email: request.contact_email,
        available_discount,
        discount_type: request.discount_type,
        discount_expiry_date,
    })
}

fn normalize_expiry_date(text: &str) -> Result<String, ValidationError> {
    NaiveDate::parse_from_str(text.trim(), EXPIRY_DATE_FORMAT)
        .map(|date| date.format(EXPIRY_DATE_FORMAT).to_string())
        .map_err(|error| {
            ValidationError::invalid(
                "discount_expiry_date",
                format!("expected an ISO-8601 date (YYYY-MM-DD): {error}"),
            )
        })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn full_body() -> Value {
        json!({
            "vendor_name": "TestCorp",
            "key_account": true,
            "region": "USA",
            "industry": "Tech",
            "contact_email": "test@example.com",
            "available_discount": 20,
            "discount_type": "percentage",
            "discount_expiry_date": "2025-12-31"
        })
    }

    fn without(field: &str) -> Value {
        let mut body = full_body();
        body.as_object_mut()
            .expect("body is an object")
            .remove(field);
        body
    }

    #[test]
    fn accepts_complete_request() {
        let request = parse_create_request(full_body()).expect("body should parse");
        let vendor = validate_create_request(request).expect("request should pass");

        assert_eq!(vendor.vendor_name, "TestCorp");
        assert!(vendor.key_account);
        assert_eq!(vendor.available_discount, Number::from(20));
        assert_eq!(vendor.discount_expiry_date.as_deref(), Some("2025-12-31"));
    }

    #[test]
    fn reports_each_missing_required_field_by_name() {
        for field in REQUIRED_CREATE_FIELDS {
            let request = parse_create_request(without(field)).expect("body should parse");
            let error = validate_create_request(request).expect_err("request should fail");

            assert_eq!(error, ValidationError::MissingField(field));
            assert!(error.to_string().contains("Missing required field"));
            assert!(error.to_string().contains(field));
        }
    }

    #[test]
    fn explicit_null_counts_as_missing() {
        let mut body = full_body();
        body["key_account"] = Value::Null;
        let request = parse_create_request(body).expect("body should parse");

        let error = validate_create_request(request).expect_err("request should fail");
        assert_eq!(error.field(), Some("key_account"));
    }

    #[test]
    fn only_name_present_reports_key_account_first() {
        let request =
            parse_create_request(json!({"vendor_name": "TestCorp"})).expect("body should parse");
        let error = validate_create_request(request).expect_err("request should fail");
        assert_eq!(error, ValidationError::MissingField("key_account"));
    }

    #[test]
    fn optional_fields_may_be_absent() {
        let request = parse_create_request(json!({
            "vendor_name": "Solo",
            "key_account": false,
            "available_discount": 12.5
        }))
        .expect("body should parse");
        let vendor = validate_create_request(request).expect("request should pass");

        assert_eq!(vendor.region, None);
        assert_eq!(vendor.discount_type, None);
        assert_eq!(vendor.available_discount.as_f64(), Some(12.5));
    }

    #[test]
    fn rejects_wrongly_typed_field_as_malformed() {
        let mut body = full_body();
        body["key_account"] = json!("yes");

        let error = parse_create_request(body).expect_err("body should fail");
        assert!(matches!(error, ValidationError::Malformed(_)));
    }

    #[test]
    fn rejects_non_object_body() {
        let error = parse_create_request(json!([1, 2])).expect_err("array body should fail");
        assert_eq!(
            error.to_string(),
            "Malformed request: request body must be a JSON object"
        );
    }

    #[test]
    fn empty_vendor_name_counts_as_present() {
        let mut body = full_body();
        body["vendor_name"] = json!("");
        let request = parse_create_request(body).expect("body should parse");

        let vendor = validate_create_request(request).expect("request should pass");
        assert_eq!(vendor.vendor_name, "");
    }

    #[test]
    fn rejects_unparseable_expiry_date() {
        let mut body = full_body();
        body["discount_expiry_date"] = json!("31/12/2025");
        let request = parse_create_request(body).expect("body should parse");

        let error = validate_create_request(request).expect_err("request should fail");
        assert_eq!(error.field(), Some("discount_expiry_date"));
    }
}
