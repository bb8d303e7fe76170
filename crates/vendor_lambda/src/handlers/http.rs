use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use vendor_core::contract::ValidationError;

pub const ALLOWED_HEADERS: &str = "Content-Type, x-api-key";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiGatewayResponse {
    #[serde(rename = "statusCode")]
    pub status_code: u16,
    pub headers: Value,
    pub body: String,
}

impl ApiGatewayResponse {
    pub fn json_body(&self) -> Result<Value, serde_json::Error> {
        serde_json::from_str(&self.body)
    }
}

/// Per-invocation settings shared by the browser-facing handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpHandlerConfig {
    pub cors: CorsPolicy,
    pub request_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CorsPolicy {
    pub allowed_origin: String,
}

impl CorsPolicy {
    pub fn new(allowed_origin: impl Into<String>) -> Self {
        Self {
            allowed_origin: allowed_origin.into(),
        }
    }

    pub fn preflight_headers(&self) -> Value {
        json!({
            "Access-Control-Allow-Origin": self.allowed_origin,
            "Access-Control-Allow-Headers": ALLOWED_HEADERS,
        })
    }

    pub fn json_headers(&self) -> Value {
        let mut headers = self.preflight_headers();
        headers["Content-Type"] = json!("application/json");
        headers
    }
}

/// Failure classes of the HTTP operations, each with a fixed status code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationError {
    Validation(ValidationError),
    NotFound,
    Store(String),
}

impl OperationError {
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::NotFound => 404,
            Self::Store(_) => 500,
        }
    }

    pub fn into_response(self, cors: &CorsPolicy) -> ApiGatewayResponse {
        let status_code = self.status_code();
        let body = match self {
            Self::Validation(error) => json!({"error": error.to_string()}),
            Self::NotFound => json!({"error": "Vendor not found"}),
            Self::Store(message) => json!({
                "error": "Internal Server Error",
                "message": message,
            }),
        };
        ApiGatewayResponse {
            status_code,
            headers: cors.json_headers(),
            body: body.to_string(),
        }
    }
}

impl fmt::Display for OperationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Validation(error) => write!(f, "{error}"),
            Self::NotFound => f.write_str("Vendor not found"),
            Self::Store(message) => f.write_str(message),
        }
    }
}

impl std::error::Error for OperationError {}

impl From<ValidationError> for OperationError {
    fn from(error: ValidationError) -> Self {
        Self::Validation(error)
    }
}

/// Accepts REST (`httpMethod`) and HTTP API (`requestContext.http.method`)
/// event shapes.
pub fn is_preflight(event: &Value) -> bool {
    event
        .get("httpMethod")
        .or_else(|| event.pointer("/requestContext/http/method"))
        .and_then(Value::as_str)
        .map(|method| method.eq_ignore_ascii_case("OPTIONS"))
        .unwrap_or(false)
}

pub fn preflight_response(cors: &CorsPolicy) -> ApiGatewayResponse {
    ApiGatewayResponse {
        status_code: 200,
        headers: cors.preflight_headers(),
        body: String::new(),
    }
}

/// Request payload of a proxy event. An event without a `body` key is a
/// direct invocation and is its own payload.
pub fn request_body(event: &Value) -> Result<Value, ValidationError> {
    let Some(object) = event.as_object() else {
        return Err(ValidationError::Malformed(
            "request payload must be a JSON object".to_string(),
        ));
    };

    let Some(body) = object.get("body") else {
        return Ok(event.clone());
    };

    match body {
        Value::Null => Ok(json!({})),
        Value::Object(_) => Ok(body.clone()),
        Value::String(text) if text.trim().is_empty() => Ok(json!({})),
        Value::String(text) => match serde_json::from_str(text) {
            Ok(Value::Null) => Ok(json!({})),
            Ok(decoded) => Ok(decoded),
            Err(error) => Err(ValidationError::Malformed(format!(
                "invalid JSON body: {error}"
            ))),
        },
        _ => Err(ValidationError::Malformed(
            "request body must be a JSON object".to_string(),
        )),
    }
}

pub fn path_parameter<'a>(event: &'a Value, name: &str) -> Option<&'a str> {
    event
        .get("pathParameters")
        .and_then(|parameters| parameters.get(name))
        .and_then(Value::as_str)
        .filter(|value| !value.trim().is_empty())
}

pub fn json_response(
    status_code: u16,
    cors: &CorsPolicy,
    payload: &impl Serialize,
) -> ApiGatewayResponse {
    match serde_json::to_string(payload) {
        Ok(body) => ApiGatewayResponse {
            status_code,
            headers: cors.json_headers(),
            body,
        },
        Err(error) => {
            OperationError::Store(format!("failed to serialize response: {error}"))
                .into_response(cors)
        }
    }
}
