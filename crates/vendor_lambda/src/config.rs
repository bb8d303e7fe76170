use vendor_core::tables::{TableNames, DEFAULT_INCENTIVES_TABLE, DEFAULT_VENDORS_TABLE};

use crate::handlers::http::CorsPolicy;

pub const VENDORS_TABLE_ENV: &str = "VENDORS_TABLE";
pub const INCENTIVES_TABLE_ENV: &str = "INCENTIVES_TABLE";
pub const CORS_ALLOWED_ORIGIN_ENV: &str = "CORS_ALLOWED_ORIGIN";
pub const METRICS_NAMESPACE_ENV: &str = "METRICS_NAMESPACE";
pub const METRICS_SERVICE_ENV: &str = "METRICS_SERVICE";

pub const DEFAULT_ALLOWED_ORIGIN: &str = "http://localhost:8000";
pub const DEFAULT_METRICS_NAMESPACE: &str = "VendorService";
pub const DEFAULT_METRICS_SERVICE: &str = "vendor_service";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeConfig {
    pub tables: TableNames,
    pub allowed_origin: String,
    pub metrics_namespace: String,
    pub metrics_service: String,
}

impl RuntimeConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Blank values fall back to the defaults, same as unset ones.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let read = |key: &str, default: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            tables: TableNames::new(
                read(VENDORS_TABLE_ENV, DEFAULT_VENDORS_TABLE),
                read(INCENTIVES_TABLE_ENV, DEFAULT_INCENTIVES_TABLE),
            ),
            allowed_origin: read(CORS_ALLOWED_ORIGIN_ENV, DEFAULT_ALLOWED_ORIGIN),
            metrics_namespace: read(METRICS_NAMESPACE_ENV, DEFAULT_METRICS_NAMESPACE),
            metrics_service: read(METRICS_SERVICE_ENV, DEFAULT_METRICS_SERVICE),
        }
    }

    pub fn cors(&self) -> CorsPolicy {
        CorsPolicy::new(self.allowed_origin.clone())
    }
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}
