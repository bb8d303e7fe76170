use serde_json::{json, Value};

use crate::config::RuntimeConfig;

pub trait MetricsSink {
    fn add_count(&self, name: &str, value: u64);
}

/// Writes CloudWatch Embedded Metric Format documents to stdout, where the
/// Lambda log pipeline extracts them into metrics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmfMetrics {
    namespace: String,
    service: String,
}

impl EmfMetrics {
    pub fn new(namespace: impl Into<String>, service: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            service: service.into(),
        }
    }

    pub fn from_runtime_config(config: &RuntimeConfig) -> Self {
        Self::new(&config.metrics_namespace, &config.metrics_service)
    }

    pub fn count_document(&self, name: &str, value: u64, timestamp_ms: i64) -> Value {
        let mut document = json!({
            "_aws": {
                "Timestamp": timestamp_ms,
                "CloudWatchMetrics": [{
                    "Namespace": self.namespace,
                    "Dimensions": [["service"]],
                    "Metrics": [{"Name": name, "Unit": "Count"}],
                }],
            },
            "service": self.service,
        });
        document[name] = json!(value);
        document
    }
}

impl MetricsSink for EmfMetrics {
    fn add_count(&self, name: &str, value: u64) {
        let timestamp_ms = chrono::Utc::now().timestamp_millis();
        println!("{}", self.count_document(name, value, timestamp_ms));
    }
}

#[cfg(any(test, feature = "test-helpers"))]
pub use recording::RecordingMetrics;

#[cfg(any(test, feature = "test-helpers"))]
mod recording {
    use std::sync::{Mutex, PoisonError};

    use super::MetricsSink;

    #[derive(Debug, Default)]
    pub struct RecordingMetrics {
        counts: Mutex<Vec<(String, u64)>>,
    }

    impl RecordingMetrics {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn names(&self) -> Vec<String> {
            self.counts
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .iter()
                .map(|(name, _)| name.clone())
                .collect()
        }
    }

    impl MetricsSink for RecordingMetrics {
        fn add_count(&self, name: &str, value: u64) {
            self.counts
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push((name.to_string(), value));
        }
    }
}
