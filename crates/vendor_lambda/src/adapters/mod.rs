pub mod dynamodb;
#[cfg(any(test, feature = "test-helpers"))]
pub mod memory_store;
pub mod metrics;
pub mod record_store;
