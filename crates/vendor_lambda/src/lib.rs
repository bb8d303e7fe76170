//! AWS-oriented adapters and handlers for the vendor service.
//!
//! This crate owns runtime integration details (Lambda handlers, DynamoDB and
//! metrics adapters, environment configuration, structured logging). Domain
//! rules live in `vendor_core`.
//! See `crates/vendor_lambda/README.md` for ownership boundaries.

pub mod adapters;
pub mod config;
pub mod handlers;
pub mod logging;
