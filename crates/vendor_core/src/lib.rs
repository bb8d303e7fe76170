//! Shared vendor/incentive domain primitives.
//!
//! This crate owns the record model, the create-request contract and its
//! validation, batch-write planning, and synthetic seed generation. It
//! intentionally excludes AWS SDK and Lambda runtime concerns.
//! See `crates/vendor_core/README.md` for ownership boundaries.

pub mod batching;
pub mod contract;
pub mod records;
pub mod seeding;
pub mod tables;
