//! # Meridian Core Types
//!
//! This crate defines the input records shared by every analytics engine in
//! the workspace. It is Layer 0: no other workspace crate sits below it, and
//! it knows nothing about where the records come from (database, HTTP body,
//! JSON file) or where the results go.
//!
//! ## Architectural Principles
//!
//! - **Plain data:** `SaleRecord`, `PurchaseRecord` and `ProductRecord` are
//!   immutable snapshots supplied by the caller. The engines never mutate
//!   them and never hold onto them past a single call.
//! - **Fail fast:** `validate()` rejects records that would otherwise poison
//!   a whole computation (negative money, negative stock). A malformed
//!   record fails the call, it is never silently coerced.

pub mod error;
pub mod records;

// Re-export the core types to provide a clean public API.
pub use error::CoreError;
pub use records::{ProductRecord, PurchaseRecord, SaleRecord};
